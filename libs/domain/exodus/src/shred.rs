// [libs/domain/exodus/src/shred.rs]
/*!
 * =================================================================
 * APARATO: CRYPTO-SHRED EXECUTOR (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: DESTRUCCIÓN VERIFICADA DEL SILO EN DISCO
 *
 * Tras esta fase no queda material descifrable en el servidor: cada
 * artefacto se sobrescribe con CSPRNG a longitud idéntica, se
 * sincroniza, se desvincula y se re-verifica ausente (stat not-found).
 * Las solicitudes de cancelación durante la trituración se descartan
 * para preservar los invariantes en disco.
 * =================================================================
 */

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use custodia_core_chain::ChainFault;
use custodia_core_vault::keys::overwrite_with_entropy;
use custodia_domain_models::anchor::ShreddedArtifact;

/// Desenlace de la trituración del silo.
#[derive(Debug, Clone)]
pub struct ShredOutcome {
    pub artifacts: Vec<ShreddedArtifact>,
    pub total_bytes_destroyed: u64,
    /// true si y solo si cada ruta (artefactos + directorio) re-stat
    /// devolvió not-found.
    pub all_paths_verified_null: bool,
}

/**
 * Tritura cada archivo del silo y elimina el directorio.
 *
 * El caller sostiene el candado exclusivo del tenant; este ejecutor
 * opera exclusivamente sobre el filesystem.
 */
pub fn shred_tenant_silo(tenant_silo: &Path) -> Result<ShredOutcome, ChainFault> {
    let mut artifacts = Vec::new();
    let mut total_bytes_destroyed: u64 = 0;

    if tenant_silo.is_dir() {
        for directory_entry in fs::read_dir(tenant_silo)? {
            let artifact_path = directory_entry?.path();
            if !artifact_path.is_file() {
                continue;
            }

            let byte_count = fs::metadata(&artifact_path)?.len();
            overwrite_with_entropy(&artifact_path)?;
            fs::remove_file(&artifact_path)?;

            let verified_null = !artifact_path.exists();
            if !verified_null {
                warn!(
                    "💀 [SHRED]: Artifact survived unlink: {}",
                    artifact_path.display()
                );
            }

            total_bytes_destroyed += byte_count;
            artifacts.push(ShreddedArtifact {
                path: artifact_path.display().to_string(),
                byte_count,
                verified_null,
            });
        }

        fs::remove_dir_all(tenant_silo)?;
    }

    let silo_verified_null = !tenant_silo.exists();
    let all_paths_verified_null =
        silo_verified_null && artifacts.iter().all(|artifact| artifact.verified_null);

    info!(
        "⚰️  [SHRED]: {} artifacts destroyed ({} bytes). Null-verification: {}.",
        artifacts.len(),
        total_bytes_destroyed,
        all_paths_verified_null
    );

    Ok(ShredOutcome { artifacts, total_bytes_destroyed, all_paths_verified_null })
}
