// [libs/core/chain-ledger/src/rotation.rs]
/*!
 * =================================================================
 * APARATO: KEY ROTATION PIPELINE (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: CORE ENGINE (ESTRATO L1)
 * RESPONSABILIDAD: RE-CIFRADO COMPLETO DEL LEDGER BAJO LLAVE NUEVA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CONTENT PRESERVATION: La tubería descifra→re-cifra preserva el
 *    JSON en claro byte a byte; hashes y recibos quedan intactos y el
 *    verify() post-rotación DEBE devolver válido.
 * 2. LEGACY UPGRADE: Las líneas legacy en claro se sellan por primera
 *    vez bajo la llave nueva, saneando silos pre-cifrado.
 * 3. RESCUE MATERIAL: Si la instalación de la llave colapsa tras el
 *    re-cifrado del ledger, el error porta el hex de la llave nueva
 *    para extracción manual del operador (incidente de recuperación).
 * =================================================================
 */

use std::fs::{self, OpenOptions};
use std::io::Write;

use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::{info, instrument, warn};

use custodia_core_vault::LineSealer;
use custodia_domain_models::entry::GENESIS_HEAD;
use custodia_domain_models::reports::RotationReport;
use custodia_domain_models::tenant::TenantStatus;

use crate::errors::ChainFault;
use crate::store::ChainStore;

impl ChainStore {
    /**
     * Rota la llave del tenant re-cifrando cada línea del ledger.
     *
     * # Errors:
     * - `TenantSuspended` / `TenantDestroyed`: estados vetados.
     * - `PreconditionFailed`: el tenant aún no posee llave.
     * - `DecryptionFailed`: una línea sellada no abre con la llave actual.
     * - `RotationFailed`: colapso de instalación; porta material de rescate.
     */
    #[instrument(skip(self), fields(tenant = %tenant_id))]
    pub fn rotate_key(
        &self,
        tenant_id: &str,
        tenant_status: TenantStatus,
    ) -> Result<RotationReport, ChainFault> {
        match tenant_status {
            TenantStatus::Suspended => {
                return Err(ChainFault::TenantSuspended(tenant_id.to_string()))
            }
            TenantStatus::Destroyed => {
                return Err(ChainFault::TenantDestroyed(tenant_id.to_string()))
            }
            _ => {}
        }
        if self.tombstones().contains(tenant_id)? {
            return Err(ChainFault::TenantDestroyed(tenant_id.to_string()));
        }

        let tenant_lock = self.tenant_lock(tenant_id);
        let _rotation_guard = tenant_lock.write().expect("tenant rotation lock poisoned");

        let current_key = self
            .key_custodian()
            .load_key(tenant_id)?
            .ok_or_else(|| {
                ChainFault::PreconditionFailed(format!("NO_LIVE_KEY_FOR_TENANT -> {}", tenant_id))
            })?;
        let current_sealer = LineSealer::new(&current_key);

        // 1. APERTURA TOTAL: toda línea debe rendir su JSON en claro.
        let raw_lines = self.list_raw_lines_unlocked(tenant_id)?;
        let mut plaintext_lines = Vec::with_capacity(raw_lines.len());
        let mut legacy_lines_upgraded: u64 = 0;

        for raw_line in &raw_lines {
            if LineSealer::is_sealed_line(raw_line) {
                plaintext_lines.push(current_sealer.unseal(raw_line)?);
            } else {
                legacy_lines_upgraded += 1;
                plaintext_lines.push(raw_line.clone());
            }
        }

        // 2. FORJA DE LA LLAVE NUEVA
        let mut replacement_key = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut replacement_key);
        let replacement_sealer = LineSealer::new(&replacement_key);
        let replacement_key_id = public_key_identifier(&replacement_key);

        // 3. RE-SELLADO PRESERVANDO ORDEN
        let mut resealed_ledger = String::new();
        for plaintext_line in &plaintext_lines {
            let sealed_line = replacement_sealer
                .seal(plaintext_line)
                .map_err(|seal_fault| ChainFault::RotationFailed(seal_fault.to_string()))?;
            resealed_ledger.push_str(&sealed_line);
            resealed_ledger.push('\n');
        }

        // 4. SUSTITUCIÓN ATÓMICA DEL LEDGER
        let ledger_path = self.ledger_path(tenant_id);
        fs::create_dir_all(self.tenant_dir(tenant_id))?;
        let temporary_ledger_path = ledger_path.with_extension("ndjson.rotate.tmp");
        {
            let mut temporary_handle = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temporary_ledger_path)
                .map_err(|open_fault| ChainFault::RotationFailed(open_fault.to_string()))?;
            temporary_handle
                .write_all(resealed_ledger.as_bytes())
                .map_err(|write_fault| ChainFault::RotationFailed(write_fault.to_string()))?;
            temporary_handle
                .sync_all()
                .map_err(|sync_fault| ChainFault::RotationFailed(sync_fault.to_string()))?;
        }
        fs::rename(&temporary_ledger_path, &ledger_path).map_err(|rename_fault| {
            let _ = fs::remove_file(&temporary_ledger_path);
            ChainFault::RotationFailed(rename_fault.to_string())
        })?;

        // 5. INSTALACIÓN DE LA LLAVE (el ledger YA habla la llave nueva)
        if let Err(install_fault) = self
            .key_custodian()
            .install_rotated_key(tenant_id, &replacement_key)
        {
            warn!(
                "💀 [ROTATION]: Key install collapsed AFTER ledger reseal for [{}]. Surfacing rescue material.",
                tenant_id
            );
            return Err(ChainFault::RotationFailed(format!(
                "KEY_INSTALL_COLLAPSED_POST_RESEAL ({}). RESCUE_KEY_HEX={}",
                install_fault,
                hex::encode(replacement_key)
            )));
        }

        // 6. CABEZA POST-ROTACIÓN (invariante: idéntica a la previa)
        let chain_head_hash = plaintext_lines
            .last()
            .and_then(|line| serde_json::from_str::<serde_json::Value>(line).ok())
            .and_then(|value| {
                value
                    .get("entry_hash")
                    .and_then(|field| field.as_str())
                    .map(|hash| hash.to_string())
            })
            .unwrap_or_else(|| GENESIS_HEAD.to_string());

        info!(
            "🔄 [ROTATION]: {} lines resealed for [{}] under key {}.",
            plaintext_lines.len(),
            tenant_id,
            replacement_key_id
        );

        Ok(RotationReport {
            tenant_id: tenant_id.to_string(),
            entries_resealed: plaintext_lines.len() as u64,
            legacy_lines_upgraded,
            new_key_id: replacement_key_id,
            chain_head_hash,
            rotated_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        })
    }
}

/// Identificador público de una llave: primeros 8 hex de SHA-256.
pub fn public_key_identifier(key_material: &[u8; 32]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key_material);
    hex::encode(hasher.finalize())[..8].to_string()
}
