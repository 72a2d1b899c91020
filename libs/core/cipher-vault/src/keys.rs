// [libs/core/cipher-vault/src/keys.rs]
/*!
 * =================================================================
 * APARATO: KEY CUSTODIAN (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: CORE SECURITY (ESTRATO L1)
 * RESPONSABILIDAD: CICLO DE VIDA DE LA LLAVE SIMÉTRICA POR TENANT
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. EXACTLY-ONE-LIVE-KEY: Mientras el tenant está activo existe
 *    exactamente una llave en '<keys_root>/<tenant>.key' (64 hex,
 *    modo 0600). La rotación instala la nueva de forma atómica y la
 *    destrucción sobrescribe y verifica la ausencia.
 * 2. ATOMIC RENAME DISCIPLINE: Toda escritura de llave atraviesa
 *    '.tmp' + fsync + rename; el rename-sobre-existente debe ser
 *    atómico en el filesystem anfitrión (requisito operacional).
 *
 * # Mathematical Proof (Crypto-Shred):
 * Destruir los 32 bytes de llave torna irrecuperables todas las
 * líneas AES-256-GCM selladas bajo ella; la sobrescritura CSPRNG del
 * archivo y el unlink refuerzan la destrucción contra forense de
 * disco de bajo nivel.
 * =================================================================
 */

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use rand::RngCore;
use tracing::{info, warn};

use crate::errors::VaultFault;
use crate::sanitize::sanitize_tenant_identifier;

const KEY_HEX_LENGTH: usize = 64;

/// Custodio de autoridad única sobre el directorio raíz de llaves.
pub struct KeyCustodian {
    keys_root: PathBuf,
}

impl KeyCustodian {
    pub fn new(keys_root: impl Into<PathBuf>) -> Self {
        Self { keys_root: keys_root.into() }
    }

    /// Ruta del archivo de llave del tenant (id ya saneado internamente).
    pub fn key_path(&self, tenant_id: &str) -> PathBuf {
        self.keys_root
            .join(format!("{}.key", sanitize_tenant_identifier(tenant_id)))
    }

    pub fn has_key(&self, tenant_id: &str) -> bool {
        self.key_path(tenant_id).is_file()
    }

    /**
     * Garantiza la existencia de la llave del tenant.
     *
     * Devuelve true si una llave nueva fue forjada, false si ya existía.
     * La consulta del registro de lápidas es responsabilidad del estrato
     * de cadena, que es el único punto de aprovisionamiento.
     */
    pub fn ensure_key(&self, tenant_id: &str) -> Result<bool, VaultFault> {
        let key_file_path = self.key_path(tenant_id);
        if key_file_path.is_file() {
            return Ok(false);
        }

        fs::create_dir_all(&self.keys_root)?;

        let mut key_material = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut key_material);

        self.write_key_atomic(&key_file_path, &key_material)?;
        info!("🗝️  [KEY_CUSTODIAN]: Genesis key forged for tenant silo [{}].", tenant_id);
        Ok(true)
    }

    /**
     * Carga la llave viva del tenant.
     *
     * # Errors:
     * - `KeyCorrupted`: el archivo no contiene exactamente 64 hex chars.
     */
    pub fn load_key(&self, tenant_id: &str) -> Result<Option<[u8; 32]>, VaultFault> {
        let key_file_path = self.key_path(tenant_id);
        if !key_file_path.is_file() {
            return Ok(None);
        }

        let key_hex = fs::read_to_string(&key_file_path)?;
        let key_hex_trimmed = key_hex.trim();
        if key_hex_trimmed.len() != KEY_HEX_LENGTH {
            return Err(VaultFault::KeyCorrupted(format!(
                "EXPECTED_64_HEX_GOT_{}",
                key_hex_trimmed.len()
            )));
        }

        let key_bytes = hex::decode(key_hex_trimmed)
            .map_err(|hex_fault| VaultFault::KeyCorrupted(hex_fault.to_string()))?;

        let mut key_material = [0u8; 32];
        key_material.copy_from_slice(&key_bytes);
        Ok(Some(key_material))
    }

    /**
     * Instala la llave rotada de forma atómica (tmp + fsync + rename).
     *
     * Fallback: si el rename colapsa tras el re-cifrado del ledger, se
     * intenta la escritura directa; el fallo total aquí es un incidente
     * de recuperación de datos que el estrato de rotación escala con el
     * material hex para extracción del operador.
     */
    pub fn install_rotated_key(&self, tenant_id: &str, key_material: &[u8; 32]) -> Result<(), VaultFault> {
        let key_file_path = self.key_path(tenant_id);
        fs::create_dir_all(&self.keys_root)?;

        match self.write_key_atomic(&key_file_path, key_material) {
            Ok(()) => Ok(()),
            Err(atomic_fault) => {
                warn!(
                    "⚠️ [KEY_CUSTODIAN]: Atomic key install failed ({}). Attempting direct write.",
                    atomic_fault
                );
                let mut direct_handle = open_owner_only(&key_file_path)?;
                direct_handle.write_all(hex::encode(key_material).as_bytes())?;
                direct_handle.sync_all()?;
                Ok(())
            }
        }
    }

    /**
     * Destruye la llave del tenant: sobrescritura CSPRNG de longitud
     * idéntica, fsync, unlink y verificación not-found.
     */
    pub fn destroy_key(&self, tenant_id: &str) -> Result<(), VaultFault> {
        let key_file_path = self.key_path(tenant_id);
        if !key_file_path.is_file() {
            return Ok(());
        }

        overwrite_with_entropy(&key_file_path)?;
        fs::remove_file(&key_file_path)?;

        if key_file_path.exists() {
            return Err(VaultFault::DestructionUnverified(
                key_file_path.display().to_string(),
            ));
        }

        info!("⚰️  [KEY_CUSTODIAN]: Tenant key shredded and verified null [{}].", tenant_id);
        Ok(())
    }

    fn write_key_atomic(&self, key_file_path: &Path, key_material: &[u8; 32]) -> Result<(), VaultFault> {
        let temporary_path = key_file_path.with_extension("key.tmp");
        {
            let mut temporary_handle = open_owner_only(&temporary_path)?;
            temporary_handle.write_all(hex::encode(key_material).as_bytes())?;
            temporary_handle.sync_all()?;
        }
        fs::rename(&temporary_path, key_file_path)?;
        Ok(())
    }
}

/// Abre (creando o truncando) un archivo con modo 0600 en Unix.
fn open_owner_only(path: &Path) -> Result<fs::File, VaultFault> {
    let mut open_options = OpenOptions::new();
    open_options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        open_options.mode(0o600);
    }
    Ok(open_options.open(path)?)
}

/// Sobrescribe el contenido completo de un archivo con bytes CSPRNG
/// de longitud idéntica y sincroniza a disco.
pub fn overwrite_with_entropy(path: &Path) -> Result<(), VaultFault> {
    let artifact_length = fs::metadata(path)?.len() as usize;
    let mut entropy_buffer = vec![0u8; artifact_length];
    rand::rngs::OsRng.fill_bytes(&mut entropy_buffer);

    let mut artifact_handle = OpenOptions::new().write(true).open(path)?;
    artifact_handle.write_all(&entropy_buffer)?;
    artifact_handle.sync_all()?;
    Ok(())
}
