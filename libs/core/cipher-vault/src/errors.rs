// [libs/core/cipher-vault/src/errors.rs]
/*!
 * =================================================================
 * APARATO: VAULT ERROR CATALOG (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: CORE SECURITY (ESTRATO L1)
 * RESPONSABILIDAD: CATALOGACIÓN SEMÁNTICA DE FALLOS CRIPTOGRÁFICOS
 * =================================================================
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaultFault {
    /// No existe llave para el tenant y la operación la requiere.
    #[error("[L1_VAULT_FAULT]: ENCRYPTION_KEY_MISSING -> {0}")]
    KeyMissing(String),

    /// El archivo de llave existe pero no son exactamente 64 hex chars.
    #[error("[L1_VAULT_FAULT]: KEY_MATERIAL_CORRUPTED -> {0}")]
    KeyCorrupted(String),

    /// Fallo de E/S durante el ciclo de vida de la llave o el sellado.
    #[error("[L1_VAULT_FAULT]: KEY_IO_SEVERED -> {0}")]
    Io(#[from] std::io::Error),

    /// El cifrado GCM rechazó la operación de sellado.
    #[error("[L1_VAULT_FAULT]: SEAL_MALFUNCTION")]
    SealFailure,

    /// Integridad comprometida o llave incorrecta al abrir una línea.
    #[error("[L1_VAULT_FAULT]: UNSEAL_MALFUNCTION -> Integrity compromised or incorrect key")]
    UnsealFailure,

    /// La línea no porta el prefijo ENC: o su Base64 es ilegible.
    #[error("[L1_VAULT_FAULT]: LINE_ENCODING_FAULT -> {0}")]
    LineEncoding(String),

    /// La destrucción de la llave no pudo verificarse (la ruta persiste).
    #[error("[L1_VAULT_FAULT]: KEY_DESTRUCTION_UNVERIFIED -> {0}")]
    DestructionUnverified(String),
}
