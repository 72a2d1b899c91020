// [libs/core/chain-ledger/src/errors.rs]
/*!
 * =================================================================
 * APARATO: CHAIN FAULT CATALOG (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: CORE ENGINE (ESTRATO L1)
 * RESPONSABILIDAD: TAXONOMÍA SEMÁNTICA DE RESULTADOS DE LA LIBRERÍA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. THREE SEVERITY TIERS: Recuperable (RemoteStore, AuditWrite),
 *    Rechazo (Unauthorized..AlreadySuspended) y Crítico
 *    (CriticalIntegrityFailure, el único que fuerza lockdown de UI).
 * 2. NO IMPLIED SUCCESS: Todo fallo del camino de escritura aborta la
 *    operación de negocio que lo envolvía; el resultado de la
 *    herramienta se retiene aunque la herramienta ya haya corrido.
 * =================================================================
 */

use custodia_core_vault::VaultFault;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainFault {
    // --- ESTRATO DE RECHAZO (el sistema permanece sano) ---

    /// El actor no presentó credencial válida para la operación.
    #[error("[L1_CHAIN_REFUSAL]: UNAUTHORIZED")]
    Unauthorized,

    /// El actor está autenticado pero la operación le está vetada.
    #[error("[L1_CHAIN_REFUSAL]: FORBIDDEN -> {0}")]
    Forbidden(String),

    /// Precondición de la operación no satisfecha.
    #[error("[L1_CHAIN_REFUSAL]: PRECONDITION_FAILED -> {0}")]
    PreconditionFailed(String),

    /// La operación destructiva exige la frase de confirmación exacta.
    #[error("[L1_CHAIN_REFUSAL]: CONFIRMATION_REQUIRED -> {0}")]
    ConfirmationRequired(String),

    /// El tenant está suspendido; toda escritura no-reactivación se veta.
    #[error("[L1_CHAIN_REFUSAL]: TENANT_SUSPENDED -> {0}")]
    TenantSuspended(String),

    /// El tenant fue destruido; su id yace en el registro de lápidas.
    #[error("[L1_CHAIN_REFUSAL]: TENANT_DESTROYED -> {0}")]
    TenantDestroyed(String),

    /// Idempotencia de suspensión: el tenant ya estaba suspendido.
    #[error("[L1_CHAIN_REFUSAL]: ALREADY_SUSPENDED -> {0}")]
    AlreadySuspended(String),

    // --- ESTRATO RECUPERABLE ---

    /// La línea no fue persistida; la cadena permanece íntegra.
    #[error("[L1_CHAIN_FAULT]: AUDIT_WRITE_REJECTED -> {0}")]
    AuditWriteError(String),

    /// Fallo de E/S del camino de lectura.
    #[error("[L1_CHAIN_FAULT]: SILO_IO_SEVERED -> {0}")]
    IoFailure(#[from] std::io::Error),

    /// No existe llave de cifrado para un silo que la requiere.
    #[error("[L1_CHAIN_FAULT]: ENCRYPTION_KEY_MISSING -> {0}")]
    EncryptionKeyMissing(String),

    /// Una línea sellada no pudo abrirse (manipulación o llave errónea).
    #[error("[L1_CHAIN_FAULT]: DECRYPTION_FAILED -> {0}")]
    DecryptionFailed(String),

    /// La rotación colapsó; el mensaje porta el material de rescate.
    #[error("[L1_CHAIN_FAULT]: ROTATION_FAILED -> {0}")]
    RotationFailed(String),

    /// El almacén documental remoto rechazó o perdió la operación.
    #[error("[L1_CHAIN_FAULT]: REMOTE_STORE_SEVERED -> {0}")]
    RemoteStoreError(String),

    /// Presupuesto de reloj agotado durante una iteración cron.
    #[error("[L1_CHAIN_FAULT]: OPERATION_TIMEOUT -> {0}")]
    Timeout(String),

    // --- ESTRATO CRÍTICO (lockdown obligatorio) ---

    /// La cadena no verifica en el instante de un append, o la cabeza
    /// almacenada contradice el eslabón que se iba a emitir. El sistema
    /// circundante DEBE rehusar efectos dependientes y escalar a
    /// operadores; la recuperación es manual.
    #[error("[L1_CHAIN_CRITICAL]: INTEGRITY_FAILURE -> {0}")]
    CriticalIntegrityFailure(String),
}

impl From<VaultFault> for ChainFault {
    fn from(fault: VaultFault) -> Self {
        match fault {
            VaultFault::KeyMissing(detail) => ChainFault::EncryptionKeyMissing(detail),
            VaultFault::UnsealFailure => {
                ChainFault::DecryptionFailed("GCM_TAG_REJECTED".to_string())
            }
            VaultFault::KeyCorrupted(detail) => ChainFault::EncryptionKeyMissing(detail),
            VaultFault::Io(io_fault) => ChainFault::IoFailure(io_fault),
            other => ChainFault::AuditWriteError(other.to_string()),
        }
    }
}
