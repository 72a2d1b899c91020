// [libs/domain/models-rs/src/receipt.rs]
/*!
 * =================================================================
 * APARATO: RECEIPT FORGE (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: FORJA DE RECIBOS ORDENABLES POR TIEMPO
 *
 * # Mathematical Proof (Collision Resistance):
 * El recibo concatena el epoch en milisegundos (hex mayúscula, orden
 * big-endian textual) con 32 bits de entropía CSPRNG. Dentro de un
 * tenant, la probabilidad de colisión en el mismo milisegundo es
 * 2^-32 por par, despreciable para el volumen operativo del silo.
 * =================================================================
 */

use crate::entry::EntryKind;
use rand::RngCore;

/// Clase de recibo con su prefijo sellado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptKind {
    /// `AR-` Ejecución de herramienta.
    ToolExecution,
    /// `AS-` Escudo administrativo (AUDIT_SHIELD).
    AdminShield,
    /// `PL-` Latido de disponibilidad.
    Pulse,
    /// `SR-` Recuperación de sistema.
    SystemRecovery,
    /// `SUSPEND-` Acto de suspensión.
    Suspend,
    /// `RAIO-` Check-in de supervisor.
    RaioCheckin,
}

impl ReceiptKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            ReceiptKind::ToolExecution => "AR-",
            ReceiptKind::AdminShield => "AS-",
            ReceiptKind::Pulse => "PL-",
            ReceiptKind::SystemRecovery => "SR-",
            ReceiptKind::Suspend => "SUSPEND-",
            ReceiptKind::RaioCheckin => "RAIO-",
        }
    }
}

impl From<EntryKind> for ReceiptKind {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::ToolExecution => ReceiptKind::ToolExecution,
            EntryKind::AdminAccess => ReceiptKind::AdminShield,
            EntryKind::Pulse => ReceiptKind::Pulse,
            EntryKind::SystemRecovery => ReceiptKind::SystemRecovery,
            EntryKind::Suspend => ReceiptKind::Suspend,
            EntryKind::RaioCheckin => ReceiptKind::RaioCheckin,
        }
    }
}

/**
 * Forja un recibo único: `<PREFIJO><EPOCH_MS_HEX_MAYUSCULA>-<RAND32_HEX>`.
 *
 * El componente temporal garantiza orden lexicográfico creciente entre
 * milisegundos distintos; el sufijo CSPRNG desambigua el mismo milisegundo.
 */
pub fn forge_receipt_identifier(kind: ReceiptKind, epoch_milliseconds: u64) -> String {
    let mut entropy_suffix = [0u8; 4];
    rand::rngs::OsRng.fill_bytes(&mut entropy_suffix);
    format!(
        "{}{:X}-{:08X}",
        kind.prefix(),
        epoch_milliseconds,
        u32::from_be_bytes(entropy_suffix)
    )
}
