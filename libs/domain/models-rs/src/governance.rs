// [libs/domain/models-rs/src/governance.rs]
/*!
 * =================================================================
 * APARATO: RAIO GOVERNANCE CONTRACTS (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: REGISTROS DE RE-AUTORIZACIÓN HUMANA (RAIO)
 * =================================================================
 */

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

/// Registro identity-bound de un check-in del supervisor humano RAIO.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GovernanceLedgerRecord {
    /// Identidad del supervisor que re-autoriza al agente.
    pub raio_user_id: String,
    /// Compromiso de dispositivo/sesión (huella digital).
    pub digital_fingerprint: String,
    /// Cabeza de cadena del tenant en el momento del check-in.
    pub merkle_root_snapshot: String,
    /// Marca ISO-8601 UTC del check-in.
    pub timestamp: String,
    /// Recibo del eslabón RAIO_CHECKIN gemelo en la cadena.
    pub chain_receipt_id: Option<String>,
}

/// Veredicto estable de autorización RAIO.
#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RaioVerdict {
    /// Check-in vigente dentro de la ventana de 30 días.
    Authorized,
    /// La ventana de 30 días expiró; el agente queda vetado.
    Expired,
    /// El tenant nunca registró un check-in.
    NeverCheckedIn,
}

/// Resultado de la consulta de autorización RAIO.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaioAuthorization {
    pub tenant_id: String,
    /// true si y solo si el check-in más reciente tiene ≤ 30 días.
    pub authorized: bool,
    /// Días transcurridos desde el último check-in, si existe.
    #[typeshare(serialized_as = "number")]
    pub days_since_checkin: Option<i64>,
    pub verdict: RaioVerdict,
    /// Registro más reciente, si existe.
    pub latest_entry: Option<GovernanceLedgerRecord>,
}
