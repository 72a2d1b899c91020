// [libs/domain/models-rs/src/reports.rs]
/*!
 * =================================================================
 * APARATO: INTEGRITY & GOVERNANCE REPORTS (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: CONTRATOS DE VEREDICTO HACIA EL DASHBOARD ZENITH
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. STABLE VERDICT STRINGS: Los detalles de ruptura y los veredictos
 *    de testigo son cadenas estables renderizadas por la UI; cualquier
 *    cambio rompe el contrato visual del Centro de Mando.
 * 2. TYPESHARE SYNERGY: Mapeo determinista de tipos numéricos para el
 *    Frontend, garantizando paridad bit-perfect en la Tríada.
 * =================================================================
 */

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

/// Reporte del recorrido O(n) completo del verificador de integridad.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntegrityReport {
    pub tenant_id: String,
    /// Veredicto global: true si y solo si todos los eslabones verifican.
    pub valid: bool,
    /// Volumen total de líneas presentes en el ledger.
    #[typeshare(serialized_as = "number")]
    pub total_entries: u64,
    /// Eslabones verificados antes de la primera ruptura (o el total).
    #[typeshare(serialized_as = "number")]
    pub verified_entries: u64,
    /// Índice del primer eslabón roto, si existe.
    #[typeshare(serialized_as = "number")]
    pub first_broken_index: Option<u64>,
    /// Recibo del primer eslabón roto, si fue legible.
    pub first_broken_receipt_id: Option<String>,
    /// Detalle estable: "prev_hash mismatch at index N",
    /// "entry_hash mismatch at index N" o "decrypt failed at index N".
    pub break_detail: Option<String>,
    /// Cabeza verificada de la cadena, o el centinela GENESIS.
    pub chain_head_hash: String,
    /// Marca ISO-8601 UTC de la verificación.
    pub checked_at: String,
}

/// Veredicto estable de la comparación local-contra-ancla.
#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WitnessVerdict {
    /// Cabeza local idéntica a la anclada.
    Match,
    /// La cadena local extiende el prefijo anclado (estado esperado
    /// entre corridas del cron de anclaje).
    LocalAheadOfAnchor,
    /// Divergencia: la cabeza anclada no aparece en la cadena local.
    Mismatch,
    /// El tenant aún no posee anclas remotas.
    NoAnchor,
    /// La cadena local no verifica por sí misma.
    LocalBroken,
}

impl WitnessVerdict {
    /// Cadena estable consumida por la UI de transparencia.
    pub fn as_str(&self) -> &'static str {
        match self {
            WitnessVerdict::Match => "MATCH",
            WitnessVerdict::LocalAheadOfAnchor => "LOCAL_AHEAD_OF_ANCHOR",
            WitnessVerdict::Mismatch => "MISMATCH",
            WitnessVerdict::NoAnchor => "NO_ANCHOR",
            WitnessVerdict::LocalBroken => "LOCAL_BROKEN",
        }
    }
}

/// Resultado completo de la verificación remota de testigo.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WitnessVerification {
    pub tenant_id: String,
    pub verdict: WitnessVerdict,
    /// Cabeza local computada en esta verificación.
    pub local_chain_head: String,
    /// Cabeza comprometida en el ancla más reciente, si existe.
    pub anchored_chain_head: Option<String>,
    /// Veredicto del verificador local en esta pasada.
    pub local_integrity_valid: bool,
    /// true si y solo si el veredicto es MATCH.
    pub witness_match: bool,
    /// Validez de la firma HMAC del ancla recuperada.
    pub anchor_signature_valid: Option<bool>,
    pub checked_at: String,
}

/// Reporte inmutable de una rotación de llave completada.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationReport {
    pub tenant_id: String,
    /// Eslabones re-cifrados bajo la llave nueva.
    #[typeshare(serialized_as = "number")]
    pub entries_resealed: u64,
    /// Líneas legacy en claro que fueron selladas por primera vez.
    #[typeshare(serialized_as = "number")]
    pub legacy_lines_upgraded: u64,
    /// Identificador público de la llave nueva (8 hex de SHA-256).
    pub new_key_id: String,
    /// Cabeza de cadena tras la rotación (invariante: idéntica a la previa).
    pub chain_head_hash: String,
    pub rotated_at: String,
}

/// Recibo devuelto por el protocolo de suspensión de cinco fases.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuspendReceipt {
    pub tenant_id: String,
    pub suspend_id: String,
    /// Hash SHA-256 determinista sobre el payload canónico del acto.
    pub event_hash: String,
    /// Recibo del eslabón SUSPEND escrito en la cadena del tenant.
    pub suspend_receipt_id: String,
    /// Recibo del eslabón AUDIT_SHIELD espejo del acto administrativo.
    pub shield_receipt_id: String,
    /// Llamadas en vuelo terminadas (mejor esfuerzo).
    #[typeshare(serialized_as = "number")]
    pub calls_terminated: u64,
    pub suspended_at: String,
}

/// Desenlace del anclaje de un tenant individual durante el barrido.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnchorOutcome {
    pub tenant_id: String,
    /// "ANCHORED", "ERROR" o "TIMEOUT".
    pub status: String,
    pub anchor_id: Option<String>,
    pub chain_head_hash: Option<String>,
    pub error_detail: Option<String>,
}

/// Totales agregados del barrido de anclaje.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnchorSweepTotals {
    #[typeshare(serialized_as = "number")]
    pub total_tenants: u64,
    #[typeshare(serialized_as = "number")]
    pub anchored: u64,
    #[typeshare(serialized_as = "number")]
    pub errors: u64,
}

/// Resumen completo devuelto por el disparador cron de anclaje.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnchorSweepSummary {
    /// "COMPLETED" o "COMPLETED_WITH_ERRORS".
    pub status: String,
    pub started_at: String,
    pub completed_at: String,
    pub summary: AnchorSweepTotals,
    pub results: Vec<AnchorOutcome>,
}
