// [libs/domain/models-rs/src/entry.rs]
/*!
 * =================================================================
 * APARATO: CHAIN ENTRY CONTRACT (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: DEFINICIÓN DEL ESLABÓN SOBERANO DE LA CADENA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. CLOSED KIND SET: La unión discriminada 'EntryEvent' sella el
 *    conjunto cerrado de clases de evento auditables. Ningún eslabón
 *    puede existir fuera de esta taxonomía.
 * 2. DYNAMIC PAYLOAD SOVEREIGNTY: Los argumentos de herramienta viajan
 *    como 'serde_json::Value' validado, preservando el mapa dinámico
 *    del agente sin sacrificar el tag estático del eslabón.
 * 3. NOMINAL PURITY: Erradicación de abreviaciones en todos los campos.
 *
 * # Mathematical Proof (Link Integrity):
 * Todo eslabón i>0 cumple prev_hash(i) = entry_hash(i-1); el eslabón 0
 * ancla en el centinela GENESIS. El hash de contenido se computa sobre
 * el JSON canónico del eslabón sin su propio 'entry_hash', por lo que
 * cualquier mutación posterior rompe la cadena de forma detectable.
 * =================================================================
 */

use serde::{Deserialize, Serialize};
use serde_json::Value;
use typeshare::typeshare;

/// Centinela de cabeza para una cadena vacía.
pub const GENESIS_HEAD: &str = "GENESIS";

/// Conjunto cerrado de clases de eslabón auditables.
#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
    /// Ejecución de herramienta por el agente IA recepcionista.
    ToolExecution,
    /// Acceso administrativo interno al silo del tenant (AUDIT_SHIELD).
    AdminAccess,
    /// Latido periódico de disponibilidad del proceso.
    Pulse,
    /// Reconstrucción tras un hueco de latidos detectado.
    SystemRecovery,
    /// Suspensión de emergencia de las operaciones del tenant.
    Suspend,
    /// Re-autorización humana del supervisor RAIO.
    RaioCheckin,
}

/// Veredicto de ejecución de una herramienta del agente.
#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    Success,
    Fail,
}

/// Acciones administrativas permitidas sobre el rastro de un tenant.
/// Conjunto cerrado: cualquier otra cadena es rechazada en la frontera.
#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdminAction {
    View,
    Download,
    Export,
}

/// Carga útil polimórfica del eslabón (unión discriminada por 'entry_kind').
///
/// La serialización es interna-tagged: los campos del evento conviven en
/// el mismo objeto JSON que el sobre del eslabón, produciendo una línea
/// NDJSON plana y canónicamente ordenable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "entry_kind")]
pub enum EntryEvent {
    #[serde(rename = "TOOL_EXECUTION")]
    ToolExecution {
        /// Identidad NHI (Non-Human Identity) del agente ejecutor.
        agent_nhi: String,
        /// Nombre nominal de la herramienta invocada.
        tool_name: String,
        /// Mapa dinámico de argumentos validado por esquema.
        tool_arguments: Value,
        /// Hash de la instantánea de política vigente en la ejecución.
        policy_snapshot_hash: String,
        /// Veredicto de la ejecución.
        execution_status: ExecutionStatus,
        /// Resultado estructurado devuelto por la herramienta.
        execution_result: Value,
        /// Correlación con la llamada externa (voz / webhook).
        #[serde(skip_serializing_if = "Option::is_none")]
        external_call_id: Option<String>,
    },

    #[serde(rename = "ADMIN_ACCESS")]
    AdminAccess {
        /// Correo del administrador interno que accede al silo.
        admin_email: String,
        /// Nombre humano del administrador.
        admin_name: String,
        /// Acción ejercida sobre el rastro.
        action: AdminAction,
        /// Justificación declarada del acceso.
        purpose: String,
    },

    #[serde(rename = "PULSE")]
    Pulse {
        /// Secuencia monótona de latidos a nivel de proceso.
        sequence: u64,
        /// Identidad del proceso emisor (UUID de arranque + PID).
        process_identity: String,
        /// Metadatos del latido (intervalo configurado, huella de host).
        pulse_info: Value,
    },

    #[serde(rename = "SYSTEM_RECOVERY")]
    SystemRecovery {
        /// Secuencia monótona asignada al evento de recuperación.
        sequence: u64,
        /// Identidad del proceso que detecta el hueco.
        process_identity: String,
        /// Descripción forense del hueco de disponibilidad.
        gap: GapReport,
    },

    #[serde(rename = "SUSPEND")]
    Suspend {
        /// Identificador del acto de suspensión.
        suspend_id: String,
        /// Razón declarada por el operador.
        reason: String,
        /// Actor administrativo que ejecutó la suspensión.
        suspended_by: String,
        /// Cabeza de cadena capturada antes de la mutación de estado.
        chain_head_at_suspend: String,
        /// Volumen de eslabones verificados en la captura previa.
        verified_entries_at_suspend: u64,
    },

    #[serde(rename = "RAIO_CHECKIN")]
    RaioCheckin {
        /// Identidad del supervisor humano RAIO.
        raio_user_id: String,
        /// Compromiso de dispositivo/sesión del supervisor.
        digital_fingerprint: String,
        /// Cabeza de cadena en el momento del check-in.
        merkle_root_snapshot: String,
    },
}

impl EntryEvent {
    /// Clase estática del evento, para despacho de prefijos y filtros.
    pub fn kind(&self) -> EntryKind {
        match self {
            EntryEvent::ToolExecution { .. } => EntryKind::ToolExecution,
            EntryEvent::AdminAccess { .. } => EntryKind::AdminAccess,
            EntryEvent::Pulse { .. } => EntryKind::Pulse,
            EntryEvent::SystemRecovery { .. } => EntryKind::SystemRecovery,
            EntryEvent::Suspend { .. } => EntryKind::Suspend,
            EntryEvent::RaioCheckin { .. } => EntryKind::RaioCheckin,
        }
    }
}

/// Eslabón soberano persistido en el ledger NDJSON del tenant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChainEntry {
    /// Índice monótono estricto dentro del silo (0-based).
    pub index: u64,
    /// Recibo legible, ordenable por tiempo, con prefijo de clase.
    pub receipt_id: String,
    /// Marca ISO-8601 UTC; nunca decrece respecto al eslabón previo.
    pub timestamp: String,
    /// Hash del eslabón anterior o el centinela GENESIS.
    pub prev_hash: String,
    /// SHA-256 hex del JSON canónico del eslabón sin este campo.
    pub entry_hash: String,
    /// Evento discriminado con su carga útil específica.
    #[serde(flatten)]
    pub event: EntryEvent,
}

/// Solicitud de registro de ejecución de herramienta (frontera del façade).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolExecutionRequest {
    pub tenant_id: String,
    pub agent_nhi: String,
    pub tool_name: String,
    pub tool_arguments: Value,
    pub policy_snapshot_hash: String,
    pub execution_status: ExecutionStatus,
    pub execution_result: Value,
    #[serde(default)]
    pub external_call_id: Option<String>,
}

/// Solicitud de acceso administrativo con doble escritura espejo.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminAccessRequest {
    pub admin_email: String,
    pub admin_name: String,
    pub tenant_id: String,
    pub action: AdminAction,
    pub purpose: String,
}

/// Descripción forense de un hueco de disponibilidad del proceso.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GapReport {
    /// Causa detectada: "PROCESS_IDENTITY_CHANGED", "PULSE_WINDOW_EXCEEDED"
    /// o "PULSE_STATE_MISSING".
    pub cause: String,
    /// Identidad del proceso previa registrada, si existía.
    pub previous_process_identity: Option<String>,
    /// Último latido conocido en epoch milisegundos.
    #[typeshare(serialized_as = "number")]
    pub last_pulse_epoch_milliseconds: Option<u64>,
    /// Milisegundos de silencio estimados.
    #[typeshare(serialized_as = "number")]
    pub estimated_gap_milliseconds: Option<u64>,
}
