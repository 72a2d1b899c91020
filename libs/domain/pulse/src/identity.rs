// [libs/domain/pulse/src/identity.rs]
/*!
 * =================================================================
 * APARATO: PROCESS IDENTITY (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: IDENTIDAD ÚNICA DEL PROCESO EMISOR DE LATIDOS
 * =================================================================
 */

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identidad forjada una sola vez al arranque del proceso. Un reinicio
/// produce una identidad nueva, que la heurística de huecos detecta.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessIdentity {
    /// UUID v4 de arranque.
    pub startup_uuid: String,
    /// PID del proceso anfitrión.
    pub process_id: u32,
    /// Epoch en milisegundos del arranque.
    pub started_at_epoch_milliseconds: i64,
}

impl ProcessIdentity {
    pub fn forge() -> Self {
        Self {
            startup_uuid: Uuid::new_v4().to_string(),
            process_id: std::process::id(),
            started_at_epoch_milliseconds: Utc::now().timestamp_millis(),
        }
    }

    /// Forma compacta persistida en el estado y en los eslabones.
    pub fn identity_string(&self) -> String {
        format!("{}:{}", self.startup_uuid, self.process_id)
    }
}
