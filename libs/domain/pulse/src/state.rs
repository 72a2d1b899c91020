// [libs/domain/pulse/src/state.rs]
/*!
 * =================================================================
 * APARATO: PULSE STATE FILE (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: PERSISTENCIA TMP+RENAME DEL ESTADO DE LATIDO
 * =================================================================
 */

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use custodia_core_chain::ChainFault;

/// Estado process-wide registrado tras cada ronda de latidos.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PulseState {
    /// Identidad compacta del último proceso emisor.
    pub process_identity: String,
    /// Epoch en milisegundos del último latido emitido.
    pub last_pulse_epoch_milliseconds: i64,
    /// Secuencia process-wide monótona del último latido.
    pub sequence: u64,
}

/// Archivo de estado en `<audit_root>/pulse_state.json`.
pub struct PulseStateFile {
    state_path: PathBuf,
}

impl PulseStateFile {
    pub fn new(state_path: impl Into<PathBuf>) -> Self {
        Self { state_path: state_path.into() }
    }

    /// Estado registrado, o None si falta o es ilegible (ambos casos
    /// cuentan como hueco para la heurística).
    pub fn load(&self) -> Option<PulseState> {
        let state_content = fs::read_to_string(&self.state_path).ok()?;
        serde_json::from_str(&state_content).ok()
    }

    pub fn save(&self, state: &PulseState) -> Result<(), ChainFault> {
        if let Some(parent_directory) = self.state_path.parent() {
            fs::create_dir_all(parent_directory)?;
        }

        let state_json = serde_json::to_string(state)
            .map_err(|serialization_fault| ChainFault::AuditWriteError(serialization_fault.to_string()))?;

        let temporary_path = self.state_path.with_extension("json.tmp");
        {
            let mut temporary_handle = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temporary_path)?;
            temporary_handle.write_all(state_json.as_bytes())?;
            temporary_handle.sync_all()?;
        }
        fs::rename(&temporary_path, &self.state_path)?;
        Ok(())
    }
}
