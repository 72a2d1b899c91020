// [libs/domain/pulse/src/driver.rs]
/*!
 * =================================================================
 * APARATO: PULSE DRIVER (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: RONDAS DE LATIDO Y RECUPERACIÓN POR TENANT
 * =================================================================
 */

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::json;
use tracing::{info, instrument, warn};

use custodia_domain_logger::AuditScribe;
use custodia_domain_models::entry::GapReport;

use crate::identity::ProcessIdentity;
use crate::state::{PulseState, PulseStateFile};

/// Multiplicador del periodo que define la ventana de silencio tolerada.
const GAP_WINDOW_MULTIPLIER: u32 = 2;

/// Desenlace de una ronda de latidos.
#[derive(Debug, Clone)]
pub struct PulseRoundReport {
    /// Secuencia asignada a la ronda.
    pub sequence: u64,
    /// Hueco detectado antes de la ronda, si lo hubo.
    pub gap_detected: Option<GapReport>,
    /// Tenants que recibieron su PULSE.
    pub tenants_pulsed: u64,
    /// Fallos por tenant (no fatales para la ronda).
    pub tenant_failures: Vec<String>,
}

/// Conductor de latidos process-wide.
pub struct PulseDriver {
    scribe: Arc<AuditScribe>,
    state_file: PulseStateFile,
    process_identity: ProcessIdentity,
    pulse_period: Duration,
}

impl PulseDriver {
    pub fn new(
        scribe: Arc<AuditScribe>,
        state_file: PulseStateFile,
        process_identity: ProcessIdentity,
        pulse_period: Duration,
    ) -> Self {
        Self { scribe, state_file, process_identity, pulse_period }
    }

    pub fn process_identity(&self) -> &ProcessIdentity {
        &self.process_identity
    }

    /// Heurística de huecos sobre el estado registrado. Pública para
    /// el Proving Grounds; el umbral es sintonizable vía pulse_period.
    pub fn detect_gap(&self, recorded_state: Option<&PulseState>, now_epoch_milliseconds: i64) -> Option<GapReport> {
        let Some(state) = recorded_state else {
            return Some(GapReport {
                cause: "PULSE_STATE_MISSING".to_string(),
                previous_process_identity: None,
                last_pulse_epoch_milliseconds: None,
                estimated_gap_milliseconds: None,
            });
        };

        if state.process_identity != self.process_identity.identity_string() {
            return Some(GapReport {
                cause: "PROCESS_IDENTITY_CHANGED".to_string(),
                previous_process_identity: Some(state.process_identity.clone()),
                last_pulse_epoch_milliseconds: Some(state.last_pulse_epoch_milliseconds as u64),
                estimated_gap_milliseconds: Some(
                    (now_epoch_milliseconds - state.last_pulse_epoch_milliseconds).max(0) as u64,
                ),
            });
        }

        let silence_window_milliseconds =
            self.pulse_period.as_millis() as i64 * GAP_WINDOW_MULTIPLIER as i64;
        let elapsed_milliseconds = now_epoch_milliseconds - state.last_pulse_epoch_milliseconds;

        if elapsed_milliseconds > silence_window_milliseconds {
            return Some(GapReport {
                cause: "PULSE_WINDOW_EXCEEDED".to_string(),
                previous_process_identity: Some(state.process_identity.clone()),
                last_pulse_epoch_milliseconds: Some(state.last_pulse_epoch_milliseconds as u64),
                estimated_gap_milliseconds: Some(elapsed_milliseconds.max(0) as u64),
            });
        }

        None
    }

    /**
     * Ejecuta una ronda completa: heurística de huecos, emisión de
     * SYSTEM_RECOVERY + PULSE por tenant y persistencia del estado.
     *
     * Los fallos por tenant se registran y no abortan la ronda; los
     * silos destruidos se omiten en silencio.
     */
    #[instrument(skip(self))]
    pub fn run_round(&self) -> PulseRoundReport {
        let now_epoch_milliseconds = Utc::now().timestamp_millis();
        let recorded_state = self.state_file.load();
        let gap_detected = self.detect_gap(recorded_state.as_ref(), now_epoch_milliseconds);
        let sequence = recorded_state.map(|state| state.sequence + 1).unwrap_or(1);

        let identity_string = self.process_identity.identity_string();
        let pulse_info = json!({
            "pulse_period_seconds": self.pulse_period.as_secs(),
            "emitted_at_epoch_milliseconds": now_epoch_milliseconds,
        });

        let tenant_identifiers = match self.scribe.chain_store().list_tenants() {
            Ok(identifiers) => identifiers,
            Err(listing_fault) => {
                warn!("🔥 [PULSE]: Silo enumeration collapsed: {}", listing_fault);
                Vec::new()
            }
        };

        let mut tenants_pulsed: u64 = 0;
        let mut tenant_failures = Vec::new();

        for tenant_id in &tenant_identifiers {
            if let Some(gap) = &gap_detected {
                if let Err(recovery_fault) = self.scribe.write_system_recovery(
                    tenant_id,
                    sequence,
                    &identity_string,
                    gap.clone(),
                ) {
                    tenant_failures.push(format!("{}: {}", tenant_id, recovery_fault));
                    continue;
                }
            }

            match self
                .scribe
                .write_pulse(tenant_id, sequence, &identity_string, pulse_info.clone())
            {
                Ok(_) => tenants_pulsed += 1,
                Err(pulse_fault) => {
                    tenant_failures.push(format!("{}: {}", tenant_id, pulse_fault));
                }
            }
        }

        if let Err(state_fault) = self.state_file.save(&PulseState {
            process_identity: identity_string,
            last_pulse_epoch_milliseconds: now_epoch_milliseconds,
            sequence,
        }) {
            warn!("⚠️ [PULSE]: State persistence collapsed: {}", state_fault);
        }

        if let Some(gap) = &gap_detected {
            info!(
                "💓 [PULSE]: Round {} with SYSTEM_RECOVERY ({}) across {} tenants.",
                sequence, gap.cause, tenants_pulsed
            );
        }

        PulseRoundReport { sequence, gap_detected, tenants_pulsed, tenant_failures }
    }
}
