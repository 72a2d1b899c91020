// [apps/custodian/src/services/witness_heartbeat.rs]
/*!
 * =================================================================
 * APARATO: WITNESS HEARTBEAT DAEMON (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: APPLICATION SERVICES (ESTRATO L3)
 * RESPONSABILIDAD: ANCLAJE HORARIO COMPLEMENTARIO AL CRON DIARIO
 * =================================================================
 */

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use custodia_domain_witness::WitnessDesk;

/// Cadencia del latido de testigo complementario.
const HEARTBEAT_PERIOD: Duration = Duration::from_secs(3600);

/// Lanza el anclaje horario; devuelve el handle de la tarea.
pub fn spawn_witness_heartbeat(
    witness_desk: Arc<WitnessDesk>,
    sweep_budget: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        info!("⚓ [WITNESS_HEARTBEAT]: Ignited with hourly cadence.");
        let mut interval_timer = tokio::time::interval(HEARTBEAT_PERIOD);
        // El tick inmediato ancla el estado de arranque del proceso.
        loop {
            interval_timer.tick().await;
            let sweep_summary = witness_desk.anchor_all_tenants(sweep_budget).await;
            if sweep_summary.summary.errors > 0 {
                warn!(
                    "⚠️ [WITNESS_HEARTBEAT]: Sweep finished with {} errors of {} tenants.",
                    sweep_summary.summary.errors, sweep_summary.summary.total_tenants
                );
            }
        }
    })
}
