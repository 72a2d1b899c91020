// [apps/custodian/src/services/pulse_daemon.rs]
/*!
 * =================================================================
 * APARATO: PULSE DAEMON (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: APPLICATION SERVICES (ESTRATO L3)
 * RESPONSABILIDAD: RONDAS DE LATIDO AUTÓNOMAS DEL PROCESO
 *
 * El daemon complementa al disparador cron: si la plataforma no provee
 * cron externo, el proceso late por sí mismo. Cada ronda corre en el
 * pool bloqueante (E/S de disco pura, jamás sobre el reactor).
 * =================================================================
 */

use std::sync::Arc;

use tracing::{info, warn};

use custodia_domain_pulse::PulseDriver;

/// Lanza el daemon de latido; devuelve el handle de la tarea.
pub fn spawn_pulse_daemon(
    pulse_driver: Arc<PulseDriver>,
    pulse_period: std::time::Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "💓 [PULSE_DAEMON]: Ignited with period {}s.",
            pulse_period.as_secs()
        );
        let mut interval_timer = tokio::time::interval(pulse_period);
        // El primer tick es inmediato: la ronda inicial detecta el hueco
        // de un reinicio sin esperar el periodo completo.
        loop {
            interval_timer.tick().await;
            let round_driver = pulse_driver.clone();
            match tokio::task::spawn_blocking(move || round_driver.run_round()).await {
                Ok(round_report) => {
                    if !round_report.tenant_failures.is_empty() {
                        warn!(
                            "⚠️ [PULSE_DAEMON]: Round {} completed with {} tenant faults.",
                            round_report.sequence,
                            round_report.tenant_failures.len()
                        );
                    }
                }
                Err(join_fault) => {
                    warn!("🔥 [PULSE_DAEMON]: Round task collapsed: {}", join_fault);
                }
            }
        }
    })
}
