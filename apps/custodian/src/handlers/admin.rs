// [apps/custodian/src/handlers/admin.rs]
/*!
 * =================================================================
 * APARATO: ADMINISTRATIVE DIAGNOSTICS HANDLER (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L3)
 * RESPONSABILIDAD: SALUD DEL KERNEL Y TELEMETRÍA DEL ESCUDO
 * =================================================================
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;
use std::fs;
use tracing::instrument;

use crate::state::AppState;

pub struct DiagnosticsHandler;

impl DiagnosticsHandler {
    /**
     * Reporte de salud del Kernel: RSS, silos vivos y latido vigente.
     */
    #[instrument(skip(application_state))]
    pub async fn handle_system_diagnostics(
        State(application_state): State<AppState>,
    ) -> impl IntoResponse {
        let current_utc_time = Utc::now();
        let current_memory_rss_megabytes = Self::get_process_memory_usage();

        let tenant_silo_count = application_state
            .chain_store
            .list_tenants()
            .map(|tenants| tenants.len())
            .unwrap_or(0);

        let diagnostic_report = json!({
            "timestamp": current_utc_time.to_rfc3339(),
            "audit_shield": {
                "tenant_silo_count": tenant_silo_count,
                "process_identity": application_state.pulse_driver.process_identity().identity_string(),
                "pulse_period_seconds": application_state.configuration.pulse_interval.as_secs(),
                "cron_development_mode": application_state.configuration.cron_secret.is_none(),
            },
            "resources": {
                "memory_usage_mb": current_memory_rss_megabytes,
                "cpu_cores_logical": num_cpus::get(),
                "runtime_platform": std::env::consts::OS
            }
        });
        (StatusCode::OK, Json(diagnostic_report)).into_response()
    }

    /**
     * Extrae el consumo de memoria real (Resident Set Size) del kernel.
     */
    fn get_process_memory_usage() -> u64 {
        fs::read_to_string("/proc/self/status")
            .unwrap_or_default()
            .lines()
            .find(|line| line.starts_with("VmRSS:"))
            .and_then(|line| line.split_whitespace().nth(1))
            .and_then(|value| value.parse::<u64>().ok())
            .map(|kilobytes| kilobytes / 1024)
            .unwrap_or(0)
    }
}
