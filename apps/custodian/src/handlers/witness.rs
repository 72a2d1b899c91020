// [apps/custodian/src/handlers/witness.rs]
/*!
 * =================================================================
 * APARATO: WITNESS & CRON HANDLER (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L3)
 * RESPONSABILIDAD: DISPARADORES CRON Y VERIFICACIÓN DE TESTIGO
 * =================================================================
 */

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, instrument};

use crate::handlers::fault_to_response;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WitnessQueryParams {
    /// true para incluir el historial completo de anclas.
    #[serde(default)]
    pub history: bool,
}

pub struct WitnessHandler;

impl WitnessHandler {
    /**
     * Disparador cron de anclaje diario (acepta POST y GET tras el
     * guardia de secreto). Devuelve el resumen del barrido completo.
     */
    #[instrument(skip(application_state))]
    pub async fn handle_anchor_cron(State(application_state): State<AppState>) -> Response {
        let sweep_summary = application_state
            .witness_desk
            .anchor_all_tenants(application_state.configuration.anchor_sweep_budget)
            .await;
        (StatusCode::OK, Json(sweep_summary)).into_response()
    }

    /**
     * Disparador cron del latido: una ronda PULSE/SYSTEM_RECOVERY.
     * La ronda es E/S de disco pura; corre en el pool bloqueante.
     */
    #[instrument(skip(application_state))]
    pub async fn handle_pulse_cron(State(application_state): State<AppState>) -> Response {
        let pulse_driver = application_state.pulse_driver.clone();
        let round_report = match tokio::task::spawn_blocking(move || pulse_driver.run_round()).await
        {
            Ok(report) => report,
            Err(join_fault) => {
                error!("🔥 [PULSE_CRON]: Round task collapsed: {}", join_fault);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "PULSE_ROUND_COLLAPSED" })),
                )
                    .into_response();
            }
        };

        (
            StatusCode::OK,
            Json(json!({
                "sequence": round_report.sequence,
                "gap_detected": round_report.gap_detected,
                "tenants_pulsed": round_report.tenants_pulsed,
                "tenant_failures": round_report.tenant_failures,
            })),
        )
            .into_response()
    }

    /**
     * Verificación local-contra-ancla con veredicto estable; el
     * historial de anclas viaja solo bajo ?history=true.
     */
    #[instrument(skip(application_state, query_params), fields(tenant = %tenant_id))]
    pub async fn handle_witness_verification(
        State(application_state): State<AppState>,
        Path(tenant_id): Path<String>,
        Query(query_params): Query<WitnessQueryParams>,
    ) -> Response {
        let verification = match application_state.witness_desk.verify_witness(&tenant_id).await {
            Ok(verification) => verification,
            Err(verification_fault) => return fault_to_response(verification_fault),
        };

        let latest_anchor = match application_state.witness_desk.latest_anchor(&tenant_id).await {
            Ok(anchor) => anchor,
            Err(anchor_fault) => return fault_to_response(anchor_fault),
        };

        let mut response_body = json!({
            "verification": verification,
            "latest_anchor": latest_anchor,
        });

        if query_params.history {
            let anchor_history = application_state
                .witness_desk
                .anchor_history(&tenant_id)
                .await
                .unwrap_or_default();
            response_body["anchor_history"] = json!(anchor_history);
        }

        (StatusCode::OK, Json(response_body)).into_response()
    }
}
