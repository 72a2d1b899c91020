// [apps/custodian/src/handlers/governance.rs]
/*!
 * =================================================================
 * APARATO: GOVERNANCE HANDLER (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L3)
 * RESPONSABILIDAD: CHECK-IN RAIO Y DISPARADOR GLASS-BREAK
 * =================================================================
 */

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use custodia_domain_models::tenant::TenantStatus;

use crate::handlers::fault_to_response;
use crate::state::AppState;

/// Frase de confirmación del disparador de suspensión, byte a byte.
const SUSPEND_CONFIRMATION_PHRASE: &str = "SUSPEND ALL AI OPERATIONS";

#[derive(Debug, Deserialize)]
pub struct RaioCheckinPayload {
    pub raio_user_id: String,
    pub digital_fingerprint: String,
}

#[derive(Debug, Deserialize)]
pub struct SuspendTriggerPayload {
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub confirmation: Option<String>,
    /// Si viaja en el cuerpo, DEBE coincidir con el tenant de la ruta.
    #[serde(default)]
    pub tenant_id: Option<String>,
}

pub struct GovernanceHandler;

impl GovernanceHandler {
    /**
     * Check-in del supervisor humano: re-autoriza al agente 30 días.
     */
    #[instrument(skip(application_state, payload), fields(tenant = %tenant_id, raio = %payload.raio_user_id))]
    pub async fn handle_raio_checkin(
        State(application_state): State<AppState>,
        Path(tenant_id): Path<String>,
        Json(payload): Json<RaioCheckinPayload>,
    ) -> Response {
        match application_state.governance_desk.record_checkin(
            &tenant_id,
            &payload.raio_user_id,
            &payload.digital_fingerprint,
        ) {
            Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
            Err(checkin_fault) => fault_to_response(checkin_fault),
        }
    }

    /// Veredicto vigente de la ventana RAIO.
    #[instrument(skip(application_state), fields(tenant = %tenant_id))]
    pub async fn handle_raio_status(
        State(application_state): State<AppState>,
        Path(tenant_id): Path<String>,
    ) -> Response {
        match application_state.governance_desk.is_raio_authorized(&tenant_id) {
            Ok(authorization) => (StatusCode::OK, Json(authorization)).into_response(),
            Err(status_fault) => fault_to_response(status_fault),
        }
    }

    /**
     * Disparador glass-break: suspende todas las operaciones del agente.
     *
     * 403 si el tenant del cuerpo contradice la ruta; la confirmación,
     * si viaja, debe ser exacta; 409 si ya estaba suspendido.
     */
    #[instrument(skip(application_state, request_headers, payload), fields(tenant = %tenant_id))]
    pub async fn handle_suspend_trigger(
        State(application_state): State<AppState>,
        Path(tenant_id): Path<String>,
        request_headers: HeaderMap,
        Json(payload): Json<SuspendTriggerPayload>,
    ) -> Response {
        if let Some(body_tenant) = &payload.tenant_id {
            if body_tenant != &tenant_id {
                warn!("⛔ [GLASS_BREAK]: Body tenant [{}] contradicts session tenant.", body_tenant);
                return (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "TENANT_SESSION_MISMATCH" })),
                )
                    .into_response();
            }
        }

        if let Some(confirmation) = &payload.confirmation {
            if confirmation != SUSPEND_CONFIRMATION_PHRASE {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "CONFIRMATION_PHRASE_MISMATCH",
                        "expected": SUSPEND_CONFIRMATION_PHRASE,
                    })),
                )
                    .into_response();
            }
        }

        let actor_email = request_headers
            .get("x-admin-email")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("system@custodia.internal")
            .to_string();
        let actor_name = request_headers
            .get("x-admin-name")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("SYSTEM_DELEGATE")
            .to_string();

        let reason = payload.reason.unwrap_or_else(|| "GLASS_BREAK".to_string());

        match application_state
            .suspension_engine
            .suspend(&tenant_id, &reason, &actor_email, &actor_name)
            .await
        {
            Ok(receipt) => {
                application_state
                    .status_cache
                    .set_status(&tenant_id, TenantStatus::Suspended);
                info!("🚨 [GLASS_BREAK]: Tenant [{}] suspended by {}.", tenant_id, actor_email);
                (StatusCode::OK, Json(receipt)).into_response()
            }
            Err(suspend_fault) => fault_to_response(suspend_fault),
        }
    }
}
