// [apps/custodian/src/handlers/audit.rs]
/*!
 * =================================================================
 * APARATO: AUDIT TRAIL HANDLER (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L3)
 * RESPONSABILIDAD: INGESTA DE EJECUCIONES, ACCESO ADMIN Y TRANSPARENCIA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. RAIO GATE FIRST: La ingesta de ejecuciones consulta la ventana de
 *    30 días ANTES de tocar la cadena; un gate vencido es un 403 sin
 *    efectos secundarios.
 * 2. WITHHOLD ON WRITE FAULT: Si el eslabón AUDIT_SHIELD no persiste,
 *    el acceso administrativo NO entrega los datos subyacentes.
 * 3. COOKIE-DRIVEN REDACTION: El colaborador fija la bandera de
 *    redacción desde una cookie httpOnly; la vista de transparencia
 *    pública redacta SIEMPRE.
 * =================================================================
 */

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use custodia_domain_models::entry::{
    AdminAccessRequest, AdminAction, ExecutionStatus, ToolExecutionRequest,
};
use custodia_domain_transparency::redact_entries;
use custodia_infra_store::collections;

use crate::handlers::fault_to_response;
use crate::state::AppState;

/// Cookie httpOnly que activa la redacción en respuestas vivas.
const REDACTED_VIEW_COOKIE: &str = "custodia_redacted_view=1";

#[derive(Debug, Deserialize)]
pub struct ToolExecutionIngestPayload {
    pub agent_nhi: String,
    pub tool_name: String,
    pub tool_arguments: serde_json::Value,
    pub policy_snapshot_hash: String,
    pub execution_status: ExecutionStatus,
    pub execution_result: serde_json::Value,
    #[serde(default)]
    pub external_call_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdminAccessQueryParams {
    /// Acción ejercida: view | download | export (conjunto cerrado).
    pub action: AdminAction,
    /// Justificación declarada del acceso.
    pub purpose: String,
}

pub struct AuditTrailHandler;

impl AuditTrailHandler {
    /**
     * Ingesta del webhook del agente de voz: sella TOOL_EXECUTION.
     * Un fallo de escritura significa que el colaborador DEBE retener
     * el resultado de la herramienta (la respuesta es el error).
     */
    #[instrument(skip(application_state, payload), fields(tenant = %tenant_id, tool = %payload.tool_name))]
    pub async fn handle_tool_execution_ingest(
        State(application_state): State<AppState>,
        Path(tenant_id): Path<String>,
        Json(payload): Json<ToolExecutionIngestPayload>,
    ) -> impl IntoResponse {
        // PUERTA RAIO: re-autorización humana vigente o rechazo 403.
        match application_state.governance_desk.is_raio_authorized(&tenant_id) {
            Ok(authorization) if !authorization.authorized => {
                warn!("⛔ [RAIO_GATE]: Execution refused for [{}] ({:?}).", tenant_id, authorization.verdict);
                return (
                    StatusCode::FORBIDDEN,
                    Json(json!({
                        "error": "RAIO_AUTHORIZATION_EXPIRED",
                        "verdict": authorization.verdict,
                        "days_since_checkin": authorization.days_since_checkin,
                    })),
                )
                    .into_response();
            }
            Ok(_) => {}
            Err(gate_fault) => return fault_to_response(gate_fault),
        }

        let write_result = application_state.scribe.write_tool_execution(ToolExecutionRequest {
            tenant_id: tenant_id.clone(),
            agent_nhi: payload.agent_nhi,
            tool_name: payload.tool_name,
            tool_arguments: payload.tool_arguments,
            policy_snapshot_hash: payload.policy_snapshot_hash,
            execution_status: payload.execution_status,
            execution_result: payload.execution_result,
            external_call_id: payload.external_call_id,
        });

        match write_result {
            Ok(entry) => (
                StatusCode::CREATED,
                Json(json!({
                    "receipt_id": entry.receipt_id,
                    "index": entry.index,
                    "entry_hash": entry.entry_hash,
                    "timestamp": entry.timestamp,
                })),
            )
                .into_response(),
            Err(write_fault) => fault_to_response(write_fault),
        }
    }

    /**
     * Acceso administrativo auditado al rastro del tenant objetivo.
     * Escribe AUDIT_SHIELD + espejo ADMIN_ACTIVITY antes de entregar.
     */
    #[instrument(skip(application_state, request_headers, query_params), fields(tenant = %tenant_id))]
    pub async fn handle_admin_audit_access(
        State(application_state): State<AppState>,
        Path(tenant_id): Path<String>,
        Query(query_params): Query<AdminAccessQueryParams>,
        request_headers: HeaderMap,
    ) -> Response {
        let admin_email = header_string(&request_headers, "x-admin-email");
        let admin_name = header_string(&request_headers, "x-admin-name");
        if admin_email.is_empty() {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "ADMIN_IDENTITY_ABSENT" })),
            )
                .into_response();
        }

        // DOBLE ESCRITURA PRIMERO: sin escudo sellado no hay datos.
        if let Err(shield_fault) = application_state.scribe.log_admin_access(AdminAccessRequest {
            admin_email: admin_email.clone(),
            admin_name,
            tenant_id: tenant_id.clone(),
            action: query_params.action,
            purpose: query_params.purpose.clone(),
        }) {
            warn!("⛔ [AUDIT_SHIELD]: Shield write failed; underlying data withheld.");
            return fault_to_response(shield_fault);
        }

        let entries = match application_state.chain_store.read_all(&tenant_id) {
            Ok(entries) => entries,
            Err(read_fault) => return fault_to_response(read_fault),
        };

        let mut entry_values: Vec<serde_json::Value> = entries
            .iter()
            .filter_map(|entry| serde_json::to_value(entry).ok())
            .collect();

        if redaction_requested(&request_headers) {
            entry_values = redact_entries(&entry_values);
        }

        info!(
            "🛡️ [AUDIT_SHIELD]: {} entries delivered to {} ({:?}).",
            entry_values.len(),
            admin_email,
            query_params.action
        );

        match query_params.action {
            AdminAction::Download => {
                let ndjson_body = entry_values
                    .iter()
                    .map(|value| value.to_string())
                    .collect::<Vec<_>>()
                    .join("\n");
                (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, "application/x-ndjson")],
                    ndjson_body,
                )
                    .into_response()
            }
            AdminAction::View | AdminAction::Export => {
                (StatusCode::OK, Json(json!({ "tenant_id": tenant_id, "entries": entry_values })))
                    .into_response()
            }
        }
    }

    /**
     * Vista pública de transparencia: SIEMPRE redactada, derivativa,
     * jamás muta el ledger.
     */
    #[instrument(skip(application_state), fields(tenant = %tenant_id))]
    pub async fn handle_transparency_view(
        State(application_state): State<AppState>,
        Path(tenant_id): Path<String>,
    ) -> Response {
        let entries = match application_state.chain_store.read_all(&tenant_id) {
            Ok(entries) => entries,
            Err(read_fault) => return fault_to_response(read_fault),
        };

        let entry_values: Vec<serde_json::Value> = entries
            .iter()
            .filter_map(|entry| serde_json::to_value(entry).ok())
            .collect();
        let redacted_view = redact_entries(&entry_values);

        (
            StatusCode::OK,
            Json(json!({ "tenant_id": tenant_id, "entries": redacted_view })),
        )
            .into_response()
    }

    /// Reporte O(n) del verificador para el banner de lockdown de la UI.
    #[instrument(skip(application_state), fields(tenant = %tenant_id))]
    pub async fn handle_integrity_report(
        State(application_state): State<AppState>,
        Path(tenant_id): Path<String>,
    ) -> Response {
        match application_state.chain_store.verify(&tenant_id) {
            Ok(report) => (StatusCode::OK, Json(report)).into_response(),
            Err(verify_fault) => fault_to_response(verify_fault),
        }
    }

    /**
     * Rotación de llave del tenant; el metadato remoto es best-effort.
     */
    #[instrument(skip(application_state), fields(tenant = %tenant_id))]
    pub async fn handle_key_rotation(
        State(application_state): State<AppState>,
        Path(tenant_id): Path<String>,
    ) -> Response {
        use custodia_domain_logger::TenantStatusProvider;
        let tenant_status = application_state.status_cache.tenant_status(&tenant_id);

        let rotation_report =
            match application_state.chain_store.rotate_key(&tenant_id, tenant_status) {
                Ok(report) => report,
                Err(rotation_fault) => return fault_to_response(rotation_fault),
            };

        // Metadato remoto (no fatal): rastro de rotaciones por tenant.
        if let Err(metadata_fault) = application_state
            .document_store
            .merge_document(
                collections::KEY_ROTATIONS,
                &tenant_id,
                json!({
                    "tenant_id": tenant_id,
                    "last_rotated_at": rotation_report.rotated_at,
                    "last_key_id": rotation_report.new_key_id,
                    "entries_resealed": rotation_report.entries_resealed,
                }),
            )
            .await
        {
            warn!("⚠️ [ROTATION]: Remote rotation metadata degraded: {}", metadata_fault);
        }

        (StatusCode::OK, Json(rotation_report)).into_response()
    }
}

fn header_string(request_headers: &HeaderMap, header_name: &str) -> String {
    request_headers
        .get(header_name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Bandera de redacción por petición (cookie httpOnly del colaborador).
fn redaction_requested(request_headers: &HeaderMap) -> bool {
    request_headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(|cookies| cookies.contains(REDACTED_VIEW_COOKIE))
        .unwrap_or(false)
}
