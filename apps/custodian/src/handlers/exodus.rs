// [apps/custodian/src/handlers/exodus.rs]
/*!
 * =================================================================
 * APARATO: SOVEREIGN EXIT HANDLER (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L3)
 * RESPONSABILIDAD: ENTREGA DEL ARCHIVO CIFRADO Y EL CERTIFICADO
 *
 * La respuesta es application/octet-stream; el certificado viaja en
 * cabeceras (id, hash, firma, totales de bytes, bandera null-verified)
 * porque el cuerpo es la única copia del archivo cifrado.
 * =================================================================
 */

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use custodia_domain_models::tenant::TenantStatus;

use crate::handlers::fault_to_response;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SovereignExitPayload {
    pub passphrase: String,
    pub confirmation: String,
    #[serde(default)]
    pub baseline_set1: Option<serde_json::Value>,
    #[serde(default)]
    pub agent_config: Option<serde_json::Value>,
    #[serde(default)]
    pub procurement_data: Option<serde_json::Value>,
}

pub struct SovereignExitHandler;

impl SovereignExitHandler {
    /**
     * Éxodo soberano completo: archivo → trituración → purga → entrega.
     */
    #[instrument(skip(application_state, payload), fields(tenant = %tenant_id))]
    pub async fn handle_sovereign_exit(
        State(application_state): State<AppState>,
        Path(tenant_id): Path<String>,
        Json(payload): Json<SovereignExitPayload>,
    ) -> Response {
        let client_bundle = json!({
            "baseline_set1": payload.baseline_set1,
            "agent_config": payload.agent_config,
            "procurement_data": payload.procurement_data,
        });

        let (archive_material, certificate) = match application_state
            .exit_engine
            .sovereign_exit(&tenant_id, &payload.passphrase, client_bundle, &payload.confirmation)
            .await
        {
            Ok(delivery) => delivery,
            Err(exit_fault) => return fault_to_response(exit_fault),
        };

        application_state
            .status_cache
            .set_status(&tenant_id, TenantStatus::Destroyed);

        info!(
            "⚰️  [EXODUS]: Archive delivered for [{}] ({} bytes). Server retains nothing.",
            tenant_id,
            archive_material.len()
        );

        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE.as_str(), "application/octet-stream".to_string()),
                ("x-certificate-id", certificate.certificate_id.clone()),
                ("x-archive-sha256", certificate.archive_sha256.clone()),
                ("x-certificate-signature", certificate.signature.clone()),
                ("x-archive-byte-count", certificate.archive_byte_count.to_string()),
                ("x-destroyed-byte-count", certificate.total_bytes_destroyed.to_string()),
                ("x-null-verified", certificate.all_paths_verified_null.to_string()),
            ],
            archive_material,
        )
            .into_response()
    }
}
