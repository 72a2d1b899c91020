// [apps/custodian/src/handlers/mod.rs]
/*!
 * =================================================================
 * APARATO: HANDLER STRATA ROOT (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L3)
 * RESPONSABILIDAD: ADAPTADORES HTTP Y MAPEO DE LA TAXONOMÍA DE FALLOS
 * =================================================================
 */

pub mod admin;
pub mod audit;
pub mod exodus;
pub mod governance;
pub mod witness;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use custodia_core_chain::ChainFault;

/**
 * Mapeo único de la taxonomía de fallos de la librería al perímetro.
 *
 * CriticalIntegrityFailure es el ÚNICO fallo que iza la bandera de
 * lockdown hacia la UI; los demás degradan con sus códigos semánticos.
 */
pub(crate) fn fault_to_response(fault: ChainFault) -> Response {
    let (status_code, lockdown_required) = match &fault {
        ChainFault::Unauthorized => (StatusCode::UNAUTHORIZED, false),
        ChainFault::Forbidden(_) => (StatusCode::FORBIDDEN, false),
        ChainFault::PreconditionFailed(_) => (StatusCode::PRECONDITION_FAILED, false),
        ChainFault::ConfirmationRequired(_) => (StatusCode::PRECONDITION_REQUIRED, false),
        ChainFault::TenantSuspended(_) => (StatusCode::FORBIDDEN, false),
        ChainFault::TenantDestroyed(_) => (StatusCode::GONE, false),
        ChainFault::AlreadySuspended(_) => (StatusCode::CONFLICT, false),
        ChainFault::AuditWriteError(_) => (StatusCode::INTERNAL_SERVER_ERROR, false),
        ChainFault::IoFailure(_) => (StatusCode::INTERNAL_SERVER_ERROR, false),
        ChainFault::EncryptionKeyMissing(_) => (StatusCode::INTERNAL_SERVER_ERROR, false),
        ChainFault::DecryptionFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, false),
        ChainFault::RotationFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, false),
        ChainFault::RemoteStoreError(_) => (StatusCode::BAD_GATEWAY, false),
        ChainFault::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, false),
        ChainFault::CriticalIntegrityFailure(_) => (StatusCode::INTERNAL_SERVER_ERROR, true),
    };

    (
        status_code,
        Json(json!({
            "error": fault.to_string(),
            "lockdown_required": lockdown_required,
        })),
    )
        .into_response()
}
