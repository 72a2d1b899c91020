// [apps/custodian/src/middleware.rs]
/*!
 * =================================================================
 * APARATO: CRON PERIMETER GUARD (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: SECURITY STRATUM (ESTRATO L4)
 * RESPONSABILIDAD: VALIDACIÓN DEL SECRETO COMPARTIDO DE CRON
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DUAL HEADER CITIZENSHIP: Acepta 'Authorization: Bearer <secreto>'
 *    o el header alternativo 'x-cron-secret'.
 * 2. EXPLICIT DEV MODE: Con CRON_SECRET sin definir, el guardia deja
 *    pasar y traza una advertencia; producción DEBE sellar el secreto.
 * =================================================================
 */

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

use crate::state::AppState;

/// Header alternativo para plataformas cron sin soporte Authorization.
pub const CRON_SECRET_HEADER: &str = "x-cron-secret";

/**
 * Guardia de los disparadores cron (anclaje y latido).
 */
pub async fn cron_guard(
    State(application_state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected_secret) = application_state.configuration.cron_secret.clone() else {
        warn!("⚠️ [CRON_GUARD]: DEVELOPMENT mode — unauthenticated cron trigger accepted.");
        return next.run(request).await;
    };

    let bearer_credential = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let alternative_credential = request
        .headers()
        .get(CRON_SECRET_HEADER)
        .and_then(|value| value.to_str().ok());

    let credential_accepted = bearer_credential == Some(expected_secret.as_str())
        || alternative_credential == Some(expected_secret.as_str());

    if !credential_accepted {
        warn!("⛔ [CRON_GUARD]: Cron trigger refused (credential mismatch).");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "CRON_CREDENTIAL_REJECTED" })),
        )
            .into_response();
    }

    next.run(request).await
}
