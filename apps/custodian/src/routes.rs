// [apps/custodian/src/routes.rs]
/*!
 * =================================================================
 * APARATO: SOVEREIGN ROUTING MATRIX (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: API ADAPTER LAYER (ESTRATO L3)
 * RESPONSABILIDAD: TOPOLOGÍA DE RED DEL ESCUDO DE AUDITORÍA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * La topología expone tres estratos:
 * 1. CRON Táctico (anclaje diario + latido), tras el guardia de secreto.
 * 2. Silo del Tenant (ejecuciones, auditoría, transparencia, gobernanza,
 *    suspensión, rotación, éxodo), resuelto por tenant de sesión.
 * 3. Administración (diagnóstico del Kernel).
 * =================================================================
 */

use crate::handlers::{admin, audit, exodus, governance, witness};
use crate::middleware::cron_guard;
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
    http::{header, Method},
};
use tower_http::cors::{Any, CorsLayer};
use std::time::Duration;

pub fn create_sovereign_router(application_shared_state: AppState) -> Router {
    // Escudo de Red: CORS para el Dashboard y herramientas de Ops.
    let network_security_shield = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    // ESTRATO CRON: disparadores externos tras el guardia de secreto.
    let cron_stratum = Router::new()
        // Anclaje diario de testigo (acepta POST y GET)
        .route("/anchor", post(witness::WitnessHandler::handle_anchor_cron)
            .get(witness::WitnessHandler::handle_anchor_cron))
        // Ronda de latido de disponibilidad
        .route("/pulse", post(witness::WitnessHandler::handle_pulse_cron))
        .layer(middleware::from_fn_with_state(
            application_shared_state.clone(),
            cron_guard,
        ));

    // ESTRATO DEL SILO: operaciones por tenant resuelto.
    let tenant_stratum = Router::new()
        // Ingesta del webhook del agente de voz (gate RAIO incluido)
        .route("/executions", post(audit::AuditTrailHandler::handle_tool_execution_ingest))
        // Acceso administrativo auditado (AUDIT_SHIELD + espejo)
        .route("/audit", get(audit::AuditTrailHandler::handle_admin_audit_access))
        // Vista pública de transparencia (siempre redactada)
        .route("/transparency", get(audit::AuditTrailHandler::handle_transparency_view))
        // Reporte del verificador de integridad
        .route("/integrity", get(audit::AuditTrailHandler::handle_integrity_report))
        // Verificación local-contra-ancla (?history=true)
        .route("/witness", get(witness::WitnessHandler::handle_witness_verification))
        // Rotación de llave del silo
        .route("/key/rotate", post(audit::AuditTrailHandler::handle_key_rotation))
        // Gobernanza RAIO (check-in + veredicto)
        .route("/governance/checkin", post(governance::GovernanceHandler::handle_raio_checkin))
        .route("/governance/status", get(governance::GovernanceHandler::handle_raio_status))
        // Suspensión glass-break
        .route("/suspend", post(governance::GovernanceHandler::handle_suspend_trigger))
        // Éxodo soberano (archivo cifrado + certificado)
        .route("/exit", post(exodus::SovereignExitHandler::handle_sovereign_exit));

    // ESTRATO DE ADMINISTRACIÓN
    let admin_stratum = Router::new()
        .route("/diagnostics", get(admin::DiagnosticsHandler::handle_system_diagnostics));

    Router::new()
        .nest("/api/v1/cron", cron_stratum)
        .nest("/api/v1/tenants/:tenant_id", tenant_stratum)
        .nest("/api/v1/admin", admin_stratum)
        .layer(network_security_shield)
        .with_state(application_shared_state)
}
