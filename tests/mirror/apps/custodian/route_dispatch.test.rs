// INICIO DEL ARCHIVO [tests/mirror/apps/custodian/route_dispatch.test.rs]
/**
 * =================================================================
 * APARATO: ROUTE DISPATCH TEST (V1.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar la topología de la matriz soberana de rutas y
 *           los códigos semánticos del perímetro.
 * =================================================================
 */

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use custodia_core_chain::ChainStore;
use custodia_custodian::config::CustodianConfig;
use custodia_custodian::routes::create_sovereign_router;
use custodia_custodian::state::{AppState, StatusCache};
use custodia_domain_exodus::SovereignExitEngine;
use custodia_domain_governance::{GovernanceDesk, SuspensionEngine};
use custodia_domain_logger::AuditScribe;
use custodia_domain_pulse::{ProcessIdentity, PulseDriver, PulseStateFile};
use custodia_domain_witness::{WitnessDesk, WitnessSigner};
use custodia_infra_store::{DocumentStore, MemoryDocumentStore};

fn forge_test_state(workspace: &tempfile::TempDir) -> AppState {
    let configuration = CustodianConfig {
        audit_root: workspace.path().join("audit"),
        keys_root: workspace.path().join("keys"),
        cron_secret: None,
        witness_hmac_key: "test-witness-key".to_string(),
        database_url: ":memory:".to_string(),
        database_auth_token: None,
        pulse_interval: Duration::from_secs(300),
        anchor_sweep_budget: Duration::from_secs(60),
        listening_port: 0,
    };

    let chain_store = Arc::new(ChainStore::new(
        configuration.audit_root.clone(),
        configuration.keys_root.clone(),
    ));
    let document_store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
    let witness_signer = WitnessSigner::new(configuration.witness_hmac_key.as_bytes());
    let status_cache = Arc::new(StatusCache::new());
    let scribe = Arc::new(AuditScribe::new(chain_store.clone(), status_cache.clone()));

    AppState {
        witness_desk: Arc::new(WitnessDesk::new(
            chain_store.clone(),
            document_store.clone(),
            witness_signer.clone(),
        )),
        governance_desk: Arc::new(GovernanceDesk::new(chain_store.clone(), scribe.clone())),
        suspension_engine: Arc::new(SuspensionEngine::new(
            chain_store.clone(),
            scribe.clone(),
            document_store.clone(),
        )),
        exit_engine: Arc::new(SovereignExitEngine::new(
            chain_store.clone(),
            document_store.clone(),
            witness_signer,
        )),
        pulse_driver: Arc::new(PulseDriver::new(
            scribe.clone(),
            PulseStateFile::new(configuration.audit_root.join("pulse_state.json")),
            ProcessIdentity::forge(),
            configuration.pulse_interval,
        )),
        configuration: Arc::new(configuration),
        chain_store,
        scribe,
        document_store,
        status_cache,
    }
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn certify_sovereign_route_topology() {
    let workspace = tempfile::tempdir().unwrap();
    let router = create_sovereign_router(forge_test_state(&workspace));

    // Diagnóstico del Kernel siempre responde.
    let diagnostics = router
        .clone()
        .oneshot(get_request("/api/v1/admin/diagnostics"))
        .await
        .unwrap();
    assert_eq!(diagnostics.status(), StatusCode::OK);

    // Silo fresco: integridad GENESIS, transparencia vacía, testigo
    // sin ancla — todos 200.
    for tenant_route in [
        "/api/v1/tenants/acme/integrity",
        "/api/v1/tenants/acme/transparency",
        "/api/v1/tenants/acme/witness",
        "/api/v1/tenants/acme/governance/status",
    ] {
        let response = router.clone().oneshot(get_request(tenant_route)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "ROUTE_FAULT at {}", tenant_route);
    }

    // Territorio inexistente → 404.
    let unknown = router
        .clone()
        .oneshot(get_request("/api/v1/unknown/territory"))
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    println!("✅ ROUTES: Sovereign topology certified.");
}

#[tokio::test]
async fn certify_semantic_status_codes() {
    let workspace = tempfile::tempdir().unwrap();
    let router = create_sovereign_router(forge_test_state(&workspace));

    // Suspensión de un tenant no resuelto en govTenants → 412.
    let unresolved_suspend = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/tenants/ghost/suspend")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"reason":"GLASS_BREAK"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(unresolved_suspend.status(), StatusCode::PRECONDITION_FAILED);

    // Tenant del cuerpo contradice la ruta → 403.
    let mismatched_suspend = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/tenants/acme/suspend")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"tenant_id":"umbra"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(mismatched_suspend.status(), StatusCode::FORBIDDEN);

    // Éxodo con confirmación inexacta → 428.
    let unconfirmed_exit = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/tenants/acme/exit")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"passphrase":"correct horse battery","confirmation":"please delete"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(unconfirmed_exit.status(), StatusCode::PRECONDITION_REQUIRED);

    // Acceso administrativo sin identidad → 401 y sin entrega de datos.
    let anonymous_audit = router
        .oneshot(get_request("/api/v1/tenants/acme/audit?action=view&purpose=spot+check"))
        .await
        .unwrap();
    assert_eq!(anonymous_audit.status(), StatusCode::UNAUTHORIZED);
    println!("✅ ROUTES: Semantic status codes certified.");
}
// FIN DEL ARCHIVO [tests/mirror/apps/custodian/route_dispatch.test.rs]
