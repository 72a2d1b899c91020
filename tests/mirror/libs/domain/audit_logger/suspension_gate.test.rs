// INICIO DEL ARCHIVO [tests/mirror/libs/domain/audit_logger/suspension_gate.test.rs]
/**
 * =================================================================
 * APARATO: SUSPENSION GATE TEST (V1.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar la puerta de estado del Escriba: un tenant
 *           suspendido no ejecuta herramientas, uno destruido no
 *           escribe nada.
 * =================================================================
 */

use std::sync::Arc;
use std::sync::RwLock;

use custodia_core_chain::{ChainFault, ChainStore};
use custodia_domain_logger::{AuditScribe, TenantStatusProvider};
use custodia_domain_models::entry::{ExecutionStatus, ToolExecutionRequest};
use custodia_domain_models::tenant::TenantStatus;
use serde_json::json;

/// Doble de estado mutable para el Proving Grounds.
struct MutableStatus {
    current: RwLock<TenantStatus>,
}

impl TenantStatusProvider for MutableStatus {
    fn tenant_status(&self, _tenant_id: &str) -> TenantStatus {
        *self.current.read().unwrap()
    }
}

fn tool_request(tenant_id: &str) -> ToolExecutionRequest {
    ToolExecutionRequest {
        tenant_id: tenant_id.to_string(),
        agent_nhi: "nhi:receptionist:alpha".to_string(),
        tool_name: "schedule_appointment".to_string(),
        tool_arguments: json!({ "slot": "09:30" }),
        policy_snapshot_hash: "cd".repeat(32),
        execution_status: ExecutionStatus::Success,
        execution_result: json!({ "ok": true }),
        external_call_id: None,
    }
}

#[test]
fn certify_suspended_tenant_refused_chain_still_readable() {
    let workspace = tempfile::tempdir().unwrap();
    let chain_store = Arc::new(ChainStore::new(
        workspace.path().join("audit"),
        workspace.path().join("keys"),
    ));
    let status = Arc::new(MutableStatus { current: RwLock::new(TenantStatus::Active) });
    let scribe = AuditScribe::new(chain_store.clone(), status.clone());

    // Activo: la ejecución sella normalmente.
    scribe.write_tool_execution(tool_request("acme")).expect("active write");

    // Suspendido: la puerta veta ANTES de tocar la cadena.
    *status.current.write().unwrap() = TenantStatus::Suspended;
    match scribe.write_tool_execution(tool_request("acme")) {
        Err(ChainFault::TenantSuspended(tenant)) => assert_eq!(tenant, "acme"),
        other => panic!("GATE_FAULT: suspended execution must be refused, got {:?}", other.map(|entry| entry.receipt_id)),
    }

    // La cadena permanece legible y válida (sin eslabón fantasma).
    let report = chain_store.verify("acme").unwrap();
    assert!(report.valid);
    assert_eq!(report.total_entries, 1);

    // El latido sigue permitido durante la suspensión.
    scribe
        .write_pulse("acme", 1, "uuid:1", json!({}))
        .expect("pulse during suspension");
    println!("✅ GATE: Suspension gate certified.");
}

#[test]
fn certify_destroyed_tenant_refused_everywhere() {
    let workspace = tempfile::tempdir().unwrap();
    let chain_store = Arc::new(ChainStore::new(
        workspace.path().join("audit"),
        workspace.path().join("keys"),
    ));
    let status = Arc::new(MutableStatus { current: RwLock::new(TenantStatus::Destroyed) });
    let scribe = AuditScribe::new(chain_store, status);

    match scribe.write_tool_execution(tool_request("acme")) {
        Err(ChainFault::TenantDestroyed(_)) => {}
        other => panic!("GATE_FAULT: destroyed execution must be refused, got {:?}", other.map(|entry| entry.receipt_id)),
    }

    match scribe.log_admin_access(custodia_domain_models::entry::AdminAccessRequest {
        admin_email: "auditor@agency.gov".to_string(),
        admin_name: "Internal Auditor".to_string(),
        tenant_id: "acme".to_string(),
        action: custodia_domain_models::entry::AdminAction::View,
        purpose: "post-mortem".to_string(),
    }) {
        Err(ChainFault::TenantDestroyed(_)) => {}
        other => panic!("GATE_FAULT: destroyed admin access must be refused, got {:?}", other.map(|entry| entry.receipt_id)),
    }
    println!("✅ GATE: Destroyed tenant refusal certified.");
}
// FIN DEL ARCHIVO [tests/mirror/libs/domain/audit_logger/suspension_gate.test.rs]
