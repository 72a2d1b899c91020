// INICIO DEL ARCHIVO [tests/mirror/libs/domain/governance/suspension_protocol.test.rs]
/**
 * =================================================================
 * APARATO: SUSPENSION PROTOCOL TEST (V1.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar las cinco fases del glass-break: captura de
 *           cadena, doble colección atómica, terminación de llamadas,
 *           eslabones sellados e idempotencia 409.
 * =================================================================
 */

use std::sync::Arc;

use custodia_core_chain::{ChainFault, ChainStore};
use custodia_domain_governance::SuspensionEngine;
use custodia_domain_logger::{status::AlwaysActiveStatus, AuditScribe};
use custodia_domain_models::entry::{EntryEvent, EntryKind, ExecutionStatus};
use custodia_infra_store::{collections, DocumentStore, MemoryDocumentStore};
use serde_json::json;

struct SuspensionRig {
    chain_store: Arc<ChainStore>,
    document_store: Arc<dyn DocumentStore>,
    engine: SuspensionEngine,
}

async fn forge_rig(workspace: &tempfile::TempDir) -> SuspensionRig {
    let chain_store = Arc::new(ChainStore::new(
        workspace.path().join("audit"),
        workspace.path().join("keys"),
    ));
    let scribe = Arc::new(AuditScribe::new(chain_store.clone(), Arc::new(AlwaysActiveStatus)));
    let document_store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());

    document_store
        .put_document(
            collections::GOV_TENANTS,
            "acme",
            json!({ "status": "active", "owner_uid": "owner-42" }),
        )
        .await
        .unwrap();
    document_store
        .put_document(collections::TENANTS, "owner-42", json!({ "status": "active" }))
        .await
        .unwrap();
    document_store
        .put_document(
            collections::GOVERNMENT_CALLS,
            "call-1",
            json!({ "status": "in-progress", "tenant_id": "acme" }),
        )
        .await
        .unwrap();
    document_store
        .put_document(
            collections::GOVERNMENT_CALLS,
            "call-2",
            json!({ "status": "in-progress", "tenant_id": "umbra" }),
        )
        .await
        .unwrap();

    let engine = SuspensionEngine::new(chain_store.clone(), scribe, document_store.clone());
    SuspensionRig { chain_store, document_store, engine }
}

#[tokio::test]
async fn certify_five_phase_suspension() {
    let workspace = tempfile::tempdir().unwrap();
    let rig = forge_rig(&workspace).await;

    // Eslabón previo para que la captura de cadena tenga sustancia.
    rig.chain_store
        .append(
            "acme",
            EntryEvent::ToolExecution {
                agent_nhi: "nhi:receptionist:alpha".to_string(),
                tool_name: "ping".to_string(),
                tool_arguments: json!({}),
                policy_snapshot_hash: "cd".repeat(32),
                execution_status: ExecutionStatus::Success,
                execution_result: json!({}),
                external_call_id: None,
            },
        )
        .unwrap();
    let head_before_suspend = rig.chain_store.verify("acme").unwrap().chain_head_hash;

    let receipt = rig
        .engine
        .suspend("acme", "GLASS_BREAK", "admin@agency.gov", "Duty Admin")
        .await
        .expect("suspension");

    assert!(receipt.suspend_id.starts_with("SUS-"));
    assert_eq!(receipt.event_hash.len(), 64);
    assert!(receipt.suspend_receipt_id.starts_with("SUSPEND-"));
    assert!(receipt.shield_receipt_id.starts_with("AS-"));
    assert_eq!(receipt.calls_terminated, 1, "only the tenant's in-flight call terminates");

    // FASE 3: doble colección mutada atómicamente.
    let government_document = rig
        .document_store
        .get_document(collections::GOV_TENANTS, "acme")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(government_document["status"], "suspended");
    assert_eq!(government_document["operational_mode"], "OFFLINE");
    assert_eq!(government_document["suspended_by"], "admin@agency.gov");
    assert_eq!(
        government_document["chain_state_at_suspend"]["chain_head_hash"],
        head_before_suspend.as_str()
    );

    let owner_document = rig
        .document_store
        .get_document(collections::TENANTS, "owner-42")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(owner_document["status"], "suspended");

    // FASE 4: la llamada ajena permanece intacta.
    let terminated_call = rig
        .document_store
        .get_document(collections::GOVERNMENT_CALLS, "call-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(terminated_call["status"], "terminated_by_admin");
    let foreign_call = rig
        .document_store
        .get_document(collections::GOVERNMENT_CALLS, "call-2")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(foreign_call["status"], "in-progress");

    // FASE 5: eslabones SUSPEND + AUDIT_SHIELD sellados; verify sano.
    let kinds: Vec<EntryKind> = rig
        .chain_store
        .read_all("acme")
        .unwrap()
        .iter()
        .map(|entry| entry.event.kind())
        .collect();
    assert_eq!(
        kinds,
        vec![EntryKind::ToolExecution, EntryKind::Suspend, EntryKind::AdminAccess]
    );

    let report = rig.chain_store.verify("acme").unwrap();
    assert!(report.valid, "chain must remain readable and valid after suspension");
    println!("✅ SUSPEND: Five-phase protocol certified.");
}

#[tokio::test]
async fn certify_suspension_idempotency_409() {
    let workspace = tempfile::tempdir().unwrap();
    let rig = forge_rig(&workspace).await;

    rig.engine
        .suspend("acme", "GLASS_BREAK", "admin@agency.gov", "Duty Admin")
        .await
        .unwrap();
    let entries_after_first = rig.chain_store.read_all("acme").unwrap().len();

    match rig
        .engine
        .suspend("acme", "GLASS_BREAK_AGAIN", "admin@agency.gov", "Duty Admin")
        .await
    {
        Err(ChainFault::AlreadySuspended(tenant)) => assert_eq!(tenant, "acme"),
        other => panic!(
            "IDEMPOTENCY_FAULT: second suspend must 409, got {:?}",
            other.map(|receipt| receipt.suspend_id)
        ),
    }

    // Sin mutación adicional: ni eslabones nuevos ni cambios remotos.
    assert_eq!(rig.chain_store.read_all("acme").unwrap().len(), entries_after_first);
    println!("✅ SUSPEND: Idempotent 409 certified.");
}

#[tokio::test]
async fn certify_unresolved_tenant_precondition() {
    let workspace = tempfile::tempdir().unwrap();
    let rig = forge_rig(&workspace).await;

    match rig
        .engine
        .suspend("ghost", "GLASS_BREAK", "admin@agency.gov", "Duty Admin")
        .await
    {
        Err(ChainFault::PreconditionFailed(detail)) => {
            assert!(detail.contains("TENANT_UNRESOLVED"));
        }
        other => panic!(
            "RESOLUTION_FAULT: unresolved tenant must fail precondition, got {:?}",
            other.map(|receipt| receipt.suspend_id)
        ),
    }
    println!("✅ SUSPEND: Unresolved tenant precondition certified.");
}
// FIN DEL ARCHIVO [tests/mirror/libs/domain/governance/suspension_protocol.test.rs]
