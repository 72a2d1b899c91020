// INICIO DEL ARCHIVO [tests/mirror/libs/domain/audit_logger/dual_write_mirror.test.rs]
/**
 * =================================================================
 * APARATO: DUAL WRITE MIRROR TEST (V1.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar la doble escritura del escudo administrativo:
 *           eslabón AUDIT_SHIELD + espejo ADMIN_ACTIVITY con la misma
 *           marca y recibo.
 * =================================================================
 */

use std::sync::Arc;

use custodia_core_chain::ChainStore;
use custodia_domain_logger::{status::AlwaysActiveStatus, AuditScribe};
use custodia_domain_models::entry::{AdminAccessRequest, AdminAction, EntryKind};

fn forge_scribe(workspace: &tempfile::TempDir) -> (Arc<ChainStore>, AuditScribe) {
    let chain_store = Arc::new(ChainStore::new(
        workspace.path().join("audit"),
        workspace.path().join("keys"),
    ));
    let scribe = AuditScribe::new(chain_store.clone(), Arc::new(AlwaysActiveStatus));
    (chain_store, scribe)
}

#[test]
fn certify_shield_and_mirror_share_receipt_and_timestamp() {
    let workspace = tempfile::tempdir().unwrap();
    let (chain_store, scribe) = forge_scribe(&workspace);

    let shield_entry = scribe
        .log_admin_access(AdminAccessRequest {
            admin_email: "auditor@agency.gov".to_string(),
            admin_name: "Internal Auditor".to_string(),
            tenant_id: "acme".to_string(),
            action: AdminAction::Download,
            purpose: "quarterly compliance review".to_string(),
        })
        .expect("dual write");

    assert!(shield_entry.receipt_id.starts_with("AS-"));
    assert_eq!(shield_entry.event.kind(), EntryKind::AdminAccess);

    // Eslabón en la cadena del tenant objetivo.
    let entries = chain_store.read_all("acme").unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].receipt_id, shield_entry.receipt_id);

    // Espejo process-wide con la MISMA marca y recibo.
    let mirror_content = std::fs::read_to_string(chain_store.admin_mirror_path()).unwrap();
    let mirror_lines: Vec<&str> = mirror_content.lines().collect();
    assert_eq!(mirror_lines.len(), 1);

    let mirror_record: serde_json::Value = serde_json::from_str(mirror_lines[0]).unwrap();
    assert_eq!(mirror_record["record_kind"], "ADMIN_ACTIVITY");
    assert_eq!(mirror_record["receipt_id"], shield_entry.receipt_id.as_str());
    assert_eq!(mirror_record["timestamp"], shield_entry.timestamp.as_str());
    assert_eq!(mirror_record["tenant_id"], "acme");
    assert_eq!(mirror_record["action"], "download");
    println!("✅ SCRIBE: Dual-write receipt/timestamp parity certified.");
}

#[test]
fn certify_mirror_accumulates_across_tenants() {
    let workspace = tempfile::tempdir().unwrap();
    let (chain_store, scribe) = forge_scribe(&workspace);

    for tenant_id in ["acme", "umbra", "acme"] {
        scribe
            .log_admin_access(AdminAccessRequest {
                admin_email: "auditor@agency.gov".to_string(),
                admin_name: "Internal Auditor".to_string(),
                tenant_id: tenant_id.to_string(),
                action: AdminAction::View,
                purpose: "spot check".to_string(),
            })
            .unwrap();
    }

    let mirror_content = std::fs::read_to_string(chain_store.admin_mirror_path()).unwrap();
    assert_eq!(mirror_content.lines().count(), 3, "MIRROR_FAULT: one line per access");

    assert_eq!(chain_store.read_all("acme").unwrap().len(), 2);
    assert_eq!(chain_store.read_all("umbra").unwrap().len(), 1);
    assert!(chain_store.verify("acme").unwrap().valid);
    assert!(chain_store.verify("umbra").unwrap().valid);
    println!("✅ SCRIBE: Mirror accumulation certified.");
}
// FIN DEL ARCHIVO [tests/mirror/libs/domain/audit_logger/dual_write_mirror.test.rs]
