// INICIO DEL ARCHIVO [tests/mirror/libs/domain/governance/raio_window.test.rs]
/**
 * =================================================================
 * APARATO: RAIO WINDOW TEST (V1.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar la ventana de 30 días del check-in RAIO y los
 *           registros gemelos (eslabón + arreglo identity-bound).
 * =================================================================
 */

use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use custodia_core_chain::ChainStore;
use custodia_domain_governance::GovernanceDesk;
use custodia_domain_logger::{status::AlwaysActiveStatus, AuditScribe};
use custodia_domain_models::entry::EntryKind;
use custodia_domain_models::governance::{GovernanceLedgerRecord, RaioVerdict};

fn forge_desk(workspace: &tempfile::TempDir) -> (Arc<ChainStore>, GovernanceDesk) {
    let chain_store = Arc::new(ChainStore::new(
        workspace.path().join("audit"),
        workspace.path().join("keys"),
    ));
    let scribe = Arc::new(AuditScribe::new(chain_store.clone(), Arc::new(AlwaysActiveStatus)));
    let desk = GovernanceDesk::new(chain_store.clone(), scribe);
    (chain_store, desk)
}

#[test]
fn certify_never_checked_in_is_unauthorized() {
    let workspace = tempfile::tempdir().unwrap();
    let (_chain_store, desk) = forge_desk(&workspace);

    let authorization = desk.is_raio_authorized("acme").unwrap();
    assert!(!authorization.authorized);
    assert_eq!(authorization.verdict, RaioVerdict::NeverCheckedIn);
    assert!(authorization.latest_entry.is_none());
    println!("✅ RAIO: Never-checked-in refusal certified.");
}

#[test]
fn certify_fresh_checkin_authorizes_thirty_days() {
    let workspace = tempfile::tempdir().unwrap();
    let (chain_store, desk) = forge_desk(&workspace);

    let record = desk
        .record_checkin("acme", "raio:supervisor:7", "fp:device:commitment")
        .expect("checkin");
    assert!(record.chain_receipt_id.as_deref().unwrap_or_default().starts_with("RAIO-"));

    // Gemelos: eslabón RAIO_CHECKIN en la cadena + registro en el arreglo.
    let entries = chain_store.read_all("acme").unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].event.kind(), EntryKind::RaioCheckin);

    let ledger_records = desk.read_ledger("acme").unwrap();
    assert_eq!(ledger_records.len(), 1);
    assert_eq!(ledger_records[0].raio_user_id, "raio:supervisor:7");

    let authorization = desk.is_raio_authorized("acme").unwrap();
    assert!(authorization.authorized);
    assert_eq!(authorization.verdict, RaioVerdict::Authorized);
    assert_eq!(authorization.days_since_checkin, Some(0));
    println!("✅ RAIO: Fresh check-in authorization certified.");
}

#[test]
fn certify_stale_checkin_expires() {
    let workspace = tempfile::tempdir().unwrap();
    let (chain_store, desk) = forge_desk(&workspace);

    // Registro envejecido 45 días escrito directamente en el arreglo.
    let stale_timestamp = (Utc::now() - ChronoDuration::days(45))
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string();
    let stale_records = vec![GovernanceLedgerRecord {
        raio_user_id: "raio:supervisor:7".to_string(),
        digital_fingerprint: "fp:device:commitment".to_string(),
        merkle_root_snapshot: "GENESIS".to_string(),
        timestamp: stale_timestamp,
        chain_receipt_id: None,
    }];
    std::fs::create_dir_all(chain_store.tenant_dir("acme")).unwrap();
    std::fs::write(
        chain_store.governance_ledger_path("acme"),
        serde_json::to_string_pretty(&stale_records).unwrap(),
    )
    .unwrap();

    let authorization = desk.is_raio_authorized("acme").unwrap();
    assert!(!authorization.authorized);
    assert_eq!(authorization.verdict, RaioVerdict::Expired);
    assert_eq!(authorization.days_since_checkin, Some(45));

    // Un check-in fresco re-autoriza de inmediato.
    desk.record_checkin("acme", "raio:supervisor:7", "fp:device:commitment").unwrap();
    let renewed = desk.is_raio_authorized("acme").unwrap();
    assert!(renewed.authorized);
    assert_eq!(renewed.verdict, RaioVerdict::Authorized);
    println!("✅ RAIO: Thirty-day expiry and renewal certified.");
}
// FIN DEL ARCHIVO [tests/mirror/libs/domain/governance/raio_window.test.rs]
