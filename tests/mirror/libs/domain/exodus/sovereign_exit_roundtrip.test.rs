// INICIO DEL ARCHIVO [tests/mirror/libs/domain/exodus/sovereign_exit_roundtrip.test.rs]
/**
 * =================================================================
 * APARATO: SOVEREIGN EXIT ROUNDTRIP TEST (V1.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar el éxodo completo: archivo descifrable,
 *           trituración null-verificada, lápida firmada, purga remota
 *           y veto de renacimiento.
 * =================================================================
 */

use std::sync::Arc;

use custodia_core_chain::{ChainFault, ChainStore};
use custodia_domain_exodus::{decrypt_archive, SovereignExitEngine, EXIT_CONFIRMATION_PHRASE};
use custodia_domain_models::entry::{EntryEvent, ExecutionStatus};
use custodia_domain_models::tenant::TenantStatus;
use custodia_domain_witness::{WitnessDesk, WitnessSigner};
use custodia_infra_store::{collections, DocumentStore, MemoryDocumentStore};
use serde_json::json;

struct ExodusRig {
    chain_store: Arc<ChainStore>,
    document_store: Arc<dyn DocumentStore>,
    engine: SovereignExitEngine,
}

async fn forge_rig(workspace: &tempfile::TempDir) -> ExodusRig {
    let chain_store = Arc::new(ChainStore::new(
        workspace.path().join("audit"),
        workspace.path().join("keys"),
    ));
    let document_store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
    let signer = WitnessSigner::new(b"witness-test-secret");

    document_store
        .put_document(
            collections::GOV_TENANTS,
            "acme",
            json!({ "status": "active", "owner_uid": "owner-42" }),
        )
        .await
        .unwrap();

    // Anclas previas que la fase 3 debe purgar.
    let witness_desk = WitnessDesk::new(chain_store.clone(), document_store.clone(), signer.clone());
    chain_store
        .append(
            "acme",
            EntryEvent::ToolExecution {
                agent_nhi: "nhi:receptionist:alpha".to_string(),
                tool_name: "ping".to_string(),
                tool_arguments: json!({ "target": "127.0.0.1" }),
                policy_snapshot_hash: "cd".repeat(32),
                execution_status: ExecutionStatus::Success,
                execution_result: json!({ "ok": true }),
                external_call_id: None,
            },
        )
        .unwrap();
    chain_store
        .append(
            "acme",
            EntryEvent::ToolExecution {
                agent_nhi: "nhi:receptionist:alpha".to_string(),
                tool_name: "pong".to_string(),
                tool_arguments: json!({}),
                policy_snapshot_hash: "cd".repeat(32),
                execution_status: ExecutionStatus::Fail,
                execution_result: json!({ "ok": false }),
                external_call_id: None,
            },
        )
        .unwrap();
    witness_desk.anchor_tenant("acme").await.unwrap();

    let engine = SovereignExitEngine::new(chain_store.clone(), document_store.clone(), signer);
    ExodusRig { chain_store, document_store, engine }
}

#[tokio::test]
async fn certify_full_exit_roundtrip() {
    let workspace = tempfile::tempdir().unwrap();
    let rig = forge_rig(&workspace).await;

    let head_before = rig.chain_store.verify("acme").unwrap().chain_head_hash;
    let silo_path = rig.chain_store.tenant_dir("acme");
    let key_path = rig.chain_store.key_custodian().key_path("acme");
    assert!(silo_path.is_dir());
    assert!(key_path.is_file());

    let (archive_material, certificate) = rig
        .engine
        .sovereign_exit("acme", "correct horse battery", json!({ "agent_config": {} }), EXIT_CONFIRMATION_PHRASE)
        .await
        .expect("sovereign exit");

    // ENTREGA: el archivo abre con la frase y reconstruye el sobre.
    let envelope = decrypt_archive(&archive_material, "correct horse battery").expect("decrypt");
    assert_eq!(envelope["audit_log_entries"].as_array().unwrap().len(), 2);
    assert_eq!(envelope["_archive_metadata"]["tenant_id"], "acme");
    assert_eq!(
        envelope["_archive_metadata"]["chain_state"]["chain_head_hash"],
        head_before.as_str()
    );
    assert!(envelope["audit_raw_files"]["ledger.ndjson"]
        .as_str()
        .unwrap()
        .starts_with("ENC:"));

    // TRITURACIÓN: silo y llave not-found, certificado null-verificado.
    assert!(!silo_path.exists(), "SHRED_FAULT: silo must be gone");
    assert!(!key_path.exists(), "SHRED_FAULT: key must be gone");
    assert!(certificate.all_paths_verified_null);
    assert!(certificate.crypto_shred_proof.key_destroyed);
    assert_eq!(certificate.entry_count, 2);
    assert_eq!(certificate.final_root_hash, head_before);
    assert_eq!(certificate.archive_byte_count as usize, archive_material.len());

    // LÁPIDA: registro global firmado presente.
    let tombstones = rig.chain_store.tombstones().read_all().unwrap();
    assert_eq!(tombstones.len(), 1);
    assert_eq!(tombstones[0].tenant_id, "acme");
    assert_eq!(tombstones[0].certificate_id, certificate.certificate_id);

    // PURGA REMOTA: anclas fuera, govTenants marcado y PRESERVADO.
    let remaining_anchors = rig
        .document_store
        .list_documents(&collections::anchors_of("acme"))
        .await
        .unwrap();
    assert!(remaining_anchors.is_empty());
    assert_eq!(certificate.remote_purge.anchors_purged, 1);
    assert!(certificate.remote_purge.tenant_marked_destroyed);

    let government_document = rig
        .document_store
        .get_document(collections::GOV_TENANTS, "acme")
        .await
        .unwrap()
        .expect("existence proof must be preserved");
    assert_eq!(government_document["status"], "destroyed");

    // VETO DE RENACIMIENTO: el id destruido jamás vuelve a escribir.
    match rig.chain_store.append(
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
    ) {
        Err(ChainFault::TenantDestroyed(_)) => {}
        other => panic!(
            "REBIRTH_FAULT: post-exit append must be vetoed, got {:?}",
            other.map(|outcome| outcome.entry.receipt_id)
        ),
    }
    println!("✅ EXODUS: Full exit roundtrip certified.");
}

#[tokio::test]
async fn certify_exit_validation_gates() {
    let workspace = tempfile::tempdir().unwrap();
    let rig = forge_rig(&workspace).await;

    // Confirmación inexacta.
    match rig
        .engine
        .sovereign_exit("acme", "correct horse battery", json!({}), "delete everything please")
        .await
    {
        Err(ChainFault::ConfirmationRequired(_)) => {}
        other => panic!("GATE_FAULT: wrong confirmation must refuse, got {:?}", other.map(|_| ())),
    }

    // Frase corta.
    match rig
        .engine
        .sovereign_exit("acme", "short", json!({}), EXIT_CONFIRMATION_PHRASE)
        .await
    {
        Err(ChainFault::PreconditionFailed(_)) => {}
        other => panic!("GATE_FAULT: short passphrase must refuse, got {:?}", other.map(|_| ())),
    }

    // Los gates no tocan el silo.
    assert!(rig.chain_store.tenant_dir("acme").is_dir());
    assert!(rig.chain_store.verify("acme").unwrap().valid);

    // Segundo éxodo tras el primero: TenantDestroyed.
    rig.engine
        .sovereign_exit("acme", "correct horse battery", json!({}), EXIT_CONFIRMATION_PHRASE)
        .await
        .unwrap();
    match rig
        .engine
        .sovereign_exit("acme", "correct horse battery", json!({}), EXIT_CONFIRMATION_PHRASE)
        .await
    {
        Err(ChainFault::TenantDestroyed(_)) => {}
        other => panic!("GATE_FAULT: second exit must refuse, got {:?}", other.map(|_| ())),
    }
    println!("✅ EXODUS: Validation gates certified.");
}
// FIN DEL ARCHIVO [tests/mirror/libs/domain/exodus/sovereign_exit_roundtrip.test.rs]
