// INICIO DEL ARCHIVO [tests/mirror/libs/domain/pulse/gap_detection.test.rs]
/**
 * =================================================================
 * APARATO: PULSE GAP DETECTION TEST (V1.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar la heurística de huecos (estado ausente,
 *           identidad cambiada, ventana 2x) y la ronda completa
 *           SYSTEM_RECOVERY → PULSE por tenant.
 * =================================================================
 */

use std::sync::Arc;
use std::time::Duration;

use custodia_core_chain::ChainStore;
use custodia_domain_logger::{status::AlwaysActiveStatus, AuditScribe};
use custodia_domain_models::entry::{EntryEvent, EntryKind, ExecutionStatus};
use custodia_domain_pulse::{ProcessIdentity, PulseDriver, PulseState, PulseStateFile};
use serde_json::json;

fn forge_driver(workspace: &tempfile::TempDir, pulse_period: Duration) -> (Arc<ChainStore>, PulseDriver) {
    let chain_store = Arc::new(ChainStore::new(
        workspace.path().join("audit"),
        workspace.path().join("keys"),
    ));
    let scribe = Arc::new(AuditScribe::new(chain_store.clone(), Arc::new(AlwaysActiveStatus)));
    let driver = PulseDriver::new(
        scribe,
        PulseStateFile::new(workspace.path().join("audit").join("pulse_state.json")),
        ProcessIdentity::forge(),
        pulse_period,
    );
    (chain_store, driver)
}

#[test]
fn certify_gap_heuristic_triad() {
    let workspace = tempfile::tempdir().unwrap();
    let (_chain_store, driver) = forge_driver(&workspace, Duration::from_secs(300));
    let now_milliseconds = 1_700_000_000_000i64;

    // (c) estado ausente
    let missing_state_gap = driver.detect_gap(None, now_milliseconds).expect("gap");
    assert_eq!(missing_state_gap.cause, "PULSE_STATE_MISSING");

    // (a) identidad de proceso cambiada
    let foreign_state = PulseState {
        process_identity: "dead-beef:12345".to_string(),
        last_pulse_epoch_milliseconds: now_milliseconds - 1_000,
        sequence: 41,
    };
    let identity_gap = driver.detect_gap(Some(&foreign_state), now_milliseconds).expect("gap");
    assert_eq!(identity_gap.cause, "PROCESS_IDENTITY_CHANGED");
    assert_eq!(identity_gap.previous_process_identity.as_deref(), Some("dead-beef:12345"));

    // (b) ventana 2x excedida con identidad propia
    let own_identity = driver.process_identity().identity_string();
    let silent_state = PulseState {
        process_identity: own_identity.clone(),
        last_pulse_epoch_milliseconds: now_milliseconds - 700_000,
        sequence: 41,
    };
    let window_gap = driver.detect_gap(Some(&silent_state), now_milliseconds).expect("gap");
    assert_eq!(window_gap.cause, "PULSE_WINDOW_EXCEEDED");
    assert_eq!(window_gap.estimated_gap_milliseconds, Some(700_000));

    // Continuidad sana: sin hueco dentro de la ventana.
    let healthy_state = PulseState {
        process_identity: own_identity,
        last_pulse_epoch_milliseconds: now_milliseconds - 400_000,
        sequence: 41,
    };
    assert!(driver.detect_gap(Some(&healthy_state), now_milliseconds).is_none());
    println!("✅ PULSE: Gap heuristic triad certified.");
}

#[test]
fn certify_round_emits_recovery_then_pulse() {
    let workspace = tempfile::tempdir().unwrap();
    let (chain_store, driver) = forge_driver(&workspace, Duration::from_secs(300));

    // Un silo existente para recibir la ronda.
    chain_store
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

    // Primera ronda: estado ausente → SYSTEM_RECOVERY + PULSE.
    let first_round = driver.run_round();
    assert_eq!(first_round.sequence, 1);
    assert!(first_round.gap_detected.is_some());
    assert_eq!(first_round.tenants_pulsed, 1);
    assert!(first_round.tenant_failures.is_empty());

    // Segunda ronda inmediata: continuidad sana → solo PULSE.
    let second_round = driver.run_round();
    assert_eq!(second_round.sequence, 2);
    assert!(second_round.gap_detected.is_none());

    let kinds: Vec<EntryKind> = chain_store
        .read_all("acme")
        .unwrap()
        .iter()
        .map(|entry| entry.event.kind())
        .collect();
    assert_eq!(
        kinds,
        vec![
            EntryKind::ToolExecution,
            EntryKind::SystemRecovery,
            EntryKind::Pulse,
            EntryKind::Pulse,
        ],
        "ORDER_FAULT: recovery must precede the pulse of its round"
    );

    assert!(chain_store.verify("acme").unwrap().valid);
    println!("✅ PULSE: Recovery-then-pulse round certified.");
}
// FIN DEL ARCHIVO [tests/mirror/libs/domain/pulse/gap_detection.test.rs]
