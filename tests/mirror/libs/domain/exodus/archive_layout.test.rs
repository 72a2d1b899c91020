// INICIO DEL ARCHIVO [tests/mirror/libs/domain/exodus/archive_layout.test.rs]
/**
 * =================================================================
 * APARATO: ARCHIVE LAYOUT TEST (V1.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar la cabecera de 60 bytes (salt 32 ∥ iv 12 ∥
 *           tag 16), el roundtrip gzip+GCM y el rechazo de frases
 *           incorrectas.
 * =================================================================
 */

use custodia_core_chain::ChainFault;
use custodia_domain_exodus::{build_encrypted_archive, decrypt_archive, ARCHIVE_HEADER_BYTES};
use serde_json::json;

#[test]
fn certify_header_is_exactly_sixty_bytes() {
    assert_eq!(ARCHIVE_HEADER_BYTES, 32 + 12 + 16);

    let envelope = json!({ "_archive_metadata": { "format_version": 1 }, "audit_log_entries": [] });
    let archive = build_encrypted_archive(&envelope, "correct horse battery").unwrap();
    assert!(
        archive.len() > ARCHIVE_HEADER_BYTES,
        "LAYOUT_FAULT: ciphertext must follow the 60-byte header"
    );
    println!("✅ ARCHIVE: 60-byte header certified.");
}

#[test]
fn certify_roundtrip_ignoring_volatile_metadata() {
    let envelope = json!({
        "_archive_metadata": { "format_version": 1, "exported_at": "2026-08-01T12:00:00.000Z" },
        "audit_log_entries": [ { "receipt_id": "AR-1-A", "index": 0 } ],
        "audit_raw_files": { "ledger.ndjson": "ENC:abcd" },
        "client_data": { "agent_config": { "voice": "es-MX" } },
    });

    let archive = build_encrypted_archive(&envelope, "correct horse battery").unwrap();
    let recovered = decrypt_archive(&archive, "correct horse battery").unwrap();

    // Igualdad estructural completa salvo metadatos volátiles (aquí
    // fijados, por lo que la igualdad es total).
    assert_eq!(recovered, envelope, "ROUNDTRIP_FAULT: envelope drift");
    println!("✅ ARCHIVE: gzip+GCM roundtrip certified.");
}

#[test]
fn certify_wrong_passphrase_refused() {
    let envelope = json!({ "audit_log_entries": [] });
    let archive = build_encrypted_archive(&envelope, "correct horse battery").unwrap();

    match decrypt_archive(&archive, "incorrect stapler") {
        Err(ChainFault::DecryptionFailed(_)) => {}
        other => panic!("SECURITY_FAULT: wrong passphrase must refuse, got {:?}", other.map(|_| ())),
    }
    println!("✅ ARCHIVE: Wrong passphrase refusal certified.");
}

#[test]
fn certify_distinct_salts_per_archive() {
    let envelope = json!({ "audit_log_entries": [] });
    let first = build_encrypted_archive(&envelope, "correct horse battery").unwrap();
    let second = build_encrypted_archive(&envelope, "correct horse battery").unwrap();

    assert_ne!(&first[..32], &second[..32], "SALT_FAULT: salts must be fresh CSPRNG");
    assert_ne!(first, second);
    println!("✅ ARCHIVE: Fresh salt discipline certified.");
}

#[test]
fn certify_truncated_archive_refused() {
    match decrypt_archive(&[0u8; 30], "correct horse battery") {
        Err(ChainFault::DecryptionFailed(detail)) => {
            assert!(detail.contains("ARCHIVE_HEADER_TRUNCATED"));
        }
        other => panic!("BOUNDARY_FAULT: truncated archive must refuse, got {:?}", other.map(|_| ())),
    }
    println!("✅ ARCHIVE: Truncated header refusal certified.");
}
// FIN DEL ARCHIVO [tests/mirror/libs/domain/exodus/archive_layout.test.rs]
