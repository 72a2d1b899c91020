// INICIO DEL ARCHIVO [tests/mirror/apps/custodian/config_environment.test.rs]
/**
 * =================================================================
 * APARATO: CONFIG ENVIRONMENT TEST (V1.0)
 * CLASIFICACIÓN: TRINITY EVIDENCE
 * OBJETIVO: Certificar la captura tipada del entorno: secreto
 *           innegociable, defaults y techo del periodo de latido.
 * =================================================================
 */

use custodia_custodian::config::CustodianConfig;

/// Un solo test secuencial: las variables de entorno son estado global
/// del proceso y no toleran mutación concurrente.
#[test]
fn certify_environment_capture_sequence() {
    // 1. SECRETO INNEGOCIABLE AUSENTE → ignición abortada.
    std::env::remove_var("WITNESS_HMAC_KEY");
    std::env::remove_var("CRON_SECRET");
    match CustodianConfig::load_from_environment() {
        Err(missing_variable) => assert_eq!(missing_variable, "WITNESS_HMAC_KEY"),
        Ok(_) => panic!("SECRET_FAULT: ignition must abort without WITNESS_HMAC_KEY"),
    }

    // 2. MÍNIMO VIABLE → defaults cristalizados.
    std::env::set_var("WITNESS_HMAC_KEY", "server-witness-secret");
    std::env::remove_var("AUDIT_ROOT");
    std::env::remove_var("KEYS_ROOT");
    std::env::remove_var("PULSE_INTERVAL_SECONDS");
    std::env::remove_var("PORT");
    let configuration = CustodianConfig::load_from_environment().expect("minimal environment");

    assert!(configuration.cron_secret.is_none(), "unset CRON_SECRET means dev mode");
    assert!(configuration.audit_root.ends_with("data/audit"));
    assert!(configuration.keys_root.ends_with("data/keys"));
    assert_eq!(configuration.pulse_interval.as_secs(), 300);
    assert_eq!(configuration.listening_port, 3000);

    // 3. TECHO DEL LATIDO: el contrato exige ≤ 10 minutos.
    std::env::set_var("PULSE_INTERVAL_SECONDS", "900");
    let clamped = CustodianConfig::load_from_environment().unwrap();
    assert_eq!(clamped.pulse_interval.as_secs(), 600, "CLAMP_FAULT: pulse period over ceiling");

    // 4. SECRETO CRON VACÍO equivale a ausente.
    std::env::set_var("CRON_SECRET", "");
    let empty_secret = CustodianConfig::load_from_environment().unwrap();
    assert!(empty_secret.cron_secret.is_none());

    std::env::set_var("CRON_SECRET", "sealed");
    let sealed_secret = CustodianConfig::load_from_environment().unwrap();
    assert_eq!(sealed_secret.cron_secret.as_deref(), Some("sealed"));

    println!("✅ CONFIG: Environment capture sequence certified.");
}
// FIN DEL ARCHIVO [tests/mirror/apps/custodian/config_environment.test.rs]
