// [libs/domain/transparency/src/lib.rs]
/*!
 * =================================================================
 * APARATO: TRANSPARENCY REDACTOR (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: VISTA PÚBLICA PII-REDACTADA DEL RASTRO VIVO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. DERIVATIVE ONLY: El redactor jamás muta el ledger; su salida
 *    existe por petición para la vista pública de transparencia.
 * 2. DETERMINISTIC RULES: El mismo eslabón produce la misma vista
 *    redactada en toda corrida; las reglas son datos compilados una
 *    sola vez.
 * 3. KNOWN UNDER-APPROXIMATION: El set de reglas cubre E.164, formas
 *    telefónicas US comunes, correos y direcciones postales US; los
 *    formatos internacionales quedan fuera de la cobertura declarada.
 * =================================================================
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;

/// Campos estructurales exentos de redacción (contratos de la UI y
/// material de verificación criptográfica).
static EXEMPT_FIELDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "receipt_id",
        "timestamp",
        "tool_name",
        "execution_status",
        "prev_hash",
        "entry_hash",
        "entry_kind",
        "policy_snapshot_hash",
        "merkle_root_snapshot",
        "chain_head_at_suspend",
        "digital_fingerprint",
        "external_call_id",
        "suspend_id",
    ])
});

/// Campos cuyo valor completo es un nombre humano.
static NAME_FIELDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from(["admin_name", "caller_name", "citizen_name", "contact_name"])
});

struct RedactionRule {
    pattern: Regex,
    replacement: &'static str,
}

static REDACTION_RULES: Lazy<Vec<RedactionRule>> = Lazy::new(|| {
    vec![
        RedactionRule {
            pattern: Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}")
                .expect("email rule compiles"),
            replacement: "[REDACTED:EMAIL]",
        },
        RedactionRule {
            pattern: Regex::new(
                r"\b\d{1,5}\s+(?:[A-Z][a-zA-Z]*\s+){1,3}(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Lane|Ln|Drive|Dr|Court|Ct|Way)\b\.?",
            )
            .expect("address rule compiles"),
            replacement: "[REDACTED:ADDRESS]",
        },
        RedactionRule {
            pattern: Regex::new(r"\+[1-9]\d{7,14}").expect("e164 rule compiles"),
            replacement: "[REDACTED:PHONE]",
        },
        RedactionRule {
            pattern: Regex::new(r"\(?\b\d{3}\)?[-.\s]\d{3}[-.\s]?\d{4}\b")
                .expect("us phone rule compiles"),
            replacement: "[REDACTED:PHONE]",
        },
    ]
});

/// Aplica todas las reglas sobre un valor string.
fn redact_string(raw_text: &str) -> String {
    let mut redacted_text = raw_text.to_string();
    for rule in REDACTION_RULES.iter() {
        redacted_text = rule
            .pattern
            .replace_all(&redacted_text, rule.replacement)
            .to_string();
    }
    redacted_text
}

/**
 * Función pura: eslabón → eslabón redactado.
 *
 * Recorre todo campo string excepto los exentos; los campos de nombre
 * conocidos se reemplazan completos. Arreglos y objetos anidados
 * (argumentos de herramienta incluidos) se recorren recursivamente.
 */
pub fn redact_entry(entry_value: &Value) -> Value {
    redact_value(entry_value, None)
}

/// Conveniencia: vista redactada de una colección de eslabones.
pub fn redact_entries(entries: &[Value]) -> Vec<Value> {
    entries.iter().map(redact_entry).collect()
}

fn redact_value(value: &Value, field_name: Option<&str>) -> Value {
    match value {
        Value::String(raw_text) => {
            if let Some(field) = field_name {
                if EXEMPT_FIELDS.contains(field) {
                    return value.clone();
                }
                if NAME_FIELDS.contains(field) {
                    return Value::String("[REDACTED:NAME]".to_string());
                }
            }
            Value::String(redact_string(raw_text))
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| redact_value(item, field_name))
                .collect(),
        ),
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(key, field_value)| {
                    (key.clone(), redact_value(field_value, Some(key.as_str())))
                })
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}
