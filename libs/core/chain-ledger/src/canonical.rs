// [libs/core/chain-ledger/src/canonical.rs]
/*!
 * =================================================================
 * APARATO: CANONICAL JSON ENCODER (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: CORE ENGINE (ESTRATO L1)
 * RESPONSABILIDAD: FORMA CANÓNICA ÚNICA PARA HASHES Y FIRMAS
 *
 * # Mathematical Proof (Deterministic Encoding):
 * serde_json sin la feature 'preserve_order' respalda sus objetos con
 * BTreeMap<String, Value>, por lo que la serialización emite las claves
 * en orden lexicográfico ascendente de bytes UTF-8, sin espacios
 * insignificantes. Dos codificadores independientes sobre el mismo
 * eslabón lógico producen por tanto bytes idénticos, y el hash de
 * contenido re-verifica entre procesos y despliegues.
 * =================================================================
 */

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::errors::ChainFault;

/// Campo excluido del material hasheado del eslabón.
const ENTRY_HASH_FIELD: &str = "entry_hash";

/// Serializa un Value a su forma canónica (claves ordenadas, sin
/// espacios insignificantes, UTF-8).
pub fn canonical_json_string(value: &Value) -> String {
    // BTreeMap subyacente: la ordenación es estructural, no opcional.
    value.to_string()
}

/// SHA-256 hex del JSON canónico de un Value arbitrario.
pub fn sha256_hex_of_value(value: &Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_json_string(value).as_bytes());
    hex::encode(hasher.finalize())
}

/**
 * Computa el hash de contenido de un eslabón: SHA-256 del JSON canónico
 * del objeto sin su campo 'entry_hash'.
 */
pub fn compute_entry_hash(entry_value: &Value) -> Result<String, ChainFault> {
    let mut hashable_material = entry_value.clone();
    let entry_object = hashable_material.as_object_mut().ok_or_else(|| {
        ChainFault::AuditWriteError("ENTRY_NOT_A_JSON_OBJECT".to_string())
    })?;
    entry_object.remove(ENTRY_HASH_FIELD);
    Ok(sha256_hex_of_value(&hashable_material))
}
