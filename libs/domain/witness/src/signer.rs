// [libs/domain/witness/src/signer.rs]
/*!
 * =================================================================
 * APARATO: WITNESS HMAC SIGNER (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: FIRMA Y VERIFICACIÓN HMAC-SHA256 DE COMPROMISOS
 *
 * # Mathematical Proof (Canonical Subset Signing):
 * La firma cubre el JSON canónico (claves ordenadas, sin espacios) del
 * subconjunto comprometido, de modo que firmante y verificador derivan
 * bytes idénticos sin acordar un orden de campos fuera de banda.
 * =================================================================
 */

use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use custodia_core_chain::canonical_json_string;
use custodia_domain_models::anchor::{AnchorRecord, TombstoneRecord};

type HmacSha256 = Hmac<Sha256>;

/// Firmante de servidor sobre anclas, lápidas y certificados.
#[derive(Clone)]
pub struct WitnessSigner {
    key_material: Vec<u8>,
    key_identifier: String,
}

impl WitnessSigner {
    pub fn new(witness_secret: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(witness_secret);
        let key_identifier = hex::encode(hasher.finalize())[..8].to_string();
        Self { key_material: witness_secret.to_vec(), key_identifier }
    }

    /// Identificador público de la llave (etiqueta de solape de rotación).
    pub fn key_identifier(&self) -> &str {
        &self.key_identifier
    }

    /// HMAC-SHA256 hex sobre el JSON canónico del material dado.
    pub fn sign_canonical(&self, signable_material: &Value) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.key_material)
            .expect("HMAC accepts any key length");
        mac.update(canonical_json_string(signable_material).as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    pub fn verify_canonical(&self, signable_material: &Value, signature_hex: &str) -> bool {
        let Ok(signature_bytes) = hex::decode(signature_hex) else {
            return false;
        };
        let mut mac = HmacSha256::new_from_slice(&self.key_material)
            .expect("HMAC accepts any key length");
        mac.update(canonical_json_string(signable_material).as_bytes());
        mac.verify_slice(&signature_bytes).is_ok()
    }

    /// Subconjunto canónico comprometido por un ancla.
    pub fn anchor_signable(anchor: &AnchorRecord) -> Value {
        json!({
            "tenant_id": anchor.tenant_id,
            "anchor_date": anchor.anchor_date,
            "chain_head_hash": anchor.chain_head_hash,
            "verified_entries": anchor.verified_entries,
            "total_entries": anchor.total_entries,
        })
    }

    pub fn sign_anchor(&self, anchor: &AnchorRecord) -> String {
        self.sign_canonical(&Self::anchor_signable(anchor))
    }

    pub fn verify_anchor(&self, anchor: &AnchorRecord) -> bool {
        self.verify_canonical(&Self::anchor_signable(anchor), &anchor.signature)
    }

    /// Subconjunto canónico comprometido por una lápida.
    pub fn tombstone_signable(tombstone: &TombstoneRecord) -> Value {
        json!({
            "tenant_id": tombstone.tenant_id,
            "certificate_id": tombstone.certificate_id,
            "final_root_hash": tombstone.final_root_hash,
            "entry_count": tombstone.entry_count,
            "byte_count": tombstone.byte_count,
            "destroyed_at": tombstone.destroyed_at,
        })
    }

    pub fn sign_tombstone(&self, tombstone: &TombstoneRecord) -> String {
        self.sign_canonical(&Self::tombstone_signable(tombstone))
    }
}
