// [libs/core/cipher-vault/src/seal.rs]
/*!
 * =================================================================
 * APARATO: LINE SEALER (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: CORE SECURITY (ESTRATO L1)
 * RESPONSABILIDAD: SELLADO AES-256-GCM DE LÍNEAS DEL LEDGER
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. WIRE LAYOUT SEAL: El material binario de cada línea cifrada es
 *    IV(12) ∥ TAG(16) ∥ CIPHERTEXT, transportado como Base64 bajo el
 *    prefijo 'ENC:'. Las líneas legacy en claro siguen siendo legibles
 *    por el estrato lector.
 * 2. AEAD SOVEREIGNTY: El tag GCM autentica cada línea individual; un
 *    solo bit alterado del material colapsa la apertura con
 *    UNSEAL_MALFUNCTION, sin ambigüedad.
 *
 * # Mathematical Proof (Nonce Discipline):
 * Cada sellado extrae 12 bytes frescos del CSPRNG del sistema. Con
 * IVs de 96 bits la probabilidad de reutilización bajo la misma llave
 * queda acotada por el teorema del cumpleaños muy por debajo del
 * horizonte de rotación del silo.
 * =================================================================
 */

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::RngCore;

use crate::errors::VaultFault;

/// Prefijo de línea cifrada en el ledger NDJSON.
pub const ENCRYPTED_LINE_PREFIX: &str = "ENC:";

const INITIALIZATION_VECTOR_LENGTH: usize = 12;
const AUTHENTICATION_TAG_LENGTH: usize = 16;

/// Sellador simétrico de líneas bajo la llave viva del tenant.
pub struct LineSealer {
    cipher_engine: Aes256Gcm,
}

impl LineSealer {
    pub fn new(tenant_key: &[u8; 32]) -> Self {
        let key_handle = Key::<Aes256Gcm>::from_slice(tenant_key);
        Self { cipher_engine: Aes256Gcm::new(key_handle) }
    }

    /// true si la línea porta el prefijo de material cifrado.
    pub fn is_sealed_line(line: &str) -> bool {
        line.starts_with(ENCRYPTED_LINE_PREFIX)
    }

    /**
     * Sella un JSON canónico en claro como línea `ENC:BASE64(iv ∥ tag ∥ ct)`.
     */
    pub fn seal(&self, plaintext_json: &str) -> Result<String, VaultFault> {
        let mut initialization_vector = [0u8; INITIALIZATION_VECTOR_LENGTH];
        rand::rngs::OsRng.fill_bytes(&mut initialization_vector);

        let nonce = Nonce::from_slice(&initialization_vector);
        let ciphertext_with_trailing_tag = self
            .cipher_engine
            .encrypt(nonce, plaintext_json.as_bytes())
            .map_err(|_| VaultFault::SealFailure)?;

        // El backend AEAD emite CIPHERTEXT ∥ TAG; el contrato de línea
        // exige IV ∥ TAG ∥ CIPHERTEXT.
        let tag_boundary = ciphertext_with_trailing_tag.len() - AUTHENTICATION_TAG_LENGTH;
        let (ciphertext, authentication_tag) = ciphertext_with_trailing_tag.split_at(tag_boundary);

        let mut wire_material = Vec::with_capacity(
            INITIALIZATION_VECTOR_LENGTH + AUTHENTICATION_TAG_LENGTH + ciphertext.len(),
        );
        wire_material.extend_from_slice(&initialization_vector);
        wire_material.extend_from_slice(authentication_tag);
        wire_material.extend_from_slice(ciphertext);

        Ok(format!("{}{}", ENCRYPTED_LINE_PREFIX, BASE64.encode(wire_material)))
    }

    /**
     * Abre una línea sellada y devuelve el JSON en claro.
     *
     * # Errors:
     * - `LineEncoding`: prefijo ausente, Base64 ilegible o material trunco.
     * - `UnsealFailure`: tag GCM inválido (manipulación o llave incorrecta).
     */
    pub fn unseal(&self, sealed_line: &str) -> Result<String, VaultFault> {
        let encoded_material = sealed_line
            .strip_prefix(ENCRYPTED_LINE_PREFIX)
            .ok_or_else(|| VaultFault::LineEncoding("ENC_PREFIX_ABSENT".to_string()))?;

        let wire_material = BASE64
            .decode(encoded_material.trim_end())
            .map_err(|decode_fault| VaultFault::LineEncoding(decode_fault.to_string()))?;

        if wire_material.len() < INITIALIZATION_VECTOR_LENGTH + AUTHENTICATION_TAG_LENGTH {
            return Err(VaultFault::LineEncoding("WIRE_MATERIAL_TRUNCATED".to_string()));
        }

        let (initialization_vector, tag_and_ciphertext) =
            wire_material.split_at(INITIALIZATION_VECTOR_LENGTH);
        let (authentication_tag, ciphertext) =
            tag_and_ciphertext.split_at(AUTHENTICATION_TAG_LENGTH);

        // Reconstrucción del layout CIPHERTEXT ∥ TAG que exige el backend.
        let mut aead_material = Vec::with_capacity(ciphertext.len() + AUTHENTICATION_TAG_LENGTH);
        aead_material.extend_from_slice(ciphertext);
        aead_material.extend_from_slice(authentication_tag);

        let nonce = Nonce::from_slice(initialization_vector);
        let plaintext_bytes = self
            .cipher_engine
            .decrypt(nonce, aead_material.as_ref())
            .map_err(|_| VaultFault::UnsealFailure)?;

        String::from_utf8(plaintext_bytes)
            .map_err(|utf8_fault| VaultFault::LineEncoding(utf8_fault.to_string()))
    }
}
