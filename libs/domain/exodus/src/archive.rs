// [libs/domain/exodus/src/archive.rs]
/*!
 * =================================================================
 * APARATO: EXODUS ARCHIVE FORGE (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: ARCHIVO CIFRADO EN MEMORIA DEL SILO COMPLETO
 *
 * # Mathematical Proof (Archive Layout):
 * El binario entregado es SALT(32) ∥ IV(12) ∥ TAG(16) ∥ CIPHERTEXT:
 * exactamente 60 bytes de cabecera antes del material cifrado. La
 * llave se deriva con PBKDF2-HMAC-SHA256 (100k iteraciones) desde la
 * frase del operador y la sal CSPRNG; el descifrado con la misma
 * frase, gunzip y parse reconstruyen el sobre JSON bit-perfecto.
 * =================================================================
 */

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use rand::RngCore;
use serde_json::Value;
use std::io::{Read, Write};

use custodia_core_chain::ChainFault;
use custodia_core_vault::derive_archive_key;

const ARCHIVE_SALT_LENGTH: usize = 32;
const ARCHIVE_IV_LENGTH: usize = 12;
const ARCHIVE_TAG_LENGTH: usize = 16;

/// Bytes de cabecera antes del ciphertext: 32 + 12 + 16.
pub const ARCHIVE_HEADER_BYTES: usize =
    ARCHIVE_SALT_LENGTH + ARCHIVE_IV_LENGTH + ARCHIVE_TAG_LENGTH;

/**
 * Forja el archivo cifrado: JSON → gzip → PBKDF2 → AES-256-GCM.
 */
pub fn build_encrypted_archive(
    archive_envelope: &Value,
    operator_passphrase: &str,
) -> Result<Vec<u8>, ChainFault> {
    let envelope_json = serde_json::to_vec(archive_envelope)
        .map_err(|serialization_fault| ChainFault::AuditWriteError(serialization_fault.to_string()))?;

    // 1. COMPRESIÓN GZIP
    let mut gzip_encoder = GzEncoder::new(Vec::new(), Compression::default());
    gzip_encoder
        .write_all(&envelope_json)
        .map_err(|compression_fault| ChainFault::AuditWriteError(compression_fault.to_string()))?;
    let compressed_envelope = gzip_encoder
        .finish()
        .map_err(|compression_fault| ChainFault::AuditWriteError(compression_fault.to_string()))?;

    // 2. DERIVACIÓN DE LLAVE
    let mut archive_salt = [0u8; ARCHIVE_SALT_LENGTH];
    rand::rngs::OsRng.fill_bytes(&mut archive_salt);
    let archive_key = derive_archive_key(operator_passphrase, &archive_salt);

    // 3. CIFRADO AUTENTICADO
    let mut initialization_vector = [0u8; ARCHIVE_IV_LENGTH];
    rand::rngs::OsRng.fill_bytes(&mut initialization_vector);

    let cipher_engine = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&archive_key));
    let ciphertext_with_trailing_tag = cipher_engine
        .encrypt(Nonce::from_slice(&initialization_vector), compressed_envelope.as_ref())
        .map_err(|_| ChainFault::AuditWriteError("ARCHIVE_SEAL_MALFUNCTION".to_string()))?;

    let tag_boundary = ciphertext_with_trailing_tag.len() - ARCHIVE_TAG_LENGTH;
    let (ciphertext, authentication_tag) = ciphertext_with_trailing_tag.split_at(tag_boundary);

    // 4. ENSAMBLE: SALT ∥ IV ∥ TAG ∥ CIPHERTEXT
    let mut archive_material =
        Vec::with_capacity(ARCHIVE_HEADER_BYTES + ciphertext.len());
    archive_material.extend_from_slice(&archive_salt);
    archive_material.extend_from_slice(&initialization_vector);
    archive_material.extend_from_slice(authentication_tag);
    archive_material.extend_from_slice(ciphertext);
    Ok(archive_material)
}

/**
 * Abre un archivo de éxodo con la frase del operador (herramienta de
 * operador y del Proving Grounds; el servidor jamás retiene la frase).
 */
pub fn decrypt_archive(
    archive_material: &[u8],
    operator_passphrase: &str,
) -> Result<Value, ChainFault> {
    if archive_material.len() < ARCHIVE_HEADER_BYTES {
        return Err(ChainFault::DecryptionFailed("ARCHIVE_HEADER_TRUNCATED".to_string()));
    }

    let (archive_salt, remainder) = archive_material.split_at(ARCHIVE_SALT_LENGTH);
    let (initialization_vector, tag_and_ciphertext) = remainder.split_at(ARCHIVE_IV_LENGTH);
    let (authentication_tag, ciphertext) = tag_and_ciphertext.split_at(ARCHIVE_TAG_LENGTH);

    let archive_key = derive_archive_key(operator_passphrase, archive_salt);
    let cipher_engine = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&archive_key));

    let mut aead_material = Vec::with_capacity(ciphertext.len() + ARCHIVE_TAG_LENGTH);
    aead_material.extend_from_slice(ciphertext);
    aead_material.extend_from_slice(authentication_tag);

    let compressed_envelope = cipher_engine
        .decrypt(Nonce::from_slice(initialization_vector), aead_material.as_ref())
        .map_err(|_| ChainFault::DecryptionFailed("ARCHIVE_UNSEAL_MALFUNCTION".to_string()))?;

    let mut gzip_decoder = GzDecoder::new(compressed_envelope.as_slice());
    let mut envelope_json = Vec::new();
    gzip_decoder
        .read_to_end(&mut envelope_json)
        .map_err(|decompression_fault| ChainFault::DecryptionFailed(decompression_fault.to_string()))?;

    serde_json::from_slice(&envelope_json)
        .map_err(|parse_fault| ChainFault::DecryptionFailed(parse_fault.to_string()))
}
