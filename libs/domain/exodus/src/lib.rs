// [libs/domain/exodus/src/lib.rs]
/*!
 * =================================================================
 * APARATO: SOVEREIGN EXODUS (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: SALIDA SOBERANA — ARCHIVO, TRITURACIÓN, CERTIFICADO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. ORDERED IRREVERSIBILITY: archivo en memoria → trituración del
 *    silo → purga remota → entrega. Tras la fase 2 no existe material
 *    de llave en el servidor; el archivo es la única copia.
 * 2. PROOF OF DESTRUCTION: lápida firmada en el registro global y
 *    certificado HMAC con inventario, null-verification y prueba de
 *    crypto-shred.
 * =================================================================
 */

pub mod archive;
pub mod exit;
pub mod shred;

pub use archive::{build_encrypted_archive, decrypt_archive, ARCHIVE_HEADER_BYTES};
pub use exit::SovereignExitEngine;

/// Frase de confirmación exigida, byte a byte.
pub const EXIT_CONFIRMATION_PHRASE: &str = "PERMANENTLY DELETE ALL DATA";

/// Longitud mínima de la frase del operador.
pub const MINIMUM_PASSPHRASE_LENGTH: usize = 12;
