// [libs/core/cipher-vault/src/lib.rs]
/*!
 * =================================================================
 * APARATO: CIPHER VAULT ENGINE (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: CORE SECURITY (ESTRATO L1)
 * RESPONSABILIDAD: CRIPTOGRAFÍA SIMÉTRICA DEL SILO DE AUDITORÍA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SINGLE CRYPTO AUTHORITY: Todo byte cifrado del silo (líneas del
 *    ledger y archivo de éxodo) atraviesa este aparato. Ningún otro
 *    estrato toca AES-GCM directamente.
 * 2. KEY CUSTODY: El ciclo de vida de la llave del tenant (génesis,
 *    carga, instalación rotada, destrucción verificada) vive aquí con
 *    semántica tmp+fsync+rename y modo 0600.
 * 3. ZERO ABBREVIATIONS: Nomenclatura nominal absoluta.
 * =================================================================
 */

pub mod errors;
pub mod kdf;
pub mod keys;
pub mod sanitize;
pub mod seal;

pub use errors::VaultFault;
pub use kdf::{derive_archive_key, ARCHIVE_PBKDF2_ITERATIONS};
pub use keys::KeyCustodian;
pub use sanitize::sanitize_tenant_identifier;
pub use seal::{LineSealer, ENCRYPTED_LINE_PREFIX};
