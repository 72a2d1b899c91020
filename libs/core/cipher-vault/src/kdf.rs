// [libs/core/cipher-vault/src/kdf.rs]
/*!
 * =================================================================
 * APARATO: ARCHIVE KEY DERIVATION (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: CORE SECURITY (ESTRATO L1)
 * RESPONSABILIDAD: DERIVACIÓN PBKDF2 DE LA LLAVE DEL ARCHIVO DE ÉXODO
 * =================================================================
 */

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

/// Iteraciones selladas; deben mantenerse en paridad con el
/// descifrador del cliente que recibe el archivo.
pub const ARCHIVE_PBKDF2_ITERATIONS: u32 = 100_000;

/// Deriva la llave AES-256 del archivo de éxodo desde la frase del
/// operador y la sal CSPRNG de 32 bytes embebida en la cabecera.
pub fn derive_archive_key(operator_passphrase: &str, archive_salt: &[u8]) -> [u8; 32] {
    let mut derived_key_buffer = [0u8; 32];
    pbkdf2_hmac::<Sha256>(
        operator_passphrase.as_bytes(),
        archive_salt,
        ARCHIVE_PBKDF2_ITERATIONS,
        &mut derived_key_buffer,
    );
    derived_key_buffer
}
