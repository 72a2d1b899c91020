// [libs/core/cipher-vault/src/sanitize.rs]
/*!
 * =================================================================
 * APARATO: TENANT IDENTIFIER SANITIZER (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: CORE SECURITY (ESTRATO L1)
 * RESPONSABILIDAD: NEUTRALIZACIÓN DE IDENTIFICADORES PARA EL FILESYSTEM
 *
 * # Mathematical Proof (Path Confinement):
 * El alfabeto de salida [a-zA-Z0-9_-] no contiene separadores de ruta
 * ni secuencias de ascenso; todo id hostil ('../', NUL, Unicode) colapsa
 * a un nombre plano dentro del directorio del silo. El mapeo es
 * inyectivo dentro de una corrida para los ids operativos del producto.
 * =================================================================
 */

const MAXIMUM_IDENTIFIER_BYTES: usize = 64;

/// Identificador reservado para el resultado vacío tras la sanitización.
pub const GLOBAL_TENANT_IDENTIFIER: &str = "_global";

/// Sanea un tenant id: `[^a-zA-Z0-9_-] → _`, truncado a 64 bytes;
/// el resultado vacío mapea a `_global`.
pub fn sanitize_tenant_identifier(raw_tenant_id: &str) -> String {
    let sanitized: String = raw_tenant_id
        .chars()
        .map(|symbol| {
            if symbol.is_ascii_alphanumeric() || symbol == '_' || symbol == '-' {
                symbol
            } else {
                '_'
            }
        })
        .take(MAXIMUM_IDENTIFIER_BYTES)
        .collect();

    if sanitized.is_empty() {
        GLOBAL_TENANT_IDENTIFIER.to_string()
    } else {
        sanitized
    }
}
