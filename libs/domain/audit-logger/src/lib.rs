// [libs/domain/audit-logger/src/lib.rs]
/*!
 * =================================================================
 * APARATO: AUDIT SCRIBE FAÇADE (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: ÚNICA PUERTA DE ESCRITURA HACIA LA CADENA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SINGLE WRITE AUTHORITY: Ningún colaborador anexa eslabones
 *    directamente; el Escriba adjunta identidad de actor, selecciona
 *    clase y prefijo de recibo, y aplica las puertas de estado.
 * 2. DUAL-WRITE SHIELD: Todo acceso administrativo se escribe en la
 *    cadena del tenant objetivo Y en el espejo process-wide
 *    ADMIN_ACTIVITY compartiendo marca y recibo. Si cualquiera de las
 *    dos escrituras colapsa, la operación completa falla y el caller
 *    DEBE rehusar la entrega de los datos subyacentes.
 * 3. NO IMPLIED SUCCESS: Si el eslabón no persiste, la operación de
 *    negocio que lo envolvía falla también, incluso cuando la
 *    herramienta ya corrió (el resultado se retiene).
 * =================================================================
 */

pub mod scribe;
pub mod status;

pub use scribe::AuditScribe;
pub use status::TenantStatusProvider;
