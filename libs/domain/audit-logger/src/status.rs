// [libs/domain/audit-logger/src/status.rs]
/*!
 * =================================================================
 * APARATO: TENANT STATUS SEAM (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: COSTURA PLUGGABLE DE ESTADO DE TENANT
 * =================================================================
 */

use custodia_domain_models::tenant::TenantStatus;

/**
 * Proveedor de estado del tenant para las puertas del Escriba.
 *
 * El contrato es síncrono: la implementación de producción mantiene un
 * caché caliente alimentado por el almacén documental y actualizado por
 * el motor de suspensión; los dobles de prueba devuelven estado fijo.
 * Un tenant desconocido se reporta Active (el núcleo recibe el axioma
 * "este actor es el tenant X" ya resuelto por el colaborador HTTP).
 */
pub trait TenantStatusProvider: Send + Sync {
    fn tenant_status(&self, tenant_id: &str) -> TenantStatus;
}

/// Doble trivial: todo tenant está activo.
pub struct AlwaysActiveStatus;

impl TenantStatusProvider for AlwaysActiveStatus {
    fn tenant_status(&self, _tenant_id: &str) -> TenantStatus {
        TenantStatus::Active
    }
}
