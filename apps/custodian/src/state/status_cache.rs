// [apps/custodian/src/state/status_cache.rs]
/*!
 * =================================================================
 * APARATO: TENANT STATUS CACHE (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: APPLICATION STATE (ESTRATO L1-APP)
 * RESPONSABILIDAD: PROVEEDOR CALIENTE DE ESTADO DE TENANT
 *
 * El caché se hidrata desde govTenants en la ignición y se invalida en
 * caliente por el motor de suspensión y el éxodo. Un tenant ausente se
 * reporta Active: el colaborador HTTP ya resolvió la sesión.
 * =================================================================
 */

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use custodia_domain_logger::TenantStatusProvider;
use custodia_domain_models::tenant::TenantStatus;
use custodia_infra_store::{collections, DocumentStore};

#[derive(Default)]
pub struct StatusCache {
    statuses: RwLock<HashMap<String, TenantStatus>>,
}

impl StatusCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hidratación completa desde la colección govTenants.
    pub async fn hydrate(&self, document_store: &Arc<dyn DocumentStore>) {
        match document_store.list_documents(collections::GOV_TENANTS).await {
            Ok(government_documents) => {
                let mut statuses = self.statuses.write().expect("status cache poisoned");
                for (tenant_id, body) in government_documents {
                    let status = body
                        .get("status")
                        .and_then(|field| field.as_str())
                        .and_then(TenantStatus::parse)
                        .unwrap_or(TenantStatus::Active);
                    statuses.insert(tenant_id, status);
                }
                info!("♻️  [STATUS_CACHE]: Hydrated {} tenant statuses.", statuses.len());
            }
            Err(hydration_fault) => {
                warn!("⚠️ [STATUS_CACHE]: Hydration degraded (empty cache): {}", hydration_fault);
            }
        }
    }

    /// Invalidación en caliente tras suspensión o éxodo.
    pub fn set_status(&self, tenant_id: &str, status: TenantStatus) {
        self.statuses
            .write()
            .expect("status cache poisoned")
            .insert(tenant_id.to_string(), status);
    }
}

impl TenantStatusProvider for StatusCache {
    fn tenant_status(&self, tenant_id: &str) -> TenantStatus {
        self.statuses
            .read()
            .expect("status cache poisoned")
            .get(tenant_id)
            .copied()
            .unwrap_or(TenantStatus::Active)
    }
}
