// [libs/domain/governance/src/suspension.rs]
/*!
 * =================================================================
 * APARATO: SUSPENSION ENGINE (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: PROTOCOLO GLASS-BREAK DE CINCO FASES
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. FIVE PHASE PROTOCOL: validación → captura de estado de cadena →
 *    cambio atómico de doble colección → terminación best-effort de
 *    llamadas en vuelo → eslabón de cadena + hash de evento.
 * 2. IDEMPOTENT 409: Un tenant ya suspendido devuelve AlreadySuspended
 *    sin mutar estado alguno.
 * 3. DUAL-COLLECTION ATOMICITY: govTenants y el espejo tenants del
 *    propietario viajan en UN solo lote; ambos mutan o ninguno.
 *
 * # Mathematical Proof (Deterministic Event Hash):
 * El hash de evento es SHA-256 del JSON canónico del payload de
 * suspensión; cualquier parte puede recomputarlo desde los campos
 * publicados y confirmar que el acto reportado es el ejecutado.
 * =================================================================
 */

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{info, instrument, warn};

use custodia_core_chain::canonical::sha256_hex_of_value;
use custodia_core_chain::{ChainFault, ChainStore};
use custodia_domain_logger::AuditScribe;
use custodia_domain_models::entry::{AdminAccessRequest, AdminAction, EntryEvent};
use custodia_domain_models::reports::SuspendReceipt;
use custodia_domain_models::tenant::TenantStatus;
use custodia_infra_store::{collections, BatchOperation, DocumentStore};

/// Modo operativo grabado en el documento de gobierno al suspender.
const OFFLINE_OPERATIONAL_MODE: &str = "OFFLINE";

/// Motor de suspensión de emergencia (Glass Break).
pub struct SuspensionEngine {
    chain_store: Arc<ChainStore>,
    scribe: Arc<AuditScribe>,
    document_store: Arc<dyn DocumentStore>,
}

impl SuspensionEngine {
    pub fn new(
        chain_store: Arc<ChainStore>,
        scribe: Arc<AuditScribe>,
        document_store: Arc<dyn DocumentStore>,
    ) -> Self {
        Self { chain_store, scribe, document_store }
    }

    /**
     * Ejecuta el protocolo de suspensión completo.
     *
     * # Errors:
     * - `PreconditionFailed`: el tenant no está resuelto en govTenants.
     * - `AlreadySuspended`: idempotencia estilo 409.
     * - `TenantDestroyed`: estado terminal.
     * - `RemoteStoreError`: el lote atómico de doble colección colapsó
     *   (fases 4 y 5 no se ejecutan).
     */
    #[instrument(skip(self, reason), fields(tenant = %tenant_id, actor = %actor_email))]
    pub async fn suspend(
        &self,
        tenant_id: &str,
        reason: &str,
        actor_email: &str,
        actor_name: &str,
    ) -> Result<SuspendReceipt, ChainFault> {
        // --- FASE 1: AUTENTICACIÓN Y VALIDACIÓN DE ESTADO ---
        let government_document = self
            .document_store
            .get_document(collections::GOV_TENANTS, tenant_id)
            .await
            .map_err(|store_fault| ChainFault::RemoteStoreError(store_fault.to_string()))?
            .ok_or_else(|| {
                ChainFault::PreconditionFailed(format!("TENANT_UNRESOLVED -> {}", tenant_id))
            })?;

        let current_status = government_document
            .get("status")
            .and_then(|field| field.as_str())
            .and_then(TenantStatus::parse)
            .unwrap_or(TenantStatus::Active);

        match current_status {
            TenantStatus::Suspended => {
                return Err(ChainFault::AlreadySuspended(tenant_id.to_string()));
            }
            TenantStatus::Destroyed => {
                return Err(ChainFault::TenantDestroyed(tenant_id.to_string()));
            }
            _ => {}
        }

        // --- FASE 2: CAPTURA PRE-MUTACIÓN DEL ESTADO DE CADENA ---
        let chain_state = self.chain_store.verify(tenant_id)?;

        let suspend_id = format!("SUS-{}", uuid::Uuid::new_v4());
        let suspended_at = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string();
        let chain_state_snapshot = json!({
            "chain_head_hash": chain_state.chain_head_hash,
            "verified_entries": chain_state.verified_entries,
            "total_entries": chain_state.total_entries,
            "valid": chain_state.valid,
        });

        // --- FASE 3: CAMBIO ATÓMICO DE DOBLE COLECCIÓN ---
        let mut state_change_batch = vec![BatchOperation::Merge {
            collection: collections::GOV_TENANTS.to_string(),
            document_id: tenant_id.to_string(),
            patch: json!({
                "status": TenantStatus::Suspended.as_str(),
                "operational_mode": OFFLINE_OPERATIONAL_MODE,
                "suspend_id": suspend_id,
                "suspended_at": suspended_at,
                "suspended_by": actor_email,
                "reason": reason,
                "chain_state_at_suspend": chain_state_snapshot,
            }),
        }];

        if let Some(owner_uid) = government_document
            .get("owner_uid")
            .and_then(|field| field.as_str())
        {
            state_change_batch.push(BatchOperation::Merge {
                collection: collections::TENANTS.to_string(),
                document_id: owner_uid.to_string(),
                patch: json!({
                    "status": TenantStatus::Suspended.as_str(),
                    "suspend_id": suspend_id,
                    "suspended_at": suspended_at,
                }),
            });
        }

        self.document_store
            .commit_batch(state_change_batch)
            .await
            .map_err(|store_fault| ChainFault::RemoteStoreError(store_fault.to_string()))?;

        // --- FASE 4: TERMINACIÓN BEST-EFFORT DE LLAMADAS EN VUELO ---
        let calls_terminated = self.terminate_in_flight_calls(tenant_id, &suspend_id).await;

        // --- FASE 5: ESLABONES DE CADENA + HASH DE EVENTO ---
        let suspend_entry = self.scribe.append_event(
            tenant_id,
            EntryEvent::Suspend {
                suspend_id: suspend_id.clone(),
                reason: reason.to_string(),
                suspended_by: actor_email.to_string(),
                chain_head_at_suspend: chain_state.chain_head_hash.clone(),
                verified_entries_at_suspend: chain_state.verified_entries,
            },
        )?;

        let shield_entry = self.scribe.log_admin_access(AdminAccessRequest {
            admin_email: actor_email.to_string(),
            admin_name: actor_name.to_string(),
            tenant_id: tenant_id.to_string(),
            action: AdminAction::View,
            purpose: format!("EMERGENCY_GLASS_BREAK: {}", reason),
        })?;

        let event_hash = sha256_hex_of_value(&json!({
            "tenant_id": tenant_id,
            "suspend_id": suspend_id,
            "reason": reason,
            "suspended_by": actor_email,
            "suspended_at": suspended_at,
            "chain_head_at_suspend": chain_state.chain_head_hash,
        }));

        info!(
            "🚨 [GLASS_BREAK]: Tenant [{}] suspended ({}). Event hash {}.",
            tenant_id, suspend_id, event_hash
        );

        Ok(SuspendReceipt {
            tenant_id: tenant_id.to_string(),
            suspend_id,
            event_hash,
            suspend_receipt_id: suspend_entry.receipt_id,
            shield_receipt_id: shield_entry.receipt_id,
            calls_terminated,
            suspended_at,
        })
    }

    /// Fase 4: marca terminated_by_admin toda llamada in-progress del
    /// tenant, en lotes del límite del backend. Best-effort declarado.
    async fn terminate_in_flight_calls(&self, tenant_id: &str, suspend_id: &str) -> u64 {
        let in_flight_calls = match self
            .document_store
            .query_field_equals(collections::GOVERNMENT_CALLS, "status", "in-progress")
            .await
        {
            Ok(calls) => calls,
            Err(query_fault) => {
                warn!("⚠️ [GLASS_BREAK]: In-flight call query collapsed (non-fatal): {}", query_fault);
                return 0;
            }
        };

        let tenant_calls: Vec<String> = in_flight_calls
            .into_iter()
            .filter(|(_, body)| {
                body.get("tenant_id").and_then(|field| field.as_str()) == Some(tenant_id)
            })
            .map(|(call_id, _)| call_id)
            .collect();

        let mut terminated_count: u64 = 0;
        for call_chunk in tenant_calls.chunks(self.document_store.batch_limit()) {
            let termination_batch: Vec<BatchOperation> = call_chunk
                .iter()
                .map(|call_id| BatchOperation::Merge {
                    collection: collections::GOVERNMENT_CALLS.to_string(),
                    document_id: call_id.clone(),
                    patch: json!({
                        "status": "terminated_by_admin",
                        "suspend_id": suspend_id,
                    }),
                })
                .collect();

            match self.document_store.commit_batch(termination_batch).await {
                Ok(()) => terminated_count += call_chunk.len() as u64,
                Err(batch_fault) => {
                    warn!(
                        "⚠️ [GLASS_BREAK]: In-flight termination batch collapsed (non-fatal): {}",
                        batch_fault
                    );
                }
            }
        }
        terminated_count
    }
}
