// [libs/domain/audit-logger/src/scribe.rs]
/*!
 * =================================================================
 * APARATO: AUDIT SCRIBE (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: CONSTRUCCIÓN DE ESLABONES Y DOBLE ESCRITURA ESPEJO
 * =================================================================
 */

use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use custodia_core_chain::{AppendOutcome, ChainFault, ChainStore};
use custodia_domain_models::entry::{
    AdminAccessRequest, ChainEntry, EntryEvent, GapReport, ToolExecutionRequest, GENESIS_HEAD,
};
use custodia_domain_models::tenant::TenantStatus;

use crate::status::TenantStatusProvider;

/// Fachada única de escritura del Escudo de Auditoría.
pub struct AuditScribe {
    chain_store: Arc<ChainStore>,
    status_provider: Arc<dyn TenantStatusProvider>,
}

impl AuditScribe {
    pub fn new(
        chain_store: Arc<ChainStore>,
        status_provider: Arc<dyn TenantStatusProvider>,
    ) -> Self {
        Self { chain_store, status_provider }
    }

    pub fn chain_store(&self) -> &Arc<ChainStore> {
        &self.chain_store
    }

    /**
     * Registra una ejecución de herramienta del agente.
     *
     * # Errors:
     * - `TenantSuspended`: la puerta de estado veta toda ejecución.
     * - `TenantDestroyed`: el id yace en el registro de lápidas.
     * - `AuditWriteError` / `CriticalIntegrityFailure`: ver ChainStore.
     */
    #[instrument(skip(self, request), fields(tenant = %request.tenant_id, tool = %request.tool_name))]
    pub fn write_tool_execution(
        &self,
        request: ToolExecutionRequest,
    ) -> Result<ChainEntry, ChainFault> {
        match self.status_provider.tenant_status(&request.tenant_id) {
            TenantStatus::Suspended => {
                return Err(ChainFault::TenantSuspended(request.tenant_id));
            }
            TenantStatus::Destroyed => {
                return Err(ChainFault::TenantDestroyed(request.tenant_id));
            }
            _ => {}
        }

        let outcome = self.chain_store.append(
            &request.tenant_id,
            EntryEvent::ToolExecution {
                agent_nhi: request.agent_nhi,
                tool_name: request.tool_name,
                tool_arguments: request.tool_arguments,
                policy_snapshot_hash: request.policy_snapshot_hash,
                execution_status: request.execution_status,
                execution_result: request.execution_result,
                external_call_id: request.external_call_id,
            },
        )?;
        Ok(outcome.entry)
    }

    /**
     * Registra un acceso administrativo (AUDIT_SHIELD) con doble
     * escritura: cadena del tenant objetivo + espejo ADMIN_ACTIVITY
     * process-wide, ambos con la misma marca y recibo.
     *
     * Si el espejo colapsa tras el eslabón, la operación completa
     * falla: el caller DEBE rehusar la entrega de los datos.
     */
    #[instrument(skip(self, request), fields(tenant = %request.tenant_id, admin = %request.admin_email))]
    pub fn log_admin_access(
        &self,
        request: AdminAccessRequest,
    ) -> Result<ChainEntry, ChainFault> {
        if let TenantStatus::Destroyed = self.status_provider.tenant_status(&request.tenant_id) {
            return Err(ChainFault::TenantDestroyed(request.tenant_id));
        }

        let outcome = self.chain_store.append(
            &request.tenant_id,
            EntryEvent::AdminAccess {
                admin_email: request.admin_email.clone(),
                admin_name: request.admin_name.clone(),
                action: request.action,
                purpose: request.purpose.clone(),
            },
        )?;

        self.mirror_admin_activity(&outcome, &request)?;

        info!(
            "🛡️ [AUDIT_SHIELD]: Admin access {} sealed for tenant [{}].",
            outcome.entry.receipt_id, request.tenant_id
        );
        Ok(outcome.entry)
    }

    /// Latido de disponibilidad. Los tenants suspendidos siguen
    /// recibiendo latidos: la constancia de vida es parte del rastro.
    pub fn write_pulse(
        &self,
        tenant_id: &str,
        sequence: u64,
        process_identity: &str,
        pulse_info: Value,
    ) -> Result<ChainEntry, ChainFault> {
        let outcome = self.chain_store.append(
            tenant_id,
            EntryEvent::Pulse {
                sequence,
                process_identity: process_identity.to_string(),
                pulse_info,
            },
        )?;
        Ok(outcome.entry)
    }

    /// Evento de recuperación tras un hueco de disponibilidad.
    pub fn write_system_recovery(
        &self,
        tenant_id: &str,
        sequence: u64,
        process_identity: &str,
        gap: GapReport,
    ) -> Result<ChainEntry, ChainFault> {
        let outcome = self.chain_store.append(
            tenant_id,
            EntryEvent::SystemRecovery {
                sequence,
                process_identity: process_identity.to_string(),
                gap,
            },
        )?;
        Ok(outcome.entry)
    }

    /**
     * Check-in RAIO: captura la cabeza vigente como instantánea
     * merkle_root y sella el eslabón identity-bound.
     */
    pub fn write_raio_checkin(
        &self,
        tenant_id: &str,
        raio_user_id: &str,
        digital_fingerprint: &str,
    ) -> Result<ChainEntry, ChainFault> {
        let merkle_root_snapshot = self
            .chain_store
            .scan_last_entry(tenant_id)?
            .map(|entry| entry.entry_hash)
            .unwrap_or_else(|| GENESIS_HEAD.to_string());

        let outcome = self.chain_store.append(
            tenant_id,
            EntryEvent::RaioCheckin {
                raio_user_id: raio_user_id.to_string(),
                digital_fingerprint: digital_fingerprint.to_string(),
                merkle_root_snapshot,
            },
        )?;
        Ok(outcome.entry)
    }

    /// Puerta genérica para motores de dominio (suspensión, éxodo) que
    /// componen su propio evento. Aplica solo el veto de lápida, que el
    /// propio ChainStore re-verifica.
    pub fn append_event(
        &self,
        tenant_id: &str,
        event: EntryEvent,
    ) -> Result<ChainEntry, ChainFault> {
        let outcome = self.chain_store.append(tenant_id, event)?;
        Ok(outcome.entry)
    }

    /// Espejo process-wide: una línea ADMIN_ACTIVITY en claro por
    /// acceso, con la marca y el recibo del eslabón gemelo.
    fn mirror_admin_activity(
        &self,
        outcome: &AppendOutcome,
        request: &AdminAccessRequest,
    ) -> Result<(), ChainFault> {
        let mirror_record = json!({
            "record_kind": "ADMIN_ACTIVITY",
            "receipt_id": outcome.entry.receipt_id,
            "timestamp": outcome.entry.timestamp,
            "admin_email": request.admin_email,
            "admin_name": request.admin_name,
            "tenant_id": request.tenant_id,
            "action": request.action,
            "purpose": request.purpose,
        });

        let mirror_path = self.chain_store.admin_mirror_path();
        let mirror_write = (|| -> std::io::Result<()> {
            let mut mirror_handle = OpenOptions::new()
                .append(true)
                .create(true)
                .open(&mirror_path)?;
            mirror_handle.write_all(format!("{}\n", mirror_record).as_bytes())?;
            mirror_handle.sync_all()
        })();

        mirror_write.map_err(|mirror_fault| {
            warn!(
                "⚠️ [AUDIT_SHIELD]: ADMIN_ACTIVITY mirror collapsed after chain write ({}). Operation fails whole.",
                mirror_fault
            );
            ChainFault::AuditWriteError(format!("ADMIN_MIRROR_SEVERED -> {}", mirror_fault))
        })
    }
}
