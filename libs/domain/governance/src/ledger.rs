// [libs/domain/governance/src/ledger.rs]
/*!
 * =================================================================
 * APARATO: RAIO GOVERNANCE DESK (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: LEDGER DE CHECK-INS Y VEREDICTO DE 30 DÍAS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. TWIN RECORDS: Cada check-in produce un eslabón RAIO_CHECKIN en la
 *    cadena Y un registro identity-bound en el arreglo JSON del silo
 *    (tmp + fsync + rename); el registro referencia el recibo gemelo.
 * 2. EXECUTION GATE: La ruta de ejecución de herramientas consulta el
 *    veredicto; un gate vencido fuerza el rechazo estilo 403 aguas
 *    arriba, sin tocar la cadena.
 * =================================================================
 */

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use custodia_core_chain::{ChainFault, ChainStore};
use custodia_domain_logger::AuditScribe;
use custodia_domain_models::entry::EntryEvent;
use custodia_domain_models::governance::{
    GovernanceLedgerRecord, RaioAuthorization, RaioVerdict,
};

use crate::RAIO_AUTHORIZATION_WINDOW_DAYS;

/// Mesa de gobernanza RAIO sobre el ledger del silo.
pub struct GovernanceDesk {
    chain_store: Arc<ChainStore>,
    scribe: Arc<AuditScribe>,
}

impl GovernanceDesk {
    pub fn new(chain_store: Arc<ChainStore>, scribe: Arc<AuditScribe>) -> Self {
        Self { chain_store, scribe }
    }

    /**
     * Registra un check-in del supervisor: eslabón de cadena primero
     * (forja recibo e instantánea de cabeza), registro de archivo después.
     */
    #[instrument(skip(self, digital_fingerprint), fields(tenant = %tenant_id, raio = %raio_user_id))]
    pub fn record_checkin(
        &self,
        tenant_id: &str,
        raio_user_id: &str,
        digital_fingerprint: &str,
    ) -> Result<GovernanceLedgerRecord, ChainFault> {
        let chain_entry =
            self.scribe
                .write_raio_checkin(tenant_id, raio_user_id, digital_fingerprint)?;

        let merkle_root_snapshot = match &chain_entry.event {
            EntryEvent::RaioCheckin { merkle_root_snapshot, .. } => merkle_root_snapshot.clone(),
            _ => chain_entry.prev_hash.clone(),
        };

        let record = GovernanceLedgerRecord {
            raio_user_id: raio_user_id.to_string(),
            digital_fingerprint: digital_fingerprint.to_string(),
            merkle_root_snapshot,
            timestamp: chain_entry.timestamp.clone(),
            chain_receipt_id: Some(chain_entry.receipt_id.clone()),
        };

        self.append_ledger_record(tenant_id, &record)?;

        info!(
            "📜 [RAIO]: Supervisor check-in {} sealed for tenant [{}].",
            chain_entry.receipt_id, tenant_id
        );
        Ok(record)
    }

    /// Registros del ledger de gobernanza en orden de llegada.
    pub fn read_ledger(&self, tenant_id: &str) -> Result<Vec<GovernanceLedgerRecord>, ChainFault> {
        let ledger_path = self.chain_store.governance_ledger_path(tenant_id);
        if !ledger_path.is_file() {
            return Ok(Vec::new());
        }
        let ledger_content = fs::read_to_string(&ledger_path)?;
        serde_json::from_str(&ledger_content).map_err(|parse_fault| {
            ChainFault::AuditWriteError(format!("GOVERNANCE_LEDGER_ILLEGIBLE -> {}", parse_fault))
        })
    }

    /**
     * Veredicto de autorización: el check-in más reciente debe tener
     * ≤ 30 días. El gate de ejecución consume este veredicto.
     */
    #[instrument(skip(self), fields(tenant = %tenant_id))]
    pub fn is_raio_authorized(&self, tenant_id: &str) -> Result<RaioAuthorization, ChainFault> {
        let mut records = self.read_ledger(tenant_id)?;
        records.sort_by(|left, right| left.timestamp.cmp(&right.timestamp));
        let latest_entry = records.pop();

        let (authorized, days_since_checkin, verdict) = match &latest_entry {
            None => (false, None, RaioVerdict::NeverCheckedIn),
            Some(record) => {
                let checkin_moment = chrono::DateTime::parse_from_rfc3339(&record.timestamp)
                    .map(|parsed| parsed.with_timezone(&Utc))
                    .unwrap_or_else(|_| Utc::now());
                let days_elapsed = (Utc::now() - checkin_moment).num_days();
                if days_elapsed <= RAIO_AUTHORIZATION_WINDOW_DAYS {
                    (true, Some(days_elapsed), RaioVerdict::Authorized)
                } else {
                    (false, Some(days_elapsed), RaioVerdict::Expired)
                }
            }
        };

        Ok(RaioAuthorization {
            tenant_id: tenant_id.to_string(),
            authorized,
            days_since_checkin,
            verdict,
            latest_entry,
        })
    }

    /// Escritura del arreglo JSON del silo bajo el candado exclusivo
    /// del tenant, con semántica tmp + fsync + rename.
    fn append_ledger_record(
        &self,
        tenant_id: &str,
        record: &GovernanceLedgerRecord,
    ) -> Result<(), ChainFault> {
        let tenant_lock = self.chain_store.tenant_lock(tenant_id);
        let _write_guard = tenant_lock.write().expect("governance ledger lock poisoned");

        let ledger_path = self.chain_store.governance_ledger_path(tenant_id);
        fs::create_dir_all(self.chain_store.tenant_dir(tenant_id))?;

        let mut records: Vec<GovernanceLedgerRecord> = if ledger_path.is_file() {
            let ledger_content = fs::read_to_string(&ledger_path)?;
            serde_json::from_str(&ledger_content).unwrap_or_default()
        } else {
            Vec::new()
        };
        records.push(record.clone());

        let ledger_json = serde_json::to_string_pretty(&records)
            .map_err(|serialization_fault| ChainFault::AuditWriteError(serialization_fault.to_string()))?;

        let temporary_path = ledger_path.with_extension("json.tmp");
        {
            let mut temporary_handle = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temporary_path)?;
            temporary_handle.write_all(ledger_json.as_bytes())?;
            temporary_handle.sync_all()?;
        }
        fs::rename(&temporary_path, &ledger_path)?;
        Ok(())
    }
}
