// [libs/core/chain-ledger/src/tombstone.rs]
/*!
 * =================================================================
 * APARATO: TOMBSTONE REGISTRY (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: CORE ENGINE (ESTRATO L1)
 * RESPONSABILIDAD: REGISTRO GLOBAL APPEND-ONLY DE TENANTS DESTRUIDOS
 *
 * # Mathematical Proof (Tombstone Monotonicity):
 * El registro solo crece. Una vez que un tenant_id aparece aquí, el
 * punto único de aprovisionamiento (ensure_tenant_key) veta cualquier
 * silo o llave nuevos bajo ese id, garantizando que la destrucción es
 * terminal y públicamente verificable.
 * =================================================================
 */

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use tracing::info;

use custodia_domain_models::anchor::TombstoneRecord;

use crate::errors::ChainFault;

/// Registro global de lápidas en `<root>/audit/tombstones.ndjson`.
pub struct TombstoneRegistry {
    registry_path: PathBuf,
}

impl TombstoneRegistry {
    pub fn new(registry_path: impl Into<PathBuf>) -> Self {
        Self { registry_path: registry_path.into() }
    }

    pub fn registry_path(&self) -> &PathBuf {
        &self.registry_path
    }

    /// Anexa una lápida firmada; la línea es duradera antes de retornar.
    pub fn append(&self, record: &TombstoneRecord) -> Result<(), ChainFault> {
        if let Some(parent_directory) = self.registry_path.parent() {
            fs::create_dir_all(parent_directory)?;
        }

        let record_line = serde_json::to_string(record)
            .map_err(|serialization_fault| ChainFault::AuditWriteError(serialization_fault.to_string()))?;

        let mut registry_handle = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.registry_path)?;
        registry_handle.write_all(format!("{}\n", record_line).as_bytes())?;
        registry_handle.sync_all()?;

        info!(
            "🪦 [TOMBSTONES]: Tenant [{}] permanently registered as destroyed.",
            record.tenant_id
        );
        Ok(())
    }

    /// true si el tenant yace en el registro (id crudo o saneado).
    pub fn contains(&self, tenant_id: &str) -> Result<bool, ChainFault> {
        let sanitized = custodia_core_vault::sanitize_tenant_identifier(tenant_id);
        Ok(self
            .read_all()?
            .iter()
            .any(|record| record.tenant_id == tenant_id || record.tenant_id == sanitized))
    }

    pub fn read_all(&self) -> Result<Vec<TombstoneRecord>, ChainFault> {
        if !self.registry_path.is_file() {
            return Ok(Vec::new());
        }
        let registry_content = fs::read_to_string(&self.registry_path)?;
        let mut records = Vec::new();
        for registry_line in registry_content.lines() {
            if registry_line.trim().is_empty() {
                continue;
            }
            let record: TombstoneRecord = serde_json::from_str(registry_line).map_err(
                |parse_fault| ChainFault::AuditWriteError(format!("TOMBSTONE_ILLEGIBLE -> {}", parse_fault)),
            )?;
            records.push(record);
        }
        Ok(records)
    }
}
