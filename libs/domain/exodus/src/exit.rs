// [libs/domain/exodus/src/exit.rs]
/*!
 * =================================================================
 * APARATO: SOVEREIGN EXIT ENGINE (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: ORQUESTACIÓN DE LAS CUATRO FASES DEL ÉXODO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. PHASE ORDER SEAL: archivo → trituración → purga remota → entrega.
 *    La fase 3 es best-effort declarado: un purgado parcial degrada con
 *    gracia y queda registrado en el certificado, jamás aborta.
 * 2. EXISTENCE PROOF PRESERVED: los documentos govTenants/tenants se
 *    marcan 'destroyed' pero NO se eliminan; la lápida exige poder
 *    probar que el tenant existió y fue destruido.
 * =================================================================
 */

use std::fs;
use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use tracing::{info, instrument, warn};

use custodia_core_chain::{ChainFault, ChainStore};
use custodia_domain_models::anchor::{
    CryptoShredProof, DeletionCertificate, RemotePurgeReport, TombstoneRecord,
};
use custodia_domain_models::tenant::TenantStatus;
use custodia_domain_witness::WitnessSigner;
use custodia_infra_store::{collections, BatchOperation, DocumentStore};

use crate::archive::build_encrypted_archive;
use crate::shred::{shred_tenant_silo, ShredOutcome};
use crate::{EXIT_CONFIRMATION_PHRASE, MINIMUM_PASSPHRASE_LENGTH};

/// Motor del éxodo soberano.
pub struct SovereignExitEngine {
    chain_store: Arc<ChainStore>,
    document_store: Arc<dyn DocumentStore>,
    signer: WitnessSigner,
}

impl SovereignExitEngine {
    pub fn new(
        chain_store: Arc<ChainStore>,
        document_store: Arc<dyn DocumentStore>,
        signer: WitnessSigner,
    ) -> Self {
        Self { chain_store, document_store, signer }
    }

    /**
     * Ejecuta el éxodo completo y devuelve (archivo cifrado, certificado).
     *
     * # Errors:
     * - `ConfirmationRequired`: la frase de confirmación no es exacta.
     * - `PreconditionFailed`: frase del operador menor a 12 caracteres.
     * - `TenantDestroyed`: el id ya yace en el registro de lápidas.
     */
    #[instrument(skip(self, operator_passphrase, client_bundle, confirmation), fields(tenant = %tenant_id))]
    pub async fn sovereign_exit(
        &self,
        tenant_id: &str,
        operator_passphrase: &str,
        client_bundle: Value,
        confirmation: &str,
    ) -> Result<(Vec<u8>, DeletionCertificate), ChainFault> {
        // --- FASE 0: VALIDACIÓN ---
        if confirmation != EXIT_CONFIRMATION_PHRASE {
            return Err(ChainFault::ConfirmationRequired(format!(
                "EXACT_PHRASE_REQUIRED -> \"{}\"",
                EXIT_CONFIRMATION_PHRASE
            )));
        }
        if operator_passphrase.len() < MINIMUM_PASSPHRASE_LENGTH {
            return Err(ChainFault::PreconditionFailed(
                "PASSPHRASE_BELOW_MINIMUM_LENGTH".to_string(),
            ));
        }
        if self.chain_store.tombstones().contains(tenant_id)? {
            return Err(ChainFault::TenantDestroyed(tenant_id.to_string()));
        }

        let certificate_id = format!("DCERT-{}", uuid::Uuid::new_v4());
        let destroyed_at = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string();

        // --- FASE 1: ARCHIVO EN MEMORIA (lectores de instantánea) ---
        let integrity_report = self.chain_store.verify(tenant_id)?;
        let decrypted_entries = self.chain_store.read_all(tenant_id)?;
        let raw_files = self.collect_raw_silo_files(tenant_id)?;

        let archive_envelope = json!({
            "_archive_metadata": {
                "format_version": 1,
                "tenant_id": tenant_id,
                "certificate_id": certificate_id,
                "exported_at": destroyed_at,
                "chain_state": {
                    "chain_head_hash": integrity_report.chain_head_hash,
                    "valid": integrity_report.valid,
                    "verified_entries": integrity_report.verified_entries,
                    "total_entries": integrity_report.total_entries,
                },
            },
            "audit_log_entries": decrypted_entries,
            "audit_raw_files": raw_files,
            "client_data": client_bundle,
        });

        let archive_material = build_encrypted_archive(&archive_envelope, operator_passphrase)?;
        let archive_sha256 = {
            let mut hasher = Sha256::new();
            hasher.update(&archive_material);
            hex::encode(hasher.finalize())
        };

        // --- FASE 2: TRITURACIÓN CRIPTOGRÁFICA (candado exclusivo) ---
        let shred_outcome = self.execute_shred_phase(tenant_id)?;
        let key_path = self.chain_store.key_custodian().key_path(tenant_id);
        let key_verified_null = !key_path.exists();
        let all_paths_verified_null = shred_outcome.all_paths_verified_null && key_verified_null;

        let mut tombstone = TombstoneRecord {
            tenant_id: tenant_id.to_string(),
            certificate_id: certificate_id.clone(),
            final_root_hash: integrity_report.chain_head_hash.clone(),
            entry_count: integrity_report.total_entries,
            byte_count: shred_outcome.total_bytes_destroyed,
            destroyed_at: destroyed_at.clone(),
            witness_key_id: self.signer.key_identifier().to_string(),
            signature: String::new(),
        };
        tombstone.signature = self.signer.sign_tombstone(&tombstone);
        self.chain_store.tombstones().append(&tombstone)?;

        // --- FASE 3: PURGA REMOTA (best-effort declarado) ---
        let remote_purge = self.purge_remote_state(tenant_id).await;

        // --- FASE 4: CERTIFICADO FIRMADO Y ENTREGA ---
        let certificate_signable = json!({
            "certificate_id": certificate_id,
            "tenant_id": tenant_id,
            "destroyed_at": destroyed_at,
            "final_root_hash": integrity_report.chain_head_hash,
            "entry_count": integrity_report.total_entries,
            "archive_sha256": archive_sha256,
            "all_paths_verified_null": all_paths_verified_null,
        });

        let certificate = DeletionCertificate {
            certificate_id,
            tenant_id: tenant_id.to_string(),
            destroyed_at,
            artifact_inventory: shred_outcome.artifacts,
            total_bytes_destroyed: shred_outcome.total_bytes_destroyed,
            all_paths_verified_null,
            crypto_shred_proof: CryptoShredProof {
                key_destroyed: key_verified_null,
                overwrite_passes: 1,
                key_path: key_path.display().to_string(),
            },
            final_root_hash: integrity_report.chain_head_hash,
            entry_count: integrity_report.total_entries,
            archive_sha256,
            archive_byte_count: archive_material.len() as u64,
            remote_purge,
            witness_key_id: self.signer.key_identifier().to_string(),
            signature: self.signer.sign_canonical(&certificate_signable),
        };

        info!(
            "⚰️  [EXODUS]: Tenant [{}] destroyed. Certificate {} issued; archive is the only copy.",
            tenant_id, certificate.certificate_id
        );
        Ok((archive_material, certificate))
    }

    /// Lectura cruda de los artefactos del silo para el sobre.
    fn collect_raw_silo_files(
        &self,
        tenant_id: &str,
    ) -> Result<serde_json::Map<String, Value>, ChainFault> {
        let tenant_lock = self.chain_store.tenant_lock(tenant_id);
        let _read_guard = tenant_lock.read().expect("exodus snapshot lock poisoned");

        let mut raw_files = serde_json::Map::new();
        let tenant_silo = self.chain_store.tenant_dir(tenant_id);
        if tenant_silo.is_dir() {
            for directory_entry in fs::read_dir(&tenant_silo)? {
                let artifact_path = directory_entry?.path();
                if artifact_path.is_file() {
                    let artifact_name = artifact_path
                        .file_name()
                        .map(|name| name.to_string_lossy().to_string())
                        .unwrap_or_default();
                    raw_files.insert(
                        artifact_name,
                        Value::String(fs::read_to_string(&artifact_path)?),
                    );
                }
            }
        }
        Ok(raw_files)
    }

    /// Fase 2 bajo candado exclusivo: silo + llave, con verificación null.
    fn execute_shred_phase(&self, tenant_id: &str) -> Result<ShredOutcome, ChainFault> {
        let tenant_lock = self.chain_store.tenant_lock(tenant_id);
        let _shred_guard = tenant_lock.write().expect("exodus shred lock poisoned");

        let shred_outcome = shred_tenant_silo(&self.chain_store.tenant_dir(tenant_id))?;
        self.chain_store.key_custodian().destroy_key(tenant_id)?;
        Ok(shred_outcome)
    }

    /// Fase 3: anclas en lotes del límite del backend, documento padre
    /// de testigo, y marcado 'destroyed' preservando los documentos.
    async fn purge_remote_state(&self, tenant_id: &str) -> RemotePurgeReport {
        let mut partial_failures = Vec::new();
        let mut anchors_purged: u64 = 0;

        let anchors_collection = collections::anchors_of(tenant_id);
        match self.document_store.list_documents(&anchors_collection).await {
            Ok(anchor_documents) => {
                let anchor_identifiers: Vec<String> = anchor_documents
                    .into_iter()
                    .map(|(anchor_id, _)| anchor_id)
                    .collect();

                for anchor_chunk in anchor_identifiers.chunks(self.document_store.batch_limit()) {
                    let deletion_batch: Vec<BatchOperation> = anchor_chunk
                        .iter()
                        .map(|anchor_id| BatchOperation::Delete {
                            collection: anchors_collection.clone(),
                            document_id: anchor_id.clone(),
                        })
                        .collect();

                    match self.document_store.commit_batch(deletion_batch).await {
                        Ok(()) => anchors_purged += anchor_chunk.len() as u64,
                        Err(batch_fault) => {
                            partial_failures.push(format!("anchor batch: {}", batch_fault))
                        }
                    }
                }
            }
            Err(listing_fault) => {
                partial_failures.push(format!("anchor listing: {}", listing_fault));
            }
        }

        let witness_document_deleted = match self
            .document_store
            .delete_document(
                collections::WITNESSES,
                &collections::witness_document_id(tenant_id),
            )
            .await
        {
            Ok(()) => true,
            Err(deletion_fault) => {
                partial_failures.push(format!("witness document: {}", deletion_fault));
                false
            }
        };

        // Los documentos de tenant se preservan como prueba de existencia.
        let owner_uid = match self
            .document_store
            .get_document(collections::GOV_TENANTS, tenant_id)
            .await
        {
            Ok(Some(government_document)) => government_document
                .get("owner_uid")
                .and_then(|field| field.as_str())
                .map(|owner| owner.to_string()),
            Ok(None) => None,
            Err(fetch_fault) => {
                partial_failures.push(format!("govTenants fetch: {}", fetch_fault));
                None
            }
        };

        let mut destruction_batch = vec![BatchOperation::Merge {
            collection: collections::GOV_TENANTS.to_string(),
            document_id: tenant_id.to_string(),
            patch: json!({ "status": TenantStatus::Destroyed.as_str() }),
        }];
        if let Some(owner_uid) = owner_uid {
            destruction_batch.push(BatchOperation::Merge {
                collection: collections::TENANTS.to_string(),
                document_id: owner_uid,
                patch: json!({ "status": TenantStatus::Destroyed.as_str() }),
            });
        }

        let tenant_marked_destroyed = match self.document_store.commit_batch(destruction_batch).await
        {
            Ok(()) => true,
            Err(batch_fault) => {
                partial_failures.push(format!("destroyed marking: {}", batch_fault));
                false
            }
        };

        if !partial_failures.is_empty() {
            warn!(
                "⚠️ [EXODUS]: Remote purge degraded gracefully with {} partial failures.",
                partial_failures.len()
            );
        }

        RemotePurgeReport {
            anchors_purged,
            witness_document_deleted,
            tenant_marked_destroyed,
            partial_failures,
        }
    }
}
