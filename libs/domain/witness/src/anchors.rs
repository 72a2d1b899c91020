// [libs/domain/witness/src/anchors.rs]
/*!
 * =================================================================
 * APARATO: WITNESS DESK (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: BARRIDO DE ANCLAJE Y VERIFICACIÓN DE CINCO VEREDICTOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. WALL-CLOCK BUDGET: El barrido cron porta un presupuesto de reloj;
 *    los tenants que no alcanzan turno se reportan TIMEOUT en el
 *    resumen y se reintentan en la próxima corrida.
 * 2. LOCAL_AHEAD SEMANTICS: Entre corridas de anclaje la cadena local
 *    extiende el prefijo comprometido; el veredicto es OK si y solo si
 *    la cabeza anclada aparece en la cadena local.
 * =================================================================
 */

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use rand::RngCore;
use serde_json::json;
use tracing::{info, instrument, warn};

use custodia_core_chain::{ChainFault, ChainStore};
use custodia_domain_models::anchor::AnchorRecord;
use custodia_domain_models::entry::GENESIS_HEAD;
use custodia_domain_models::reports::{
    AnchorOutcome, AnchorSweepSummary, AnchorSweepTotals, WitnessVerdict, WitnessVerification,
};
use custodia_infra_store::{collections, DocumentStore};

use crate::signer::WitnessSigner;

/// Mesa de testigo: ancla silos y verifica contra el almacén remoto.
pub struct WitnessDesk {
    chain_store: Arc<ChainStore>,
    document_store: Arc<dyn DocumentStore>,
    signer: WitnessSigner,
}

impl WitnessDesk {
    pub fn new(
        chain_store: Arc<ChainStore>,
        document_store: Arc<dyn DocumentStore>,
        signer: WitnessSigner,
    ) -> Self {
        Self { chain_store, document_store, signer }
    }

    /**
     * Ancla un tenant individual: verificación O(n), construcción del
     * registro, firma HMAC y persistencia remota (ancla + documento
     * padre de testigo).
     */
    #[instrument(skip(self), fields(tenant = %tenant_id))]
    pub async fn anchor_tenant(&self, tenant_id: &str) -> Result<AnchorRecord, ChainFault> {
        let integrity_report = self.chain_store.verify(tenant_id)?;
        let anchored_at = Utc::now();

        let mut anchor_entropy = [0u8; 4];
        rand::rngs::OsRng.fill_bytes(&mut anchor_entropy);

        let mut anchor = AnchorRecord {
            anchor_id: format!(
                "ANCHOR-{}-{:08X}",
                anchored_at.format("%Y%m%dT%H%M%S"),
                u32::from_be_bytes(anchor_entropy)
            ),
            tenant_id: tenant_id.to_string(),
            anchor_date: anchored_at.format("%Y-%m-%d").to_string(),
            anchored_at: anchored_at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            chain_head_hash: integrity_report.chain_head_hash.clone(),
            chain_valid: integrity_report.valid,
            verified_entries: integrity_report.verified_entries,
            total_entries: integrity_report.total_entries,
            witness_key_id: self.signer.key_identifier().to_string(),
            signature: String::new(),
        };
        anchor.signature = self.signer.sign_anchor(&anchor);

        let anchor_value = serde_json::to_value(&anchor)
            .map_err(|serialization_fault| ChainFault::RemoteStoreError(serialization_fault.to_string()))?;

        self.document_store
            .put_document(&collections::anchors_of(tenant_id), &anchor.anchor_id, anchor_value)
            .await
            .map_err(|store_fault| ChainFault::RemoteStoreError(store_fault.to_string()))?;

        self.document_store
            .merge_document(
                collections::WITNESSES,
                &collections::witness_document_id(tenant_id),
                json!({
                    "tenant_id": tenant_id,
                    "latest_anchor_id": anchor.anchor_id,
                    "latest_anchored_at": anchor.anchored_at,
                    "latest_chain_head": anchor.chain_head_hash,
                    "latest_chain_valid": anchor.chain_valid,
                }),
            )
            .await
            .map_err(|store_fault| ChainFault::RemoteStoreError(store_fault.to_string()))?;

        info!(
            "⚓ [WITNESS]: Anchor {} committed for tenant [{}] (head {}).",
            anchor.anchor_id, tenant_id, anchor.chain_head_hash
        );
        Ok(anchor)
    }

    /**
     * Barrido completo de anclaje sobre todos los silos en disco,
     * acotado por presupuesto de reloj de pared.
     */
    #[instrument(skip(self))]
    pub async fn anchor_all_tenants(&self, wall_clock_budget: Duration) -> AnchorSweepSummary {
        let sweep_started = Instant::now();
        let started_at = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string();

        let tenant_identifiers = match self.chain_store.list_tenants() {
            Ok(identifiers) => identifiers,
            Err(listing_fault) => {
                warn!("🔥 [WITNESS]: Silo enumeration collapsed: {}", listing_fault);
                Vec::new()
            }
        };

        let mut results = Vec::with_capacity(tenant_identifiers.len());
        let mut anchored_count: u64 = 0;
        let mut error_count: u64 = 0;

        for tenant_id in &tenant_identifiers {
            if sweep_started.elapsed() >= wall_clock_budget {
                warn!(
                    "⏳ [WITNESS]: Wall-clock budget exhausted; deferring tenant [{}] to next run.",
                    tenant_id
                );
                error_count += 1;
                results.push(AnchorOutcome {
                    tenant_id: tenant_id.clone(),
                    status: "TIMEOUT".to_string(),
                    anchor_id: None,
                    chain_head_hash: None,
                    error_detail: Some("wall-clock budget exhausted".to_string()),
                });
                continue;
            }

            match self.anchor_tenant(tenant_id).await {
                Ok(anchor) => {
                    anchored_count += 1;
                    results.push(AnchorOutcome {
                        tenant_id: tenant_id.clone(),
                        status: "ANCHORED".to_string(),
                        anchor_id: Some(anchor.anchor_id),
                        chain_head_hash: Some(anchor.chain_head_hash),
                        error_detail: None,
                    });
                }
                Err(anchor_fault) => {
                    error_count += 1;
                    results.push(AnchorOutcome {
                        tenant_id: tenant_id.clone(),
                        status: "ERROR".to_string(),
                        anchor_id: None,
                        chain_head_hash: None,
                        error_detail: Some(anchor_fault.to_string()),
                    });
                }
            }
        }

        AnchorSweepSummary {
            status: if error_count == 0 {
                "COMPLETED".to_string()
            } else {
                "COMPLETED_WITH_ERRORS".to_string()
            },
            started_at,
            completed_at: Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            summary: AnchorSweepTotals {
                total_tenants: tenant_identifiers.len() as u64,
                anchored: anchored_count,
                errors: error_count,
            },
            results,
        }
    }

    /// Historial completo de anclas del tenant, en orden de captura.
    pub async fn anchor_history(&self, tenant_id: &str) -> Result<Vec<AnchorRecord>, ChainFault> {
        let anchor_documents = self
            .document_store
            .list_documents(&collections::anchors_of(tenant_id))
            .await
            .map_err(|store_fault| ChainFault::RemoteStoreError(store_fault.to_string()))?;

        let mut anchors: Vec<AnchorRecord> = anchor_documents
            .into_iter()
            .filter_map(|(_, body)| serde_json::from_value(body).ok())
            .collect();
        anchors.sort_by(|left, right| left.anchored_at.cmp(&right.anchored_at));
        Ok(anchors)
    }

    /// Ancla más reciente del tenant, si existe.
    pub async fn latest_anchor(&self, tenant_id: &str) -> Result<Option<AnchorRecord>, ChainFault> {
        Ok(self.anchor_history(tenant_id).await?.pop())
    }

    /**
     * Verificación local-contra-ancla con los cinco veredictos estables.
     */
    #[instrument(skip(self), fields(tenant = %tenant_id))]
    pub async fn verify_witness(&self, tenant_id: &str) -> Result<WitnessVerification, ChainFault> {
        let local_report = self.chain_store.verify(tenant_id)?;
        let latest_anchor = self.latest_anchor(tenant_id).await?;

        let (verdict, anchored_chain_head, anchor_signature_valid) = match &latest_anchor {
            None => (WitnessVerdict::NoAnchor, None, None),
            Some(anchor) => {
                let signature_valid = self.signer.verify_anchor(anchor);
                let verdict = if !local_report.valid {
                    WitnessVerdict::LocalBroken
                } else if anchor.chain_head_hash == local_report.chain_head_hash {
                    WitnessVerdict::Match
                } else if self.anchored_head_in_local_chain(tenant_id, &anchor.chain_head_hash)? {
                    WitnessVerdict::LocalAheadOfAnchor
                } else {
                    WitnessVerdict::Mismatch
                };
                (verdict, Some(anchor.chain_head_hash.clone()), Some(signature_valid))
            }
        };

        Ok(WitnessVerification {
            tenant_id: tenant_id.to_string(),
            verdict,
            local_chain_head: local_report.chain_head_hash,
            anchored_chain_head,
            local_integrity_valid: local_report.valid,
            witness_match: verdict == WitnessVerdict::Match,
            anchor_signature_valid,
            checked_at: Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        })
    }

    /// true si la cabeza anclada pertenece al prefijo de la cadena local
    /// (un ancla de silo vacío extiende trivialmente cualquier cadena).
    fn anchored_head_in_local_chain(
        &self,
        tenant_id: &str,
        anchored_head: &str,
    ) -> Result<bool, ChainFault> {
        if anchored_head == GENESIS_HEAD {
            return Ok(true);
        }
        let entries = self.chain_store.read_all(tenant_id)?;
        Ok(entries.iter().any(|entry| entry.entry_hash == anchored_head))
    }
}
