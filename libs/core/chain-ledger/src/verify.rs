// [libs/core/chain-ledger/src/verify.rs]
/*!
 * =================================================================
 * APARATO: INTEGRITY VERIFIER (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: CORE ENGINE (ESTRATO L1)
 * RESPONSABILIDAD: RECORRIDO O(n) COMPLETO Y LOCALIZACIÓN DE RUPTURA
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. STABLE BREAK DETAIL: Los tres detalles de ruptura son contratos
 *    renderizados por la UI; su redacción es inmutable.
 * 2. NO AUTO-PROMOTION: Un veredicto inválido NO se promueve aquí a
 *    fallo crítico; el motor de suspensión y el monitor de runtime
 *    deciden la escalada, los exportadores de solo lectura no.
 *
 * # Mathematical Proof (Break Localization):
 * El recorrido mantiene la cabeza corrida h(i-1). El primer índice i
 * donde falla la apertura, el enlace prev_hash(i) ≠ h(i-1) o el hash
 * de contenido recomputado difiere del almacenado, es por construcción
 * el primer eslabón manipulado del orden total del silo.
 * =================================================================
 */

use chrono::Utc;
use tracing::instrument;

use custodia_domain_models::entry::GENESIS_HEAD;
use custodia_domain_models::reports::IntegrityReport;

use crate::canonical::compute_entry_hash;
use crate::errors::ChainFault;
use crate::store::ChainStore;

impl ChainStore {
    /**
     * Recorre la cadena completa del tenant recomputando cada hash.
     *
     * Nunca muta el silo; toma el candado compartido para observar una
     * instantánea consistente frente a appends concurrentes.
     */
    #[instrument(skip(self), fields(tenant = %tenant_id))]
    pub fn verify(&self, tenant_id: &str) -> Result<IntegrityReport, ChainFault> {
        let tenant_lock = self.tenant_lock(tenant_id);
        let _read_guard = tenant_lock.read().expect("tenant read lock poisoned");

        let raw_lines = self.list_raw_lines_unlocked(tenant_id)?;
        let total_entries = raw_lines.len() as u64;

        let mut running_head = GENESIS_HEAD.to_string();
        let mut verified_entries: u64 = 0;
        let mut first_broken_index: Option<u64> = None;
        let mut first_broken_receipt_id: Option<String> = None;
        let mut break_detail: Option<String> = None;

        for (line_index, raw_line) in raw_lines.iter().enumerate() {
            let entry_value = match self.decode_raw_line_to_value(tenant_id, raw_line) {
                Ok(value) => value,
                Err(_) => {
                    first_broken_index = Some(line_index as u64);
                    break_detail = Some(format!("decrypt failed at index {}", line_index));
                    break;
                }
            };

            let stored_prev_hash = entry_value
                .get("prev_hash")
                .and_then(|field| field.as_str())
                .unwrap_or_default()
                .to_string();
            let stored_entry_hash = entry_value
                .get("entry_hash")
                .and_then(|field| field.as_str())
                .unwrap_or_default()
                .to_string();
            let receipt_id = entry_value
                .get("receipt_id")
                .and_then(|field| field.as_str())
                .map(|receipt| receipt.to_string());

            if stored_prev_hash != running_head {
                first_broken_index = Some(line_index as u64);
                first_broken_receipt_id = receipt_id;
                break_detail = Some(format!("prev_hash mismatch at index {}", line_index));
                break;
            }

            let recomputed_hash = compute_entry_hash(&entry_value)?;
            if recomputed_hash != stored_entry_hash {
                first_broken_index = Some(line_index as u64);
                first_broken_receipt_id = receipt_id;
                break_detail = Some(format!("entry_hash mismatch at index {}", line_index));
                break;
            }

            running_head = stored_entry_hash;
            verified_entries += 1;
        }

        Ok(IntegrityReport {
            tenant_id: tenant_id.to_string(),
            valid: break_detail.is_none(),
            total_entries,
            verified_entries,
            first_broken_index,
            first_broken_receipt_id,
            break_detail,
            chain_head_hash: running_head,
            checked_at: Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        })
    }
}
