// [libs/core/chain-ledger/src/store.rs]
/*!
 * =================================================================
 * APARATO: CHAIN STORE (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: CORE ENGINE (ESTRATO L1)
 * RESPONSABILIDAD: PROPIEDAD DEL SILO EN DISCO Y APPEND DURADERO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. LAZY SILO GENESIS: El directorio del tenant y su llave nacen en el
 *    primer append; la lápida veta cualquier renacimiento posterior.
 * 2. MONOTONIC WALL-CLOCK: Si el reloj del host retrocede, el eslabón
 *    hereda 'previo + 1 ms' y la regresión queda trazada; dos eslabones
 *    consecutivos jamás portan marcas decrecientes.
 * 3. REVERSE TAIL SCAN: La cabeza se localiza leyendo bloques desde el
 *    final del archivo hasta el último '\n', con coste independiente
 *    del tamaño total del ledger.
 *
 * # Mathematical Proof (Append Atomicity):
 * La línea se materializa con O_APPEND en una sola llamada de escritura
 * seguida de fsync. O la línea terminada en '\n' es visible al próximo
 * lector, o no existe; no hay líneas desgarradas que verificar.
 * =================================================================
 */

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use custodia_core_vault::{sanitize_tenant_identifier, KeyCustodian, LineSealer};
use custodia_domain_models::entry::{ChainEntry, EntryEvent, GENESIS_HEAD};
use custodia_domain_models::receipt::{forge_receipt_identifier, ReceiptKind};

use crate::canonical::{canonical_json_string, compute_entry_hash};
use crate::errors::ChainFault;
use crate::tombstone::TombstoneRegistry;

/// Nombre del archivo de ledger dentro del silo del tenant.
pub const LEDGER_FILE_NAME: &str = "ledger.ndjson";
/// Nombre del ledger de gobernanza RAIO dentro del silo.
pub const GOVERNANCE_LEDGER_FILE_NAME: &str = "governance_ledger.json";
/// Espejo process-wide de actividad administrativa.
pub const ADMIN_MIRROR_FILE_NAME: &str = "admin_access.log";

/// Cota superior del JSON en claro de un eslabón (pre-cifrado).
const DEFAULT_MAXIMUM_ENTRY_BYTES: usize = 256 * 1024;

/// Tamaño de bloque del barrido inverso de cola.
const TAIL_SCAN_BLOCK_BYTES: u64 = 4096;

/// Desenlace de un append exitoso.
#[derive(Debug, Clone)]
pub struct AppendOutcome {
    pub entry: ChainEntry,
    /// true si el reloj del host retrocedió y se aplicó 'previo + 1 ms'.
    pub clock_regression_applied: bool,
}

/// Autoridad única sobre el silo `<root>/audit/` y sus cadenas.
pub struct ChainStore {
    audit_root: PathBuf,
    key_custodian: KeyCustodian,
    tombstones: TombstoneRegistry,
    tenant_locks: Mutex<HashMap<String, Arc<RwLock<()>>>>,
    maximum_entry_bytes: usize,
}

impl ChainStore {
    pub fn new(audit_root: impl Into<PathBuf>, keys_root: impl Into<PathBuf>) -> Self {
        let audit_root = audit_root.into();
        let tombstones = TombstoneRegistry::new(audit_root.join("tombstones.ndjson"));
        Self {
            audit_root,
            key_custodian: KeyCustodian::new(keys_root),
            tombstones,
            tenant_locks: Mutex::new(HashMap::new()),
            maximum_entry_bytes: DEFAULT_MAXIMUM_ENTRY_BYTES,
        }
    }

    pub fn with_maximum_entry_bytes(mut self, maximum_entry_bytes: usize) -> Self {
        self.maximum_entry_bytes = maximum_entry_bytes;
        self
    }

    pub fn audit_root(&self) -> &Path {
        &self.audit_root
    }

    pub fn key_custodian(&self) -> &KeyCustodian {
        &self.key_custodian
    }

    pub fn tombstones(&self) -> &TombstoneRegistry {
        &self.tombstones
    }

    /// Candado por tenant: exclusivo para append/rotación/trituración,
    /// compartido para lectores de instantánea.
    pub fn tenant_lock(&self, tenant_id: &str) -> Arc<RwLock<()>> {
        let sanitized = sanitize_tenant_identifier(tenant_id);
        let mut lock_registry = self
            .tenant_locks
            .lock()
            .expect("tenant lock registry poisoned");
        lock_registry
            .entry(sanitized)
            .or_insert_with(|| Arc::new(RwLock::new(())))
            .clone()
    }

    /// Directorio del silo del tenant (patrón de solo lectura para
    /// colaboradores externos).
    pub fn tenant_dir(&self, tenant_id: &str) -> PathBuf {
        self.audit_root.join(sanitize_tenant_identifier(tenant_id))
    }

    pub fn ledger_path(&self, tenant_id: &str) -> PathBuf {
        self.tenant_dir(tenant_id).join(LEDGER_FILE_NAME)
    }

    pub fn governance_ledger_path(&self, tenant_id: &str) -> PathBuf {
        self.tenant_dir(tenant_id).join(GOVERNANCE_LEDGER_FILE_NAME)
    }

    pub fn admin_mirror_path(&self) -> PathBuf {
        self.audit_root.join(ADMIN_MIRROR_FILE_NAME)
    }

    /// Enumera los silos de tenant presentes en disco (directorios).
    pub fn list_tenants(&self) -> Result<Vec<String>, ChainFault> {
        if !self.audit_root.is_dir() {
            return Ok(Vec::new());
        }
        let mut tenant_identifiers = Vec::new();
        for directory_entry in fs::read_dir(&self.audit_root)? {
            let directory_entry = directory_entry?;
            if directory_entry.file_type()?.is_dir() {
                tenant_identifiers.push(directory_entry.file_name().to_string_lossy().to_string());
            }
        }
        tenant_identifiers.sort();
        Ok(tenant_identifiers)
    }

    /**
     * Garantiza la llave del tenant, consultando primero el registro de
     * lápidas (invariante de monotonicidad: un id destruido jamás
     * renace con silo ni llave nuevos).
     */
    pub fn ensure_tenant_key(&self, tenant_id: &str) -> Result<(), ChainFault> {
        if self.tombstones.contains(tenant_id)? {
            return Err(ChainFault::TenantDestroyed(tenant_id.to_string()));
        }
        self.key_custodian.ensure_key(tenant_id)?;
        Ok(())
    }

    /**
     * Anexa un eslabón al silo del tenant.
     *
     * Protocolo: candado exclusivo → veto de lápida → llave → lectura de
     * cabeza (con re-verificación del eslabón previo) → marca monótona →
     * recibo → hash canónico → sellado → O_APPEND + fsync.
     *
     * # Errors:
     * - `TenantDestroyed`: el id yace en el registro de lápidas.
     * - `EncryptionKeyMissing` / `DecryptionFailed`: estado de llave roto.
     * - `CriticalIntegrityFailure`: el eslabón previo ya no verifica.
     * - `AuditWriteError`: la línea no fue persistida (cadena intacta).
     */
    #[instrument(skip(self, event), fields(tenant = %tenant_id))]
    pub fn append(&self, tenant_id: &str, event: EntryEvent) -> Result<AppendOutcome, ChainFault> {
        let tenant_lock = self.tenant_lock(tenant_id);
        let _append_guard = tenant_lock.write().expect("tenant append lock poisoned");

        if self.tombstones.contains(tenant_id)? {
            return Err(ChainFault::TenantDestroyed(tenant_id.to_string()));
        }

        let tenant_silo = self.tenant_dir(tenant_id);
        fs::create_dir_all(&tenant_silo)?;

        self.key_custodian.ensure_key(tenant_id)?;
        let tenant_key = self
            .key_custodian
            .load_key(tenant_id)?
            .ok_or_else(|| ChainFault::EncryptionKeyMissing(tenant_id.to_string()))?;
        let line_sealer = LineSealer::new(&tenant_key);

        // 1. CABEZA ACTUAL: re-verificación del eslabón previo incluida.
        let previous_entry = self.scan_last_entry_unlocked(tenant_id, Some(&line_sealer))?;
        let (chain_head, next_index, previous_epoch_milliseconds) = match &previous_entry {
            Some(entry) => {
                let previous_value = serde_json::to_value(entry).map_err(|serialization_fault| {
                    ChainFault::AuditWriteError(serialization_fault.to_string())
                })?;
                let recomputed_hash = compute_entry_hash(&previous_value)?;
                if recomputed_hash != entry.entry_hash {
                    return Err(ChainFault::CriticalIntegrityFailure(format!(
                        "head entry {} no longer hashes to its entry_hash",
                        entry.receipt_id
                    )));
                }
                (
                    entry.entry_hash.clone(),
                    entry.index + 1,
                    parse_iso_epoch_milliseconds(&entry.timestamp),
                )
            }
            None => (GENESIS_HEAD.to_string(), 0, None),
        };

        // 2. MARCA MONÓTONA: el reloj jamás retrocede dentro del silo.
        let wall_clock_milliseconds = Utc::now().timestamp_millis();
        let (entry_epoch_milliseconds, clock_regression_applied) =
            match previous_epoch_milliseconds {
                Some(previous_milliseconds) if wall_clock_milliseconds <= previous_milliseconds => {
                    warn!(
                        "🕰️ [CHAIN_STORE]: Host clock regression detected for [{}]. Applying previous + 1ms rule.",
                        tenant_id
                    );
                    (previous_milliseconds + 1, true)
                }
                _ => (wall_clock_milliseconds, false),
            };

        // 3. FORJA DEL ESLABÓN
        let receipt_kind: ReceiptKind = event.kind().into();
        let receipt_id =
            forge_receipt_identifier(receipt_kind, entry_epoch_milliseconds as u64);

        let mut entry = ChainEntry {
            index: next_index,
            receipt_id,
            timestamp: format_iso_milliseconds(entry_epoch_milliseconds),
            prev_hash: chain_head,
            entry_hash: String::new(),
            event,
        };

        let entry_value = serde_json::to_value(&entry).map_err(|serialization_fault| {
            ChainFault::AuditWriteError(serialization_fault.to_string())
        })?;
        entry.entry_hash = compute_entry_hash(&entry_value)?;

        // 4. SERIALIZACIÓN CANÓNICA DE LA LÍNEA COMPLETA
        let sealed_entry_value = serde_json::to_value(&entry).map_err(|serialization_fault| {
            ChainFault::AuditWriteError(serialization_fault.to_string())
        })?;
        let plaintext_line = canonical_json_string(&sealed_entry_value);

        if plaintext_line.len() > self.maximum_entry_bytes {
            return Err(ChainFault::AuditWriteError(format!(
                "ENTRY_BYTES_EXCEEDED -> {} > {}",
                plaintext_line.len(),
                self.maximum_entry_bytes
            )));
        }

        let sealed_line = line_sealer
            .seal(&plaintext_line)
            .map_err(|seal_fault| ChainFault::AuditWriteError(seal_fault.to_string()))?;

        // 5. PERSISTENCIA DURADERA
        let ledger_path = self.ledger_path(tenant_id);
        let mut ledger_handle = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&ledger_path)
            .map_err(|open_fault| ChainFault::AuditWriteError(open_fault.to_string()))?;
        ledger_handle
            .write_all(format!("{}\n", sealed_line).as_bytes())
            .map_err(|write_fault| ChainFault::AuditWriteError(write_fault.to_string()))?;
        ledger_handle
            .sync_all()
            .map_err(|sync_fault| ChainFault::AuditWriteError(sync_fault.to_string()))?;

        debug!(
            "🔗 [CHAIN_STORE]: Entry {} sealed at index {} for [{}].",
            entry.receipt_id, entry.index, tenant_id
        );

        Ok(AppendOutcome { entry, clock_regression_applied })
    }

    /// Cabeza del silo con coste independiente del tamaño del ledger.
    pub fn scan_last_entry(&self, tenant_id: &str) -> Result<Option<ChainEntry>, ChainFault> {
        let tenant_lock = self.tenant_lock(tenant_id);
        let _read_guard = tenant_lock.read().expect("tenant read lock poisoned");
        self.scan_last_entry_unlocked(tenant_id, None)
    }

    fn scan_last_entry_unlocked(
        &self,
        tenant_id: &str,
        prepared_sealer: Option<&LineSealer>,
    ) -> Result<Option<ChainEntry>, ChainFault> {
        let ledger_path = self.ledger_path(tenant_id);
        let Some(last_raw_line) = read_last_line(&ledger_path)? else {
            return Ok(None);
        };

        let plaintext = self.decode_raw_line(tenant_id, &last_raw_line, prepared_sealer)?;
        let entry: ChainEntry = serde_json::from_str(&plaintext)
            .map_err(|parse_fault| ChainFault::DecryptionFailed(parse_fault.to_string()))?;
        Ok(Some(entry))
    }

    /// Eslabones descifrados en orden de append. Acepta líneas legacy
    /// en claro y líneas selladas mezcladas.
    pub fn read_all(&self, tenant_id: &str) -> Result<Vec<ChainEntry>, ChainFault> {
        let tenant_lock = self.tenant_lock(tenant_id);
        let _read_guard = tenant_lock.read().expect("tenant read lock poisoned");

        let mut entries = Vec::new();
        for raw_line in self.list_raw_lines_unlocked(tenant_id)? {
            let plaintext = self.decode_raw_line(tenant_id, &raw_line, None)?;
            let entry: ChainEntry = serde_json::from_str(&plaintext)
                .map_err(|parse_fault| ChainFault::DecryptionFailed(parse_fault.to_string()))?;
            entries.push(entry);
        }
        Ok(entries)
    }

    /// Líneas crudas del ledger; exclusivo para rotación y archivado.
    pub fn list_raw_lines(&self, tenant_id: &str) -> Result<Vec<String>, ChainFault> {
        let tenant_lock = self.tenant_lock(tenant_id);
        let _read_guard = tenant_lock.read().expect("tenant read lock poisoned");
        self.list_raw_lines_unlocked(tenant_id)
    }

    pub(crate) fn list_raw_lines_unlocked(
        &self,
        tenant_id: &str,
    ) -> Result<Vec<String>, ChainFault> {
        let ledger_path = self.ledger_path(tenant_id);
        if !ledger_path.is_file() {
            return Ok(Vec::new());
        }
        let ledger_content = fs::read_to_string(&ledger_path)?;
        Ok(ledger_content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.to_string())
            .collect())
    }

    /// Abre una línea cruda: passthrough para JSON legacy en claro,
    /// apertura GCM para líneas 'ENC:'.
    pub(crate) fn decode_raw_line(
        &self,
        tenant_id: &str,
        raw_line: &str,
        prepared_sealer: Option<&LineSealer>,
    ) -> Result<String, ChainFault> {
        if !LineSealer::is_sealed_line(raw_line) {
            return Ok(raw_line.to_string());
        }

        match prepared_sealer {
            Some(sealer) => Ok(sealer.unseal(raw_line)?),
            None => {
                let tenant_key = self
                    .key_custodian
                    .load_key(tenant_id)?
                    .ok_or_else(|| ChainFault::EncryptionKeyMissing(tenant_id.to_string()))?;
                Ok(LineSealer::new(&tenant_key).unseal(raw_line)?)
            }
        }
    }

    /// Re-lee un Value crudo de línea para verificación por índice.
    pub(crate) fn decode_raw_line_to_value(
        &self,
        tenant_id: &str,
        raw_line: &str,
    ) -> Result<Value, ChainFault> {
        let plaintext = self.decode_raw_line(tenant_id, raw_line, None)?;
        serde_json::from_str(&plaintext)
            .map_err(|parse_fault| ChainFault::DecryptionFailed(parse_fault.to_string()))
    }
}

/// Marca ISO-8601 UTC con precisión de milisegundos.
pub fn format_iso_milliseconds(epoch_milliseconds: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(epoch_milliseconds)
        .unwrap_or_else(Utc::now)
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

/// Epoch en milisegundos de una marca ISO-8601, si es legible.
pub fn parse_iso_epoch_milliseconds(timestamp: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|parsed| parsed.timestamp_millis())
}

/// Barrido inverso de cola: localiza la última línea no vacía leyendo
/// bloques desde el final del archivo.
fn read_last_line(ledger_path: &Path) -> Result<Option<String>, std::io::Error> {
    if !ledger_path.is_file() {
        return Ok(None);
    }

    let mut ledger_handle = fs::File::open(ledger_path)?;
    let file_length = ledger_handle.seek(SeekFrom::End(0))?;
    if file_length == 0 {
        return Ok(None);
    }

    let mut tail_buffer: Vec<u8> = Vec::new();
    let mut scan_position = file_length;

    while scan_position > 0 {
        let block_length = TAIL_SCAN_BLOCK_BYTES.min(scan_position);
        scan_position -= block_length;
        ledger_handle.seek(SeekFrom::Start(scan_position))?;

        let mut block_buffer = vec![0u8; block_length as usize];
        ledger_handle.read_exact(&mut block_buffer)?;
        block_buffer.extend_from_slice(&tail_buffer);
        tail_buffer = block_buffer;

        // Saltamos el '\n' terminal; buscamos el delimitador previo.
        let trimmed_tail: &[u8] = {
            let mut tail_slice = tail_buffer.as_slice();
            while let Some((&b'\n', remainder)) = tail_slice.split_last() {
                tail_slice = remainder;
            }
            tail_slice
        };

        if let Some(delimiter_position) = trimmed_tail.iter().rposition(|&byte| byte == b'\n') {
            let line_bytes = &trimmed_tail[delimiter_position + 1..];
            return Ok(Some(String::from_utf8_lossy(line_bytes).to_string()));
        }

        if scan_position == 0 {
            if trimmed_tail.is_empty() {
                return Ok(None);
            }
            return Ok(Some(String::from_utf8_lossy(trimmed_tail).to_string()));
        }
    }

    Ok(None)
}
