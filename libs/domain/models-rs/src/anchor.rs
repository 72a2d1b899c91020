// [libs/domain/models-rs/src/anchor.rs]
/*!
 * =================================================================
 * APARATO: WITNESS & DESTRUCTION CONTRACTS (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: ANCLAS REMOTAS, LÁPIDAS Y CERTIFICADOS DE DESTRUCCIÓN
 *
 * # Mathematical Proof (Non-Repudiation):
 * El ancla compromete la cabeza de cadena bajo HMAC-SHA256 con la llave
 * de testigo del servidor. Una vez persistida en el almacén remoto, el
 * operador del silo no puede reescribir su historia sin que la
 * verificación local-contra-ancla delate la divergencia.
 * =================================================================
 */

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

/// Compromiso remoto firmado sobre la cabeza de cadena de un tenant.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnchorRecord {
    /// Identificador del ancla dentro de la colección del tenant.
    pub anchor_id: String,
    pub tenant_id: String,
    /// Fecha ISO (YYYY-MM-DD) de la corrida de anclaje.
    pub anchor_date: String,
    /// Marca ISO-8601 UTC exacta de la captura.
    pub anchored_at: String,
    /// Cabeza de cadena comprometida.
    pub chain_head_hash: String,
    /// Veredicto local del verificador en la captura.
    pub chain_valid: bool,
    #[typeshare(serialized_as = "number")]
    pub verified_entries: u64,
    #[typeshare(serialized_as = "number")]
    pub total_entries: u64,
    /// Identificador público de la llave de testigo (rotación con solape).
    pub witness_key_id: String,
    /// HMAC-SHA256 hex sobre el subconjunto canónico firmado.
    pub signature: String,
}

/// Registro permanente de un tenant destruido (registro global append-only).
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TombstoneRecord {
    pub tenant_id: String,
    /// Certificado de destrucción asociado.
    pub certificate_id: String,
    /// Cabeza final de la cadena antes de la trituración.
    pub final_root_hash: String,
    #[typeshare(serialized_as = "number")]
    pub entry_count: u64,
    #[typeshare(serialized_as = "number")]
    pub byte_count: u64,
    pub destroyed_at: String,
    pub witness_key_id: String,
    /// HMAC-SHA256 hex sobre el subconjunto canónico de la lápida.
    pub signature: String,
}

/// Artefacto individual triturado durante el éxodo soberano.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShreddedArtifact {
    /// Ruta absoluta del artefacto destruido.
    pub path: String,
    #[typeshare(serialized_as = "number")]
    pub byte_count: u64,
    /// true si el re-stat posterior confirmó la inexistencia.
    pub verified_null: bool,
}

/// Prueba de crypto-shred: la llave fue destruida y verificada ausente.
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoShredProof {
    /// La llave del tenant fue sobrescrita y desvinculada.
    pub key_destroyed: bool,
    /// Pasadas de sobrescritura CSPRNG aplicadas a cada artefacto.
    #[typeshare(serialized_as = "number")]
    pub overwrite_passes: u32,
    /// Ruta de la llave destruida (prueba de inventario).
    pub key_path: String,
}

/// Desenlace del purgado remoto (fase 3, mejor esfuerzo).
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemotePurgeReport {
    #[typeshare(serialized_as = "number")]
    pub anchors_purged: u64,
    pub witness_document_deleted: bool,
    pub tenant_marked_destroyed: bool,
    /// Fallos parciales registrados; nunca abortan el éxodo.
    pub partial_failures: Vec<String>,
}

/// Certificado firmado devuelto por el éxodo soberano (fase 4).
#[typeshare]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletionCertificate {
    pub certificate_id: String,
    pub tenant_id: String,
    pub destroyed_at: String,
    /// Inventario de artefactos triturados.
    pub artifact_inventory: Vec<ShreddedArtifact>,
    #[typeshare(serialized_as = "number")]
    pub total_bytes_destroyed: u64,
    /// true si y solo si cada ruta re-stat devolvió not-found.
    pub all_paths_verified_null: bool,
    pub crypto_shred_proof: CryptoShredProof,
    /// Cabeza final y conteo capturados antes de la destrucción.
    pub final_root_hash: String,
    #[typeshare(serialized_as = "number")]
    pub entry_count: u64,
    /// SHA-256 hex del archivo cifrado entregado.
    pub archive_sha256: String,
    #[typeshare(serialized_as = "number")]
    pub archive_byte_count: u64,
    /// Desenlace del purgado remoto de anclas y documentos.
    pub remote_purge: RemotePurgeReport,
    pub witness_key_id: String,
    /// HMAC-SHA256 hex sobre el subconjunto canónico del certificado.
    pub signature: String,
}
