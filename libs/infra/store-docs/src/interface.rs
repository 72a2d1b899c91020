// [libs/infra/store-docs/src/interface.rs]
/*!
 * =================================================================
 * APARATO: DOCUMENT STORE CONTRACT (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: CONTRATO ASÍNCRONO DEL ALMACÉN DOCUMENTAL
 * =================================================================
 */

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::StoreFault;

/// Nombres canónicos de las colecciones del producto.
pub mod collections {
    /// Documento de gobierno por tenant (estado, suspensión, propiedad).
    pub const GOV_TENANTS: &str = "govTenants";
    /// Espejo de cuenta del propietario.
    pub const TENANTS: &str = "tenants";
    /// Documento padre de testigo por tenant.
    pub const WITNESSES: &str = "witnesses";
    /// Llamadas de voz en curso del producto.
    pub const GOVERNMENT_CALLS: &str = "government_calls";
    /// Metadatos de rotaciones de llave.
    pub const KEY_ROTATIONS: &str = "key_rotations";

    /// Sub-colección de anclas de un tenant: `witnesses/<id>/anchors`.
    pub fn anchors_of(tenant_id: &str) -> String {
        format!("{}/{}/anchors", WITNESSES, tenant_id)
    }

    /// Documento padre de testigo de un tenant dentro de WITNESSES.
    pub fn witness_document_id(tenant_id: &str) -> String {
        tenant_id.to_string()
    }
}

/// Operación individual dentro de un lote atómico.
#[derive(Debug, Clone)]
pub enum BatchOperation {
    Put { collection: String, document_id: String, body: Value },
    /// Fusión superficial de claves de primer nivel sobre el documento.
    Merge { collection: String, document_id: String, patch: Value },
    Delete { collection: String, document_id: String },
}

/**
 * Contrato del almacén documental remoto.
 *
 * El motor asume: (a) commit_batch es atómico — todas las operaciones
 * del lote se aplican o ninguna; (b) lecturas monótonas en la ruta de
 * anclas. Los drivers que no puedan honrarlo no son aptos.
 */
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_document(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<Option<Value>, StoreFault>;

    async fn put_document(
        &self,
        collection: &str,
        document_id: &str,
        body: Value,
    ) -> Result<(), StoreFault>;

    /// Fusión superficial: las claves del patch pisan las del documento;
    /// el documento nace si no existía.
    async fn merge_document(
        &self,
        collection: &str,
        document_id: &str,
        patch: Value,
    ) -> Result<(), StoreFault>;

    async fn delete_document(&self, collection: &str, document_id: &str)
        -> Result<(), StoreFault>;

    /// Documentos completos de una colección, ordenados por id.
    async fn list_documents(&self, collection: &str) -> Result<Vec<(String, Value)>, StoreFault>;

    /// Filtro de igualdad sobre un campo string de primer nivel.
    async fn query_field_equals(
        &self,
        collection: &str,
        field: &str,
        expected: &str,
    ) -> Result<Vec<(String, Value)>, StoreFault>;

    /// Lote atómico; rechaza lotes que exceden batch_limit().
    async fn commit_batch(&self, operations: Vec<BatchOperation>) -> Result<(), StoreFault>;

    /// Límite documentado de operaciones por lote del backend.
    fn batch_limit(&self) -> usize;
}
