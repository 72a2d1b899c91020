// [libs/infra/store-docs/src/turso.rs]
/*!
 * =================================================================
 * APARATO: TURSO DOCUMENT DRIVER (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: PERSISTENCIA DOCUMENTAL SOBRE LIBSQL/TURSO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. MEMORY ANCHOR: En modo RAM el driver abre un ancla de conexión
 *    ANTES del bootstrap para que el esquema resida en el segmento de
 *    memoria compartida y sea visible entre hilos del Proving Grounds.
 * 2. SINGLE TABLE TOPOLOGY: Un solo plano (collection, document_id,
 *    body) modela las colecciones jerárquicas del producto, incluidas
 *    las sub-colecciones 'witnesses/<id>/anchors'.
 *
 * # Mathematical Proof (Batch Atomicity):
 * Cada lote se ejecuta dentro de BEGIN IMMEDIATE .. COMMIT; SQLite
 * garantiza que el lote completo sea visible o revertido, cumpliendo
 * el contrato de doble colección del motor de suspensión.
 * =================================================================
 */

use async_trait::async_trait;
use libsql::{params, Builder, Connection, Database};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::errors::StoreFault;
use crate::interface::{BatchOperation, DocumentStore};

/// Límite de operaciones por lote (paridad con el backend documental).
const TURSO_BATCH_LIMIT: usize = 500;

#[derive(Clone)]
pub struct TursoDocumentStore {
    internal_database_driver: Arc<Database>,
    /// Mantiene viva la base en memoria evitando que SQLite la purgue.
    _memory_persistence_anchor: Option<Arc<Connection>>,
}

impl TursoDocumentStore {
    #[instrument(skip(database_access_token))]
    pub async fn connect(
        database_connection_url: &str,
        database_access_token: Option<String>,
    ) -> Result<Self, StoreFault> {
        if database_connection_url.is_empty() {
            return Err(StoreFault::ConfigurationError(
                "DATABASE_URL_UNDEFINED".into(),
            ));
        }

        info!(
            "🔌 [DOC_STORE]: Initiating document uplink synchronization to [{}]",
            database_connection_url
        );

        let is_remote = database_connection_url.starts_with("libsql://")
            || database_connection_url.starts_with("https://");
        let is_memory = database_connection_url.contains(":memory:")
            || database_connection_url.contains("mode=memory");

        let database_driver = if is_remote {
            let token = database_access_token.ok_or_else(|| {
                StoreFault::ConnectionError("SECURITY_FAULT: Remote access denied (Token missing)".into())
            })?;
            Builder::new_remote(database_connection_url.to_string(), token)
                .build()
                .await
        } else {
            Builder::new_local(database_connection_url).build().await
        }
        .map_err(|driver_fault| {
            StoreFault::ConnectionError(format!("DRIVER_IGNITION_FAILURE: {}", driver_fault))
        })?;

        let shared_driver = Arc::new(database_driver);
        let mut anchor = None;

        if is_memory {
            let anchor_connection = shared_driver
                .connect()
                .map_err(|anchor_fault| StoreFault::ConnectionError(format!("ANCHOR_FAULT: {}", anchor_fault)))?;
            apply_document_schema(&anchor_connection).await?;
            anchor = Some(Arc::new(anchor_connection));
            info!("⚓ [DOC_STORE]: Memory strata solidified and anchored.");
        } else {
            let bootstrap_connection = shared_driver
                .connect()
                .map_err(|bootstrap_fault| StoreFault::ConnectionError(format!("BOOTSTRAP_LINK_FAULT: {}", bootstrap_fault)))?;
            apply_document_schema(&bootstrap_connection).await?;
        }

        Ok(Self {
            internal_database_driver: shared_driver,
            _memory_persistence_anchor: anchor,
        })
    }

    fn get_connection(&self) -> Result<Connection, StoreFault> {
        self.internal_database_driver.connect().map_err(|connection_fault| {
            error!("⚠️ [DOC_STORE]: Connection allocation failed: {}", connection_fault);
            StoreFault::ConnectionError(connection_fault.to_string())
        })
    }
}

async fn apply_document_schema(connection: &Connection) -> Result<(), StoreFault> {
    connection
        .execute(
            "CREATE TABLE IF NOT EXISTS documents (
                collection   TEXT NOT NULL,
                document_id  TEXT NOT NULL,
                body         TEXT NOT NULL,
                updated_at   TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (collection, document_id)
            )",
            (),
        )
        .await
        .map_err(|schema_fault| StoreFault::ConnectionError(format!("SCHEMA_SYNC_FAULT: {}", schema_fault)))?;
    Ok(())
}

async fn fetch_document(
    connection: &Connection,
    collection: &str,
    document_id: &str,
) -> Result<Option<Value>, StoreFault> {
    let mut rows = connection
        .query(
            "SELECT body FROM documents WHERE collection = ?1 AND document_id = ?2",
            params![collection, document_id],
        )
        .await?;

    match rows.next().await? {
        Some(row) => {
            let body_text: String = row
                .get(0)
                .map_err(|mapping_fault| StoreFault::MappingError(mapping_fault.to_string()))?;
            let body: Value = serde_json::from_str(&body_text)
                .map_err(|parse_fault| StoreFault::MappingError(parse_fault.to_string()))?;
            Ok(Some(body))
        }
        None => Ok(None),
    }
}

async fn upsert_document(
    connection: &Connection,
    collection: &str,
    document_id: &str,
    body: &Value,
) -> Result<(), StoreFault> {
    let body_text = serde_json::to_string(body)
        .map_err(|serialization_fault| StoreFault::MappingError(serialization_fault.to_string()))?;
    connection
        .execute(
            "INSERT INTO documents (collection, document_id, body, updated_at)
             VALUES (?1, ?2, ?3, CURRENT_TIMESTAMP)
             ON CONFLICT(collection, document_id) DO UPDATE SET
                body = excluded.body,
                updated_at = CURRENT_TIMESTAMP",
            params![collection, document_id, body_text],
        )
        .await?;
    Ok(())
}

/// Fusión superficial de claves de primer nivel (el patch pisa al doc).
fn merge_shallow(existing_document: Option<Value>, patch: &Value) -> Value {
    let mut merged = existing_document.unwrap_or_else(|| Value::Object(Default::default()));
    if let (Some(target_map), Some(patch_map)) = (merged.as_object_mut(), patch.as_object()) {
        for (patch_key, patch_value) in patch_map {
            target_map.insert(patch_key.clone(), patch_value.clone());
        }
    }
    merged
}

#[async_trait]
impl DocumentStore for TursoDocumentStore {
    async fn get_document(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<Option<Value>, StoreFault> {
        let connection = self.get_connection()?;
        fetch_document(&connection, collection, document_id).await
    }

    async fn put_document(
        &self,
        collection: &str,
        document_id: &str,
        body: Value,
    ) -> Result<(), StoreFault> {
        let connection = self.get_connection()?;
        upsert_document(&connection, collection, document_id, &body).await
    }

    async fn merge_document(
        &self,
        collection: &str,
        document_id: &str,
        patch: Value,
    ) -> Result<(), StoreFault> {
        let connection = self.get_connection()?;
        let existing_document = fetch_document(&connection, collection, document_id).await?;
        let merged = merge_shallow(existing_document, &patch);
        upsert_document(&connection, collection, document_id, &merged).await
    }

    async fn delete_document(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<(), StoreFault> {
        let connection = self.get_connection()?;
        connection
            .execute(
                "DELETE FROM documents WHERE collection = ?1 AND document_id = ?2",
                params![collection, document_id],
            )
            .await?;
        Ok(())
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<(String, Value)>, StoreFault> {
        let connection = self.get_connection()?;
        let mut rows = connection
            .query(
                "SELECT document_id, body FROM documents WHERE collection = ?1 ORDER BY document_id",
                params![collection],
            )
            .await?;

        let mut documents = Vec::new();
        while let Some(row) = rows.next().await? {
            let document_id: String = row
                .get(0)
                .map_err(|mapping_fault| StoreFault::MappingError(mapping_fault.to_string()))?;
            let body_text: String = row
                .get(1)
                .map_err(|mapping_fault| StoreFault::MappingError(mapping_fault.to_string()))?;
            let body: Value = serde_json::from_str(&body_text)
                .map_err(|parse_fault| StoreFault::MappingError(parse_fault.to_string()))?;
            documents.push((document_id, body));
        }
        Ok(documents)
    }

    async fn query_field_equals(
        &self,
        collection: &str,
        field: &str,
        expected: &str,
    ) -> Result<Vec<(String, Value)>, StoreFault> {
        // Filtro en el dominio Rust: evita depender de json1 en el backend.
        let documents = self.list_documents(collection).await?;
        Ok(documents
            .into_iter()
            .filter(|(_, body)| {
                body.get(field).and_then(|value| value.as_str()) == Some(expected)
            })
            .collect())
    }

    async fn commit_batch(&self, operations: Vec<BatchOperation>) -> Result<(), StoreFault> {
        if operations.len() > self.batch_limit() {
            return Err(StoreFault::BatchLimitExceeded(operations.len()));
        }

        let connection = self.get_connection()?;
        connection
            .execute("BEGIN IMMEDIATE", ())
            .await
            .map_err(|begin_fault| StoreFault::TransactionError(begin_fault.to_string()))?;

        let batch_result = async {
            for operation in &operations {
                match operation {
                    BatchOperation::Put { collection, document_id, body } => {
                        upsert_document(&connection, collection, document_id, body).await?;
                    }
                    BatchOperation::Merge { collection, document_id, patch } => {
                        let existing_document =
                            fetch_document(&connection, collection, document_id).await?;
                        let merged = merge_shallow(existing_document, patch);
                        upsert_document(&connection, collection, document_id, &merged).await?;
                    }
                    BatchOperation::Delete { collection, document_id } => {
                        connection
                            .execute(
                                "DELETE FROM documents WHERE collection = ?1 AND document_id = ?2",
                                params![collection.as_str(), document_id.as_str()],
                            )
                            .await?;
                    }
                }
            }
            Ok::<(), StoreFault>(())
        }
        .await;

        match batch_result {
            Ok(()) => {
                connection
                    .execute("COMMIT", ())
                    .await
                    .map_err(|commit_fault| StoreFault::TransactionError(commit_fault.to_string()))?;
                Ok(())
            }
            Err(batch_fault) => {
                let _ = connection.execute("ROLLBACK", ()).await;
                Err(batch_fault)
            }
        }
    }

    fn batch_limit(&self) -> usize {
        TURSO_BATCH_LIMIT
    }
}
