// [libs/infra/store-docs/src/memory.rs]
/*!
 * =================================================================
 * APARATO: IN-MEMORY STORE DOUBLE (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: DOBLE DETERMINISTA PARA EL PROVING GROUNDS
 *
 * El doble honra el mismo contrato de atomicidad de lote que el driver
 * real: el lote completo se aplica bajo un solo candado o se descarta.
 * =================================================================
 */

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

use crate::errors::StoreFault;
use crate::interface::{BatchOperation, DocumentStore};

const MEMORY_BATCH_LIMIT: usize = 500;

type CollectionMap = BTreeMap<String, BTreeMap<String, Value>>;

#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<CollectionMap>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn merge_shallow(existing_document: Option<&Value>, patch: &Value) -> Value {
    let mut merged = existing_document
        .cloned()
        .unwrap_or_else(|| Value::Object(Default::default()));
    if let (Some(target_map), Some(patch_map)) = (merged.as_object_mut(), patch.as_object()) {
        for (patch_key, patch_value) in patch_map {
            target_map.insert(patch_key.clone(), patch_value.clone());
        }
    }
    merged
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get_document(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<Option<Value>, StoreFault> {
        let collections = self.collections.lock().await;
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.get(document_id))
            .cloned())
    }

    async fn put_document(
        &self,
        collection: &str,
        document_id: &str,
        body: Value,
    ) -> Result<(), StoreFault> {
        let mut collections = self.collections.lock().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(document_id.to_string(), body);
        Ok(())
    }

    async fn merge_document(
        &self,
        collection: &str,
        document_id: &str,
        patch: Value,
    ) -> Result<(), StoreFault> {
        let mut collections = self.collections.lock().await;
        let documents = collections.entry(collection.to_string()).or_default();
        let merged = merge_shallow(documents.get(document_id), &patch);
        documents.insert(document_id.to_string(), merged);
        Ok(())
    }

    async fn delete_document(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<(), StoreFault> {
        let mut collections = self.collections.lock().await;
        if let Some(documents) = collections.get_mut(collection) {
            documents.remove(document_id);
        }
        Ok(())
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<(String, Value)>, StoreFault> {
        let collections = self.collections.lock().await;
        Ok(collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .map(|(document_id, body)| (document_id.clone(), body.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn query_field_equals(
        &self,
        collection: &str,
        field: &str,
        expected: &str,
    ) -> Result<Vec<(String, Value)>, StoreFault> {
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

        // Un solo candado: el lote es atómico frente a todo lector.
        let mut collections = self.collections.lock().await;
        for operation in operations {
            match operation {
                BatchOperation::Put { collection, document_id, body } => {
                    collections
                        .entry(collection)
                        .or_default()
                        .insert(document_id, body);
                }
                BatchOperation::Merge { collection, document_id, patch } => {
                    let documents = collections.entry(collection).or_default();
                    let merged = merge_shallow(documents.get(&document_id), &patch);
                    documents.insert(document_id, merged);
                }
                BatchOperation::Delete { collection, document_id } => {
                    if let Some(documents) = collections.get_mut(&collection) {
                        documents.remove(&document_id);
                    }
                }
            }
        }
        Ok(())
    }

    fn batch_limit(&self) -> usize {
        MEMORY_BATCH_LIMIT
    }
}
