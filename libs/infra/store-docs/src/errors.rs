// [libs/infra/store-docs/src/errors.rs]
/*!
 * =================================================================
 * APARATO: STORE ERROR CATALOG (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: CATALOGACIÓN SEMÁNTICA DE FALLOS DEL ALMACÉN REMOTO
 * =================================================================
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreFault {
    /// Error de enlace físico o de red con el backend documental.
    #[error("[L3_STORE_FAULT]: DOCUMENT_UPLINK_SEVERED -> {0}")]
    ConnectionError(String),

    /// Fallo en la configuración del entorno (URL o token ausentes).
    #[error("[L3_STORE_FAULT]: STRATEGIC_ENV_VOID -> {0}")]
    ConfigurationError(String),

    /// Error de sintaxis o ejecución devuelto por el motor libSQL.
    #[error("[L3_STORE_FAULT]: DOCUMENT_QUERY_REJECTED -> {0}")]
    QueryError(#[from] libsql::Error),

    /// Fallo de transformación entre el documento y el dominio Rust.
    #[error("[L3_STORE_FAULT]: DOCUMENT_MAPPING_VIOLATION -> {0}")]
    MappingError(String),

    /// El lote excede el límite documentado del backend.
    #[error("[L3_STORE_FAULT]: BATCH_LIMIT_EXCEEDED -> {0}")]
    BatchLimitExceeded(usize),

    /// Colapso al comprometer una secuencia multi-documento.
    #[error("[L3_STORE_FAULT]: BATCH_COMMIT_COLLAPSE -> {0}")]
    TransactionError(String),
}
