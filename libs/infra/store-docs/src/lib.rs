// [libs/infra/store-docs/src/lib.rs]
/*!
 * =================================================================
 * APARATO: REMOTE DOCUMENT STORE GATEWAY (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: PUERTA ÚNICA HACIA EL ALMACÉN DOCUMENTAL REMOTO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. PLUGGABLE SEAM: El dominio habla con 'dyn DocumentStore'; el
 *    driver real (Turso) y el doble en memoria son intercambiables
 *    sin tocar los motores de testigo, suspensión o éxodo.
 * 2. ATOMIC BATCH CONTRACT: El motor asume commits por lote atómicos
 *    y lecturas monótonas para la ruta de anclas; el driver los provee
 *    mediante transacciones del backend.
 * =================================================================
 */

pub mod errors;
pub mod interface;
pub mod memory;
pub mod turso;

pub use errors::StoreFault;
pub use interface::{collections, BatchOperation, DocumentStore};
pub use memory::MemoryDocumentStore;
pub use turso::TursoDocumentStore;
