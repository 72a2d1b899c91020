// [libs/core/chain-ledger/src/lib.rs]
/*!
 * =================================================================
 * APARATO: SOVEREIGN CHAIN LEDGER (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: CORE ENGINE (ESTRATO L1)
 * RESPONSABILIDAD: CADENA APPEND-ONLY, VERIFICACIÓN Y ROTACIÓN
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. SINGLE WRITER DISCIPLINE: El silo es propiedad exclusiva del
 *    proceso; un RwLock por tenant serializa append, rotación y
 *    trituración contra los lectores de instantánea.
 * 2. DURABILITY CONTRACT: Toda línea es O_APPEND + fsync antes de ser
 *    visible; o la línea terminada en '\n' existe completa, o no existe.
 * 3. CANONICAL HASHING: Un solo codificador canónico sirve al hash de
 *    eslabón, a la firma de testigo y al hash de evento de suspensión.
 * =================================================================
 */

pub mod canonical;
pub mod errors;
pub mod rotation;
pub mod store;
pub mod tombstone;
pub mod verify;

pub use canonical::{canonical_json_string, compute_entry_hash};
pub use errors::ChainFault;
pub use store::{AppendOutcome, ChainStore};
pub use tombstone::TombstoneRegistry;
