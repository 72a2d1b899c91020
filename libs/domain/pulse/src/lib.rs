// [libs/domain/pulse/src/lib.rs]
/*!
 * =================================================================
 * APARATO: UPTIME PULSE DRIVER (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: LATIDO PERIÓDICO Y DETECCIÓN DE HUECOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. HANDLE OVER GLOBALS: El estado de latido vive en un struct de
 *    identidad de proceso forjado al arranque y en un archivo de
 *    estado tmp+rename, jamás en mutables a nivel de módulo.
 * 2. GAP HEURISTIC: Hueco si y solo si (a) la identidad del proceso
 *    cambió, (b) el silencio supera 2x el periodo configurado, o
 *    (c) el estado registrado falta. El umbral es sintonizable.
 * 3. RECOVERY BEFORE PULSE: Ante un hueco, cada tenant recibe primero
 *    el eslabón SYSTEM_RECOVERY forense y después el PULSE; ambos
 *    portan la secuencia process-wide monótona.
 * =================================================================
 */

pub mod driver;
pub mod identity;
pub mod state;

pub use driver::{PulseDriver, PulseRoundReport};
pub use identity::ProcessIdentity;
pub use state::{PulseState, PulseStateFile};
