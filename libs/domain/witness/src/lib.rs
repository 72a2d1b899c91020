// [libs/domain/witness/src/lib.rs]
/*!
 * =================================================================
 * APARATO: REMOTE WITNESS SUBSYSTEM (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: ANCLAJE PERIÓDICO Y VERIFICACIÓN CONTRA TESTIGO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. EXTERNAL COMMITMENT: Una vez por día (más el latido horario
 *    opcional) la cabeza de cada silo se compromete firmada en el
 *    almacén remoto; reescribir la historia local delata la divergencia.
 * 2. KEY-ID OVERLAP: Cada ancla porta el identificador público de la
 *    llave de testigo vigente, manteniendo atribuibles las firmas
 *    antiguas durante las ventanas de rotación de llave de servidor.
 * =================================================================
 */

pub mod anchors;
pub mod signer;

pub use anchors::WitnessDesk;
pub use signer::WitnessSigner;
