// [libs/domain/governance/src/lib.rs]
/*!
 * =================================================================
 * APARATO: GOVERNANCE STRATA (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: RE-AUTORIZACIÓN RAIO Y SUSPENSIÓN DE EMERGENCIA
 * =================================================================
 */

pub mod ledger;
pub mod suspension;

pub use ledger::GovernanceDesk;
pub use suspension::SuspensionEngine;

/// Ventana de vigencia del check-in RAIO en días.
pub const RAIO_AUTHORIZATION_WINDOW_DAYS: i64 = 30;
