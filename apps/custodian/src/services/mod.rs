// [apps/custodian/src/services/mod.rs]
/*!
 * =================================================================
 * APARATO: BACKGROUND SERVICES ROOT (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: APPLICATION SERVICES (ESTRATO L3)
 * RESPONSABILIDAD: DAEMONS DE FONDO DEL ESCUDO
 * =================================================================
 */

pub mod pulse_daemon;
pub mod witness_heartbeat;
