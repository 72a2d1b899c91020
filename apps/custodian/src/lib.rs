// [apps/custodian/src/lib.rs]
/*!
 * =================================================================
 * APARATO: CUSTODIAN LIBRARY ROOT (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: CRATE ROOT (ESTRATO L3)
 * RESPONSABILIDAD: DEFINICIÓN SUPREMA DEL ÁRBOL DE MÓDULOS
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. MODULE HIERARCHY HARDENING: Autoridad única de módulos para que
 *    'crate::' resuelva determinista en librería y binario.
 * 2. PUBLIC INTERFACE: Expone 'prelude' para la ignición del Kernel
 *    desde 'main.rs' y desde el Proving Grounds.
 * =================================================================
 */

// --- ESTRATO DE INFRAESTRUCTURA Y ARRANQUE ---
/// Barrido de integridad post-despliegue e hidratación de estado.
pub mod bootstrap;
/// Captura tipada del entorno soberano.
pub mod config;
/// Núcleo de mando para la ignición de servicios.
pub mod kernel;

// --- ESTRATO DE DATOS Y ESTADO (L1-APP) ---
/// Gestor del sistema nervioso central del custodio.
pub mod state;

// --- ESTRATO DE TRANSPORTE Y ACCIÓN ---
/// Adaptadores de entrada para ráfagas HTTP.
pub mod handlers;
/// El túnel de mando: definición de rutas y topología de red.
pub mod routes;

// --- ESTRATO DE SEGURIDAD Y SOPORTE ---
/// Guardianes perimetrales (secreto cron).
pub mod middleware;
/// Daemons de fondo: latido de disponibilidad y testigo horario.
pub mod services;

/**
 * PRELUDIO DEL CUSTODIO
 *
 * Re-exportación estratégica de los componentes de ignición mínima.
 */
pub mod prelude {
    pub use crate::config::CustodianConfig;
    pub use crate::kernel::CustodianKernel;
    pub use crate::state::AppState;
}
