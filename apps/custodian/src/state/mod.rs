// [apps/custodian/src/state/mod.rs]
/*!
 * =================================================================
 * APARATO: SOVEREIGN STATE ORCHESTRATOR (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: APPLICATION STATE (ESTRATO L1-APP)
 * RESPONSABILIDAD: ORQUESTACIÓN DE ESTRATOS Y MOTORES DEL ESCUDO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. COMPOSITION ROOT: Centraliza el rastro de los motores del Escudo
 *    (cadena, escriba, testigo, gobernanza, suspensión, éxodo) tras
 *    'Arc<T>' para inmutabilidad compartida entre ráfagas.
 * 2. STATUS CACHE: Caché caliente de estados de tenant alimentado por
 *    el almacén documental e invalidado por suspensión y éxodo; es la
 *    implementación de producción del TenantStatusProvider.
 * =================================================================
 */

pub mod status_cache;

use std::sync::Arc;

use custodia_core_chain::ChainStore;
use custodia_domain_exodus::SovereignExitEngine;
use custodia_domain_governance::{GovernanceDesk, SuspensionEngine};
use custodia_domain_logger::AuditScribe;
use custodia_domain_pulse::PulseDriver;
use custodia_domain_witness::WitnessDesk;
use custodia_infra_store::DocumentStore;

use crate::config::CustodianConfig;
pub use status_cache::StatusCache;

/**
 * Contenedor de estado compartido (Thread-Safe) del Custodio.
 * Actúa como la placa base donde se conectan todos los estratos.
 */
#[derive(Clone)]
pub struct AppState {
    /// Configuración inmutable del proceso.
    pub configuration: Arc<CustodianConfig>,
    /// Autoridad única sobre el silo en disco.
    pub chain_store: Arc<ChainStore>,
    /// Fachada única de escritura de eslabones.
    pub scribe: Arc<AuditScribe>,
    /// Mesa de testigo remoto (anclaje + verificación).
    pub witness_desk: Arc<WitnessDesk>,
    /// Mesa de gobernanza RAIO.
    pub governance_desk: Arc<GovernanceDesk>,
    /// Motor de suspensión glass-break.
    pub suspension_engine: Arc<SuspensionEngine>,
    /// Motor del éxodo soberano.
    pub exit_engine: Arc<SovereignExitEngine>,
    /// Puerta al almacén documental remoto.
    pub document_store: Arc<dyn DocumentStore>,
    /// Caché caliente de estados de tenant.
    pub status_cache: Arc<StatusCache>,
    /// Conductor del latido de disponibilidad.
    pub pulse_driver: Arc<PulseDriver>,
}
