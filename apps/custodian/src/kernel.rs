// [apps/custodian/src/kernel.rs]
/*!
 * =================================================================
 * APARATO: CUSTODIAN KERNEL (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: APPLICATION SHELL (ESTRATO L3)
 * RESPONSABILIDAD: SINAPSIS COMPLETA DE MOTORES E IGNICIÓN DE RED
 *
 * # Mathematical Proof (Deterministic Ignition):
 * El Kernel garantiza que el almacén documental, el caché de estados y
 * el barrido de integridad estén cristalizados ANTES de abrir el socket
 * TCP, previniendo que un colaborador observe estado a medio hidratar.
 * =================================================================
 */

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use custodia_core_chain::ChainStore;
use custodia_domain_exodus::SovereignExitEngine;
use custodia_domain_governance::{GovernanceDesk, SuspensionEngine};
use custodia_domain_logger::AuditScribe;
use custodia_domain_pulse::{ProcessIdentity, PulseDriver, PulseStateFile};
use custodia_domain_witness::{WitnessDesk, WitnessSigner};
use custodia_infra_store::{DocumentStore, TursoDocumentStore};

use crate::bootstrap::perform_integrity_sweep;
use crate::config::CustodianConfig;
use crate::routes::create_sovereign_router;
use crate::services::pulse_daemon::spawn_pulse_daemon;
use crate::services::witness_heartbeat::spawn_witness_heartbeat;
use crate::state::{AppState, StatusCache};

/// Núcleo de mando del proceso custodio.
pub struct CustodianKernel {
    pub application_shared_state: AppState,
}

impl CustodianKernel {
    /**
     * Construye la sinapsis completa de motores del Escudo.
     */
    pub async fn ignite(configuration: CustodianConfig) -> anyhow::Result<Self> {
        info!("🛰️  [KERNEL]: Audit Shield ignition sequence starting...");

        let document_store: Arc<dyn DocumentStore> = Arc::new(
            TursoDocumentStore::connect(
                &configuration.database_url,
                configuration.database_auth_token.clone(),
            )
            .await
            .context("document store uplink failed")?,
        );

        let chain_store = Arc::new(ChainStore::new(
            configuration.audit_root.clone(),
            configuration.keys_root.clone(),
        ));

        let witness_signer = WitnessSigner::new(configuration.witness_hmac_key.as_bytes());

        let status_cache = Arc::new(StatusCache::new());
        status_cache.hydrate(&document_store).await;

        let scribe = Arc::new(AuditScribe::new(chain_store.clone(), status_cache.clone()));

        let witness_desk = Arc::new(WitnessDesk::new(
            chain_store.clone(),
            document_store.clone(),
            witness_signer.clone(),
        ));

        let governance_desk = Arc::new(GovernanceDesk::new(chain_store.clone(), scribe.clone()));

        let suspension_engine = Arc::new(SuspensionEngine::new(
            chain_store.clone(),
            scribe.clone(),
            document_store.clone(),
        ));

        let exit_engine = Arc::new(SovereignExitEngine::new(
            chain_store.clone(),
            document_store.clone(),
            witness_signer,
        ));

        let pulse_driver = Arc::new(PulseDriver::new(
            scribe.clone(),
            PulseStateFile::new(configuration.audit_root.join("pulse_state.json")),
            ProcessIdentity::forge(),
            configuration.pulse_interval,
        ));

        let application_shared_state = AppState {
            configuration: Arc::new(configuration),
            chain_store,
            scribe,
            witness_desk,
            governance_desk,
            suspension_engine,
            exit_engine,
            document_store,
            status_cache,
            pulse_driver,
        };

        // Barrido de integridad pre-socket: los silos rotos quedan
        // escalados antes de servir la primera ráfaga.
        let sweep_report = perform_integrity_sweep(&application_shared_state);
        if !sweep_report.tenants_broken.is_empty() {
            info!(
                "🚨 [KERNEL]: {} silos in lockdown at ignition.",
                sweep_report.tenants_broken.len()
            );
        }

        Ok(Self { application_shared_state })
    }

    /**
     * Enciende daemons y sirve la matriz de rutas.
     */
    pub async fn serve(self) -> anyhow::Result<()> {
        let state = self.application_shared_state;

        spawn_pulse_daemon(
            state.pulse_driver.clone(),
            state.configuration.pulse_interval,
        );
        spawn_witness_heartbeat(
            state.witness_desk.clone(),
            state.configuration.anchor_sweep_budget,
        );

        let listening_port = state.configuration.listening_port;
        let sovereign_router = create_sovereign_router(state);

        let network_listener =
            tokio::net::TcpListener::bind(("0.0.0.0", listening_port))
                .await
                .context("TCP socket binding failed")?;

        info!("🛡️ [KERNEL]: Audit Shield serving on port {}.", listening_port);
        axum::serve(network_listener, sovereign_router)
            .await
            .context("axum serve collapsed")?;
        Ok(())
    }
}
