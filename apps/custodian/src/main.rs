// [apps/custodian/src/main.rs]
/*!
 * =================================================================
 * APARATO: CUSTODIAN MAIN ENTRY POINT (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: APPLICATION SHELL (ESTRATO L3)
 * RESPONSABILIDAD: BOOTSTRAP DE INFRAESTRUCTURA E IGNICIÓN SEGURA
 *
 * # Mathematical Proof (Deterministic Ignition):
 * El proceso garantiza que la observabilidad Heimdall y la captura del
 * entorno ocurran antes que cualquier E/S del silo, de modo que todo
 * fallo de arranque quede trazado y atribuible.
 * =================================================================
 */

use custodia_custodian::prelude::*;

use custodia_shared_heimdall::init_tracing;
use dotenvy::dotenv;
use tracing::{error, info};

/**
 * Punto de ignición supremo del binario del Custodio.
 */
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. CARGA DE ENTORNO SOBERANO
    dotenv().ok();

    // 2. INICIALIZACIÓN DE OBSERVABILIDAD NEURAL (HEIMDALL)
    init_tracing("custodia_custodian");

    // 3. CAPTURA TIPADA DEL ENTORNO
    let configuration = match CustodianConfig::load_from_environment() {
        Ok(configuration) => configuration,
        Err(missing_variable) => {
            error!(
                "🔥 [IGNITION_ABORT]: Non-negotiable secret absent: {}.",
                missing_variable
            );
            return Err(format!("missing environment variable: {}", missing_variable).into());
        }
    };

    // 4. RUNTIME SOBERANO
    let runtime_custodian = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime_custodian.block_on(async {
        info!("🛰️  [COMMAND_CENTER]: Audit Shield global ignition sequence starting...");

        let kernel_instance = CustodianKernel::ignite(configuration).await?;
        kernel_instance.serve().await
    })?;

    Ok(())
}
