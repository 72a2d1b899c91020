// [apps/custodian/src/bootstrap.rs]
/*!
 * =================================================================
 * APARATO: POST-IGNITION INTEGRITY SWEEP (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: APPLICATION SHELL (ESTRATO L3)
 * RESPONSABILIDAD: BARRIDO DE INTEGRIDAD DE TODOS LOS SILOS AL ARRANQUE
 *
 * Un silo inválido al arranque NO aborta la ignición: el servicio debe
 * poder servir la vista de integridad y el lockdown a los operadores.
 * La escalada queda trazada con severidad crítica.
 * =================================================================
 */

use tracing::{error, info, instrument};

use crate::state::AppState;

/// Desenlace del barrido de arranque.
#[derive(Debug, Clone)]
pub struct BootstrapSweepReport {
    pub tenants_checked: u64,
    pub tenants_valid: u64,
    pub tenants_broken: Vec<String>,
}

#[instrument(skip(application_state))]
pub fn perform_integrity_sweep(application_state: &AppState) -> BootstrapSweepReport {
    let tenant_identifiers = application_state
        .chain_store
        .list_tenants()
        .unwrap_or_default();

    let mut tenants_valid: u64 = 0;
    let mut tenants_broken = Vec::new();

    for tenant_id in &tenant_identifiers {
        match application_state.chain_store.verify(tenant_id) {
            Ok(report) if report.valid => tenants_valid += 1,
            Ok(report) => {
                error!(
                    "💀 [BOOTSTRAP]: Silo [{}] FAILED integrity at startup: {}. Manual recovery required.",
                    tenant_id,
                    report.break_detail.unwrap_or_default()
                );
                tenants_broken.push(tenant_id.clone());
            }
            Err(verify_fault) => {
                error!(
                    "💀 [BOOTSTRAP]: Silo [{}] unverifiable at startup: {}.",
                    tenant_id, verify_fault
                );
                tenants_broken.push(tenant_id.clone());
            }
        }
    }

    info!(
        "🛡️ [BOOTSTRAP]: Integrity sweep complete. {}/{} silos valid.",
        tenants_valid,
        tenant_identifiers.len()
    );

    BootstrapSweepReport {
        tenants_checked: tenant_identifiers.len() as u64,
        tenants_valid,
        tenants_broken,
    }
}
