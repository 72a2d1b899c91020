// [libs/domain/models-rs/src/tenant.rs]
/*!
 * =================================================================
 * APARATO: TENANT LIFECYCLE CONTRACT (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: ESTADOS DEL CICLO DE VIDA DEL TENANT GUBERNAMENTAL
 * =================================================================
 */

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

/// Estados del ciclo de vida de un tenant. 'Destroyed' es terminal:
/// una vez en la lápida, ningún silo ni llave puede renacer bajo su id.
#[typeshare]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TenantStatus {
    Active,
    Provisioning,
    Suspended,
    Destroyed,
}

impl TenantStatus {
    /// Cadena estable persistida en los documentos govTenants/tenants.
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantStatus::Active => "active",
            TenantStatus::Provisioning => "provisioning",
            TenantStatus::Suspended => "suspended",
            TenantStatus::Destroyed => "destroyed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "active" => Some(TenantStatus::Active),
            "provisioning" => Some(TenantStatus::Provisioning),
            "suspended" => Some(TenantStatus::Suspended),
            "destroyed" => Some(TenantStatus::Destroyed),
            _ => None,
        }
    }
}
