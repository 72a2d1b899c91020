// [apps/custodian/src/config.rs]
/*!
 * =================================================================
 * APARATO: SOVEREIGN ENVIRONMENT CAPTURE (V12.0 - GENESIS SEAL)
 * CLASIFICACIÓN: APPLICATION SHELL (ESTRATO L3)
 * RESPONSABILIDAD: CAPTURA TIPADA DEL ENTORNO DEL CUSTODIO
 *
 * VISION HIPER-HOLÍSTICA 2026:
 * 1. FAIL FAST ON SECRETS: WITNESS_HMAC_KEY es innegociable; sin él no
 *    hay firmas de testigo ni lápidas y la ignición aborta.
 * 2. DEV-MODE CRON: CRON_SECRET ausente habilita explícitamente el
 *    modo desarrollo con advertencia trazada; producción DEBE sellarlo.
 * =================================================================
 */

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

/// Cota superior del periodo de latido (contrato: ≤ 10 minutos).
const MAXIMUM_PULSE_INTERVAL_SECONDS: u64 = 600;

/// Configuración inmutable del proceso custodio.
#[derive(Debug, Clone)]
pub struct CustodianConfig {
    /// Raíz del silo de auditoría (`<cwd>/data/audit` por defecto).
    pub audit_root: PathBuf,
    /// Raíz de llaves de tenant (`<cwd>/data/keys` por defecto).
    pub keys_root: PathBuf,
    /// Secreto de los disparadores cron; None = modo desarrollo.
    pub cron_secret: Option<String>,
    /// Llave HMAC del testigo y firmante de lápidas. Obligatoria.
    pub witness_hmac_key: String,
    /// URL del almacén documental (libSQL local o Turso remoto).
    pub database_url: String,
    /// Token de acceso del almacén remoto, si aplica.
    pub database_auth_token: Option<String>,
    /// Periodo del latido de disponibilidad.
    pub pulse_interval: Duration,
    /// Presupuesto de reloj del barrido de anclaje.
    pub anchor_sweep_budget: Duration,
    /// Puerto TCP de escucha.
    pub listening_port: u16,
}

impl CustodianConfig {
    /**
     * Captura el entorno del proceso.
     *
     * # Errors:
     * Devuelve el nombre de la variable ausente cuando un secreto
     * innegociable no está definido.
     */
    pub fn load_from_environment() -> Result<Self, String> {
        let witness_hmac_key = std::env::var("WITNESS_HMAC_KEY")
            .map_err(|_| "WITNESS_HMAC_KEY".to_string())?;

        let cron_secret = std::env::var("CRON_SECRET").ok().filter(|secret| !secret.is_empty());
        if cron_secret.is_none() {
            warn!("⚠️ [CONFIG]: CRON_SECRET unset. Cron endpoints run in DEVELOPMENT mode (unauthenticated).");
        }

        let working_directory = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        let audit_root = std::env::var("AUDIT_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| working_directory.join("data").join("audit"));
        let keys_root = std::env::var("KEYS_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| working_directory.join("data").join("keys"));

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "file:./data/custodia_store.db".to_string());
        let database_auth_token = std::env::var("DATABASE_AUTH_TOKEN").ok();

        let pulse_interval_seconds = std::env::var("PULSE_INTERVAL_SECONDS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(300)
            .min(MAXIMUM_PULSE_INTERVAL_SECONDS);

        let anchor_sweep_budget_seconds = std::env::var("ANCHOR_SWEEP_BUDGET_SECONDS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(300);

        let listening_port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(3000);

        Ok(Self {
            audit_root,
            keys_root,
            cron_secret,
            witness_hmac_key,
            database_url,
            database_auth_token,
            pulse_interval: Duration::from_secs(pulse_interval_seconds),
            anchor_sweep_budget: Duration::from_secs(anchor_sweep_budget_seconds),
            listening_port,
        })
    }
}
