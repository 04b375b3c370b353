use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "clinic-api";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

const ENV_HOST: &str = "CLINIC_HOST";
const ENV_PORT: &str = "CLINIC_PORT";
const ENV_DATABASE_PATH: &str = "CLINIC_DATABASE_PATH";
const ENV_LOG: &str = "CLINIC_LOG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
    #[error("Cannot determine home directory; set {ENV_DATABASE_PATH}")]
    NoHomeDir,
}

/// Get the application data directory
/// ~/ClinicApi/ on all platforms
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("ClinicApi"))
}

/// Default `tracing` filter when neither `RUST_LOG` nor `CLINIC_LOG` is set.
pub fn default_log_filter() -> &'static str {
    "clinic_api=info,tower_http=info"
}

/// Runtime settings, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database_path: PathBuf,
    pub log_filter: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unset and blank values
    /// fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = match get(ENV_HOST) {
            Some(value) => value.trim().parse::<IpAddr>().map_err(|e| {
                ConfigError::InvalidValue {
                    var: ENV_HOST,
                    value,
                    reason: e.to_string(),
                }
            })?,
            None => DEFAULT_HOST,
        };

        let port = match get(ENV_PORT) {
            Some(value) => value.trim().parse::<u16>().map_err(|e| {
                ConfigError::InvalidValue {
                    var: ENV_PORT,
                    value,
                    reason: e.to_string(),
                }
            })?,
            None => DEFAULT_PORT,
        };

        let database_path = match get(ENV_DATABASE_PATH) {
            Some(value) => PathBuf::from(value),
            None => app_data_dir().ok_or(ConfigError::NoHomeDir)?.join("clinic.db"),
        };

        let log_filter = get(ENV_LOG).unwrap_or_else(|| default_log_filter().to_string());

        Ok(Self {
            host,
            port,
            database_path,
            log_filter,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
