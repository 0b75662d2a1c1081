use std::{env::VarError, net::SocketAddr};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Clone)]
pub struct AppConfig {
    pub app_name: String,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub gemini_api_key: Option<String>,
    pub gemini_host: String,
    pub gemini_model: String,
    pub gemini_timeout_secs: u64,
    pub default_location: String,
    pub default_radius_km: u32,
    pub default_max_results: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("app_name", &self.app_name)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("gemini_host", &self.gemini_host)
            .field("gemini_model", &self.gemini_model)
            .field("gemini_timeout_secs", &self.gemini_timeout_secs)
            .field("default_location", &self.default_location)
            .field("default_radius_km", &self.default_radius_km)
            .field("default_max_results", &self.default_max_results)
            .finish()
    }
}

impl AppConfig {
    /// Loads `.env` (if any) and then reads the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key))
    }

    /// Builds the config from an arbitrary env-var lookup so tests can feed a
    /// plain map instead of mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let or_default = |var: &str, default: &str| -> String {
            lookup(var).unwrap_or_else(|_| default.to_string())
        };

        let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason,
        };

        let parse_positive_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
            match or_default(var, default).trim().parse::<u32>() {
                Ok(0) => Err(invalid(var, "must be greater than zero".to_string())),
                Ok(v) => Ok(v),
                Err(e) => Err(invalid(var, e.to_string())),
            }
        };

        let parse_positive_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
            match or_default(var, default).trim().parse::<u64>() {
                Ok(0) => Err(invalid(var, "must be greater than zero".to_string())),
                Ok(v) => Ok(v),
                Err(e) => Err(invalid(var, e.to_string())),
            }
        };

        let bind_addr = or_default("BIND_ADDR", "0.0.0.0:3000")
            .parse::<SocketAddr>()
            .map_err(|e| invalid("BIND_ADDR", e.to_string()))?;

        let gemini_api_key = lookup("GEMINI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Ok(AppConfig {
            app_name: or_default("APP_NAME", "Nearby Stays Finder"),
            bind_addr,
            log_level: or_default("LOG_LEVEL", "info"),
            gemini_api_key,
            gemini_host: or_default("GEMINI_HOST", "https://generativelanguage.googleapis.com")
                .trim_end_matches('/')
                .to_string(),
            gemini_model: or_default("GEMINI_MODEL", "gemini-2.5-flash"),
            gemini_timeout_secs: parse_positive_u64("GEMINI_TIMEOUT_SECS", "30")?,
            default_location: or_default("DEFAULT_LOCATION", "New York"),
            default_radius_km: parse_positive_u32("DEFAULT_RADIUS", "10")?,
            default_max_results: parse_positive_u32("DEFAULT_MAX_RESULTS", "8")?,
        })
    }
}
