use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let google_maps_api_key = lookup("GOOGLE_MAPS_API_KEY").ok().filter(|k| !k.is_empty());

    let bind_addr = parse_addr("WAITPOINT_BIND_ADDR", "0.0.0.0:3001")?;
    let log_level = or_default("WAITPOINT_LOG_LEVEL", "info");
    let cache_ttl_secs = parse_u64("WAITPOINT_CACHE_TTL_SECS", "7200")?;
    let result_cap = parse_usize("WAITPOINT_RESULT_CAP", "50")?;
    let request_timeout_secs = parse_u64("WAITPOINT_REQUEST_TIMEOUT_SECS", "10")?;
    let enrich_concurrency = parse_usize("WAITPOINT_ENRICH_CONCURRENCY", "8")?;

    if result_cap == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "WAITPOINT_RESULT_CAP".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    if enrich_concurrency == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "WAITPOINT_ENRICH_CONCURRENCY".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        google_maps_api_key,
        bind_addr,
        log_level,
        cache_ttl_secs,
        result_cap,
        request_timeout_secs,
        enrich_concurrency,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
