use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
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

    let suppliers_path = PathBuf::from(or_default(
        "SUPPLYSCAN_SUPPLIERS_PATH",
        "./config/suppliers.yaml",
    ));
    let log_level = or_default("SUPPLYSCAN_LOG_LEVEL", "info");
    let user_agent = or_default(
        "SUPPLYSCAN_USER_AGENT",
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    );

    let nav_max_attempts = parse_u32("SUPPLYSCAN_NAV_MAX_ATTEMPTS", "3")?;
    if nav_max_attempts == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SUPPLYSCAN_NAV_MAX_ATTEMPTS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let nav_timeout_secs = parse_u64("SUPPLYSCAN_NAV_TIMEOUT_SECS", "30")?;
    let nav_backoff_base_ms = parse_u64("SUPPLYSCAN_NAV_BACKOFF_BASE_MS", "1000")?;
    let readiness_timeout_ms = parse_u64("SUPPLYSCAN_READINESS_TIMEOUT_MS", "10000")?;
    let readiness_poll_ms = parse_u64("SUPPLYSCAN_READINESS_POLL_MS", "500")?;
    let scroll_max_iterations = parse_u32("SUPPLYSCAN_SCROLL_MAX_ITERATIONS", "5")?;
    let scroll_pause_ms = parse_u64("SUPPLYSCAN_SCROLL_PAUSE_MS", "1000")?;
    let politeness_delay_ms = parse_u64("SUPPLYSCAN_POLITENESS_DELAY_MS", "2000")?;
    let max_concurrent_suppliers = parse_usize("SUPPLYSCAN_MAX_CONCURRENT_SUPPLIERS", "2")?;

    Ok(AppConfig {
        suppliers_path,
        log_level,
        user_agent,
        nav_max_attempts,
        nav_timeout_secs,
        nav_backoff_base_ms,
        readiness_timeout_ms,
        readiness_poll_ms,
        scroll_max_iterations,
        scroll_pause_ms,
        politeness_delay_ms,
        max_concurrent_suppliers,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
