use crate::app_config::{AppConfig, Channel};
use crate::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://www.rightmove.co.uk";
pub const DEFAULT_TYPEAHEAD_REGION: &str = "uknostreet";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

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
/// Unlike [`load_app_config`], this does NOT load `.env` files; useful for testing
/// or when the caller manages env setup.
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
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_optional_u64 = |var: &str| -> Result<Option<u64>, ConfigError> {
        match lookup(var) {
            Ok(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<u64>()
                .map(Some)
                .map_err(|e| invalid(var, e.to_string())),
            _ => Ok(None),
        }
    };

    let log_level = or_default("RENTSCAN_LOG_LEVEL", "info");

    let base_url = or_default("RENTSCAN_BASE_URL", DEFAULT_BASE_URL)
        .trim_end_matches('/')
        .to_string();
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(invalid(
            "RENTSCAN_BASE_URL",
            format!("\"{base_url}\" is not an http(s) URL"),
        ));
    }

    let typeahead_region = or_default("RENTSCAN_TYPEAHEAD_REGION", DEFAULT_TYPEAHEAD_REGION);
    let channel = or_default("RENTSCAN_CHANNEL", "RENT")
        .parse::<Channel>()
        .map_err(|reason| invalid("RENTSCAN_CHANNEL", reason))?;

    let max_results = parse_usize("RENTSCAN_MAX_RESULTS", "1000")?;
    let request_timeout_secs = parse_u64("RENTSCAN_REQUEST_TIMEOUT_SECS", "30")?;
    let batch_timeout_secs = parse_optional_u64("RENTSCAN_BATCH_TIMEOUT_SECS")?;

    let max_concurrent_requests = parse_optional_u64("RENTSCAN_MAX_CONCURRENT_REQUESTS")?
        .map(usize::try_from)
        .transpose()
        .map_err(|e| invalid("RENTSCAN_MAX_CONCURRENT_REQUESTS", e.to_string()))?;
    if max_concurrent_requests == Some(0) {
        return Err(invalid(
            "RENTSCAN_MAX_CONCURRENT_REQUESTS",
            "must be at least 1 (unset it for no limit)".to_string(),
        ));
    }

    let user_agent = or_default("RENTSCAN_USER_AGENT", DEFAULT_USER_AGENT);

    Ok(AppConfig {
        log_level,
        base_url,
        typeahead_region,
        channel,
        max_results,
        request_timeout_secs,
        batch_timeout_secs,
        max_concurrent_requests,
        user_agent,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
