use std::env::VarError;
use std::net::SocketAddr;

use crate::app_config::{AppConfig, Environment, SearchConfig};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
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
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Load only the variables a search run reads, after loading `.env`.
///
/// # Errors
///
/// Returns `ConfigError` if one of those variables is present but invalid.
/// Server-only variables are never read.
pub fn load_search_config() -> Result<SearchConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_search_config(&|key: &str| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can feed a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let env = parse_environment(&or_default(&lookup, "PLACESCAN_ENV", "development"))?;

    let bind_addr = or_default(&lookup, "PLACESCAN_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("PLACESCAN_BIND_ADDR", e.to_string()))?;
    let export_cache_size = parse_nonzero_usize(&lookup, "PLACESCAN_EXPORT_CACHE_SIZE", "16")?;

    let SearchConfig {
        log_level,
        google_api_key,
        places_base_url,
        request_timeout_secs,
        user_agent,
        page_delay_ms,
        max_pages,
    } = build_search_config(&lookup)?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        google_api_key,
        places_base_url,
        request_timeout_secs,
        user_agent,
        page_delay_ms,
        max_pages,
        export_cache_size,
    })
}

fn build_search_config<F>(lookup: &F) -> Result<SearchConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let log_level = or_default(lookup, "PLACESCAN_LOG_LEVEL", "info");

    // An empty key in `.env` means "not configured", not "use the empty key".
    let google_api_key = lookup("GOOGLE_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
    let places_base_url = or_default(
        lookup,
        "PLACESCAN_PLACES_BASE_URL",
        "https://maps.googleapis.com",
    );

    let request_timeout_secs = parse_u64(lookup, "PLACESCAN_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default(lookup, "PLACESCAN_USER_AGENT", "placescan/0.1 (places-export)");
    let page_delay_ms = parse_u64(lookup, "PLACESCAN_PAGE_DELAY_MS", "2000")?;
    let max_pages = parse_nonzero_usize(lookup, "PLACESCAN_MAX_PAGES", "3")?;

    Ok(SearchConfig {
        log_level,
        google_api_key,
        places_base_url,
        request_timeout_secs,
        user_agent,
        page_delay_ms,
        max_pages,
    })
}

fn or_default<F>(lookup: &F, var: &str, default: &str) -> String
where
    F: Fn(&str) -> Result<String, VarError>,
{
    lookup(var).unwrap_or_else(|_| default.to_string())
}

fn invalid(var: &str, reason: String) -> ConfigError {
    ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    }
}

fn parse_u64<F>(lookup: &F, var: &str, default: &str) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    or_default(lookup, var, default)
        .parse::<u64>()
        .map_err(|e| invalid(var, e.to_string()))
}

fn parse_nonzero_usize<F>(lookup: &F, var: &str, default: &str) -> Result<usize, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let value = or_default(lookup, var, default)
        .parse::<usize>()
        .map_err(|e| invalid(var, e.to_string()))?;
    if value == 0 {
        return Err(invalid(var, "must be at least 1".to_string()));
    }
    Ok(value)
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PLACESCAN_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
