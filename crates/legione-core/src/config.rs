use crate::app_config::{AppConfig, Environment};
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
/// Decoupled from the real environment so tests can pass a `HashMap` lookup
/// without `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .trim()
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .trim()
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("LEGIONE_ENV", "development"))?;

    let bind_addr = or_default("LEGIONE_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("LEGIONE_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("LEGIONE_LOG_LEVEL", "info");
    let affiliate_tag = or_default("AMAZON_AFFILIATE_TAG", "").trim().to_string();

    let amazon_base_url = or_default("LEGIONE_AMAZON_BASE_URL", "https://www.amazon.it")
        .trim()
        .trim_end_matches('/')
        .to_string();
    validate_base_url(&amazon_base_url)
        .map_err(|reason| invalid("LEGIONE_AMAZON_BASE_URL", reason))?;

    let scraper_request_timeout_secs = parse_u64("LEGIONE_SCRAPER_REQUEST_TIMEOUT_SECS", "15")?;
    if scraper_request_timeout_secs == 0 {
        return Err(invalid(
            "LEGIONE_SCRAPER_REQUEST_TIMEOUT_SECS",
            "timeout must be at least 1 second".to_string(),
        ));
    }
    let scraper_max_attempts = parse_u32("LEGIONE_SCRAPER_MAX_ATTEMPTS", "9")?;
    if scraper_max_attempts == 0 {
        return Err(invalid(
            "LEGIONE_SCRAPER_MAX_ATTEMPTS",
            "at least one attempt is required".to_string(),
        ));
    }
    let scraper_backoff_base_secs = parse_u64("LEGIONE_SCRAPER_BACKOFF_BASE_SECS", "2")?;
    let scraper_jitter_min_ms = parse_u64("LEGIONE_SCRAPER_JITTER_MIN_MS", "500")?;
    let scraper_jitter_max_ms = parse_u64("LEGIONE_SCRAPER_JITTER_MAX_MS", "1500")?;
    if scraper_jitter_max_ms < scraper_jitter_min_ms {
        return Err(invalid(
            "LEGIONE_SCRAPER_JITTER_MAX_MS",
            format!("must be >= LEGIONE_SCRAPER_JITTER_MIN_MS ({scraper_jitter_min_ms})"),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        affiliate_tag,
        amazon_base_url,
        scraper_request_timeout_secs,
        scraper_max_attempts,
        scraper_backoff_base_secs,
        scraper_jitter_min_ms,
        scraper_jitter_max_ms,
    })
}

/// Accepts only absolute `http`/`https` URLs with a host.
fn validate_base_url(raw: &str) -> Result<(), String> {
    let url = reqwest::Url::parse(raw).map_err(|e| format!("\"{raw}\" is not a valid URL: {e}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("\"{raw}\" must use http or https"));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(format!("\"{raw}\" has no host"));
    }
    Ok(())
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s.trim() {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "LEGIONE_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
