use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "LEGIONE_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults are valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.affiliate_tag, "");
    assert!(!cfg.tagging_enabled());
    assert_eq!(cfg.amazon_base_url, "https://www.amazon.it");
    assert_eq!(cfg.scraper_request_timeout_secs, 15);
    assert_eq!(cfg.scraper_max_attempts, 9);
    assert_eq!(cfg.scraper_backoff_base_secs, 2);
    assert_eq!(cfg.scraper_jitter_min_ms, 500);
    assert_eq!(cfg.scraper_jitter_max_ms, 1500);
}

#[test]
fn build_app_config_reads_affiliate_tag() {
    let mut map = HashMap::new();
    map.insert("AMAZON_AFFILIATE_TAG", " legione-21 ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.affiliate_tag, "legione-21");
    assert!(cfg.tagging_enabled());
}

#[test]
fn debug_output_redacts_affiliate_tag() {
    let mut map = HashMap::new();
    map.insert("AMAZON_AFFILIATE_TAG", "legione-21");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("legione-21"), "tag leaked: {rendered}");
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn build_app_config_trims_trailing_slash_from_base_url() {
    let mut map = HashMap::new();
    map.insert("LEGIONE_AMAZON_BASE_URL", "https://www.amazon.de/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.amazon_base_url, "https://www.amazon.de");
}

#[test]
fn build_app_config_rejects_relative_base_url() {
    let mut map = HashMap::new();
    map.insert("LEGIONE_AMAZON_BASE_URL", "www.amazon.it");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEGIONE_AMAZON_BASE_URL"),
        "expected InvalidEnvVar(LEGIONE_AMAZON_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_malformed_base_urls() {
    for raw in ["http://exa mple", "ftp://www.amazon.it", "https://"] {
        let mut map = HashMap::new();
        map.insert("LEGIONE_AMAZON_BASE_URL", raw);
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEGIONE_AMAZON_BASE_URL"),
            "expected InvalidEnvVar(LEGIONE_AMAZON_BASE_URL) for {raw}, got: {result:?}"
        );
    }
}

#[test]
fn build_app_config_accepts_local_http_base_url() {
    let mut map = HashMap::new();
    map.insert("LEGIONE_AMAZON_BASE_URL", "http://127.0.0.1:8080/");
    let cfg = build_app_config(lookup_from_map(&map)).expect("local origin is valid");
    assert_eq!(cfg.amazon_base_url, "http://127.0.0.1:8080");
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("LEGIONE_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEGIONE_BIND_ADDR"),
        "expected InvalidEnvVar(LEGIONE_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_attempts() {
    let mut map = HashMap::new();
    map.insert("LEGIONE_SCRAPER_MAX_ATTEMPTS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEGIONE_SCRAPER_MAX_ATTEMPTS"),
        "expected InvalidEnvVar(LEGIONE_SCRAPER_MAX_ATTEMPTS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_numeric_timeout() {
    let mut map = HashMap::new();
    map.insert("LEGIONE_SCRAPER_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEGIONE_SCRAPER_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(LEGIONE_SCRAPER_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_timeout() {
    let mut map = HashMap::new();
    map.insert("LEGIONE_SCRAPER_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEGIONE_SCRAPER_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(LEGIONE_SCRAPER_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_inverted_jitter_range() {
    let mut map = HashMap::new();
    map.insert("LEGIONE_SCRAPER_JITTER_MIN_MS", "2000");
    map.insert("LEGIONE_SCRAPER_JITTER_MAX_MS", "1000");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEGIONE_SCRAPER_JITTER_MAX_MS"),
        "expected InvalidEnvVar(LEGIONE_SCRAPER_JITTER_MAX_MS), got: {result:?}"
    );
}

#[test]
fn build_app_config_accepts_retry_overrides() {
    let mut map = HashMap::new();
    map.insert("LEGIONE_SCRAPER_MAX_ATTEMPTS", "3");
    map.insert("LEGIONE_SCRAPER_BACKOFF_BASE_SECS", "0");
    map.insert("LEGIONE_SCRAPER_JITTER_MIN_MS", "0");
    map.insert("LEGIONE_SCRAPER_JITTER_MAX_MS", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper_max_attempts, 3);
    assert_eq!(cfg.scraper_backoff_base_secs, 0);
    assert_eq!(cfg.scraper_jitter_min_ms, 0);
    assert_eq!(cfg.scraper_jitter_max_ms, 0);
}
