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
fn build_app_config_defaults_with_empty_env() {
    let map = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    assert_eq!(cfg.typeahead_region, "uknostreet");
    assert_eq!(cfg.channel, Channel::Rent);
    assert_eq!(cfg.max_results, 1000);
    assert_eq!(cfg.request_timeout_secs, 30);
    assert!(cfg.batch_timeout_secs.is_none());
    assert!(cfg.max_concurrent_requests.is_none());
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
}

#[test]
fn unrelated_variables_are_ignored() {
    let mut map = HashMap::new();
    map.insert("RENTSCAN_ENV", "staging");
    map.insert("DATABASE_URL", "postgres://localhost/other");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    assert_eq!(cfg.channel, Channel::Rent);
}

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let mut map = HashMap::new();
    map.insert("RENTSCAN_BASE_URL", "http://127.0.0.1:8080/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.base_url, "http://127.0.0.1:8080");
}

#[test]
fn base_url_without_scheme_is_rejected() {
    let mut map = HashMap::new();
    map.insert("RENTSCAN_BASE_URL", "www.rightmove.co.uk");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RENTSCAN_BASE_URL"),
        "expected InvalidEnvVar(RENTSCAN_BASE_URL), got: {result:?}"
    );
}

#[test]
fn channel_override_is_case_insensitive() {
    let mut map = HashMap::new();
    map.insert("RENTSCAN_CHANNEL", "buy");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.channel, Channel::Buy);
}

#[test]
fn channel_invalid() {
    let mut map = HashMap::new();
    map.insert("RENTSCAN_CHANNEL", "LEASE");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RENTSCAN_CHANNEL"),
        "expected InvalidEnvVar(RENTSCAN_CHANNEL), got: {result:?}"
    );
}

#[test]
fn max_results_override() {
    let mut map = HashMap::new();
    map.insert("RENTSCAN_MAX_RESULTS", "20");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_results, 20);
}

#[test]
fn max_results_invalid() {
    let mut map = HashMap::new();
    map.insert("RENTSCAN_MAX_RESULTS", "lots");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RENTSCAN_MAX_RESULTS"),
        "expected InvalidEnvVar(RENTSCAN_MAX_RESULTS), got: {result:?}"
    );
}

#[test]
fn request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("RENTSCAN_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RENTSCAN_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(RENTSCAN_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn batch_timeout_override() {
    let mut map = HashMap::new();
    map.insert("RENTSCAN_BATCH_TIMEOUT_SECS", "90");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.batch_timeout_secs, Some(90));
}

#[test]
fn blank_batch_timeout_means_none() {
    let mut map = HashMap::new();
    map.insert("RENTSCAN_BATCH_TIMEOUT_SECS", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.batch_timeout_secs.is_none());
}

#[test]
fn max_concurrent_requests_override() {
    let mut map = HashMap::new();
    map.insert("RENTSCAN_MAX_CONCURRENT_REQUESTS", "8");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_concurrent_requests, Some(8));
}

#[test]
fn max_concurrent_requests_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("RENTSCAN_MAX_CONCURRENT_REQUESTS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "RENTSCAN_MAX_CONCURRENT_REQUESTS"),
        "expected InvalidEnvVar(RENTSCAN_MAX_CONCURRENT_REQUESTS), got: {result:?}"
    );
}

#[test]
fn user_agent_override() {
    let mut map = HashMap::new();
    map.insert("RENTSCAN_USER_AGENT", "rentscan-test/0.1");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.user_agent, "rentscan-test/0.1");
}
