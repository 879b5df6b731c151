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
    assert_eq!(parse_environment("development"), Environment::Development);
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test"), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3001");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.base_url, "https://www.amazon.com");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert!(cfg.user_agent.starts_with("Mozilla/5.0"));
    assert_eq!(cfg.accept_language, "en-US,en;q=0.9");
    assert!(cfg.selectors_path.is_none());
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("SHELFSCAN_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHELFSCAN_BIND_ADDR"),
        "expected InvalidEnvVar(SHELFSCAN_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn base_url_override_strips_trailing_slash() {
    let mut map = HashMap::new();
    map.insert("SHELFSCAN_BASE_URL", "https://www.amazon.de/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.base_url, "https://www.amazon.de");
}

#[test]
fn base_url_without_scheme_is_rejected() {
    let mut map = HashMap::new();
    map.insert("SHELFSCAN_BASE_URL", "www.amazon.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHELFSCAN_BASE_URL"),
        "expected InvalidEnvVar(SHELFSCAN_BASE_URL), got: {result:?}"
    );
}

#[test]
fn request_timeout_secs_override() {
    let mut map = HashMap::new();
    map.insert("SHELFSCAN_REQUEST_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 60);
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("SHELFSCAN_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHELFSCAN_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SHELFSCAN_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn request_timeout_secs_zero_is_invalid() {
    let mut map = HashMap::new();
    map.insert("SHELFSCAN_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SHELFSCAN_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SHELFSCAN_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn user_agent_and_language_overrides() {
    let mut map = HashMap::new();
    map.insert("SHELFSCAN_USER_AGENT", "custom-agent/2.0");
    map.insert("SHELFSCAN_ACCEPT_LANGUAGE", "de-DE,de;q=0.9");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
    assert_eq!(cfg.accept_language, "de-DE,de;q=0.9");
}

#[test]
fn selectors_path_is_read_when_set() {
    let mut map = HashMap::new();
    map.insert("SHELFSCAN_SELECTORS_PATH", "./config/selectors.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.selectors_path.as_deref(),
        Some(std::path::Path::new("./config/selectors.yaml"))
    );
}

#[test]
fn blank_selectors_path_is_ignored() {
    let mut map = HashMap::new();
    map.insert("SHELFSCAN_SELECTORS_PATH", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.selectors_path.is_none());
}
