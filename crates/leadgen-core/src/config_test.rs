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
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "LEADGEN_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");

    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.data_dir, std::path::PathBuf::from("./data"));
    assert!(cfg.services_path.is_none());
    assert_eq!(cfg.request_timeout_secs, 120);
    assert_eq!(cfg.history_limit, 20);
    assert_eq!(cfg.gemini_model, "gemini-2.5-flash");
    assert_eq!(cfg.openai_model, "gpt-4o");
    assert_eq!(cfg.grok_model, "grok-beta");
    assert!((cfg.extraction_temperature - 0.4).abs() < f32::EPSILON);
    assert!((cfg.pitch_temperature - 0.7).abs() < f32::EPSILON);
    assert_eq!(cfg.pitch_model, PitchModel::Gemini);
    assert!(cfg.gemini_api_key.is_none());
}

#[test]
fn build_app_config_reads_api_keys() {
    let mut map = HashMap::new();
    map.insert("GEMINI_API_KEY", "gem-key");
    map.insert("OPENAI_API_KEY", "  ");
    map.insert("LEADGEN_PITCH_MODEL", "grok");
    map.insert("GROK_API_KEY", "grok-key");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();

    assert_eq!(cfg.gemini_api_key.as_deref(), Some("gem-key"));
    assert!(cfg.openai_api_key.is_none(), "blank keys count as unset");
    assert_eq!(cfg.pitch_model, PitchModel::Grok);

    let settings = cfg.default_settings();
    assert_eq!(settings.gemini_key, "gem-key");
    assert_eq!(settings.openai_key, "");
    assert_eq!(settings.grok_key, "grok-key");
    assert_eq!(settings.pitch_model, PitchModel::Grok);
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("LEADGEN_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEADGEN_BIND_ADDR"),
        "expected InvalidEnvVar(LEADGEN_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_zero_timeout() {
    let mut map = HashMap::new();
    map.insert("LEADGEN_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEADGEN_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(LEADGEN_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_non_numeric_history_limit() {
    let mut map = HashMap::new();
    map.insert("LEADGEN_HISTORY_LIMIT", "lots");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEADGEN_HISTORY_LIMIT"),
        "expected InvalidEnvVar(LEADGEN_HISTORY_LIMIT), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_out_of_range_temperature() {
    let mut map = HashMap::new();
    map.insert("LEADGEN_EXTRACTION_TEMPERATURE", "3.5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEADGEN_EXTRACTION_TEMPERATURE"),
        "expected InvalidEnvVar(LEADGEN_EXTRACTION_TEMPERATURE), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_unknown_pitch_model() {
    let mut map = HashMap::new();
    map.insert("LEADGEN_PITCH_MODEL", "llama");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEADGEN_PITCH_MODEL"),
        "expected InvalidEnvVar(LEADGEN_PITCH_MODEL), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_api_keys() {
    let mut map = HashMap::new();
    map.insert("GEMINI_API_KEY", "super-secret-gemini");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret-gemini"));
    assert!(rendered.contains("[redacted]"));
}
