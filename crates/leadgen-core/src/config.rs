use crate::app_config::{AppConfig, Environment};
use crate::settings::PitchModel;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but invalid.
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
/// Returns `ConfigError` if any value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// development config. API keys are optional; empty values count as unset.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
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

    let parse_temperature = |var: &str, default: &str| -> Result<f32, ConfigError> {
        let value = or_default(var, default)
            .parse::<f32>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if !(0.0..=2.0).contains(&value) {
            return Err(invalid(var, format!("{value} is outside 0.0..=2.0")));
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("LEADGEN_ENV", "development"))?;

    let bind_addr = or_default("LEADGEN_BIND_ADDR", "127.0.0.1:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("LEADGEN_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("LEADGEN_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("LEADGEN_DATA_DIR", "./data"));
    let services_path = optional("LEADGEN_SERVICES_PATH").map(PathBuf::from);

    let request_timeout_secs = parse_u64("LEADGEN_REQUEST_TIMEOUT_SECS", "120")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "LEADGEN_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    let user_agent = or_default("LEADGEN_USER_AGENT", "leadgen/0.1 (lead-extraction)");
    let history_limit = parse_usize("LEADGEN_HISTORY_LIMIT", "20")?;

    let gemini_model = or_default("LEADGEN_GEMINI_MODEL", "gemini-2.5-flash");
    let gemini_base_url = or_default(
        "LEADGEN_GEMINI_BASE_URL",
        "https://generativelanguage.googleapis.com",
    );
    let openai_base_url = or_default("LEADGEN_OPENAI_BASE_URL", "https://api.openai.com/v1");
    let openai_model = or_default("LEADGEN_OPENAI_MODEL", "gpt-4o");
    let grok_base_url = or_default("LEADGEN_GROK_BASE_URL", "https://api.x.ai/v1");
    let grok_model = or_default("LEADGEN_GROK_MODEL", "grok-beta");
    let anthropic_base_url =
        or_default("LEADGEN_ANTHROPIC_BASE_URL", "https://api.anthropic.com/v1");
    let anthropic_model = or_default("LEADGEN_ANTHROPIC_MODEL", "claude-3-5-sonnet-latest");

    let extraction_temperature = parse_temperature("LEADGEN_EXTRACTION_TEMPERATURE", "0.4")?;
    let pitch_temperature = parse_temperature("LEADGEN_PITCH_TEMPERATURE", "0.7")?;
    let pitch_model = or_default("LEADGEN_PITCH_MODEL", "gemini")
        .parse::<PitchModel>()
        .map_err(|e| invalid("LEADGEN_PITCH_MODEL", e.to_string()))?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        data_dir,
        services_path,
        request_timeout_secs,
        user_agent,
        history_limit,
        gemini_model,
        gemini_base_url,
        openai_base_url,
        openai_model,
        grok_base_url,
        grok_model,
        anthropic_base_url,
        anthropic_model,
        extraction_temperature,
        pitch_temperature,
        pitch_model,
        gemini_api_key: optional("GEMINI_API_KEY"),
        openai_api_key: optional("OPENAI_API_KEY"),
        anthropic_api_key: optional("ANTHROPIC_API_KEY"),
        grok_api_key: optional("GROK_API_KEY"),
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "LEADGEN_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
