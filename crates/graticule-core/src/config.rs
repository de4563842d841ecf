use crate::app_config::{
    GeocoderConfig, DEFAULT_GOOGLE_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::ConfigError;

/// Load geocoder configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_geocoder_config() -> Result<GeocoderConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_geocoder_config_from_env()
}

/// Load geocoder configuration from environment variables already in the process.
///
/// Unlike [`load_geocoder_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_geocoder_config_from_env() -> Result<GeocoderConfig, ConfigError> {
    build_geocoder_config(|key| std::env::var(key))
}

/// Build geocoder configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_geocoder_config<F>(lookup: F) -> Result<GeocoderConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    let api_key = require("GRATICULE_GOOGLE_API_KEY")?;
    let base_url = or_default("GRATICULE_GOOGLE_BASE_URL", DEFAULT_GOOGLE_BASE_URL);
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::InvalidEnvVar {
            var: "GRATICULE_GOOGLE_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{base_url}'"),
        });
    }

    let request_timeout_secs = parse_u64(
        "GRATICULE_REQUEST_TIMEOUT_SECS",
        DEFAULT_REQUEST_TIMEOUT_SECS,
    )?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "GRATICULE_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }

    let user_agent = or_default("GRATICULE_USER_AGENT", DEFAULT_USER_AGENT);

    Ok(GeocoderConfig {
        api_key,
        base_url,
        request_timeout_secs,
        user_agent,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
