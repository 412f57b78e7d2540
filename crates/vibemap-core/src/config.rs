//! Environment-variable configuration loading.

use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env
/// vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable fails to parse or validate.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files; useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable fails to parse or validate.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup, no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_dimension = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "grid dimensions must be non-zero".to_string(),
            });
        }
        Ok(value)
    };

    Ok(AppConfig {
        env: parse_environment(&or_default("VIBEMAP_ENV", "development"))?,
        log_level: or_default("VIBEMAP_LOG_LEVEL", "info"),
        near_radius_m: parse_u32("VIBEMAP_NEAR_RADIUS_M", "1000")?,
        search_radius_m: parse_u32("VIBEMAP_SEARCH_RADIUS_M", "5000")?,
        grid_width: parse_dimension("VIBEMAP_GRID_WIDTH", "60")?,
        grid_height: parse_dimension("VIBEMAP_GRID_HEIGHT", "40")?,
        venues_path: PathBuf::from(or_default("VIBEMAP_VENUES_PATH", "config/venues.json")),
        grid_state_path: PathBuf::from(or_default("VIBEMAP_GRID_STATE_PATH", "grid-state.json")),
        palette_path: lookup("VIBEMAP_PALETTE_PATH").ok().map(PathBuf::from),
        share_base_url: or_default("VIBEMAP_SHARE_BASE_URL", "https://vibemap.example"),
    })
}

fn parse_environment(raw: &str) -> Result<Environment, ConfigError> {
    match raw {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "VIBEMAP_ENV".to_string(),
            reason: format!("unknown environment: {other}"),
        }),
    }
}
