use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
    use std::path::PathBuf;

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_positive = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let value = parse_usize(var, default)?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(value)
    };

    let apify_api_token = optional("APIFY_API_TOKEN");
    let apify_base_url = or_default("VIDSCOUT_APIFY_BASE_URL", "https://api.apify.com/v2");
    let actor_id = or_default("VIDSCOUT_ACTOR_ID", "ssOXktOBaQQiYfhc4");
    let log_level = or_default("VIDSCOUT_LOG_LEVEL", "info");

    let input_path = optional("VIDSCOUT_INPUT_PATH").map(PathBuf::from);
    let output_path = PathBuf::from(or_default("VIDSCOUT_OUTPUT_PATH", "output/output.xlsx"));
    let username_column = or_default("VIDSCOUT_USERNAME_COLUMN", "Username");
    let identity_limit = parse_identity_limit(lookup("VIDSCOUT_IDENTITY_LIMIT").ok().as_deref())?;

    let batch_size = parse_positive("VIDSCOUT_BATCH_SIZE", "100")?;
    let target_video_count = parse_positive("VIDSCOUT_TARGET_VIDEO_COUNT", "20")?;
    let capacity_slack = parse_usize("VIDSCOUT_CAPACITY_SLACK", "300")?;

    let request_timeout_secs = parse_u64("VIDSCOUT_REQUEST_TIMEOUT_SECS", "90")?;
    let wait_for_finish_secs = parse_u64("VIDSCOUT_WAIT_SECS", "60")?;
    if wait_for_finish_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "VIDSCOUT_WAIT_SECS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        apify_api_token,
        apify_base_url,
        actor_id,
        log_level,
        input_path,
        output_path,
        username_column,
        identity_limit,
        batch_size,
        target_video_count,
        capacity_slack,
        request_timeout_secs,
        wait_for_finish_secs,
    })
}

/// Parse the identity cap. Unset, empty, or `-1` mean "no limit".
fn parse_identity_limit(raw: Option<&str>) -> Result<Option<usize>, ConfigError> {
    match raw.map(str::trim) {
        None | Some("" | "-1") => Ok(None),
        Some(value) => value
            .parse::<usize>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: "VIDSCOUT_IDENTITY_LIMIT".to_string(),
                reason: e.to_string(),
            }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
