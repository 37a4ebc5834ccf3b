use std::path::PathBuf;

use crate::ConfigError;

/// Process-wide settings, built once at startup and passed by reference.
#[derive(Clone)]
pub struct AppConfig {
    /// Only needed once the service is contacted; see [`AppConfig::api_token`].
    pub apify_api_token: Option<String>,
    pub apify_base_url: String,
    pub actor_id: String,
    pub log_level: String,
    pub input_path: Option<PathBuf>,
    pub output_path: PathBuf,
    pub username_column: String,
    /// `None` means every identity in the input is collected.
    pub identity_limit: Option<usize>,
    pub batch_size: usize,
    /// Items requested per identity; also the media column cap.
    pub target_video_count: usize,
    pub capacity_slack: usize,
    pub request_timeout_secs: u64,
    pub wait_for_finish_secs: u64,
}

impl AppConfig {
    /// The Apify token, or [`ConfigError::MissingEnvVar`] if none is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar("APIFY_API_TOKEN")` when the token
    /// is unset or blank.
    pub fn api_token(&self) -> Result<&str, ConfigError> {
        self.apify_api_token
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("APIFY_API_TOKEN".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "apify_api_token",
                &self.apify_api_token.as_ref().map(|_| "[redacted]"),
            )
            .field("apify_base_url", &self.apify_base_url)
            .field("actor_id", &self.actor_id)
            .field("log_level", &self.log_level)
            .field("input_path", &self.input_path)
            .field("output_path", &self.output_path)
            .field("username_column", &self.username_column)
            .field("identity_limit", &self.identity_limit)
            .field("batch_size", &self.batch_size)
            .field("target_video_count", &self.target_video_count)
            .field("capacity_slack", &self.capacity_slack)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("wait_for_finish_secs", &self.wait_for_finish_secs)
            .finish()
    }
}
