//! Client settings loaded from the `[client]` configuration section.

use crate::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Settings for reaching the generative-AI backend.
///
/// ```toml
/// [client]
/// base_url = "https://generativelanguage.googleapis.com/v1beta"
/// text_model = "gemini-2.0-flash"
/// image_model = "imagen-3.0-generate-002"
/// api_key_env = "GEMINI_API_KEY"
/// max_attempts = 3
/// initial_delay_ms = 1000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientConfig {
    /// API root, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used for chat, code, canvas and research
    #[serde(default = "default_text_model")]
    pub text_model: String,

    /// Model used for image generation
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Attempts per logical request
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Wait before the first retry, in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Per-attempt timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_text_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_image_model() -> String {
    "imagen-3.0-generate-002".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            text_model: default_text_model(),
            image_model: default_image_model(),
            api_key_env: default_api_key_env(),
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            attempt_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Retry policy described by these settings.
    pub fn retry_policy(&self) -> RetryPolicy {
        let policy = RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.initial_delay_ms),
        );
        match self.attempt_timeout_secs {
            Some(secs) => policy.with_attempt_timeout(Duration::from_secs(secs)),
            None => policy,
        }
    }

    /// API key from the configured environment variable.
    ///
    /// A `.env` file in the working directory is loaded first. A missing key
    /// yields an empty string; the backend then rejects requests itself.
    pub fn api_key(&self) -> String {
        let _ = dotenvy::dotenv();
        std::env::var(&self.api_key_env).unwrap_or_else(|_| {
            warn!(var = %self.api_key_env, "API key environment variable not set");
            String::new()
        })
    }
}
