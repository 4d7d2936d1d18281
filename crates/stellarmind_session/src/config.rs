//! Workspace configuration.
//!
//! Sources, later overriding earlier key by key:
//! - Bundled defaults (include_str! from stellarmind.toml)
//! - `~/.config/stellarmind/stellarmind.toml`
//! - `./stellarmind.toml`

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use stellarmind_client::ClientConfig;
use stellarmind_error::{ConfigError, ConfigErrorKind, StellarmindError, StellarmindResult};
use stellarmind_quota::LimitSchedule;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../stellarmind.toml");

/// Top-level StellarMind configuration.
///
/// # Example
///
/// ```no_run
/// use stellarmind_session::StellarmindConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StellarmindConfig::load()?;
/// println!("Storing documents under artifacts/{}", config.app_id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StellarmindConfig {
    /// Namespace for stored documents
    pub app_id: String,

    /// Per-tier usage limits
    pub limits: LimitSchedule,

    /// Backend and retry settings
    #[serde(default)]
    pub client: ClientConfig,
}

impl Default for StellarmindConfig {
    fn default() -> Self {
        Self {
            app_id: "default-app-id".to_string(),
            limits: LimitSchedule::default(),
            client: ClientConfig::default(),
        }
    }
}

fn build_error(e: config::ConfigError) -> StellarmindError {
    ConfigError::new(ConfigErrorKind::Build(e.to_string())).into()
}

fn parse_error(e: config::ConfigError) -> StellarmindError {
    ConfigError::new(ConfigErrorKind::Parse(e.to_string())).into()
}

impl StellarmindConfig {
    /// Bundled defaults overridden by the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or does not parse.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> StellarmindResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                StellarmindError::from(ConfigError::new(ConfigErrorKind::Read {
                    path: path.as_ref().display().to_string(),
                    reason: e.to_string(),
                }))
            })?
            .try_deserialize()
            .map_err(parse_error)
    }

    /// Bundled defaults overridden by TOML text.
    pub fn from_toml_str(overrides: &str) -> StellarmindResult<Self> {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(overrides, FileFormat::Toml))
            .build()
            .map_err(build_error)?
            .try_deserialize()
            .map_err(parse_error)
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> StellarmindResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/stellarmind/stellarmind.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("stellarmind").required(false));

        builder
            .build()
            .map_err(build_error)?
            .try_deserialize()
            .map_err(parse_error)
    }
}
