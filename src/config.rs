//! Generator configuration, loadable from a JSON file with baked-in defaults.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

/// Default location on disk where the generator looks for the JSON configuration.
pub const DEFAULT_CONFIG_PATH: &str = "config/swagger.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
pub const CONFIG_PATH_ENV: &str = "CONTRACT_SWAGGER_CONFIG_PATH";
/// Tag namespace used when none is configured.
pub const DEFAULT_TAG_NAME: &str = "json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
/// What to do when a record is reached again while it is still being built.
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
    /// Abort the run with [`GenerateError::CyclicType`](crate::GenerateError::CyclicType).
    #[default]
    Reject,
    /// Emit a `$ref` to the record without descending into it again.
    Reference,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
/// Settings for one [`SwaggerGenerator`](crate::SwaggerGenerator).
#[serde(default)]
pub struct GeneratorConfig {
    /// `info.title`
    #[validate(length(min = 1))]
    pub title: String,
    /// `info.version`
    #[validate(length(min = 1))]
    pub version: String,
    /// `info.description`
    pub description: String,
    /// Tag namespace supplying exposed field names.
    #[validate(length(min = 1))]
    pub tag_name: String,
    /// Emit indented JSON.
    pub pretty: bool,
    /// Handling of self-referential record graphs.
    pub cycle_policy: CyclePolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            title: "API".into(),
            version: "v0.0.1".into(),
            description: String::new(),
            tag_name: DEFAULT_TAG_NAME.into(),
            pretty: false,
            cycle_policy: CyclePolicy::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load the configuration from the resolved path, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&resolve_config_path())
    }

    /// Load the configuration from `path`, falling back to defaults on any problem.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<GeneratorConfig>(&contents) {
                Ok(config) => match config.validate() {
                    Ok(()) => {
                        info!(
                            path = %path.display(),
                            tag_name = %config.tag_name,
                            "loaded generator config"
                        );
                        config
                    }
                    Err(err) => {
                        warn!(
                            path = %path.display(),
                            error = %err,
                            "invalid generator config; falling back to defaults"
                        );
                        Self::default()
                    }
                },
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
