//! Layered application configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML file
//! (`srsforge.toml`, or the path given explicitly or through `SRSFORGE_CONFIG`),
//! then `SRSFORGE__SECTION__KEY` environment variables.

use serde::{Deserialize, Serialize};
use srsforge_render_lopdf::PaginationMode;
use srsforge_style::{ColorSupport, Margins, PageSize, classify_color};
use srsforge_types::Color;
use srsforge_visual::{CAPTURE_TARGET_ID, SanitizeMode};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "srsforge.toml";
pub const CONFIG_PATH_ENV: &str = "SRSFORGE_CONFIG";
pub const ENV_PREFIX: &str = "SRSFORGE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration value for '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("No rendering backend is configured")]
    MissingBackend,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub export: ExportConfig,
    pub fonts: FontsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// An empty string leaves the remote path unconfigured.
    pub base_url: String,
    /// Request timeout in seconds; 0 disables it.
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 0,
        }
    }
}

impl BackendConfig {
    pub fn base_url(&self) -> Option<&str> {
        let url = self.base_url.trim();
        (!url.is_empty()).then_some(url)
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub page_size: PageSize,
    pub margins: Margins,
    pub capture_scale: f32,
    pub pagination: PaginationMode,
    pub sanitize: SanitizeMode,
    pub fallback_color: String,
    pub capture_target: String,
    pub output_dir: PathBuf,
    /// Base directory for images embedded in the preview.
    pub resource_dir: Option<PathBuf>,
    /// When set, absolute http(s) images from other origins are skipped.
    pub resource_origin: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margins: Margins::default(),
            capture_scale: 2.0,
            pagination: PaginationMode::Sliced,
            sanitize: SanitizeMode::Convert,
            fallback_color: "rgb(0, 0, 0)".to_string(),
            capture_target: CAPTURE_TARGET_ID.to_string(),
            output_dir: PathBuf::from("."),
            resource_dir: None,
            resource_origin: None,
        }
    }
}

impl ExportConfig {
    /// The fallback color, which must itself be directly paintable.
    pub fn fallback_color(&self) -> Result<Color, ConfigError> {
        match classify_color(&self.fallback_color) {
            ColorSupport::Supported(color) => Ok(color),
            _ => Err(ConfigError::Invalid {
                key: "export.fallback_color",
                reason: format!("'{}' is not an sRGB color", self.fallback_color),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontsConfig {
    pub system_fonts: bool,
    pub font_dir: Option<PathBuf>,
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            system_fonts: true,
            font_dir: None,
        }
    }
}

impl AppConfig {
    /// Loads the layered configuration.
    ///
    /// An explicit path, or one named by `SRSFORGE_CONFIG`, must exist;
    /// `srsforge.toml` in the working directory is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = std::env::var(CONFIG_PATH_ENV)
            .ok()
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);
        let file = match explicit.map(Path::to_path_buf).or(env_path) {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config: AppConfig = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        config.validate()?;
        log::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Parses a TOML document on top of the defaults, without consulting the environment.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let scale = self.export.capture_scale;
        if !scale.is_finite() || scale < 1.0 {
            return Err(ConfigError::Invalid {
                key: "export.capture_scale",
                reason: format!("must be a finite number >= 1, got {scale}"),
            });
        }
        if self.export.capture_target.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "export.capture_target",
                reason: "must not be empty".to_string(),
            });
        }
        self.export.fallback_color()?;
        Ok(())
    }
}
