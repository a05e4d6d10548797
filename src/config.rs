// =============================================================================
// CONFIGURATION - Load settings from gl-helpers.toml
// =============================================================================
//
// Context preference order, viewport defaults, binding names and logging.
// Provides sensible defaults if the config file is missing or has errors.

use crate::gl::{ApiVersion, BindingNames, DEFAULT_CANDIDATES};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "gl-helpers.toml";

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub context: ContextConfig,
    pub viewport: ViewportConfig,
    pub bindings: BindingNames,
    pub debug: DebugConfig,
}

/// Context acquisition settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContextConfig {
    /// Tried in order; first available wins.
    pub preferred: Vec<ApiVersion>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            preferred: DEFAULT_CANDIDATES.to_vec(),
        }
    }
}

/// Viewport settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    /// Used when the host cannot report a device pixel ratio.
    pub device_pixel_ratio: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { device_pixel_ratio: 1.0 }
    }
}

/// Debug settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// env_logger filter, e.g. "info" or "gl_helpers=debug". RUST_LOG wins.
    pub log_filter: String,
    pub log_to_file: bool,
    pub log_file: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            log_to_file: false,
            log_file: "gl_helpers.log".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults if not found
    pub fn load() -> Self {
        Self::load_from_path(DEFAULT_CONFIG_PATH).unwrap_or_else(|e| {
            log::warn!("Failed to load {}: {:#}. Using defaults.", DEFAULT_CONFIG_PATH, e);
            Config::default()
        })
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        log::info!("Loaded configuration from {:?}", path);
        log::debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.context.preferred.is_empty() {
            anyhow::bail!("context.preferred must list at least one API version");
        }
        if !winit::dpi::validate_scale_factor(config.viewport.device_pixel_ratio) {
            anyhow::bail!(
                "viewport.device_pixel_ratio must be positive and finite, got {}",
                config.viewport.device_pixel_ratio
            );
        }
        Ok(config)
    }
}
