//! Configuration management for Markdrown.
//!
//! Parses `markdrown.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Every section is
//! optional; missing values fall back to the defaults below.
//!
//! ```toml
//! [render]
//! wrap_sections = true
//!
//! [plugins]
//! html_passthrough = true
//! features = true
//! workflow = true
//! facts = true
//! constellation = true
//!
//! [anchor_links]
//! enabled = true
//! levels = [3, 4]
//!
//! [constellation]
//! center_x = 50.0
//! center_y = 45.0
//! radius = 35.0
//! ```
//!
//! CLI settings can be applied during load via [`CliSettings`].

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override section wrapping.
    pub wrap_sections: Option<bool>,
    /// Override anchor link controls on headings.
    pub anchor_links: Option<bool>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "markdrown.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output shaping.
    pub render: RenderConfig,
    /// Optional builtin plugins.
    pub plugins: PluginsConfig,
    /// Copy-link controls on headings.
    pub anchor_links: AnchorLinksConfig,
    /// Constellation node placement.
    pub constellation: ConstellationConfig,
    /// Path to the loaded config file, if any.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[render]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Group top-level `<h3>` runs into `<div class="section">` wrappers.
    pub wrap_sections: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            wrap_sections: true,
        }
    }
}

/// `[plugins]` section. The core markup plugins are always on.
#[derive(Debug, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct PluginsConfig {
    pub html_passthrough: bool,
    pub features: bool,
    pub workflow: bool,
    pub facts: bool,
    pub constellation: bool,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            html_passthrough: true,
            features: true,
            workflow: true,
            facts: true,
            constellation: true,
        }
    }
}

/// `[anchor_links]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AnchorLinksConfig {
    pub enabled: bool,
    /// Heading levels that receive a control.
    pub levels: Vec<u8>,
}

impl Default for AnchorLinksConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            levels: vec![3, 4],
        }
    }
}

/// `[constellation]` section. Values are percentages of the container.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ConstellationConfig {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl Default for ConstellationConfig {
    fn default() -> Self {
        Self {
            center_x: 50.0,
            center_y: 45.0,
            radius: 35.0,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise, searches
    /// for `markdrown.toml` in the current directory and parents, falling back
    /// to defaults when none exists.
    ///
    /// CLI settings are applied last and take precedence over file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// a value is out of range.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let discovered = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Some(path.to_path_buf())
            }
            None => std::env::current_dir()
                .ok()
                .and_then(|cwd| Self::discover_from(&cwd)),
        };

        let mut config = match discovered {
            Some(path) => Self::load_from_file(&path)?,
            None => {
                tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
                Self::default()
            }
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(wrap_sections) = settings.wrap_sections {
            self.render.wrap_sections = wrap_sections;
        }
        if let Some(anchor_links) = settings.anchor_links {
            self.anchor_links.enabled = anchor_links;
        }
    }

    /// Search for a config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_anchor_links()?;
        self.validate_constellation()?;
        Ok(())
    }

    fn validate_anchor_links(&self) -> Result<(), ConfigError> {
        if let Some(level) = self
            .anchor_links
            .levels
            .iter()
            .find(|level| !(1..=6).contains(*level))
        {
            return Err(ConfigError::Validation(format!(
                "anchor_links.levels must be between 1 and 6, got {level}"
            )));
        }
        Ok(())
    }

    fn validate_constellation(&self) -> Result<(), ConfigError> {
        let constellation = &self.constellation;
        if constellation.radius.is_nan() || constellation.radius <= 0.0 {
            return Err(ConfigError::Validation(
                "constellation.radius must be greater than 0".to_owned(),
            ));
        }
        require_percentage(constellation.center_x, "constellation.center_x")?;
        require_percentage(constellation.center_y, "constellation.center_y")?;
        Ok(())
    }
}

/// Require a value to lie within `0..=100`.
fn require_percentage(value: f64, field: &str) -> Result<(), ConfigError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(ConfigError::Validation(format!(
            "{field} must be between 0 and 100"
        )));
    }
    Ok(())
}
