//! Builder configuration
//!
//! Theme tables, honeypot field names and textarea defaults are passed to the
//! builder at construction instead of being looked up globally, so several
//! independently configured builders can live in one process.

use crate::error::ConfigError;
use crate::theme::{Theme, ThemeRegistry};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Field names used by [`FormBuilder::honeypot`](crate::FormBuilder::honeypot)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoneypotConfig {
	pub name: String,
	pub time_name: String,
}

impl Default for HoneypotConfig {
	fn default() -> Self {
		Self {
			name: "my_name".to_string(),
			time_name: "my_time".to_string(),
		}
	}
}

/// Default textarea dimensions when neither `size` nor `cols`/`rows` is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextareaConfig {
	pub cols: u32,
	pub rows: u32,
}

impl Default for TextareaConfig {
	fn default() -> Self {
		Self { cols: 50, rows: 10 }
	}
}

/// Configuration of a [`FormBuilder`](crate::FormBuilder)
///
/// Every section is optional in config files; missing keys fall back to
/// their defaults. A `themes.<name>` table replaces that theme's default
/// table as a whole.
///
/// # Examples
///
/// ```
/// use formsmith_forms::{FormBuilderConfig, Theme};
///
/// let config = FormBuilderConfig::from_toml_str(r#"
///     theme = "bootstrap"
///     consider_request = true
///
///     [honeypot]
///     name = "website"
/// "#).unwrap();
///
/// assert_eq!(config.theme, Theme::Bootstrap);
/// assert!(config.consider_request);
/// assert_eq!(config.honeypot.name, "website");
/// assert_eq!(config.honeypot.time_name, "my_time");
/// assert_eq!(config.textarea.cols, 50);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormBuilderConfig {
	/// Theme active when the builder is created
	pub theme: Theme,
	/// Consult the current request while resolving values
	pub consider_request: bool,
	pub honeypot: HoneypotConfig,
	pub textarea: TextareaConfig,
	pub themes: ThemeRegistry,
}

impl FormBuilderConfig {
	pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(contents)?)
	}

	pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
		Ok(serde_json::from_str(contents)?)
	}

	/// Load from a `.toml` or `.json` file, dispatching on the extension
	pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
		let path = path.into();
		let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
			path: path.display().to_string(),
			source,
		})?;

		let config = match path.extension().and_then(|ext| ext.to_str()) {
			Some("toml") => Self::from_toml_str(&contents)?,
			Some("json") => Self::from_json_str(&contents)?,
			_ => {
				return Err(ConfigError::UnsupportedFormat(
					"Supported formats: .toml, .json".to_string(),
				));
			}
		};

		tracing::debug!(path = %path.display(), theme = %config.theme, "loaded form builder config");
		Ok(config)
	}
}
