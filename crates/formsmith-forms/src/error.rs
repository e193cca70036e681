//! Error types

use thiserror::Error;

/// Errors surfaced by the form builder outside of rendering
#[derive(Debug, Error)]
pub enum FormBuilderError {
	#[error("Method {0} does not exist.")]
	MethodNotFound(String),
	#[error("Unknown theme: {0}")]
	UnknownTheme(String),
	#[error(transparent)]
	Config(#[from] ConfigError),
}

/// Errors raised while loading a [`FormBuilderConfig`](crate::FormBuilderConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("Failed to read config file {path}: {source}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},
	#[error("Failed to parse TOML config: {0}")]
	Toml(#[from] toml::de::Error),
	#[error("Failed to parse JSON config: {0}")]
	Json(#[from] serde_json::Error),
	#[error("Unsupported config format: {0}")]
	UnsupportedFormat(String),
}

pub type FormBuilderResult<T> = Result<T, FormBuilderError>;
