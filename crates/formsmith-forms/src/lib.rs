//! Form markup builder for formsmith
//!
//! This crate renders HTML form elements and keeps them populated across
//! submissions:
//! - Value resolution from old input, the current request, declared defaults
//!   and a bound model, with list-valued old input handed out in order
//! - Theme classes (Bootstrap, Tailwind) and validation error classes
//! - Pipe-delimited validation rules translated into HTML5 attributes
//! - Selects with option groups, ranges, months and enum choices
//! - Checkbox and radio checked state, toggles, floating labels, honeypots
//! - A registry of custom element renderers invoked by name

pub mod builder;
pub mod config;
pub mod error;
pub mod field;
pub mod key;
pub mod registry;
pub mod rules;
pub mod source;
pub mod theme;
pub mod url;
pub mod value;

pub use builder::{
	ChoiceEnum, FormAction, FormBuilder, FormOptions, SelectAttributes, SelectEntry, SelectList,
};
pub use config::{FormBuilderConfig, HoneypotConfig, TextareaConfig};
pub use error::{ConfigError, FormBuilderError, FormBuilderResult};
pub use field::{FieldKind, FieldRequest, ValueMode};
pub use key::transform_key;
pub use registry::{MethodHandler, MethodRegistry};
pub use rules::{ValidationRules, translate_rules};
pub use source::{ErrorBag, FormModel, OldInputBag, OldInputStore, RequestBag, RequestInput};
pub use theme::{Theme, ThemeClasses, ThemeRegistry};
pub use url::{RouteTable, UrlParams, UrlResolver};
pub use value::{FormValue, TIMESTAMP_FORMAT};
