//! CSS framework themes and their class tables

use crate::error::FormBuilderError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// CSS framework whose classes are injected into rendered elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
	#[default]
	None,
	Bootstrap,
	Tailwind,
}

impl Theme {
	pub fn as_str(&self) -> &'static str {
		match self {
			Theme::None => "none",
			Theme::Bootstrap => "bootstrap",
			Theme::Tailwind => "tailwind",
		}
	}
}

impl fmt::Display for Theme {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Theme {
	type Err = FormBuilderError;

	/// # Examples
	///
	/// ```
	/// use formsmith_forms::Theme;
	///
	/// assert_eq!("Bootstrap".parse::<Theme>().unwrap(), Theme::Bootstrap);
	/// assert_eq!("".parse::<Theme>().unwrap(), Theme::None);
	/// assert!("bulma".parse::<Theme>().is_err());
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"" | "none" => Ok(Theme::None),
			"bootstrap" => Ok(Theme::Bootstrap),
			"tailwind" => Ok(Theme::Tailwind),
			_ => Err(FormBuilderError::UnknownTheme(s.to_string())),
		}
	}
}

/// Class table of one theme: element kind to class string, plus the class
/// added to fields with validation errors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeClasses {
	pub fields: HashMap<String, String>,
	pub error: Option<String>,
}

impl ThemeClasses {
	fn from_fn(class_for: fn(&str) -> Option<&'static str>, error: &str) -> Self {
		let fields = THEMED_KINDS
			.iter()
			.filter_map(|kind| class_for(kind).map(|class| (kind.to_string(), class.to_string())))
			.collect();
		Self {
			fields,
			error: Some(error.to_string()),
		}
	}
}

const THEMED_KINDS: &[&str] = &[
	"text",
	"password",
	"search",
	"email",
	"tel",
	"number",
	"date",
	"datetime",
	"datetime-local",
	"time",
	"url",
	"week",
	"month",
	"file",
	"textarea",
	"select",
	"checkbox",
	"radio",
	"range",
	"color",
	"label",
	"button",
	"submit",
	"reset",
];

pub const TAILWIND_CONTROL_CLASS: &str = "block w-full rounded-md border-gray-300 shadow-sm focus:border-indigo-500 focus:ring-indigo-500 sm:text-sm";
pub const TAILWIND_CHECK_CLASS: &str = "h-4 w-4 rounded border-gray-300 text-indigo-600 focus:ring-indigo-500";
pub const TAILWIND_SELECT_CLASS: &str = "block w-full rounded-md border-gray-300 py-2 pl-3 pr-10 text-base focus:border-indigo-500 focus:outline-none focus:ring-indigo-500 sm:text-sm";

fn bootstrap_class(kind: &str) -> Option<&'static str> {
	match kind {
		"select" => Some("form-select"),
		"checkbox" | "radio" => Some("form-check-input"),
		"range" => Some("form-range"),
		"color" => Some("form-control form-control-color"),
		"label" => Some("form-label"),
		"button" | "submit" => Some("btn btn-primary"),
		"reset" => Some("btn btn-secondary"),
		_ => Some("form-control"),
	}
}

fn tailwind_class(kind: &str) -> Option<&'static str> {
	match kind {
		"select" => Some(TAILWIND_SELECT_CLASS),
		"checkbox" | "radio" => Some(TAILWIND_CHECK_CLASS),
		"range" | "color" | "reset" => None,
		"label" => Some("block text-sm font-medium text-gray-700"),
		"button" | "submit" => Some(
			"inline-flex justify-center rounded-md bg-indigo-600 px-4 py-2 text-sm font-medium text-white",
		),
		_ => Some(TAILWIND_CONTROL_CLASS),
	}
}

/// Class tables of every supported theme
///
/// # Examples
///
/// ```
/// use formsmith_forms::{Theme, ThemeRegistry};
///
/// let themes = ThemeRegistry::default();
/// assert_eq!(themes.field_class(Theme::Bootstrap, "email"), Some("form-control"));
/// assert_eq!(themes.field_class(Theme::Bootstrap, "select"), Some("form-select"));
/// assert_eq!(themes.error_class(Theme::Tailwind), Some("border-red-500"));
/// assert_eq!(themes.field_class(Theme::None, "text"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeRegistry {
	pub bootstrap: ThemeClasses,
	pub tailwind: ThemeClasses,
}

impl Default for ThemeRegistry {
	fn default() -> Self {
		Self {
			bootstrap: ThemeClasses::from_fn(bootstrap_class, "is-invalid"),
			tailwind: ThemeClasses::from_fn(tailwind_class, "border-red-500"),
		}
	}
}

impl ThemeRegistry {
	pub fn classes(&self, theme: Theme) -> Option<&ThemeClasses> {
		match theme {
			Theme::None => None,
			Theme::Bootstrap => Some(&self.bootstrap),
			Theme::Tailwind => Some(&self.tailwind),
		}
	}

	fn classes_mut(&mut self, theme: Theme) -> Option<&mut ThemeClasses> {
		match theme {
			Theme::None => None,
			Theme::Bootstrap => Some(&mut self.bootstrap),
			Theme::Tailwind => Some(&mut self.tailwind),
		}
	}

	/// Class for an element kind under a theme
	pub fn field_class(&self, theme: Theme, kind: &str) -> Option<&str> {
		self.classes(theme)?
			.fields
			.get(kind)
			.map(String::as_str)
			.filter(|class| !class.is_empty())
	}

	/// Class added to fields carrying validation errors
	pub fn error_class(&self, theme: Theme) -> Option<&str> {
		self.classes(theme)?
			.error
			.as_deref()
			.filter(|class| !class.is_empty())
	}

	/// Override the class of one element kind; ignored for [`Theme::None`]
	pub fn set_field_class(&mut self, theme: Theme, kind: impl Into<String>, class: impl Into<String>) {
		if let Some(classes) = self.classes_mut(theme) {
			classes.fields.insert(kind.into(), class.into());
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(Theme::Bootstrap, "checkbox", Some("form-check-input"))]
	#[case(Theme::Bootstrap, "color", Some("form-control form-control-color"))]
	#[case(Theme::Bootstrap, "hidden", None)]
	#[case(Theme::Tailwind, "textarea", Some(TAILWIND_CONTROL_CLASS))]
	#[case(Theme::Tailwind, "range", None)]
	fn test_default_tables(#[case] theme: Theme, #[case] kind: &str, #[case] expected: Option<&str>) {
		assert_eq!(ThemeRegistry::default().field_class(theme, kind), expected);
	}

	#[rstest]
	fn test_no_theme_has_no_error_class() {
		assert_eq!(ThemeRegistry::default().error_class(Theme::None), None);
	}

	#[rstest]
	fn test_override_field_class() {
		let mut themes = ThemeRegistry::default();
		themes.set_field_class(Theme::Bootstrap, "text", "form-control form-control-lg");
		themes.set_field_class(Theme::None, "text", "ignored");

		assert_eq!(
			themes.field_class(Theme::Bootstrap, "text"),
			Some("form-control form-control-lg")
		);
		assert_eq!(themes.field_class(Theme::None, "text"), None);
	}

	#[rstest]
	fn test_theme_serializes_lowercase() {
		let json = serde_json::to_string(&Theme::Tailwind).unwrap();
		assert_eq!(json, "\"tailwind\"");
	}
}
