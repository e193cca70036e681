//! Field kinds and per-render field requests

use crate::rules::ValidationRules;
use crate::value::FormValue;
use formsmith_html::Attributes;
use std::fmt;

/// Element kind of a rendered field
///
/// The kind decides the `type` attribute of inputs, the theme class looked up
/// for the element, and a few value-resolution rules (list consumption,
/// skipped value population, date formatting).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
	Text,
	Password,
	Range,
	Hidden,
	Search,
	Email,
	Tel,
	Number,
	Date,
	DateTime,
	DateTimeLocal,
	Time,
	Url,
	Week,
	Month,
	Color,
	File,
	Checkbox,
	Radio,
	Submit,
	Reset,
	Image,
	Button,
	Textarea,
	Select,
	Datalist,
	Label,
	/// Caller-supplied kind passed through verbatim
	Other(String),
}

impl FieldKind {
	pub fn as_str(&self) -> &str {
		match self {
			FieldKind::Text => "text",
			FieldKind::Password => "password",
			FieldKind::Range => "range",
			FieldKind::Hidden => "hidden",
			FieldKind::Search => "search",
			FieldKind::Email => "email",
			FieldKind::Tel => "tel",
			FieldKind::Number => "number",
			FieldKind::Date => "date",
			FieldKind::DateTime => "datetime",
			FieldKind::DateTimeLocal => "datetime-local",
			FieldKind::Time => "time",
			FieldKind::Url => "url",
			FieldKind::Week => "week",
			FieldKind::Month => "month",
			FieldKind::Color => "color",
			FieldKind::File => "file",
			FieldKind::Checkbox => "checkbox",
			FieldKind::Radio => "radio",
			FieldKind::Submit => "submit",
			FieldKind::Reset => "reset",
			FieldKind::Image => "image",
			FieldKind::Button => "button",
			FieldKind::Textarea => "textarea",
			FieldKind::Select => "select",
			FieldKind::Datalist => "datalist",
			FieldKind::Label => "label",
			FieldKind::Other(kind) => kind,
		}
	}

	/// Kinds whose rendered value is never populated from value sources
	pub fn skips_value_population(&self) -> bool {
		matches!(
			self,
			FieldKind::File | FieldKind::Password | FieldKind::Checkbox | FieldKind::Radio
		)
	}

	/// Kinds that receive a list-valued old input whole instead of one item
	/// per render
	pub fn takes_whole_list(&self) -> bool {
		matches!(self, FieldKind::Select | FieldKind::Checkbox)
	}

	/// strftime pattern for date/time values rendered into this kind
	pub fn date_format(&self) -> &'static str {
		match self {
			FieldKind::Date => "%Y-%m-%d",
			FieldKind::DateTime | FieldKind::DateTimeLocal => "%Y-%m-%dT%H:%M",
			FieldKind::Month => "%Y-%m",
			FieldKind::Time => "%H:%M",
			FieldKind::Week => "%G-W%V",
			_ => crate::value::TIMESTAMP_FORMAT,
		}
	}
}

impl From<&str> for FieldKind {
	fn from(kind: &str) -> Self {
		match kind {
			"text" => FieldKind::Text,
			"password" => FieldKind::Password,
			"range" => FieldKind::Range,
			"hidden" => FieldKind::Hidden,
			"search" => FieldKind::Search,
			"email" => FieldKind::Email,
			"tel" => FieldKind::Tel,
			"number" => FieldKind::Number,
			"date" => FieldKind::Date,
			"datetime" => FieldKind::DateTime,
			"datetime-local" => FieldKind::DateTimeLocal,
			"time" => FieldKind::Time,
			"url" => FieldKind::Url,
			"week" => FieldKind::Week,
			"month" => FieldKind::Month,
			"color" => FieldKind::Color,
			"file" => FieldKind::File,
			"checkbox" => FieldKind::Checkbox,
			"radio" => FieldKind::Radio,
			"submit" => FieldKind::Submit,
			"reset" => FieldKind::Reset,
			"image" => FieldKind::Image,
			"button" => FieldKind::Button,
			"textarea" => FieldKind::Textarea,
			"select" => FieldKind::Select,
			"datalist" => FieldKind::Datalist,
			"label" => FieldKind::Label,
			other => FieldKind::Other(other.to_string()),
		}
	}
}

impl fmt::Display for FieldKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// How the declared value of a field is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueMode {
	/// Run the value-resolution chain
	#[default]
	Resolve,
	/// Render the declared value verbatim (CSRF token, method spoofing)
	Fixed,
}

/// Everything needed to render one input element
///
/// # Examples
///
/// ```
/// use formsmith_forms::{FieldKind, FieldRequest};
/// use formsmith_html::Attributes;
///
/// let request = FieldRequest::named(FieldKind::Email, "email")
///     .with_value("a@example.com")
///     .with_options(Attributes::new().required())
///     .with_rules("max:120");
///
/// assert_eq!(request.name.as_deref(), Some("email"));
/// assert!(request.rules.is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRequest {
	pub kind: FieldKind,
	pub name: Option<String>,
	pub value: Option<FormValue>,
	pub options: Attributes,
	/// Rules translated for this render only; take precedence over rules
	/// staged with [`FormBuilder::rules`](crate::FormBuilder::rules)
	pub rules: Option<ValidationRules>,
	pub value_mode: ValueMode,
}

impl FieldRequest {
	pub fn named(kind: FieldKind, name: impl Into<String>) -> Self {
		Self {
			kind,
			name: Some(name.into()),
			value: None,
			options: Attributes::new(),
			rules: None,
			value_mode: ValueMode::Resolve,
		}
	}

	/// Request for a field without a name (submit, reset, image buttons)
	pub fn unnamed(kind: FieldKind) -> Self {
		Self {
			kind,
			name: None,
			value: None,
			options: Attributes::new(),
			rules: None,
			value_mode: ValueMode::Resolve,
		}
	}

	pub fn with_value(mut self, value: impl Into<FormValue>) -> Self {
		self.value = Into::<FormValue>::into(value).non_null();
		self
	}

	pub fn with_options(mut self, options: Attributes) -> Self {
		self.options = options;
		self
	}

	pub fn with_rules(mut self, rules: impl Into<ValidationRules>) -> Self {
		self.rules = Some(rules.into());
		self
	}

	/// Render the declared value without consulting any value source
	pub fn fixed(mut self) -> Self {
		self.value_mode = ValueMode::Fixed;
		self
	}
}
