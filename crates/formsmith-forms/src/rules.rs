//! Translation of declarative validation rules into HTML5 attribute hints
//!
//! Only a handful of rule names map onto browser-side constraints; anything
//! else is ignored. Server-side validation is still required.

use formsmith_html::Attributes;

/// Ordered rule tokens such as `required`, `min:3` or `between:1,10`
///
/// # Examples
///
/// ```
/// use formsmith_forms::ValidationRules;
///
/// let rules = ValidationRules::parse("required| min:3 |");
/// assert_eq!(rules.tokens(), ["required", "min:3"]);
///
/// let rules = ValidationRules::from(vec!["email", "max:255"]);
/// assert_eq!(rules.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationRules(Vec<String>);

impl ValidationRules {
	/// Parse a pipe-delimited rule string
	pub fn parse(rules: &str) -> Self {
		Self::from_tokens(rules.split('|'))
	}

	pub fn from_tokens<I, S>(tokens: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		Self(
			tokens
				.into_iter()
				.map(|token| token.as_ref().trim().to_string())
				.filter(|token| !token.is_empty())
				.collect(),
		)
	}

	pub fn tokens(&self) -> &[String] {
		&self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<&str> for ValidationRules {
	fn from(rules: &str) -> Self {
		Self::parse(rules)
	}
}

impl From<String> for ValidationRules {
	fn from(rules: String) -> Self {
		Self::parse(&rules)
	}
}

impl From<Vec<&str>> for ValidationRules {
	fn from(tokens: Vec<&str>) -> Self {
		Self::from_tokens(tokens)
	}
}

impl From<Vec<String>> for ValidationRules {
	fn from(tokens: Vec<String>) -> Self {
		Self::from_tokens(tokens)
	}
}

impl From<&[&str]> for ValidationRules {
	fn from(tokens: &[&str]) -> Self {
		Self::from_tokens(tokens)
	}
}

fn is_number_type(options: &Attributes) -> bool {
	options.get_text("type").unwrap_or("text") == "number"
}

fn set_type_if_unset(options: &mut Attributes, kind: &str) {
	if !options.is_set("type") {
		options.set("type", kind);
	}
}

/// Translate rules into HTML5 constraint attributes
///
/// # Examples
///
/// ```
/// use formsmith_forms::{translate_rules, ValidationRules};
/// use formsmith_html::{AttrValue, Attributes};
///
/// let options = translate_rules(
///     &ValidationRules::parse("required|min:3"),
///     Attributes::new().attr("type", "text"),
/// );
/// assert_eq!(options.get("required"), Some(&AttrValue::Flag(true)));
/// assert_eq!(options.get_text("minlength"), Some("3"));
///
/// let options = translate_rules(&ValidationRules::parse("numeric|min:3|max:10"), Attributes::new());
/// assert_eq!(options.get_text("type"), Some("number"));
/// assert_eq!(options.get_text("min"), Some("3"));
/// assert_eq!(options.get_text("max"), Some("10"));
/// ```
pub fn translate_rules(rules: &ValidationRules, mut options: Attributes) -> Attributes {
	for token in rules.tokens() {
		let (name, raw_params) = match token.split_once(':') {
			Some((name, params)) => (name.trim(), Some(params)),
			None => (token.trim(), None),
		};
		let params: Vec<&str> = raw_params
			.map(|params| params.split(',').collect())
			.unwrap_or_default();
		let first = params.first().copied().filter(|p| !p.is_empty());

		match name {
			"required" => {
				options.set("required", true);
			}
			"email" | "url" => set_type_if_unset(&mut options, name),
			"numeric" | "integer" => set_type_if_unset(&mut options, "number"),
			"min" => {
				if let Some(min) = first {
					let key = if is_number_type(&options) { "min" } else { "minlength" };
					options.set(key, min);
				}
			}
			"max" => {
				if let Some(max) = first {
					let key = if is_number_type(&options) { "max" } else { "maxlength" };
					options.set(key, max);
				}
			}
			"between" => {
				if let [min, max, ..] = params.as_slice()
					&& is_number_type(&options)
				{
					options.set("min", *min);
					options.set("max", *max);
				}
			}
			"regex" => {
				if let Some(pattern) = raw_params.filter(|p| !p.is_empty()) {
					options.set("pattern", pattern.trim_matches('/'));
				}
			}
			other => {
				tracing::trace!(rule = other, "ignoring rule without an HTML5 counterpart");
			}
		}
	}

	options
}
