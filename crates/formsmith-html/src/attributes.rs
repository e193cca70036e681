//! Ordered HTML attribute maps and their serialization
//!
//! [`Attributes`] keeps insertion order, so the rendered attribute string is
//! deterministic: keys appear in the order they were first inserted, and
//! re-inserting an existing key replaces its value in place.

use crate::escape::escape_attr;
use indexmap::IndexMap;

/// A single attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
	/// Omitted from the rendered output
	Null,
	/// `true` renders a bare flag, `false` is omitted
	Flag(bool),
	/// Escaped and quoted
	Text(String),
	/// Space-joined, then escaped and quoted (e.g. class lists)
	List(Vec<String>),
}

impl AttrValue {
	/// Text content of the value, if it carries any
	pub fn as_text(&self) -> Option<&str> {
		match self {
			AttrValue::Text(text) => Some(text),
			_ => None,
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, AttrValue::Null)
	}

	/// The value as it would appear between the quotes, before escaping
	pub fn to_text(&self) -> String {
		match self {
			AttrValue::Null | AttrValue::Flag(false) => String::new(),
			AttrValue::Flag(true) => "1".to_string(),
			AttrValue::Text(text) => text.clone(),
			AttrValue::List(items) => items.join(" "),
		}
	}
}

impl From<&str> for AttrValue {
	fn from(value: &str) -> Self {
		AttrValue::Text(value.to_string())
	}
}

impl From<String> for AttrValue {
	fn from(value: String) -> Self {
		AttrValue::Text(value)
	}
}

impl From<&String> for AttrValue {
	fn from(value: &String) -> Self {
		AttrValue::Text(value.clone())
	}
}

impl From<bool> for AttrValue {
	fn from(value: bool) -> Self {
		AttrValue::Flag(value)
	}
}

macro_rules! impl_from_number {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for AttrValue {
				fn from(value: $ty) -> Self {
					AttrValue::Text(value.to_string())
				}
			}
		)*
	};
}

impl_from_number!(i32, i64, u32, u64, usize, f64);

impl From<Vec<String>> for AttrValue {
	fn from(value: Vec<String>) -> Self {
		AttrValue::List(value)
	}
}

impl From<Vec<&str>> for AttrValue {
	fn from(value: Vec<&str>) -> Self {
		AttrValue::List(value.into_iter().map(str::to_string).collect())
	}
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
	fn from(value: Option<T>) -> Self {
		value.map(Into::into).unwrap_or(AttrValue::Null)
	}
}

/// Ordered attribute map with builder helpers for common attributes
///
/// # Examples
///
/// ```
/// use formsmith_html::Attributes;
///
/// let attrs = Attributes::new()
///     .class("form-control")
///     .data("id", "123")
///     .aria("label", "Username")
///     .required();
///
/// assert_eq!(attrs.get_text("class"), Some("form-control"));
/// assert_eq!(attrs.get_text("data-id"), Some("123"));
/// assert!(attrs.is_set("required"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
	entries: IndexMap<String, AttrValue>,
}

impl Attributes {
	pub fn new() -> Self {
		Self {
			entries: IndexMap::new(),
		}
	}

	/// Add or replace an attribute
	pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
		self.set(key, value);
		self
	}

	/// Add a data-* attribute
	pub fn data(self, key: impl AsRef<str>, value: impl Into<AttrValue>) -> Self {
		let key = format!("data-{}", key.as_ref());
		self.attr(key, value)
	}

	/// Add an ARIA attribute
	pub fn aria(self, key: impl AsRef<str>, value: impl Into<AttrValue>) -> Self {
		let key = format!("aria-{}", key.as_ref());
		self.attr(key, value)
	}

	/// Append a CSS class to the `class` attribute
	pub fn class(mut self, class: impl AsRef<str>) -> Self {
		self.append_class(class.as_ref());
		self
	}

	pub fn id(self, value: impl Into<AttrValue>) -> Self {
		self.attr("id", value)
	}

	pub fn placeholder(self, value: impl Into<AttrValue>) -> Self {
		self.attr("placeholder", value)
	}

	pub fn required(self) -> Self {
		self.attr("required", "required")
	}

	pub fn disabled(self) -> Self {
		self.attr("disabled", "disabled")
	}

	pub fn readonly(self) -> Self {
		self.attr("readonly", "readonly")
	}

	/// Insert an attribute, keeping the original position of an existing key
	pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Option<AttrValue> {
		self.entries.insert(key.into(), value.into())
	}

	/// Insert only when the key is absent
	pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
		self.entries.entry(key.into()).or_insert_with(|| value.into());
	}

	pub fn get(&self, key: &str) -> Option<&AttrValue> {
		self.entries.get(key)
	}

	pub fn get_text(&self, key: &str) -> Option<&str> {
		self.entries.get(key).and_then(AttrValue::as_text)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	/// Whether the key is present with a non-null value
	pub fn is_set(&self, key: &str) -> bool {
		self.entries.get(key).is_some_and(|value| !value.is_null())
	}

	/// Remove an attribute, preserving the order of the remaining ones
	pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
		self.entries.shift_remove(key)
	}

	/// Append a class to the `class` attribute, space-joined and trimmed
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_html::Attributes;
	///
	/// let mut attrs = Attributes::new().attr("class", "wide");
	/// attrs.append_class("form-control");
	/// attrs.append_class("");
	/// assert_eq!(attrs.get_text("class"), Some("wide form-control"));
	/// ```
	pub fn append_class(&mut self, class: &str) {
		let existing = self
			.entries
			.get("class")
			.map(AttrValue::to_text)
			.unwrap_or_default();
		let joined = format!("{} {}", existing, class);
		self.entries
			.insert("class".to_string(), AttrValue::Text(joined.trim().to_string()));
	}

	/// Merge `other` into `self`; keys of `other` win
	pub fn extend(&mut self, other: Attributes) {
		for (key, value) in other.entries {
			self.entries.insert(key, value);
		}
	}

	/// Return `self` laid over `base`: `base` keys keep their order, `self`
	/// values win, and new keys of `self` are appended.
	pub fn over(self, mut base: Attributes) -> Attributes {
		base.extend(self);
		base
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
		self.entries.iter().map(|(key, value)| (key.as_str(), value))
	}
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
	K: Into<String>,
	V: Into<AttrValue>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut attrs = Attributes::new();
		for (key, value) in iter {
			attrs.set(key, value);
		}
		attrs
	}
}

impl<K, V, const N: usize> From<[(K, V); N]> for Attributes
where
	K: Into<String>,
	V: Into<AttrValue>,
{
	fn from(pairs: [(K, V); N]) -> Self {
		pairs.into_iter().collect()
	}
}

impl IntoIterator for Attributes {
	type Item = (String, AttrValue);
	type IntoIter = indexmap::map::IntoIter<String, AttrValue>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}

/// Serializes an attribute map into the text placed after a tag name
pub trait AttributeRenderer: Send + Sync {
	/// Render the attributes; a non-empty result starts with a single space
	fn render(&self, attributes: &Attributes) -> String;
}

/// Default renderer producing `key="value"` pairs in insertion order
///
/// # Examples
///
/// ```
/// use formsmith_html::{AttributeRenderer, Attributes, HtmlAttributeRenderer};
///
/// let attrs = Attributes::new()
///     .attr("name", "q")
///     .attr("autofocus", true)
///     .attr("disabled", false)
///     .attr("title", "a \"quoted\" title");
///
/// assert_eq!(
///     HtmlAttributeRenderer.render(&attrs),
///     r#" name="q" autofocus title="a &quot;quoted&quot; title""#
/// );
/// assert_eq!(HtmlAttributeRenderer.render(&Attributes::new()), "");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlAttributeRenderer;

impl HtmlAttributeRenderer {
	fn element(key: &str, value: &AttrValue) -> Option<String> {
		match value {
			AttrValue::Null => None,
			AttrValue::Flag(flag) if key == "value" => {
				Some(format!(r#"value="{}""#, if *flag { "1" } else { "" }))
			}
			AttrValue::Flag(true) => Some(key.to_string()),
			AttrValue::Flag(false) => None,
			AttrValue::Text(text) => Some(format!(r#"{}="{}""#, key, escape_attr(text))),
			AttrValue::List(items) => Some(format!(
				r#"{}="{}""#,
				key,
				escape_attr(&items.join(" "))
			)),
		}
	}
}

impl AttributeRenderer for HtmlAttributeRenderer {
	fn render(&self, attributes: &Attributes) -> String {
		let parts: Vec<String> = attributes
			.iter()
			.filter_map(|(key, value)| Self::element(key, value))
			.collect();

		if parts.is_empty() {
			String::new()
		} else {
			format!(" {}", parts.join(" "))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_widget_attrs_multiple_classes() {
		let attrs = Attributes::new().class("form-control").class("is-valid");

		assert_eq!(attrs.get_text("class"), Some("form-control is-valid"));
	}

	#[rstest]
	fn test_reinsert_keeps_position() {
		let mut attrs = Attributes::from([("name", "a"), ("type", "text")]);
		attrs.set("name", "b");

		let keys: Vec<&str> = attrs.keys().collect();
		assert_eq!(keys, vec!["name", "type"]);
		assert_eq!(attrs.get_text("name"), Some("b"));
	}

	#[rstest]
	fn test_over_merges_like_array_merge() {
		let pending = Attributes::from([("x-model", "email"), ("class", "pending")]);
		let options = Attributes::from([("class", "caller"), ("name", "email")]);

		let merged = options.over(pending);

		let keys: Vec<&str> = merged.keys().collect();
		assert_eq!(keys, vec!["x-model", "class", "name"]);
		assert_eq!(merged.get_text("class"), Some("caller"));
	}

	#[rstest]
	fn test_remove_preserves_order() {
		let mut attrs = Attributes::from([("a", "1"), ("b", "2"), ("c", "3")]);
		attrs.remove("b");

		assert_eq!(HtmlAttributeRenderer.render(&attrs), r#" a="1" c="3""#);
	}

	#[rstest]
	#[case(AttrValue::Null, "")]
	#[case(AttrValue::Flag(true), " required")]
	#[case(AttrValue::Flag(false), "")]
	#[case(AttrValue::Text("<x>".into()), r#" required="&lt;x&gt;""#)]
	fn test_render_single_value(#[case] value: AttrValue, #[case] expected: &str) {
		let attrs = Attributes::new().attr("required", value);
		assert_eq!(HtmlAttributeRenderer.render(&attrs), expected);
	}

	#[rstest]
	#[case(true, r#" value="1""#)]
	#[case(false, r#" value="""#)]
	fn test_render_boolean_value_attribute(#[case] flag: bool, #[case] expected: &str) {
		let attrs = Attributes::new().attr("value", flag);
		assert_eq!(HtmlAttributeRenderer.render(&attrs), expected);
	}

	#[rstest]
	fn test_render_class_list() {
		let attrs = Attributes::new().attr("class", vec!["btn", "btn-primary"]);
		assert_eq!(
			HtmlAttributeRenderer.render(&attrs),
			r#" class="btn btn-primary""#
		);
	}

	#[rstest]
	fn test_is_set_ignores_null() {
		let attrs = Attributes::new()
			.attr("id", AttrValue::Null)
			.attr("name", "x");

		assert!(attrs.contains_key("id"));
		assert!(!attrs.is_set("id"));
		assert!(attrs.is_set("name"));
	}
}
