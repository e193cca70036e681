//! Rendered markup that must not be escaped again

use std::fmt;

/// A fragment of rendered form markup
///
/// Every rendering method of the form builder returns one, so a template
/// layer can embed the output verbatim. Escaping happens once, when the
/// fragment is produced.
///
/// ```
/// use formsmith_html::SafeString;
///
/// let mut field = SafeString::new(r#"<div class="mb-3">"#);
/// field.push(&SafeString::new("</div>"));
/// assert_eq!(field, r#"<div class="mb-3"></div>"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SafeString(String);

impl SafeString {
	/// Wrap markup that is already escaped
	pub fn new(markup: impl Into<String>) -> Self {
		Self(markup.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_string(self) -> String {
		self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Append another rendered fragment
	pub fn push(&mut self, fragment: &SafeString) {
		self.0.push_str(fragment.as_str());
	}
}

impl fmt::Display for SafeString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl AsRef<str> for SafeString {
	fn as_ref(&self) -> &str {
		self.as_str()
	}
}

impl From<String> for SafeString {
	fn from(markup: String) -> Self {
		Self::new(markup)
	}
}

impl From<&str> for SafeString {
	fn from(markup: &str) -> Self {
		Self::new(markup)
	}
}

impl From<SafeString> for String {
	fn from(fragment: SafeString) -> Self {
		fragment.into_string()
	}
}

impl PartialEq<str> for SafeString {
	fn eq(&self, other: &str) -> bool {
		self.as_str() == other
	}
}

impl PartialEq<&str> for SafeString {
	fn eq(&self, other: &&str) -> bool {
		self.as_str() == *other
	}
}

/// Concatenate fragments in order
impl FromIterator<SafeString> for SafeString {
	fn from_iter<I: IntoIterator<Item = SafeString>>(iter: I) -> Self {
		iter.into_iter().fold(Self::default(), |mut joined, fragment| {
			joined.push(&fragment);
			joined
		})
	}
}
