//! HTML escaping for element bodies and attribute values
//!
//! Labels, option text and textarea bodies go through [`escape`]. Anything
//! written between the quotes of an attribute goes through [`escape_attr`],
//! which additionally encodes tabs and line breaks.

fn entity(ch: char, in_attribute: bool) -> Option<&'static str> {
	let encoded = match ch {
		'&' => "&amp;",
		'<' => "&lt;",
		'>' => "&gt;",
		'"' => "&quot;",
		'\'' => "&#x27;",
		'\t' if in_attribute => "&#9;",
		'\n' if in_attribute => "&#10;",
		'\r' if in_attribute => "&#13;",
		_ => return None,
	};
	Some(encoded)
}

fn encode(text: &str, in_attribute: bool) -> String {
	let mut out = String::with_capacity(text.len());
	for ch in text.chars() {
		match entity(ch, in_attribute) {
			Some(encoded) => out.push_str(encoded),
			None => out.push(ch),
		}
	}
	out
}

/// Escape text placed in an element body
///
/// Non-breaking spaces and other non-ASCII text pass through unchanged.
///
/// ```
/// use formsmith_html::escape;
///
/// assert_eq!(escape("Tom & Jerry"), "Tom &amp; Jerry");
/// assert_eq!(escape("<em>Admin</em>"), "&lt;em&gt;Admin&lt;/em&gt;");
/// assert_eq!(escape("O'Brien"), "O&#x27;Brien");
/// ```
pub fn escape(text: &str) -> String {
	encode(text, false)
}

/// Escape a value placed inside a double-quoted attribute
///
/// ```
/// use formsmith_html::escape_attr;
///
/// assert_eq!(escape_attr(r#"5" screen"#), "5&quot; screen");
/// assert_eq!(escape_attr("first\nsecond"), "first&#10;second");
/// ```
pub fn escape_attr(text: &str) -> String {
	encode(text, true)
}
