//! Dynamic values flowing through value resolution
//!
//! Old input, request data and bound models are loosely typed: a submitted
//! checkbox may come back as `"1"` while the model holds `true`. [`FormValue`]
//! carries those values and implements the loose comparison rules the
//! builder uses to decide checked and selected state.

use chrono::{NaiveDate, NaiveDateTime};
use formsmith_html::AttrValue;
use indexmap::IndexMap;

/// Full timestamp format used when a date/time value is cast to a string
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormValue {
	#[default]
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	Str(String),
	DateTime(NaiveDateTime),
	/// Ordered list, e.g. the old input of an `items[]` field
	List(Vec<FormValue>),
	/// Associative structure looked up by dotted key
	Map(IndexMap<String, FormValue>),
	/// Model collection whose members are records carrying an `id`
	Collection(Vec<FormValue>),
}

impl FormValue {
	/// Build a record collection
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::FormValue;
	/// use serde_json::json;
	///
	/// let tags = FormValue::collection([json!({"id": 1}), json!({"id": 3})]);
	/// assert!(tags.contains_record_id(&FormValue::from("3")));
	/// assert!(!tags.contains_record_id(&FormValue::from(2)));
	/// ```
	pub fn collection<I, T>(records: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<FormValue>,
	{
		FormValue::Collection(records.into_iter().map(Into::into).collect())
	}

	pub fn is_null(&self) -> bool {
		matches!(self, FormValue::Null)
	}

	/// Non-null values only
	pub fn non_null(self) -> Option<FormValue> {
		if self.is_null() { None } else { Some(self) }
	}

	/// String form of the value, as it appears in markup
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::FormValue;
	///
	/// assert_eq!(FormValue::Null.to_display_string(), "");
	/// assert_eq!(FormValue::Bool(true).to_display_string(), "1");
	/// assert_eq!(FormValue::Bool(false).to_display_string(), "");
	/// assert_eq!(FormValue::Float(3.0).to_display_string(), "3");
	/// assert_eq!(FormValue::from(vec!["a", "b"]).to_display_string(), "a,b");
	/// ```
	pub fn to_display_string(&self) -> String {
		match self {
			FormValue::Null => String::new(),
			FormValue::Bool(true) => "1".to_string(),
			FormValue::Bool(false) => String::new(),
			FormValue::Int(n) => n.to_string(),
			FormValue::Float(f) => f.to_string(),
			FormValue::Str(s) => s.clone(),
			FormValue::DateTime(dt) => dt.format(TIMESTAMP_FORMAT).to_string(),
			FormValue::List(items) | FormValue::Collection(items) => items
				.iter()
				.map(FormValue::to_display_string)
				.collect::<Vec<_>>()
				.join(","),
			FormValue::Map(_) => self.to_json().to_string(),
		}
	}

	/// Boolean coercion
	pub fn is_truthy(&self) -> bool {
		match self {
			FormValue::Null => false,
			FormValue::Bool(b) => *b,
			FormValue::Int(n) => *n != 0,
			FormValue::Float(f) => *f != 0.0,
			FormValue::Str(s) => !(s.is_empty() || s == "0"),
			FormValue::DateTime(_) => true,
			FormValue::List(items) | FormValue::Collection(items) => !items.is_empty(),
			FormValue::Map(map) => !map.is_empty(),
		}
	}

	fn as_number(&self) -> Option<f64> {
		match self {
			FormValue::Int(n) => Some(*n as f64),
			FormValue::Float(f) => Some(*f),
			FormValue::Str(s) => numeric_str(s),
			_ => None,
		}
	}

	/// Type-juggling equality
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::FormValue;
	///
	/// assert!(FormValue::from("1").loose_eq(&FormValue::Int(1)));
	/// assert!(FormValue::Bool(true).loose_eq(&FormValue::from("yes")));
	/// assert!(FormValue::Null.loose_eq(&FormValue::from("")));
	/// assert!(FormValue::from("1.0").loose_eq(&FormValue::from("1")));
	/// assert!(!FormValue::from("abc").loose_eq(&FormValue::Int(0)));
	/// ```
	pub fn loose_eq(&self, other: &FormValue) -> bool {
		use FormValue::*;

		match (self, other) {
			(Null, Null) => true,
			(Bool(flag), value) | (value, Bool(flag)) => *flag == value.is_truthy(),
			(Null, value) | (value, Null) => match value {
				Str(s) => s.is_empty(),
				_ => !value.is_truthy(),
			},
			(Int(a), Int(b)) => a == b,
			(number @ (Int(_) | Float(_)), Str(s)) | (Str(s), number @ (Int(_) | Float(_))) => {
				match (number.as_number(), numeric_str(s)) {
					(Some(a), Some(b)) => a == b,
					_ => number.to_display_string() == *s,
				}
			}
			(Int(_) | Float(_), Int(_) | Float(_)) => self.as_number() == other.as_number(),
			(Str(a), Str(b)) => match (numeric_str(a), numeric_str(b)) {
				(Some(x), Some(y)) => x == y,
				_ => a == b,
			},
			(DateTime(a), DateTime(b)) => a == b,
			(DateTime(_), Str(_)) | (Str(_), DateTime(_)) => {
				self.to_display_string() == other.to_display_string()
			}
			(List(a) | Collection(a), List(b) | Collection(b)) => {
				a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loose_eq(y))
			}
			(Map(a), Map(b)) => {
				a.len() == b.len()
					&& a
						.iter()
						.all(|(key, x)| b.get(key).is_some_and(|y| x.loose_eq(y)))
			}
			_ => false,
		}
	}

	/// Loose membership test against a list or collection
	pub fn contains_loose(&self, needle: &FormValue) -> bool {
		match self {
			FormValue::List(items) | FormValue::Collection(items) => {
				items.iter().any(|item| item.loose_eq(needle))
			}
			_ => false,
		}
	}

	/// Whether a collection holds a record whose `id` loosely equals `id`
	pub fn contains_record_id(&self, id: &FormValue) -> bool {
		match self {
			FormValue::Collection(records) | FormValue::List(records) => records
				.iter()
				.filter_map(|record| record.get_path("id"))
				.any(|record_id| record_id.loose_eq(id)),
			_ => false,
		}
	}

	/// Look up a dotted key (`user.address.city`, `items.0`)
	///
	/// A literal top-level key wins over the dotted walk, so flat stores keyed
	/// by full dotted names resolve as well as nested ones.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::FormValue;
	/// use serde_json::json;
	///
	/// let data = FormValue::from(json!({"user": {"tags": ["a", "b"]}, "a.b": 1}));
	/// assert_eq!(data.get_path("user.tags.1"), Some(&FormValue::from("b")));
	/// assert_eq!(data.get_path("a.b"), Some(&FormValue::Int(1)));
	/// assert_eq!(data.get_path("user.missing"), None);
	/// ```
	pub fn get_path(&self, key: &str) -> Option<&FormValue> {
		if key.is_empty() {
			return None;
		}

		if let FormValue::Map(map) = self
			&& let Some(value) = map.get(key)
		{
			return Some(value);
		}

		let mut current = self;
		for segment in key.split('.') {
			current = match current {
				FormValue::Map(map) => map.get(segment)?,
				FormValue::List(items) | FormValue::Collection(items) => {
					items.get(segment.parse::<usize>().ok()?)?
				}
				_ => return None,
			};
		}
		Some(current)
	}

	/// Number of entries for containers, zero for scalars
	pub fn len(&self) -> usize {
		match self {
			FormValue::List(items) | FormValue::Collection(items) => items.len(),
			FormValue::Map(map) => map.len(),
			_ => 0,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn to_json(&self) -> serde_json::Value {
		use serde_json::Value;

		match self {
			FormValue::Null => Value::Null,
			FormValue::Bool(b) => Value::Bool(*b),
			FormValue::Int(n) => Value::from(*n),
			FormValue::Float(f) => serde_json::Number::from_f64(*f)
				.map(Value::Number)
				.unwrap_or(Value::Null),
			FormValue::Str(s) => Value::String(s.clone()),
			FormValue::DateTime(_) => Value::String(self.to_display_string()),
			FormValue::List(items) | FormValue::Collection(items) => {
				Value::Array(items.iter().map(FormValue::to_json).collect())
			}
			FormValue::Map(map) => Value::Object(
				map.iter()
					.map(|(key, value)| (key.clone(), value.to_json()))
					.collect(),
			),
		}
	}

	/// Convert into an attribute value for rendering
	pub fn to_attr_value(&self) -> AttrValue {
		match self {
			FormValue::Null => AttrValue::Null,
			FormValue::Bool(b) => AttrValue::Flag(*b),
			_ => AttrValue::Text(self.to_display_string()),
		}
	}
}

/// Parse a numeric string the way form input is compared
fn numeric_str(s: &str) -> Option<f64> {
	let trimmed = s.trim();
	let first = trimmed.chars().next()?;
	if !(first.is_ascii_digit() || matches!(first, '-' | '+' | '.')) {
		return None;
	}
	trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl From<&str> for FormValue {
	fn from(value: &str) -> Self {
		FormValue::Str(value.to_string())
	}
}

impl From<String> for FormValue {
	fn from(value: String) -> Self {
		FormValue::Str(value)
	}
}

impl From<bool> for FormValue {
	fn from(value: bool) -> Self {
		FormValue::Bool(value)
	}
}

macro_rules! impl_from_int {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for FormValue {
				fn from(value: $ty) -> Self {
					FormValue::Int(value as i64)
				}
			}
		)*
	};
}

impl_from_int!(i32, i64, u8, u32);

impl From<usize> for FormValue {
	fn from(value: usize) -> Self {
		FormValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
	}
}

impl From<f64> for FormValue {
	fn from(value: f64) -> Self {
		FormValue::Float(value)
	}
}

impl From<NaiveDateTime> for FormValue {
	fn from(value: NaiveDateTime) -> Self {
		FormValue::DateTime(value)
	}
}

impl From<NaiveDate> for FormValue {
	fn from(value: NaiveDate) -> Self {
		FormValue::DateTime(value.and_time(chrono::NaiveTime::MIN))
	}
}

impl<T: Into<FormValue>> From<Vec<T>> for FormValue {
	fn from(value: Vec<T>) -> Self {
		FormValue::List(value.into_iter().map(Into::into).collect())
	}
}

impl<T: Into<FormValue>> From<Option<T>> for FormValue {
	fn from(value: Option<T>) -> Self {
		value.map(Into::into).unwrap_or(FormValue::Null)
	}
}

impl From<IndexMap<String, FormValue>> for FormValue {
	fn from(value: IndexMap<String, FormValue>) -> Self {
		FormValue::Map(value)
	}
}

impl From<serde_json::Value> for FormValue {
	fn from(value: serde_json::Value) -> Self {
		use serde_json::Value;

		match value {
			Value::Null => FormValue::Null,
			Value::Bool(b) => FormValue::Bool(b),
			Value::Number(n) => match n.as_i64() {
				Some(i) => FormValue::Int(i),
				None => n.as_f64().map(FormValue::Float).unwrap_or(FormValue::Null),
			},
			Value::String(s) => FormValue::Str(s),
			Value::Array(items) => FormValue::List(items.into_iter().map(Into::into).collect()),
			Value::Object(map) => FormValue::Map(
				map.into_iter()
					.map(|(key, value)| (key, FormValue::from(value)))
					.collect(),
			),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(FormValue::Null, FormValue::Bool(false), true)]
	#[case(FormValue::Null, FormValue::Int(0), true)]
	#[case(FormValue::Null, FormValue::from("0"), false)]
	#[case(FormValue::Int(1), FormValue::Bool(true), true)]
	#[case(FormValue::Int(0), FormValue::Bool(true), false)]
	#[case(FormValue::from("abc"), FormValue::from("ABC"), false)]
	#[case(FormValue::from("10"), FormValue::Float(10.0), true)]
	#[case(FormValue::from(" 1"), FormValue::Int(1), true)]
	#[case(FormValue::from(vec![1, 2]), FormValue::from(vec!["1", "2"]), true)]
	#[case(FormValue::from(vec![1, 2]), FormValue::from(vec![1]), false)]
	fn test_loose_eq(#[case] left: FormValue, #[case] right: FormValue, #[case] expected: bool) {
		assert_eq!(left.loose_eq(&right), expected);
		assert_eq!(right.loose_eq(&left), expected);
	}

	#[rstest]
	#[case(FormValue::from("0"), false)]
	#[case(FormValue::from("0.0"), true)]
	#[case(FormValue::from(""), false)]
	#[case(FormValue::List(vec![]), false)]
	#[case(FormValue::Float(0.5), true)]
	fn test_truthiness(#[case] value: FormValue, #[case] expected: bool) {
		assert_eq!(value.is_truthy(), expected);
	}

	#[rstest]
	fn test_from_json_preserves_object_order() {
		let value = FormValue::from(json!({"z": 1, "a": 2, "m": 3}));
		let FormValue::Map(map) = value else {
			panic!("expected map");
		};
		let keys: Vec<&str> = map.keys().map(String::as_str).collect();
		assert_eq!(keys, vec!["z", "a", "m"]);
	}

	#[rstest]
	fn test_date_display_is_full_timestamp() {
		let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
		assert_eq!(
			FormValue::from(date).to_display_string(),
			"2024-02-29 00:00:00"
		);
	}

	#[rstest]
	fn test_map_attr_value_is_json() {
		let value = FormValue::from(json!({"open": false}));
		assert_eq!(
			value.to_attr_value(),
			AttrValue::Text(r#"{"open":false}"#.to_string())
		);
	}
}
