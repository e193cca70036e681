//! Value sources consulted while resolving field values
//!
//! The builder never owns request or session state. Prior submissions, the
//! current request, the bound model and the validation error bag are all
//! reached through the traits in this module, so any framework can plug its
//! own storage in. In-memory implementations are provided for tests and for
//! hosts that already hold the data as JSON.

use crate::key::transform_key;
use crate::value::FormValue;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// Prior-submission store ("old input") flashed after a failed submission
pub trait OldInputStore: Send + Sync {
	/// Value stored under a dotted key
	fn get(&self, key: &str) -> Option<FormValue>;

	fn has(&self, key: &str) -> bool {
		self.get(key).is_some()
	}

	/// Whether the previous submission carried no fields at all
	fn is_empty(&self) -> bool;

	/// Session CSRF token, used when the builder has none of its own
	fn token(&self) -> Option<String> {
		None
	}
}

/// Current request input
pub trait RequestInput: Send + Sync {
	fn input(&self, key: &str) -> Option<FormValue>;
}

/// Data model bound to a form with [`FormBuilder::model`](crate::FormBuilder::model)
pub trait FormModel: Send + Sync {
	/// Plain attribute lookup by dotted key
	fn get_by_key(&self, key: &str) -> Option<FormValue>;

	/// Value used to populate a field. Models exposing formatted or computed
	/// form values override this; the default is the plain lookup.
	fn form_value(&self, key: &str) -> Option<FormValue> {
		self.get_by_key(key)
	}
}

/// Validation errors of the previous submission
pub trait ErrorBag: Send + Sync {
	fn has(&self, key: &str) -> bool;
}

/// In-memory old input backed by a [`FormValue`] map
///
/// # Examples
///
/// ```
/// use formsmith_forms::{FormValue, OldInputBag, OldInputStore};
/// use serde_json::json;
///
/// let old = OldInputBag::from_json(json!({"user": {"email": "a@example.com"}}))
///     .with_token("s3cr3t");
///
/// assert_eq!(old.get("user.email"), Some(FormValue::from("a@example.com")));
/// assert_eq!(old.get("user.name"), None);
/// assert_eq!(old.token().as_deref(), Some("s3cr3t"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OldInputBag {
	input: IndexMap<String, FormValue>,
	token: Option<String>,
}

impl OldInputBag {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build from a JSON object; non-object values yield an empty bag
	pub fn from_json(value: serde_json::Value) -> Self {
		let input = match FormValue::from(value) {
			FormValue::Map(map) => map,
			_ => IndexMap::new(),
		};
		Self { input, token: None }
	}

	pub fn with_token(mut self, token: impl Into<String>) -> Self {
		self.token = Some(token.into());
		self
	}

	/// Store a value under a top-level or flat dotted key
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FormValue>) -> &mut Self {
		self.input.insert(key.into(), value.into());
		self
	}

	pub fn len(&self) -> usize {
		self.input.len()
	}
}

impl OldInputStore for OldInputBag {
	fn get(&self, key: &str) -> Option<FormValue> {
		lookup(&self.input, key)
	}

	fn is_empty(&self) -> bool {
		self.input.is_empty()
	}

	fn token(&self) -> Option<String> {
		self.token.clone()
	}
}

/// In-memory request input
///
/// Request data arrives either as decoded JSON or as raw form pairs. Raw
/// pairs are keyed by the transformed field name, and `name[]` fields
/// accumulate into a list.
///
/// # Examples
///
/// ```
/// use formsmith_forms::{FormValue, RequestBag, RequestInput};
///
/// let request = RequestBag::from_pairs([
///     ("q", "rust"),
///     ("tags[]", "a"),
///     ("tags[]", "b"),
///     ("filter[lang]", "en"),
/// ]);
///
/// assert_eq!(request.input("q"), Some(FormValue::from("rust")));
/// assert_eq!(request.input("tags"), Some(FormValue::from(vec!["a", "b"])));
/// assert_eq!(request.input("filter.lang"), Some(FormValue::from("en")));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestBag {
	data: IndexMap<String, FormValue>,
}

impl RequestBag {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_json(value: serde_json::Value) -> Self {
		let data = match FormValue::from(value) {
			FormValue::Map(map) => map,
			_ => IndexMap::new(),
		};
		Self { data }
	}

	pub fn from_pairs<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: Into<FormValue>,
	{
		let mut data: IndexMap<String, FormValue> = IndexMap::new();
		for (name, value) in pairs {
			let name = name.as_ref();
			let key = transform_key(name);
			let value = value.into();

			if !name.ends_with("[]") {
				data.insert(key, value);
				continue;
			}

			match data.get_mut(&key) {
				Some(FormValue::List(items)) => items.push(value),
				_ => {
					data.insert(key, FormValue::List(vec![value]));
				}
			}
		}
		Self { data }
	}

	/// Decode an `application/x-www-form-urlencoded` body
	///
	/// ```
	/// use formsmith_forms::{FormValue, RequestBag, RequestInput};
	///
	/// let request = RequestBag::from_urlencoded("q=form+builder&tags%5B%5D=a&tags%5B%5D=b").unwrap();
	/// assert_eq!(request.input("q"), Some(FormValue::from("form builder")));
	/// assert_eq!(request.input("tags"), Some(FormValue::from(vec!["a", "b"])));
	/// ```
	pub fn from_urlencoded(body: &str) -> Result<Self, serde_urlencoded::de::Error> {
		let pairs: Vec<(String, String)> = serde_urlencoded::from_str(body)?;
		Ok(Self::from_pairs(pairs))
	}
}

impl RequestInput for RequestBag {
	fn input(&self, key: &str) -> Option<FormValue> {
		lookup(&self.data, key)
	}
}

fn lookup(map: &IndexMap<String, FormValue>, key: &str) -> Option<FormValue> {
	if let Some(value) = map.get(key) {
		return value.clone().non_null();
	}
	let (head, rest) = key.split_once('.')?;
	map.get(head)?.get_path(rest).cloned().and_then(FormValue::non_null)
}

impl FormModel for FormValue {
	fn get_by_key(&self, key: &str) -> Option<FormValue> {
		self.get_path(key).cloned().and_then(FormValue::non_null)
	}
}

impl FormModel for serde_json::Value {
	fn get_by_key(&self, key: &str) -> Option<FormValue> {
		if key.is_empty() {
			return None;
		}

		if let Some(value) = self.as_object().and_then(|map| map.get(key)) {
			return FormValue::from(value.clone()).non_null();
		}

		let mut current = self;
		for segment in key.split('.') {
			current = match current {
				serde_json::Value::Object(map) => map.get(segment)?,
				serde_json::Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
				_ => return None,
			};
		}
		FormValue::from(current.clone()).non_null()
	}
}

/// Error map shape produced by form validation: field name to messages
impl ErrorBag for HashMap<String, Vec<String>> {
	fn has(&self, key: &str) -> bool {
		self.get(key).is_some_and(|messages| !messages.is_empty())
	}
}

impl ErrorBag for HashSet<String> {
	fn has(&self, key: &str) -> bool {
		self.contains(key)
	}
}
