//! Value resolution: old input, request, declared default, bound model

use super::FormBuilder;
use crate::field::FieldKind;
use crate::key::transform_key;
use crate::value::FormValue;
use formsmith_html::Attributes;
use std::collections::VecDeque;

/// Name whose old input never repopulates the field
const METHOD_FIELD: &str = "_method";

enum OldLookup {
	Found(FormValue),
	/// Every item of a list-valued old input has been handed out
	Exhausted,
	Missing,
}

impl FormBuilder {
	/// Resolve the value a field should render with
	///
	/// Precedence, first match wins:
	///
	/// 1. no name: the declared value
	/// 2. old input for the field (never for `_method`)
	/// 3. nothing, when old input exists but lacks this field and the kind
	///    is neither select nor checkbox; a blank submission overrides both
	///    the declared default and the model
	/// 4. the current request, when [`consider_request`](FormBuilder::consider_request) is on
	/// 5. the declared value
	/// 6. the bound model
	///
	/// A list-valued old input is handed out one item per call for kinds
	/// other than select and checkbox; once the list runs out the result is
	/// `None`.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FieldKind, FormBuilder, FormValue, OldInputBag, RouteTable};
	/// use serde_json::json;
	///
	/// let mut form = FormBuilder::new(RouteTable::default())
	///     .with_session(OldInputBag::from_json(json!({"items": ["a", "b"]})));
	///
	/// let kind = FieldKind::Text;
	/// assert_eq!(form.resolve_value(&kind, Some("items[]"), None), Some(FormValue::from("a")));
	/// assert_eq!(form.resolve_value(&kind, Some("items[]"), None), Some(FormValue::from("b")));
	/// assert_eq!(form.resolve_value(&kind, Some("items[]"), None), None);
	///
	/// // Old input exists but the field was left out of it
	/// let declared = Some(FormValue::from("default"));
	/// assert_eq!(form.resolve_value(&kind, Some("title"), declared), None);
	/// ```
	pub fn resolve_value(
		&mut self,
		kind: &FieldKind,
		name: Option<&str>,
		declared: Option<FormValue>,
	) -> Option<FormValue> {
		let declared = declared.and_then(FormValue::non_null);
		let Some(name) = name else {
			return declared;
		};
		let key = transform_key(name);
		let is_method = name == METHOD_FIELD;

		if !is_method {
			match self.take_old(kind, &key) {
				OldLookup::Found(value) => {
					tracing::trace!(key = %key, "value from old input");
					return value.non_null();
				}
				OldLookup::Exhausted => {
					tracing::trace!(key = %key, "old input list exhausted");
					return None;
				}
				OldLookup::Missing => {}
			}
		}

		if !kind.takes_whole_list()
			&& self
				.session
				.as_deref()
				.is_some_and(|session| !session.is_empty() && !session.has(&key))
		{
			tracing::trace!(key = %key, "field absent from old input, leaving it blank");
			return None;
		}

		if !is_method && let Some(value) = self.request_value(&key) {
			tracing::trace!(key = %key, "value from request");
			return Some(value);
		}

		if declared.is_some() {
			return declared;
		}

		let value = self.model_value(&key);
		if value.is_some() {
			tracing::trace!(key = %key, "value from bound model");
		}
		value
	}

	/// Resolve a field value with the kind-neutral rules of a text input
	pub fn value_attribute(&mut self, name: Option<&str>, declared: Option<FormValue>) -> Option<FormValue> {
		self.resolve_value(&FieldKind::Text, name, declared)
	}

	/// Raw old input for a field name, without advancing list cursors
	pub fn old(&self, name: &str) -> Option<FormValue> {
		self.peek_old(&transform_key(name))
	}

	/// Whether old input is attached and empty
	pub fn old_input_is_empty(&self) -> bool {
		self.session.as_deref().is_some_and(|session| session.is_empty())
	}

	/// Whether the error bag reports an error for the field
	pub fn has_error(&self, name: Option<&str>) -> bool {
		match (name, self.errors.as_deref()) {
			(Some(name), Some(errors)) => errors.has(&transform_key(name)),
			_ => false,
		}
	}

	/// `id` for a field: an explicit `id` attribute wins, then a previously
	/// labeled name
	pub fn id_attribute(&self, name: Option<&str>, attributes: &Attributes) -> Option<String> {
		if let Some(id) = attributes.get("id") {
			return (!id.is_null()).then(|| id.to_text());
		}
		name.filter(|name| self.state.labels.contains(*name))
			.map(str::to_string)
	}

	/// Whether a checkbox, radio or other checkable field renders checked
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FieldKind, FormBuilder, FormValue, OldInputBag, RouteTable};
	/// use serde_json::json;
	///
	/// let mut form = FormBuilder::new(RouteTable::default())
	///     .with_session(OldInputBag::from_json(json!({"colors": ["red", "blue"]})));
	///
	/// let checkbox = FieldKind::Checkbox;
	/// assert!(form.checked_state(&checkbox, "colors[]", &FormValue::from("red"), None));
	/// assert!(!form.checked_state(&checkbox, "colors[]", &FormValue::from("green"), Some(true)));
	/// // Submitted without this box: unchecked even when checked by default
	/// assert!(!form.checked_state(&checkbox, "terms", &FormValue::Int(1), Some(true)));
	/// ```
	pub fn checked_state(
		&mut self,
		kind: &FieldKind,
		name: &str,
		value: &FormValue,
		explicit: Option<bool>,
	) -> bool {
		match kind {
			FieldKind::Checkbox => {
				let key = transform_key(name);
				let submitted_without = self
					.session
					.as_deref()
					.is_some_and(|session| !session.is_empty() && !session.has(&key));
				if submitted_without {
					return false;
				}
				if self.missing_old_and_model(&key) {
					return explicit.unwrap_or(false);
				}

				match self.resolve_value(kind, Some(name), explicit.map(FormValue::Bool)) {
					Some(posted @ FormValue::List(_)) => posted.contains_loose(value),
					Some(posted @ FormValue::Collection(_)) => posted.contains_record_id(value),
					Some(posted) => posted.is_truthy(),
					None => false,
				}
			}
			FieldKind::Radio => {
				if self.missing_old_and_model(&transform_key(name)) {
					return explicit.unwrap_or(false);
				}
				self.compare_values(kind, name, value)
			}
			_ => self.compare_values(kind, name, value),
		}
	}

	fn compare_values(&mut self, kind: &FieldKind, name: &str, value: &FormValue) -> bool {
		self.resolve_value(kind, Some(name), None)
			.unwrap_or_default()
			.loose_eq(value)
	}

	/// Neither old input nor the model (nor the request, when considered)
	/// holds a value; never advances list cursors
	fn missing_old_and_model(&self, key: &str) -> bool {
		let missing = self.peek_old(key).is_none() && self.model_value(key).is_none();
		if missing && self.consider_request {
			return self.request_value(key).is_none();
		}
		missing
	}

	fn peek_old(&self, key: &str) -> Option<FormValue> {
		self.session.as_deref()?.get(key)
	}

	fn take_old(&mut self, kind: &FieldKind, key: &str) -> OldLookup {
		let Some(value) = self.peek_old(key) else {
			return OldLookup::Missing;
		};

		match value {
			FormValue::List(items) if !kind.takes_whole_list() => {
				let cursor = self
					.state
					.cursors
					.entry(key.to_string())
					.or_insert_with(|| VecDeque::from(items));
				match cursor.pop_front() {
					Some(item) => OldLookup::Found(item),
					None => OldLookup::Exhausted,
				}
			}
			value => OldLookup::Found(value),
		}
	}

	fn request_value(&self, key: &str) -> Option<FormValue> {
		if !self.consider_request {
			return None;
		}
		self.request.as_deref()?.input(key).and_then(FormValue::non_null)
	}

	fn model_value(&self, key: &str) -> Option<FormValue> {
		self.state
			.model
			.as_deref()?
			.form_value(key)
			.and_then(FormValue::non_null)
	}
}
