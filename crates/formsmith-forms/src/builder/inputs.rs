//! Input, textarea, checkable and button elements

use super::FormBuilder;
use crate::field::{FieldKind, FieldRequest};
use crate::value::FormValue;
use formsmith_html::{Attributes, SafeString, escape};

macro_rules! input_kinds {
	($($(#[$meta:meta])* $method:ident => $kind:ident),* $(,)?) => {
		impl FormBuilder {
			$(
				$(#[$meta])*
				pub fn $method(
					&mut self,
					name: &str,
					value: impl Into<FormValue>,
					options: Attributes,
				) -> SafeString {
					self.input(FieldKind::$kind, name, value, options)
				}
			)*
		}
	};
}

input_kinds! {
	text => Text,
	range => Range,
	hidden => Hidden,
	search => Search,
	email => Email,
	tel => Tel,
	number => Number,
	/// Dates render as `YYYY-MM-DD`
	date => Date,
	datetime => DateTime,
	datetime_local => DateTimeLocal,
	/// Times render as `HH:MM`
	time => Time,
	url => Url,
	/// Dates render as ISO weeks, `YYYY-Www`
	week => Week,
	month => Month,
	color => Color,
}

impl FormBuilder {
	/// Render an `<input>` of any kind
	pub fn input(
		&mut self,
		kind: FieldKind,
		name: &str,
		value: impl Into<FormValue>,
		options: Attributes,
	) -> SafeString {
		self.render(
			FieldRequest::named(kind, name)
				.with_value(value)
				.with_options(options),
		)
	}

	/// Password inputs never repopulate and always render an empty value
	pub fn password(&mut self, name: &str, options: Attributes) -> SafeString {
		self.input(FieldKind::Password, name, "", options)
	}

	pub fn file(&mut self, name: &str, options: Attributes) -> SafeString {
		self.input(FieldKind::File, name, FormValue::Null, options)
	}

	/// Render a `<textarea>`
	///
	/// A `size` option of the form `"{cols}x{rows}"` is expanded into `cols`
	/// and `rows`; without it the configured defaults fill whichever of the
	/// two is missing.
	///
	/// # Panics
	///
	/// Panics when `size` has no `x` separator.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FormBuilder, FormValue, RouteTable};
	/// use formsmith_html::Attributes;
	///
	/// let mut form = FormBuilder::new(RouteTable::default());
	/// let html = form.textarea("bio", "<b>hi</b>", Attributes::new().attr("size", "30x5"));
	/// assert_eq!(
	///     html.as_str(),
	///     r#"<textarea name="bio" cols="30" rows="5">&lt;b&gt;hi&lt;/b&gt;</textarea>"#
	/// );
	/// ```
	pub fn textarea(&mut self, name: &str, value: impl Into<FormValue>, options: Attributes) -> SafeString {
		let staged = self.take_staged();
		let declared = Into::<FormValue>::into(value).non_null();

		let mut options = options;
		if !options.contains_key("name") {
			options.set("name", name);
		}
		let mut options = options.over(staged.attributes);

		self.apply_textarea_size(&mut options);
		self.apply_theme_class(&mut options, FieldKind::Textarea.as_str());
		let has_error = self.has_error(Some(name));
		if has_error {
			self.apply_error_class(&mut options);
		}

		let id = self.id_attribute(Some(name), &options);
		options.set("id", id);

		let value = self
			.resolve_value(&FieldKind::Textarea, Some(name), declared)
			.map(|value| value.to_display_string())
			.unwrap_or_default();

		options.remove("size");
		let mut options = self.apply_untyped_rules(options, staged.rules);
		self.apply_a11y(&mut options, has_error);

		SafeString::new(format!(
			"<textarea{}>{}</textarea>",
			self.attributes(&options),
			escape(&value)
		))
	}

	fn apply_textarea_size(&self, options: &mut Attributes) {
		if let Some(size) = options.get("size").filter(|size| !size.is_null()) {
			let size = size.to_text();
			let segments: Vec<&str> = size.split('x').collect();
			let (cols, rows) = (segments[0].to_string(), segments[1].to_string());
			options.set("cols", cols);
			options.set("rows", rows);
			return;
		}

		let defaults = self.config.textarea;
		if !options.is_set("cols") {
			options.set("cols", defaults.cols);
		}
		if !options.is_set("rows") {
			options.set("rows", defaults.rows);
		}
	}

	/// Render a checkbox
	///
	/// `checked` is the default state when neither old input nor the model
	/// says otherwise. Pass `1` as the value for a classic on/off box.
	pub fn checkbox(
		&mut self,
		name: &str,
		value: impl Into<FormValue>,
		checked: Option<bool>,
		options: Attributes,
	) -> SafeString {
		self.checkable(FieldKind::Checkbox, name, value.into(), checked, options)
	}

	/// Render a radio button; a null value falls back to the name
	pub fn radio(
		&mut self,
		name: &str,
		value: impl Into<FormValue>,
		checked: Option<bool>,
		options: Attributes,
	) -> SafeString {
		let value = match value.into() {
			FormValue::Null => FormValue::from(name),
			value => value,
		};
		self.checkable(FieldKind::Radio, name, value, checked, options)
	}

	pub(crate) fn checkable(
		&mut self,
		kind: FieldKind,
		name: &str,
		value: FormValue,
		checked: Option<bool>,
		mut options: Attributes,
	) -> SafeString {
		if self.checked_state(&kind, name, &value, checked) {
			options.set("checked", "checked");
		}
		self.input(kind, name, value, options)
	}

	pub fn submit(&mut self, value: Option<&str>, options: Attributes) -> SafeString {
		self.render(
			FieldRequest::unnamed(FieldKind::Submit)
				.with_value(value)
				.with_options(options),
		)
	}

	pub fn reset(&mut self, value: Option<&str>, options: Attributes) -> SafeString {
		self.render(
			FieldRequest::unnamed(FieldKind::Reset)
				.with_value(value)
				.with_options(options),
		)
	}

	/// Image submit button; `url` goes through the asset resolver
	pub fn image(&mut self, url: &str, name: Option<&str>, mut options: Attributes) -> SafeString {
		options.set("src", self.url.asset_url(url));
		let request = match name {
			Some(name) => FieldRequest::named(FieldKind::Image, name),
			None => FieldRequest::unnamed(FieldKind::Image),
		};
		self.render(request.with_options(options))
	}

	/// Render a `<button>`; `content` is inserted as markup, unescaped
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FormBuilder, RouteTable};
	/// use formsmith_html::Attributes;
	///
	/// let mut form = FormBuilder::new(RouteTable::default());
	/// form.bootstrap().wire_click("save");
	///
	/// let html = form.button("<i>Save</i>", Attributes::new());
	/// assert_eq!(
	///     html.as_str(),
	///     r#"<button wire:click="save" type="button" class="btn btn-primary"><i>Save</i></button>"#
	/// );
	/// ```
	pub fn button(&mut self, content: &str, options: Attributes) -> SafeString {
		let staged = self.take_staged();
		let mut options = options.over(staged.attributes);
		if !options.contains_key("type") {
			options.set("type", "button");
		}
		self.apply_theme_class(&mut options, FieldKind::Button.as_str());

		SafeString::new(format!(
			"<button{}>{}</button>",
			self.attributes(&options),
			content
		))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::source::OldInputBag;
	use crate::url::RouteTable;
	use rstest::rstest;
	use serde_json::json;
	use std::panic::AssertUnwindSafe;

	fn builder() -> FormBuilder {
		FormBuilder::new(RouteTable::new("http://localhost"))
	}

	#[rstest]
	fn test_password_ignores_old_input() {
		let mut form = builder().with_session(OldInputBag::from_json(json!({"secret": "hunter2"})));
		assert_eq!(
			form.password("secret", Attributes::new()).as_str(),
			r#"<input name="secret" type="password" value="">"#
		);
	}

	#[rstest]
	fn test_file_has_no_value() {
		let mut form = builder();
		assert_eq!(
			form.file("avatar", Attributes::new()).as_str(),
			r#"<input name="avatar" type="file">"#
		);
	}

	#[rstest]
	fn test_textarea_defaults() {
		let mut form = builder();
		assert_eq!(
			form.textarea("bio", FormValue::Null, Attributes::new()).as_str(),
			r#"<textarea name="bio" cols="50" rows="10"></textarea>"#
		);
	}

	#[rstest]
	fn test_textarea_keeps_explicit_rows() {
		let mut form = builder();
		let html = form.textarea("bio", FormValue::Null, Attributes::new().attr("rows", 3));
		assert_eq!(html.as_str(), r#"<textarea rows="3" name="bio" cols="50"></textarea>"#);
	}

	#[rstest]
	#[should_panic]
	fn test_textarea_malformed_size_panics() {
		let mut form = builder();
		form.textarea("bio", FormValue::Null, Attributes::new().attr("size", "30"));
	}

	#[rstest]
	fn test_staged_buffer_cleared_when_textarea_panics() {
		let mut form = builder();
		form.rules("required").alpine("show", "open");

		let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
			form.textarea("bio", FormValue::Null, Attributes::new().attr("size", "30"));
		}));
		assert!(result.is_err());

		let html = form.text("n", FormValue::Null, Attributes::new());
		assert_eq!(html.as_str(), r#"<input name="n" type="text">"#);
	}

	#[rstest]
	fn test_textarea_rules_use_lengths() {
		let mut form = builder();
		form.rules("required|max:500|email");
		let html = form.textarea("bio", FormValue::Null, Attributes::new());
		assert_eq!(
			html.as_str(),
			r#"<textarea name="bio" cols="50" rows="10" required maxlength="500" aria-required="true"></textarea>"#
		);
	}

	#[rstest]
	fn test_checkbox_checked_by_default() {
		let mut form = builder();
		assert_eq!(
			form.checkbox("terms", 1, Some(true), Attributes::new()).as_str(),
			r#"<input checked="checked" name="terms" type="checkbox" value="1">"#
		);
	}

	#[rstest]
	fn test_radio_value_defaults_to_name() {
		let mut form = builder();
		assert_eq!(
			form.radio("yes", FormValue::Null, None, Attributes::new()).as_str(),
			r#"<input name="yes" type="radio" value="yes">"#
		);
	}

	#[rstest]
	fn test_submit_and_reset() {
		let mut form = builder();
		assert_eq!(
			form.submit(Some("Send"), Attributes::new()).as_str(),
			r#"<input type="submit" value="Send">"#
		);
		assert_eq!(
			form.reset(None, Attributes::new()).as_str(),
			r#"<input type="reset">"#
		);
	}

	#[rstest]
	fn test_image_source_is_asset_url() {
		let mut form = builder();
		assert_eq!(
			form.image("img/go.png", None, Attributes::new()).as_str(),
			r#"<input src="http://localhost/img/go.png" type="image">"#
		);
	}

	#[rstest]
	fn test_button_keeps_explicit_type() {
		let mut form = builder();
		assert_eq!(
			form.button("Go", Attributes::new().attr("type", "submit")).as_str(),
			r#"<button type="submit">Go</button>"#
		);
	}
}
