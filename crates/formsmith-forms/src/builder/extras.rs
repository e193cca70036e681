//! Composite widgets: toggles, floating labels and the honeypot

use super::FormBuilder;
use crate::field::{FieldKind, FieldRequest};
use crate::theme::Theme;
use crate::value::FormValue;
use formsmith_html::{AttrValue, Attributes, SafeString, escape};

const TAILWIND_SWITCH_TRACK: &str = "relative w-11 h-6 bg-gray-200 peer-focus:outline-none peer-focus:ring-4 peer-focus:ring-blue-300 rounded-full peer peer-checked:after:translate-x-full peer-checked:after:border-white after:content-[''] after:absolute after:top-[2px] after:left-[2px] after:bg-white after:border-gray-300 after:border after:rounded-full after:h-5 after:w-5 after:transition-all peer-checked:bg-blue-600";

const TAILWIND_FLOATING_LABEL: &str = "absolute left-4 -top-6 text-sm text-gray-600 transition-all peer-placeholder-shown:text-base peer-placeholder-shown:text-gray-400 peer-placeholder-shown:top-2 peer-focus:-top-6 peer-focus:text-gray-600 peer-focus:text-sm";

fn take_label(options: &mut Attributes) -> Option<String> {
	options
		.remove("label")
		.filter(|label| !label.is_null())
		.map(|label| label.to_text())
}

impl FormBuilder {
	/// Render an on/off switch
	///
	/// A `label` option is rendered as the switch's label and never reaches
	/// the input. Without a theme this is a plain checkbox.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FormBuilder, RouteTable};
	/// use formsmith_html::Attributes;
	///
	/// let mut form = FormBuilder::new(RouteTable::default());
	/// form.bootstrap();
	///
	/// let html = form.toggle("notify", 1, true, Attributes::new().attr("label", "Notify me"));
	/// assert_eq!(
	///     html.as_str(),
	///     concat!(
	///         r#"<div class="form-check form-switch">"#,
	///         r#"<input role="switch" checked="checked" name="notify" class="form-check-input" type="checkbox" value="1" id="notify">"#,
	///         r#"<label for="notify" class="form-check-label">Notify me</label>"#,
	///         "</div>",
	///     )
	/// );
	/// ```
	pub fn toggle(
		&mut self,
		name: &str,
		value: impl Into<FormValue>,
		checked: bool,
		mut options: Attributes,
	) -> SafeString {
		let value = value.into();
		let label = take_label(&mut options);

		match self.theme {
			Theme::Bootstrap => {
				options.set("role", "switch");
				if label.is_some() {
					self.remember_label(name);
				}

				let mut html = SafeString::from(r#"<div class="form-check form-switch">"#);
				html.push(&self.checkbox(name, value, Some(checked), options));
				if let Some(label) = label {
					let label_options = Attributes::new().class("form-check-label");
					html.push(&self.label_markup(name, Some(&label), label_options, true, false));
				}
				html.push(&SafeString::from("</div>"));
				html
			}
			Theme::Tailwind => self.tailwind_switch(name, value, checked, options, label),
			Theme::None => {
				if label.is_some() {
					self.remember_label(name);
				}
				let mut html = self.checkbox(name, value, Some(checked), options);
				if let Some(label) = label {
					html.push(&self.label(name, Some(&label), Attributes::new(), true));
				}
				html
			}
		}
	}

	fn tailwind_switch(
		&mut self,
		name: &str,
		value: FormValue,
		checked: bool,
		options: Attributes,
		label: Option<String>,
	) -> SafeString {
		let staged = self.take_staged();
		let mut options = options.over(staged.attributes);
		let checked = self.checked_state(&FieldKind::Checkbox, name, &value, Some(checked));

		let mut input = Attributes::new();
		input.set("type", "checkbox");
		input.set("name", name);
		input.set("value", value.to_attr_value());
		input.set("id", self.id_attribute(Some(name), &options));
		input.set("class", "sr-only peer");
		input.set("checked", AttrValue::Flag(checked));
		if let Some(class) = options.remove("class") {
			input.append_class(&class.to_text());
		}
		options.remove("id");
		input.extend(options);
		self.apply_a11y(&mut input, self.has_error(Some(name)));

		let mut html = format!(
			r#"<label class="inline-flex items-center cursor-pointer"><input{}><div class="{}"></div>"#,
			self.attributes(&input),
			TAILWIND_SWITCH_TRACK
		);
		if let Some(label) = label {
			html.push_str(&format!(
				r#"<span class="ml-3 text-sm font-medium text-gray-900">{}</span>"#,
				escape(&label)
			));
		}
		html.push_str("</label>");
		SafeString::new(html)
	}

	/// Render an input with a floating label
	///
	/// Without `label` the text is derived from the name.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FieldKind, FormBuilder, FormValue, RouteTable};
	/// use formsmith_html::Attributes;
	///
	/// let mut form = FormBuilder::new(RouteTable::default());
	/// form.bootstrap();
	///
	/// let html = form.floating(FieldKind::Email, "email", FormValue::Null, Attributes::new(), None);
	/// assert_eq!(
	///     html.as_str(),
	///     concat!(
	///         r#"<div class="form-floating mb-3">"#,
	///         r#"<input placeholder=" " name="email" class="form-control" type="email" id="email">"#,
	///         r#"<label for="email" class="form-label">Email</label>"#,
	///         "</div>",
	///     )
	/// );
	/// ```
	pub fn floating(
		&mut self,
		kind: FieldKind,
		name: &str,
		value: impl Into<FormValue>,
		mut options: Attributes,
		label: Option<&str>,
	) -> SafeString {
		match self.theme {
			Theme::Bootstrap => {
				options.set_default("placeholder", " ");
				self.remember_label(name);

				let mut html = SafeString::from(r#"<div class="form-floating mb-3">"#);
				html.push(&self.input(kind, name, value, options));
				html.push(&self.label(name, label, Attributes::new(), true));
				html.push(&SafeString::from("</div>"));
				html
			}
			Theme::Tailwind => {
				options.set_default("placeholder", " ");
				options.append_class("peer placeholder-transparent");
				self.remember_label(name);

				let mut html = SafeString::from(r#"<div class="relative mt-6">"#);
				html.push(&self.input(kind, name, value, options));
				let label_options = Attributes::new().class(TAILWIND_FLOATING_LABEL);
				html.push(&self.label(name, label, label_options, true));
				html.push(&SafeString::from("</div>"));
				html
			}
			Theme::None => {
				let mut html = SafeString::from("<div>");
				html.push(&self.label(name, label, Attributes::new(), true));
				html.push(&self.input(kind, name, value, options));
				html.push(&SafeString::from("</div>"));
				html
			}
		}
	}

	/// Anti-spam honeypot: a hidden text trap plus the render timestamp
	///
	/// Names default to the configured honeypot names. Neither field takes
	/// staged attributes nor old input.
	pub fn honeypot(&mut self, name: Option<&str>, time_name: Option<&str>) -> SafeString {
		let name = name.unwrap_or(&self.config.honeypot.name).to_string();
		let time_name = time_name.unwrap_or(&self.config.honeypot.time_name).to_string();

		let trap = FieldRequest::named(FieldKind::Text, name.as_str())
			.with_value("")
			.with_options(
				Attributes::new()
					.id(name.as_str())
					.attr("tabindex", -1)
					.attr("autocomplete", "off"),
			)
			.fixed();
		let timestamp = FieldRequest::named(FieldKind::Hidden, time_name)
			.with_value(chrono::Utc::now().timestamp())
			.fixed();

		let mut html = SafeString::from(r#"<div style="display:none;">"#);
		html.push(&self.render_unstaged(trap));
		html.push(&self.render_unstaged(timestamp));
		html.push(&SafeString::from("</div>"));
		html
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::source::OldInputBag;
	use crate::url::RouteTable;
	use rstest::rstest;
	use serde_json::json;

	fn builder() -> FormBuilder {
		FormBuilder::new(RouteTable::new("http://localhost"))
	}

	#[rstest]
	fn test_plain_toggle_is_a_checkbox() {
		let mut form = builder();
		assert_eq!(
			form.toggle("notify", 1, false, Attributes::new()).as_str(),
			r#"<input name="notify" type="checkbox" value="1">"#
		);
	}

	#[rstest]
	fn test_plain_toggle_with_label() {
		let mut form = builder();
		let html = form.toggle("notify", 1, false, Attributes::new().attr("label", "Notify"));
		assert_eq!(
			html.as_str(),
			r#"<input name="notify" type="checkbox" value="1" id="notify"><label for="notify">Notify</label>"#
		);
	}

	#[rstest]
	fn test_tailwind_toggle_follows_old_input() {
		let mut form = builder().with_session(OldInputBag::from_json(json!({"notify": "1"})));
		form.tailwind();
		let html = form.toggle("notify", 1, false, Attributes::new().attr("label", "<b>Notify</b>"));
		assert!(html.as_str().starts_with(
			r#"<label class="inline-flex items-center cursor-pointer"><input type="checkbox" name="notify" value="1" class="sr-only peer" checked>"#
		));
		assert!(html.as_str().contains("&lt;b&gt;Notify&lt;/b&gt;</span></label>"));
	}

	#[rstest]
	fn test_tailwind_floating_label() {
		let mut form = builder();
		form.tailwind();
		let html = form.floating(FieldKind::Text, "city", "Oslo", Attributes::new(), Some("Town"));
		assert!(html.as_str().starts_with(r#"<div class="relative mt-6"><input placeholder=" " class="peer placeholder-transparent "#));
		assert!(html.as_str().contains(r#"id="city""#));
		assert!(html.as_str().contains("peer-placeholder-shown:text-gray-400"));
		assert!(html.as_str().ends_with(">Town</label></div>"));
	}

	#[rstest]
	fn test_unthemed_floating_puts_label_first() {
		let mut form = builder();
		let html = form.floating(FieldKind::Text, "city", FormValue::Null, Attributes::new(), None);
		assert_eq!(
			html.as_str(),
			r#"<div><label for="city">City</label><input name="city" type="text" id="city"></div>"#
		);
	}

	#[rstest]
	fn test_honeypot_defaults() {
		let mut form = builder().with_session(OldInputBag::from_json(json!({"my_name": "bot"})));
		form.alpine("show", "open");
		let html = form.honeypot(None, None);
		assert!(html.as_str().starts_with(
			r#"<div style="display:none;"><input id="my_name" tabindex="-1" autocomplete="off" name="my_name" type="text" value=""><input name="my_time" type="hidden" value=""#
		));
		assert!(html.as_str().ends_with(r#""></div>"#));

		// The staged attribute is still waiting for the next field
		let next = form.text("q", FormValue::Null, Attributes::new());
		assert!(next.as_str().contains(r#"x-show="open""#));
	}

	#[rstest]
	fn test_honeypot_custom_names() {
		let mut form = builder();
		let html = form.honeypot(Some("trap"), Some("at"));
		assert!(html.as_str().contains(r#"name="trap""#));
		assert!(html.as_str().contains(r#"name="at" type="hidden""#));
	}
}
