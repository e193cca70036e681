//! Attribute pipeline shared by every rendered element

use super::{FormBuilder, Staged};
use crate::field::{FieldKind, FieldRequest, ValueMode};
use crate::rules::{ValidationRules, translate_rules};
use crate::theme::Theme;
use crate::value::FormValue;
use formsmith_html::{AttrValue, Attributes, SafeString};

/// Whether an attribute is present with a value that turns it on
fn is_enabled(options: &Attributes, key: &str) -> bool {
	!matches!(
		options.get(key),
		None | Some(AttrValue::Null) | Some(AttrValue::Flag(false))
	)
}

/// Format date/time values the way the field kind expects them
pub(crate) fn format_for_kind(kind: &FieldKind, value: FormValue) -> FormValue {
	match value {
		FormValue::DateTime(dt) => FormValue::Str(dt.format(kind.date_format()).to_string()),
		value => value,
	}
}

impl FormBuilder {
	/// Render an `<input>` element, consuming anything staged for it
	///
	/// The pipeline: name, staged attributes under caller options, `id`,
	/// theme class, error class, resolved value, `type`/`value`/`id`, rule
	/// hints, accessibility attributes and finally the optional `icon` wrap.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FieldKind, FieldRequest, FormBuilder, RouteTable};
	/// use formsmith_html::Attributes;
	///
	/// let mut form = FormBuilder::new(RouteTable::default());
	/// form.bootstrap().alpine("model", "age");
	///
	/// let html = form.render(
	///     FieldRequest::named(FieldKind::Number, "age")
	///         .with_value(30)
	///         .with_rules("required|min:18"),
	/// );
	/// assert_eq!(
	///     html.as_str(),
	///     r#"<input x-model="age" name="age" class="form-control" type="number" value="30" required min="18" aria-required="true">"#
	/// );
	/// ```
	pub fn render(&mut self, request: FieldRequest) -> SafeString {
		let staged = self.take_staged();
		self.render_staged(request, staged)
	}

	/// Render without touching the staging buffer
	pub(crate) fn render_unstaged(&mut self, request: FieldRequest) -> SafeString {
		self.render_staged(request, Staged::default())
	}

	fn render_staged(&mut self, request: FieldRequest, staged: Staged) -> SafeString {
		let FieldRequest {
			kind,
			name,
			value,
			mut options,
			rules,
			value_mode,
		} = request;

		if let Some(name) = name.as_deref()
			&& !options.contains_key("name")
		{
			options.set("name", name);
		}
		let mut options = options.over(staged.attributes);

		let id = self.id_attribute(name.as_deref(), &options);

		self.apply_theme_class(&mut options, kind.as_str());
		let has_error = self.has_error(name.as_deref());
		if has_error {
			self.apply_error_class(&mut options);
		}

		let value = if kind.skips_value_population() || value_mode == ValueMode::Fixed {
			value
		} else {
			self.resolve_value(&kind, name.as_deref(), value)
		};
		let value = value.map(|value| format_for_kind(&kind, value));

		options.set("type", kind.as_str());
		options.set("value", value.as_ref().map(FormValue::to_attr_value));
		options.set("id", id);

		if let Some(rules) = rules.or(staged.rules) {
			options = translate_rules(&rules, options);
		}
		self.apply_a11y(&mut options, has_error);

		let icon = options.remove("icon").filter(|icon| !icon.is_null());
		if icon.is_some() && self.theme == Theme::Tailwind {
			prepend_class(&mut options, "pl-10");
		}

		let input = format!("<input{}>", self.attributes(&options));
		match icon {
			Some(icon) => SafeString::new(self.wrap_with_icon(&input, &icon.to_text())),
			None => SafeString::new(input),
		}
	}

	/// Append the active theme's class for `kind`
	pub(crate) fn apply_theme_class(&self, options: &mut Attributes, kind: &str) {
		if let Some(class) = self.config.themes.field_class(self.theme, kind) {
			options.append_class(class);
		}
	}

	pub(crate) fn apply_error_class(&self, options: &mut Attributes) {
		if let Some(class) = self.config.themes.error_class(self.theme) {
			options.append_class(class);
		}
	}

	/// `aria-required` mirrors `required`; `aria-invalid` marks fields with
	/// errors. Explicit values are kept.
	pub(crate) fn apply_a11y(&self, options: &mut Attributes, has_error: bool) {
		if is_enabled(options, "required") && !options.contains_key("aria-required") {
			options.set("aria-required", "true");
		}
		if has_error && !options.contains_key("aria-invalid") {
			options.set("aria-invalid", "true");
		}
	}

	/// Translate rules for elements without a `type` attribute, so `min`
	/// and `max` become length constraints and no `type` leaks in
	pub(crate) fn apply_untyped_rules(&self, options: Attributes, rules: Option<ValidationRules>) -> Attributes {
		let Some(rules) = rules else {
			return options;
		};
		if options.contains_key("type") {
			return translate_rules(&rules, options);
		}

		let mut options = options;
		options.set("type", "text");
		let mut options = translate_rules(&rules, options);
		options.remove("type");
		options
	}

	fn wrap_with_icon(&self, input: &str, icon: &str) -> String {
		match self.theme {
			Theme::Tailwind => format!(
				r#"<div class="relative"><div class="absolute inset-y-0 left-0 pl-3 flex items-center pointer-events-none"><span class="text-gray-500 sm:text-sm">{}</span></div>{}</div>"#,
				icon, input
			),
			Theme::Bootstrap => format!(
				r#"<div class="input-group"><span class="input-group-text">{}</span>{}</div>"#,
				icon, input
			),
			Theme::None => format!(r#"<div class="input-icon">{}{}</div>"#, icon, input),
		}
	}
}

fn prepend_class(options: &mut Attributes, class: &str) {
	let existing = options.get("class").map(AttrValue::to_text).unwrap_or_default();
	options.set("class", format!("{} {}", class, existing).trim().to_string());
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::NaiveDate;
	use rstest::rstest;

	#[rstest]
	#[case(FieldKind::Date, "2024-03-09")]
	#[case(FieldKind::DateTimeLocal, "2024-03-09T14:05")]
	#[case(FieldKind::DateTime, "2024-03-09T14:05")]
	#[case(FieldKind::Month, "2024-03")]
	#[case(FieldKind::Time, "14:05")]
	#[case(FieldKind::Week, "2024-W10")]
	#[case(FieldKind::Text, "2024-03-09 14:05:30")]
	fn test_format_for_kind(#[case] kind: FieldKind, #[case] expected: &str) {
		let dt = NaiveDate::from_ymd_opt(2024, 3, 9)
			.unwrap()
			.and_hms_opt(14, 5, 30)
			.unwrap();
		assert_eq!(
			format_for_kind(&kind, FormValue::DateTime(dt)),
			FormValue::from(expected)
		);
	}

	#[rstest]
	fn test_non_dates_pass_through() {
		assert_eq!(
			format_for_kind(&FieldKind::Date, FormValue::from("tomorrow")),
			FormValue::from("tomorrow")
		);
	}

	#[rstest]
	#[case(Attributes::new().attr("required", true), true)]
	#[case(Attributes::new().attr("required", "required"), true)]
	#[case(Attributes::new().attr("required", false), false)]
	#[case(Attributes::new(), false)]
	fn test_is_enabled(#[case] options: Attributes, #[case] expected: bool) {
		assert_eq!(is_enabled(&options, "required"), expected);
	}

	#[rstest]
	fn test_prepend_class() {
		let mut options = Attributes::new().class("form-input");
		prepend_class(&mut options, "pl-10");
		assert_eq!(options.get_text("class"), Some("pl-10 form-input"));

		let mut options = Attributes::new();
		prepend_class(&mut options, "pl-10");
		assert_eq!(options.get_text("class"), Some("pl-10"));
	}
}
