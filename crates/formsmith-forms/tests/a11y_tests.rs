//! Accessibility attribute tests
//!
//! `aria-required` follows `required` on inputs, textareas and selects
//! without overriding an explicit value; `aria-invalid` marks fields the
//! error bag reports.

use formsmith_forms::{FormBuilder, FormValue, RouteTable, SelectList};
use formsmith_html::Attributes;
use proptest::prelude::*;
use rstest::*;
use std::collections::HashSet;

#[fixture]
fn form() -> FormBuilder {
	FormBuilder::new(RouteTable::new("http://localhost").with_current("/foo")).with_csrf_token("abc")
}

#[rstest]
fn test_aria_required_is_added_to_input(mut form: FormBuilder) {
	let input = form.text("name", FormValue::Null, Attributes::new().required());

	assert!(input.as_str().contains(r#"required="required""#));
	assert!(input.as_str().contains(r#"aria-required="true""#));
}

#[rstest]
fn test_aria_required_is_not_added_if_already_present(mut form: FormBuilder) {
	let options = Attributes::new().required().aria("required", "false");
	let input = form.text("name", FormValue::Null, options);

	assert!(input.as_str().contains(r#"required="required""#));
	assert!(input.as_str().contains(r#"aria-required="false""#));
	assert!(!input.as_str().contains(r#"aria-required="true""#));
}

#[rstest]
fn test_aria_required_is_added_to_textarea(mut form: FormBuilder) {
	let textarea = form.textarea("bio", FormValue::Null, Attributes::new().required());

	assert!(textarea.as_str().contains(r#"required="required""#));
	assert!(textarea.as_str().contains(r#"aria-required="true""#));
}

#[rstest]
fn test_aria_required_is_added_to_select(mut form: FormBuilder) {
	let sizes = SelectList::new().option("L", "Large").option("S", "Small");
	let select = form.select("size", sizes, FormValue::Null, Attributes::new().required());

	assert!(select.as_str().contains(r#"required="required""#));
	assert!(select.as_str().contains(r#"aria-required="true""#));
}

#[rstest]
fn test_required_rule_adds_aria_required(mut form: FormBuilder) {
	form.rules("required");
	let input = form.text("name", FormValue::Null, Attributes::new());

	assert_eq!(
		input.as_str(),
		r#"<input name="name" type="text" required aria-required="true">"#
	);
}

#[rstest]
#[case(Attributes::new().attr("required", false))]
#[case(Attributes::new().attr("required", FormValue::Null.to_attr_value()))]
#[case(Attributes::new())]
fn test_disabled_required_adds_nothing(mut form: FormBuilder, #[case] options: Attributes) {
	let input = form.text("name", FormValue::Null, options);
	assert!(!input.as_str().contains("aria-required"));
}

#[rstest]
fn test_aria_invalid_marks_fields_with_errors(form: FormBuilder) {
	let mut form = form.with_errors(HashSet::from(["email".to_string()]));

	let email = form.email("email", FormValue::Null, Attributes::new());
	assert!(email.as_str().contains(r#"aria-invalid="true""#));

	let name = form.text("name", FormValue::Null, Attributes::new());
	assert!(!name.as_str().contains("aria-invalid"));

	let kept = form.email("email", FormValue::Null, Attributes::new().aria("invalid", "false"));
	assert!(kept.as_str().contains(r#"aria-invalid="false""#));
	assert!(!kept.as_str().contains(r#"aria-invalid="true""#));
}

proptest! {
	/// `aria-required="true"` appears whenever `required` is set and no
	/// explicit `aria-required` was given; an explicit value always survives
	#[test]
	fn prop_aria_required_follows_required(
		explicit in proptest::option::of("[a-z]{1,8}"),
		required in proptest::option::of(any::<bool>()),
	) {
		let mut form = FormBuilder::new(RouteTable::default());
		let mut options = Attributes::new();
		if let Some(required) = required {
			options.set("required", required);
		}
		if let Some(explicit) = &explicit {
			options.set("aria-required", explicit.as_str());
		}

		let html = form.text("field", FormValue::Null, options).into_string();

		match (&explicit, required) {
			(Some(explicit), _) => {
				let expected = format!(r#"aria-required="{}""#, explicit);
				prop_assert!(html.contains(&expected));
				prop_assert_eq!(html.matches("aria-required").count(), 1);
			}
			(None, Some(true)) => prop_assert!(html.contains(r#"aria-required="true""#)),
			(None, _) => prop_assert!(!html.contains("aria-required")),
		}
	}
}
