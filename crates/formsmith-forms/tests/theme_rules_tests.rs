//! Theme class and validation rule translation tests

use formsmith_forms::{
	FieldKind, FieldRequest, FormBuilder, FormBuilderConfig, FormValue, RouteTable, Theme,
	ValidationRules, translate_rules,
};
use formsmith_html::{AttrValue, Attributes};
use rstest::*;
use std::collections::{HashMap, HashSet};

fn form_with_email_error(theme: Theme) -> FormBuilder {
	let mut form = FormBuilder::new(RouteTable::default())
		.with_errors(HashSet::from(["email".to_string()]));
	form.theme(theme);
	form
}

fn class_of(html: &str) -> Option<String> {
	let start = html.find(r#"class=""#)? + r#"class=""#.len();
	let end = html[start..].find('"')? + start;
	Some(html[start..end].to_string())
}

// =============================================================================
// Themes
// =============================================================================

#[rstest]
#[case(Theme::Bootstrap, Some("is-invalid"))]
#[case(Theme::Tailwind, Some("border-red-500"))]
#[case(Theme::None, None)]
fn test_error_class_per_theme(#[case] theme: Theme, #[case] error_class: Option<&str>) {
	let mut form = form_with_email_error(theme);
	let html = form.email("email", FormValue::Null, Attributes::new());
	let classes = class_of(html.as_str()).unwrap_or_default();

	match error_class {
		Some(error_class) => assert!(classes.split(' ').any(|class| class == error_class), "{}", html),
		None => assert_eq!(classes, ""),
	}
}

#[rstest]
fn test_error_class_only_for_fields_with_errors() {
	let mut form = form_with_email_error(Theme::Bootstrap);
	let html = form.text("name", FormValue::Null, Attributes::new());
	assert_eq!(class_of(html.as_str()).as_deref(), Some("form-control"));
}

#[rstest]
fn test_theme_class_appends_to_caller_class() {
	let mut form = FormBuilder::new(RouteTable::default());
	form.bootstrap();
	let html = form.text("name", FormValue::Null, Attributes::new().class("wide"));
	assert_eq!(class_of(html.as_str()).as_deref(), Some("wide form-control"));
}

#[rstest]
fn test_hidden_inputs_are_never_themed() {
	let mut form = FormBuilder::new(RouteTable::default());
	form.tailwind();
	let html = form.hidden("id", 5, Attributes::new());
	assert_eq!(html.as_str(), r#"<input name="id" type="hidden" value="5">"#);
}

#[rstest]
fn test_theme_switch_affects_next_render_only() {
	let mut form = FormBuilder::new(RouteTable::default());
	let plain = form.text("a", FormValue::Null, Attributes::new());
	form.bootstrap();
	let themed = form.text("a", FormValue::Null, Attributes::new());

	assert_eq!(class_of(plain.as_str()), None);
	assert_eq!(class_of(themed.as_str()).as_deref(), Some("form-control"));
}

#[rstest]
fn test_configured_theme_table_overrides_defaults() {
	let config = FormBuilderConfig::from_toml_str(
		r#"
		theme = "bootstrap"

		[themes.bootstrap]
		error = "has-error"

		[themes.bootstrap.fields]
		text = "input"
		"#,
	)
	.unwrap();
	let mut form = FormBuilder::with_config(RouteTable::default(), config)
		.with_errors(HashMap::from([("name".to_string(), vec!["Required".to_string()])]));

	let html = form.text("name", FormValue::Null, Attributes::new());
	assert_eq!(class_of(html.as_str()).as_deref(), Some("input has-error"));

	// Kinds missing from the replaced table get no class
	let email = form.email("email", FormValue::Null, Attributes::new());
	assert_eq!(class_of(email.as_str()), None);
}

#[rstest]
fn test_icon_wraps_input() {
	let mut form = FormBuilder::new(RouteTable::default());
	form.tailwind();
	let html = form.text("q", FormValue::Null, Attributes::new().attr("icon", "<svg/>"));

	assert!(html.as_str().starts_with(r#"<div class="relative">"#));
	assert!(html.as_str().contains("<svg/>"));
	assert!(html.as_str().contains(r#"class="pl-10 "#));
	assert!(!html.as_str().contains("icon="));
}

// =============================================================================
// Rule translation
// =============================================================================

#[rstest]
fn test_required_min_on_text() {
	let attrs = translate_rules(
		&ValidationRules::parse("required|min:3"),
		Attributes::new().attr("type", "text"),
	);

	assert_eq!(attrs.get("required"), Some(&AttrValue::Flag(true)));
	assert_eq!(attrs.get_text("minlength"), Some("3"));
	assert!(!attrs.contains_key("min"));
}

#[rstest]
fn test_numeric_min_max() {
	let attrs = translate_rules(&ValidationRules::parse("numeric|min:3|max:10"), Attributes::new());

	assert_eq!(attrs.get_text("type"), Some("number"));
	assert_eq!(attrs.get_text("min"), Some("3"));
	assert_eq!(attrs.get_text("max"), Some("10"));
}

#[rstest]
#[case("email", "email")]
#[case("url", "url")]
#[case("integer", "number")]
fn test_rules_set_missing_type(#[case] rules: &str, #[case] expected: &str) {
	let attrs = translate_rules(&ValidationRules::parse(rules), Attributes::new());
	assert_eq!(attrs.get_text("type"), Some(expected));
}

#[rstest]
fn test_regex_keeps_commas() {
	let attrs = translate_rules(
		&ValidationRules::parse("regex:/^[a-z]{2,4}$/"),
		Attributes::new(),
	);
	assert_eq!(attrs.get_text("pattern"), Some("^[a-z]{2,4}$"));
}

#[rstest]
fn test_staged_rules_apply_once() {
	let mut form = FormBuilder::new(RouteTable::default());
	form.rules("required|max:20");

	let first = form.text("a", FormValue::Null, Attributes::new());
	let second = form.text("b", FormValue::Null, Attributes::new());

	assert_eq!(
		first.as_str(),
		r#"<input name="a" type="text" required maxlength="20" aria-required="true">"#
	);
	assert_eq!(second.as_str(), r#"<input name="b" type="text">"#);
}

#[rstest]
fn test_explicit_rules_override_staged() {
	let mut form = FormBuilder::new(RouteTable::default());
	form.rules("required");

	let html = form.render(FieldRequest::named(FieldKind::Number, "n").with_rules("min:1"));
	assert_eq!(html.as_str(), r#"<input name="n" type="number" min="1">"#);
}
