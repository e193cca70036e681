//! Facade re-export tests

use formsmith::{
	Attributes, FormBuilder, FormBuilderError, FormOptions, FormValue, OldInputBag, RouteTable,
	SelectList, Theme, escape,
};
use rstest::*;
use serde_json::json;

#[fixture]
fn form() -> FormBuilder {
	FormBuilder::new(RouteTable::new("https://example.com").with_current("/search"))
}

#[rstest]
fn test_member_crates_are_reachable() {
	assert_eq!(formsmith::html::escape("<b>"), escape("<b>"));
	assert_eq!(
		formsmith::forms::transform_key("user[address][city]"),
		"user.address.city"
	);
}

#[rstest]
fn test_builder_through_facade(mut form: FormBuilder) {
	form.theme(Theme::Bootstrap);
	let open = form.open(FormOptions::new().method("get"));
	let input = form.search("q", "rust", Attributes::new());

	assert_eq!(
		open.as_str(),
		r#"<form method="GET" action="https://example.com/search" accept-charset="UTF-8">"#
	);
	assert_eq!(
		input.as_str(),
		r#"<input name="q" class="form-control" type="search" value="rust">"#
	);
}

#[rstest]
fn test_old_input_through_facade() {
	let mut form = FormBuilder::new(RouteTable::default())
		.with_session(OldInputBag::from_json(json!({"size": "m"})));
	let html = form.select(
		"size",
		SelectList::new().option("s", "Small").option("m", "Medium"),
		FormValue::Null,
		Attributes::new(),
	);

	assert!(html.as_str().contains(r#"<option value="m" selected="selected">Medium</option>"#));
}

#[rstest]
fn test_error_type_through_facade(mut form: FormBuilder) {
	let err = form.call("missing", &[]).unwrap_err();
	assert!(matches!(err, FormBuilderError::MethodNotFound(_)));
}
