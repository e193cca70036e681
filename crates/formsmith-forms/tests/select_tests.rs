//! Select and option group rendering tests

use formsmith_forms::{ChoiceEnum, FormBuilder, FormValue, OldInputBag, RouteTable, SelectList};
use formsmith_html::Attributes;
use rstest::*;
use serde_json::json;

#[fixture]
fn form() -> FormBuilder {
	FormBuilder::new(RouteTable::new("http://localhost"))
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
	Draft,
	Published,
}

impl ChoiceEnum for Status {
	fn cases() -> Vec<Self> {
		vec![Status::Draft, Status::Published]
	}

	fn name(&self) -> &'static str {
		match self {
			Status::Draft => "Draft",
			Status::Published => "Published",
		}
	}
}

#[rstest]
fn test_group_and_bare_option_keep_input_order(mut form: FormBuilder) {
	let list = SelectList::from_json(json!({"A": {"x": "X", "y": "Y"}, "B": "plain"}));
	let html = form.select("letter", list, FormValue::Null, Attributes::new());

	assert_eq!(
		html.as_str(),
		concat!(
			r#"<select name="letter">"#,
			r#"<optgroup label="A"><option value="x">X</option><option value="y">Y</option></optgroup>"#,
			r#"<option value="B">plain</option>"#,
			"</select>",
		)
	);
	assert_eq!(html.as_str().matches("<optgroup").count(), 1);
}

#[rstest]
fn test_labels_and_group_names_are_escaped(mut form: FormBuilder) {
	let list = SelectList::new()
		.option("a&b", "Tom & Jerry")
		.group(r#"<"quoted">"#, SelectList::new().option(1, "<one>"));
	let html = form.select("s", list, FormValue::Null, Attributes::new());

	assert!(html.as_str().contains(r#"<option value="a&amp;b">Tom &amp; Jerry</option>"#));
	assert!(html.as_str().contains(r#"<optgroup label="&lt;&quot;quoted&quot;&gt;">"#));
	assert!(html.as_str().contains("&lt;one&gt;</option>"));
}

#[rstest]
fn test_enum_choices(mut form: FormBuilder) {
	let html = form.select("status", SelectList::from_enum::<Status>(), "Published", Attributes::new());

	assert_eq!(
		html.as_str(),
		r#"<select name="status"><option value="Draft">Draft</option><option value="Published" selected="selected">Published</option></select>"#
	);
}

#[rstest]
fn test_old_input_selects_option(form: FormBuilder) {
	let mut form = form.with_session(OldInputBag::from_json(json!({"size": "S"})));
	let sizes = SelectList::new().option("L", "Large").option("S", "Small");

	let html = form.select("size", sizes, "L", Attributes::new());
	assert_eq!(
		html.as_str(),
		r#"<select name="size"><option value="L">Large</option><option value="S" selected="selected">Small</option></select>"#
	);
}

#[rstest]
fn test_boolean_selection_against_integer_values(mut form: FormBuilder) {
	let list = SelectList::new().option(1, "Yes").option(0, "No");
	let html = form.select("active", list, false, Attributes::new());

	assert!(html.as_str().contains(r#"<option value="0" selected="selected">No</option>"#));
	assert!(html.as_str().contains(r#"<option value="1">Yes</option>"#));
}

#[rstest]
fn test_labeled_select_gets_id(mut form: FormBuilder) {
	form.label("size", None, Attributes::new(), true);
	let html = form.select("size", SelectList::new(), FormValue::Null, Attributes::new());
	assert_eq!(html.as_str(), r#"<select id="size" name="size"></select>"#);
}

#[rstest]
fn test_staged_attributes_land_on_select(mut form: FormBuilder) {
	form.wire("country");
	let html = form.select("country", SelectList::new(), FormValue::Null, Attributes::new());
	assert_eq!(html.as_str(), r#"<select wire:model="country" name="country"></select>"#);
}
