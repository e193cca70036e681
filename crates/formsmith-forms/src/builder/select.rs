//! Select boxes, option groups and datalists

use super::FormBuilder;
use crate::field::FieldKind;
use crate::value::FormValue;
use chrono::{Datelike, NaiveDate, Utc};
use formsmith_html::{AttrValue, Attributes, SafeString, escape, escape_attr};
use std::collections::HashMap;
use std::fmt::Write;

/// Indentation added per nesting level of option groups
const GROUP_INDENT: usize = 5;

/// One entry of a [`SelectList`]
#[derive(Debug, Clone, PartialEq)]
pub enum SelectEntry {
	Option { value: FormValue, label: String },
	Group { label: String, entries: Vec<SelectEntry> },
}

/// Ordered choices of a select box
///
/// # Examples
///
/// ```
/// use formsmith_forms::{FormValue, SelectEntry, SelectList};
/// use serde_json::json;
///
/// let list = SelectList::new()
///     .option("nl", "Netherlands")
///     .group("Asia", SelectList::new().option("jp", "Japan"));
/// assert_eq!(list.len(), 2);
///
/// let parsed = SelectList::from_json(json!({"1": "One", "Even": {"2": "Two"}}));
/// assert_eq!(
///     parsed.entries()[0],
///     SelectEntry::Option { value: FormValue::Int(1), label: "One".to_string() }
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectList {
	entries: Vec<SelectEntry>,
}

/// Enumerations usable as a select list
///
/// Each case becomes an option whose value is [`ChoiceEnum::value`] and
/// whose label is [`ChoiceEnum::name`].
pub trait ChoiceEnum: Sized {
	fn cases() -> Vec<Self>;

	fn name(&self) -> &'static str;

	/// Submitted value; the case name unless the enum is backed by values
	fn value(&self) -> FormValue {
		FormValue::from(self.name())
	}
}

/// Integer-looking keys become integers, like keys of an associative array
fn list_key(key: &str) -> FormValue {
	match key.parse::<i64>() {
		Ok(n) if n.to_string() == key => FormValue::Int(n),
		_ => FormValue::from(key),
	}
}

fn json_label(value: &serde_json::Value) -> String {
	match value {
		serde_json::Value::String(s) => s.clone(),
		other => FormValue::from(other.clone()).to_display_string(),
	}
}

impl SelectList {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn option(mut self, value: impl Into<FormValue>, label: impl Into<String>) -> Self {
		self.entries.push(SelectEntry::Option {
			value: value.into(),
			label: label.into(),
		});
		self
	}

	pub fn group(mut self, label: impl Into<String>, list: SelectList) -> Self {
		self.entries.push(SelectEntry::Group {
			label: label.into(),
			entries: list.entries,
		});
		self
	}

	pub fn push(&mut self, entry: SelectEntry) {
		self.entries.push(entry);
	}

	pub fn entries(&self) -> &[SelectEntry] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Build from JSON: object members become options keyed by member name,
	/// nested objects and arrays become groups, arrays are keyed by index
	pub fn from_json(value: serde_json::Value) -> Self {
		let members: Vec<(FormValue, serde_json::Value)> = match value {
			serde_json::Value::Object(map) => map
				.into_iter()
				.map(|(key, value)| (list_key(&key), value))
				.collect(),
			serde_json::Value::Array(items) => items
				.into_iter()
				.enumerate()
				.map(|(index, value)| (FormValue::from(index), value))
				.collect(),
			_ => Vec::new(),
		};

		let entries = members
			.into_iter()
			.map(|(key, value)| match value {
				nested @ (serde_json::Value::Object(_) | serde_json::Value::Array(_)) => SelectEntry::Group {
					label: key.to_display_string(),
					entries: Self::from_json(nested).entries,
				},
				scalar => SelectEntry::Option {
					value: key,
					label: json_label(&scalar),
				},
			})
			.collect();
		Self { entries }
	}

	/// Options whose value and label are the same
	pub fn from_values<I, V>(values: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: Into<FormValue>,
	{
		values
			.into_iter()
			.map(|value| {
				let value = value.into();
				let label = value.to_display_string();
				(value, label)
			})
			.collect()
	}

	/// One option per enum case
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{ChoiceEnum, FormValue, SelectEntry, SelectList};
	///
	/// enum Size { Small, Large }
	///
	/// impl ChoiceEnum for Size {
	///     fn cases() -> Vec<Self> { vec![Size::Small, Size::Large] }
	///     fn name(&self) -> &'static str {
	///         match self { Size::Small => "Small", Size::Large => "Large" }
	///     }
	///     fn value(&self) -> FormValue {
	///         match self { Size::Small => "s".into(), Size::Large => "l".into() }
	///     }
	/// }
	///
	/// let list = SelectList::from_enum::<Size>();
	/// assert_eq!(
	///     list.entries()[1],
	///     SelectEntry::Option { value: FormValue::from("l"), label: "Large".to_string() }
	/// );
	/// ```
	pub fn from_enum<E: ChoiceEnum>() -> Self {
		E::cases()
			.into_iter()
			.map(|case| (case.value(), case.name()))
			.collect()
	}

	fn options(&self) -> impl Iterator<Item = (&FormValue, &str)> {
		fn walk<'a>(entries: &'a [SelectEntry], out: &mut Vec<(&'a FormValue, &'a str)>) {
			for entry in entries {
				match entry {
					SelectEntry::Option { value, label } => out.push((value, label.as_str())),
					SelectEntry::Group { entries, .. } => walk(entries, out),
				}
			}
		}

		let mut out = Vec::new();
		walk(&self.entries, &mut out);
		out.into_iter()
	}
}

impl<V, L> FromIterator<(V, L)> for SelectList
where
	V: Into<FormValue>,
	L: Into<String>,
{
	fn from_iter<T: IntoIterator<Item = (V, L)>>(iter: T) -> Self {
		iter.into_iter()
			.fold(SelectList::new(), |list, (value, label)| list.option(value, label))
	}
}

/// Attributes of a select box, its options and its option groups
///
/// Option attributes are keyed by the option value as a string; option
/// group attributes by the group label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectAttributes {
	pub select: Attributes,
	pub options: HashMap<String, Attributes>,
	pub optgroups: HashMap<String, Attributes>,
}

impl SelectAttributes {
	pub fn new(select: Attributes) -> Self {
		Self {
			select,
			..Self::default()
		}
	}

	pub fn option(mut self, value: impl Into<String>, attributes: Attributes) -> Self {
		self.options.insert(value.into(), attributes);
		self
	}

	pub fn optgroup(mut self, label: impl Into<String>, attributes: Attributes) -> Self {
		self.optgroups.insert(label.into(), attributes);
		self
	}
}

impl From<Attributes> for SelectAttributes {
	fn from(select: Attributes) -> Self {
		Self::new(select)
	}
}

/// Whether an option value counts as selected
fn is_selected(value: &FormValue, selected: &FormValue) -> bool {
	match (value, selected) {
		(_, FormValue::List(items)) => {
			let as_string = FormValue::from(value.to_display_string());
			items.iter().any(|item| item == value || *item == as_string)
		}
		(_, FormValue::Collection(_)) => selected.contains_loose(value),
		(FormValue::Int(n), FormValue::Bool(flag)) => (*n != 0) == *flag,
		_ => value.to_display_string() == selected.to_display_string(),
	}
}

fn selected_attr(selected: bool) -> AttrValue {
	if selected {
		AttrValue::from("selected")
	} else {
		AttrValue::Null
	}
}

impl FormBuilder {
	/// Render a `<select>`
	///
	/// The selected value is resolved like any other field, with old input
	/// lists kept whole so multi-selects repopulate. A `placeholder`
	/// attribute becomes a leading empty option.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FormBuilder, FormValue, RouteTable, SelectList};
	/// use formsmith_html::Attributes;
	///
	/// let mut form = FormBuilder::new(RouteTable::default());
	/// let sizes = SelectList::new().option("S", "Small").option("L", "Large");
	///
	/// let html = form.select("size", sizes, "L", Attributes::new().placeholder("Pick a size"));
	/// assert_eq!(
	///     html.as_str(),
	///     concat!(
	///         r#"<select name="size">"#,
	///         r#"<option value="">Pick a size</option>"#,
	///         r#"<option value="S">Small</option>"#,
	///         r#"<option value="L" selected="selected">Large</option>"#,
	///         "</select>",
	///     )
	/// );
	/// ```
	pub fn select(
		&mut self,
		name: &str,
		list: SelectList,
		selected: impl Into<FormValue>,
		options: Attributes,
	) -> SafeString {
		self.select_with(name, list, selected, SelectAttributes::new(options))
	}

	/// Render a `<select>` with per-option and per-group attributes
	pub fn select_with(
		&mut self,
		name: &str,
		list: SelectList,
		selected: impl Into<FormValue>,
		attributes: SelectAttributes,
	) -> SafeString {
		let staged = self.take_staged();
		let SelectAttributes {
			select,
			options: option_attributes,
			optgroups,
		} = attributes;
		let mut select = select.over(staged.attributes);

		let selected = self
			.resolve_value(&FieldKind::Select, Some(name), selected.into().non_null())
			.unwrap_or_default();

		let id = self.id_attribute(Some(name), &select);
		select.set("id", id);
		if !select.contains_key("name") {
			select.set("name", name);
		}

		self.apply_theme_class(&mut select, FieldKind::Select.as_str());
		let has_error = self.has_error(Some(name));
		if has_error {
			self.apply_error_class(&mut select);
		}
		let mut select = self.apply_untyped_rules(select, staged.rules);
		self.apply_a11y(&mut select, has_error);

		let mut body = String::new();
		if let Some(placeholder) = select.remove("placeholder").filter(|p| !p.is_null()) {
			body.push_str(&self.placeholder_option(&placeholder.to_text(), &selected));
		}

		let context = OptionContext {
			selected: &selected,
			options: &option_attributes,
			optgroups: &optgroups,
		};
		for entry in list.entries() {
			body.push_str(&self.select_entry(entry, &context, 0));
		}

		SafeString::new(format!("<select{}>{}</select>", self.attributes(&select), body))
	}

	/// Select over an inclusive integer range; descends when `begin > end`
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FormBuilder, FormValue, RouteTable};
	/// use formsmith_html::Attributes;
	///
	/// let mut form = FormBuilder::new(RouteTable::default());
	/// let html = form.select_range("n", 3, 1, 2, Attributes::new());
	/// assert_eq!(
	///     html.as_str(),
	///     r#"<select name="n"><option value="3">3</option><option value="2" selected="selected">2</option><option value="1">1</option></select>"#
	/// );
	/// ```
	pub fn select_range(
		&mut self,
		name: &str,
		begin: i64,
		end: i64,
		selected: impl Into<FormValue>,
		options: Attributes,
	) -> SafeString {
		let values: Vec<i64> = if begin <= end {
			(begin..=end).collect()
		} else {
			(end..=begin).rev().collect()
		};
		self.select(name, SelectList::from_values(values), selected, options)
	}

	pub fn select_year(
		&mut self,
		name: &str,
		begin: i64,
		end: i64,
		selected: impl Into<FormValue>,
		options: Attributes,
	) -> SafeString {
		self.select_range(name, begin, end, selected, options)
	}

	/// Select of the twelve months, valued 1 to 12
	///
	/// Labels use a strftime `format`, `%B` (full month name) by default.
	/// A format chrono cannot render falls back to `%B`.
	pub fn select_month(
		&mut self,
		name: &str,
		selected: impl Into<FormValue>,
		options: Attributes,
		format: Option<&str>,
	) -> SafeString {
		let format = format.unwrap_or("%B");
		let year = Utc::now().year();

		let list: SelectList = (1..=12u32)
			.filter_map(|month| NaiveDate::from_ymd_opt(year, month, 1))
			.map(|date| (date.month(), month_label(date, format)))
			.collect();
		self.select(name, list, selected, options)
	}

	/// Render a `<datalist>`; options carry no selection
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FormBuilder, RouteTable, SelectList};
	///
	/// let mut form = FormBuilder::new(RouteTable::default());
	/// let html = form.datalist("browsers", &SelectList::from_values(["Firefox", "Chrome"]));
	/// assert_eq!(
	///     html.as_str(),
	///     r#"<datalist id="browsers"><option value="Firefox">Firefox</option><option value="Chrome">Chrome</option></datalist>"#
	/// );
	/// ```
	pub fn datalist(&mut self, id: &str, list: &SelectList) -> SafeString {
		let attributes = Attributes::new().id(id);
		let body: String = list
			.options()
			.map(|(value, label)| {
				let value = FormValue::from(value.to_display_string());
				self.option_markup(label, &value, &FormValue::Null, None)
			})
			.collect();

		SafeString::new(format!("<datalist{}>{}</datalist>", self.attributes(&attributes), body))
	}

	fn select_entry(&self, entry: &SelectEntry, context: &OptionContext<'_>, level: usize) -> String {
		match entry {
			SelectEntry::Option { value, label } => {
				let prefix = "&nbsp;".repeat(level);
				let attributes = context.options.get(&value.to_display_string());
				self.option_markup_prefixed(&prefix, label, value, context.selected, attributes)
			}
			SelectEntry::Group { label, entries } => {
				let prefix = "&nbsp;".repeat(level);
				let attributes = context.optgroups.get(label).cloned().unwrap_or_default();
				let body: String = entries
					.iter()
					.map(|child| match child {
						SelectEntry::Group { .. } => self.select_entry(child, context, level + GROUP_INDENT),
						SelectEntry::Option { .. } => self.select_entry(child, context, level),
					})
					.collect();

				format!(
					r#"<optgroup label="{}{}"{}>{}</optgroup>"#,
					prefix,
					escape_attr(label),
					self.attributes(&attributes),
					body
				)
			}
		}
	}

	fn option_markup(
		&self,
		label: &str,
		value: &FormValue,
		selected: &FormValue,
		attributes: Option<&Attributes>,
	) -> String {
		self.option_markup_prefixed("", label, value, selected, attributes)
	}

	fn option_markup_prefixed(
		&self,
		prefix: &str,
		label: &str,
		value: &FormValue,
		selected: &FormValue,
		attributes: Option<&Attributes>,
	) -> String {
		let mut base = Attributes::new();
		base.set("value", value.to_display_string());
		base.set("selected", selected_attr(is_selected(value, selected)));
		let options = match attributes {
			Some(attributes) => attributes.clone().over(base),
			None => base,
		};

		format!("<option{}>{}{}</option>", self.attributes(&options), prefix, escape(label))
	}

	fn placeholder_option(&self, label: &str, selected: &FormValue) -> String {
		let mut options = Attributes::new();
		options.set("selected", selected_attr(is_selected(&FormValue::Null, selected)));
		options.set("value", "");
		format!("<option{}>{}</option>", self.attributes(&options), escape(label))
	}
}

struct OptionContext<'a> {
	selected: &'a FormValue,
	options: &'a HashMap<String, Attributes>,
	optgroups: &'a HashMap<String, Attributes>,
}

fn month_label(date: NaiveDate, format: &str) -> String {
	let mut label = String::new();
	if write!(label, "{}", date.format(format)).is_err() {
		tracing::warn!(format, "invalid month label format, using %B");
		return date.format("%B").to_string();
	}
	label
}
