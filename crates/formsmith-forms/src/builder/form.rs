//! Form open/close, CSRF token and labels

use super::{FormBuilder, FormState};
use crate::field::{FieldKind, FieldRequest};
use crate::source::FormModel;
use formsmith_html::{escape, escape_attr, Attributes, SafeString};

/// Methods spoofed through a hidden `_method` field
const SPOOFED_METHODS: &[&str] = &["DELETE", "PATCH", "PUT"];

/// Attribute names the form tag computes itself
const RESERVED: &[&str] = &["method", "action", "url", "route", "files"];

/// Where a form submits to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormAction {
	/// The URL of the page being rendered
	#[default]
	Current,
	/// A path, with extra segments appended
	Url(String, Vec<String>),
	/// A named route with parameters
	Route(String, Vec<(String, String)>),
	/// A controller action with parameters
	Action(String, Vec<(String, String)>),
}

/// Options of [`FormBuilder::open`]
///
/// # Examples
///
/// ```
/// use formsmith_forms::{FormAction, FormOptions};
///
/// let options = FormOptions::new()
///     .method("put")
///     .route_with("users.update", [("user", "7")])
///     .files(true)
///     .attr("class", "stacked");
///
/// assert_eq!(options.method, "put");
/// assert!(matches!(options.action, FormAction::Route(ref name, _) if name == "users.update"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FormOptions {
	pub method: String,
	pub action: FormAction,
	/// Adds `enctype="multipart/form-data"`
	pub files: bool,
	pub attributes: Attributes,
}

impl Default for FormOptions {
	fn default() -> Self {
		Self {
			method: "post".to_string(),
			action: FormAction::Current,
			files: false,
			attributes: Attributes::new(),
		}
	}
}

fn owned_params<I, K, V>(params: I) -> Vec<(String, String)>
where
	I: IntoIterator<Item = (K, V)>,
	K: Into<String>,
	V: Into<String>,
{
	params.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

impl FormOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn method(mut self, method: impl Into<String>) -> Self {
		self.method = method.into();
		self
	}

	pub fn url(mut self, path: impl Into<String>) -> Self {
		self.action = FormAction::Url(path.into(), Vec::new());
		self
	}

	pub fn url_with<I, S>(mut self, path: impl Into<String>, segments: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.action = FormAction::Url(path.into(), segments.into_iter().map(Into::into).collect());
		self
	}

	pub fn route(mut self, name: impl Into<String>) -> Self {
		self.action = FormAction::Route(name.into(), Vec::new());
		self
	}

	pub fn route_with<I, K, V>(mut self, name: impl Into<String>, params: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.action = FormAction::Route(name.into(), owned_params(params));
		self
	}

	pub fn action(mut self, action: impl Into<String>) -> Self {
		self.action = FormAction::Action(action.into(), Vec::new());
		self
	}

	pub fn action_with<I, K, V>(mut self, action: impl Into<String>, params: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.action = FormAction::Action(action.into(), owned_params(params));
		self
	}

	pub fn files(mut self, files: bool) -> Self {
		self.files = files;
		self
	}

	/// Extra attribute on the form tag
	pub fn attr(mut self, key: impl Into<String>, value: impl Into<formsmith_html::AttrValue>) -> Self {
		self.attributes.set(key, value);
		self
	}

	pub fn attributes(mut self, attributes: Attributes) -> Self {
		self.attributes = attributes;
		self
	}
}

impl FormBuilder {
	/// Open a form
	///
	/// Methods other than GET render as POST; DELETE, PATCH and PUT add a
	/// hidden `_method` field, and every non-GET form carries the CSRF token.
	/// Attributes staged with [`FormBuilder::wire_submit`] and friends land on
	/// the form tag.
	pub fn open(&mut self, options: FormOptions) -> SafeString {
		let staged = self.take_staged();
		let method = options.method.to_uppercase();

		let mut attributes = Attributes::new();
		attributes.set("method", if method == "GET" { "GET" } else { "POST" });
		attributes.set("action", self.action_url(&options.action));
		attributes.set("accept-charset", "UTF-8");

		let mut extra = options.attributes.over(staged.attributes);
		for key in RESERVED {
			extra.remove(key);
		}
		if options.files {
			extra.set("enctype", "multipart/form-data");
		}
		attributes.extend(extra);

		tracing::debug!(method = %method, "opening form");

		let mut html = SafeString::new(format!("<form{}>", self.attributes(&attributes)));
		html.push(&self.appendage(&method));
		html
	}

	/// Bind a model and open the form
	pub fn model(&mut self, model: impl FormModel + 'static, options: FormOptions) -> SafeString {
		self.set_model(model);
		self.open(options)
	}

	pub fn set_model(&mut self, model: impl FormModel + 'static) -> &mut Self {
		self.state.model = Some(Box::new(model));
		self
	}

	pub fn model_ref(&self) -> Option<&dyn FormModel> {
		self.state.model.as_deref()
	}

	pub fn clear_model(&mut self) -> &mut Self {
		self.state.model = None;
		self
	}

	/// Close the form, forgetting the bound model, labels, list cursors and
	/// anything still staged
	pub fn close(&mut self) -> SafeString {
		tracing::debug!(labels = self.state.labels.len(), "closing form");
		self.state = FormState::default();
		SafeString::from("</form>")
	}

	/// Hidden `_token` field carrying the CSRF token
	///
	/// The builder's own token wins; otherwise the session store's token is
	/// used. The value is rendered as-is, never repopulated from old input.
	pub fn token(&mut self) -> SafeString {
		let token = self
			.csrf_token
			.clone()
			.filter(|token| !token.is_empty())
			.or_else(|| self.session.as_deref().and_then(|session| session.token()));

		let request = FieldRequest::named(FieldKind::Hidden, "_token")
			.with_value(token)
			.fixed();
		self.render_unstaged(request)
	}

	/// Render a `<label>` and remember `name`, so the next field with that
	/// name receives `id="{name}"`
	///
	/// Without `text` the label reads as the name with underscores turned
	/// into spaces and each word capitalised.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FormBuilder, FormValue, RouteTable};
	/// use formsmith_html::Attributes;
	///
	/// let mut form = FormBuilder::new(RouteTable::default());
	/// let label = form.label("first_name", None, Attributes::new(), true);
	/// assert_eq!(label.as_str(), r#"<label for="first_name">First Name</label>"#);
	///
	/// let input = form.text("first_name", FormValue::Null, Attributes::new());
	/// assert_eq!(input.as_str(), r#"<input name="first_name" type="text" id="first_name">"#);
	/// ```
	pub fn label(&mut self, name: &str, text: Option<&str>, options: Attributes, escape_html: bool) -> SafeString {
		self.label_markup(name, text, options, escape_html, true)
	}

	pub(crate) fn label_markup(
		&mut self,
		name: &str,
		text: Option<&str>,
		mut options: Attributes,
		escape_html: bool,
		themed: bool,
	) -> SafeString {
		self.state.labels.insert(name.to_string());

		if themed {
			self.apply_theme_class(&mut options, "label");
		}

		let text = match text.filter(|text| !text.is_empty()) {
			Some(text) => text.to_string(),
			None => format_label(name),
		};
		let text = if escape_html { escape(&text) } else { text };

		SafeString::new(format!(
			r#"<label for="{}"{}>{}</label>"#,
			escape_attr(name),
			self.attributes(&options),
			text
		))
	}

	pub(crate) fn remember_label(&mut self, name: &str) {
		self.state.labels.insert(name.to_string());
	}

	fn action_url(&self, action: &FormAction) -> String {
		match action {
			FormAction::Current => self.url.current_url(),
			FormAction::Url(path, segments) => self.url.to_path(path, segments),
			FormAction::Route(name, params) => self.url.to_route(name, params),
			FormAction::Action(action, params) => self.url.to_action(action, params),
		}
	}

	fn appendage(&mut self, method: &str) -> SafeString {
		let mut html = SafeString::default();

		if SPOOFED_METHODS.contains(&method) {
			let spoof = FieldRequest::named(FieldKind::Hidden, "_method")
				.with_value(method)
				.fixed();
			html.push(&self.render_unstaged(spoof));
		}

		if method != "GET" {
			html.push(&self.token());
		}

		html
	}
}

/// `first_name` becomes `First Name`
fn format_label(name: &str) -> String {
	name.replace('_', " ")
		.split(' ')
		.map(|word| {
			let mut chars = word.chars();
			match chars.next() {
				Some(first) => first.to_uppercase().chain(chars).collect(),
				None => String::new(),
			}
		})
		.collect::<Vec<_>>()
		.join(" ")
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("first_name", "First Name")]
	#[case("email", "Email")]
	#[case("already Spaced_out", "Already Spaced Out")]
	#[case("__x", "  X")]
	fn test_format_label(#[case] name: &str, #[case] expected: &str) {
		assert_eq!(format_label(name), expected);
	}
}
