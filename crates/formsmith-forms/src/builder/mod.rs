//! The form builder
//!
//! [`FormBuilder`] renders form markup for one request. It holds the
//! collaborators used to populate fields (old input, request input, bound
//! model, error bag, URL resolver) and the per-form state that ties renders
//! together: labeled names, list-consumption cursors and the one-shot staging
//! buffer filled by [`FormBuilder::rules`], [`FormBuilder::alpine`] and
//! friends.
//!
//! A builder serves one form at a time. Interleaving two forms on the same
//! builder mixes their labels and cursors; give each concurrent render its
//! own builder.

mod extras;
mod form;
mod inputs;
mod pipeline;
mod resolve;
mod select;

pub use form::{FormAction, FormOptions};
pub use select::{ChoiceEnum, SelectAttributes, SelectEntry, SelectList};

use crate::config::FormBuilderConfig;
use crate::error::{FormBuilderError, FormBuilderResult};
use crate::registry::{MethodHandler, MethodRegistry};
use crate::rules::ValidationRules;
use crate::source::{ErrorBag, FormModel, OldInputStore, RequestInput};
use crate::theme::Theme;
use crate::url::UrlResolver;
use crate::value::FormValue;
use formsmith_html::{AttributeRenderer, Attributes, HtmlAttributeRenderer, SafeString};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// Attributes and rules staged for the next render
#[derive(Debug, Default)]
pub(crate) struct Staged {
	pub(crate) attributes: Attributes,
	pub(crate) rules: Option<ValidationRules>,
}

/// Per-form state, reset by [`FormBuilder::close`]
#[derive(Default)]
struct FormState {
	model: Option<Box<dyn FormModel>>,
	labels: HashSet<String>,
	cursors: HashMap<String, VecDeque<FormValue>>,
	staged: Staged,
}

/// Renders HTML form elements with automatic value population
///
/// # Examples
///
/// ```
/// use formsmith_forms::{FormBuilder, FormOptions, FormValue, OldInputBag, RouteTable};
/// use formsmith_html::Attributes;
/// use serde_json::json;
///
/// let mut form = FormBuilder::new(RouteTable::new("https://example.com").with_current("/signup"))
///     .with_csrf_token("t0k3n")
///     .with_session(OldInputBag::from_json(json!({"email": "old@example.com"})));
///
/// let open = form.open(FormOptions::new());
/// assert_eq!(
///     open.as_str(),
///     r#"<form method="POST" action="https://example.com/signup" accept-charset="UTF-8"><input name="_token" type="hidden" value="t0k3n">"#
/// );
///
/// let email = form.email("email", FormValue::Null, Attributes::new());
/// assert_eq!(email.as_str(), r#"<input name="email" type="email" value="old@example.com">"#);
///
/// assert_eq!(form.close().as_str(), "</form>");
/// ```
pub struct FormBuilder {
	renderer: Box<dyn AttributeRenderer>,
	url: Box<dyn UrlResolver>,
	csrf_token: Option<String>,
	session: Option<Box<dyn OldInputStore>>,
	request: Option<Box<dyn RequestInput>>,
	errors: Option<Box<dyn ErrorBag>>,
	config: FormBuilderConfig,
	theme: Theme,
	consider_request: bool,
	methods: MethodRegistry,
	state: FormState,
}

impl FormBuilder {
	/// Create a builder with the default configuration
	pub fn new(url: impl UrlResolver + 'static) -> Self {
		Self::with_config(url, FormBuilderConfig::default())
	}

	/// Create a builder from an explicit configuration
	pub fn with_config(url: impl UrlResolver + 'static, config: FormBuilderConfig) -> Self {
		Self {
			renderer: Box::new(HtmlAttributeRenderer),
			url: Box::new(url),
			csrf_token: None,
			session: None,
			request: None,
			errors: None,
			theme: config.theme,
			consider_request: config.consider_request,
			config,
			methods: MethodRegistry::new(),
			state: FormState::default(),
		}
	}

	pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
		self.csrf_token = Some(token.into());
		self
	}

	pub fn with_session(mut self, session: impl OldInputStore + 'static) -> Self {
		self.set_session_store(session);
		self
	}

	pub fn with_request(mut self, request: impl RequestInput + 'static) -> Self {
		self.set_request(request);
		self
	}

	pub fn with_errors(mut self, errors: impl ErrorBag + 'static) -> Self {
		self.set_error_bag(errors);
		self
	}

	/// Replace the attribute serializer
	pub fn with_renderer(mut self, renderer: impl AttributeRenderer + 'static) -> Self {
		self.renderer = Box::new(renderer);
		self
	}

	pub fn set_session_store(&mut self, session: impl OldInputStore + 'static) -> &mut Self {
		self.session = Some(Box::new(session));
		self
	}

	pub fn session_store(&self) -> Option<&dyn OldInputStore> {
		self.session.as_deref()
	}

	pub fn set_request(&mut self, request: impl RequestInput + 'static) -> &mut Self {
		self.request = Some(Box::new(request));
		self
	}

	pub fn set_error_bag(&mut self, errors: impl ErrorBag + 'static) -> &mut Self {
		self.errors = Some(Box::new(errors));
		self
	}

	pub fn config(&self) -> &FormBuilderConfig {
		&self.config
	}

	/// Consult the current request input while resolving values
	pub fn consider_request(&mut self, consider: bool) -> &mut Self {
		self.consider_request = consider;
		self
	}

	/// Switch the active theme; affects the next render
	pub fn theme(&mut self, theme: Theme) -> &mut Self {
		if self.theme != theme {
			tracing::debug!(from = %self.theme, to = %theme, "switching form theme");
		}
		self.theme = theme;
		self
	}

	/// Switch the active theme by name
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FormBuilder, FormBuilderError, RouteTable, Theme};
	///
	/// let mut form = FormBuilder::new(RouteTable::default());
	/// form.set_theme_name("tailwind").unwrap();
	/// assert_eq!(form.current_theme(), Theme::Tailwind);
	///
	/// let err = form.set_theme_name("bulma").unwrap_err();
	/// assert!(matches!(err, FormBuilderError::UnknownTheme(_)));
	/// ```
	pub fn set_theme_name(&mut self, name: &str) -> FormBuilderResult<&mut Self> {
		let theme = name.parse::<Theme>()?;
		Ok(self.theme(theme))
	}

	pub fn bootstrap(&mut self) -> &mut Self {
		self.theme(Theme::Bootstrap)
	}

	pub fn tailwind(&mut self) -> &mut Self {
		self.theme(Theme::Tailwind)
	}

	pub fn current_theme(&self) -> Theme {
		self.theme
	}

	/// Register a custom renderer callable through [`FormBuilder::call`]
	pub fn register_method<F>(&mut self, name: impl Into<String>, handler: F) -> &mut Self
	where
		F: Fn(&mut FormBuilder, &[FormValue]) -> SafeString + Send + Sync + 'static,
	{
		self.methods.register(name, handler);
		self
	}

	pub fn has_method(&self, name: &str) -> bool {
		self.methods.has(name)
	}

	/// Invoke a registered renderer by name
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FormBuilder, FormBuilderError, FormValue, RouteTable};
	/// use formsmith_html::{Attributes, SafeString};
	///
	/// let mut form = FormBuilder::new(RouteTable::default());
	/// form.register_method("nickname", |form, args| {
	///     let value = args.first().cloned().unwrap_or_default();
	///     form.text("nickname", value, Attributes::new().class("nick"))
	/// });
	///
	/// let html = form.call("nickname", &[FormValue::from("neo")]).unwrap();
	/// assert_eq!(html.as_str(), r#"<input class="nick" name="nickname" type="text" value="neo">"#);
	///
	/// let err = form.call("missing", &[]).unwrap_err();
	/// assert_eq!(err.to_string(), "Method missing does not exist.");
	/// assert!(matches!(err, FormBuilderError::MethodNotFound(_)));
	/// ```
	pub fn call(&mut self, name: &str, args: &[FormValue]) -> FormBuilderResult<SafeString> {
		let handler: MethodHandler = self
			.methods
			.get(name)
			.ok_or_else(|| FormBuilderError::MethodNotFound(name.to_string()))?;
		tracing::debug!(method = name, args = args.len(), "dispatching registered form method");
		Ok(handler(self, args))
	}

	/// Stage validation rules for the next rendered field
	///
	/// The staging buffer is cleared by exactly one render, whether or not
	/// that render uses it. [`FieldRequest::with_rules`](crate::FieldRequest::with_rules)
	/// passes rules explicitly instead.
	pub fn rules(&mut self, rules: impl Into<ValidationRules>) -> &mut Self {
		self.state.staged.rules = Some(rules.into());
		self
	}

	/// Stage an arbitrary attribute for the next rendered element
	pub fn stage_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
		self.state.staged.attributes.set(key.into(), value.into());
		self
	}

	/// Stage `x-{attribute}` for the next rendered element
	pub fn alpine(&mut self, attribute: &str, expression: impl Into<String>) -> &mut Self {
		self.stage_attribute(format!("x-{}", attribute), expression)
	}

	/// Stage `v-{attribute}` for the next rendered element
	pub fn vue(&mut self, attribute: &str, expression: impl Into<String>) -> &mut Self {
		self.stage_attribute(format!("v-{}", attribute), expression)
	}

	pub fn wire(&mut self, property: impl Into<String>) -> &mut Self {
		self.stage_attribute("wire:model", property)
	}

	pub fn wire_lazy(&mut self, property: impl Into<String>) -> &mut Self {
		self.stage_attribute("wire:model.lazy", property)
	}

	pub fn wire_defer(&mut self, property: impl Into<String>) -> &mut Self {
		self.stage_attribute("wire:model.defer", property)
	}

	/// Stage `wire:model.live`, optionally debounced by `debounce` milliseconds
	pub fn wire_live(&mut self, property: impl Into<String>, debounce: Option<u32>) -> &mut Self {
		let key = match debounce {
			Some(ms) => format!("wire:model.live.debounce.{}ms", ms),
			None => "wire:model.live".to_string(),
		};
		self.stage_attribute(key, property)
	}

	pub fn wire_click(&mut self, method: impl Into<String>) -> &mut Self {
		self.stage_attribute("wire:click", method)
	}

	/// Stage `wire:submit`; consumed by the next [`FormBuilder::open`]
	pub fn wire_submit(&mut self, method: impl Into<String>) -> &mut Self {
		self.stage_attribute("wire:submit", method)
	}

	pub fn wire_submit_prevent(&mut self, method: impl Into<String>) -> &mut Self {
		self.stage_attribute("wire:submit.prevent", method)
	}

	/// Take the staging buffer, leaving it empty
	pub(crate) fn take_staged(&mut self) -> Staged {
		std::mem::take(&mut self.state.staged)
	}

	/// Serialize attributes with the configured renderer
	pub(crate) fn attributes(&self, attributes: &Attributes) -> String {
		self.renderer.render(attributes)
	}
}

impl fmt::Debug for FormBuilder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FormBuilder")
			.field("theme", &self.theme)
			.field("consider_request", &self.consider_request)
			.field("has_csrf_token", &self.csrf_token.is_some())
			.field("has_session", &self.session.is_some())
			.field("has_model", &self.state.model.is_some())
			.field("labels", &self.state.labels.len())
			.field("methods", &self.methods)
			.finish()
	}
}
