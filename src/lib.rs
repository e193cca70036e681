//! # Formsmith
//!
//! An HTML form builder that keeps forms populated across submissions.
//!
//! Formsmith renders inputs, textareas, selects, checkboxes and buttons as
//! escaped markup. Every field looks its value up in a fixed order: the
//! previous submission's old input, the current request, the value declared
//! at the call site, then a bound model.
//!
//! ## Crates
//!
//! - [`html`] (`formsmith-html`): escaping, ordered attribute maps and the
//!   attribute renderer
//! - [`forms`] (`formsmith-forms`): the [`FormBuilder`] with themes,
//!   validation rule hints, option groups and checked state
//!
//! ## Quick Start
//!
//! ```
//! use formsmith::{Attributes, FormBuilder, FormOptions, FormValue, OldInputBag, RouteTable};
//! use serde_json::json;
//!
//! let urls = RouteTable::new("https://example.com").route("users.store", "/users");
//! let mut form = FormBuilder::new(urls)
//!     .with_csrf_token("t0k3n")
//!     .with_session(OldInputBag::from_json(json!({"name": "Ada"})));
//! form.bootstrap();
//!
//! let mut html = form.open(FormOptions::new().route("users.store"));
//! html.push(&form.label("name", None, Attributes::new(), true));
//! html.push(&form.text("name", FormValue::Null, Attributes::new()));
//! html.push(&form.close());
//!
//! assert!(html.as_str().contains(r#"action="https://example.com/users""#));
//! assert!(html.as_str().contains(r#"<input name="name" class="form-control" type="text" value="Ada" id="name">"#));
//! ```

pub use formsmith_forms as forms;
pub use formsmith_html as html;

pub use formsmith_forms::{
	ChoiceEnum, ErrorBag, FieldKind, FieldRequest, FormAction, FormBuilder, FormBuilderConfig,
	FormBuilderError, FormBuilderResult, FormModel, FormOptions, FormValue, OldInputBag,
	OldInputStore, RequestBag, RequestInput, RouteTable, SelectAttributes, SelectList, Theme,
	UrlResolver, ValidationRules,
};
pub use formsmith_html::{AttrValue, AttributeRenderer, Attributes, SafeString, escape};
