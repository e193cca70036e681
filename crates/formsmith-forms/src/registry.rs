//! Named custom field renderers

use crate::builder::FormBuilder;
use crate::value::FormValue;
use formsmith_html::SafeString;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Handler invoked by [`FormBuilder::call`]
pub type MethodHandler = Arc<dyn Fn(&mut FormBuilder, &[FormValue]) -> SafeString + Send + Sync>;

/// Registry of custom renderers addressable by name
///
/// Handlers receive the builder itself, so they can compose the built-in
/// field methods and share the form's state.
#[derive(Clone, Default)]
pub struct MethodRegistry {
	handlers: HashMap<String, MethodHandler>,
}

impl MethodRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
	where
		F: Fn(&mut FormBuilder, &[FormValue]) -> SafeString + Send + Sync + 'static,
	{
		self.handlers.insert(name.into(), Arc::new(handler));
	}

	pub fn has(&self, name: &str) -> bool {
		self.handlers.contains_key(name)
	}

	pub fn get(&self, name: &str) -> Option<MethodHandler> {
		self.handlers.get(name).cloned()
	}

	pub fn remove(&mut self, name: &str) -> bool {
		self.handlers.remove(name).is_some()
	}

	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
		names.sort_unstable();
		names
	}
}

impl fmt::Debug for MethodRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MethodRegistry")
			.field("methods", &self.names())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_register_and_remove() {
		let mut registry = MethodRegistry::new();
		registry.register("stars", |_, _| SafeString::from("***"));
		registry.register("hr", |_, _| SafeString::from("<hr>"));

		assert!(registry.has("stars"));
		assert_eq!(registry.names(), vec!["hr", "stars"]);
		assert!(registry.remove("stars"));
		assert!(!registry.remove("stars"));
		assert!(registry.get("stars").is_none());
	}
}
