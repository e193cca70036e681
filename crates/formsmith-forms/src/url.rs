//! URL generation for form actions and asset sources

use std::collections::HashMap;

/// Named route or controller action parameters, in declaration order
pub type UrlParams = [(String, String)];

/// Resolves the URLs a form needs: its action and image sources
pub trait UrlResolver: Send + Sync {
	/// URL of the page being rendered
	fn current_url(&self) -> String;

	/// Absolute URL for a path; extra segments are appended to the path
	fn to_path(&self, path: &str, segments: &[String]) -> String;

	/// URL of a named route
	fn to_route(&self, name: &str, params: &UrlParams) -> String;

	/// URL of a controller action
	fn to_action(&self, action: &str, params: &UrlParams) -> String;

	/// URL of a static asset
	fn asset_url(&self, path: &str) -> String;
}

/// In-memory resolver with named routes and actions
///
/// Route patterns use `{param}` placeholders, filled with percent-encoded
/// values. Parameters without a matching placeholder are appended as a query
/// string; placeholders without a value are kept verbatim.
///
/// # Examples
///
/// ```
/// use formsmith_forms::{RouteTable, UrlResolver};
///
/// let urls = RouteTable::new("https://example.com")
///     .with_current("/users/create")
///     .route("users.update", "/users/{user}");
///
/// let params = [("user".to_string(), "7".to_string()), ("tab".to_string(), "profile".to_string())];
/// assert_eq!(urls.to_route("users.update", &params), "https://example.com/users/7?tab=profile");
/// assert_eq!(urls.to_path("users", &["7".to_string()]), "https://example.com/users/7");
/// assert_eq!(urls.current_url(), "https://example.com/users/create");
/// assert_eq!(urls.asset_url("img/go.png"), "https://example.com/img/go.png");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
	base_url: String,
	current: String,
	routes: HashMap<String, String>,
	actions: HashMap<String, String>,
}

impl RouteTable {
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into().trim_end_matches('/').to_string(),
			..Self::default()
		}
	}

	/// Path of the page being rendered
	pub fn with_current(mut self, path: impl Into<String>) -> Self {
		self.current = path.into();
		self
	}

	/// Register a named route pattern
	pub fn route(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
		self.routes.insert(name.into(), pattern.into());
		self
	}

	/// Register a controller action pattern
	pub fn action(mut self, action: impl Into<String>, pattern: impl Into<String>) -> Self {
		self.actions.insert(action.into(), pattern.into());
		self
	}

	fn absolute(&self, path: &str) -> String {
		if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//") {
			return path.to_string();
		}
		let path = path.trim_start_matches('/');
		if path.is_empty() {
			return format!("{}/", self.base_url);
		}
		format!("{}/{}", self.base_url, path)
	}

	fn reverse(&self, kind: &str, table: &HashMap<String, String>, name: &str, params: &UrlParams) -> String {
		let Some(pattern) = table.get(name) else {
			tracing::warn!(kind, name, "no pattern registered, using the raw name");
			return self.absolute(name);
		};

		let (path, rest) = substitute(pattern, params);
		let url = self.absolute(&path);
		if rest.is_empty() {
			return url;
		}
		match serde_urlencoded::to_string(&rest) {
			Ok(query) => format!("{}?{}", url, query),
			Err(err) => {
				tracing::warn!(kind, name, error = %err, "dropping unencodable query parameters");
				url
			}
		}
	}
}

/// Replace `{name}` placeholders, returning the path and the unused params
fn substitute<'a>(pattern: &str, params: &'a UrlParams) -> (String, Vec<(&'a str, &'a str)>) {
	let mut used = vec![false; params.len()];
	let mut result = String::with_capacity(pattern.len());
	let mut chars = pattern.chars();

	while let Some(ch) = chars.next() {
		if ch != '{' {
			result.push(ch);
			continue;
		}
		let name: String = chars.by_ref().take_while(|&c| c != '}').collect();
		match params.iter().position(|(key, _)| *key == name) {
			Some(index) => {
				used[index] = true;
				result.push_str(&urlencoding::encode(&params[index].1));
			}
			None => {
				result.push('{');
				result.push_str(&name);
				result.push('}');
			}
		}
	}

	let rest = params
		.iter()
		.zip(used)
		.filter(|(_, used)| !used)
		.map(|((key, value), _)| (key.as_str(), value.as_str()))
		.collect();
	(result, rest)
}

impl UrlResolver for RouteTable {
	fn current_url(&self) -> String {
		self.absolute(&self.current)
	}

	fn to_path(&self, path: &str, segments: &[String]) -> String {
		let mut url = self.absolute(path).trim_end_matches('/').to_string();
		for segment in segments {
			url.push('/');
			url.push_str(segment.trim_matches('/'));
		}
		url
	}

	fn to_route(&self, name: &str, params: &UrlParams) -> String {
		self.reverse("route", &self.routes, name, params)
	}

	fn to_action(&self, action: &str, params: &UrlParams) -> String {
		self.reverse("action", &self.actions, action, params)
	}

	fn asset_url(&self, path: &str) -> String {
		self.absolute(path)
	}
}
