//! Protocol headers attached to token endpoint requests.

// self
use crate::{_prelude::*, config::LibraryInfo, telemetry::TelemetryCoordinator};

/// Header name carrying the client SKU.
pub const X_CLIENT_SKU: &str = "x-client-SKU";
/// Header name carrying the client version.
pub const X_CLIENT_VER: &str = "x-client-VER";
/// Header name carrying the client operating system.
pub const X_CLIENT_OS: &str = "x-client-OS";
/// Header name carrying the client CPU architecture.
pub const X_CLIENT_CPU: &str = "x-client-CPU";
/// Content type header name.
pub const CONTENT_TYPE: &str = "Content-Type";
/// Library capability header name.
pub const X_MS_LIB_CAPABILITY: &str = "x-ms-lib-capability";
/// Header name carrying the current request's telemetry signal.
pub const X_CLIENT_CURRENT_TELEMETRY: &str = "x-client-current-telemetry";
/// Header name carrying the last failed request's telemetry signal.
pub const X_CLIENT_LAST_TELEMETRY: &str = "x-client-last-telemetry";

/// URL-encoded form content type sent with every token request.
pub const URL_FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=utf-8";
/// Advertises that the library honors `Retry-After` and HTTP 429 throttling.
pub const X_MS_LIB_CAPABILITY_VALUE: &str = "retry-after, h429";

/// Ordered header set built fresh for every request.
///
/// Header names are unique under ASCII case-insensitive comparison, matching HTTP semantics;
/// the spelling of the most recent insert is kept.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>")]
pub struct RequestHeaders(BTreeMap<String, String>);
impl RequestHeaders {
	/// Inserts a header, replacing any existing header with the same name in any case.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
		let name = name.into();

		if let Some(existing) = self.find_name(&name).map(str::to_owned) {
			self.0.remove(&existing);
		}

		self.0.insert(name, value.into());
	}

	/// Returns a header value by case-insensitive name.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.0
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	/// Checks whether a header is present, ignoring case.
	pub fn contains(&self, name: &str) -> bool {
		self.find_name(name).is_some()
	}

	/// Number of headers.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether the set is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates `(name, value)` pairs in name order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
	}

	fn find_name(&self, name: &str) -> Option<&str> {
		self.0.keys().map(String::as_str).find(|key| key.eq_ignore_ascii_case(name))
	}
}
impl<K, V> FromIterator<(K, V)> for RequestHeaders
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		let mut headers = Self::default();

		for (name, value) in iter {
			headers.insert(name, value);
		}

		headers
	}
}
impl From<BTreeMap<String, String>> for RequestHeaders {
	fn from(map: BTreeMap<String, String>) -> Self {
		map.into_iter().collect()
	}
}
impl IntoIterator for RequestHeaders {
	type IntoIter = std::collections::btree_map::IntoIter<String, String>;
	type Item = (String, String);

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

/// Builds the four headers identifying the library (SKU, version, OS, CPU).
pub fn create_default_library_headers(library: &LibraryInfo) -> RequestHeaders {
	let mut headers = RequestHeaders::default();

	headers.insert(X_CLIENT_SKU, library.sku.as_str());
	headers.insert(X_CLIENT_VER, library.version.as_str());
	headers.insert(X_CLIENT_OS, library.os.as_str());
	headers.insert(X_CLIENT_CPU, library.cpu.as_str());

	headers
}

/// Builds the headers for a token endpoint request.
///
/// Telemetry headers are only present when a coordinator is supplied.
pub fn create_token_request_headers(
	library: &LibraryInfo,
	telemetry: Option<&TelemetryCoordinator>,
) -> RequestHeaders {
	let mut headers = create_default_library_headers(library);

	headers.insert(CONTENT_TYPE, URL_FORM_CONTENT_TYPE);
	headers.insert(X_MS_LIB_CAPABILITY, X_MS_LIB_CAPABILITY_VALUE);

	if let Some(telemetry) = telemetry {
		headers.insert(X_CLIENT_CURRENT_TELEMETRY, telemetry.current_request_header_value());
		headers.insert(X_CLIENT_LAST_TELEMETRY, telemetry.last_request_header_value());
	}

	headers
}
