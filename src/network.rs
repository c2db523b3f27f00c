//! Network collaborator contract and the values exchanged with it.
//!
//! The client hands every token request to a [`NetworkClient`] together with a
//! [`RequestThumbprint`]. What the transport does with the thumbprint (deduplicating in-flight
//! requests, remembering throttling state) is its own business; this crate only passes it
//! through and inspects the returned [`NetworkResponse`].

#[cfg(feature = "reqwest")] mod reqwest_client;
#[cfg(feature = "reqwest")] pub use reqwest_client::*;

// crates.io
use time::format_description::well_known::Rfc2822;
// self
use crate::{
	_prelude::*,
	error::{HttpStatusError, TransportError},
	headers::RequestHeaders,
	response::ServerAuthorizationTokenResponse,
};

/// Boxed future returned by [`NetworkClient`] implementations.
pub type NetworkFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, TransportError>> + 'a + Send>>;

/// Opaque correlation key identifying a logical token request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestThumbprint {
	/// Client identifier issuing the request.
	pub client_id: String,
	/// Authority the request targets.
	pub authority: String,
	/// Requested scopes.
	pub scopes: Vec<String>,
	/// Account the request is bound to, if any.
	pub home_account_id: Option<String>,
	/// Claims challenge attached to the request, if any.
	pub claims: Option<String>,
}
impl RequestThumbprint {
	/// Creates a thumbprint for the client/authority/scopes tuple.
	pub fn new<I, S>(client_id: impl Into<String>, authority: impl Into<String>, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			client_id: client_id.into(),
			authority: authority.into(),
			scopes: scopes.into_iter().map(Into::into).collect(),
			home_account_id: None,
			claims: None,
		}
	}

	/// Binds the thumbprint to an account.
	pub fn with_home_account_id(mut self, home_account_id: impl Into<String>) -> Self {
		self.home_account_id = Some(home_account_id.into());

		self
	}

	/// Attaches a claims challenge.
	pub fn with_claims(mut self, claims: impl Into<String>) -> Self {
		self.claims = Some(claims.into());

		self
	}
}

/// Body and headers of an outbound request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NetworkRequestOptions {
	/// URL-encoded request body.
	pub body: Option<String>,
	/// Request headers.
	pub headers: RequestHeaders,
}

/// Result of a delegated HTTP call.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkResponse<T> {
	/// HTTP status code.
	pub status: u16,
	/// Response headers keyed by lowercase name.
	pub headers: BTreeMap<String, String>,
	/// Decoded response body.
	pub body: T,
}
impl<T> NetworkResponse<T> {
	/// Whether the status is in the 2xx range.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Returns a response header by case-insensitive name.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
	}

	/// Parses the `Retry-After` header as a relative duration (delta-seconds or HTTP date).
	pub fn retry_after(&self) -> Option<Duration> {
		let raw = self.header("retry-after")?.trim();

		if let Ok(secs) = raw.parse::<u32>() {
			return Some(Duration::seconds(secs.into()));
		}
		if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
			let delta = moment - OffsetDateTime::now_utc();

			if delta.is_positive() {
				return Some(delta);
			}
		}

		None
	}

	/// Transforms the body while keeping status and headers.
	pub fn map_body<U, F>(self, f: F) -> NetworkResponse<U>
	where
		F: FnOnce(T) -> U,
	{
		NetworkResponse { status: self.status, headers: self.headers, body: f(self.body) }
	}

	/// Fallible variant of [`map_body`](Self::map_body).
	pub fn try_map_body<U, E, F>(self, f: F) -> Result<NetworkResponse<U>, E>
	where
		F: FnOnce(T) -> Result<U, E>,
	{
		Ok(NetworkResponse { status: self.status, headers: self.headers, body: f(self.body)? })
	}
}
impl NetworkResponse<ServerAuthorizationTokenResponse> {
	/// Describes a non-2xx answer for higher layers; `None` for 2xx statuses.
	pub fn http_status_error(&self) -> Option<HttpStatusError> {
		if self.is_success() {
			return None;
		}

		Some(HttpStatusError {
			status: self.status,
			error: self.body.error.clone(),
			error_description: self.body.error_description.clone(),
			correlation_id: self.body.correlation_id.clone(),
		})
	}
}

/// HTTP transport used for token endpoint calls.
///
/// Implementations own retries and request deduplication. They must fail with
/// [`TransportError`] only when no HTTP status was observed; any answer carrying a status,
/// including 4xx and 5xx, is returned as a [`NetworkResponse`].
pub trait NetworkClient
where
	Self: Send + Sync,
{
	/// Sends a POST request to `url`.
	fn send_post_request<'a>(
		&'a self,
		thumbprint: &'a RequestThumbprint,
		url: &'a Url,
		options: NetworkRequestOptions,
	) -> NetworkFuture<'a, NetworkResponse<serde_json::Value>>;
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn response(status: u16, headers: &[(&str, &str)]) -> NetworkResponse<()> {
		NetworkResponse {
			status,
			headers: headers.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect(),
			body: (),
		}
	}

	#[test]
	fn retry_after_reads_delta_seconds() {
		let response = response(429, &[("retry-after", " 30 ")]);

		assert_eq!(response.retry_after(), Some(Duration::seconds(30)));
		assert_eq!(response.header("Retry-After"), Some(" 30 "));
		assert!(!response.is_success());
	}

	#[test]
	fn retry_after_ignores_past_dates_and_garbage() {
		assert_eq!(
			response(503, &[("retry-after", "Wed, 21 Oct 2015 07:28:00 GMT")]).retry_after(),
			None
		);
		assert_eq!(response(503, &[("retry-after", "soon")]).retry_after(), None);
		assert_eq!(response(503, &[]).retry_after(), None);
	}

	#[test]
	fn http_status_error_only_for_non_success() {
		let ok = response(200, &[]).map_body(|_| ServerAuthorizationTokenResponse::default());

		assert!(ok.http_status_error().is_none());

		let failed = response(400, &[]).map_body(|_| ServerAuthorizationTokenResponse {
			error: Some("invalid_grant".into()),
			correlation_id: Some("c-1".into()),
			..Default::default()
		});
		let err = failed.http_status_error().expect("HTTP 400 should describe an error.");

		assert_eq!(err.status, 400);
		assert_eq!(err.error.as_deref(), Some("invalid_grant"));
		assert_eq!(err.correlation_id.as_deref(), Some("c-1"));
	}

	#[test]
	fn thumbprint_equality_tracks_every_field() {
		let base = RequestThumbprint::new("client", "https://login.example.com/common", ["openid"]);

		assert_eq!(base.clone(), base);
		assert_ne!(base.clone().with_home_account_id("uid.utid"), base);
		assert_ne!(base.clone().with_claims("{}"), base);
	}
}
