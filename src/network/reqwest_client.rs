// std
use std::ops::Deref;
// crates.io
use reqwest::{header::HeaderMap, redirect::Policy};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
	network::{
		NetworkClient, NetworkFuture, NetworkRequestOptions, NetworkResponse, RequestThumbprint,
	},
};

/// Thin wrapper around [`ReqwestClient`] implementing [`NetworkClient`].
///
/// Token endpoints answer directly, so clients built through [`ReqwestNetworkClient::new`]
/// never follow redirects. Configure any custom [`ReqwestClient`] the same way. The wrapper
/// performs a single attempt per call; the thumbprint is accepted but not used for
/// deduplication.
#[derive(Clone, Debug, Default)]
pub struct ReqwestNetworkClient(pub ReqwestClient);
impl ReqwestNetworkClient {
	/// Builds a client with redirects disabled.
	pub fn new() -> Result<Self, ConfigError> {
		Ok(Self(ReqwestClient::builder().redirect(Policy::none()).build()?))
	}

	/// Builds a client with redirects disabled and a per-request timeout.
	pub fn with_timeout(timeout: std::time::Duration) -> Result<Self, ConfigError> {
		Ok(Self(ReqwestClient::builder().redirect(Policy::none()).timeout(timeout).build()?))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
impl AsRef<ReqwestClient> for ReqwestNetworkClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestNetworkClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl NetworkClient for ReqwestNetworkClient {
	fn send_post_request<'a>(
		&'a self,
		_thumbprint: &'a RequestThumbprint,
		url: &'a Url,
		options: NetworkRequestOptions,
	) -> NetworkFuture<'a, NetworkResponse<serde_json::Value>> {
		let client = self.0.clone();

		Box::pin(async move {
			let mut request = client.post(url.clone());

			for (name, value) in options.headers {
				request = request.header(name, value);
			}
			if let Some(body) = options.body {
				request = request.body(body);
			}

			let response = request.send().await?;
			let status = response.status().as_u16();
			let headers = collect_headers(response.headers());
			let bytes = response.bytes().await?;
			let body = parse_body(&bytes)?;

			Ok(NetworkResponse { status, headers, body })
		})
	}
}

fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
	headers
		.iter()
		.filter_map(|(name, value)| {
			value.to_str().ok().map(|value| (name.as_str().to_owned(), value.to_owned()))
		})
		.collect()
}

fn parse_body(bytes: &[u8]) -> Result<serde_json::Value, TransportError> {
	if bytes.iter().all(u8::is_ascii_whitespace) {
		return Ok(serde_json::Value::Null);
	}

	let mut de = serde_json::Deserializer::from_slice(bytes);

	serde_path_to_error::deserialize(&mut de)
		.map_err(|source| TransportError::MalformedBody { source })
}
