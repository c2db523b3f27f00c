//! Token endpoint invocation with the telemetry clear policy.
//!
//! Each call awaits the network collaborator exactly once. The clear policy runs only after an
//! HTTP status has actually been observed: a transport error, a timeout, or a dropped future
//! all leave the telemetry failure cache as it was.

// crates.io
use url::form_urlencoded::Serializer;
// self
use crate::{
	_prelude::*,
	client::TokenClient,
	headers::RequestHeaders,
	network::{NetworkRequestOptions, NetworkResponse, RequestThumbprint},
	obs::{self, RequestSpan, TelemetryDecision, TokenRequestOutcome},
	response::ServerAuthorizationTokenResponse,
};

impl TokenClient {
	/// POSTs `url_encoded_body` with `headers` to `endpoint` through the network collaborator.
	///
	/// Non-2xx answers are not errors: the decoded body and status are returned for higher
	/// layers to interpret (see
	/// [`NetworkResponse::http_status_error`](crate::network::NetworkResponse::http_status_error)).
	pub async fn execute_post_to_token_endpoint(
		&self,
		endpoint: &Url,
		url_encoded_body: impl Into<String>,
		headers: RequestHeaders,
		thumbprint: &RequestThumbprint,
	) -> Result<NetworkResponse<ServerAuthorizationTokenResponse>> {
		let span = RequestSpan::new("execute_post_to_token_endpoint", endpoint);
		let options = NetworkRequestOptions { body: Some(url_encoded_body.into()), headers };

		obs::record_token_request(TokenRequestOutcome::Attempt);

		let result = span
			.instrument(async move {
				let response =
					self.config().network.send_post_request(thumbprint, endpoint, options).await?;
				let status = response.status;

				self.apply_telemetry_policy(status);

				response
					.try_map_body(ServerAuthorizationTokenResponse::from_value)
					.map_err(|source| Error::ResponseParse { status, source })
			})
			.await;

		match &result {
			Ok(_) => obs::record_token_request(TokenRequestOutcome::Success),
			Err(_) => obs::record_token_request(TokenRequestOutcome::Failure),
		}

		result
	}

	/// Encodes `form` and sends it with this client's token request headers.
	pub async fn send_token_request<'f, I>(
		&self,
		endpoint: &Url,
		form: I,
		thumbprint: &RequestThumbprint,
	) -> Result<NetworkResponse<ServerAuthorizationTokenResponse>>
	where
		I: IntoIterator<Item = (&'f str, &'f str)>,
	{
		let body = Serializer::new(String::new()).extend_pairs(form).finish();
		let headers = self.create_token_request_headers();

		self.execute_post_to_token_endpoint(endpoint, body, headers, thumbprint).await
	}

	/// Clears the telemetry failure cache iff a coordinator is configured and `status` shows
	/// the server recorded the signal.
	pub(crate) fn apply_telemetry_policy(&self, status: u16) -> TelemetryDecision {
		match self.telemetry() {
			Some(telemetry) => telemetry.on_response_status(status),
			None => {
				obs::trace_telemetry_decision(status, TelemetryDecision::Unconfigured);
				obs::record_telemetry_decision(TelemetryDecision::Unconfigured);

				TelemetryDecision::Unconfigured
			},
		}
	}
}
