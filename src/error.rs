//! Client-level error types shared across bootstrap, headers, and token endpoint calls.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem raised while bootstrapping a client.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The network collaborator could not complete the exchange.
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Token endpoint body could not be decoded into the token response shape.
	#[error("Token endpoint response could not be decoded (HTTP {status}).")]
	ResponseParse {
		/// HTTP status observed alongside the body.
		status: u16,
		/// Structured decoding failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Configuration failures raised before a client is usable.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A required configuration field was never supplied.
	#[error("Client configuration is missing the required `{field}` field.")]
	MissingField {
		/// Name of the missing field.
		field: &'static str,
	},
	/// A required collaborator was never supplied.
	#[error("Client configuration is missing the {collaborator} collaborator.")]
	MissingCollaborator {
		/// Name of the missing collaborator interface.
		collaborator: &'static str,
	},
	/// Authority cannot be parsed as a URL.
	#[error("Authority `{authority}` is not a valid URL.")]
	InvalidAuthority {
		/// Raw authority value.
		authority: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Authority must be served over HTTPS.
	#[error("Authority must use HTTPS: {url}.")]
	InsecureAuthority {
		/// Authority URL that failed validation.
		url: String,
	},
	/// A known authority entry does not name a host.
	#[error("Known authority `{value}` is not a valid host.")]
	InvalidKnownAuthority {
		/// Raw known-authority value.
		value: String,
	},
	/// Cloud discovery metadata is not valid JSON of the expected shape.
	#[error("Cloud discovery metadata is invalid.")]
	InvalidCloudDiscoveryMetadata {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, cancellation).
///
/// None of these carry an observed HTTP status, so the telemetry clear policy is never
/// evaluated when one is returned.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the token endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	///
	/// The bundled reqwest transport reports its failures as [`TransportError::Network`];
	/// this variant is for custom [`NetworkClient`](crate::network::NetworkClient)
	/// implementations that drive sockets or files directly and can convert with `?`.
	#[error("I/O error occurred while calling the token endpoint.")]
	Io(#[from] std::io::Error),
	/// The transport gave up waiting for the token endpoint.
	#[error("Request timed out while calling the token endpoint.")]
	Timeout,
	/// The transport cancelled the in-flight request.
	#[error("Request to the token endpoint was cancelled.")]
	Cancelled,
	/// The response body was not valid JSON.
	#[error("Token endpoint returned a body that is not valid JSON.")]
	MalformedBody {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::Timeout } else { Self::network(e) }
	}
}

/// Non-2xx token endpoint answer with a decodable body.
///
/// Never raised by this crate; higher layers build it from a returned response through
/// [`NetworkResponse::http_status_error`](crate::network::NetworkResponse::http_status_error).
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Token endpoint returned HTTP {status}: {}.", .error.as_deref().unwrap_or("unknown_error"))]
pub struct HttpStatusError {
	/// HTTP status code returned by the token endpoint.
	pub status: u16,
	/// OAuth `error` code, when present.
	pub error: Option<String>,
	/// OAuth `error_description`, when present.
	pub error_description: Option<String>,
	/// Server-side correlation identifier, when present.
	pub correlation_id: Option<String>,
}
