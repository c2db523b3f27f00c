//! Raw token endpoint payload.

// self
use crate::_prelude::*;

/// Body returned by a token endpoint, success or OAuth error alike.
///
/// Every field is optional and nothing is validated here; interpretation belongs to higher
/// layers. Numeric lifetimes are accepted either as JSON numbers or as numeric strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerAuthorizationTokenResponse {
	/// Token type, usually `Bearer`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_type: Option<String>,
	/// Space-delimited granted scopes.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub scope: Option<String>,
	/// Access token lifetime in seconds.
	#[serde(default, skip_serializing_if = "Option::is_none", with = "lenient_seconds")]
	pub expires_in: Option<u64>,
	/// Extended access token lifetime in seconds.
	#[serde(default, skip_serializing_if = "Option::is_none", with = "lenient_seconds")]
	pub ext_expires_in: Option<u64>,
	/// Seconds after which the access token should be proactively refreshed.
	#[serde(default, skip_serializing_if = "Option::is_none", with = "lenient_seconds")]
	pub refresh_in: Option<u64>,
	/// Issued access token.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub access_token: Option<String>,
	/// Issued refresh token.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<String>,
	/// Issued ID token.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id_token: Option<String>,
	/// Encoded client info.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client_info: Option<String>,
	/// Family-of-client-ids marker.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub foci: Option<String>,
	/// OAuth error code.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
	/// OAuth error description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error_description: Option<String>,
	/// Provider-specific numeric error codes.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error_codes: Option<Vec<u64>>,
	/// Provider-specific sub-error.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub suberror: Option<String>,
	/// Server timestamp.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timestamp: Option<String>,
	/// Server trace identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub trace_id: Option<String>,
	/// Server correlation identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub correlation_id: Option<String>,
}
impl ServerAuthorizationTokenResponse {
	/// Decodes a JSON body, reporting the failing path on error.
	///
	/// A `null` body (empty HTTP payload) decodes to an all-`None` response.
	pub fn from_value(
		value: serde_json::Value,
	) -> Result<Self, serde_path_to_error::Error<serde_json::Error>> {
		if value.is_null() {
			return Ok(Self::default());
		}

		serde_path_to_error::deserialize(value)
	}

	/// Whether the body carries an OAuth error code.
	pub fn is_error(&self) -> bool {
		self.error.is_some()
	}
}

mod lenient_seconds {
	// crates.io
	use serde::{Deserializer, Serializer, de::Error as _};
	// self
	use crate::_prelude::*;

	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Seconds {
		Number(u64),
		Text(String),
	}

	pub(super) fn serialize<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match value {
			Some(value) => serializer.serialize_u64(*value),
			None => serializer.serialize_none(),
		}
	}

	pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
	where
		D: Deserializer<'de>,
	{
		match Option::<Seconds>::deserialize(deserializer)? {
			None => Ok(None),
			Some(Seconds::Number(value)) => Ok(Some(value)),
			Some(Seconds::Text(raw)) => raw.trim().parse().map(Some).map_err(D::Error::custom),
		}
	}
}
