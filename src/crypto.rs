//! Cryptographic collaborator contract plus a standard implementation.
//!
//! The token path never calls into this module; the configured provider is carried on the
//! resolved configuration for the grant-specific layers built on top of this crate.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, RngCore, distr::Alphanumeric};
use sha2::{Digest, Sha256};
// self
use crate::_prelude::*;

const PKCE_VERIFIER_LEN: usize = 64;

/// Failure raised by a [`CryptoProvider`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum CryptoError {
	/// Input was not valid base64url.
	#[error("Value is not valid base64url: {message}.")]
	InvalidBase64 {
		/// Decoder message.
		message: String,
	},
	/// Decoded bytes were not valid UTF-8.
	#[error("Decoded value is not valid UTF-8.")]
	InvalidUtf8,
}

/// PKCE verifier/challenge pair (RFC 7636, S256).
#[derive(Clone, PartialEq, Eq)]
pub struct PkceCodes {
	/// Secret code verifier.
	pub verifier: String,
	/// Base64url SHA-256 digest of the verifier.
	pub challenge: String,
}
impl Debug for PkceCodes {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PkceCodes")
			.field("verifier", &"<redacted>")
			.field("challenge", &self.challenge)
			.finish()
	}
}

/// Cryptographic operations required by client layers.
pub trait CryptoProvider
where
	Self: Send + Sync,
{
	/// Creates a random RFC 4122 version 4 GUID.
	fn create_new_guid(&self) -> String;

	/// Encodes a string as unpadded base64url.
	fn base64_encode(&self, input: &str) -> String;

	/// Decodes an unpadded base64url string.
	fn base64_decode(&self, input: &str) -> Result<String, CryptoError>;

	/// Generates a fresh PKCE pair.
	fn generate_pkce_codes(&self) -> PkceCodes;
}

/// [`CryptoProvider`] backed by `rand`, `sha2`, and `base64`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardCryptoProvider;
impl CryptoProvider for StandardCryptoProvider {
	fn create_new_guid(&self) -> String {
		let mut bytes = [0_u8; 16];

		rand::rng().fill_bytes(&mut bytes);

		bytes[6] = (bytes[6] & 0x0f) | 0x40;
		bytes[8] = (bytes[8] & 0x3f) | 0x80;

		let hex = bytes.iter().map(|byte| format!("{byte:02x}")).collect::<String>();

		format!("{}-{}-{}-{}-{}", &hex[..8], &hex[8..12], &hex[12..16], &hex[16..20], &hex[20..])
	}

	fn base64_encode(&self, input: &str) -> String {
		URL_SAFE_NO_PAD.encode(input.as_bytes())
	}

	fn base64_decode(&self, input: &str) -> Result<String, CryptoError> {
		let bytes = URL_SAFE_NO_PAD
			.decode(input.trim_end_matches('='))
			.map_err(|e| CryptoError::InvalidBase64 { message: e.to_string() })?;

		String::from_utf8(bytes).map_err(|_| CryptoError::InvalidUtf8)
	}

	fn generate_pkce_codes(&self) -> PkceCodes {
		let verifier: String =
			rand::rng().sample_iter(Alphanumeric).take(PKCE_VERIFIER_LEN).map(char::from).collect();
		let challenge = compute_pkce_challenge(&verifier);

		PkceCodes { verifier, challenge }
	}
}

fn compute_pkce_challenge(verifier: &str) -> String {
	let mut hasher = Sha256::new();

	hasher.update(verifier.as_bytes());

	URL_SAFE_NO_PAD.encode(hasher.finalize())
}
