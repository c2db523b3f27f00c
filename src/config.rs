//! Resolved client configuration and its builder.
//!
//! A [`ClientConfiguration`] is produced exactly once per client by
//! [`ClientConfigurationBuilder::build`], which applies defaults to every optional field and
//! rejects inputs missing a required field or collaborator. The result is never mutated.

/// Builder API for resolving client configurations.
pub mod builder;

pub use builder::*;

// self
use crate::{
	_prelude::*, authority::CloudDiscoveryMetadata, crypto::CryptoProvider, network::NetworkClient,
	storage::CacheStorage, telemetry::ServerTelemetryManager,
};

/// Authentication options: who the client is and which hosts it may talk to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthOptions {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// Configured authority (HTTPS only).
	pub authority: Url,
	/// Normalized, lowercase hosts trusted in addition to the authority metadata.
	pub known_authorities: Vec<String>,
	/// Discovery document supplied up front instead of being fetched.
	pub cloud_discovery_metadata: Option<CloudDiscoveryMetadata>,
}

/// Library identity reported to the identity provider on every request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryInfo {
	/// Client SKU name.
	pub sku: String,
	/// Client version string.
	pub version: String,
	/// Operating system name.
	pub os: String,
	/// CPU architecture.
	pub cpu: String,
}
impl Default for LibraryInfo {
	fn default() -> Self {
		Self {
			sku: env!("CARGO_PKG_NAME").into(),
			version: env!("CARGO_PKG_VERSION").into(),
			os: std::env::consts::OS.into(),
			cpu: std::env::consts::ARCH.into(),
		}
	}
}

/// Client-wide behavior knobs.
///
/// Resolved and carried on [`ClientConfiguration`] for the token cache layers built on top of
/// this crate; the bootstrap and token request paths here never read them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemOptions {
	/// How long before expiry a cached token is considered due for renewal.
	pub token_renewal_offset: Duration,
}
impl SystemOptions {
	const DEFAULT_TOKEN_RENEWAL_OFFSET: Duration = Duration::seconds(300);
}
impl Default for SystemOptions {
	fn default() -> Self {
		Self { token_renewal_offset: Self::DEFAULT_TOKEN_RENEWAL_OFFSET }
	}
}

/// Immutable, fully resolved client configuration.
#[derive(Clone)]
pub struct ClientConfiguration {
	/// Authentication options.
	pub auth: AuthOptions,
	/// Library identity metadata.
	pub library: LibraryInfo,
	/// Client-wide behavior knobs.
	pub system: SystemOptions,
	/// Cryptographic collaborator.
	pub crypto: Arc<dyn CryptoProvider>,
	/// Persisted-token store collaborator. Held for higher layers; never invoked here.
	pub storage: Arc<dyn CacheStorage>,
	/// Network collaborator used for every token endpoint call.
	pub network: Arc<dyn NetworkClient>,
	/// Optional server telemetry collaborator.
	pub telemetry: Option<Arc<dyn ServerTelemetryManager>>,
}
impl ClientConfiguration {
	/// Creates an empty builder.
	pub fn builder() -> ClientConfigurationBuilder {
		ClientConfigurationBuilder::default()
	}
}
impl Debug for ClientConfiguration {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientConfiguration")
			.field("auth", &self.auth)
			.field("library", &self.library)
			.field("system", &self.system)
			.field("telemetry_set", &self.telemetry.is_some())
			.finish()
	}
}
