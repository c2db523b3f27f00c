// self
use crate::{
	_prelude::*,
	authority::{self, CloudDiscoveryMetadata},
	config::{AuthOptions, ClientConfiguration, LibraryInfo, SystemOptions},
	crypto::CryptoProvider,
	error::ConfigError,
	network::NetworkClient,
	storage::CacheStorage,
	telemetry::ServerTelemetryManager,
};

/// Partial client configuration collected before resolution.
///
/// Every setter is optional; [`build`](Self::build) fills defaults and reports the first
/// missing requirement as a [`ConfigError`].
#[derive(Clone, Default)]
pub struct ClientConfigurationBuilder {
	/// OAuth 2.0 client identifier (required).
	pub client_id: Option<String>,
	/// Raw authority URL (required).
	pub authority: Option<String>,
	/// Raw known-authority hosts or URLs.
	pub known_authorities: Vec<String>,
	/// Raw cloud discovery metadata JSON.
	pub cloud_discovery_metadata: Option<String>,
	/// Library identity override; defaults to this crate's name, version, OS, and CPU.
	pub library: Option<LibraryInfo>,
	/// System options override.
	pub system: Option<SystemOptions>,
	/// Cryptographic collaborator (required).
	pub crypto: Option<Arc<dyn CryptoProvider>>,
	/// Storage collaborator (required).
	pub storage: Option<Arc<dyn CacheStorage>>,
	/// Network collaborator (required).
	pub network: Option<Arc<dyn NetworkClient>>,
	/// Server telemetry collaborator (optional).
	pub telemetry: Option<Arc<dyn ServerTelemetryManager>>,
}
impl ClientConfigurationBuilder {
	/// Sets the client identifier.
	pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
		self.client_id = Some(client_id.into());

		self
	}

	/// Sets the authority URL.
	pub fn authority(mut self, authority: impl Into<String>) -> Self {
		self.authority = Some(authority.into());

		self
	}

	/// Appends a single known authority.
	pub fn known_authority(mut self, host: impl Into<String>) -> Self {
		self.known_authorities.push(host.into());

		self
	}

	/// Appends multiple known authorities.
	pub fn known_authorities<I, S>(mut self, hosts: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.known_authorities.extend(hosts.into_iter().map(Into::into));

		self
	}

	/// Sets the raw cloud discovery metadata JSON.
	pub fn cloud_discovery_metadata(mut self, raw: impl Into<String>) -> Self {
		self.cloud_discovery_metadata = Some(raw.into());

		self
	}

	/// Overrides the library identity.
	pub fn library(mut self, library: LibraryInfo) -> Self {
		self.library = Some(library);

		self
	}

	/// Overrides the system options.
	pub fn system(mut self, system: SystemOptions) -> Self {
		self.system = Some(system);

		self
	}

	/// Sets the cryptographic collaborator.
	pub fn crypto(mut self, crypto: Arc<dyn CryptoProvider>) -> Self {
		self.crypto = Some(crypto);

		self
	}

	/// Sets the storage collaborator.
	pub fn storage(mut self, storage: Arc<dyn CacheStorage>) -> Self {
		self.storage = Some(storage);

		self
	}

	/// Sets the network collaborator.
	pub fn network(mut self, network: Arc<dyn NetworkClient>) -> Self {
		self.network = Some(network);

		self
	}

	/// Sets the server telemetry collaborator.
	pub fn telemetry(mut self, telemetry: Arc<dyn ServerTelemetryManager>) -> Self {
		self.telemetry = Some(telemetry);

		self
	}

	/// Consumes the builder and resolves the configuration.
	///
	/// Pure: nothing outside the returned value is touched, so a failure here leaves every
	/// shared structure as it was.
	pub fn build(self) -> Result<ClientConfiguration, ConfigError> {
		let client_id = self
			.client_id
			.filter(|value| !value.trim().is_empty())
			.ok_or(ConfigError::MissingField { field: "client_id" })?;
		let authority =
			resolve_authority(self.authority.ok_or(ConfigError::MissingField { field: "authority" })?)?;
		let known_authorities = self
			.known_authorities
			.into_iter()
			.map(|value| {
				authority::normalize_host(&value)
					.ok_or(ConfigError::InvalidKnownAuthority { value })
			})
			.collect::<Result<Vec<_>, _>>()?;
		let cloud_discovery_metadata = self
			.cloud_discovery_metadata
			.as_deref()
			.map(CloudDiscoveryMetadata::from_json)
			.transpose()?;
		let crypto = self.crypto.ok_or(ConfigError::MissingCollaborator { collaborator: "crypto" })?;
		let storage =
			self.storage.ok_or(ConfigError::MissingCollaborator { collaborator: "storage" })?;
		let network =
			self.network.ok_or(ConfigError::MissingCollaborator { collaborator: "network" })?;

		Ok(ClientConfiguration {
			auth: AuthOptions { client_id, authority, known_authorities, cloud_discovery_metadata },
			library: self.library.unwrap_or_default(),
			system: self.system.unwrap_or_default(),
			crypto,
			storage,
			network,
			telemetry: self.telemetry,
		})
	}
}
impl Debug for ClientConfigurationBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientConfigurationBuilder")
			.field("client_id", &self.client_id)
			.field("authority", &self.authority)
			.field("known_authorities", &self.known_authorities)
			.field("crypto_set", &self.crypto.is_some())
			.field("storage_set", &self.storage.is_some())
			.field("network_set", &self.network.is_some())
			.field("telemetry_set", &self.telemetry.is_some())
			.finish()
	}
}

fn resolve_authority(raw: String) -> Result<Url, ConfigError> {
	let url = Url::parse(raw.trim())
		.map_err(|source| ConfigError::InvalidAuthority { authority: raw.clone(), source })?;

	if url.scheme() != "https" {
		return Err(ConfigError::InsecureAuthority { url: url.to_string() });
	}

	Ok(url)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		crypto::StandardCryptoProvider,
		network::{NetworkFuture, NetworkRequestOptions, NetworkResponse, RequestThumbprint},
		storage::MemoryCacheStorage,
	};

	struct UnreachableNetwork;
	impl NetworkClient for UnreachableNetwork {
		fn send_post_request<'a>(
			&'a self,
			_thumbprint: &'a RequestThumbprint,
			_url: &'a Url,
			_options: NetworkRequestOptions,
		) -> NetworkFuture<'a, NetworkResponse<serde_json::Value>> {
			Box::pin(async { Err(crate::error::TransportError::Cancelled) })
		}
	}

	fn complete() -> ClientConfigurationBuilder {
		ClientConfiguration::builder()
			.client_id("client-id")
			.authority("https://login.example.com/common")
			.crypto(Arc::new(StandardCryptoProvider))
			.storage(Arc::new(MemoryCacheStorage::default()))
			.network(Arc::new(UnreachableNetwork))
	}

	#[test]
	fn build_applies_defaults() {
		let config = complete().build().expect("Complete builder should resolve.");

		assert_eq!(config.auth.client_id, "client-id");
		assert_eq!(config.auth.authority.as_str(), "https://login.example.com/common");
		assert!(config.auth.known_authorities.is_empty());
		assert!(config.auth.cloud_discovery_metadata.is_none());
		assert_eq!(config.library, LibraryInfo::default());
		assert_eq!(config.library.sku, "oauth2-client-core");
		assert_eq!(config.system.token_renewal_offset, Duration::seconds(300));
		assert!(config.telemetry.is_none());
	}

	#[test]
	fn build_keeps_system_override() {
		let config = complete()
			.system(SystemOptions { token_renewal_offset: Duration::seconds(60) })
			.build()
			.expect("System override should resolve.");

		assert_eq!(config.system.token_renewal_offset, Duration::seconds(60));
	}

	#[test]
	fn build_normalizes_known_authorities() {
		let config = complete()
			.known_authorities(["Login.Example.com", "https://b2c.example.com/tenant"])
			.build()
			.expect("Known authorities should resolve.");

		assert_eq!(config.auth.known_authorities, vec!["login.example.com", "b2c.example.com"]);
	}

	#[test]
	fn build_reports_missing_requirements() {
		let err = ClientConfiguration::builder()
			.authority("https://login.example.com/common")
			.build()
			.expect_err("Missing client id should fail.");

		assert!(matches!(err, ConfigError::MissingField { field: "client_id" }));

		let mut builder = complete();

		builder.authority = None;

		assert!(matches!(
			builder.build().expect_err("Missing authority should fail."),
			ConfigError::MissingField { field: "authority" }
		));

		let mut builder = complete();

		builder.crypto = None;

		assert!(matches!(
			builder.build().expect_err("Missing crypto should fail."),
			ConfigError::MissingCollaborator { collaborator: "crypto" }
		));

		let mut builder = complete();

		builder.storage = None;

		assert!(matches!(
			builder.build().expect_err("Missing storage should fail."),
			ConfigError::MissingCollaborator { collaborator: "storage" }
		));
	}

	#[test]
	fn build_rejects_invalid_authorities() {
		let err = complete()
			.authority("http://login.example.com/common")
			.build()
			.expect_err("Plain HTTP authority should fail.");

		assert!(matches!(err, ConfigError::InsecureAuthority { .. }));

		let err = complete()
			.authority("not a url")
			.build()
			.expect_err("Unparseable authority should fail.");

		assert!(matches!(err, ConfigError::InvalidAuthority { .. }));

		let err = complete()
			.known_authority("login example.com")
			.build()
			.expect_err("Known authority with whitespace should fail.");

		assert!(matches!(err, ConfigError::InvalidKnownAuthority { .. }));

		let err = complete()
			.cloud_discovery_metadata("{not json")
			.build()
			.expect_err("Malformed discovery metadata should fail.");

		assert!(matches!(err, ConfigError::InvalidCloudDiscoveryMetadata { .. }));
	}
}
