// std
use std::{sync::Arc, thread};
// self
use oauth2_client_core::{
	authority::{RegistryState, TrustedAuthorityRegistry},
	client::TokenClient,
	config::{ClientConfiguration, ClientConfigurationBuilder, LibraryInfo},
	crypto::StandardCryptoProvider,
	error::{ConfigError, Error, TransportError},
	network::{
		NetworkClient, NetworkFuture, NetworkRequestOptions, NetworkResponse, RequestThumbprint,
	},
	storage::MemoryCacheStorage,
	url::Url,
};

const DISCOVERY: &str = r#"{
	"tenant_discovery_endpoint": "https://sovereign.example.us/common/v2.0/.well-known/openid-configuration",
	"api-version": "1.1",
	"metadata": [
		{
			"preferred_network": "sovereign.example.us",
			"preferred_cache": "sovereign.example.us",
			"aliases": ["sovereign.example.us", "login.sovereign.example.us"]
		}
	]
}"#;

struct OfflineNetwork;
impl NetworkClient for OfflineNetwork {
	fn send_post_request<'a>(
		&'a self,
		_thumbprint: &'a RequestThumbprint,
		_url: &'a Url,
		_options: NetworkRequestOptions,
	) -> NetworkFuture<'a, NetworkResponse<serde_json::Value>> {
		Box::pin(async { Err(TransportError::Cancelled) })
	}
}

fn builder() -> ClientConfigurationBuilder {
	ClientConfiguration::builder()
		.client_id("bootstrap-client")
		.authority("https://login.example.com/organizations")
		.crypto(Arc::new(StandardCryptoProvider))
		.storage(Arc::new(MemoryCacheStorage::default()))
		.network(Arc::new(OfflineNetwork))
}

#[test]
fn bootstraps_merge_known_authorities() {
	let registry = Arc::new(TrustedAuthorityRegistry::default());

	TokenClient::with_registry(
		builder().known_authorities(["a.example.com", "b.example.com"]),
		registry.clone(),
	)
	.expect("First bootstrap should succeed.");
	TokenClient::with_registry(
		builder().known_authorities(["b.example.com", "c.example.com"]),
		registry.clone(),
	)
	.expect("Second bootstrap should succeed.");

	assert_eq!(registry.trusted_hosts(), vec!["a.example.com", "b.example.com", "c.example.com"]);
}

#[test]
fn bootstrap_without_network_fails_before_registry_mutation() {
	let registry = Arc::new(TrustedAuthorityRegistry::default());

	registry.register_hosts(["prior.example.com"]);

	let mut incomplete =
		builder().known_authority("never.example.com").cloud_discovery_metadata(DISCOVERY);

	incomplete.network = None;

	let err = TokenClient::with_registry(incomplete, registry.clone())
		.expect_err("Bootstrap without a network collaborator should fail.");

	assert!(matches!(
		err,
		Error::Config(ConfigError::MissingCollaborator { collaborator: "network" })
	));
	assert_eq!(registry.trusted_hosts(), vec!["prior.example.com"]);
	assert!(registry.cloud_discovery_metadata("sovereign.example.us").is_none());
}

#[test]
fn invalid_discovery_metadata_leaves_empty_registry_empty() {
	let registry = Arc::new(TrustedAuthorityRegistry::default());
	let err = TokenClient::with_registry(
		builder().known_authority("a.example.com").cloud_discovery_metadata("{\"metadata\": 5}"),
		registry.clone(),
	)
	.expect_err("Malformed discovery metadata should fail.");

	assert!(matches!(err, Error::Config(ConfigError::InvalidCloudDiscoveryMetadata { .. })));
	assert_eq!(registry.state(), RegistryState::Empty);
}

#[test]
fn bootstrap_registers_discovery_aliases() {
	let registry = Arc::new(TrustedAuthorityRegistry::default());
	let client =
		TokenClient::with_registry(builder().cloud_discovery_metadata(DISCOVERY), registry.clone())
			.expect("Bootstrap with discovery metadata should succeed.");

	assert!(registry.is_trusted("login.sovereign.example.us"));
	assert_eq!(
		registry
			.cloud_discovery_metadata("login.sovereign.example.us")
			.expect("Alias should map to its discovery entry.")
			.preferred_network,
		"sovereign.example.us"
	);
	assert_eq!(
		client
			.config()
			.auth
			.cloud_discovery_metadata
			.as_ref()
			.and_then(|metadata| metadata.api_version.as_deref()),
		Some("1.1")
	);
}

#[test]
fn concurrent_bootstraps_keep_every_host() {
	let registry = Arc::new(TrustedAuthorityRegistry::default());

	thread::scope(|scope| {
		for idx in 0..8 {
			let registry = registry.clone();

			scope.spawn(move || {
				TokenClient::with_registry(
					builder().known_authorities([
						format!("tenant-{idx}.example.com"),
						"shared.example.com".into(),
					]),
					registry,
				)
				.expect("Concurrent bootstrap should succeed.");
			});
		}
	});

	let hosts = registry.trusted_hosts();

	assert_eq!(hosts.len(), 9);
	assert!(hosts.iter().any(|host| host == "shared.example.com"));
	assert!((0..8).all(|idx| registry.is_trusted(&format!("tenant-{idx}.example.com"))));
}

#[test]
fn resolved_configuration_keeps_overrides_and_defaults() {
	let library = LibraryInfo {
		sku: "embedded.sku".into(),
		version: "0.0.1".into(),
		os: "none".into(),
		cpu: "thumbv7em".into(),
	};
	let client = TokenClient::with_registry(
		builder().library(library.clone()),
		Arc::new(TrustedAuthorityRegistry::default()),
	)
	.expect("Bootstrap should succeed.");

	assert_eq!(client.config().library, library);
	assert_eq!(client.config().auth.authority.as_str(), "https://login.example.com/organizations");
	assert!(client.telemetry().is_none());
}

#[test]
fn global_registry_is_shared_and_resettable() {
	let global = TrustedAuthorityRegistry::global();

	global.reset();

	let first = TokenClient::new(builder().known_authority("global-a.example.com"))
		.expect("Bootstrap against the global registry should succeed.");
	let second = TokenClient::new(builder().known_authority("global-b.example.com"))
		.expect("Second bootstrap against the global registry should succeed.");

	assert!(Arc::ptr_eq(first.registry(), second.registry()));
	assert!(global.is_trusted("global-a.example.com"));
	assert!(global.is_trusted("global-b.example.com"));

	global.reset();

	assert_eq!(global.state(), RegistryState::Empty);
}
