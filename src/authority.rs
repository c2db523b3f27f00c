//! Trusted authority registry and cloud discovery metadata.
//!
//! The registry is the only mutable state shared between client instances. It starts out
//! [`RegistryState::Empty`], becomes [`RegistryState::Seeded`] on the first registration, and
//! afterwards only grows: every registration merges hosts into the existing set so clients
//! bootstrapped concurrently never overwrite each other's trust.

// std
use std::sync::OnceLock;
// self
use crate::{_prelude::*, config::AuthOptions, error::ConfigError, obs};

static GLOBAL_REGISTRY: OnceLock<Arc<TrustedAuthorityRegistry>> = OnceLock::new();

/// Cloud discovery document supplied through configuration instead of a network lookup.
///
/// Mirrors the instance discovery response shape:
/// `{"tenant_discovery_endpoint": "...", "api-version": "1.1", "metadata": [...]}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudDiscoveryMetadata {
	/// OpenID configuration endpoint advertised by the discovery document.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tenant_discovery_endpoint: Option<String>,
	/// Discovery API version.
	#[serde(default, rename = "api-version", skip_serializing_if = "Option::is_none")]
	pub api_version: Option<String>,
	/// Per-cloud alias groups.
	pub metadata: Vec<CloudInstanceMetadata>,
}
impl CloudDiscoveryMetadata {
	/// Parses a raw JSON discovery document.
	pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
		let mut de = serde_json::Deserializer::from_str(raw);

		serde_path_to_error::deserialize(&mut de)
			.map_err(|source| ConfigError::InvalidCloudDiscoveryMetadata { source })
	}

	/// Iterates every alias host across all cloud entries.
	pub fn aliases(&self) -> impl Iterator<Item = &str> {
		self.metadata.iter().flat_map(|entry| entry.aliases.iter().map(String::as_str))
	}
}
impl FromStr for CloudDiscoveryMetadata {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_json(s)
	}
}

/// Alias group for a single cloud instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudInstanceMetadata {
	/// Host that should be used for network calls.
	pub preferred_network: String,
	/// Host that should be used for cache keys.
	pub preferred_cache: String,
	/// Every host that refers to this cloud instance.
	pub aliases: Vec<String>,
}

/// Lifecycle of a [`TrustedAuthorityRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryState {
	/// No host has been registered yet.
	Empty,
	/// At least one host has been registered.
	Seeded,
}

#[derive(Debug, Default)]
struct RegistryEntries {
	hosts: BTreeSet<String>,
	metadata: HashMap<String, CloudInstanceMetadata>,
}
impl RegistryEntries {
	fn insert_host(&mut self, host: &str) -> bool {
		match normalize_host(host) {
			Some(host) => self.hosts.insert(host),
			None => false,
		}
	}

	fn insert_metadata(&mut self, metadata: &CloudDiscoveryMetadata) -> usize {
		let mut added = 0;

		for entry in &metadata.metadata {
			for alias in &entry.aliases {
				let Some(host) = normalize_host(alias) else { continue };

				self.metadata.insert(host.clone(), entry.clone());

				if self.hosts.insert(host) {
					added += 1;
				}
			}
		}

		added
	}
}

/// Set of hosts trusted as token issuers.
///
/// Use [`TrustedAuthorityRegistry::global`] for the process-wide instance, or construct a
/// private registry and inject it through
/// [`TokenClient::with_registry`](crate::client::TokenClient::with_registry).
#[derive(Debug, Default)]
pub struct TrustedAuthorityRegistry(RwLock<RegistryEntries>);
impl TrustedAuthorityRegistry {
	/// Returns the process-wide registry shared by clients created via
	/// [`TokenClient::new`](crate::client::TokenClient::new).
	pub fn global() -> Arc<Self> {
		GLOBAL_REGISTRY.get_or_init(Default::default).clone()
	}

	/// Merges the provided hosts into the registry and returns how many were new.
	///
	/// Values that do not name a host are skipped.
	pub fn register_hosts<I, S>(&self, hosts: I) -> usize
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut entries = self.0.write();
		let added = hosts.into_iter().filter(|host| entries.insert_host(host.as_ref())).count();

		obs::trace_trust_registration(added, entries.hosts.len());

		added
	}

	/// Merges every alias of the discovery document and returns how many hosts were new.
	pub fn register_cloud_discovery_metadata(&self, metadata: &CloudDiscoveryMetadata) -> usize {
		let mut entries = self.0.write();
		let added = entries.insert_metadata(metadata);

		obs::trace_trust_registration(added, entries.hosts.len());

		added
	}

	/// Registers the known authorities and discovery metadata of a resolved configuration
	/// under a single write lock.
	pub fn register_from_config(&self, auth: &AuthOptions) -> usize {
		let mut entries = self.0.write();
		let mut added = auth
			.known_authorities
			.iter()
			.filter(|host| entries.insert_host(host.as_str()))
			.count();

		if let Some(metadata) = auth.cloud_discovery_metadata.as_ref() {
			added += entries.insert_metadata(metadata);
		}

		obs::trace_trust_registration(added, entries.hosts.len());

		added
	}

	/// Checks whether `host` is trusted. Comparison is case-insensitive.
	pub fn is_trusted(&self, host: &str) -> bool {
		match normalize_host(host) {
			Some(host) => self.0.read().hosts.contains(&host),
			None => false,
		}
	}

	/// Returns a sorted snapshot of every trusted host.
	pub fn trusted_hosts(&self) -> Vec<String> {
		self.0.read().hosts.iter().cloned().collect()
	}

	/// Returns the discovery entry registered for `host`, if any.
	pub fn cloud_discovery_metadata(&self, host: &str) -> Option<CloudInstanceMetadata> {
		let host = normalize_host(host)?;

		self.0.read().metadata.get(&host).cloned()
	}

	/// Reports whether any host has been registered.
	pub fn state(&self) -> RegistryState {
		if self.0.read().hosts.is_empty() { RegistryState::Empty } else { RegistryState::Seeded }
	}

	/// Drops every host and discovery entry, returning the registry to
	/// [`RegistryState::Empty`].
	pub fn reset(&self) {
		let mut entries = self.0.write();

		entries.hosts.clear();
		entries.metadata.clear();
	}
}

/// Lowercases a host, accepting either a bare host (`login.example.com`) or an absolute URL.
pub(crate) fn normalize_host(value: &str) -> Option<String> {
	let value = value.trim();

	if value.contains("://") {
		return Url::parse(value).ok()?.host_str().map(str::to_ascii_lowercase);
	}
	if value.is_empty() || value.contains(|c: char| c.is_whitespace() || c == '/') {
		return None;
	}

	Some(value.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const DISCOVERY: &str = r#"{
		"tenant_discovery_endpoint": "https://login.example.com/common/v2.0/.well-known/openid-configuration",
		"api-version": "1.1",
		"metadata": [
			{
				"preferred_network": "login.example.com",
				"preferred_cache": "login.example.net",
				"aliases": ["login.example.com", "login.example.net", "Login.Example.Org"]
			}
		]
	}"#;

	#[test]
	fn registry_merges_hosts_without_duplicates() {
		let registry = TrustedAuthorityRegistry::default();

		assert_eq!(registry.state(), RegistryState::Empty);
		assert_eq!(registry.register_hosts(["a.example.com", "b.example.com"]), 2);
		assert_eq!(registry.register_hosts(["b.example.com", "c.example.com"]), 1);
		assert_eq!(registry.state(), RegistryState::Seeded);
		assert_eq!(
			registry.trusted_hosts(),
			vec!["a.example.com", "b.example.com", "c.example.com"]
		);
	}

	#[test]
	fn registry_lookup_is_case_insensitive() {
		let registry = TrustedAuthorityRegistry::default();

		registry.register_hosts(["Login.Example.com"]);

		assert!(registry.is_trusted("login.example.com"));
		assert!(registry.is_trusted("LOGIN.EXAMPLE.COM"));
		assert!(registry.is_trusted("https://login.example.com/tenant"));
		assert!(!registry.is_trusted("evil.example.com"));
		assert!(!registry.is_trusted(""));
	}

	#[test]
	fn discovery_metadata_registers_every_alias() {
		let metadata =
			CloudDiscoveryMetadata::from_json(DISCOVERY).expect("Discovery fixture should parse.");
		let registry = TrustedAuthorityRegistry::default();

		assert_eq!(registry.register_cloud_discovery_metadata(&metadata), 3);
		assert!(registry.is_trusted("login.example.org"));

		let entry = registry
			.cloud_discovery_metadata("LOGIN.EXAMPLE.NET")
			.expect("Alias should resolve to its cloud entry.");

		assert_eq!(entry.preferred_network, "login.example.com");
		assert_eq!(entry.preferred_cache, "login.example.net");
		assert_eq!(metadata.api_version.as_deref(), Some("1.1"));
	}

	#[test]
	fn discovery_metadata_rejects_malformed_documents() {
		let err = CloudDiscoveryMetadata::from_json(r#"{"metadata": [{"aliases": 1}]}"#)
			.expect_err("Malformed discovery metadata should fail.");

		assert!(matches!(err, ConfigError::InvalidCloudDiscoveryMetadata { .. }));
	}

	#[test]
	fn reset_returns_registry_to_empty() {
		let registry = TrustedAuthorityRegistry::default();

		registry.register_hosts(["a.example.com"]);
		registry.reset();

		assert_eq!(registry.state(), RegistryState::Empty);
		assert!(!registry.is_trusted("a.example.com"));
		assert!(registry.cloud_discovery_metadata("a.example.com").is_none());
	}

	#[test]
	fn normalize_host_accepts_urls_and_rejects_paths() {
		assert_eq!(normalize_host(" Login.Example.com "), Some("login.example.com".into()));
		assert_eq!(
			normalize_host("https://login.example.com/common"),
			Some("login.example.com".into())
		);
		assert_eq!(normalize_host("login.example.com/common"), None);
		assert_eq!(normalize_host("login example.com"), None);
	}
}
