//! Client bootstrap: configuration resolution, trust seeding, and header helpers.
//!
//! [`TokenClient`] is constructed once per application client. Construction resolves the
//! configuration first and only then merges the configured hosts into the trusted authority
//! registry, so a rejected configuration never leaves partial trust behind. Token requests are
//! issued through [`TokenClient::execute_post_to_token_endpoint`].

mod invoker;

// self
use crate::{
	_prelude::*,
	authority::TrustedAuthorityRegistry,
	config::{ClientConfiguration, ClientConfigurationBuilder},
	headers::{self, RequestHeaders},
	telemetry::TelemetryCoordinator,
};

/// Bootstrapped OAuth 2.0/OIDC client core.
#[derive(Clone)]
pub struct TokenClient {
	config: Arc<ClientConfiguration>,
	registry: Arc<TrustedAuthorityRegistry>,
	telemetry: Option<TelemetryCoordinator>,
}
impl TokenClient {
	/// Resolves `builder` and seeds the process-wide trusted authority registry.
	pub fn new(builder: ClientConfigurationBuilder) -> Result<Self> {
		Self::with_registry(builder, TrustedAuthorityRegistry::global())
	}

	/// Resolves `builder` and seeds the provided registry.
	pub fn with_registry(
		builder: ClientConfigurationBuilder,
		registry: Arc<TrustedAuthorityRegistry>,
	) -> Result<Self> {
		let config = builder.build()?;

		registry.register_from_config(&config.auth);

		let telemetry = config.telemetry.clone().map(TelemetryCoordinator::new);

		Ok(Self { config: Arc::new(config), registry, telemetry })
	}

	/// Resolved, immutable configuration.
	pub fn config(&self) -> &ClientConfiguration {
		&self.config
	}

	/// Registry this client seeded.
	pub fn registry(&self) -> &Arc<TrustedAuthorityRegistry> {
		&self.registry
	}

	/// Telemetry coordinator derived from the configured telemetry manager.
	///
	/// This is the single source consulted both for telemetry headers and for the clear
	/// decision after a token response.
	pub fn telemetry(&self) -> Option<&TelemetryCoordinator> {
		self.telemetry.as_ref()
	}

	/// Library identity headers for this client.
	pub fn create_default_library_headers(&self) -> RequestHeaders {
		headers::create_default_library_headers(&self.config.library)
	}

	/// Token request headers for this client, including telemetry when configured.
	pub fn create_token_request_headers(&self) -> RequestHeaders {
		headers::create_token_request_headers(&self.config.library, self.telemetry())
	}
}
impl Debug for TokenClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenClient")
			.field("config", &self.config)
			.field("telemetry_set", &self.telemetry.is_some())
			.finish()
	}
}
