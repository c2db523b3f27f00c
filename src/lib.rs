//! Bootstrap and token-endpoint execution core for OAuth 2.0/OIDC clients.
//!
//! A [`client::TokenClient`] resolves an immutable configuration, seeds the trusted authority
//! registry, and posts token requests while keeping server telemetry in step with each response.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod authority;
pub mod client;
pub mod config;
pub mod crypto;
pub mod error;
pub mod headers;
pub mod network;
pub mod obs;
pub mod response;
pub mod storage;
pub mod telemetry;

mod _prelude {
	pub use std::{
		collections::{BTreeMap, BTreeSet, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
