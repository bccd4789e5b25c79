//! Authorization-code OAuth 2.0 client engine: build authorize URIs from a pluggable client
//! identity, exchange codes and refresh tokens over a blocking transport, and fan the resulting
//! token payload out to ordered callbacks.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod callback;
pub mod error;
pub mod flows;
pub mod http;
pub mod obs;
pub mod params;
pub mod provider;
pub mod request;
pub mod token;
#[cfg(feature = "reqwest")]
#[doc(hidden)]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; available whenever the
	//! `reqwest` transport is compiled in.

	pub use crate::_prelude::*;

	// self
	use crate::{flows::AuthCodeClient, http::ReqwestHttpClient, provider::ClientConfig};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = AuthCodeClient<ClientConfig, ReqwestHttpClient>;

	/// Builds a [`ClientConfig`] whose endpoints point at the provided base URL (typically an
	/// `httpmock` server).
	pub fn test_client_config(base_url: &str) -> ClientConfig {
		ClientConfig::new(
			"client-it",
			"https://app.example.com/callback",
			format!("{base_url}/authorize"),
			format!("{base_url}/token"),
		)
	}

	/// Constructs an [`AuthCodeClient`] backed by the default reqwest transport.
	pub fn build_reqwest_test_client(config: ClientConfig) -> ReqwestTestClient {
		AuthCodeClient::new(config).expect("Failed to build the reqwest-backed test client.")
	}
}

mod _prelude {
	pub use std::{
		borrow::Cow,
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		sync::Arc,
	};

	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::Duration;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use oauth2;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, parking_lot as _};
