//! Client-level error types shared across flows, transports, and callbacks.

// self
use crate::{
	_prelude::*,
	token::{PayloadParseError, TokenPayload},
};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error accepted from transports and callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, IO).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Callback failures raised after a successful exchange.
	#[error(transparent)]
	Callback(#[from] CallbackError),

	/// Token endpoint answered with a non-success HTTP status.
	#[error("Token endpoint responded with HTTP {status}{}.", describe_oauth_error(.oauth_error.as_deref(), .error_description.as_deref()))]
	TokenEndpoint {
		/// HTTP status code returned by the token endpoint.
		status: u16,
		/// OAuth `error` field, when the error body carried one.
		oauth_error: Option<String>,
		/// OAuth `error_description` field, when the error body carried one.
		error_description: Option<String>,
	},
	/// Token endpoint answered successfully but the body is not a flat JSON object.
	#[error("Token endpoint returned a malformed token payload.")]
	TokenResponseParse {
		/// Structured parsing failure.
		#[source]
		source: PayloadParseError,
		/// HTTP status code of the response that failed to parse.
		status: u16,
	},
}

/// Configuration and validation failures raised while building or driving a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Identity reports an endpoint that is not an absolute `http`/`https` URL with a host.
	#[error("The {endpoint} endpoint `{value}` is not an absolute http(s) URL.")]
	InvalidEndpoint {
		/// Endpoint label (`authorization` or `token`).
		endpoint: &'static str,
		/// Raw value reported by the identity.
		value: String,
		/// Parsing failure; `None` when the value parsed but has the wrong scheme or no host.
		#[source]
		source: Option<url::ParseError>,
	},
	/// Identity reports an empty value for a required field.
	#[error("Client identity field `{field}` must not be empty.")]
	MissingField {
		/// Name of the required field.
		field: &'static str,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for ConfigError {
	fn from(e: reqwest::Error) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
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
	#[error("I/O error occurred while calling the token endpoint.")]
	Io(#[from] std::io::Error),
	/// Transport failed without a structured error.
	#[error("HTTP client error occurred while calling the token endpoint: {message}.")]
	Other {
		/// Transport-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for TransportError {
	fn from(e: reqwest::Error) -> Self {
		Self::network(e)
	}
}

/// One or more token callbacks failed while being notified.
///
/// Every registered callback still ran; the payload that was delivered to them is kept so the
/// caller does not lose the issued tokens.
#[derive(Debug, ThisError)]
#[error("{} of {notified} token callback(s) failed.", .failures.len())]
pub struct CallbackError {
	/// Payload delivered to every callback.
	pub payload: TokenPayload,
	/// Number of callbacks that were notified.
	pub notified: usize,
	/// Failures in registration order.
	pub failures: Vec<CallbackFailure>,
}

/// Failure raised by a single callback.
#[derive(Debug)]
pub struct CallbackFailure {
	/// Registration position of the failing callback.
	pub index: usize,
	/// Error returned by the callback.
	pub source: BoxError,
}

fn describe_oauth_error(error: Option<&str>, description: Option<&str>) -> String {
	match (error, description) {
		(Some(error), Some(description)) => format!(": {error} ({description})"),
		(Some(error), None) => format!(": {error}"),
		(None, Some(description)) => format!(": {description}"),
		(None, None) => String::new(),
	}
}
