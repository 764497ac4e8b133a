//! Error taxonomy for the Comicvine client.
//!
//! Callers only ever see two failure kinds from a request: an authentication
//! rejection (bad or throttled API key) or a service error covering
//! everything else: transport failures, upstream error envelopes and
//! response-shape validation failures all land in [`Error::Service`].

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`Comicvine`](crate::Comicvine) operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// The API rejected the key. Comicvine signals rate-limit abuse with
  /// HTTP 420 and the same error envelope, so that lands here too.
  #[error("{0}")]
  Authentication(String),

  /// Any other failure: connection problems, timeouts, non-2xx statuses,
  /// an upstream `error != "OK"` envelope, or a response that does not
  /// validate against the expected shape.
  #[error("{0}")]
  Service(String),

  /// The response cache could not be read or written.
  #[error("cache error: {0}")]
  Cache(String),
}

impl From<rusqlite::Error> for Error {
  fn from(err: rusqlite::Error) -> Self {
    Error::Cache(err.to_string())
  }
}

impl Error {
  /// Wrap a validation failure from decoding a response payload.
  pub(crate) fn validation(err: serde_json::Error) -> Self {
    Error::Service(format!("unable to validate response: {err}"))
  }
}
