//! HTTP execution and failure mapping.
//!
//! One thin GET wrapper around `reqwest`. Everything transport-shaped
//! (connect failures, timeouts, non-2xx statuses, unparsable bodies) is
//! translated here into the crate error taxonomy; no retries happen at this
//! layer.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::error::{Error, Result};

pub(crate) struct Transport {
  client: reqwest::Client,
}

impl Transport {
  pub(crate) fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
      USER_AGENT,
      HeaderValue::from_str(user_agent)
        .map_err(|e| Error::Service(format!("invalid user agent: {e}")))?,
    );

    let client = reqwest::Client::builder()
      .default_headers(headers)
      .timeout(timeout)
      .build()
      .map_err(|e| Error::Service(format!("unable to build HTTP client: {e}")))?;

    Ok(Self { client })
  }

  /// Perform a GET and decode the body as JSON.
  ///
  /// Comicvine signals rate-limit abuse with HTTP 420 and the same error
  /// envelope as a rejected key, so 420 maps to [`Error::Authentication`]
  /// alongside 401.
  pub(crate) async fn get(&self, url: &str, params: &[(String, String)]) -> Result<Value> {
    debug!(%url, "GET");
    let response = self
      .client
      .get(url)
      .query(params)
      .send()
      .await
      .map_err(|err| {
        if err.is_timeout() {
          Error::Service("Service took too long to respond".to_string())
        } else if err.is_connect() {
          Error::Service(format!("Unable to connect to '{url}'"))
        } else {
          Error::Service(err.to_string())
        }
      })?;

    let status = response.status();
    if status.is_success() {
      // The timeout can also fire mid-body; keep that distinct from a
      // body that arrived but was not JSON.
      return response
        .json::<Value>()
        .await
        .map_err(|err| body_failure(err, url));
    }

    // 420 has no StatusCode constant; match on the raw code.
    match status.as_u16() {
      401 | 420 => Err(Error::Authentication(server_error(response, url).await?)),
      404 => Err(Error::Service("404: Not Found".to_string())),
      502 | 503 => Err(Error::Service("Service error, retry again later".to_string())),
      _ => Err(Error::Service(server_error(response, url).await?)),
    }
  }
}

/// Pull the `error` field out of a failure body; an unparsable body is its
/// own service error.
async fn server_error(response: reqwest::Response, url: &str) -> Result<String> {
  let body: Value = response.json().await.map_err(|err| body_failure(err, url))?;
  body
    .get("error")
    .and_then(Value::as_str)
    .map(str::to_string)
    .ok_or_else(|| parse_failure(url))
}

fn body_failure(err: reqwest::Error, url: &str) -> Error {
  if err.is_timeout() {
    Error::Service("Service took too long to respond".to_string())
  } else {
    parse_failure(url)
  }
}

fn parse_failure(url: &str) -> Error {
  Error::Service(format!("Unable to parse response from '{url}' as Json"))
}
