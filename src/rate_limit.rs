//! Request rate limiting.
//!
//! Comicvine enforces a short per-second cap and a longer per-hour cap, and
//! tiers them per resource path. The limiter keeps one set of windows per
//! bucket (one bucket per endpoint family) so a bulk listing of volumes does
//! not starve a single character lookup.
//!
//! Accounting is in-memory and process-local; a session shared across tasks
//! shares one limiter. When a window is full, `acquire` sleeps until capacity
//! frees up, bounded by a maximum total delay; past that it errors rather
//! than letting an unthrottled request through.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use crate::error::{Error, Result};

/// A single rate window: at most `limit` calls per `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rate {
  pub limit: usize,
  pub window: Duration,
}

impl Rate {
  pub const fn per_second(limit: usize) -> Self {
    Self {
      limit,
      window: Duration::from_secs(1),
    }
  }

  pub const fn per_hour(limit: usize) -> Self {
    Self {
      limit,
      window: Duration::from_secs(60 * 60),
    }
  }
}

/// Sliding window over the instants of recent calls.
#[derive(Debug)]
struct Window {
  rate: Rate,
  hits: VecDeque<Instant>,
}

impl Window {
  fn new(rate: Rate) -> Self {
    Self {
      rate,
      hits: VecDeque::with_capacity(rate.limit),
    }
  }

  /// How long until this window has capacity at `now`, if it is full.
  fn delay_until_ready(&mut self, now: Instant) -> Option<Duration> {
    while let Some(&front) = self.hits.front() {
      if now.duration_since(front) >= self.rate.window {
        self.hits.pop_front();
      } else {
        break;
      }
    }
    if self.hits.len() < self.rate.limit {
      return None;
    }
    let oldest = *self.hits.front()?;
    Some(oldest + self.rate.window - now)
  }

  fn record(&mut self, now: Instant) {
    self.hits.push_back(now);
  }
}

/// Multi-window, multi-bucket limiter gating every outbound request.
pub struct RateLimiter {
  rates: Vec<Rate>,
  max_delay: Duration,
  buckets: Mutex<HashMap<String, Vec<Window>>>,
}

impl RateLimiter {
  pub fn new(rates: Vec<Rate>, max_delay: Duration) -> Self {
    Self {
      rates,
      max_delay,
      buckets: Mutex::new(HashMap::new()),
    }
  }

  /// The limits Comicvine documents: 1 request/second and 200 requests/hour,
  /// with delays tolerated for up to a day before giving up.
  pub fn comicvine() -> Self {
    Self::new(
      vec![Rate::per_second(1), Rate::per_hour(200)],
      Duration::from_secs(24 * 60 * 60),
    )
  }

  /// Block (asynchronously) until `bucket` has capacity in every window,
  /// then record the call. Errors once the accumulated delay would exceed
  /// the configured maximum.
  pub(crate) async fn acquire(&self, bucket: &str) -> Result<()> {
    let mut waited = Duration::ZERO;
    loop {
      let wait = {
        let mut buckets = self
          .buckets
          .lock()
          .map_err(|_| Error::Service("rate limiter lock poisoned".to_string()))?;
        let windows = buckets
          .entry(bucket.to_string())
          .or_insert_with(|| self.rates.iter().map(|&r| Window::new(r)).collect());
        let now = Instant::now();
        let wait = windows
          .iter_mut()
          .filter_map(|w| w.delay_until_ready(now))
          .max();
        match wait {
          None => {
            for window in windows.iter_mut() {
              window.record(now);
            }
            return Ok(());
          }
          Some(wait) => wait,
        }
      };

      if waited + wait > self.max_delay {
        return Err(Error::Service(format!(
          "rate limit for '{bucket}' would delay past the maximum of {:?}",
          self.max_delay
        )));
      }
      debug!(bucket, ?wait, "rate limit reached, delaying request");
      tokio::time::sleep(wait).await;
      waited += wait;
    }
  }
}

/// Map a request path onto a limiter bucket.
///
/// `/api/issues/` shares the `issues` bucket across all list pages, while
/// `/api/issue/4000-1/` maps to `get_issue`. Paths too short to classify
/// fall into a single shared bucket.
pub(crate) fn bucket_for(path: &str) -> String {
  let parts: Vec<&str> = path.trim_matches('/').split('/').filter(|p| !p.is_empty()).collect();
  if parts.len() < 2 {
    return "comicvine".to_string();
  }
  if parts.len() == 3 {
    return format!("get_{}", parts[1]);
  }
  parts[1].to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn window_allows_up_to_limit_without_delay() {
    let mut window = Window::new(Rate::per_second(2));
    let t0 = Instant::now();
    assert_eq!(window.delay_until_ready(t0), None);
    window.record(t0);
    assert_eq!(window.delay_until_ready(t0), None);
    window.record(t0);

    let delay = window.delay_until_ready(t0).unwrap();
    assert_eq!(delay, Duration::from_secs(1));
  }

  #[test]
  fn window_frees_capacity_after_the_span_elapses() {
    let mut window = Window::new(Rate::per_second(1));
    let t0 = Instant::now();
    window.record(t0);
    assert!(window.delay_until_ready(t0 + Duration::from_millis(500)).is_some());
    assert_eq!(window.delay_until_ready(t0 + Duration::from_secs(1)), None);
  }

  #[test]
  fn buckets_follow_the_endpoint_family() {
    assert_eq!(bucket_for("/api/issues/"), "issues");
    assert_eq!(bucket_for("/api/issue/4000-1/"), "get_issue");
    assert_eq!(bucket_for("/api/search/"), "search");
    assert_eq!(bucket_for("/issues/"), "comicvine");
  }

  #[tokio::test(start_paused = true)]
  async fn acquire_delays_once_the_second_window_fills() {
    let limiter = RateLimiter::new(vec![Rate::per_second(1)], Duration::from_secs(60));
    let start = Instant::now();
    limiter.acquire("issues").await.unwrap();
    limiter.acquire("issues").await.unwrap();
    assert!(start.elapsed() >= Duration::from_secs(1));
  }

  #[tokio::test(start_paused = true)]
  async fn buckets_are_independent() {
    let limiter = RateLimiter::new(vec![Rate::per_second(1)], Duration::from_secs(60));
    let start = Instant::now();
    limiter.acquire("issues").await.unwrap();
    limiter.acquire("get_character").await.unwrap();
    // Different buckets, no delay.
    assert!(start.elapsed() < Duration::from_secs(1));
  }

  #[tokio::test(start_paused = true)]
  async fn acquire_errors_past_the_maximum_delay() {
    let limiter = RateLimiter::new(vec![Rate::per_hour(1)], Duration::from_secs(1));
    limiter.acquire("issues").await.unwrap();
    let err = limiter.acquire("issues").await.unwrap_err();
    assert!(matches!(err, Error::Service(_)));
  }
}
