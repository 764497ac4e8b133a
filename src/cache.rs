//! SQLite-backed response cache.
//!
//! Maps a redacted request signature to the raw JSON envelope it produced.
//! Rows carry the UTC time they were stored; [`SqliteCache::select`] filters
//! by the expiry window at read time, so an expired row is a miss even if
//! `cleanup` has not run since it lapsed.

use chrono::{Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

use crate::error::{Error, Result};

/// Stored-at format, lexicographically ordered so TEXT comparison in SQL
/// matches chronological comparison.
const STORED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const CACHE_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS cache (
    query TEXT NOT NULL PRIMARY KEY,
    response TEXT NOT NULL,
    stored_at TEXT NOT NULL
);
";

/// Response cache keyed by request signature, with day-granularity expiry.
pub struct SqliteCache {
  conn: Mutex<Connection>,
  expiry_days: Option<u32>,
}

impl SqliteCache {
  /// Open (or create) a cache database at `path`.
  ///
  /// `expiry_days: None` disables expiry entirely. Expired rows are purged
  /// eagerly here and filtered defensively on every read.
  pub fn open(path: impl AsRef<Path>, expiry_days: Option<u32>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .map_err(|e| Error::Cache(format!("unable to create cache directory: {e}")))?;
    }
    Self::init(Connection::open(path)?, expiry_days)
  }

  /// Open a cache at the platform cache directory (`<cache>/longbox/cache.sqlite`).
  pub fn open_default(expiry_days: Option<u32>) -> Result<Self> {
    let root = dirs::cache_dir()
      .or_else(|| dirs::home_dir().map(|p| p.join(".cache")))
      .ok_or_else(|| Error::Cache("unable to determine cache directory".to_string()))?;
    Self::open(root.join("longbox").join("cache.sqlite"), expiry_days)
  }

  /// Open a transient in-memory cache. Mostly useful in tests.
  pub fn open_in_memory(expiry_days: Option<u32>) -> Result<Self> {
    Self::init(Connection::open_in_memory()?, expiry_days)
  }

  fn init(conn: Connection, expiry_days: Option<u32>) -> Result<Self> {
    conn.execute_batch(CACHE_SCHEMA)?;
    let cache = Self {
      conn: Mutex::new(conn),
      expiry_days,
    };
    cache.cleanup()?;
    Ok(cache)
  }

  fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
    self
      .conn
      .lock()
      .map_err(|_| Error::Cache("cache lock poisoned".to_string()))
  }

  /// Oldest stored-at value still considered live, if expiry is enabled.
  fn cutoff(&self) -> Option<String> {
    let days = self.expiry_days?;
    let cutoff = Utc::now() - Duration::days(i64::from(days));
    Some(cutoff.format(STORED_AT_FORMAT).to_string())
  }

  /// Look up a previously stored response. Expired rows count as a miss.
  pub fn select(&self, query: &str) -> Result<Option<String>> {
    let conn = self.lock()?;
    let row = match self.cutoff() {
      Some(cutoff) => conn
        .query_row(
          "SELECT response FROM cache WHERE query = ? AND stored_at > ?",
          params![query, cutoff],
          |row| row.get::<_, String>(0),
        )
        .optional()?,
      None => conn
        .query_row(
          "SELECT response FROM cache WHERE query = ?",
          params![query],
          |row| row.get::<_, String>(0),
        )
        .optional()?,
    };
    debug!(hit = row.is_some(), %query, "cache select");
    Ok(row)
  }

  /// Store a response under `query`, replacing any previous row for the key.
  pub fn insert(&self, query: &str, response: &str) -> Result<()> {
    let stored_at = Utc::now().format(STORED_AT_FORMAT).to_string();
    self.insert_at(query, response, &stored_at)
  }

  fn insert_at(&self, query: &str, response: &str, stored_at: &str) -> Result<()> {
    let conn = self.lock()?;
    conn.execute(
      "INSERT OR REPLACE INTO cache (query, response, stored_at) VALUES (?, ?, ?)",
      params![query, response, stored_at],
    )?;
    Ok(())
  }

  /// Remove the row stored under `query`, if any.
  pub fn delete(&self, query: &str) -> Result<()> {
    let conn = self.lock()?;
    conn.execute("DELETE FROM cache WHERE query = ?", params![query])?;
    Ok(())
  }

  /// Remove every row older than the expiry window. No-op when expiry is
  /// disabled. Runs at open so long-lived databases do not accrete rows.
  pub fn cleanup(&self) -> Result<()> {
    let Some(cutoff) = self.cutoff() else {
      return Ok(());
    };
    let conn = self.lock()?;
    let purged = conn.execute("DELETE FROM cache WHERE stored_at < ?", params![cutoff])?;
    if purged > 0 {
      debug!(purged, "cache cleanup removed expired rows");
    }
    Ok(())
  }
}
