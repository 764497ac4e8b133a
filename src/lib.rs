//! A typed client for the Comicvine API.
//!
//! [`Comicvine`] wraps every endpoint the API exposes behind typed methods.
//! Each request flows through a per-endpoint rate limiter honouring the
//! documented 1/second and 200/hour limits, and optionally through a
//! SQLite-backed response cache so repeated lookups cost nothing.
//!
//! ```no_run
//! use longbox::{Comicvine, SqliteCache, DEFAULT_MAX_RESULTS};
//!
//! # async fn run() -> longbox::Result<()> {
//! let session = Comicvine::builder("api-key")
//!   .cache(SqliteCache::open_default(Some(14))?)
//!   .build()?;
//!
//! let issue = session.get_issue(111265).await?;
//! println!("{} #{}", issue.basic.volume.name.unwrap_or_default(), issue.basic.number);
//!
//! let filters = [("filter", "name:The Walking Dead".to_string())];
//! for volume in session.list_volumes(&filters, DEFAULT_MAX_RESULTS).await? {
//!   println!("{} ({:?})", volume.name, volume.start_year);
//! }
//! # Ok(())
//! # }
//! ```

mod cache;
mod error;
mod rate_limit;
mod resource;
pub mod schema;
mod session;
mod transport;

pub use cache::SqliteCache;
pub use error::{Error, Result};
pub use rate_limit::{Rate, RateLimiter};
pub use resource::Resource;
pub use session::{Comicvine, ComicvineBuilder, SearchResults, DEFAULT_MAX_RESULTS};
