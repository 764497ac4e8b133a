//! The Comicvine session: typed endpoints over cache, rate limit and
//! transport.
//!
//! Every outbound call flows through one pipeline: build the request
//! signature, consult the cache, take a rate-limit slot, perform the GET,
//! reject error envelopes, store the body, decode. List endpoints paginate
//! with `offset`, the search endpoint with `page`; both fetch 100 rows per
//! request and stop at `max_results`.

use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::cache::SqliteCache;
use crate::error::{Error, Result};
use crate::rate_limit::{bucket_for, RateLimiter};
use crate::resource::Resource;
use crate::schema::{
  self, BasicCharacter, BasicConcept, BasicCreator, BasicIssue, BasicItem, BasicLocation,
  BasicOrigin, BasicPower, BasicPublisher, BasicStoryArc, BasicTeam, BasicVolume, Character,
  Concept, Creator, Issue, Item, Location, Origin, Power, Publisher, StoryArc, Team, Volume,
};

const API_URL: &str = "https://comicvine.gamespot.com/api";

/// Rows fetched per request while paginating.
const PAGE_LIMIT: usize = 100;

/// Default cap on accumulated rows for list and search calls.
pub const DEFAULT_MAX_RESULTS: usize = 500;

/// The response envelope every endpoint wraps its payload in.
#[derive(Debug, Deserialize)]
struct Envelope {
  #[serde(default = "ok")]
  error: String,
  #[serde(default)]
  results: Value,
  #[serde(default)]
  number_of_total_results: usize,
  #[serde(default)]
  number_of_page_results: usize,
  #[serde(default)]
  offset: usize,
}

fn ok() -> String {
  "OK".to_string()
}

/// Search results, tagged by the resource category that was searched.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResults {
  Issues(Vec<BasicIssue>),
  Characters(Vec<BasicCharacter>),
  Publishers(Vec<BasicPublisher>),
  Concepts(Vec<BasicConcept>),
  Locations(Vec<BasicLocation>),
  Origins(Vec<BasicOrigin>),
  Powers(Vec<BasicPower>),
  Creators(Vec<BasicCreator>),
  StoryArcs(Vec<BasicStoryArc>),
  Volumes(Vec<BasicVolume>),
  Items(Vec<BasicItem>),
  Teams(Vec<BasicTeam>),
}

/// Configures and builds a [`Comicvine`] session.
pub struct ComicvineBuilder {
  api_key: String,
  base_url: String,
  timeout: Duration,
  user_agent: Option<String>,
  cache: Option<SqliteCache>,
}

impl ComicvineBuilder {
  /// HTTP timeout for each request. Defaults to 30 seconds.
  pub fn timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  /// Override the User-Agent header sent with every request.
  pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
    self.user_agent = Some(user_agent.into());
    self
  }

  /// Attach a response cache. Without one every call goes to the network.
  pub fn cache(mut self, cache: SqliteCache) -> Self {
    self.cache = Some(cache);
    self
  }

  /// Point the session at a different API root. Mostly useful in tests.
  pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  pub fn build(self) -> Result<Comicvine> {
    // An empty override falls back to the default agent string.
    let user_agent = match self.user_agent {
      Some(ua) if !ua.is_empty() => ua,
      _ => default_user_agent(),
    };
    Ok(Comicvine {
      api_key: self.api_key,
      base_url: self.base_url.trim_end_matches('/').to_string(),
      transport: crate::transport::Transport::new(&user_agent, self.timeout)?,
      limiter: RateLimiter::comicvine(),
      cache: self.cache,
    })
  }
}

fn default_user_agent() -> String {
  format!(
    "longbox/{}/{}",
    env!("CARGO_PKG_VERSION"),
    std::env::consts::OS
  )
}

/// A Comicvine API session.
pub struct Comicvine {
  api_key: String,
  base_url: String,
  transport: crate::transport::Transport,
  limiter: RateLimiter,
  cache: Option<SqliteCache>,
}

impl Comicvine {
  /// Start building a session for the given API key.
  pub fn builder(api_key: impl Into<String>) -> ComicvineBuilder {
    ComicvineBuilder {
      api_key: api_key.into(),
      base_url: API_URL.to_string(),
      timeout: Duration::from_secs(30),
      user_agent: None,
      cache: None,
    }
  }

  /// One cached, rate-limited GET against `endpoint`. The error envelope
  /// check runs before the cache write, so only successful responses are
  /// ever stored.
  async fn get_request(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Envelope> {
    let url = format!("{}{}/", self.base_url, endpoint);
    let mut params: Vec<(String, String)> = params
      .iter()
      .map(|(k, v)| (k.to_string(), v.clone()))
      .collect();
    params.push(("api_key".to_string(), self.api_key.clone()));
    params.push(("format".to_string(), "json".to_string()));

    let key = signature(&url, &params);
    if let Some(cache) = &self.cache {
      if let Some(body) = cache.select(&key)? {
        return serde_json::from_str(&body)
          .map_err(|e| Error::Cache(format!("corrupt cache row for '{key}': {e}")));
      }
    }

    let path = Url::parse(&url)
      .map_err(|e| Error::Service(format!("invalid url '{url}': {e}")))?
      .path()
      .to_string();
    self.limiter.acquire(&bucket_for(&path)).await?;

    let body = self.transport.get(&url, &params).await?;
    let envelope: Envelope =
      serde_json::from_value(body.clone()).map_err(Error::validation)?;
    if envelope.error != "OK" {
      return Err(Error::Service(envelope.error));
    }
    debug!(
      total = envelope.number_of_total_results,
      page = envelope.number_of_page_results,
      offset = envelope.offset,
      endpoint,
      "envelope received"
    );

    if let Some(cache) = &self.cache {
      cache.insert(&key, &body.to_string())?;
    }
    Ok(envelope)
  }

  /// Accumulate list pages by advancing `offset` until the server runs dry
  /// or `max_results` rows are collected. Pages are fetched strictly one at
  /// a time so the rate limiter sees every request.
  async fn offset_request(
    &self,
    endpoint: &str,
    filters: &[(&str, String)],
    max_results: usize,
  ) -> Result<Vec<Value>> {
    let limit = PAGE_LIMIT.to_string();
    let mut params: Vec<(&str, String)> = filters.to_vec();
    params.push(("limit", limit.clone()));

    let envelope = self.get_request(endpoint, &params).await?;
    let total = envelope.number_of_total_results;
    let mut results = page_rows(envelope.results)?;
    let mut last_page = results.len();

    while last_page > 0 && results.len() < total && results.len() < max_results {
      let mut params: Vec<(&str, String)> = filters.to_vec();
      params.push(("limit", limit.clone()));
      params.push(("offset", results.len().to_string()));
      let envelope = self.get_request(endpoint, &params).await?;
      let rows = page_rows(envelope.results)?;
      last_page = rows.len();
      results.extend(rows);
    }

    results.truncate(max_results);
    debug!(endpoint, rows = results.len(), "list complete");
    Ok(results)
  }

  /// Like [`Comicvine::offset_request`], but for endpoints paginated with a
  /// 1-based `page` parameter.
  async fn paged_request(
    &self,
    endpoint: &str,
    filters: &[(&str, String)],
    max_results: usize,
  ) -> Result<Vec<Value>> {
    let limit = PAGE_LIMIT.to_string();
    let mut page = 1usize;
    let mut params: Vec<(&str, String)> = filters.to_vec();
    params.push(("limit", limit.clone()));
    params.push(("page", page.to_string()));

    let envelope = self.get_request(endpoint, &params).await?;
    let total = envelope.number_of_total_results;
    let mut results = page_rows(envelope.results)?;
    let mut last_page = results.len();

    while last_page > 0 && results.len() < total && results.len() < max_results {
      page += 1;
      let mut params: Vec<(&str, String)> = filters.to_vec();
      params.push(("limit", limit.clone()));
      params.push(("page", page.to_string()));
      let envelope = self.get_request(endpoint, &params).await?;
      let rows = page_rows(envelope.results)?;
      last_page = rows.len();
      results.extend(rows);
    }

    results.truncate(max_results);
    Ok(results)
  }

  async fn fetch_by_id<T: serde::de::DeserializeOwned>(
    &self,
    resource: Resource,
    id: u64,
  ) -> Result<T> {
    let endpoint = format!("/{}/{}", resource.info().singular, resource.canonical_id(id));
    let envelope = self.get_request(&endpoint, &[]).await?;
    schema::decode(envelope.results)
  }

  async fn fetch_list<T: serde::de::DeserializeOwned>(
    &self,
    resource: Resource,
    filters: &[(&str, String)],
    max_results: usize,
  ) -> Result<Vec<T>> {
    let endpoint = format!("/{}", resource.info().plural);
    let rows = self.offset_request(&endpoint, filters, max_results).await?;
    schema::decode_list(rows)
  }

  /// Request an Issue by id.
  pub async fn get_issue(&self, id: u64) -> Result<Issue> {
    self.fetch_by_id(Resource::Issue, id).await
  }

  /// Request Issues, filtered by `filters`, up to `max_results` rows.
  pub async fn list_issues(
    &self,
    filters: &[(&str, String)],
    max_results: usize,
  ) -> Result<Vec<BasicIssue>> {
    self.fetch_list(Resource::Issue, filters, max_results).await
  }

  /// Request a Character by id.
  pub async fn get_character(&self, id: u64) -> Result<Character> {
    self.fetch_by_id(Resource::Character, id).await
  }

  /// Request Characters, filtered by `filters`, up to `max_results` rows.
  pub async fn list_characters(
    &self,
    filters: &[(&str, String)],
    max_results: usize,
  ) -> Result<Vec<BasicCharacter>> {
    self.fetch_list(Resource::Character, filters, max_results).await
  }

  /// Request a Publisher by id.
  pub async fn get_publisher(&self, id: u64) -> Result<Publisher> {
    self.fetch_by_id(Resource::Publisher, id).await
  }

  /// Request Publishers, filtered by `filters`, up to `max_results` rows.
  pub async fn list_publishers(
    &self,
    filters: &[(&str, String)],
    max_results: usize,
  ) -> Result<Vec<BasicPublisher>> {
    self.fetch_list(Resource::Publisher, filters, max_results).await
  }

  /// Request a Concept by id.
  pub async fn get_concept(&self, id: u64) -> Result<Concept> {
    self.fetch_by_id(Resource::Concept, id).await
  }

  /// Request Concepts, filtered by `filters`, up to `max_results` rows.
  pub async fn list_concepts(
    &self,
    filters: &[(&str, String)],
    max_results: usize,
  ) -> Result<Vec<BasicConcept>> {
    self.fetch_list(Resource::Concept, filters, max_results).await
  }

  /// Request a Location by id.
  pub async fn get_location(&self, id: u64) -> Result<Location> {
    self.fetch_by_id(Resource::Location, id).await
  }

  /// Request Locations, filtered by `filters`, up to `max_results` rows.
  pub async fn list_locations(
    &self,
    filters: &[(&str, String)],
    max_results: usize,
  ) -> Result<Vec<BasicLocation>> {
    self.fetch_list(Resource::Location, filters, max_results).await
  }

  /// Request an Origin by id.
  pub async fn get_origin(&self, id: u64) -> Result<Origin> {
    self.fetch_by_id(Resource::Origin, id).await
  }

  /// Request Origins, filtered by `filters`, up to `max_results` rows.
  pub async fn list_origins(
    &self,
    filters: &[(&str, String)],
    max_results: usize,
  ) -> Result<Vec<BasicOrigin>> {
    self.fetch_list(Resource::Origin, filters, max_results).await
  }

  /// Request a Power by id.
  pub async fn get_power(&self, id: u64) -> Result<Power> {
    self.fetch_by_id(Resource::Power, id).await
  }

  /// Request Powers, filtered by `filters`, up to `max_results` rows.
  pub async fn list_powers(
    &self,
    filters: &[(&str, String)],
    max_results: usize,
  ) -> Result<Vec<BasicPower>> {
    self.fetch_list(Resource::Power, filters, max_results).await
  }

  /// Request a Creator by id.
  pub async fn get_creator(&self, id: u64) -> Result<Creator> {
    self.fetch_by_id(Resource::Creator, id).await
  }

  /// Request Creators, filtered by `filters`, up to `max_results` rows.
  pub async fn list_creators(
    &self,
    filters: &[(&str, String)],
    max_results: usize,
  ) -> Result<Vec<BasicCreator>> {
    self.fetch_list(Resource::Creator, filters, max_results).await
  }

  /// Request a Story Arc by id.
  pub async fn get_story_arc(&self, id: u64) -> Result<StoryArc> {
    self.fetch_by_id(Resource::StoryArc, id).await
  }

  /// Request Story Arcs, filtered by `filters`, up to `max_results` rows.
  pub async fn list_story_arcs(
    &self,
    filters: &[(&str, String)],
    max_results: usize,
  ) -> Result<Vec<BasicStoryArc>> {
    self.fetch_list(Resource::StoryArc, filters, max_results).await
  }

  /// Request a Volume by id.
  pub async fn get_volume(&self, id: u64) -> Result<Volume> {
    self.fetch_by_id(Resource::Volume, id).await
  }

  /// Request Volumes, filtered by `filters`, up to `max_results` rows.
  pub async fn list_volumes(
    &self,
    filters: &[(&str, String)],
    max_results: usize,
  ) -> Result<Vec<BasicVolume>> {
    self.fetch_list(Resource::Volume, filters, max_results).await
  }

  /// Request an Item by id.
  pub async fn get_item(&self, id: u64) -> Result<Item> {
    self.fetch_by_id(Resource::Item, id).await
  }

  /// Request Items, filtered by `filters`, up to `max_results` rows.
  pub async fn list_items(
    &self,
    filters: &[(&str, String)],
    max_results: usize,
  ) -> Result<Vec<BasicItem>> {
    self.fetch_list(Resource::Item, filters, max_results).await
  }

  /// Request a Team by id.
  pub async fn get_team(&self, id: u64) -> Result<Team> {
    self.fetch_by_id(Resource::Team, id).await
  }

  /// Request Teams, filtered by `filters`, up to `max_results` rows.
  pub async fn list_teams(
    &self,
    filters: &[(&str, String)],
    max_results: usize,
  ) -> Result<Vec<BasicTeam>> {
    self.fetch_list(Resource::Team, filters, max_results).await
  }

  /// Search one resource category for `query`, up to `max_results` rows.
  /// The search endpoint paginates by page number rather than offset.
  pub async fn search(
    &self,
    resource: Resource,
    query: &str,
    max_results: usize,
  ) -> Result<SearchResults> {
    let params = [
      ("query", query.to_string()),
      ("resources", resource.info().search_filter.to_string()),
    ];
    let rows = self.paged_request("/search", &params, max_results).await?;
    Ok(match resource {
      Resource::Issue => SearchResults::Issues(schema::decode_list(rows)?),
      Resource::Character => SearchResults::Characters(schema::decode_list(rows)?),
      Resource::Publisher => SearchResults::Publishers(schema::decode_list(rows)?),
      Resource::Concept => SearchResults::Concepts(schema::decode_list(rows)?),
      Resource::Location => SearchResults::Locations(schema::decode_list(rows)?),
      Resource::Origin => SearchResults::Origins(schema::decode_list(rows)?),
      Resource::Power => SearchResults::Powers(schema::decode_list(rows)?),
      Resource::Creator => SearchResults::Creators(schema::decode_list(rows)?),
      Resource::StoryArc => SearchResults::StoryArcs(schema::decode_list(rows)?),
      Resource::Volume => SearchResults::Volumes(schema::decode_list(rows)?),
      Resource::Item => SearchResults::Items(schema::decode_list(rows)?),
      Resource::Team => SearchResults::Teams(schema::decode_list(rows)?),
    })
  }
}

/// A list page's `results` value as rows. Get-by-id endpoints return an
/// object here instead, which list pagination treats as malformed.
fn page_rows(results: Value) -> Result<Vec<Value>> {
  match results {
    Value::Array(rows) => Ok(rows),
    Value::Null => Ok(Vec::new()),
    other => Err(Error::Service(format!(
      "expected a list of results, found {other}"
    ))),
  }
}

/// The cache key for a request: full url plus query string with parameters
/// in lexicographic order and the API key value redacted. Sorting makes the
/// signature independent of the order callers pass filters in.
fn signature(url: &str, params: &[(String, String)]) -> String {
  let mut pairs: Vec<(&str, &str)> = params
    .iter()
    .map(|(k, v)| (k.as_str(), v.as_str()))
    .collect();
  pairs.sort();
  let mut encoded = url::form_urlencoded::Serializer::new(String::new());
  for (key, value) in pairs {
    if key == "api_key" {
      encoded.append_pair(key, "*****");
    } else {
      encoded.append_pair(key, value);
    }
  }
  format!("{url}?{}", encoded.finish())
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
    raw
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect()
  }

  #[test]
  fn signature_redacts_the_api_key() {
    let key = signature(
      "https://comicvine.gamespot.com/api/issues/",
      &pairs(&[("api_key", "super-secret"), ("format", "json")]),
    );
    assert_eq!(
      key,
      "https://comicvine.gamespot.com/api/issues/?api_key=*****&format=json"
    );
    assert!(!key.contains("super-secret"));
  }

  #[test]
  fn signature_is_independent_of_parameter_order() {
    let a = signature(
      "https://comicvine.gamespot.com/api/issues/",
      &pairs(&[("limit", "100"), ("api_key", "k"), ("filter", "name:war")]),
    );
    let b = signature(
      "https://comicvine.gamespot.com/api/issues/",
      &pairs(&[("api_key", "k"), ("filter", "name:war"), ("limit", "100")]),
    );
    assert_eq!(a, b);
  }

  #[test]
  fn signature_percent_encodes_values() {
    let key = signature(
      "https://comicvine.gamespot.com/api/search/",
      &pairs(&[("query", "war of kings")]),
    );
    assert!(key.ends_with("?query=war+of+kings"));
  }

  #[test]
  fn envelope_defaults_cover_missing_fields() {
    let envelope: Envelope = serde_json::from_value(json!({"results": []})).unwrap();
    assert_eq!(envelope.error, "OK");
    assert_eq!(envelope.number_of_total_results, 0);
  }

  #[test]
  fn page_rows_rejects_object_results() {
    assert!(page_rows(json!({"id": 1})).is_err());
    assert_eq!(page_rows(json!(null)).unwrap(), Vec::<Value>::new());
  }

  #[test]
  fn default_user_agent_names_the_crate() {
    let ua = default_user_agent();
    assert!(ua.starts_with("longbox/"));
  }
}
