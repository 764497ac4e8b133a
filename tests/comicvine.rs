//! End-to-end tests against a mock HTTP server.

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use longbox::{Comicvine, Error, Resource, SearchResults, SqliteCache, DEFAULT_MAX_RESULTS};

fn session(server: &MockServer) -> Comicvine {
  Comicvine::builder("test-key")
    .base_url(format!("{}/api", server.uri()))
    .build()
    .unwrap()
}

fn issue_row(id: u64) -> Value {
  json!({
    "api_detail_url": format!("https://comicvine.gamespot.com/api/issue/4000-{id}/"),
    "site_detail_url": format!("https://comicvine.gamespot.com/issue/4000-{id}/"),
    "id": id,
    "name": format!("Issue {id}"),
    "issue_number": id.to_string(),
    "date_added": "2008-06-06 11:27:45",
    "date_last_updated": "2018-05-17 23:07:25",
    "image": {
      "icon_url": "https://example.com/icon.jpg",
      "medium_url": "https://example.com/medium.jpg",
      "screen_url": "https://example.com/screen.jpg",
      "screen_large_url": "https://example.com/screen_large.jpg",
      "small_url": "https://example.com/small.jpg",
      "super_url": "https://example.com/super.jpg",
      "thumb_url": "https://example.com/thumb.jpg",
      "tiny_url": "https://example.com/tiny.jpg",
      "original_url": "https://example.com/original.jpg"
    },
    "volume": {
      "api_detail_url": "https://comicvine.gamespot.com/api/volume/4050-18216/",
      "id": 18216,
      "name": "The Walking Dead"
    }
  })
}

fn list_envelope(total: usize, rows: Vec<Value>) -> Value {
  json!({
    "error": "OK",
    "limit": 100,
    "offset": 0,
    "number_of_page_results": rows.len(),
    "number_of_total_results": total,
    "results": rows
  })
}

#[tokio::test]
async fn offset_pagination_walks_every_page() {
  let server = MockServer::start().await;
  let pages = [(0usize, 100usize), (100, 100), (200, 50)];
  for (offset, count) in pages {
    let rows = (offset..offset + count).map(|i| issue_row(i as u64)).collect();
    let mock = Mock::given(method("GET")).and(path("/api/issues/"));
    let mock = if offset == 0 {
      mock.and(query_param_is_missing("offset"))
    } else {
      mock.and(query_param("offset", offset.to_string()))
    };
    mock
      .respond_with(ResponseTemplate::new(200).set_body_json(list_envelope(250, rows)))
      .expect(1)
      .mount(&server)
      .await;
  }

  let issues = session(&server)
    .list_issues(&[], DEFAULT_MAX_RESULTS)
    .await
    .unwrap();
  assert_eq!(issues.len(), 250);
  assert_eq!(issues[0].number, "0");
  assert_eq!(issues[249].number, "249");
}

#[tokio::test]
async fn max_results_stops_pagination_early_and_truncates() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/issues/"))
    .and(query_param_is_missing("offset"))
    .respond_with(ResponseTemplate::new(200).set_body_json(list_envelope(
      250,
      (0..100).map(issue_row).collect(),
    )))
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path("/api/issues/"))
    .and(query_param("offset", "100"))
    .respond_with(ResponseTemplate::new(200).set_body_json(list_envelope(
      250,
      (100..200).map(issue_row).collect(),
    )))
    .expect(1)
    .mount(&server)
    .await;

  // 120 needs two pages; the third is never requested and the overshoot
  // from page two is trimmed.
  let issues = session(&server).list_issues(&[], 120).await.unwrap();
  assert_eq!(issues.len(), 120);
}

#[tokio::test]
async fn search_paginates_by_page_number() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/search/"))
    .and(query_param("query", "walking dead"))
    .and(query_param("resources", "issue"))
    .and(query_param("page", "1"))
    .respond_with(ResponseTemplate::new(200).set_body_json(list_envelope(
      130,
      (0..100).map(issue_row).collect(),
    )))
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path("/api/search/"))
    .and(query_param("page", "2"))
    .respond_with(ResponseTemplate::new(200).set_body_json(list_envelope(
      130,
      (100..130).map(issue_row).collect(),
    )))
    .expect(1)
    .mount(&server)
    .await;

  let results = session(&server)
    .search(Resource::Issue, "walking dead", DEFAULT_MAX_RESULTS)
    .await
    .unwrap();
  match results {
    SearchResults::Issues(issues) => assert_eq!(issues.len(), 130),
    other => panic!("expected issues, got {other:?}"),
  }
}

#[tokio::test]
async fn search_with_no_matches_returns_an_empty_list() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/search/"))
    .respond_with(ResponseTemplate::new(200).set_body_json(list_envelope(0, vec![])))
    .expect(1)
    .mount(&server)
    .await;

  let results = session(&server)
    .search(Resource::Character, "xyzzy", DEFAULT_MAX_RESULTS)
    .await
    .unwrap();
  match results {
    SearchResults::Characters(characters) => assert!(characters.is_empty()),
    other => panic!("expected characters, got {other:?}"),
  }
}

#[tokio::test]
async fn error_envelope_mid_pagination_fails_the_whole_call() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/issues/"))
    .and(query_param_is_missing("offset"))
    .respond_with(ResponseTemplate::new(200).set_body_json(list_envelope(
      250,
      (0..100).map(issue_row).collect(),
    )))
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path("/api/issues/"))
    .and(query_param("offset", "100"))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_json(json!({"error": "Object Not Found", "results": []})),
    )
    .mount(&server)
    .await;

  let err = session(&server)
    .list_issues(&[], DEFAULT_MAX_RESULTS)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Service(ref m) if m == "Object Not Found"));
}

#[tokio::test]
async fn rejected_api_key_is_an_authentication_error() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .respond_with(
      ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid API Key"})),
    )
    .mount(&server)
    .await;

  let err = session(&server).get_issue(1).await.unwrap_err();
  assert!(matches!(err, Error::Authentication(ref m) if m == "Invalid API Key"));
}

#[tokio::test]
async fn repeated_requests_are_served_from_the_cache() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/issue/4000-111265/"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "error": "OK",
      "number_of_total_results": 1,
      "results": issue_row(111265)
    })))
    .expect(1)
    .mount(&server)
    .await;

  let session = Comicvine::builder("test-key")
    .base_url(format!("{}/api", server.uri()))
    .cache(SqliteCache::open_in_memory(Some(14)).unwrap())
    .build()
    .unwrap();

  let first = session.get_issue(111265).await.unwrap();
  let second = session.get_issue(111265).await.unwrap();
  assert_eq!(first, second);
}

#[tokio::test]
async fn error_envelopes_are_not_cached() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/issue/4000-1/"))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_json(json!({"error": "Object Not Found", "results": []})),
    )
    .expect(2)
    .mount(&server)
    .await;

  let session = Comicvine::builder("test-key")
    .base_url(format!("{}/api", server.uri()))
    .cache(SqliteCache::open_in_memory(Some(14)).unwrap())
    .build()
    .unwrap();

  // Both calls reach the server; a failure never short-circuits the next try.
  assert!(session.get_issue(1).await.is_err());
  assert!(session.get_issue(1).await.is_err());
}
