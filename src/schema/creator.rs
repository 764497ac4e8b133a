//! Creator shapes. Creators live under the API's `person`/`people`
//! endpoints.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use super::generic_entries::{GenericEntry, Image};
use super::{list_or_empty, loose_date, nested_date, timestamp};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BasicCreator {
  #[serde(default)]
  pub aliases: Option<String>,
  #[serde(rename = "api_detail_url")]
  pub api_url: String,
  #[serde(default)]
  pub country: Option<String>,
  #[serde(deserialize_with = "timestamp")]
  pub date_added: NaiveDateTime,
  #[serde(deserialize_with = "timestamp")]
  pub date_last_updated: NaiveDateTime,
  #[serde(default, rename = "birth", deserialize_with = "loose_date")]
  pub date_of_birth: Option<NaiveDate>,
  /// Arrives as a nested object with timezone text; only the date is kept.
  #[serde(default, rename = "death", deserialize_with = "nested_date")]
  pub date_of_death: Option<NaiveDate>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub email: Option<String>,
  pub gender: i64,
  #[serde(default)]
  pub hometown: Option<String>,
  pub id: u64,
  pub image: Image,
  // The API misspells this key; accept the correct spelling too.
  #[serde(
    default,
    rename = "count_of_isssue_appearances",
    alias = "count_of_issue_appearances"
  )]
  pub issue_count: Option<u64>,
  pub name: String,
  #[serde(rename = "site_detail_url")]
  pub site_url: String,
  #[serde(default, rename = "deck")]
  pub summary: Option<String>,
  #[serde(default)]
  pub website: Option<String>,
}

impl BasicCreator {
  pub fn alias_list(&self) -> Vec<String> {
    super::split_aliases(self.aliases.as_deref())
  }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Creator {
  #[serde(flatten)]
  pub basic: BasicCreator,
  #[serde(default, deserialize_with = "list_or_empty", rename = "created_characters")]
  pub characters: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty")]
  pub issues: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "story_arc_credits")]
  pub story_arcs: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "volume_credits")]
  pub volumes: Vec<GenericEntry>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn creator_payload() -> serde_json::Value {
    json!({
      "api_detail_url": "https://comicvine.gamespot.com/api/person/4040-17718/",
      "site_detail_url": "https://comicvine.gamespot.com/tony-moore/4040-17718/",
      "id": 17718,
      "name": "Tony Moore",
      "gender": 1,
      "birth": "1978-06-27 00:00:00",
      "death": {"date": "2021-05-12 00:00:00 UTC", "timezone": "UTC"},
      "date_added": "2008-06-06 11:27:45",
      "date_last_updated": "2019-02-21 18:17:11",
      "count_of_isssue_appearances": 422,
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
      }
    })
  }

  #[test]
  fn death_date_keeps_only_the_date_portion() {
    let creator: BasicCreator = serde_json::from_value(creator_payload()).unwrap();
    assert_eq!(creator.date_of_death, NaiveDate::from_ymd_opt(2021, 5, 12));
    assert_eq!(creator.date_of_birth, NaiveDate::from_ymd_opt(1978, 6, 27));
  }

  #[test]
  fn issue_count_accepts_either_spelling() {
    let creator: BasicCreator = serde_json::from_value(creator_payload()).unwrap();
    assert_eq!(creator.issue_count, Some(422));

    let mut payload = creator_payload();
    let map = payload.as_object_mut().unwrap();
    let count = map.remove("count_of_isssue_appearances").unwrap();
    map.insert("count_of_issue_appearances".to_string(), count);
    let creator: BasicCreator = serde_json::from_value(payload).unwrap();
    assert_eq!(creator.issue_count, Some(422));
  }

  #[test]
  fn common_fields_decode_identically_for_both_shapes() {
    let basic: BasicCreator = serde_json::from_value(creator_payload()).unwrap();
    let full: Creator = serde_json::from_value(creator_payload()).unwrap();
    assert_eq!(basic, full.basic);
  }
}
