//! Small nested shapes shared by every resource: related-entry stubs and
//! image blocks.

use serde::Deserialize;

/// A reference to another resource, as embedded in relation lists.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenericEntry {
  /// Url to the resource in the Comicvine API.
  #[serde(rename = "api_detail_url")]
  pub api_url: String,
  pub id: u64,
  #[serde(default)]
  pub name: Option<String>,
  /// Url to the resource on the Comicvine site.
  #[serde(default, rename = "site_detail_url")]
  pub site_url: Option<String>,
}

/// A related entry with an appearance count (e.g. characters of a volume).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CountEntry {
  #[serde(flatten)]
  pub entry: GenericEntry,
  pub count: u64,
}

/// A related issue, carrying the issue number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IssueEntry {
  #[serde(flatten)]
  pub entry: GenericEntry,
  #[serde(default, rename = "issue_number")]
  pub number: Option<String>,
}

/// A related creator with their roles, newline-separated in one string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatorEntry {
  #[serde(flatten)]
  pub entry: GenericEntry,
  #[serde(rename = "role")]
  pub roles: String,
}

/// The block of sized image urls attached to most resources.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Image {
  pub icon_url: String,
  #[serde(rename = "screen_large_url")]
  pub large_screen_url: String,
  pub medium_url: String,
  pub original_url: String,
  pub screen_url: String,
  pub small_url: String,
  pub super_url: String,
  #[serde(rename = "thumb_url")]
  pub thumbnail: String,
  pub tiny_url: String,
  #[serde(default, rename = "image_tags")]
  pub tags: Option<String>,
}

/// An additional image attached to an issue.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssociatedImage {
  #[serde(rename = "original_url")]
  pub url: String,
  pub id: u64,
  #[serde(default)]
  pub caption: Option<String>,
  #[serde(default, rename = "image_tags")]
  pub tags: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn generic_entry_renames_url_keys_and_ignores_extras() {
    let entry: GenericEntry = serde_json::from_value(json!({
      "api_detail_url": "https://comicvine.gamespot.com/api/issue/4000-1/",
      "site_detail_url": "https://comicvine.gamespot.com/issue/4000-1/",
      "id": 1,
      "name": "First Issue",
      "not_a_declared_field": {"ignored": true}
    }))
    .unwrap();
    assert_eq!(entry.id, 1);
    assert_eq!(entry.name.as_deref(), Some("First Issue"));
    assert!(entry.api_url.ends_with("/issue/4000-1/"));
  }

  #[test]
  fn issue_entry_flattens_the_generic_fields() {
    let entry: IssueEntry = serde_json::from_value(json!({
      "api_detail_url": "https://example.com/api/issue/4000-2/",
      "id": 2,
      "name": null,
      "issue_number": "2"
    }))
    .unwrap();
    assert_eq!(entry.entry.id, 2);
    assert_eq!(entry.entry.name, None);
    assert_eq!(entry.number.as_deref(), Some("2"));
  }

  #[test]
  fn missing_required_entry_field_is_an_error() {
    let result: Result<GenericEntry, _> = serde_json::from_value(json!({"id": 3}));
    assert!(result.is_err());
  }
}
