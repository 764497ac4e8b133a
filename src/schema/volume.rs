//! Volume shapes.

use chrono::NaiveDateTime;
use serde::Deserialize;

use super::generic_entries::{CountEntry, GenericEntry, Image, IssueEntry};
use super::{list_or_empty, optional_int, timestamp};

/// Fields common to every volume payload (list, search and get-by-id).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BasicVolume {
  #[serde(default)]
  pub aliases: Option<String>,
  #[serde(rename = "api_detail_url")]
  pub api_url: String,
  #[serde(deserialize_with = "timestamp")]
  pub date_added: NaiveDateTime,
  #[serde(deserialize_with = "timestamp")]
  pub date_last_updated: NaiveDateTime,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub first_issue: Option<IssueEntry>,
  pub id: u64,
  pub image: Image,
  #[serde(rename = "count_of_issues")]
  pub issue_count: u64,
  #[serde(default)]
  pub last_issue: Option<IssueEntry>,
  pub name: String,
  #[serde(default)]
  pub publisher: Option<GenericEntry>,
  #[serde(rename = "site_detail_url")]
  pub site_url: String,
  /// The API serves this as a string, occasionally a non-numeric one.
  #[serde(default, deserialize_with = "optional_int")]
  pub start_year: Option<i64>,
  #[serde(default, rename = "deck")]
  pub summary: Option<String>,
}

impl BasicVolume {
  /// The `aliases` string split into individual names.
  pub fn alias_list(&self) -> Vec<String> {
    super::split_aliases(self.aliases.as_deref())
  }
}

/// The get-by-id shape: [`BasicVolume`] plus the nested relation lists.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Volume {
  #[serde(flatten)]
  pub basic: BasicVolume,
  #[serde(default, deserialize_with = "list_or_empty")]
  pub characters: Vec<CountEntry>,
  #[serde(default, deserialize_with = "list_or_empty")]
  pub concepts: Vec<CountEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "people")]
  pub creators: Vec<CountEntry>,
  #[serde(default, deserialize_with = "list_or_empty")]
  pub issues: Vec<IssueEntry>,
  #[serde(default, deserialize_with = "list_or_empty")]
  pub locations: Vec<CountEntry>,
  #[serde(default, deserialize_with = "list_or_empty")]
  pub objects: Vec<CountEntry>,
}
