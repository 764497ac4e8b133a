//! Item shapes. Items live under the API's `object`/`objects` endpoints.

use chrono::NaiveDateTime;
use serde::Deserialize;

use super::generic_entries::{GenericEntry, Image, IssueEntry};
use super::{list_or_empty, optional_int, timestamp};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BasicItem {
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
  #[serde(default, rename = "first_appeared_in_issue")]
  pub first_issue: Option<IssueEntry>,
  pub id: u64,
  pub image: Image,
  #[serde(rename = "count_of_issue_appearances")]
  pub issue_count: u64,
  pub name: String,
  #[serde(rename = "site_detail_url")]
  pub site_url: String,
  #[serde(default, deserialize_with = "optional_int")]
  pub start_year: Option<i64>,
  #[serde(default, rename = "deck")]
  pub summary: Option<String>,
}

impl BasicItem {
  pub fn alias_list(&self) -> Vec<String> {
    super::split_aliases(self.aliases.as_deref())
  }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Item {
  #[serde(flatten)]
  pub basic: BasicItem,
  #[serde(default, deserialize_with = "list_or_empty", rename = "issue_credits")]
  pub issues: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "story_arc_credits")]
  pub story_arcs: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "volume_credits")]
  pub volumes: Vec<GenericEntry>,
}
