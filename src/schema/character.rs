//! Character shapes.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use super::generic_entries::{GenericEntry, Image, IssueEntry};
use super::{list_or_empty, loose_date, timestamp};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BasicCharacter {
  #[serde(default)]
  pub aliases: Option<String>,
  #[serde(rename = "api_detail_url")]
  pub api_url: String,
  #[serde(deserialize_with = "timestamp")]
  pub date_added: NaiveDateTime,
  #[serde(deserialize_with = "timestamp")]
  pub date_last_updated: NaiveDateTime,
  /// Served as `Mon DD, YYYY` rather than an ISO date.
  #[serde(default, rename = "birth", deserialize_with = "loose_date")]
  pub date_of_birth: Option<NaiveDate>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default, rename = "first_appeared_in_issue")]
  pub first_issue: Option<IssueEntry>,
  pub gender: i64,
  pub id: u64,
  pub image: Image,
  #[serde(rename = "count_of_issue_appearances")]
  pub issue_count: u64,
  pub name: String,
  #[serde(default)]
  pub origin: Option<GenericEntry>,
  #[serde(default)]
  pub publisher: Option<GenericEntry>,
  #[serde(default)]
  pub real_name: Option<String>,
  #[serde(rename = "site_detail_url")]
  pub site_url: String,
  #[serde(default, rename = "deck")]
  pub summary: Option<String>,
}

impl BasicCharacter {
  /// The `aliases` string split into individual names.
  pub fn alias_list(&self) -> Vec<String> {
    super::split_aliases(self.aliases.as_deref())
  }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Character {
  #[serde(flatten)]
  pub basic: BasicCharacter,
  #[serde(default, deserialize_with = "list_or_empty")]
  pub creators: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "issues_died_in")]
  pub deaths: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "character_enemies")]
  pub enemies: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "team_enemies")]
  pub enemy_teams: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "team_friends")]
  pub friendly_teams: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "character_friends")]
  pub friends: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "issue_credits")]
  pub issues: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty")]
  pub powers: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "story_arc_credits")]
  pub story_arcs: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty")]
  pub teams: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "volume_credits")]
  pub volumes: Vec<GenericEntry>,
}
