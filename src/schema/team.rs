//! Team shapes.

use chrono::NaiveDateTime;
use serde::Deserialize;

use super::generic_entries::{GenericEntry, Image, IssueEntry};
use super::{list_or_empty, timestamp};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BasicTeam {
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
  // The API misspells this key; accept the correct spelling too.
  #[serde(
    rename = "count_of_isssue_appearances",
    alias = "count_of_issue_appearances"
  )]
  pub issue_count: u64,
  #[serde(rename = "count_of_team_members")]
  pub member_count: u64,
  pub name: String,
  #[serde(default)]
  pub publisher: Option<GenericEntry>,
  #[serde(rename = "site_detail_url")]
  pub site_url: String,
  #[serde(default, rename = "deck")]
  pub summary: Option<String>,
}

impl BasicTeam {
  pub fn alias_list(&self) -> Vec<String> {
    super::split_aliases(self.aliases.as_deref())
  }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Team {
  #[serde(flatten)]
  pub basic: BasicTeam,
  #[serde(default, deserialize_with = "list_or_empty", rename = "character_enemies")]
  pub enemies: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "character_friends")]
  pub friends: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "issue_credits")]
  pub issues: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "disbanded_in_issues")]
  pub issues_disbanded_in: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "characters")]
  pub members: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "story_arc_credits")]
  pub story_arcs: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "volume_credits")]
  pub volumes: Vec<GenericEntry>,
}
