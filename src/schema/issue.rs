//! Issue shapes.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use super::generic_entries::{AssociatedImage, CreatorEntry, GenericEntry, Image};
use super::{list_or_empty, timestamp};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BasicIssue {
  #[serde(default)]
  pub aliases: Option<String>,
  #[serde(rename = "api_detail_url")]
  pub api_url: String,
  #[serde(default, deserialize_with = "list_or_empty")]
  pub associated_images: Vec<AssociatedImage>,
  #[serde(default)]
  pub cover_date: Option<NaiveDate>,
  #[serde(deserialize_with = "timestamp")]
  pub date_added: NaiveDateTime,
  #[serde(deserialize_with = "timestamp")]
  pub date_last_updated: NaiveDateTime,
  #[serde(default)]
  pub description: Option<String>,
  pub id: u64,
  pub image: Image,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(rename = "issue_number")]
  pub number: String,
  #[serde(rename = "site_detail_url")]
  pub site_url: String,
  #[serde(default)]
  pub store_date: Option<NaiveDate>,
  #[serde(default, rename = "deck")]
  pub summary: Option<String>,
  pub volume: GenericEntry,
}

impl BasicIssue {
  /// The `aliases` string split into individual names.
  pub fn alias_list(&self) -> Vec<String> {
    super::split_aliases(self.aliases.as_deref())
  }
}

/// The get-by-id shape, with credits and the first-appearance lists the API
/// is known to serve as `""` when empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Issue {
  #[serde(flatten)]
  pub basic: BasicIssue,
  #[serde(default, deserialize_with = "list_or_empty", rename = "character_credits")]
  pub characters: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "concept_credits")]
  pub concepts: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "person_credits")]
  pub creators: Vec<CreatorEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "character_died_in")]
  pub deaths: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty")]
  pub first_appearance_characters: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty")]
  pub first_appearance_concepts: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty")]
  pub first_appearance_locations: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty")]
  pub first_appearance_objects: Vec<GenericEntry>,
  #[serde(
    default,
    deserialize_with = "list_or_empty",
    rename = "first_appearance_storyarcs"
  )]
  pub first_appearance_story_arcs: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty")]
  pub first_appearance_teams: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "location_credits")]
  pub locations: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "object_credits")]
  pub objects: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "story_arc_credits")]
  pub story_arcs: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "team_credits")]
  pub teams: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty", rename = "team_disbanded_in")]
  pub teams_disbanded: Vec<GenericEntry>,
}
