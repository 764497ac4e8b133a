//! Publisher shapes.

use chrono::NaiveDateTime;
use serde::Deserialize;

use super::generic_entries::{GenericEntry, Image};
use super::{list_or_empty, timestamp};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BasicPublisher {
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
  pub id: u64,
  pub image: Image,
  #[serde(default)]
  pub location_address: Option<String>,
  #[serde(default)]
  pub location_city: Option<String>,
  #[serde(default)]
  pub location_state: Option<String>,
  pub name: String,
  #[serde(rename = "site_detail_url")]
  pub site_url: String,
  #[serde(default, rename = "deck")]
  pub summary: Option<String>,
}

impl BasicPublisher {
  pub fn alias_list(&self) -> Vec<String> {
    super::split_aliases(self.aliases.as_deref())
  }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Publisher {
  #[serde(flatten)]
  pub basic: BasicPublisher,
  #[serde(default, deserialize_with = "list_or_empty")]
  pub characters: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty")]
  pub story_arcs: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty")]
  pub teams: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty")]
  pub volumes: Vec<GenericEntry>,
}
