//! Power shapes. Powers carry no image, unlike every other resource.

use chrono::NaiveDateTime;
use serde::Deserialize;

use super::generic_entries::GenericEntry;
use super::{list_or_empty, timestamp};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BasicPower {
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
  pub name: String,
  #[serde(rename = "site_detail_url")]
  pub site_url: String,
}

impl BasicPower {
  pub fn alias_list(&self) -> Vec<String> {
    super::split_aliases(self.aliases.as_deref())
  }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Power {
  #[serde(flatten)]
  pub basic: BasicPower,
  #[serde(default, deserialize_with = "list_or_empty")]
  pub characters: Vec<GenericEntry>,
}
