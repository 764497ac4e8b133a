//! Origin shapes. The smallest resource the API serves.

use serde::Deserialize;

use super::generic_entries::GenericEntry;
use super::list_or_empty;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BasicOrigin {
  #[serde(rename = "api_detail_url")]
  pub api_url: String,
  pub id: u64,
  pub name: String,
  #[serde(rename = "site_detail_url")]
  pub site_url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Origin {
  #[serde(flatten)]
  pub basic: BasicOrigin,
  #[serde(default)]
  pub character_set: Option<i64>,
  #[serde(default, deserialize_with = "list_or_empty")]
  pub characters: Vec<GenericEntry>,
  #[serde(default, deserialize_with = "list_or_empty")]
  pub profiles: Vec<i64>,
}
