//! Typed response shapes and the generic decode contract.
//!
//! Every resource has two shapes: a basic one returned by list and search
//! endpoints, and a full one returned by get-by-id that layers nested
//! relation lists on top of the same fields (the full struct embeds the
//! basic struct with `#[serde(flatten)]`, so shared fields decode through
//! one declaration).
//!
//! The upstream payloads are inconsistently shaped; the helpers here absorb
//! the known quirks once so every field declaration stays declarative:
//! renamed keys, integers sent as strings, relation lists sent as `""`, and
//! dates nested inside objects with trailing timezone text.

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Error, Result};

pub mod character;
pub mod concept;
pub mod creator;
pub mod generic_entries;
pub mod issue;
pub mod item;
pub mod location;
pub mod origin;
pub mod power;
pub mod publisher;
pub mod story_arc;
pub mod team;
pub mod volume;

pub use character::{BasicCharacter, Character};
pub use concept::{BasicConcept, Concept};
pub use creator::{BasicCreator, Creator};
pub use generic_entries::{AssociatedImage, CountEntry, CreatorEntry, GenericEntry, Image, IssueEntry};
pub use issue::{BasicIssue, Issue};
pub use item::{BasicItem, Item};
pub use location::{BasicLocation, Location};
pub use origin::{BasicOrigin, Origin};
pub use power::{BasicPower, Power};
pub use publisher::{BasicPublisher, Publisher};
pub use story_arc::{BasicStoryArc, StoryArc};
pub use team::{BasicTeam, Team};
pub use volume::{BasicVolume, Volume};

/// Decode a raw payload into a typed shape. The only path by which
/// malformed upstream data becomes visible to callers: a missing or
/// mistyped required field surfaces as [`Error::Service`].
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
  serde_json::from_value(value).map_err(Error::validation)
}

/// Decode a list payload element by element.
pub(crate) fn decode_list<T: DeserializeOwned>(values: Vec<Value>) -> Result<Vec<T>> {
  values.into_iter().map(decode).collect()
}

/// `date_added` / `date_last_updated` timestamps: `2008-06-06 11:27:45`.
pub(crate) fn timestamp<'de, D: Deserializer<'de>>(
  deserializer: D,
) -> std::result::Result<NaiveDateTime, D::Error> {
  let s = String::deserialize(deserializer)?;
  NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S").map_err(de::Error::custom)
}

/// Integer fields the API sometimes sends as strings (`"start_year": "2005"`)
/// or as junk (`"start_year": "unknown"`). Unparsable values decode to
/// `None`, never an error.
pub(crate) fn optional_int<'de, D: Deserializer<'de>>(
  deserializer: D,
) -> std::result::Result<Option<i64>, D::Error> {
  let value = Value::deserialize(deserializer)?;
  Ok(match value {
    Value::Number(n) => n.as_i64(),
    Value::String(s) => s.trim().parse().ok(),
    _ => None,
  })
}

/// Relation-list fields the API returns as `""` or `null` when empty.
pub(crate) fn list_or_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
  D: Deserializer<'de>,
  T: DeserializeOwned,
{
  let value = Value::deserialize(deserializer)?;
  match value {
    Value::Null | Value::String(_) => Ok(Vec::new()),
    Value::Array(_) => serde_json::from_value(value).map_err(de::Error::custom),
    other => Err(de::Error::custom(format!(
      "expected a list, found {other}"
    ))),
  }
}

/// Date strings in either `2005-07-01 00:00:00` or `Jul 1, 2005` form.
pub(crate) fn loose_date<'de, D: Deserializer<'de>>(
  deserializer: D,
) -> std::result::Result<Option<NaiveDate>, D::Error> {
  let value = Value::deserialize(deserializer)?;
  let Some(s) = value.as_str() else {
    return Ok(None);
  };
  let s = s.trim();
  if s.is_empty() {
    return Ok(None);
  }
  let head = s.split_whitespace().next().unwrap_or(s);
  if let Ok(date) = NaiveDate::parse_from_str(head, "%Y-%m-%d") {
    return Ok(Some(date));
  }
  NaiveDate::parse_from_str(s, "%b %d, %Y")
    .map(Some)
    .map_err(de::Error::custom)
}

/// `aliases` arrives as one string with names separated by `~` or
/// newlines. Splits it into individual names, dropping empty segments.
pub(crate) fn split_aliases(raw: Option<&str>) -> Vec<String> {
  raw
    .map(|s| {
      s.split(['~', '\r', '\n'])
        .map(str::trim)
        .filter(|alias| !alias.is_empty())
        .map(str::to_string)
        .collect()
    })
    .unwrap_or_default()
}

/// "Date of death"-shaped fields arrive as a nested object whose `date`
/// value carries trailing timezone text; only the date portion is kept.
pub(crate) fn nested_date<'de, D: Deserializer<'de>>(
  deserializer: D,
) -> std::result::Result<Option<NaiveDate>, D::Error> {
  let value = Value::deserialize(deserializer)?;
  let s = match &value {
    Value::Object(map) => map.get("date").and_then(Value::as_str),
    Value::String(s) => Some(s.as_str()),
    _ => None,
  };
  let Some(s) = s else {
    return Ok(None);
  };
  let head = s.split_whitespace().next().unwrap_or(s);
  Ok(NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
}
