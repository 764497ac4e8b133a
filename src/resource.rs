//! Resource categories and their endpoint/id conventions.

/// One kind of Comicvine entity, with its own endpoint family and id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
  Issue,
  Character,
  Publisher,
  Concept,
  Location,
  Origin,
  Power,
  Creator,
  StoryArc,
  Volume,
  Item,
  Team,
}

/// Static per-category data: Comicvine encodes the category into the id
/// (`4005-40431` is character 40431) and names endpoints inconsistently
/// (creators live under `person`/`people`, items under `object`/`objects`).
pub(crate) struct ResourceInfo {
  pub id_prefix: u32,
  pub singular: &'static str,
  pub plural: &'static str,
  pub search_filter: &'static str,
}

impl Resource {
  pub(crate) const fn info(self) -> ResourceInfo {
    match self {
      Resource::Issue => ResourceInfo {
        id_prefix: 4000,
        singular: "issue",
        plural: "issues",
        search_filter: "issue",
      },
      Resource::Character => ResourceInfo {
        id_prefix: 4005,
        singular: "character",
        plural: "characters",
        search_filter: "character",
      },
      Resource::Publisher => ResourceInfo {
        id_prefix: 4010,
        singular: "publisher",
        plural: "publishers",
        search_filter: "publisher",
      },
      Resource::Concept => ResourceInfo {
        id_prefix: 4015,
        singular: "concept",
        plural: "concepts",
        search_filter: "concept",
      },
      Resource::Location => ResourceInfo {
        id_prefix: 4020,
        singular: "location",
        plural: "locations",
        search_filter: "location",
      },
      Resource::Origin => ResourceInfo {
        id_prefix: 4030,
        singular: "origin",
        plural: "origins",
        search_filter: "origin",
      },
      Resource::Power => ResourceInfo {
        id_prefix: 4035,
        singular: "power",
        plural: "powers",
        search_filter: "power",
      },
      Resource::Creator => ResourceInfo {
        id_prefix: 4040,
        singular: "person",
        plural: "people",
        search_filter: "person",
      },
      Resource::StoryArc => ResourceInfo {
        id_prefix: 4045,
        singular: "story_arc",
        plural: "story_arcs",
        search_filter: "story_arc",
      },
      Resource::Volume => ResourceInfo {
        id_prefix: 4050,
        singular: "volume",
        plural: "volumes",
        search_filter: "volume",
      },
      Resource::Item => ResourceInfo {
        id_prefix: 4055,
        singular: "object",
        plural: "objects",
        search_filter: "object",
      },
      Resource::Team => ResourceInfo {
        id_prefix: 4060,
        singular: "team",
        plural: "teams",
        search_filter: "team",
      },
    }
  }

  /// Canonical id string used by get-by-id endpoints, e.g. `4005-40431`.
  pub fn canonical_id(self, id: u64) -> String {
    format!("{}-{}", self.info().id_prefix, id)
  }
}
