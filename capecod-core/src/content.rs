//! Read-only access to the guide's browsable content.
//!
//! The [`ContentRepository`] trait exposes lookups by id, listings and a
//! case-insensitive text search over towns, beaches, attractions and
//! food-and-drink venues.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{Beach, TownBundle};

/// The kinds of content the guide lists.
///
/// # Examples
/// ```
/// use capecod_core::ContentKind;
///
/// assert_eq!(ContentKind::FoodAndDrink.as_str(), "food-and-drink");
/// assert_eq!("beaches".parse::<ContentKind>(), Ok(ContentKind::Beaches));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    /// Towns on the Cape.
    Towns,
    /// Beaches with rating trees.
    Beaches,
    /// Things to do.
    Attractions,
    /// Restaurants, bars and cafés.
    FoodAndDrink,
}

impl ContentKind {
    /// Every kind, in search order.
    pub const ALL: [Self; 4] = [
        Self::Towns,
        Self::Beaches,
        Self::Attractions,
        Self::FoodAndDrink,
    ];

    /// Return the kebab-case name used in routes and file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Towns => "towns",
            Self::Beaches => "beaches",
            Self::Attractions => "attractions",
            Self::FoodAndDrink => "food-and-drink",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == key)
            .ok_or_else(|| format!("unknown content kind '{s}'"))
    }
}

/// One listed record.
///
/// The identifier, name and description are typed; every other field is
/// preserved so callers can render the record as it was authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Identifier used in lookups. Numeric ids are read as their decimal text.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Remaining fields from the source document.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl ContentItem {
    /// Construct an item without extra details.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            details: Map::new(),
        }
    }

    /// Report whether the name or description contains `needle`.
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// A search result tagged with the kind it was found in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// The matching record.
    #[serde(flatten)]
    pub item: ContentItem,
    /// Where the record was found.
    pub category: ContentKind,
}

impl SearchHit {
    /// Tag `item` with `category`.
    ///
    /// A `category` field already present in the item's details is dropped so
    /// the serialised hit carries a single, authoritative category.
    pub fn new(mut item: ContentItem, category: ContentKind) -> Self {
        item.details.remove("category");
        Self { item, category }
    }
}

/// Errors from [`ContentRepository`] implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    /// The backing source could not be read.
    #[error("failed to read {source_name}: {message}")]
    Unavailable {
        /// File, table or endpoint that failed.
        source_name: String,
        /// Description of the failure.
        message: String,
    },
    /// The backing source was read but could not be decoded.
    #[error("failed to decode {source_name}: {message}")]
    Malformed {
        /// File, table or endpoint that failed.
        source_name: String,
        /// Description of the decoding failure.
        message: String,
    },
}

/// Read-only access to guide content.
///
/// Implementations must be thread-safe (`Send` + `Sync`) so lookups can be
/// shared across request handlers. Content is immutable for the lifetime of a
/// call; implementations may reload from their backing store on every call.
pub trait ContentRepository: Send + Sync {
    /// Return every record of `kind` in source order.
    ///
    /// # Errors
    /// Returns [`ContentError`] when the source cannot be read or decoded.
    fn list(&self, kind: ContentKind) -> Result<Vec<ContentItem>, ContentError>;

    /// Return the record of `kind` with identifier `id`, if any.
    ///
    /// # Errors
    /// Returns [`ContentError`] when the source cannot be read or decoded.
    fn get(&self, kind: ContentKind, id: &str) -> Result<Option<ContentItem>, ContentError> {
        Ok(self.list(kind)?.into_iter().find(|item| item.id == id))
    }

    /// Search names and descriptions case-insensitively.
    ///
    /// Searches every kind in [`ContentKind::ALL`] order, or only `kind` when
    /// supplied. An empty query matches everything.
    ///
    /// # Errors
    /// Returns [`ContentError`] when a searched source cannot be read.
    fn search(
        &self,
        query: &str,
        kind: Option<ContentKind>,
    ) -> Result<Vec<SearchHit>, ContentError> {
        let needle = query.to_lowercase();
        let mut hits = Vec::new();
        for category in ContentKind::ALL {
            if kind.is_some_and(|wanted| wanted != category) {
                continue;
            }
            hits.extend(
                self.list(category)?
                    .into_iter()
                    .filter(|item| item.matches(&needle))
                    .map(|item| SearchHit::new(item, category)),
            );
        }
        Ok(hits)
    }

    /// Return every beach with its rating tree.
    ///
    /// # Errors
    /// Returns [`ContentError`] when the beach source cannot be read.
    fn beaches(&self) -> Result<Vec<Beach>, ContentError>;

    /// Return the merged per-town documents for `town`.
    ///
    /// # Errors
    /// Returns [`ContentError`] when any of the town's documents is missing or
    /// malformed.
    fn town_bundle(&self, town: &str) -> Result<TownBundle, ContentError>;

    /// Return the bundle for `town`, lowercasing the name and falling back to
    /// an empty bundle when it cannot be loaded.
    ///
    /// Implementations backed by separate documents may substitute defaults
    /// per document instead.
    fn town_bundle_or_default(&self, town: &str) -> TownBundle {
        self.town_bundle(&town.to_lowercase()).unwrap_or_default()
    }
}

/// Accept string or integer identifiers, storing both as text.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(D::Error::custom(format!(
            "identifier must be a string or number, found {other}"
        ))),
    }
}
