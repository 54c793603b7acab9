//! Beach records and their nested rating trees.
//!
//! Ratings are grouped by category, then by attribute. An attribute is either
//! a single raw number, a composite of named sub-ratings, or a descriptive
//! value that carries no score. The variant is decided when the document is
//! deserialised so scoring code dispatches on an explicit tag.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ContentItem;
use crate::content::deserialize_id;

/// A single rating attribute as stored in a beach document.
///
/// # Examples
/// ```
/// use capecod_core::AttributeValue;
///
/// let scalar: AttributeValue = serde_json::from_str("7.5").unwrap();
/// assert_eq!(scalar, AttributeValue::Scalar(7.5));
///
/// let nested: AttributeValue = serde_json::from_str(r#"{"height": 2, "note": "calm"}"#).unwrap();
/// let AttributeValue::Nested(subs) = &nested else { panic!("expected a composite") };
/// assert_eq!(subs["height"], AttributeValue::Scalar(2.0));
/// assert_eq!(subs["note"].as_scalar(), None);
/// assert_eq!(nested, AttributeValue::nested([("height", 2.0)]).with_sub("note", "calm"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A raw numeric rating.
    Scalar(f64),
    /// A composite attribute broken into named sub-ratings.
    ///
    /// Any JSON object decodes here. Sub-values that are not numbers are kept
    /// but do not contribute to scores.
    Nested(BTreeMap<String, AttributeValue>),
    /// Any other JSON value. Kept for display, ignored while scoring.
    Unscored(Value),
}

impl AttributeValue {
    /// Return the raw number when the attribute is a scalar.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(value) => Some(*value),
            Self::Nested(_) | Self::Unscored(_) => None,
        }
    }

    /// Build a composite attribute from numeric sub-ratings.
    pub fn nested<I, K>(subs: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self::Nested(
            subs.into_iter()
                .map(|(name, value)| (name.into(), Self::Scalar(value)))
                .collect(),
        )
    }

    /// Add a sub-rating to a composite attribute, returning `self`.
    ///
    /// Non-composite values are converted into an empty composite first.
    #[must_use]
    pub fn with_sub(self, name: impl Into<String>, raw: impl Into<Value>) -> Self {
        let mut subs = match self {
            Self::Nested(subs) => subs,
            Self::Scalar(_) | Self::Unscored(_) => BTreeMap::new(),
        };
        let value: Value = raw.into();
        let sub = match value.as_f64() {
            Some(number) => Self::Scalar(number),
            None => Self::Unscored(value),
        };
        subs.insert(name.into(), sub);
        Self::Nested(subs)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<BTreeMap<String, f64>> for AttributeValue {
    fn from(value: BTreeMap<String, f64>) -> Self {
        Self::nested(value)
    }
}

/// Attribute ratings for one category, keyed by attribute name.
pub type CategoryRatings = BTreeMap<String, AttributeValue>;

/// The full rating tree for a beach: category name → attribute ratings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ratings {
    categories: BTreeMap<String, CategoryRatings>,
}

impl Ratings {
    /// Construct an empty rating tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the ratings recorded for `category`, if any.
    pub fn category(&self, category: &str) -> Option<&CategoryRatings> {
        self.categories.get(category)
    }

    /// Return the raw attribute value at `category.attribute`, if present.
    pub fn value(&self, category: &str, attribute: &str) -> Option<&AttributeValue> {
        self.category(category)
            .and_then(|ratings| ratings.get(attribute))
    }

    /// Insert or replace a single attribute rating.
    pub fn insert(
        &mut self,
        category: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) {
        self.categories
            .entry(category.into())
            .or_default()
            .insert(attribute.into(), value.into());
    }

    /// Ensure a category exists, even without attributes.
    pub fn insert_category(&mut self, category: impl Into<String>) {
        self.categories.entry(category.into()).or_default();
    }

    /// Iterate over categories and their attribute ratings.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryRatings)> {
        self.categories
            .iter()
            .map(|(name, ratings)| (name.as_str(), ratings))
    }

    /// Report whether no categories are recorded.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// A beach listed in the content store.
///
/// Fields other than the identifier, name, description and ratings (images,
/// features, coordinates and so on) are preserved verbatim in `details`.
///
/// # Examples
/// ```
/// use capecod_core::Beach;
///
/// let beach = Beach::new("craigville", "Craigville Beach")
///     .with_rating("crowding_and_atmosphere", "family_friendliness", 85.0);
/// let value = beach.ratings.value("crowding_and_atmosphere", "family_friendliness");
/// assert_eq!(value.and_then(|v| v.as_scalar()), Some(85.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beach {
    /// Identifier used in lookups.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Raw category ratings.
    #[serde(default)]
    pub ratings: Ratings,
    /// Any other fields present in the source document.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Beach {
    /// Construct a beach without ratings or extra details.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            ratings: Ratings::new(),
            details: Map::new(),
        }
    }

    /// Add a rating while returning `self` for chaining.
    pub fn with_rating(
        mut self,
        category: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.ratings.insert(category, attribute, value);
        self
    }
}

impl From<Beach> for ContentItem {
    /// Flatten a beach into a listing, keeping its ratings as a detail field.
    fn from(beach: Beach) -> Self {
        let mut details = beach.details;
        if let Ok(ratings) = serde_json::to_value(&beach.ratings) {
            details.insert("ratings".to_owned(), ratings);
        }
        Self {
            id: beach.id,
            name: beach.name,
            description: beach.description,
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn decodes_mixed_attribute_kinds() {
        let json = r#"{
            "id": "nauset",
            "name": "Nauset Beach",
            "images": ["/images/nauset.jpg"],
            "ratings": {
                "environmental_factors": {
                    "water_quality": 9,
                    "wave_conditions": {"height": 3, "frequency": 7},
                    "sand_type": "coarse"
                }
            }
        }"#;
        let beach: Beach = serde_json::from_str(json).expect("decode beach");

        assert_eq!(beach.id, "nauset");
        assert!(beach.details.contains_key("images"));
        let category = beach
            .ratings
            .category("environmental_factors")
            .expect("category present");
        assert_eq!(
            category.get("water_quality"),
            Some(&AttributeValue::Scalar(9.0))
        );
        assert!(matches!(
            category.get("wave_conditions"),
            Some(AttributeValue::Nested(map)) if map.len() == 2
        ));
        assert!(matches!(
            category.get("sand_type"),
            Some(AttributeValue::Unscored(Value::String(_)))
        ));
    }

    #[rstest]
    fn numeric_ids_are_read_as_strings() {
        let beach: Beach = serde_json::from_str(r#"{"id": 12, "name": "Sea Street"}"#)
            .expect("decode beach");
        assert_eq!(beach.id, "12");
        assert!(beach.ratings.is_empty());
    }

    #[rstest]
    fn converts_to_listing_with_ratings() {
        let beach = Beach::new("sea-street", "Sea Street Beach").with_rating(
            "crowding_and_atmosphere",
            "family_friendliness",
            90.0,
        );
        let item = ContentItem::from(beach);
        assert_eq!(item.id, "sea-street");
        assert_eq!(
            item.details["ratings"]["crowding_and_atmosphere"]["family_friendliness"],
            90.0
        );
    }

    #[rstest]
    fn nested_values_are_not_scalars() {
        let value = AttributeValue::nested([("height", 1.0)]);
        assert_eq!(value.as_scalar(), None);
    }

    #[rstest]
    fn composites_with_non_numeric_members_stay_composite() {
        let value: AttributeValue =
            serde_json::from_str(r#"{"restaurants": 10, "snack_bar": true, "notes": null}"#)
                .expect("decode composite");
        let AttributeValue::Nested(subs) = value else {
            panic!("expected a composite, found {value:?}");
        };
        assert_eq!(subs.get("restaurants"), Some(&AttributeValue::Scalar(10.0)));
        assert_eq!(subs.get("snack_bar"), Some(&AttributeValue::Unscored(Value::Bool(true))));
        assert_eq!(subs.get("notes"), Some(&AttributeValue::Unscored(Value::Null)));
    }
}
