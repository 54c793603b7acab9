//! Reference data describing the valid range of every scorable attribute.
//!
//! The schema is keyed by attribute name. Composite attributes such as
//! `wave_conditions` map to a group of sub-attribute ranges.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::Value;
use thiserror::Error;

use crate::{AttributeValue, Beach, Category};

/// The numeric domain of a single attribute.
///
/// When both bounds are present raw values are rescaled onto `0..=100`.
/// Otherwise the attribute is assumed to be normalised already.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RangeSpec {
    /// Lowest raw value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Highest raw value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl RangeSpec {
    /// Build a bounded range.
    pub const fn bounded(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Build a range for values that are already on the `0..=100` scale.
    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    /// Return `(min, max)` when both bounds are defined.
    pub const fn bounds(&self) -> Option<(f64, f64)> {
        match (self.min, self.max) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        }
    }
}

/// A schema entry: either a plain range or a group of named sub-ranges.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SchemaEntry {
    /// Range for a scalar attribute.
    Range(RangeSpec),
    /// Ranges for the sub-attributes of a composite attribute.
    Group(BTreeMap<String, RangeSpec>),
}

impl<'de> Deserialize<'de> for SchemaEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Groups are objects whose members are all objects; anything else is a
        // range, with enumerated or descriptive entries treated as unbounded.
        let raw = Value::deserialize(deserializer)?;
        let Value::Object(object) = raw else {
            return Ok(Self::Range(RangeSpec::unbounded()));
        };
        let is_group = !object.is_empty() && object.values().all(Value::is_object);
        if is_group {
            serde_json::from_value(Value::Object(object))
                .map(Self::Group)
                .map_err(D::Error::custom)
        } else {
            serde_json::from_value(Value::Object(object))
                .map(Self::Range)
                .map_err(D::Error::custom)
        }
    }
}

/// Errors raised when a rating cannot be matched to the schema.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// The attribute has no schema entry.
    #[error("attribute '{attribute}' has no schema entry")]
    MissingAttribute {
        /// Attribute looked up.
        attribute: String,
    },
    /// The composite attribute has no entry for the sub-attribute.
    #[error("attribute '{attribute}' has no schema entry for '{sub_attribute}'")]
    MissingSubAttribute {
        /// Composite attribute looked up.
        attribute: String,
        /// Sub-attribute looked up.
        sub_attribute: String,
    },
    /// A scalar rating was matched against a group entry.
    #[error("attribute '{attribute}' is a composite in the schema but a number in the ratings")]
    ExpectedRange {
        /// Attribute looked up.
        attribute: String,
    },
    /// A composite rating was matched against a plain range entry.
    #[error("attribute '{attribute}' is a number in the schema but a composite in the ratings")]
    ExpectedGroup {
        /// Attribute looked up.
        attribute: String,
    },
}

/// Mapping from attribute name to its valid range.
///
/// # Examples
/// ```
/// use capecod_core::{RangeSpec, RatingSchema};
///
/// let schema = RatingSchema::new()
///     .with_range("water_quality", RangeSpec::bounded(1.0, 10.0))
///     .with_group("wave_conditions", [("height", RangeSpec::bounded(0.0, 5.0))]);
///
/// assert_eq!(
///     schema.range("water_quality").unwrap().bounds(),
///     Some((1.0, 10.0))
/// );
/// assert!(schema.nested_range("wave_conditions", "height").is_ok());
/// assert!(schema.range("parking").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingSchema {
    entries: BTreeMap<String, SchemaEntry>,
}

impl RatingSchema {
    /// Construct an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scalar range while returning `self` for chaining.
    #[must_use]
    pub fn with_range(mut self, attribute: impl Into<String>, range: RangeSpec) -> Self {
        self.entries
            .insert(attribute.into(), SchemaEntry::Range(range));
        self
    }

    /// Add a composite attribute while returning `self` for chaining.
    #[must_use]
    pub fn with_group<I, K>(mut self, attribute: impl Into<String>, ranges: I) -> Self
    where
        I: IntoIterator<Item = (K, RangeSpec)>,
        K: Into<String>,
    {
        let group = ranges
            .into_iter()
            .map(|(name, range)| (name.into(), range))
            .collect();
        self.entries
            .insert(attribute.into(), SchemaEntry::Group(group));
        self
    }

    /// Return the raw entry for `attribute`.
    pub fn entry(&self, attribute: &str) -> Option<&SchemaEntry> {
        self.entries.get(attribute)
    }

    /// Look up the range for a scalar attribute.
    ///
    /// # Errors
    /// Returns [`SchemaError::MissingAttribute`] when no entry exists and
    /// [`SchemaError::ExpectedRange`] when the entry is a group.
    pub fn range(&self, attribute: &str) -> Result<&RangeSpec, SchemaError> {
        match self.entry(attribute) {
            Some(SchemaEntry::Range(range)) => Ok(range),
            Some(SchemaEntry::Group(_)) => Err(SchemaError::ExpectedRange {
                attribute: attribute.to_owned(),
            }),
            None => Err(SchemaError::MissingAttribute {
                attribute: attribute.to_owned(),
            }),
        }
    }

    /// Look up the range for `attribute.sub_attribute`.
    ///
    /// # Errors
    /// Returns [`SchemaError::MissingAttribute`],
    /// [`SchemaError::ExpectedGroup`] or [`SchemaError::MissingSubAttribute`]
    /// when the path does not resolve to a range.
    pub fn nested_range(
        &self,
        attribute: &str,
        sub_attribute: &str,
    ) -> Result<&RangeSpec, SchemaError> {
        match self.entry(attribute) {
            Some(SchemaEntry::Group(group)) => {
                group
                    .get(sub_attribute)
                    .ok_or_else(|| SchemaError::MissingSubAttribute {
                        attribute: attribute.to_owned(),
                        sub_attribute: sub_attribute.to_owned(),
                    })
            }
            Some(SchemaEntry::Range(_)) => Err(SchemaError::ExpectedGroup {
                attribute: attribute.to_owned(),
            }),
            None => Err(SchemaError::MissingAttribute {
                attribute: attribute.to_owned(),
            }),
        }
    }

    /// Check that every scored attribute of `beach` resolves in the schema.
    ///
    /// Only the seven rating categories are checked, since other categories
    /// never contribute to a score. Callers should run this when content is
    /// loaded so scoring never meets an unknown attribute.
    ///
    /// # Errors
    /// Returns the first [`SchemaError`] encountered.
    pub fn validate_beach(&self, beach: &Beach) -> Result<(), SchemaError> {
        let scored = beach
            .ratings
            .iter()
            .filter(|(category, _)| category.parse::<Category>().is_ok());
        for (_, ratings) in scored {
            for (attribute, value) in ratings {
                match value {
                    AttributeValue::Scalar(_) => {
                        self.range(attribute)?;
                    }
                    AttributeValue::Nested(subs) => {
                        for (sub_attribute, _) in
                            subs.iter().filter(|(_, sub)| sub.as_scalar().is_some())
                        {
                            self.nested_range(attribute, sub_attribute)?;
                        }
                    }
                    AttributeValue::Unscored(_) => {}
                }
            }
        }
        Ok(())
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report whether the schema has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
