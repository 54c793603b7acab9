//! Filter criteria over raw beach ratings.
//!
//! A criterion names a rating by its dotted `category.attribute` path and
//! constrains the raw value. Paths are parsed up front so a malformed path is
//! reported instead of silently excluding every beach.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bounds applied to a raw rating.
///
/// A bare number is a minimum threshold. An object may carry a minimum, a
/// maximum, both, or neither (which admits everything). Any other key in the
/// object is rejected.
///
/// # Examples
/// ```
/// use capecod_core::Constraint;
///
/// let threshold: Constraint = serde_json::from_str("50").unwrap();
/// assert_eq!(threshold, Constraint::Minimum(50.0));
///
/// let range: Constraint = serde_json::from_str(r#"{"max": 3}"#).unwrap();
/// assert_eq!(range, Constraint::Range { min: None, max: Some(3.0) });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum Constraint {
    /// The rating must be at least this value.
    Minimum(f64),
    /// The rating must fall within the supplied bounds, both inclusive.
    Range {
        /// Inclusive lower bound.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        /// Inclusive upper bound.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
}

impl Constraint {
    /// Return the `(min, max)` pair equivalent to this constraint.
    pub const fn bounds(&self) -> (Option<f64>, Option<f64>) {
        match *self {
            Self::Minimum(threshold) => (Some(threshold), None),
            Self::Range { min, max } => (min, max),
        }
    }
}

/// Errors raised while parsing criterion paths.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriterionError {
    /// The path had no `.` separating category from attribute.
    #[error("criterion '{criterion}' must have the form category.attribute")]
    MissingSeparator {
        /// The rejected path.
        criterion: String,
    },
    /// The category or attribute segment was empty.
    #[error("criterion '{criterion}' has an empty segment")]
    EmptySegment {
        /// The rejected path.
        criterion: String,
    },
    /// The path addressed a sub-attribute, which filtering does not support.
    #[error("criterion '{criterion}' addresses a sub-attribute; only category.attribute paths can be filtered")]
    NestedPathUnsupported {
        /// The rejected path.
        criterion: String,
    },
}

/// A parsed `category.attribute` path.
///
/// # Examples
/// ```
/// use capecod_core::CriterionPath;
///
/// let path: CriterionPath = "crowding_and_atmosphere.family_friendliness".parse().unwrap();
/// assert_eq!(path.category(), "crowding_and_atmosphere");
/// assert_eq!(path.attribute(), "family_friendliness");
/// assert!("wave_conditions".parse::<CriterionPath>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CriterionPath {
    category: String,
    attribute: String,
}

impl CriterionPath {
    /// Parse a dotted path.
    ///
    /// # Errors
    /// Returns a [`CriterionError`] for paths without exactly two non-empty
    /// segments.
    pub fn parse(criterion: &str) -> Result<Self, CriterionError> {
        let segments: Vec<&str> = criterion.split('.').collect();
        let [category, attribute] = segments.as_slice() else {
            return Err(if segments.len() < 2 {
                CriterionError::MissingSeparator {
                    criterion: criterion.to_owned(),
                }
            } else {
                CriterionError::NestedPathUnsupported {
                    criterion: criterion.to_owned(),
                }
            });
        };
        if category.is_empty() || attribute.is_empty() {
            return Err(CriterionError::EmptySegment {
                criterion: criterion.to_owned(),
            });
        }
        Ok(Self {
            category: (*category).to_owned(),
            attribute: (*attribute).to_owned(),
        })
    }

    /// Category segment.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Attribute segment.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }
}

impl FromStr for CriterionPath {
    type Err = CriterionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CriterionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.category, self.attribute)
    }
}

/// A single filter rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    /// Rating addressed by the rule.
    pub path: CriterionPath,
    /// Bounds the raw rating must satisfy.
    pub constraint: Constraint,
}

impl Criterion {
    /// Parse `criterion` and pair it with `constraint`.
    ///
    /// # Errors
    /// Propagates [`CriterionPath::parse`] failures.
    pub fn new(criterion: &str, constraint: Constraint) -> Result<Self, CriterionError> {
        Ok(Self {
            path: CriterionPath::parse(criterion)?,
            constraint,
        })
    }
}

/// A set of criteria combined with logical AND.
///
/// Deserialises from the same object shape used by the web client, e.g.
/// `{"crowding_and_atmosphere.family_friendliness": {"min": 80}}`.
///
/// # Examples
/// ```
/// use capecod_core::Criteria;
///
/// let criteria: Criteria = serde_json::from_str(
///     r#"{"crowding_and_atmosphere.family_friendliness": {"min": 80}}"#,
/// ).unwrap();
/// assert_eq!(criteria.len(), 1);
///
/// let bad = serde_json::from_str::<Criteria>(r#"{"family_friendliness": 80}"#);
/// assert!(bad.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Constraint>",
    into = "BTreeMap<String, Constraint>"
)]
pub struct Criteria {
    rules: Vec<Criterion>,
}

impl Criteria {
    /// An empty set that admits every beach.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a collection of `(path, constraint)` pairs.
    ///
    /// # Errors
    /// Returns the first [`CriterionError`] encountered.
    pub fn parse<I, S>(pairs: I) -> Result<Self, CriterionError>
    where
        I: IntoIterator<Item = (S, Constraint)>,
        S: AsRef<str>,
    {
        pairs
            .into_iter()
            .map(|(path, constraint)| Criterion::new(path.as_ref(), constraint))
            .collect::<Result<Vec<_>, _>>()
            .map(|rules| Self { rules })
    }

    /// Append a rule while returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, criterion: Criterion) -> Self {
        self.rules.push(criterion);
        self
    }

    /// Iterate over the rules.
    pub fn iter(&self) -> std::slice::Iter<'_, Criterion> {
        self.rules.iter()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Report whether there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a Criteria {
    type Item = &'a Criterion;
    type IntoIter = std::slice::Iter<'a, Criterion>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<BTreeMap<String, Constraint>> for Criteria {
    type Error = CriterionError;

    fn try_from(map: BTreeMap<String, Constraint>) -> Result<Self, Self::Error> {
        Self::parse(map)
    }
}

impl From<Criteria> for BTreeMap<String, Constraint> {
    fn from(criteria: Criteria) -> Self {
        criteria
            .rules
            .into_iter()
            .map(|rule| (rule.path.to_string(), rule.constraint))
            .collect()
    }
}
