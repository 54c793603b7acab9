//! Per-category weights used to combine category scores.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Category;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Relative importance of each rating category.
///
/// The default set mirrors the published rating methodology. Alternative sets
/// may be supplied for experimentation; [`CategoryWeights::validate`] checks
/// they remain a convex combination.
///
/// # Examples
/// ```
/// use capecod_core::{Category, CategoryWeights};
///
/// let weights = CategoryWeights::default();
/// assert_eq!(weights.weight(Category::EnvironmentalFactors), 0.25);
/// assert!(weights.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryWeights {
    /// Weight for [`Category::EnvironmentalFactors`].
    pub environmental_factors: f64,
    /// Weight for [`Category::FacilitiesAndServices`].
    pub facilities_and_services: f64,
    /// Weight for [`Category::AccessibilityAndSafety`].
    pub accessibility_and_safety: f64,
    /// Weight for [`Category::RecreationalOpportunities`].
    pub recreational_opportunities: f64,
    /// Weight for [`Category::NaturalBeautyAndWildlife`].
    pub natural_beauty_and_wildlife: f64,
    /// Weight for [`Category::CrowdingAndAtmosphere`].
    pub crowding_and_atmosphere: f64,
    /// Weight for [`Category::EnvironmentalProtection`].
    pub environmental_protection: f64,
}

/// Errors returned by [`CategoryWeights::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CategoryWeightsError {
    /// A weight was negative, above one, or not finite.
    #[error("weight for {category} must be within 0.0..=1.0, got {weight}")]
    OutOfRange {
        /// Offending category.
        category: Category,
        /// Supplied weight.
        weight: f64,
    },
    /// The weights do not add up to one.
    #[error("category weights must sum to 1.0, got {sum}")]
    BadSum {
        /// Actual sum.
        sum: f64,
    },
}

impl CategoryWeights {
    /// Return the weight for `category`.
    pub const fn weight(&self, category: Category) -> f64 {
        match category {
            Category::EnvironmentalFactors => self.environmental_factors,
            Category::FacilitiesAndServices => self.facilities_and_services,
            Category::AccessibilityAndSafety => self.accessibility_and_safety,
            Category::RecreationalOpportunities => self.recreational_opportunities,
            Category::NaturalBeautyAndWildlife => self.natural_beauty_and_wildlife,
            Category::CrowdingAndAtmosphere => self.crowding_and_atmosphere,
            Category::EnvironmentalProtection => self.environmental_protection,
        }
    }

    /// Iterate over `(category, weight)` pairs in category order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL
            .into_iter()
            .map(|category| (category, self.weight(category)))
    }

    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`CategoryWeightsError::OutOfRange`] for a weight outside
    /// `0.0..=1.0` and [`CategoryWeightsError::BadSum`] when the total differs
    /// from one.
    pub fn validate(self) -> Result<Self, CategoryWeightsError> {
        if let Some((category, weight)) = self
            .iter()
            .find(|(_, weight)| !(0.0..=1.0).contains(weight))
        {
            return Err(CategoryWeightsError::OutOfRange { category, weight });
        }
        let sum: f64 = self.iter().map(|(_, weight)| weight).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(CategoryWeightsError::BadSum { sum });
        }
        Ok(self)
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            environmental_factors: 0.25,
            facilities_and_services: 0.20,
            accessibility_and_safety: 0.15,
            recreational_opportunities: 0.15,
            natural_beauty_and_wildlife: 0.10,
            crowding_and_atmosphere: 0.10,
            environmental_protection: 0.05,
        }
    }
}
