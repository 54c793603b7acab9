//! Weighted overall ratings across the seven categories.
#![forbid(unsafe_code)]

use std::cmp::Ordering;

use capecod_core::{Beach, CategoryWeights, RatingSchema};
use log::debug;
use serde::Serialize;

use crate::{RatingError, aggregate_category};

/// Computes overall ratings from a schema and a set of category weights.
///
/// # Examples
/// ```
/// use capecod_core::{Beach, CategoryWeights, RangeSpec, RatingSchema};
/// use capecod_scorer::RatingCalculator;
///
/// let schema = RatingSchema::new().with_range("water_quality", RangeSpec::bounded(0.0, 10.0));
/// let calculator = RatingCalculator::new(schema, CategoryWeights::default());
/// let beach = Beach::new("1", "Mayflower Beach")
///     .with_rating("environmental_factors", "water_quality", 8.0);
///
/// // 80 in environmental_factors, weighted at 0.25.
/// assert_eq!(calculator.calculate_overall_rating(&beach), Ok(20.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RatingCalculator {
    schema: RatingSchema,
    weights: CategoryWeights,
}

/// A beach paired with its overall rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatedBeach {
    /// Beach identifier.
    pub id: String,
    /// Beach display name.
    pub name: String,
    /// Weighted rating rounded to two decimals.
    pub overall_rating: f64,
}

impl RatingCalculator {
    /// Build a calculator. Validate `weights` beforehand when they come from
    /// user input.
    #[must_use]
    pub const fn new(schema: RatingSchema, weights: CategoryWeights) -> Self {
        Self { schema, weights }
    }

    /// Schema used for normalisation.
    #[must_use]
    pub const fn schema(&self) -> &RatingSchema {
        &self.schema
    }

    /// Category weights applied to aggregated scores.
    #[must_use]
    pub const fn weights(&self) -> &CategoryWeights {
        &self.weights
    }

    /// Compute the weighted overall rating for `beach`.
    ///
    /// Each of the seven categories is aggregated, multiplied by its weight
    /// and summed. A category missing from the beach contributes zero while
    /// its weight still counts. Categories outside the fixed seven are
    /// ignored. The sum is rounded half-up to two decimals.
    ///
    /// # Errors
    /// Returns [`RatingError::Schema`] when a rating has no schema entry.
    #[expect(
        clippy::float_arithmetic,
        reason = "overall ratings are weighted sums of category scores"
    )]
    pub fn calculate_overall_rating(&self, beach: &Beach) -> Result<f64, RatingError> {
        let mut total = 0.0_f64;
        for (category, weight) in self.weights.iter() {
            let score = match beach.ratings.category(category.as_str()) {
                Some(ratings) => aggregate_category(ratings, &self.schema).map_err(|source| {
                    RatingError::Schema {
                        beach_id: beach.id.clone(),
                        category,
                        source,
                    }
                })?,
                None => {
                    debug!("beach '{}' has no {category} ratings", beach.id);
                    0.0
                }
            };
            total += score * weight;
        }
        Ok(round_to_hundredths(total))
    }

    /// Rate every beach, preserving input order.
    ///
    /// # Errors
    /// Returns the first [`RatingError`] encountered.
    pub fn rate_all(&self, beaches: &[Beach]) -> Result<Vec<RatedBeach>, RatingError> {
        beaches
            .iter()
            .map(|beach| {
                Ok(RatedBeach {
                    id: beach.id.clone(),
                    name: beach.name.clone(),
                    overall_rating: self.calculate_overall_rating(beach)?,
                })
            })
            .collect()
    }
}

/// Order rated beaches from highest to lowest rating.
///
/// The sort is stable, so ties keep their input order.
pub fn sort_by_rating(rated: &mut [RatedBeach]) {
    rated.sort_by(|left, right| {
        right
            .overall_rating
            .partial_cmp(&left.overall_rating)
            .unwrap_or(Ordering::Equal)
    });
}

/// Round half-up to two decimal places.
///
/// Ties round towards positive infinity, so `-0.125` becomes `-0.12`.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "rounding scales by 100 around a floor"
)]
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}
