//! Per-category aggregation of normalised attribute scores.
#![forbid(unsafe_code)]

use capecod_core::{AttributeValue, CategoryRatings, RangeSpec, RatingSchema, SchemaError};
use log::warn;

use crate::normalize;

/// Average the normalised scores of every scored attribute in a category.
///
/// Scalar attributes are normalised against the schema entry for the
/// attribute. Each sub-rating of a composite attribute is normalised against
/// its own sub-range and counted as a separate value, so composite attributes
/// weigh in proportion to their number of sub-ratings. Unscored attributes are
/// skipped, as are non-numeric members of a composite (with a warning). A
/// category with nothing to score yields `0.0`.
///
/// # Errors
/// Returns [`SchemaError`] when an attribute or sub-attribute has no matching
/// schema entry.
///
/// # Examples
/// ```
/// use capecod_core::{AttributeValue, CategoryRatings, RangeSpec, RatingSchema};
/// use capecod_scorer::aggregate_category;
///
/// let schema = RatingSchema::new()
///     .with_range("water_quality", RangeSpec::bounded(0.0, 10.0))
///     .with_range("cleanliness", RangeSpec::unbounded());
/// let ratings = CategoryRatings::from([
///     ("water_quality".to_owned(), AttributeValue::Scalar(5.0)),
///     ("cleanliness".to_owned(), AttributeValue::Scalar(70.0)),
/// ]);
/// assert_eq!(aggregate_category(&ratings, &schema), Ok(60.0));
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "category scores are arithmetic means of normalised values"
)]
pub fn aggregate_category(
    ratings: &CategoryRatings,
    schema: &RatingSchema,
) -> Result<f64, SchemaError> {
    let mut total = 0.0_f64;
    let mut count = 0_u32;
    for (attribute, value) in ratings {
        match value {
            AttributeValue::Scalar(raw) => {
                let range = schema.range(attribute)?;
                total += score(attribute, *raw, range);
                count += 1;
            }
            AttributeValue::Nested(subs) => {
                for (sub_attribute, sub) in subs {
                    let Some(raw) = sub.as_scalar() else {
                        warn!("sub-rating '{attribute}.{sub_attribute}' is not numeric; skipped");
                        continue;
                    };
                    let range = schema.nested_range(attribute, sub_attribute)?;
                    total += score(attribute, raw, range);
                    count += 1;
                }
            }
            AttributeValue::Unscored(_) => {}
        }
    }
    if count == 0 {
        return Ok(0.0);
    }
    Ok(total / f64::from(count))
}

fn score(attribute: &str, raw: f64, range: &RangeSpec) -> f64 {
    if normalize::is_degenerate(range) {
        warn!("schema range {range:?} for '{attribute}' has no width; using {raw} unscaled");
    }
    if !normalize::within_range(raw, range) {
        warn!("rating {raw} for '{attribute}' lies outside its schema range {range:?}");
    }
    normalize::normalize(raw, range)
}
