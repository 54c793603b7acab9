//! Predicate filtering over raw beach ratings.
#![forbid(unsafe_code)]

use capecod_core::{AttributeValue, Beach, Criteria, Criterion};
use log::debug;

/// Report whether `beach` satisfies `criterion`.
///
/// The raw (not normalised) value at `category.attribute` is compared with
/// the constraint's bounds, both inclusive. A beach without a numeric value
/// at the path fails. A constraint with no bounds passes any numeric value.
///
/// # Examples
/// ```
/// use capecod_core::{Beach, Constraint, Criterion};
/// use capecod_scorer::meets_criterion;
///
/// let beach = Beach::new("1", "Sea Gull Beach")
///     .with_rating("crowding_and_atmosphere", "family_friendliness", 82.0);
/// let family = Criterion::new(
///     "crowding_and_atmosphere.family_friendliness",
///     Constraint::Minimum(80.0),
/// ).unwrap();
/// assert!(meets_criterion(&beach, &family));
/// ```
#[must_use]
pub fn meets_criterion(beach: &Beach, criterion: &Criterion) -> bool {
    let path = &criterion.path;
    let Some(rating) = beach
        .ratings
        .value(path.category(), path.attribute())
        .and_then(AttributeValue::as_scalar)
    else {
        debug!("beach '{}' has no numeric rating at {path}", beach.id);
        return false;
    };
    let (min, max) = criterion.constraint.bounds();
    let passes =
        min.is_none_or(|floor| rating >= floor) && max.is_none_or(|ceiling| rating <= ceiling);
    if !passes {
        debug!("beach '{}' fails {path}: {rating} outside {min:?}..={max:?}", beach.id);
    }
    passes
}

/// Return the beaches satisfying every criterion, in input order.
///
/// The result borrows from `beaches`; nothing is cloned or modified. Empty
/// criteria retain every beach.
#[must_use]
pub fn filter_beaches<'a>(beaches: &'a [Beach], criteria: &Criteria) -> Vec<&'a Beach> {
    beaches
        .iter()
        .filter(|beach| criteria.iter().all(|criterion| meets_criterion(beach, criterion)))
        .collect()
}
