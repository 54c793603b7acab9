//! Property-based tests for the rating engine.
//!
//! # Invariants tested
//!
//! - **Normalisation endpoints:** `min` maps to 0 and `max` to 100.
//! - **Linearity:** the midpoint of a range maps to 50.
//! - **Order independence:** the overall rating of a decoded beach does not
//!   depend on the order its attributes and sub-ratings appear in the
//!   document.
//! - **Filter soundness:** filtering returns a subsequence of the input whose
//!   members all meet every criterion.
//! - **Threshold equivalence:** a scalar threshold behaves like `{min}`.
#![expect(
    clippy::float_arithmetic,
    reason = "properties are stated over floating-point scores"
)]

use capecod_core::{
    Beach, Category, CategoryWeights, Constraint, Criteria, RangeSpec, RatingSchema,
};
use capecod_scorer::{RatingCalculator, filter_beaches, meets_criterion, normalize};
use proptest::prelude::*;

const PATH: &str = "crowding_and_atmosphere.family_friendliness";

/// One scalar attribute and one two-part composite filed under a category.
type RatedEntry = (Category, f64, f64, f64);

fn rated_entries() -> impl Strategy<Value = (Vec<RatedEntry>, Vec<usize>)> {
    prop::collection::vec(
        (
            prop::sample::select(Category::ALL.to_vec()),
            0.0_f64..10.0,
            0.0_f64..10.0,
            0.0_f64..10.0,
        ),
        1..10,
    )
    .prop_flat_map(|entries| {
        let order: Vec<usize> = (0..entries.len()).collect();
        (Just(entries), Just(order).prop_shuffle())
    })
}

fn entry_schema(entries: &[RatedEntry]) -> RatingSchema {
    (0..entries.len()).fold(RatingSchema::new(), |schema, index| {
        schema
            .with_range(format!("score_{index}"), RangeSpec::bounded(0.0, 10.0))
            .with_group(
                format!("conditions_{index}"),
                [
                    ("first", RangeSpec::bounded(0.0, 10.0)),
                    ("second", RangeSpec::bounded(0.0, 10.0)),
                ],
            )
    })
}

/// Render a beach document listing `entries` in `order`.
///
/// With `reverse_fields` the composite is written before the scalar and its
/// sub-ratings are written in reverse order.
fn beach_document(entries: &[RatedEntry], order: &[usize], reverse_fields: bool) -> String {
    let mut categories: Vec<(Category, Vec<String>)> = Vec::new();
    for &index in order {
        let Some(&(category, score, first, second)) = entries.get(index) else {
            continue;
        };
        let subs = if reverse_fields {
            format!(r#""second": {second}, "first": {first}"#)
        } else {
            format!(r#""first": {first}, "second": {second}"#)
        };
        let scalar = format!(r#""score_{index}": {score}"#);
        let composite = format!(r#""conditions_{index}": {{{subs}}}"#);
        let fields = if reverse_fields {
            [composite, scalar]
        } else {
            [scalar, composite]
        };
        match categories.iter_mut().find(|(known, _)| *known == category) {
            Some((_, attributes)) => attributes.extend(fields),
            None => categories.push((category, fields.to_vec())),
        }
    }
    let body = categories
        .iter()
        .map(|(category, attributes)| {
            format!(r#""{}": {{{}}}"#, category.as_str(), attributes.join(", "))
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!(r#"{{"id": "permuted", "name": "Permuted Beach", "ratings": {{{body}}}}}"#)
}

fn range_strategy() -> impl Strategy<Value = (f64, f64)> {
    (-1_000.0_f64..1_000.0, 0.001_f64..1_000.0).prop_map(|(min, width)| (min, min + width))
}

fn beaches_strategy() -> impl Strategy<Value = Vec<Beach>> {
    prop::collection::vec(prop::option::of(0.0_f64..100.0), 0..12).prop_map(|ratings| {
        ratings
            .into_iter()
            .enumerate()
            .map(|(index, rating)| {
                let beach = Beach::new(index.to_string(), format!("Beach {index}"));
                match rating {
                    Some(value) => {
                        beach.with_rating("crowding_and_atmosphere", "family_friendliness", value)
                    }
                    None => beach,
                }
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn normalize_maps_bounds_to_ends_of_scale((min, max) in range_strategy()) {
        let range = RangeSpec::bounded(min, max);
        prop_assert!(normalize(min, &range).abs() < 1e-9);
        prop_assert!((normalize(max, &range) - 100.0).abs() < 1e-6);
    }

    #[test]
    fn normalize_is_linear_at_midpoint((min, max) in range_strategy()) {
        let range = RangeSpec::bounded(min, max);
        let midpoint = min + (max - min) / 2.0;
        prop_assert!((normalize(midpoint, &range) - 50.0).abs() < 1e-6);
    }

    #[test]
    fn overall_rating_ignores_document_order((entries, shuffled) in rated_entries()) {
        let calculator = RatingCalculator::new(entry_schema(&entries), CategoryWeights::default());
        let natural: Vec<usize> = (0..entries.len()).collect();
        let documents = [
            beach_document(&entries, &natural, false),
            beach_document(&entries, &shuffled, false),
            beach_document(&entries, &shuffled, true),
        ];
        let ratings: Vec<f64> = documents
            .iter()
            .map(|document| {
                let beach: Beach = serde_json::from_str(document)
                    .unwrap_or_else(|err| panic!("decode {document}: {err}"));
                calculator
                    .calculate_overall_rating(&beach)
                    .unwrap_or_else(|err| panic!("rate {document}: {err}"))
            })
            .collect();
        for rating in &ratings {
            prop_assert!((0.0..=100.0).contains(rating), "rating {} out of range", rating);
            prop_assert_eq!(rating.to_bits(), ratings.first().copied().unwrap_or_default().to_bits());
        }
    }

    #[test]
    fn filter_returns_passing_subsequence(
        beaches in beaches_strategy(),
        min in prop::option::of(0.0_f64..100.0),
        max in prop::option::of(0.0_f64..100.0),
    ) {
        let criteria = Criteria::parse([(PATH, Constraint::Range { min, max })])
            .unwrap_or_else(|err| panic!("parse criteria: {err}"));
        let kept = filter_beaches(&beaches, &criteria);
        let mut remaining = beaches.iter();
        for beach in &kept {
            prop_assert!(remaining.any(|candidate| std::ptr::eq(candidate, *beach)));
            prop_assert!(criteria.iter().all(|criterion| meets_criterion(beach, criterion)));
        }
        let expected = beaches
            .iter()
            .filter(|beach| criteria.iter().all(|criterion| meets_criterion(beach, criterion)))
            .count();
        prop_assert_eq!(kept.len(), expected);
    }

    #[test]
    fn scalar_threshold_matches_minimum_range(
        beaches in beaches_strategy(),
        threshold in 0.0_f64..100.0,
    ) {
        let scalar = Criteria::parse([(PATH, Constraint::Minimum(threshold))])
            .unwrap_or_else(|err| panic!("parse criteria: {err}"));
        let ranged = Criteria::parse([(PATH, Constraint::Range { min: Some(threshold), max: None })])
            .unwrap_or_else(|err| panic!("parse criteria: {err}"));
        prop_assert_eq!(filter_beaches(&beaches, &scalar), filter_beaches(&beaches, &ranged));
    }
}
