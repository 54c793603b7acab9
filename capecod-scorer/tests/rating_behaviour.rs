//! Behavioural coverage for weighted overall ratings.

use std::cell::RefCell;

use capecod_core::{
    AttributeValue, Beach, Category, CategoryWeights, RangeSpec, RatingSchema, SchemaError,
};
use capecod_scorer::{RatingCalculator, RatingError};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// Calculator with a small schema and the default weights.
#[fixture]
pub fn calculator() -> RatingCalculator {
    let schema = RatingSchema::new()
        .with_range("water_quality", RangeSpec::bounded(1.0, 10.0))
        .with_range("score", RangeSpec::unbounded())
        .with_group(
            "wave_conditions",
            [
                ("height", RangeSpec::bounded(0.0, 4.0)),
                ("frequency", RangeSpec::bounded(0.0, 10.0)),
            ],
        );
    RatingCalculator::new(schema, CategoryWeights::default())
}

/// Beach under test.
#[fixture]
pub fn beach() -> RefCell<Beach> {
    RefCell::new(Beach::new("under-test", "Beach Under Test"))
}

/// Outcome of the calculation.
#[fixture]
pub fn outcome() -> RefCell<Option<Result<f64, RatingError>>> {
    RefCell::new(None)
}

fn rate_every_category_except(beach: &RefCell<Beach>, skipped: Option<Category>) {
    let mut current = beach.borrow_mut();
    for category in Category::ALL {
        if Some(category) != skipped {
            current.ratings.insert(category.as_str(), "score", 100.0);
        }
    }
}

#[given("a beach rated 100 in every category")]
fn given_perfect(#[from(beach)] beach: &RefCell<Beach>) {
    rate_every_category_except(beach, None);
}

#[given("a beach rated 100 in every category except environmental protection")]
fn given_missing_protection(#[from(beach)] beach: &RefCell<Beach>) {
    rate_every_category_except(beach, Some(Category::EnvironmentalProtection));
}

#[given("a beach whose environmental factors mix a scalar and a composite attribute")]
fn given_composite(#[from(beach)] beach: &RefCell<Beach>) {
    let mut current = beach.borrow_mut();
    current
        .ratings
        .insert("environmental_factors", "water_quality", 10.0);
    current.ratings.insert(
        "environmental_factors",
        "wave_conditions",
        AttributeValue::nested([("height", 2.0), ("frequency", 10.0)]),
    );
}

#[given("a beach rated on an attribute the schema does not describe")]
fn given_unknown_attribute(#[from(beach)] beach: &RefCell<Beach>) {
    beach
        .borrow_mut()
        .ratings
        .insert("facilities_and_services", "parking", 4.0);
}

#[when("I calculate its overall rating")]
fn when_calculate(
    #[from(calculator)] calculator: &RatingCalculator,
    #[from(beach)] beach: &RefCell<Beach>,
    #[from(outcome)] outcome: &RefCell<Option<Result<f64, RatingError>>>,
) {
    *outcome.borrow_mut() = Some(calculator.calculate_overall_rating(&beach.borrow()));
}

fn assert_rating(outcome: &RefCell<Option<Result<f64, RatingError>>>, expected: f64) {
    match outcome.borrow().as_ref() {
        Some(Ok(rating)) => assert_eq!(*rating, expected),
        other => panic!("expected rating {expected}, got {other:?}"),
    }
}

#[then("the overall rating is 100.00")]
fn then_hundred(#[from(outcome)] outcome: &RefCell<Option<Result<f64, RatingError>>>) {
    assert_rating(outcome, 100.0);
}

#[then("the overall rating is 95.00")]
fn then_ninety_five(#[from(outcome)] outcome: &RefCell<Option<Result<f64, RatingError>>>) {
    assert_rating(outcome, 95.0);
}

#[then("the overall rating is 20.83")]
fn then_composite(#[from(outcome)] outcome: &RefCell<Option<Result<f64, RatingError>>>) {
    assert_rating(outcome, 20.83);
}

#[then("the rating fails with a missing attribute error")]
fn then_missing_attribute(#[from(outcome)] outcome: &RefCell<Option<Result<f64, RatingError>>>) {
    let borrowed = outcome.borrow();
    assert!(
        matches!(
            borrowed.as_ref(),
            Some(Err(RatingError::Schema {
                category: Category::FacilitiesAndServices,
                source: SchemaError::MissingAttribute { attribute },
                ..
            })) if attribute == "parking"
        ),
        "unexpected outcome {borrowed:?}"
    );
}

#[scenario(path = "tests/features/overall_rating.feature", index = 0)]
fn perfect_beach(
    calculator: RatingCalculator,
    beach: RefCell<Beach>,
    outcome: RefCell<Option<Result<f64, RatingError>>>,
) {
    let _ = (calculator, beach, outcome);
}

#[scenario(path = "tests/features/overall_rating.feature", index = 1)]
fn missing_category(
    calculator: RatingCalculator,
    beach: RefCell<Beach>,
    outcome: RefCell<Option<Result<f64, RatingError>>>,
) {
    let _ = (calculator, beach, outcome);
}

#[scenario(path = "tests/features/overall_rating.feature", index = 2)]
fn composite_attributes(
    calculator: RatingCalculator,
    beach: RefCell<Beach>,
    outcome: RefCell<Option<Result<f64, RatingError>>>,
) {
    let _ = (calculator, beach, outcome);
}

#[scenario(path = "tests/features/overall_rating.feature", index = 3)]
fn unknown_attribute(
    calculator: RatingCalculator,
    beach: RefCell<Beach>,
    outcome: RefCell<Option<Result<f64, RatingError>>>,
) {
    let _ = (calculator, beach, outcome);
}
