//! Behavioural coverage for criteria-based beach filtering.

use std::cell::RefCell;

use capecod_core::{Beach, Constraint, Criteria, CriterionError};
use capecod_scorer::filter_beaches;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

const FAMILY: &str = "crowding_and_atmosphere.family_friendliness";

/// Beaches available to the scenario.
#[fixture]
pub fn beaches() -> RefCell<Vec<Beach>> {
    RefCell::new(Vec::new())
}

/// Identifiers of the beaches kept by the filter.
#[fixture]
pub fn kept() -> RefCell<Vec<String>> {
    RefCell::new(Vec::new())
}

/// Outcome of parsing a criterion.
#[fixture]
pub fn parse_error() -> RefCell<Option<CriterionError>> {
    RefCell::new(None)
}

fn run_filter(beaches: &RefCell<Vec<Beach>>, kept: &RefCell<Vec<String>>, criteria: &Criteria) {
    let all = beaches.borrow();
    *kept.borrow_mut() = filter_beaches(&all, criteria)
        .into_iter()
        .map(|beach| beach.id.clone())
        .collect();
}

fn family_criteria(constraint: Constraint) -> Criteria {
    Criteria::parse([(FAMILY, constraint)])
        .unwrap_or_else(|err| panic!("valid criterion should parse: {err}"))
}

#[given("beaches rated for family friendliness")]
fn given_beaches(#[from(beaches)] beaches: &RefCell<Vec<Beach>>) {
    let rated = |id: &str, score: f64| {
        Beach::new(id, id).with_rating("crowding_and_atmosphere", "family_friendliness", score)
    };
    *beaches.borrow_mut() = vec![
        rated("craigville", 92.0),
        rated("race-point", 45.0),
        rated("nauset", 80.0),
        rated("mayo", 65.0),
        Beach::new("unrated", "Unrated"),
    ];
}

#[when("I filter with no criteria")]
fn when_no_criteria(
    #[from(beaches)] beaches: &RefCell<Vec<Beach>>,
    #[from(kept)] kept: &RefCell<Vec<String>>,
) {
    run_filter(beaches, kept, &Criteria::new());
}

#[when("I filter for family friendliness of at least 80")]
fn when_family_friendly(
    #[from(beaches)] beaches: &RefCell<Vec<Beach>>,
    #[from(kept)] kept: &RefCell<Vec<String>>,
) {
    run_filter(beaches, kept, &family_criteria(Constraint::Minimum(80.0)));
}

#[when("I filter for family friendliness between 50 and 79")]
fn when_between(
    #[from(beaches)] beaches: &RefCell<Vec<Beach>>,
    #[from(kept)] kept: &RefCell<Vec<String>>,
) {
    run_filter(
        beaches,
        kept,
        &family_criteria(Constraint::Range {
            min: Some(50.0),
            max: Some(79.0),
        }),
    );
}

#[when("I parse a criterion for a wave height")]
fn when_nested(#[from(parse_error)] parse_error: &RefCell<Option<CriterionError>>) {
    *parse_error.borrow_mut() = Criteria::parse([(
        "environmental_factors.wave_conditions.height",
        Constraint::Minimum(1.0),
    )])
    .err();
}

#[then("every beach is returned in its original order")]
fn then_all(#[from(kept)] kept: &RefCell<Vec<String>>) {
    assert_eq!(
        *kept.borrow(),
        vec!["craigville", "race-point", "nauset", "mayo", "unrated"]
    );
}

#[then("only the family friendly beaches are returned")]
fn then_family(#[from(kept)] kept: &RefCell<Vec<String>>) {
    assert_eq!(*kept.borrow(), vec!["craigville", "nauset"]);
}

#[then("only the moderately family friendly beach is returned")]
fn then_moderate(#[from(kept)] kept: &RefCell<Vec<String>>) {
    assert_eq!(*kept.borrow(), vec!["mayo"]);
}

#[then("parsing fails because nested paths are unsupported")]
fn then_nested_error(#[from(parse_error)] parse_error: &RefCell<Option<CriterionError>>) {
    assert!(matches!(
        *parse_error.borrow(),
        Some(CriterionError::NestedPathUnsupported { .. })
    ));
}

#[scenario(path = "tests/features/beach_filter.feature", index = 0)]
fn no_criteria(
    beaches: RefCell<Vec<Beach>>,
    kept: RefCell<Vec<String>>,
    parse_error: RefCell<Option<CriterionError>>,
) {
    let _ = (beaches, kept, parse_error);
}

#[scenario(path = "tests/features/beach_filter.feature", index = 1)]
fn family_friendly(
    beaches: RefCell<Vec<Beach>>,
    kept: RefCell<Vec<String>>,
    parse_error: RefCell<Option<CriterionError>>,
) {
    let _ = (beaches, kept, parse_error);
}

#[scenario(path = "tests/features/beach_filter.feature", index = 2)]
fn bounded_range(
    beaches: RefCell<Vec<Beach>>,
    kept: RefCell<Vec<String>>,
    parse_error: RefCell<Option<CriterionError>>,
) {
    let _ = (beaches, kept, parse_error);
}

#[scenario(path = "tests/features/beach_filter.feature", index = 3)]
fn nested_criterion(
    beaches: RefCell<Vec<Beach>>,
    kept: RefCell<Vec<String>>,
    parse_error: RefCell<Option<CriterionError>>,
) {
    let _ = (beaches, kept, parse_error);
}
