//! Behavioural tests for [`ItineraryPlanner`] over a content directory.
//!
//! These tests use [`StubCompletionProvider`] so no completion service is
//! contacted.

use std::cell::RefCell;
use std::fs;

use camino::Utf8Path;
use capecod_core::{CompletionError, Itinerary, TripRequest};
use capecod_data::FsContentRepository;
use capecod_data::itinerary::test_support::StubCompletionProvider;
use capecod_data::itinerary::{ItineraryError, ItineraryPlanner};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

type Planner = ItineraryPlanner<FsContentRepository, StubCompletionProvider>;

/// Shared state for a scenario.
#[derive(Default)]
struct World {
    root: Option<TempDir>,
    provider: Option<StubCompletionProvider>,
    planner: Option<Planner>,
    outcome: Option<Result<Itinerary, ItineraryError>>,
}

impl World {
    fn planner(&mut self) -> &Planner {
        if self.planner.is_none() {
            let root = self.root.as_ref().expect("content directory must exist");
            let path = Utf8Path::from_path(root.path()).expect("utf-8 temp path");
            let repository = FsContentRepository::open(path).expect("open content root");
            let provider = self.provider.take().expect("provider must be configured");
            self.planner = Some(ItineraryPlanner::new(repository, provider));
        }
        self.planner.as_ref().expect("planner initialised")
    }

    fn plan(&mut self, request: TripRequest) {
        let outcome = self.planner().plan(request);
        self.outcome = Some(outcome);
    }

    fn prompt_text(&self) -> String {
        let planner = self.planner.as_ref().expect("planner initialised");
        let prompts = planner.provider().prompts();
        assert_eq!(prompts.len(), 1, "expected exactly one completion call");
        prompts[0].user.clone()
    }
}

#[fixture]
fn world() -> RefCell<World> {
    RefCell::new(World::default())
}

fn trip(start: &str, end: &str) -> TripRequest {
    TripRequest {
        towns: vec!["Chatham".to_owned(), "Truro".to_owned()],
        preferences: vec!["quiet".to_owned()],
        activities: vec!["kayaking".to_owned()],
        ..TripRequest::new(
            start.parse().expect("start date"),
            end.parse().expect("end date"),
        )
    }
}

#[given("a content directory describing Chatham")]
fn content_directory(#[from(world)] world: &RefCell<World>) {
    let root = TempDir::new().expect("temp dir");
    let town = root.path().join("towns/chatham");
    fs::create_dir_all(&town).expect("create town dir");
    fs::write(
        town.join("info.json"),
        r#"{"name": "Chatham", "description": "Lighthouse and fish pier", "population": 6594}"#,
    )
    .expect("write info");
    fs::write(
        town.join("activities.json"),
        r#"{"activities": [{"name": "Monomoy boat tour", "description": "Seal watching"}]}"#,
    )
    .expect("write activities");
    world.borrow_mut().root = Some(root);
}

#[given("a completion service replying with a two day plan")]
fn replying_service(#[from(world)] world: &RefCell<World>) {
    world.borrow_mut().provider = Some(StubCompletionProvider::with_reply(
        "Enjoy!\nDAY 1: LIGHTHOUSES\n• Chatham Light\n---------\nDAY 2: DUNES\n• Truro dunes",
    ));
}

#[given("a completion service that times out")]
fn timing_out_service(#[from(world)] world: &RefCell<World>) {
    world.borrow_mut().provider = Some(StubCompletionProvider::with_error(
        CompletionError::Timeout {
            url: "https://api.openai.com/v1/chat/completions".to_owned(),
            timeout_secs: 120,
        },
    ));
}

#[when("a trip to Chatham and Truro is planned")]
fn plan_trip(#[from(world)] world: &RefCell<World>) {
    world.borrow_mut().plan(trip("2024-07-01", "2024-07-03"));
}

#[when("a trip ending before it starts is planned")]
fn plan_backwards_trip(#[from(world)] world: &RefCell<World>) {
    world.borrow_mut().plan(trip("2024-07-03", "2024-07-01"));
}

#[then("the itinerary has 2 days")]
fn itinerary_has_two_days(#[from(world)] world: &RefCell<World>) {
    let state = world.borrow();
    let itinerary = state
        .outcome
        .as_ref()
        .expect("plan attempted")
        .as_ref()
        .expect("expected an itinerary");
    let days = itinerary.days();
    assert_eq!(days.len(), 2);
    assert_eq!(days[1].lines, vec!["DUNES", "• Truro dunes"]);
}

#[then("the prompt describes Chatham from local content")]
fn prompt_describes_chatham(#[from(world)] world: &RefCell<World>) {
    let text = world.borrow().prompt_text();
    assert!(text.contains("TOWN: Chatham\nLighthouse and fish pier"));
    assert!(text.contains("• Population: 6594"));
    assert!(text.contains("• Monomoy boat tour:\n   Seal watching"));
}

#[then("the prompt describes Truro with placeholders")]
fn prompt_describes_truro(#[from(world)] world: &RefCell<World>) {
    let text = world.borrow().prompt_text();
    let truro = text.find("TOWN: Truro").expect("Truro overview");
    let tail = text.get(truro..).expect("tail");
    assert!(tail.contains("• Population: N/A"));
    assert!(tail.contains("AVAILABLE ACTIVITIES:\nNo items available"));
}

#[then("an invalid request error is returned")]
fn invalid_request(#[from(world)] world: &RefCell<World>) {
    let state = world.borrow();
    let outcome = state.outcome.as_ref().expect("plan attempted");
    assert!(
        matches!(outcome, Err(ItineraryError::InvalidRequest(_))),
        "expected InvalidRequest, got {outcome:?}"
    );
}

#[then("the completion service was not called")]
fn service_not_called(#[from(world)] world: &RefCell<World>) {
    let state = world.borrow();
    let planner = state.planner.as_ref().expect("planner initialised");
    assert!(planner.provider().prompts().is_empty());
}

#[then("a completion timeout error is returned")]
fn timeout_error(#[from(world)] world: &RefCell<World>) {
    let state = world.borrow();
    let outcome = state.outcome.as_ref().expect("plan attempted");
    assert!(
        matches!(
            outcome,
            Err(ItineraryError::Completion(CompletionError::Timeout { .. }))
        ),
        "expected a timeout, got {outcome:?}"
    );
}

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/itinerary.feature", name = $title)]
        fn $fn_name(world: RefCell<World>) {
            let _ = world;
        }
    };
}

register_scenario!(planning_two_towns, "planning a trip across two towns");
register_scenario!(
    rejecting_backwards_trip,
    "rejecting a trip that ends before it starts"
);
register_scenario!(surfacing_completion_failures, "surfacing completion failures");
