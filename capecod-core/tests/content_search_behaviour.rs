//! Behaviour tests for the default search and lookup methods of
//! `ContentRepository`.

use std::cell::RefCell;

use capecod_core::{
    Beach, ContentError, ContentItem, ContentKind, ContentRepository, SearchHit, TownBundle,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Default)]
struct FixtureRepository {
    towns: Vec<ContentItem>,
    beaches: Vec<Beach>,
    attractions: Vec<ContentItem>,
}

impl ContentRepository for FixtureRepository {
    fn list(&self, kind: ContentKind) -> Result<Vec<ContentItem>, ContentError> {
        Ok(match kind {
            ContentKind::Towns => self.towns.clone(),
            ContentKind::Beaches => self.beaches.iter().cloned().map(ContentItem::from).collect(),
            ContentKind::Attractions => self.attractions.clone(),
            ContentKind::FoodAndDrink => Vec::new(),
        })
    }

    fn beaches(&self) -> Result<Vec<Beach>, ContentError> {
        Ok(self.beaches.clone())
    }

    fn town_bundle(&self, _town: &str) -> Result<TownBundle, ContentError> {
        Ok(TownBundle::default())
    }
}

#[fixture]
fn repository() -> RefCell<FixtureRepository> {
    RefCell::new(FixtureRepository::default())
}

#[fixture]
fn hits() -> RefCell<Vec<SearchHit>> {
    RefCell::new(Vec::new())
}

#[fixture]
fn found() -> RefCell<Option<ContentItem>> {
    RefCell::new(None)
}

#[given("a repository with a town, a beach and an attraction mentioning \"harbor\"")]
fn given_repository(#[from(repository)] repository: &RefCell<FixtureRepository>) {
    let mut repo = repository.borrow_mut();
    repo.attractions = vec![ContentItem::new(
        "whale-watch",
        "Whale Watch",
        "Departs from the harbor at dawn",
    )];
    let mut beach = Beach::new("7", "Harbor Beach");
    beach.description = "Calm water".into();
    repo.beaches = vec![beach];
    repo.towns = vec![
        ContentItem::new("hyannis", "Hyannis", "Ferries leave the Harbor hourly"),
        ContentItem::new("truro", "Truro", "Dunes and cliffs"),
    ];
}

#[when("I search for \"HARBOR\"")]
fn when_search_upper(
    #[from(repository)] repository: &RefCell<FixtureRepository>,
    #[from(hits)] hits: &RefCell<Vec<SearchHit>>,
) {
    *hits.borrow_mut() = repository
        .borrow()
        .search("HARBOR", None)
        .unwrap_or_else(|err| panic!("search failed: {err}"));
}

#[when("I search beaches for \"harbor\"")]
fn when_search_beaches(
    #[from(repository)] repository: &RefCell<FixtureRepository>,
    #[from(hits)] hits: &RefCell<Vec<SearchHit>>,
) {
    *hits.borrow_mut() = repository
        .borrow()
        .search("harbor", Some(ContentKind::Beaches))
        .unwrap_or_else(|err| panic!("search failed: {err}"));
}

#[when("I search for \"lighthouse\"")]
fn when_search_missing(
    #[from(repository)] repository: &RefCell<FixtureRepository>,
    #[from(hits)] hits: &RefCell<Vec<SearchHit>>,
) {
    *hits.borrow_mut() = repository
        .borrow()
        .search("lighthouse", None)
        .unwrap_or_else(|err| panic!("search failed: {err}"));
}

#[when("I look up attraction \"missing\"")]
fn when_lookup_missing(
    #[from(repository)] repository: &RefCell<FixtureRepository>,
    #[from(found)] found: &RefCell<Option<ContentItem>>,
) {
    *found.borrow_mut() = repository
        .borrow()
        .get(ContentKind::Attractions, "missing")
        .unwrap_or_else(|err| panic!("lookup failed: {err}"));
}

#[then("the hits come from towns, beaches and attractions in that order")]
fn then_ordered(#[from(hits)] hits: &RefCell<Vec<SearchHit>>) {
    let hits = hits.borrow();
    let found: Vec<(ContentKind, &str)> = hits
        .iter()
        .map(|hit| (hit.category, hit.item.id.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![
            (ContentKind::Towns, "hyannis"),
            (ContentKind::Beaches, "7"),
            (ContentKind::Attractions, "whale-watch"),
        ]
    );
}

#[then("only the beach is returned")]
fn then_only_beach(#[from(hits)] hits: &RefCell<Vec<SearchHit>>) {
    let hits = hits.borrow();
    assert_eq!(hits.len(), 1);
    assert!(hits.iter().all(|hit| hit.category == ContentKind::Beaches));
}

#[then("no hits are returned")]
fn then_no_hits(#[from(hits)] hits: &RefCell<Vec<SearchHit>>) {
    assert!(hits.borrow().is_empty());
}

#[then("nothing is found")]
fn then_nothing(#[from(found)] found: &RefCell<Option<ContentItem>>) {
    assert!(found.borrow().is_none());
}

#[scenario(path = "tests/features/content_search.feature", index = 0)]
fn search_spans_kinds(
    repository: RefCell<FixtureRepository>,
    hits: RefCell<Vec<SearchHit>>,
    found: RefCell<Option<ContentItem>>,
) {
    let _ = (repository, hits, found);
}

#[scenario(path = "tests/features/content_search.feature", index = 1)]
fn search_one_kind(
    repository: RefCell<FixtureRepository>,
    hits: RefCell<Vec<SearchHit>>,
    found: RefCell<Option<ContentItem>>,
) {
    let _ = (repository, hits, found);
}

#[scenario(path = "tests/features/content_search.feature", index = 2)]
fn search_without_matches(
    repository: RefCell<FixtureRepository>,
    hits: RefCell<Vec<SearchHit>>,
    found: RefCell<Option<ContentItem>>,
) {
    let _ = (repository, hits, found);
}

#[scenario(path = "tests/features/content_search.feature", index = 3)]
fn unknown_identifier(
    repository: RefCell<FixtureRepository>,
    hits: RefCell<Vec<SearchHit>>,
    found: RefCell<Option<ContentItem>>,
) {
    let _ = (repository, hits, found);
}
