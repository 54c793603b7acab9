//! Facade crate for the Cape Cod guide.
//!
//! This crate re-exports the core domain types and exposes the rating engine
//! and the filesystem-backed content and itinerary services behind feature
//! flags.

#![forbid(unsafe_code)]

pub use capecod_core::{
    AttributeValue, Beach, Category, CategoryRatings, CategoryWeights, ChatPrompt,
    CompletionError, CompletionProvider, Constraint, ContentError, ContentItem, ContentKind,
    ContentRepository, Criteria, Criterion, CriterionError, Itinerary, ItineraryDay, RangeSpec,
    RatingSchema, Ratings, SchemaError, SearchHit, TownBundle, TripRequest, TripRequestError,
};

#[cfg(feature = "scorer")]
pub use capecod_scorer::{
    RatedBeach, RatingCalculator, RatingError, filter_beaches, load_schema, load_weights,
    normalize, sort_by_rating,
};

#[cfg(feature = "content-fs")]
pub use capecod_data::{
    FsContentRepository, HttpCompletionProvider, HttpCompletionProviderConfig, ItineraryError,
    ItineraryPlanner,
};

#[cfg(feature = "test-support")]
pub use capecod_core::test_support;
