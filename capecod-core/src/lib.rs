//! Core domain types for the Cape Cod guide.
//!
//! Beaches and their rating trees, the rating schema, category weights and
//! filter criteria live here alongside the seams the rest of the workspace
//! plugs into: [`ContentRepository`] for browsable content and
//! [`CompletionProvider`] for itinerary generation. Parsing helpers return
//! `Result` so malformed input is reported where it enters the system.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod beach;
pub mod category;
pub mod completion;
pub mod content;
pub mod criterion;
pub mod itinerary;
pub mod schema;
pub mod town;
pub mod trip;
pub mod weights;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use beach::{AttributeValue, Beach, CategoryRatings, Ratings};
pub use category::Category;
pub use completion::{ChatPrompt, CompletionError, CompletionProvider};
pub use content::{ContentError, ContentItem, ContentKind, ContentRepository, SearchHit};
pub use criterion::{Constraint, Criteria, Criterion, CriterionError, CriterionPath};
pub use itinerary::{Itinerary, ItineraryDay};
pub use schema::{RangeSpec, RatingSchema, SchemaEntry, SchemaError};
pub use town::{
    Climate, EmergencyServices, Listing, NamedPlace, TouristInformation, TownBundle, TownEvent,
    TownInfo,
};
pub use trip::{TripRequest, TripRequestError};
pub use weights::{CategoryWeights, CategoryWeightsError};
