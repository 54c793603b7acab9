//! Data access for the Cape Cod guide.
//!
//! Responsibilities:
//! - Serve browsable content from a directory of JSON documents.
//! - Render trip prompts and call an OpenAI-compatible completion service.
//!
//! Boundaries:
//! - Do not encode rating rules (live in `capecod-scorer`).
//! - Keep blocking I/O off async executors; the HTTP provider owns its
//!   runtime.
//!
//! Invariants:
//! - Content reads stay inside the configured root directory.
//! - No global mutable state.

pub mod content;
pub mod itinerary;

pub use content::{ContentStoreError, FsContentRepository};
pub use itinerary::{
    HttpCompletionProvider, HttpCompletionProviderConfig, ItineraryError, ItineraryPlanner,
    ProviderBuildError, trip_prompt,
};
