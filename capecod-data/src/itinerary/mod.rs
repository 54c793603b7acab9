//! Itinerary generation from a trip request and local town content.
//!
//! [`ItineraryPlanner`] validates a [`TripRequest`], renders an overview of
//! each requested town from a [`ContentRepository`], and asks a
//! [`CompletionProvider`] to write the itinerary.
//!
//! # Example
//!
//! ```
//! use capecod_core::test_support::MemoryContentRepository;
//! use capecod_core::TripRequest;
//! use capecod_data::itinerary::ItineraryPlanner;
//! use capecod_data::itinerary::test_support::StubCompletionProvider;
//!
//! let planner = ItineraryPlanner::new(
//!     MemoryContentRepository::new(),
//!     StubCompletionProvider::with_reply("DAY 1: ARRIVAL\n• Check in"),
//! );
//! let request = TripRequest::new(
//!     "2024-07-01".parse().unwrap(),
//!     "2024-07-02".parse().unwrap(),
//! );
//! let itinerary = planner.plan(request).unwrap();
//! assert_eq!(itinerary.days().len(), 1);
//! ```

mod client;
mod openai;
mod prompt;

#[doc(hidden)]
pub mod test_support;

use capecod_core::{
    ChatPrompt, CompletionError, CompletionProvider, ContentRepository, Itinerary, TripRequest,
    TripRequestError,
};
use log::{debug, info};
use thiserror::Error;

pub use client::{
    API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_USER_AGENT, HttpCompletionProvider,
    HttpCompletionProviderConfig, ProviderBuildError,
};
pub use prompt::{SYSTEM_PROMPT, build_prompt, format_listings, town_overview};

/// Errors raised while planning an itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItineraryError {
    /// The trip request failed validation.
    #[error(transparent)]
    InvalidRequest(#[from] TripRequestError),
    /// The completion provider failed.
    #[error("itinerary generation failed: {0}")]
    Completion(#[from] CompletionError),
}

/// Render the prompt for `request` using town content from `repository`.
///
/// Towns with no local content still get an overview made of placeholders.
/// The request is not validated.
pub fn trip_prompt<R>(repository: &R, request: &TripRequest) -> ChatPrompt
where
    R: ContentRepository + ?Sized,
{
    let overviews: Vec<String> = request
        .towns
        .iter()
        .map(|town| {
            let bundle = repository.town_bundle_or_default(town);
            town_overview(town, &bundle)
        })
        .collect();
    debug!("rendered {} town overviews", overviews.len());
    build_prompt(request, &overviews)
}

/// Builds prompts from local content and delegates writing to a provider.
#[derive(Debug)]
pub struct ItineraryPlanner<R, P> {
    repository: R,
    provider: P,
}

impl<R, P> ItineraryPlanner<R, P>
where
    R: ContentRepository,
    P: CompletionProvider,
{
    /// Pair a content repository with a completion provider.
    pub const fn new(repository: R, provider: P) -> Self {
        Self {
            repository,
            provider,
        }
    }

    /// The completion provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Render the prompt for `request` without contacting the provider.
    pub fn prompt(&self, request: &TripRequest) -> ChatPrompt {
        trip_prompt(&self.repository, request)
    }

    /// Validate `request` and generate an itinerary for it.
    ///
    /// # Errors
    ///
    /// Returns [`ItineraryError::InvalidRequest`] when the dates are out of
    /// order, or [`ItineraryError::Completion`] when the provider fails.
    pub fn plan(&self, request: TripRequest) -> Result<Itinerary, ItineraryError> {
        let request = request.validate()?;
        info!(
            "planning {}-night itinerary for {} towns",
            request.nights(),
            request.towns.len()
        );
        let prompt = self.prompt(&request);
        let text = self.provider.complete(&prompt)?;
        Ok(Itinerary::new(text))
    }
}
