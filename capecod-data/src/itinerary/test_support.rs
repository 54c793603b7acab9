//! Test utilities for completion providers.
//!
//! [`StubCompletionProvider`] returns a canned reply or error and records
//! every prompt it receives, so tests can run without network access.

use std::sync::{Mutex, PoisonError};

use capecod_core::{ChatPrompt, CompletionError, CompletionProvider};

/// Stub `CompletionProvider` for testing.
///
/// # Example
///
/// ```
/// use capecod_core::{ChatPrompt, CompletionProvider};
/// use capecod_data::itinerary::test_support::StubCompletionProvider;
///
/// let provider = StubCompletionProvider::with_reply("DAY 1: ARRIVE");
/// let reply = provider.complete(&ChatPrompt::new("sys", "plan")).unwrap();
/// assert_eq!(reply, "DAY 1: ARRIVE");
/// assert_eq!(provider.prompts().len(), 1);
/// ```
#[derive(Debug)]
pub struct StubCompletionProvider {
    response: Result<String, CompletionError>,
    prompts: Mutex<Vec<ChatPrompt>>,
}

impl StubCompletionProvider {
    /// Create a provider that answers every prompt with `reply`.
    #[must_use]
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            response: Ok(reply.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a provider that fails every prompt with `error`.
    #[must_use]
    pub fn with_error(error: CompletionError) -> Self {
        Self {
            response: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<ChatPrompt> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CompletionProvider for StubCompletionProvider {
    fn complete(&self, prompt: &ChatPrompt) -> Result<String, CompletionError> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.clone());
        self.response.clone().map(|reply| reply.trim().to_owned())
    }
}
