//! Chat-completion prompts and the provider abstraction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A system message plus a single user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPrompt {
    /// Instructions establishing the assistant's role.
    pub system: String,
    /// The request body.
    pub user: String,
}

impl ChatPrompt {
    /// Pair a system message with a user message.
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Errors from [`CompletionProvider::complete`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// No API key was configured.
    #[error("no API key configured; set OPENAI_API_KEY")]
    MissingApiKey,
    /// The request did not complete in time.
    #[error("completion request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Endpoint that timed out.
        url: String,
        /// Configured timeout.
        timeout_secs: u64,
    },
    /// The service answered with a non-success status.
    #[error("completion service {url} returned HTTP {status}: {message}")]
    Http {
        /// Endpoint that failed.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Body or reason phrase.
        message: String,
    },
    /// A transport-level failure.
    #[error("network error calling {url}: {message}")]
    Network {
        /// Endpoint that failed.
        url: String,
        /// Description of the failure.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse completion response: {message}")]
    Parse {
        /// Description of the decoding failure.
        message: String,
    },
    /// The response contained no usable message.
    #[error("completion response contained no message content")]
    EmptyResponse,
}

/// Produces a completion for a chat prompt.
///
/// Implementations must be thread-safe and should block until the answer is
/// available or an error occurs. The returned text is trimmed.
pub trait CompletionProvider: Send + Sync {
    /// Complete `prompt`.
    ///
    /// # Errors
    /// Returns [`CompletionError`] when the backend is unreachable, rejects
    /// the request or returns no content.
    fn complete(&self, prompt: &ChatPrompt) -> Result<String, CompletionError>;
}

impl<T: CompletionProvider + ?Sized> CompletionProvider for Box<T> {
    fn complete(&self, prompt: &ChatPrompt) -> Result<String, CompletionError> {
        (**self).complete(prompt)
    }
}
