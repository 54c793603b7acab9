//! HTTP `CompletionProvider` for OpenAI-compatible chat completion services.
//!
//! [`CompletionProvider`] is synchronous so callers such as the CLI need no
//! async runtime. This provider bridges to `reqwest` by blocking on a Tokio
//! runtime it owns.
//!
//! # Example
//!
//! ```no_run
//! use capecod_core::{ChatPrompt, CompletionProvider};
//! use capecod_data::itinerary::{HttpCompletionProvider, HttpCompletionProviderConfig};
//!
//! let config = HttpCompletionProviderConfig::from_env();
//! let provider = HttpCompletionProvider::with_config(config)?;
//! let text = provider.complete(&ChatPrompt::new("You plan trips.", "Two days in Truro"))?;
//! println!("{text}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::Duration;

use capecod_core::{ChatPrompt, CompletionError, CompletionProvider};
use log::debug;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::openai::{ChatCompletionRequest, ChatCompletionResponse, ErrorResponse, Message};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Default base URL of the completion service.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Default user agent for completion requests.
pub const DEFAULT_USER_AGENT: &str = "capecod-guide/0.1";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Error type for [`HttpCompletionProvider`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// The configured base URL is not a valid absolute URL.
    #[error("invalid completion base URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// The rejected value.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Configuration for [`HttpCompletionProvider`].
#[derive(Clone)]
pub struct HttpCompletionProviderConfig {
    /// Base URL; `/chat/completions` is appended.
    pub base_url: String,
    /// Bearer token. Checked when a completion is requested.
    pub api_key: Option<String>,
    /// Model name sent with each request.
    pub model: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Nucleus sampling mass.
    pub top_p: f32,
    /// Penalty for repeated tokens.
    pub frequency_penalty: f32,
    /// Penalty for previously seen topics.
    pub presence_penalty: f32,
}

impl std::fmt::Debug for HttpCompletionProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCompletionProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl Default for HttpCompletionProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            model: DEFAULT_MODEL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            temperature: 0.7,
            max_tokens: 2000,
            top_p: 1.0,
            frequency_penalty: 0.2,
            presence_penalty: 0.2,
        }
    }
}

impl HttpCompletionProviderConfig {
    /// Create a configuration for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Default configuration with the API key read from `OPENAI_API_KEY`.
    ///
    /// An unset or blank variable leaves the key empty.
    #[must_use]
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Self {
            api_key,
            ..Default::default()
        }
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Chat completion client.
///
/// Owns a current-thread Tokio runtime reused across calls. Inside an
/// existing multi-threaded runtime the caller's handle is used through
/// [`tokio::task::block_in_place`]; inside a `current_thread` runtime the
/// provider falls back to its own runtime.
pub struct HttpCompletionProvider {
    client: Client,
    config: HttpCompletionProviderConfig,
    endpoint: String,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpCompletionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCompletionProvider")
            .field("config", &self.config)
            .field("endpoint", &self.endpoint)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl HttpCompletionProvider {
    /// Create a provider for `base_url` with default settings and `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpCompletionProviderConfig::new(base_url).with_api_key(api_key))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn with_config(config: HttpCompletionProviderConfig) -> Result<Self, ProviderBuildError> {
        let endpoint = completions_endpoint(&config.base_url)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            endpoint,
            runtime,
        })
    }

    /// The resolved `/chat/completions` URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn complete_async(
        &self,
        api_key: &str,
        prompt: &ChatPrompt,
    ) -> Result<String, CompletionError> {
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                Message {
                    role: "system",
                    content: &prompt.system,
                },
                Message {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            top_p: self.config.top_p,
            frequency_penalty: self.config.frequency_penalty,
            presence_penalty: self.config.presence_penalty,
        };
        debug!(
            "requesting completion from {} with model {}",
            self.endpoint, self.config.model
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CompletionError::Http {
                url: self.endpoint.clone(),
                status: status.as_u16(),
                message: error_message(status, &text),
            });
        }

        let parsed: ChatCompletionResponse =
            response
                .json()
                .await
                .map_err(|err| CompletionError::Parse {
                    message: err.to_string(),
                })?;
        parsed
            .first_content()
            .ok_or(CompletionError::EmptyResponse)
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error) -> CompletionError {
        if error.is_timeout() {
            return CompletionError::Timeout {
                url: self.endpoint.clone(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return CompletionError::Http {
                url: self.endpoint.clone(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        CompletionError::Network {
            url: self.endpoint.clone(),
            message: error.to_string(),
        }
    }
}

impl CompletionProvider for HttpCompletionProvider {
    /// Send `prompt` and return the first choice's trimmed text.
    ///
    /// # Runtime requirements
    ///
    /// Inside an existing Tokio runtime the runtime should be multi-threaded.
    /// From a `current_thread` runtime the provider blocks on its own runtime,
    /// which stalls the caller's runtime for the duration of the request.
    fn complete(&self, prompt: &ChatPrompt) -> Result<String, CompletionError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(CompletionError::MissingApiKey)?;

        let future = self.complete_async(api_key, prompt);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

fn completions_endpoint(base_url: &str) -> Result<String, ProviderBuildError> {
    let trimmed = base_url.trim_end_matches('/');
    Url::parse(trimmed).map_err(|source| ProviderBuildError::InvalidBaseUrl {
        url: base_url.to_owned(),
        source,
    })?;
    Ok(format!("{trimmed}/chat/completions"))
}

/// Prefer the service's own error message; fall back to the reason phrase.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|envelope| envelope.error.message)
        .ok()
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_owned()
        })
}
