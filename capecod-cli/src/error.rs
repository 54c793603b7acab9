//! Error types emitted by the Cape Cod guide CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use capecod_core::{ContentError, ContentKind, CriterionError};
use capecod_data::itinerary::{ItineraryError, ProviderBuildError};
use capecod_data::ContentStoreError;
use capecod_scorer::{LoadError, RatingError};
use thiserror::Error;

/// Errors emitted by the Cape Cod guide CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A value could not be interpreted.
    #[error("invalid {field} {value:?}: {reason}")]
    InvalidArgument {
        field: &'static str,
        value: String,
        reason: String,
    },
    /// A referenced input path does not exist on disk or is not a file.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening the content directory failed.
    #[error(transparent)]
    OpenContent(#[from] ContentStoreError),
    /// Reading content failed.
    #[error(transparent)]
    Content(#[from] ContentError),
    /// A requested content item does not exist.
    #[error("no {kind} entry with id {id:?}")]
    NotFound { kind: ContentKind, id: String },
    /// Loading the rating schema or weights failed.
    #[error(transparent)]
    LoadRatingConfig(#[from] LoadError),
    /// Beach ratings name attributes the rating schema does not describe.
    #[error(
        "rating schema {schema:?} does not cover {} beach(es): {}",
        .gaps.len(),
        .gaps.join("; ")
    )]
    SchemaGaps {
        schema: Utf8PathBuf,
        gaps: Vec<String>,
    },
    /// A beach could not be rated.
    #[error(transparent)]
    Rating(#[from] RatingError),
    /// A filter criterion was malformed.
    #[error(transparent)]
    Criterion(#[from] CriterionError),
    /// Constructing the completion provider failed.
    #[error("failed to build completion provider for {base_url:?}: {source}")]
    BuildCompletionProvider {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// Itinerary generation failed.
    #[error(transparent)]
    Itinerary(#[from] ItineraryError),
    /// Serializing command output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
