//! Error types raised while rating beaches or loading rating configuration.
#![forbid(unsafe_code)]

use camino::Utf8PathBuf;
use capecod_core::{Category, CategoryWeightsError, SchemaError};
use thiserror::Error;

/// Errors raised while computing a beach's overall rating.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RatingError {
    /// A rating could not be matched to the schema.
    #[error("failed to score {category} for beach '{beach_id}'")]
    Schema {
        /// Identifier of the beach being rated.
        beach_id: String,
        /// Category being aggregated.
        category: Category,
        /// Underlying lookup failure.
        #[source]
        source: SchemaError,
    },
}

/// Errors raised while loading a schema or weights document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {path}")]
    Read {
        /// File that was requested.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The file was not valid JSON for the expected document.
    #[error("failed to parse {path}")]
    Parse {
        /// File that was read.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The weights decoded but failed validation.
    #[error("invalid category weights in {path}")]
    InvalidWeights {
        /// File that was read.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: CategoryWeightsError,
    },
}
