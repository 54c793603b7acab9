//! Loading rating configuration from JSON files.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use capecod_core::{CategoryWeights, RatingSchema};
use capecod_fs::read_utf8_file;
use log::debug;
use serde::de::DeserializeOwned;

use crate::LoadError;

/// Read a rating schema document, e.g. `beach-rating-schema.json`.
///
/// # Errors
/// Returns [`LoadError::Read`] when the file cannot be read and
/// [`LoadError::Parse`] when it is not a valid schema.
pub fn load_schema(path: &Utf8Path) -> Result<RatingSchema, LoadError> {
    let schema: RatingSchema = read_json(path)?;
    debug!("loaded {} schema entries from {path}", schema.len());
    Ok(schema)
}

/// Read and validate a category weights document.
///
/// # Errors
/// Returns [`LoadError::Read`] or [`LoadError::Parse`] for unreadable files
/// and [`LoadError::InvalidWeights`] when the weights fail validation.
pub fn load_weights(path: &Utf8Path) -> Result<CategoryWeights, LoadError> {
    let weights: CategoryWeights = read_json(path)?;
    weights
        .validate()
        .map_err(|source| LoadError::InvalidWeights {
            path: path.to_path_buf(),
            source,
        })
}

fn read_json<T: DeserializeOwned>(path: &Utf8Path) -> Result<T, LoadError> {
    let text = read_utf8_file(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
