//! Rating aggregation and filtering for Cape Cod beaches.
//!
//! The crate turns a beach's nested rating tree into a single weighted score
//! and selects beaches whose raw ratings satisfy a set of criteria:
//! - **Normalisation** rescales raw attribute values onto `0..=100` using the
//!   bounds recorded in a [`RatingSchema`](capecod_core::RatingSchema).
//!   Values are not clamped.
//! - **Aggregation** averages the normalised values within a category,
//!   flattening composite attributes so every sub-rating counts once.
//! - **Overall rating** weights the seven category scores with
//!   [`CategoryWeights`](capecod_core::CategoryWeights) and rounds the sum
//!   half-up to two decimals.
//! - **Filtering** compares raw values against
//!   [`Criteria`](capecod_core::Criteria), returning borrowed beaches in
//!   input order.
//!
//! Everything here is synchronous and free of I/O apart from the
//! [`load_schema`] and [`load_weights`] helpers.
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use capecod_scorer::{RatingCalculator, load_schema, load_weights};
//!
//! let schema = load_schema(Utf8Path::new("data/rating_schema.json")).expect("load schema");
//! let weights = load_weights(Utf8Path::new("data/weights.json")).expect("load weights");
//! let calculator = RatingCalculator::new(schema, weights);
//! # let _ = calculator;
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod aggregate;
mod calculator;
mod error;
mod filter;
mod load;
mod normalize;

pub use aggregate::aggregate_category;
pub use calculator::{RatedBeach, RatingCalculator, round_to_hundredths, sort_by_rating};
pub use error::{LoadError, RatingError};
pub use filter::{filter_beaches, meets_criterion};
pub use load::{load_schema, load_weights};
pub use normalize::{is_degenerate, normalize, within_range};
