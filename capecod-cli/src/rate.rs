//! `rate` command: score every beach and print the results as JSON.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use capecod_core::{CategoryWeights, ContentRepository};
use capecod_data::FsContentRepository;
use capecod_scorer::{RatedBeach, RatingCalculator, load_schema, load_weights, sort_by_rating};
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DATA_DIR, ARG_SCHEMA, ARG_WEIGHTS, CliError, DEFAULT_SCHEMA_FILE, data_dir_or_default,
    write_json,
};

/// CLI arguments for the `rate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Compute each beach's overall rating (0-100) by normalising \
                 its attribute ratings against the rating schema, averaging \
                 them per category and weighting the categories.",
    about = "Score every beach"
)]
#[ortho_config(prefix = "CAPECOD")]
pub(crate) struct RateArgs {
    /// Content directory containing `beaches.json`.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Rating schema; defaults to `rating_schema.json` in the data directory.
    #[arg(long = ARG_SCHEMA, value_name = "path")]
    #[serde(default)]
    pub(crate) schema: Option<Utf8PathBuf>,
    /// Category weights; the built-in weights are used when omitted.
    #[arg(long = ARG_WEIGHTS, value_name = "path")]
    #[serde(default)]
    pub(crate) weights: Option<Utf8PathBuf>,
    /// Sort by overall rating, highest first.
    #[arg(long)]
    #[serde(default)]
    pub(crate) sort: bool,
}

impl RateArgs {
    pub(crate) fn into_config(self) -> Result<RateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(RateConfig::from(merged))
    }
}

/// Resolved `rate` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RateConfig {
    pub(crate) data_dir: Utf8PathBuf,
    pub(crate) schema: Utf8PathBuf,
    pub(crate) weights: Option<Utf8PathBuf>,
    pub(crate) sort: bool,
}

impl From<RateArgs> for RateConfig {
    fn from(args: RateArgs) -> Self {
        let data_dir = data_dir_or_default(args.data_dir);
        let schema = args
            .schema
            .unwrap_or_else(|| data_dir.join(DEFAULT_SCHEMA_FILE));
        Self {
            data_dir,
            schema,
            weights: args.weights,
            sort: args.sort,
        }
    }
}

impl RateConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.schema, ARG_SCHEMA)?;
        if let Some(weights) = &self.weights {
            Self::require_existing(weights, ARG_WEIGHTS)?;
        }
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match capecod_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

pub(crate) fn run_rate(args: RateArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let rated = rate_beaches(&config)?;
    write_json(writer, &rated)
}

pub(crate) fn rate_beaches(config: &RateConfig) -> Result<Vec<RatedBeach>, CliError> {
    let repository = FsContentRepository::open(&config.data_dir)?;
    let beaches = repository.beaches()?;
    let schema = load_schema(&config.schema)?;
    let gaps: Vec<String> = beaches
        .iter()
        .filter_map(|beach| {
            schema
                .validate_beach(beach)
                .err()
                .map(|err| format!("{}: {err}", beach.id))
        })
        .collect();
    if !gaps.is_empty() {
        return Err(CliError::SchemaGaps {
            schema: config.schema.clone(),
            gaps,
        });
    }
    let weights = match &config.weights {
        Some(path) => load_weights(path)?,
        None => CategoryWeights::default(),
    };
    let calculator = RatingCalculator::new(schema, weights);
    let mut rated = calculator.rate_all(&beaches)?;
    if config.sort {
        sort_by_rating(&mut rated);
    }
    info!("rated {} beaches", rated.len());
    Ok(rated)
}
