//! `filter` command: list beaches whose raw ratings satisfy every criterion.

use std::io::Write;

use camino::Utf8PathBuf;
use capecod_core::{Constraint, ContentRepository, Criteria};
use capecod_data::FsContentRepository;
use capecod_scorer::filter_beaches;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{ARG_CRITERION, ARG_DATA_DIR, CliError, data_dir_or_default, write_json};

/// CLI arguments for the `filter` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Keep the beaches whose raw ratings satisfy every criterion. \
                 A criterion has the form category.attribute=SPEC where SPEC \
                 is a minimum (N), an inclusive range (N..M) or a one-sided \
                 range (N.. or ..M).",
    about = "Filter beaches by rating"
)]
#[ortho_config(prefix = "CAPECOD")]
pub(crate) struct FilterArgs {
    /// Content directory containing `beaches.json`.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Criterion such as `environmental_factors.water_quality=80`; repeatable.
    #[arg(long = ARG_CRITERION, value_name = "path=spec")]
    #[serde(default)]
    pub(crate) criterion: Vec<String>,
}

/// Resolved `filter` command configuration.
#[derive(Debug, Clone)]
pub(crate) struct FilterConfig {
    pub(crate) data_dir: Utf8PathBuf,
    pub(crate) criteria: Criteria,
}

impl FilterArgs {
    pub(crate) fn into_config(self) -> Result<FilterConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        FilterConfig::try_from(merged)
    }
}

impl TryFrom<FilterArgs> for FilterConfig {
    type Error = CliError;

    fn try_from(args: FilterArgs) -> Result<Self, Self::Error> {
        let pairs = args
            .criterion
            .iter()
            .map(|raw| parse_criterion(raw))
            .collect::<Result<Vec<_>, _>>()?;
        let criteria = Criteria::parse(pairs)?;
        Ok(Self {
            data_dir: data_dir_or_default(args.data_dir),
            criteria,
        })
    }
}

/// Split `path=spec` and parse the constraint.
pub(crate) fn parse_criterion(raw: &str) -> Result<(String, Constraint), CliError> {
    let invalid = |reason: &str| CliError::InvalidArgument {
        field: ARG_CRITERION,
        value: raw.to_owned(),
        reason: reason.to_owned(),
    };
    let (path, spec) = raw
        .split_once('=')
        .ok_or_else(|| invalid("expected category.attribute=SPEC"))?;
    let constraint = parse_constraint(spec.trim()).map_err(|reason| invalid(&reason))?;
    Ok((path.trim().to_owned(), constraint))
}

fn parse_constraint(spec: &str) -> Result<Constraint, String> {
    let Some((low, high)) = spec.split_once("..") else {
        return parse_bound(spec).map(Constraint::Minimum);
    };
    let min = parse_optional_bound(low)?;
    let max = parse_optional_bound(high)?;
    if min.is_none() && max.is_none() {
        return Err("a range needs at least one bound".to_owned());
    }
    Ok(Constraint::Range { min, max })
}

fn parse_optional_bound(raw: &str) -> Result<Option<f64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        parse_bound(trimmed).map(Some)
    }
}

fn parse_bound(raw: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| format!("{raw:?} is not a number"))
}

pub(crate) fn run_filter(args: FilterArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let repository = FsContentRepository::open(&config.data_dir)?;
    let beaches = repository.beaches()?;
    let matching = filter_beaches(&beaches, &config.criteria);
    info!(
        "{} of {} beaches matched {} criteria",
        matching.len(),
        beaches.len(),
        config.criteria.len()
    );
    write_json(writer, &matching)
}
