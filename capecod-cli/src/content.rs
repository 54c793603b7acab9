//! `show`, `search` and `town` commands over the content directory.

use std::io::Write;
use std::str::FromStr;

use camino::Utf8PathBuf;
use capecod_core::{ContentKind, ContentRepository};
use capecod_data::FsContentRepository;
use clap::Parser;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DATA_DIR, ARG_ID, ARG_KIND, ARG_QUERY, ARG_TOWN_NAME, CliError, ENV_SEARCH_QUERY,
    ENV_SHOW_ID, ENV_SHOW_KIND, ENV_TOWN_NAME, data_dir_or_default, write_json,
};

/// CLI arguments for the `show` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Print one content entry by kind and id")]
#[ortho_config(prefix = "CAPECOD")]
pub(crate) struct ShowArgs {
    /// One of towns, beaches, attractions or food-and-drink.
    #[arg(value_name = "kind")]
    #[serde(default)]
    pub(crate) kind: Option<String>,
    /// Identifier of the entry.
    #[arg(value_name = "id")]
    #[serde(default)]
    pub(crate) id: Option<String>,
    /// Content directory.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
}

/// CLI arguments for the `search` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Search names and descriptions, case-insensitively")]
#[ortho_config(prefix = "CAPECOD")]
pub(crate) struct SearchArgs {
    /// Text to look for.
    #[arg(value_name = "query")]
    #[serde(default)]
    pub(crate) query: Option<String>,
    /// Restrict the search to one kind.
    #[arg(long = ARG_KIND, value_name = "kind")]
    #[serde(default)]
    pub(crate) kind: Option<String>,
    /// Content directory.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
}

/// CLI arguments for the `town` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Print a town's information, activities, beaches and food")]
#[ortho_config(prefix = "CAPECOD")]
pub(crate) struct TownArgs {
    /// Town name, matched case-insensitively against `towns/<name>/`.
    #[arg(value_name = "name")]
    #[serde(default)]
    pub(crate) name: Option<String>,
    /// Content directory.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
}

/// Resolved `show` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ShowConfig {
    pub(crate) data_dir: Utf8PathBuf,
    pub(crate) kind: ContentKind,
    pub(crate) id: String,
}

/// Resolved `search` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchConfig {
    pub(crate) data_dir: Utf8PathBuf,
    pub(crate) query: String,
    pub(crate) kind: Option<ContentKind>,
}

/// Resolved `town` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TownConfig {
    pub(crate) data_dir: Utf8PathBuf,
    pub(crate) name: String,
}

fn parse_kind(raw: &str) -> Result<ContentKind, CliError> {
    ContentKind::from_str(raw).map_err(|reason| CliError::InvalidArgument {
        field: ARG_KIND,
        value: raw.to_owned(),
        reason,
    })
}

impl TryFrom<ShowArgs> for ShowConfig {
    type Error = CliError;

    fn try_from(args: ShowArgs) -> Result<Self, Self::Error> {
        let kind = args.kind.ok_or(CliError::MissingArgument {
            field: ARG_KIND,
            env: ENV_SHOW_KIND,
        })?;
        let id = args.id.ok_or(CliError::MissingArgument {
            field: ARG_ID,
            env: ENV_SHOW_ID,
        })?;
        Ok(Self {
            data_dir: data_dir_or_default(args.data_dir),
            kind: parse_kind(&kind)?,
            id,
        })
    }
}

impl TryFrom<SearchArgs> for SearchConfig {
    type Error = CliError;

    fn try_from(args: SearchArgs) -> Result<Self, Self::Error> {
        let query = args.query.ok_or(CliError::MissingArgument {
            field: ARG_QUERY,
            env: ENV_SEARCH_QUERY,
        })?;
        Ok(Self {
            data_dir: data_dir_or_default(args.data_dir),
            query,
            kind: args.kind.as_deref().map(parse_kind).transpose()?,
        })
    }
}

impl TryFrom<TownArgs> for TownConfig {
    type Error = CliError;

    fn try_from(args: TownArgs) -> Result<Self, Self::Error> {
        let name = args.name.ok_or(CliError::MissingArgument {
            field: ARG_TOWN_NAME,
            env: ENV_TOWN_NAME,
        })?;
        Ok(Self {
            data_dir: data_dir_or_default(args.data_dir),
            name,
        })
    }
}

pub(crate) fn run_show(args: ShowArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let config = ShowConfig::try_from(merged)?;
    let repository = FsContentRepository::open(&config.data_dir)?;
    let item = repository
        .get(config.kind, &config.id)?
        .ok_or_else(|| CliError::NotFound {
            kind: config.kind,
            id: config.id.clone(),
        })?;
    write_json(writer, &item)
}

pub(crate) fn run_search(args: SearchArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let config = SearchConfig::try_from(merged)?;
    let repository = FsContentRepository::open(&config.data_dir)?;
    let hits = repository.search(&config.query, config.kind)?;
    debug!("search for {:?} returned {} hits", config.query, hits.len());
    write_json(writer, &hits)
}

pub(crate) fn run_town(args: TownArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let config = TownConfig::try_from(merged)?;
    let repository = FsContentRepository::open(&config.data_dir)?;
    let bundle = repository.town_bundle(&config.name.to_lowercase())?;
    write_json(writer, &bundle)
}
