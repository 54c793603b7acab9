//! `itinerary` command: turn a trip request into a day-by-day plan.

use std::io::Write;
use std::time::Duration;

use camino::Utf8PathBuf;
use capecod_core::{CompletionProvider, ItineraryDay, TripRequest};
use capecod_data::itinerary::{
    HttpCompletionProvider, HttpCompletionProviderConfig, ItineraryPlanner, trip_prompt,
};
use capecod_data::FsContentRepository;
use chrono::NaiveDate;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_API_KEY, ARG_BASE_URL, ARG_DATA_DIR, ARG_END_DATE, ARG_MODEL, ARG_START_DATE,
    ARG_TIMEOUT_SECS, CliError, ENV_END_DATE, ENV_START_DATE, data_dir_or_default, write_json,
    write_text,
};

/// CLI arguments for the `itinerary` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Describe each requested town from the content directory and \
                 ask an OpenAI-compatible chat completion service to write a \
                 day-by-day itinerary. The API key comes from --api-key, the \
                 layered configuration or OPENAI_API_KEY.",
    about = "Generate a trip itinerary"
)]
#[ortho_config(prefix = "CAPECOD")]
pub(crate) struct ItineraryArgs {
    /// First day of the trip (YYYY-MM-DD).
    #[arg(long = ARG_START_DATE, value_name = "date")]
    #[serde(default)]
    pub(crate) start_date: Option<NaiveDate>,
    /// Last day of the trip (YYYY-MM-DD).
    #[arg(long = ARG_END_DATE, value_name = "date")]
    #[serde(default)]
    pub(crate) end_date: Option<NaiveDate>,
    /// Town to visit; repeat or separate with commas.
    #[arg(long = "town", value_name = "name", value_delimiter = ',')]
    #[serde(default)]
    pub(crate) towns: Vec<String>,
    /// Preference such as "family friendly"; repeatable.
    #[arg(long = "preference", value_name = "text", value_delimiter = ',')]
    #[serde(default)]
    pub(crate) preferences: Vec<String>,
    /// Desired activity; repeatable.
    #[arg(long = "activity", value_name = "text", value_delimiter = ',')]
    #[serde(default)]
    pub(crate) activities: Vec<String>,
    /// Content directory.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// API key for the completion service.
    #[arg(long = ARG_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Base URL of the completion service.
    #[arg(long = ARG_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    /// Model name.
    #[arg(long = ARG_MODEL, value_name = "name")]
    #[serde(default)]
    pub(crate) model: Option<String>,
    /// Request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Print the prompt instead of calling the completion service.
    #[arg(long)]
    #[serde(default)]
    pub(crate) prompt_only: bool,
    /// Print JSON with the text and its day-by-day breakdown.
    #[arg(long)]
    #[serde(default)]
    pub(crate) json: bool,
}

impl ItineraryArgs {
    pub(crate) fn into_config(self) -> Result<ItineraryConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ItineraryConfig::try_from(merged)
    }
}

/// Resolved `itinerary` command configuration.
#[derive(Debug, Clone)]
pub(crate) struct ItineraryConfig {
    pub(crate) request: TripRequest,
    pub(crate) data_dir: Utf8PathBuf,
    pub(crate) completion: HttpCompletionProviderConfig,
    pub(crate) prompt_only: bool,
    pub(crate) json: bool,
}

impl TryFrom<ItineraryArgs> for ItineraryConfig {
    type Error = CliError;

    fn try_from(args: ItineraryArgs) -> Result<Self, Self::Error> {
        let start_date = args.start_date.ok_or(CliError::MissingArgument {
            field: ARG_START_DATE,
            env: ENV_START_DATE,
        })?;
        let end_date = args.end_date.ok_or(CliError::MissingArgument {
            field: ARG_END_DATE,
            env: ENV_END_DATE,
        })?;
        let request = TripRequest {
            preferences: args.preferences,
            activities: args.activities,
            towns: args.towns,
            ..TripRequest::new(start_date, end_date)
        };

        let mut completion = HttpCompletionProviderConfig::from_env();
        if let Some(api_key) = args.api_key {
            completion = completion.with_api_key(api_key);
        }
        if let Some(base_url) = args.base_url {
            completion.base_url = base_url;
        }
        if let Some(model) = args.model {
            completion = completion.with_model(model);
        }
        if let Some(secs) = args.timeout_secs {
            completion = completion.with_timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            request,
            data_dir: data_dir_or_default(args.data_dir),
            completion,
            prompt_only: args.prompt_only,
            json: args.json,
        })
    }
}

/// Builds a completion provider for the current invocation.
pub(crate) trait CompletionProviderBuilder {
    fn build(
        &self,
        config: &HttpCompletionProviderConfig,
    ) -> Result<Box<dyn CompletionProvider>, CliError>;
}

pub(crate) struct DefaultCompletionProviderBuilder;

impl CompletionProviderBuilder for DefaultCompletionProviderBuilder {
    fn build(
        &self,
        config: &HttpCompletionProviderConfig,
    ) -> Result<Box<dyn CompletionProvider>, CliError> {
        let provider = HttpCompletionProvider::with_config(config.clone()).map_err(|source| {
            CliError::BuildCompletionProvider {
                base_url: config.base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(provider))
    }
}

#[derive(Serialize)]
struct ItineraryOutput<'a> {
    itinerary: &'a str,
    days: Vec<ItineraryDay>,
}

pub(crate) fn run_itinerary_with(
    args: ItineraryArgs,
    builder: &dyn CompletionProviderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let repository = FsContentRepository::open(&config.data_dir)?;

    if config.prompt_only {
        let request = config
            .request
            .validate()
            .map_err(capecod_data::ItineraryError::from)?;
        let prompt = trip_prompt(&repository, &request);
        return if config.json {
            write_json(writer, &prompt)
        } else {
            write_text(
                writer,
                &format!("SYSTEM:\n{}\n\nUSER:\n{}", prompt.system, prompt.user),
            )
        };
    }

    let provider = builder.build(&config.completion)?;
    let planner = ItineraryPlanner::new(repository, provider);
    let itinerary = planner.plan(config.request)?;
    if config.json {
        write_json(
            writer,
            &ItineraryOutput {
                itinerary: &itinerary.text,
                days: itinerary.days(),
            },
        )
    } else {
        write_text(writer, &itinerary.text)
    }
}
