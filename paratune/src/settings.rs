use std::path::PathBuf;

use clap::Parser;
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use validator::Validate;

pub use crate::error::SettingsError;

mod execution_settings;
mod partition_settings;
mod predictor_settings;

pub use execution_settings::*;
pub use partition_settings::*;
pub use predictor_settings::*;

const RESOURCES_DIR: &str = "./resources";
const APP_CONFIG: &str = "application";
const ENV_PREFIX: &str = "APP";
const ENV_SEPARATOR: &str = "__";
const APP_ENVIRONMENT: &str = "APP_ENVIRONMENT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Settings {
    pub execution: ExecutionSettings,
    #[serde(default)]
    #[validate]
    pub predictor: PredictorSettings,
    #[serde(default)]
    #[validate]
    pub partition: PartitionSettings,
}

#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Local,
    Production,
}

impl AppEnvironment {
    pub fn from_env() -> Result<Self, SettingsError> {
        match std::env::var(APP_ENVIRONMENT) {
            Ok(rep) => rep.parse().map_err(|_| SettingsError::UnknownEnvironment(rep)),
            Err(std::env::VarError::NotPresent) => Ok(Self::Local),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Parser, Clone, Debug, Default, PartialEq)]
#[clap(author, version, about)]
pub struct CliOptions {
    /// override environment-based configuration file to load.
    /// Default behavior is to load configuration based on `APP_ENVIRONMENT` envvar.
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    #[clap(short, long)]
    pub environment: Option<AppEnvironment>,

    /// Override default location from which to load configuration files. Default directory is
    /// ./resources.
    #[clap(short, long)]
    pub resources: Option<PathBuf>,

    /// Override the configured number of cores per executor.
    #[clap(long)]
    pub total_cores: Option<u32>,

    /// Override the configured number of executors.
    #[clap(long)]
    pub total_executors: Option<u32>,

    /// Override the configured memory budget in bytes.
    #[clap(long)]
    pub memory_budget_bytes: Option<f64>,

    /// Weighted key sample (RON or JSON list of `{ key, weight }`) to plan partitions for.
    #[clap(short, long)]
    pub sample: Option<PathBuf>,

    /// Average number of bytes each sampled record represents.
    #[clap(short, long, default_value_t = 1.0)]
    pub per_key_weight_bytes: f64,
}

impl CliOptions {
    fn load_overrides(
        &self, config: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, SettingsError> {
        let config = match self.total_cores {
            None => config,
            Some(cores) => config.set_override("execution.total_cores", i64::from(cores))?,
        };

        let config = match self.total_executors {
            None => config,
            Some(executors) => config.set_override("execution.total_executors", i64::from(executors))?,
        };

        let config = match self.memory_budget_bytes {
            None => config,
            Some(budget) => config.set_override("execution.memory_budget_bytes", budget)?,
        };

        Ok(config)
    }
}

impl Settings {
    #[tracing::instrument(level = "info")]
    pub fn load(options: &CliOptions) -> Result<Self, SettingsError> {
        let resources = options.resources.clone().unwrap_or_else(|| PathBuf::from(RESOURCES_DIR));
        let environment = match options.environment {
            Some(env) => env,
            None => AppEnvironment::from_env()?,
        };
        tracing::info!(?resources, %environment, "loading settings.");

        let mut builder = config::Config::builder()
            .add_source(config::File::from(resources.join(APP_CONFIG)).required(false))
            .add_source(config::File::from(resources.join(environment.to_string())).required(false));

        if let Some(ref path) = options.config {
            builder = builder.add_source(config::File::from(path.clone()));
        }

        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR));
        let settings: Self = options.load_overrides(builder)?.build()?.try_deserialize()?;
        settings.validate()?;
        tracing::debug!(?settings, "settings loaded.");
        Ok(settings)
    }
}
