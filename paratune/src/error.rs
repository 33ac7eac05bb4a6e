use either::{Either, Left, Right};
use thiserror::Error;

use crate::SharedString;

pub use crate::partition::PartitionError;
pub use crate::planner::PlanningError;
pub use crate::predict::PredictError;

/// Builds a stable, `::` separated label for an error, used to tag the error counter metric.
pub trait MetricLabel {
    fn slug(&self) -> SharedString;

    fn next(&self) -> Either<SharedString, Box<&dyn MetricLabel>>;

    fn label(&self) -> SharedString {
        match self.next() {
            Left(ending) => format!("{}::{}", self.slug(), ending).into(),
            Right(next) => format!("{}::{}", self.slug(), next.label()).into(),
        }
    }
}

/// Error variants related to configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    /// Error working with environment variable
    #[error("{0}")]
    Environment(#[from] std::env::VarError),

    /// Error in configuration settings.
    #[error(transparent)]
    Configuration(#[from] config::ConfigError),

    /// Loaded settings failed validation.
    #[error("invalid settings: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("unknown environment: {0}")]
    UnknownEnvironment(String),
}

impl MetricLabel for SettingsError {
    fn slug(&self) -> SharedString {
        "settings".into()
    }

    fn next(&self) -> Either<SharedString, Box<&dyn MetricLabel>> {
        match self {
            Self::Environment(_) => Left("environment".into()),
            Self::Configuration(_) => Left("configuration".into()),
            Self::Validation(_) => Left("validation".into()),
            Self::UnknownEnvironment(_) => Left("environment".into()),
        }
    }
}
