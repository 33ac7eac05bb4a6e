use either::{Either, Left};
use thiserror::Error;

use crate::error::MetricLabel;
use crate::SharedString;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictError {
    #[error("invalid configuration for {setting}: {reason}")]
    InvalidConfiguration { setting: String, reason: String },
}

impl PredictError {
    pub fn invalid(setting: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration { setting: setting.into(), reason: reason.into() }
    }
}

impl MetricLabel for PredictError {
    fn slug(&self) -> SharedString {
        "predict".into()
    }

    fn next(&self) -> Either<SharedString, Box<&dyn MetricLabel>> {
        match self {
            Self::InvalidConfiguration { .. } => Left("invalid_configuration".into()),
        }
    }
}
