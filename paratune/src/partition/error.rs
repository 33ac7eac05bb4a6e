use either::{Either, Left};
use thiserror::Error;

use crate::error::MetricLabel;
use crate::SharedString;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PartitionError {
    #[error("candidate #{index} has invalid weight {weight}: weights must be non-negative and finite")]
    InvalidWeight { index: usize, weight: f64 },

    #[error("boundary #{index} does not strictly increase over its predecessor")]
    BoundariesNotIncreasing { index: usize },

    #[error("failed to sketch source partitions: {0}")]
    Sketch(String),
}

impl MetricLabel for PartitionError {
    fn slug(&self) -> SharedString {
        "partition".into()
    }

    fn next(&self) -> Either<SharedString, Box<&dyn MetricLabel>> {
        match self {
            Self::InvalidWeight { .. } => Left("invalid_weight".into()),
            Self::BoundariesNotIncreasing { .. } => Left("boundaries_not_increasing".into()),
            Self::Sketch(_) => Left("sketch".into()),
        }
    }
}
