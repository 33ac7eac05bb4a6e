use once_cell::sync::Lazy;
use prometheus::IntGauge;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

mod boundaries;
mod candidate;
mod error;
mod range_partitioner;

pub use boundaries::{select_boundaries, total_weight, BoundarySet};
pub use candidate::{PartitionSketch, SamplePlan, Sketch, Sketcher, WeightedCandidate};
pub use error::PartitionError;
pub use range_partitioner::RangePartitioner;

/// Direction in which keys map onto partition indices.
#[derive(
    Debug, Display, Copy, Clone, PartialEq, Eq, Hash, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum KeyOrdering {
    Ascending,
    Descending,
}

impl Default for KeyOrdering {
    fn default() -> Self {
        Self::Ascending
    }
}

pub static PARTITION_BOUNDARY_COUNT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "partition_boundary_count",
        "Number of range partition boundaries most recently selected",
    )
    .expect("failed creating partition_boundary_count metric")
});
