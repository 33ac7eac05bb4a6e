use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PartitionSettings {
    /// Sample keys to collect per target partition.
    #[validate(range(min = 1.0))]
    pub samples_per_partition: f64,

    /// Upper bound on the total number of sampled keys.
    #[validate(range(min = 1))]
    pub max_sample_size: usize,

    /// Over-sampling factor applied per source partition to absorb skew.
    #[validate(range(min = 1.0))]
    pub oversample_factor: f64,

    /// Boundary counts up to this size are searched linearly; larger sets use binary search.
    pub linear_search_threshold: usize,
}

impl Default for PartitionSettings {
    fn default() -> Self {
        Self {
            samples_per_partition: 20.0,
            max_sample_size: 1_000_000,
            oversample_factor: 3.0,
            linear_search_threshold: 128,
        }
    }
}
