use serde::{Deserialize, Serialize};

use crate::partition::KeyOrdering;

const DEFAULT_MEMORY_BUDGET_BYTES: f64 = 1024.0 * 1024.0 * 1024.0;

/// Snapshot of the host engine's execution configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSettings {
    pub memory_budget_bytes: f64,

    #[serde(default)]
    pub estimated_input_size_bytes: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cores: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_executors: Option<u32>,

    /// A user-supplied partition count takes precedence over predicted parallelism.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit_partitions: Option<i64>,

    #[serde(default)]
    pub key_ordering: KeyOrdering,
}

impl Default for ExecutionSettings {
    fn default() -> Self {
        Self {
            memory_budget_bytes: DEFAULT_MEMORY_BUDGET_BYTES,
            estimated_input_size_bytes: 0.0,
            total_cores: None,
            total_executors: None,
            explicit_partitions: None,
            key_ordering: KeyOrdering::default(),
        }
    }
}
