use crate::model::ParallelismPoint;
use crate::partition::KeyOrdering;
use crate::settings::ExecutionSettings;

/// Configuration provider of the host execution engine. Reads are snapshots for the duration of a
/// single planning decision; the chosen parallelism is published back once planning succeeds.
pub trait ExecutionConfig {
    fn memory_budget_bytes(&self) -> f64;

    fn total_executors(&self) -> Option<u32>;

    fn total_cores(&self) -> Option<u32>;

    fn estimated_input_size_bytes(&self) -> f64;

    /// User-supplied partition count, which overrides prediction when present.
    fn explicit_partitions(&self) -> Option<i64> {
        None
    }

    fn key_ordering(&self) -> KeyOrdering {
        KeyOrdering::Ascending
    }

    fn publish_parallelism(&mut self, point: ParallelismPoint);
}

/// Configuration provider backed by loaded settings. Remembers the last published parallelism.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticExecutionConfig {
    settings: ExecutionSettings,
    published: Option<ParallelismPoint>,
}

impl StaticExecutionConfig {
    pub const fn new(settings: ExecutionSettings) -> Self {
        Self { settings, published: None }
    }

    pub const fn published(&self) -> Option<ParallelismPoint> {
        self.published
    }
}

impl ExecutionConfig for StaticExecutionConfig {
    fn memory_budget_bytes(&self) -> f64 {
        self.settings.memory_budget_bytes
    }

    fn total_executors(&self) -> Option<u32> {
        self.settings.total_executors
    }

    fn total_cores(&self) -> Option<u32> {
        self.settings.total_cores
    }

    fn estimated_input_size_bytes(&self) -> f64 {
        self.settings.estimated_input_size_bytes
    }

    fn explicit_partitions(&self) -> Option<i64> {
        self.settings.explicit_partitions
    }

    fn key_ordering(&self) -> KeyOrdering {
        self.settings.key_ordering
    }

    #[tracing::instrument(level = "info", skip(self))]
    fn publish_parallelism(&mut self, point: ParallelismPoint) {
        if let Some(prior) = self.published.replace(point) {
            tracing::debug!(%prior, "replacing previously published parallelism.");
        }
    }
}
