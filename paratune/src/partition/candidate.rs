use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::PartitionError;
use crate::settings::PartitionSettings;

/// A sampled key and the number of records it stands for (the inverse of its sampling
/// probability).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedCandidate<K> {
    pub key: K,
    pub weight: f64,
}

impl<K> WeightedCandidate<K> {
    pub const fn new(key: K, weight: f64) -> Self {
        Self { key, weight }
    }
}

/// Sizing of a key sample for a target number of partitions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplePlan {
    pub sample_size: usize,
    pub per_partition: usize,
}

impl SamplePlan {
    /// Collects `samples_per_partition` keys per target partition, up to `max_sample_size`, and
    /// over-samples each source partition by `oversample_factor`. Zero counts are treated as one.
    pub fn for_target(target_partitions: u32, nr_source_partitions: usize, settings: &PartitionSettings) -> Self {
        let target = f64::from(target_partitions.max(1));
        let nr_sources = nr_source_partitions.max(1) as f64;

        let sample_size = (settings.samples_per_partition * target).min(settings.max_sample_size as f64);
        let per_partition = (settings.oversample_factor * sample_size / nr_sources).ceil();

        Self {
            sample_size: sample_size.ceil().to_usize().unwrap_or(settings.max_sample_size),
            per_partition: per_partition.to_usize().unwrap_or(usize::MAX).max(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionSketch<K> {
    pub partition_id: usize,
    pub nr_items: u64,
    pub sample: Vec<K>,
}

/// Per-source-partition reservoir samples with item counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sketch<K> {
    pub total_items: u64,
    pub partitions: Vec<PartitionSketch<K>>,
}

impl<K> Sketch<K> {
    /// Weights each sampled key by its source partition's item count over that partition's sample
    /// size. Partitions with an empty sample contribute nothing.
    pub fn into_candidates(self) -> Vec<WeightedCandidate<K>> {
        self.partitions
            .into_iter()
            .filter(|p| !p.sample.is_empty())
            .flat_map(|p| {
                let weight = p.nr_items as f64 / p.sample.len() as f64;
                p.sample.into_iter().map(move |key| WeightedCandidate::new(key, weight))
            })
            .collect()
    }
}

/// Sampling collaborator that sketches the source data of a stage.
pub trait Sketcher<K> {
    fn nr_source_partitions(&self) -> usize;

    fn sketch(&self, per_partition: usize) -> Result<Sketch<K>, PartitionError>;

    #[tracing::instrument(level = "debug", skip(self, settings))]
    fn candidates(
        &self, target_partitions: u32, settings: &PartitionSettings,
    ) -> Result<Vec<WeightedCandidate<K>>, PartitionError> {
        let plan = SamplePlan::for_target(target_partitions, self.nr_source_partitions(), settings);
        let sketch = self.sketch(plan.per_partition)?;
        tracing::debug!(?plan, total_items=%sketch.total_items, "sketched source partitions.");
        Ok(sketch.into_candidates())
    }
}
