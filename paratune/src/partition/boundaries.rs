use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use super::{PartitionError, WeightedCandidate, PARTITION_BOUNDARY_COUNT};

/// Strictly increasing range partition cut-points. `n` boundaries describe `n + 1` partitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BoundarySet<K>(Vec<K>);

impl<K> Default for BoundarySet<K> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<K: Ord> BoundarySet<K> {
    pub fn new(boundaries: Vec<K>) -> Result<Self, PartitionError> {
        let out_of_order = boundaries.iter().tuple_windows().position(|(prior, next)| next <= prior);
        match out_of_order {
            None => Ok(Self(boundaries)),
            Some(pos) => Err(PartitionError::BoundariesNotIncreasing { index: pos + 1 }),
        }
    }
}

impl<K> BoundarySet<K> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn nr_partitions(&self) -> usize {
        self.0.len() + 1
    }

    pub fn as_slice(&self) -> &[K] {
        self.0.as_slice()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, K> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<K> {
        self.0
    }
}

impl<K: fmt::Display> fmt::Display for BoundarySet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

/// Sums the candidate weights, which must all be non-negative and finite.
pub fn total_weight<K>(candidates: &[WeightedCandidate<K>]) -> Result<f64, PartitionError> {
    match candidates.iter().find_position(|c| !c.weight.is_finite() || c.weight < 0.0) {
        Some((index, c)) => Err(PartitionError::InvalidWeight { index, weight: c.weight }),
        None => Ok(candidates.iter().map(|c| c.weight).sum()),
    }
}

/// Chooses up to `target_lop - 1` cut-points that split the weighted sample into partitions of
/// roughly equal weight. A key repeating the previous cut-point is passed over, so the result can
/// hold fewer boundaries than requested.
#[tracing::instrument(level = "debug", skip(candidates), fields(nr_candidates=%candidates.len()))]
pub fn select_boundaries<K: Ord>(
    candidates: Vec<WeightedCandidate<K>>, target_lop: u32,
) -> Result<BoundarySet<K>, PartitionError> {
    let total_weight = total_weight(&candidates)?;
    let target = target_lop.max(1);
    if candidates.is_empty() || target == 1 || total_weight <= 0.0 {
        tracing::debug!(%target, %total_weight, "no boundaries needed.");
        PARTITION_BOUNDARY_COUNT.set(0);
        return Ok(BoundarySet::default());
    }

    let mut ordered = candidates;
    ordered.sort_by(|lhs, rhs| lhs.key.cmp(&rhs.key));

    let nr_wanted = (target - 1) as usize;
    let step = total_weight / f64::from(target);
    let mut cumulative = 0.0;
    let mut boundaries: Vec<K> = Vec::with_capacity(nr_wanted);

    for WeightedCandidate { key, weight } in ordered {
        cumulative += weight;
        let next_target = step * (boundaries.len() + 1) as f64;
        let advances = boundaries.last().map_or(true, |prior| prior < &key);
        if next_target <= cumulative && advances {
            boundaries.push(key);
            if boundaries.len() == nr_wanted {
                break;
            }
        }
    }

    tracing::debug!(%step, nr_boundaries=%boundaries.len(), %nr_wanted, "selected partition boundaries.");
    PARTITION_BOUNDARY_COUNT.set(boundaries.len() as i64);
    Ok(BoundarySet(boundaries))
}
