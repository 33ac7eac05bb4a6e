use crate::math;
use crate::model::{CostEstimate, CostInputs, Lop, ParallelismPoint};

/// Analytic latency and memory-pressure model for one stage. A model only exists for a positive,
/// finite data size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CostModel {
    data_size: f64,
    memory_budget: f64,
    total_executors: f64,
}

impl CostModel {
    pub fn new(data_size: f64, inputs: &CostInputs) -> Option<Self> {
        if !math::is_positive_finite(data_size) || !math::is_positive_finite(inputs.memory_budget_bytes) {
            return None;
        }

        Some(Self {
            data_size,
            memory_budget: inputs.memory_budget_bytes,
            total_executors: f64::from(inputs.total_executors.max(1)),
        })
    }

    /// Estimates the bytes a stage works through from the sample: the records it stands for,
    /// their average size, and the per-record fan-out. `None` when the sample carries no signal.
    pub fn estimate_data_size(inputs: &CostInputs, per_key_weight_bytes: f64, record_fan_out: f64) -> Option<f64> {
        let data_size = inputs.sample_records * per_key_weight_bytes * record_fan_out;
        if math::is_positive_finite(data_size) {
            Some(data_size)
        } else {
            None
        }
    }

    /// Starting point of the search: one thread per configured core and enough partitions to fit
    /// the data in memory at that thread count, snapped to a power of two.
    pub fn seed(data_size: f64, inputs: &CostInputs) -> ParallelismPoint {
        let cal_dop = inputs.cores();
        let cal_lop = if math::is_positive_finite(data_size) {
            math::saturating_f64_to_u32(data_size * cal_dop.as_f64() / inputs.memory_budget_bytes)
        } else {
            1
        };

        ParallelismPoint { lop: Lop::new(math::nearest_power_of_two(cal_lop)), dop: cal_dop }
    }

    pub const fn data_size(&self) -> f64 {
        self.data_size
    }

    pub fn evaluate(&self, point: ParallelismPoint) -> CostEstimate {
        let ParallelismPoint { lop, dop } = point;
        let (lop_f, dop_f) = (lop.as_f64(), dop.as_f64());

        let per_partition = self.data_size / lop_f;
        let penalty = (self.data_size * dop_f) / (lop_f * self.memory_budget);
        let round_cost = if penalty < 1.0 { per_partition } else { per_partition * (1.0 + penalty) };
        let stage_cost = round_cost * lop_f / (dop_f * self.total_executors);

        CostEstimate { point, round_cost, stage_cost, penalty }
    }
}
