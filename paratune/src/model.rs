use std::fmt;

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use crate::execution::ExecutionConfig;
use crate::math;
use crate::predict::PredictError;

mod parallelism;

pub use parallelism::{Dop, Lop};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParallelismPoint {
    pub lop: Lop,
    pub dop: Dop,
}

impl ParallelismPoint {
    pub const fn new(lop: u32, dop: u32) -> Self {
        Self { lop: Lop::new(lop), dop: Dop::new(dop) }
    }
}

impl fmt::Display for ParallelismPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(lop:{}, dop:{})", self.lop, self.dop)
    }
}

/// Static inputs to a single parallelism prediction. Counts of zero are treated as one.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostInputs {
    /// Configured estimate of the stage's input size.
    pub data_size_bytes: f64,
    pub memory_budget_bytes: f64,
    pub total_cores: u32,
    pub total_executors: u32,

    /// Number of records the weighted candidate sample stands for (the sum of candidate weights).
    #[serde(default)]
    pub sample_records: f64,
}

impl CostInputs {
    pub fn new(
        data_size_bytes: f64, memory_budget_bytes: f64, total_cores: u32, total_executors: u32, sample_records: f64,
    ) -> Result<Self, PredictError> {
        Self {
            data_size_bytes,
            memory_budget_bytes,
            total_cores: total_cores.max(1),
            total_executors: total_executors.max(1),
            sample_records,
        }
        .check()
    }

    #[tracing::instrument(level = "debug", skip(config))]
    pub fn from_config(config: &dyn ExecutionConfig, sample_records: f64) -> Result<Self, PredictError> {
        let total_cores = config.total_cores().unwrap_or_else(|| {
            tracing::warn!("total cores not configured - defaulting to 1.");
            1
        });

        let total_executors = config.total_executors().unwrap_or_else(|| {
            tracing::warn!("total executors not configured - defaulting to 1.");
            1
        });

        Self::new(
            config.estimated_input_size_bytes(),
            config.memory_budget_bytes(),
            total_cores,
            total_executors,
            sample_records,
        )
    }

    pub fn check(self) -> Result<Self, PredictError> {
        if !math::is_positive_finite(self.memory_budget_bytes) {
            return Err(PredictError::invalid(
                "memory_budget_bytes",
                format!("must be positive and finite but was {}", self.memory_budget_bytes),
            ));
        }

        Self::check_non_negative("data_size_bytes", self.data_size_bytes)?;
        Self::check_non_negative("sample_records", self.sample_records)?;
        Ok(self)
    }

    fn check_non_negative(label: &str, value: f64) -> Result<f64, PredictError> {
        if !value.is_finite() || value < 0.0 {
            return Err(PredictError::invalid(
                label,
                format!("must be non-negative and finite but was {value}"),
            ));
        }

        Ok(value)
    }

    pub fn cores(&self) -> Dop {
        Dop::new(self.total_cores)
    }
}

/// Estimated cost of running a stage at one parallelism point.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub point: ParallelismPoint,

    /// Per-partition processing time, including the spill penalty once memory pressure passes
    /// the budget.
    pub round_cost: f64,

    /// `round_cost` normalized by the parallel capacity of the cluster.
    pub stage_cost: f64,

    /// Ratio of estimated memory demand to the memory budget.
    pub penalty: f64,
}

impl fmt::Display for CostEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[round:{:.3}, stage:{:.3}, penalty:{:.4}]",
            self.point, self.round_cost, self.stage_cost, self.penalty
        )
    }
}

impl AbsDiffEq for CostEstimate {
    type Epsilon = f64;

    #[inline]
    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        (self.point == other.point)
            && self.round_cost.abs_diff_eq(&other.round_cost, epsilon)
            && self.stage_cost.abs_diff_eq(&other.stage_cost, epsilon)
            && self.penalty.abs_diff_eq(&other.penalty, epsilon)
    }
}

impl RelativeEq for CostEstimate {
    #[inline]
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        (self.point == other.point)
            && self.round_cost.relative_eq(&other.round_cost, epsilon, max_relative)
            && self.stage_cost.relative_eq(&other.stage_cost, epsilon, max_relative)
            && self.penalty.relative_eq(&other.penalty, epsilon, max_relative)
    }
}
