use either::{Either, Left, Right};
use once_cell::sync::Lazy;
use prometheus::{IntCounterVec, Opts};
use serde::Serialize;
use thiserror::Error;

use crate::error::MetricLabel;
use crate::execution::ExecutionConfig;
use crate::model::{CostInputs, Dop, Lop, ParallelismPoint};
use crate::partition::{self, PartitionError, RangePartitioner, WeightedCandidate};
use crate::predict::{ParallelismPredictor, PredictError, PredictionOutcome};
use crate::settings::{PartitionSettings, Settings};
use crate::SharedString;

#[derive(Debug, Error)]
pub enum PlanningError {
    #[error("{0}")]
    Predict(#[from] PredictError),

    #[error("{0}")]
    Partition(#[from] PartitionError),

    #[error("invalid configuration for {setting}: {reason}")]
    InvalidConfiguration { setting: String, reason: String },
}

impl MetricLabel for PlanningError {
    fn slug(&self) -> SharedString {
        "planning".into()
    }

    fn next(&self) -> Either<SharedString, Box<&dyn MetricLabel>> {
        match self {
            Self::Predict(err) => Right(Box::new(err)),
            Self::Partition(err) => Right(Box::new(err)),
            Self::InvalidConfiguration { .. } => Left("invalid_configuration".into()),
        }
    }
}

pub static PARATUNE_ERRORS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("paratune_errors", "Number of errors planning stage parallelism and partitions"),
        &["action", "error_type"],
    )
    .expect("failed creating paratune_errors metric")
});

#[inline]
pub(crate) fn track_errors(action: &str, error: &PlanningError) {
    PARATUNE_ERRORS.with_label_values(&[action, error.label().as_ref()]).inc()
}

/// Parallelism and range partitioning chosen for one stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionPlan<K> {
    pub point: ParallelismPoint,
    pub partitioner: RangePartitioner<K>,

    /// `None` when an explicit partition count bypassed prediction.
    pub prediction: Option<PredictionOutcome>,
}

impl<K: Ord> PartitionPlan<K> {
    pub fn nr_partitions(&self) -> usize {
        self.partitioner.nr_partitions()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartitionPlanner {
    predictor: ParallelismPredictor,
    partition: PartitionSettings,
}

impl PartitionPlanner {
    pub const fn new(predictor: ParallelismPredictor, partition: PartitionSettings) -> Self {
        Self { predictor, partition }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            ParallelismPredictor::new(settings.predictor.clone()),
            settings.partition.clone(),
        )
    }

    /// Decides the parallelism of a stage and the range boundaries to go with it. The chosen point
    /// is published back to `config` only once the whole plan succeeds.
    #[tracing::instrument(level = "info", skip(self, config, candidates), fields(nr_candidates=%candidates.len()))]
    pub fn plan<K: Ord>(
        &self, config: &mut dyn ExecutionConfig, candidates: Vec<WeightedCandidate<K>>, per_key_weight_bytes: f64,
    ) -> Result<PartitionPlan<K>, PlanningError> {
        let result = self.do_plan(&*config, candidates, per_key_weight_bytes);
        match result {
            Ok(plan) => {
                config.publish_parallelism(plan.point);
                tracing::info!(
                    point=%plan.point, nr_partitions=%plan.nr_partitions(),
                    "published partition plan."
                );
                Ok(plan)
            },
            Err(err) => {
                tracing::error!(error=?err, "failed to plan partitions.");
                track_errors("plan", &err);
                Err(err)
            },
        }
    }

    fn do_plan<K: Ord>(
        &self, config: &dyn ExecutionConfig, candidates: Vec<WeightedCandidate<K>>, per_key_weight_bytes: f64,
    ) -> Result<PartitionPlan<K>, PlanningError> {
        let (point, prediction) = match Self::explicit_point(config)? {
            Some(point) => {
                tracing::info!(%point, "explicit partition count configured - skipping prediction.");
                (point, None)
            },
            None => {
                let sample_records = partition::total_weight(&candidates)?;
                let inputs = CostInputs::from_config(config, sample_records)?;
                let outcome = self.predictor.predict_outcome(&inputs, per_key_weight_bytes)?;
                (outcome.point, Some(outcome))
            },
        };

        let boundaries = partition::select_boundaries(candidates, point.lop.as_u32())?;
        let partitioner = RangePartitioner::new(boundaries, config.key_ordering())
            .with_linear_search_threshold(self.partition.linear_search_threshold);

        Ok(PartitionPlan { point, partitioner, prediction })
    }

    fn explicit_point(config: &dyn ExecutionConfig) -> Result<Option<ParallelismPoint>, PlanningError> {
        let explicit = match config.explicit_partitions() {
            None => return Ok(None),
            Some(nr) => nr,
        };

        if explicit < 0 {
            return Err(PlanningError::InvalidConfiguration {
                setting: "explicit_partitions".to_string(),
                reason: format!("must not be negative but was {explicit}"),
            });
        }

        let lop = Lop::new(u32::try_from(explicit).unwrap_or(u32::MAX));
        let dop = Dop::new(config.total_cores().unwrap_or(1));
        Ok(Some(ParallelismPoint { lop, dop }))
    }
}
