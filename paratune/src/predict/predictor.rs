use serde::{Deserialize, Serialize};

use super::search::{self, FeasibleBand, Termination};
use super::{
    CostModel, PredictError, PREDICTION_CLAMPED_COUNT, PREDICTION_DEGREE_OF_PARALLELISM, PREDICTION_LEVEL_OF_PARALLELISM,
    PREDICTION_PENALTY, PREDICTION_SEARCH_ITERATIONS,
};
use crate::model::{CostEstimate, CostInputs, Lop, ParallelismPoint};
use crate::settings::PredictorSettings;

/// How a prediction arrived at its point.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutcome {
    pub point: ParallelismPoint,
    pub seed: ParallelismPoint,
    pub iterations: u32,
    pub termination: Termination,

    /// Whether the searched, or unsearched seed, level of parallelism was replaced by the safety bound.
    pub clamped: bool,

    /// Estimate at which the search stopped, before any clamp. `None` when the search was skipped.
    pub final_estimate: Option<CostEstimate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParallelismPredictor {
    settings: PredictorSettings,
    band: FeasibleBand,
}

impl Default for ParallelismPredictor {
    fn default() -> Self {
        Self::new(PredictorSettings::default())
    }
}

impl ParallelismPredictor {
    pub const fn new(settings: PredictorSettings) -> Self {
        let band = FeasibleBand::from_settings(&settings);
        Self { settings, band }
    }

    pub const fn settings(&self) -> &PredictorSettings {
        &self.settings
    }

    pub fn predict(&self, inputs: &CostInputs, per_key_weight_bytes: f64) -> Result<ParallelismPoint, PredictError> {
        self.predict_outcome(inputs, per_key_weight_bytes).map(|outcome| outcome.point)
    }

    #[tracing::instrument(level = "info", skip(self))]
    pub fn predict_outcome(
        &self, inputs: &CostInputs, per_key_weight_bytes: f64,
    ) -> Result<PredictionOutcome, PredictError> {
        let inputs = inputs.check()?;
        if !per_key_weight_bytes.is_finite() || per_key_weight_bytes < 0.0 {
            return Err(PredictError::invalid(
                "per_key_weight_bytes",
                format!("must be non-negative and finite but was {per_key_weight_bytes}"),
            ));
        }

        let model = CostModel::estimate_data_size(&inputs, per_key_weight_bytes, self.settings.record_fan_out)
            .and_then(|data_size| CostModel::new(data_size, &inputs));

        let outcome = match model {
            None => {
                let seed = CostModel::seed(inputs.data_size_bytes, &inputs);
                tracing::info!(%seed, "no data size signal in sample - using seed without search.");
                let (point, clamped) = self.clamp(seed, &inputs);
                PredictionOutcome {
                    point,
                    seed,
                    iterations: 0,
                    termination: Termination::NoSignal,
                    clamped,
                    final_estimate: None,
                }
            },

            Some(model) => {
                let seed = CostModel::seed(model.data_size(), &inputs);
                tracing::debug!(data_size=%model.data_size(), %seed, "searching for parallelism.");
                let (state, termination) = search::search(&model, &self.band, seed, self.settings.max_iterations);
                let (point, clamped) = self.clamp(state.current.point, &inputs);
                PredictionOutcome {
                    point,
                    seed,
                    iterations: state.iterations,
                    termination,
                    clamped,
                    final_estimate: Some(state.current),
                }
            },
        };

        tracing::info!(
            point=%outcome.point, iterations=%outcome.iterations, termination=%outcome.termination,
            clamped=%outcome.clamped, "predicted parallelism."
        );
        track_outcome(&outcome);
        Ok(outcome)
    }

    fn clamp(&self, point: ParallelismPoint, inputs: &CostInputs) -> (ParallelismPoint, bool) {
        if point.lop.as_u32() <= self.settings.clamp_trigger_lop {
            return (point, false);
        }

        let clamped = ParallelismPoint { lop: Lop::new(self.settings.clamp_lop), dop: inputs.cores() };
        tracing::warn!(
            unclamped=%point, %clamped, trigger=%self.settings.clamp_trigger_lop,
            "level of parallelism exceeds safety bound - clamping."
        );
        (clamped, true)
    }
}

fn track_outcome(outcome: &PredictionOutcome) {
    PREDICTION_LEVEL_OF_PARALLELISM.set(i64::from(outcome.point.lop));
    PREDICTION_DEGREE_OF_PARALLELISM.set(i64::from(outcome.point.dop));
    PREDICTION_SEARCH_ITERATIONS.observe(f64::from(outcome.iterations));
    if let Some(estimate) = outcome.final_estimate {
        PREDICTION_PENALTY.set(estimate.penalty);
    }
    if outcome.clamped {
        PREDICTION_CLAMPED_COUNT.inc();
    }
}
