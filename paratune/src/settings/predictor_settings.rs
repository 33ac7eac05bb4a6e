use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Tuned constants of the parallelism cost model and its local search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_feasible_band", skip_on_field_errors = false))]
#[serde(default)]
pub struct PredictorSettings {
    /// Per-record bookkeeping multiplier applied to sampled bytes (key and value objects).
    #[validate(range(min = 0.0))]
    pub record_fan_out: f64,

    /// Exclusive lower bound of a feasible memory penalty.
    pub feasible_penalty_floor: f64,

    /// Inclusive upper bound of a feasible memory penalty.
    pub feasible_penalty_ceiling: f64,

    #[validate(range(min = 1))]
    pub max_iterations: u32,

    /// Predicted level of parallelism above this, searched or not, is replaced by `clamp_lop`.
    #[validate(range(min = 1))]
    pub clamp_trigger_lop: u32,

    #[validate(range(min = 1))]
    pub clamp_lop: u32,
}

pub const DEFAULT_CLAMP_LOP: u32 = 128;

impl Default for PredictorSettings {
    fn default() -> Self {
        Self {
            record_fan_out: 2.0,
            feasible_penalty_floor: 0.1,
            feasible_penalty_ceiling: 1.0,
            max_iterations: 64,
            clamp_trigger_lop: DEFAULT_CLAMP_LOP * 8,
            clamp_lop: DEFAULT_CLAMP_LOP,
        }
    }
}

fn validate_feasible_band(settings: &PredictorSettings) -> Result<(), ValidationError> {
    let floor = settings.feasible_penalty_floor;
    let ceiling = settings.feasible_penalty_ceiling;
    if floor.is_finite() && ceiling.is_finite() && 0.0 <= floor && floor < ceiling {
        Ok(())
    } else {
        Err(ValidationError::new("feasible penalty band must satisfy 0 <= floor < ceiling"))
    }
}
