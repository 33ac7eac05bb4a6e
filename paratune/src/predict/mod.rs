use once_cell::sync::Lazy;
use prometheus::{Gauge, Histogram, HistogramOpts, IntCounter, IntGauge};

mod cost;
mod error;
mod predictor;
pub mod search;

pub use cost::CostModel;
pub use error::PredictError;
pub use predictor::{ParallelismPredictor, PredictionOutcome};
pub use search::{FeasibleBand, Termination};

pub static PREDICTION_LEVEL_OF_PARALLELISM: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "prediction_level_of_parallelism",
        "Most recently predicted level of parallelism (number of partitions)",
    )
    .expect("failed creating prediction_level_of_parallelism metric")
});

pub static PREDICTION_DEGREE_OF_PARALLELISM: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "prediction_degree_of_parallelism",
        "Most recently predicted degree of parallelism (threads per executor)",
    )
    .expect("failed creating prediction_degree_of_parallelism metric")
});

pub static PREDICTION_PENALTY: Lazy<Gauge> = Lazy::new(|| {
    Gauge::new(
        "prediction_penalty",
        "Memory pressure ratio of the most recently chosen parallelism point",
    )
    .expect("failed creating prediction_penalty metric")
});

pub static PREDICTION_SEARCH_ITERATIONS: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "prediction_search_iterations",
            "Number of local search steps taken per prediction",
        )
        .buckets(vec![0.0, 1.0, 2.0, 3.0, 4.0, 6.0, 8.0, 16.0, 32.0, 64.0]),
    )
    .expect("failed creating prediction_search_iterations metric")
});

pub static PREDICTION_CLAMPED_COUNT: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "prediction_clamped_count",
        "Number of predictions whose level of parallelism was clamped back to the safety bound",
    )
    .expect("failed creating prediction_clamped_count metric")
});
