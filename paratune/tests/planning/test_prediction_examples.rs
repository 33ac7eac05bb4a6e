use approx::assert_relative_eq;
use claims::*;
use once_cell::sync::Lazy;
use paratune::model::{CostInputs, ParallelismPoint};
use paratune::predict::{ParallelismPredictor, Termination};
use paratune::settings::PredictorSettings;
use pretty_assertions::assert_eq;

use super::fixtures::PER_KEY_WEIGHT_BYTES;

#[test]
fn test_prediction_example_cluster() {
    Lazy::force(&paratune::logging::TEST_TRACING);
    let main_span = tracing::info_span!("test_prediction_example_cluster");
    let _main_span_guard = main_span.enter();

    let inputs = assert_ok!(CostInputs::new(1.0e9, 6.0e8, 8, 4, 1.0e6));
    let predictor = ParallelismPredictor::default();

    let first = assert_ok!(predictor.predict_outcome(&inputs, PER_KEY_WEIGHT_BYTES));
    let second = assert_ok!(predictor.predict_outcome(&inputs, PER_KEY_WEIGHT_BYTES));
    assert_eq!(first, second);

    assert_eq!(first.seed, ParallelismPoint::new(16, 8));
    assert_eq!(first.point, ParallelismPoint::new(64, 32));
    assert_eq!(first.iterations, 2);
    assert_eq!(first.termination, Termination::PenaltyRepeated);
    assert_relative_eq!(assert_some!(first.final_estimate).penalty, 1.0e9 * 32.0 / (64.0 * 6.0e8));
}

#[test]
fn test_prediction_across_clusters() {
    Lazy::force(&paratune::logging::TEST_TRACING);
    let main_span = tracing::info_span!("test_prediction_across_clusters");
    let _main_span_guard = main_span.enter();

    let predictor = ParallelismPredictor::default();
    // (sample records, memory budget, cores, executors) => point
    let cases = vec![
        ((1.0e3, 1.0e9, 8, 4), ParallelismPoint::new(4, 32)),
        ((5.0e6, 1.0e9, 1, 1), ParallelismPoint::new(16, 2)),
        ((2.0e7, 4.0e9, 16, 8), ParallelismPoint::new(256, 32)),
        ((1.0e9, 1.0e8, 4, 2), ParallelismPoint::new(128, 4)),
    ];

    for ((sample_records, memory, cores, executors), expected) in cases {
        let inputs = assert_ok!(CostInputs::new(0.0, memory, cores, executors, sample_records));
        let actual = assert_ok!(predictor.predict(&inputs, PER_KEY_WEIGHT_BYTES));
        assert_eq!((sample_records, memory, actual), (sample_records, memory, expected));
    }
}

#[test]
fn test_prediction_converges_within_small_cap() {
    Lazy::force(&paratune::logging::TEST_TRACING);
    let main_span = tracing::info_span!("test_prediction_converges_within_small_cap");
    let _main_span_guard = main_span.enter();

    let settings = PredictorSettings { max_iterations: 3, ..PredictorSettings::default() };
    let predictor = ParallelismPredictor::new(settings);
    let inputs = assert_ok!(CostInputs::new(1.0e9, 6.0e8, 8, 4, 1.0e6));

    let outcome = assert_ok!(predictor.predict_outcome(&inputs, PER_KEY_WEIGHT_BYTES));
    assert!(outcome.iterations <= 3);
    assert_eq!(outcome.point, ParallelismPoint::new(64, 32));
}
