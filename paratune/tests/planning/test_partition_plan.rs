use std::collections::HashMap;

use claims::*;
use once_cell::sync::Lazy;
use paratune::error::MetricLabel;
use paratune::execution::StaticExecutionConfig;
use paratune::model::ParallelismPoint;
use paratune::partition::{select_boundaries, KeyOrdering, Sketch, PartitionSketch, WeightedCandidate};
use paratune::planner::{PartitionPlanner, PlanningError};
use paratune::settings::{ExecutionSettings, Settings};
use pretty_assertions::assert_eq;

use super::fixtures::*;

fn settings(execution: ExecutionSettings) -> Settings {
    Settings { execution, predictor: Default::default(), partition: Default::default() }
}

#[test]
fn test_plan_example_cluster() {
    Lazy::force(&paratune::logging::TEST_TRACING);
    let main_span = tracing::info_span!("test_plan_example_cluster");
    let _main_span_guard = main_span.enter();

    let mut config = example_config();
    let planner = PartitionPlanner::from_settings(&settings(cluster_settings(6.0e8, 8, 4)));

    let plan = assert_ok!(planner.plan(&mut config, uniform_sample(6_400, 1.0e6), PER_KEY_WEIGHT_BYTES));
    assert_eq!(plan.point, ParallelismPoint::new(64, 32));
    assert_eq!(config.published(), Some(plan.point));
    assert_eq!(plan.nr_partitions(), 64);

    let mut sizes: HashMap<usize, usize> = HashMap::new();
    for key in (0..6_400).map(|k| k * 10) {
        *sizes.entry(plan.partitioner.partition_for(&key)).or_default() += 1;
    }
    assert_eq!(sizes.len(), 64);
    assert!(sizes.values().all(|nr| *nr == 100), "{sizes:?}");
}

#[test]
fn test_boundaries_from_sketch_skip_duplicate_key() {
    Lazy::force(&paratune::logging::TEST_TRACING);
    let main_span = tracing::info_span!("test_boundaries_from_sketch_skip_duplicate_key");
    let _main_span_guard = main_span.enter();

    let sketch = Sketch {
        total_items: 40,
        partitions: vec![
            PartitionSketch { partition_id: 0, nr_items: 20, sample: vec![1_i64, 5] },
            PartitionSketch { partition_id: 1, nr_items: 20, sample: vec![5, 9] },
            PartitionSketch { partition_id: 2, nr_items: 0, sample: vec![] },
        ],
    };
    let candidates = sketch.into_candidates();
    assert_eq!(candidates.len(), 4);

    let boundaries = assert_ok!(select_boundaries(candidates, 3));
    assert_eq!(boundaries.as_slice(), &[5, 9]);
}

#[test]
fn test_plan_descending_explicit() {
    Lazy::force(&paratune::logging::TEST_TRACING);
    let main_span = tracing::info_span!("test_plan_descending_explicit");
    let _main_span_guard = main_span.enter();

    let execution = ExecutionSettings {
        explicit_partitions: Some(4),
        key_ordering: KeyOrdering::Descending,
        ..cluster_settings(6.0e8, 8, 4)
    };
    let mut config = StaticExecutionConfig::new(execution.clone());
    let planner = PartitionPlanner::from_settings(&settings(execution));

    let plan = assert_ok!(planner.plan(&mut config, uniform_sample(400, 400.0), PER_KEY_WEIGHT_BYTES));
    assert_eq!(plan.point, ParallelismPoint::new(4, 8));
    assert_none!(plan.prediction);
    assert_eq!(plan.partitioner.partition_for(&0), 3);
    assert_eq!(plan.partitioner.partition_for(&3_990), 0);

    let rep = assert_ok!(serde_json::to_value(&plan));
    assert_eq!(rep["point"], serde_json::json!({ "lop": 4, "dop": 8 }));
    assert_eq!(rep["partitioner"]["ordering"], serde_json::json!("descending"));
    assert_eq!(rep["partitioner"]["boundaries"].as_array().map(|b| b.len()), Some(3));
}

#[test]
fn test_plan_rejects_invalid_sample_without_publishing() {
    Lazy::force(&paratune::logging::TEST_TRACING);
    let main_span = tracing::info_span!("test_plan_rejects_invalid_sample_without_publishing");
    let _main_span_guard = main_span.enter();

    let mut config = example_config();
    let planner = PartitionPlanner::from_settings(&settings(cluster_settings(6.0e8, 8, 4)));
    let sample = vec![WeightedCandidate::new(1_i64, 1.0), WeightedCandidate::new(2, f64::NAN)];

    let err = assert_err!(planner.plan(&mut config, sample, PER_KEY_WEIGHT_BYTES));
    assert_matches!(err, PlanningError::Partition(_));
    assert_eq!(err.label().as_ref(), "planning::partition::invalid_weight");
    assert_none!(config.published());
}

#[test]
fn test_plan_without_sample_uses_configured_input_size() {
    Lazy::force(&paratune::logging::TEST_TRACING);
    let main_span = tracing::info_span!("test_plan_without_sample_uses_configured_input_size");
    let _main_span_guard = main_span.enter();

    let mut config = example_config();
    let planner = PartitionPlanner::from_settings(&settings(cluster_settings(6.0e8, 8, 4)));

    let plan = assert_ok!(planner.plan(&mut config, Vec::<WeightedCandidate<i64>>::new(), PER_KEY_WEIGHT_BYTES));
    assert_eq!(plan.point, ParallelismPoint::new(16, 8));
    assert_eq!(plan.nr_partitions(), 1);
    assert_eq!(config.published(), Some(plan.point));
}
