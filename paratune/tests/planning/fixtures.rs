use paratune::execution::StaticExecutionConfig;
use paratune::partition::WeightedCandidate;
use paratune::settings::ExecutionSettings;

pub const PER_KEY_WEIGHT_BYTES: f64 = 500.0;

pub fn cluster_settings(memory_budget_bytes: f64, total_cores: u32, total_executors: u32) -> ExecutionSettings {
    ExecutionSettings {
        memory_budget_bytes,
        estimated_input_size_bytes: 1.0e9,
        total_cores: Some(total_cores),
        total_executors: Some(total_executors),
        ..ExecutionSettings::default()
    }
}

pub fn example_config() -> StaticExecutionConfig {
    StaticExecutionConfig::new(cluster_settings(6.0e8, 8, 4))
}

/// `nr_keys` distinct keys sharing `total_records` evenly.
pub fn uniform_sample(nr_keys: i64, total_records: f64) -> Vec<WeightedCandidate<i64>> {
    let weight = total_records / nr_keys as f64;
    (0..nr_keys).map(|k| WeightedCandidate::new(k * 10, weight)).collect()
}
