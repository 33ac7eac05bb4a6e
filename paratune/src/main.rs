use std::path::Path;

use anyhow::Context;
use clap::Parser;
use once_cell::sync::Lazy;
use paratune::execution::StaticExecutionConfig;
use paratune::partition::WeightedCandidate;
use paratune::planner::PartitionPlanner;
use paratune::settings::{CliOptions, Settings};
use paratune::{logging, metrics, Result};
use prometheus::Registry;

static METRICS_REGISTRY: Lazy<Registry> = Lazy::new(|| {
    Registry::new_custom(Some("paratune".to_string()), None).expect("failed to create prometheus registry")
});

fn main() -> Result<()> {
    let subscriber = logging::get_subscriber("paratune", "info", std::io::stderr);
    logging::init_subscriber(subscriber)?;

    let main_span = tracing::trace_span!("main");
    let _main_span_guard = main_span.enter();

    let options = CliOptions::parse();
    let settings = Settings::load(&options)?;
    metrics::register_metrics(&METRICS_REGISTRY)?;

    let candidates = match options.sample {
        Some(ref path) => load_sample(path)?,
        None => {
            tracing::warn!("no key sample given - planning from configured input size only.");
            Vec::new()
        },
    };

    let planner = PartitionPlanner::from_settings(&settings);
    let mut config = StaticExecutionConfig::new(settings.execution.clone());
    let plan = planner.plan(&mut config, candidates, options.per_key_weight_bytes)?;

    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

#[tracing::instrument(level = "info")]
fn load_sample(path: &Path) -> Result<Vec<WeightedCandidate<i64>>> {
    let rep = std::fs::read_to_string(path).with_context(|| format!("failed to read key sample: {path:?}"))?;
    let is_json = path.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

    let candidates: Vec<WeightedCandidate<i64>> = if is_json {
        serde_json::from_str(&rep).with_context(|| format!("failed to parse JSON key sample: {path:?}"))?
    } else {
        ron::from_str(&rep).with_context(|| format!("failed to parse RON key sample: {path:?}"))?
    };

    tracing::info!(nr_candidates=%candidates.len(), "loaded key sample.");
    Ok(candidates)
}
