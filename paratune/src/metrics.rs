use prometheus::Registry;

use crate::{partition, planner, predict, Result};

#[tracing::instrument(level = "trace")]
pub fn register_metrics(registry: &Registry) -> Result<()> {
    registry.register(Box::new(predict::PREDICTION_LEVEL_OF_PARALLELISM.clone()))?;
    registry.register(Box::new(predict::PREDICTION_DEGREE_OF_PARALLELISM.clone()))?;
    registry.register(Box::new(predict::PREDICTION_PENALTY.clone()))?;
    registry.register(Box::new(predict::PREDICTION_SEARCH_ITERATIONS.clone()))?;
    registry.register(Box::new(predict::PREDICTION_CLAMPED_COUNT.clone()))?;

    registry.register(Box::new(partition::PARTITION_BOUNDARY_COUNT.clone()))?;

    registry.register(Box::new(planner::PARATUNE_ERRORS.clone()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use claims::*;

    use super::*;

    #[test]
    fn test_register_metrics() {
        let registry = assert_ok!(Registry::new_custom(Some("test_paratune".to_string()), None));
        assert_ok!(register_metrics(&registry));

        let names: Vec<String> = registry.gather().into_iter().map(|family| family.get_name().to_string()).collect();
        assert!(names.iter().all(|name| name.starts_with("test_paratune_")), "{names:?}");

        assert_err!(register_metrics(&registry));
    }
}
