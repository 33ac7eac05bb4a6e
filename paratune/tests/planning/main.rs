mod fixtures;
mod test_partition_plan;
mod test_prediction_examples;
mod test_task_state;
