use claims::*;
use paratune::task_state::{ResourceManagerTaskState, TaskState, TASK_STATES};
use pretty_assertions::assert_eq;

#[test]
fn test_task_state_round_trip_through_resource_manager() {
    let reported = vec!["TASK_STAGING", "TASK_RUNNING", "TASK_ERROR", "TASK_KILLED"];
    let actual: Vec<TaskState> = reported
        .into_iter()
        .map(|rep| TaskState::from(assert_ok!(rep.parse::<ResourceManagerTaskState>())))
        .collect();

    assert_eq!(
        actual,
        vec![TaskState::Launching, TaskState::Running, TaskState::Lost, TaskState::Killed]
    );
    assert!(actual[2].is_failed());
    assert!(actual[2].is_finished());
}

#[test]
fn test_spill_states_report_running() {
    let spilling: Vec<_> = TASK_STATES
        .into_iter()
        .filter(|s| ResourceManagerTaskState::from(*s) == ResourceManagerTaskState::Running)
        .collect();
    assert_eq!(spilling, vec![TaskState::Running, TaskState::Spilled, TaskState::NotSpilled]);
}
