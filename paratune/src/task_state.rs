use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

pub const TASK_STATES: [TaskState; 8] = [
    TaskState::Launching,
    TaskState::Running,
    TaskState::Finished,
    TaskState::Failed,
    TaskState::Killed,
    TaskState::Lost,
    TaskState::Spilled,
    TaskState::NotSpilled,
];

/// Lifecycle of a stage task as seen by the planner, including whether a running task has
/// spilled to disk.
#[derive(
    Debug, Display, Copy, Clone, PartialEq, Eq, Hash, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    Launching,
    Running,
    Finished,
    Failed,
    Killed,
    Lost,
    Spilled,
    NotSpilled,
}

impl TaskState {
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running | Self::Spilled | Self::NotSpilled)
    }

    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Finished | Self::Failed | Self::Killed | Self::Lost)
    }

    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed | Self::Lost)
    }

    pub const fn is_spilled(&self) -> bool {
        matches!(self, Self::Spilled)
    }

    pub const fn to_resource_manager(self) -> ResourceManagerTaskState {
        TO_RESOURCE_MANAGER[self as usize]
    }

    pub const fn from_resource_manager(state: ResourceManagerTaskState) -> Self {
        FROM_RESOURCE_MANAGER[state as usize]
    }
}

/// Task states in a cluster resource manager's vocabulary.
#[derive(
    Debug, Display, Copy, Clone, PartialEq, Eq, Hash, EnumString, EnumIter, Serialize, Deserialize,
)]
pub enum ResourceManagerTaskState {
    #[strum(serialize = "TASK_STAGING")]
    #[serde(rename = "TASK_STAGING")]
    Staging,

    #[strum(serialize = "TASK_STARTING")]
    #[serde(rename = "TASK_STARTING")]
    Starting,

    #[strum(serialize = "TASK_RUNNING")]
    #[serde(rename = "TASK_RUNNING")]
    Running,

    #[strum(serialize = "TASK_FINISHED")]
    #[serde(rename = "TASK_FINISHED")]
    Finished,

    #[strum(serialize = "TASK_FAILED")]
    #[serde(rename = "TASK_FAILED")]
    Failed,

    #[strum(serialize = "TASK_KILLED")]
    #[serde(rename = "TASK_KILLED")]
    Killed,

    #[strum(serialize = "TASK_LOST")]
    #[serde(rename = "TASK_LOST")]
    Lost,

    #[strum(serialize = "TASK_ERROR")]
    #[serde(rename = "TASK_ERROR")]
    Error,
}

// Indexed by `TaskState` discriminant.
const TO_RESOURCE_MANAGER: [ResourceManagerTaskState; 8] = [
    ResourceManagerTaskState::Starting,
    ResourceManagerTaskState::Running,
    ResourceManagerTaskState::Finished,
    ResourceManagerTaskState::Failed,
    ResourceManagerTaskState::Killed,
    ResourceManagerTaskState::Failed,
    ResourceManagerTaskState::Running,
    ResourceManagerTaskState::Running,
];

// Indexed by `ResourceManagerTaskState` discriminant.
const FROM_RESOURCE_MANAGER: [TaskState; 8] = [
    TaskState::Launching,
    TaskState::Launching,
    TaskState::Running,
    TaskState::Finished,
    TaskState::Failed,
    TaskState::Killed,
    TaskState::Lost,
    TaskState::Lost,
];

impl From<TaskState> for ResourceManagerTaskState {
    fn from(state: TaskState) -> Self {
        state.to_resource_manager()
    }
}

impl From<ResourceManagerTaskState> for TaskState {
    fn from(state: ResourceManagerTaskState) -> Self {
        Self::from_resource_manager(state)
    }
}
