use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Task priority. The set is fixed and stored as TEXT by variant name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

/// Task status. `Pending` is the only initial state; updates may move a task
/// in either direction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
pub enum TaskStatus {
    Pending,
    Done,
}

/// A task row. The owner is never serialized in responses.
#[derive(Debug, Serialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    #[serde(skip_serializing)]
    pub user_id: i64,
}

/// Payload for creating a task. `description` and `priority` are required,
/// but modeled as options so their absence surfaces as a missing-field error
/// from the handler instead of a deserialization failure.
#[derive(Debug, Deserialize, Validate)]
pub struct TaskInput {
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
}

/// Payload for updating a task. Omitted fields keep their stored values; an
/// empty payload is a valid no-op.
#[derive(Debug, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
}
