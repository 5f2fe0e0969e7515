//! Task input records for the tree builder.
//!
//! Tasks arrive as a flat snapshot already decoded by the host platform's
//! persistence layer. `parent_id` references define the hierarchy; absent or
//! dangling references mean the task is a root.

use serde::{Deserialize, Serialize};

/// Completion state for tasks that are not quantity-tracked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressState {
    #[default]
    Todo,
    Doing,
    Completed,
    Verified,
    Accepted,
}

impl ProgressState {
    /// Whether this state counts as done for a binary-complete leaf task.
    pub fn is_done(self) -> bool {
        matches!(
            self,
            ProgressState::Completed | ProgressState::Verified | ProgressState::Accepted
        )
    }
}

/// One unit of work in a workspace's breakdown structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Direct cost/quantity value carried by the task itself.
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_quantity: Option<f64>,
    #[serde(default)]
    pub progress_state: ProgressState,
}

impl Task {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            subtotal: 0.0,
            quantity: None,
            completed_quantity: None,
            progress_state: ProgressState::Todo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_camel_case_wire_shape() {
        let task: Task = serde_json::from_str(
            r#"{"id":"t-1","parentId":"t-0","subtotal":250.0,"quantity":10,"completedQuantity":4,"progressState":"doing"}"#,
        )
        .expect("decode task");
        assert_eq!(task.parent_id.as_deref(), Some("t-0"));
        assert_eq!(task.quantity, Some(10.0));
        assert_eq!(task.progress_state, ProgressState::Doing);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let task: Task = serde_json::from_str(r#"{"id":"t-1"}"#).expect("decode task");
        assert!(task.parent_id.is_none());
        assert_eq!(task.subtotal, 0.0);
        assert_eq!(task.progress_state, ProgressState::Todo);
        assert!(!task.progress_state.is_done());
    }

    #[test]
    fn done_states_cover_verification_and_acceptance() {
        assert!(ProgressState::Completed.is_done());
        assert!(ProgressState::Verified.is_done());
        assert!(ProgressState::Accepted.is_done());
        assert!(!ProgressState::Doing.is_done());
    }
}
