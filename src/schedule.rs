//! Schedule item status transitions.
//!
//! Schedule items are created as proposals and either promoted to official
//! or rejected. The guard here is a pure membership check; use-case code
//! calls [`apply_transition`] to reject an invalid move with a descriptive
//! error before any persistence write happens.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Lifecycle status of a schedule item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleStatus {
    Proposal,
    Official,
    Rejected,
}

impl ScheduleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ScheduleStatus::Proposal => "PROPOSAL",
            ScheduleStatus::Official => "OFFICIAL",
            ScheduleStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `next` is a permitted transition from `current`.
///
/// Proposals can be made official or rejected; official items can still be
/// rejected. Rejected items are terminal, and nothing returns to proposal.
pub fn can_transition(current: ScheduleStatus, next: ScheduleStatus) -> bool {
    use ScheduleStatus::*;
    matches!(
        (current, next),
        (Proposal, Official) | (Proposal, Rejected) | (Official, Rejected)
    )
}

/// Validate a transition, returning the new status or an error naming the
/// attempted pair. Callers abort the write when this errors.
pub fn apply_transition(current: ScheduleStatus, next: ScheduleStatus) -> Result<ScheduleStatus> {
    if can_transition(current, next) {
        Ok(next)
    } else {
        Err(Error::InvalidTransition {
            from: current,
            to: next,
        })
    }
}
