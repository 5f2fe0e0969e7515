//! workplan - Workspace Planning Core
//!
//! Derived-view logic for an organizational workspace platform. The host
//! application owns persistence, real-time sync, and rendering; this crate
//! computes pure views over records the host has already fetched:
//!
//! - **Task trees**: a flat parent-pointer snapshot becomes a WBS-numbered
//!   forest with cost and progress roll-up, robust to dangling parents and
//!   reference cycles.
//! - **Schedule transitions**: the PROPOSAL/OFFICIAL/REJECTED status table
//!   and its guard.
//! - **Skill tiers**: XP-to-tier derivation and grant comparisons.
//!
//! # Module Organization
//!
//! - `task`: task input records
//! - `tree`: WBS tree building and roll-up
//! - `schedule`: schedule status transition guard
//! - `skill`: skill tier resolution and grants
//! - `error`: error types and result aliases

pub mod error;
pub mod schedule;
pub mod skill;
pub mod task;
pub mod tree;

pub use error::{Error, Result};
