//! Core domain types for Alertrix
//!
//! This module defines the alert event consumed by the formatter and
//! dispatcher. Events are created per dispatch call and discarded after the
//! call returns; nothing here carries persistent identity.

use serde::{Deserialize, Serialize};

/// Outcome of evaluating a single alert condition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConditionResult {
    /// The condition expression that was evaluated, e.g. `[STATUS] == 200`.
    pub condition: String,
    /// Whether the condition held.
    pub success: bool,
}

/// A monitoring alert event to be delivered as a room message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AlertEvent {
    /// Display name of the monitored endpoint.
    pub display_name: String,
    /// Group label of the endpoint, used to select an override configuration.
    #[serde(default)]
    pub group: String,
    /// Number of consecutive successes required before an alert resolves.
    #[serde(default)]
    pub success_threshold: u32,
    /// Number of consecutive failures required before an alert triggers.
    #[serde(default)]
    pub failure_threshold: u32,
    /// Optional free-text description attached to the alert.
    #[serde(default)]
    pub description: Option<String>,
    /// Per-condition results, in evaluation order.
    #[serde(default)]
    pub condition_results: Vec<ConditionResult>,
}

impl AlertEvent {
    /// Returns the description if it is present and non-empty.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}
