//! Planner error types

use thiserror::Error;

/// Failures surfaced by the two planning operations
///
/// Every transport-level failure (network error, non-success status,
/// malformed body) is normalized into one of these at the client boundary,
/// carrying a message that is safe to show the user verbatim. Raw reqwest
/// or serde errors never escape the planner.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Blueprint creation failed
    #[error("{message}")]
    PlanCreation { message: String },

    /// Workflow generation after confirmation failed
    #[error("{message}")]
    PlanConfirmation { message: String },
}

impl PlannerError {
    /// The display-safe message for this failure
    pub fn message(&self) -> &str {
        match self {
            PlannerError::PlanCreation { message } => message,
            PlannerError::PlanConfirmation { message } => message,
        }
    }

    /// Check if this failure happened while creating a blueprint
    pub fn is_creation(&self) -> bool {
        matches!(self, PlannerError::PlanCreation { .. })
    }

    /// Check if this failure happened while generating the workflow
    pub fn is_confirmation(&self) -> bool {
        matches!(self, PlannerError::PlanConfirmation { .. })
    }
}
