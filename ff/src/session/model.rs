//! Session state machine
//!
//! One conversation with the planning service is held in a single
//! [`Session`] value with a `phase` discriminant. All lifecycle guards
//! live here, so an event that is invalid for the current phase is
//! rejected even if a view fails to disable its controls. Pure data and
//! transitions - no I/O.

use serde_json::Value;
use tracing::{debug, warn};

use crate::planner::{PlannerError, WorkflowPlan};

/// Discrete state of the interaction lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// Blueprint request in flight
    Planning,
    /// Blueprint received, awaiting user confirmation
    Review,
    /// Workflow generation in flight
    Generating,
    /// Workflow document received
    Done,
    /// A remote operation failed; re-enterable by a new submission
    Error,
}

impl Phase {
    /// Check whether a new submission is accepted in this phase
    pub fn accepts_submission(&self) -> bool {
        matches!(self, Phase::Idle | Phase::Done | Phase::Error)
    }

    /// Check whether a remote operation is currently in flight
    pub fn is_waiting(&self) -> bool {
        matches!(self, Phase::Planning | Phase::Generating)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Phase::Idle => "idle",
            Phase::Planning => "planning",
            Phase::Review => "review",
            Phase::Generating => "generating",
            Phase::Done => "done",
            Phase::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// The single mutable unit of client state for one conversation
///
/// Holds at most one plan and one artifact at a time. A new submission
/// discards everything from the previous attempt except the retained
/// input text - the session is a single-conversation container, not a
/// history log.
#[derive(Debug, Clone, Default)]
pub struct Session {
    phase: Phase,
    thread_id: Option<String>,
    user_request: String,
    plan: Option<WorkflowPlan>,
    artifact: Option<Value>,
    last_error: Option<String>,
}

impl Session {
    /// Create an empty session at interaction start
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Thread issued by the service, once a plan exists
    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    /// The raw text of the most recent accepted submission
    pub fn user_request(&self) -> &str {
        &self.user_request
    }

    /// The blueprint under review, if one has been received
    pub fn plan(&self) -> Option<&WorkflowPlan> {
        self.plan.as_ref()
    }

    /// The generated workflow document, present only when done
    pub fn artifact(&self) -> Option<&Value> {
        self.artifact.as_ref()
    }

    /// Human-readable description of the last failure
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Accept a new automation request
    ///
    /// Returns the trimmed text to send to the service if the submission
    /// was accepted, `None` if it was a no-op (blank text, or a request
    /// already in flight / under review). Acceptance discards the prior
    /// plan, artifact, thread, and error.
    pub fn submit(&mut self, text: &str) -> Option<String> {
        if !self.phase.accepts_submission() {
            debug!(phase = %self.phase, "submit: rejected in current phase");
            return None;
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("submit: rejected blank text");
            return None;
        }

        self.user_request = trimmed.to_string();
        self.thread_id = None;
        self.plan = None;
        self.artifact = None;
        self.last_error = None;
        self.phase = Phase::Planning;

        debug!(request_len = trimmed.len(), "submit: accepted");
        Some(self.user_request.clone())
    }

    /// Confirm the blueprint under review
    ///
    /// Returns the thread to confirm if accepted, `None` if this is a
    /// no-op (not in review, or no thread present).
    pub fn confirm(&mut self) -> Option<String> {
        if self.phase != Phase::Review {
            debug!(phase = %self.phase, "confirm: rejected in current phase");
            return None;
        }

        let Some(thread_id) = self.thread_id.clone() else {
            warn!("confirm: in review without a thread id");
            return None;
        };

        self.last_error = None;
        self.phase = Phase::Generating;

        debug!(%thread_id, "confirm: accepted");
        Some(thread_id)
    }

    /// Apply a successful blueprint response
    pub fn complete_planning(&mut self, thread_id: String, plan: WorkflowPlan) {
        if self.phase != Phase::Planning {
            warn!(phase = %self.phase, "complete_planning: ignored outside planning");
            return;
        }

        debug!(%thread_id, nodes = plan.nodes.len(), "complete_planning: entering review");
        self.thread_id = Some(thread_id);
        self.plan = Some(plan);
        self.phase = Phase::Review;
    }

    /// Apply a successful workflow generation response
    ///
    /// The plan is retained alongside the artifact.
    pub fn complete_generation(&mut self, artifact: Value) {
        if self.phase != Phase::Generating {
            warn!(phase = %self.phase, "complete_generation: ignored outside generating");
            return;
        }

        debug!("complete_generation: done");
        self.artifact = Some(artifact);
        self.phase = Phase::Done;
    }

    /// Apply a failed remote operation
    pub fn fail(&mut self, error: &PlannerError) {
        if !self.phase.is_waiting() {
            warn!(phase = %self.phase, "fail: ignored with no operation in flight");
            return;
        }

        debug!(message = %error.message(), "fail: entering error state");
        self.last_error = Some(error.message().to_string());
        self.phase = Phase::Error;
    }
}
