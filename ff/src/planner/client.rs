//! PlannerClient trait definition

use async_trait::async_trait;

use super::{PlanCreated, PlannerError};

/// The two-phase contract with the planning service
///
/// Both operations are side-effect-free on local state; the interaction
/// controller alone applies results to the session. Neither operation
/// retries internally - retry is exclusively a user-initiated
/// re-submission.
#[async_trait]
pub trait PlannerClient: Send + Sync {
    /// Submit the raw user text and receive a blueprint for review
    ///
    /// Precondition: `prompt` is non-empty after trimming (enforced by the
    /// controller before the call is issued).
    async fn create_plan(&self, prompt: &str) -> Result<PlanCreated, PlannerError>;

    /// Confirm a previously created plan and receive the generated workflow
    ///
    /// The artifact is an arbitrary structured document, passed through
    /// opaquely - the client never inspects it.
    async fn confirm_plan(&self, thread_id: &str) -> Result<serde_json::Value, PlannerError>;
}
