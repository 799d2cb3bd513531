//! Request/response types for the planning service
//!
//! These model the service's wire contract: snake_case JSON, a blueprint
//! payload on plan creation, and an opaque workflow document on confirmation.

use serde::{Deserialize, Serialize};

/// Request body for blueprint creation (`POST /plan`)
#[derive(Debug, Clone, Serialize)]
pub struct PlanRequest {
    /// The raw automation request as typed by the user
    pub prompt: String,

    /// Existing thread to re-plan on; the service accepts this but the
    /// client currently always starts a fresh thread
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

impl PlanRequest {
    /// Build a fresh-thread plan request
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            thread_id: None,
        }
    }
}

/// Request body for workflow generation (`POST /confirm`)
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmRequest {
    /// Thread issued by a prior successful plan creation
    pub thread_id: String,

    /// Reserved by the service for plan amendments; never sent today
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifications: Option<String>,
}

impl ConfirmRequest {
    /// Build a confirmation request for the given thread
    pub fn new(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            modifications: None,
        }
    }
}

/// Successful response from blueprint creation
///
/// The service also sends a `status` marker (`"plan_ready"`); success is
/// already conveyed by the HTTP status, so it is carried but not consulted.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanCreated {
    #[serde(default)]
    pub status: Option<String>,

    /// Opaque correlation token for the confirmation request
    pub thread_id: String,

    /// The proposed blueprint
    pub plan: WorkflowPlan,
}

/// The blueprint proposed by the planning service
///
/// Describes the automation the service intends to build, for user review
/// before any workflow document is generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowPlan {
    /// Free-text description of the overall automation
    pub summary: String,

    /// Pre-flight caveats the user should confirm before proceeding
    #[serde(default)]
    pub questions_to_user: Vec<String>,

    /// Proposed execution steps, in run order
    pub nodes: Vec<PlanNode>,

    /// How the steps relate and how data flows between them
    #[serde(default)]
    pub connections_logic: String,
}

/// One proposed step of the workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanNode {
    /// Human-readable step label
    pub name: String,

    /// Kind of action, in the service's own vocabulary (not validated here)
    pub r#type: String,

    /// Free-text rationale for the step
    pub purpose: String,
}

/// Error payload returned by the planning service
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Response from the service health endpoint (`GET /`)
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceHealth {
    pub status: String,

    #[serde(default)]
    pub service: String,
}
