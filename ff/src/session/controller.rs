//! SessionController - drives one conversation against the planner
//!
//! Owns the session and the planner client; each accepted event issues
//! exactly one network operation and applies its outcome. Used by the
//! terminal flows, which are happy to await inline; the TUI drives the
//! same [`Session`] guards with background tasks instead.

use std::sync::Arc;

use tracing::info;

use crate::planner::PlannerClient;
use crate::session::Session;

/// Async driver for a single planning conversation
pub struct SessionController {
    planner: Arc<dyn PlannerClient>,
    session: Session,
}

impl SessionController {
    /// Create a controller with an empty session
    pub fn new(planner: Arc<dyn PlannerClient>) -> Self {
        Self {
            planner,
            session: Session::new(),
        }
    }

    /// Read-only view of the session for display
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Submit an automation request and wait for the blueprint
    ///
    /// Returns false if the submission was a no-op for the current phase
    /// (blank text, or a request already in flight / under review). On
    /// return the session is in `review` or `error`.
    pub async fn submit(&mut self, text: &str) -> bool {
        let Some(request) = self.session.submit(text) else {
            return false;
        };

        info!(request_len = request.len(), "Requesting blueprint");
        match self.planner.create_plan(&request).await {
            Ok(created) => self.session.complete_planning(created.thread_id, created.plan),
            Err(e) => self.session.fail(&e),
        }
        true
    }

    /// Confirm the reviewed blueprint and wait for the workflow document
    ///
    /// Returns false if confirmation was a no-op (not in review). On
    /// return the session is in `done` or `error`.
    pub async fn confirm(&mut self) -> bool {
        let Some(thread_id) = self.session.confirm() else {
            return false;
        };

        info!(%thread_id, "Confirming blueprint");
        match self.planner.confirm_plan(&thread_id).await {
            Ok(artifact) => self.session.complete_generation(artifact),
            Err(e) => self.session.fail(&e),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::client::mock::MockPlanner;
    use crate::planner::{PlanCreated, PlanNode, PlannerError, WorkflowPlan};
    use crate::session::Phase;

    fn three_node_plan() -> WorkflowPlan {
        WorkflowPlan {
            summary: "Poll RSS hourly, filter for AI topics, post to Slack".to_string(),
            questions_to_user: vec![],
            nodes: vec![
                PlanNode {
                    name: "Schedule".to_string(),
                    r#type: "trigger".to_string(),
                    purpose: "Fire hourly".to_string(),
                },
                PlanNode {
                    name: "Read RSS".to_string(),
                    r#type: "rss".to_string(),
                    purpose: "Fetch feed items".to_string(),
                },
                PlanNode {
                    name: "Post to Slack".to_string(),
                    r#type: "slack".to_string(),
                    purpose: "Announce matches".to_string(),
                },
            ],
            connections_logic: "Sequential".to_string(),
        }
    }

    fn plan_ready(thread_id: &str, plan: WorkflowPlan) -> PlanCreated {
        PlanCreated {
            status: Some("plan_ready".to_string()),
            thread_id: thread_id.to_string(),
            plan,
        }
    }

    #[tokio::test]
    async fn test_submit_issues_one_create_call() {
        let planner = Arc::new(MockPlanner::new(
            vec![Ok(plan_ready("t-123", three_node_plan()))],
            vec![],
        ));
        let mut controller = SessionController::new(planner.clone());

        // Scenario A: a three-node plan lands the session in review
        let issued = controller
            .submit("Every hour check RSS and post to Slack if related to AI")
            .await;

        assert!(issued);
        assert_eq!(planner.create_calls(), 1);
        assert_eq!(controller.session().phase(), Phase::Review);
        let plan = controller.session().plan().unwrap();
        assert_eq!(plan.nodes.len(), 3);
        assert_eq!(plan.nodes[0].name, "Schedule");
        assert_eq!(plan.nodes[2].name, "Post to Slack");
    }

    #[tokio::test]
    async fn test_blank_submit_issues_no_call() {
        let planner = Arc::new(MockPlanner::new(vec![], vec![]));
        let mut controller = SessionController::new(planner.clone());

        assert!(!controller.submit("   ").await);
        assert_eq!(planner.create_calls(), 0);
        assert_eq!(controller.session().phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_confirm_stores_artifact_verbatim() {
        let artifact = serde_json::json!({
            "nodes": [{"id": "n1"}],
            "connections": {"n1": []}
        });
        let planner = Arc::new(MockPlanner::new(
            vec![Ok(plan_ready("t-123", three_node_plan()))],
            vec![Ok(artifact.clone())],
        ));
        let mut controller = SessionController::new(planner.clone());

        controller.submit("request").await;
        assert_eq!(controller.session().thread_id(), Some("t-123"));

        // Scenario B: confirmation stores the document untouched
        let issued = controller.confirm().await;

        assert!(issued);
        assert_eq!(planner.confirm_calls(), 1);
        assert_eq!(controller.session().phase(), Phase::Done);
        assert_eq!(controller.session().artifact(), Some(&artifact));
        assert!(controller.session().plan().is_some());
    }

    #[tokio::test]
    async fn test_confirm_outside_review_issues_no_call() {
        let planner = Arc::new(MockPlanner::new(vec![], vec![]));
        let mut controller = SessionController::new(planner.clone());

        assert!(!controller.confirm().await);
        assert_eq!(planner.confirm_calls(), 0);
        assert_eq!(controller.session().phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_creation_failure_surfaces_detail() {
        let planner = Arc::new(MockPlanner::new(
            vec![Err(PlannerError::PlanCreation {
                message: "rate limited".to_string(),
            })],
            vec![],
        ));
        let mut controller = SessionController::new(planner);

        // Scenario C: the service detail becomes the displayed error
        controller.submit("request").await;

        assert_eq!(controller.session().phase(), Phase::Error);
        assert_eq!(controller.session().last_error(), Some("rate limited"));
    }

    #[tokio::test]
    async fn test_resubmission_after_error_calls_service_again() {
        let planner = Arc::new(MockPlanner::new(
            vec![
                Err(PlannerError::PlanCreation {
                    message: "rate limited".to_string(),
                }),
                Ok(plan_ready("t-2", three_node_plan())),
            ],
            vec![],
        ));
        let mut controller = SessionController::new(planner.clone());

        controller.submit("same request").await;
        assert_eq!(controller.session().phase(), Phase::Error);

        // No caching: identical text after an error hits the service again
        controller.submit("same request").await;

        assert_eq!(planner.create_calls(), 2);
        assert_eq!(controller.session().phase(), Phase::Review);
        assert!(controller.session().last_error().is_none());
    }

    #[tokio::test]
    async fn test_generation_failure_restarts_whole_conversation() {
        let planner = Arc::new(MockPlanner::new(
            vec![
                Ok(plan_ready("t-1", three_node_plan())),
                Ok(plan_ready("t-2", three_node_plan())),
            ],
            vec![Err(PlannerError::PlanConfirmation {
                message: "generator crashed".to_string(),
            })],
        ));
        let mut controller = SessionController::new(planner.clone());

        controller.submit("request").await;
        controller.confirm().await;
        assert_eq!(controller.session().phase(), Phase::Error);
        assert_eq!(controller.session().last_error(), Some("generator crashed"));

        // Recovery is a fresh plan request, not a confirmation retry
        controller.submit("request").await;

        assert_eq!(planner.create_calls(), 2);
        assert_eq!(planner.confirm_calls(), 1);
        assert_eq!(controller.session().thread_id(), Some("t-2"));
        assert_eq!(controller.session().phase(), Phase::Review);
    }
}
