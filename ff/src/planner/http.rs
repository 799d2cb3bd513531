//! HTTP client for the planning service
//!
//! Speaks the service's two-endpoint JSON protocol and normalizes every
//! failure into a display-safe [`PlannerError`] before it reaches the
//! interaction controller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::{
    ConfirmRequest, ErrorBody, PlanCreated, PlanRequest, PlannerClient, PlannerError, ServiceHealth,
};
use crate::config::PlannerConfig;

/// Fallback shown when blueprint creation fails without a service detail
const CREATE_FALLBACK: &str = "Failed to create plan. Is the planning service running?";

/// Fallback shown when workflow generation fails without a service detail
const CONFIRM_FALLBACK: &str = "Failed to generate the workflow.";

/// Planning service client over HTTP
pub struct HttpPlanner {
    base_url: String,
    http: Client,
}

impl HttpPlanner {
    /// Create a new client from configuration
    pub fn from_config(config: &PlannerConfig) -> eyre::Result<Self> {
        debug!(base_url = %config.base_url, timeout_ms = config.timeout_ms, "from_config: called");
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Build the full URL for an endpoint path
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check that the service is up (`GET /`)
    ///
    /// Not part of the [`PlannerClient`] contract - the controller never
    /// calls it; it backs the `health` CLI command.
    pub async fn health(&self) -> eyre::Result<ServiceHealth> {
        debug!("health: called");
        let response = self.http.get(self.endpoint("/")).send().await?;
        let health = response.error_for_status()?.json::<ServiceHealth>().await?;
        Ok(health)
    }
}

#[async_trait]
impl PlannerClient for HttpPlanner {
    async fn create_plan(&self, prompt: &str) -> Result<PlanCreated, PlannerError> {
        debug!(prompt_len = prompt.len(), "create_plan: called");
        let body = PlanRequest::new(prompt);

        let response = self
            .http
            .post(self.endpoint("/plan"))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "create_plan: request failed");
                PlannerError::PlanCreation {
                    message: CREATE_FALLBACK.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "create_plan: service returned error");
            return Err(PlannerError::PlanCreation {
                message: detail_or(&text, CREATE_FALLBACK),
            });
        }

        let created = response.json::<PlanCreated>().await.map_err(|e| {
            warn!(error = %e, "create_plan: malformed response body");
            PlannerError::PlanCreation {
                message: CREATE_FALLBACK.to_string(),
            }
        })?;

        debug!(thread_id = %created.thread_id, nodes = created.plan.nodes.len(), "create_plan: plan ready");
        Ok(created)
    }

    async fn confirm_plan(&self, thread_id: &str) -> Result<serde_json::Value, PlannerError> {
        debug!(%thread_id, "confirm_plan: called");
        let body = ConfirmRequest::new(thread_id);

        let response = self
            .http
            .post(self.endpoint("/confirm"))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "confirm_plan: request failed");
                PlannerError::PlanConfirmation {
                    message: CONFIRM_FALLBACK.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "confirm_plan: service returned error");
            return Err(PlannerError::PlanConfirmation {
                message: detail_or(&text, CONFIRM_FALLBACK),
            });
        }

        // The artifact is opaque - any valid JSON document passes through
        let artifact = response.json::<serde_json::Value>().await.map_err(|e| {
            warn!(error = %e, "confirm_plan: malformed response body");
            PlannerError::PlanConfirmation {
                message: CONFIRM_FALLBACK.to_string(),
            }
        })?;

        debug!("confirm_plan: artifact received");
        Ok(artifact)
    }
}

/// Extract the service's `detail` message from an error body, if present
fn detail_or(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|e| e.detail)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;

    #[test]
    fn test_endpoint_joins_paths() {
        let config = PlannerConfig {
            base_url: "http://localhost:8000".to_string(),
            ..PlannerConfig::default()
        };
        let planner = HttpPlanner::from_config(&config).unwrap();

        assert_eq!(planner.endpoint("/plan"), "http://localhost:8000/plan");
        assert_eq!(planner.endpoint("/confirm"), "http://localhost:8000/confirm");
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let config = PlannerConfig {
            base_url: "http://localhost:8000/".to_string(),
            ..PlannerConfig::default()
        };
        let planner = HttpPlanner::from_config(&config).unwrap();

        assert_eq!(planner.endpoint("/plan"), "http://localhost:8000/plan");
    }

    #[test]
    fn test_detail_or_prefers_service_detail() {
        assert_eq!(detail_or(r#"{"detail":"rate limited"}"#, CREATE_FALLBACK), "rate limited");
    }

    #[test]
    fn test_detail_or_falls_back_on_missing_detail() {
        assert_eq!(detail_or("{}", CREATE_FALLBACK), CREATE_FALLBACK);
        assert_eq!(detail_or(r#"{"detail":""}"#, CREATE_FALLBACK), CREATE_FALLBACK);
    }

    #[test]
    fn test_detail_or_falls_back_on_non_json() {
        assert_eq!(detail_or("<html>502 Bad Gateway</html>", CONFIRM_FALLBACK), CONFIRM_FALLBACK);
        assert_eq!(detail_or("", CONFIRM_FALLBACK), CONFIRM_FALLBACK);
    }
}
