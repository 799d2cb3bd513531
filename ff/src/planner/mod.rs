//! Planning service client for FlowForge
//!
//! The service turns a natural-language request into a reviewable blueprint
//! and, once the user confirms, into the final workflow document. This
//! module holds the wire contract and the HTTP implementation.

pub mod client;
mod error;
mod http;
mod types;

pub use client::PlannerClient;
pub use error::PlannerError;
pub use http::HttpPlanner;
pub use types::{ConfirmRequest, ErrorBody, PlanCreated, PlanNode, PlanRequest, ServiceHealth, WorkflowPlan};
