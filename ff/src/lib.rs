//! FlowForge - conversational workflow generator client
//!
//! FlowForge turns a natural-language automation request into an importable
//! workflow definition through a two-phase protocol with a remote planning
//! service: submit free text and receive a blueprint describing the proposed
//! steps, then confirm the blueprint and receive the finished workflow
//! document.
//!
//! # Core Concepts
//!
//! - **One conversation, one session**: all client state for a conversation
//!   lives in a single [`session::Session`] value with a phase discriminant
//! - **Structural single-flight**: the state machine rejects events that are
//!   invalid for the current phase, so at most one request is ever in flight
//! - **Display-safe failures**: every remote failure is normalized to a
//!   message the views can show verbatim; raw transport errors never escape
//!   the planner client
//!
//! # Modules
//!
//! - [`planner`] - planning service contract and HTTP client
//! - [`session`] - session state machine and controller
//! - [`tui`] - chat-style terminal interface
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod planner;
pub mod session;
pub mod tui;

// Re-export commonly used types
pub use config::{Config, PlannerConfig, TuiConfig};
pub use planner::{HttpPlanner, PlanCreated, PlanNode, PlannerClient, PlannerError, WorkflowPlan};
pub use session::{Phase, Session, SessionController};
