//! Interaction controller for FlowForge
//!
//! A conversation moves through idle -> planning -> review -> generating ->
//! done, with error re-enterable by a fresh submission. [`Session`] holds
//! the state and guards every transition; [`SessionController`] drives it
//! against a planner client.

mod controller;
mod model;

pub use controller::SessionController;
pub use model::{Phase, Session};
