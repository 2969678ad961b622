//! Task workflow rules.
//!
//! The guard is the single policy point for status transitions: both the
//! named board actions and free-form column moves go through
//! [`authorize`], independent of any UI.

mod guard;

pub use guard::{authorize, TransitionRequest, WorkflowError};
