//! Core types and functionality for Buildboard.
//!
//! This module contains the fundamental data structures used throughout
//! the application: tasks, users, projects, and configuration.

mod config;
mod network;
mod project;
mod task;
mod user;

pub use config::{ApiConfig, Config, IdentityConfig, ADDRESS_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use network::{BackendProbe, BackendStatus};
pub use project::{filter_by_tag, progress_of, NewProject, Project, ProjectPatch};
pub use task::{Category, NewTask, Priority, Task, TaskPatch, TaskStatus};
pub use user::{NewUser, Role, User, UserPatch};
