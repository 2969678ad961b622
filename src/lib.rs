//! # Buildboard
//!
//! Terminal kanban client for Web3 build projects.
//!
//! Buildboard talks to a REST task store and coordinates work between two
//! roles: the project Owner (creates and approves tasks) and Builders
//! (take tasks, do the work, submit for review).
//!
//! ## Features
//!
//! - **Workflow guard**: one policy function for every status transition
//! - **Task cache**: an injected state container over the remote store
//! - **Board view**: tasks grouped into To Do / In Progress / In Review / Done
//! - **Offline demo**: an in-memory backend with a sample board
//!
//! ## Quick Start
//!
//! ```bash
//! # Install
//! cargo install buildboard
//!
//! # Show the board for project 1
//! bboard board --project 1
//!
//! # Take a task as a builder
//! bboard task take 7 --address 0xB1...
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Allow common patterns that are intentional in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::map_unwrap_or)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::significant_drop_tightening)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::unused_self)]

pub mod api;
pub mod board;
pub mod core;
pub mod store;
pub mod workflow;

pub use api::{
    ApiClient, ApiError, ApiResult, InMemoryTasks, ProjectClient, TaskAccess, TaskClient,
    UserClient,
};
pub use board::{resolve_drop, Board, DropTarget};
pub use core::{
    Category, Config, NewProject, NewTask, NewUser, Priority, Project, ProjectPatch, Role, Task,
    TaskPatch, TaskStatus, User, UserPatch,
};
pub use store::{StoreSnapshot, TaskStore};
pub use workflow::{authorize, TransitionRequest, WorkflowError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "buildboard";

/// Short alias
pub const APP_ALIAS: &str = "bboard";
