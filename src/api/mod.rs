//! Task-store access layer.
//!
//! Thin REST clients translating between the application's task, project,
//! and user shapes and the wire format of the remote store.

mod client;
mod memory;
mod projects;
mod tasks;
mod users;

pub use client::{unwrap_envelope, ApiClient, ApiError, ApiResult};
pub use memory::InMemoryTasks;
pub use projects::ProjectClient;
pub use tasks::{TaskAccess, TaskClient};
pub use users::UserClient;
