//! Task endpoints of the remote store.
//!
//! [`TaskAccess`] is the seam between the state container and the wire:
//! the HTTP client and the in-memory demo backend both implement it.

use async_trait::async_trait;
use reqwest::Method;

use super::client::{ApiClient, ApiResult};
use crate::core::{Category, NewTask, Task, TaskPatch, TaskStatus};

/// CRUD and status-transition operations on tasks.
///
/// The convenience methods are fixed compositions over [`update`]
/// matching the named board actions; implementors get them for free.
///
/// [`update`]: TaskAccess::update
#[async_trait]
pub trait TaskAccess: Send + Sync {
    /// Fetch all tasks, optionally scoped to a project.
    ///
    /// Order is whatever the store returns; it is not contractually sorted.
    async fn list(&self, project_id: Option<u64>) -> ApiResult<Vec<Task>>;

    /// Fetch a single task. Fails with `NotFound` if the store has no match.
    async fn get(&self, id: u64) -> ApiResult<Task>;

    /// Create a task; the store assigns `id` and timestamps.
    async fn create(&self, task: NewTask) -> ApiResult<Task>;

    /// Submit a partial mutation; returns the updated task.
    async fn update(&self, id: u64, patch: TaskPatch) -> ApiResult<Task>;

    /// Delete a task.
    async fn remove(&self, id: u64) -> ApiResult<()>;

    /// Take an unassigned task: `{status: 1, builder: address}`.
    async fn assign_to_self(&self, id: u64, address: &str) -> ApiResult<Task> {
        self.update(id, TaskPatch::take(address)).await
    }

    /// Release a task back to To Do: `{status: 0, builder: null}`.
    async fn release(&self, id: u64) -> ApiResult<Task> {
        self.update(id, TaskPatch::release()).await
    }

    /// Submit for review: `{status: 2}`.
    async fn request_review(&self, id: u64) -> ApiResult<Task> {
        self.update(id, TaskPatch::status(TaskStatus::InReview)).await
    }

    /// Approve into Done: `{status: 3}`.
    async fn approve(&self, id: u64) -> ApiResult<Task> {
        self.update(id, TaskPatch::status(TaskStatus::Done)).await
    }
}

/// HTTP task client against `/tasks`.
#[derive(Debug, Clone)]
pub struct TaskClient {
    api: ApiClient,
}

impl TaskClient {
    /// Create a task client over shared API plumbing.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List category associations for a task.
    pub async fn list_categories(&self, id: u64) -> ApiResult<Vec<Category>> {
        let url = self.api.url(&format!("tasks/{}/categories", id));
        self.api.send_json(self.api.request(Method::GET, &url)).await
    }

    /// Associate a category with a task.
    pub async fn add_category(&self, id: u64, category_id: u64) -> ApiResult<()> {
        let url = self.api.url(&format!("tasks/{}/categories", id));
        let body = serde_json::json!({ "categoryId": category_id });
        self.api.send_empty(self.api.request(Method::POST, &url).json(&body)).await
    }

    /// Remove a category association from a task.
    pub async fn remove_category(&self, id: u64, category_id: u64) -> ApiResult<()> {
        let url = self.api.url(&format!("tasks/{}/categories/{}", id, category_id));
        self.api.send_empty(self.api.request(Method::DELETE, &url)).await
    }
}

#[async_trait]
impl TaskAccess for TaskClient {
    async fn list(&self, project_id: Option<u64>) -> ApiResult<Vec<Task>> {
        let url = match project_id {
            Some(id) => self.api.url(&format!("tasks?projectId={}", id)),
            None => self.api.url("tasks"),
        };
        self.api.send_json(self.api.request(Method::GET, &url)).await
    }

    async fn get(&self, id: u64) -> ApiResult<Task> {
        let url = self.api.url(&format!("tasks/{}", id));
        self.api.send_json(self.api.request(Method::GET, &url)).await
    }

    async fn create(&self, task: NewTask) -> ApiResult<Task> {
        let url = self.api.url("tasks");
        self.api.send_json(self.api.request(Method::POST, &url).json(&task)).await
    }

    async fn update(&self, id: u64, patch: TaskPatch) -> ApiResult<Task> {
        let url = self.api.url(&format!("tasks/{}", id));
        self.api.send_json(self.api.request(Method::PUT, &url).json(&patch)).await
    }

    async fn remove(&self, id: u64) -> ApiResult<()> {
        let url = self.api.url(&format!("tasks/{}", id));
        self.api.send_empty(self.api.request(Method::DELETE, &url)).await
    }
}
