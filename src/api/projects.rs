//! Project endpoints of the remote store.

use reqwest::Method;

use super::client::{ApiClient, ApiResult};
use crate::core::{NewProject, Project, ProjectPatch};

/// HTTP project client against `/projects`.
#[derive(Debug, Clone)]
pub struct ProjectClient {
    api: ApiClient,
}

impl ProjectClient {
    /// Create a project client over shared API plumbing.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List all projects.
    pub async fn list(&self) -> ApiResult<Vec<Project>> {
        let url = self.api.url("projects");
        self.api.send_json(self.api.request(Method::GET, &url)).await
    }

    /// Fetch a single project.
    pub async fn get(&self, id: u64) -> ApiResult<Project> {
        let url = self.api.url(&format!("projects/{}", id));
        self.api.send_json(self.api.request(Method::GET, &url)).await
    }

    /// Create a project.
    pub async fn create(&self, project: NewProject) -> ApiResult<Project> {
        let url = self.api.url("projects");
        self.api.send_json(self.api.request(Method::POST, &url).json(&project)).await
    }

    /// Update a project.
    pub async fn update(&self, id: u64, patch: ProjectPatch) -> ApiResult<Project> {
        let url = self.api.url(&format!("projects/{}", id));
        self.api.send_json(self.api.request(Method::PUT, &url).json(&patch)).await
    }

    /// Delete a project.
    pub async fn remove(&self, id: u64) -> ApiResult<()> {
        let url = self.api.url(&format!("projects/{}", id));
        self.api.send_empty(self.api.request(Method::DELETE, &url)).await
    }
}
