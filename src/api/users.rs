//! User endpoints of the remote store.

use reqwest::Method;

use super::client::{ApiClient, ApiResult};
use crate::core::{NewUser, User, UserPatch};

/// HTTP user client against `/users`.
#[derive(Debug, Clone)]
pub struct UserClient {
    api: ApiClient,
}

impl UserClient {
    /// Create a user client over shared API plumbing.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List all users.
    pub async fn list(&self) -> ApiResult<Vec<User>> {
        let url = self.api.url("users");
        self.api.send_json(self.api.request(Method::GET, &url)).await
    }

    /// Fetch a single user by id.
    pub async fn get(&self, id: u64) -> ApiResult<User> {
        let url = self.api.url(&format!("users/{}", id));
        self.api.send_json(self.api.request(Method::GET, &url)).await
    }

    /// Fetch a user by wallet address, the actor-identity lookup.
    pub async fn by_address(&self, address: &str) -> ApiResult<User> {
        let url = self.api.url(&format!("users/address/{}", urlencoding::encode(address)));
        self.api.send_json(self.api.request(Method::GET, &url)).await
    }

    /// Create a user.
    pub async fn create(&self, user: NewUser) -> ApiResult<User> {
        let url = self.api.url("users");
        self.api.send_json(self.api.request(Method::POST, &url).json(&user)).await
    }

    /// Update a user.
    pub async fn update(&self, id: u64, patch: UserPatch) -> ApiResult<User> {
        let url = self.api.url(&format!("users/{}", id));
        self.api.send_json(self.api.request(Method::PUT, &url).json(&patch)).await
    }

    /// Delete a user.
    pub async fn remove(&self, id: u64) -> ApiResult<()> {
        let url = self.api.url(&format!("users/{}", id));
        self.api.send_empty(self.api.request(Method::DELETE, &url)).await
    }
}
