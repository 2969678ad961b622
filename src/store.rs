//! Client-side task state container.
//!
//! [`TaskStore`] owns the local copy of the task list for one scope (all
//! tasks, or one project's tasks) plus loading/error flags. It is a read
//! cache over the remote store: every successful mutation merges the
//! store's response back in, and consistency is "last successful fetch
//! wins". Mutations on the same task id are serialized through a per-id
//! lock; mutations on different ids may still interleave with fetches,
//! and overlapping fetches share the one loading flag (last writer wins).

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::api::{ApiResult, TaskAccess};
use crate::core::{NewTask, Task, TaskPatch};

/// Point-in-time view of the container's state.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    /// Cached task list
    pub tasks: Vec<Task>,
    /// Whether a fetch is in flight
    pub loading: bool,
    /// Last failure message, cleared on the next fetch
    pub error: Option<String>,
    /// Remembered project scope of the last fetch
    pub scope: Option<u64>,
}

#[derive(Debug, Default)]
struct State {
    tasks: Vec<Task>,
    loading: bool,
    error: Option<String>,
    scope: Option<u64>,
}

/// Shared, injected task state container.
pub struct TaskStore {
    access: Arc<dyn TaskAccess>,
    state: Mutex<State>,
    locks: Mutex<HashMap<u64, Arc<tokio::sync::Mutex<()>>>>,
}

impl TaskStore {
    /// Create a container over any task backend.
    pub fn new(access: Arc<dyn TaskAccess>) -> Self {
        Self { access, state: Mutex::new(State::default()), locks: Mutex::new(HashMap::new()) }
    }

    /// Fetch the task list for a scope and cache it.
    ///
    /// Sets the loading flag for the duration of the call, clears any
    /// previous error, and remembers the scope for [`refetch`].
    ///
    /// [`refetch`]: TaskStore::refetch
    pub async fn fetch(&self, project_id: Option<u64>) -> ApiResult<()> {
        {
            let mut state = self.state.lock();
            state.loading = true;
            state.error = None;
            state.scope = project_id;
        }

        let result = self.access.list(project_id).await;

        let mut state = self.state.lock();
        state.loading = false;
        match result {
            Ok(tasks) => {
                debug!(count = tasks.len(), ?project_id, "task list fetched");
                state.tasks = tasks;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "task fetch failed");
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Re-run the last fetch with the remembered scope.
    ///
    /// Before any fetch has happened this loads the unscoped list.
    pub async fn refetch(&self) -> ApiResult<()> {
        let scope = self.state.lock().scope;
        self.fetch(scope).await
    }

    /// Create a task and insert the store's response into the cache.
    pub async fn create(&self, task: NewTask) -> ApiResult<Task> {
        match self.access.create(task).await {
            Ok(created) => {
                let mut state = self.state.lock();
                state.tasks.push(created.clone());
                Ok(created)
            }
            Err(err) => {
                self.state.lock().error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Update a task and merge the store's response by id.
    ///
    /// Concurrent updates to the same id are serialized; the cache is
    /// untouched when the store rejects the mutation.
    pub async fn update(&self, id: u64, patch: TaskPatch) -> ApiResult<Task> {
        let lock = self.lock_for(id);
        let _guard = lock.lock().await;

        match self.access.update(id, patch).await {
            Ok(updated) => {
                let mut state = self.state.lock();
                if let Some(slot) = state.tasks.iter_mut().find(|t| t.id == id) {
                    *slot = updated.clone();
                } else {
                    state.tasks.push(updated.clone());
                }
                Ok(updated)
            }
            Err(err) => {
                self.state.lock().error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Delete a task and drop it from the cache.
    pub async fn remove(&self, id: u64) -> ApiResult<()> {
        let lock = self.lock_for(id);
        let _guard = lock.lock().await;

        match self.access.remove(id).await {
            Ok(()) => {
                self.state.lock().tasks.retain(|t| t.id != id);
                Ok(())
            }
            Err(err) => {
                self.state.lock().error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Clone of the cached task list.
    pub fn tasks(&self) -> Vec<Task> {
        self.state.lock().tasks.clone()
    }

    /// Find a cached task by id.
    pub fn task(&self, id: u64) -> Option<Task> {
        self.state.lock().tasks.iter().find(|t| t.id == id).cloned()
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    /// Last failure message, if any.
    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    /// Full point-in-time snapshot.
    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.lock();
        StoreSnapshot {
            tasks: state.tasks.clone(),
            loading: state.loading,
            error: state.error.clone(),
            scope: state.scope,
        }
    }

    fn lock_for(&self, id: u64) -> Arc<tokio::sync::Mutex<()>> {
        self.locks.lock().entry(id).or_default().clone()
    }
}
