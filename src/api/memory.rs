//! In-memory task backend.
//!
//! Implements [`TaskAccess`] over a process-local map, assigning ids and
//! timestamps the way the remote store does. Backs the offline `demo`
//! command and the test suites.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use super::client::{ApiError, ApiResult};
use super::tasks::TaskAccess;
use crate::core::{NewTask, Task, TaskPatch};

/// In-memory stand-in for the remote task store.
#[derive(Debug, Default)]
pub struct InMemoryTasks {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    tasks: BTreeMap<u64, Task>,
}

impl InMemoryTasks {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend seeded with a small sample board.
    pub fn with_samples() -> Self {
        let backend = Self::new();
        {
            let mut inner = backend.inner.lock();
            use crate::core::{Priority, TaskStatus};
            let samples = [
                ("Design token vesting schedule", TaskStatus::Todo, None, Some(Priority::High)),
                ("Implement staking contract", TaskStatus::InProgress, Some("0xB1"), Some(Priority::High)),
                ("Audit bridge adapter", TaskStatus::InProgress, Some("0xB2"), Some(Priority::Medium)),
                ("Write deployment runbook", TaskStatus::InReview, Some("0xB1"), Some(Priority::Low)),
                ("Set up testnet faucet", TaskStatus::Done, Some("0xB2"), None),
            ];
            for (title, status, builder, priority) in samples {
                let id = inner.next_id();
                inner.tasks.insert(
                    id,
                    Task {
                        id,
                        title: title.to_string(),
                        description: None,
                        status,
                        builder: builder.map(String::from),
                        priority,
                        effort: None,
                        project_id: 1,
                        step_id: None,
                        created_at: Some(Utc::now()),
                        updated_at: Some(Utc::now()),
                    },
                );
            }
        }
        backend
    }

    /// Number of stored tasks.
    pub fn len(&self) -> usize {
        self.inner.lock().tasks.len()
    }

    /// Whether the backend holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().tasks.is_empty()
    }
}

impl Inner {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

#[async_trait]
impl TaskAccess for InMemoryTasks {
    async fn list(&self, project_id: Option<u64>) -> ApiResult<Vec<Task>> {
        let inner = self.inner.lock();
        Ok(inner
            .tasks
            .values()
            .filter(|t| project_id.map_or(true, |p| t.project_id == p))
            .cloned()
            .collect())
    }

    async fn get(&self, id: u64) -> ApiResult<Task> {
        self.inner
            .lock()
            .tasks
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("task {} not found", id)))
    }

    async fn create(&self, task: NewTask) -> ApiResult<Task> {
        let mut inner = self.inner.lock();
        let id = inner.next_id();
        let now = Utc::now();
        let stored = Task {
            id,
            title: task.title,
            description: task.description,
            status: task.status,
            builder: None,
            priority: task.priority,
            effort: task.effort,
            project_id: task.project_id,
            step_id: task.step_id,
            created_at: Some(now),
            updated_at: Some(now),
        };
        inner.tasks.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: u64, patch: TaskPatch) -> ApiResult<Task> {
        let mut inner = self.inner.lock();
        let task = inner
            .tasks
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("task {} not found", id)))?;
        patch.apply(task);
        task.updated_at = Some(Utc::now());
        Ok(task.clone())
    }

    async fn remove(&self, id: u64) -> ApiResult<()> {
        let mut inner = self.inner.lock();
        if inner.tasks.remove(&id).is_none() {
            return Err(ApiError::NotFound(format!("task {} not found", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Priority, TaskStatus};

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let store = InMemoryTasks::new();
        let created = store
            .create(NewTask::new("Write tests", 1).with_priority(Priority::Medium).with_effort(3))
            .await
            .unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.status, TaskStatus::Todo);
        assert!(created.created_at.is_some());
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips_user_fields() {
        let store = InMemoryTasks::new();
        let created = store
            .create(
                NewTask::new("Write tests", 1)
                    .with_description("cover the guard")
                    .with_priority(Priority::Medium)
                    .with_effort(3),
            )
            .await
            .unwrap();

        let fetched = store.get(created.id).await.unwrap();
        assert_eq!(fetched.title, "Write tests");
        assert_eq!(fetched.description.as_deref(), Some("cover the guard"));
        assert_eq!(fetched.priority, Some(Priority::Medium));
        assert_eq!(fetched.effort, Some(3));
    }

    #[tokio::test]
    async fn test_list_scoped_by_project() {
        let store = InMemoryTasks::new();
        store.create(NewTask::new("a", 1)).await.unwrap();
        store.create(NewTask::new("b", 2)).await.unwrap();
        store.create(NewTask::new("c", 1)).await.unwrap();

        let scoped = store.list(Some(1)).await.unwrap();
        assert_eq!(scoped.len(), 2);
        assert!(scoped.iter().all(|t| t.project_id == 1));

        let all = store.list(None).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store = InMemoryTasks::new();
        assert!(matches!(store.get(99).await, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_is_idempotent() {
        let store = InMemoryTasks::new();
        let task = store.create(NewTask::new("a", 1)).await.unwrap();

        let first = store.update(task.id, TaskPatch::status(TaskStatus::InReview)).await.unwrap();
        let second = store.update(task.id, TaskPatch::status(TaskStatus::InReview)).await.unwrap();
        assert_eq!(first.status, second.status);
        assert_eq!(second.status, TaskStatus::InReview);
    }

    #[tokio::test]
    async fn test_convenience_compositions() {
        let store = InMemoryTasks::new();
        let task = store.create(NewTask::new("a", 1)).await.unwrap();

        let taken = store.assign_to_self(task.id, "0xABC").await.unwrap();
        assert_eq!(taken.status, TaskStatus::InProgress);
        assert_eq!(taken.builder.as_deref(), Some("0xABC"));

        let reviewed = store.request_review(task.id).await.unwrap();
        assert_eq!(reviewed.status, TaskStatus::InReview);

        let approved = store.approve(task.id).await.unwrap();
        assert_eq!(approved.status, TaskStatus::Done);

        let released = store.release(task.id).await.unwrap();
        assert_eq!(released.status, TaskStatus::Todo);
        assert!(released.builder.is_none());
    }

    #[tokio::test]
    async fn test_remove_deletes() {
        let store = InMemoryTasks::new();
        let task = store.create(NewTask::new("a", 1)).await.unwrap();
        store.remove(task.id).await.unwrap();
        assert!(store.is_empty());
        assert!(matches!(store.remove(task.id).await, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_samples_seed_a_board() {
        let store = InMemoryTasks::with_samples();
        assert_eq!(store.len(), 5);
        let tasks = store.list(Some(1)).await.unwrap();
        assert!(tasks.iter().any(|t| t.status == TaskStatus::Done));
    }
}
