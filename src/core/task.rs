//! Task domain types.
//!
//! Tasks are the unit of work on a board. The remote store assigns ids and
//! timestamps; the client only ever submits user-editable fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Workflow status of a task, one column per status.
///
/// On the wire this is always an integer code 0-3; the store never sees
/// string status names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum TaskStatus {
    /// Unclaimed work (code 0)
    Todo,
    /// Claimed by a builder (code 1)
    InProgress,
    /// Submitted for owner review (code 2)
    InReview,
    /// Approved by the owner (code 3)
    Done,
}

impl TaskStatus {
    /// All statuses in column order.
    pub const ALL: [Self; 4] = [Self::Todo, Self::InProgress, Self::InReview, Self::Done];

    /// Wire code for this status.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Column heading shown on the board.
    pub fn label(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::InReview => "In Review",
            Self::Done => "Done",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl From<TaskStatus> for u8 {
    fn from(status: TaskStatus) -> Self {
        status as Self
    }
}

impl TryFrom<u8> for TaskStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Todo),
            1 => Ok(Self::InProgress),
            2 => Ok(Self::InReview),
            3 => Ok(Self::Done),
            other => Err(format!("invalid task status code: {}", other)),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "todo" | "to-do" | "0" => Ok(Self::Todo),
            "in-progress" | "progress" | "1" => Ok(Self::InProgress),
            "in-review" | "review" | "2" => Ok(Self::InReview),
            "done" | "3" => Ok(Self::Done),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

/// Task priority, an optional small enumeration (wire codes 0-2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority as Self
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Low),
            1 => Ok(Self::Medium),
            2 => Ok(Self::High),
            other => Err(format!("invalid priority code: {}", other)),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" | "0" => Ok(Self::Low),
            "medium" | "1" => Ok(Self::Medium),
            "high" | "2" => Ok(Self::High),
            other => Err(format!("unknown priority: {}", other)),
        }
    }
}

/// A task as returned by the remote store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Store-assigned identifier
    pub id: u64,
    /// Short title
    pub title: String,
    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Workflow status
    pub status: TaskStatus,
    /// Wallet address of the assigned builder; absent means unassigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builder: Option<String>,
    /// Optional priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Optional effort estimate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort: Option<u32>,
    /// Owning project
    pub project_id: u64,
    /// Optional phase within the project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_id: Option<u64>,
    /// Set by the store on creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Set by the store on every mutation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Whether no builder is assigned.
    pub fn is_unassigned(&self) -> bool {
        self.builder.as_deref().map_or(true, str::is_empty)
    }

    /// Whether the given wallet address is the assigned builder.
    pub fn is_assigned_to(&self, address: &str) -> bool {
        self.builder.as_deref() == Some(address)
    }
}

/// Payload for creating a task. The store fills in `id` and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New tasks always start in To Do
    #[serde(default = "NewTask::initial_status")]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort: Option<u32>,
    pub project_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_id: Option<u64>,
}

impl NewTask {
    /// Create a minimal new-task payload for a project.
    pub fn new(title: impl Into<String>, project_id: u64) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: Self::initial_status(),
            priority: None,
            effort: None,
            project_id,
            step_id: None,
        }
    }

    fn initial_status() -> TaskStatus {
        TaskStatus::Todo
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the effort estimate.
    pub fn with_effort(mut self, effort: u32) -> Self {
        self.effort = Some(effort);
        self
    }

    /// Set the step.
    pub fn with_step(mut self, step_id: u64) -> Self {
        self.step_id = Some(step_id);
        self
    }
}

/// Partial task mutation sent to `PUT /tasks/:id`.
///
/// Omitted fields are left untouched by the store. `builder` is a
/// double-`Option`: `None` omits the field, `Some(None)` serializes an
/// explicit `null` so release can clear the assignment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builder: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_id: Option<u64>,
}

impl TaskPatch {
    /// Patch that only changes the status.
    pub fn status(status: TaskStatus) -> Self {
        Self { status: Some(status), ..Self::default() }
    }

    /// Patch applied when a builder takes an unassigned task:
    /// `{status: 1, builder: address}`.
    pub fn take(address: impl Into<String>) -> Self {
        Self {
            status: Some(TaskStatus::InProgress),
            builder: Some(Some(address.into())),
            ..Self::default()
        }
    }

    /// Patch applied on release: `{status: 0, builder: null}`.
    pub fn release() -> Self {
        Self { status: Some(TaskStatus::Todo), builder: Some(None), ..Self::default() }
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.builder.is_none()
            && self.priority.is_none()
            && self.effort.is_none()
            && self.step_id.is_none()
    }

    /// Apply the patch to a task in place (used by the in-memory backend).
    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = Some(description.clone());
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(builder) = &self.builder {
            task.builder = builder.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = Some(priority);
        }
        if let Some(effort) = self.effort {
            task.effort = Some(effort);
        }
        if let Some(step_id) = self.step_id {
            task.step_id = Some(step_id);
        }
    }
}

/// A category label associated with a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier
    pub id: u64,
    /// Display name
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        Task {
            id: 7,
            title: "Write tests".to_string(),
            description: None,
            status: TaskStatus::Todo,
            builder: None,
            priority: Some(Priority::Medium),
            effort: Some(3),
            project_id: 1,
            step_id: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_status_wire_codes() {
        assert_eq!(TaskStatus::Todo.code(), 0);
        assert_eq!(TaskStatus::InProgress.code(), 1);
        assert_eq!(TaskStatus::InReview.code(), 2);
        assert_eq!(TaskStatus::Done.code(), 3);
    }

    #[test]
    fn test_status_serializes_as_integer() {
        let json = serde_json::to_string(&TaskStatus::InReview).unwrap();
        assert_eq!(json, "2");
    }

    #[test]
    fn test_status_rejects_out_of_range_codes() {
        for code in [4u8, 5, 99, 255] {
            assert!(serde_json::from_str::<TaskStatus>(&code.to_string()).is_err());
        }
    }

    #[test]
    fn test_status_round_trips_all_codes() {
        for status in TaskStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            let back: TaskStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn test_priority_wire_codes() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "2");
        assert!(serde_json::from_str::<Priority>("3").is_err());
    }

    #[test]
    fn test_task_deserializes_camel_case() {
        let json = r#"{
            "id": 7,
            "title": "Write tests",
            "status": 0,
            "projectId": 1,
            "createdAt": "2024-01-01T00:00:00Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 7);
        assert_eq!(task.project_id, 1);
        assert_eq!(task.status, TaskStatus::Todo);
        assert!(task.created_at.is_some());
        assert!(task.is_unassigned());
    }

    #[test]
    fn test_empty_builder_counts_as_unassigned() {
        let mut task = sample_task();
        task.builder = Some(String::new());
        assert!(task.is_unassigned());
        task.builder = Some("0xABC".to_string());
        assert!(!task.is_unassigned());
        assert!(task.is_assigned_to("0xABC"));
    }

    #[test]
    fn test_release_patch_sends_explicit_null_builder() {
        let json = serde_json::to_value(TaskPatch::release()).unwrap();
        assert_eq!(json["status"], 0);
        assert!(json["builder"].is_null());
        assert!(json.as_object().unwrap().contains_key("builder"));
    }

    #[test]
    fn test_status_patch_omits_builder_field() {
        let json = serde_json::to_value(TaskPatch::status(TaskStatus::InReview)).unwrap();
        assert_eq!(json["status"], 2);
        assert!(!json.as_object().unwrap().contains_key("builder"));
    }

    #[test]
    fn test_take_patch_assigns_and_advances() {
        let patch = TaskPatch::take("0xABC");
        let mut task = sample_task();
        patch.apply(&mut task);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.builder.as_deref(), Some("0xABC"));
    }

    #[test]
    fn test_apply_release_clears_builder() {
        let mut task = sample_task();
        task.status = TaskStatus::InReview;
        task.builder = Some("0xABC".to_string());
        TaskPatch::release().apply(&mut task);
        assert_eq!(task.status, TaskStatus::Todo);
        assert!(task.builder.is_none());
    }

    #[test]
    fn test_new_task_defaults_to_todo() {
        let new = NewTask::new("Write tests", 1).with_priority(Priority::Medium).with_effort(3);
        assert_eq!(new.status, TaskStatus::Todo);
        let json = serde_json::to_value(&new).unwrap();
        assert_eq!(json["status"], 0);
        assert_eq!(json["projectId"], 1);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("in-review".parse::<TaskStatus>().unwrap(), TaskStatus::InReview);
        assert_eq!("1".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert!("archived".parse::<TaskStatus>().is_err());
    }
}
