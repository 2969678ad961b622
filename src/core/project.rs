//! Project types and derived helpers.

use serde::{Deserialize, Serialize};

use super::task::{Task, TaskStatus};

/// A project as returned by the remote store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Store-assigned identifier
    pub id: u64,
    /// Display name
    pub name: String,
    /// Percentage of done tasks, derived by the store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f32>,
    /// Category labels used for filtering
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Project {
    /// Whether the project carries the given tag (case-insensitive).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Payload for creating a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Partial project mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Percentage of done tasks, rounded down. Empty input is 0.
pub fn progress_of(tasks: &[Task]) -> u8 {
    if tasks.is_empty() {
        return 0;
    }
    let done = tasks.iter().filter(|t| t.status == TaskStatus::Done).count();
    ((done * 100) / tasks.len()) as u8
}

/// Filter projects by tag (case-insensitive).
pub fn filter_by_tag<'a>(projects: &'a [Project], tag: &str) -> Vec<&'a Project> {
    projects.iter().filter(|p| p.has_tag(tag)).collect()
}
