//! Board grouping and drop-target resolution.
//!
//! Groups the current task list into the four status columns and resolves
//! drag-drop targets to a requested status. Rendering here is plain text;
//! the guard decides whether a resolved move is actually applied.

use crate::core::{Task, TaskStatus};

/// Tasks grouped by status column.
#[derive(Debug, Clone, Default)]
pub struct Board {
    columns: [Vec<Task>; 4],
}

/// Where a dragged card was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// Dropped on a column: direct status set.
    Column(TaskStatus),
    /// Dropped on another card: adopt that card's status.
    Card(u64),
}

impl Board {
    /// Group tasks into columns, preserving the store's order within each.
    pub fn group(tasks: &[Task]) -> Self {
        let mut board = Self::default();
        for task in tasks {
            board.columns[task.status.code() as usize].push(task.clone());
        }
        board
    }

    /// Tasks in one column.
    pub fn column(&self, status: TaskStatus) -> &[Task] {
        &self.columns[status.code() as usize]
    }

    /// Total number of tasks on the board.
    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    /// Whether the board holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Vec::is_empty)
    }

    /// Render the board as text, one section per column.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for status in TaskStatus::ALL {
            let column = self.column(status);
            out.push_str(&format!("── {} ({})\n", status.label(), column.len()));
            for task in column {
                let builder = task
                    .builder
                    .as_deref()
                    .filter(|b| !b.is_empty())
                    .map(|b| format!(" → {}", b))
                    .unwrap_or_default();
                let priority = task
                    .priority
                    .map(|p| format!(" [{}]", p))
                    .unwrap_or_default();
                out.push_str(&format!("   #{} {}{}{}\n", task.id, task.title, priority, builder));
            }
            out.push('\n');
        }
        out
    }
}

/// Resolve a drop target to the requested status.
///
/// A drop on a card adopts that card's current status; returns `None` when
/// the referenced card is not in the list.
pub fn resolve_drop(target: DropTarget, tasks: &[Task]) -> Option<TaskStatus> {
    match target {
        DropTarget::Column(status) => Some(status),
        DropTarget::Card(id) => tasks.iter().find(|t| t.id == id).map(|t| t.status),
    }
}
