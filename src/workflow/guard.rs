//! Transition policy for the task workflow.
//!
//! Statuses form the pipeline To Do -> In Progress -> In Review -> Done.
//! The named actions (take, release, submit-for-review, approve) enforce
//! their full precondition sets; the generic column move is deliberately
//! looser and only enforces the Owner-only gate on reaching Done, so
//! owners can correct a board by hand.
//!
//! Rule violations never mutate anything: the guard either returns the
//! patch to submit or a user-facing error, and callers leave the task
//! untouched on rejection.

use crate::core::{Task, TaskPatch, TaskStatus, User};

/// A requested status transition, as dispatched from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionRequest {
    /// Builder claims an unassigned To Do task.
    Take,
    /// Reset to To Do and clear the assignment, from any state.
    Release,
    /// Assigned builder submits In Progress work for review.
    SubmitForReview,
    /// Owner approves an In Review task into Done.
    Approve,
    /// Free-form column-to-column move (drag path).
    Move(TaskStatus),
}

/// Rejection reasons, worded as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    #[error("Only tasks in 'To Do' column can be taken")]
    NotTakeable,

    #[error("This task has already been taken")]
    AlreadyAssigned,

    #[error("Only tasks in 'In Progress' column can be submitted for review")]
    NotSubmittable,

    #[error("Only the assigned builder can submit this task for review")]
    NotAssignee,

    #[error("Only tasks in 'In Review' column can be approved")]
    NotReviewable,

    #[error("Only the project owner can move tasks to 'Done'")]
    OwnerOnly,
}

/// Decide whether `actor` may apply `request` to `task`.
///
/// Returns the patch to submit to the store on success. The guard never
/// mutates the task itself.
pub fn authorize(
    actor: &User,
    task: &Task,
    request: TransitionRequest,
) -> Result<TaskPatch, WorkflowError> {
    match request {
        TransitionRequest::Take => {
            if task.status != TaskStatus::Todo {
                return Err(WorkflowError::NotTakeable);
            }
            if !task.is_unassigned() {
                return Err(WorkflowError::AlreadyAssigned);
            }
            Ok(TaskPatch::take(actor.address.clone()))
        }
        TransitionRequest::Release => Ok(TaskPatch::release()),
        TransitionRequest::SubmitForReview => {
            if task.status != TaskStatus::InProgress {
                return Err(WorkflowError::NotSubmittable);
            }
            if !task.is_assigned_to(&actor.address) {
                return Err(WorkflowError::NotAssignee);
            }
            Ok(TaskPatch::status(TaskStatus::InReview))
        }
        TransitionRequest::Approve => {
            if !actor.role.can_approve() {
                return Err(WorkflowError::OwnerOnly);
            }
            if task.status != TaskStatus::InReview {
                return Err(WorkflowError::NotReviewable);
            }
            Ok(TaskPatch::status(TaskStatus::Done))
        }
        TransitionRequest::Move(target) => {
            if target == TaskStatus::Done && !actor.role.can_approve() {
                return Err(WorkflowError::OwnerOnly);
            }
            Ok(TaskPatch::status(target))
        }
    }
}
