//! Core business logic - framework-agnostic board, card, checklist and template operations.
//!
//! Nothing in here knows about HTTP. Operations that touch a student's data take the acting
//! user explicitly as an [`Actor`] and scope every read and write to that user's boards.

/// Board lifecycle: instantiation from a template, reset, settings and board queries
pub mod board;
/// Card workflow: status, plan flag and notes
pub mod card;
/// Checklist sub-task toggling
pub mod checklist;
/// Completion percentages, lane counts and lane/plan filtering
pub mod progress;
/// Subject catalogue lookups
pub mod subject;
/// Template store reads and seeding
pub mod template;

/// The authenticated user on whose behalf an operation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Id issued by the upstream authentication service
    pub user_id: String,
}

impl Actor {
    /// Creates an actor for the given user id.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}
