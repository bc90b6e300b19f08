use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::model::db::{Choice, NewChoice, NewQuestion, Question};
use crate::model::mongodb::Id;

mod mongo;
pub use mongo::MongoStore;

#[cfg(test)]
mod memory;
#[cfg(test)]
pub use memory::MemoryStore;

/// Maximum number of questions the index listing returns.
pub const LATEST_QUESTIONS_LIMIT: i64 = 5;

/// The persistence collaborator: everything the handlers need from storage.
///
/// Implementations must be safe to share across concurrently executing
/// requests, and the vote increment must be atomic at the storage layer so
/// concurrent votes on the same choice are never lost.
#[rocket::async_trait]
pub trait PollStore: Send + Sync {
    /// Insert a new question, returning it with its assigned ID.
    async fn insert_question(&self, question: NewQuestion) -> Result<Question>;

    /// Insert a new choice, returning it with its assigned ID.
    /// Fails with `NotFound` if the owning question does not exist.
    async fn insert_choice(&self, choice: NewChoice) -> Result<Choice>;

    /// The questions published at `now` (`publication_time <= now`),
    /// newest first, at most [`LATEST_QUESTIONS_LIMIT`].
    async fn latest_questions(&self, now: DateTime<Utc>) -> Result<Vec<Question>>;

    /// Look up a question by ID regardless of its publication time.
    async fn question(&self, id: Id) -> Result<Option<Question>>;

    /// Look up a question by ID, visible only if published at `now`.
    /// An unpublished question is indistinguishable from an absent one.
    async fn visible_question(&self, id: Id, now: DateTime<Utc>) -> Result<Option<Question>>;

    /// All choices belonging to the given question.
    async fn question_choices(&self, question_id: Id) -> Result<Vec<Choice>>;

    /// Atomically add one vote to the given choice of the given question.
    /// Returns false, changing nothing, if the choice does not belong to
    /// that question.
    async fn increment_vote_count(&self, question_id: Id, choice_id: Id) -> Result<bool>;
}
