use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::model::mongodb::Id;

/// Core choice data, as stored in the database.
///
/// A choice cannot exist without its owning question; `question_id` must
/// refer to an existing question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewChoice {
    /// The owning question.
    pub question_id: Id,
    /// The choice text.
    pub text: String,
    /// Tally of votes received. Only ever written via the atomic
    /// increment on the store; never decreases.
    pub vote_count: u64,
}

impl NewChoice {
    /// Create a new choice for the given question, with no votes yet.
    pub fn new(question_id: Id, text: String) -> Self {
        Self {
            question_id,
            text,
            vote_count: 0,
        }
    }
}

/// A choice from the database, with its unique ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub choice: NewChoice,
}

impl Deref for Choice {
    type Target = NewChoice;

    fn deref(&self) -> &Self::Target {
        &self.choice
    }
}
