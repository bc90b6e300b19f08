use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::api::ApiId;
use crate::model::db::{Choice, Question};

/// A question as it appears in the index listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSummary {
    pub id: ApiId,
    pub text: String,
    pub publication_time: DateTime<Utc>,
    /// Whether the question was published within the last day, as seen
    /// at the time the response was produced.
    pub was_published_recently: bool,
}

impl QuestionSummary {
    pub fn from_question(question: &Question, now: DateTime<Utc>) -> Self {
        Self {
            id: question.id.into(),
            text: question.text.clone(),
            publication_time: question.publication_time,
            was_published_recently: question.was_published_recently(now),
        }
    }
}

/// A choice as offered on the detail (voting) page: no tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: ApiId,
    pub text: String,
}

impl From<&Choice> for ChoiceOption {
    fn from(choice: &Choice) -> Self {
        Self {
            id: choice.id.into(),
            text: choice.text.clone(),
        }
    }
}

/// A choice as shown on the results page, tally included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceResult {
    pub id: ApiId,
    pub text: String,
    pub vote_count: u64,
}

impl From<&Choice> for ChoiceResult {
    fn from(choice: &Choice) -> Self {
        Self {
            id: choice.id.into(),
            text: choice.text.clone(),
            vote_count: choice.vote_count,
        }
    }
}

/// A question with its choices, ready for the voting form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDetail {
    pub id: ApiId,
    pub text: String,
    pub publication_time: DateTime<Utc>,
    pub choices: Vec<ChoiceOption>,
}

impl QuestionDetail {
    pub fn from_parts(question: &Question, choices: &[Choice]) -> Self {
        Self {
            id: question.id.into(),
            text: question.text.clone(),
            publication_time: question.publication_time,
            choices: choices.iter().map(ChoiceOption::from).collect(),
        }
    }
}

/// A question with its choices and their tallies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResults {
    pub id: ApiId,
    pub text: String,
    pub publication_time: DateTime<Utc>,
    pub choices: Vec<ChoiceResult>,
}

impl QuestionResults {
    pub fn from_parts(question: &Question, choices: &[Choice]) -> Self {
        Self {
            id: question.id.into(),
            text: question.text.clone(),
            publication_time: question.publication_time,
            choices: choices.iter().map(ChoiceResult::from).collect(),
        }
    }
}

/// Rendering context for the index page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexContext {
    pub latest_question_list: Vec<QuestionSummary>,
}

/// Rendering context for the detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailContext {
    pub question: QuestionDetail,
}

/// Rendering context for the results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsContext {
    pub question: QuestionResults,
}

/// Rendering context for redisplaying the voting form after an invalid
/// submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteErrorContext {
    pub question: QuestionDetail,
    pub error_message: String,
}

/// Request body for creating a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSpec {
    pub text: String,
    pub publication_time: DateTime<Utc>,
}

/// Request body for adding a choice to a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceSpec {
    pub text: String,
}
