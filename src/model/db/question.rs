use std::ops::Deref;

use chrono::{DateTime, Duration, Utc};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::mongodb::Id;

/// Maximum length of a question's text, in characters.
pub const MAX_QUESTION_TEXT: usize = 200;

/// Core question data, as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    /// The question text.
    pub text: String,
    /// When the question becomes visible. May be in the future.
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub publication_time: DateTime<Utc>,
}

impl NewQuestion {
    /// Create a new question, rejecting over-long text. The publication
    /// time is unconstrained.
    pub fn new(text: String, publication_time: DateTime<Utc>) -> Result<Self> {
        if text.chars().count() > MAX_QUESTION_TEXT {
            return Err(Error::bad_request(format!(
                "Question text must be at most {MAX_QUESTION_TEXT} characters"
            )));
        }
        Ok(Self {
            text,
            publication_time,
        })
    }

    /// True iff the question was published within the day ending at `now`.
    /// Both boundaries are inclusive; a future publication time is never
    /// "recent".
    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        now - Duration::days(1) <= self.publication_time && self.publication_time <= now
    }
}

/// A question from the database, with its unique ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub question: NewQuestion,
}

impl Deref for Question {
    type Target = NewQuestion;

    fn deref(&self) -> &Self::Target {
        &self.question
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 4, 1, 12, 0, 0).unwrap()
    }

    fn question_published_at(time: DateTime<Utc>) -> NewQuestion {
        NewQuestion::new("What's new?".to_string(), time).unwrap()
    }

    #[test]
    fn future_question_is_not_recent() {
        let now = noon();
        let question = question_published_at(now + Duration::days(30));
        assert!(!question.was_published_recently(now));
    }

    #[test]
    fn old_question_is_not_recent() {
        let now = noon();
        let question = question_published_at(now - Duration::days(1) - Duration::seconds(1));
        assert!(!question.was_published_recently(now));
    }

    #[test]
    fn recent_question_is_recent() {
        let now = noon();
        let question = question_published_at(now - Duration::hours(23) - Duration::minutes(59));
        assert!(question.was_published_recently(now));
        let question = question_published_at(now);
        assert!(question.was_published_recently(now));
    }

    #[test]
    fn window_boundaries_are_inclusive() {
        let now = noon();
        let question = question_published_at(now - Duration::days(1));
        assert!(question.was_published_recently(now));
        let question = question_published_at(now + Duration::seconds(1));
        assert!(!question.was_published_recently(now));
    }

    #[test]
    fn over_long_text_is_rejected() {
        let text = "x".repeat(MAX_QUESTION_TEXT + 1);
        assert!(NewQuestion::new(text, noon()).is_err());
        let text = "x".repeat(MAX_QUESTION_TEXT);
        assert!(NewQuestion::new(text, noon()).is_ok());
    }
}
