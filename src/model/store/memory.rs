use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::model::db::{Choice, NewChoice, NewQuestion, Question};
use crate::model::mongodb::Id;

use super::{PollStore, LATEST_QUESTIONS_LIMIT};

/// An in-memory store backing the test suite, so API tests need no
/// external database.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    questions: Vec<Question>,
    choices: Vec<Choice>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[rocket::async_trait]
impl PollStore for MemoryStore {
    async fn insert_question(&self, question: NewQuestion) -> Result<Question> {
        let question = Question {
            id: Id::new(),
            question,
        };
        let mut inner = self.inner.lock().unwrap();
        inner.questions.push(question.clone());
        Ok(question)
    }

    async fn insert_choice(&self, choice: NewChoice) -> Result<Choice> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.questions.iter().any(|q| q.id == choice.question_id) {
            return Err(Error::not_found(format!(
                "Question with ID '{}'",
                choice.question_id
            )));
        }
        let choice = Choice {
            id: Id::new(),
            choice,
        };
        inner.choices.push(choice.clone());
        Ok(choice)
    }

    async fn latest_questions(&self, now: DateTime<Utc>) -> Result<Vec<Question>> {
        let inner = self.inner.lock().unwrap();
        let mut questions = inner
            .questions
            .iter()
            .filter(|q| q.publication_time <= now)
            .cloned()
            .collect::<Vec<_>>();
        questions.sort_by(|a, b| b.publication_time.cmp(&a.publication_time));
        questions.truncate(LATEST_QUESTIONS_LIMIT as usize);
        Ok(questions)
    }

    async fn question(&self, id: Id) -> Result<Option<Question>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.questions.iter().find(|q| q.id == id).cloned())
    }

    async fn visible_question(&self, id: Id, now: DateTime<Utc>) -> Result<Option<Question>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .questions
            .iter()
            .find(|q| q.id == id && q.publication_time <= now)
            .cloned())
    }

    async fn question_choices(&self, question_id: Id) -> Result<Vec<Choice>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .choices
            .iter()
            .filter(|c| c.question_id == question_id)
            .cloned()
            .collect())
    }

    async fn increment_vote_count(&self, question_id: Id, choice_id: Id) -> Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        match inner
            .choices
            .iter_mut()
            .find(|c| c.id == choice_id && c.choice.question_id == question_id)
        {
            Some(choice) => {
                choice.choice.vote_count += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
