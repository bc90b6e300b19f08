use chrono::{DateTime, Utc};
use mongodb::{
    bson::{doc, DateTime as BsonDateTime},
    options::FindOptions,
    Database,
};
use rocket::futures::TryStreamExt;

use crate::error::{Error, Result};
use crate::model::db::{Choice, NewChoice, NewQuestion, Question};
use crate::model::mongodb::{Coll, Id};

use super::{PollStore, LATEST_QUESTIONS_LIMIT};

/// The production store, backed by the `questions` and `choices`
/// collections.
pub struct MongoStore {
    questions: Coll<Question>,
    choices: Coll<Choice>,
}

impl MongoStore {
    /// Get a handle on the poll collections in the given database.
    pub fn from_db(db: &Database) -> Self {
        Self {
            questions: Coll::from_db(db),
            choices: Coll::from_db(db),
        }
    }
}

#[rocket::async_trait]
impl PollStore for MongoStore {
    async fn insert_question(&self, question: NewQuestion) -> Result<Question> {
        // Assign the ID client-side so we can hand the document back
        // without a second round trip.
        let question = Question {
            id: Id::new(),
            question,
        };
        self.questions.insert_one(&question, None).await?;
        Ok(question)
    }

    async fn insert_choice(&self, choice: NewChoice) -> Result<Choice> {
        // A choice must never reference a missing question.
        self.question(choice.question_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("Question with ID '{}'", choice.question_id)))?;
        let choice = Choice {
            id: Id::new(),
            choice,
        };
        self.choices.insert_one(&choice, None).await?;
        Ok(choice)
    }

    async fn latest_questions(&self, now: DateTime<Utc>) -> Result<Vec<Question>> {
        let filter = doc! {
            "publication_time": { "$lte": BsonDateTime::from_chrono(now) },
        };
        let options = FindOptions::builder()
            .sort(doc! { "publication_time": -1 })
            .limit(LATEST_QUESTIONS_LIMIT)
            .build();
        let questions = self
            .questions
            .find(filter, options)
            .await?
            .try_collect()
            .await?;
        Ok(questions)
    }

    async fn question(&self, id: Id) -> Result<Option<Question>> {
        Ok(self.questions.find_one(id.as_doc(), None).await?)
    }

    async fn visible_question(&self, id: Id, now: DateTime<Utc>) -> Result<Option<Question>> {
        let filter = doc! {
            "_id": *id,
            "publication_time": { "$lte": BsonDateTime::from_chrono(now) },
        };
        Ok(self.questions.find_one(filter, None).await?)
    }

    async fn question_choices(&self, question_id: Id) -> Result<Vec<Choice>> {
        let filter = doc! { "question_id": *question_id };
        let choices = self.choices.find(filter, None).await?.try_collect().await?;
        Ok(choices)
    }

    async fn increment_vote_count(&self, question_id: Id, choice_id: Id) -> Result<bool> {
        // A single relative update: concurrent votes on the same choice
        // must never be lost to a read-modify-write race.
        let filter = doc! {
            "_id": *choice_id,
            "question_id": *question_id,
        };
        let update = doc! {
            "$inc": { "vote_count": 1 },
        };
        let result = self.choices.update_one(filter, update, None).await?;
        Ok(result.modified_count == 1)
    }
}
