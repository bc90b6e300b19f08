//! Administrative write endpoints: creating questions and their choices.
//! These correspond to the admin entry point of the site and carry no
//! authentication.

use rocket::{response::status::Created, serde::json::Json, Route, State};

use crate::clock::Clock;
use crate::error::Result;
use crate::model::{
    api::{ChoiceOption, ChoiceSpec, QuestionSpec, QuestionSummary},
    db::{NewChoice, NewQuestion},
    mongodb::Id,
    store::PollStore,
};

pub fn routes() -> Vec<Route> {
    routes![create_question, add_choice]
}

#[post("/questions", data = "<spec>", format = "json")]
pub(crate) async fn create_question(
    spec: Json<QuestionSpec>,
    store: &State<Box<dyn PollStore>>,
    clock: &State<Box<dyn Clock>>,
) -> Result<Created<Json<QuestionSummary>>> {
    let spec = spec.into_inner();
    let question = NewQuestion::new(spec.text, spec.publication_time)?;
    let question = store.insert_question(question).await?;

    let location = uri!(super::polls::detail(question.id)).to_string();
    let summary = QuestionSummary::from_question(&question, clock.now());
    Ok(Created::new(location).body(Json(summary)))
}

#[post("/questions/<question_id>/choices", data = "<spec>", format = "json")]
pub(crate) async fn add_choice(
    question_id: Id,
    spec: Json<ChoiceSpec>,
    store: &State<Box<dyn PollStore>>,
) -> Result<Created<Json<ChoiceOption>>> {
    // The store rejects choices for questions that do not exist.
    let choice = store
        .insert_choice(NewChoice::new(question_id, spec.into_inner().text))
        .await?;

    let location = uri!(super::polls::detail(question_id)).to_string();
    Ok(Created::new(location).body(Json(ChoiceOption::from(&choice))))
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rocket::{
        http::{ContentType, Status},
        local::asynchronous::{Client, LocalResponse},
        serde::json::serde_json,
    };

    use crate::api::polls;
    use crate::clock::FixedClock;
    use crate::model::api::DetailContext;
    use crate::model::db::MAX_QUESTION_TEXT;
    use crate::model::store::MemoryStore;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 4, 1, 12, 0, 0).unwrap()
    }

    async fn client() -> Client {
        let rocket = crate::rocket_for_store(
            Box::new(MemoryStore::new()),
            Box::new(FixedClock(now())),
        );
        Client::tracked(rocket).await.unwrap()
    }

    async fn post_question<'c>(client: &'c Client, spec: &QuestionSpec) -> LocalResponse<'c> {
        client
            .post(uri!(create_question))
            .header(ContentType::JSON)
            .body(serde_json::to_string(spec).unwrap())
            .dispatch()
            .await
    }

    async fn post_choice<'c>(client: &'c Client, question_id: Id, text: &str) -> LocalResponse<'c> {
        client
            .post(uri!(add_choice(question_id)))
            .header(ContentType::JSON)
            .body(
                serde_json::to_string(&ChoiceSpec {
                    text: text.to_string(),
                })
                .unwrap(),
            )
            .dispatch()
            .await
    }

    #[rocket::async_test]
    async fn created_question_becomes_visible() {
        let client = client().await;

        let spec = QuestionSpec {
            text: "What's new?".to_string(),
            publication_time: now() - Duration::hours(1),
        };
        let response = post_question(&client, &spec).await;

        assert_eq!(Status::Created, response.status());
        let summary = response.into_json::<QuestionSummary>().await.unwrap();
        assert_eq!(spec.text, summary.text);
        assert!(summary.was_published_recently);

        // The new question shows up on its detail page.
        let detail = client
            .get(uri!(polls::detail(*summary.id)))
            .dispatch()
            .await;
        assert_eq!(Status::Ok, detail.status());
    }

    #[rocket::async_test]
    async fn over_long_question_is_rejected() {
        let client = client().await;

        let spec = QuestionSpec {
            text: "x".repeat(MAX_QUESTION_TEXT + 1),
            publication_time: now(),
        };
        let response = post_question(&client, &spec).await;

        assert_eq!(Status::BadRequest, response.status());
    }

    #[rocket::async_test]
    async fn choice_for_missing_question_is_not_found() {
        let client = client().await;

        let response = post_choice(&client, Id::new(), "A").await;

        assert_eq!(Status::NotFound, response.status());
    }

    #[rocket::async_test]
    async fn added_choice_appears_on_the_detail_page() {
        let client = client().await;

        let spec = QuestionSpec {
            text: "Q1".to_string(),
            publication_time: now() - Duration::days(1),
        };
        let question = post_question(&client, &spec)
            .await
            .into_json::<QuestionSummary>()
            .await
            .unwrap();

        let response = post_choice(&client, *question.id, "A").await;
        assert_eq!(Status::Created, response.status());
        let choice = response.into_json::<ChoiceOption>().await.unwrap();
        assert_eq!("A", choice.text);

        let detail = client
            .get(uri!(polls::detail(*question.id)))
            .dispatch()
            .await;
        let context = detail.into_json::<DetailContext>().await.unwrap();
        assert_eq!(vec![choice], context.question.choices);
    }
}
