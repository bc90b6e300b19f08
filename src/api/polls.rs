use rocket::{form::Form, response::Redirect, serde::json::Json, Route, State};

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::model::{
    api::{
        DetailContext, IndexContext, QuestionDetail, QuestionResults, QuestionSummary,
        ResultsContext, VoteErrorContext,
    },
    mongodb::Id,
    store::PollStore,
};

pub fn routes() -> Vec<Route> {
    routes![index, detail, results, vote]
}

/// The message shown when a vote is submitted without a valid choice.
const NO_CHOICE_MESSAGE: &str = "You didn't select a choice.";

#[get("/questions")]
pub(crate) async fn index(
    store: &State<Box<dyn PollStore>>,
    clock: &State<Box<dyn Clock>>,
) -> Result<Json<IndexContext>> {
    let now = clock.now();
    let questions = store.latest_questions(now).await?;
    let latest_question_list = questions
        .iter()
        .map(|question| QuestionSummary::from_question(question, now))
        .collect();
    Ok(Json(IndexContext {
        latest_question_list,
    }))
}

#[get("/questions/<question_id>")]
pub(crate) async fn detail(
    question_id: Id,
    store: &State<Box<dyn PollStore>>,
    clock: &State<Box<dyn Clock>>,
) -> Result<Json<DetailContext>> {
    let question = store
        .visible_question(question_id, clock.now())
        .await?
        .ok_or_else(|| Error::not_found(format!("Question with ID '{question_id}'")))?;
    let choices = store.question_choices(question.id).await?;
    Ok(Json(DetailContext {
        question: QuestionDetail::from_parts(&question, &choices),
    }))
}

#[get("/questions/<question_id>/results")]
pub(crate) async fn results(
    question_id: Id,
    store: &State<Box<dyn PollStore>>,
    clock: &State<Box<dyn Clock>>,
) -> Result<Json<ResultsContext>> {
    let question = store
        .visible_question(question_id, clock.now())
        .await?
        .ok_or_else(|| Error::not_found(format!("Question with ID '{question_id}'")))?;
    let choices = store.question_choices(question.id).await?;
    Ok(Json(ResultsContext {
        question: QuestionResults::from_parts(&question, &choices),
    }))
}

/// The vote submission form. `choice` is the ID of one of the question's
/// choices; anything else is a validation failure, not a server error.
#[derive(Debug, FromForm)]
pub(crate) struct VoteForm {
    choice: Option<String>,
}

#[derive(Responder)]
pub(crate) enum VoteResponse {
    Redirect(Redirect),
    #[response(status = 422)]
    Invalid(Json<VoteErrorContext>),
}

#[post("/questions/<question_id>/vote", data = "<form>")]
pub(crate) async fn vote(
    question_id: Id,
    form: Form<VoteForm>,
    store: &State<Box<dyn PollStore>>,
) -> Result<VoteResponse> {
    // Note: no visibility gate here. Any existing question accepts votes,
    // published or not; only the read endpoints filter on publication time.
    let question = store
        .question(question_id)
        .await?
        .ok_or_else(|| Error::not_found(format!("Question with ID '{question_id}'")))?;

    // An unparsable choice ID cannot belong to this question, so it falls
    // through to the same validation failure as a missing one.
    let choice_id = form
        .choice
        .as_deref()
        .and_then(|raw| raw.parse::<Id>().ok());
    let voted = match choice_id {
        Some(choice_id) => store.increment_vote_count(question.id, choice_id).await?,
        None => false,
    };

    if voted {
        Ok(VoteResponse::Redirect(Redirect::to(uri!(results(
            question_id
        )))))
    } else {
        // Redisplay the voting form with an error message.
        let choices = store.question_choices(question.id).await?;
        Ok(VoteResponse::Invalid(Json(VoteErrorContext {
            question: QuestionDetail::from_parts(&question, &choices),
            error_message: NO_CHOICE_MESSAGE.to_string(),
        })))
    }
}
