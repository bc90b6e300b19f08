//! DB-compatible (e.g. de/serialisable) types.
//!
//! The types in this module are serialised in a DB-friendly way: IDs and
//! datetimes use MongoDB's own formats. API-facing counterparts live in
//! [`crate::model::api`].

mod choice;
mod question;

pub use choice::{Choice, NewChoice};
pub use question::{NewQuestion, Question, MAX_QUESTION_TEXT};
