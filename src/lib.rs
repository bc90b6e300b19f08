//! Backend for a small multiple-choice polls site: list the latest
//! published questions, show a question's choices, and record votes.
//!
//! All state lives in the store behind [`model::store::PollStore`]; the
//! handlers themselves hold no mutable state and every request is served
//! independently.

#[macro_use]
extern crate rocket;

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;

use rocket::{Build, Rocket};

use clock::{Clock, SystemClock};

/// Assemble the server: routes, request logging, database, wall clock.
pub fn build() -> Rocket<Build> {
    rocket::build()
        .mount("/", api::routes())
        .attach(logging::LoggerFairing)
        .attach(config::DatabaseFairing)
        .manage(Box::new(SystemClock) as Box<dyn Clock>)
}

/// A Rocket over an explicit store and clock, so tests can run against
/// in-memory state and a fixed timestamp.
#[cfg(test)]
pub(crate) fn rocket_for_store(
    store: Box<dyn model::store::PollStore>,
    clock: Box<dyn Clock>,
) -> Rocket<Build> {
    rocket::build()
        .mount("/", api::routes())
        .manage(store)
        .manage(clock)
}
