//! API-compatible types: IDs serialise as hex strings and datetimes as
//! RFC 3339, so responses are friendly to JSON consumers.

mod id;
mod question;

pub use id::ApiId;
pub use question::{
    ChoiceOption, ChoiceResult, ChoiceSpec, DetailContext, IndexContext, QuestionDetail,
    QuestionResults, QuestionSpec, QuestionSummary, ResultsContext, VoteErrorContext,
};
