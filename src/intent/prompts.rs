//! Classification prompt templates.
//!
//! The wording is part of the backend contract: the model is asked for a bare
//! `true`/`false` or a bare timestamp, and the parsers downstream expect that.

/// Flag question used for the immediate-publish branch.
pub const PUBLISH_NOW_QUESTION: &str = "the user wants to create post on Facebook";

/// Date question used for the deferred-publish branch.
pub const PUBLISH_LATER_QUESTION: &str = "the user wants to schedule a Facebook post";

pub fn flag_prompt(question: &str, message: &str) -> String {
    format!(
        "Does the following message indicate that {question}? \
         Reply with only 'true' or 'false'.\n\nMessage: \"{message}\""
    )
}

pub fn date_prompt(question: &str, message: &str) -> String {
    format!(
        "Does the following message indicate that {question}? \
         If yes, reply only with the scheduled date (e.g., '2025-07-03 14:00'). \
         If not, reply only with 'false'.\n\nMessage: \"{message}\""
    )
}
