//! LLM code review: prompt construction, the provider client and the parser
//! that turns its free-text answer into grades.

pub mod client;
pub mod parser;
pub mod prompt;

pub use client::HttpReviewClient;
pub use parser::{
    MAX_SCAN_BYTES, MISSING_CRITERION_COMMENT, PARSE_FAILURE_COMMENT, ReviewParseError,
    parse_review, render_review, try_parse_review,
};
pub use prompt::build_review_prompt;
