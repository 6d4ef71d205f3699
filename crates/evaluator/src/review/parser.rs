//! Extraction of per-criterion grades from free-form reviewer output.
//!
//! The model is asked for bare JSON but routinely wraps it in prose or
//! markdown fences. The first balanced object that names a criterion is
//! decoded; everything around it is ignored.

use std::collections::HashMap;

use code_grader_core::domain::{Criterion, DomainError, Grade, ReviewGrades};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use thiserror::Error;
use tracing::warn;

/// Upper bound on the bytes scanned while looking for the review object.
pub const MAX_SCAN_BYTES: usize = 64 * 1024;

pub const PARSE_FAILURE_COMMENT: &str = "Could not parse the reviewer response.";
pub const MISSING_CRITERION_COMMENT: &str = "The reviewer did not grade this criterion.";

#[derive(Debug, Error)]
pub enum ReviewParseError {
    #[error("no review object found in response")]
    NoObject,

    #[error("JSON object is not closed within {} bytes", MAX_SCAN_BYTES)]
    Unterminated,

    #[error("invalid review structure: {0}")]
    Structure(#[from] serde_json::Error),

    #[error(transparent)]
    Grade(#[from] DomainError),
}

#[derive(Debug, Deserialize)]
struct RawCriterion {
    grade: i64,
    #[serde(default)]
    comment: String,
}

/// Finds the brace closing the `{` at `start`, spending at most `budget` bytes.
///
/// Braces inside JSON string literals do not count, so comments such as
/// `"use {} here"` cannot cut the object short.
fn balanced_close(bytes: &[u8], start: usize, budget: &mut usize) -> Option<usize> {
    let end = bytes.len().min(start.saturating_add(*budget));

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..end].iter().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    *budget -= offset + 1;
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }

    *budget -= end - start;
    None
}

/// Strict variant of [`parse_review`] that reports why decoding failed.
///
/// Candidate objects are tried in order of their opening brace, so braces in
/// the prose before the review do not hide it. Objects naming no criterion
/// are skipped. When nothing decodes, the error of the first failing candidate
/// is returned. Candidates are only looked for within [`MAX_SCAN_BYTES`] of
/// the first `{`, and all scans together share that same budget.
pub fn try_parse_review(raw: &str) -> Result<ReviewGrades, ReviewParseError> {
    let bytes = raw.as_bytes();
    let mut start = raw.find('{').ok_or(ReviewParseError::NoObject)?;
    let window_end = bytes.len().min(start.saturating_add(MAX_SCAN_BYTES));
    let mut budget = MAX_SCAN_BYTES;
    let mut first_error = None;

    loop {
        let attempt = match balanced_close(bytes, start, &mut budget) {
            // `{` and `}` are ASCII, so both ends are char boundaries.
            Some(close) => decode_review(&raw[start..=close]),
            None => Err(ReviewParseError::Unterminated),
        };
        match attempt {
            Ok(Some(grades)) => return Ok(grades),
            Ok(None) => {}
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }

        let next = bytes[start + 1..window_end]
            .iter()
            .position(|&byte| byte == b'{');
        match next {
            Some(offset) if budget > 0 => start += offset + 1,
            _ => return Err(first_error.unwrap_or(ReviewParseError::NoObject)),
        }
    }
}

/// Decodes one candidate span; `None` when it names none of the criteria.
fn decode_review(span: &str) -> Result<Option<ReviewGrades>, ReviewParseError> {
    let object: Map<String, Value> = serde_json::from_str(span)?;
    let names_a_criterion = Criterion::REVIEWED
        .iter()
        .filter_map(|criterion| criterion.review_key())
        .any(|key| object.contains_key(key));
    if !names_a_criterion {
        return Ok(None);
    }

    let mut decoded = HashMap::new();
    for criterion in Criterion::REVIEWED {
        let Some(value) = criterion.review_key().and_then(|key| object.get(key)) else {
            continue;
        };
        let entry = RawCriterion::deserialize(value)?;
        decoded.insert(criterion, (Grade::new(entry.grade)?, entry.comment));
    }

    Ok(Some(ReviewGrades::from_fn(|criterion| {
        decoded
            .remove(&criterion)
            .unwrap_or_else(|| (Grade::NOT_ASSESSED, MISSING_CRITERION_COMMENT.to_string()))
    })))
}

/// Decodes reviewer output into the three reviewed criteria.
///
/// Total: any failure yields every criterion at grade 0 with
/// [`PARSE_FAILURE_COMMENT`].
pub fn parse_review(raw: &str) -> ReviewGrades {
    try_parse_review(raw).unwrap_or_else(|err| {
        warn!(error = %err, response_len = raw.len(), "failed to parse reviewer response");
        ReviewGrades::not_assessed(PARSE_FAILURE_COMMENT)
    })
}

/// Renders grades in the exact JSON shape the reviewer prompt asks for.
pub fn render_review(grades: &ReviewGrades) -> String {
    let object: Map<String, Value> = grades
        .iter()
        .filter_map(|entry| {
            entry.criterion().review_key().map(|key| {
                (
                    key.to_string(),
                    json!({ "grade": entry.grade().value(), "comment": entry.comment() }),
                )
            })
        })
        .collect();

    Value::Object(object).to_string()
}
