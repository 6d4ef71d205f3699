//! Wire types of the evaluation contract shared with the bot/web layer.

use serde::{Deserialize, Serialize};

/// What the caller must supply for one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub template_code: String,
    pub submitted_code: String,
    pub algorithm_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionView {
    pub criterion: String,
    pub grade: u8,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluateResponse {
    pub evaluation_id: String,
    pub mean_grade: f64,
    pub correctness_grade: u8,
    /// Authoritative pass decision; callers must not re-derive it.
    pub passed: bool,
    /// Formatted similarity, `"N/A"` when it could not be measured.
    pub similarity: String,
    pub criteria: Vec<CriterionView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awarded_points: Option<u32>,
}
