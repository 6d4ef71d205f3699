mod aggregate;
mod criterion;
mod error;
mod grade;
mod ids;
mod originality;
mod report;
mod services;
mod submission;

pub use aggregate::{AggregateResult, PASS_THRESHOLD};
pub use criterion::Criterion;
pub use error::DomainError;
pub use grade::Grade;
pub use ids::EvaluationId;
pub use originality::{
    HIGH_SIMILARITY_COMMENT, HIGH_SIMILARITY_GRADE, HIGH_SIMILARITY_THRESHOLD,
    NOT_PERFORMED_COMMENT, ORIGINAL_COMMENT, ORIGINAL_GRADE, ORIGINALITY_BANDS,
    OriginalityBand, PLAGIARISM_COMMENT, PLAGIARISM_GRADE, PLAGIARISM_THRESHOLD, Similarity,
    score_originality,
};
pub use report::{CriterionGrade, EvaluationReport, ReviewGrades};
pub use services::{ReviewService, SimilarityService};
pub use submission::Submission;
