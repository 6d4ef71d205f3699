//! Deterministic in-process stand-ins for the remote services.
//!
//! Selected by `mock = true` in the evaluator config and used throughout the
//! tests.

use std::collections::HashSet;

use async_trait::async_trait;
use code_grader_core::domain::{
    Criterion, Grade, ReviewGrades, ReviewService, Similarity, SimilarityService,
};

use crate::review::render_review;

#[derive(Debug, Clone, Copy, PartialEq)]
enum SimilarityMode {
    Fixed(Similarity),
    TokenOverlap,
}

/// Similarity service that never touches the network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockSimilarity {
    mode: SimilarityMode,
}

impl MockSimilarity {
    pub fn fixed(similarity: Similarity) -> Self {
        Self {
            mode: SimilarityMode::Fixed(similarity),
        }
    }

    pub fn unavailable() -> Self {
        Self::fixed(Similarity::Unavailable)
    }

    /// Jaccard overlap of whitespace-separated tokens; identical code scores 1.
    pub fn token_overlap() -> Self {
        Self {
            mode: SimilarityMode::TokenOverlap,
        }
    }
}

fn token_overlap(reference: &str, candidate: &str) -> Similarity {
    let reference: HashSet<&str> = reference.split_whitespace().collect();
    let candidate: HashSet<&str> = candidate.split_whitespace().collect();

    let union = reference.union(&candidate).count();
    if union == 0 {
        return Similarity::Unavailable;
    }
    let shared = reference.intersection(&candidate).count();
    Similarity::Measured(shared as f64 / union as f64)
}

#[async_trait]
impl SimilarityService for MockSimilarity {
    async fn measure_similarity(&self, reference: &str, candidate: &str) -> Similarity {
        match self.mode {
            SimilarityMode::Fixed(similarity) => similarity,
            SimilarityMode::TokenOverlap => token_overlap(reference, candidate),
        }
    }
}

/// Reviewer that answers every request with the same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockReview {
    response: String,
}

impl MockReview {
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }

    /// A reviewer that is down: every answer is empty.
    pub fn silent() -> Self {
        Self::with_response(String::new())
    }
}

impl Default for MockReview {
    fn default() -> Self {
        let grades = ReviewGrades::from_fn(|criterion| {
            let grade = match criterion {
                Criterion::Correctness => 5,
                _ => 4,
            };
            (Grade::new(grade).unwrap_or_default(), "Mock review.".to_string())
        });
        Self::with_response(render_review(&grades))
    }
}

#[async_trait]
impl ReviewService for MockReview {
    async fn request_review(&self, _submitted_code: &str, _algorithm_name: &str) -> String {
        self.response.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::parse_review;

    #[tokio::test]
    async fn fixed_similarity_is_returned_verbatim() {
        let mock = MockSimilarity::fixed(Similarity::Measured(0.87));

        assert_eq!(
            mock.measure_similarity("a", "b").await,
            Similarity::Measured(0.87)
        );
        assert_eq!(
            MockSimilarity::unavailable().measure_similarity("a", "b").await,
            Similarity::Unavailable
        );
    }

    #[tokio::test]
    async fn token_overlap_scores_identical_code_as_one() {
        let mock = MockSimilarity::token_overlap();
        let code = "for i in range(n):\n    swap(a, i)";

        assert_eq!(mock.measure_similarity(code, code).await, Similarity::Measured(1.0));
        assert_eq!(
            mock.measure_similarity("a b", "c d").await,
            Similarity::Measured(0.0)
        );
        assert_eq!(mock.measure_similarity("", "  ").await, Similarity::Unavailable);
    }

    #[tokio::test]
    async fn default_review_is_parseable() {
        let response = MockReview::default().request_review("pass", "Noop").await;
        let review = parse_review(&response);

        assert_eq!(review.correctness().grade().value(), 5);
        assert_eq!(review.optimality().grade().value(), 4);
        assert_eq!(review.style().grade().value(), 4);
    }

    #[tokio::test]
    async fn silent_review_is_empty() {
        assert_eq!(MockReview::silent().request_review("pass", "Noop").await, "");
    }
}
