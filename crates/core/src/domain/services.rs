use async_trait::async_trait;

use super::Similarity;

/// Remote embedding-similarity service.
///
/// Implementations make one best-effort attempt and report every failure as
/// [`Similarity::Unavailable`]; they never return an error.
#[async_trait]
pub trait SimilarityService: Send + Sync {
    async fn measure_similarity(&self, reference: &str, candidate: &str) -> Similarity;
}

/// Remote generative-text reviewer.
///
/// Returns the raw model answer. Every failure is reported as an empty string.
#[async_trait]
pub trait ReviewService: Send + Sync {
    async fn request_review(&self, submitted_code: &str, algorithm_name: &str) -> String;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    struct FixedSimilarity(f64);

    #[async_trait]
    impl SimilarityService for FixedSimilarity {
        async fn measure_similarity(&self, _reference: &str, _candidate: &str) -> Similarity {
            Similarity::Measured(self.0)
        }
    }

    struct EchoReview;

    #[async_trait]
    impl ReviewService for EchoReview {
        async fn request_review(&self, submitted_code: &str, algorithm_name: &str) -> String {
            format!("{algorithm_name}: {submitted_code}")
        }
    }

    #[tokio::test]
    async fn services_are_usable_as_trait_objects() {
        let similarity: Arc<dyn SimilarityService> = Arc::new(FixedSimilarity(0.42));
        let review: Arc<dyn ReviewService> = Arc::new(EchoReview);

        assert_eq!(
            similarity.measure_similarity("a", "b").await,
            Similarity::Measured(0.42)
        );
        assert_eq!(review.request_review("x = 1", "Noop").await, "Noop: x = 1");
    }
}
