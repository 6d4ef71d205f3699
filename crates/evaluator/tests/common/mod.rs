#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use code_grader_core::domain::{ReviewService, Similarity, SimilarityService};
use tokio::sync::Barrier;

pub const SCENARIO_A_REVIEW: &str = r#"blah {"Правильность": {"grade": 5, "comment": "correct"}, "Оптимальность": {"grade": 4, "comment": "quadratic"}, "Стиль": {"grade": 3, "comment": "short names"}} trailing"#;

/// Returns a fixed similarity and counts how often it was asked.
#[derive(Clone)]
pub struct CountingSimilarity {
    similarity: Similarity,
    calls: Arc<AtomicUsize>,
}

impl CountingSimilarity {
    pub fn new(similarity: Similarity) -> Self {
        Self {
            similarity,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SimilarityService for CountingSimilarity {
    async fn measure_similarity(&self, _reference: &str, _candidate: &str) -> Similarity {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.similarity
    }
}

/// Returns a fixed review and counts how often it was asked.
#[derive(Clone)]
pub struct CountingReview {
    response: String,
    calls: Arc<AtomicUsize>,
}

impl CountingReview {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReviewService for CountingReview {
    async fn request_review(&self, _submitted_code: &str, _algorithm_name: &str) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

/// Never answers within any reasonable budget.
pub struct StallingSimilarity;

#[async_trait]
impl SimilarityService for StallingSimilarity {
    async fn measure_similarity(&self, _reference: &str, _candidate: &str) -> Similarity {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Similarity::Measured(0.5)
    }
}

pub struct StallingReview;

#[async_trait]
impl ReviewService for StallingReview {
    async fn request_review(&self, _submitted_code: &str, _algorithm_name: &str) -> String {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        String::from("{}")
    }
}

/// Similarity and review halves that only complete when both run at once.
pub struct Rendezvous {
    barrier: Arc<Barrier>,
    similarity: Similarity,
    review: String,
}

impl Rendezvous {
    pub fn pair(similarity: Similarity, review: &str) -> Arc<Self> {
        Arc::new(Self {
            barrier: Arc::new(Barrier::new(2)),
            similarity,
            review: review.to_string(),
        })
    }
}

#[async_trait]
impl SimilarityService for Rendezvous {
    async fn measure_similarity(&self, _reference: &str, _candidate: &str) -> Similarity {
        self.barrier.wait().await;
        self.similarity
    }
}

#[async_trait]
impl ReviewService for Rendezvous {
    async fn request_review(&self, _submitted_code: &str, _algorithm_name: &str) -> String {
        self.barrier.wait().await;
        self.review.clone()
    }
}
