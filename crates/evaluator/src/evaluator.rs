use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use code_grader_core::domain::{
    AggregateResult, EvaluationId, EvaluationReport, ReviewService, Similarity,
    SimilarityService, Submission, score_originality,
};
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::EvaluatorConfig;
use crate::error::EvaluatorError;
use crate::events::{EvaluationEvent, EventBroadcaster, EventStream};
use crate::mock::{MockReview, MockSimilarity};
use crate::review::{HttpReviewClient, parse_review};
use crate::similarity::HttpSimilarityClient;
use crate::Result;

/// Outcome of one evaluation: the full report and the decision derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    id: EvaluationId,
    report: EvaluationReport,
    result: AggregateResult,
}

impl Evaluation {
    fn new(id: EvaluationId, report: EvaluationReport) -> Self {
        let result = AggregateResult::from_report(&report);
        Self { id, report, result }
    }

    pub fn id(&self) -> EvaluationId {
        self.id
    }

    pub fn report(&self) -> &EvaluationReport {
        &self.report
    }

    pub fn result(&self) -> AggregateResult {
        self.result
    }

    pub fn mean_grade(&self) -> f64 {
        self.result.mean_grade
    }

    pub fn correctness_grade(&self) -> u8 {
        self.result.correctness_grade.value()
    }

    pub fn passed(&self) -> bool {
        self.result.passed
    }

    /// `(mean_grade, correctness_grade)`.
    pub fn scores(&self) -> (f64, u8) {
        (self.mean_grade(), self.correctness_grade())
    }

    pub fn awarded_points(&self, task_points: u32) -> u32 {
        self.result.awarded_points(task_points)
    }
}

/// Grades submissions by fusing template similarity with an LLM review.
///
/// `evaluate` never fails: upstream outages and unparseable answers degrade to
/// zero grades for the affected criteria.
pub struct Evaluator {
    similarity: Arc<dyn SimilarityService>,
    review: Arc<dyn ReviewService>,
    call_timeout: Duration,
    event_broadcaster: Arc<EventBroadcaster>,
}

impl Evaluator {
    pub fn new(similarity: Arc<dyn SimilarityService>, review: Arc<dyn ReviewService>) -> Self {
        let defaults = EvaluatorConfig::default();
        Self {
            similarity,
            review,
            call_timeout: defaults.call_timeout(),
            event_broadcaster: Arc::new(EventBroadcaster::new(defaults.event_buffer_size)),
        }
    }

    /// Wires the HTTP clients, or the in-process fakes when `mock` is set.
    pub fn from_config(config: &EvaluatorConfig) -> Result<Self> {
        info!(
            mock = config.mock,
            call_timeout_secs = config.call_timeout_secs,
            similarity_endpoint = %config.similarity.endpoint,
            review_model = %config.review.model,
            "initializing evaluator"
        );

        let (similarity, review): (Arc<dyn SimilarityService>, Arc<dyn ReviewService>) =
            if config.mock {
                (
                    Arc::new(MockSimilarity::token_overlap()),
                    Arc::new(MockReview::default()),
                )
            } else {
                let client = Client::builder().timeout(config.call_timeout()).build()?;
                (
                    Arc::new(HttpSimilarityClient::with_client(
                        client.clone(),
                        &config.similarity,
                    )),
                    Arc::new(HttpReviewClient::with_client(client, &config.review)),
                )
            };

        Ok(Self {
            similarity,
            review,
            call_timeout: config.call_timeout(),
            event_broadcaster: Arc::new(EventBroadcaster::new(config.event_buffer_size)),
        })
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    pub fn subscribe_events(&self) -> EventStream {
        self.event_broadcaster.subscribe()
    }

    pub async fn evaluate(&self, submission: &Submission) -> Evaluation {
        self.evaluate_with_cancellation(submission, &CancellationToken::new())
            .await
    }

    /// Like [`Evaluator::evaluate`], but abandons both remote calls once
    /// `cancel` fires and grades the submission as if both services were down.
    #[tracing::instrument(skip_all, fields(algorithm = %submission.algorithm_name))]
    pub async fn evaluate_with_cancellation(
        &self,
        submission: &Submission,
        cancel: &CancellationToken,
    ) -> Evaluation {
        let id = EvaluationId::new();
        info!(evaluation_id = %id, "starting evaluation");
        self.event_broadcaster.emit(EvaluationEvent::Started {
            evaluation_id: id,
            algorithm_name: submission.algorithm_name.clone(),
        });

        let calls = async {
            tokio::join!(
                self.measure_similarity(id, submission),
                self.request_review(id, submission)
            )
        };

        let (similarity, raw_review) = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!(evaluation_id = %id, "evaluation cancelled, grading as not assessed");
                self.event_broadcaster
                    .emit(EvaluationEvent::Cancelled { evaluation_id: id });
                (Similarity::Unavailable, String::new())
            }
            outcome = calls => outcome,
        };

        let report = EvaluationReport::new(
            similarity,
            score_originality(similarity),
            parse_review(&raw_review),
        );
        for entry in report.iter() {
            debug!(
                evaluation_id = %id,
                criterion = %entry.criterion(),
                grade = entry.grade().value(),
                comment = entry.comment(),
                "criterion graded"
            );
        }

        let evaluation = Evaluation::new(id, report);
        info!(
            evaluation_id = %id,
            similarity = %similarity,
            mean_grade = evaluation.mean_grade(),
            correctness_grade = evaluation.correctness_grade(),
            passed = evaluation.passed(),
            "evaluation finished"
        );
        self.event_broadcaster.emit(EvaluationEvent::Completed {
            evaluation_id: id,
            mean_grade: evaluation.mean_grade(),
            correctness_grade: evaluation.correctness_grade(),
            passed: evaluation.passed(),
        });

        evaluation
    }

    async fn measure_similarity(&self, id: EvaluationId, submission: &Submission) -> Similarity {
        self.event_broadcaster
            .emit(EvaluationEvent::SimilarityRequested { evaluation_id: id });

        let call = self
            .similarity
            .measure_similarity(&submission.template_code, &submission.submitted_code);
        let similarity = self.bounded(call).await.unwrap_or_else(|err| {
            self.log_abandoned(id, "similarity", &err);
            Similarity::Unavailable
        });

        self.event_broadcaster.emit(EvaluationEvent::SimilarityMeasured {
            evaluation_id: id,
            similarity: similarity.score(),
        });
        similarity
    }

    async fn request_review(&self, id: EvaluationId, submission: &Submission) -> String {
        self.event_broadcaster
            .emit(EvaluationEvent::ReviewRequested { evaluation_id: id });

        let call = self
            .review
            .request_review(&submission.submitted_code, &submission.algorithm_name);
        let raw_review = self.bounded(call).await.unwrap_or_else(|err| {
            self.log_abandoned(id, "review", &err);
            String::new()
        });

        self.event_broadcaster.emit(EvaluationEvent::ReviewReceived {
            evaluation_id: id,
            response_len: raw_review.len(),
        });
        raw_review
    }

    /// Applies the per-call time budget on top of whatever the client enforces.
    async fn bounded<T>(&self, call: impl Future<Output = T>) -> Result<T> {
        tokio::time::timeout(self.call_timeout, call)
            .await
            .map_err(|_| EvaluatorError::Timeout)
    }

    fn log_abandoned(&self, id: EvaluationId, service: &'static str, err: &EvaluatorError) {
        warn!(
            evaluation_id = %id,
            service,
            timeout_ms = self.call_timeout.as_millis() as u64,
            error = %err,
            "upstream call abandoned"
        );
    }
}
