pub mod config;
pub mod error;
pub mod evaluator;
pub mod events;
pub mod mock;
pub mod review;
pub mod similarity;

pub use config::{EvaluatorConfig, ReviewConfig, SimilarityConfig};
pub use error::{EvaluatorError, Result};
pub use evaluator::{Evaluation, Evaluator};
pub use events::{EvaluationEvent, EventBroadcaster, EventStream};
pub use mock::{MockReview, MockSimilarity};
pub use review::{HttpReviewClient, parse_review, render_review, try_parse_review};
pub use similarity::HttpSimilarityClient;
pub use tokio_util::sync::CancellationToken;
