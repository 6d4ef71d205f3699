//! HTTP client of the embedding-similarity service.
//!
//! Speaks the Hugging Face sentence-similarity pipeline: one source sentence
//! compared against a list of candidates, answered with one score per
//! candidate.

use std::time::Duration;

use async_trait::async_trait;
use code_grader_core::domain::{Similarity, SimilarityService};
use reqwest::Client;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::SimilarityConfig;
use crate::error::EvaluatorError;
use crate::Result;

#[derive(Debug, Serialize)]
struct SimilarityRequest<'a> {
    inputs: SimilarityInputs<'a>,
    options: SimilarityOptions,
}

#[derive(Debug, Serialize)]
struct SimilarityInputs<'a> {
    source_sentence: &'a str,
    sentences: [&'a str; 1],
}

#[derive(Debug, Serialize)]
struct SimilarityOptions {
    wait_for_model: bool,
}

pub struct HttpSimilarityClient {
    client: Client,
    endpoint: String,
    token: Option<String>,
    wait_for_model: bool,
}

impl HttpSimilarityClient {
    pub fn new(config: &SimilarityConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    /// Reuses an existing connection pool; the pool's timeout applies.
    pub fn with_client(client: Client, config: &SimilarityConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            token: config.token(),
            wait_for_model: config.wait_for_model,
        }
    }

    async fn try_measure(&self, reference: &str, candidate: &str) -> Result<f64> {
        let request = SimilarityRequest {
            inputs: SimilarityInputs {
                source_sentence: reference,
                sentences: [candidate],
            },
            options: SimilarityOptions {
                wait_for_model: self.wait_for_model,
            },
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?.error_for_status()?;
        let scores: Vec<f64> = response.json().await?;

        scores.first().copied().ok_or_else(|| {
            EvaluatorError::MalformedResponse("similarity service returned no scores".to_string())
        })
    }
}

#[async_trait]
impl SimilarityService for HttpSimilarityClient {
    #[tracing::instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn measure_similarity(&self, reference: &str, candidate: &str) -> Similarity {
        info!("requesting code similarity");

        match self.try_measure(reference, candidate).await {
            Ok(score) => {
                info!(score, "similarity received");
                Similarity::from_score(score)
            }
            Err(err) => {
                warn!(error = %err, "similarity service unavailable");
                Similarity::Unavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_compares_one_reference_against_one_candidate() {
        let request = SimilarityRequest {
            inputs: SimilarityInputs {
                source_sentence: "def a(): pass",
                sentences: ["def b(): pass"],
            },
            options: SimilarityOptions {
                wait_for_model: true,
            },
        };

        let json = serde_json::to_value(&request).expect("serialize request");
        assert_eq!(
            json,
            serde_json::json!({
                "inputs": {
                    "source_sentence": "def a(): pass",
                    "sentences": ["def b(): pass"]
                },
                "options": { "wait_for_model": true }
            })
        );
    }
}
