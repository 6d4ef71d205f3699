use std::time::Duration;

use async_trait::async_trait;
use code_grader_core::domain::ReviewService;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::prompt::build_review_prompt;
use crate::config::ReviewConfig;
use crate::error::EvaluatorError;
use crate::Result;

/// OpenAI-compatible chat-completions request.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

pub struct HttpReviewClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl HttpReviewClient {
    pub fn new(config: &ReviewConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &ReviewConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key(),
        }
    }

    async fn try_review(&self, prompt: &str) -> Result<String> {
        if self.base_url.is_empty() {
            return Err(EvaluatorError::Config(
                "review provider base_url is not configured".to_string(),
            ));
        }

        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response: ChatResponse = builder.send().await?.error_for_status()?.json().await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                EvaluatorError::MalformedResponse("review provider returned no content".to_string())
            })
    }
}

#[async_trait]
impl ReviewService for HttpReviewClient {
    #[tracing::instrument(skip_all, fields(model = %self.model, algorithm = %algorithm_name))]
    async fn request_review(&self, submitted_code: &str, algorithm_name: &str) -> String {
        info!("sending code to the reviewer model");
        let prompt = build_review_prompt(submitted_code, algorithm_name);

        match self.try_review(&prompt).await {
            Ok(text) => {
                info!(response_len = text.len(), "review received");
                text
            }
            Err(err) => {
                warn!(error = %err, "review provider call failed");
                String::new()
            }
        }
    }
}
