use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("upstream call timed out")]
    Timeout,
}

pub type Result<T> = std::result::Result<T, EvaluatorError>;
