use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid grade: {0}. grade must be in [0, 5]")]
    InvalidGrade(i64),
}
