use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    /// Overall score requested over zero categories
    #[error("Cannot compute an overall score: no categories to average")]
    EmptyCategorySet,

    #[error("Invalid scoring configuration: {0}")]
    InvalidConfig(String),
}
