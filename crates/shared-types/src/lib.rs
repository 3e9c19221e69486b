pub mod catalog;
pub mod ingest;
pub mod types;

pub use catalog::QuestionCatalog;
pub use ingest::{
    IngestError, RawAnswerOption, RawQuestion, RawResponse, RawScoreExample, RawWeight,
};
pub use types::{
    AnswerOption, AnswerValue, Category, Question, QuestionId, Response, RiskTier, ScoreExample,
    ScoreLevel,
};
