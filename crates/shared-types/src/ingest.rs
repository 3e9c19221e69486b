//! Validation of loosely-shaped storage rows into typed records
//!
//! Question templates and form responses arrive from storage as JSON rows whose
//! fields may be missing, null, or stringly typed. Everything is checked here so
//! the scoring pipeline only ever sees well-formed [`Question`] and [`Response`]
//! values.

use crate::types::{
    AnswerOption, AnswerValue, Question, QuestionId, Response, RiskTier, ScoreExample, MAX_WEIGHT,
    MIN_WEIGHT,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Invalid answer value: {0} (expected 1, 5 or 10)")]
    InvalidAnswerValue(i64),

    #[error("Question {question_id}: weight {weight} outside 0.5..=2.0")]
    WeightOutOfRange { question_id: String, weight: f64 },

    #[error("Question {question_id}: unparseable weight '{raw}'")]
    InvalidWeight { question_id: String, raw: String },

    #[error("Question {0} has no answer options")]
    NoOptions(String),

    #[error("Invalid question number: '{0}' (expected section.number)")]
    InvalidQuestionId(String),

    #[error("Invalid tier: {0}")]
    InvalidTier(String),

    #[error("Invalid score level: {0}")]
    InvalidScoreLevel(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Weight column as stored; numeric columns are often serialized as strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawWeight {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAnswerOption {
    pub value: i64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawScoreExample {
    pub score_level: String,
    pub reason_text: String,
    #[serde(default)]
    pub report_action: Option<String>,
}

/// Question template row as returned by the question-definition service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawQuestion {
    pub id: String,
    pub category: String,
    pub section: String,
    pub text: String,
    #[serde(default)]
    pub critical: bool,
    pub weight: RawWeight,
    #[serde(default)]
    pub tiers: Vec<String>,
    #[serde(default)]
    pub options: Option<Vec<RawAnswerOption>>,
    #[serde(default)]
    pub motivation_learning_point: Option<String>,
    #[serde(default)]
    pub score_examples: Option<Vec<RawScoreExample>>,
}

/// Persisted form response row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawResponse {
    pub question_id: String,
    pub answer_value: i64,
    #[serde(default)]
    pub comment: Option<String>,
}

fn parse_weight(question_id: &str, raw: &RawWeight) -> Result<f64, IngestError> {
    let weight = match raw {
        RawWeight::Number(n) => *n,
        RawWeight::Text(s) => s.trim().parse().map_err(|_| IngestError::InvalidWeight {
            question_id: question_id.to_string(),
            raw: s.clone(),
        })?,
    };

    if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&weight) {
        return Err(IngestError::WeightOutOfRange {
            question_id: question_id.to_string(),
            weight,
        });
    }
    Ok(weight)
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|s| !s.trim().is_empty())
}

impl TryFrom<RawQuestion> for Question {
    type Error = IngestError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        let id: QuestionId = raw.id.parse()?;
        let weight = parse_weight(id.as_str(), &raw.weight)?;

        let options = raw
            .options
            .unwrap_or_default()
            .into_iter()
            .map(|opt| {
                Ok(AnswerOption {
                    value: AnswerValue::try_from(opt.value)?,
                    label: opt.label,
                })
            })
            .collect::<Result<Vec<_>, IngestError>>()?;
        if options.is_empty() {
            return Err(IngestError::NoOptions(id.to_string()));
        }

        let tiers = raw
            .tiers
            .iter()
            .map(|t| t.parse::<RiskTier>())
            .collect::<Result<Vec<_>, _>>()?;

        let score_examples = raw
            .score_examples
            .unwrap_or_default()
            .into_iter()
            .map(|ex| {
                Ok(ScoreExample {
                    score_level: ex.score_level.parse()?,
                    reason_text: ex.reason_text,
                    report_action: non_blank(ex.report_action),
                })
            })
            .collect::<Result<Vec<_>, IngestError>>()?;

        Ok(Question {
            id,
            category: raw.category,
            subcategory: raw.section,
            text: raw.text,
            critical: raw.critical,
            weight,
            options,
            tiers,
            motivation: non_blank(raw.motivation_learning_point),
            score_examples,
        })
    }
}

impl TryFrom<RawResponse> for Response {
    type Error = IngestError;

    fn try_from(raw: RawResponse) -> Result<Self, Self::Error> {
        Ok(Response {
            question_id: raw.question_id.trim().to_string(),
            answer: AnswerValue::try_from(raw.answer_value)?,
            comment: non_blank(raw.comment),
        })
    }
}

/// Validate a batch of raw question rows
pub fn validate_questions(rows: Vec<RawQuestion>) -> Result<Vec<Question>, IngestError> {
    rows.into_iter().map(Question::try_from).collect()
}

/// Validate a batch of raw response rows
pub fn validate_responses(rows: Vec<RawResponse>) -> Result<Vec<Response>, IngestError> {
    rows.into_iter().map(Response::try_from).collect()
}

/// Parse and validate a JSON array of question rows
pub fn questions_from_json(json: &str) -> Result<Vec<Question>, IngestError> {
    let rows: Vec<RawQuestion> = serde_json::from_str(json)?;
    validate_questions(rows)
}

/// Parse and validate a JSON array of response rows
pub fn responses_from_json(json: &str) -> Result<Vec<Response>, IngestError> {
    let rows: Vec<RawResponse> = serde_json::from_str(json)?;
    validate_responses(rows)
}
