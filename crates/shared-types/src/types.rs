//! Typed questionnaire records shared by the scoring pipeline and its callers

use crate::ingest::{IngestError, RawQuestion};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest weight a question may carry
pub const MIN_WEIGHT: f64 = 0.5;
/// Largest weight a question may carry
pub const MAX_WEIGHT: f64 = 2.0;

/// The three permitted answer values of every question
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub enum AnswerValue {
    /// 1 - missing or non-compliant
    NonCompliant,
    /// 5 - partially in place
    Partial,
    /// 10 - fully in place
    Compliant,
}

impl AnswerValue {
    pub const ALL: [AnswerValue; 3] = [
        AnswerValue::NonCompliant,
        AnswerValue::Partial,
        AnswerValue::Compliant,
    ];

    pub fn value(self) -> u8 {
        match self {
            AnswerValue::NonCompliant => 1,
            AnswerValue::Partial => 5,
            AnswerValue::Compliant => 10,
        }
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.value())
    }
}

impl TryFrom<i64> for AnswerValue {
    type Error = IngestError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(AnswerValue::NonCompliant),
            5 => Ok(AnswerValue::Partial),
            10 => Ok(AnswerValue::Compliant),
            other => Err(IngestError::InvalidAnswerValue(other)),
        }
    }
}

impl From<AnswerValue> for u8 {
    fn from(answer: AnswerValue) -> Self {
        answer.value()
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Hierarchical question number such as "3.12"
///
/// Ordering is numeric on (section, number), so "2.10" sorts after "2.9".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuestionId {
    section: u32,
    number: u32,
    raw: String,
}

impl QuestionId {
    pub fn section(&self) -> u32 {
        self.section
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for QuestionId {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || IngestError::InvalidQuestionId(s.to_string());
        let (section, number) = s.trim().split_once('.').ok_or_else(invalid)?;
        Ok(QuestionId {
            section: section.parse().map_err(|_| invalid())?,
            number: number.parse().map_err(|_| invalid())?,
            raw: s.trim().to_string(),
        })
    }
}

impl TryFrom<String> for QuestionId {
    type Error = IngestError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<QuestionId> for String {
    fn from(id: QuestionId) -> Self {
        id.raw
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// The closed set of top-level question categories
///
/// Report layouts have exactly one slot per variant; a fourth category has to
/// be added here before any consumer can render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Documentation")]
    Documentation,
    #[serde(rename = "Landlord-Tenant Communication")]
    Communication,
    #[serde(rename = "Evidence Gathering Systems and Procedures")]
    EvidenceGathering,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Documentation,
        Category::Communication,
        Category::EvidenceGathering,
    ];

    /// Display name as stored on each question
    pub fn name(&self) -> &'static str {
        match self {
            Category::Documentation => "Documentation",
            Category::Communication => "Landlord-Tenant Communication",
            Category::EvidenceGathering => "Evidence Gathering Systems and Procedures",
        }
    }

    /// Resolve a stored category name; names outside the closed set yield `None`
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Property-level risk tier selecting which questions apply to an audit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    #[serde(rename = "tier_0")]
    Tier0,
    #[serde(rename = "tier_1")]
    Tier1,
    #[serde(rename = "tier_2")]
    Tier2,
    #[serde(rename = "tier_3")]
    Tier3,
    #[serde(rename = "tier_4")]
    Tier4,
}

impl RiskTier {
    pub const ALL: [RiskTier; 5] = [
        RiskTier::Tier0,
        RiskTier::Tier1,
        RiskTier::Tier2,
        RiskTier::Tier3,
        RiskTier::Tier4,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Tier0 => "tier_0",
            RiskTier::Tier1 => "tier_1",
            RiskTier::Tier2 => "tier_2",
            RiskTier::Tier3 => "tier_3",
            RiskTier::Tier4 => "tier_4",
        }
    }
}

impl FromStr for RiskTier {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| IngestError::InvalidTier(s.to_string()))
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Level a scoring example illustrates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreLevel {
    Low,
    Medium,
    High,
}

impl FromStr for ScoreLevel {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(ScoreLevel::Low),
            "medium" => Ok(ScoreLevel::Medium),
            "high" => Ok(ScoreLevel::High),
            other => Err(IngestError::InvalidScoreLevel(other.to_string())),
        }
    }
}

/// Auditor guidance explaining what a given score level looks like
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreExample {
    pub score_level: ScoreLevel,
    pub reason_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub value: AnswerValue,
    pub label: String,
}

/// A single weighted questionnaire item
///
/// Deserializes from a storage row ([`RawQuestion`]) and runs the same checks
/// as ingestion, so an unvalidated question cannot be read in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawQuestion")]
pub struct Question {
    pub id: QuestionId,
    pub category: String,
    /// Section within the category, e.g. "Certificates"
    pub subcategory: String,
    pub text: String,
    pub critical: bool,
    pub weight: f64,
    pub options: Vec<AnswerOption>,
    pub tiers: Vec<RiskTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivation: Option<String>,
    pub score_examples: Vec<ScoreExample>,
}

impl Question {
    /// Label of the option matching `value`, if the question offers one
    pub fn option_label(&self, value: AnswerValue) -> Option<&str> {
        self.options
            .iter()
            .find(|opt| opt.value == value)
            .map(|opt| opt.label.as_str())
    }

    pub fn applies_to(&self, tier: RiskTier) -> bool {
        self.tiers.contains(&tier)
    }

    /// The fixed category slot this question belongs to, if any
    pub fn category_kind(&self) -> Option<Category> {
        Category::from_name(&self.category)
    }
}

/// One landlord answer to one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub question_id: String,
    #[serde(rename = "answer_value")]
    pub answer: AnswerValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Response {
    pub fn new(question_id: impl Into<String>, answer: AnswerValue) -> Self {
        Self {
            question_id: question_id.into(),
            answer,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}
