//! Per-response remediation actions

use serde::{Deserialize, Serialize};
use shared_types::{AnswerValue, Question, QuestionCatalog, Response};
use tracing::debug;

/// Action priority, ordered most urgent first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionPriority {
    Critical,
    High,
    Medium,
    Low,
}

impl ActionPriority {
    pub fn timeframe(self) -> Timeframe {
        match self {
            ActionPriority::Critical => Timeframe::Within7Days,
            ActionPriority::High => Timeframe::Within30Days,
            ActionPriority::Medium => Timeframe::Within90Days,
            ActionPriority::Low => Timeframe::Ongoing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "Immediate action required (within 7 days)")]
    Within7Days,
    #[serde(rename = "Action required within 30 days")]
    Within30Days,
    #[serde(rename = "Recommended within 90 days")]
    Within90Days,
    #[serde(rename = "Ongoing improvement")]
    Ongoing,
}

impl Timeframe {
    pub fn label(self) -> &'static str {
        match self {
            Timeframe::Within7Days => "Immediate action required (within 7 days)",
            Timeframe::Within30Days => "Action required within 30 days",
            Timeframe::Within90Days => "Recommended within 90 days",
            Timeframe::Ongoing => "Ongoing improvement",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedAction {
    pub priority: ActionPriority,
    pub question_id: String,
    pub question_text: String,
    pub category: String,
    pub subcategory: String,
    pub current_answer: String,
    pub recommendation: String,
    pub timeframe: Timeframe,
}

/// Which remediation rule fired for a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActionRule {
    /// Critical question answered 1
    CriticalFailure,
    /// Weight 2.0 question answered below 5
    HighWeightGap,
    /// Any other question answered 1
    NonCompliant,
    /// Answered 5 with weight >= 1.0
    PartialImportant,
    /// Answered 5 with weight < 1.0
    PartialMinor,
}

impl ActionRule {
    /// First matching rule wins; fully compliant answers need no action
    fn select(question: &Question, answer: AnswerValue) -> Option<Self> {
        use AnswerValue::*;

        if question.critical && answer == NonCompliant {
            Some(ActionRule::CriticalFailure)
        } else if question.weight >= 2.0 && answer < Partial {
            Some(ActionRule::HighWeightGap)
        } else if answer == NonCompliant {
            Some(ActionRule::NonCompliant)
        } else if answer == Partial && question.weight >= 1.0 {
            Some(ActionRule::PartialImportant)
        } else if answer == Partial {
            Some(ActionRule::PartialMinor)
        } else {
            None
        }
    }

    fn priority(self) -> ActionPriority {
        match self {
            ActionRule::CriticalFailure | ActionRule::HighWeightGap => ActionPriority::Critical,
            ActionRule::NonCompliant => ActionPriority::High,
            ActionRule::PartialImportant => ActionPriority::Medium,
            ActionRule::PartialMinor => ActionPriority::Low,
        }
    }

    fn recommendation(self, label: &str) -> String {
        match self {
            ActionRule::CriticalFailure => format!(
                "This is a CRITICAL COMPLIANCE issue. {}. You must address this immediately to avoid legal issues and protect your tenancy.",
                label
            ),
            ActionRule::HighWeightGap => format!(
                "This high-importance area needs urgent attention. {}. Take action immediately to improve compliance.",
                label
            ),
            ActionRule::NonCompliant => format!(
                "{}. This area requires attention to ensure full compliance and reduce risk.",
                label
            ),
            ActionRule::PartialImportant => format!(
                "{}. Consider improving your systems in this area for better compliance.",
                label
            ),
            ActionRule::PartialMinor => format!(
                "{}. This area is functioning but could be optimized.",
                label
            ),
        }
    }
}

/// Derive remediation actions, most urgent first
///
/// Responses to unknown questions, or whose answer has no matching option,
/// produce no action. Order within a priority follows response order.
pub fn generate_recommended_actions(
    responses: &[Response],
    catalog: &QuestionCatalog,
) -> Vec<RecommendedAction> {
    let mut actions: Vec<RecommendedAction> = responses
        .iter()
        .filter_map(|response| {
            let Some(question) = catalog.get(&response.question_id) else {
                debug!(question_id = %response.question_id, "no question for response, skipping action");
                return None;
            };
            let Some(label) = question.option_label(response.answer) else {
                debug!(
                    question_id = %response.question_id,
                    answer = %response.answer,
                    "no option label for answer, skipping action"
                );
                return None;
            };

            let rule = ActionRule::select(question, response.answer)?;
            let priority = rule.priority();
            Some(RecommendedAction {
                priority,
                question_id: question.id.to_string(),
                question_text: question.text.clone(),
                category: question.category.clone(),
                subcategory: question.subcategory.clone(),
                current_answer: label.to_string(),
                recommendation: rule.recommendation(label),
                timeframe: priority.timeframe(),
            })
        })
        .collect();

    // stable: input order survives within a priority
    actions.sort_by_key(|a| a.priority);
    actions
}
