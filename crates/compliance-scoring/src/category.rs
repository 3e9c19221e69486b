//! Weighted category scores and the overall score

use crate::config::RiskThresholds;
use crate::error::ScoringError;
use crate::levels::{round_to, RiskColor, RiskLevel};
use serde::{Deserialize, Serialize};
use shared_types::{AnswerValue, QuestionCatalog, Response};
use std::collections::HashMap;

pub const MAX_SCORE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub category: String,
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub risk_level: RiskLevel,
    pub color: RiskColor,
}

impl CategoryScore {
    fn from_raw(category: &str, raw: f64, risk: &RiskThresholds) -> Self {
        let risk_level = risk.classify(raw);
        Self {
            category: category.to_string(),
            score: round_to(raw, 2),
            max_score: MAX_SCORE,
            percentage: round_to(raw / MAX_SCORE * 100.0, 1),
            risk_level,
            color: risk_level.color(),
        }
    }

    /// Zero-valued stand-in for a category with no computed score
    pub fn placeholder(category: &str) -> Self {
        Self {
            category: category.to_string(),
            score: 0.0,
            max_score: MAX_SCORE,
            percentage: 0.0,
            risk_level: RiskLevel::High,
            color: RiskLevel::High.color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallScore {
    pub score: f64,
    pub risk_level: RiskLevel,
    pub color: RiskColor,
}

/// First response per question number; later duplicates are ignored
pub(crate) fn answers_by_question(responses: &[Response]) -> HashMap<&str, AnswerValue> {
    let mut answers = HashMap::with_capacity(responses.len());
    for response in responses {
        answers
            .entry(response.question_id.as_str())
            .or_insert(response.answer);
    }
    answers
}

/// Weighted mean per category, over answered questions only
///
/// Categories come out in catalog order. A category with no answered questions
/// scores 0 (high risk).
pub fn calculate_category_scores(
    responses: &[Response],
    catalog: &QuestionCatalog,
    risk: &RiskThresholds,
) -> Vec<CategoryScore> {
    let answers = answers_by_question(responses);

    catalog
        .categories()
        .into_iter()
        .map(|category| {
            let (weighted_sum, weight_sum) = catalog
                .in_category(category)
                .filter_map(|q| {
                    answers
                        .get(q.id.as_str())
                        .map(|answer| (answer.as_f64() * q.weight, q.weight))
                })
                .fold((0.0, 0.0), |(ws, w), (a, b)| (ws + a, w + b));

            let raw = if weight_sum > 0.0 {
                weighted_sum / weight_sum
            } else {
                0.0
            };
            CategoryScore::from_raw(category, raw, risk)
        })
        .collect()
}

/// Unweighted mean of category scores
pub fn calculate_overall_score(
    category_scores: &[CategoryScore],
    risk: &RiskThresholds,
) -> Result<OverallScore, ScoringError> {
    if category_scores.is_empty() {
        return Err(ScoringError::EmptyCategorySet);
    }

    let total: f64 = category_scores.iter().map(|c| c.score).sum();
    let score = round_to(total / category_scores.len() as f64, 2);
    let risk_level = risk.classify(score);

    Ok(OverallScore {
        score,
        risk_level,
        color: risk_level.color(),
    })
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use shared_types::AnswerValue::{Compliant, NonCompliant, Partial};

    fn risk() -> RiskThresholds {
        RiskThresholds::default()
    }

    #[test]
    fn test_weighted_mean_over_answered_questions() {
        let responses = vec![
            Response::new("1.1", Compliant),
            Response::new("1.3", NonCompliant),
        ];
        let scores = calculate_category_scores(&responses, &catalog(), &risk());
        let docs = scores.iter().find(|c| c.category == DOCS).unwrap();

        // (10*2 + 1*1) / 3; unanswered 1.2 and 2.1 are excluded from both sums
        assert_eq!(docs.score, 7.0);
        assert_eq!(docs.percentage, 70.0);
        assert_eq!(docs.risk_level, RiskLevel::Medium);
        assert_eq!(docs.color, RiskColor::Yellow);
        assert_eq!(docs.max_score, 10.0);
    }

    #[test]
    fn test_unanswered_category_scores_zero() {
        let responses = vec![Response::new("1.1", Compliant)];
        let scores = calculate_category_scores(&responses, &catalog(), &risk());
        let comms = scores.iter().find(|c| c.category == COMMS).unwrap();

        assert_eq!(comms.score, 0.0);
        assert_eq!(comms.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_categories_follow_catalog_order() {
        let scores = calculate_category_scores(&[], &catalog(), &risk());
        let names: Vec<_> = scores.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec![DOCS, COMMS, EVIDENCE]);
    }

    #[test]
    fn test_rounds_score_and_percentage() {
        let responses = vec![
            Response::new("6.1", Partial),
            Response::new("6.2", NonCompliant),
        ];
        let scores = calculate_category_scores(&responses, &catalog(), &risk());
        let comms = scores.iter().find(|c| c.category == COMMS).unwrap();

        // (5*1.5 + 1*0.5) / 2.0 = 4.0
        assert_eq!(comms.score, 4.0);
        assert_eq!(comms.percentage, 40.0);
        assert_eq!(comms.risk_level, RiskLevel::Medium);

        let responses = vec![
            Response::new("1.1", Partial),
            Response::new("1.2", Compliant),
            Response::new("1.3", NonCompliant),
        ];
        let scores = calculate_category_scores(&responses, &catalog(), &risk());
        // (10 + 20 + 1) / 5 = 6.2
        assert_eq!(scores[0].score, 6.2);
    }

    #[test]
    fn test_risk_uses_unrounded_mean() {
        let catalog = QuestionCatalog::new(vec![
            question("3.1", DOCS, "Certificates", 2.0, true),
            question("3.2", DOCS, "Certificates", 0.771, false),
        ]);
        let responses = vec![
            Response::new("3.1", Compliant),
            Response::new("3.2", NonCompliant),
        ];
        let scores = calculate_category_scores(&responses, &catalog, &risk());

        // 20.771 / 2.771 = 7.4958..., displayed as 7.5 but still medium risk
        assert_eq!(scores[0].score, 7.5);
        assert_eq!(scores[0].risk_level, RiskLevel::Medium);
        assert_eq!(scores[0].color, RiskColor::Yellow);
    }

    #[test]
    fn test_responses_for_unknown_questions_are_ignored() {
        let responses = vec![
            Response::new("1.1", Compliant),
            Response::new("99.1", NonCompliant),
        ];
        let scores = calculate_category_scores(&responses, &catalog(), &risk());
        assert_eq!(scores[0].score, 10.0);
    }

    #[test]
    fn test_overall_is_unweighted_mean() {
        let categories = vec![
            CategoryScore::from_raw(DOCS, 10.0, &risk()),
            CategoryScore::from_raw(COMMS, 5.0, &risk()),
            CategoryScore::from_raw(EVIDENCE, 1.0, &risk()),
        ];
        let overall = calculate_overall_score(&categories, &risk()).unwrap();
        assert_eq!(overall.score, 5.33);
        assert_eq!(overall.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_overall_requires_categories() {
        assert_eq!(
            calculate_overall_score(&[], &risk()),
            Err(ScoringError::EmptyCategorySet)
        );
    }

    #[test]
    fn test_placeholder_is_high_risk_zero() {
        let placeholder = CategoryScore::placeholder(EVIDENCE);
        assert_eq!(placeholder.score, 0.0);
        assert_eq!(placeholder.risk_level, RiskLevel::High);
        assert_eq!(placeholder.color, RiskColor::Red);
    }
}
