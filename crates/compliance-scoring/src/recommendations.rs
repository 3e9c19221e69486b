//! Actions grouped per subcategory with an overall priority and impact

use crate::actions::{ActionPriority, RecommendedAction};
use crate::slots::ByCategory;
use crate::subcategory::SubcategoryScore;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use shared_types::Category;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Impact {
    #[serde(rename = "Legal Exposure")]
    LegalExposure,
    #[serde(rename = "Tribunal Risk")]
    TribunalRisk,
    #[serde(rename = "Best Practice")]
    BestPractice,
    #[serde(rename = "Optimization")]
    Optimization,
}

impl Impact {
    /// 1 = most urgent, 4 = least
    pub fn priority(self) -> u8 {
        match self {
            Impact::LegalExposure => 1,
            Impact::TribunalRisk => 2,
            Impact::BestPractice => 3,
            Impact::Optimization => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Impact::LegalExposure => "Legal Exposure",
            Impact::TribunalRisk => "Tribunal Risk",
            Impact::BestPractice => "Best Practice",
            Impact::Optimization => "Optimization",
        }
    }

    /// First matching rule wins
    fn derive(actions: &[&RecommendedAction], score: f64) -> Self {
        let has = |p: ActionPriority| actions.iter().any(|a| a.priority == p);

        if has(ActionPriority::Critical) || score <= 3.0 {
            Impact::LegalExposure
        } else if has(ActionPriority::High) || score <= 5.0 {
            Impact::TribunalRisk
        } else if score <= 7.0 {
            Impact::BestPractice
        } else {
            Impact::Optimization
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub subcategory: String,
    pub score: f64,
    pub suggestions: Vec<String>,
    pub priority: u8,
    pub impact: Impact,
}

/// Group actions by (category, subcategory) into the three category slots
///
/// Groups appear in the order their first action appears. Groups whose
/// category is outside the fixed set are dropped.
pub fn group_recommendations(
    actions: &[RecommendedAction],
    subcategory_scores: &[SubcategoryScore],
) -> ByCategory<Vec<Recommendation>> {
    let mut groups: IndexMap<(&str, &str), Vec<&RecommendedAction>> = IndexMap::new();
    for action in actions {
        groups
            .entry((action.category.as_str(), action.subcategory.as_str()))
            .or_default()
            .push(action);
    }

    let mut grouped: ByCategory<Vec<Recommendation>> = ByCategory::default();
    for ((category, subcategory), group) in groups {
        let Some(slot) = Category::from_name(category) else {
            warn!(category, subcategory, "category outside the report set, dropping recommendations");
            continue;
        };

        let score = subcategory_scores
            .iter()
            .find(|s| s.category == category && s.name == subcategory)
            .map(|s| s.score)
            .unwrap_or(0.0);
        let impact = Impact::derive(&group, score);

        grouped.get_mut(slot).push(Recommendation {
            subcategory: subcategory.to_string(),
            score,
            suggestions: group.iter().map(|a| a.recommendation.clone()).collect(),
            priority: impact.priority(),
            impact,
        });
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Timeframe;
    use crate::category::fixtures::*;
    use crate::levels::TrafficLight;

    fn action(priority: ActionPriority, category: &str, subcategory: &str, text: &str) -> RecommendedAction {
        RecommendedAction {
            priority,
            question_id: "1.1".to_string(),
            question_text: "Question?".to_string(),
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            current_answer: "Answer".to_string(),
            recommendation: text.to_string(),
            timeframe: priority.timeframe(),
        }
    }

    fn sub(category: &str, name: &str, score: f64) -> SubcategoryScore {
        SubcategoryScore {
            name: name.to_string(),
            category: category.to_string(),
            score,
            color: TrafficLight::Orange,
            question_count: 2,
        }
    }

    fn impact_for(priorities: &[ActionPriority], score: f64) -> Impact {
        let actions: Vec<_> = priorities
            .iter()
            .map(|p| action(*p, DOCS, "Certificates", "fix"))
            .collect();
        let refs: Vec<_> = actions.iter().collect();
        Impact::derive(&refs, score)
    }

    #[test]
    fn test_impact_rules_in_order() {
        use ActionPriority::*;
        assert_eq!(impact_for(&[Critical], 9.0), Impact::LegalExposure);
        assert_eq!(impact_for(&[Low], 3.0), Impact::LegalExposure);
        assert_eq!(impact_for(&[High], 8.0), Impact::TribunalRisk);
        assert_eq!(impact_for(&[Medium], 5.0), Impact::TribunalRisk);
        assert_eq!(impact_for(&[Medium], 7.0), Impact::BestPractice);
        assert_eq!(impact_for(&[Low], 7.5), Impact::Optimization);
    }

    #[test]
    fn test_priority_matches_impact() {
        assert_eq!(Impact::LegalExposure.priority(), 1);
        assert_eq!(Impact::TribunalRisk.priority(), 2);
        assert_eq!(Impact::BestPractice.priority(), 3);
        assert_eq!(Impact::Optimization.priority(), 4);
        assert_eq!(
            serde_json::to_string(&Impact::TribunalRisk).unwrap(),
            format!("\"{}\"", Impact::TribunalRisk.label())
        );
    }

    #[test]
    fn test_groups_by_subcategory_into_slots() {
        let actions = vec![
            action(ActionPriority::Critical, DOCS, "Certificates", "Renew gas certificate"),
            action(ActionPriority::Medium, COMMS, "Written Records", "Keep written records"),
            action(ActionPriority::Medium, DOCS, "Certificates", "Track expiry dates"),
        ];
        let scores = vec![sub(DOCS, "Certificates", 3.7), sub(COMMS, "Written Records", 5.0)];

        let grouped = group_recommendations(&actions, &scores);

        assert_eq!(grouped.documentation.len(), 1);
        let certs = &grouped.documentation[0];
        assert_eq!(certs.subcategory, "Certificates");
        assert_eq!(certs.score, 3.7);
        assert_eq!(
            certs.suggestions,
            vec!["Renew gas certificate".to_string(), "Track expiry dates".to_string()]
        );
        assert_eq!(certs.priority, 1);
        assert_eq!(certs.impact, Impact::LegalExposure);

        assert_eq!(grouped.communication[0].impact, Impact::TribunalRisk);
        assert!(grouped.evidence_gathering.is_empty());
    }

    #[test]
    fn test_unknown_category_dropped() {
        let actions = vec![action(ActionPriority::High, "Finance", "Rent", "Chase arrears")];
        let grouped = group_recommendations(&actions, &[sub("Finance", "Rent", 1.0)]);
        assert!(grouped.iter().all(|(_, recs)| recs.is_empty()));
    }

    #[test]
    fn test_missing_subcategory_score_defaults_to_zero() {
        let actions = vec![action(ActionPriority::Low, EVIDENCE, "Evidence Archives", "Digitise")];
        let grouped = group_recommendations(&actions, &[]);
        let rec = &grouped.evidence_gathering[0];
        assert_eq!(rec.score, 0.0);
        assert_eq!(rec.impact, Impact::LegalExposure);
        assert_eq!(rec.suggestions.len(), 1);
        assert_eq!(actions[0].timeframe, Timeframe::Ongoing);
    }
}
