//! Question catalog passed explicitly into every scoring computation

use crate::types::{Question, RiskTier};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An immutable, ordered set of questions keyed by question number
///
/// Catalog order is the order questions were supplied in; it determines the
/// order categories are reported in. If two questions share a number the first
/// one wins. Deserializing reads a list of storage rows and validates each one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Question>", into = "Vec<Question>")]
pub struct QuestionCatalog {
    questions: IndexMap<String, Question>,
}

impl QuestionCatalog {
    pub fn new(questions: Vec<Question>) -> Self {
        let mut map = IndexMap::with_capacity(questions.len());
        for question in questions {
            map.entry(question.id.as_str().to_string())
                .or_insert(question);
        }
        Self { questions: map }
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.values()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Distinct category names in catalog order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for question in self.iter() {
            if !seen.contains(&question.category.as_str()) {
                seen.push(&question.category);
            }
        }
        seen
    }

    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Question> {
        self.iter().filter(move |q| q.category == category)
    }

    /// Subset of questions that apply to audits of the given risk tier
    pub fn for_tier(&self, tier: RiskTier) -> QuestionCatalog {
        self.iter()
            .filter(|q| q.applies_to(tier))
            .cloned()
            .collect()
    }

    pub fn group_by_category(&self) -> IndexMap<&str, Vec<&Question>> {
        let mut grouped: IndexMap<&str, Vec<&Question>> = IndexMap::new();
        for question in self.iter() {
            grouped
                .entry(question.category.as_str())
                .or_default()
                .push(question);
        }
        grouped
    }
}

impl FromIterator<Question> for QuestionCatalog {
    fn from_iter<I: IntoIterator<Item = Question>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<Question>> for QuestionCatalog {
    fn from(questions: Vec<Question>) -> Self {
        Self::new(questions)
    }
}

impl From<QuestionCatalog> for Vec<Question> {
    fn from(catalog: QuestionCatalog) -> Self {
        catalog.questions.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AnswerOption, AnswerValue};

    fn question(id: &str, category: &str, tiers: &[RiskTier]) -> Question {
        Question {
            id: id.parse().unwrap(),
            category: category.to_string(),
            subcategory: "General".to_string(),
            text: format!("Question {}", id),
            critical: false,
            weight: 1.0,
            options: vec![AnswerOption {
                value: AnswerValue::Compliant,
                label: "Yes".to_string(),
            }],
            tiers: tiers.to_vec(),
            motivation: None,
            score_examples: Vec::new(),
        }
    }

    fn sample() -> QuestionCatalog {
        QuestionCatalog::new(vec![
            question("1.1", "Documentation", &RiskTier::ALL),
            question("6.1", "Landlord-Tenant Communication", &[RiskTier::Tier0]),
            question("1.2", "Documentation", &[RiskTier::Tier0, RiskTier::Tier1]),
        ])
    }

    #[test]
    fn test_lookup_by_number() {
        let catalog = sample();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("6.1").unwrap().category, "Landlord-Tenant Communication");
        assert!(catalog.get("9.9").is_none());
    }

    #[test]
    fn test_categories_in_catalog_order() {
        let catalog = sample();
        assert_eq!(
            catalog.categories(),
            vec!["Documentation", "Landlord-Tenant Communication"]
        );
        assert_eq!(catalog.in_category("Documentation").count(), 2);
    }

    #[test]
    fn test_for_tier_filters_questions() {
        let catalog = sample();
        let tier_four = catalog.for_tier(RiskTier::Tier4);
        assert_eq!(tier_four.len(), 1);
        assert!(tier_four.get("1.1").is_some());
        assert_eq!(catalog.for_tier(RiskTier::Tier1).len(), 2);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let mut dup = question("1.1", "Evidence Gathering Systems and Procedures", &[]);
        dup.text = "Duplicate".to_string();
        let catalog = QuestionCatalog::new(vec![
            question("1.1", "Documentation", &[]),
            dup,
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("1.1").unwrap().category, "Documentation");
    }

    #[test]
    fn test_deserializes_validated_rows() {
        let catalog: QuestionCatalog = serde_json::from_str(
            r#"[
                {"id": "1.1", "category": "Documentation", "section": "Certificates",
                 "text": "Certificates current?", "weight": "1.5", "tiers": ["tier_0"],
                 "options": [{"value": 10, "label": "Yes"}]},
                {"id": "1.2", "category": "Documentation", "section": "Certificates",
                 "text": "Expiry tracked?", "weight": 1.0,
                 "options": [{"value": 1, "label": "No"}]}
            ]"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("1.1").unwrap().weight, 1.5);
        assert_eq!(catalog.get("1.1").unwrap().subcategory, "Certificates");
    }

    #[test]
    fn test_deserialize_rejects_unvalidated_rows() {
        let heavy = r#"[{"id": "1.1", "category": "Documentation", "section": "Certificates",
            "text": "Certificates current?", "weight": 5.0,
            "options": [{"value": 10, "label": "Yes"}]}]"#;
        assert!(serde_json::from_str::<QuestionCatalog>(heavy).is_err());

        let no_options = r#"[{"id": "1.1", "category": "Documentation", "section": "Certificates",
            "text": "Certificates current?", "weight": 1.0}]"#;
        assert!(serde_json::from_str::<QuestionCatalog>(no_options).is_err());
    }

    #[test]
    fn test_group_by_category() {
        let catalog = sample();
        let grouped = catalog.group_by_category();
        let keys: Vec<_> = grouped.keys().copied().collect();
        assert_eq!(keys, vec!["Documentation", "Landlord-Tenant Communication"]);
        assert_eq!(grouped["Documentation"].len(), 2);
    }
}
