//! Unweighted per-subcategory averages

use crate::config::TrafficLightThresholds;
use crate::levels::{round_to, TrafficLight};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use shared_types::{QuestionCatalog, Response};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryScore {
    pub name: String,
    pub category: String,
    /// Mean raw answer value, one decimal; `color` is taken from the unrounded mean
    pub score: f64,
    pub color: TrafficLight,
    pub question_count: usize,
}

/// Average raw answers per (category, subcategory)
///
/// Output is sorted by category name, then worst score first. Subcategories
/// with equal scores keep the order they were first answered in.
pub fn calculate_subcategory_scores(
    responses: &[Response],
    catalog: &QuestionCatalog,
    lights: &TrafficLightThresholds,
) -> Vec<SubcategoryScore> {
    let mut groups: IndexMap<(&str, &str), Vec<u8>> = IndexMap::new();
    for response in responses {
        let Some(question) = catalog.get(&response.question_id) else {
            continue;
        };
        groups
            .entry((question.category.as_str(), question.subcategory.as_str()))
            .or_default()
            .push(response.answer.value());
    }

    let mut scores: Vec<SubcategoryScore> = groups
        .into_iter()
        .map(|((category, name), values)| {
            let sum: u32 = values.iter().map(|v| u32::from(*v)).sum();
            let mean = f64::from(sum) / values.len() as f64;
            SubcategoryScore {
                name: name.to_string(),
                category: category.to_string(),
                score: round_to(mean, 1),
                color: lights.classify(mean),
                question_count: values.len(),
            }
        })
        .collect();

    scores.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| a.score.total_cmp(&b.score))
    });
    scores
}
