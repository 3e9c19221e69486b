//! Report data consumed by both PDF renderers
//!
//! Renderers must take every aggregate from [`ReportData`] and never recompute
//! scores themselves.

use crate::actions::{generate_recommended_actions, RecommendedAction};
use crate::category::{calculate_category_scores, calculate_overall_score, CategoryScore, OverallScore};
use crate::config::ScoringConfig;
use crate::error::ScoringError;
use crate::recommendations::{group_recommendations, Recommendation};
use crate::responses::{classify_responses, QuestionResponses};
use crate::services::{recommend_services, ServiceRecommendation};
use crate::slots::ByCategory;
use crate::subcategory::{calculate_subcategory_scores, SubcategoryScore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{Category, QuestionCatalog, Response, RiskTier};
use tracing::{debug, warn};

/// Scores shown on the review dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditScores {
    pub category_scores: Vec<CategoryScore>,
    pub overall_score: OverallScore,
    pub recommended_actions: Vec<RecommendedAction>,
}

/// Compute category scores, overall score, and recommended actions
pub fn calculate_audit_scores(
    responses: &[Response],
    catalog: &QuestionCatalog,
    config: &ScoringConfig,
) -> Result<AuditScores, ScoringError> {
    let category_scores = calculate_category_scores(responses, catalog, &config.risk);
    let overall_score = calculate_overall_score(&category_scores, &config.risk)?;
    let recommended_actions = generate_recommended_actions(responses, catalog);

    Ok(AuditScores {
        category_scores,
        overall_score,
        recommended_actions,
    })
}

/// Caller-supplied cover page details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportHeader {
    pub property_address: String,
    /// When the landlord submitted the questionnaire
    pub audit_start_date: DateTime<Utc>,
    /// When the report was generated
    pub audit_end_date: DateTime<Utc>,
    pub landlord_name: String,
    pub auditor_name: String,
    pub risk_tier: RiskTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    #[serde(flatten)]
    pub header: ReportHeader,
    pub overall_score: f64,
    pub category_scores: ByCategory<CategoryScore>,
    pub subcategory_scores: Vec<SubcategoryScore>,
    pub recommendations_by_category: ByCategory<Vec<Recommendation>>,
    pub question_responses: QuestionResponses,
    pub suggested_services: Vec<ServiceRecommendation>,
}

/// Merge precomputed scores with the report-only breakdowns
///
/// A category with no score gets a zero placeholder. Scored categories outside
/// the fixed set have no slot and are left out.
pub fn assemble_report(
    header: ReportHeader,
    catalog: &QuestionCatalog,
    responses: &[Response],
    scores: &AuditScores,
    config: &ScoringConfig,
) -> ReportData {
    let subcategory_scores = calculate_subcategory_scores(responses, catalog, &config.traffic_light);
    let recommendations_by_category =
        group_recommendations(&scores.recommended_actions, &subcategory_scores);
    let question_responses = classify_responses(responses, catalog, &config.traffic_light);
    let suggested_services = recommend_services(&subcategory_scores, config.service_threshold);

    for score in &scores.category_scores {
        if Category::from_name(&score.category).is_none() {
            warn!(category = %score.category, "category outside the report set, omitted from report");
        }
    }
    let category_scores = ByCategory::from_fn(|category| {
        scores
            .category_scores
            .iter()
            .find(|s| s.category == category.name())
            .cloned()
            .unwrap_or_else(|| CategoryScore::placeholder(category.name()))
    });

    debug!(
        subcategories = subcategory_scores.len(),
        responses = question_responses.len(),
        services = suggested_services.len(),
        "report data assembled"
    );

    ReportData {
        header,
        overall_score: scores.overall_score.score,
        category_scores,
        subcategory_scores,
        recommendations_by_category,
        question_responses,
        suggested_services,
    }
}
