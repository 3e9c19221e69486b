//! Landlord compliance audit scoring
//!
//! A pure pipeline from (question catalog, responses, report header) to scores
//! and report data:
//!
//! 1. [`category`]: weighted category scores and the overall score
//! 2. [`actions`]: prioritised remediation actions per response
//! 3. [`subcategory`]: unweighted subcategory averages
//! 4. [`recommendations`]: actions grouped per subcategory with impact
//! 5. [`responses`]: responses bucketed red/orange/green
//! 6. [`services`]: follow-on services for weak subcategories
//! 7. [`report`]: everything merged into [`ReportData`]
//!
//! Nothing here performs I/O. The catalog is always passed in explicitly, so
//! concurrent calls with different catalogs are independent.

pub mod actions;
pub mod category;
pub mod config;
pub mod error;
pub mod format;
pub mod levels;
pub mod recommendations;
pub mod report;
pub mod responses;
pub mod services;
pub mod slots;
pub mod subcategory;

pub use actions::{ActionPriority, RecommendedAction, Timeframe};
pub use category::{CategoryScore, OverallScore};
pub use config::{RiskThresholds, ScoringConfig, TrafficLightThresholds};
pub use error::ScoringError;
pub use levels::{RiskColor, RiskLevel, TrafficLight};
pub use recommendations::{Impact, Recommendation};
pub use report::{AuditScores, ReportData, ReportHeader};
pub use responses::{QuestionResponseData, QuestionResponses};
pub use services::ServiceRecommendation;
pub use slots::ByCategory;
pub use subcategory::SubcategoryScore;

use shared_types::{QuestionCatalog, Response};
use tracing::{debug, instrument};

/// Scoring entry point holding the thresholds every stage shares
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScoringConfig) -> Result<Self, ScoringError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Dashboard scores: categories, overall, and recommended actions
    #[instrument(skip_all, fields(questions = catalog.len(), responses = responses.len()))]
    pub fn score_audit(
        &self,
        catalog: &QuestionCatalog,
        responses: &[Response],
    ) -> Result<AuditScores, ScoringError> {
        let scores = report::calculate_audit_scores(responses, catalog, &self.config)?;
        debug!(
            categories = scores.category_scores.len(),
            overall = scores.overall_score.score,
            actions = scores.recommended_actions.len(),
            "audit scored"
        );
        Ok(scores)
    }

    /// Full report data for the PDF renderers
    #[instrument(skip_all, fields(questions = catalog.len(), responses = responses.len()))]
    pub fn build_report(
        &self,
        header: ReportHeader,
        catalog: &QuestionCatalog,
        responses: &[Response],
    ) -> Result<ReportData, ScoringError> {
        let scores = self.score_audit(catalog, responses)?;
        Ok(report::assemble_report(
            header,
            catalog,
            responses,
            &scores,
            &self.config,
        ))
    }
}
