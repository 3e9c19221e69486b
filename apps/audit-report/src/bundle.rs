//! Exported audit bundle: header details plus raw question and response rows

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use compliance_scoring::ReportHeader;
use serde::Deserialize;
use shared_types::ingest::{validate_questions, validate_responses};
use shared_types::{QuestionCatalog, RawQuestion, RawResponse, Response, RiskTier};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleHeader {
    pub property_address: String,
    pub audit_start_date: DateTime<Utc>,
    /// Defaults to the time the report is generated
    #[serde(default)]
    pub audit_end_date: Option<DateTime<Utc>>,
    pub landlord_name: String,
    pub auditor_name: String,
    pub risk_tier: String,
}

#[derive(Debug, Deserialize)]
pub struct RawBundle {
    pub header: BundleHeader,
    pub questions: Vec<RawQuestion>,
    pub responses: Vec<RawResponse>,
}

/// A bundle whose rows have all passed validation
#[derive(Debug)]
pub struct AuditBundle {
    pub header: ReportHeader,
    pub catalog: QuestionCatalog,
    pub responses: Vec<Response>,
}

impl AuditBundle {
    /// Parse and validate a bundle
    ///
    /// Unless `all_tiers` is set, the catalog is narrowed to the questions that
    /// apply to the audit's risk tier.
    pub fn from_json(json: &str, all_tiers: bool, now: DateTime<Utc>) -> Result<Self> {
        let raw: RawBundle = serde_json::from_str(json).context("Malformed audit bundle")?;

        let risk_tier: RiskTier = raw
            .header
            .risk_tier
            .parse()
            .context("Invalid audit header")?;
        let questions = validate_questions(raw.questions).context("Invalid question row")?;
        let responses = validate_responses(raw.responses).context("Invalid response row")?;

        let catalog = QuestionCatalog::new(questions);
        let catalog = if all_tiers {
            catalog
        } else {
            catalog.for_tier(risk_tier)
        };

        Ok(Self {
            header: ReportHeader {
                property_address: raw.header.property_address,
                audit_start_date: raw.header.audit_start_date,
                audit_end_date: raw.header.audit_end_date.unwrap_or(now),
                landlord_name: raw.header.landlord_name,
                auditor_name: raw.header.auditor_name,
                risk_tier,
            },
            catalog,
            responses,
        })
    }
}
