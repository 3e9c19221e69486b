//! Follow-on service suggestions for weak subcategories

use crate::subcategory::SubcategoryScore;
use serde::{Deserialize, Serialize};

/// subcategory name -> (service, tier)
const SERVICE_TABLE: &[(&str, &str, &str)] = &[
    ("Certificates", "Certificate Management Service", "Tier 1"),
    ("Tenant Manuals & Documents", "Documentation Package", "Tier 2"),
    ("Council Required Documents", "Compliance Review", "Tier 3"),
    ("Tenant Responsibilities", "Tenancy Agreement Review", "Tier 2"),
    ("Rent & Financial Tracking", "Financial Management System", "Tier 2"),
    ("Complaint & Repair Systems", "Maintenance System Setup", "Tier 3"),
    ("Written Records", "Record-Keeping System", "Tier 2"),
    ("Contact Logs", "Communication Tracking System", "Tier 2"),
    ("Inspection Process", "Onsite Survey", "Tier 4"),
    ("Evidence Archives", "Digital Archive System", "Tier 3"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecommendation {
    /// "Category/Subcategory"
    pub low_scoring_area: String,
    pub suggested_service: String,
    pub tier: String,
}

/// Service and tier offered for a subcategory, if any
pub fn service_for(subcategory: &str) -> Option<(&'static str, &'static str)> {
    SERVICE_TABLE
        .iter()
        .find(|(name, _, _)| *name == subcategory)
        .map(|(_, service, tier)| (*service, *tier))
}

/// Suggest a service for every mapped subcategory scoring at or below `threshold`
pub fn recommend_services(
    subcategory_scores: &[SubcategoryScore],
    threshold: f64,
) -> Vec<ServiceRecommendation> {
    subcategory_scores
        .iter()
        .filter(|s| s.score <= threshold)
        .filter_map(|s| {
            let (service, tier) = service_for(&s.name)?;
            Some(ServiceRecommendation {
                low_scoring_area: format!("{}/{}", s.category, s.name),
                suggested_service: service.to_string(),
                tier: tier.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::TrafficLight;

    fn sub(name: &str, score: f64) -> SubcategoryScore {
        SubcategoryScore {
            name: name.to_string(),
            category: "Documentation".to_string(),
            score,
            color: TrafficLight::Red,
            question_count: 1,
        }
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let services = recommend_services(&[sub("Certificates", 4.0), sub("Contact Logs", 4.1)], 4.0);
        assert_eq!(
            services,
            vec![ServiceRecommendation {
                low_scoring_area: "Documentation/Certificates".to_string(),
                suggested_service: "Certificate Management Service".to_string(),
                tier: "Tier 1".to_string(),
            }]
        );
    }

    #[test]
    fn test_unmapped_subcategory_skipped_even_when_low() {
        assert!(recommend_services(&[sub("Parking", 1.0)], 4.0).is_empty());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(service_for("Inspection Process"), Some(("Onsite Survey", "Tier 4")));
        assert_eq!(service_for("inspection process"), None);
    }
}
