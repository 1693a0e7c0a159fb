//! The hub's home page summary.

use serde::Deserialize;

use crate::model::Record;
use crate::resource::ResourceKind;

/// Body of `GET /api/dashboard`.
///
/// Counts that a server does not report decode as zero and missing lists as
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardSummary {
    pub total_policies: u64,
    pub total_deployments: u64,
    pub total_funding_programs: u64,
    pub total_safety_incidents: u64,
    pub total_resources: u64,
    pub total_curbside_regulations: u64,
    /// Distinct states with at least one policy on record.
    pub states_with_legislation: u64,
    /// Newest policies, newest first.
    pub recent_policies: Vec<Record>,
    /// Newest safety incidents, newest first.
    pub recent_incidents: Vec<Record>,
}

impl DashboardSummary {
    /// Record count of one kind.
    pub fn total(&self, kind: ResourceKind) -> u64 {
        match kind {
            ResourceKind::Policies => self.total_policies,
            ResourceKind::Deployments => self.total_deployments,
            ResourceKind::Funding => self.total_funding_programs,
            ResourceKind::Safety => self.total_safety_incidents,
            ResourceKind::Resources => self.total_resources,
            ResourceKind::Curbside => self.total_curbside_regulations,
        }
    }

    /// Counts of every kind, in navigation order.
    pub fn totals(&self) -> Vec<(ResourceKind, u64)> {
        ResourceKind::ALL
            .into_iter()
            .map(|kind| (kind, self.total(kind)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_summary() {
        let body = r#"{
            "total_policies": 42,
            "total_deployments": 17,
            "total_funding_programs": 9,
            "total_safety_incidents": 130,
            "total_resources": 25,
            "total_curbside_regulations": 6,
            "states_with_legislation": 31,
            "recent_policies": [
                {"id": 42, "title": "AV Testing Act", "state_code": "CA", "status": "Enacted"},
                {"id": 41, "title": "Robotaxi Permits", "state_code": "AZ", "status": null}
            ],
            "recent_incidents": [{"id": 130, "manufacturer": "Waymo"}]
        }"#;
        let summary: DashboardSummary = serde_json::from_str(body).unwrap();

        assert_eq!(summary.total(ResourceKind::Safety), 130);
        assert_eq!(summary.states_with_legislation, 31);
        assert_eq!(summary.totals()[0], (ResourceKind::Policies, 42));
        assert_eq!(summary.totals()[5], (ResourceKind::Curbside, 6));
        assert_eq!(summary.recent_policies.len(), 2);
        assert_eq!(summary.recent_policies[1].get_str("title"), Some("Robotaxi Permits"));
        assert_eq!(summary.recent_incidents[0].key("id").as_deref(), Some("130"));
    }

    #[test]
    fn test_missing_fields_default() {
        let summary: DashboardSummary =
            serde_json::from_str(r#"{"total_policies": 3, "total_news_articles": 8}"#).unwrap();
        assert_eq!(summary.total_policies, 3);
        assert_eq!(summary.total_resources, 0);
        assert!(summary.recent_incidents.is_empty());
    }
}
