use serde::{Deserialize, Serialize};

/// Read-only aggregate counts; aggregation itself is backend-owned.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_users: i64,
    pub total_students: i64,
    pub total_recruiters: i64,
    pub total_jobs: i64,
    pub active_jobs: i64,
    pub total_applications: i64,
}
