use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique per (studentId, jobId); the toggle endpoint creates or removes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: i64,
    pub student_id: i64,
    pub job_id: i64,
    pub created_at: Option<DateTime<Utc>>,
}
