use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::profile::StudentSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApplicationStatus {
    Applied,
    Pending,
    Shortlisted,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    /// A decision is final: the recruiter's accept/reject actions are only
    /// offered while this is false, and the status never moves backward.
    pub fn is_decided(self) -> bool {
        matches!(self, ApplicationStatus::Accepted | ApplicationStatus::Rejected)
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ApplicationStatus::Applied => "APPLIED",
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Shortlisted => "SHORTLISTED",
            ApplicationStatus::Accepted => "ACCEPTED",
            ApplicationStatus::Rejected => "REJECTED",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: i64,
    pub student_id: i64,
    pub job_id: i64,
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: Option<DateTime<Utc>>,
    /// Denormalized applicant snapshot the backend embeds for recruiters.
    /// May lag behind the live profile; see the enrichment policy in
    /// `RecruiterConsole::applicant_detail`.
    pub student: Option<StudentSnapshot>,
}
