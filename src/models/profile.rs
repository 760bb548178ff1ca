use serde::{Deserialize, Serialize};

/// Full student profile, 1:1 with a STUDENT user. Updates are whole-object
/// read-modify-write; there is no field-level patch endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub user_id: Option<i64>,
    pub phone: Option<String>,
    pub college: Option<String>,
    pub graduation_year: Option<String>,
    pub education: Option<String>,
    pub bio: Option<String>,
    /// Comma-separated on the wire.
    pub skills: Option<String>,
    pub resume_url: Option<String>,
}

impl StudentProfile {
    pub fn skill_list(&self) -> Vec<String> {
        self.skills
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// The applicant snapshot embedded in an application record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSnapshot {
    pub user_id: Option<i64>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub college: Option<String>,
    pub graduation_year: Option<String>,
    pub education: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<String>,
    pub resume_url: Option<String>,
}

impl StudentSnapshot {
    /// Shape the stale snapshot like a live profile, for the fallback path
    /// when the enrichment fetch fails.
    pub fn to_profile(&self) -> StudentProfile {
        StudentProfile {
            user_id: self.user_id,
            phone: self.phone.clone(),
            college: self.college.clone(),
            graduation_year: self.graduation_year.clone(),
            education: self.education.clone(),
            bio: self.bio.clone(),
            skills: self.skills.clone(),
            resume_url: self.resume_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruiterProfile {
    pub user_id: Option<i64>,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
}
