use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobType {
    Job,
    Internship,
}

impl std::str::FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "JOB" => Ok(JobType::Job),
            "INTERNSHIP" => Ok(JobType::Internship),
            other => Err(format!("unknown job type: {}", other)),
        }
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobType::Job => write!(f, "JOB"),
            JobType::Internship => write!(f, "INTERNSHIP"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub company_name: String,
    pub description: String,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub duration: Option<String>,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub requirements: Option<String>,
    pub recruiter_id: Option<i64>,
}
