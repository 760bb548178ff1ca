use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::job::JobType;

/// Title, company and description are required before any request is
/// issued; everything else is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub company_name: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub duration: Option<String>,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub requirements: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub company_name: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub duration: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,
    pub requirements: Option<String>,
}
