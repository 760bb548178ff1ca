use tracing::warn;
use validator::Validate;

use crate::client::ApiClient;
use crate::dto::job_dto::{CreateJobPayload, UpdateJobPayload};
use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationStatus};
use crate::models::job::Job;
use crate::models::profile::{RecruiterProfile, StudentProfile};

#[derive(Clone)]
pub struct RecruiterService {
    client: ApiClient,
}

impl RecruiterService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_profile(&self, user_id: i64) -> Result<RecruiterProfile> {
        self.client
            .get(&format!("/recruiter/profile/{}", user_id))
            .await
    }

    pub async fn update_profile(&self, user_id: i64, profile: &RecruiterProfile) -> Result<()> {
        self.client
            .put_json_ok(&format!("/recruiter/profile/{}", user_id), profile)
            .await
    }

    pub async fn my_jobs(&self, recruiter_id: i64) -> Result<Vec<Job>> {
        self.client
            .get(&format!("/recruiter/jobs/{}", recruiter_id))
            .await
    }

    /// Required fields are checked locally; a validation failure issues no
    /// network call at all.
    pub async fn create_job(&self, recruiter_id: i64, payload: &CreateJobPayload) -> Result<Job> {
        payload.validate()?;
        self.client
            .post(&format!("/recruiter/jobs/{}", recruiter_id), payload)
            .await
    }

    pub async fn update_job(
        &self,
        recruiter_id: i64,
        job_id: i64,
        payload: &UpdateJobPayload,
    ) -> Result<Job> {
        payload.validate()?;
        self.client
            .put(&format!("/recruiter/jobs/{}/{}", recruiter_id, job_id), payload)
            .await
    }

    pub async fn delete_job(&self, recruiter_id: i64, job_id: i64) -> Result<()> {
        self.client
            .delete(&format!("/recruiter/jobs/{}/{}", recruiter_id, job_id))
            .await
    }

    pub async fn applications_for_job(
        &self,
        recruiter_id: i64,
        job_id: i64,
    ) -> Result<Vec<Application>> {
        self.client
            .get(&format!("/recruiter/applications/{}/{}", recruiter_id, job_id))
            .await
    }

    pub async fn update_application_status(
        &self,
        recruiter_id: i64,
        application_id: i64,
        status: ApplicationStatus,
    ) -> Result<()> {
        self.client
            .put_query(
                &format!("/recruiter/application/{}/{}", recruiter_id, application_id),
                &[("status", status.to_string())],
            )
            .await
    }

    pub async fn student_profile(&self, student_id: i64) -> Result<StudentProfile> {
        self.client
            .get(&format!("/student/profile/{}", student_id))
            .await
    }
}

/// Applicant detail as the recruiter sees it: the application plus the
/// freshest profile we could get.
#[derive(Debug, Clone)]
pub struct ApplicantDetail {
    pub application: Application,
    pub profile: StudentProfile,
    /// False when the enrichment fetch failed and the embedded snapshot is
    /// being shown instead.
    pub enriched: bool,
}

/// Recruiter dashboard driver: owned jobs, per-job applications, and the
/// accept/reject decision flow. Post-mutation state always comes from a
/// re-fetch, never a local patch.
pub struct RecruiterConsole {
    service: RecruiterService,
    recruiter_id: i64,
    pub jobs: Vec<Job>,
    pub selected_job: Option<i64>,
    pub applications: Vec<Application>,
}

impl RecruiterConsole {
    pub fn new(service: RecruiterService, recruiter_id: i64) -> Self {
        Self {
            service,
            recruiter_id,
            jobs: Vec::new(),
            selected_job: None,
            applications: Vec::new(),
        }
    }

    pub async fn load_jobs(&mut self) -> Result<()> {
        self.jobs = self.service.my_jobs(self.recruiter_id).await?;
        Ok(())
    }

    pub async fn create_job(&mut self, payload: &CreateJobPayload) -> Result<Job> {
        let job = self.service.create_job(self.recruiter_id, payload).await?;
        self.load_jobs().await?;
        Ok(job)
    }

    pub async fn delete_job(&mut self, job_id: i64) -> Result<()> {
        self.service.delete_job(self.recruiter_id, job_id).await?;
        if self.selected_job == Some(job_id) {
            self.selected_job = None;
            self.applications.clear();
        }
        self.load_jobs().await
    }

    pub async fn open_job(&mut self, job_id: i64) -> Result<()> {
        self.applications = self
            .service
            .applications_for_job(self.recruiter_id, job_id)
            .await?;
        self.selected_job = Some(job_id);
        Ok(())
    }

    /// Record an accept/reject decision. Only undecided applications may be
    /// decided, and only to a final status; the list is re-fetched so the
    /// new status comes from the server.
    pub async fn decide(&mut self, application_id: i64, status: ApplicationStatus) -> Result<()> {
        if !status.is_decided() {
            return Err(Error::BadRequest(format!(
                "{} is not a decision status",
                status
            )));
        }
        let application = self
            .applications
            .iter()
            .find(|a| a.id == application_id)
            .ok_or_else(|| Error::NotFound("application not in the current list".to_string()))?;
        if application.status.is_decided() {
            return Err(Error::BadRequest(
                "a decision has already been recorded for this application".to_string(),
            ));
        }

        self.service
            .update_application_status(self.recruiter_id, application_id, status)
            .await?;

        if let Some(job_id) = self.selected_job {
            self.open_job(job_id).await?;
        }
        Ok(())
    }

    /// Best-effort enrichment, by policy: try the live profile, and fall
    /// back to the snapshot embedded in the application when the fetch
    /// fails. The fallback is logged distinctly from a hard failure.
    pub async fn applicant_detail(&self, application_id: i64) -> Result<ApplicantDetail> {
        let application = self
            .applications
            .iter()
            .find(|a| a.id == application_id)
            .cloned()
            .ok_or_else(|| Error::NotFound("application not in the current list".to_string()))?;

        match self.service.student_profile(application.student_id).await {
            Ok(profile) => Ok(ApplicantDetail {
                application,
                profile,
                enriched: true,
            }),
            Err(Error::Unauthorized(msg)) => Err(Error::Unauthorized(msg)),
            Err(err) => {
                warn!(
                    error = %err,
                    student_id = application.student_id,
                    "Profile enrichment failed, showing application snapshot"
                );
                let profile = application
                    .student
                    .as_ref()
                    .map(|s| s.to_profile())
                    .unwrap_or_default();
                Ok(ApplicantDetail {
                    application,
                    profile,
                    enriched: false,
                })
            }
        }
    }

    /// Resume links are host-relative; offered only when the applicant has
    /// one.
    pub fn resume_link(&self, client: &ApiClient, detail: &ApplicantDetail) -> Option<String> {
        let rel = detail.profile.resume_url.as_deref()?;
        client.resolve_asset_url(rel).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobType;
    use validator::Validate;

    #[test]
    fn create_job_payload_requires_description() {
        let payload = CreateJobPayload {
            title: "Dev".into(),
            company_name: "Acme".into(),
            description: "".into(),
            location: None,
            salary: None,
            duration: None,
            job_type: JobType::Job,
            requirements: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn decision_statuses_are_final_only() {
        assert!(ApplicationStatus::Accepted.is_decided());
        assert!(ApplicationStatus::Rejected.is_decided());
        assert!(!ApplicationStatus::Applied.is_decided());
        assert!(!ApplicationStatus::Pending.is_decided());
        assert!(!ApplicationStatus::Shortlisted.is_decided());
    }
}
