use std::path::Path;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::application::Application;
use crate::models::bookmark::Bookmark;
use crate::models::job::Job;
use crate::models::profile::StudentProfile;
use crate::services::Loaded;

#[derive(Clone)]
pub struct StudentService {
    client: ApiClient,
}

impl StudentService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_profile(&self, user_id: i64) -> Result<StudentProfile> {
        self.client
            .get(&format!("/student/profile/{}", user_id))
            .await
    }

    /// Whole-object write; callers merge edits into a fetched profile first.
    pub async fn update_profile(&self, user_id: i64, profile: &StudentProfile) -> Result<()> {
        self.client
            .put_json_ok(&format!("/student/profile/{}", user_id), profile)
            .await
    }

    /// Single-file upload, field `file`; storage is backend-owned. Callers
    /// refetch the profile on success to pick up the new resume URL.
    pub async fn upload_resume(&self, user_id: i64, file: &Path) -> Result<()> {
        self.client
            .upload_file(&format!("/student/resume/{}", user_id), file)
            .await
    }

    pub async fn applications(&self, student_id: i64) -> Result<Vec<Application>> {
        self.client
            .get(&format!("/student/applications/{}", student_id))
            .await
    }

    pub async fn bookmarks(&self, student_id: i64) -> Result<Vec<Bookmark>> {
        self.client
            .get(&format!("/student/bookmarks/{}", student_id))
            .await
    }
}

/// The student dashboard's data: applications and bookmarks, fetched in
/// parallel on load, each degrading independently on failure.
pub struct StudentDashboard {
    service: StudentService,
    jobs: crate::services::job_service::JobService,
    student_id: i64,
    pub applications: Loaded<Vec<Application>>,
    pub bookmarks: Loaded<Vec<Bookmark>>,
}

impl StudentDashboard {
    pub fn new(
        service: StudentService,
        jobs: crate::services::job_service::JobService,
        student_id: i64,
    ) -> Self {
        Self {
            service,
            jobs,
            student_id,
            applications: Loaded::default(),
            bookmarks: Loaded::default(),
        }
    }

    pub async fn load(&mut self) {
        let (applications, bookmarks) = tokio::join!(
            self.service.applications(self.student_id),
            self.service.bookmarks(self.student_id),
        );
        self.applications = Loaded::from_result(applications, "applications");
        self.bookmarks = Loaded::from_result(bookmarks, "bookmarks");
    }

    /// Detail view for a selected application.
    pub async fn job_details(&self, job_id: i64) -> Result<Job> {
        self.jobs.get(job_id).await
    }

    pub async fn refresh_profile(&self) -> Result<StudentProfile> {
        self.service.get_profile(self.student_id).await
    }
}
