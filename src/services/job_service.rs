use std::collections::HashSet;
use std::sync::Arc;

use tracing::error;

use crate::client::ApiClient;
use crate::error::{Error, Result};
use crate::models::bookmark::Bookmark;
use crate::models::job::{Job, JobType};
use crate::session::SessionStore;

/// Public job endpoints; no authentication required.
#[derive(Clone)]
pub struct JobService {
    client: ApiClient,
}

impl JobService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_public(&self) -> Result<Vec<Job>> {
        self.client.get("/jobs/public/all").await
    }

    pub async fn get(&self, job_id: i64) -> Result<Job> {
        self.client.get(&format!("/jobs/public/{}", job_id)).await
    }

    pub async fn search(&self, keyword: &str) -> Result<Vec<Job>> {
        self.client
            .get_query("/jobs/public/search", &[("keyword", keyword.to_string())])
            .await
    }
}

#[derive(Debug, Clone, Default)]
pub struct JobFilters {
    pub keyword: Option<String>,
    pub job_type: Option<JobType>,
    pub location: Option<String>,
}

/// Pure, synchronous filter over an already-fetched list. Keyword matches
/// title or description case-insensitively, type matches exactly, location
/// matches case-insensitively as a substring. Never re-fetches.
pub fn apply_filters<'a>(jobs: &'a [Job], filters: &JobFilters) -> Vec<&'a Job> {
    jobs.iter()
        .filter(|job| {
            if let Some(keyword) = filters.keyword.as_deref().filter(|k| !k.is_empty()) {
                let keyword = keyword.to_lowercase();
                if !job.title.to_lowercase().contains(&keyword)
                    && !job.description.to_lowercase().contains(&keyword)
                {
                    return false;
                }
            }
            if let Some(job_type) = filters.job_type {
                if job.job_type != job_type {
                    return false;
                }
            }
            if let Some(location) = filters.location.as_deref().filter(|l| !l.is_empty()) {
                let location = location.to_lowercase();
                match job.location.as_deref() {
                    Some(loc) if loc.to_lowercase().contains(&location) => {}
                    _ => return false,
                }
            }
            true
        })
        .collect()
}

/// The public jobs view: one full fetch per load, client-side filtering,
/// and the student-only bookmark/apply actions.
pub struct JobBrowser {
    jobs: JobService,
    client: ApiClient,
    session: Arc<SessionStore>,
    listing: Vec<Job>,
    pub filters: JobFilters,
    bookmarked: HashSet<i64>,
}

impl JobBrowser {
    pub fn new(jobs: JobService, client: ApiClient, session: Arc<SessionStore>) -> Self {
        Self {
            jobs,
            client,
            session,
            listing: Vec::new(),
            filters: JobFilters::default(),
            bookmarked: HashSet::new(),
        }
    }

    /// Fetch the full public listing; a failure degrades to an empty list
    /// with a diagnostic rather than surfacing an error. A logged-in
    /// student also gets their bookmark set seeded.
    pub async fn load(&mut self) {
        match self.jobs.list_public().await {
            Ok(listing) => self.listing = listing,
            Err(err) => {
                error!(error = %err, "Failed to fetch public jobs");
                self.listing = Vec::new();
            }
        }

        self.bookmarked.clear();
        if let Some(user) = self.session.current_user().filter(|u| u.is_student()) {
            match self
                .client
                .get::<Vec<Bookmark>>(&format!("/student/bookmarks/{}", user.user_id))
                .await
            {
                Ok(bookmarks) => {
                    self.bookmarked = bookmarks.into_iter().map(|b| b.job_id).collect();
                }
                Err(err) => error!(error = %err, "Failed to fetch bookmarks"),
            }
        }
    }

    pub fn visible(&self) -> Vec<&Job> {
        apply_filters(&self.listing, &self.filters)
    }

    pub fn is_bookmarked(&self, job_id: i64) -> bool {
        self.bookmarked.contains(&job_id)
    }

    pub fn bookmarked_ids(&self) -> &HashSet<i64> {
        &self.bookmarked
    }

    /// Toggle membership on the server first, then flip the local set. A
    /// failed call leaves local state untouched.
    pub async fn toggle_bookmark(&mut self, job_id: i64) -> Result<()> {
        let user = self.require_student("bookmark jobs")?;
        self.client
            .post_query(
                "/student/bookmark",
                &[
                    ("studentId", user.user_id.to_string()),
                    ("jobId", job_id.to_string()),
                ],
            )
            .await?;
        if !self.bookmarked.remove(&job_id) {
            self.bookmarked.insert(job_id);
        }
        Ok(())
    }

    /// Submit an application; the cover letter is optional and may be empty.
    pub async fn apply(&self, job_id: i64, cover_letter: &str) -> Result<()> {
        let user = self.require_student("apply")?;
        self.client
            .post_query(
                "/student/apply",
                &[
                    ("studentId", user.user_id.to_string()),
                    ("jobId", job_id.to_string()),
                    ("coverLetter", cover_letter.to_string()),
                ],
            )
            .await
    }

    fn require_student(&self, action: &str) -> Result<crate::models::user::SessionUser> {
        self.session
            .current_user()
            .filter(|u| u.is_student())
            .ok_or_else(|| Error::Unauthorized(format!("log in as a student to {}", action)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: i64, title: &str, job_type: JobType, location: &str) -> Job {
        Job {
            id,
            title: title.to_string(),
            company_name: "Acme".to_string(),
            description: format!("{} role", title),
            location: Some(location.to_string()),
            salary: None,
            duration: None,
            job_type,
            requirements: None,
            recruiter_id: Some(9),
        }
    }

    fn sample() -> Vec<Job> {
        vec![
            job(1, "Dev", JobType::Job, "Pune"),
            job(2, "Intern", JobType::Internship, "Goa"),
        ]
    }

    #[test]
    fn empty_filters_pass_everything() {
        let jobs = sample();
        assert_eq!(apply_filters(&jobs, &JobFilters::default()).len(), 2);
    }

    #[test]
    fn type_filter_keeps_only_internships() {
        let jobs = sample();
        let filters = JobFilters {
            job_type: Some(JobType::Internship),
            ..Default::default()
        };
        let visible = apply_filters(&jobs, &filters);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 2);
    }

    #[test]
    fn keyword_matches_title_or_description_case_insensitively() {
        let jobs = sample();
        let filters = JobFilters {
            keyword: Some("dEv".to_string()),
            ..Default::default()
        };
        let visible = apply_filters(&jobs, &filters);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 1);
    }

    #[test]
    fn location_is_substring_match() {
        let jobs = sample();
        let filters = JobFilters {
            location: Some("go".to_string()),
            ..Default::default()
        };
        let visible = apply_filters(&jobs, &filters);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 2);
    }

    #[test]
    fn combined_filters_are_conjunctive() {
        let jobs = sample();
        let filters = JobFilters {
            keyword: Some("intern".to_string()),
            job_type: Some(JobType::Job),
            location: None,
        };
        assert!(apply_filters(&jobs, &filters).is_empty());
    }

    #[test]
    fn result_is_subset_of_input() {
        let jobs = sample();
        let filters = JobFilters {
            keyword: Some("e".to_string()),
            ..Default::default()
        };
        let input_ids: Vec<i64> = jobs.iter().map(|j| j.id).collect();
        for matched in apply_filters(&jobs, &filters) {
            assert!(input_ids.contains(&matched.id));
        }
    }
}
