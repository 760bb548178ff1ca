pub mod client;
pub mod config;
pub mod dto;
pub mod error;
pub mod guard;
pub mod models;
pub mod services;
pub mod session;

use std::sync::Arc;

use crate::client::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::services::admin_service::AdminService;
use crate::services::auth_service::AuthService;
use crate::services::job_service::JobService;
use crate::services::recruiter_service::RecruiterService;
use crate::services::student_service::StudentService;
use crate::session::SessionStore;

/// Everything the shell needs, wired once at bootstrap: the shared HTTP
/// client, the session store, and the per-role services. Passed explicitly;
/// there are no module-level singletons.
#[derive(Clone)]
pub struct App {
    pub config: Config,
    pub session: Arc<SessionStore>,
    pub api: ApiClient,
    pub auth: AuthService,
    pub jobs: JobService,
    pub student: StudentService,
    pub recruiter: RecruiterService,
    pub admin: AdminService,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let session = Arc::new(SessionStore::restore(&config.token_path));
        let api = ApiClient::new(&config, session.clone())?;

        let auth = AuthService::new(api.clone(), session.clone());
        let jobs = JobService::new(api.clone());
        let student = StudentService::new(api.clone());
        let recruiter = RecruiterService::new(api.clone());
        let admin = AdminService::new(api.clone());

        Ok(Self {
            config,
            session,
            api,
            auth,
            jobs,
            student,
            recruiter,
            admin,
        })
    }

    pub fn job_browser(&self) -> services::job_service::JobBrowser {
        services::job_service::JobBrowser::new(
            self.jobs.clone(),
            self.api.clone(),
            self.session.clone(),
        )
    }
}
