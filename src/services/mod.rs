pub mod admin_service;
pub mod auth_service;
pub mod job_service;
pub mod recruiter_service;
pub mod student_service;

use tracing::error;

use crate::error::Result;

/// One dashboard resource fetched in parallel with its siblings. A failed
/// fetch degrades to the default value and carries its own error text, so
/// one failure never blocks the rest from populating.
#[derive(Debug, Clone, Default)]
pub struct Loaded<T> {
    pub data: T,
    pub error: Option<String>,
}

impl<T: Default> Loaded<T> {
    pub fn from_result(result: Result<T>, what: &str) -> Self {
        match result {
            Ok(data) => Self { data, error: None },
            Err(err) => {
                error!(error = %err, "Failed to fetch {}", what);
                Self {
                    data: T::default(),
                    error: Some(format!("failed to load {}", what)),
                }
            }
        }
    }
}
