pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server rejected the request ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// User-facing text for a failed action: the server-supplied message
    /// where there is one, otherwise the per-action fallback.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            Error::Api {
                message: Some(msg), ..
            } => msg.clone(),
            Error::BadRequest(msg) | Error::Unauthorized(msg) | Error::NotFound(msg) => msg.clone(),
            Error::Validation(errs) => errs.to_string(),
            _ => fallback.to_string(),
        }
    }
}
