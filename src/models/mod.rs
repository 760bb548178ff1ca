pub mod analytics;
pub mod application;
pub mod bookmark;
pub mod job;
pub mod profile;
pub mod user;

use serde::Deserialize;

/// Every backend response wraps its payload as `{ data, message? }`.
/// Error bodies carry `message` for display; `data` may be absent or null
/// on mutation acknowledgements.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: Option<T>,
    pub message: Option<String>,
}
