use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::error;
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::ApiEnvelope;
use crate::session::SessionStore;

/// Thin wrapper over the shared `reqwest::Client`: attaches the bearer token,
/// unwraps the `{ data, message }` envelope, and clears the session on any
/// 401/403. Every call is fire-once; the only timeout is the client-wide one.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(config: &Config, session: Arc<SessionStore>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Resume and other file links come back host-relative; resolve them
    /// against the API host root rather than the base path.
    pub fn resolve_asset_url(&self, relative: &str) -> Result<String> {
        let base = Url::parse(&self.base_url)?;
        Ok(base.join(relative)?.to_string())
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send_json(self.http.get(self.url(path))).await
    }

    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        self.send_json(self.http.get(self.url(path)).query(query))
            .await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.send_json(self.http.post(self.url(path)).json(body))
            .await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.send_json(self.http.put(self.url(path)).json(body))
            .await
    }

    /// POST with query-string parameters and an empty body (the apply and
    /// bookmark endpoints take their input this way).
    pub async fn post_query(&self, path: &str, query: &[(&str, String)]) -> Result<()> {
        self.send_ok(self.http.post(self.url(path)).query(query))
            .await
    }

    pub async fn put_query(&self, path: &str, query: &[(&str, String)]) -> Result<()> {
        self.send_ok(self.http.put(self.url(path)).query(query))
            .await
    }

    pub async fn put_empty(&self, path: &str) -> Result<()> {
        self.send_ok(self.http.put(self.url(path))).await
    }

    pub async fn put_json_ok<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        self.send_ok(self.http.put(self.url(path)).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send_ok(self.http.delete(self.url(path))).await
    }

    /// Multipart upload with the single file field the backend expects.
    pub async fn upload_file(&self, path: &str, file: &Path) -> Result<()> {
        let data = tokio::fs::read(file).await?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let form = Form::new().part("file", Part::bytes(data).file_name(file_name));
        self.send_ok(self.http.post(self.url(path)).multipart(form))
            .await
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response> {
        // Token captured once per request; a concurrent invalidation does
        // not affect a request already carrying its snapshot.
        let req = match self.session.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        };
        let resp = req.send().await?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            error!(status = %status, "Authentication rejected, clearing session");
            self.session.invalidate();
            return Err(Error::Unauthorized(
                "session rejected by the server".to_string(),
            ));
        }
        if !status.is_success() {
            let message = extract_message(resp).await;
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp)
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        let resp = self.send(req).await?;
        let envelope: ApiEnvelope<T> = resp.json().await?;
        envelope
            .data
            .ok_or_else(|| Error::Internal("response envelope missing data".to_string()))
    }

    async fn send_ok(&self, req: RequestBuilder) -> Result<()> {
        self.send(req).await?;
        Ok(())
    }
}

async fn extract_message(resp: Response) -> Option<String> {
    let value: serde_json::Value = resp.json().await.ok()?;
    value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
}
