use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::client::ApiClient;
use crate::dto::auth_dto::{AuthResponse, LoginPayload, RegisterPayload};
use crate::error::Result;
use crate::models::user::SessionUser;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
    session: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(client: ApiClient, session: Arc<SessionStore>) -> Self {
        Self { client, session }
    }

    pub async fn register(&self, payload: RegisterPayload) -> Result<SessionUser> {
        payload.validate()?;
        let resp: AuthResponse = self.client.post("/auth/register", &payload).await?;
        self.establish(resp)
    }

    pub async fn login(&self, payload: LoginPayload) -> Result<SessionUser> {
        payload.validate()?;
        let resp: AuthResponse = self.client.post("/auth/login", &payload).await?;
        self.establish(resp)
    }

    pub fn logout(&self) {
        self.session.logout();
    }

    fn establish(&self, resp: AuthResponse) -> Result<SessionUser> {
        let (user, token) = resp.into_parts();
        self.session.login(user.clone(), token)?;
        info!(user_id = user.user_id, role = %user.role, "Session established");
        Ok(user)
    }
}
