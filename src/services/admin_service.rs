use crate::client::ApiClient;
use crate::error::Result;
use crate::models::analytics::AnalyticsSummary;
use crate::models::user::{User, UserStatus};
use crate::services::Loaded;

#[derive(Clone)]
pub struct AdminService {
    client: ApiClient,
}

impl AdminService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn all_users(&self) -> Result<Vec<User>> {
        self.client.get("/admin/users").await
    }

    pub async fn pending_users(&self) -> Result<Vec<User>> {
        self.client.get("/admin/users/pending").await
    }

    pub async fn approve(&self, user_id: i64) -> Result<()> {
        self.client
            .put_empty(&format!("/admin/users/{}/approve", user_id))
            .await
    }

    pub async fn block(&self, user_id: i64) -> Result<()> {
        self.client
            .put_empty(&format!("/admin/users/{}/block", user_id))
            .await
    }

    pub async fn delete(&self, user_id: i64) -> Result<()> {
        self.client
            .delete(&format!("/admin/users/{}", user_id))
            .await
    }

    pub async fn analytics(&self) -> Result<AnalyticsSummary> {
        self.client.get("/admin/analytics").await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminTab {
    All,
    Pending,
}

/// Client-side tab filter over the fetched user list.
pub fn filter_users(users: &[User], tab: AdminTab) -> Vec<&User> {
    users
        .iter()
        .filter(|u| match tab {
            AdminTab::All => true,
            AdminTab::Pending => u.status == UserStatus::Pending,
        })
        .collect()
}

/// Admin dashboard driver. Every moderation action refetches the full user
/// list and analytics rather than patching locally.
pub struct AdminConsole {
    service: AdminService,
    pub tab: AdminTab,
    pub users: Loaded<Vec<User>>,
    pub analytics: Loaded<AnalyticsSummary>,
}

impl AdminConsole {
    pub fn new(service: AdminService) -> Self {
        Self {
            service,
            tab: AdminTab::All,
            users: Loaded::default(),
            analytics: Loaded::default(),
        }
    }

    pub async fn refresh(&mut self) {
        let (users, analytics) =
            tokio::join!(self.service.all_users(), self.service.analytics());
        self.users = Loaded::from_result(users, "users");
        self.analytics = Loaded::from_result(analytics, "analytics");
    }

    pub fn visible_users(&self) -> Vec<&User> {
        filter_users(&self.users.data, self.tab)
    }

    pub fn pending_count(&self) -> usize {
        filter_users(&self.users.data, AdminTab::Pending).len()
    }

    pub async fn approve(&mut self, user_id: i64) -> Result<()> {
        self.service.approve(user_id).await?;
        self.refresh().await;
        Ok(())
    }

    /// Irreversible-leaning action; the shell asks for confirmation before
    /// calling this.
    pub async fn block(&mut self, user_id: i64) -> Result<()> {
        self.service.block(user_id).await?;
        self.refresh().await;
        Ok(())
    }

    /// Irreversible; the shell asks for confirmation before calling this.
    pub async fn delete(&mut self, user_id: i64) -> Result<()> {
        self.service.delete(user_id).await?;
        self.refresh().await;
        Ok(())
    }
}
