mod common;

use std::sync::{Arc, Mutex};

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use placement_client::models::user::UserStatus;
use placement_client::services::admin_service::{AdminConsole, AdminTab};

use common::{admin_user, app_at, envelope, serve, user_json};

fn admin_router(users: Arc<Mutex<Vec<Value>>>, analytics_status: StatusCode) -> Router {
    let users_all = users.clone();
    let users_pending = users.clone();
    let users_approve = users.clone();
    let users_block = users.clone();
    let users_delete = users.clone();
    let users_analytics = users;

    Router::new()
        .route(
            "/admin/users",
            get(move || {
                let users = users_all.clone();
                async move { Json(envelope(Value::Array(users.lock().unwrap().clone()))) }
            }),
        )
        .route(
            "/admin/users/pending",
            get(move || {
                let users = users_pending.clone();
                async move {
                    let pending: Vec<Value> = users
                        .lock()
                        .unwrap()
                        .iter()
                        .filter(|u| u["status"] == "PENDING")
                        .cloned()
                        .collect();
                    Json(envelope(Value::Array(pending)))
                }
            }),
        )
        .route(
            "/admin/users/:id/approve",
            put(move |Path(id): Path<i64>| {
                let users = users_approve.clone();
                async move {
                    set_status(&users, id, "APPROVED");
                    Json(envelope(json!(null)))
                }
            }),
        )
        .route(
            "/admin/users/:id/block",
            put(move |Path(id): Path<i64>| {
                let users = users_block.clone();
                async move {
                    set_status(&users, id, "BLOCKED");
                    Json(envelope(json!(null)))
                }
            }),
        )
        .route(
            "/admin/users/:id",
            delete(move |Path(id): Path<i64>| {
                let users = users_delete.clone();
                async move {
                    users.lock().unwrap().retain(|u| u["id"] != id);
                    Json(envelope(json!(null)))
                }
            }),
        )
        .route(
            "/admin/analytics",
            get(move || {
                let users = users_analytics.clone();
                async move {
                    if !analytics_status.is_success() {
                        return (analytics_status, Json(json!({ "message": "down" })));
                    }
                    let total = users.lock().unwrap().len() as i64;
                    (
                        StatusCode::OK,
                        Json(envelope(json!({
                            "totalUsers": total,
                            "totalStudents": total,
                            "totalRecruiters": 0,
                            "totalJobs": 4,
                            "activeJobs": 3,
                            "totalApplications": 7,
                        }))),
                    )
                }
            }),
        )
}

fn set_status(users: &Arc<Mutex<Vec<Value>>>, id: i64, status: &str) {
    for user in users.lock().unwrap().iter_mut() {
        if user["id"] == id {
            user["status"] = json!(status);
        }
    }
}

fn seed_users() -> Vec<Value> {
    vec![
        user_json(1, "APPROVED"),
        user_json(2, "PENDING"),
        user_json(3, "APPROVED"),
    ]
}

#[tokio::test]
async fn refresh_loads_users_and_analytics_together() {
    let users = Arc::new(Mutex::new(seed_users()));
    let base = serve(admin_router(users, StatusCode::OK)).await;
    let dir = tempfile::tempdir().unwrap();
    let app = app_at(&base, &dir);
    app.session.login(admin_user(99), "tok-a".into()).unwrap();

    let mut console = AdminConsole::new(app.admin.clone());
    console.refresh().await;

    assert_eq!(console.users.data.len(), 3);
    assert_eq!(console.pending_count(), 1);
    assert_eq!(console.analytics.data.total_users, 3);
    assert_eq!(console.analytics.data.total_applications, 7);
}

#[tokio::test]
async fn pending_tab_filters_client_side() {
    let users = Arc::new(Mutex::new(seed_users()));
    let base = serve(admin_router(users, StatusCode::OK)).await;
    let dir = tempfile::tempdir().unwrap();
    let app = app_at(&base, &dir);
    app.session.login(admin_user(99), "tok-a".into()).unwrap();

    let mut console = AdminConsole::new(app.admin.clone());
    console.refresh().await;

    console.tab = AdminTab::Pending;
    let visible = console.visible_users();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, 2);

    console.tab = AdminTab::All;
    assert_eq!(console.visible_users().len(), 3);
}

#[tokio::test]
async fn approve_refetches_the_full_list() {
    let users = Arc::new(Mutex::new(seed_users()));
    let base = serve(admin_router(users, StatusCode::OK)).await;
    let dir = tempfile::tempdir().unwrap();
    let app = app_at(&base, &dir);
    app.session.login(admin_user(99), "tok-a".into()).unwrap();

    let mut console = AdminConsole::new(app.admin.clone());
    console.refresh().await;
    assert_eq!(console.pending_count(), 1);

    console.approve(2).await.unwrap();
    assert_eq!(console.pending_count(), 0);
    let approved = console
        .users
        .data
        .iter()
        .find(|u| u.id == 2)
        .expect("user kept");
    assert_eq!(approved.status, UserStatus::Approved);
}

#[tokio::test]
async fn block_and_delete_update_the_refetched_list() {
    let users = Arc::new(Mutex::new(seed_users()));
    let base = serve(admin_router(users, StatusCode::OK)).await;
    let dir = tempfile::tempdir().unwrap();
    let app = app_at(&base, &dir);
    app.session.login(admin_user(99), "tok-a".into()).unwrap();

    let mut console = AdminConsole::new(app.admin.clone());
    console.block(3).await.unwrap();
    let blocked = console.users.data.iter().find(|u| u.id == 3).unwrap();
    assert_eq!(blocked.status, UserStatus::Blocked);

    console.delete(3).await.unwrap();
    assert!(console.users.data.iter().all(|u| u.id != 3));
    assert_eq!(console.analytics.data.total_users, 2);
}

#[tokio::test]
async fn pending_endpoint_returns_only_pending_users() {
    let users = Arc::new(Mutex::new(seed_users()));
    let base = serve(admin_router(users, StatusCode::OK)).await;
    let dir = tempfile::tempdir().unwrap();
    let app = app_at(&base, &dir);
    app.session.login(admin_user(99), "tok-a".into()).unwrap();

    let pending = app.admin.pending_users().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, 2);
    assert_eq!(pending[0].status, UserStatus::Pending);
}

#[tokio::test]
async fn analytics_failure_degrades_without_blocking_users() {
    let users = Arc::new(Mutex::new(seed_users()));
    let base = serve(admin_router(users, StatusCode::SERVICE_UNAVAILABLE)).await;
    let dir = tempfile::tempdir().unwrap();
    let app = app_at(&base, &dir);
    app.session.login(admin_user(99), "tok-a".into()).unwrap();

    let mut console = AdminConsole::new(app.admin.clone());
    console.refresh().await;

    assert_eq!(console.users.data.len(), 3);
    assert!(console.users.error.is_none());
    assert!(console.analytics.error.is_some());
    assert_eq!(console.analytics.data.total_users, 0);
}
