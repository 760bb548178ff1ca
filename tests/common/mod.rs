#![allow(dead_code)]

use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use placement_client::config::Config;
use placement_client::models::user::{Role, SessionUser, UserStatus};
use placement_client::App;

/// Bind the stub backend on an ephemeral port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub backend");
    });
    format!("http://{}", addr)
}

pub fn app_at(base_url: &str, dir: &tempfile::TempDir) -> App {
    let config = Config::new(base_url, dir.path().join("session.json"));
    App::new(config).expect("construct app")
}

pub fn student_user(user_id: i64) -> SessionUser {
    SessionUser {
        user_id,
        email: "a@x.com".into(),
        full_name: "A Student".into(),
        role: Role::Student,
        status: UserStatus::Approved,
    }
}

pub fn recruiter_user(user_id: i64) -> SessionUser {
    SessionUser {
        user_id,
        email: "r@x.com".into(),
        full_name: "A Recruiter".into(),
        role: Role::Recruiter,
        status: UserStatus::Approved,
    }
}

pub fn admin_user(user_id: i64) -> SessionUser {
    SessionUser {
        user_id,
        email: "admin@x.com".into(),
        full_name: "The Admin".into(),
        role: Role::Admin,
        status: UserStatus::Approved,
    }
}

pub fn envelope(data: Value) -> Value {
    json!({ "data": data })
}

pub fn job_json(id: i64, title: &str, job_type: &str, location: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "companyName": "Acme",
        "description": format!("{} role", title),
        "location": location,
        "salary": "10000",
        "duration": "6 months",
        "type": job_type,
        "requirements": null,
        "recruiterId": 9,
    })
}

pub fn application_json(id: i64, student_id: i64, job_id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "studentId": student_id,
        "jobId": job_id,
        "coverLetter": "hello",
        "status": status,
        "appliedAt": "2026-01-10T12:00:00Z",
        "student": {
            "userId": student_id,
            "fullName": "Snapshot Name",
            "email": "snap@x.com",
            "college": "Snapshot University",
            "skills": "java, sql",
        },
    })
}

pub fn user_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "email": format!("u{}@x.com", id),
        "fullName": format!("User {}", id),
        "role": "STUDENT",
        "status": status,
    })
}
