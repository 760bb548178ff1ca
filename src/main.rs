use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use placement_client::config::Config;
use placement_client::dto::auth_dto::{LoginPayload, RegisterPayload};
use placement_client::dto::job_dto::CreateJobPayload;
use placement_client::dto::profile_dto::ProfileForm;
use placement_client::error::Error;
use placement_client::guard::{self, RouteDecision, SessionState};
use placement_client::models::application::ApplicationStatus;
use placement_client::models::job::JobType;
use placement_client::models::user::Role;
use placement_client::services::admin_service::{AdminConsole, AdminTab};
use placement_client::services::job_service::JobFilters;
use placement_client::services::recruiter_service::RecruiterConsole;
use placement_client::services::student_service::StudentDashboard;
use placement_client::session::SessionEvent;
use placement_client::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "placement_client=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    let app = App::new(config)?;
    let mut events = app.session.subscribe();

    let args: Vec<String> = env::args().skip(1).collect();
    let result = run(&app, &args).await;

    // The transport layer only broadcasts on 401/403; the shell owns the
    // "navigate to login" reaction.
    if matches!(events.try_recv(), Ok(SessionEvent::Invalidated)) {
        eprintln!("Session expired or was rejected. Please log in again.");
    }

    if let Err(err) = result {
        eprintln!("{}", err);
        std::process::exit(1);
    }
    Ok(())
}

async fn run(app: &App, args: &[String]) -> anyhow::Result<()> {
    let mut args = args.iter().map(String::as_str);
    match args.next() {
        Some("register") => {
            let (email, password, full_name, role) =
                match (args.next(), args.next(), args.next(), args.next()) {
                    (Some(e), Some(p), Some(n), Some(r)) => (e, p, n, r),
                    _ => return usage(),
                };
            let role = parse_role(role)?;
            let company_name = args.next().map(str::to_string);
            let user = app
                .auth
                .register(RegisterPayload {
                    email: email.to_string(),
                    password: password.to_string(),
                    full_name: full_name.to_string(),
                    role,
                    company_name,
                })
                .await?;
            println!(
                "Registered {} ({}) with status {}",
                user.full_name, user.role, user.status
            );
        }
        Some("login") => {
            let (email, password) = match (args.next(), args.next()) {
                (Some(e), Some(p)) => (e, p),
                _ => return usage(),
            };
            let user = app
                .auth
                .login(LoginPayload {
                    email: email.to_string(),
                    password: password.to_string(),
                })
                .await?;
            println!("Logged in as {} ({})", user.full_name, user.role);
        }
        Some("logout") => {
            app.auth.logout();
            println!("Logged out");
        }
        Some("whoami") => match app.session.current_user() {
            Some(user) => println!("{} <{}> role={} status={}", user.full_name, user.email, user.role, user.status),
            None => println!("Not logged in"),
        },
        Some("jobs") => {
            let filters = parse_filters(args.collect())?;
            let mut browser = app.job_browser();
            browser.filters = filters;
            browser.load().await;
            let visible = browser.visible();
            if visible.is_empty() {
                println!("No jobs found");
            }
            for job in visible {
                let mark = if browser.is_bookmarked(job.id) { "*" } else { " " };
                println!(
                    "{} [{}] {} at {} ({}) - {}",
                    mark,
                    job.id,
                    job.title,
                    job.company_name,
                    job.job_type,
                    job.location.as_deref().unwrap_or("anywhere"),
                );
            }
        }
        Some("bookmark") => {
            let job_id = parse_id(args.next())?;
            let mut browser = app.job_browser();
            browser.load().await;
            match browser.toggle_bookmark(job_id).await {
                Ok(()) => {
                    if browser.is_bookmarked(job_id) {
                        println!("Bookmarked job {}", job_id);
                    } else {
                        println!("Removed bookmark for job {}", job_id);
                    }
                }
                Err(err) => println!("{}", err.display_message("Failed to toggle bookmark")),
            }
        }
        Some("apply") => {
            let job_id = parse_id(args.next())?;
            let cover_letter = args.collect::<Vec<_>>().join(" ");
            let browser = app.job_browser();
            match browser.apply(job_id, &cover_letter).await {
                Ok(()) => println!("Application submitted successfully"),
                Err(err) => println!("{}", err.display_message("Failed to submit application")),
            }
        }
        Some("dashboard") => dashboard(app).await?,
        Some("profile") => profile(app, args.collect()).await?,
        Some("resume") => {
            let path = args.next().map(PathBuf::from).ok_or_else(bad_usage)?;
            let user = require_login(app).await?;
            app.student.upload_resume(user.user_id, &path).await?;
            let refreshed = app.student.get_profile(user.user_id).await?;
            println!(
                "Resume uploaded: {}",
                refreshed.resume_url.as_deref().unwrap_or("(pending)")
            );
        }
        Some("post-job") => post_job(app, args.collect()).await?,
        Some("applications") => {
            let job_id = parse_id(args.next())?;
            let user = require_login(app).await?;
            let mut console = RecruiterConsole::new(app.recruiter.clone(), user.user_id);
            console.open_job(job_id).await?;
            for a in &console.applications {
                let actions = if a.status.is_decided() { "" } else { " [accept/reject]" };
                println!("[{}] student {} - {}{}", a.id, a.student_id, a.status, actions);
            }
        }
        Some("decide") => {
            let application_id = parse_id(args.next())?;
            let job_id = parse_id(args.next())?;
            let status = match args.next() {
                Some("accept") => ApplicationStatus::Accepted,
                Some("reject") => ApplicationStatus::Rejected,
                _ => return usage(),
            };
            let user = require_login(app).await?;
            let mut console = RecruiterConsole::new(app.recruiter.clone(), user.user_id);
            console.open_job(job_id).await?;
            match console.decide(application_id, status).await {
                Ok(()) => println!("Application {}", status.to_string().to_lowercase()),
                Err(err) => println!("{}", err.display_message("Failed to update application")),
            }
        }
        Some("admin") => admin(app, args.collect()).await?,
        _ => return usage(),
    }
    Ok(())
}

async fn dashboard(app: &App) -> anyhow::Result<()> {
    let state = guard::resolve_session(&app.session, &app.api).await;
    match guard::guard(&state) {
        RouteDecision::Loading => {
            println!("Session still resolving; try again");
            return Ok(());
        }
        RouteDecision::RedirectToLogin => {
            println!("Please log in first");
            return Ok(());
        }
        _ => {}
    }
    let SessionState::Authenticated(user) = state else {
        return Ok(());
    };

    match guard::dashboard_for(&user) {
        Role::Student => {
            let mut dash = StudentDashboard::new(app.student.clone(), app.jobs.clone(), user.user_id);
            dash.load().await;
            println!("Applications ({}):", dash.applications.data.len());
            for a in &dash.applications.data {
                println!("  [{}] job {} - {}", a.id, a.job_id, a.status);
            }
            if let Some(err) = &dash.applications.error {
                println!("  ({})", err);
            }
            println!("Bookmarks ({}):", dash.bookmarks.data.len());
            for b in &dash.bookmarks.data {
                println!("  job {}", b.job_id);
            }
            if let Some(err) = &dash.bookmarks.error {
                println!("  ({})", err);
            }
        }
        Role::Recruiter => {
            let mut console = RecruiterConsole::new(app.recruiter.clone(), user.user_id);
            console.load_jobs().await?;
            println!("My jobs ({}):", console.jobs.len());
            for job in &console.jobs {
                println!("  [{}] {} ({})", job.id, job.title, job.job_type);
            }
        }
        Role::Admin => {
            let mut console = AdminConsole::new(app.admin.clone());
            console.refresh().await;
            let a = console.analytics.data;
            println!(
                "Users: {} (students {}, recruiters {})  Jobs: {} ({} active)  Applications: {}",
                a.total_users,
                a.total_students,
                a.total_recruiters,
                a.total_jobs,
                a.active_jobs,
                a.total_applications,
            );
            println!("Pending approvals: {}", console.pending_count());
            for user in console.visible_users() {
                println!("  [{}] {} <{}> {} {}", user.id, user.full_name, user.email, user.role, user.status);
            }
        }
    }
    Ok(())
}

async fn profile(app: &App, args: Vec<&str>) -> anyhow::Result<()> {
    let user = require_login(app).await?;
    match args.first().copied() {
        Some("show") | None => {
            let profile = app.student.get_profile(user.user_id).await?;
            println!("phone:          {}", profile.phone.as_deref().unwrap_or("-"));
            println!("college:        {}", profile.college.as_deref().unwrap_or("-"));
            println!("graduationYear: {}", profile.graduation_year.as_deref().unwrap_or("-"));
            println!("education:      {}", profile.education.as_deref().unwrap_or("-"));
            println!("bio:            {}", profile.bio.as_deref().unwrap_or("-"));
            println!("skills:         {}", profile.skill_list().join(", "));
            match profile.resume_url.as_deref() {
                Some(rel) => println!("resume:         {}", app.api.resolve_asset_url(rel)?),
                None => println!("resume:         -"),
            }
        }
        Some("set") => {
            // Read-modify-write: fetch, merge the edits, PUT the whole
            // object back.
            let fetched = app.student.get_profile(user.user_id).await?;
            let mut form = ProfileForm::from_profile(fetched);
            for pair in args[1..].chunks(2) {
                match pair {
                    [field, value] => form.set(field, value).map_err(Error::BadRequest)?,
                    _ => return usage(),
                }
            }
            app.student
                .update_profile(user.user_id, form.as_profile())
                .await?;
            println!("Profile updated");
        }
        _ => return usage(),
    }
    Ok(())
}

async fn post_job(app: &App, args: Vec<&str>) -> anyhow::Result<()> {
    let user = require_login(app).await?;
    let [title, company_name, description, rest @ ..] = args.as_slice() else {
        return usage();
    };
    let mut payload = CreateJobPayload {
        title: title.to_string(),
        company_name: company_name.to_string(),
        description: description.to_string(),
        location: None,
        salary: None,
        duration: None,
        job_type: JobType::Job,
        requirements: None,
    };
    let mut rest = rest.iter();
    while let Some(flag) = rest.next() {
        let value = rest.next().ok_or_else(bad_usage)?;
        match *flag {
            "--location" => payload.location = Some(value.to_string()),
            "--salary" => payload.salary = Some(value.to_string()),
            "--duration" => payload.duration = Some(value.to_string()),
            "--requirements" => payload.requirements = Some(value.to_string()),
            "--type" => payload.job_type = value.parse().map_err(Error::BadRequest)?,
            _ => return usage(),
        }
    }

    let mut console = RecruiterConsole::new(app.recruiter.clone(), user.user_id);
    match console.create_job(&payload).await {
        Ok(job) => println!("Created job [{}] {}", job.id, job.title),
        Err(err) => println!("{}", err.display_message("Failed to create job")),
    }
    Ok(())
}

async fn admin(app: &App, args: Vec<&str>) -> anyhow::Result<()> {
    let mut console = AdminConsole::new(app.admin.clone());
    match args.as_slice() {
        ["users"] => {
            console.refresh().await;
            for user in console.visible_users() {
                println!("[{}] {} {} {}", user.id, user.full_name, user.role, user.status);
            }
        }
        ["pending"] => {
            console.tab = AdminTab::Pending;
            console.refresh().await;
            for user in console.visible_users() {
                println!("[{}] {} {}", user.id, user.full_name, user.role);
            }
        }
        ["approve", id] => {
            console.approve(parse_id(Some(id))?).await?;
            println!("User approved");
        }
        ["block", id] => {
            if confirm("Block this user?")? {
                console.block(parse_id(Some(id))?).await?;
                println!("User blocked");
            }
        }
        ["delete", id] => {
            if confirm("Delete this user? This action cannot be undone.")? {
                console.delete(parse_id(Some(id))?).await?;
                println!("User deleted");
            }
        }
        _ => return usage(),
    }
    Ok(())
}

async fn require_login(app: &App) -> anyhow::Result<placement_client::models::user::SessionUser> {
    match guard::resolve_session(&app.session, &app.api).await {
        SessionState::Authenticated(user) => Ok(user),
        SessionState::Unknown => anyhow::bail!("could not reach the server to validate the session"),
        SessionState::Unauthenticated => anyhow::bail!("please log in first"),
    }
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}

fn parse_role(raw: &str) -> anyhow::Result<Role> {
    match raw.to_ascii_uppercase().as_str() {
        "STUDENT" => Ok(Role::Student),
        "RECRUITER" => Ok(Role::Recruiter),
        "ADMIN" => Ok(Role::Admin),
        other => anyhow::bail!("unknown role: {}", other),
    }
}

fn parse_id(raw: Option<&str>) -> anyhow::Result<i64> {
    raw.ok_or_else(bad_usage)?
        .parse()
        .map_err(|_| bad_usage().into())
}

fn parse_filters(args: Vec<&str>) -> anyhow::Result<JobFilters> {
    let mut filters = JobFilters::default();
    let mut args = args.into_iter();
    while let Some(flag) = args.next() {
        let value = args.next().ok_or_else(bad_usage)?;
        match flag {
            "--keyword" => filters.keyword = Some(value.to_string()),
            "--location" => filters.location = Some(value.to_string()),
            "--type" => filters.job_type = Some(value.parse().map_err(Error::BadRequest)?),
            _ => return Err(bad_usage().into()),
        }
    }
    Ok(filters)
}

fn bad_usage() -> anyhow::Error {
    anyhow::anyhow!(USAGE)
}

fn usage<T>() -> anyhow::Result<T> {
    Err(bad_usage())
}

const USAGE: &str = "usage: placement-client <command>

  register <email> <password> <name> <STUDENT|RECRUITER|ADMIN> [company]
  login <email> <password>
  logout | whoami
  jobs [--keyword K] [--type JOB|INTERNSHIP] [--location L]
  bookmark <job-id>
  apply <job-id> [cover letter...]
  dashboard
  profile [show | set <field> <value> ...]
  resume <file>
  post-job <title> <company> <description> [--type T] [--location L] [--salary S] [--duration D] [--requirements R]
  applications <job-id>
  decide <application-id> <job-id> <accept|reject>
  admin <users | pending | approve ID | block ID | delete ID>";
