// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP server for the Farnsworth workshift system.
//!
//! This binary wires the API layer to axum. All authorization and domain
//! logic lives below it; the server only extracts requests, resolves the
//! caller and maps errors to status codes.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod routes;
mod session;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use farnsworth::{Command, CommandContext, CoreError, WorkshiftStore};
use farnsworth_api::{ApiContext, ApiError};
use farnsworth_audit::{Actor, Cause};
use farnsworth_domain::{DomainError, Hours, Member, MemberStatus, NewMember, WorkshiftSettings};
use farnsworth_persistence::Persistence;
use serde::Serialize;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::session::SessionMember;

/// Farnsworth workshift server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file (in-memory if omitted).
    #[arg(short, long, env = "FARNSWORTH_DATABASE")]
    database: Option<String>,

    /// Address to bind.
    #[arg(short, long, default_value = "0.0.0.0", env = "FARNSWORTH_BIND")]
    bind: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = 3000, env = "FARNSWORTH_PORT")]
    port: u16,

    /// Weekly hours required by each new semester's primary pool.
    #[arg(long, default_value_t = 5.0, env = "FARNSWORTH_DEFAULT_HOURS")]
    default_hours: f64,

    /// Hours before a shift after which signing out needs a substitute.
    #[arg(long, default_value_t = 24, env = "FARNSWORTH_SIGN_OUT_CUTOFF")]
    sign_out_cutoff: u32,

    /// Hours after a shift after which it may be marked blown.
    #[arg(long, default_value_t = 8, env = "FARNSWORTH_VERIFY_CUTOFF")]
    verify_cutoff: u32,

    /// Username of a superuser to create if no such member exists.
    #[arg(long, env = "FARNSWORTH_BOOTSTRAP_SUPERUSER")]
    bootstrap_superuser: Option<String>,
}

impl Args {
    fn settings(&self) -> Result<WorkshiftSettings, DomainError> {
        Ok(WorkshiftSettings {
            default_hours: Hours::from_f64(self.default_hours)?,
            sign_out_cutoff: self.sign_out_cutoff,
            verify_cutoff: self.verify_cutoff,
        })
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer, protected by a mutex for thread-safe access.
    persistence: Arc<Mutex<Persistence>>,
    /// Server-wide workshift defaults.
    settings: WorkshiftSettings,
}

impl AppState {
    fn new(persistence: Persistence, settings: WorkshiftSettings) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            settings,
        }
    }

    /// Builds the request context for an authenticated caller.
    fn context(&self, session: SessionMember) -> ApiContext {
        ApiContext::new(
            session.user,
            session.cause,
            OffsetDateTime::now_utc(),
            self.settings,
        )
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Machine-readable error kind.
    error: &'static str,
    message: String,
    /// The offending request field, for input errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    kind: &'static str,
    message: String,
    field: Option<String>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: self.kind,
            message: self.message,
            field: self.field,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let message: String = err.to_string();
        match err {
            ApiError::AuthenticationFailed { .. } => Self {
                status: StatusCode::UNAUTHORIZED,
                kind: "authentication_failed",
                message,
                field: None,
            },
            ApiError::Unauthorized { .. } => Self {
                status: StatusCode::FORBIDDEN,
                kind: "unauthorized",
                message,
                field: None,
            },
            ApiError::DomainRuleViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                kind: "domain_rule_violation",
                message,
                field: None,
            },
            ApiError::InvalidInput { field, .. } => Self {
                status: StatusCode::BAD_REQUEST,
                kind: "invalid_input",
                message,
                field: Some(field),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                kind: "not_found",
                message,
                field: None,
            },
            ApiError::Internal { .. } => {
                error!(error = %message, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    kind: "internal",
                    message,
                    field: None,
                }
            }
        }
    }
}

/// Creates `username` as a superuser unless a member by that name exists.
///
/// A fresh database has no members, so nobody could authenticate without
/// this.
///
/// # Errors
///
/// Returns an error if the lookup fails or the engine rejects the member.
fn bootstrap_superuser(
    persistence: &mut Persistence,
    username: &str,
    settings: WorkshiftSettings,
) -> Result<(), CoreError> {
    let existing: Option<Member> =
        persistence.transaction(|store| Ok(store.find_member_by_username(username)?))?;
    if existing.is_some() {
        info!(username, "Bootstrap superuser already present");
        return Ok(());
    }

    let ctx: CommandContext = CommandContext::new(
        Actor::system(),
        Cause::new(
            String::from("bootstrap"),
            String::from("Create the first superuser"),
        ),
        OffsetDateTime::now_utc(),
        settings,
    );
    persistence.apply(
        &ctx,
        Command::RegisterMember {
            member: NewMember {
                username: username.to_string(),
                first_name: String::from("House"),
                last_name: String::from("Administrator"),
                status: MemberStatus::Resident,
                is_superuser: true,
            },
        },
    )?;
    info!(username, "Created bootstrap superuser");
    Ok(())
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/whoami", get(routes::handle_whoami))
        .route(
            "/members",
            get(routes::handle_list_members).post(routes::handle_register_member),
        )
        .route(
            "/managers",
            get(routes::handle_list_managers).post(routes::handle_add_manager),
        )
        .route(
            "/semesters",
            get(routes::handle_list_semesters).post(routes::handle_start_semester),
        )
        .route("/semesters/current", get(routes::handle_current_overview))
        .route(
            "/semesters/{semester_id}",
            get(routes::handle_semester_overview)
                .put(routes::handle_update_semester)
                .delete(routes::handle_delete_semester),
        )
        .route(
            "/semesters/{semester_id}/current",
            post(routes::handle_set_current_semester),
        )
        .route(
            "/semesters/{semester_id}/workshifters",
            post(routes::handle_add_workshifter),
        )
        .route(
            "/semesters/{semester_id}/pools",
            post(routes::handle_create_pool),
        )
        .route(
            "/semesters/{semester_id}/standings",
            post(routes::handle_update_semester_standings),
        )
        .route(
            "/semesters/{semester_id}/open_shifts",
            get(routes::handle_semester_open_shifts),
        )
        .route(
            "/semesters/{semester_id}/clear_assignments",
            post(routes::handle_clear_assignments),
        )
        .route(
            "/semesters/{semester_id}/fines",
            post(routes::handle_calculate_fines),
        )
        .route(
            "/semesters/{semester_id}/audit",
            get(routes::handle_semester_audit_events),
        )
        .route("/standings", post(routes::handle_update_current_standings))
        .route("/open_shifts", get(routes::handle_current_open_shifts))
        .route("/audit", get(routes::handle_list_audit_events))
        .route(
            "/pools/{pool_id}",
            put(routes::handle_edit_pool).delete(routes::handle_delete_pool),
        )
        .route(
            "/pools/{pool_id}/regular_shifts",
            get(routes::handle_list_regular_shifts),
        )
        .route(
            "/pools/{pool_id}/auto_assign",
            post(routes::handle_auto_assign),
        )
        .route(
            "/pools/{pool_id}/random_assign",
            post(routes::handle_random_assign),
        )
        .route(
            "/pool_hours/{pool_hours_id}",
            put(routes::handle_adjust_pool_hours),
        )
        .route(
            "/pool_hours/{pool_hours_id}/recompute",
            post(routes::handle_recompute_standing),
        )
        .route(
            "/workshift_types",
            get(routes::handle_list_workshift_types).post(routes::handle_create_workshift_type),
        )
        .route(
            "/workshift_types/{workshift_type_id}",
            put(routes::handle_edit_workshift_type),
        )
        .route("/regular_shifts", post(routes::handle_create_regular_shift))
        .route(
            "/regular_shifts/{shift_id}",
            put(routes::handle_edit_regular_shift).delete(routes::handle_delete_regular_shift),
        )
        .route("/instances", post(routes::handle_create_instance))
        .route(
            "/instances/{instance_id}",
            get(routes::handle_instance_view)
                .put(routes::handle_edit_instance)
                .delete(routes::handle_delete_instance),
        )
        .route(
            "/instances/{instance_id}/hours",
            put(routes::handle_edit_instance_hours),
        )
        .route(
            "/instances/{instance_id}/sign_in",
            post(routes::handle_sign_in),
        )
        .route(
            "/instances/{instance_id}/sign_out",
            post(routes::handle_sign_out),
        )
        .route(
            "/instances/{instance_id}/verify",
            post(routes::handle_verify),
        )
        .route(
            "/instances/{instance_id}/blown",
            post(routes::handle_mark_blown),
        )
        .route("/profiles/me", get(routes::handle_own_profile))
        .route("/profiles/{profile_id}", get(routes::handle_profile_view))
        .route(
            "/profiles/{profile_id}/preferences",
            put(routes::handle_set_preferences),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Farnsworth server");

    let settings: WorkshiftSettings = args.settings()?;
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!(path = %db_path, "Using file-based database");
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if let Some(username) = &args.bootstrap_superuser {
        bootstrap_superuser(&mut persistence, username, settings)?;
    }

    let app_state: AppState = AppState::new(persistence, settings);
    let app: Router = build_router(app_state);

    let addr: String = format!("{}:{}", args.bind, args.port);
    info!(addr = %addr, "Server listening");

    let listener: tokio::net::TcpListener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
