// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler follows the same shape: load what authorization needs in
//! one read transaction, check the caller's authority, translate the request
//! into a [`Command`], and apply it through [`Persistence::apply`]. Engine
//! preconditions are never re-checked here.

use std::str::FromStr;

use farnsworth::queries;
use farnsworth::{
    Command, CommandContext, CoreError, InstanceView, Outcome, ProfileView, SemesterOverview,
    TransitionResult, WorkshiftStore, current_semester, load_instance_details,
};
use farnsworth_audit::{AuditEvent, Cause};
use farnsworth_domain::{
    DomainError, Hours, InstanceDetails, InstanceId, InstanceInfoDraft, Manager, ManagerId,
    Member, MemberId, NewManager, NewMember, NewSemester, PoolDraft, PoolHours, PoolHoursId,
    PoolId, Preference, ProfileId, RatingLevel, RegularShiftId, RegularWorkshift,
    RegularWorkshiftDraft, Schedule, Semester, SemesterId, TimeBlockSpec, Viewer,
    WorkshiftInstance, WorkshiftPool, WorkshiftProfile, WorkshiftSettings, WorkshiftType,
    WorkshiftTypeDraft, WorkshiftTypeId,
};
use farnsworth_persistence::{Persistence, SqliteStore};
use rand::seq::SliceRandom;
use time::{Date, OffsetDateTime, Time, Weekday};
use tracing::{info, warn};

use crate::auth::{AuthenticatedUser, AuthorizationService, viewer_for};
use crate::capabilities::{
    InstanceCapabilities, SemesterCapabilities, compute_instance_capabilities,
    compute_semester_capabilities,
};
use crate::error::{ApiError, invalid_input, translate_core_error};
use crate::request_response::{
    AddManagerRequest, AddWorkshifterRequest, AdjustPoolHoursRequest, AssignmentInfo,
    AssignmentResponse, AuditEventInfo, EditInstanceHoursRequest, FineInfo, InstanceRequest,
    InstanceSummary, InstanceViewResponse, ManagerInfo, MemberInfo, MessageResponse,
    PoolHoursInfo, PoolInfo, PoolRequest, PreferencesRequest, ProfileInfo, ProfileViewResponse,
    RegisterMemberRequest, RegularShiftInfo, RegularShiftRequest, SemesterInfo,
    SemesterOverviewResponse, StandingsResponse, StartSemesterRequest, UpdateSemesterRequest,
    WorkshiftTypeInfo, WorkshiftTypeRequest, parse_date_text, parse_time_text,
};

/// Everything a handler needs to know about the request it serves.
#[derive(Debug, Clone)]
pub struct ApiContext {
    /// The caller.
    pub user: AuthenticatedUser,
    pub cause: Cause,
    /// The moment the request is handled.
    pub now: OffsetDateTime,
    /// Defaults for records the system creates on its own.
    pub settings: WorkshiftSettings,
}

impl ApiContext {
    /// Creates a new request context.
    ///
    /// # Arguments
    ///
    /// * `user` - The authenticated caller
    /// * `cause` - The reason recorded with any command
    /// * `now` - The time the request is handled
    /// * `settings` - Server-wide workshift defaults
    #[must_use]
    pub const fn new(
        user: AuthenticatedUser,
        cause: Cause,
        now: OffsetDateTime,
        settings: WorkshiftSettings,
    ) -> Self {
        Self {
            user,
            cause,
            now,
            settings,
        }
    }

    #[must_use]
    pub const fn today(&self) -> Date {
        self.now.date()
    }

    fn command_context(&self) -> CommandContext {
        CommandContext::new(
            self.user.to_audit_actor(),
            self.cause.clone(),
            self.now,
            self.settings,
        )
    }
}

/// The result of an API operation that includes both the response and the audit event.
///
/// This ensures that successful API operations always produce an audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// The audit event generated by this operation.
    pub audit_event: AuditEvent,
}

impl<T> ApiResult<T> {
    fn new(response: T, result: TransitionResult) -> Self {
        Self {
            response,
            audit_event: result.audit_event,
        }
    }
}

// ========================================================================
// Internal helpers
// ========================================================================

/// Runs a read inside one transaction.
fn load<T, F>(persistence: &mut Persistence, work: F) -> Result<T, ApiError>
where
    F: FnOnce(&mut SqliteStore<'_>) -> Result<T, CoreError>,
{
    persistence.transaction(work).map_err(translate_core_error)
}

/// Applies a command on behalf of the caller.
fn run(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    command: Command,
) -> Result<TransitionResult, ApiError> {
    let name: &'static str = command.name();
    persistence
        .apply(&ctx.command_context(), command)
        .map_err(|err: CoreError| {
            warn!(
                command = name,
                actor = %ctx.user.member.username,
                error = %err,
                "Command rejected"
            );
            translate_core_error(err)
        })
}

fn unexpected(command: &str, outcome: &Outcome) -> ApiError {
    ApiError::Internal {
        message: format!("{command} produced an unexpected outcome: {}", outcome.summary()),
    }
}

fn fetch_semester<S: WorkshiftStore>(store: &mut S, id: SemesterId) -> Result<Semester, CoreError> {
    store
        .get_semester(id)?
        .ok_or(CoreError::DomainViolation(DomainError::SemesterNotFound(id)))
}

fn fetch_pool<S: WorkshiftStore>(store: &mut S, id: PoolId) -> Result<WorkshiftPool, CoreError> {
    store
        .get_pool(id)?
        .ok_or(CoreError::DomainViolation(DomainError::PoolNotFound(id)))
}

fn fetch_profile<S: WorkshiftStore>(
    store: &mut S,
    id: ProfileId,
) -> Result<WorkshiftProfile, CoreError> {
    store
        .get_profile(id)?
        .ok_or(CoreError::DomainViolation(DomainError::ProfileNotFound(id)))
}

fn fetch_instance<S: WorkshiftStore>(
    store: &mut S,
    id: InstanceId,
) -> Result<WorkshiftInstance, CoreError> {
    store
        .get_instance(id)?
        .ok_or(CoreError::DomainViolation(DomainError::InstanceNotFound(id)))
}

fn fetch_regular_shift<S: WorkshiftStore>(
    store: &mut S,
    id: RegularShiftId,
) -> Result<RegularWorkshift, CoreError> {
    store
        .get_regular_shift(id)?
        .ok_or(CoreError::DomainViolation(DomainError::RegularShiftNotFound(id)))
}

fn fetch_pool_hours<S: WorkshiftStore>(
    store: &mut S,
    id: PoolHoursId,
) -> Result<PoolHours, CoreError> {
    store
        .get_pool_hours(id)?
        .ok_or(CoreError::DomainViolation(DomainError::PoolHoursRecordNotFound(id)))
}

/// The named semester, or the current one when no id is given.
fn resolve_semester<S: WorkshiftStore>(
    store: &mut S,
    id: Option<SemesterId>,
) -> Result<Semester, CoreError> {
    match id {
        Some(id) => fetch_semester(store, id),
        None => current_semester(store),
    }
}

/// A pool together with the semester it belongs to.
fn pool_scope<S: WorkshiftStore>(
    store: &mut S,
    id: PoolId,
) -> Result<(WorkshiftPool, Semester), CoreError> {
    let pool: WorkshiftPool = fetch_pool(store, id)?;
    let semester: Semester = fetch_semester(store, pool.semester_id)?;
    Ok((pool, semester))
}

/// The pool and semester an instance is scoped to.
fn instance_scope<S: WorkshiftStore>(
    store: &mut S,
    id: InstanceId,
) -> Result<(WorkshiftInstance, WorkshiftPool, Semester), CoreError> {
    let instance: WorkshiftInstance = fetch_instance(store, id)?;
    let details: InstanceDetails = load_instance_details(store, &instance)?;
    let (pool, semester) = pool_scope(store, details.pool_id())?;
    Ok((instance, pool, semester))
}

fn member_by_username(
    persistence: &mut Persistence,
    username: &str,
) -> Result<Member, ApiError> {
    let member: Option<Member> = load(persistence, |store| {
        Ok(store.find_member_by_username(username)?)
    })?;
    member.ok_or_else(|| ApiError::ResourceNotFound {
        resource_type: String::from("Member"),
        message: format!("No member with username '{username}'"),
    })
}

fn summarize(
    persistence: &mut Persistence,
    instance: &WorkshiftInstance,
) -> Result<InstanceSummary, ApiError> {
    let details: InstanceDetails = load(persistence, |store| {
        load_instance_details(store, instance)
    })?;
    Ok(InstanceSummary::new(instance, &details))
}

// ========================================================================
// Input parsing
// ========================================================================

fn parse_hours(field: &str, value: f64) -> Result<Hours, ApiError> {
    Hours::from_f64(value).map_err(|err: DomainError| invalid_input(field, err.to_string()))
}

fn parse_date(field: &str, text: &str) -> Result<Date, ApiError> {
    parse_date_text(text)
        .ok_or_else(|| invalid_input(field, format!("'{text}' is not a YYYY-MM-DD date")))
}

fn parse_optional_date(field: &str, text: Option<&str>) -> Result<Option<Date>, ApiError> {
    text.filter(|value| !value.trim().is_empty())
        .map(|value| parse_date(field, value))
        .transpose()
}

fn parse_time(field: &str, text: &str) -> Result<Time, ApiError> {
    parse_time_text(text)
        .ok_or_else(|| invalid_input(field, format!("'{text}' is not an HH:MM time")))
}

fn parse_optional_time(field: &str, text: Option<&str>) -> Result<Option<Time>, ApiError> {
    text.filter(|value| !value.trim().is_empty())
        .map(|value| parse_time(field, value))
        .transpose()
}

fn parse_weekday(field: &str, text: &str) -> Result<Weekday, ApiError> {
    match text.trim().to_ascii_lowercase().as_str() {
        "monday" | "mon" => Ok(Weekday::Monday),
        "tuesday" | "tue" => Ok(Weekday::Tuesday),
        "wednesday" | "wed" => Ok(Weekday::Wednesday),
        "thursday" | "thu" => Ok(Weekday::Thursday),
        "friday" | "fri" => Ok(Weekday::Friday),
        "saturday" | "sat" => Ok(Weekday::Saturday),
        "sunday" | "sun" => Ok(Weekday::Sunday),
        _ => Err(invalid_input(field, format!("'{text}' is not a day of the week"))),
    }
}

fn parse_preference(text: &str) -> Result<Preference, ApiError> {
    match text.trim().to_ascii_lowercase().as_str() {
        "busy" => Ok(Preference::Busy),
        "preferred" => Ok(Preference::Preferred),
        _ => Err(invalid_input(
            "preference",
            format!("'{text}' is neither 'busy' nor 'preferred'"),
        )),
    }
}

/// Parses one of the domain's short-code enumerations.
fn parse_code<T>(field: &str, text: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = DomainError>,
{
    T::from_str(text.trim()).map_err(|err: DomainError| invalid_input(field, err.to_string()))
}

fn pool_draft(request: &PoolRequest) -> Result<PoolDraft, ApiError> {
    Ok(PoolDraft {
        title: request.title.clone(),
        managers: request.manager_ids.iter().copied().map(ManagerId::new).collect(),
        sign_out_cutoff: request.sign_out_cutoff,
        verify_cutoff: request.verify_cutoff,
        hours: parse_hours("hours", request.hours)?,
        weeks_per_period: request.weeks_per_period,
        first_fine_date: parse_optional_date(
            "first_fine_date",
            request.first_fine_date.as_deref(),
        )?,
        second_fine_date: parse_optional_date(
            "second_fine_date",
            request.second_fine_date.as_deref(),
        )?,
        third_fine_date: parse_optional_date(
            "third_fine_date",
            request.third_fine_date.as_deref(),
        )?,
        any_blown: request.any_blown,
        self_verify: request.self_verify,
    })
}

fn workshift_type_draft(request: &WorkshiftTypeRequest) -> Result<WorkshiftTypeDraft, ApiError> {
    Ok(WorkshiftTypeDraft {
        title: request.title.clone(),
        description: request.description.clone(),
        quick_tips: request.quick_tips.clone(),
        rateable: request.rateable,
        assignment: parse_code("assignment", &request.assignment)?,
    })
}

fn regular_shift_draft(request: &RegularShiftRequest) -> Result<RegularWorkshiftDraft, ApiError> {
    let schedule: Schedule = match request.day.as_deref() {
        Some(day) if !day.trim().is_empty() => Schedule::Day(parse_weekday("day", day)?),
        _ => Schedule::WeekLong,
    };
    Ok(RegularWorkshiftDraft {
        workshift_type_id: WorkshiftTypeId::new(request.workshift_type_id),
        pool_id: PoolId::new(request.pool_id),
        schedule,
        count: request.count,
        hours: parse_hours("hours", request.hours)?,
        active: request.active,
        current_assignees: request.assignee_ids.iter().copied().map(ProfileId::new).collect(),
        start_time: parse_optional_time("start_time", request.start_time.as_deref())?,
        end_time: parse_optional_time("end_time", request.end_time.as_deref())?,
        verify: parse_code("verify", &request.verify)?,
        addendum: request.addendum.clone(),
        is_manager_shift: request.is_manager_shift,
    })
}

fn instance_info_draft(request: &InstanceRequest) -> Result<InstanceInfoDraft, ApiError> {
    Ok(InstanceInfoDraft {
        title: request.title.clone(),
        description: request.description.clone(),
        pool_id: PoolId::new(request.pool_id),
        verify: parse_code("verify", &request.verify)?,
        start_time: parse_optional_time("start_time", request.start_time.as_deref())?,
        end_time: parse_optional_time("end_time", request.end_time.as_deref())?,
        week_long: request.week_long,
    })
}

// ========================================================================
// Members and managers
// ========================================================================

/// Adds a house member.
///
/// Resident members added while a semester is current get a profile and
/// pool-hours records straight away.
///
/// # Errors
///
/// Returns an error if:
/// - The caller cannot manage workshift
/// - A non-superuser tries to create a superuser
/// - The username or names are invalid, or the username is taken
pub fn register_member(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    request: &RegisterMemberRequest,
) -> Result<ApiResult<MemberInfo>, ApiError> {
    AuthorizationService::require_manage(&ctx.user, None, "register member")?;
    if request.is_superuser {
        AuthorizationService::require_superuser(&ctx.user, "create superuser")?;
    }

    let member: NewMember = NewMember {
        username: request.username.trim().to_string(),
        first_name: request.first_name.trim().to_string(),
        last_name: request.last_name.trim().to_string(),
        status: parse_code("status", &request.status)?,
        is_superuser: request.is_superuser,
    };
    let result: TransitionResult = run(persistence, ctx, Command::RegisterMember { member })?;
    let Outcome::Member(member) = &result.outcome else {
        return Err(unexpected("RegisterMember", &result.outcome));
    };

    info!(username = %member.username, member_id = %member.id, "Registered member");
    Ok(ApiResult::new(MemberInfo::from(member), result))
}

/// Creates a manager position.
///
/// # Errors
///
/// Returns an error if the caller is neither a superuser nor the president,
/// if the incumbent is unknown, or if the hours are invalid.
pub fn add_manager(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    request: &AddManagerRequest,
) -> Result<ApiResult<ManagerInfo>, ApiError> {
    AuthorizationService::require_president(&ctx.user, "add manager")?;

    let incumbent: Option<MemberId> = match request.incumbent.as_deref() {
        Some(username) if !username.trim().is_empty() => {
            Some(member_by_username(persistence, username.trim())?.id)
        }
        _ => None,
    };
    let manager: NewManager = NewManager {
        title: request.title.trim().to_string(),
        incumbent,
        workshift_manager: request.workshift_manager,
        president: request.president,
        workshift_hours: parse_hours("workshift_hours", request.workshift_hours)?,
    };
    let result: TransitionResult = run(persistence, ctx, Command::AddManager { manager })?;
    let Outcome::Manager(manager) = &result.outcome else {
        return Err(unexpected("AddManager", &result.outcome));
    };
    Ok(ApiResult::new(ManagerInfo::from(manager), result))
}

/// Lists every member, active or not.
///
/// # Errors
///
/// Returns an error if the lookup fails.
pub fn list_members(persistence: &mut Persistence) -> Result<Vec<MemberInfo>, ApiError> {
    let members: Vec<Member> = load(persistence, |store| Ok(store.list_members()?))?;
    Ok(members.iter().map(MemberInfo::from).collect())
}

/// Lists every manager position.
///
/// # Errors
///
/// Returns an error if the lookup fails.
pub fn list_managers(persistence: &mut Persistence) -> Result<Vec<ManagerInfo>, ApiError> {
    let managers: Vec<Manager> = load(persistence, |store| Ok(store.list_managers()?))?;
    Ok(managers.iter().map(ManagerInfo::from).collect())
}

// ========================================================================
// Semesters
// ========================================================================

/// Starts a semester and makes it current.
///
/// The primary pool is always created; `extra_pools` are created beside it.
/// Every active resident gets a profile and pool-hours records, and manager
/// positions with weekly hours get their manager workshifts.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `ctx` - The request context
/// * `request` - The semester to start
///
/// # Errors
///
/// Returns an error if:
/// - The caller cannot manage workshift
/// - The season, dates or any pool are invalid
/// - A semester for the same season and year already exists
pub fn start_semester(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    request: &StartSemesterRequest,
) -> Result<ApiResult<SemesterInfo>, ApiError> {
    AuthorizationService::require_manage(&ctx.user, None, "start semester")?;

    let semester: NewSemester = NewSemester {
        season: parse_code("season", &request.season)?,
        year: request.year,
        rate_cents: request.rate_cents,
        policy: request.policy.clone(),
        start_date: parse_date("start_date", &request.start_date)?,
        end_date: parse_date("end_date", &request.end_date)?,
    };
    let extra_pools: Vec<PoolDraft> = request
        .extra_pools
        .iter()
        .map(pool_draft)
        .collect::<Result<_, _>>()?;

    let result: TransitionResult = run(
        persistence,
        ctx,
        Command::StartSemester {
            semester,
            extra_pools,
        },
    )?;
    let Outcome::Semester(semester) = &result.outcome else {
        return Err(unexpected("StartSemester", &result.outcome));
    };

    info!(semester = %semester, semester_id = %semester.id, "Started semester");
    Ok(ApiResult::new(SemesterInfo::from(semester), result))
}

/// Changes a semester's fine rate, policy link and preference window.
///
/// # Errors
///
/// Returns an error if the semester is missing or the caller cannot manage it.
pub fn update_semester(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    semester_id: i64,
    request: &UpdateSemesterRequest,
) -> Result<ApiResult<SemesterInfo>, ApiError> {
    let semester_id: SemesterId = SemesterId::new(semester_id);
    let semester: Semester = load(persistence, |store| fetch_semester(store, semester_id))?;
    AuthorizationService::require_manage(&ctx.user, Some(&semester), "update semester")?;

    let result: TransitionResult = run(
        persistence,
        ctx,
        Command::UpdateSemester {
            semester_id,
            rate_cents: request.rate_cents,
            policy: request.policy.clone(),
            preferences_open: request.preferences_open,
        },
    )?;
    let Outcome::Semester(semester) = &result.outcome else {
        return Err(unexpected("UpdateSemester", &result.outcome));
    };
    Ok(ApiResult::new(SemesterInfo::from(semester), result))
}

/// Makes an existing semester the current one.
///
/// # Errors
///
/// Returns an error if the caller cannot manage workshift or the semester
/// is missing.
pub fn set_current_semester(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    semester_id: i64,
) -> Result<ApiResult<SemesterInfo>, ApiError> {
    AuthorizationService::require_manage(&ctx.user, None, "set current semester")?;
    let result: TransitionResult = run(
        persistence,
        ctx,
        Command::SetCurrentSemester {
            semester_id: SemesterId::new(semester_id),
        },
    )?;
    let Outcome::Semester(semester) = &result.outcome else {
        return Err(unexpected("SetCurrentSemester", &result.outcome));
    };
    Ok(ApiResult::new(SemesterInfo::from(semester), result))
}

/// Deletes a semester with everything scoped to it.
///
/// # Errors
///
/// Returns an error if the caller is not a superuser or the semester is
/// missing.
pub fn delete_semester(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    semester_id: i64,
) -> Result<ApiResult<MessageResponse>, ApiError> {
    AuthorizationService::require_superuser(&ctx.user, "delete semester")?;
    let result: TransitionResult = run(
        persistence,
        ctx,
        Command::DeleteSemester {
            semester_id: SemesterId::new(semester_id),
        },
    )?;
    warn!(semester_id, actor = %ctx.user.member.username, "Deleted semester");
    Ok(ApiResult::new(
        MessageResponse {
            message: format!("Deleted semester {semester_id}"),
        },
        result,
    ))
}

/// Adds a member to a semester that has already started.
///
/// # Errors
///
/// Returns an error if:
/// - The caller cannot manage the semester
/// - The member is unknown or already has a profile
/// - The hours override is invalid
pub fn add_workshifter(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    semester_id: i64,
    request: &AddWorkshifterRequest,
) -> Result<ApiResult<ProfileInfo>, ApiError> {
    let semester_id: SemesterId = SemesterId::new(semester_id);
    let semester: Semester = load(persistence, |store| fetch_semester(store, semester_id))?;
    AuthorizationService::require_manage(&ctx.user, Some(&semester), "add workshifter")?;

    let member: Member = member_by_username(persistence, request.username.trim())?;
    let primary_hours: Option<Hours> = request
        .primary_hours
        .map(|hours| parse_hours("primary_hours", hours))
        .transpose()?;
    let result: TransitionResult = run(
        persistence,
        ctx,
        Command::AddWorkshifter {
            semester_id,
            member_id: member.id,
            primary_hours,
        },
    )?;
    let Outcome::Profile(profile) = &result.outcome else {
        return Err(unexpected("AddWorkshifter", &result.outcome));
    };
    Ok(ApiResult::new(ProfileInfo::from(profile), result))
}

/// Lists every semester.
///
/// # Errors
///
/// Returns an error if the lookup fails.
pub fn list_semesters(persistence: &mut Persistence) -> Result<Vec<SemesterInfo>, ApiError> {
    let semesters: Vec<Semester> = load(persistence, |store| Ok(store.list_semesters()?))?;
    Ok(semesters.iter().map(SemesterInfo::from).collect())
}

/// Loads the overview of a semester, or of the current one.
///
/// # Errors
///
/// Returns an error if the semester is missing or there is no current
/// semester.
pub fn semester_overview(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    semester_id: Option<i64>,
) -> Result<SemesterOverviewResponse, ApiError> {
    let today: Date = ctx.today();
    let overview: SemesterOverview = load(persistence, |store| {
        let semester: Semester = resolve_semester(store, semester_id.map(SemesterId::new))?;
        queries::semester_overview(store, semester.id, today)
    })?;
    let capabilities: SemesterCapabilities = compute_semester_capabilities(&ctx.user, &overview.semester);
    Ok(SemesterOverviewResponse::new(&overview, capabilities))
}

// ========================================================================
// Pools and standings
// ========================================================================

/// Creates a pool in a semester, seeding records for every profile.
///
/// # Errors
///
/// Returns an error if the caller cannot manage the semester or the pool
/// is invalid or its title is taken.
pub fn create_pool(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    semester_id: i64,
    request: &PoolRequest,
) -> Result<ApiResult<PoolInfo>, ApiError> {
    let semester_id: SemesterId = SemesterId::new(semester_id);
    let semester: Semester = load(persistence, |store| fetch_semester(store, semester_id))?;
    AuthorizationService::require_manage(&ctx.user, Some(&semester), "create pool")?;

    let draft: PoolDraft = pool_draft(request)?;
    let result: TransitionResult =
        run(persistence, ctx, Command::CreatePool { semester_id, draft })?;
    let Outcome::Pool(pool) = &result.outcome else {
        return Err(unexpected("CreatePool", &result.outcome));
    };
    Ok(ApiResult::new(PoolInfo::from(pool), result))
}

/// Edits a pool's settings.
///
/// Members whose requirement still follows the old pool default move to
/// the new one.
///
/// # Errors
///
/// Returns an error if the caller cannot manage the pool's semester or the
/// settings are invalid.
pub fn edit_pool(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    pool_id: i64,
    request: &PoolRequest,
) -> Result<ApiResult<PoolInfo>, ApiError> {
    let pool_id: PoolId = PoolId::new(pool_id);
    let (_, semester) = load(persistence, |store| pool_scope(store, pool_id))?;
    AuthorizationService::require_manage(&ctx.user, Some(&semester), "edit pool")?;

    let draft: PoolDraft = pool_draft(request)?;
    let result: TransitionResult = run(persistence, ctx, Command::EditPool { pool_id, draft })?;
    let Outcome::Pool(pool) = &result.outcome else {
        return Err(unexpected("EditPool", &result.outcome));
    };
    Ok(ApiResult::new(PoolInfo::from(pool), result))
}

/// Deletes a non-primary pool.
///
/// # Errors
///
/// Returns an error if the caller cannot manage the pool's semester or the
/// pool is the primary pool.
pub fn delete_pool(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    pool_id: i64,
) -> Result<ApiResult<MessageResponse>, ApiError> {
    let pool_id: PoolId = PoolId::new(pool_id);
    let (pool, semester) = load(persistence, |store| pool_scope(store, pool_id))?;
    AuthorizationService::require_manage(&ctx.user, Some(&semester), "delete pool")?;

    let result: TransitionResult = run(persistence, ctx, Command::DeletePool { pool_id })?;
    Ok(ApiResult::new(
        MessageResponse {
            message: format!("Deleted pool '{}'", pool.title),
        },
        result,
    ))
}

/// Hand-sets one member's requirement and adjustment in a pool.
///
/// # Errors
///
/// Returns an error if the record is missing, the caller lacks authority
/// over its pool, or the hours are invalid.
pub fn adjust_pool_hours(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    pool_hours_id: i64,
    request: &AdjustPoolHoursRequest,
) -> Result<ApiResult<PoolHoursInfo>, ApiError> {
    let pool_hours_id: PoolHoursId = PoolHoursId::new(pool_hours_id);
    let (pool, semester) = load(persistence, |store| {
        let record: PoolHours = fetch_pool_hours(store, pool_hours_id)?;
        pool_scope(store, record.pool_id)
    })?;
    AuthorizationService::require_pool_authority(&ctx.user, &semester, &pool, "adjust hours")?;

    let result: TransitionResult = run(
        persistence,
        ctx,
        Command::AdjustPoolHours {
            pool_hours_id,
            hours: parse_hours("hours", request.hours)?,
            hour_adjustment: parse_hours("hour_adjustment", request.hour_adjustment)?,
        },
    )?;
    let Outcome::PoolHours(record) = &result.outcome else {
        return Err(unexpected("AdjustPoolHours", &result.outcome));
    };
    Ok(ApiResult::new(PoolHoursInfo::from(record), result))
}

/// Re-derives one member's standing from history.
///
/// # Errors
///
/// Returns an error if the record is missing or the caller lacks authority
/// over its pool.
pub fn recompute_standing(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    pool_hours_id: i64,
) -> Result<ApiResult<PoolHoursInfo>, ApiError> {
    let pool_hours_id: PoolHoursId = PoolHoursId::new(pool_hours_id);
    let (pool, semester) = load(persistence, |store| {
        let record: PoolHours = fetch_pool_hours(store, pool_hours_id)?;
        pool_scope(store, record.pool_id)
    })?;
    AuthorizationService::require_pool_authority(
        &ctx.user,
        &semester,
        &pool,
        "recompute standing",
    )?;

    let result: TransitionResult =
        run(persistence, ctx, Command::RecomputeStanding { pool_hours_id })?;
    let Outcome::PoolHours(record) = &result.outcome else {
        return Err(unexpected("RecomputeStanding", &result.outcome));
    };
    Ok(ApiResult::new(PoolHoursInfo::from(record), result))
}

/// Brings standings up to date as of the request time.
///
/// Any member may trigger this: it only applies debits and closures that
/// are already due.
///
/// # Errors
///
/// Returns an error if the semester is missing.
pub fn update_standings(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    semester_id: Option<i64>,
) -> Result<ApiResult<StandingsResponse>, ApiError> {
    let semester: Semester = load(persistence, |store| {
        resolve_semester(store, semester_id.map(SemesterId::new))
    })?;
    let result: TransitionResult = run(
        persistence,
        ctx,
        Command::UpdateStandings {
            semester_id: semester.id,
        },
    )?;
    let Outcome::StandingsUpdated { debited, closed } = result.outcome else {
        return Err(unexpected("UpdateStandings", &result.outcome));
    };
    Ok(ApiResult::new(StandingsResponse { debited, closed }, result))
}

// ========================================================================
// Workshift types and regular shifts
// ========================================================================

/// Creates a workshift type.
///
/// # Errors
///
/// Returns an error if the caller cannot manage workshift or the type is
/// invalid or its title is taken.
pub fn create_workshift_type(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    request: &WorkshiftTypeRequest,
) -> Result<ApiResult<WorkshiftTypeInfo>, ApiError> {
    AuthorizationService::require_manage(&ctx.user, None, "create workshift type")?;
    let draft: WorkshiftTypeDraft = workshift_type_draft(request)?;
    let result: TransitionResult = run(persistence, ctx, Command::CreateWorkshiftType { draft })?;
    let Outcome::WorkshiftType(workshift_type) = &result.outcome else {
        return Err(unexpected("CreateWorkshiftType", &result.outcome));
    };
    Ok(ApiResult::new(WorkshiftTypeInfo::from(workshift_type), result))
}

/// Edits a workshift type.
///
/// # Errors
///
/// Returns an error if the caller cannot manage workshift, or the type is
/// missing or invalid.
pub fn edit_workshift_type(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    workshift_type_id: i64,
    request: &WorkshiftTypeRequest,
) -> Result<ApiResult<WorkshiftTypeInfo>, ApiError> {
    AuthorizationService::require_manage(&ctx.user, None, "edit workshift type")?;
    let draft: WorkshiftTypeDraft = workshift_type_draft(request)?;
    let result: TransitionResult = run(
        persistence,
        ctx,
        Command::EditWorkshiftType {
            workshift_type_id: WorkshiftTypeId::new(workshift_type_id),
            draft,
        },
    )?;
    let Outcome::WorkshiftType(workshift_type) = &result.outcome else {
        return Err(unexpected("EditWorkshiftType", &result.outcome));
    };
    Ok(ApiResult::new(WorkshiftTypeInfo::from(workshift_type), result))
}

/// Lists every workshift type.
///
/// # Errors
///
/// Returns an error if the lookup fails.
pub fn list_workshift_types(
    persistence: &mut Persistence,
) -> Result<Vec<WorkshiftTypeInfo>, ApiError> {
    let types: Vec<WorkshiftType> = load(persistence, |store| Ok(store.list_workshift_types()?))?;
    Ok(types.iter().map(WorkshiftTypeInfo::from).collect())
}

/// Creates a recurring shift and generates its instances.
///
/// # Errors
///
/// Returns an error if:
/// - The pool is missing or the caller lacks authority over it
/// - The draft is invalid
/// - An assignee is busy at the shift's time
pub fn create_regular_shift(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    request: &RegularShiftRequest,
) -> Result<ApiResult<RegularShiftInfo>, ApiError> {
    let draft: RegularWorkshiftDraft = regular_shift_draft(request)?;
    let (pool, semester) = load(persistence, |store| pool_scope(store, draft.pool_id))?;
    AuthorizationService::require_pool_authority(&ctx.user, &semester, &pool, "create shift")?;

    let result: TransitionResult = run(persistence, ctx, Command::CreateRegularShift { draft })?;
    let Outcome::RegularShift(shift) = &result.outcome else {
        return Err(unexpected("CreateRegularShift", &result.outcome));
    };
    Ok(ApiResult::new(RegularShiftInfo::from(shift), result))
}

/// Edits a recurring shift; open instances follow the change.
///
/// The caller needs authority over both the current and the new pool.
///
/// # Errors
///
/// Returns an error if the shift or a pool is missing, the caller lacks
/// authority, or the draft is invalid.
pub fn edit_regular_shift(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    shift_id: i64,
    request: &RegularShiftRequest,
) -> Result<ApiResult<RegularShiftInfo>, ApiError> {
    let shift_id: RegularShiftId = RegularShiftId::new(shift_id);
    let draft: RegularWorkshiftDraft = regular_shift_draft(request)?;
    let scopes = load(persistence, |store| {
        let shift: RegularWorkshift = fetch_regular_shift(store, shift_id)?;
        let current = pool_scope(store, shift.pool_id)?;
        let target = pool_scope(store, draft.pool_id)?;
        Ok([current, target])
    })?;
    for (pool, semester) in &scopes {
        AuthorizationService::require_pool_authority(&ctx.user, semester, pool, "edit shift")?;
    }

    let result: TransitionResult =
        run(persistence, ctx, Command::EditRegularShift { shift_id, draft })?;
    let Outcome::RegularShift(shift) = &result.outcome else {
        return Err(unexpected("EditRegularShift", &result.outcome));
    };
    Ok(ApiResult::new(RegularShiftInfo::from(shift), result))
}

/// Deletes a recurring shift; its closed instances are kept as standalone
/// history.
///
/// # Errors
///
/// Returns an error if the shift is missing or the caller lacks authority
/// over its pool.
pub fn delete_regular_shift(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    shift_id: i64,
) -> Result<ApiResult<MessageResponse>, ApiError> {
    let shift_id: RegularShiftId = RegularShiftId::new(shift_id);
    let (pool, semester) = load(persistence, |store| {
        let shift: RegularWorkshift = fetch_regular_shift(store, shift_id)?;
        pool_scope(store, shift.pool_id)
    })?;
    AuthorizationService::require_pool_authority(&ctx.user, &semester, &pool, "delete shift")?;

    let result: TransitionResult =
        run(persistence, ctx, Command::DeleteRegularShift { shift_id })?;
    Ok(ApiResult::new(
        MessageResponse {
            message: format!("Deleted regular shift {shift_id}"),
        },
        result,
    ))
}

/// Lists the recurring shifts of a pool.
///
/// # Errors
///
/// Returns an error if the pool is missing.
pub fn list_regular_shifts(
    persistence: &mut Persistence,
    pool_id: i64,
) -> Result<Vec<RegularShiftInfo>, ApiError> {
    let pool_id: PoolId = PoolId::new(pool_id);
    let shifts: Vec<RegularWorkshift> = load(persistence, |store| {
        fetch_pool(store, pool_id)?;
        Ok(store.list_regular_shifts(pool_id)?)
    })?;
    Ok(shifts.iter().map(RegularShiftInfo::from).collect())
}

// ========================================================================
// Instances
// ========================================================================

/// Creates a one-off shift.
///
/// # Errors
///
/// Returns an error if the pool is missing, the caller lacks authority over
/// it, or the details, date or hours are invalid.
pub fn create_instance(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    request: &InstanceRequest,
) -> Result<ApiResult<InstanceSummary>, ApiError> {
    let info: InstanceInfoDraft = instance_info_draft(request)?;
    let (pool, semester) = load(persistence, |store| pool_scope(store, info.pool_id))?;
    AuthorizationService::require_pool_authority(&ctx.user, &semester, &pool, "create shift")?;

    let result: TransitionResult = run(
        persistence,
        ctx,
        Command::CreateInstance {
            info,
            date: parse_date("date", &request.date)?,
            workshifter: request.workshifter_id.map(ProfileId::new),
            hours: parse_hours("hours", request.hours)?,
        },
    )?;
    let Outcome::Instance(instance) = &result.outcome else {
        return Err(unexpected("CreateInstance", &result.outcome));
    };
    let summary: InstanceSummary = summarize(persistence, instance)?;
    Ok(ApiResult::new(summary, result))
}

/// Edits a shift's details, date and workshifter.
///
/// A recurring instance is detached from its template into a standalone
/// snapshot. Hours are changed through [`edit_instance_hours`].
///
/// # Errors
///
/// Returns an error if the instance is missing, the caller lacks authority
/// over its pool, or the details are invalid.
pub fn edit_instance(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    instance_id: i64,
    request: &InstanceRequest,
) -> Result<ApiResult<InstanceSummary>, ApiError> {
    let instance_id: InstanceId = InstanceId::new(instance_id);
    let (_, pool, semester) = load(persistence, |store| instance_scope(store, instance_id))?;
    AuthorizationService::require_pool_authority(&ctx.user, &semester, &pool, "edit shift")?;

    let result: TransitionResult = run(
        persistence,
        ctx,
        Command::EditInstance {
            instance_id,
            info: instance_info_draft(request)?,
            date: parse_date("date", &request.date)?,
            workshifter: request.workshifter_id.map(ProfileId::new),
        },
    )?;
    let Outcome::Instance(instance) = &result.outcome else {
        return Err(unexpected("EditInstance", &result.outcome));
    };
    let summary: InstanceSummary = summarize(persistence, instance)?;
    Ok(ApiResult::new(summary, result))
}

/// Deletes a shift, reverting its effect on standing if it was closed.
///
/// # Errors
///
/// Returns an error if the instance is missing or the caller lacks
/// authority over its pool.
pub fn delete_instance(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    instance_id: i64,
) -> Result<ApiResult<MessageResponse>, ApiError> {
    let instance_id: InstanceId = InstanceId::new(instance_id);
    let (_, pool, semester) = load(persistence, |store| instance_scope(store, instance_id))?;
    AuthorizationService::require_pool_authority(&ctx.user, &semester, &pool, "delete shift")?;

    let result: TransitionResult = run(persistence, ctx, Command::DeleteInstance { instance_id })?;
    Ok(ApiResult::new(
        MessageResponse {
            message: format!("Deleted shift {instance_id}"),
        },
        result,
    ))
}

/// Changes the hours a shift is worth.
///
/// # Errors
///
/// Returns an error if the instance is missing, the caller lacks authority
/// over its pool, or the hours are invalid.
pub fn edit_instance_hours(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    instance_id: i64,
    request: &EditInstanceHoursRequest,
) -> Result<ApiResult<InstanceSummary>, ApiError> {
    let instance_id: InstanceId = InstanceId::new(instance_id);
    let (pool, semester, editor) = load(persistence, |store| {
        let (_, pool, semester) = instance_scope(store, instance_id)?;
        let editor: Option<WorkshiftProfile> =
            store.find_profile(ctx.user.member.id, semester.id)?;
        Ok((pool, semester, editor.map(|profile| profile.id)))
    })?;
    AuthorizationService::require_pool_authority(&ctx.user, &semester, &pool, "edit hours")?;

    let result: TransitionResult = run(
        persistence,
        ctx,
        Command::EditInstanceHours {
            instance_id,
            hours: parse_hours("hours", request.hours)?,
            editor,
            note: request.note.clone(),
        },
    )?;
    let Outcome::Instance(instance) = &result.outcome else {
        return Err(unexpected("EditInstanceHours", &result.outcome));
    };
    let summary: InstanceSummary = summarize(persistence, instance)?;
    Ok(ApiResult::new(summary, result))
}

/// Loads a shift with its logs and what the caller may do to it.
///
/// # Errors
///
/// Returns an error if the instance or its source is missing.
pub fn instance_view(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    instance_id: i64,
) -> Result<InstanceViewResponse, ApiError> {
    let instance_id: InstanceId = InstanceId::new(instance_id);
    let (view, semester): (InstanceView, Semester) = load(persistence, |store| {
        let (_, pool, semester) = instance_scope(store, instance_id)?;
        let viewer: Viewer = viewer_for(store, &ctx.user, &semester, &pool)?;
        let view: InstanceView = queries::instance_view(store, instance_id, |_| viewer)?;
        Ok((view, semester))
    })?;
    let capabilities: InstanceCapabilities =
        compute_instance_capabilities(&ctx.user, &semester, &view.pool, &view.interactions);
    Ok(InstanceViewResponse::new(&view, capabilities))
}

/// Lists open, unfilled shifts from today on.
///
/// # Errors
///
/// Returns an error if the semester is missing.
pub fn list_open_shifts(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    semester_id: Option<i64>,
) -> Result<Vec<InstanceSummary>, ApiError> {
    let today: Date = ctx.today();
    let open: Vec<(WorkshiftInstance, InstanceDetails)> = load(persistence, |store| {
        let semester: Semester = resolve_semester(store, semester_id.map(SemesterId::new))?;
        queries::open_shifts(store, semester.id, today)
    })?;
    Ok(open
        .iter()
        .map(|(instance, details)| InstanceSummary::new(instance, details))
        .collect())
}

// ========================================================================
// Interactions
// ========================================================================

fn interact(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    instance_id: i64,
    command: fn(InstanceId, Viewer) -> Command,
) -> Result<ApiResult<InstanceSummary>, ApiError> {
    let instance_id: InstanceId = InstanceId::new(instance_id);
    let viewer: Viewer = load(persistence, |store| {
        let (_, pool, semester) = instance_scope(store, instance_id)?;
        viewer_for(store, &ctx.user, &semester, &pool)
    })?;

    let command: Command = command(instance_id, viewer);
    let name: &'static str = command.name();
    let result: TransitionResult = run(persistence, ctx, command)?;
    let Outcome::Instance(instance) = &result.outcome else {
        return Err(unexpected(name, &result.outcome));
    };

    info!(
        interaction = name,
        instance_id = %instance.id,
        actor = %ctx.user.member.username,
        "Shift interaction"
    );
    let summary: InstanceSummary = summarize(persistence, instance)?;
    Ok(ApiResult::new(summary, result))
}

/// Signs the caller in to an open, unfilled shift.
///
/// # Errors
///
/// Returns an error if the instance is missing, closed or already filled,
/// or the caller has no profile in its semester.
pub fn sign_in(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    instance_id: i64,
) -> Result<ApiResult<InstanceSummary>, ApiError> {
    interact(persistence, ctx, instance_id, |instance_id, viewer| {
        Command::SignIn {
            instance_id,
            viewer,
        }
    })
}

/// Signs the caller out of a shift they hold.
///
/// # Errors
///
/// Returns an error if the instance is missing or closed, or the caller is
/// not its workshifter.
pub fn sign_out(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    instance_id: i64,
) -> Result<ApiResult<InstanceSummary>, ApiError> {
    interact(persistence, ctx, instance_id, |instance_id, viewer| {
        Command::SignOut {
            instance_id,
            viewer,
        }
    })
}

/// Verifies a filled shift, crediting its workshifter.
///
/// # Errors
///
/// Returns an error if the instance is missing, closed or unfilled, or the
/// shift's verify policy does not allow the caller.
pub fn verify(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    instance_id: i64,
) -> Result<ApiResult<InstanceSummary>, ApiError> {
    interact(persistence, ctx, instance_id, |instance_id, viewer| {
        Command::Verify {
            instance_id,
            viewer,
        }
    })
}

/// Marks a filled shift blown, debiting its workshifter.
///
/// # Errors
///
/// Returns an error if the instance is missing, closed or unfilled, or the
/// caller may not mark shifts in its pool blown.
pub fn mark_blown(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    instance_id: i64,
) -> Result<ApiResult<InstanceSummary>, ApiError> {
    interact(persistence, ctx, instance_id, |instance_id, viewer| {
        Command::MarkBlown {
            instance_id,
            viewer,
        }
    })
}

// ========================================================================
// Profiles and preferences
// ========================================================================

/// Loads a member's profile view.
///
/// Without a profile id the caller's own profile in the current semester is
/// shown. The preference note is only visible to its owner and to managers.
///
/// # Errors
///
/// Returns an error if the profile is missing, or the caller has none in
/// the current semester.
pub fn profile_view(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    profile_id: Option<i64>,
) -> Result<ProfileViewResponse, ApiError> {
    let today: Date = ctx.today();
    let (view, semester): (ProfileView, Semester) = load(persistence, |store| {
        let profile_id: ProfileId = match profile_id {
            Some(id) => ProfileId::new(id),
            None => {
                let semester: Semester = current_semester(store)?;
                store
                    .find_profile(ctx.user.member.id, semester.id)?
                    .ok_or(CoreError::DomainViolation(DomainError::NoProfileInSemester))?
                    .id
            }
        };
        let view: ProfileView = queries::profile_view(store, profile_id, today)?;
        let semester: Semester = fetch_semester(store, view.profile.semester_id)?;
        Ok((view, semester))
    })?;

    let show_note: bool = view.member.id == ctx.user.member.id
        || AuthorizationService::can_manage(&ctx.user, Some(&semester));
    Ok(ProfileViewResponse::new(&view, show_note))
}

/// Saves a member's time blocks, ratings and note.
///
/// Members edit their own preferences while the semester's preference
/// window is open; workshift managers may edit anyone's at any time.
///
/// # Errors
///
/// Returns an error if:
/// - The profile is missing
/// - The caller is neither its owner nor a manager of its semester
/// - A block or rating is malformed
/// - Preferences are closed and the caller cannot manage
pub fn set_preferences(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    profile_id: i64,
    request: &PreferencesRequest,
) -> Result<ApiResult<ProfileInfo>, ApiError> {
    let profile_id: ProfileId = ProfileId::new(profile_id);
    let (profile, semester) = load(persistence, |store| {
        let profile: WorkshiftProfile = fetch_profile(store, profile_id)?;
        let semester: Semester = fetch_semester(store, profile.semester_id)?;
        Ok((profile, semester))
    })?;
    let can_manage: bool = AuthorizationService::can_manage(&ctx.user, Some(&semester));
    if profile.member_id != ctx.user.member.id && !can_manage {
        return Err(ApiError::Unauthorized {
            action: String::from("set preferences"),
            required: String::from("profile owner or workshift manager"),
        });
    }

    let blocks: Vec<TimeBlockSpec> = request
        .time_blocks
        .iter()
        .map(|block| {
            Ok(TimeBlockSpec {
                preference: parse_preference(&block.preference)?,
                day: parse_weekday("day", &block.day)?,
                start_time: parse_time("start_time", &block.start_time)?,
                end_time: parse_time("end_time", &block.end_time)?,
            })
        })
        .collect::<Result<_, ApiError>>()?;
    let ratings: Vec<(WorkshiftTypeId, RatingLevel)> = request
        .ratings
        .iter()
        .map(|rating| {
            Ok((
                WorkshiftTypeId::new(rating.workshift_type_id),
                parse_code("rating", &rating.rating)?,
            ))
        })
        .collect::<Result<_, ApiError>>()?;

    let result: TransitionResult = run(
        persistence,
        ctx,
        Command::SetPreferences {
            profile_id,
            blocks,
            ratings,
            note: request.note.clone(),
            can_manage,
        },
    )?;
    let Outcome::Profile(profile) = &result.outcome else {
        return Err(unexpected("SetPreferences", &result.outcome));
    };
    Ok(ApiResult::new(ProfileInfo::from(profile), result))
}

// ========================================================================
// Assignment and fines
// ========================================================================

/// Every member with hours in the pool, in random order.
fn shuffled_candidates(
    persistence: &mut Persistence,
    pool_id: PoolId,
) -> Result<Vec<ProfileId>, ApiError> {
    let records: Vec<PoolHours> =
        load(persistence, |store| Ok(store.list_pool_hours_for_pool(pool_id)?))?;
    let mut candidates: Vec<ProfileId> = records.iter().map(|record| record.profile_id).collect();
    candidates.shuffle(&mut rand::rng());
    Ok(candidates)
}

/// Assigns a pool's unfilled regular shifts to members who still owe hours.
///
/// Candidates are offered shifts in random order.
///
/// # Errors
///
/// Returns an error if the pool is missing or the caller cannot manage its
/// semester.
pub fn auto_assign(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    pool_id: i64,
) -> Result<ApiResult<AssignmentResponse>, ApiError> {
    let pool_id: PoolId = PoolId::new(pool_id);
    let (_, semester) = load(persistence, |store| pool_scope(store, pool_id))?;
    AuthorizationService::require_manage(&ctx.user, Some(&semester), "auto-assign shifts")?;

    let candidate_order: Vec<ProfileId> = shuffled_candidates(persistence, pool_id)?;
    let result: TransitionResult = run(
        persistence,
        ctx,
        Command::AutoAssign {
            pool_id,
            candidate_order,
        },
    )?;
    let Outcome::AutoAssigned(report) = &result.outcome else {
        return Err(unexpected("AutoAssign", &result.outcome));
    };
    Ok(ApiResult::new(AssignmentResponse::from(report), result))
}

/// Hands a pool's open, unassigned shifts out at random.
///
/// # Errors
///
/// Returns an error if the pool is missing or the caller cannot manage its
/// semester.
pub fn random_assign(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    pool_id: i64,
) -> Result<ApiResult<AssignmentResponse>, ApiError> {
    let pool_id: PoolId = PoolId::new(pool_id);
    let (_, semester) = load(persistence, |store| pool_scope(store, pool_id))?;
    AuthorizationService::require_manage(&ctx.user, Some(&semester), "random-assign shifts")?;

    let candidate_order: Vec<ProfileId> = shuffled_candidates(persistence, pool_id)?;
    let result: TransitionResult = run(
        persistence,
        ctx,
        Command::RandomAssign {
            pool_id,
            candidate_order,
        },
    )?;
    let Outcome::RandomAssigned(assigned) = &result.outcome else {
        return Err(unexpected("RandomAssign", &result.outcome));
    };
    let response: AssignmentResponse = AssignmentResponse {
        assigned: assigned
            .iter()
            .map(|(instance_id, profile_id)| AssignmentInfo {
                shift_id: instance_id.value(),
                profile_id: profile_id.value(),
            })
            .collect(),
        unfinished: Vec::new(),
    };
    Ok(ApiResult::new(response, result))
}

/// Clears the assignees of every regular shift in a semester.
///
/// # Errors
///
/// Returns an error if the semester is missing or the caller cannot manage
/// it.
pub fn clear_assignments(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    semester_id: i64,
) -> Result<ApiResult<MessageResponse>, ApiError> {
    let semester_id: SemesterId = SemesterId::new(semester_id);
    let semester: Semester = load(persistence, |store| fetch_semester(store, semester_id))?;
    AuthorizationService::require_manage(&ctx.user, Some(&semester), "clear assignments")?;

    let result: TransitionResult =
        run(persistence, ctx, Command::ClearAssignments { semester_id })?;
    let Outcome::AssignmentsCleared(count) = result.outcome else {
        return Err(unexpected("ClearAssignments", &result.outcome));
    };
    Ok(ApiResult::new(
        MessageResponse {
            message: format!("Cleared assignments on {count} shifts"),
        },
        result,
    ))
}

/// Snapshots fine-date standings, or zeroes them when `clear` is set.
///
/// Returns the members left with a negative snapshot.
///
/// # Errors
///
/// Returns an error if the semester is missing or the caller cannot manage
/// it.
pub fn calculate_fines(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    semester_id: i64,
    clear: bool,
) -> Result<ApiResult<Vec<FineInfo>>, ApiError> {
    let semester_id: SemesterId = SemesterId::new(semester_id);
    let semester: Semester = load(persistence, |store| fetch_semester(store, semester_id))?;
    AuthorizationService::require_manage(&ctx.user, Some(&semester), "calculate fines")?;

    let result: TransitionResult =
        run(persistence, ctx, Command::CalculateFines { semester_id, clear })?;
    let Outcome::Fines(fines) = &result.outcome else {
        return Err(unexpected("CalculateFines", &result.outcome));
    };
    let response: Vec<FineInfo> = fines.iter().map(FineInfo::from).collect();
    Ok(ApiResult::new(response, result))
}

// ========================================================================
// Audit
// ========================================================================

/// Lists audit events, optionally limited to one semester.
///
/// # Errors
///
/// Returns an error if the caller cannot manage workshift (or the named
/// semester) or the log cannot be read.
pub fn list_audit_events(
    persistence: &mut Persistence,
    ctx: &ApiContext,
    semester_id: Option<i64>,
) -> Result<Vec<AuditEventInfo>, ApiError> {
    let semester_id: Option<SemesterId> = semester_id.map(SemesterId::new);
    match semester_id {
        Some(id) => {
            let semester: Semester = load(persistence, |store| fetch_semester(store, id))?;
            AuthorizationService::require_manage(&ctx.user, Some(&semester), "view audit log")?;
        }
        None => AuthorizationService::require_manage(&ctx.user, None, "view audit log")?,
    }

    let events: Vec<(i64, AuditEvent)> = persistence
        .list_audit_events(semester_id)
        .map_err(|err| ApiError::Internal {
            message: format!("Failed to read audit log: {err}"),
        })?;
    Ok(events
        .iter()
        .map(|(id, event)| AuditEventInfo::new(*id, event))
        .collect())
}
