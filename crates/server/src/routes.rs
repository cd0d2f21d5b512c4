// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Axum handlers.
//!
//! Each handler resolves the caller, takes the persistence lock, and hands
//! the request to the matching `farnsworth_api` function.

use axum::{
    Json,
    extract::{Path, Query, State as AxumState},
};
use farnsworth_api::{
    AddManagerRequest, AddWorkshifterRequest, AdjustPoolHoursRequest, ApiContext, ApiResult,
    AssignmentResponse, AuditEventInfo, EditInstanceHoursRequest, FineInfo, InstanceRequest,
    InstanceSummary, InstanceViewResponse, ManagerInfo, MemberInfo, MessageResponse,
    PoolHoursInfo, PoolInfo, PoolRequest, PreferencesRequest, ProfileInfo, ProfileViewResponse,
    RegisterMemberRequest, RegularShiftInfo, RegularShiftRequest, SemesterInfo,
    SemesterOverviewResponse, StandingsResponse, StartSemesterRequest, UpdateSemesterRequest,
    WorkshiftTypeInfo, WorkshiftTypeRequest,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppState, HttpError, session::SessionMember};

/// Response body for every successful write.
#[derive(Debug, Serialize)]
pub struct WriteResponse<T> {
    pub success: bool,
    /// Name of the audited action.
    pub action: String,
    pub result: T,
}

impl<T> From<ApiResult<T>> for WriteResponse<T> {
    fn from(result: ApiResult<T>) -> Self {
        Self {
            success: true,
            action: result.audit_event.action.name,
            result: result.response,
        }
    }
}

type WriteResult<T> = Result<Json<WriteResponse<T>>, HttpError>;

#[derive(Debug, Default, Deserialize)]
pub struct FinesQuery {
    /// Zero the balances once fines are recorded.
    #[serde(default)]
    pub clear: bool,
}

// ========================================================================
// Members and managers
// ========================================================================

#[allow(clippy::unused_async, clippy::needless_pass_by_value)]
pub async fn handle_whoami(session: SessionMember) -> Json<MemberInfo> {
    Json(MemberInfo::from(&session.user.member))
}

pub async fn handle_register_member(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Json(req): Json<RegisterMemberRequest>,
) -> WriteResult<MemberInfo> {
    info!(username = %req.username, "Handling register_member request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::register_member(&mut persistence, &ctx, &req)?;
    Ok(Json(result.into()))
}

pub async fn handle_list_members(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionMember,
) -> Result<Json<Vec<MemberInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(farnsworth_api::list_members(&mut persistence)?))
}

pub async fn handle_add_manager(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Json(req): Json<AddManagerRequest>,
) -> WriteResult<ManagerInfo> {
    info!(title = %req.title, "Handling add_manager request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::add_manager(&mut persistence, &ctx, &req)?;
    Ok(Json(result.into()))
}

pub async fn handle_list_managers(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionMember,
) -> Result<Json<Vec<ManagerInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(farnsworth_api::list_managers(&mut persistence)?))
}

// ========================================================================
// Semesters
// ========================================================================

pub async fn handle_start_semester(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Json(req): Json<StartSemesterRequest>,
) -> WriteResult<SemesterInfo> {
    info!(season = %req.season, year = req.year, "Handling start_semester request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::start_semester(&mut persistence, &ctx, &req)?;
    Ok(Json(result.into()))
}

pub async fn handle_list_semesters(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionMember,
) -> Result<Json<Vec<SemesterInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(farnsworth_api::list_semesters(&mut persistence)?))
}

pub async fn handle_current_overview(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
) -> Result<Json<SemesterOverviewResponse>, HttpError> {
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(farnsworth_api::semester_overview(
        &mut persistence,
        &ctx,
        None,
    )?))
}

pub async fn handle_semester_overview(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(semester_id): Path<i64>,
) -> Result<Json<SemesterOverviewResponse>, HttpError> {
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(farnsworth_api::semester_overview(
        &mut persistence,
        &ctx,
        Some(semester_id),
    )?))
}

pub async fn handle_update_semester(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(semester_id): Path<i64>,
    Json(req): Json<UpdateSemesterRequest>,
) -> WriteResult<SemesterInfo> {
    info!(semester_id, "Handling update_semester request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::update_semester(&mut persistence, &ctx, semester_id, &req)?;
    Ok(Json(result.into()))
}

pub async fn handle_set_current_semester(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(semester_id): Path<i64>,
) -> WriteResult<SemesterInfo> {
    info!(semester_id, "Handling set_current_semester request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::set_current_semester(&mut persistence, &ctx, semester_id)?;
    Ok(Json(result.into()))
}

pub async fn handle_delete_semester(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(semester_id): Path<i64>,
) -> WriteResult<MessageResponse> {
    info!(semester_id, "Handling delete_semester request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::delete_semester(&mut persistence, &ctx, semester_id)?;
    Ok(Json(result.into()))
}

pub async fn handle_add_workshifter(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(semester_id): Path<i64>,
    Json(req): Json<AddWorkshifterRequest>,
) -> WriteResult<ProfileInfo> {
    info!(semester_id, username = %req.username, "Handling add_workshifter request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::add_workshifter(&mut persistence, &ctx, semester_id, &req)?;
    Ok(Json(result.into()))
}

pub async fn handle_clear_assignments(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(semester_id): Path<i64>,
) -> WriteResult<MessageResponse> {
    info!(semester_id, "Handling clear_assignments request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::clear_assignments(&mut persistence, &ctx, semester_id)?;
    Ok(Json(result.into()))
}

pub async fn handle_calculate_fines(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(semester_id): Path<i64>,
    Query(query): Query<FinesQuery>,
) -> WriteResult<Vec<FineInfo>> {
    info!(semester_id, clear = query.clear, "Handling calculate_fines request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result =
        farnsworth_api::calculate_fines(&mut persistence, &ctx, semester_id, query.clear)?;
    Ok(Json(result.into()))
}

// ========================================================================
// Pools and standings
// ========================================================================

pub async fn handle_create_pool(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(semester_id): Path<i64>,
    Json(req): Json<PoolRequest>,
) -> WriteResult<PoolInfo> {
    info!(semester_id, title = %req.title, "Handling create_pool request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::create_pool(&mut persistence, &ctx, semester_id, &req)?;
    Ok(Json(result.into()))
}

pub async fn handle_edit_pool(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(pool_id): Path<i64>,
    Json(req): Json<PoolRequest>,
) -> WriteResult<PoolInfo> {
    info!(pool_id, "Handling edit_pool request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::edit_pool(&mut persistence, &ctx, pool_id, &req)?;
    Ok(Json(result.into()))
}

pub async fn handle_delete_pool(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(pool_id): Path<i64>,
) -> WriteResult<MessageResponse> {
    info!(pool_id, "Handling delete_pool request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::delete_pool(&mut persistence, &ctx, pool_id)?;
    Ok(Json(result.into()))
}

pub async fn handle_adjust_pool_hours(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(pool_hours_id): Path<i64>,
    Json(req): Json<AdjustPoolHoursRequest>,
) -> WriteResult<PoolHoursInfo> {
    info!(pool_hours_id, "Handling adjust_pool_hours request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::adjust_pool_hours(&mut persistence, &ctx, pool_hours_id, &req)?;
    Ok(Json(result.into()))
}

pub async fn handle_recompute_standing(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(pool_hours_id): Path<i64>,
) -> WriteResult<PoolHoursInfo> {
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::recompute_standing(&mut persistence, &ctx, pool_hours_id)?;
    Ok(Json(result.into()))
}

pub async fn handle_update_current_standings(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
) -> WriteResult<StandingsResponse> {
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::update_standings(&mut persistence, &ctx, None)?;
    Ok(Json(result.into()))
}

pub async fn handle_update_semester_standings(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(semester_id): Path<i64>,
) -> WriteResult<StandingsResponse> {
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::update_standings(&mut persistence, &ctx, Some(semester_id))?;
    Ok(Json(result.into()))
}

pub async fn handle_auto_assign(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(pool_id): Path<i64>,
) -> WriteResult<AssignmentResponse> {
    info!(pool_id, "Handling auto_assign request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::auto_assign(&mut persistence, &ctx, pool_id)?;
    Ok(Json(result.into()))
}

pub async fn handle_random_assign(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(pool_id): Path<i64>,
) -> WriteResult<AssignmentResponse> {
    info!(pool_id, "Handling random_assign request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::random_assign(&mut persistence, &ctx, pool_id)?;
    Ok(Json(result.into()))
}

// ========================================================================
// Workshift types and regular shifts
// ========================================================================

pub async fn handle_create_workshift_type(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Json(req): Json<WorkshiftTypeRequest>,
) -> WriteResult<WorkshiftTypeInfo> {
    info!(title = %req.title, "Handling create_workshift_type request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::create_workshift_type(&mut persistence, &ctx, &req)?;
    Ok(Json(result.into()))
}

pub async fn handle_edit_workshift_type(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(workshift_type_id): Path<i64>,
    Json(req): Json<WorkshiftTypeRequest>,
) -> WriteResult<WorkshiftTypeInfo> {
    info!(workshift_type_id, "Handling edit_workshift_type request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result =
        farnsworth_api::edit_workshift_type(&mut persistence, &ctx, workshift_type_id, &req)?;
    Ok(Json(result.into()))
}

pub async fn handle_list_workshift_types(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionMember,
) -> Result<Json<Vec<WorkshiftTypeInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(farnsworth_api::list_workshift_types(&mut persistence)?))
}

pub async fn handle_create_regular_shift(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Json(req): Json<RegularShiftRequest>,
) -> WriteResult<RegularShiftInfo> {
    info!("Handling create_regular_shift request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::create_regular_shift(&mut persistence, &ctx, &req)?;
    Ok(Json(result.into()))
}

pub async fn handle_edit_regular_shift(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(shift_id): Path<i64>,
    Json(req): Json<RegularShiftRequest>,
) -> WriteResult<RegularShiftInfo> {
    info!(shift_id, "Handling edit_regular_shift request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::edit_regular_shift(&mut persistence, &ctx, shift_id, &req)?;
    Ok(Json(result.into()))
}

pub async fn handle_delete_regular_shift(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(shift_id): Path<i64>,
) -> WriteResult<MessageResponse> {
    info!(shift_id, "Handling delete_regular_shift request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::delete_regular_shift(&mut persistence, &ctx, shift_id)?;
    Ok(Json(result.into()))
}

pub async fn handle_list_regular_shifts(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionMember,
    Path(pool_id): Path<i64>,
) -> Result<Json<Vec<RegularShiftInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(farnsworth_api::list_regular_shifts(
        &mut persistence,
        pool_id,
    )?))
}

// ========================================================================
// Shift occurrences
// ========================================================================

pub async fn handle_create_instance(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Json(req): Json<InstanceRequest>,
) -> WriteResult<InstanceSummary> {
    info!("Handling create_instance request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::create_instance(&mut persistence, &ctx, &req)?;
    Ok(Json(result.into()))
}

pub async fn handle_edit_instance(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(instance_id): Path<i64>,
    Json(req): Json<InstanceRequest>,
) -> WriteResult<InstanceSummary> {
    info!(instance_id, "Handling edit_instance request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::edit_instance(&mut persistence, &ctx, instance_id, &req)?;
    Ok(Json(result.into()))
}

pub async fn handle_delete_instance(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(instance_id): Path<i64>,
) -> WriteResult<MessageResponse> {
    info!(instance_id, "Handling delete_instance request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::delete_instance(&mut persistence, &ctx, instance_id)?;
    Ok(Json(result.into()))
}

pub async fn handle_edit_instance_hours(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(instance_id): Path<i64>,
    Json(req): Json<EditInstanceHoursRequest>,
) -> WriteResult<InstanceSummary> {
    info!(instance_id, "Handling edit_instance_hours request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::edit_instance_hours(&mut persistence, &ctx, instance_id, &req)?;
    Ok(Json(result.into()))
}

pub async fn handle_instance_view(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(instance_id): Path<i64>,
) -> Result<Json<InstanceViewResponse>, HttpError> {
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(farnsworth_api::instance_view(
        &mut persistence,
        &ctx,
        instance_id,
    )?))
}

pub async fn handle_current_open_shifts(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
) -> Result<Json<Vec<InstanceSummary>>, HttpError> {
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(farnsworth_api::list_open_shifts(
        &mut persistence,
        &ctx,
        None,
    )?))
}

pub async fn handle_semester_open_shifts(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(semester_id): Path<i64>,
) -> Result<Json<Vec<InstanceSummary>>, HttpError> {
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(farnsworth_api::list_open_shifts(
        &mut persistence,
        &ctx,
        Some(semester_id),
    )?))
}

pub async fn handle_sign_in(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(instance_id): Path<i64>,
) -> WriteResult<InstanceSummary> {
    info!(instance_id, "Handling sign_in request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::sign_in(&mut persistence, &ctx, instance_id)?;
    Ok(Json(result.into()))
}

pub async fn handle_sign_out(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(instance_id): Path<i64>,
) -> WriteResult<InstanceSummary> {
    info!(instance_id, "Handling sign_out request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::sign_out(&mut persistence, &ctx, instance_id)?;
    Ok(Json(result.into()))
}

pub async fn handle_verify(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(instance_id): Path<i64>,
) -> WriteResult<InstanceSummary> {
    info!(instance_id, "Handling verify request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::verify(&mut persistence, &ctx, instance_id)?;
    Ok(Json(result.into()))
}

pub async fn handle_mark_blown(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(instance_id): Path<i64>,
) -> WriteResult<InstanceSummary> {
    info!(instance_id, "Handling mark_blown request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::mark_blown(&mut persistence, &ctx, instance_id)?;
    Ok(Json(result.into()))
}

// ========================================================================
// Profiles and audit
// ========================================================================

pub async fn handle_own_profile(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
) -> Result<Json<ProfileViewResponse>, HttpError> {
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(farnsworth_api::profile_view(
        &mut persistence,
        &ctx,
        None,
    )?))
}

pub async fn handle_profile_view(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(profile_id): Path<i64>,
) -> Result<Json<ProfileViewResponse>, HttpError> {
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(farnsworth_api::profile_view(
        &mut persistence,
        &ctx,
        Some(profile_id),
    )?))
}

pub async fn handle_set_preferences(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(profile_id): Path<i64>,
    Json(req): Json<PreferencesRequest>,
) -> WriteResult<ProfileInfo> {
    info!(profile_id, "Handling set_preferences request");
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    let result = farnsworth_api::set_preferences(&mut persistence, &ctx, profile_id, &req)?;
    Ok(Json(result.into()))
}

pub async fn handle_list_audit_events(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
) -> Result<Json<Vec<AuditEventInfo>>, HttpError> {
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(farnsworth_api::list_audit_events(
        &mut persistence,
        &ctx,
        None,
    )?))
}

pub async fn handle_semester_audit_events(
    AxumState(app_state): AxumState<AppState>,
    session: SessionMember,
    Path(semester_id): Path<i64>,
) -> Result<Json<Vec<AuditEventInfo>>, HttpError> {
    let ctx: ApiContext = app_state.context(session);
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(farnsworth_api::list_audit_events(
        &mut persistence,
        &ctx,
        Some(semester_id),
    )?))
}
