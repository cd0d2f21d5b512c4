// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The API boundary of the Farnsworth workshift system.
//!
//! This crate sits between transport and the engine. It resolves who the
//! caller is, decides whether they may act, translates request payloads
//! into engine commands, and maps every lower-layer failure into the
//! [`ApiError`] contract.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod auth;
mod capabilities;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedUser, AuthorizationService, viewer_for};
pub use capabilities::{
    Capability, InstanceCapabilities, SemesterCapabilities, compute_instance_capabilities,
    compute_semester_capabilities,
};
pub use error::{ApiError, AuthError, invalid_input, translate_core_error, translate_domain_error};
pub use handlers::{
    ApiContext, ApiResult, add_manager, add_workshifter, adjust_pool_hours, auto_assign,
    calculate_fines, clear_assignments, create_instance, create_pool, create_regular_shift,
    create_workshift_type, delete_instance, delete_pool, delete_regular_shift, delete_semester,
    edit_instance, edit_instance_hours, edit_pool, edit_regular_shift, edit_workshift_type,
    instance_view, list_audit_events, list_managers, list_members, list_open_shifts,
    list_regular_shifts, list_semesters, list_workshift_types, mark_blown, profile_view,
    random_assign, recompute_standing, register_member, semester_overview, set_current_semester,
    set_preferences, sign_in, sign_out, start_semester, update_semester, update_standings, verify,
};
pub use request_response::{
    AddManagerRequest, AddWorkshifterRequest, AdjustPoolHoursRequest, AssignmentInfo,
    AssignmentResponse, AuditEventInfo, EditInstanceHoursRequest, FineInfo, InstanceRequest,
    InstanceSummary, InstanceViewResponse, LogEntryInfo, ManagerInfo, MemberInfo,
    MessageResponse, PoolHoursInfo, PoolInfo, PoolRequest, PreferencesRequest, ProfileInfo,
    ProfileViewResponse, RatingRequest, RegisterMemberRequest, RegularShiftInfo,
    RegularShiftRequest, SemesterInfo, SemesterOverviewResponse, StandingInfo, StandingsResponse,
    StartSemesterRequest, TimeBlockRequest, UpdateSemesterRequest, WorkshiftTypeInfo,
    WorkshiftTypeRequest, format_date, format_time,
};
