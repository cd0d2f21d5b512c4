// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates travel as `YYYY-MM-DD` strings, times as `HH:MM`, hours as
//! decimal numbers and enumerations as their short codes.

use farnsworth::{AutoAssignReport, FineRecord, InstanceView, ProfileView, SemesterOverview};
use farnsworth_audit::AuditEvent;
use farnsworth_domain::{
    InstanceDetails, Manager, Member, PoolHours, RegularWorkshift, Semester, ShiftLogEntry,
    WorkshiftInstance, WorkshiftPool, WorkshiftProfile, WorkshiftType,
};
use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Time};

use crate::capabilities::{InstanceCapabilities, SemesterCapabilities};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

/// Formats a date the way the API exchanges it.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}

/// Formats a time of day the way the API exchanges it.
#[must_use]
pub fn format_time(time: Time) -> String {
    time.format(TIME_FORMAT).unwrap_or_else(|_| time.to_string())
}

pub(crate) fn parse_date_text(text: &str) -> Option<Date> {
    Date::parse(text.trim(), DATE_FORMAT).ok()
}

pub(crate) fn parse_time_text(text: &str) -> Option<Time> {
    Time::parse(text.trim(), TIME_FORMAT).ok()
}

// ========================================================================
// Requests
// ========================================================================

/// API request to add a house member.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterMemberRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// `resident`, `boarder` or `alumnus`.
    pub status: String,
    #[serde(default)]
    pub is_superuser: bool,
}

/// API request to create a manager position.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddManagerRequest {
    pub title: String,
    /// Username of the member holding the position.
    pub incumbent: Option<String>,
    #[serde(default)]
    pub workshift_manager: bool,
    #[serde(default)]
    pub president: bool,
    /// Weekly hours credited for holding the position.
    #[serde(default)]
    pub workshift_hours: f64,
}

/// Editable pool settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PoolRequest {
    pub title: String,
    /// Manager positions that administer the pool.
    #[serde(default)]
    pub manager_ids: Vec<i64>,
    pub sign_out_cutoff: u32,
    pub verify_cutoff: u32,
    pub hours: f64,
    pub weeks_per_period: u32,
    pub first_fine_date: Option<String>,
    pub second_fine_date: Option<String>,
    pub third_fine_date: Option<String>,
    #[serde(default)]
    pub any_blown: bool,
    #[serde(default)]
    pub self_verify: bool,
}

/// API request to start a semester.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StartSemesterRequest {
    /// `Spring`, `Summer` or `Fall` (or the two letter code).
    pub season: String,
    pub year: u16,
    pub rate_cents: Option<i64>,
    pub policy: Option<String>,
    pub start_date: String,
    pub end_date: String,
    /// Pools to create beside the primary pool.
    #[serde(default)]
    pub extra_pools: Vec<PoolRequest>,
}

/// API request to change a semester's settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateSemesterRequest {
    pub rate_cents: Option<i64>,
    pub policy: Option<String>,
    pub preferences_open: bool,
}

/// API request to add a member to a running semester.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddWorkshifterRequest {
    pub username: String,
    /// Overrides the primary pool requirement.
    pub primary_hours: Option<f64>,
}

/// API request to hand-set a member's requirement in a pool.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdjustPoolHoursRequest {
    pub hours: f64,
    pub hour_adjustment: f64,
}

/// API request to create or edit a workshift type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkshiftTypeRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quick_tips: String,
    #[serde(default)]
    pub rateable: bool,
    /// `A` (auto), `M` (manual) or `O` (never assigned).
    pub assignment: String,
}

/// API request to create or edit a recurring workshift.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegularShiftRequest {
    pub workshift_type_id: i64,
    pub pool_id: i64,
    /// Lowercase weekday name, or absent for a week-long shift.
    pub day: Option<String>,
    pub count: u32,
    pub hours: f64,
    pub active: bool,
    /// Profiles assigned to every occurrence, in slot order.
    #[serde(default)]
    pub assignee_ids: Vec<i64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// Verify policy code (`W`, `P`, `M`, `O`, `S` or `A`).
    pub verify: String,
    #[serde(default)]
    pub addendum: String,
    #[serde(default)]
    pub is_manager_shift: bool,
}

/// API request to create or edit a one-off shift.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InstanceRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub pool_id: i64,
    pub verify: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(default)]
    pub week_long: bool,
    pub date: String,
    pub workshifter_id: Option<i64>,
    /// Ignored when editing; use the hours endpoint instead.
    pub hours: f64,
}

/// API request to change the hours an instance is worth.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EditInstanceHoursRequest {
    pub hours: f64,
    #[serde(default)]
    pub note: String,
}

/// One availability window in a preferences request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimeBlockRequest {
    /// `busy` or `preferred`.
    pub preference: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

/// One workshift type rating in a preferences request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RatingRequest {
    pub workshift_type_id: i64,
    /// `like`, `indifferent` or `dislike`.
    pub rating: String,
}

/// API request to save a member's preferences.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PreferencesRequest {
    #[serde(default)]
    pub time_blocks: Vec<TimeBlockRequest>,
    #[serde(default)]
    pub ratings: Vec<RatingRequest>,
    #[serde(default)]
    pub note: String,
}

// ========================================================================
// Responses
// ========================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    pub member_id: i64,
    pub username: String,
    pub full_name: String,
    pub status: String,
    pub is_superuser: bool,
    pub active: bool,
}

impl From<&Member> for MemberInfo {
    fn from(member: &Member) -> Self {
        Self {
            member_id: member.id.value(),
            username: member.username.clone(),
            full_name: member.full_name(),
            status: member.status.as_str().to_string(),
            is_superuser: member.is_superuser,
            active: member.active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerInfo {
    pub manager_id: i64,
    pub title: String,
    pub incumbent_id: Option<i64>,
    pub workshift_manager: bool,
    pub president: bool,
    pub active: bool,
    pub workshift_hours: f64,
}

impl From<&Manager> for ManagerInfo {
    fn from(manager: &Manager) -> Self {
        Self {
            manager_id: manager.id.value(),
            title: manager.title.clone(),
            incumbent_id: manager.incumbent.map(|id| id.value()),
            workshift_manager: manager.workshift_manager,
            president: manager.president,
            active: manager.active,
            workshift_hours: manager.workshift_hours.as_f64(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterInfo {
    pub semester_id: i64,
    /// Short key such as `Fa2024`.
    pub key: String,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub rate_cents: Option<i64>,
    pub policy: Option<String>,
    pub preferences_open: bool,
    pub workshift_manager_ids: Vec<i64>,
}

impl From<&Semester> for SemesterInfo {
    fn from(semester: &Semester) -> Self {
        Self {
            semester_id: semester.id.value(),
            key: semester.url_key(),
            name: semester.to_string(),
            start_date: format_date(semester.start_date),
            end_date: format_date(semester.end_date),
            rate_cents: semester.rate_cents,
            policy: semester.policy.clone(),
            preferences_open: semester.preferences_open,
            workshift_manager_ids: semester
                .workshift_managers
                .iter()
                .map(|id| id.value())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolInfo {
    pub pool_id: i64,
    pub semester_id: i64,
    pub title: String,
    pub is_primary: bool,
    pub hours: f64,
    pub weeks_per_period: u32,
    /// Human readable requirement, e.g. `5.00 hours per week`.
    pub requirement: String,
    pub manager_ids: Vec<i64>,
    pub sign_out_cutoff: u32,
    pub verify_cutoff: u32,
    pub fine_dates: Vec<String>,
    pub any_blown: bool,
    pub self_verify: bool,
}

impl From<&WorkshiftPool> for PoolInfo {
    fn from(pool: &WorkshiftPool) -> Self {
        Self {
            pool_id: pool.id.value(),
            semester_id: pool.semester_id.value(),
            title: pool.title.clone(),
            is_primary: pool.is_primary,
            hours: pool.hours.as_f64(),
            weeks_per_period: pool.weeks_per_period,
            requirement: pool.requirement_label(),
            manager_ids: pool.managers.iter().map(|id| id.value()).collect(),
            sign_out_cutoff: pool.sign_out_cutoff,
            verify_cutoff: pool.verify_cutoff,
            fine_dates: pool.fine_dates().into_iter().flatten().map(format_date).collect(),
            any_blown: pool.any_blown,
            self_verify: pool.self_verify,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolHoursInfo {
    pub pool_hours_id: i64,
    pub profile_id: i64,
    pub pool_id: i64,
    pub hours: f64,
    pub assigned_hours: f64,
    pub standing: f64,
    pub hour_adjustment: f64,
    pub last_updated: Option<String>,
    pub date_standings: [f64; 3],
}

impl From<&PoolHours> for PoolHoursInfo {
    fn from(record: &PoolHours) -> Self {
        let [first, second, third] = record.date_standings();
        Self {
            pool_hours_id: record.id.value(),
            profile_id: record.profile_id.value(),
            pool_id: record.pool_id.value(),
            hours: record.hours.as_f64(),
            assigned_hours: record.assigned_hours.as_f64(),
            standing: record.standing.as_f64(),
            hour_adjustment: record.hour_adjustment.as_f64(),
            last_updated: record.last_updated.map(format_date),
            date_standings: [first.as_f64(), second.as_f64(), third.as_f64()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkshiftTypeInfo {
    pub workshift_type_id: i64,
    pub title: String,
    pub description: String,
    pub quick_tips: String,
    pub rateable: bool,
    pub assignment: String,
}

impl From<&WorkshiftType> for WorkshiftTypeInfo {
    fn from(workshift_type: &WorkshiftType) -> Self {
        Self {
            workshift_type_id: workshift_type.id.value(),
            title: workshift_type.title.clone(),
            description: workshift_type.description.clone(),
            quick_tips: workshift_type.quick_tips.clone(),
            rateable: workshift_type.rateable,
            assignment: workshift_type.assignment.code().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularShiftInfo {
    pub shift_id: i64,
    pub workshift_type_id: i64,
    pub pool_id: i64,
    /// Weekday name, or `None` for week-long shifts.
    pub day: Option<String>,
    pub count: u32,
    pub hours: f64,
    pub active: bool,
    pub assignee_ids: Vec<i64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub verify: String,
    pub addendum: String,
    pub is_manager_shift: bool,
}

impl From<&RegularWorkshift> for RegularShiftInfo {
    fn from(shift: &RegularWorkshift) -> Self {
        Self {
            shift_id: shift.id.value(),
            workshift_type_id: shift.workshift_type_id.value(),
            pool_id: shift.pool_id.value(),
            day: shift.schedule.day().map(|day| day.to_string()),
            count: shift.count,
            hours: shift.hours.as_f64(),
            active: shift.active,
            assignee_ids: shift.current_assignees.iter().map(|id| id.value()).collect(),
            start_time: shift.start_time.map(format_time),
            end_time: shift.end_time.map(format_time),
            verify: shift.verify.code().to_string(),
            addendum: shift.addendum.clone(),
            is_manager_shift: shift.is_manager_shift,
        }
    }
}

/// One shift occurrence as listed to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceSummary {
    pub instance_id: i64,
    pub semester_id: i64,
    pub title: String,
    pub pool_id: i64,
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub week_long: bool,
    /// `unfilled`, `assigned`, `verified` or `blown`.
    pub state: String,
    pub workshifter_id: Option<i64>,
    pub verifier_id: Option<i64>,
    pub liable_id: Option<i64>,
    pub hours: f64,
    pub intended_hours: f64,
    /// The recurring shift this occurrence belongs to, if any.
    pub regular_shift_id: Option<i64>,
}

impl InstanceSummary {
    #[must_use]
    pub fn new(instance: &WorkshiftInstance, details: &InstanceDetails) -> Self {
        let state: &str = match instance.state() {
            farnsworth_domain::InstanceState::Unfilled => "unfilled",
            farnsworth_domain::InstanceState::Assigned => "assigned",
            farnsworth_domain::InstanceState::Verified => "verified",
            farnsworth_domain::InstanceState::Blown => "blown",
        };
        Self {
            instance_id: instance.id.value(),
            semester_id: instance.semester_id.value(),
            title: details.title().to_string(),
            pool_id: details.pool_id().value(),
            date: format_date(instance.date),
            start_time: details.start_time().map(format_time),
            end_time: details.end_time().map(format_time),
            week_long: details.week_long(),
            state: state.to_string(),
            workshifter_id: instance.workshifter.map(|id| id.value()),
            verifier_id: instance.verifier.map(|id| id.value()),
            liable_id: instance.liable.map(|id| id.value()),
            hours: instance.hours.as_f64(),
            intended_hours: instance.intended_hours.as_f64(),
            regular_shift_id: instance.source.regular_shift_id().map(|id| id.value()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntryInfo {
    pub log_entry_id: i64,
    /// Display label such as `Sign In`.
    pub entry_type: String,
    pub person_id: Option<i64>,
    /// RFC 3339 timestamp.
    pub entry_time: String,
    pub hours: Option<f64>,
    pub note: String,
}

impl From<&ShiftLogEntry> for LogEntryInfo {
    fn from(entry: &ShiftLogEntry) -> Self {
        Self {
            log_entry_id: entry.id.value(),
            entry_type: entry.entry_type.label().to_string(),
            person_id: entry.person.map(|id| id.value()),
            entry_time: entry
                .entry_time
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_else(|_| entry.entry_time.to_string()),
            hours: entry.hours.map(farnsworth_domain::Hours::as_f64),
            note: entry.note.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterOverviewResponse {
    pub semester: SemesterInfo,
    pub pools: Vec<PoolInfo>,
    pub days_elapsed: i64,
    pub total_days: i64,
    pub capabilities: SemesterCapabilities,
}

impl SemesterOverviewResponse {
    #[must_use]
    pub fn new(overview: &SemesterOverview, capabilities: SemesterCapabilities) -> Self {
        Self {
            semester: SemesterInfo::from(&overview.semester),
            pools: overview.pools.iter().map(PoolInfo::from).collect(),
            days_elapsed: overview.days_elapsed,
            total_days: overview.total_days,
            capabilities,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInfo {
    pub profile_id: i64,
    pub member_id: i64,
    pub semester_id: i64,
    pub time_block_count: usize,
    pub rating_count: usize,
}

impl From<&WorkshiftProfile> for ProfileInfo {
    fn from(profile: &WorkshiftProfile) -> Self {
        Self {
            profile_id: profile.id.value(),
            member_id: profile.member_id.value(),
            semester_id: profile.semester_id.value(),
            time_block_count: profile.time_blocks.len(),
            rating_count: profile.ratings.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingInfo {
    pub pool: PoolInfo,
    pub record: PoolHoursInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileViewResponse {
    pub profile_id: i64,
    pub member: MemberInfo,
    /// Only shown to the member themselves and to managers.
    pub note: Option<String>,
    pub preferences_saved: bool,
    pub standings: Vec<StandingInfo>,
    pub upcoming: Vec<InstanceSummary>,
}

impl ProfileViewResponse {
    #[must_use]
    pub fn new(view: &ProfileView, show_note: bool) -> Self {
        Self {
            profile_id: view.profile.id.value(),
            member: MemberInfo::from(&view.member),
            note: show_note.then(|| view.profile.note.clone()),
            preferences_saved: view.profile.preference_save_time.is_some(),
            standings: view
                .pool_hours
                .iter()
                .map(|(pool, record)| StandingInfo {
                    pool: PoolInfo::from(pool),
                    record: PoolHoursInfo::from(record),
                })
                .collect(),
            upcoming: view
                .upcoming
                .iter()
                .map(|(instance, details)| InstanceSummary::new(instance, details))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceViewResponse {
    pub instance: InstanceSummary,
    pub description: String,
    pub verify: String,
    pub pool: PoolInfo,
    /// Newest first.
    pub logs: Vec<LogEntryInfo>,
    pub capabilities: InstanceCapabilities,
}

impl InstanceViewResponse {
    #[must_use]
    pub fn new(view: &InstanceView, capabilities: InstanceCapabilities) -> Self {
        Self {
            instance: InstanceSummary::new(&view.instance, &view.details),
            description: view.details.description().to_string(),
            verify: view.details.verify().description().to_string(),
            pool: PoolInfo::from(&view.pool),
            logs: view.logs.iter().map(LogEntryInfo::from).collect(),
            capabilities,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FineInfo {
    pub profile_id: i64,
    pub pool_id: i64,
    pub snapshots: [f64; 3],
    pub amount_cents: i64,
}

impl From<&FineRecord> for FineInfo {
    fn from(record: &FineRecord) -> Self {
        let [first, second, third] = record.snapshots;
        Self {
            profile_id: record.profile_id.value(),
            pool_id: record.pool_id.value(),
            snapshots: [first.as_f64(), second.as_f64(), third.as_f64()],
            amount_cents: record.amount_cents,
        }
    }
}

/// A shift handed to a member by an allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentInfo {
    /// A regular shift id for auto-assign, an instance id for random
    /// assignment.
    pub shift_id: i64,
    pub profile_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentResponse {
    pub assigned: Vec<AssignmentInfo>,
    /// Members who still owe hours after auto-assignment.
    pub unfinished: Vec<i64>,
}

impl From<&AutoAssignReport> for AssignmentResponse {
    fn from(report: &AutoAssignReport) -> Self {
        Self {
            assigned: report
                .assigned
                .iter()
                .map(|(shift, profile)| AssignmentInfo {
                    shift_id: shift.value(),
                    profile_id: profile.value(),
                })
                .collect(),
            unfinished: report.unfinished.iter().map(|id| id.value()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsResponse {
    pub debited: usize,
    pub closed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventInfo {
    pub event_id: i64,
    pub actor: String,
    pub action: String,
    pub details: Option<String>,
    pub before: String,
    pub after: String,
    pub semester_id: Option<i64>,
}

impl AuditEventInfo {
    #[must_use]
    pub fn new(event_id: i64, event: &AuditEvent) -> Self {
        Self {
            event_id,
            actor: event.actor.id.clone(),
            action: event.action.name.clone(),
            details: event.action.details.clone(),
            before: event.before.data.clone(),
            after: event.after.data.clone(),
            semester_id: event.semester_id.map(|id| id.value()),
        }
    }
}
