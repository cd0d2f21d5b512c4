// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ids::{
    InstanceId, InstanceInfoId, ManagerId, MemberId, PoolHoursId, PoolId, ProfileId,
    RegularShiftId, SemesterId, WorkshiftTypeId,
};
use crate::semester::Season;
use crate::shift::VerifyPolicy;
use crate::validation::MAX_SHIFT_COUNT;

/// How an error should be surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or policy-violating input. Nothing was mutated.
    Validation,
    /// A referenced entity does not exist.
    NotFound,
    /// Internal consistency was violated. Not recoverable by the caller.
    Integrity,
}

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Username contains characters other than letters, digits and underscores.
    InvalidUsername(String),
    /// Person name contains characters other than letters and apostrophes.
    InvalidName(String),
    /// A title is empty or too long.
    InvalidTitle(String),
    /// An hour value could not be parsed or converted.
    InvalidHoursValue(String),
    /// An hour value is outside the range allowed for the field.
    InvalidHours {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// Semester start date is not before its end date.
    InvalidSemesterDates {
        /// The requested start date.
        start_date: time::Date,
        /// The requested end date.
        end_date: time::Date,
    },
    /// A time range has its start after its end.
    InvalidTimeRange {
        /// The range start.
        start_time: time::Time,
        /// The range end.
        end_time: time::Time,
    },
    /// A recurring shift must produce at least one instance per week.
    InvalidShiftCount {
        /// The rejected count.
        count: u32,
    },
    /// More assignees than instances per occurrence.
    TooManyAssignees {
        /// Instances per occurrence.
        count: u32,
        /// Number of requested assignees.
        assignees: usize,
    },
    /// The same profile appears twice in an assignee list.
    DuplicateAssignee(ProfileId),
    /// The assignee has a busy time block during the shift.
    AssigneeBusy(ProfileId),
    /// The assignee's profile belongs to a different semester.
    AssigneeNotInSemester(ProfileId),
    /// A pool belongs to a different semester than the shift using it.
    PoolNotInSemester {
        /// The rejected pool.
        pool_id: PoolId,
        /// The shift's semester.
        semester_id: SemesterId,
    },
    /// A date falls outside the semester it belongs to.
    DateOutsideSemester {
        /// The rejected date.
        date: time::Date,
        /// The semester.
        semester_id: SemesterId,
    },
    /// A date string could not be parsed.
    DateParseError {
        /// The invalid input.
        input: String,
    },
    /// A semester for this season and year already exists.
    DuplicateSemester {
        /// The season.
        season: Season,
        /// The year.
        year: u16,
    },
    /// A pool with this title already exists in the semester.
    DuplicatePool {
        /// The duplicate title.
        title: String,
    },
    /// A workshift type with this title already exists.
    DuplicateWorkshiftType {
        /// The duplicate title.
        title: String,
    },
    /// The member already has a profile in the semester.
    DuplicateProfile(MemberId),
    /// The username is already taken.
    DuplicateUsername(String),
    /// The primary pool of a semester cannot be deleted.
    PrimaryPoolUndeletable(PoolId),
    /// Preferences can no longer be edited for the semester.
    PreferencesClosed(SemesterId),
    /// The instance is closed and accepts no further interaction.
    InstanceClosed(InstanceId),
    /// Someone is already signed in to the instance.
    InstanceAlreadyFilled(InstanceId),
    /// Nobody is signed in to the instance.
    InstanceNotFilled(InstanceId),
    /// The caller is not the instance's current workshifter.
    NotWorkshifter(InstanceId),
    /// The caller has no workshift profile in the instance's semester.
    NoProfileInSemester,
    /// The caller may not verify under the instance's verify policy.
    VerifyNotPermitted(VerifyPolicy),
    /// The pool does not allow members to verify their own shifts.
    SelfVerifyForbidden,
    /// Only pool managers may mark shifts blown in this pool.
    BlownNotPermitted,
    /// Semester does not exist.
    SemesterNotFound(SemesterId),
    /// No semester is currently active.
    NoCurrentSemester,
    /// Pool does not exist.
    PoolNotFound(PoolId),
    /// Profile does not exist.
    ProfileNotFound(ProfileId),
    /// Member does not exist.
    MemberNotFound(MemberId),
    /// Manager position does not exist.
    ManagerNotFound(ManagerId),
    /// Workshift type does not exist.
    WorkshiftTypeNotFound(WorkshiftTypeId),
    /// Regular workshift does not exist.
    RegularShiftNotFound(RegularShiftId),
    /// Instance does not exist.
    InstanceNotFound(InstanceId),
    /// Standalone instance details do not exist.
    InstanceInfoNotFound(InstanceInfoId),
    /// Pool hour record does not exist.
    PoolHoursRecordNotFound(PoolHoursId),
    /// The profile has no hour record in the pool.
    PoolHoursNotFound {
        /// The profile.
        profile_id: ProfileId,
        /// The pool.
        pool_id: PoolId,
    },
    /// An instance referenced both a recurring shift and standalone details.
    InstanceSourceConflict {
        /// The recurring shift reference.
        regular_shift_id: RegularShiftId,
        /// The standalone details reference.
        info_id: InstanceInfoId,
    },
    /// An instance referenced neither a recurring shift nor standalone details.
    InstanceSourceMissing,
    /// Date arithmetic overflowed.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl DomainError {
    /// Classifies this error for the caller.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::SemesterNotFound(_)
            | Self::NoCurrentSemester
            | Self::PoolNotFound(_)
            | Self::ProfileNotFound(_)
            | Self::MemberNotFound(_)
            | Self::ManagerNotFound(_)
            | Self::WorkshiftTypeNotFound(_)
            | Self::RegularShiftNotFound(_)
            | Self::InstanceNotFound(_)
            | Self::InstanceInfoNotFound(_)
            | Self::PoolHoursRecordNotFound(_)
            | Self::PoolHoursNotFound { .. } => ErrorKind::NotFound,
            Self::InstanceSourceConflict { .. }
            | Self::InstanceSourceMissing
            | Self::DateArithmeticOverflow { .. } => ErrorKind::Integrity,
            _ => ErrorKind::Validation,
        }
    }

    /// Returns the input field a validation error belongs to, if any.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidUsername(_) | Self::DuplicateUsername(_) => Some("username"),
            Self::InvalidName(_) => Some("name"),
            Self::InvalidTitle(_) | Self::DuplicatePool { .. } | Self::DuplicateWorkshiftType { .. } => {
                Some("title")
            }
            Self::InvalidHoursValue(_) => Some("hours"),
            Self::InvalidHours { field, .. } => Some(*field),
            Self::InvalidSemesterDates { .. } => Some("end_date"),
            Self::InvalidTimeRange { .. } => Some("end_time"),
            Self::InvalidShiftCount { .. } => Some("count"),
            Self::TooManyAssignees { .. }
            | Self::DuplicateAssignee(_)
            | Self::AssigneeBusy(_)
            | Self::AssigneeNotInSemester(_) => Some("current_assignees"),
            Self::DateParseError { .. } | Self::DateOutsideSemester { .. } => Some("date"),
            Self::PoolNotInSemester { .. } => Some("pool_id"),
            Self::DuplicateSemester { .. } => Some("year"),
            Self::DuplicateProfile(_) => Some("user"),
            Self::InstanceClosed(_)
            | Self::InstanceAlreadyFilled(_)
            | Self::InstanceNotFilled(_)
            | Self::NotWorkshifter(_)
            | Self::NoProfileInSemester
            | Self::VerifyNotPermitted(_)
            | Self::SelfVerifyForbidden
            | Self::BlownNotPermitted => Some("pk"),
            _ => None,
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUsername(name) => write!(f, "Invalid username: '{name}'"),
            Self::InvalidName(name) => write!(f, "Invalid name: '{name}'"),
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidHoursValue(value) => write!(f, "Invalid hours value: '{value}'"),
            Self::InvalidHours { field, reason } => write!(f, "Invalid {field}: {reason}"),
            Self::InvalidSemesterDates {
                start_date,
                end_date,
            } => write!(
                f,
                "Semester start date {start_date} must be before end date {end_date}"
            ),
            Self::InvalidTimeRange {
                start_time,
                end_time,
            } => write!(
                f,
                "Start time {start_time} is later than end time {end_time}"
            ),
            Self::InvalidShiftCount { count } => {
                write!(f, "Invalid shift count {count}: must be between 1 and {MAX_SHIFT_COUNT}")
            }
            Self::TooManyAssignees { count, assignees } => write!(
                f,
                "{assignees} assignees given for a shift with only {count} slots"
            ),
            Self::DuplicateAssignee(profile) => {
                write!(f, "Profile {profile} is listed more than once")
            }
            Self::AssigneeBusy(profile) => {
                write!(f, "Profile {profile} is busy during this shift")
            }
            Self::AssigneeNotInSemester(profile) => {
                write!(f, "Profile {profile} does not belong to this semester")
            }
            Self::PoolNotInSemester {
                pool_id,
                semester_id,
            } => write!(f, "Pool {pool_id} does not belong to semester {semester_id}"),
            Self::DateOutsideSemester { date, semester_id } => {
                write!(f, "Date {date} is outside semester {semester_id}")
            }
            Self::DateParseError { input } => write!(f, "Invalid date: '{input}'"),
            Self::DuplicateSemester { season, year } => {
                write!(f, "Semester {season} {year} already exists")
            }
            Self::DuplicatePool { title } => {
                write!(f, "Pool '{title}' already exists in this semester")
            }
            Self::DuplicateWorkshiftType { title } => {
                write!(f, "Workshift type '{title}' already exists")
            }
            Self::DuplicateProfile(member) => {
                write!(f, "Member {member} already has a profile in this semester")
            }
            Self::DuplicateUsername(name) => write!(f, "Username '{name}' is already taken"),
            Self::PrimaryPoolUndeletable(pool) => {
                write!(f, "Pool {pool} is the primary pool and cannot be deleted")
            }
            Self::PreferencesClosed(semester) => {
                write!(f, "Preferences are closed for semester {semester}")
            }
            Self::InstanceClosed(id) => write!(f, "Shift {id} is already closed"),
            Self::InstanceAlreadyFilled(id) => write!(f, "Shift {id} is already filled"),
            Self::InstanceNotFilled(id) => write!(f, "Shift {id} has no workshifter"),
            Self::NotWorkshifter(id) => write!(f, "You are not signed in to shift {id}"),
            Self::NoProfileInSemester => {
                write!(f, "You do not have a workshift profile for this semester")
            }
            Self::VerifyNotPermitted(policy) => write!(
                f,
                "You are not permitted to verify this shift (verified by: {})",
                policy.description()
            ),
            Self::SelfVerifyForbidden => write!(f, "Workshifters cannot verify their own shifts"),
            Self::BlownNotPermitted => {
                write!(f, "Only pool managers may mark shifts as blown in this pool")
            }
            Self::SemesterNotFound(id) => write!(f, "Semester {id} not found"),
            Self::NoCurrentSemester => write!(f, "No semester is currently active"),
            Self::PoolNotFound(id) => write!(f, "Pool {id} not found"),
            Self::ProfileNotFound(id) => write!(f, "Workshift profile {id} not found"),
            Self::MemberNotFound(id) => write!(f, "Member {id} not found"),
            Self::ManagerNotFound(id) => write!(f, "Manager {id} not found"),
            Self::WorkshiftTypeNotFound(id) => write!(f, "Workshift type {id} not found"),
            Self::RegularShiftNotFound(id) => write!(f, "Regular workshift {id} not found"),
            Self::InstanceNotFound(id) => write!(f, "Shift {id} not found"),
            Self::InstanceInfoNotFound(id) => write!(f, "Instance details {id} not found"),
            Self::PoolHoursRecordNotFound(id) => write!(f, "Pool hours {id} not found"),
            Self::PoolHoursNotFound {
                profile_id,
                pool_id,
            } => write!(
                f,
                "No pool hours for profile {profile_id} in pool {pool_id}"
            ),
            Self::InstanceSourceConflict {
                regular_shift_id,
                info_id,
            } => write!(
                f,
                "Instance references both regular workshift {regular_shift_id} and details {info_id}"
            ),
            Self::InstanceSourceMissing => {
                write!(f, "Instance references neither a regular workshift nor details")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow: {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
