// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod availability;
mod error;
mod fines;
mod hours;
mod ids;
mod instance;
mod interaction;
mod log;
mod people;
mod pool;
mod preferences;
mod recurrence;
mod semester;
mod shift;
mod standing;
mod validation;

#[cfg(test)]
mod tests;

pub use availability::{is_available, overlaps_busy};
pub use error::{DomainError, ErrorKind};
pub use fines::{fine_amount_cents, snapshot_fines};
pub use hours::Hours;
pub use ids::{
    InstanceId, InstanceInfoId, LogEntryId, ManagerId, MemberId, PoolHoursId, PoolId, ProfileId,
    RatingId, RegularShiftId, SemesterId, TimeBlockId, WorkshiftTypeId,
};
pub use instance::{
    InstanceDetails, InstanceInfo, InstanceInfoDraft, InstanceSource, InstanceState,
    NewInstance, WorkshiftInstance,
};
pub use interaction::{
    Interaction, Viewer, available_interactions, check_blown, check_sign_in, check_sign_out,
    check_verify,
};
pub use log::{LogEntryType, NewLogEntry, ShiftLogEntry};
pub use people::{Manager, Member, MemberStatus, NewManager, NewMember};
pub use pool::{NewPool, NewPoolHours, PoolDraft, PoolHours, WorkshiftPool};
pub use preferences::{
    Preference, RatingLevel, TimeBlock, TimeBlockSpec, WorkshiftProfile, WorkshiftRating,
};
pub use recurrence::{day_delta, next_occurrence, shift_date, weekly_dates};
pub use semester::{NewSemester, Season, Semester, WorkshiftSettings};
pub use shift::{
    AssignmentMode, RegularWorkshift, RegularWorkshiftDraft, Schedule, VerifyPolicy,
    WorkshiftType, WorkshiftTypeDraft,
};
pub use standing::{
    StandingUpdate, classify_edit, derive_standing, follows_pool_default, periods_elapsed,
};
pub use validation::{
    MAX_POOL_HOURS, MAX_SHIFT_COUNT, MAX_SHIFT_HOURS, is_valid_name, is_valid_username,
    validate_hour_range, validate_instance_hours, validate_instance_info, validate_member_fields,
    validate_pool, validate_regular_shift, validate_requirement_hours, validate_semester,
    validate_time_block, validate_title, validate_workshift_type,
};
