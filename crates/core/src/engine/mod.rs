// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Consistency engine services.
//!
//! Each public function here is one named cascade. Callers invoke them
//! directly (usually through [`crate::apply`]) and the store runs the whole
//! call inside one transaction, so a failure part way leaves nothing
//! behind.

pub mod assignment;
pub mod fines;
pub mod instances;
pub mod interactions;
pub mod pool_hours;
pub mod preferences;
pub mod semesters;

use crate::error::CoreError;
use crate::store::WorkshiftStore;
use farnsworth_domain::{
    DomainError, InstanceDetails, InstanceId, InstanceInfo, InstanceInfoId, InstanceSource,
    Member, MemberId, NewLogEntry, PoolHours, PoolId, ProfileId, RegularShiftId,
    RegularWorkshift, Semester, SemesterId, WorkshiftInstance, WorkshiftPool, WorkshiftProfile,
    WorkshiftType, WorkshiftTypeId,
};

pub(crate) fn require_semester<S: WorkshiftStore>(
    store: &mut S,
    id: SemesterId,
) -> Result<Semester, CoreError> {
    store
        .get_semester(id)?
        .ok_or(CoreError::DomainViolation(DomainError::SemesterNotFound(id)))
}

/// Loads the current semester.
///
/// # Errors
///
/// Returns `NoCurrentSemester` if none is set.
pub fn current_semester<S: WorkshiftStore>(store: &mut S) -> Result<Semester, CoreError> {
    let id: SemesterId = store
        .current_semester_id()?
        .ok_or(DomainError::NoCurrentSemester)?;
    require_semester(store, id)
}

pub(crate) fn require_pool<S: WorkshiftStore>(
    store: &mut S,
    id: PoolId,
) -> Result<WorkshiftPool, CoreError> {
    store
        .get_pool(id)?
        .ok_or(CoreError::DomainViolation(DomainError::PoolNotFound(id)))
}

pub(crate) fn require_profile<S: WorkshiftStore>(
    store: &mut S,
    id: ProfileId,
) -> Result<WorkshiftProfile, CoreError> {
    store
        .get_profile(id)?
        .ok_or(CoreError::DomainViolation(DomainError::ProfileNotFound(id)))
}

pub(crate) fn require_member<S: WorkshiftStore>(
    store: &mut S,
    id: MemberId,
) -> Result<Member, CoreError> {
    store
        .get_member(id)?
        .ok_or(CoreError::DomainViolation(DomainError::MemberNotFound(id)))
}

pub(crate) fn require_workshift_type<S: WorkshiftStore>(
    store: &mut S,
    id: WorkshiftTypeId,
) -> Result<WorkshiftType, CoreError> {
    store
        .get_workshift_type(id)?
        .ok_or(CoreError::DomainViolation(
            DomainError::WorkshiftTypeNotFound(id),
        ))
}

pub(crate) fn require_regular_shift<S: WorkshiftStore>(
    store: &mut S,
    id: RegularShiftId,
) -> Result<RegularWorkshift, CoreError> {
    store
        .get_regular_shift(id)?
        .ok_or(CoreError::DomainViolation(
            DomainError::RegularShiftNotFound(id),
        ))
}

pub(crate) fn require_instance<S: WorkshiftStore>(
    store: &mut S,
    id: InstanceId,
) -> Result<WorkshiftInstance, CoreError> {
    store
        .get_instance(id)?
        .ok_or(CoreError::DomainViolation(DomainError::InstanceNotFound(id)))
}

fn require_instance_info<S: WorkshiftStore>(
    store: &mut S,
    id: InstanceInfoId,
) -> Result<InstanceInfo, CoreError> {
    store
        .get_instance_info(id)?
        .ok_or(CoreError::DomainViolation(
            DomainError::InstanceInfoNotFound(id),
        ))
}

pub(crate) fn require_pool_hours<S: WorkshiftStore>(
    store: &mut S,
    profile_id: ProfileId,
    pool_id: PoolId,
) -> Result<PoolHours, CoreError> {
    store
        .find_pool_hours(profile_id, pool_id)?
        .ok_or(CoreError::DomainViolation(DomainError::PoolHoursNotFound {
            profile_id,
            pool_id,
        }))
}

/// Resolves the recurring shift or standalone details behind an instance.
///
/// # Errors
///
/// Returns a not-found error if the source record is missing.
pub fn load_instance_details<S: WorkshiftStore>(
    store: &mut S,
    instance: &WorkshiftInstance,
) -> Result<InstanceDetails, CoreError> {
    match instance.source {
        InstanceSource::Recurring(shift_id) => {
            let shift: RegularWorkshift = require_regular_shift(store, shift_id)?;
            let workshift_type: WorkshiftType =
                require_workshift_type(store, shift.workshift_type_id)?;
            Ok(InstanceDetails::Recurring {
                shift,
                workshift_type,
            })
        }
        InstanceSource::Standalone(info_id) => Ok(InstanceDetails::Standalone(
            require_instance_info(store, info_id)?,
        )),
    }
}

/// Appends a log entry to an instance.
pub(crate) fn log<S: WorkshiftStore>(
    store: &mut S,
    instance_id: InstanceId,
    entry: &NewLogEntry,
) -> Result<(), CoreError> {
    store.insert_log_entry(instance_id, entry)?;
    Ok(())
}

/// Removes an instance with its log and, for standalone instances, its
/// details. Standing is not touched.
pub(crate) fn remove_instance_rows<S: WorkshiftStore>(
    store: &mut S,
    instance: &WorkshiftInstance,
) -> Result<(), CoreError> {
    store.delete_log_entries(instance.id)?;
    store.delete_instance(instance.id)?;
    if let InstanceSource::Standalone(info_id) = instance.source {
        store.delete_instance_info(info_id)?;
    }
    Ok(())
}

/// Checks that a profile belongs to `semester`.
pub(crate) fn require_profile_in<S: WorkshiftStore>(
    store: &mut S,
    profile_id: ProfileId,
    semester: &Semester,
) -> Result<WorkshiftProfile, CoreError> {
    let profile: WorkshiftProfile = require_profile(store, profile_id)?;
    if profile.semester_id != semester.id {
        return Err(DomainError::AssigneeNotInSemester(profile_id).into());
    }
    Ok(profile)
}
