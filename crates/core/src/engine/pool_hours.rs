// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pools and per-member hour records.

use super::{remove_instance_rows, require_pool, require_pool_hours, require_semester};
use crate::error::CoreError;
use crate::store::{InstanceQuery, WorkshiftStore};
use farnsworth_domain::{
    DomainError, Hours, NewPool, NewPoolHours, PoolDraft, PoolHours, PoolHoursId, PoolId,
    ProfileId, Semester, SemesterId, StandingUpdate, WorkshiftInstance, WorkshiftPool,
    WorkshiftProfile, classify_edit, derive_standing, follows_pool_default, periods_elapsed,
    validate_pool, validate_requirement_hours,
};
use time::Date;

/// Creates the hour records `pool` is missing for `profiles`, seeded at the
/// pool default.
///
/// # Returns
///
/// The newly created records.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn make_pool_hours<S: WorkshiftStore>(
    store: &mut S,
    pool: &WorkshiftPool,
    profiles: &[WorkshiftProfile],
) -> Result<Vec<PoolHours>, CoreError> {
    let mut created: Vec<PoolHours> = Vec::new();
    for profile in profiles {
        if store.find_pool_hours(profile.id, pool.id)?.is_none() {
            created.push(store.insert_pool_hours(&NewPoolHours::seeded(
                profile.id, pool.id, pool.hours,
            ))?);
        }
    }
    Ok(created)
}

fn ensure_unique_title<S: WorkshiftStore>(
    store: &mut S,
    semester_id: SemesterId,
    title: &str,
    except: Option<PoolId>,
) -> Result<(), CoreError> {
    let clash: bool = store
        .list_pools(semester_id)?
        .iter()
        .any(|pool| pool.title == title && Some(pool.id) != except);
    if clash {
        return Err(DomainError::DuplicatePool {
            title: title.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Creates a pool and an hour record for every profile in its semester.
///
/// # Errors
///
/// Returns an error if the draft is invalid, the title is taken, or the
/// semester does not exist.
pub fn create_pool<S: WorkshiftStore>(
    store: &mut S,
    semester_id: SemesterId,
    draft: &PoolDraft,
    is_primary: bool,
) -> Result<WorkshiftPool, CoreError> {
    validate_pool(draft)?;
    require_semester(store, semester_id)?;
    ensure_unique_title(store, semester_id, &draft.title, None)?;

    let pool: WorkshiftPool = store.insert_pool(&NewPool {
        semester_id,
        is_primary,
        draft: draft.clone(),
    })?;
    let profiles: Vec<WorkshiftProfile> = store.list_profiles(semester_id)?;
    make_pool_hours(store, &pool, &profiles)?;
    Ok(pool)
}

/// Edits a pool.
///
/// When the default requirement changes, every member still on the old
/// default moves to the new one (and has standing recomputed). Members
/// whose requirement was set by hand keep it. Missing hour records are
/// created.
///
/// # Errors
///
/// Returns an error if the draft is invalid, the pool does not exist, or
/// the new title is taken.
pub fn edit_pool<S: WorkshiftStore>(
    store: &mut S,
    pool_id: PoolId,
    draft: &PoolDraft,
) -> Result<WorkshiftPool, CoreError> {
    validate_pool(draft)?;
    let existing: WorkshiftPool = require_pool(store, pool_id)?;
    ensure_unique_title(store, existing.semester_id, &draft.title, Some(pool_id))?;
    let semester: Semester = require_semester(store, existing.semester_id)?;

    let pool: WorkshiftPool = WorkshiftPool {
        id: existing.id,
        semester_id: existing.semester_id,
        title: draft.title.clone(),
        managers: draft.managers.clone(),
        sign_out_cutoff: draft.sign_out_cutoff,
        verify_cutoff: draft.verify_cutoff,
        hours: draft.hours,
        weeks_per_period: draft.weeks_per_period,
        first_fine_date: draft.first_fine_date,
        second_fine_date: draft.second_fine_date,
        third_fine_date: draft.third_fine_date,
        any_blown: draft.any_blown,
        self_verify: draft.self_verify,
        is_primary: existing.is_primary,
    };
    store.update_pool(&pool)?;

    let period_changed: bool = pool.weeks_per_period != existing.weeks_per_period;
    for mut record in store.list_pool_hours_for_pool(pool.id)? {
        if pool.hours != existing.hours && follows_pool_default(record.hours, existing.hours) {
            record.hours = pool.hours;
            recompute_standing(store, &semester, &pool, &mut record)?;
        } else if period_changed {
            recompute_standing(store, &semester, &pool, &mut record)?;
        }
    }

    let profiles: Vec<WorkshiftProfile> = store.list_profiles(pool.semester_id)?;
    make_pool_hours(store, &pool, &profiles)?;
    Ok(pool)
}

/// Deletes a non-primary pool with everything in it.
///
/// # Errors
///
/// Returns an error if the pool does not exist or is the primary pool.
pub fn delete_pool<S: WorkshiftStore>(store: &mut S, pool_id: PoolId) -> Result<(), CoreError> {
    let pool: WorkshiftPool = require_pool(store, pool_id)?;
    if pool.is_primary {
        return Err(DomainError::PrimaryPoolUndeletable(pool_id).into());
    }

    for instance in store.list_instances(&InstanceQuery::for_pool(pool_id))? {
        remove_instance_rows(store, &instance)?;
    }
    for shift in store.list_regular_shifts(pool_id)? {
        store.delete_regular_shift(shift.id)?;
    }
    for record in store.list_pool_hours_for_pool(pool_id)? {
        store.delete_pool_hours(record.id)?;
    }
    store.delete_pool(pool_id)?;
    Ok(())
}

/// Applies a manual edit of a member's requirement and adjustment.
///
/// An adjustment-only edit moves standing by the adjustment delta. A
/// requirement edit re-derives standing from history.
///
/// # Errors
///
/// Returns an error if the record does not exist or the requirement is
/// negative or too large.
pub fn adjust_pool_hours<S: WorkshiftStore>(
    store: &mut S,
    pool_hours_id: PoolHoursId,
    hours: Hours,
    hour_adjustment: Hours,
) -> Result<PoolHours, CoreError> {
    validate_requirement_hours(hours)?;
    let mut record: PoolHours = store
        .get_pool_hours(pool_hours_id)?
        .ok_or(DomainError::PoolHoursRecordNotFound(pool_hours_id))?;

    match classify_edit(&record, hours, hour_adjustment) {
        StandingUpdate::Unchanged => {}
        StandingUpdate::Delta(delta) => {
            record.hour_adjustment = hour_adjustment;
            record.standing += delta;
            store.update_pool_hours(&record)?;
        }
        StandingUpdate::Recompute => {
            record.hours = hours;
            record.hour_adjustment = hour_adjustment;
            let pool: WorkshiftPool = require_pool(store, record.pool_id)?;
            let semester: Semester = require_semester(store, pool.semester_id)?;
            recompute_standing(store, &semester, &pool, &mut record)?;
        }
    }
    Ok(record)
}

/// Re-derives the standing of one hour record.
///
/// # Errors
///
/// Returns an error if the record, its pool or its semester is missing.
pub fn recompute_pool_hours<S: WorkshiftStore>(
    store: &mut S,
    pool_hours_id: PoolHoursId,
) -> Result<PoolHours, CoreError> {
    let mut record: PoolHours = store
        .get_pool_hours(pool_hours_id)?
        .ok_or(DomainError::PoolHoursRecordNotFound(pool_hours_id))?;
    let pool: WorkshiftPool = require_pool(store, record.pool_id)?;
    let semester: Semester = require_semester(store, pool.semester_id)?;
    recompute_standing(store, &semester, &pool, &mut record)?;
    Ok(record)
}

/// Re-derives a member's standing from the adjustment, the requirement
/// debited so far, and every closed instance they worked in the pool.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn recompute_standing<S: WorkshiftStore>(
    store: &mut S,
    semester: &Semester,
    pool: &WorkshiftPool,
    record: &mut PoolHours,
) -> Result<(), CoreError> {
    let closed: Vec<WorkshiftInstance> = store.list_instances(
        &InstanceQuery::for_pool(pool.id)
            .closed()
            .worked_by(record.profile_id),
    )?;
    let periods: i64 = record.last_updated.map_or(0, |as_of| {
        periods_elapsed(
            semester.start_date,
            semester.end_date,
            pool.weeks_per_period,
            as_of,
        )
    });

    record.standing = derive_standing(
        record.hour_adjustment,
        record.hours,
        periods,
        closed
            .iter()
            .filter_map(WorkshiftInstance::standing_effect)
            .map(|(_, hours)| hours),
    )?;
    store.update_pool_hours(record)?;
    Ok(())
}

/// Moves a member's standing in a pool by `delta`.
///
/// # Errors
///
/// Returns an error if the member has no record in the pool.
pub fn credit_standing<S: WorkshiftStore>(
    store: &mut S,
    profile_id: ProfileId,
    pool_id: PoolId,
    delta: Hours,
) -> Result<PoolHours, CoreError> {
    let mut record: PoolHours = require_pool_hours(store, profile_id, pool_id)?;
    record.standing += delta;
    store.update_pool_hours(&record)?;
    Ok(record)
}

/// Moves the assigned hours of each assignee in a pool by `delta`.
///
/// # Errors
///
/// Returns an error if an assignee has no record in the pool.
pub fn adjust_assigned_hours<S: WorkshiftStore>(
    store: &mut S,
    pool_id: PoolId,
    assignees: &[ProfileId],
    delta: Hours,
) -> Result<(), CoreError> {
    for profile_id in assignees {
        let mut record: PoolHours = require_pool_hours(store, *profile_id, pool_id)?;
        record.assigned_hours += delta;
        store.update_pool_hours(&record)?;
    }
    Ok(())
}

/// Debits every member's requirement for the periods completed since the
/// record was last updated.
///
/// Records already updated past `as_of` are left alone.
///
/// # Returns
///
/// The number of records whose standing changed.
///
/// # Errors
///
/// Returns an error if the semester does not exist or the store fails.
pub fn debit_requirements<S: WorkshiftStore>(
    store: &mut S,
    semester_id: SemesterId,
    as_of: Date,
) -> Result<usize, CoreError> {
    let semester: Semester = require_semester(store, semester_id)?;
    let mut changed: usize = 0;

    for pool in store.list_pools(semester_id)? {
        let periods_at = |date: Date| {
            periods_elapsed(
                semester.start_date,
                semester.end_date,
                pool.weeks_per_period,
                date,
            )
        };
        for mut record in store.list_pool_hours_for_pool(pool.id)? {
            if record.last_updated.is_some_and(|last| last >= as_of) {
                continue;
            }
            let already: i64 = record.last_updated.map_or(0, periods_at);
            let due: i64 = periods_at(as_of) - already;
            if due > 0 {
                record.standing -= record.hours.times(due)?;
                changed += 1;
            }
            record.last_updated = Some(as_of);
            store.update_pool_hours(&record)?;
        }
    }
    Ok(changed)
}
