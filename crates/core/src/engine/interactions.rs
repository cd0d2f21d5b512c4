// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The per-instance state machine: sign in, sign out, verify, blown.
//!
//! Every transition writes exactly one log entry. Verify and blown close
//! the instance and move the workshifter's standing in the pool the
//! instance belongs to.

use super::pool_hours::credit_standing;
use super::{load_instance_details, log, require_instance, require_pool};
use crate::error::CoreError;
use crate::store::{InstanceQuery, WorkshiftStore};
use farnsworth_domain::{
    InstanceDetails, InstanceId, LogEntryType, NewLogEntry, ProfileId, SemesterId, Viewer,
    VerifyPolicy, WorkshiftInstance, WorkshiftPool, check_blown, check_sign_in, check_sign_out,
    check_verify, shift_date,
};
use time::{Duration, OffsetDateTime, PrimitiveDateTime, Time};

/// Signs the viewer in to an unfilled instance.
///
/// # Errors
///
/// Returns an error if the instance is missing, closed or already filled,
/// or the viewer has no profile.
pub fn sign_in<S: WorkshiftStore>(
    store: &mut S,
    instance_id: InstanceId,
    viewer: &Viewer,
    now: OffsetDateTime,
) -> Result<WorkshiftInstance, CoreError> {
    let mut instance: WorkshiftInstance = require_instance(store, instance_id)?;
    let profile_id: ProfileId = check_sign_in(&instance, viewer)?;

    instance.workshifter = Some(profile_id);
    store.update_instance(&instance)?;
    log(
        store,
        instance.id,
        &NewLogEntry::simple(LogEntryType::Assigned, Some(profile_id), now),
    )?;
    Ok(instance)
}

/// Signs the viewer out of an instance they hold.
///
/// # Errors
///
/// Returns an error if the instance is missing or closed, or the viewer is
/// not its workshifter.
pub fn sign_out<S: WorkshiftStore>(
    store: &mut S,
    instance_id: InstanceId,
    viewer: &Viewer,
    now: OffsetDateTime,
) -> Result<WorkshiftInstance, CoreError> {
    let mut instance: WorkshiftInstance = require_instance(store, instance_id)?;
    let profile_id: ProfileId = check_sign_out(&instance, viewer)?;

    instance.workshifter = None;
    store.update_instance(&instance)?;
    log(
        store,
        instance.id,
        &NewLogEntry::simple(LogEntryType::SignOut, Some(profile_id), now),
    )?;
    Ok(instance)
}

fn close_verified<S: WorkshiftStore>(
    store: &mut S,
    instance: &mut WorkshiftInstance,
    details: &InstanceDetails,
    verifier: Option<ProfileId>,
    now: OffsetDateTime,
) -> Result<(), CoreError> {
    instance.verifier = verifier;
    instance.closed = true;
    store.update_instance(instance)?;
    if let Some((profile_id, effect)) = instance.standing_effect() {
        credit_standing(store, profile_id, details.pool_id(), effect)?;
    }
    log(
        store,
        instance.id,
        &NewLogEntry::simple(LogEntryType::Verify, verifier, now),
    )
}

fn close_blown<S: WorkshiftStore>(
    store: &mut S,
    instance: &mut WorkshiftInstance,
    details: &InstanceDetails,
    reporter: Option<ProfileId>,
    now: OffsetDateTime,
) -> Result<(), CoreError> {
    instance.liable = instance.workshifter;
    instance.blown = true;
    instance.closed = true;
    store.update_instance(instance)?;
    if let Some((profile_id, effect)) = instance.standing_effect() {
        credit_standing(store, profile_id, details.pool_id(), effect)?;
    }
    log(
        store,
        instance.id,
        &NewLogEntry::simple(LogEntryType::Blown, reporter, now),
    )
}

/// Verifies a filled instance, crediting its hours to the workshifter.
///
/// # Errors
///
/// Returns an error if the instance is missing, closed or unfilled, or the
/// instance's verify policy does not allow the viewer.
pub fn verify<S: WorkshiftStore>(
    store: &mut S,
    instance_id: InstanceId,
    viewer: &Viewer,
    now: OffsetDateTime,
) -> Result<WorkshiftInstance, CoreError> {
    let mut instance: WorkshiftInstance = require_instance(store, instance_id)?;
    let details: InstanceDetails = load_instance_details(store, &instance)?;
    let pool: WorkshiftPool = require_pool(store, details.pool_id())?;
    let verifier: ProfileId = check_verify(&instance, &pool, details.verify(), viewer)?;

    close_verified(store, &mut instance, &details, Some(verifier), now)?;
    Ok(instance)
}

/// Marks a filled instance blown, debiting its hours from the workshifter.
///
/// # Errors
///
/// Returns an error if the instance is missing, closed or unfilled, or the
/// viewer may not mark shifts blown in this pool.
pub fn mark_blown<S: WorkshiftStore>(
    store: &mut S,
    instance_id: InstanceId,
    viewer: &Viewer,
    now: OffsetDateTime,
) -> Result<WorkshiftInstance, CoreError> {
    let mut instance: WorkshiftInstance = require_instance(store, instance_id)?;
    let details: InstanceDetails = load_instance_details(store, &instance)?;
    let pool: WorkshiftPool = require_pool(store, details.pool_id())?;
    check_blown(&instance, &pool, viewer)?;

    close_blown(store, &mut instance, &details, viewer.profile_id, now)?;
    Ok(instance)
}

/// The moment an instance's shift is over.
///
/// Week-long shifts run through the sixth day after their date. Shifts
/// with no end time last the whole day.
fn shift_end(
    instance: &WorkshiftInstance,
    details: &InstanceDetails,
) -> Result<PrimitiveDateTime, CoreError> {
    if details.week_long() {
        let last: time::Date = shift_date(instance.date, 7)?;
        return Ok(PrimitiveDateTime::new(last, Time::MIDNIGHT));
    }
    match details.end_time() {
        Some(end) => Ok(PrimitiveDateTime::new(instance.date, end)),
        None => Ok(PrimitiveDateTime::new(
            shift_date(instance.date, 1)?,
            Time::MIDNIGHT,
        )),
    }
}

/// Closes filled instances whose time has passed.
///
/// Auto-verified instances are verified once the shift is over. Others
/// are marked blown once the pool's verify cutoff has elapsed after the
/// shift with nobody verifying them.
///
/// # Returns
///
/// The number of instances closed.
///
/// # Errors
///
/// Returns an error if an instance's source or pool is missing.
pub fn close_expired_instances<S: WorkshiftStore>(
    store: &mut S,
    semester_id: SemesterId,
    now: OffsetDateTime,
) -> Result<usize, CoreError> {
    let moment: PrimitiveDateTime = PrimitiveDateTime::new(now.date(), now.time());
    let candidates: Vec<WorkshiftInstance> = store.list_instances(
        &InstanceQuery::for_semester(semester_id)
            .open()
            .on_or_before(now.date()),
    )?;

    let mut closed: usize = 0;
    for mut instance in candidates {
        if instance.workshifter.is_none() {
            continue;
        }
        let details: InstanceDetails = load_instance_details(store, &instance)?;
        let end: PrimitiveDateTime = shift_end(&instance, &details)?;

        if details.verify() == VerifyPolicy::Automatic {
            if moment >= end {
                close_verified(store, &mut instance, &details, None, now)?;
                closed += 1;
            }
            continue;
        }

        let pool: WorkshiftPool = require_pool(store, details.pool_id())?;
        let deadline: PrimitiveDateTime = end + Duration::hours(i64::from(pool.verify_cutoff));
        if moment >= deadline {
            close_blown(store, &mut instance, &details, None, now)?;
            closed += 1;
        }
    }
    Ok(closed)
}
