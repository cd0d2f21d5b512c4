// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read models. Nothing here writes to the store.

use crate::engine::{
    load_instance_details, require_instance, require_member, require_pool, require_profile,
    require_semester,
};
use crate::error::CoreError;
use crate::store::{InstanceQuery, WorkshiftStore};
use farnsworth_domain::{
    InstanceDetails, InstanceId, Interaction, Member, PoolHours, ProfileId, Semester, SemesterId,
    ShiftLogEntry, Viewer, WorkshiftInstance, WorkshiftPool, WorkshiftProfile,
    available_interactions,
};
use time::Date;

/// A semester with its pools and progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemesterOverview {
    pub semester: Semester,
    pub pools: Vec<WorkshiftPool>,
    pub days_elapsed: i64,
    pub total_days: i64,
}

/// A member's standing and upcoming shifts in one semester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub profile: WorkshiftProfile,
    pub member: Member,
    pub pool_hours: Vec<(WorkshiftPool, PoolHours)>,
    /// Open instances dated today or later, soonest first.
    pub upcoming: Vec<(WorkshiftInstance, InstanceDetails)>,
}

/// An instance with its details, log, and what the viewer may do to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceView {
    pub instance: WorkshiftInstance,
    pub details: InstanceDetails,
    pub pool: WorkshiftPool,
    /// Newest first.
    pub logs: Vec<ShiftLogEntry>,
    pub interactions: Vec<Interaction>,
}

/// Loads a semester overview as of `today`.
///
/// # Errors
///
/// Returns an error if the semester does not exist.
pub fn semester_overview<S: WorkshiftStore>(
    store: &mut S,
    semester_id: SemesterId,
    today: Date,
) -> Result<SemesterOverview, CoreError> {
    let semester: Semester = require_semester(store, semester_id)?;
    let pools: Vec<WorkshiftPool> = store.list_pools(semester_id)?;
    Ok(SemesterOverview {
        days_elapsed: semester.days_elapsed(today),
        total_days: (semester.end_date - semester.start_date).whole_days(),
        semester,
        pools,
    })
}

/// Loads a profile view as of `today`.
///
/// # Errors
///
/// Returns an error if the profile or one of its records is missing.
pub fn profile_view<S: WorkshiftStore>(
    store: &mut S,
    profile_id: ProfileId,
    today: Date,
) -> Result<ProfileView, CoreError> {
    let profile: WorkshiftProfile = require_profile(store, profile_id)?;
    let member: Member = require_member(store, profile.member_id)?;

    let mut pool_hours: Vec<(WorkshiftPool, PoolHours)> = Vec::new();
    for record in store.list_pool_hours_for_profile(profile_id)? {
        let pool: WorkshiftPool = require_pool(store, record.pool_id)?;
        pool_hours.push((pool, record));
    }

    let mut upcoming: Vec<(WorkshiftInstance, InstanceDetails)> = Vec::new();
    let instances: Vec<WorkshiftInstance> = store.list_instances(
        &InstanceQuery::for_semester(profile.semester_id)
            .open()
            .worked_by(profile_id)
            .on_or_after(today),
    )?;
    for instance in instances {
        let details: InstanceDetails = load_instance_details(store, &instance)?;
        upcoming.push((instance, details));
    }
    upcoming.sort_by_key(|(instance, _)| (instance.date, instance.id.value()));

    Ok(ProfileView {
        profile,
        member,
        pool_hours,
        upcoming,
    })
}

/// Loads an instance view.
///
/// `viewer_for` builds the viewer once the instance's pool is known, since
/// pool-manager authority depends on it.
///
/// # Errors
///
/// Returns an error if the instance or its source is missing.
pub fn instance_view<S, F>(
    store: &mut S,
    instance_id: InstanceId,
    viewer_for: F,
) -> Result<InstanceView, CoreError>
where
    S: WorkshiftStore,
    F: FnOnce(&WorkshiftPool) -> Viewer,
{
    let instance: WorkshiftInstance = require_instance(store, instance_id)?;
    let details: InstanceDetails = load_instance_details(store, &instance)?;
    let pool: WorkshiftPool = require_pool(store, details.pool_id())?;
    let logs: Vec<ShiftLogEntry> = store.list_log_entries(instance_id)?;
    let viewer: Viewer = viewer_for(&pool);
    let interactions: Vec<Interaction> =
        available_interactions(&instance, &pool, details.verify(), &viewer);
    Ok(InstanceView {
        instance,
        details,
        pool,
        logs,
        interactions,
    })
}

/// Lists open, unfilled instances dated `today` or later.
///
/// # Errors
///
/// Returns an error if an instance's source is missing.
pub fn open_shifts<S: WorkshiftStore>(
    store: &mut S,
    semester_id: SemesterId,
    today: Date,
) -> Result<Vec<(WorkshiftInstance, InstanceDetails)>, CoreError> {
    let instances: Vec<WorkshiftInstance> = store.list_instances(
        &InstanceQuery::for_semester(semester_id)
            .open()
            .on_or_after(today),
    )?;
    let mut open: Vec<(WorkshiftInstance, InstanceDetails)> = Vec::new();
    for instance in instances.into_iter().filter(|i| i.workshifter.is_none()) {
        let details: InstanceDetails = load_instance_details(store, &instance)?;
        open.push((instance, details));
    }
    open.sort_by_key(|(instance, _)| (instance.date, instance.id.value()));
    Ok(open)
}
