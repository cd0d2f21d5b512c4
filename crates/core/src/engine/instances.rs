// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Recurring shift templates and the instances generated from them.

use super::pool_hours::{adjust_assigned_hours, credit_standing};
use super::{
    load_instance_details, log, remove_instance_rows, require_instance, require_pool,
    require_profile_in, require_regular_shift, require_semester, require_workshift_type,
};
use crate::error::CoreError;
use crate::store::{InstanceQuery, WorkshiftStore};
use farnsworth_domain::{
    DomainError, Hours, InstanceDetails, InstanceId, InstanceInfo, InstanceInfoDraft,
    InstanceSource, LogEntryType, NewInstance, NewLogEntry, ProfileId, RegularShiftId,
    RegularWorkshift, RegularWorkshiftDraft, Semester, TimeBlock, WorkshiftInstance,
    WorkshiftPool, WorkshiftProfile, WorkshiftType, day_delta, is_available, shift_date,
    validate_instance_hours, validate_instance_info, validate_regular_shift, weekly_dates,
};
use std::collections::BTreeMap;
use time::{Date, OffsetDateTime};

fn semester_of_pool<S: WorkshiftStore>(
    store: &mut S,
    pool: &WorkshiftPool,
) -> Result<Semester, CoreError> {
    require_semester(store, pool.semester_id)
}

/// Checks every assignee belongs to the semester and is not busy during
/// the shift.
fn validate_assignees<S: WorkshiftStore>(
    store: &mut S,
    semester: &Semester,
    draft: &RegularWorkshiftDraft,
) -> Result<(), CoreError> {
    for profile_id in &draft.current_assignees {
        let profile: WorkshiftProfile = require_profile_in(store, *profile_id, semester)?;
        let blocks: Vec<TimeBlock> = store.get_time_blocks(&profile.time_blocks)?;
        if !is_available(&blocks, draft.schedule, draft.start_time, draft.end_time) {
            return Err(DomainError::AssigneeBusy(*profile_id).into());
        }
    }
    Ok(())
}

/// Generates the instances `shift` is missing from today through the end
/// of the semester: `count` per weekly occurrence.
///
/// # Returns
///
/// The newly created instances.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn make_instances<S: WorkshiftStore>(
    store: &mut S,
    semester: &Semester,
    shift: &RegularWorkshift,
    today: Date,
) -> Result<Vec<WorkshiftInstance>, CoreError> {
    let weekday = shift.schedule.anchor_weekday(semester.start_date);
    let existing: Vec<WorkshiftInstance> =
        store.list_instances(&InstanceQuery::for_regular_shift(shift.id))?;

    let mut created: Vec<WorkshiftInstance> = Vec::new();
    for date in weekly_dates(weekday, today, semester.start_date, semester.end_date) {
        let have: usize = existing.iter().filter(|i| i.date == date).count();
        let want: usize = usize::try_from(shift.count).unwrap_or(usize::MAX);
        for _ in have..want {
            created.push(store.insert_instance(&NewInstance {
                semester_id: semester.id,
                source: InstanceSource::Recurring(shift.id),
                date,
                workshifter: None,
                hours: shift.hours,
            })?);
        }
    }
    Ok(created)
}

/// Moves every open instance dated today or later by `delta` days,
/// dropping those that land past the semester end.
fn reschedule_instances<S: WorkshiftStore>(
    store: &mut S,
    semester: &Semester,
    shift: &RegularWorkshift,
    delta: i64,
    today: Date,
) -> Result<(), CoreError> {
    let upcoming: Vec<WorkshiftInstance> = store.list_instances(
        &InstanceQuery::for_regular_shift(shift.id)
            .open()
            .on_or_after(today),
    )?;
    for mut instance in upcoming {
        let moved: Date = shift_date(instance.date, delta)?;
        if moved > semester.end_date {
            remove_instance_rows(store, &instance)?;
        } else {
            instance.date = moved;
            store.update_instance(&instance)?;
        }
    }
    Ok(())
}

/// Brings open upcoming instances in line with the template: hours follow
/// the shift, surplus instances beyond `count` are dropped, and assignees
/// are spread one per instance in creation order.
fn sync_open_instances<S: WorkshiftStore>(
    store: &mut S,
    shift: &RegularWorkshift,
    now: OffsetDateTime,
) -> Result<(), CoreError> {
    let upcoming: Vec<WorkshiftInstance> = store.list_instances(
        &InstanceQuery::for_regular_shift(shift.id)
            .open()
            .on_or_after(now.date()),
    )?;

    let mut by_date: BTreeMap<Date, Vec<WorkshiftInstance>> = BTreeMap::new();
    for instance in upcoming {
        by_date.entry(instance.date).or_default().push(instance);
    }

    let slots: usize = usize::try_from(shift.count).unwrap_or(usize::MAX);
    for (_, mut group) in by_date {
        while group.len() > slots {
            if let Some(surplus) = group.pop() {
                remove_instance_rows(store, &surplus)?;
            }
        }

        for (slot, mut instance) in group.into_iter().enumerate() {
            let assignee: Option<ProfileId> = shift.current_assignees.get(slot).copied();
            let mut changed: bool = false;

            if instance.hours != shift.hours {
                instance.hours = shift.hours;
                instance.intended_hours = shift.hours;
                changed = true;
            }
            if instance.workshifter != assignee {
                instance.workshifter = assignee;
                changed = true;
                if assignee.is_some() {
                    log(
                        store,
                        instance.id,
                        &NewLogEntry::simple(LogEntryType::Assigned, assignee, now),
                    )?;
                }
            }
            if changed {
                store.update_instance(&instance)?;
            }
        }
    }
    Ok(())
}

/// Detaches a shift's instances: closed ones keep a standalone snapshot of
/// the shift's details, open ones are deleted.
fn detach_instances<S: WorkshiftStore>(
    store: &mut S,
    shift: &RegularWorkshift,
) -> Result<(), CoreError> {
    let workshift_type: WorkshiftType = require_workshift_type(store, shift.workshift_type_id)?;
    let snapshot: InstanceInfoDraft = InstanceDetails::Recurring {
        shift: shift.clone(),
        workshift_type,
    }
    .to_info_draft();

    for mut instance in store.list_instances(&InstanceQuery::for_regular_shift(shift.id))? {
        if instance.closed {
            let info: InstanceInfo = store.insert_instance_info(&snapshot)?;
            instance.source = InstanceSource::Standalone(info.id);
            store.update_instance(&instance)?;
        } else {
            remove_instance_rows(store, &instance)?;
        }
    }
    Ok(())
}

/// Applies a freshly saved template to its instances and assignees.
fn apply_shift_state<S: WorkshiftStore>(
    store: &mut S,
    semester: &Semester,
    shift: &RegularWorkshift,
    now: OffsetDateTime,
) -> Result<(), CoreError> {
    if shift.active {
        make_instances(store, semester, shift, now.date())?;
        adjust_assigned_hours(store, shift.pool_id, &shift.current_assignees, shift.hours)?;
        sync_open_instances(store, shift, now)
    } else {
        detach_instances(store, shift)
    }
}

/// Creates a recurring shift and generates its instances.
///
/// # Errors
///
/// Returns an error if the draft is invalid, a referenced record is
/// missing, or an assignee is busy or from another semester.
pub fn create_regular_shift<S: WorkshiftStore>(
    store: &mut S,
    draft: &RegularWorkshiftDraft,
    now: OffsetDateTime,
) -> Result<RegularWorkshift, CoreError> {
    validate_regular_shift(draft)?;
    let pool: WorkshiftPool = require_pool(store, draft.pool_id)?;
    let semester: Semester = semester_of_pool(store, &pool)?;
    require_workshift_type(store, draft.workshift_type_id)?;
    validate_assignees(store, &semester, draft)?;

    let shift: RegularWorkshift = store.insert_regular_shift(draft)?;
    apply_shift_state(store, &semester, &shift, now)?;
    Ok(shift)
}

/// Edits a recurring shift.
///
/// The previous assignment hours are reverted before the new ones apply.
/// A change of weekday moves upcoming open instances with it. Deactivating
/// the shift detaches its instances.
///
/// # Errors
///
/// Returns an error if the draft is invalid, a referenced record is
/// missing, the new pool is in another semester, or an assignee is busy or
/// from another semester.
pub fn edit_regular_shift<S: WorkshiftStore>(
    store: &mut S,
    shift_id: RegularShiftId,
    draft: &RegularWorkshiftDraft,
    now: OffsetDateTime,
) -> Result<RegularWorkshift, CoreError> {
    validate_regular_shift(draft)?;
    let existing: RegularWorkshift = require_regular_shift(store, shift_id)?;
    let previous_pool: WorkshiftPool = require_pool(store, existing.pool_id)?;
    let pool: WorkshiftPool = require_pool(store, draft.pool_id)?;
    if pool.semester_id != previous_pool.semester_id {
        return Err(DomainError::PoolNotInSemester {
            pool_id: pool.id,
            semester_id: previous_pool.semester_id,
        }
        .into());
    }
    let semester: Semester = semester_of_pool(store, &pool)?;
    require_workshift_type(store, draft.workshift_type_id)?;
    validate_assignees(store, &semester, draft)?;

    if existing.active {
        adjust_assigned_hours(
            store,
            existing.pool_id,
            &existing.current_assignees,
            -existing.hours,
        )?;
    }

    let shift: RegularWorkshift = RegularWorkshift {
        id: existing.id,
        workshift_type_id: draft.workshift_type_id,
        pool_id: draft.pool_id,
        schedule: draft.schedule,
        count: draft.count,
        hours: draft.hours,
        active: draft.active,
        current_assignees: draft.current_assignees.clone(),
        start_time: draft.start_time,
        end_time: draft.end_time,
        verify: draft.verify,
        addendum: draft.addendum.clone(),
        is_manager_shift: draft.is_manager_shift,
    };
    store.update_regular_shift(&shift)?;

    let old_day = existing.schedule.anchor_weekday(semester.start_date);
    let new_day = shift.schedule.anchor_weekday(semester.start_date);
    if shift.active && old_day != new_day {
        reschedule_instances(
            store,
            &semester,
            &shift,
            day_delta(old_day, new_day),
            now.date(),
        )?;
    }

    apply_shift_state(store, &semester, &shift, now)?;
    Ok(shift)
}

/// Deletes a recurring shift, reverting its assignment hours and keeping
/// snapshots of its closed instances.
///
/// # Errors
///
/// Returns an error if the shift does not exist.
pub fn delete_regular_shift<S: WorkshiftStore>(
    store: &mut S,
    shift_id: RegularShiftId,
) -> Result<RegularWorkshift, CoreError> {
    let shift: RegularWorkshift = require_regular_shift(store, shift_id)?;
    if shift.active {
        adjust_assigned_hours(store, shift.pool_id, &shift.current_assignees, -shift.hours)?;
    }
    detach_instances(store, &shift)?;
    store.delete_regular_shift(shift_id)?;
    Ok(shift)
}

/// Creates an ad hoc instance with its own details.
///
/// # Errors
///
/// Returns an error if the details are invalid, the date is outside the
/// pool's semester, or the workshifter is from another semester.
pub fn create_instance<S: WorkshiftStore>(
    store: &mut S,
    info: &InstanceInfoDraft,
    date: Date,
    workshifter: Option<ProfileId>,
    hours: Hours,
    now: OffsetDateTime,
) -> Result<WorkshiftInstance, CoreError> {
    validate_instance_info(info)?;
    validate_instance_hours(hours)?;
    let pool: WorkshiftPool = require_pool(store, info.pool_id)?;
    let semester: Semester = semester_of_pool(store, &pool)?;
    if !semester.contains(date) {
        return Err(DomainError::DateOutsideSemester {
            date,
            semester_id: semester.id,
        }
        .into());
    }
    if let Some(profile_id) = workshifter {
        require_profile_in(store, profile_id, &semester)?;
    }

    let details: InstanceInfo = store.insert_instance_info(info)?;
    let instance: WorkshiftInstance = store.insert_instance(&NewInstance {
        semester_id: semester.id,
        source: InstanceSource::Standalone(details.id),
        date,
        workshifter,
        hours,
    })?;
    if workshifter.is_some() {
        log(
            store,
            instance.id,
            &NewLogEntry::simple(LogEntryType::Assigned, workshifter, now),
        )?;
    }
    Ok(instance)
}

/// Edits an open instance's details, date and workshifter.
///
/// A recurring instance is detached from its template: it gets its own
/// standalone details so the edit does not leak into other weeks.
///
/// # Errors
///
/// Returns an error if the instance is missing or closed, the details are
/// invalid, or the pool or date is outside the instance's semester.
pub fn edit_instance<S: WorkshiftStore>(
    store: &mut S,
    instance_id: InstanceId,
    info: &InstanceInfoDraft,
    date: Date,
    workshifter: Option<ProfileId>,
    now: OffsetDateTime,
) -> Result<WorkshiftInstance, CoreError> {
    validate_instance_info(info)?;
    let mut instance: WorkshiftInstance = require_instance(store, instance_id)?;
    if instance.closed {
        return Err(DomainError::InstanceClosed(instance_id).into());
    }
    let semester: Semester = require_semester(store, instance.semester_id)?;
    let pool: WorkshiftPool = require_pool(store, info.pool_id)?;
    if pool.semester_id != semester.id {
        return Err(DomainError::PoolNotInSemester {
            pool_id: pool.id,
            semester_id: semester.id,
        }
        .into());
    }
    if !semester.contains(date) {
        return Err(DomainError::DateOutsideSemester {
            date,
            semester_id: semester.id,
        }
        .into());
    }
    if let Some(profile_id) = workshifter {
        require_profile_in(store, profile_id, &semester)?;
    }

    match instance.source {
        InstanceSource::Recurring(_) => {
            let details: InstanceInfo = store.insert_instance_info(info)?;
            instance.source = InstanceSource::Standalone(details.id);
        }
        InstanceSource::Standalone(info_id) => {
            store.update_instance_info(&InstanceInfo {
                id: info_id,
                title: info.title.clone(),
                description: info.description.clone(),
                pool_id: info.pool_id,
                verify: info.verify,
                start_time: info.start_time,
                end_time: info.end_time,
                week_long: info.week_long,
            })?;
        }
    }

    instance.date = date;
    if instance.workshifter != workshifter {
        instance.workshifter = workshifter;
        if workshifter.is_some() {
            log(
                store,
                instance.id,
                &NewLogEntry::simple(LogEntryType::Assigned, workshifter, now),
            )?;
        }
    }
    store.update_instance(&instance)?;
    Ok(instance)
}

/// Deletes an instance. A closed instance's effect on its workshifter's
/// standing is reverted first.
///
/// # Errors
///
/// Returns an error if the instance or its source is missing.
pub fn delete_instance<S: WorkshiftStore>(
    store: &mut S,
    instance_id: InstanceId,
) -> Result<WorkshiftInstance, CoreError> {
    let instance: WorkshiftInstance = require_instance(store, instance_id)?;
    if let Some((profile_id, effect)) = instance.standing_effect() {
        let details: InstanceDetails = load_instance_details(store, &instance)?;
        credit_standing(store, profile_id, details.pool_id(), -effect)?;
    }
    remove_instance_rows(store, &instance)?;
    Ok(instance)
}

/// Changes the hours an instance is worth.
///
/// For a closed instance the workshifter's standing moves by the
/// difference. Writes a modify-hours log entry.
///
/// # Errors
///
/// Returns an error if the instance is missing or the hours are negative.
pub fn edit_instance_hours<S: WorkshiftStore>(
    store: &mut S,
    instance_id: InstanceId,
    hours: Hours,
    editor: Option<ProfileId>,
    note: &str,
    now: OffsetDateTime,
) -> Result<WorkshiftInstance, CoreError> {
    validate_instance_hours(hours)?;
    let mut instance: WorkshiftInstance = require_instance(store, instance_id)?;
    let before: Option<(ProfileId, Hours)> = instance.standing_effect();
    instance.hours = hours;
    store.update_instance(&instance)?;

    if let (Some((profile_id, old_effect)), Some((_, new_effect))) =
        (before, instance.standing_effect())
    {
        let details: InstanceDetails = load_instance_details(store, &instance)?;
        credit_standing(store, profile_id, details.pool_id(), new_effect - old_effect)?;
    }

    log(
        store,
        instance.id,
        &NewLogEntry {
            person: editor,
            entry_time: now,
            hours: Some(hours),
            note: note.to_string(),
            entry_type: LogEntryType::ModifyHours,
        },
    )?;
    Ok(instance)
}
