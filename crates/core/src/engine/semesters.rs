// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Semester lifecycle, the member roster, and workshift types.

use super::instances::create_regular_shift;
use super::pool_hours::create_pool;
use super::{remove_instance_rows, require_member, require_semester, require_workshift_type};
use crate::error::CoreError;
use crate::store::{InstanceQuery, WorkshiftStore};
use farnsworth_domain::{
    AssignmentMode, DomainError, Hours, MAX_SHIFT_HOURS, Manager, Member, MemberId, NewManager,
    NewMember, NewPoolHours, NewSemester, PoolDraft, ProfileId, RegularWorkshift,
    RegularWorkshiftDraft, Schedule, Semester, SemesterId, VerifyPolicy, WorkshiftPool,
    WorkshiftProfile, WorkshiftSettings, WorkshiftType, WorkshiftTypeDraft, WorkshiftTypeId,
    validate_hour_range, validate_member_fields, validate_pool, validate_requirement_hours,
    validate_semester, validate_title, validate_workshift_type,
};
use time::OffsetDateTime;

/// Starts a new semester and makes it current.
///
/// The semester captures the members holding workshift-manager positions,
/// gets a primary pool at the default requirement plus any `extra_pools`,
/// a profile with pool hours for every resident member, and a workshift
/// for every manager position that carries hours.
///
/// # Arguments
///
/// * `store` - The store to write to
/// * `semester` - Season, year, dates and fine settings
/// * `extra_pools` - Additional pools to create beside the primary pool
/// * `settings` - Defaults for the primary pool
/// * `now` - The current time
///
/// # Errors
///
/// Returns an error if the dates are invalid, the semester already exists,
/// or a pool draft is invalid.
pub fn start_semester<S: WorkshiftStore>(
    store: &mut S,
    semester: &NewSemester,
    extra_pools: &[PoolDraft],
    settings: &WorkshiftSettings,
    now: OffsetDateTime,
) -> Result<Semester, CoreError> {
    validate_semester(semester)?;
    for draft in extra_pools {
        validate_pool(draft)?;
    }
    if store.find_semester(semester.season, semester.year)?.is_some() {
        return Err(DomainError::DuplicateSemester {
            season: semester.season,
            year: semester.year,
        }
        .into());
    }

    let workshift_managers: Vec<MemberId> = store
        .list_managers()?
        .iter()
        .filter(|manager| manager.active && manager.workshift_manager)
        .filter_map(|manager| manager.incumbent)
        .collect();
    let created: Semester = store.insert_semester(semester, &workshift_managers)?;
    store.set_current_semester_id(Some(created.id))?;

    let primary: PoolDraft = PoolDraft::with_defaults(
        WorkshiftSettings::PRIMARY_POOL_TITLE.to_string(),
        settings.default_hours,
        settings.sign_out_cutoff,
        settings.verify_cutoff,
    );
    create_pool(store, created.id, &primary, true)?;
    for draft in extra_pools {
        create_pool(store, created.id, draft, false)?;
    }

    for member in store.list_members()? {
        if member.is_workshifter() {
            create_profile(store, &created, member.id, None)?;
        }
    }

    make_manager_workshifts(store, &created, now)?;
    Ok(created)
}

/// Updates a semester's fine rate, policy link and preference window.
///
/// # Errors
///
/// Returns an error if the semester does not exist.
pub fn update_semester<S: WorkshiftStore>(
    store: &mut S,
    semester_id: SemesterId,
    rate_cents: Option<i64>,
    policy: Option<String>,
    preferences_open: bool,
) -> Result<Semester, CoreError> {
    let mut semester: Semester = require_semester(store, semester_id)?;
    semester.rate_cents = rate_cents;
    semester.policy = policy;
    semester.preferences_open = preferences_open;
    store.update_semester(&semester)?;
    Ok(semester)
}

/// Makes `semester_id` the current semester.
///
/// # Errors
///
/// Returns an error if the semester does not exist.
pub fn set_current_semester<S: WorkshiftStore>(
    store: &mut S,
    semester_id: SemesterId,
) -> Result<Semester, CoreError> {
    let semester: Semester = require_semester(store, semester_id)?;
    store.set_current_semester_id(Some(semester.id))?;
    Ok(semester)
}

/// Deletes a semester with everything it owns.
///
/// Members and workshift types outlive the semester. If the semester was
/// current there is no current semester afterwards.
///
/// # Errors
///
/// Returns an error if the semester does not exist.
pub fn delete_semester<S: WorkshiftStore>(
    store: &mut S,
    semester_id: SemesterId,
) -> Result<Semester, CoreError> {
    let semester: Semester = require_semester(store, semester_id)?;

    for instance in store.list_instances(&InstanceQuery::for_semester(semester_id))? {
        remove_instance_rows(store, &instance)?;
    }
    let pools: Vec<WorkshiftPool> = store.list_pools(semester_id)?;
    for pool in &pools {
        for shift in store.list_regular_shifts(pool.id)? {
            store.delete_regular_shift(shift.id)?;
        }
        for record in store.list_pool_hours_for_pool(pool.id)? {
            store.delete_pool_hours(record.id)?;
        }
    }
    for profile in store.list_profiles(semester_id)? {
        store.delete_profile(profile.id)?;
    }
    for pool in &pools {
        store.delete_pool(pool.id)?;
    }

    if store.current_semester_id()? == Some(semester_id) {
        store.set_current_semester_id(None)?;
    }
    store.delete_semester(semester_id)?;
    Ok(semester)
}

/// Creates a member's profile in a semester with an hour record in every
/// pool.
///
/// `primary_hours` overrides the primary pool's requirement for this
/// member.
///
/// # Errors
///
/// Returns an error if the member already has a profile in the semester.
pub fn create_profile<S: WorkshiftStore>(
    store: &mut S,
    semester: &Semester,
    member_id: MemberId,
    primary_hours: Option<Hours>,
) -> Result<WorkshiftProfile, CoreError> {
    if store.find_profile(member_id, semester.id)?.is_some() {
        return Err(DomainError::DuplicateProfile(member_id).into());
    }
    let profile: WorkshiftProfile = store.insert_profile(member_id, semester.id)?;

    for pool in store.list_pools(semester.id)? {
        let hours: Hours = match primary_hours {
            Some(hours) if pool.is_primary => hours,
            _ => pool.hours,
        };
        store.insert_pool_hours(&NewPoolHours::seeded(profile.id, pool.id, hours))?;
    }
    Ok(profile)
}

/// Adds a member to a semester already under way.
///
/// # Errors
///
/// Returns an error if the member or semester does not exist, the hours
/// are out of range, or the member already has a profile.
pub fn add_workshifter<S: WorkshiftStore>(
    store: &mut S,
    semester_id: SemesterId,
    member_id: MemberId,
    primary_hours: Option<Hours>,
) -> Result<WorkshiftProfile, CoreError> {
    if let Some(hours) = primary_hours {
        validate_requirement_hours(hours)?;
    }
    let semester: Semester = require_semester(store, semester_id)?;
    require_member(store, member_id)?;
    create_profile(store, &semester, member_id, primary_hours)
}

/// Adds a member to the roster.
///
/// A resident joining while a semester is current gets a profile in it
/// straight away.
///
/// # Errors
///
/// Returns an error if a name field is invalid or the username is taken.
pub fn register_member<S: WorkshiftStore>(
    store: &mut S,
    member: &NewMember,
) -> Result<Member, CoreError> {
    validate_member_fields(&member.username, &member.first_name, &member.last_name)?;
    if store.find_member_by_username(&member.username)?.is_some() {
        return Err(DomainError::DuplicateUsername(member.username.clone()).into());
    }
    let created: Member = store.insert_member(member)?;

    if created.is_workshifter()
        && let Some(semester_id) = store.current_semester_id()?
    {
        let semester: Semester = require_semester(store, semester_id)?;
        create_profile(store, &semester, created.id, None)?;
    }
    Ok(created)
}

/// Adds a manager position.
///
/// With a current semester, a workshift-manager incumbent gains authority
/// over it and a position with hours gets its workshift.
///
/// # Errors
///
/// Returns an error if the title is invalid, the incumbent does not exist,
/// or the hours are negative.
pub fn add_manager<S: WorkshiftStore>(
    store: &mut S,
    manager: &NewManager,
    now: OffsetDateTime,
) -> Result<Manager, CoreError> {
    validate_title(&manager.title)?;
    validate_hour_range("workshift_hours", manager.workshift_hours, MAX_SHIFT_HOURS)?;
    if let Some(member_id) = manager.incumbent {
        require_member(store, member_id)?;
    }
    let created: Manager = store.insert_manager(manager)?;

    if let Some(semester_id) = store.current_semester_id()? {
        let mut semester: Semester = require_semester(store, semester_id)?;
        if let Some(member_id) = created.incumbent.filter(|_| created.workshift_manager)
            && !semester.workshift_managers.contains(&member_id)
        {
            semester.workshift_managers.push(member_id);
            store.update_semester(&semester)?;
        }
        make_manager_workshifts(store, &semester, now)?;
    }
    Ok(created)
}

fn manager_workshift_type<S: WorkshiftStore>(
    store: &mut S,
    manager: &Manager,
) -> Result<WorkshiftType, CoreError> {
    if let Some(existing) = store.find_workshift_type(&manager.title)? {
        return Ok(existing);
    }
    Ok(store.insert_workshift_type(&WorkshiftTypeDraft {
        title: manager.title.clone(),
        description: format!("Workshift hours for the {} position.", manager.title),
        quick_tips: String::new(),
        rateable: false,
        assignment: AssignmentMode::NoAssign,
    })?)
}

/// Creates the missing workshifts for manager positions with hours.
///
/// Each is a week-long, auto-verified shift in the primary pool, assigned
/// to the incumbent when they have a profile in the semester.
///
/// # Returns
///
/// The shifts created.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn make_manager_workshifts<S: WorkshiftStore>(
    store: &mut S,
    semester: &Semester,
    now: OffsetDateTime,
) -> Result<Vec<RegularWorkshift>, CoreError> {
    let Some(primary) = store
        .list_pools(semester.id)?
        .into_iter()
        .find(|pool| pool.is_primary)
    else {
        return Ok(Vec::new());
    };
    let existing: Vec<RegularWorkshift> = store.list_regular_shifts(primary.id)?;

    let mut created: Vec<RegularWorkshift> = Vec::new();
    for manager in store.list_managers()? {
        if !manager.active || !manager.workshift_hours.is_positive() {
            continue;
        }
        let workshift_type: WorkshiftType = manager_workshift_type(store, &manager)?;
        let present: bool = existing.iter().any(|shift| {
            shift.is_manager_shift && shift.workshift_type_id == workshift_type.id
        });
        if present {
            continue;
        }

        let assignee: Option<ProfileId> = match manager.incumbent {
            Some(member_id) => store
                .find_profile(member_id, semester.id)?
                .map(|profile| profile.id),
            None => None,
        };
        let draft: RegularWorkshiftDraft = RegularWorkshiftDraft {
            workshift_type_id: workshift_type.id,
            pool_id: primary.id,
            schedule: Schedule::WeekLong,
            count: 1,
            hours: manager.workshift_hours,
            active: true,
            current_assignees: assignee.into_iter().collect(),
            start_time: None,
            end_time: None,
            verify: VerifyPolicy::Automatic,
            addendum: String::new(),
            is_manager_shift: true,
        };
        created.push(create_regular_shift(store, &draft, now)?);
    }
    Ok(created)
}

/// Creates a workshift type.
///
/// # Errors
///
/// Returns an error if the draft is invalid or the title is taken.
pub fn create_workshift_type<S: WorkshiftStore>(
    store: &mut S,
    draft: &WorkshiftTypeDraft,
) -> Result<WorkshiftType, CoreError> {
    validate_workshift_type(draft)?;
    if store.find_workshift_type(&draft.title)?.is_some() {
        return Err(DomainError::DuplicateWorkshiftType {
            title: draft.title.clone(),
        }
        .into());
    }
    Ok(store.insert_workshift_type(draft)?)
}

/// Edits a workshift type.
///
/// # Errors
///
/// Returns an error if the draft is invalid, the type does not exist, or
/// the new title belongs to another type.
pub fn edit_workshift_type<S: WorkshiftStore>(
    store: &mut S,
    workshift_type_id: WorkshiftTypeId,
    draft: &WorkshiftTypeDraft,
) -> Result<WorkshiftType, CoreError> {
    validate_workshift_type(draft)?;
    require_workshift_type(store, workshift_type_id)?;
    if store
        .find_workshift_type(&draft.title)?
        .is_some_and(|other| other.id != workshift_type_id)
    {
        return Err(DomainError::DuplicateWorkshiftType {
            title: draft.title.clone(),
        }
        .into());
    }
    let updated: WorkshiftType = WorkshiftType {
        id: workshift_type_id,
        title: draft.title.clone(),
        description: draft.description.clone(),
        quick_tips: draft.quick_tips.clone(),
        rateable: draft.rateable,
        assignment: draft.assignment,
    };
    store.update_workshift_type(&updated)?;
    Ok(updated)
}

/// Shifts in a semester, across all of its pools.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_semester_shifts<S: WorkshiftStore>(
    store: &mut S,
    semester_id: SemesterId,
) -> Result<Vec<RegularWorkshift>, CoreError> {
    let mut shifts: Vec<RegularWorkshift> = Vec::new();
    for pool in store.list_pools(semester_id)? {
        shifts.extend(store.list_regular_shifts(pool.id)?);
    }
    shifts.sort_by_key(|shift| shift.id.value());
    Ok(shifts)
}
