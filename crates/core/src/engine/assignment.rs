// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment allocators.
//!
//! The candidate order is supplied by the caller so the allocators stay
//! deterministic here; shuffling belongs to the edge that invokes them.

use super::instances::edit_regular_shift;
use super::{log, require_pool, require_profile};
use crate::error::CoreError;
use crate::store::{InstanceQuery, WorkshiftStore};
use farnsworth_domain::{
    AssignmentMode, Hours, InstanceId, LogEntryType, NewLogEntry, PoolHours, PoolId, ProfileId,
    RatingLevel, RegularShiftId, RegularWorkshift, RegularWorkshiftDraft, SemesterId, TimeBlock,
    WorkshiftInstance, WorkshiftPool, WorkshiftProfile, WorkshiftRating, WorkshiftType,
    WorkshiftTypeId, is_available,
};
use std::collections::HashMap;
use time::OffsetDateTime;

/// Result of an automatic assignment run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoAssignReport {
    /// Shift and profile for every assignment made, in order.
    pub assigned: Vec<(RegularShiftId, ProfileId)>,
    /// Candidates who still owe hours in the pool.
    pub unfinished: Vec<ProfileId>,
}

struct Candidate {
    profile_id: ProfileId,
    owed: Hours,
    blocks: Vec<TimeBlock>,
    ratings: HashMap<WorkshiftTypeId, RatingLevel>,
}

impl Candidate {
    fn rating_for(&self, workshift_type_id: WorkshiftTypeId) -> RatingLevel {
        self.ratings
            .get(&workshift_type_id)
            .copied()
            .unwrap_or(RatingLevel::Indifferent)
    }
}

fn load_candidate<S: WorkshiftStore>(
    store: &mut S,
    pool_id: PoolId,
    profile_id: ProfileId,
) -> Result<Option<Candidate>, CoreError> {
    let Some(record) = store.find_pool_hours(profile_id, pool_id)? else {
        return Ok(None);
    };
    let profile: WorkshiftProfile = require_profile(store, profile_id)?;
    let blocks: Vec<TimeBlock> = store.get_time_blocks(&profile.time_blocks)?;
    let ratings: HashMap<WorkshiftTypeId, RatingLevel> = store
        .get_ratings(&profile.ratings)?
        .into_iter()
        .map(|rating: WorkshiftRating| (rating.workshift_type_id, rating.rating))
        .collect();
    Ok(Some(Candidate {
        profile_id,
        owed: record.unassigned(),
        blocks,
        ratings,
    }))
}

fn assignable_shifts<S: WorkshiftStore>(
    store: &mut S,
    pool_id: PoolId,
) -> Result<Vec<(RegularWorkshift, WorkshiftType)>, CoreError> {
    let mut shifts: Vec<(RegularWorkshift, WorkshiftType)> = Vec::new();
    for shift in store.list_regular_shifts(pool_id)? {
        if !shift.active || shift.is_manager_shift {
            continue;
        }
        if let Some(workshift_type) = store.get_workshift_type(shift.workshift_type_id)?
            && workshift_type.assignment == AssignmentMode::Auto
        {
            shifts.push((shift, workshift_type));
        }
    }
    Ok(shifts)
}

/// Fills open slots of auto-assignable shifts in a pool.
///
/// Candidates are tried in `candidate_order`, first against shifts they
/// like and then against shifts they are indifferent to (unrated counts
/// as indifferent). Disliked shifts are never assigned. A candidate only
/// takes a shift that fits in the hours they still owe and that does not
/// clash with their busy blocks.
///
/// # Errors
///
/// Returns an error if the pool does not exist or saving a shift fails.
pub fn auto_assign<S: WorkshiftStore>(
    store: &mut S,
    pool_id: PoolId,
    candidate_order: &[ProfileId],
    now: OffsetDateTime,
) -> Result<AutoAssignReport, CoreError> {
    require_pool(store, pool_id)?;
    let mut shifts: Vec<(RegularWorkshift, WorkshiftType)> = assignable_shifts(store, pool_id)?;

    let mut candidates: Vec<Candidate> = Vec::new();
    for profile_id in candidate_order {
        if let Some(candidate) = load_candidate(store, pool_id, *profile_id)? {
            candidates.push(candidate);
        }
    }

    let mut report: AutoAssignReport = AutoAssignReport::default();
    for level in [RatingLevel::Like, RatingLevel::Indifferent] {
        for candidate in &mut candidates {
            for (shift, workshift_type) in &mut shifts {
                let has_slot: bool =
                    shift.current_assignees.len() < usize::try_from(shift.count).unwrap_or(0);
                let fits: bool = has_slot
                    && candidate.owed.is_positive()
                    && shift.hours <= candidate.owed
                    && !shift.current_assignees.contains(&candidate.profile_id)
                    && candidate.rating_for(workshift_type.id) == level
                    && is_available(
                        &candidate.blocks,
                        shift.schedule,
                        shift.start_time,
                        shift.end_time,
                    );
                if !fits {
                    continue;
                }

                let mut draft: RegularWorkshiftDraft = shift.to_draft();
                draft.current_assignees.push(candidate.profile_id);
                *shift = edit_regular_shift(store, shift.id, &draft, now)?;
                candidate.owed -= shift.hours;
                report.assigned.push((shift.id, candidate.profile_id));
            }
        }
    }

    report.unfinished = candidates
        .iter()
        .filter(|candidate| candidate.owed.is_positive())
        .map(|candidate| candidate.profile_id)
        .collect();
    Ok(report)
}

/// Hands out open, unassigned one-off instances in a pool round-robin to
/// members who still owe hours.
///
/// # Returns
///
/// Each instance assigned with its new workshifter.
///
/// # Errors
///
/// Returns an error if the pool does not exist or the store fails.
pub fn random_assign<S: WorkshiftStore>(
    store: &mut S,
    pool_id: PoolId,
    candidate_order: &[ProfileId],
    now: OffsetDateTime,
) -> Result<Vec<(InstanceId, ProfileId)>, CoreError> {
    let pool: WorkshiftPool = require_pool(store, pool_id)?;

    let mut owed: Vec<(ProfileId, Hours)> = Vec::new();
    for profile_id in candidate_order {
        let record: Option<PoolHours> = store.find_pool_hours(*profile_id, pool.id)?;
        if let Some(record) = record.filter(|record| record.unassigned().is_positive()) {
            owed.push((*profile_id, record.unassigned()));
        }
    }

    let open: Vec<WorkshiftInstance> = store.list_instances(
        &InstanceQuery::for_pool(pool.id)
            .open()
            .standalone_only()
            .on_or_after(now.date()),
    )?;

    let mut assigned: Vec<(InstanceId, ProfileId)> = Vec::new();
    let mut turn: usize = 0;
    for mut instance in open.into_iter().filter(|i| i.workshifter.is_none()) {
        owed.retain(|(_, hours)| hours.is_positive());
        if owed.is_empty() {
            break;
        }
        turn %= owed.len();
        let (profile_id, hours) = &mut owed[turn];
        *hours -= instance.hours;

        instance.workshifter = Some(*profile_id);
        store.update_instance(&instance)?;
        log(
            store,
            instance.id,
            &NewLogEntry::simple(LogEntryType::Assigned, Some(*profile_id), now),
        )?;
        assigned.push((instance.id, *profile_id));
        turn += 1;
    }
    Ok(assigned)
}

/// Removes every assignee from every regular shift in a semester, except
/// manager shifts.
///
/// # Returns
///
/// The number of shifts cleared.
///
/// # Errors
///
/// Returns an error if saving a shift fails.
pub fn clear_assignments<S: WorkshiftStore>(
    store: &mut S,
    semester_id: SemesterId,
    now: OffsetDateTime,
) -> Result<usize, CoreError> {
    let mut cleared: usize = 0;
    for pool in store.list_pools(semester_id)? {
        for shift in store.list_regular_shifts(pool.id)? {
            if shift.is_manager_shift || shift.current_assignees.is_empty() {
                continue;
            }
            let mut draft: RegularWorkshiftDraft = shift.to_draft();
            draft.current_assignees.clear();
            edit_regular_shift(store, shift.id, &draft, now)?;
            cleared += 1;
        }
    }
    Ok(cleared)
}
