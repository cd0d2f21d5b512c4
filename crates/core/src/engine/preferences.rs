// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Member time blocks and workshift type ratings.

use super::{require_profile, require_semester, require_workshift_type};
use crate::error::CoreError;
use crate::store::WorkshiftStore;
use farnsworth_domain::{
    DomainError, ProfileId, RatingId, RatingLevel, Semester, TimeBlockId, TimeBlockSpec,
    WorkshiftProfile, WorkshiftTypeId, validate_time_block,
};
use time::OffsetDateTime;

/// Replaces a profile's time blocks, ratings and note.
///
/// Blocks and ratings are drawn from shared catalogs, so identical entries
/// across members point at the same catalog row.
///
/// # Arguments
///
/// * `store` - The store to write to
/// * `profile_id` - The profile being edited
/// * `blocks` - The member's busy and preferred blocks
/// * `ratings` - The member's rating per workshift type
/// * `note` - Free text for the workshift manager
/// * `can_manage` - Whether the caller may edit after preferences close
/// * `now` - The current time
///
/// # Errors
///
/// Returns an error if preferences are closed to the caller, a block is
/// malformed, or a rated type does not exist.
pub fn set_preferences<S: WorkshiftStore>(
    store: &mut S,
    profile_id: ProfileId,
    blocks: &[TimeBlockSpec],
    ratings: &[(WorkshiftTypeId, RatingLevel)],
    note: &str,
    can_manage: bool,
    now: OffsetDateTime,
) -> Result<WorkshiftProfile, CoreError> {
    let mut profile: WorkshiftProfile = require_profile(store, profile_id)?;
    let semester: Semester = require_semester(store, profile.semester_id)?;
    if !semester.preferences_open && !can_manage {
        return Err(DomainError::PreferencesClosed(semester.id).into());
    }

    let mut block_ids: Vec<TimeBlockId> = Vec::new();
    for spec in blocks {
        validate_time_block(spec)?;
        let block_id: TimeBlockId = store.get_or_create_time_block(spec)?.id;
        if !block_ids.contains(&block_id) {
            block_ids.push(block_id);
        }
    }

    let mut rating_ids: Vec<RatingId> = Vec::new();
    for (workshift_type_id, level) in ratings {
        require_workshift_type(store, *workshift_type_id)?;
        let rating_id: RatingId = store.get_or_create_rating(*level, *workshift_type_id)?.id;
        if !rating_ids.contains(&rating_id) {
            rating_ids.push(rating_id);
        }
    }

    profile.time_blocks = block_ids;
    profile.ratings = rating_ids;
    profile.note = note.to_string();
    if profile.preference_save_time.is_none() {
        profile.preference_save_time = Some(now);
    }
    store.update_profile(&profile)?;
    Ok(profile)
}
