// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use farnsworth_domain::{
    MemberId, ProfileId, RatingId, RatingLevel, SemesterId, TimeBlockId, TimeBlockSpec,
    WorkshiftProfile, WorkshiftTypeId,
};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{format_time, format_timestamp, weekday_index};
use crate::diesel_schema::{profile_ratings, profile_time_blocks, profiles, ratings, time_blocks};
use crate::error::PersistenceError;

fn clear_links(conn: &mut SqliteConnection, profile_id: i64) -> Result<(), PersistenceError> {
    diesel::delete(profile_time_blocks::table.filter(profile_time_blocks::profile_id.eq(profile_id)))
        .execute(conn)?;
    diesel::delete(profile_ratings::table.filter(profile_ratings::profile_id.eq(profile_id)))
        .execute(conn)?;
    Ok(())
}

/// Inserts an empty profile.
///
/// # Errors
///
/// Returns an error if the insert fails, including a second profile for
/// the member in the semester.
pub fn insert_profile(
    conn: &mut SqliteConnection,
    member_id: MemberId,
    semester_id: SemesterId,
) -> Result<ProfileId, PersistenceError> {
    diesel::insert_into(profiles::table)
        .values((
            profiles::member_id.eq(member_id.value()),
            profiles::semester_id.eq(semester_id.value()),
            profiles::note.eq(""),
        ))
        .execute(conn)?;
    let profile_id: i64 = conn.get_last_insert_rowid()?;
    info!(profile_id, member_id = member_id.value(), semester_id = semester_id.value(), "Inserted profile");
    Ok(ProfileId::new(profile_id))
}

/// Writes the note, save time and preference links of a profile.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_profile(
    conn: &mut SqliteConnection,
    profile: &WorkshiftProfile,
) -> Result<(), PersistenceError> {
    let id: i64 = profile.id.value();
    let saved: Option<String> = profile.preference_save_time.map(format_timestamp).transpose()?;
    diesel::update(profiles::table.filter(profiles::profile_id.eq(id)))
        .set((profiles::note.eq(&profile.note), profiles::preference_save_time.eq(saved)))
        .execute(conn)?;

    clear_links(conn, id)?;
    for block in &profile.time_blocks {
        diesel::insert_into(profile_time_blocks::table)
            .values((
                profile_time_blocks::profile_id.eq(id),
                profile_time_blocks::time_block_id.eq(block.value()),
            ))
            .execute(conn)?;
    }
    for rating in &profile.ratings {
        diesel::insert_into(profile_ratings::table)
            .values((
                profile_ratings::profile_id.eq(id),
                profile_ratings::rating_id.eq(rating.value()),
            ))
            .execute(conn)?;
    }
    debug!(profile_id = id, blocks = profile.time_blocks.len(), ratings = profile.ratings.len(), "Updated profile");
    Ok(())
}

/// Deletes a profile and its preference links.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_profile(conn: &mut SqliteConnection, id: ProfileId) -> Result<(), PersistenceError> {
    clear_links(conn, id.value())?;
    diesel::delete(profiles::table.filter(profiles::profile_id.eq(id.value()))).execute(conn)?;
    Ok(())
}

/// Adds a block to the shared catalog.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_time_block(
    conn: &mut SqliteConnection,
    spec: &TimeBlockSpec,
) -> Result<TimeBlockId, PersistenceError> {
    diesel::insert_into(time_blocks::table)
        .values((
            time_blocks::preference.eq(spec.preference.code()),
            time_blocks::day.eq(weekday_index(spec.day)),
            time_blocks::start_time.eq(format_time(spec.start_time)?),
            time_blocks::end_time.eq(format_time(spec.end_time)?),
        ))
        .execute(conn)?;
    Ok(TimeBlockId::new(conn.get_last_insert_rowid()?))
}

/// Adds a rating to the shared catalog.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_rating(
    conn: &mut SqliteConnection,
    rating: RatingLevel,
    workshift_type_id: WorkshiftTypeId,
) -> Result<RatingId, PersistenceError> {
    diesel::insert_into(ratings::table)
        .values((
            ratings::rating.eq(rating.code()),
            ratings::workshift_type_id.eq(workshift_type_id.value()),
        ))
        .execute(conn)?;
    Ok(RatingId::new(conn.get_last_insert_rowid()?))
}
