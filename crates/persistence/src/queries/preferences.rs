// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Profile and preference catalog queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use farnsworth_domain::{
    MemberId, Preference, ProfileId, RatingId, RatingLevel, SemesterId, TimeBlock, TimeBlockId,
    TimeBlockSpec, WorkshiftProfile, WorkshiftRating, WorkshiftTypeId,
};

use crate::data_models::{
    format_time, parse_time, parse_timestamp, weekday_from_index, weekday_index,
};
use crate::diesel_schema::{profile_ratings, profile_time_blocks, profiles, ratings, time_blocks};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = profiles)]
struct ProfileRow {
    profile_id: i64,
    member_id: i64,
    semester_id: i64,
    note: String,
    preference_save_time: Option<String>,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = time_blocks)]
struct TimeBlockRow {
    time_block_id: i64,
    preference: i32,
    day: i32,
    start_time: String,
    end_time: String,
}

impl TryFrom<TimeBlockRow> for TimeBlock {
    type Error = PersistenceError;

    fn try_from(row: TimeBlockRow) -> Result<Self, Self::Error> {
        let preference: Preference = Preference::from_code(row.preference)
            .map_err(|err| PersistenceError::ReconstructionError(err.to_string()))?;
        Ok(Self {
            id: TimeBlockId::new(row.time_block_id),
            preference,
            day: weekday_from_index(row.day)?,
            start_time: parse_time(&row.start_time)?,
            end_time: parse_time(&row.end_time)?,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = ratings)]
struct RatingRow {
    rating_id: i64,
    rating: i32,
    workshift_type_id: i64,
}

impl TryFrom<RatingRow> for WorkshiftRating {
    type Error = PersistenceError;

    fn try_from(row: RatingRow) -> Result<Self, Self::Error> {
        let rating: RatingLevel = RatingLevel::from_code(row.rating)
            .map_err(|err| PersistenceError::ReconstructionError(err.to_string()))?;
        Ok(Self {
            id: RatingId::new(row.rating_id),
            rating,
            workshift_type_id: WorkshiftTypeId::new(row.workshift_type_id),
        })
    }
}

fn load_profile(
    conn: &mut SqliteConnection,
    row: ProfileRow,
) -> Result<WorkshiftProfile, PersistenceError> {
    let time_blocks: Vec<TimeBlockId> = profile_time_blocks::table
        .filter(profile_time_blocks::profile_id.eq(row.profile_id))
        .order(profile_time_blocks::time_block_id.asc())
        .select(profile_time_blocks::time_block_id)
        .load::<i64>(conn)?
        .into_iter()
        .map(TimeBlockId::new)
        .collect();
    let ratings: Vec<RatingId> = profile_ratings::table
        .filter(profile_ratings::profile_id.eq(row.profile_id))
        .order(profile_ratings::rating_id.asc())
        .select(profile_ratings::rating_id)
        .load::<i64>(conn)?
        .into_iter()
        .map(RatingId::new)
        .collect();

    Ok(WorkshiftProfile {
        id: ProfileId::new(row.profile_id),
        member_id: MemberId::new(row.member_id),
        semester_id: SemesterId::new(row.semester_id),
        note: row.note,
        preference_save_time: row
            .preference_save_time
            .as_deref()
            .map(parse_timestamp)
            .transpose()?,
        time_blocks,
        ratings,
    })
}

/// Retrieves a profile with its preference links.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
pub fn get_profile(
    conn: &mut SqliteConnection,
    id: ProfileId,
) -> Result<Option<WorkshiftProfile>, PersistenceError> {
    let row: Option<ProfileRow> = profiles::table
        .filter(profiles::profile_id.eq(id.value()))
        .select(ProfileRow::as_select())
        .first(conn)
        .optional()?;
    row.map(|row| load_profile(conn, row)).transpose()
}

/// Retrieves a member's profile in a semester.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
pub fn find_profile(
    conn: &mut SqliteConnection,
    member_id: MemberId,
    semester_id: SemesterId,
) -> Result<Option<WorkshiftProfile>, PersistenceError> {
    let row: Option<ProfileRow> = profiles::table
        .filter(profiles::member_id.eq(member_id.value()))
        .filter(profiles::semester_id.eq(semester_id.value()))
        .select(ProfileRow::as_select())
        .first(conn)
        .optional()?;
    row.map(|row| load_profile(conn, row)).transpose()
}

/// Lists the profiles of a semester.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn list_profiles(
    conn: &mut SqliteConnection,
    semester_id: SemesterId,
) -> Result<Vec<WorkshiftProfile>, PersistenceError> {
    let rows: Vec<ProfileRow> = profiles::table
        .filter(profiles::semester_id.eq(semester_id.value()))
        .order(profiles::profile_id.asc())
        .select(ProfileRow::as_select())
        .load(conn)?;
    rows.into_iter().map(|row| load_profile(conn, row)).collect()
}

/// Loads catalog time blocks by id.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn get_time_blocks(
    conn: &mut SqliteConnection,
    ids: &[TimeBlockId],
) -> Result<Vec<TimeBlock>, PersistenceError> {
    let raw: Vec<i64> = ids.iter().map(|id| id.value()).collect();
    time_blocks::table
        .filter(time_blocks::time_block_id.eq_any(raw))
        .order(time_blocks::time_block_id.asc())
        .select(TimeBlockRow::as_select())
        .load(conn)?
        .into_iter()
        .map(TimeBlock::try_from)
        .collect()
}

/// Looks up the catalog block with exactly these fields.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
pub fn find_time_block(
    conn: &mut SqliteConnection,
    spec: &TimeBlockSpec,
) -> Result<Option<TimeBlock>, PersistenceError> {
    time_blocks::table
        .filter(time_blocks::preference.eq(spec.preference.code()))
        .filter(time_blocks::day.eq(weekday_index(spec.day)))
        .filter(time_blocks::start_time.eq(format_time(spec.start_time)?))
        .filter(time_blocks::end_time.eq(format_time(spec.end_time)?))
        .select(TimeBlockRow::as_select())
        .first(conn)
        .optional()?
        .map(TimeBlock::try_from)
        .transpose()
}

/// Loads catalog ratings by id.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn get_ratings(
    conn: &mut SqliteConnection,
    ids: &[RatingId],
) -> Result<Vec<WorkshiftRating>, PersistenceError> {
    let raw: Vec<i64> = ids.iter().map(|id| id.value()).collect();
    ratings::table
        .filter(ratings::rating_id.eq_any(raw))
        .order(ratings::rating_id.asc())
        .select(RatingRow::as_select())
        .load(conn)?
        .into_iter()
        .map(WorkshiftRating::try_from)
        .collect()
}

/// Looks up the catalog rating for a (level, type) pair.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
pub fn find_rating(
    conn: &mut SqliteConnection,
    rating: RatingLevel,
    workshift_type_id: WorkshiftTypeId,
) -> Result<Option<WorkshiftRating>, PersistenceError> {
    ratings::table
        .filter(ratings::rating.eq(rating.code()))
        .filter(ratings::workshift_type_id.eq(workshift_type_id.value()))
        .select(RatingRow::as_select())
        .first(conn)
        .optional()?
        .map(WorkshiftRating::try_from)
        .transpose()
}
