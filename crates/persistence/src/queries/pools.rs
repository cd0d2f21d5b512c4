// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pool and pool-hours queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use farnsworth_domain::{
    ManagerId, PoolHours, PoolHoursId, PoolId, ProfileId, SemesterId, WorkshiftPool,
};

use crate::data_models::{flag, hours, parse_optional_date, to_u32};
use crate::diesel_schema::{pool_hours, pool_managers, pools};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = pools)]
struct PoolRow {
    pool_id: i64,
    semester_id: i64,
    title: String,
    sign_out_cutoff: i32,
    verify_cutoff: i32,
    hours: i64,
    weeks_per_period: i32,
    first_fine_date: Option<String>,
    second_fine_date: Option<String>,
    third_fine_date: Option<String>,
    any_blown: i32,
    self_verify: i32,
    is_primary: i32,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = pool_hours)]
struct PoolHoursRow {
    pool_hours_id: i64,
    profile_id: i64,
    pool_id: i64,
    hours: i64,
    assigned_hours: i64,
    standing: i64,
    hour_adjustment: i64,
    last_updated: Option<String>,
    first_date_standing: i64,
    second_date_standing: i64,
    third_date_standing: i64,
}

impl TryFrom<PoolHoursRow> for PoolHours {
    type Error = PersistenceError;

    fn try_from(row: PoolHoursRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PoolHoursId::new(row.pool_hours_id),
            profile_id: ProfileId::new(row.profile_id),
            pool_id: PoolId::new(row.pool_id),
            hours: hours(row.hours),
            assigned_hours: hours(row.assigned_hours),
            standing: hours(row.standing),
            hour_adjustment: hours(row.hour_adjustment),
            last_updated: parse_optional_date(row.last_updated.as_deref())?,
            first_date_standing: hours(row.first_date_standing),
            second_date_standing: hours(row.second_date_standing),
            third_date_standing: hours(row.third_date_standing),
        })
    }
}

fn load_pool(conn: &mut SqliteConnection, row: PoolRow) -> Result<WorkshiftPool, PersistenceError> {
    let managers: Vec<ManagerId> = pool_managers::table
        .filter(pool_managers::pool_id.eq(row.pool_id))
        .order(pool_managers::manager_id.asc())
        .select(pool_managers::manager_id)
        .load::<i64>(conn)?
        .into_iter()
        .map(ManagerId::new)
        .collect();

    Ok(WorkshiftPool {
        id: PoolId::new(row.pool_id),
        semester_id: SemesterId::new(row.semester_id),
        title: row.title,
        managers,
        sign_out_cutoff: to_u32(row.sign_out_cutoff, "pools.sign_out_cutoff")?,
        verify_cutoff: to_u32(row.verify_cutoff, "pools.verify_cutoff")?,
        hours: hours(row.hours),
        weeks_per_period: to_u32(row.weeks_per_period, "pools.weeks_per_period")?,
        first_fine_date: parse_optional_date(row.first_fine_date.as_deref())?,
        second_fine_date: parse_optional_date(row.second_fine_date.as_deref())?,
        third_fine_date: parse_optional_date(row.third_fine_date.as_deref())?,
        any_blown: flag(row.any_blown),
        self_verify: flag(row.self_verify),
        is_primary: flag(row.is_primary),
    })
}

/// Retrieves a pool by id.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
pub fn get_pool(
    conn: &mut SqliteConnection,
    id: PoolId,
) -> Result<Option<WorkshiftPool>, PersistenceError> {
    let row: Option<PoolRow> = pools::table
        .filter(pools::pool_id.eq(id.value()))
        .select(PoolRow::as_select())
        .first(conn)
        .optional()?;
    row.map(|row| load_pool(conn, row)).transpose()
}

/// Lists a semester's pools, the primary pool first and the rest by title.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn list_pools(
    conn: &mut SqliteConnection,
    semester_id: SemesterId,
) -> Result<Vec<WorkshiftPool>, PersistenceError> {
    let rows: Vec<PoolRow> = pools::table
        .filter(pools::semester_id.eq(semester_id.value()))
        .order((pools::is_primary.desc(), pools::title.asc()))
        .select(PoolRow::as_select())
        .load(conn)?;
    rows.into_iter().map(|row| load_pool(conn, row)).collect()
}

/// Retrieves an hour record by id.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
pub fn get_pool_hours(
    conn: &mut SqliteConnection,
    id: PoolHoursId,
) -> Result<Option<PoolHours>, PersistenceError> {
    pool_hours::table
        .filter(pool_hours::pool_hours_id.eq(id.value()))
        .select(PoolHoursRow::as_select())
        .first(conn)
        .optional()?
        .map(PoolHours::try_from)
        .transpose()
}

/// Retrieves the hour record of a profile in a pool.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
pub fn find_pool_hours(
    conn: &mut SqliteConnection,
    profile_id: ProfileId,
    pool_id: PoolId,
) -> Result<Option<PoolHours>, PersistenceError> {
    pool_hours::table
        .filter(pool_hours::profile_id.eq(profile_id.value()))
        .filter(pool_hours::pool_id.eq(pool_id.value()))
        .select(PoolHoursRow::as_select())
        .first(conn)
        .optional()?
        .map(PoolHours::try_from)
        .transpose()
}

/// Lists the hour records of a pool.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn list_pool_hours_for_pool(
    conn: &mut SqliteConnection,
    pool_id: PoolId,
) -> Result<Vec<PoolHours>, PersistenceError> {
    pool_hours::table
        .filter(pool_hours::pool_id.eq(pool_id.value()))
        .order(pool_hours::pool_hours_id.asc())
        .select(PoolHoursRow::as_select())
        .load(conn)?
        .into_iter()
        .map(PoolHours::try_from)
        .collect()
}

/// Lists the hour records of a profile.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn list_pool_hours_for_profile(
    conn: &mut SqliteConnection,
    profile_id: ProfileId,
) -> Result<Vec<PoolHours>, PersistenceError> {
    pool_hours::table
        .filter(pool_hours::profile_id.eq(profile_id.value()))
        .order(pool_hours::pool_hours_id.asc())
        .select(PoolHoursRow::as_select())
        .load(conn)?
        .into_iter()
        .map(PoolHours::try_from)
        .collect()
}
