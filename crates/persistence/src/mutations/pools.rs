// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use farnsworth_domain::{
    ManagerId, NewPool, NewPoolHours, PoolHours, PoolHoursId, PoolId, WorkshiftPool,
};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{format_optional_date, from_u32, to_flag};
use crate::diesel_schema::{pool_hours, pool_managers, pools};
use crate::error::PersistenceError;

fn replace_pool_managers(
    conn: &mut SqliteConnection,
    pool_id: i64,
    managers: &[ManagerId],
) -> Result<(), PersistenceError> {
    diesel::delete(pool_managers::table.filter(pool_managers::pool_id.eq(pool_id)))
        .execute(conn)?;
    for manager in managers {
        diesel::insert_into(pool_managers::table)
            .values((
                pool_managers::pool_id.eq(pool_id),
                pool_managers::manager_id.eq(manager.value()),
            ))
            .execute(conn)?;
    }
    Ok(())
}

/// Inserts a pool and its manager links.
///
/// # Errors
///
/// Returns an error if the insert fails, including a duplicate title in
/// the semester.
pub fn insert_pool(conn: &mut SqliteConnection, pool: &NewPool) -> Result<PoolId, PersistenceError> {
    let draft = &pool.draft;
    diesel::insert_into(pools::table)
        .values((
            pools::semester_id.eq(pool.semester_id.value()),
            pools::title.eq(&draft.title),
            pools::sign_out_cutoff.eq(from_u32(draft.sign_out_cutoff, "pools.sign_out_cutoff")?),
            pools::verify_cutoff.eq(from_u32(draft.verify_cutoff, "pools.verify_cutoff")?),
            pools::hours.eq(draft.hours.hundredths()),
            pools::weeks_per_period.eq(from_u32(draft.weeks_per_period, "pools.weeks_per_period")?),
            pools::first_fine_date.eq(format_optional_date(draft.first_fine_date)?),
            pools::second_fine_date.eq(format_optional_date(draft.second_fine_date)?),
            pools::third_fine_date.eq(format_optional_date(draft.third_fine_date)?),
            pools::any_blown.eq(to_flag(draft.any_blown)),
            pools::self_verify.eq(to_flag(draft.self_verify)),
            pools::is_primary.eq(to_flag(pool.is_primary)),
        ))
        .execute(conn)?;
    let pool_id: i64 = conn.get_last_insert_rowid()?;
    replace_pool_managers(conn, pool_id, &draft.managers)?;

    info!(pool_id, title = %draft.title, "Inserted pool");
    Ok(PoolId::new(pool_id))
}

/// Writes every field of a pool, including its managers.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_pool(conn: &mut SqliteConnection, pool: &WorkshiftPool) -> Result<(), PersistenceError> {
    let id: i64 = pool.id.value();
    diesel::update(pools::table.filter(pools::pool_id.eq(id)))
        .set((
            pools::title.eq(&pool.title),
            pools::sign_out_cutoff.eq(from_u32(pool.sign_out_cutoff, "pools.sign_out_cutoff")?),
            pools::verify_cutoff.eq(from_u32(pool.verify_cutoff, "pools.verify_cutoff")?),
            pools::hours.eq(pool.hours.hundredths()),
            pools::weeks_per_period.eq(from_u32(pool.weeks_per_period, "pools.weeks_per_period")?),
            pools::first_fine_date.eq(format_optional_date(pool.first_fine_date)?),
            pools::second_fine_date.eq(format_optional_date(pool.second_fine_date)?),
            pools::third_fine_date.eq(format_optional_date(pool.third_fine_date)?),
            pools::any_blown.eq(to_flag(pool.any_blown)),
            pools::self_verify.eq(to_flag(pool.self_verify)),
            pools::is_primary.eq(to_flag(pool.is_primary)),
        ))
        .execute(conn)?;
    replace_pool_managers(conn, id, &pool.managers)?;
    debug!(pool_id = id, "Updated pool");
    Ok(())
}

/// Deletes a pool row and its manager links.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_pool(conn: &mut SqliteConnection, id: PoolId) -> Result<(), PersistenceError> {
    replace_pool_managers(conn, id.value(), &[])?;
    diesel::delete(pools::table.filter(pools::pool_id.eq(id.value()))).execute(conn)?;
    info!(pool_id = id.value(), "Deleted pool");
    Ok(())
}

/// Inserts an hour record with zeroed date standings.
///
/// # Errors
///
/// Returns an error if the insert fails, including a second record for
/// the same profile and pool.
pub fn insert_pool_hours(
    conn: &mut SqliteConnection,
    record: &NewPoolHours,
) -> Result<PoolHoursId, PersistenceError> {
    diesel::insert_into(pool_hours::table)
        .values((
            pool_hours::profile_id.eq(record.profile_id.value()),
            pool_hours::pool_id.eq(record.pool_id.value()),
            pool_hours::hours.eq(record.hours.hundredths()),
            pool_hours::hour_adjustment.eq(record.hour_adjustment.hundredths()),
            pool_hours::standing.eq(record.standing.hundredths()),
        ))
        .execute(conn)?;
    Ok(PoolHoursId::new(conn.get_last_insert_rowid()?))
}

/// Writes every field of an hour record.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_pool_hours(
    conn: &mut SqliteConnection,
    record: &PoolHours,
) -> Result<(), PersistenceError> {
    diesel::update(pool_hours::table.filter(pool_hours::pool_hours_id.eq(record.id.value())))
        .set((
            pool_hours::hours.eq(record.hours.hundredths()),
            pool_hours::assigned_hours.eq(record.assigned_hours.hundredths()),
            pool_hours::standing.eq(record.standing.hundredths()),
            pool_hours::hour_adjustment.eq(record.hour_adjustment.hundredths()),
            pool_hours::last_updated.eq(format_optional_date(record.last_updated)?),
            pool_hours::first_date_standing.eq(record.first_date_standing.hundredths()),
            pool_hours::second_date_standing.eq(record.second_date_standing.hundredths()),
            pool_hours::third_date_standing.eq(record.third_date_standing.hundredths()),
        ))
        .execute(conn)?;
    Ok(())
}

/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_pool_hours(conn: &mut SqliteConnection, id: PoolHoursId) -> Result<(), PersistenceError> {
    diesel::delete(pool_hours::table.filter(pool_hours::pool_hours_id.eq(id.value())))
        .execute(conn)?;
    Ok(())
}
