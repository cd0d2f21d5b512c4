// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Workshift type, regular shift and standalone instance detail queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use farnsworth_domain::{
    AssignmentMode, InstanceInfo, InstanceInfoId, PoolId, ProfileId, RegularShiftId,
    RegularWorkshift, Schedule, VerifyPolicy, WorkshiftType, WorkshiftTypeId,
};

use crate::data_models::{
    flag, hours, parse_code, parse_optional_time, to_u32, weekday_from_index,
};
use crate::diesel_schema::{instance_infos, regular_shift_assignees, regular_shifts, workshift_types};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = workshift_types)]
struct WorkshiftTypeRow {
    workshift_type_id: i64,
    title: String,
    description: String,
    quick_tips: String,
    rateable: i32,
    assignment: String,
}

impl TryFrom<WorkshiftTypeRow> for WorkshiftType {
    type Error = PersistenceError;

    fn try_from(row: WorkshiftTypeRow) -> Result<Self, Self::Error> {
        let assignment: AssignmentMode =
            parse_code(&row.assignment, "workshift_types.assignment")?;
        Ok(Self {
            id: WorkshiftTypeId::new(row.workshift_type_id),
            title: row.title,
            description: row.description,
            quick_tips: row.quick_tips,
            rateable: flag(row.rateable),
            assignment,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = regular_shifts)]
struct RegularShiftRow {
    regular_shift_id: i64,
    workshift_type_id: i64,
    pool_id: i64,
    day: Option<i32>,
    count: i32,
    hours: i64,
    active: i32,
    start_time: Option<String>,
    end_time: Option<String>,
    verify: String,
    addendum: String,
    is_manager_shift: i32,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = instance_infos)]
struct InstanceInfoRow {
    instance_info_id: i64,
    title: String,
    description: String,
    pool_id: i64,
    verify: String,
    start_time: Option<String>,
    end_time: Option<String>,
    week_long: i32,
}

impl TryFrom<InstanceInfoRow> for InstanceInfo {
    type Error = PersistenceError;

    fn try_from(row: InstanceInfoRow) -> Result<Self, Self::Error> {
        let verify: VerifyPolicy = parse_code(&row.verify, "instance_infos.verify")?;
        Ok(Self {
            id: InstanceInfoId::new(row.instance_info_id),
            title: row.title,
            description: row.description,
            pool_id: PoolId::new(row.pool_id),
            verify,
            start_time: parse_optional_time(row.start_time.as_deref())?,
            end_time: parse_optional_time(row.end_time.as_deref())?,
            week_long: flag(row.week_long),
        })
    }
}

fn load_regular_shift(
    conn: &mut SqliteConnection,
    row: RegularShiftRow,
) -> Result<RegularWorkshift, PersistenceError> {
    let current_assignees: Vec<ProfileId> = regular_shift_assignees::table
        .filter(regular_shift_assignees::regular_shift_id.eq(row.regular_shift_id))
        .order(regular_shift_assignees::slot.asc())
        .select(regular_shift_assignees::profile_id)
        .load::<i64>(conn)?
        .into_iter()
        .map(ProfileId::new)
        .collect();

    let schedule: Schedule = match row.day {
        Some(index) => Schedule::Day(weekday_from_index(index)?),
        None => Schedule::WeekLong,
    };
    let verify: VerifyPolicy = parse_code(&row.verify, "regular_shifts.verify")?;

    Ok(RegularWorkshift {
        id: RegularShiftId::new(row.regular_shift_id),
        workshift_type_id: WorkshiftTypeId::new(row.workshift_type_id),
        pool_id: PoolId::new(row.pool_id),
        schedule,
        count: to_u32(row.count, "regular_shifts.count")?,
        hours: hours(row.hours),
        active: flag(row.active),
        current_assignees,
        start_time: parse_optional_time(row.start_time.as_deref())?,
        end_time: parse_optional_time(row.end_time.as_deref())?,
        verify,
        addendum: row.addendum,
        is_manager_shift: flag(row.is_manager_shift),
    })
}

/// Retrieves a workshift type by id.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
pub fn get_workshift_type(
    conn: &mut SqliteConnection,
    id: WorkshiftTypeId,
) -> Result<Option<WorkshiftType>, PersistenceError> {
    workshift_types::table
        .filter(workshift_types::workshift_type_id.eq(id.value()))
        .select(WorkshiftTypeRow::as_select())
        .first(conn)
        .optional()?
        .map(WorkshiftType::try_from)
        .transpose()
}

/// Retrieves a workshift type by its unique title.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
pub fn find_workshift_type(
    conn: &mut SqliteConnection,
    title: &str,
) -> Result<Option<WorkshiftType>, PersistenceError> {
    workshift_types::table
        .filter(workshift_types::title.eq(title))
        .select(WorkshiftTypeRow::as_select())
        .first(conn)
        .optional()?
        .map(WorkshiftType::try_from)
        .transpose()
}

/// Lists every workshift type.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn list_workshift_types(
    conn: &mut SqliteConnection,
) -> Result<Vec<WorkshiftType>, PersistenceError> {
    workshift_types::table
        .order(workshift_types::workshift_type_id.asc())
        .select(WorkshiftTypeRow::as_select())
        .load(conn)?
        .into_iter()
        .map(WorkshiftType::try_from)
        .collect()
}

/// Retrieves a regular shift with its assignees in slot order.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
pub fn get_regular_shift(
    conn: &mut SqliteConnection,
    id: RegularShiftId,
) -> Result<Option<RegularWorkshift>, PersistenceError> {
    let row: Option<RegularShiftRow> = regular_shifts::table
        .filter(regular_shifts::regular_shift_id.eq(id.value()))
        .select(RegularShiftRow::as_select())
        .first(conn)
        .optional()?;
    row.map(|row| load_regular_shift(conn, row)).transpose()
}

/// Lists the regular shifts of a pool.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn list_regular_shifts(
    conn: &mut SqliteConnection,
    pool_id: PoolId,
) -> Result<Vec<RegularWorkshift>, PersistenceError> {
    let rows: Vec<RegularShiftRow> = regular_shifts::table
        .filter(regular_shifts::pool_id.eq(pool_id.value()))
        .order(regular_shifts::regular_shift_id.asc())
        .select(RegularShiftRow::as_select())
        .load(conn)?;
    rows.into_iter()
        .map(|row| load_regular_shift(conn, row))
        .collect()
}

/// Retrieves standalone instance details by id.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
pub fn get_instance_info(
    conn: &mut SqliteConnection,
    id: InstanceInfoId,
) -> Result<Option<InstanceInfo>, PersistenceError> {
    instance_infos::table
        .filter(instance_infos::instance_info_id.eq(id.value()))
        .select(InstanceInfoRow::as_select())
        .first(conn)
        .optional()?
        .map(InstanceInfo::try_from)
        .transpose()
}

/// Returns the ids of the regular shifts and standalone details that
/// belong to a pool.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn pool_sources(
    conn: &mut SqliteConnection,
    pool_id: PoolId,
) -> Result<(Vec<i64>, Vec<i64>), PersistenceError> {
    let shift_ids: Vec<i64> = regular_shifts::table
        .filter(regular_shifts::pool_id.eq(pool_id.value()))
        .select(regular_shifts::regular_shift_id)
        .load(conn)?;
    let info_ids: Vec<i64> = instance_infos::table
        .filter(instance_infos::pool_id.eq(pool_id.value()))
        .select(instance_infos::instance_info_id)
        .load(conn)?;
    Ok((shift_ids, info_ids))
}
