// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use farnsworth_domain::{MemberId, Season, Semester, SemesterId};
use tracing::debug;

use crate::data_models::{flag, parse_date, to_u16};
use crate::diesel_schema::{current_semester, semester_workshift_managers, semesters};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = semesters)]
struct SemesterRow {
    semester_id: i64,
    season: String,
    year: i32,
    rate_cents: Option<i64>,
    policy: Option<String>,
    start_date: String,
    end_date: String,
    preferences_open: i32,
}

fn load_semester(
    conn: &mut SqliteConnection,
    row: SemesterRow,
) -> Result<Semester, PersistenceError> {
    let workshift_managers: Vec<MemberId> = semester_workshift_managers::table
        .filter(semester_workshift_managers::semester_id.eq(row.semester_id))
        .order(semester_workshift_managers::member_id.asc())
        .select(semester_workshift_managers::member_id)
        .load::<i64>(conn)?
        .into_iter()
        .map(MemberId::new)
        .collect();

    let season: Season = row.season.parse().map_err(|_| {
        PersistenceError::ReconstructionError(format!("bad season '{}'", row.season))
    })?;

    Ok(Semester {
        id: SemesterId::new(row.semester_id),
        season,
        year: to_u16(row.year, "semesters.year")?,
        rate_cents: row.rate_cents,
        policy: row.policy,
        start_date: parse_date(&row.start_date)?,
        end_date: parse_date(&row.end_date)?,
        preferences_open: flag(row.preferences_open),
        workshift_managers,
    })
}

/// Returns the current semester reference.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn current_semester_id(
    conn: &mut SqliteConnection,
) -> Result<Option<SemesterId>, PersistenceError> {
    let id: Option<i64> = current_semester::table
        .filter(current_semester::id.eq(1))
        .select(current_semester::semester_id)
        .first::<Option<i64>>(conn)
        .optional()?
        .flatten();
    Ok(id.map(SemesterId::new))
}

/// Retrieves a semester by id.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
pub fn get_semester(
    conn: &mut SqliteConnection,
    id: SemesterId,
) -> Result<Option<Semester>, PersistenceError> {
    debug!(semester_id = id.value(), "Loading semester");
    let row: Option<SemesterRow> = semesters::table
        .filter(semesters::semester_id.eq(id.value()))
        .select(SemesterRow::as_select())
        .first(conn)
        .optional()?;
    row.map(|row| load_semester(conn, row)).transpose()
}

/// Retrieves a semester by season and year.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
pub fn find_semester(
    conn: &mut SqliteConnection,
    season: Season,
    year: u16,
) -> Result<Option<Semester>, PersistenceError> {
    let row: Option<SemesterRow> = semesters::table
        .filter(semesters::season.eq(season.code()))
        .filter(semesters::year.eq(i32::from(year)))
        .select(SemesterRow::as_select())
        .first(conn)
        .optional()?;
    row.map(|row| load_semester(conn, row)).transpose()
}

/// Lists every semester, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn list_semesters(conn: &mut SqliteConnection) -> Result<Vec<Semester>, PersistenceError> {
    let rows: Vec<SemesterRow> = semesters::table
        .order((semesters::start_date.desc(), semesters::semester_id.desc()))
        .select(SemesterRow::as_select())
        .load(conn)?;
    rows.into_iter().map(|row| load_semester(conn, row)).collect()
}
