// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use farnsworth_domain::{MemberId, NewSemester, Semester, SemesterId};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{format_date, to_flag};
use crate::diesel_schema::{current_semester, semester_workshift_managers, semesters};
use crate::error::PersistenceError;

fn replace_workshift_managers(
    conn: &mut SqliteConnection,
    semester_id: i64,
    members: &[MemberId],
) -> Result<(), PersistenceError> {
    diesel::delete(
        semester_workshift_managers::table
            .filter(semester_workshift_managers::semester_id.eq(semester_id)),
    )
    .execute(conn)?;
    for member in members {
        diesel::insert_into(semester_workshift_managers::table)
            .values((
                semester_workshift_managers::semester_id.eq(semester_id),
                semester_workshift_managers::member_id.eq(member.value()),
            ))
            .execute(conn)?;
    }
    Ok(())
}

/// Inserts a semester with preferences open.
///
/// # Returns
///
/// The generated semester id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_semester(
    conn: &mut SqliteConnection,
    semester: &NewSemester,
    workshift_managers: &[MemberId],
) -> Result<SemesterId, PersistenceError> {
    diesel::insert_into(semesters::table)
        .values((
            semesters::season.eq(semester.season.code()),
            semesters::year.eq(i32::from(semester.year)),
            semesters::rate_cents.eq(semester.rate_cents),
            semesters::policy.eq(semester.policy.as_deref()),
            semesters::start_date.eq(format_date(semester.start_date)?),
            semesters::end_date.eq(format_date(semester.end_date)?),
            semesters::preferences_open.eq(1),
        ))
        .execute(conn)?;
    let semester_id: i64 = conn.get_last_insert_rowid()?;
    replace_workshift_managers(conn, semester_id, workshift_managers)?;

    info!(semester_id, season = semester.season.code(), year = semester.year, "Inserted semester");
    Ok(SemesterId::new(semester_id))
}

/// Writes every mutable field of a semester, including its workshift
/// managers.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_semester(
    conn: &mut SqliteConnection,
    semester: &Semester,
) -> Result<(), PersistenceError> {
    let id: i64 = semester.id.value();
    diesel::update(semesters::table.filter(semesters::semester_id.eq(id)))
        .set((
            semesters::rate_cents.eq(semester.rate_cents),
            semesters::policy.eq(semester.policy.as_deref()),
            semesters::start_date.eq(format_date(semester.start_date)?),
            semesters::end_date.eq(format_date(semester.end_date)?),
            semesters::preferences_open.eq(to_flag(semester.preferences_open)),
        ))
        .execute(conn)?;
    replace_workshift_managers(conn, id, &semester.workshift_managers)?;
    debug!(semester_id = id, "Updated semester");
    Ok(())
}

/// Deletes a semester row and its manager links.
///
/// # Errors
///
/// Returns an error if the delete fails, including when rows still
/// reference the semester.
pub fn delete_semester(conn: &mut SqliteConnection, id: SemesterId) -> Result<(), PersistenceError> {
    replace_workshift_managers(conn, id.value(), &[])?;
    diesel::delete(semesters::table.filter(semesters::semester_id.eq(id.value())))
        .execute(conn)?;
    info!(semester_id = id.value(), "Deleted semester");
    Ok(())
}

/// Points the current semester reference at `semester_id`.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_current_semester(
    conn: &mut SqliteConnection,
    semester_id: Option<SemesterId>,
) -> Result<(), PersistenceError> {
    diesel::update(current_semester::table.filter(current_semester::id.eq(1)))
        .set(current_semester::semester_id.eq(semester_id.map(SemesterId::value)))
        .execute(conn)?;
    debug!(?semester_id, "Set current semester");
    Ok(())
}
