// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Instance and shift log queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use farnsworth::InstanceQuery;
use farnsworth_domain::{
    InstanceId, InstanceInfoId, InstanceSource, LogEntryId, LogEntryType, ProfileId,
    RegularShiftId, SemesterId, ShiftLogEntry, WorkshiftInstance,
};
use tracing::debug;

use crate::data_models::{flag, format_date, hours, parse_code, parse_date, parse_timestamp};
use crate::diesel_schema::{shift_log_entries, workshift_instances};
use crate::error::PersistenceError;
use crate::queries::shifts::pool_sources;

#[derive(Queryable, Selectable)]
#[diesel(table_name = workshift_instances)]
struct InstanceRow {
    instance_id: i64,
    semester_id: i64,
    regular_shift_id: Option<i64>,
    instance_info_id: Option<i64>,
    date: String,
    workshifter_id: Option<i64>,
    liable_id: Option<i64>,
    verifier_id: Option<i64>,
    closed: i32,
    blown: i32,
    intended_hours: i64,
    hours: i64,
}

impl TryFrom<InstanceRow> for WorkshiftInstance {
    type Error = PersistenceError;

    fn try_from(row: InstanceRow) -> Result<Self, Self::Error> {
        let source: InstanceSource = InstanceSource::from_parts(
            row.regular_shift_id.map(RegularShiftId::new),
            row.instance_info_id.map(InstanceInfoId::new),
        )
        .map_err(|err| {
            PersistenceError::ReconstructionError(format!("instance {}: {err}", row.instance_id))
        })?;

        Ok(Self {
            id: InstanceId::new(row.instance_id),
            semester_id: SemesterId::new(row.semester_id),
            source,
            date: parse_date(&row.date)?,
            workshifter: row.workshifter_id.map(ProfileId::new),
            liable: row.liable_id.map(ProfileId::new),
            verifier: row.verifier_id.map(ProfileId::new),
            closed: flag(row.closed),
            blown: flag(row.blown),
            intended_hours: hours(row.intended_hours),
            hours: hours(row.hours),
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = shift_log_entries)]
struct LogEntryRow {
    log_entry_id: i64,
    instance_id: i64,
    person_id: Option<i64>,
    entry_time: String,
    hours: Option<i64>,
    note: String,
    entry_type: String,
}

impl TryFrom<LogEntryRow> for ShiftLogEntry {
    type Error = PersistenceError;

    fn try_from(row: LogEntryRow) -> Result<Self, Self::Error> {
        let entry_type: LogEntryType = parse_code(&row.entry_type, "shift_log_entries.entry_type")?;
        Ok(Self {
            id: LogEntryId::new(row.log_entry_id),
            instance_id: InstanceId::new(row.instance_id),
            person: row.person_id.map(ProfileId::new),
            entry_time: parse_timestamp(&row.entry_time)?,
            hours: row.hours.map(hours),
            note: row.note,
            entry_type,
        })
    }
}

/// Retrieves an instance by id.
///
/// # Errors
///
/// Returns an error if the database query fails. A row backed by both
/// or neither source is reported as a `ReconstructionError`.
pub fn get_instance(
    conn: &mut SqliteConnection,
    id: InstanceId,
) -> Result<Option<WorkshiftInstance>, PersistenceError> {
    workshift_instances::table
        .filter(workshift_instances::instance_id.eq(id.value()))
        .select(InstanceRow::as_select())
        .first(conn)
        .optional()?
        .map(WorkshiftInstance::try_from)
        .transpose()
}

/// Lists instances matching every set filter, ordered by date then id.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn list_instances(
    conn: &mut SqliteConnection,
    filter: &InstanceQuery,
) -> Result<Vec<WorkshiftInstance>, PersistenceError> {
    debug!(?filter, "Listing instances");

    let pool_scope: Option<(Vec<i64>, Vec<i64>)> = match filter.pool_id {
        Some(pool_id) => Some(pool_sources(conn, pool_id)?),
        None => None,
    };

    let mut query: workshift_instances::BoxedQuery<'_, Sqlite> =
        workshift_instances::table.into_boxed();

    if let Some(semester_id) = filter.semester_id {
        query = query.filter(workshift_instances::semester_id.eq(semester_id.value()));
    }
    if let Some(shift_id) = filter.regular_shift_id {
        query = query.filter(workshift_instances::regular_shift_id.eq(shift_id.value()));
    }
    if let Some((shift_ids, info_ids)) = pool_scope {
        query = query.filter(
            workshift_instances::regular_shift_id
                .eq_any(shift_ids)
                .or(workshift_instances::instance_info_id.eq_any(info_ids)),
        );
    }
    if let Some(profile_id) = filter.workshifter {
        query = query.filter(workshift_instances::workshifter_id.eq(profile_id.value()));
    }
    if let Some(closed) = filter.closed {
        query = query.filter(workshift_instances::closed.eq(i32::from(closed)));
    }
    match filter.standalone {
        Some(true) => query = query.filter(workshift_instances::instance_info_id.is_not_null()),
        Some(false) => query = query.filter(workshift_instances::regular_shift_id.is_not_null()),
        None => {}
    }
    if let Some(from) = filter.from_date {
        query = query.filter(workshift_instances::date.ge(format_date(from)?));
    }
    if let Some(to) = filter.to_date {
        query = query.filter(workshift_instances::date.le(format_date(to)?));
    }

    query
        .order((workshift_instances::date.asc(), workshift_instances::instance_id.asc()))
        .select(InstanceRow::as_select())
        .load(conn)?
        .into_iter()
        .map(WorkshiftInstance::try_from)
        .collect()
}

/// Lists the log of an instance, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn list_log_entries(
    conn: &mut SqliteConnection,
    instance_id: InstanceId,
) -> Result<Vec<ShiftLogEntry>, PersistenceError> {
    shift_log_entries::table
        .filter(shift_log_entries::instance_id.eq(instance_id.value()))
        .order((
            shift_log_entries::entry_time.desc(),
            shift_log_entries::log_entry_id.desc(),
        ))
        .select(LogEntryRow::as_select())
        .load(conn)?
        .into_iter()
        .map(ShiftLogEntry::try_from)
        .collect()
}
