// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use farnsworth_domain::{
    InstanceId, InstanceSource, LogEntryId, NewInstance, NewLogEntry, ProfileId, WorkshiftInstance,
};
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::{format_date, format_timestamp, to_flag};
use crate::diesel_schema::{shift_log_entries, workshift_instances};
use crate::error::PersistenceError;

/// Splits a source into its two nullable storage columns.
fn source_columns(source: InstanceSource) -> (Option<i64>, Option<i64>) {
    match source {
        InstanceSource::Recurring(shift) => (Some(shift.value()), None),
        InstanceSource::Standalone(info) => (None, Some(info.value())),
    }
}

/// Inserts an open instance whose intended and current hours are equal.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_instance(
    conn: &mut SqliteConnection,
    instance: &NewInstance,
) -> Result<InstanceId, PersistenceError> {
    let (regular_shift_id, instance_info_id): (Option<i64>, Option<i64>) =
        source_columns(instance.source);
    diesel::insert_into(workshift_instances::table)
        .values((
            workshift_instances::semester_id.eq(instance.semester_id.value()),
            workshift_instances::regular_shift_id.eq(regular_shift_id),
            workshift_instances::instance_info_id.eq(instance_info_id),
            workshift_instances::date.eq(format_date(instance.date)?),
            workshift_instances::workshifter_id.eq(instance.workshifter.map(ProfileId::value)),
            workshift_instances::closed.eq(0),
            workshift_instances::blown.eq(0),
            workshift_instances::intended_hours.eq(instance.hours.hundredths()),
            workshift_instances::hours.eq(instance.hours.hundredths()),
        ))
        .execute(conn)?;
    let id: i64 = conn.get_last_insert_rowid()?;
    debug!(instance_id = id, date = %instance.date, "Inserted instance");
    Ok(InstanceId::new(id))
}

/// Writes every field of an instance.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_instance(
    conn: &mut SqliteConnection,
    instance: &WorkshiftInstance,
) -> Result<(), PersistenceError> {
    let (regular_shift_id, instance_info_id): (Option<i64>, Option<i64>) =
        source_columns(instance.source);
    diesel::update(
        workshift_instances::table.filter(workshift_instances::instance_id.eq(instance.id.value())),
    )
    .set((
        workshift_instances::semester_id.eq(instance.semester_id.value()),
        workshift_instances::regular_shift_id.eq(regular_shift_id),
        workshift_instances::instance_info_id.eq(instance_info_id),
        workshift_instances::date.eq(format_date(instance.date)?),
        workshift_instances::workshifter_id.eq(instance.workshifter.map(ProfileId::value)),
        workshift_instances::liable_id.eq(instance.liable.map(ProfileId::value)),
        workshift_instances::verifier_id.eq(instance.verifier.map(ProfileId::value)),
        workshift_instances::closed.eq(to_flag(instance.closed)),
        workshift_instances::blown.eq(to_flag(instance.blown)),
        workshift_instances::intended_hours.eq(instance.intended_hours.hundredths()),
        workshift_instances::hours.eq(instance.hours.hundredths()),
    ))
    .execute(conn)?;
    Ok(())
}

/// # Errors
///
/// Returns an error if the delete fails, including when log entries still
/// reference the instance.
pub fn delete_instance(conn: &mut SqliteConnection, id: InstanceId) -> Result<(), PersistenceError> {
    diesel::delete(workshift_instances::table.filter(workshift_instances::instance_id.eq(id.value())))
        .execute(conn)?;
    debug!(instance_id = id.value(), "Deleted instance");
    Ok(())
}

/// Appends a log entry to an instance.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_log_entry(
    conn: &mut SqliteConnection,
    instance_id: InstanceId,
    entry: &NewLogEntry,
) -> Result<LogEntryId, PersistenceError> {
    diesel::insert_into(shift_log_entries::table)
        .values((
            shift_log_entries::instance_id.eq(instance_id.value()),
            shift_log_entries::person_id.eq(entry.person.map(ProfileId::value)),
            shift_log_entries::entry_time.eq(format_timestamp(entry.entry_time)?),
            shift_log_entries::hours.eq(entry.hours.map(|hours| hours.hundredths())),
            shift_log_entries::note.eq(&entry.note),
            shift_log_entries::entry_type.eq(entry.entry_type.code()),
        ))
        .execute(conn)?;
    Ok(LogEntryId::new(conn.get_last_insert_rowid()?))
}

/// Removes the whole log of an instance.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_log_entries(
    conn: &mut SqliteConnection,
    instance_id: InstanceId,
) -> Result<(), PersistenceError> {
    diesel::delete(
        shift_log_entries::table.filter(shift_log_entries::instance_id.eq(instance_id.value())),
    )
    .execute(conn)?;
    Ok(())
}

/// Writes a raw instance row backed by both sources. Only used to exercise
/// the integrity check on load.
///
/// # Errors
///
/// Returns an error if the insert fails.
#[cfg(test)]
pub fn insert_conflicting_instance(
    conn: &mut SqliteConnection,
    template: &WorkshiftInstance,
    regular_shift_id: farnsworth_domain::RegularShiftId,
    instance_info_id: farnsworth_domain::InstanceInfoId,
) -> Result<InstanceId, PersistenceError> {
    diesel::insert_into(workshift_instances::table)
        .values((
            workshift_instances::semester_id.eq(template.semester_id.value()),
            workshift_instances::regular_shift_id.eq(Some(regular_shift_id.value())),
            workshift_instances::instance_info_id.eq(Some(instance_info_id.value())),
            workshift_instances::date.eq(format_date(template.date)?),
            workshift_instances::intended_hours.eq(template.intended_hours.hundredths()),
            workshift_instances::hours.eq(template.hours.hundredths()),
        ))
        .execute(conn)?;
    Ok(InstanceId::new(conn.get_last_insert_rowid()?))
}
