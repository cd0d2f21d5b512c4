// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use farnsworth_domain::{
    InstanceInfo, InstanceInfoDraft, InstanceInfoId, ProfileId, RegularShiftId, RegularWorkshift,
    RegularWorkshiftDraft, WorkshiftType, WorkshiftTypeDraft, WorkshiftTypeId,
};
use num_traits::ToPrimitive;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{format_optional_time, from_u32, to_flag, weekday_index};
use crate::diesel_schema::{instance_infos, regular_shift_assignees, regular_shifts, workshift_types};
use crate::error::PersistenceError;

/// Inserts a workshift type.
///
/// # Errors
///
/// Returns an error if the insert fails, including a duplicate title.
pub fn insert_workshift_type(
    conn: &mut SqliteConnection,
    draft: &WorkshiftTypeDraft,
) -> Result<WorkshiftTypeId, PersistenceError> {
    diesel::insert_into(workshift_types::table)
        .values((
            workshift_types::title.eq(&draft.title),
            workshift_types::description.eq(&draft.description),
            workshift_types::quick_tips.eq(&draft.quick_tips),
            workshift_types::rateable.eq(to_flag(draft.rateable)),
            workshift_types::assignment.eq(draft.assignment.code()),
        ))
        .execute(conn)?;
    let id: i64 = conn.get_last_insert_rowid()?;
    info!(workshift_type_id = id, title = %draft.title, "Inserted workshift type");
    Ok(WorkshiftTypeId::new(id))
}

/// # Errors
///
/// Returns an error if the update fails.
pub fn update_workshift_type(
    conn: &mut SqliteConnection,
    workshift_type: &WorkshiftType,
) -> Result<(), PersistenceError> {
    diesel::update(
        workshift_types::table
            .filter(workshift_types::workshift_type_id.eq(workshift_type.id.value())),
    )
    .set((
        workshift_types::title.eq(&workshift_type.title),
        workshift_types::description.eq(&workshift_type.description),
        workshift_types::quick_tips.eq(&workshift_type.quick_tips),
        workshift_types::rateable.eq(to_flag(workshift_type.rateable)),
        workshift_types::assignment.eq(workshift_type.assignment.code()),
    ))
    .execute(conn)?;
    Ok(())
}

/// Rewrites the assignee slots of a regular shift in order.
fn replace_assignees(
    conn: &mut SqliteConnection,
    shift_id: i64,
    assignees: &[ProfileId],
) -> Result<(), PersistenceError> {
    diesel::delete(
        regular_shift_assignees::table
            .filter(regular_shift_assignees::regular_shift_id.eq(shift_id)),
    )
    .execute(conn)?;
    for (slot, profile) in assignees.iter().enumerate() {
        let slot: i32 = slot.to_i32().ok_or_else(|| {
            PersistenceError::SerializationError(format!("assignee slot {slot} out of range"))
        })?;
        diesel::insert_into(regular_shift_assignees::table)
            .values((
                regular_shift_assignees::regular_shift_id.eq(shift_id),
                regular_shift_assignees::slot.eq(slot),
                regular_shift_assignees::profile_id.eq(profile.value()),
            ))
            .execute(conn)?;
    }
    Ok(())
}

/// Inserts a regular shift and its assignees.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_regular_shift(
    conn: &mut SqliteConnection,
    draft: &RegularWorkshiftDraft,
) -> Result<RegularShiftId, PersistenceError> {
    diesel::insert_into(regular_shifts::table)
        .values((
            regular_shifts::workshift_type_id.eq(draft.workshift_type_id.value()),
            regular_shifts::pool_id.eq(draft.pool_id.value()),
            regular_shifts::day.eq(draft.schedule.day().map(weekday_index)),
            regular_shifts::count.eq(from_u32(draft.count, "regular_shifts.count")?),
            regular_shifts::hours.eq(draft.hours.hundredths()),
            regular_shifts::active.eq(to_flag(draft.active)),
            regular_shifts::start_time.eq(format_optional_time(draft.start_time)?),
            regular_shifts::end_time.eq(format_optional_time(draft.end_time)?),
            regular_shifts::verify.eq(draft.verify.code()),
            regular_shifts::addendum.eq(&draft.addendum),
            regular_shifts::is_manager_shift.eq(to_flag(draft.is_manager_shift)),
        ))
        .execute(conn)?;
    let shift_id: i64 = conn.get_last_insert_rowid()?;
    replace_assignees(conn, shift_id, &draft.current_assignees)?;

    info!(regular_shift_id = shift_id, pool_id = draft.pool_id.value(), "Inserted regular shift");
    Ok(RegularShiftId::new(shift_id))
}

/// Writes every field of a regular shift, including its assignees.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_regular_shift(
    conn: &mut SqliteConnection,
    shift: &RegularWorkshift,
) -> Result<(), PersistenceError> {
    let id: i64 = shift.id.value();
    diesel::update(regular_shifts::table.filter(regular_shifts::regular_shift_id.eq(id)))
        .set((
            regular_shifts::workshift_type_id.eq(shift.workshift_type_id.value()),
            regular_shifts::pool_id.eq(shift.pool_id.value()),
            regular_shifts::day.eq(shift.schedule.day().map(weekday_index)),
            regular_shifts::count.eq(from_u32(shift.count, "regular_shifts.count")?),
            regular_shifts::hours.eq(shift.hours.hundredths()),
            regular_shifts::active.eq(to_flag(shift.active)),
            regular_shifts::start_time.eq(format_optional_time(shift.start_time)?),
            regular_shifts::end_time.eq(format_optional_time(shift.end_time)?),
            regular_shifts::verify.eq(shift.verify.code()),
            regular_shifts::addendum.eq(&shift.addendum),
            regular_shifts::is_manager_shift.eq(to_flag(shift.is_manager_shift)),
        ))
        .execute(conn)?;
    replace_assignees(conn, id, &shift.current_assignees)?;
    debug!(regular_shift_id = id, "Updated regular shift");
    Ok(())
}

/// Deletes a regular shift and its assignee slots.
///
/// # Errors
///
/// Returns an error if the delete fails, including when instances still
/// reference the shift.
pub fn delete_regular_shift(
    conn: &mut SqliteConnection,
    id: RegularShiftId,
) -> Result<(), PersistenceError> {
    replace_assignees(conn, id.value(), &[])?;
    diesel::delete(regular_shifts::table.filter(regular_shifts::regular_shift_id.eq(id.value())))
        .execute(conn)?;
    info!(regular_shift_id = id.value(), "Deleted regular shift");
    Ok(())
}

/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_instance_info(
    conn: &mut SqliteConnection,
    draft: &InstanceInfoDraft,
) -> Result<InstanceInfoId, PersistenceError> {
    diesel::insert_into(instance_infos::table)
        .values((
            instance_infos::title.eq(&draft.title),
            instance_infos::description.eq(&draft.description),
            instance_infos::pool_id.eq(draft.pool_id.value()),
            instance_infos::verify.eq(draft.verify.code()),
            instance_infos::start_time.eq(format_optional_time(draft.start_time)?),
            instance_infos::end_time.eq(format_optional_time(draft.end_time)?),
            instance_infos::week_long.eq(to_flag(draft.week_long)),
        ))
        .execute(conn)?;
    Ok(InstanceInfoId::new(conn.get_last_insert_rowid()?))
}

/// # Errors
///
/// Returns an error if the update fails.
pub fn update_instance_info(
    conn: &mut SqliteConnection,
    info: &InstanceInfo,
) -> Result<(), PersistenceError> {
    diesel::update(
        instance_infos::table.filter(instance_infos::instance_info_id.eq(info.id.value())),
    )
    .set((
        instance_infos::title.eq(&info.title),
        instance_infos::description.eq(&info.description),
        instance_infos::pool_id.eq(info.pool_id.value()),
        instance_infos::verify.eq(info.verify.code()),
        instance_infos::start_time.eq(format_optional_time(info.start_time)?),
        instance_infos::end_time.eq(format_optional_time(info.end_time)?),
        instance_infos::week_long.eq(to_flag(info.week_long)),
    ))
    .execute(conn)?;
    Ok(())
}

/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_instance_info(
    conn: &mut SqliteConnection,
    id: InstanceInfoId,
) -> Result<(), PersistenceError> {
    diesel::delete(
        instance_infos::table.filter(instance_infos::instance_info_id.eq(id.value())),
    )
    .execute(conn)?;
    Ok(())
}
