// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The `SQLite` implementation of the engine's storage seam.

use diesel::SqliteConnection;
use farnsworth::{InstanceQuery, StoreError, WorkshiftStore};
use farnsworth_audit::AuditEvent;
use farnsworth_domain::{
    InstanceId, InstanceInfo, InstanceInfoDraft, InstanceInfoId, LogEntryId, Manager, ManagerId,
    Member,
    MemberId, NewInstance, NewLogEntry, NewManager, NewMember, NewPool, NewPoolHours,
    NewSemester, PoolHours, PoolHoursId, PoolId, ProfileId, RatingId, RatingLevel,
    RegularShiftId, RegularWorkshift, RegularWorkshiftDraft, Season, Semester, SemesterId,
    ShiftLogEntry, TimeBlock, TimeBlockId, TimeBlockSpec, WorkshiftInstance, WorkshiftPool,
    WorkshiftProfile, WorkshiftRating, WorkshiftType, WorkshiftTypeDraft, WorkshiftTypeId,
};

use crate::error::PersistenceError;
use crate::{mutations, queries};

/// A [`WorkshiftStore`] over one borrowed connection.
///
/// The store does not open transactions itself. [`crate::Persistence`]
/// wraps each command in one.
pub struct SqliteStore<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> SqliteStore<'a> {
    #[must_use]
    pub const fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }
}

/// Unwraps a row that was just written in the same transaction.
fn reloaded<T>(row: Option<T>, what: &str, id: i64) -> Result<T, StoreError> {
    row.ok_or_else(|| {
        StoreError::from(PersistenceError::NotFound(format!(
            "{what} {id} missing after insert"
        )))
    })
}

impl WorkshiftStore for SqliteStore<'_> {
    fn current_semester_id(&mut self) -> Result<Option<SemesterId>, StoreError> {
        Ok(queries::semesters::current_semester_id(self.conn)?)
    }

    fn set_current_semester_id(
        &mut self,
        semester_id: Option<SemesterId>,
    ) -> Result<(), StoreError> {
        Ok(mutations::semesters::set_current_semester(self.conn, semester_id)?)
    }

    fn insert_semester(
        &mut self,
        semester: &NewSemester,
        workshift_managers: &[MemberId],
    ) -> Result<Semester, StoreError> {
        let id: SemesterId =
            mutations::semesters::insert_semester(self.conn, semester, workshift_managers)?;
        reloaded(queries::semesters::get_semester(self.conn, id)?, "semester", id.value())
    }

    fn get_semester(&mut self, id: SemesterId) -> Result<Option<Semester>, StoreError> {
        Ok(queries::semesters::get_semester(self.conn, id)?)
    }

    fn find_semester(
        &mut self,
        season: Season,
        year: u16,
    ) -> Result<Option<Semester>, StoreError> {
        Ok(queries::semesters::find_semester(self.conn, season, year)?)
    }

    fn list_semesters(&mut self) -> Result<Vec<Semester>, StoreError> {
        Ok(queries::semesters::list_semesters(self.conn)?)
    }

    fn update_semester(&mut self, semester: &Semester) -> Result<(), StoreError> {
        Ok(mutations::semesters::update_semester(self.conn, semester)?)
    }

    fn delete_semester(&mut self, id: SemesterId) -> Result<(), StoreError> {
        Ok(mutations::semesters::delete_semester(self.conn, id)?)
    }

    fn insert_member(&mut self, member: &NewMember) -> Result<Member, StoreError> {
        let id: MemberId = mutations::people::insert_member(self.conn, member)?;
        reloaded(queries::people::get_member(self.conn, id)?, "member", id.value())
    }

    fn get_member(&mut self, id: MemberId) -> Result<Option<Member>, StoreError> {
        Ok(queries::people::get_member(self.conn, id)?)
    }

    fn find_member_by_username(&mut self, username: &str) -> Result<Option<Member>, StoreError> {
        Ok(queries::people::find_member_by_username(self.conn, username)?)
    }

    fn list_members(&mut self) -> Result<Vec<Member>, StoreError> {
        Ok(queries::people::list_members(self.conn)?)
    }

    fn insert_manager(&mut self, manager: &NewManager) -> Result<Manager, StoreError> {
        let id: ManagerId = mutations::people::insert_manager(self.conn, manager)?;
        reloaded(queries::people::get_manager(self.conn, id)?, "manager", id.value())
    }

    fn get_manager(&mut self, id: ManagerId) -> Result<Option<Manager>, StoreError> {
        Ok(queries::people::get_manager(self.conn, id)?)
    }

    fn list_managers(&mut self) -> Result<Vec<Manager>, StoreError> {
        Ok(queries::people::list_managers(self.conn)?)
    }

    fn insert_pool(&mut self, pool: &NewPool) -> Result<WorkshiftPool, StoreError> {
        let id: PoolId = mutations::pools::insert_pool(self.conn, pool)?;
        reloaded(queries::pools::get_pool(self.conn, id)?, "pool", id.value())
    }

    fn get_pool(&mut self, id: PoolId) -> Result<Option<WorkshiftPool>, StoreError> {
        Ok(queries::pools::get_pool(self.conn, id)?)
    }

    fn list_pools(&mut self, semester_id: SemesterId) -> Result<Vec<WorkshiftPool>, StoreError> {
        Ok(queries::pools::list_pools(self.conn, semester_id)?)
    }

    fn update_pool(&mut self, pool: &WorkshiftPool) -> Result<(), StoreError> {
        Ok(mutations::pools::update_pool(self.conn, pool)?)
    }

    fn delete_pool(&mut self, id: PoolId) -> Result<(), StoreError> {
        Ok(mutations::pools::delete_pool(self.conn, id)?)
    }

    fn insert_profile(
        &mut self,
        member_id: MemberId,
        semester_id: SemesterId,
    ) -> Result<WorkshiftProfile, StoreError> {
        let id: ProfileId = mutations::preferences::insert_profile(self.conn, member_id, semester_id)?;
        reloaded(queries::preferences::get_profile(self.conn, id)?, "profile", id.value())
    }

    fn get_profile(&mut self, id: ProfileId) -> Result<Option<WorkshiftProfile>, StoreError> {
        Ok(queries::preferences::get_profile(self.conn, id)?)
    }

    fn find_profile(
        &mut self,
        member_id: MemberId,
        semester_id: SemesterId,
    ) -> Result<Option<WorkshiftProfile>, StoreError> {
        Ok(queries::preferences::find_profile(self.conn, member_id, semester_id)?)
    }

    fn list_profiles(
        &mut self,
        semester_id: SemesterId,
    ) -> Result<Vec<WorkshiftProfile>, StoreError> {
        Ok(queries::preferences::list_profiles(self.conn, semester_id)?)
    }

    fn update_profile(&mut self, profile: &WorkshiftProfile) -> Result<(), StoreError> {
        Ok(mutations::preferences::update_profile(self.conn, profile)?)
    }

    fn delete_profile(&mut self, id: ProfileId) -> Result<(), StoreError> {
        Ok(mutations::preferences::delete_profile(self.conn, id)?)
    }

    fn insert_pool_hours(&mut self, pool_hours: &NewPoolHours) -> Result<PoolHours, StoreError> {
        let id: PoolHoursId = mutations::pools::insert_pool_hours(self.conn, pool_hours)?;
        reloaded(queries::pools::get_pool_hours(self.conn, id)?, "pool hours", id.value())
    }

    fn get_pool_hours(&mut self, id: PoolHoursId) -> Result<Option<PoolHours>, StoreError> {
        Ok(queries::pools::get_pool_hours(self.conn, id)?)
    }

    fn find_pool_hours(
        &mut self,
        profile_id: ProfileId,
        pool_id: PoolId,
    ) -> Result<Option<PoolHours>, StoreError> {
        Ok(queries::pools::find_pool_hours(self.conn, profile_id, pool_id)?)
    }

    fn list_pool_hours_for_pool(&mut self, pool_id: PoolId) -> Result<Vec<PoolHours>, StoreError> {
        Ok(queries::pools::list_pool_hours_for_pool(self.conn, pool_id)?)
    }

    fn list_pool_hours_for_profile(
        &mut self,
        profile_id: ProfileId,
    ) -> Result<Vec<PoolHours>, StoreError> {
        Ok(queries::pools::list_pool_hours_for_profile(self.conn, profile_id)?)
    }

    fn update_pool_hours(&mut self, pool_hours: &PoolHours) -> Result<(), StoreError> {
        Ok(mutations::pools::update_pool_hours(self.conn, pool_hours)?)
    }

    fn delete_pool_hours(&mut self, id: PoolHoursId) -> Result<(), StoreError> {
        Ok(mutations::pools::delete_pool_hours(self.conn, id)?)
    }

    fn insert_workshift_type(
        &mut self,
        workshift_type: &WorkshiftTypeDraft,
    ) -> Result<WorkshiftType, StoreError> {
        let id: WorkshiftTypeId = mutations::shifts::insert_workshift_type(self.conn, workshift_type)?;
        reloaded(queries::shifts::get_workshift_type(self.conn, id)?, "workshift type", id.value())
    }

    fn get_workshift_type(
        &mut self,
        id: WorkshiftTypeId,
    ) -> Result<Option<WorkshiftType>, StoreError> {
        Ok(queries::shifts::get_workshift_type(self.conn, id)?)
    }

    fn find_workshift_type(&mut self, title: &str) -> Result<Option<WorkshiftType>, StoreError> {
        Ok(queries::shifts::find_workshift_type(self.conn, title)?)
    }

    fn list_workshift_types(&mut self) -> Result<Vec<WorkshiftType>, StoreError> {
        Ok(queries::shifts::list_workshift_types(self.conn)?)
    }

    fn update_workshift_type(&mut self, workshift_type: &WorkshiftType) -> Result<(), StoreError> {
        Ok(mutations::shifts::update_workshift_type(self.conn, workshift_type)?)
    }

    fn insert_regular_shift(
        &mut self,
        shift: &RegularWorkshiftDraft,
    ) -> Result<RegularWorkshift, StoreError> {
        let id: RegularShiftId = mutations::shifts::insert_regular_shift(self.conn, shift)?;
        reloaded(queries::shifts::get_regular_shift(self.conn, id)?, "regular shift", id.value())
    }

    fn get_regular_shift(
        &mut self,
        id: RegularShiftId,
    ) -> Result<Option<RegularWorkshift>, StoreError> {
        Ok(queries::shifts::get_regular_shift(self.conn, id)?)
    }

    fn list_regular_shifts(
        &mut self,
        pool_id: PoolId,
    ) -> Result<Vec<RegularWorkshift>, StoreError> {
        Ok(queries::shifts::list_regular_shifts(self.conn, pool_id)?)
    }

    fn update_regular_shift(&mut self, shift: &RegularWorkshift) -> Result<(), StoreError> {
        Ok(mutations::shifts::update_regular_shift(self.conn, shift)?)
    }

    fn delete_regular_shift(&mut self, id: RegularShiftId) -> Result<(), StoreError> {
        Ok(mutations::shifts::delete_regular_shift(self.conn, id)?)
    }

    fn insert_instance_info(
        &mut self,
        info: &InstanceInfoDraft,
    ) -> Result<InstanceInfo, StoreError> {
        let id: InstanceInfoId = mutations::shifts::insert_instance_info(self.conn, info)?;
        reloaded(queries::shifts::get_instance_info(self.conn, id)?, "instance info", id.value())
    }

    fn get_instance_info(
        &mut self,
        id: InstanceInfoId,
    ) -> Result<Option<InstanceInfo>, StoreError> {
        Ok(queries::shifts::get_instance_info(self.conn, id)?)
    }

    fn update_instance_info(&mut self, info: &InstanceInfo) -> Result<(), StoreError> {
        Ok(mutations::shifts::update_instance_info(self.conn, info)?)
    }

    fn delete_instance_info(&mut self, id: InstanceInfoId) -> Result<(), StoreError> {
        Ok(mutations::shifts::delete_instance_info(self.conn, id)?)
    }

    fn insert_instance(
        &mut self,
        instance: &NewInstance,
    ) -> Result<WorkshiftInstance, StoreError> {
        let id: InstanceId = mutations::instances::insert_instance(self.conn, instance)?;
        reloaded(queries::instances::get_instance(self.conn, id)?, "instance", id.value())
    }

    fn get_instance(&mut self, id: InstanceId) -> Result<Option<WorkshiftInstance>, StoreError> {
        Ok(queries::instances::get_instance(self.conn, id)?)
    }

    fn list_instances(
        &mut self,
        query: &InstanceQuery,
    ) -> Result<Vec<WorkshiftInstance>, StoreError> {
        Ok(queries::instances::list_instances(self.conn, query)?)
    }

    fn update_instance(&mut self, instance: &WorkshiftInstance) -> Result<(), StoreError> {
        Ok(mutations::instances::update_instance(self.conn, instance)?)
    }

    fn delete_instance(&mut self, id: InstanceId) -> Result<(), StoreError> {
        Ok(mutations::instances::delete_instance(self.conn, id)?)
    }

    fn insert_log_entry(
        &mut self,
        instance_id: InstanceId,
        entry: &NewLogEntry,
    ) -> Result<ShiftLogEntry, StoreError> {
        let id: LogEntryId = mutations::instances::insert_log_entry(self.conn, instance_id, entry)?;
        Ok(ShiftLogEntry {
            id,
            instance_id,
            person: entry.person,
            entry_time: entry.entry_time,
            hours: entry.hours,
            note: entry.note.clone(),
            entry_type: entry.entry_type,
        })
    }

    fn list_log_entries(
        &mut self,
        instance_id: InstanceId,
    ) -> Result<Vec<ShiftLogEntry>, StoreError> {
        Ok(queries::instances::list_log_entries(self.conn, instance_id)?)
    }

    fn delete_log_entries(&mut self, instance_id: InstanceId) -> Result<(), StoreError> {
        Ok(mutations::instances::delete_log_entries(self.conn, instance_id)?)
    }

    fn get_or_create_time_block(&mut self, spec: &TimeBlockSpec) -> Result<TimeBlock, StoreError> {
        if let Some(block) = queries::preferences::find_time_block(self.conn, spec)? {
            return Ok(block);
        }
        let id: TimeBlockId = mutations::preferences::insert_time_block(self.conn, spec)?;
        Ok(TimeBlock {
            id,
            preference: spec.preference,
            day: spec.day,
            start_time: spec.start_time,
            end_time: spec.end_time,
        })
    }

    fn get_time_blocks(&mut self, ids: &[TimeBlockId]) -> Result<Vec<TimeBlock>, StoreError> {
        Ok(queries::preferences::get_time_blocks(self.conn, ids)?)
    }

    fn get_or_create_rating(
        &mut self,
        rating: RatingLevel,
        workshift_type_id: WorkshiftTypeId,
    ) -> Result<WorkshiftRating, StoreError> {
        if let Some(found) = queries::preferences::find_rating(self.conn, rating, workshift_type_id)? {
            return Ok(found);
        }
        let id: RatingId = mutations::preferences::insert_rating(self.conn, rating, workshift_type_id)?;
        Ok(WorkshiftRating {
            id,
            rating,
            workshift_type_id,
        })
    }

    fn get_ratings(&mut self, ids: &[RatingId]) -> Result<Vec<WorkshiftRating>, StoreError> {
        Ok(queries::preferences::get_ratings(self.conn, ids)?)
    }

    fn record_audit_event(&mut self, event: &AuditEvent) -> Result<i64, StoreError> {
        Ok(mutations::audit::persist_audit_event(self.conn, event)?)
    }
}
