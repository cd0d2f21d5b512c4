// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The storage seam of the engine.
//!
//! The engine never talks to a database directly. Everything it needs is
//! expressed here as plain create/read/update/delete operations plus a few
//! filtered queries. Implementations are expected to run a whole command
//! inside one transaction.

use crate::error::StoreError;
use farnsworth_audit::AuditEvent;
use farnsworth_domain::{
    InstanceId, InstanceInfo, InstanceInfoDraft, InstanceInfoId, Manager, ManagerId, Member,
    MemberId, NewInstance, NewLogEntry, NewManager, NewMember, NewPool, NewPoolHours,
    NewSemester, PoolHours, PoolHoursId, PoolId, ProfileId, RatingId, RatingLevel,
    RegularShiftId, RegularWorkshift, RegularWorkshiftDraft, Season, Semester, SemesterId,
    ShiftLogEntry, TimeBlock, TimeBlockId, TimeBlockSpec, WorkshiftInstance, WorkshiftPool,
    WorkshiftProfile, WorkshiftRating, WorkshiftType, WorkshiftTypeDraft, WorkshiftTypeId,
};
use time::Date;

/// Filters for listing instances. Unset fields do not filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstanceQuery {
    pub semester_id: Option<SemesterId>,
    pub regular_shift_id: Option<RegularShiftId>,
    /// Matches instances whose recurring shift or standalone details
    /// belong to this pool.
    pub pool_id: Option<PoolId>,
    pub workshifter: Option<ProfileId>,
    pub closed: Option<bool>,
    /// Only recurring (`false`) or only standalone (`true`) instances.
    pub standalone: Option<bool>,
    /// Inclusive lower date bound.
    pub from_date: Option<Date>,
    /// Inclusive upper date bound.
    pub to_date: Option<Date>,
}

impl InstanceQuery {
    #[must_use]
    pub fn for_semester(semester_id: SemesterId) -> Self {
        Self {
            semester_id: Some(semester_id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn for_regular_shift(regular_shift_id: RegularShiftId) -> Self {
        Self {
            regular_shift_id: Some(regular_shift_id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn for_pool(pool_id: PoolId) -> Self {
        Self {
            pool_id: Some(pool_id),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn open(mut self) -> Self {
        self.closed = Some(false);
        self
    }

    #[must_use]
    pub const fn closed(mut self) -> Self {
        self.closed = Some(true);
        self
    }

    #[must_use]
    pub const fn worked_by(mut self, profile_id: ProfileId) -> Self {
        self.workshifter = Some(profile_id);
        self
    }

    #[must_use]
    pub const fn on_or_after(mut self, date: Date) -> Self {
        self.from_date = Some(date);
        self
    }

    #[must_use]
    pub const fn on_or_before(mut self, date: Date) -> Self {
        self.to_date = Some(date);
        self
    }

    #[must_use]
    pub const fn standalone_only(mut self) -> Self {
        self.standalone = Some(true);
        self
    }
}

/// Storage operations required by the workshift engine.
///
/// List operations return rows in a stable order: semesters newest first,
/// pools primary first then by title, instances by date then id, log
/// entries newest first, everything else by id.
pub trait WorkshiftStore {
    // Current semester reference

    /// Returns the current semester, if one is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn current_semester_id(&mut self) -> Result<Option<SemesterId>, StoreError>;

    /// Replaces the current semester reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn set_current_semester_id(&mut self, semester_id: Option<SemesterId>)
    -> Result<(), StoreError>;

    // Semesters

    /// Inserts a semester with preferences open.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn insert_semester(
        &mut self,
        semester: &NewSemester,
        workshift_managers: &[MemberId],
    ) -> Result<Semester, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn get_semester(&mut self, id: SemesterId) -> Result<Option<Semester>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn find_semester(&mut self, season: Season, year: u16)
    -> Result<Option<Semester>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn list_semesters(&mut self) -> Result<Vec<Semester>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn update_semester(&mut self, semester: &Semester) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn delete_semester(&mut self, id: SemesterId) -> Result<(), StoreError>;

    // Members and managers

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn insert_member(&mut self, member: &NewMember) -> Result<Member, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn get_member(&mut self, id: MemberId) -> Result<Option<Member>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn find_member_by_username(&mut self, username: &str) -> Result<Option<Member>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn list_members(&mut self) -> Result<Vec<Member>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn insert_manager(&mut self, manager: &NewManager) -> Result<Manager, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn get_manager(&mut self, id: ManagerId) -> Result<Option<Manager>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn list_managers(&mut self) -> Result<Vec<Manager>, StoreError>;

    // Pools

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn insert_pool(&mut self, pool: &NewPool) -> Result<WorkshiftPool, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn get_pool(&mut self, id: PoolId) -> Result<Option<WorkshiftPool>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn list_pools(&mut self, semester_id: SemesterId) -> Result<Vec<WorkshiftPool>, StoreError>;

    /// Updates every field of the pool, including its managers.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn update_pool(&mut self, pool: &WorkshiftPool) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn delete_pool(&mut self, id: PoolId) -> Result<(), StoreError>;

    // Profiles

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn insert_profile(
        &mut self,
        member_id: MemberId,
        semester_id: SemesterId,
    ) -> Result<WorkshiftProfile, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn get_profile(&mut self, id: ProfileId) -> Result<Option<WorkshiftProfile>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn find_profile(
        &mut self,
        member_id: MemberId,
        semester_id: SemesterId,
    ) -> Result<Option<WorkshiftProfile>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn list_profiles(&mut self, semester_id: SemesterId)
    -> Result<Vec<WorkshiftProfile>, StoreError>;

    /// Updates the note, save time, time blocks and ratings.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn update_profile(&mut self, profile: &WorkshiftProfile) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn delete_profile(&mut self, id: ProfileId) -> Result<(), StoreError>;

    // Pool hours

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn insert_pool_hours(&mut self, pool_hours: &NewPoolHours) -> Result<PoolHours, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn get_pool_hours(&mut self, id: PoolHoursId) -> Result<Option<PoolHours>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn find_pool_hours(
        &mut self,
        profile_id: ProfileId,
        pool_id: PoolId,
    ) -> Result<Option<PoolHours>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn list_pool_hours_for_pool(&mut self, pool_id: PoolId) -> Result<Vec<PoolHours>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn list_pool_hours_for_profile(
        &mut self,
        profile_id: ProfileId,
    ) -> Result<Vec<PoolHours>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn update_pool_hours(&mut self, pool_hours: &PoolHours) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn delete_pool_hours(&mut self, id: PoolHoursId) -> Result<(), StoreError>;

    // Workshift types

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn insert_workshift_type(
        &mut self,
        workshift_type: &WorkshiftTypeDraft,
    ) -> Result<WorkshiftType, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn get_workshift_type(
        &mut self,
        id: WorkshiftTypeId,
    ) -> Result<Option<WorkshiftType>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn find_workshift_type(&mut self, title: &str) -> Result<Option<WorkshiftType>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn list_workshift_types(&mut self) -> Result<Vec<WorkshiftType>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn update_workshift_type(&mut self, workshift_type: &WorkshiftType) -> Result<(), StoreError>;

    // Regular workshifts

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn insert_regular_shift(
        &mut self,
        shift: &RegularWorkshiftDraft,
    ) -> Result<RegularWorkshift, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn get_regular_shift(
        &mut self,
        id: RegularShiftId,
    ) -> Result<Option<RegularWorkshift>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn list_regular_shifts(&mut self, pool_id: PoolId)
    -> Result<Vec<RegularWorkshift>, StoreError>;

    /// Updates every field of the shift, including its assignees.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn update_regular_shift(&mut self, shift: &RegularWorkshift) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn delete_regular_shift(&mut self, id: RegularShiftId) -> Result<(), StoreError>;

    // Standalone instance details

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn insert_instance_info(
        &mut self,
        info: &InstanceInfoDraft,
    ) -> Result<InstanceInfo, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn get_instance_info(&mut self, id: InstanceInfoId)
    -> Result<Option<InstanceInfo>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn update_instance_info(&mut self, info: &InstanceInfo) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn delete_instance_info(&mut self, id: InstanceInfoId) -> Result<(), StoreError>;

    // Instances

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn insert_instance(&mut self, instance: &NewInstance)
    -> Result<WorkshiftInstance, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails, or if the stored row is not a
    /// valid instance.
    fn get_instance(&mut self, id: InstanceId) -> Result<Option<WorkshiftInstance>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn list_instances(
        &mut self,
        query: &InstanceQuery,
    ) -> Result<Vec<WorkshiftInstance>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn update_instance(&mut self, instance: &WorkshiftInstance) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn delete_instance(&mut self, id: InstanceId) -> Result<(), StoreError>;

    // Shift log

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn insert_log_entry(
        &mut self,
        instance_id: InstanceId,
        entry: &NewLogEntry,
    ) -> Result<ShiftLogEntry, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn list_log_entries(&mut self, instance_id: InstanceId)
    -> Result<Vec<ShiftLogEntry>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn delete_log_entries(&mut self, instance_id: InstanceId) -> Result<(), StoreError>;

    // Preference catalogs

    /// Returns the catalog block matching `spec`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn get_or_create_time_block(&mut self, spec: &TimeBlockSpec) -> Result<TimeBlock, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn get_time_blocks(&mut self, ids: &[TimeBlockId]) -> Result<Vec<TimeBlock>, StoreError>;

    /// Returns the catalog rating matching the pair, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn get_or_create_rating(
        &mut self,
        rating: RatingLevel,
        workshift_type_id: WorkshiftTypeId,
    ) -> Result<WorkshiftRating, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn get_ratings(&mut self, ids: &[RatingId]) -> Result<Vec<WorkshiftRating>, StoreError>;

    // Audit

    /// Records an audit event and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn record_audit_event(&mut self, event: &AuditEvent) -> Result<i64, StoreError>;
}
