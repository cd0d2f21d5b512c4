// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use farnsworth_domain::{
    Hours, InstanceId, InstanceInfoDraft, MemberId, NewManager, NewMember, NewSemester,
    PoolDraft, PoolHoursId, PoolId, ProfileId, RatingLevel, RegularShiftId,
    RegularWorkshiftDraft, SemesterId, TimeBlockSpec, Viewer, WorkshiftTypeDraft,
    WorkshiftTypeId,
};
use time::Date;

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request state changes. Each one runs as
/// a single cascade through [`crate::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a semester and make it current.
    StartSemester {
        semester: NewSemester,
        /// Pools to create beside the primary pool.
        extra_pools: Vec<PoolDraft>,
    },
    /// Change a semester's fine rate, policy link and preference window.
    UpdateSemester {
        semester_id: SemesterId,
        rate_cents: Option<i64>,
        policy: Option<String>,
        preferences_open: bool,
    },
    SetCurrentSemester {
        semester_id: SemesterId,
    },
    /// Delete a semester with everything scoped to it.
    DeleteSemester {
        semester_id: SemesterId,
    },
    RegisterMember {
        member: NewMember,
    },
    AddManager {
        manager: NewManager,
    },
    /// Add a member to a semester that has already started.
    AddWorkshifter {
        semester_id: SemesterId,
        member_id: MemberId,
        /// Overrides the primary pool requirement for this member.
        primary_hours: Option<Hours>,
    },
    CreatePool {
        semester_id: SemesterId,
        draft: PoolDraft,
    },
    EditPool {
        pool_id: PoolId,
        draft: PoolDraft,
    },
    DeletePool {
        pool_id: PoolId,
    },
    /// Manually set one member's requirement and adjustment in a pool.
    AdjustPoolHours {
        pool_hours_id: PoolHoursId,
        hours: Hours,
        hour_adjustment: Hours,
    },
    /// Re-derive one member's standing from history.
    RecomputeStanding {
        pool_hours_id: PoolHoursId,
    },
    /// Debit requirements for completed periods and close expired
    /// instances, as of the command's time.
    UpdateStandings {
        semester_id: SemesterId,
    },
    CreateWorkshiftType {
        draft: WorkshiftTypeDraft,
    },
    EditWorkshiftType {
        workshift_type_id: WorkshiftTypeId,
        draft: WorkshiftTypeDraft,
    },
    CreateRegularShift {
        draft: RegularWorkshiftDraft,
    },
    EditRegularShift {
        shift_id: RegularShiftId,
        draft: RegularWorkshiftDraft,
    },
    DeleteRegularShift {
        shift_id: RegularShiftId,
    },
    /// Create a one-off instance with its own details.
    CreateInstance {
        info: InstanceInfoDraft,
        date: Date,
        workshifter: Option<ProfileId>,
        hours: Hours,
    },
    EditInstance {
        instance_id: InstanceId,
        info: InstanceInfoDraft,
        date: Date,
        workshifter: Option<ProfileId>,
    },
    DeleteInstance {
        instance_id: InstanceId,
    },
    EditInstanceHours {
        instance_id: InstanceId,
        hours: Hours,
        /// Profile of the member making the edit, for the log.
        editor: Option<ProfileId>,
        note: String,
    },
    SignIn {
        instance_id: InstanceId,
        viewer: Viewer,
    },
    SignOut {
        instance_id: InstanceId,
        viewer: Viewer,
    },
    Verify {
        instance_id: InstanceId,
        viewer: Viewer,
    },
    MarkBlown {
        instance_id: InstanceId,
        viewer: Viewer,
    },
    SetPreferences {
        profile_id: ProfileId,
        blocks: Vec<TimeBlockSpec>,
        ratings: Vec<(WorkshiftTypeId, RatingLevel)>,
        note: String,
        /// Whether the caller may edit after preferences close.
        can_manage: bool,
    },
    AutoAssign {
        pool_id: PoolId,
        /// Candidates in the order they are offered shifts.
        candidate_order: Vec<ProfileId>,
    },
    RandomAssign {
        pool_id: PoolId,
        candidate_order: Vec<ProfileId>,
    },
    ClearAssignments {
        semester_id: SemesterId,
    },
    /// Snapshot fine-date standings, or zero them when `clear` is set.
    CalculateFines {
        semester_id: SemesterId,
        clear: bool,
    },
}

impl Command {
    /// The name recorded as the audit action.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::StartSemester { .. } => "StartSemester",
            Self::UpdateSemester { .. } => "UpdateSemester",
            Self::SetCurrentSemester { .. } => "SetCurrentSemester",
            Self::DeleteSemester { .. } => "DeleteSemester",
            Self::RegisterMember { .. } => "RegisterMember",
            Self::AddManager { .. } => "AddManager",
            Self::AddWorkshifter { .. } => "AddWorkshifter",
            Self::CreatePool { .. } => "CreatePool",
            Self::EditPool { .. } => "EditPool",
            Self::DeletePool { .. } => "DeletePool",
            Self::AdjustPoolHours { .. } => "AdjustPoolHours",
            Self::RecomputeStanding { .. } => "RecomputeStanding",
            Self::UpdateStandings { .. } => "UpdateStandings",
            Self::CreateWorkshiftType { .. } => "CreateWorkshiftType",
            Self::EditWorkshiftType { .. } => "EditWorkshiftType",
            Self::CreateRegularShift { .. } => "CreateRegularShift",
            Self::EditRegularShift { .. } => "EditRegularShift",
            Self::DeleteRegularShift { .. } => "DeleteRegularShift",
            Self::CreateInstance { .. } => "CreateInstance",
            Self::EditInstance { .. } => "EditInstance",
            Self::DeleteInstance { .. } => "DeleteInstance",
            Self::EditInstanceHours { .. } => "EditInstanceHours",
            Self::SignIn { .. } => "SignIn",
            Self::SignOut { .. } => "SignOut",
            Self::Verify { .. } => "Verify",
            Self::MarkBlown { .. } => "MarkBlown",
            Self::SetPreferences { .. } => "SetPreferences",
            Self::AutoAssign { .. } => "AutoAssign",
            Self::RandomAssign { .. } => "RandomAssign",
            Self::ClearAssignments { .. } => "ClearAssignments",
            Self::CalculateFines { .. } => "CalculateFines",
        }
    }
}
