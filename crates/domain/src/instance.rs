// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::hours::Hours;
use crate::ids::{InstanceId, InstanceInfoId, PoolId, ProfileId, RegularShiftId, SemesterId};
use crate::shift::{RegularWorkshift, VerifyPolicy, WorkshiftType};
use time::{Date, Time};

/// Details for an instance that is not backed by a recurring shift.
///
/// Created for ad hoc shifts, and as a snapshot when a closed recurring
/// instance outlives its template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceInfo {
    pub id: InstanceInfoId,
    pub title: String,
    pub description: String,
    pub pool_id: PoolId,
    pub verify: VerifyPolicy,
    pub start_time: Option<Time>,
    pub end_time: Option<Time>,
    pub week_long: bool,
}

/// Input for creating or editing standalone instance details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceInfoDraft {
    pub title: String,
    pub description: String,
    pub pool_id: PoolId,
    pub verify: VerifyPolicy,
    pub start_time: Option<Time>,
    pub end_time: Option<Time>,
    pub week_long: bool,
}

/// Where an instance takes its title, pool and verify policy from.
///
/// An instance is backed by exactly one source. The two storage columns
/// this is loaded from are checked by [`InstanceSource::from_parts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceSource {
    Recurring(RegularShiftId),
    Standalone(InstanceInfoId),
}

impl InstanceSource {
    /// Builds a source from its two nullable references.
    ///
    /// # Errors
    ///
    /// Returns `InstanceSourceConflict` when both are set and
    /// `InstanceSourceMissing` when neither is.
    pub const fn from_parts(
        regular_shift_id: Option<RegularShiftId>,
        info_id: Option<InstanceInfoId>,
    ) -> Result<Self, DomainError> {
        match (regular_shift_id, info_id) {
            (Some(shift), None) => Ok(Self::Recurring(shift)),
            (None, Some(info)) => Ok(Self::Standalone(info)),
            (Some(regular_shift_id), Some(info_id)) => Err(DomainError::InstanceSourceConflict {
                regular_shift_id,
                info_id,
            }),
            (None, None) => Err(DomainError::InstanceSourceMissing),
        }
    }

    #[must_use]
    pub const fn regular_shift_id(self) -> Option<RegularShiftId> {
        match self {
            Self::Recurring(id) => Some(id),
            Self::Standalone(_) => None,
        }
    }

    #[must_use]
    pub const fn info_id(self) -> Option<InstanceInfoId> {
        match self {
            Self::Recurring(_) => None,
            Self::Standalone(id) => Some(id),
        }
    }
}

/// Lifecycle state of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceState {
    Unfilled,
    Assigned,
    Verified,
    Blown,
}

/// One concrete calendar occurrence of a shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkshiftInstance {
    pub id: InstanceId,
    pub semester_id: SemesterId,
    pub source: InstanceSource,
    pub date: Date,
    pub workshifter: Option<ProfileId>,
    /// Member held responsible if the shift is blown.
    pub liable: Option<ProfileId>,
    pub verifier: Option<ProfileId>,
    pub closed: bool,
    pub blown: bool,
    /// Hours the shift was created with.
    pub intended_hours: Hours,
    /// Hours credited (or debited) when the shift closes.
    pub hours: Hours,
}

impl WorkshiftInstance {
    #[must_use]
    pub const fn state(&self) -> InstanceState {
        match (self.closed, self.blown, self.workshifter) {
            (true, true, _) => InstanceState::Blown,
            (true, false, _) => InstanceState::Verified,
            (false, _, Some(_)) => InstanceState::Assigned,
            (false, _, None) => InstanceState::Unfilled,
        }
    }

    /// The standing effect of this instance on its workshifter, if closed.
    ///
    /// Verified shifts credit their hours and blown shifts debit them.
    #[must_use]
    pub fn standing_effect(&self) -> Option<(ProfileId, Hours)> {
        if !self.closed {
            return None;
        }
        let workshifter: ProfileId = self.workshifter?;
        Some((workshifter, if self.blown { -self.hours } else { self.hours }))
    }
}

/// Input for inserting an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInstance {
    pub semester_id: SemesterId,
    pub source: InstanceSource,
    pub date: Date,
    pub workshifter: Option<ProfileId>,
    pub hours: Hours,
}

/// The resolved source of an instance, with one accessor surface for
/// both kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceDetails {
    Recurring {
        shift: RegularWorkshift,
        workshift_type: WorkshiftType,
    },
    Standalone(InstanceInfo),
}

impl InstanceDetails {
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Recurring { workshift_type, .. } => &workshift_type.title,
            Self::Standalone(info) => &info.title,
        }
    }

    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::Recurring { workshift_type, .. } => &workshift_type.description,
            Self::Standalone(info) => &info.description,
        }
    }

    #[must_use]
    pub const fn pool_id(&self) -> PoolId {
        match self {
            Self::Recurring { shift, .. } => shift.pool_id,
            Self::Standalone(info) => info.pool_id,
        }
    }

    #[must_use]
    pub const fn verify(&self) -> VerifyPolicy {
        match self {
            Self::Recurring { shift, .. } => shift.verify,
            Self::Standalone(info) => info.verify,
        }
    }

    #[must_use]
    pub const fn start_time(&self) -> Option<Time> {
        match self {
            Self::Recurring { shift, .. } => shift.start_time,
            Self::Standalone(info) => info.start_time,
        }
    }

    #[must_use]
    pub const fn end_time(&self) -> Option<Time> {
        match self {
            Self::Recurring { shift, .. } => shift.end_time,
            Self::Standalone(info) => info.end_time,
        }
    }

    #[must_use]
    pub const fn week_long(&self) -> bool {
        match self {
            Self::Recurring { shift, .. } => shift.schedule.is_week_long(),
            Self::Standalone(info) => info.week_long,
        }
    }

    /// Snapshot of these details for detaching an instance from its
    /// recurring template.
    #[must_use]
    pub fn to_info_draft(&self) -> InstanceInfoDraft {
        InstanceInfoDraft {
            title: self.title().to_string(),
            description: self.description().to_string(),
            pool_id: self.pool_id(),
            verify: self.verify(),
            start_time: self.start_time(),
            end_time: self.end_time(),
            week_long: self.week_long(),
        }
    }
}
