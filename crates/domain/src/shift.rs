// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::hours::Hours;
use crate::ids::{PoolId, ProfileId, RegularShiftId, WorkshiftTypeId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, Time, Weekday};

/// How shifts of a type are handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignmentMode {
    /// Filled by the auto-assign allocator.
    Auto,
    /// Filled by a manager by hand.
    Manual,
    /// Never assigned (e.g. manager positions).
    NoAssign,
}

impl AssignmentMode {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Auto => "A",
            Self::Manual => "M",
            Self::NoAssign => "O",
        }
    }
}

impl FromStr for AssignmentMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Self::Auto),
            "M" => Ok(Self::Manual),
            "O" => Ok(Self::NoAssign),
            _ => Err(DomainError::InvalidTitle(format!("unknown assignment mode '{s}'"))),
        }
    }
}

/// A kind of chore, e.g. "Kitchen Clean".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkshiftType {
    pub id: WorkshiftTypeId,
    pub title: String,
    pub description: String,
    pub quick_tips: String,
    /// Whether members may rate this type in their preferences.
    pub rateable: bool,
    pub assignment: AssignmentMode,
}

/// Input for creating or editing a workshift type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkshiftTypeDraft {
    pub title: String,
    pub description: String,
    pub quick_tips: String,
    pub rateable: bool,
    pub assignment: AssignmentMode,
}

/// Who may verify a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VerifyPolicy {
    /// Holders of a workshift-manager position.
    WorkshiftManager,
    /// Managers of the shift's pool.
    PoolManager,
    /// Holders of any manager position.
    AnyManager,
    /// Any member other than the workshifter.
    #[default]
    OtherMember,
    /// Any member, including the workshifter.
    SelfVerify,
    /// Verified automatically once the shift has passed.
    Automatic,
}

impl VerifyPolicy {
    /// Returns the single letter storage code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::WorkshiftManager => "W",
            Self::PoolManager => "P",
            Self::AnyManager => "M",
            Self::OtherMember => "O",
            Self::SelfVerify => "S",
            Self::Automatic => "A",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::WorkshiftManager => "Workshift Managers only",
            Self::PoolManager => "Pool Managers only",
            Self::AnyManager => "Any Manager",
            Self::OtherMember => "Another member",
            Self::SelfVerify => "Any member (including self)",
            Self::Automatic => "Automatically verified",
        }
    }
}

impl FromStr for VerifyPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "W" => Ok(Self::WorkshiftManager),
            "P" => Ok(Self::PoolManager),
            "M" => Ok(Self::AnyManager),
            "O" => Ok(Self::OtherMember),
            "S" => Ok(Self::SelfVerify),
            "A" => Ok(Self::Automatic),
            _ => Err(DomainError::InvalidTitle(format!("unknown verify policy '{s}'"))),
        }
    }
}

/// When a recurring shift happens within each week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Schedule {
    /// On one day of the week.
    Day(Weekday),
    /// At any time during the week.
    WeekLong,
}

impl Schedule {
    /// The weekday instances of this schedule are dated on.
    ///
    /// Week-long shifts are dated on the weekday the semester starts on, so
    /// their weeks line up with the semester's weeks.
    #[must_use]
    pub fn anchor_weekday(self, semester_start: Date) -> Weekday {
        match self {
            Self::Day(day) => day,
            Self::WeekLong => semester_start.weekday(),
        }
    }

    #[must_use]
    pub const fn day(self) -> Option<Weekday> {
        match self {
            Self::Day(day) => Some(day),
            Self::WeekLong => None,
        }
    }

    #[must_use]
    pub const fn is_week_long(self) -> bool {
        matches!(self, Self::WeekLong)
    }
}

/// A recurring weekly workshift template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegularWorkshift {
    pub id: RegularShiftId,
    pub workshift_type_id: WorkshiftTypeId,
    pub pool_id: PoolId,
    pub schedule: Schedule,
    /// Instances generated per occurrence.
    pub count: u32,
    pub hours: Hours,
    pub active: bool,
    /// Profiles assigned to every occurrence, in slot order.
    pub current_assignees: Vec<ProfileId>,
    pub start_time: Option<Time>,
    pub end_time: Option<Time>,
    pub verify: VerifyPolicy,
    pub addendum: String,
    pub is_manager_shift: bool,
}

impl RegularWorkshift {
    /// Returns the editable fields of this shift.
    #[must_use]
    pub fn to_draft(&self) -> RegularWorkshiftDraft {
        RegularWorkshiftDraft {
            workshift_type_id: self.workshift_type_id,
            pool_id: self.pool_id,
            schedule: self.schedule,
            count: self.count,
            hours: self.hours,
            active: self.active,
            current_assignees: self.current_assignees.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            verify: self.verify,
            addendum: self.addendum.clone(),
            is_manager_shift: self.is_manager_shift,
        }
    }
}

/// Input for creating or editing a recurring workshift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegularWorkshiftDraft {
    pub workshift_type_id: WorkshiftTypeId,
    pub pool_id: PoolId,
    pub schedule: Schedule,
    pub count: u32,
    pub hours: Hours,
    pub active: bool,
    pub current_assignees: Vec<ProfileId>,
    pub start_time: Option<Time>,
    pub end_time: Option<Time>,
    pub verify: VerifyPolicy,
    pub addendum: String,
    pub is_manager_shift: bool,
}
