// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::hours::Hours;
use crate::ids::{ManagerId, MemberId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Residency status of a house member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberStatus {
    Resident,
    Boarder,
    Alumnus,
}

impl MemberStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resident => "resident",
            Self::Boarder => "boarder",
            Self::Alumnus => "alumnus",
        }
    }
}

impl FromStr for MemberStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resident" => Ok(Self::Resident),
            "boarder" => Ok(Self::Boarder),
            "alumnus" => Ok(Self::Alumnus),
            _ => Err(DomainError::InvalidTitle(format!("unknown member status '{s}'"))),
        }
    }
}

/// A house member as known to the workshift module.
///
/// Only residents receive workshift profiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub status: MemberStatus,
    pub is_superuser: bool,
    pub active: bool,
}

impl Member {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns whether this member should hold a workshift profile.
    #[must_use]
    pub fn is_workshifter(&self) -> bool {
        self.active && self.status == MemberStatus::Resident
    }
}

/// Input for adding a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub status: MemberStatus,
    pub is_superuser: bool,
}

/// A house manager position, such as "Workshift Manager" or "President".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manager {
    pub id: ManagerId,
    pub title: String,
    /// The member currently holding the position.
    pub incumbent: Option<MemberId>,
    /// Whether the position carries workshift-manager authority.
    pub workshift_manager: bool,
    pub president: bool,
    pub active: bool,
    /// Weekly hours credited for holding the position.
    pub workshift_hours: Hours,
}

impl Manager {
    /// Returns whether `member` currently holds this active position.
    #[must_use]
    pub fn is_held_by(&self, member: MemberId) -> bool {
        self.active && self.incumbent == Some(member)
    }
}

/// Input for creating a manager position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewManager {
    pub title: String,
    pub incumbent: Option<MemberId>,
    pub workshift_manager: bool,
    pub president: bool,
    pub workshift_hours: Hours,
}
