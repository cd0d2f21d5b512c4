// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::hours::Hours;
use crate::ids::{InstanceId, LogEntryId, ProfileId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// What happened to an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogEntryType {
    Assigned,
    Blown,
    SignIn,
    SignOut,
    Verify,
    Sell,
    ModifyHours,
}

impl LogEntryType {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Assigned => "A",
            Self::Blown => "B",
            Self::SignIn => "I",
            Self::SignOut => "O",
            Self::Verify => "V",
            Self::Sell => "S",
            Self::ModifyHours => "M",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Assigned => "Assigned",
            Self::Blown => "Blown",
            Self::SignIn => "Sign In",
            Self::SignOut => "Sign Out",
            Self::Verify => "Verify",
            Self::Sell => "Sell",
            Self::ModifyHours => "Modify Hours",
        }
    }
}

impl FromStr for LogEntryType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Self::Assigned),
            "B" => Ok(Self::Blown),
            "I" => Ok(Self::SignIn),
            "O" => Ok(Self::SignOut),
            "V" => Ok(Self::Verify),
            "S" => Ok(Self::Sell),
            "M" => Ok(Self::ModifyHours),
            _ => Err(DomainError::InvalidTitle(format!("unknown log entry type '{s}'"))),
        }
    }
}

/// An append-only record of one interaction with an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftLogEntry {
    pub id: LogEntryId,
    pub instance_id: InstanceId,
    /// The member the entry concerns, if any.
    pub person: Option<ProfileId>,
    pub entry_time: OffsetDateTime,
    /// New hour value, for hour modifications.
    pub hours: Option<Hours>,
    pub note: String,
    pub entry_type: LogEntryType,
}

/// Input for appending a log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLogEntry {
    pub person: Option<ProfileId>,
    pub entry_time: OffsetDateTime,
    pub hours: Option<Hours>,
    pub note: String,
    pub entry_type: LogEntryType,
}

impl NewLogEntry {
    /// An entry with no hours and no note.
    #[must_use]
    pub const fn simple(
        entry_type: LogEntryType,
        person: Option<ProfileId>,
        entry_time: OffsetDateTime,
    ) -> Self {
        Self {
            person,
            entry_time,
            hours: None,
            note: String::new(),
            entry_type,
        }
    }
}
