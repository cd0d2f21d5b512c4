// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::ids::{MemberId, ProfileId, RatingId, SemesterId, TimeBlockId, WorkshiftTypeId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{OffsetDateTime, Time, Weekday};

/// Whether a member is busy or prefers to work during a time block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preference {
    Busy,
    Preferred,
}

impl Preference {
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Busy => 0,
            Self::Preferred => 1,
        }
    }

    /// Decodes the storage code.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown codes.
    pub fn from_code(code: i32) -> Result<Self, DomainError> {
        match code {
            0 => Ok(Self::Busy),
            1 => Ok(Self::Preferred),
            _ => Err(DomainError::InvalidTitle(format!("unknown preference {code}"))),
        }
    }
}

/// A weekly availability window from the shared catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBlock {
    pub id: TimeBlockId,
    pub preference: Preference,
    pub day: Weekday,
    pub start_time: Time,
    pub end_time: Time,
}

/// The identifying fields of a time block; equal specs share one catalog
/// row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeBlockSpec {
    pub preference: Preference,
    pub day: Weekday,
    pub start_time: Time,
    pub end_time: Time,
}

/// How much a member likes a workshift type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RatingLevel {
    Dislike,
    Indifferent,
    Like,
}

impl RatingLevel {
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Dislike => 0,
            Self::Indifferent => 1,
            Self::Like => 2,
        }
    }

    /// Decodes the storage code.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown codes.
    pub fn from_code(code: i32) -> Result<Self, DomainError> {
        match code {
            0 => Ok(Self::Dislike),
            1 => Ok(Self::Indifferent),
            2 => Ok(Self::Like),
            _ => Err(DomainError::InvalidTitle(format!("unknown rating {code}"))),
        }
    }
}

impl FromStr for RatingLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dislike" => Ok(Self::Dislike),
            "indifferent" => Ok(Self::Indifferent),
            "like" => Ok(Self::Like),
            _ => Err(DomainError::InvalidTitle(format!("unknown rating '{s}'"))),
        }
    }
}

/// A (rating, type) pair from the shared catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkshiftRating {
    pub id: RatingId,
    pub rating: RatingLevel,
    pub workshift_type_id: WorkshiftTypeId,
}

/// A member's workshift record for one semester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkshiftProfile {
    pub id: ProfileId,
    pub member_id: MemberId,
    pub semester_id: SemesterId,
    pub note: String,
    /// When preferences were first saved, if ever.
    pub preference_save_time: Option<OffsetDateTime>,
    pub time_blocks: Vec<TimeBlockId>,
    pub ratings: Vec<RatingId>,
}
