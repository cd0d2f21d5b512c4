// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::hours::Hours;
use crate::ids::{MemberId, SemesterId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// The season a semester runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// Returns the two letter storage code (`Sp`, `Su`, `Fa`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Spring => "Sp",
            Self::Summer => "Su",
            Self::Fall => "Fa",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
        }
    }
}

impl FromStr for Season {
    type Err = DomainError;

    /// Accepts either the storage code or the full season name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Sp" | "Spring" => Ok(Self::Spring),
            "Su" | "Summer" => Ok(Self::Summer),
            "Fa" | "Fall" => Ok(Self::Fall),
            _ => Err(DomainError::InvalidTitle(format!("unknown season '{s}'"))),
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A semester of workshift.
///
/// Semesters partition all workshift data. Which semester is current is
/// not a property of the semester itself: it is held by a single
/// reference so that two semesters can never both be current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Semester {
    pub id: SemesterId,
    pub season: Season,
    pub year: u16,
    /// Fine rate in cents per hour owed, if fines are charged.
    pub rate_cents: Option<i64>,
    /// Link to the semester's workshift policy document.
    pub policy: Option<String>,
    pub start_date: Date,
    pub end_date: Date,
    /// Whether members may still edit their workshift preferences.
    pub preferences_open: bool,
    /// Members who hold workshift-manager authority for this semester.
    pub workshift_managers: Vec<MemberId>,
}

impl Semester {
    /// Returns the short key used in URLs, e.g. `Fa2024`.
    #[must_use]
    pub fn url_key(&self) -> String {
        format!("{}{}", self.season.code(), self.year)
    }

    /// Returns whether `date` falls within the semester, inclusive.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Number of whole days from the semester start to `today`, clamped to
    /// the semester length.
    #[must_use]
    pub fn days_elapsed(&self, today: Date) -> i64 {
        let total: i64 = (self.end_date - self.start_date).whole_days();
        (today - self.start_date).whole_days().clamp(0, total)
    }
}

impl std::fmt::Display for Semester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.season, self.year)
    }
}

/// Input for creating a semester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSemester {
    pub season: Season,
    pub year: u16,
    pub rate_cents: Option<i64>,
    pub policy: Option<String>,
    pub start_date: Date,
    pub end_date: Date,
}

/// Defaults applied when the system creates workshift records on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkshiftSettings {
    /// Weekly hours required by a newly created primary pool.
    pub default_hours: Hours,
    /// Hours before a shift after which signing out needs a substitute.
    pub sign_out_cutoff: u32,
    /// Hours after a shift after which an unverified shift is blown.
    pub verify_cutoff: u32,
}

impl WorkshiftSettings {
    /// Title given to every semester's primary pool.
    pub const PRIMARY_POOL_TITLE: &'static str = "Regular Workshift";
}

impl Default for WorkshiftSettings {
    fn default() -> Self {
        Self {
            default_hours: Hours::from_whole(5),
            sign_out_cutoff: 24,
            verify_cutoff: 8,
        }
    }
}
