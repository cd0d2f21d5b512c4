// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::hours::Hours;
use crate::ids::{ManagerId, PoolHoursId, PoolId, ProfileId, SemesterId};
use time::Date;

/// A bucket of hour requirements within a semester.
///
/// Every semester has one primary pool ("Regular Workshift"); houses may add
/// further pools for specialised duties such as kitchen or humor shifts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkshiftPool {
    pub id: PoolId,
    pub semester_id: SemesterId,
    pub title: String,
    /// Manager positions that administer this pool.
    pub managers: Vec<ManagerId>,
    /// Hours before a shift within which signing out needs a substitute.
    pub sign_out_cutoff: u32,
    /// Hours after a shift after which it is marked blown if unverified.
    pub verify_cutoff: u32,
    /// Default hour requirement per period.
    pub hours: Hours,
    /// Length of a requirement period in weeks. Zero means once per semester.
    pub weeks_per_period: u32,
    pub first_fine_date: Option<Date>,
    pub second_fine_date: Option<Date>,
    pub third_fine_date: Option<Date>,
    /// Whether any member may mark a shift in this pool as blown.
    pub any_blown: bool,
    /// Whether workshifters may verify their own shifts.
    pub self_verify: bool,
    pub is_primary: bool,
}

impl WorkshiftPool {
    #[must_use]
    pub const fn fine_dates(&self) -> [Option<Date>; 3] {
        [
            self.first_fine_date,
            self.second_fine_date,
            self.third_fine_date,
        ]
    }

    /// Human readable requirement, e.g. `5.00 hours per week`.
    #[must_use]
    pub fn requirement_label(&self) -> String {
        match self.weeks_per_period {
            0 => format!("{} hours per semester", self.hours),
            1 => format!("{} hours per week", self.hours),
            weeks => format!("{} hours per {weeks} weeks", self.hours),
        }
    }
}

/// Editable pool fields, used both to create and to edit a pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolDraft {
    pub title: String,
    pub managers: Vec<ManagerId>,
    pub sign_out_cutoff: u32,
    pub verify_cutoff: u32,
    pub hours: Hours,
    pub weeks_per_period: u32,
    pub first_fine_date: Option<Date>,
    pub second_fine_date: Option<Date>,
    pub third_fine_date: Option<Date>,
    pub any_blown: bool,
    pub self_verify: bool,
}

impl PoolDraft {
    /// A draft with the given title and hours and every other field at
    /// its default.
    #[must_use]
    pub const fn with_defaults(title: String, hours: Hours, sign_out_cutoff: u32, verify_cutoff: u32) -> Self {
        Self {
            title,
            managers: Vec::new(),
            sign_out_cutoff,
            verify_cutoff,
            hours,
            weeks_per_period: 1,
            first_fine_date: None,
            second_fine_date: None,
            third_fine_date: None,
            any_blown: false,
            self_verify: false,
        }
    }
}

/// Input for inserting a pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPool {
    pub semester_id: SemesterId,
    pub is_primary: bool,
    pub draft: PoolDraft,
}

/// One member's hour record within one pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolHours {
    pub id: PoolHoursId,
    pub profile_id: ProfileId,
    pub pool_id: PoolId,
    /// Required hours per period.
    pub hours: Hours,
    /// Hours per period covered by recurring shift assignments.
    pub assigned_hours: Hours,
    /// Current balance. Negative means the member owes hours.
    pub standing: Hours,
    /// Manual correction folded into `standing`.
    pub hour_adjustment: Hours,
    /// Date through which period requirements have been debited.
    pub last_updated: Option<Date>,
    pub first_date_standing: Hours,
    pub second_date_standing: Hours,
    pub third_date_standing: Hours,
}

impl PoolHours {
    /// Hours per period not yet covered by an assignment.
    #[must_use]
    pub fn unassigned(&self) -> Hours {
        self.hours - self.assigned_hours
    }

    #[must_use]
    pub const fn date_standings(&self) -> [Hours; 3] {
        [
            self.first_date_standing,
            self.second_date_standing,
            self.third_date_standing,
        ]
    }

    pub const fn set_date_standings(&mut self, standings: [Hours; 3]) {
        self.first_date_standing = standings[0];
        self.second_date_standing = standings[1];
        self.third_date_standing = standings[2];
    }
}

/// Input for inserting a pool hour record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewPoolHours {
    pub profile_id: ProfileId,
    pub pool_id: PoolId,
    pub hours: Hours,
    pub hour_adjustment: Hours,
    /// Starting standing; a new record starts at its adjustment.
    pub standing: Hours,
}

impl NewPoolHours {
    /// A record requiring `hours` with no adjustment.
    #[must_use]
    pub const fn seeded(profile_id: ProfileId, pool_id: PoolId, hours: Hours) -> Self {
        Self {
            profile_id,
            pool_id,
            hours,
            hour_adjustment: Hours::ZERO,
            standing: Hours::ZERO,
        }
    }
}
