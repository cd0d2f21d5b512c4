// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hour standing rules.
//!
//! A member's standing in a pool is derived from three sources:
//! - the manual `hour_adjustment`
//! - the requirement debited once per completed period
//! - closed instances (verified credit their hours, blown debit them)
//!
//! Incremental updates must always agree with [`derive_standing`].

use crate::error::DomainError;
use crate::hours::Hours;
use crate::pool::PoolHours;
use time::Date;

/// How an edit to a pool hour record affects its standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandingUpdate {
    /// Neither field that feeds standing changed.
    Unchanged,
    /// Only the adjustment changed; apply this delta.
    Delta(Hours),
    /// The requirement changed; re-derive from history.
    Recompute,
}

/// Decides how standing must follow an edit of `hours` and
/// `hour_adjustment`.
#[must_use]
pub fn classify_edit(current: &PoolHours, new_hours: Hours, new_adjustment: Hours) -> StandingUpdate {
    if new_hours != current.hours {
        StandingUpdate::Recompute
    } else if new_adjustment != current.hour_adjustment {
        StandingUpdate::Delta(new_adjustment - current.hour_adjustment)
    } else {
        StandingUpdate::Unchanged
    }
}

/// Returns whether a member's requirement should follow a change of the
/// pool default.
///
/// A record that no longer equals the previous default was overridden by
/// hand and keeps its value.
#[must_use]
pub fn follows_pool_default(record_hours: Hours, previous_default: Hours) -> bool {
    record_hours == previous_default
}

/// Number of requirement periods completed between the semester start and
/// `moment`.
///
/// Periods stop accruing at the semester end. A pool with
/// `weeks_per_period == 0` has a single requirement that comes due once
/// the semester is over.
#[must_use]
pub fn periods_elapsed(
    semester_start: Date,
    semester_end: Date,
    weeks_per_period: u32,
    moment: Date,
) -> i64 {
    if moment < semester_start {
        return 0;
    }
    if weeks_per_period == 0 {
        return i64::from(moment > semester_end);
    }

    let days: i64 = (moment.min(semester_end) - semester_start).whole_days();
    days / (7 * i64::from(weeks_per_period))
}

/// Derives a standing from its sources.
///
/// # Arguments
///
/// * `hour_adjustment` - The manual adjustment
/// * `requirement` - Hours required per period
/// * `periods` - Periods debited so far
/// * `closed_effects` - Signed hour effects of closed instances
///
/// # Errors
///
/// Returns an error if the periodic debit does not fit.
pub fn derive_standing<I>(
    hour_adjustment: Hours,
    requirement: Hours,
    periods: i64,
    closed_effects: I,
) -> Result<Hours, DomainError>
where
    I: IntoIterator<Item = Hours>,
{
    Ok(hour_adjustment - requirement.times(periods)? + closed_effects.into_iter().sum())
}
