// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly recurrence arithmetic for regular workshifts.

use crate::error::DomainError;
use time::{Date, Duration, Weekday};

/// Returns the first date on or after `from` that falls on `weekday`.
#[must_use]
pub fn next_occurrence(from: Date, weekday: Weekday) -> Date {
    let ahead: i64 = i64::from(
        (7 + weekday.number_days_from_monday() - from.weekday().number_days_from_monday()) % 7,
    );
    from.saturating_add(Duration::days(ahead))
}

/// Every date on `weekday`, one week apart, from the later of `today` and
/// `semester_start` through `semester_end` inclusive.
///
/// Returns an empty list once the semester is over.
#[must_use]
pub fn weekly_dates(
    weekday: Weekday,
    today: Date,
    semester_start: Date,
    semester_end: Date,
) -> Vec<Date> {
    let mut dates: Vec<Date> = Vec::new();
    let mut day: Date = next_occurrence(today.max(semester_start), weekday);

    while day <= semester_end {
        dates.push(day);
        match day.checked_add(Duration::weeks(1)) {
            Some(next) => day = next,
            None => break,
        }
    }
    dates
}

/// Signed number of days to move an instance when its shift moves from
/// `old` to `new` within the week.
#[must_use]
pub fn day_delta(old: Weekday, new: Weekday) -> i64 {
    i64::from(new.number_days_from_monday()) - i64::from(old.number_days_from_monday())
}

/// Moves `date` by `days`.
///
/// # Errors
///
/// Returns an error if the result is out of range.
pub fn shift_date(date: Date, days: i64) -> Result<Date, DomainError> {
    date.checked_add(Duration::days(days))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("moving {date} by {days} days"),
        })
}
