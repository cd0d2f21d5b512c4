// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::hours::Hours;
use time::Date;

/// Computes the three fine-date standing snapshots for one member.
///
/// Each snapshot holds what changed since the previous one: the standing
/// as of that fine date minus all earlier snapshots. A negative snapshot
/// is a fine, a positive one a repayment. Fine dates that are unset or
/// still in the future snapshot to zero.
///
/// # Arguments
///
/// * `fine_dates` - The pool's fine dates
/// * `today` - The current date
/// * `standing_at` - Standing of the member as of a given date
///
/// # Errors
///
/// Returns the first error produced by `standing_at`.
pub fn snapshot_fines<F, E>(
    fine_dates: [Option<Date>; 3],
    today: Date,
    standing_at: F,
) -> Result<[Hours; 3], E>
where
    F: Fn(Date) -> Result<Hours, E>,
{
    let mut snapshots: [Hours; 3] = [Hours::ZERO; 3];
    let mut assessed: Hours = Hours::ZERO;

    for (slot, fine_date) in snapshots.iter_mut().zip(fine_dates) {
        if let Some(date) = fine_date.filter(|date| *date <= today) {
            let snapshot: Hours = standing_at(date)? - assessed;
            *slot = snapshot;
            assessed += snapshot;
        }
    }
    Ok(snapshots)
}

/// Converts a snapshot into a fine in cents at `rate_cents` per hour.
///
/// Only negative snapshots are fined.
#[must_use]
pub const fn fine_amount_cents(snapshot: Hours, rate_cents: Option<i64>) -> i64 {
    match rate_cents {
        Some(rate) if snapshot.is_negative() => -snapshot.hundredths() * rate / 100,
        _ => 0,
    }
}
