// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::preferences::{Preference, TimeBlock};
use crate::shift::Schedule;
use time::{Time, Weekday};

/// Returns whether any busy block on `day` overlaps `[start, end)`.
#[must_use]
pub fn overlaps_busy(blocks: &[TimeBlock], day: Weekday, start: Time, end: Time) -> bool {
    blocks.iter().any(|block| {
        block.preference == Preference::Busy
            && block.day == day
            && block.start_time < end
            && start < block.end_time
    })
}

/// Returns whether a member with `blocks` can take a shift.
///
/// Shifts without a fixed day and time never conflict.
#[must_use]
pub fn is_available(
    blocks: &[TimeBlock],
    schedule: Schedule,
    start: Option<Time>,
    end: Option<Time>,
) -> bool {
    match (schedule.day(), start, end) {
        (Some(day), Some(start_time), Some(end_time)) => {
            !overlaps_busy(blocks, day, start_time, end_time)
        }
        _ => true,
    }
}
