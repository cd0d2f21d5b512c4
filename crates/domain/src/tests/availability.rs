// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Preference, Schedule, TimeBlock, TimeBlockId, is_available, overlaps_busy};
use time::Weekday;
use time::macros::time;

fn block(preference: Preference, day: Weekday, start: time::Time, end: time::Time) -> TimeBlock {
    TimeBlock {
        id: TimeBlockId::new(1),
        preference,
        day,
        start_time: start,
        end_time: end,
    }
}

#[test]
fn test_busy_overlap_is_half_open() {
    let blocks = [block(Preference::Busy, Weekday::Monday, time!(9:00), time!(12:00))];

    assert!(overlaps_busy(&blocks, Weekday::Monday, time!(11:00), time!(13:00)));
    assert!(overlaps_busy(&blocks, Weekday::Monday, time!(8:00), time!(9:30)));
    assert!(overlaps_busy(&blocks, Weekday::Monday, time!(9:00), time!(12:00)));
    assert!(overlaps_busy(&blocks, Weekday::Monday, time!(8:00), time!(13:00)));
    assert!(!overlaps_busy(&blocks, Weekday::Monday, time!(12:00), time!(13:00)));
    assert!(!overlaps_busy(&blocks, Weekday::Monday, time!(7:00), time!(9:00)));
    assert!(!overlaps_busy(&blocks, Weekday::Tuesday, time!(9:00), time!(12:00)));
}

#[test]
fn test_preferred_blocks_never_conflict() {
    let blocks = [block(Preference::Preferred, Weekday::Monday, time!(9:00), time!(12:00))];
    assert!(!overlaps_busy(&blocks, Weekday::Monday, time!(10:00), time!(11:00)));
}

#[test]
fn test_untimed_and_week_long_shifts_always_available() {
    let blocks = [block(Preference::Busy, Weekday::Monday, time!(0:00), time!(23:59))];

    assert!(is_available(&blocks, Schedule::WeekLong, Some(time!(9:00)), Some(time!(10:00))));
    assert!(is_available(&blocks, Schedule::Day(Weekday::Monday), None, None));
    assert!(!is_available(
        &blocks,
        Schedule::Day(Weekday::Monday),
        Some(time!(9:00)),
        Some(time!(10:00))
    ));
}
