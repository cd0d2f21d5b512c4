// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{day_delta, next_occurrence, shift_date, weekly_dates};
use time::macros::date;
use time::{Date, Weekday};

#[test]
fn test_next_occurrence_same_day() {
    // 2024-09-02 is a Monday.
    assert_eq!(
        next_occurrence(date!(2024 - 09 - 02), Weekday::Monday),
        date!(2024 - 09 - 02)
    );
}

#[test]
fn test_next_occurrence_later_in_week() {
    assert_eq!(
        next_occurrence(date!(2024 - 09 - 02), Weekday::Sunday),
        date!(2024 - 09 - 08)
    );
    assert_eq!(
        next_occurrence(date!(2024 - 09 - 04), Weekday::Monday),
        date!(2024 - 09 - 09)
    );
}

#[test]
fn test_weekly_dates_cover_every_monday_through_end() {
    let dates: Vec<Date> = weekly_dates(
        Weekday::Monday,
        date!(2024 - 09 - 02),
        date!(2024 - 08 - 26),
        date!(2024 - 12 - 15),
    );

    assert_eq!(dates.first(), Some(&date!(2024 - 09 - 02)));
    assert_eq!(dates.last(), Some(&date!(2024 - 12 - 09)));
    assert_eq!(dates.len(), 15);
    for pair in dates.windows(2) {
        assert_eq!((pair[1] - pair[0]).whole_days(), 7);
    }
}

#[test]
fn test_weekly_dates_start_no_earlier_than_semester() {
    let dates: Vec<Date> = weekly_dates(
        Weekday::Monday,
        date!(2024 - 08 - 01),
        date!(2024 - 08 - 26),
        date!(2024 - 09 - 10),
    );

    assert_eq!(
        dates,
        vec![
            date!(2024 - 08 - 26),
            date!(2024 - 09 - 02),
            date!(2024 - 09 - 09)
        ]
    );
}

#[test]
fn test_weekly_dates_empty_after_semester() {
    let dates: Vec<Date> = weekly_dates(
        Weekday::Monday,
        date!(2025 - 01 - 06),
        date!(2024 - 08 - 26),
        date!(2024 - 12 - 15),
    );
    assert!(dates.is_empty());
}

#[test]
fn test_day_delta_is_signed() {
    assert_eq!(day_delta(Weekday::Monday, Weekday::Wednesday), 2);
    assert_eq!(day_delta(Weekday::Friday, Weekday::Tuesday), -3);
    assert_eq!(day_delta(Weekday::Sunday, Weekday::Sunday), 0);
}

#[test]
fn test_shift_date() {
    assert_eq!(
        shift_date(date!(2024 - 09 - 02), 2),
        Ok(date!(2024 - 09 - 04))
    );
    assert_eq!(
        shift_date(date!(2024 - 09 - 02), -1),
        Ok(date!(2024 - 09 - 01))
    );
}
