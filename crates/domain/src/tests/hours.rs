// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, Hours};

#[test]
fn test_parse_whole_and_fractional_hours() {
    assert_eq!("5".parse::<Hours>(), Ok(Hours::from_whole(5)));
    assert_eq!("2.5".parse::<Hours>(), Ok(Hours::from_hundredths(250)));
    assert_eq!("0.75".parse::<Hours>(), Ok(Hours::from_hundredths(75)));
    assert_eq!("-1.25".parse::<Hours>(), Ok(Hours::from_hundredths(-125)));
    assert_eq!(".5".parse::<Hours>(), Ok(Hours::from_hundredths(50)));
}

#[test]
fn test_parse_rejects_garbage() {
    for input in ["", "-", "abc", "1.234", "1.2.3", "1,5"] {
        assert_eq!(
            input.parse::<Hours>(),
            Err(DomainError::InvalidHoursValue(input.to_string())),
            "input {input:?} should be rejected"
        );
    }
}

#[test]
fn test_display_uses_two_decimals() {
    assert_eq!(Hours::from_whole(2).to_string(), "2.00");
    assert_eq!(Hours::from_hundredths(-125).to_string(), "-1.25");
    assert_eq!(Hours::from_hundredths(-5).to_string(), "-0.05");
}

#[test]
fn test_from_f64_rounds_to_hundredths() {
    assert_eq!(Hours::from_f64(2.004), Ok(Hours::from_hundredths(200)));
    assert_eq!(Hours::from_f64(-0.5), Ok(Hours::from_hundredths(-50)));
    assert!(Hours::from_f64(f64::NAN).is_err());
    assert!(Hours::from_f64(f64::INFINITY).is_err());
}

#[test]
fn test_arithmetic() {
    let mut standing: Hours = Hours::ZERO;
    standing += Hours::from_whole(2);
    standing -= Hours::from_hundredths(350);
    assert_eq!(standing, Hours::from_hundredths(-150));
    assert!(standing.is_negative());
    assert_eq!(-standing, Hours::from_hundredths(150));
    assert_eq!(Hours::from_whole(3).times(4), Ok(Hours::from_whole(12)));

    let total: Hours = [Hours::from_whole(1), Hours::from_whole(2)].into_iter().sum();
    assert_eq!(total, Hours::from_whole(3));
}

#[test]
fn test_from_f64_rejects_values_past_limit() {
    assert_eq!(Hours::from_f64(100_000.0), Ok(Hours::LIMIT));
    assert_eq!(
        Hours::from_f64(5e16),
        Err(DomainError::InvalidHoursValue(5e16_f64.to_string()))
    );
    assert!(Hours::from_f64(-100_000.01).is_err());
}

#[test]
fn test_parse_rejects_values_past_limit() {
    assert!("100000".parse::<Hours>().is_ok());
    assert!("100000.01".parse::<Hours>().is_err());
    assert!("-250000".parse::<Hours>().is_err());
}

#[test]
fn test_times_overflow_is_an_error() {
    let huge: Hours = Hours::from_hundredths(i64::MAX / 2);

    assert!(matches!(
        huge.times(3),
        Err(DomainError::InvalidHours { field: "hours", .. })
    ));
    assert_eq!(Hours::LIMIT.times(-1), Ok(-Hours::LIMIT));
}

#[test]
fn test_arithmetic_saturates_instead_of_wrapping() {
    let top: Hours = Hours::from_hundredths(i64::MAX);

    assert_eq!(top + Hours::from_whole(1), top);
    let bottom: Hours = Hours::from_hundredths(i64::MIN);
    assert_eq!(bottom - Hours::from_whole(1), bottom);
}
