// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

const SCALE: i64 = 100;

/// Largest magnitude, in whole hours, accepted from outside input.
const LIMIT_WHOLE: i64 = 100_000;

/// A quantity of workshift hours with two decimal places of precision.
///
/// Stored as hundredths of an hour so that standing arithmetic never
/// accumulates floating point drift. Values may be negative (a member
/// owing hours has a negative standing).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hours(i64);

impl Hours {
    /// Zero hours.
    pub const ZERO: Self = Self(0);

    /// Largest magnitude a parsed or converted value may have.
    pub const LIMIT: Self = Self(LIMIT_WHOLE * SCALE);

    /// Creates an hour value from hundredths of an hour.
    #[must_use]
    pub const fn from_hundredths(hundredths: i64) -> Self {
        Self(hundredths)
    }

    /// Creates an hour value from a whole number of hours.
    #[must_use]
    pub const fn from_whole(hours: i64) -> Self {
        Self(hours * SCALE)
    }

    /// Converts a floating point hour count, rounding to two decimals.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not finite or its magnitude
    /// exceeds [`Hours::LIMIT`].
    pub fn from_f64(hours: f64) -> Result<Self, DomainError> {
        if !hours.is_finite() {
            return Err(DomainError::InvalidHoursValue(hours.to_string()));
        }

        (hours * 100.0)
            .round()
            .to_i64()
            .map(Self)
            .filter(|value| value.within_limit())
            .ok_or_else(|| DomainError::InvalidHoursValue(hours.to_string()))
    }

    /// Returns the value in hundredths of an hour.
    #[must_use]
    pub const fn hundredths(self) -> i64 {
        self.0
    }

    /// Returns the value as a floating point number of hours.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        self.0.to_f64().unwrap_or_default() / 100.0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    const fn within_limit(self) -> bool {
        self.0.unsigned_abs() <= Self::LIMIT.0.unsigned_abs()
    }

    /// Multiplies the value by a whole count (e.g. a number of periods).
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not fit.
    pub fn times(self, count: i64) -> Result<Self, DomainError> {
        self.0
            .checked_mul(count)
            .map(Self)
            .ok_or_else(|| DomainError::InvalidHours {
                field: "hours",
                reason: format!("{self} x {count} is out of range"),
            })
    }
}

impl Add for Hours {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Hours {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Hours {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Hours {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Neg for Hours {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl Sum for Hours {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl std::fmt::Display for Hours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign: &str = if self.0 < 0 { "-" } else { "" };
        let magnitude: u64 = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", magnitude / 100, magnitude % 100)
    }
}

impl FromStr for Hours {
    type Err = DomainError;

    /// Parses decimal hour strings such as `"5"`, `"2.5"` or `"-1.25"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidHoursValue(s.to_string());
        let trimmed: &str = s.trim();
        let (negative, digits): (bool, &str) = trimmed
            .strip_prefix('-')
            .map_or((false, trimmed), |rest| (true, rest));

        let (whole, fraction): (&str, &str) = digits.split_once('.').unwrap_or((digits, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if fraction.len() > 2
            || !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let fraction_value: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        let magnitude: i64 = whole_value
            .checked_mul(SCALE)
            .and_then(|v| v.checked_add(fraction_value))
            .ok_or_else(invalid)?;

        let value: Self = Self(if negative { -magnitude } else { magnitude });
        if !value.within_limit() {
            return Err(invalid());
        }
        Ok(value)
    }
}
