// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::hours::Hours;
use crate::instance::InstanceInfoDraft;
use crate::pool::PoolDraft;
use crate::preferences::TimeBlockSpec;
use crate::semester::NewSemester;
use crate::shift::{RegularWorkshiftDraft, WorkshiftTypeDraft};
use std::collections::HashSet;
use time::Time;

const MAX_TITLE_LENGTH: usize = 100;
/// Most instances a recurring shift may create per occurrence.
pub const MAX_SHIFT_COUNT: u32 = 20;
/// Most hours a single shift may be worth.
pub const MAX_SHIFT_HOURS: i64 = 168;
/// Most hours a pool may require per period.
pub const MAX_POOL_HOURS: i64 = 1000;

/// Returns whether `username` is a valid login name.
///
/// Usernames consist of ASCII letters, digits and underscores.
#[must_use]
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Returns whether `name` is a valid first or last name.
///
/// Names consist of ASCII letters and apostrophes. Like
/// [`is_valid_username`], this returns `true` for acceptable input.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic() || c == '\'')
}

/// Validates the identifying fields of a new member.
///
/// # Errors
///
/// Returns an error naming the first invalid field.
pub fn validate_member_fields(
    username: &str,
    first_name: &str,
    last_name: &str,
) -> Result<(), DomainError> {
    if !is_valid_username(username) {
        return Err(DomainError::InvalidUsername(username.to_string()));
    }
    for name in [first_name, last_name] {
        if !is_valid_name(name) {
            return Err(DomainError::InvalidName(name.to_string()));
        }
    }
    Ok(())
}

/// Validates a title for pools, types and standalone instances.
///
/// # Errors
///
/// Returns an error if the title is blank or longer than 100 characters.
pub fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "title cannot be empty",
        )));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(DomainError::InvalidTitle(format!(
            "title cannot exceed {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Checks that `hours` lies within `0..=max_whole` hours.
///
/// # Errors
///
/// Returns [`DomainError::InvalidHours`] naming `field` otherwise.
pub fn validate_hour_range(
    field: &'static str,
    hours: Hours,
    max_whole: i64,
) -> Result<(), DomainError> {
    if hours.is_negative() {
        return Err(DomainError::InvalidHours {
            field,
            reason: format!("{hours} is negative"),
        });
    }
    if hours > Hours::from_whole(max_whole) {
        return Err(DomainError::InvalidHours {
            field,
            reason: format!("{hours} exceeds {max_whole} hours"),
        });
    }
    Ok(())
}

fn validate_time_range(start: Option<Time>, end: Option<Time>) -> Result<(), DomainError> {
    match (start, end) {
        (Some(start_time), Some(end_time)) if start_time > end_time => {
            Err(DomainError::InvalidTimeRange {
                start_time,
                end_time,
            })
        }
        _ => Ok(()),
    }
}

/// Validates a new semester.
///
/// # Errors
///
/// Returns an error if the start date is not before the end date.
pub fn validate_semester(semester: &NewSemester) -> Result<(), DomainError> {
    if semester.start_date >= semester.end_date {
        return Err(DomainError::InvalidSemesterDates {
            start_date: semester.start_date,
            end_date: semester.end_date,
        });
    }
    Ok(())
}

/// Validates pool fields.
///
/// # Errors
///
/// Returns an error for a bad title or hours that are negative or above
/// [`MAX_POOL_HOURS`].
pub fn validate_pool(pool: &PoolDraft) -> Result<(), DomainError> {
    validate_title(&pool.title)?;
    validate_requirement_hours(pool.hours)
}

/// Validates a per-period hour requirement.
///
/// # Errors
///
/// Returns an error for hours that are negative or above
/// [`MAX_POOL_HOURS`].
pub fn validate_requirement_hours(hours: Hours) -> Result<(), DomainError> {
    validate_hour_range("hours", hours, MAX_POOL_HOURS)
}

/// Validates workshift type fields.
///
/// # Errors
///
/// Returns an error for a bad title.
pub fn validate_workshift_type(workshift_type: &WorkshiftTypeDraft) -> Result<(), DomainError> {
    validate_title(&workshift_type.title)
}

/// Validates a recurring shift's own fields.
///
/// Busy-block and semester checks on the assignees need storage and are
/// done by the caller.
///
/// # Errors
///
/// Returns an error for a count outside `1..=MAX_SHIFT_COUNT`, hours
/// outside `0..=MAX_SHIFT_HOURS`, an inverted time range, or an assignee
/// list that is too long or repeats a profile.
pub fn validate_regular_shift(shift: &RegularWorkshiftDraft) -> Result<(), DomainError> {
    if !(1..=MAX_SHIFT_COUNT).contains(&shift.count) {
        return Err(DomainError::InvalidShiftCount { count: shift.count });
    }
    validate_hour_range("hours", shift.hours, MAX_SHIFT_HOURS)?;
    validate_time_range(shift.start_time, shift.end_time)?;

    let slots: usize = usize::try_from(shift.count).unwrap_or(usize::MAX);
    if shift.current_assignees.len() > slots {
        return Err(DomainError::TooManyAssignees {
            count: shift.count,
            assignees: shift.current_assignees.len(),
        });
    }

    let mut seen = HashSet::new();
    for profile in &shift.current_assignees {
        if !seen.insert(*profile) {
            return Err(DomainError::DuplicateAssignee(*profile));
        }
    }
    Ok(())
}

/// Validates standalone instance details.
///
/// # Errors
///
/// Returns an error for a bad title or an inverted time range.
pub fn validate_instance_info(info: &InstanceInfoDraft) -> Result<(), DomainError> {
    validate_title(&info.title)?;
    validate_time_range(info.start_time, info.end_time)
}

/// Validates a time block.
///
/// # Errors
///
/// Returns an error if the block starts after it ends.
pub fn validate_time_block(block: &TimeBlockSpec) -> Result<(), DomainError> {
    validate_time_range(Some(block.start_time), Some(block.end_time))
}

/// Validates an instance hour value.
///
/// # Errors
///
/// Returns an error for hours that are negative or above
/// [`MAX_SHIFT_HOURS`].
pub fn validate_instance_hours(hours: Hours) -> Result<(), DomainError> {
    validate_hour_range("hours", hours, MAX_SHIFT_HOURS)
}
