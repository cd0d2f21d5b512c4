// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Column encodings shared by queries and mutations.

use farnsworth_domain::Hours;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, Time, UtcOffset, Weekday};

use crate::error::PersistenceError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

pub fn format_date(date: Date) -> Result<String, PersistenceError> {
    date.format(DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

pub fn parse_date(text: &str) -> Result<Date, PersistenceError> {
    Date::parse(text, DATE_FORMAT)
        .map_err(|e| PersistenceError::ReconstructionError(format!("bad date '{text}': {e}")))
}

pub fn format_optional_date(date: Option<Date>) -> Result<Option<String>, PersistenceError> {
    date.map(format_date).transpose()
}

pub fn parse_optional_date(text: Option<&str>) -> Result<Option<Date>, PersistenceError> {
    text.map(parse_date).transpose()
}

pub fn format_time(time: Time) -> Result<String, PersistenceError> {
    time.format(TIME_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

pub fn parse_time(text: &str) -> Result<Time, PersistenceError> {
    Time::parse(text, TIME_FORMAT)
        .map_err(|e| PersistenceError::ReconstructionError(format!("bad time '{text}': {e}")))
}

pub fn format_optional_time(time: Option<Time>) -> Result<Option<String>, PersistenceError> {
    time.map(format_time).transpose()
}

pub fn parse_optional_time(text: Option<&str>) -> Result<Option<Time>, PersistenceError> {
    text.map(parse_time).transpose()
}

pub fn format_timestamp(moment: OffsetDateTime) -> Result<String, PersistenceError> {
    moment
        .to_offset(UtcOffset::UTC)
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

pub fn parse_timestamp(text: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(text, &Rfc3339).map_err(|e| {
        PersistenceError::ReconstructionError(format!("bad timestamp '{text}': {e}"))
    })
}

/// Weekdays are stored as days from Monday.
#[must_use]
pub fn weekday_index(day: Weekday) -> i32 {
    i32::from(day.number_days_from_monday())
}

pub fn weekday_from_index(index: i32) -> Result<Weekday, PersistenceError> {
    match index {
        0..=6 => {
            let offset: u8 = index.to_u8().unwrap_or_default();
            Ok(Weekday::Monday.nth_next(offset))
        }
        _ => Err(PersistenceError::ReconstructionError(format!(
            "bad weekday index {index}"
        ))),
    }
}

pub fn to_u16(value: i32, column: &str) -> Result<u16, PersistenceError> {
    value.to_u16().ok_or_else(|| {
        PersistenceError::ReconstructionError(format!("{column} out of range: {value}"))
    })
}

pub fn to_u32(value: i32, column: &str) -> Result<u32, PersistenceError> {
    value.to_u32().ok_or_else(|| {
        PersistenceError::ReconstructionError(format!("{column} out of range: {value}"))
    })
}

pub fn from_u32(value: u32, column: &str) -> Result<i32, PersistenceError> {
    value.to_i32().ok_or_else(|| {
        PersistenceError::SerializationError(format!("{column} out of range: {value}"))
    })
}

/// Hours are stored as hundredths.
#[must_use]
pub const fn hours(value: i64) -> Hours {
    Hours::from_hundredths(value)
}

#[must_use]
pub const fn flag(value: i32) -> bool {
    value != 0
}

/// Decodes a stored enum code.
pub fn parse_code<T: FromStr>(text: &str, column: &str) -> Result<T, PersistenceError> {
    text.parse().map_err(|_| {
        PersistenceError::ReconstructionError(format!("bad {column} code '{text}'"))
    })
}

#[must_use]
pub fn to_flag(value: bool) -> i32 {
    i32::from(value)
}
