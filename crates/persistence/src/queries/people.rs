// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Member roster and manager position queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use farnsworth_domain::{Manager, ManagerId, Member, MemberId, MemberStatus};

use crate::data_models::{flag, hours};
use crate::diesel_schema::{managers, members};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = members)]
struct MemberRow {
    member_id: i64,
    username: String,
    first_name: String,
    last_name: String,
    status: String,
    is_superuser: i32,
    active: i32,
}

impl TryFrom<MemberRow> for Member {
    type Error = PersistenceError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        let status: MemberStatus = row.status.parse().map_err(|_| {
            PersistenceError::ReconstructionError(format!("bad member status '{}'", row.status))
        })?;
        Ok(Self {
            id: MemberId::new(row.member_id),
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            status,
            is_superuser: flag(row.is_superuser),
            active: flag(row.active),
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = managers)]
struct ManagerRow {
    manager_id: i64,
    title: String,
    incumbent_member_id: Option<i64>,
    workshift_manager: i32,
    president: i32,
    active: i32,
    workshift_hours: i64,
}

impl From<ManagerRow> for Manager {
    fn from(row: ManagerRow) -> Self {
        Self {
            id: ManagerId::new(row.manager_id),
            title: row.title,
            incumbent: row.incumbent_member_id.map(MemberId::new),
            workshift_manager: flag(row.workshift_manager),
            president: flag(row.president),
            active: flag(row.active),
            workshift_hours: hours(row.workshift_hours),
        }
    }
}

/// Retrieves a member by id.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
pub fn get_member(
    conn: &mut SqliteConnection,
    id: MemberId,
) -> Result<Option<Member>, PersistenceError> {
    members::table
        .filter(members::member_id.eq(id.value()))
        .select(MemberRow::as_select())
        .first(conn)
        .optional()?
        .map(Member::try_from)
        .transpose()
}

/// Retrieves a member by username.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
pub fn find_member_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<Member>, PersistenceError> {
    members::table
        .filter(members::username.eq(username))
        .select(MemberRow::as_select())
        .first(conn)
        .optional()?
        .map(Member::try_from)
        .transpose()
}

/// Lists every member by id.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn list_members(conn: &mut SqliteConnection) -> Result<Vec<Member>, PersistenceError> {
    members::table
        .order(members::member_id.asc())
        .select(MemberRow::as_select())
        .load(conn)?
        .into_iter()
        .map(Member::try_from)
        .collect()
}

/// Retrieves a manager position by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_manager(
    conn: &mut SqliteConnection,
    id: ManagerId,
) -> Result<Option<Manager>, PersistenceError> {
    Ok(managers::table
        .filter(managers::manager_id.eq(id.value()))
        .select(ManagerRow::as_select())
        .first(conn)
        .optional()?
        .map(Manager::from))
}

/// Lists every manager position by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_managers(conn: &mut SqliteConnection) -> Result<Vec<Manager>, PersistenceError> {
    Ok(managers::table
        .order(managers::manager_id.asc())
        .select(ManagerRow::as_select())
        .load(conn)?
        .into_iter()
        .map(Manager::from)
        .collect())
}
