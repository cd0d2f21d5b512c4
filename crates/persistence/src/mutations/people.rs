// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use farnsworth_domain::{ManagerId, MemberId, NewManager, NewMember};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::to_flag;
use crate::diesel_schema::{managers, members};
use crate::error::PersistenceError;

/// Inserts an active member.
///
/// # Errors
///
/// Returns an error if the insert fails, including a duplicate username.
pub fn insert_member(
    conn: &mut SqliteConnection,
    member: &NewMember,
) -> Result<MemberId, PersistenceError> {
    diesel::insert_into(members::table)
        .values((
            members::username.eq(&member.username),
            members::first_name.eq(&member.first_name),
            members::last_name.eq(&member.last_name),
            members::status.eq(member.status.as_str()),
            members::is_superuser.eq(to_flag(member.is_superuser)),
            members::active.eq(1),
        ))
        .execute(conn)?;
    let member_id: i64 = conn.get_last_insert_rowid()?;
    info!(member_id, username = %member.username, "Inserted member");
    Ok(MemberId::new(member_id))
}

/// Inserts an active manager position.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_manager(
    conn: &mut SqliteConnection,
    manager: &NewManager,
) -> Result<ManagerId, PersistenceError> {
    diesel::insert_into(managers::table)
        .values((
            managers::title.eq(&manager.title),
            managers::incumbent_member_id.eq(manager.incumbent.map(MemberId::value)),
            managers::workshift_manager.eq(to_flag(manager.workshift_manager)),
            managers::president.eq(to_flag(manager.president)),
            managers::active.eq(1),
            managers::workshift_hours.eq(manager.workshift_hours.hundredths()),
        ))
        .execute(conn)?;
    let manager_id: i64 = conn.get_last_insert_rowid()?;
    info!(manager_id, title = %manager.title, "Inserted manager");
    Ok(ManagerId::new(manager_id))
}
