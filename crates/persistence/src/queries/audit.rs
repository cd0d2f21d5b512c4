// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use farnsworth_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use farnsworth_domain::SemesterId;

use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
struct AuditEventRow {
    event_id: i64,
    semester_id: Option<i64>,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
}

impl AuditEventRow {
    fn into_event(self) -> Result<(i64, AuditEvent), PersistenceError> {
        let actor_data: ActorData = serde_json::from_str(&self.actor_json)?;
        let cause_data: CauseData = serde_json::from_str(&self.cause_json)?;
        let action_data: ActionData = serde_json::from_str(&self.action_json)?;
        let before_data: StateSnapshotData = serde_json::from_str(&self.before_snapshot_json)?;
        let after_data: StateSnapshotData = serde_json::from_str(&self.after_snapshot_json)?;

        let event: AuditEvent = AuditEvent::new(
            Actor::new(actor_data.id, actor_data.actor_type),
            Cause::new(cause_data.id, cause_data.description),
            Action::new(action_data.name, action_data.details),
            StateSnapshot::new(before_data.data),
            StateSnapshot::new(after_data.data),
            self.semester_id.map(SemesterId::new),
        );
        Ok((self.event_id, event))
    }
}

/// Retrieves an audit event by id.
///
/// # Errors
///
/// Returns `NotFound` if no event has this id, or an error if the stored
/// JSON cannot be decoded.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let row: AuditEventRow = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select(AuditEventRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("audit event {event_id}")))?;
    let (_, event): (i64, AuditEvent) = row.into_event()?;
    Ok(event)
}

/// Lists audit events in the order they were recorded, optionally scoped
/// to one semester.
///
/// # Errors
///
/// Returns an error if the query fails or the stored JSON cannot be decoded.
pub fn list_audit_events(
    conn: &mut SqliteConnection,
    semester_id: Option<SemesterId>,
) -> Result<Vec<(i64, AuditEvent)>, PersistenceError> {
    let mut query = audit_events::table.into_boxed();
    if let Some(semester_id) = semester_id {
        query = query.filter(audit_events::semester_id.eq(semester_id.value()));
    }
    query
        .order(audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load(conn)?
        .into_iter()
        .map(AuditEventRow::into_event)
        .collect()
}
