// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use farnsworth_domain::SemesterId;

fn create_test_event(semester_id: Option<SemesterId>) -> AuditEvent {
    AuditEvent::new(
        Actor::new(String::from("alice"), String::from("member")),
        Cause::new(String::from("req-1"), String::from("Sign in")),
        Action::new(String::from("SignIn"), Some(String::from("instance=4"))),
        StateSnapshot::new(String::from("workshifter=none")),
        StateSnapshot::new(String::from("workshifter=1")),
        semester_id,
    )
}

#[test]
fn test_actor_creation_requires_all_fields() {
    let actor: Actor = Actor::new(String::from("alice"), String::from("member"));

    assert_eq!(actor.id, "alice");
    assert_eq!(actor.actor_type, "member");
}

#[test]
fn test_system_actor() {
    let actor: Actor = Actor::system();
    assert_eq!(actor.id, "system");
    assert_eq!(actor.actor_type, "system");
}

#[test]
fn test_action_details_are_optional() {
    let action: Action = Action::new(String::from("DeleteSemester"), None);

    assert_eq!(action.name, "DeleteSemester");
    assert_eq!(action.details, None);
}

#[test]
fn test_empty_snapshot() {
    assert_eq!(StateSnapshot::empty().data, "");
}

#[test]
fn test_audit_event_carries_semester_scope() {
    let event: AuditEvent = create_test_event(Some(SemesterId::new(3)));

    assert_eq!(event.semester_id, Some(SemesterId::new(3)));
    assert_eq!(event.action.name, "SignIn");
    assert_eq!(event.before.data, "workshifter=none");
    assert_eq!(event.after.data, "workshifter=1");
}

#[test]
fn test_audit_event_equality() {
    let event1: AuditEvent = create_test_event(None);
    let event2: AuditEvent = create_test_event(None);
    let event3: AuditEvent = create_test_event(Some(SemesterId::new(1)));

    assert_eq!(event1, event2);
    assert_ne!(event1, event3);
}
