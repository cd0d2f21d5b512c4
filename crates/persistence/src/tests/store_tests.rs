// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{
    Scenario, create_test_context, fall_2024, monday_scenario, register, start_semester,
};
use crate::mutations::instances::insert_conflicting_instance;
use crate::{Persistence, PersistenceError};
use farnsworth::{Command, CoreError, InstanceQuery, StoreError, WorkshiftStore};
use farnsworth_audit::AuditEvent;
use farnsworth_domain::{
    DomainError, InstanceId, InstanceInfo, InstanceInfoDraft, PoolDraft, Semester, VerifyPolicy,
    WorkshiftInstance, WorkshiftSettings,
};

#[test]
fn test_foreign_keys_are_enforced() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_in_memory_databases_are_isolated() {
    let mut first: Persistence = Persistence::new_in_memory().unwrap();
    let mut second: Persistence = Persistence::new_in_memory().unwrap();
    start_semester(&mut first, &create_test_context());

    let semesters: Vec<Semester> = second
        .transaction(|store| Ok(store.list_semesters()?))
        .unwrap();
    assert!(semesters.is_empty());
}

#[test]
fn test_instance_with_two_sources_is_an_integrity_error() {
    let Scenario {
        mut persistence,
        pool,
        shift_id,
        ..
    } = monday_scenario(VerifyPolicy::OtherMember);

    let template: WorkshiftInstance = persistence
        .transaction(|store| Ok(store.list_instances(&InstanceQuery::for_regular_shift(shift_id))?))
        .unwrap()
        .remove(0);
    let info: InstanceInfo = persistence
        .transaction(|store| {
            Ok(store.insert_instance_info(&InstanceInfoDraft {
                title: String::from("Kitchen Clean"),
                description: String::new(),
                pool_id: pool.id,
                verify: VerifyPolicy::OtherMember,
                start_time: None,
                end_time: None,
                week_long: false,
            })?)
        })
        .unwrap();

    let broken: InstanceId =
        insert_conflicting_instance(&mut persistence.conn, &template, shift_id, info.id).unwrap();

    let result = persistence.transaction(|store| Ok(store.get_instance(broken)?));
    assert!(matches!(
        result,
        Err(CoreError::Storage(StoreError::Integrity(_)))
    ));
}

#[test]
fn test_every_command_is_audited_in_order() {
    let Scenario {
        mut persistence,
        semester,
        ..
    } = monday_scenario(VerifyPolicy::OtherMember);

    let events: Vec<(i64, AuditEvent)> = persistence.list_audit_events(None).unwrap();
    let names: Vec<&str> = events
        .iter()
        .map(|(_, event)| event.action.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "RegisterMember",
            "RegisterMember",
            "StartSemester",
            "CreateWorkshiftType",
            "CreateRegularShift",
        ]
    );
    assert!(events.windows(2).all(|pair| pair[0].0 < pair[1].0));

    let (first_id, first_event) = &events[0];
    assert_eq!(&persistence.get_audit_event(*first_id).unwrap(), first_event);
    assert_eq!(first_event.actor.id, "test-actor");

    let scoped: Vec<(i64, AuditEvent)> =
        persistence.list_audit_events(Some(semester.id)).unwrap();
    assert!(
        scoped
            .iter()
            .any(|(_, event)| event.action.name == "StartSemester")
    );
    assert!(
        scoped
            .iter()
            .all(|(_, event)| event.semester_id == Some(semester.id))
    );
}

#[test]
fn test_missing_audit_event_is_not_found() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert!(matches!(
        persistence.get_audit_event(99),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_rejected_command_rolls_back() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    register(&mut persistence, "alice", "Alice");
    let clashing: PoolDraft = PoolDraft::with_defaults(
        WorkshiftSettings::PRIMARY_POOL_TITLE.to_string(),
        WorkshiftSettings::default().default_hours,
        24,
        8,
    );

    let result = persistence.apply(
        &create_test_context(),
        Command::StartSemester {
            semester: fall_2024(),
            extra_pools: vec![clashing],
        },
    );
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::DuplicatePool { .. }))
    ));

    persistence
        .transaction(|store| {
            assert!(store.list_semesters()?.is_empty());
            assert_eq!(store.current_semester_id()?, None);
            Ok(())
        })
        .unwrap();
    let events: Vec<(i64, AuditEvent)> = persistence.list_audit_events(None).unwrap();
    assert_eq!(events.len(), 1);
}
