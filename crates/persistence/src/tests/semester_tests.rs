// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{
    Scenario, create_test_context, fall_2024, monday_scenario, primary_pool, profile_of,
    register, start_semester,
};
use crate::Persistence;
use farnsworth::{Command, CoreError, InstanceQuery, WorkshiftStore};
use farnsworth_domain::{
    DomainError, Hours, InstanceId, Member, PoolHours, Season, Semester, VerifyPolicy,
    WorkshiftInstance, WorkshiftPool, WorkshiftProfile, WorkshiftSettings,
};

#[test]
fn test_start_semester_seeds_every_resident() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    for n in 0..50 {
        register(&mut persistence, &format!("resident_{n}"), "Member");
    }

    let semester: Semester = start_semester(&mut persistence, &create_test_context());
    let pool: WorkshiftPool = primary_pool(&mut persistence, semester.id);
    assert_eq!(pool.title, WorkshiftSettings::PRIMARY_POOL_TITLE);
    assert_eq!(pool.hours, WorkshiftSettings::default().default_hours);

    let profiles: Vec<WorkshiftProfile> = persistence
        .transaction(|store| Ok(store.list_profiles(semester.id)?))
        .unwrap();
    assert_eq!(profiles.len(), 50);

    let records: Vec<PoolHours> = persistence
        .transaction(|store| Ok(store.list_pool_hours_for_pool(pool.id)?))
        .unwrap();
    assert_eq!(records.len(), 50);
    assert!(records.iter().all(|record| record.standing == Hours::ZERO));
    assert!(records.iter().all(|record| record.hours == pool.hours));
}

#[test]
fn test_start_semester_becomes_current() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let semester: Semester = start_semester(&mut persistence, &create_test_context());

    let current = persistence
        .transaction(|store| Ok(store.current_semester_id()?))
        .unwrap();
    assert_eq!(current, Some(semester.id));
    assert_eq!(semester.season, Season::Fall);
    assert_eq!(semester.url_key(), "Fa2024");
}

#[test]
fn test_duplicate_semester_is_rejected() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    start_semester(&mut persistence, &create_test_context());

    let result = persistence.apply(
        &create_test_context(),
        Command::StartSemester {
            semester: fall_2024(),
            extra_pools: Vec::new(),
        },
    );
    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::DuplicateSemester {
            season: Season::Fall,
            year: 2024,
        })
    );
}

#[test]
fn test_member_registered_mid_semester_gets_profile() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let semester: Semester = start_semester(&mut persistence, &create_test_context());

    let late: Member = register(&mut persistence, "late_arrival", "Carol");
    let profile: WorkshiftProfile = profile_of(&mut persistence, late.id, semester.id);
    let pool: WorkshiftPool = primary_pool(&mut persistence, semester.id);

    let record: Option<PoolHours> = persistence
        .transaction(|store| Ok(store.find_pool_hours(profile.id, pool.id)?))
        .unwrap();
    assert!(record.is_some());
}

#[test]
fn test_delete_semester_removes_everything_scoped_to_it() {
    let Scenario {
        mut persistence,
        semester,
        pool,
        ..
    } = monday_scenario(VerifyPolicy::OtherMember);

    let instances: Vec<WorkshiftInstance> = persistence
        .transaction(|store| Ok(store.list_instances(&InstanceQuery::for_semester(semester.id))?))
        .unwrap();
    let sample: InstanceId = instances[0].id;

    persistence
        .apply(
            &create_test_context(),
            Command::DeleteSemester {
                semester_id: semester.id,
            },
        )
        .unwrap();

    persistence
        .transaction(|store| {
            assert!(store.get_semester(semester.id)?.is_none());
            assert_eq!(store.current_semester_id()?, None);
            assert!(store.get_pool(pool.id)?.is_none());
            assert!(store.list_profiles(semester.id)?.is_empty());
            assert!(store.list_pool_hours_for_pool(pool.id)?.is_empty());
            assert!(store.list_regular_shifts(pool.id)?.is_empty());
            assert!(
                store
                    .list_instances(&InstanceQuery::for_semester(semester.id))?
                    .is_empty()
            );
            assert!(store.list_log_entries(sample)?.is_empty());
            Ok(())
        })
        .unwrap();
}
