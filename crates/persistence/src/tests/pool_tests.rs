// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{
    Scenario, context_at, context_with_default_hours, create_test_context, monday_scenario,
    primary_pool, profile_of, register, start_semester,
};
use crate::Persistence;
use farnsworth::{Command, CoreError, FineRecord, InstanceQuery, Outcome, WorkshiftStore};
use farnsworth_domain::{
    DomainError, Hours, Member, PoolDraft, PoolHours, ProfileId, Semester, VerifyPolicy, Viewer,
    WorkshiftInstance, WorkshiftPool,
};
use time::macros::{date, datetime};

struct Setup {
    persistence: Persistence,
    semester: Semester,
    pool: WorkshiftPool,
    profiles: Vec<ProfileId>,
}

fn setup(default_hours: Hours) -> Setup {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let members: Vec<Member> = vec![
        register(&mut persistence, "alice", "Alice"),
        register(&mut persistence, "bob", "Bob"),
        register(&mut persistence, "carol", "Carol"),
    ];
    let semester: Semester =
        start_semester(&mut persistence, &context_with_default_hours(default_hours));
    let pool: WorkshiftPool = primary_pool(&mut persistence, semester.id);
    let profiles: Vec<ProfileId> = members
        .iter()
        .map(|member| profile_of(&mut persistence, member.id, semester.id).id)
        .collect();
    Setup {
        persistence,
        semester,
        pool,
        profiles,
    }
}

fn draft_of(pool: &WorkshiftPool) -> PoolDraft {
    PoolDraft {
        title: pool.title.clone(),
        managers: pool.managers.clone(),
        sign_out_cutoff: pool.sign_out_cutoff,
        verify_cutoff: pool.verify_cutoff,
        hours: pool.hours,
        weeks_per_period: pool.weeks_per_period,
        first_fine_date: pool.first_fine_date,
        second_fine_date: pool.second_fine_date,
        third_fine_date: pool.third_fine_date,
        any_blown: pool.any_blown,
        self_verify: pool.self_verify,
    }
}

fn record(setup: &mut Setup, profile_id: ProfileId) -> PoolHours {
    let pool_id = setup.pool.id;
    setup
        .persistence
        .transaction(|store| Ok(store.find_pool_hours(profile_id, pool_id)?))
        .unwrap()
        .unwrap()
}

#[test]
fn test_default_change_spares_hand_set_requirements() {
    let mut setup: Setup = setup(Hours::from_whole(2));
    let (alice, bob, carol) = (setup.profiles[0], setup.profiles[1], setup.profiles[2]);

    let bob_record: PoolHours = record(&mut setup, bob);
    setup
        .persistence
        .apply(
            &create_test_context(),
            Command::AdjustPoolHours {
                pool_hours_id: bob_record.id,
                hours: Hours::from_whole(5),
                hour_adjustment: Hours::ZERO,
            },
        )
        .unwrap();

    let mut draft: PoolDraft = draft_of(&setup.pool);
    draft.hours = Hours::from_whole(3);
    setup
        .persistence
        .apply(
            &create_test_context(),
            Command::EditPool {
                pool_id: setup.pool.id,
                draft,
            },
        )
        .unwrap();

    assert_eq!(record(&mut setup, alice).hours, Hours::from_whole(3));
    assert_eq!(record(&mut setup, carol).hours, Hours::from_whole(3));
    assert_eq!(record(&mut setup, bob).hours, Hours::from_whole(5));
}

#[test]
fn test_adjustment_moves_standing_by_delta() {
    let mut setup: Setup = setup(Hours::from_whole(2));
    let alice: ProfileId = setup.profiles[0];
    let before: PoolHours = record(&mut setup, alice);

    let result = setup
        .persistence
        .apply(
            &create_test_context(),
            Command::AdjustPoolHours {
                pool_hours_id: before.id,
                hours: before.hours,
                hour_adjustment: Hours::from_hundredths(150),
            },
        )
        .unwrap();

    let Outcome::PoolHours(after) = result.outcome else {
        panic!("expected a pool hours record");
    };
    assert_eq!(after.hour_adjustment, Hours::from_hundredths(150));
    assert_eq!(after.standing, before.standing + Hours::from_hundredths(150));
}

#[test]
fn test_primary_pool_cannot_be_deleted() {
    let mut setup: Setup = setup(Hours::from_whole(5));
    let pool_id = setup.pool.id;

    let result = setup
        .persistence
        .apply(&create_test_context(), Command::DeletePool { pool_id });
    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::PrimaryPoolUndeletable(pool_id))
    );
}

#[test]
fn test_extra_pool_seeds_and_drops_hour_records() {
    let mut setup: Setup = setup(Hours::from_whole(5));
    let draft: PoolDraft =
        PoolDraft::with_defaults(String::from("Humor Shift"), Hours::from_whole(1), 24, 8);

    let result = setup
        .persistence
        .apply(
            &create_test_context(),
            Command::CreatePool {
                semester_id: setup.semester.id,
                draft,
            },
        )
        .unwrap();
    let Outcome::Pool(humor) = result.outcome else {
        panic!("expected a pool");
    };
    assert!(!humor.is_primary);

    let records: Vec<PoolHours> = setup
        .persistence
        .transaction(|store| Ok(store.list_pool_hours_for_pool(humor.id)?))
        .unwrap();
    assert_eq!(records.len(), setup.profiles.len());
    assert!(records.iter().all(|r| r.hours == Hours::from_whole(1)));

    setup
        .persistence
        .apply(
            &create_test_context(),
            Command::DeletePool { pool_id: humor.id },
        )
        .unwrap();
    let records: Vec<PoolHours> = setup
        .persistence
        .transaction(|store| Ok(store.list_pool_hours_for_pool(humor.id)?))
        .unwrap();
    assert!(records.is_empty());
}

fn scenario_record(scenario: &mut Scenario, profile_id: ProfileId) -> PoolHours {
    let pool_id = scenario.pool.id;
    scenario
        .persistence
        .transaction(|store| Ok(store.find_pool_hours(profile_id, pool_id)?))
        .unwrap()
        .unwrap()
}

fn scenario_instances(scenario: &mut Scenario) -> Vec<WorkshiftInstance> {
    let shift_id = scenario.shift_id;
    scenario
        .persistence
        .transaction(|store| Ok(store.list_instances(&InstanceQuery::for_regular_shift(shift_id))?))
        .unwrap()
}

#[test]
fn test_requirement_change_rederives_standing_from_history() {
    let mut scenario: Scenario = monday_scenario(VerifyPolicy::OtherMember);
    let (alice, bob) = (scenario.alice.id, scenario.bob.id);
    let first: WorkshiftInstance = scenario_instances(&mut scenario).remove(0);
    scenario
        .persistence
        .apply(
            &create_test_context(),
            Command::Verify {
                instance_id: first.id,
                viewer: Viewer {
                    profile_id: Some(bob),
                    ..Viewer::default()
                },
            },
        )
        .unwrap();

    // Two weeks debited at 5 hours, Sep 2 verified, Sep 9 blown.
    let semester_id = scenario.semester.id;
    scenario
        .persistence
        .apply(
            &context_at(datetime!(2024-09-10 12:00 UTC)),
            Command::UpdateStandings { semester_id },
        )
        .unwrap();
    let before: PoolHours = scenario_record(&mut scenario, alice);
    assert_eq!(before.standing, Hours::from_whole(-10));

    scenario
        .persistence
        .apply(
            &create_test_context(),
            Command::AdjustPoolHours {
                pool_hours_id: before.id,
                hours: Hours::from_whole(3),
                hour_adjustment: Hours::ZERO,
            },
        )
        .unwrap();

    let after: PoolHours = scenario_record(&mut scenario, alice);
    assert_eq!(after.hours, Hours::from_whole(3));
    // 2 x -3 + 2 - 2
    assert_eq!(after.standing, Hours::from_whole(-6));
    assert_eq!(scenario_record(&mut scenario, bob).standing, Hours::from_whole(-10));
}

#[test]
fn test_requirement_above_limit_is_rejected() {
    let mut setup: Setup = setup(Hours::from_whole(5));
    let alice: ProfileId = setup.profiles[0];
    let before: PoolHours = record(&mut setup, alice);

    let result = setup.persistence.apply(
        &create_test_context(),
        Command::AdjustPoolHours {
            pool_hours_id: before.id,
            hours: Hours::from_whole(50_000),
            hour_adjustment: Hours::ZERO,
        },
    );

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::InvalidHours { field: "hours", .. })
    ));
    assert_eq!(record(&mut setup, alice), before);
}

#[test]
fn test_fines_snapshot_negative_standing() {
    let mut scenario: Scenario = monday_scenario(VerifyPolicy::OtherMember);
    let (alice, bob) = (scenario.alice.id, scenario.bob.id);
    let first: WorkshiftInstance = scenario_instances(&mut scenario).remove(0);
    scenario
        .persistence
        .apply(
            &create_test_context(),
            Command::MarkBlown {
                instance_id: first.id,
                viewer: Viewer {
                    profile_id: Some(bob),
                    is_pool_manager: true,
                    ..Viewer::default()
                },
            },
        )
        .unwrap();

    let mut draft: PoolDraft = draft_of(&scenario.pool);
    draft.first_fine_date = Some(date!(2024 - 09 - 10));
    draft.second_fine_date = Some(date!(2024 - 11 - 15));
    scenario
        .persistence
        .apply(
            &create_test_context(),
            Command::EditPool {
                pool_id: scenario.pool.id,
                draft,
            },
        )
        .unwrap();

    let semester_id = scenario.semester.id;
    let outcome: Outcome = scenario
        .persistence
        .apply(
            &context_at(datetime!(2024-09-20 12:00 UTC)),
            Command::CalculateFines {
                semester_id,
                clear: false,
            },
        )
        .unwrap()
        .outcome;
    let Outcome::Fines(fines) = outcome else {
        panic!("expected fines, got {outcome:?}");
    };

    // By Sep 10 two weeks are due; Alice also blew her Sep 2 shift.
    let alice_fine: &FineRecord = fines
        .iter()
        .find(|fine| fine.profile_id == alice)
        .expect("alice is fined");
    assert_eq!(
        alice_fine.snapshots,
        [Hours::from_whole(-12), Hours::ZERO, Hours::ZERO]
    );
    assert_eq!(alice_fine.amount_cents, 12_000);
    assert_eq!(
        scenario_record(&mut scenario, alice).date_standings(),
        [Hours::from_whole(-12), Hours::ZERO, Hours::ZERO]
    );
    assert_eq!(
        scenario_record(&mut scenario, bob).date_standings()[0],
        Hours::from_whole(-10)
    );
}
