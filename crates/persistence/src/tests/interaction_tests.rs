// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{Scenario, context_at, create_test_context, monday_scenario};
use farnsworth::{Command, CoreError, InstanceQuery, Outcome, WorkshiftStore};
use farnsworth_domain::{
    DomainError, Hours, InstanceId, InstanceState, LogEntryType, PoolHours, ProfileId,
    ShiftLogEntry, VerifyPolicy, Viewer, WorkshiftInstance,
};
use time::OffsetDateTime;
use time::macros::datetime;

fn first_instance(scenario: &mut Scenario) -> WorkshiftInstance {
    let shift_id = scenario.shift_id;
    scenario
        .persistence
        .transaction(|store| Ok(store.list_instances(&InstanceQuery::for_regular_shift(shift_id))?))
        .unwrap()
        .remove(0)
}

fn member(profile_id: ProfileId) -> Viewer {
    Viewer {
        profile_id: Some(profile_id),
        ..Viewer::default()
    }
}

fn pool_manager(profile_id: ProfileId) -> Viewer {
    Viewer {
        profile_id: Some(profile_id),
        is_pool_manager: true,
        ..Viewer::default()
    }
}

fn standing_of(scenario: &mut Scenario, profile_id: ProfileId) -> Hours {
    let pool_id = scenario.pool.id;
    let record: PoolHours = scenario
        .persistence
        .transaction(|store| Ok(store.find_pool_hours(profile_id, pool_id)?))
        .unwrap()
        .unwrap();
    record.standing
}

fn logs_of(scenario: &mut Scenario, instance_id: InstanceId) -> Vec<ShiftLogEntry> {
    scenario
        .persistence
        .transaction(|store| Ok(store.list_log_entries(instance_id)?))
        .unwrap()
}

/// Runs standings upkeep for the scenario semester at `now` and returns
/// the number of records debited and instances closed.
fn update_standings(scenario: &mut Scenario, now: OffsetDateTime) -> (usize, usize) {
    let semester_id = scenario.semester.id;
    let outcome: Outcome = scenario
        .persistence
        .apply(&context_at(now), Command::UpdateStandings { semester_id })
        .unwrap()
        .outcome;
    match outcome {
        Outcome::StandingsUpdated { debited, closed } => (debited, closed),
        other => panic!("expected a standings update, got {other:?}"),
    }
}

fn reload(scenario: &mut Scenario, instance_id: InstanceId) -> WorkshiftInstance {
    scenario
        .persistence
        .transaction(|store| Ok(store.get_instance(instance_id)?))
        .unwrap()
        .unwrap()
}

fn instance_outcome(result: Result<farnsworth::TransitionResult, CoreError>) -> WorkshiftInstance {
    match result.unwrap().outcome {
        Outcome::Instance(instance) => instance,
        other => panic!("expected an instance, got {other:?}"),
    }
}

#[test]
fn test_pool_manager_verify_credits_standing_once() {
    let mut scenario: Scenario = monday_scenario(VerifyPolicy::PoolManager);
    let instance: WorkshiftInstance = first_instance(&mut scenario);
    let bob = scenario.bob.id;

    let verified: WorkshiftInstance = instance_outcome(scenario.persistence.apply(
        &create_test_context(),
        Command::Verify {
            instance_id: instance.id,
            viewer: pool_manager(bob),
        },
    ));

    assert_eq!(verified.state(), InstanceState::Verified);
    assert_eq!(verified.verifier, Some(bob));
    let alice = scenario.alice.id;
    assert_eq!(standing_of(&mut scenario, alice), Hours::from_whole(2));

    let verify_logs: Vec<ShiftLogEntry> = logs_of(&mut scenario, instance.id)
        .into_iter()
        .filter(|entry| entry.entry_type == LogEntryType::Verify)
        .collect();
    assert_eq!(verify_logs.len(), 1);
    assert_eq!(verify_logs[0].person, Some(bob));
}

#[test]
fn test_pool_manager_policy_rejects_plain_member() {
    let mut scenario: Scenario = monday_scenario(VerifyPolicy::PoolManager);
    let instance: WorkshiftInstance = first_instance(&mut scenario);
    let bob = scenario.bob.id;

    let result = scenario.persistence.apply(
        &create_test_context(),
        Command::Verify {
            instance_id: instance.id,
            viewer: member(bob),
        },
    );
    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::VerifyNotPermitted(VerifyPolicy::PoolManager))
    );
}

#[test]
fn test_self_verify_requires_pool_permission() {
    let mut scenario: Scenario = monday_scenario(VerifyPolicy::OtherMember);
    let instance: WorkshiftInstance = first_instance(&mut scenario);
    let alice = scenario.alice.id;

    let result = scenario.persistence.apply(
        &create_test_context(),
        Command::Verify {
            instance_id: instance.id,
            viewer: member(alice),
        },
    );
    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::SelfVerifyForbidden)
    );
    assert_eq!(standing_of(&mut scenario, alice), Hours::ZERO);
}

#[test]
fn test_closed_instance_rejects_every_interaction() {
    let mut scenario: Scenario = monday_scenario(VerifyPolicy::OtherMember);
    let instance: WorkshiftInstance = first_instance(&mut scenario);
    let (alice, bob) = (scenario.alice.id, scenario.bob.id);
    scenario
        .persistence
        .apply(
            &create_test_context(),
            Command::Verify {
                instance_id: instance.id,
                viewer: member(bob),
            },
        )
        .unwrap();

    let attempts: Vec<Command> = vec![
        Command::SignIn {
            instance_id: instance.id,
            viewer: member(bob),
        },
        Command::SignOut {
            instance_id: instance.id,
            viewer: member(alice),
        },
        Command::Verify {
            instance_id: instance.id,
            viewer: pool_manager(bob),
        },
        Command::MarkBlown {
            instance_id: instance.id,
            viewer: pool_manager(bob),
        },
    ];
    for command in attempts {
        let result = scenario.persistence.apply(&create_test_context(), command);
        assert_eq!(
            result.unwrap_err(),
            CoreError::DomainViolation(DomainError::InstanceClosed(instance.id))
        );
    }
    assert_eq!(standing_of(&mut scenario, alice), Hours::from_whole(2));
}

#[test]
fn test_sign_in_on_filled_instance_is_rejected() {
    let mut scenario: Scenario = monday_scenario(VerifyPolicy::OtherMember);
    let instance: WorkshiftInstance = first_instance(&mut scenario);
    let bob = scenario.bob.id;

    let result = scenario.persistence.apply(
        &create_test_context(),
        Command::SignIn {
            instance_id: instance.id,
            viewer: member(bob),
        },
    );
    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::InstanceAlreadyFilled(instance.id))
    );
}

#[test]
fn test_sign_out_then_sign_in_hands_over_the_shift() {
    let mut scenario: Scenario = monday_scenario(VerifyPolicy::OtherMember);
    let instance: WorkshiftInstance = first_instance(&mut scenario);
    let (alice, bob) = (scenario.alice.id, scenario.bob.id);

    let released: WorkshiftInstance = instance_outcome(scenario.persistence.apply(
        &create_test_context(),
        Command::SignOut {
            instance_id: instance.id,
            viewer: member(alice),
        },
    ));
    assert_eq!(released.state(), InstanceState::Unfilled);

    let taken: WorkshiftInstance = instance_outcome(scenario.persistence.apply(
        &create_test_context(),
        Command::SignIn {
            instance_id: instance.id,
            viewer: member(bob),
        },
    ));
    assert_eq!(taken.workshifter, Some(bob));

    let types: Vec<LogEntryType> = logs_of(&mut scenario, instance.id)
        .into_iter()
        .map(|entry| entry.entry_type)
        .collect();
    assert!(types.contains(&LogEntryType::SignOut));
    assert!(types.contains(&LogEntryType::SignIn));
}

#[test]
fn test_blown_shift_debits_the_liable_member() {
    let mut scenario: Scenario = monday_scenario(VerifyPolicy::OtherMember);
    let instance: WorkshiftInstance = first_instance(&mut scenario);
    let (alice, bob) = (scenario.alice.id, scenario.bob.id);

    let blown: WorkshiftInstance = instance_outcome(scenario.persistence.apply(
        &create_test_context(),
        Command::MarkBlown {
            instance_id: instance.id,
            viewer: pool_manager(bob),
        },
    ));
    assert_eq!(blown.state(), InstanceState::Blown);
    assert_eq!(blown.liable, Some(alice));
    assert_eq!(standing_of(&mut scenario, alice), Hours::from_whole(-2));
}

#[test]
fn test_update_standings_auto_verifies_finished_shifts() {
    let mut scenario: Scenario = monday_scenario(VerifyPolicy::Automatic);
    let instance: WorkshiftInstance = first_instance(&mut scenario);
    let (alice, bob) = (scenario.alice.id, scenario.bob.id);

    let (debited, closed) = update_standings(&mut scenario, datetime!(2024-09-03 12:00 UTC));

    assert_eq!(debited, 2);
    assert_eq!(closed, 1);
    let verified: WorkshiftInstance = reload(&mut scenario, instance.id);
    assert_eq!(verified.state(), InstanceState::Verified);
    assert_eq!(verified.verifier, None);
    // One week of the 5 hour requirement, plus the 2 hour shift for Alice.
    assert_eq!(standing_of(&mut scenario, alice), Hours::from_whole(-3));
    assert_eq!(standing_of(&mut scenario, bob), Hours::from_whole(-5));
}

#[test]
fn test_update_standings_blows_shifts_past_verify_cutoff() {
    let mut scenario: Scenario = monday_scenario(VerifyPolicy::OtherMember);
    let instance: WorkshiftInstance = first_instance(&mut scenario);
    let alice = scenario.alice.id;

    // The shift ends at midnight and the pool allows 8 hours to verify.
    let (_, closed) = update_standings(&mut scenario, datetime!(2024-09-03 07:59 UTC));
    assert_eq!(closed, 0);
    assert!(!reload(&mut scenario, instance.id).closed);

    let (debited, closed) = update_standings(&mut scenario, datetime!(2024-09-03 08:00 UTC));
    assert_eq!(debited, 0);
    assert_eq!(closed, 1);

    let blown: WorkshiftInstance = reload(&mut scenario, instance.id);
    assert_eq!(blown.state(), InstanceState::Blown);
    assert_eq!(blown.liable, Some(alice));
    assert_eq!(standing_of(&mut scenario, alice), Hours::from_whole(-7));
}
