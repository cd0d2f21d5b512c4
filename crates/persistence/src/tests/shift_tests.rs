// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{
    Scenario, context_at, create_test_context, create_workshift_type, fall_2024,
    monday_scenario, monday_shift, primary_pool, profile_of, register,
};
use crate::Persistence;
use farnsworth::{Command, CoreError, InstanceQuery, Outcome, WorkshiftStore};
use farnsworth_domain::{
    DomainError, Hours, InstanceInfoDraft, InstanceSource, InstanceState, LogEntryType, Member,
    NewSemester, PoolHours, Preference, ProfileId, RegularShiftId, RegularWorkshift,
    RegularWorkshiftDraft, Schedule, Season, ShiftLogEntry, TimeBlockSpec,
    VerifyPolicy, Viewer, WorkshiftInstance, WorkshiftPool, WorkshiftProfile,
};
use time::Weekday;
use time::macros::{date, datetime, time};

fn semester_instances(scenario: &mut Scenario) -> Vec<WorkshiftInstance> {
    let semester_id = scenario.semester.id;
    scenario
        .persistence
        .transaction(|store| Ok(store.list_instances(&InstanceQuery::for_semester(semester_id))?))
        .unwrap()
}

fn current_shift(scenario: &mut Scenario) -> RegularWorkshift {
    let shift_id = scenario.shift_id;
    scenario
        .persistence
        .transaction(|store| Ok(store.get_regular_shift(shift_id)?))
        .unwrap()
        .unwrap()
}

fn edit_shift(scenario: &mut Scenario, draft: RegularWorkshiftDraft) -> Result<(), CoreError> {
    let shift_id = scenario.shift_id;
    scenario
        .persistence
        .apply(&create_test_context(), Command::EditRegularShift { shift_id, draft })
        .map(|_| ())
}

/// Starts Spring 2025 next to the scenario's Fall semester and returns its
/// primary pool.
fn start_spring(scenario: &mut Scenario) -> WorkshiftPool {
    let spring: NewSemester = NewSemester {
        season: Season::Spring,
        year: 2025,
        start_date: date!(2025 - 01 - 20),
        end_date: date!(2025 - 05 - 16),
        ..fall_2024()
    };
    let outcome: Outcome = scenario
        .persistence
        .apply(
            &create_test_context(),
            Command::StartSemester {
                semester: spring,
                extra_pools: Vec::new(),
            },
        )
        .unwrap()
        .outcome;
    let Outcome::Semester(semester) = outcome else {
        panic!("expected a semester, got {outcome:?}");
    };
    primary_pool(&mut scenario.persistence, semester.id)
}

fn alice_hours(scenario: &mut Scenario) -> PoolHours {
    let (alice, pool) = (scenario.alice.id, scenario.pool.id);
    scenario
        .persistence
        .transaction(|store| Ok(store.find_pool_hours(alice, pool)?))
        .unwrap()
        .unwrap()
}

#[test]
fn test_weekly_shift_generates_remaining_mondays() {
    let mut scenario: Scenario = monday_scenario(VerifyPolicy::OtherMember);
    let instances: Vec<WorkshiftInstance> = semester_instances(&mut scenario);

    assert_eq!(instances.len(), 15);
    assert_eq!(instances[0].date, date!(2024 - 09 - 02));
    assert_eq!(instances[14].date, date!(2024 - 12 - 09));
    assert!(instances.iter().all(|i| i.date.weekday() == Weekday::Monday));
    assert!(instances.iter().all(|i| !i.closed));
    assert!(
        instances
            .iter()
            .all(|i| i.state() == InstanceState::Assigned && i.workshifter == Some(scenario.alice.id))
    );
    assert!(
        instances
            .iter()
            .all(|i| i.source == InstanceSource::Recurring(scenario.shift_id))
    );
}

#[test]
fn test_assignment_is_logged_and_counted() {
    let mut scenario: Scenario = monday_scenario(VerifyPolicy::OtherMember);
    let first: WorkshiftInstance = semester_instances(&mut scenario).remove(0);

    let logs: Vec<ShiftLogEntry> = scenario
        .persistence
        .transaction(|store| Ok(store.list_log_entries(first.id)?))
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].entry_type, LogEntryType::Assigned);
    assert_eq!(logs[0].person, Some(scenario.alice.id));

    assert_eq!(alice_hours(&mut scenario).assigned_hours, Hours::from_whole(2));
}

#[test]
fn test_deactivating_shift_keeps_closed_instances_standalone() {
    let mut scenario: Scenario = monday_scenario(VerifyPolicy::OtherMember);
    let first: WorkshiftInstance = semester_instances(&mut scenario).remove(0);
    let bob: Viewer = Viewer {
        profile_id: Some(scenario.bob.id),
        ..Viewer::default()
    };
    scenario
        .persistence
        .apply(
            &create_test_context(),
            Command::Verify {
                instance_id: first.id,
                viewer: bob,
            },
        )
        .unwrap();

    let shift_id = scenario.shift_id;
    let shift: RegularWorkshift = scenario
        .persistence
        .transaction(|store| Ok(store.get_regular_shift(shift_id)?))
        .unwrap()
        .unwrap();
    let mut draft: RegularWorkshiftDraft = shift.to_draft();
    draft.active = false;
    scenario
        .persistence
        .apply(&create_test_context(), Command::EditRegularShift { shift_id, draft })
        .unwrap();

    let remaining: Vec<WorkshiftInstance> = semester_instances(&mut scenario);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, first.id);
    assert!(remaining[0].closed);
    assert!(matches!(remaining[0].source, InstanceSource::Standalone(_)));
    assert_eq!(alice_hours(&mut scenario).assigned_hours, Hours::ZERO);
}

#[test]
fn test_deleting_shift_reverts_assigned_hours() {
    let mut scenario: Scenario = monday_scenario(VerifyPolicy::OtherMember);
    let shift_id = scenario.shift_id;
    scenario
        .persistence
        .apply(&create_test_context(), Command::DeleteRegularShift { shift_id })
        .unwrap();

    assert!(semester_instances(&mut scenario).is_empty());
    assert_eq!(alice_hours(&mut scenario).assigned_hours, Hours::ZERO);
    let missing: Option<RegularWorkshift> = scenario
        .persistence
        .transaction(|store| Ok(store.get_regular_shift(shift_id)?))
        .unwrap();
    assert!(missing.is_none());
}

#[test]
fn test_instance_cannot_move_to_another_semesters_pool() {
    let mut scenario: Scenario = monday_scenario(VerifyPolicy::OtherMember);
    let spring_pool: WorkshiftPool = start_spring(&mut scenario);
    let first: WorkshiftInstance = semester_instances(&mut scenario).remove(0);

    let result = scenario.persistence.apply(
        &create_test_context(),
        Command::EditInstance {
            instance_id: first.id,
            info: InstanceInfoDraft {
                title: String::from("Kitchen Clean"),
                description: String::new(),
                pool_id: spring_pool.id,
                verify: VerifyPolicy::OtherMember,
                start_time: None,
                end_time: None,
                week_long: false,
            },
            date: first.date,
            workshifter: Some(scenario.alice.id),
        },
    );
    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::PoolNotInSemester {
            pool_id: spring_pool.id,
            semester_id: scenario.semester.id,
        })
    );

    // The Fall instance still verifies and standings upkeep still runs.
    let bob: Viewer = Viewer {
        profile_id: Some(scenario.bob.id),
        ..Viewer::default()
    };
    scenario
        .persistence
        .apply(
            &create_test_context(),
            Command::Verify {
                instance_id: first.id,
                viewer: bob,
            },
        )
        .unwrap();
    let semester_id = scenario.semester.id;
    scenario
        .persistence
        .apply(
            &context_at(datetime!(2024-09-10 12:00 UTC)),
            Command::UpdateStandings { semester_id },
        )
        .unwrap();
}

#[test]
fn test_shift_cannot_move_to_another_semesters_pool() {
    let mut scenario: Scenario = monday_scenario(VerifyPolicy::OtherMember);
    let spring_pool: WorkshiftPool = start_spring(&mut scenario);

    let mut draft: RegularWorkshiftDraft = current_shift(&mut scenario).to_draft();
    draft.pool_id = spring_pool.id;
    draft.current_assignees = Vec::new();

    assert_eq!(
        edit_shift(&mut scenario, draft),
        Err(CoreError::DomainViolation(DomainError::PoolNotInSemester {
            pool_id: spring_pool.id,
            semester_id: scenario.semester.id,
        }))
    );
    assert_eq!(current_shift(&mut scenario).pool_id, scenario.pool.id);
    assert_eq!(alice_hours(&mut scenario).assigned_hours, Hours::from_whole(2));
}

#[test]
fn test_weekday_change_moves_open_instances_and_drops_late_ones() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let alice_member: Member = register(&mut persistence, "alice", "Alice");
    // Ends on a Wednesday, so Friday of the last week is past the end.
    let semester: NewSemester = NewSemester {
        end_date: date!(2024 - 12 - 11),
        ..fall_2024()
    };
    let outcome: Outcome = persistence
        .apply(
            &create_test_context(),
            Command::StartSemester {
                semester,
                extra_pools: Vec::new(),
            },
        )
        .unwrap()
        .outcome;
    let Outcome::Semester(semester) = outcome else {
        panic!("expected a semester, got {outcome:?}");
    };
    let pool: WorkshiftPool = primary_pool(&mut persistence, semester.id);
    let alice: WorkshiftProfile = profile_of(&mut persistence, alice_member.id, semester.id);
    let type_id = create_workshift_type(&mut persistence, "Kitchen Clean");

    let draft: RegularWorkshiftDraft = monday_shift(type_id, pool.id, vec![alice.id]);
    let Outcome::RegularShift(shift) = persistence
        .apply(&create_test_context(), Command::CreateRegularShift { draft })
        .unwrap()
        .outcome
    else {
        panic!("expected a regular shift");
    };
    let list = |persistence: &mut Persistence| {
        let shift_id: RegularShiftId = shift.id;
        persistence
            .transaction(|store| Ok(store.list_instances(&InstanceQuery::for_regular_shift(shift_id))?))
            .unwrap()
    };
    let mondays: Vec<WorkshiftInstance> = list(&mut persistence);
    assert_eq!(mondays.len(), 15);
    assert_eq!(mondays[14].date, date!(2024 - 12 - 09));

    let mut draft: RegularWorkshiftDraft = shift.to_draft();
    draft.schedule = Schedule::Day(Weekday::Friday);
    persistence
        .apply(
            &create_test_context(),
            Command::EditRegularShift {
                shift_id: shift.id,
                draft,
            },
        )
        .unwrap();

    let mut fridays: Vec<WorkshiftInstance> = list(&mut persistence);
    fridays.sort_by_key(|instance| instance.date);
    assert_eq!(fridays.len(), 14);
    assert!(fridays.iter().all(|i| i.date.weekday() == Weekday::Friday));
    assert_eq!(fridays[0].date, date!(2024 - 09 - 06));
    assert_eq!(fridays[13].date, date!(2024 - 12 - 06));
    assert!(fridays.iter().all(|i| i.workshifter == Some(alice.id)));

    // Moved rather than recreated.
    let moved_ids: Vec<_> = fridays.iter().map(|i| i.id).collect();
    assert!(mondays[..14].iter().all(|m| moved_ids.contains(&m.id)));
    assert!(!moved_ids.contains(&mondays[14].id));
}

#[test]
fn test_count_edits_add_and_drop_open_instances() {
    let mut scenario: Scenario = monday_scenario(VerifyPolicy::OtherMember);

    let mut draft: RegularWorkshiftDraft = current_shift(&mut scenario).to_draft();
    draft.count = 2;
    edit_shift(&mut scenario, draft).unwrap();

    let doubled: Vec<WorkshiftInstance> = semester_instances(&mut scenario);
    assert_eq!(doubled.len(), 30);
    assert_eq!(
        doubled
            .iter()
            .filter(|i| i.workshifter == Some(scenario.alice.id))
            .count(),
        15
    );
    assert_eq!(doubled.iter().filter(|i| i.workshifter.is_none()).count(), 15);

    let mut draft: RegularWorkshiftDraft = current_shift(&mut scenario).to_draft();
    draft.count = 1;
    edit_shift(&mut scenario, draft).unwrap();

    let single: Vec<WorkshiftInstance> = semester_instances(&mut scenario);
    assert_eq!(single.len(), 15);
    assert!(
        single
            .iter()
            .all(|i| i.workshifter == Some(scenario.alice.id))
    );
    assert_eq!(alice_hours(&mut scenario).assigned_hours, Hours::from_whole(2));
}

#[test]
fn test_auto_assign_skips_busy_members() {
    let mut scenario: Scenario = monday_scenario(VerifyPolicy::OtherMember);
    let (alice, bob): (ProfileId, ProfileId) = (scenario.alice.id, scenario.bob.id);

    // An unassigned morning slot next to Alice's shift.
    let mut draft: RegularWorkshiftDraft = current_shift(&mut scenario).to_draft();
    draft.current_assignees = Vec::new();
    draft.start_time = Some(time!(9:00));
    draft.end_time = Some(time!(11:00));
    let Outcome::RegularShift(morning) = scenario
        .persistence
        .apply(&create_test_context(), Command::CreateRegularShift { draft })
        .unwrap()
        .outcome
    else {
        panic!("expected a regular shift");
    };

    scenario
        .persistence
        .apply(
            &create_test_context(),
            Command::SetPreferences {
                profile_id: alice,
                blocks: vec![TimeBlockSpec {
                    preference: Preference::Busy,
                    day: Weekday::Monday,
                    start_time: time!(8:00),
                    end_time: time!(12:00),
                }],
                ratings: Vec::new(),
                note: String::new(),
                can_manage: true,
            },
        )
        .unwrap();

    let outcome: Outcome = scenario
        .persistence
        .apply(
            &create_test_context(),
            Command::AutoAssign {
                pool_id: scenario.pool.id,
                candidate_order: vec![alice, bob],
            },
        )
        .unwrap()
        .outcome;
    let Outcome::AutoAssigned(report) = outcome else {
        panic!("expected an assignment report, got {outcome:?}");
    };

    assert!(report.assigned.contains(&(morning.id, bob)));
    assert!(!report.assigned.contains(&(morning.id, alice)));
    let morning_id = morning.id;
    let saved: RegularWorkshift = scenario
        .persistence
        .transaction(|store| Ok(store.get_regular_shift(morning_id)?))
        .unwrap()
        .unwrap();
    assert_eq!(saved.current_assignees, vec![bob]);
}
