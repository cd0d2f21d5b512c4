// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

mod interaction_tests;
mod pool_tests;
mod semester_tests;
mod shift_tests;
mod store_tests;

use crate::Persistence;
use farnsworth::{Command, CommandContext, Outcome, WorkshiftStore};
use farnsworth_audit::{Actor, Cause};
use farnsworth_domain::{
    AssignmentMode, Hours, Member, MemberId, MemberStatus, NewMember, NewSemester, PoolId,
    ProfileId, RegularShiftId, RegularWorkshiftDraft, Schedule, Season, Semester, SemesterId,
    VerifyPolicy, WorkshiftPool, WorkshiftProfile, WorkshiftSettings, WorkshiftTypeDraft,
    WorkshiftTypeId,
};
use time::macros::{date, datetime};
use time::{OffsetDateTime, Weekday};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("test-actor"), String::from("member"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

/// A context on Monday, September 2nd 2024, the first full week of Fall 2024.
pub fn create_test_context() -> CommandContext {
    context_at(datetime!(2024-09-02 10:00 UTC))
}

pub fn context_at(now: OffsetDateTime) -> CommandContext {
    CommandContext::new(
        create_test_actor(),
        create_test_cause(),
        now,
        WorkshiftSettings::default(),
    )
}

pub fn context_with_default_hours(hours: Hours) -> CommandContext {
    let mut ctx: CommandContext = create_test_context();
    ctx.settings.default_hours = hours;
    ctx
}

pub fn fall_2024() -> NewSemester {
    NewSemester {
        season: Season::Fall,
        year: 2024,
        rate_cents: Some(1000),
        policy: None,
        start_date: date!(2024 - 08 - 26),
        end_date: date!(2024 - 12 - 15),
    }
}

pub fn register(persistence: &mut Persistence, username: &str, first_name: &str) -> Member {
    let command: Command = Command::RegisterMember {
        member: NewMember {
            username: username.to_string(),
            first_name: first_name.to_string(),
            last_name: String::from("Resident"),
            status: MemberStatus::Resident,
            is_superuser: false,
        },
    };
    match persistence
        .apply(&create_test_context(), command)
        .unwrap()
        .outcome
    {
        Outcome::Member(member) => member,
        other => panic!("expected a member, got {other:?}"),
    }
}

pub fn start_semester(persistence: &mut Persistence, ctx: &CommandContext) -> Semester {
    let command: Command = Command::StartSemester {
        semester: fall_2024(),
        extra_pools: Vec::new(),
    };
    match persistence.apply(ctx, command).unwrap().outcome {
        Outcome::Semester(semester) => semester,
        other => panic!("expected a semester, got {other:?}"),
    }
}

pub fn primary_pool(persistence: &mut Persistence, semester_id: SemesterId) -> WorkshiftPool {
    persistence
        .transaction(|store| Ok(store.list_pools(semester_id)?))
        .unwrap()
        .into_iter()
        .find(|pool| pool.is_primary)
        .expect("semester has a primary pool")
}

pub fn profile_of(
    persistence: &mut Persistence,
    member_id: MemberId,
    semester_id: SemesterId,
) -> WorkshiftProfile {
    persistence
        .transaction(|store| Ok(store.find_profile(member_id, semester_id)?))
        .unwrap()
        .expect("member has a profile")
}

pub fn create_workshift_type(persistence: &mut Persistence, title: &str) -> WorkshiftTypeId {
    let command: Command = Command::CreateWorkshiftType {
        draft: WorkshiftTypeDraft {
            title: title.to_string(),
            description: String::from("Leave it cleaner than you found it."),
            quick_tips: String::new(),
            rateable: true,
            assignment: AssignmentMode::Auto,
        },
    };
    match persistence
        .apply(&create_test_context(), command)
        .unwrap()
        .outcome
    {
        Outcome::WorkshiftType(workshift_type) => workshift_type.id,
        other => panic!("expected a workshift type, got {other:?}"),
    }
}

pub fn monday_shift(
    workshift_type_id: WorkshiftTypeId,
    pool_id: PoolId,
    assignees: Vec<ProfileId>,
) -> RegularWorkshiftDraft {
    RegularWorkshiftDraft {
        workshift_type_id,
        pool_id,
        schedule: Schedule::Day(Weekday::Monday),
        count: 1,
        hours: Hours::from_whole(2),
        active: true,
        current_assignees: assignees,
        start_time: None,
        end_time: None,
        verify: VerifyPolicy::OtherMember,
        addendum: String::new(),
        is_manager_shift: false,
    }
}

/// A started Fall 2024 semester with two residents and a Monday shift
/// assigned to Alice.
pub struct Scenario {
    pub persistence: Persistence,
    pub semester: Semester,
    pub pool: WorkshiftPool,
    pub alice: WorkshiftProfile,
    pub bob: WorkshiftProfile,
    pub shift_id: RegularShiftId,
}

pub fn monday_scenario(policy: VerifyPolicy) -> Scenario {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let alice_member: Member = register(&mut persistence, "alice", "Alice");
    let bob_member: Member = register(&mut persistence, "bob", "Bob");
    let semester: Semester = start_semester(&mut persistence, &create_test_context());
    let pool: WorkshiftPool = primary_pool(&mut persistence, semester.id);
    let alice: WorkshiftProfile = profile_of(&mut persistence, alice_member.id, semester.id);
    let bob: WorkshiftProfile = profile_of(&mut persistence, bob_member.id, semester.id);
    let type_id: WorkshiftTypeId = create_workshift_type(&mut persistence, "Kitchen Clean");

    let mut draft: RegularWorkshiftDraft = monday_shift(type_id, pool.id, vec![alice.id]);
    draft.verify = policy;
    let shift_id: RegularShiftId = match persistence
        .apply(&create_test_context(), Command::CreateRegularShift { draft })
        .unwrap()
        .outcome
    {
        Outcome::RegularShift(shift) => shift.id,
        other => panic!("expected a regular shift, got {other:?}"),
    };

    Scenario {
        persistence,
        semester,
        pool,
        alice,
        bob,
        shift_id,
    }
}
