// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use farnsworth::{Command, CommandContext};
use farnsworth_audit::{Actor, Cause};
use farnsworth_domain::{MemberStatus, NewMember, WorkshiftSettings};
use farnsworth_persistence::Persistence;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{
    AddManagerRequest, ApiContext, AuthenticatedUser, InstanceSummary, PoolInfo,
    RegisterMemberRequest, RegularShiftRequest, StartSemesterRequest, WorkshiftTypeRequest,
    add_manager, create_regular_shift, create_workshift_type, list_open_shifts,
    register_member, semester_overview, start_semester,
};

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

/// The first Monday of the test semester, mid-morning.
pub fn test_now() -> OffsetDateTime {
    datetime!(2024-09-02 10:00 UTC)
}

/// A fresh database holding a single superuser named `admin`.
pub fn setup_test_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().expect("in-memory database");
    let ctx: CommandContext = CommandContext::new(
        Actor::system(),
        create_test_cause(),
        test_now(),
        WorkshiftSettings::default(),
    );
    persistence
        .apply(
            &ctx,
            Command::RegisterMember {
                member: NewMember {
                    username: String::from("admin"),
                    first_name: String::from("House"),
                    last_name: String::from("Admin"),
                    status: MemberStatus::Resident,
                    is_superuser: true,
                },
            },
        )
        .expect("bootstrap superuser");
    persistence
}

/// Resolves `username` and wraps it in a request context.
pub fn context_for(persistence: &mut Persistence, username: &str) -> ApiContext {
    let user: AuthenticatedUser =
        AuthenticatedUser::resolve(persistence, username).expect("known member");
    ApiContext::new(
        user,
        create_test_cause(),
        test_now(),
        WorkshiftSettings::default(),
    )
}

pub fn resident(username: &str, first_name: &str) -> RegisterMemberRequest {
    RegisterMemberRequest {
        username: username.to_string(),
        first_name: first_name.to_string(),
        last_name: String::from("Resident"),
        status: String::from("resident"),
        is_superuser: false,
    }
}

pub fn fall_2024() -> StartSemesterRequest {
    StartSemesterRequest {
        season: String::from("Fall"),
        year: 2024,
        rate_cents: Some(1000),
        policy: None,
        start_date: String::from("2024-08-26"),
        end_date: String::from("2024-12-15"),
        extra_pools: Vec::new(),
    }
}

pub fn monday_shift(workshift_type_id: i64, pool_id: i64) -> RegularShiftRequest {
    RegularShiftRequest {
        workshift_type_id,
        pool_id,
        day: Some(String::from("monday")),
        count: 1,
        hours: 2.0,
        active: true,
        assignee_ids: Vec::new(),
        start_time: Some(String::from("18:00")),
        end_time: Some(String::from("20:00")),
        verify: String::from("O"),
        addendum: String::new(),
        is_manager_shift: false,
    }
}

/// A house with a running semester.
///
/// `admin` is a superuser, `wsm` holds the workshift manager position, and
/// `alice` and `bob` are plain residents.
pub struct House {
    pub persistence: Persistence,
    pub admin: ApiContext,
    pub wsm: ApiContext,
    pub alice: ApiContext,
    pub bob: ApiContext,
    pub semester_id: i64,
    pub primary_pool: PoolInfo,
}

pub fn setup_house() -> House {
    let mut persistence: Persistence = setup_test_persistence();
    let admin: ApiContext = context_for(&mut persistence, "admin");

    for (username, first_name) in [("wsm", "Wendy"), ("alice", "Alice"), ("bob", "Bob")] {
        register_member(&mut persistence, &admin, &resident(username, first_name)).unwrap();
    }
    add_manager(
        &mut persistence,
        &admin,
        &AddManagerRequest {
            title: String::from("Workshift Manager"),
            incumbent: Some(String::from("wsm")),
            workshift_manager: true,
            president: false,
            workshift_hours: 0.0,
        },
    )
    .unwrap();

    let semester_id: i64 = start_semester(&mut persistence, &admin, &fall_2024())
        .unwrap()
        .response
        .semester_id;
    let primary_pool: PoolInfo = semester_overview(&mut persistence, &admin, None)
        .unwrap()
        .pools
        .into_iter()
        .find(|pool| pool.is_primary)
        .unwrap();

    House {
        wsm: context_for(&mut persistence, "wsm"),
        alice: context_for(&mut persistence, "alice"),
        bob: context_for(&mut persistence, "bob"),
        admin,
        persistence,
        semester_id,
        primary_pool,
    }
}

/// Adds a Monday dish shift to the primary pool and returns its open
/// occurrences, earliest first.
pub fn add_monday_dishes(house: &mut House) -> Vec<InstanceSummary> {
    let workshift_type_id: i64 = create_workshift_type(
        &mut house.persistence,
        &house.wsm,
        &WorkshiftTypeRequest {
            title: String::from("Dishes"),
            description: String::new(),
            quick_tips: String::new(),
            rateable: true,
            assignment: String::from("A"),
        },
    )
    .unwrap()
    .response
    .workshift_type_id;
    create_regular_shift(
        &mut house.persistence,
        &house.wsm,
        &monday_shift(workshift_type_id, house.primary_pool.pool_id),
    )
    .unwrap();
    list_open_shifts(&mut house.persistence, &house.bob, None).unwrap()
}
