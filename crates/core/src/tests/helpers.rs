// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::CommandContext;
use farnsworth_audit::{Actor, Cause};
use farnsworth_domain::{
    Hours, InstanceId, InstanceSource, ProfileId, RegularShiftId, SemesterId, WorkshiftInstance,
    WorkshiftSettings,
};
use time::macros::{date, datetime};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("manager-7"), String::from("member"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Workshift manager request"))
}

pub fn create_test_context() -> CommandContext {
    CommandContext::new(
        create_test_actor(),
        create_test_cause(),
        datetime!(2024-09-02 10:00 UTC),
        WorkshiftSettings::default(),
    )
}

pub fn create_test_instance(workshifter: Option<ProfileId>) -> WorkshiftInstance {
    WorkshiftInstance {
        id: InstanceId::new(42),
        semester_id: SemesterId::new(1),
        source: InstanceSource::Recurring(RegularShiftId::new(3)),
        date: date!(2024 - 09 - 09),
        workshifter,
        liable: None,
        verifier: None,
        closed: false,
        blown: false,
        intended_hours: Hours::from_whole(2),
        hours: Hours::from_whole(2),
    }
}
