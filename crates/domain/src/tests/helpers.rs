// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Hours, InstanceId, InstanceSource, PoolId, ProfileId, RegularShiftId, SemesterId,
    WorkshiftInstance, WorkshiftPool,
};
use time::macros::date;

pub fn create_test_pool() -> WorkshiftPool {
    WorkshiftPool {
        id: PoolId::new(1),
        semester_id: SemesterId::new(1),
        title: String::from("Regular Workshift"),
        managers: Vec::new(),
        sign_out_cutoff: 24,
        verify_cutoff: 8,
        hours: Hours::from_whole(5),
        weeks_per_period: 1,
        first_fine_date: None,
        second_fine_date: None,
        third_fine_date: None,
        any_blown: false,
        self_verify: false,
        is_primary: true,
    }
}

pub fn create_test_instance(workshifter: Option<ProfileId>) -> WorkshiftInstance {
    WorkshiftInstance {
        id: InstanceId::new(10),
        semester_id: SemesterId::new(1),
        source: InstanceSource::Recurring(RegularShiftId::new(3)),
        date: date!(2024 - 09 - 02),
        workshifter,
        liable: None,
        verifier: None,
        closed: false,
        blown: false,
        intended_hours: Hours::from_whole(2),
        hours: Hours::from_whole(2),
    }
}
