// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::require_semester;
use crate::error::CoreError;
use crate::store::{InstanceQuery, WorkshiftStore};
use farnsworth_domain::{
    Hours, PoolId, ProfileId, Semester, SemesterId, WorkshiftInstance, derive_standing,
    fine_amount_cents, periods_elapsed, snapshot_fines,
};
use time::Date;

/// Fine snapshots of one member in one pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FineRecord {
    pub profile_id: ProfileId,
    pub pool_id: PoolId,
    pub snapshots: [Hours; 3],
    /// Total owed for the negative snapshots at the semester's rate.
    pub amount_cents: i64,
}

/// Takes the fine-date standing snapshots for every member of every pool
/// in a semester, or zeroes them all when `clear` is set.
///
/// # Returns
///
/// The members with at least one negative snapshot.
///
/// # Errors
///
/// Returns an error if the semester does not exist or the store fails.
pub fn calculate_fines<S: WorkshiftStore>(
    store: &mut S,
    semester_id: SemesterId,
    today: Date,
    clear: bool,
) -> Result<Vec<FineRecord>, CoreError> {
    let semester: Semester = require_semester(store, semester_id)?;
    let mut fined: Vec<FineRecord> = Vec::new();

    for pool in store.list_pools(semester_id)? {
        for mut record in store.list_pool_hours_for_pool(pool.id)? {
            if clear {
                record.set_date_standings([Hours::ZERO; 3]);
                store.update_pool_hours(&record)?;
                continue;
            }

            let closed: Vec<WorkshiftInstance> = store.list_instances(
                &InstanceQuery::for_pool(pool.id)
                    .closed()
                    .worked_by(record.profile_id),
            )?;
            let standing_at = |date: Date| {
                derive_standing(
                    record.hour_adjustment,
                    record.hours,
                    periods_elapsed(
                        semester.start_date,
                        semester.end_date,
                        pool.weeks_per_period,
                        date,
                    ),
                    closed
                        .iter()
                        .filter(|instance| instance.date <= date)
                        .filter_map(WorkshiftInstance::standing_effect)
                        .map(|(_, hours)| hours),
                )
            };
            let snapshots: [Hours; 3] = snapshot_fines(pool.fine_dates(), today, standing_at)?;
            record.set_date_standings(snapshots);
            store.update_pool_hours(&record)?;

            if snapshots.iter().any(|snapshot| snapshot.is_negative()) {
                fined.push(FineRecord {
                    profile_id: record.profile_id,
                    pool_id: pool.id,
                    snapshots,
                    amount_cents: snapshots
                        .iter()
                        .map(|snapshot| fine_amount_cents(*snapshot, semester.rate_cents))
                        .sum(),
                });
            }
        }
    }
    Ok(fined)
}
