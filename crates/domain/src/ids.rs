// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Typed identifiers for persisted workshift entities.
//!
//! Every row is addressed by a storage-assigned `i64`. Wrapping each in its
//! own type keeps a pool id from ever being passed where a profile id is
//! expected.

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw storage identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw storage identifier.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifies a semester.
    SemesterId
);
entity_id!(
    /// Identifies a workshift pool.
    PoolId
);
entity_id!(
    /// Identifies one member's hour record in one pool.
    PoolHoursId
);
entity_id!(
    /// Identifies a member's per-semester workshift profile.
    ProfileId
);
entity_id!(
    /// Identifies a house member.
    MemberId
);
entity_id!(
    /// Identifies a manager position.
    ManagerId
);
entity_id!(
    /// Identifies a workshift type.
    WorkshiftTypeId
);
entity_id!(
    /// Identifies a recurring weekly workshift.
    RegularShiftId
);
entity_id!(
    /// Identifies standalone instance details.
    InstanceInfoId
);
entity_id!(
    /// Identifies a concrete workshift instance.
    InstanceId
);
entity_id!(
    /// Identifies a shift log entry.
    LogEntryId
);
entity_id!(
    /// Identifies a catalog time block.
    TimeBlockId
);
entity_id!(
    /// Identifies a catalog rating.
    RatingId
);
