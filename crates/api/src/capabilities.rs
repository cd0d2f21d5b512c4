// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities tell a client which buttons to show. They are advisory
//! only: every handler still checks authority and the engine still checks
//! preconditions.

use farnsworth_domain::{Interaction, Semester, WorkshiftPool};
use serde::{Deserialize, Serialize};

use crate::auth::{AuthenticatedUser, AuthorizationService};

/// Represents whether a specific action is permitted.
///
/// Serializes to JSON as true/false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Allowed,
    Denied,
}

impl Capability {
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value: bool = bool::deserialize(deserializer)?;
        Ok(Self::from_bool(value))
    }
}

/// What a caller may do within one semester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterCapabilities {
    pub can_manage: Capability,
    /// Whether the caller may still edit their own preferences.
    pub can_edit_preferences: Capability,
    pub can_assign_shifts: Capability,
    pub can_calculate_fines: Capability,
}

/// What a caller may do to one shift occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceCapabilities {
    pub can_sign_in: Capability,
    pub can_sign_out: Capability,
    pub can_verify: Capability,
    pub can_mark_blown: Capability,
    /// Edit details or hours, or delete the occurrence.
    pub can_edit: Capability,
}

/// Computes the caller's capabilities within `semester`.
#[must_use]
pub fn compute_semester_capabilities(
    user: &AuthenticatedUser,
    semester: &Semester,
) -> SemesterCapabilities {
    let can_manage: bool = AuthorizationService::can_manage(user, Some(semester));
    SemesterCapabilities {
        can_manage: Capability::from_bool(can_manage),
        can_edit_preferences: Capability::from_bool(semester.preferences_open || can_manage),
        can_assign_shifts: Capability::from_bool(can_manage),
        can_calculate_fines: Capability::from_bool(can_manage),
    }
}

/// Computes the caller's capabilities on a shift from the interactions the
/// engine reports as available.
#[must_use]
pub fn compute_instance_capabilities(
    user: &AuthenticatedUser,
    semester: &Semester,
    pool: &WorkshiftPool,
    interactions: &[Interaction],
) -> InstanceCapabilities {
    let allowed = |interaction: Interaction| Capability::from_bool(interactions.contains(&interaction));
    let can_edit: bool = AuthorizationService::can_manage(user, Some(semester))
        || AuthorizationService::is_pool_manager(user, pool);
    InstanceCapabilities {
        can_sign_in: allowed(Interaction::SignIn),
        can_sign_out: allowed(Interaction::SignOut),
        can_verify: allowed(Interaction::Verify),
        can_mark_blown: allowed(Interaction::Blown),
        can_edit: Capability::from_bool(can_edit),
    }
}
