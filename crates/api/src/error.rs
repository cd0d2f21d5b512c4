// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use farnsworth::{CoreError, StoreError};
use farnsworth_domain::{DomainError, ErrorKind};
use thiserror::Error;

/// Failures resolving who is making a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No identity was supplied with the request.
    #[error("No user identity was supplied")]
    MissingIdentity,

    /// The supplied username is not a known member.
    #[error("Unknown member '{username}'")]
    UnknownMember { username: String },

    /// The member exists but is no longer active.
    #[error("Member '{username}' is not active")]
    InactiveMember { username: String },

    /// Looking the member up failed.
    #[error("Could not resolve identity: {reason}")]
    Lookup { reason: String },
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the caller may not perform the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The authority required for this action.
        required: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { action, required } => {
                write!(f, "Unauthorized: '{action}' requires {required}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Lookup { .. } => Self::Internal {
                message: err.to_string(),
            },
            _ => Self::AuthenticationFailed {
                reason: err.to_string(),
            },
        }
    }
}

/// The resource type named by a not-found error.
const fn missing_resource(err: &DomainError) -> &'static str {
    match err {
        DomainError::SemesterNotFound(_) | DomainError::NoCurrentSemester => "Semester",
        DomainError::PoolNotFound(_) => "Pool",
        DomainError::ProfileNotFound(_) => "Workshift profile",
        DomainError::MemberNotFound(_) => "Member",
        DomainError::ManagerNotFound(_) => "Manager",
        DomainError::WorkshiftTypeNotFound(_) => "Workshift type",
        DomainError::RegularShiftNotFound(_) => "Regular workshift",
        DomainError::InstanceNotFound(_) | DomainError::InstanceInfoNotFound(_) => "Shift",
        DomainError::PoolHoursRecordNotFound(_) | DomainError::PoolHoursNotFound { .. } => {
            "Pool hours"
        }
        _ => "Resource",
    }
}

/// The rule name reported for a validation error that is not tied to a
/// single input field.
const fn rule_name(err: &DomainError) -> &'static str {
    match err {
        DomainError::DuplicateSemester { .. } => "unique_semester",
        DomainError::DuplicatePool { .. } => "unique_pool_title",
        DomainError::DuplicateWorkshiftType { .. } => "unique_workshift_type",
        DomainError::DuplicateProfile(_) => "unique_profile",
        DomainError::DuplicateUsername(_) => "unique_username",
        DomainError::PrimaryPoolUndeletable(_) => "primary_pool_required",
        DomainError::PreferencesClosed(_) => "preferences_window",
        DomainError::InstanceClosed(_) => "instance_closed",
        DomainError::InstanceAlreadyFilled(_) => "instance_filled",
        DomainError::InstanceNotFilled(_) => "instance_unfilled",
        DomainError::NotWorkshifter(_) => "workshifter_only",
        DomainError::NoProfileInSemester => "profile_required",
        DomainError::VerifyNotPermitted(_) => "verify_policy",
        DomainError::SelfVerifyForbidden => "no_self_verify",
        DomainError::BlownNotPermitted => "blown_policy",
        _ => "validation",
    }
}

/// Translates a domain error into an API error.
///
/// Validation failures tied to an input field become `InvalidInput` for
/// that field. Integrity violations are internal errors.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err.kind() {
        ErrorKind::NotFound => ApiError::ResourceNotFound {
            resource_type: missing_resource(&err).to_string(),
            message,
        },
        ErrorKind::Integrity => ApiError::Internal { message },
        ErrorKind::Validation => match err.field() {
            Some(field) if field != "pk" => ApiError::InvalidInput {
                field: field.to_string(),
                message,
            },
            _ => ApiError::DomainRuleViolation {
                rule: rule_name(&err).to_string(),
                message,
            },
        },
    }
}

/// Translates a core error into an API error.
///
/// Storage failures are never shown to the caller in detail.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Storage(StoreError::Integrity(msg)) => ApiError::Internal {
            message: format!("Stored data is inconsistent: {msg}"),
        },
        CoreError::Storage(StoreError::Backend(msg)) => ApiError::Internal {
            message: format!("Storage failure: {msg}"),
        },
    }
}

/// Builds an `InvalidInput` error for `field`.
#[must_use]
pub fn invalid_input(field: &str, message: impl Into<String>) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: message.into(),
    }
}
