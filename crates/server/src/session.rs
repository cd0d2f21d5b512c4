// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller identification for the server.
//!
//! The server sits behind the house's single sign-on proxy, which forwards
//! the signed-in username in the [`USER_HEADER`] header. This module turns
//! that header into an authenticated member.

use axum::{extract::FromRequestParts, http::request::Parts};
use farnsworth_api::{ApiError, AuthError, AuthenticatedUser};
use farnsworth_audit::Cause;
use tracing::{debug, warn};

use crate::{AppState, HttpError};

/// Header carrying the caller's username.
pub const USER_HEADER: &str = "x-farnsworth-user";

/// Optional header carrying a request id, recorded as the audit cause.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Extractor for authenticated members.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     AxumState(app_state): AxumState<AppState>,
///     session: SessionMember,
/// ) -> Result<Json<Response>, HttpError> {
///     let ctx: ApiContext = app_state.context(session);
///     ...
/// }
/// ```
///
/// # Errors
///
/// Rejects with HTTP 401 if the header is missing or unreadable, or names
/// an unknown or inactive member.
pub struct SessionMember {
    pub user: AuthenticatedUser,
    /// The cause recorded with any command this request applies.
    pub cause: Cause,
}

impl FromRequestParts<AppState> for SessionMember {
    type Rejection = HttpError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let username: &str = parts
            .headers
            .get(USER_HEADER)
            .ok_or_else(|| {
                debug!("Missing user header");
                HttpError::from(ApiError::from(AuthError::MissingIdentity))
            })?
            .to_str()
            .map_err(|_| {
                warn!("User header is not valid ASCII");
                HttpError::from(ApiError::from(AuthError::MissingIdentity))
            })?;

        let mut persistence = state.persistence.lock().await;
        let user: AuthenticatedUser = AuthenticatedUser::resolve(&mut persistence, username)
            .map_err(|err: AuthError| {
                warn!(username, error = %err, "Could not authenticate caller");
                HttpError::from(ApiError::from(err))
            })?;
        drop(persistence);

        let request_id: String = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map_or_else(|| String::from("http"), ToString::to_string);
        let cause: Cause = Cause::new(
            request_id,
            format!("{} {}", parts.method, parts.uri.path()),
        );

        debug!(username = %user.member.username, "Caller authenticated");
        Ok(Self { user, cause })
    }
}
