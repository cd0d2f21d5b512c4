// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The workshift consistency engine.
//!
//! Every mutation is a [`Command`] applied through [`apply`] against a
//! [`WorkshiftStore`]. The engine services it dispatches to keep hour
//! totals, generated instances and logs consistent with each other.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
pub mod engine;
mod error;
pub mod queries;
mod state;
mod store;

#[cfg(test)]
mod tests;

pub use apply::apply;
pub use command::Command;
pub use engine::assignment::AutoAssignReport;
pub use engine::fines::FineRecord;
pub use engine::{current_semester, load_instance_details};
pub use error::{CoreError, StoreError};
pub use queries::{InstanceView, ProfileView, SemesterOverview};
pub use state::{CommandContext, Outcome, TransitionResult};
pub use store::{InstanceQuery, WorkshiftStore};
