// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` persistence for the Farnsworth workshift engine.
//!
//! The crate has two layers:
//!
//! - `queries/` and `mutations/` hold the Diesel DSL for each table family
//! - [`SqliteStore`] implements the engine's [`WorkshiftStore`] seam on top
//!   of them
//!
//! [`Persistence`] owns the connection and runs every command inside one
//! transaction, so a command either lands completely (including its audit
//! event) or not at all.
//!
//! ## Testing Philosophy
//!
//! - Tests run against a fresh in-memory database per test
//! - Foreign key enforcement is verified at startup, in tests as in production
//! - Engine behavior is exercised end to end through [`Persistence::apply`]

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

use diesel::prelude::*;
use diesel::SqliteConnection;
use farnsworth::{CommandContext, Command, CoreError, StoreError, TransitionResult};
use farnsworth_audit::AuditEvent;
use farnsworth_domain::SemesterId;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod store;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use store::SqliteStore;

use backend::PersistenceBackend;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, so tests
/// never share a database.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Error type threaded through a Diesel transaction closure.
enum TxError<E> {
    Inner(E),
    Db(diesel::result::Error),
}

impl<E> From<diesel::result::Error> for TxError<E> {
    fn from(err: diesel::result::Error) -> Self {
        Self::Db(err)
    }
}

/// Persistence adapter owning the database connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        debug!(db_id, "Opened in-memory database");
        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        info!(path = path_str, "Opened database file");
        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    /// Runs `work` against the store inside one transaction.
    ///
    /// The transaction commits only if `work` succeeds.
    ///
    /// # Errors
    ///
    /// Returns the error of `work`, or a storage error if the transaction
    /// itself fails.
    pub fn transaction<T, F>(&mut self, work: F) -> Result<T, CoreError>
    where
        F: FnOnce(&mut SqliteStore<'_>) -> Result<T, CoreError>,
    {
        let outcome: Result<T, TxError<CoreError>> = self.conn.transaction(|conn| {
            let mut store: SqliteStore<'_> = SqliteStore::new(conn);
            work(&mut store).map_err(TxError::Inner)
        });
        match outcome {
            Ok(value) => Ok(value),
            Err(TxError::Inner(err)) => Err(err),
            Err(TxError::Db(err)) => Err(StoreError::from(PersistenceError::from(err)).into()),
        }
    }

    /// Applies a command atomically.
    ///
    /// The command's changes and its audit event are written in the same
    /// transaction. A rejected command leaves the database untouched.
    ///
    /// # Errors
    ///
    /// Returns the engine's error if the command is rejected or storage
    /// fails.
    pub fn apply(
        &mut self,
        ctx: &CommandContext,
        command: Command,
    ) -> Result<TransitionResult, CoreError> {
        let name: &'static str = command.name();
        let result: TransitionResult =
            self.transaction(|store| farnsworth::apply(store, ctx, command))?;
        info!(command = name, outcome = %result.outcome.summary(), "Applied command");
        Ok(result)
    }

    /// Retrieves an audit event by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the event does not exist or cannot be decoded.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }

    /// Lists audit events oldest first, with their ids.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or an event cannot be decoded.
    pub fn list_audit_events(
        &mut self,
        semester_id: Option<SemesterId>,
    ) -> Result<Vec<(i64, AuditEvent)>, PersistenceError> {
        queries::audit::list_audit_events(&mut self.conn, semester_id)
    }
}
