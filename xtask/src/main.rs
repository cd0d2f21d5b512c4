// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask
//!
//! Project automation for the Farnsworth workspace.
//!
//! - `cargo xtask ci` runs lint, build, test and migration checks
//! - `cargo xtask verify-migrations` applies the `SQLite` migrations to a
//!   scratch database, reverts them, and applies them again, failing if the
//!   down migrations leave anything behind or the second run yields a
//!   different schema

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::collections::BTreeSet;
use std::{io, process::Output};

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use diesel::sql_types::Text;
use diesel::{Connection, QueryableByName, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");

/// Packages with library targets, documented by `lint-docs`.
const LIBRARY_PACKAGES: [&str; 5] = [
    "farnsworth-domain",
    "farnsworth-audit",
    "farnsworth",
    "farnsworth-persistence",
    "farnsworth-api",
];

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test, migrations)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Generate code coverage report
    #[command(visible_alias = "cov")]
    Coverage,

    /// Lint formatting, typos, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check that docs build without errors
    #[command(visible_alias = "d")]
    LintDocs,

    /// Lint formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Check for typos in the project
    #[command(visible_alias = "lt")]
    LintTypos,

    /// Fix clippy warnings in the project
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run all tests
    #[command(visible_alias = "t")]
    Test,

    /// Run doc tests
    #[command(visible_alias = "td")]
    TestDocs,

    /// Run lib and binary tests
    #[command(visible_alias = "tl")]
    TestLibs,

    /// Check that migrations apply, revert and re-apply cleanly
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::Coverage => coverage(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::LintTypos => lint_typos(),
            Self::FixClippy => fix_clippy(),
            Self::FixFormatting => fix_format(),
            Self::Test => test(),
            Self::TestDocs => test_docs(),
            Self::TestLibs => test_libs(),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

fn ci() -> Result<()> {
    lint()?;
    build()?;
    test()?;
    verify_migrations()?;
    Ok(())
}

fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

fn check() -> Result<()> {
    run_cargo(vec!["check", "--all-targets", "--all-features"])
}

fn coverage() -> Result<()> {
    run_cargo(vec![
        "llvm-cov",
        "--lcov",
        "--output-path",
        "target/lcov.info",
        "--all-features",
    ])
}

fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    lint_format()?;
    lint_typos()?;
    Ok(())
}

fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

fn fix_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--fix",
        "--allow-dirty",
        "--allow-staged",
        "--",
        "-D",
        "warnings",
    ])
}

/// Builds docs with docs.rs-equivalent flags
fn lint_docs() -> Result<()> {
    for package in LIBRARY_PACKAGES {
        cmd(
            "cargo",
            ["doc", "--no-deps", "--all-features", "--package", package],
        )
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    }
    Ok(())
}

fn lint_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all", "--check"])
}

fn fix_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all"])
}

/// Check for typos using [typos-cli](https://github.com/crate-ci/typos/)
fn lint_typos() -> Result<()> {
    cmd!("typos").run_with_trace()?;
    Ok(())
}

fn test() -> Result<()> {
    test_libs()?;
    test_docs()?; // slowest, so last
    Ok(())
}

fn test_docs() -> Result<()> {
    run_cargo(vec!["test", "--doc", "--all-features"])
}

fn test_libs() -> Result<()> {
    run_cargo(vec!["test", "--all-targets", "--all-features"])
}

fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        // CARGO is set because we're running in a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// Applies every migration to a scratch `SQLite` database, reverts them all,
/// and applies them again.
///
/// # Errors
///
/// Fails if any migration errors, if reverting leaves user tables or
/// indexes behind, or if the re-applied schema differs from the first.
fn verify_migrations() -> Result<()> {
    let mut conn: SqliteConnection =
        SqliteConnection::establish(":memory:").wrap_err("failed to open scratch database")?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| eyre!("failed to apply migrations: {err}"))?;
    let first: BTreeSet<SchemaObject> = introspect_schema(&mut conn)?;
    tracing::info!(objects = first.len(), "Applied migrations");

    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|err| eyre!("failed to revert migrations: {err}"))?;
    let leftover: BTreeSet<SchemaObject> = introspect_schema(&mut conn)?;
    if !leftover.is_empty() {
        for object in &leftover {
            tracing::error!("left behind after revert: {} {}", object.kind, object.name);
        }
        return Err(eyre!(
            "down migrations left {} schema objects behind",
            leftover.len()
        ));
    }

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| eyre!("failed to re-apply migrations: {err}"))?;
    let second: BTreeSet<SchemaObject> = introspect_schema(&mut conn)?;
    if first != second {
        for object in first.symmetric_difference(&second) {
            tracing::error!("schema differs on re-apply: {} {}", object.kind, object.name);
        }
        return Err(eyre!("re-applied schema differs from the first run"));
    }

    tracing::info!("Migrations apply, revert and re-apply cleanly");
    Ok(())
}

/// One table, index or trigger as recorded in `sqlite_master`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, QueryableByName)]
struct SchemaObject {
    #[diesel(sql_type = Text)]
    kind: String,
    #[diesel(sql_type = Text)]
    name: String,
    #[diesel(sql_type = Text)]
    definition: String,
}

/// Lists user schema objects, ignoring `SQLite` internals and diesel's
/// migration bookkeeping.
fn introspect_schema(conn: &mut SqliteConnection) -> Result<BTreeSet<SchemaObject>> {
    let objects: Vec<SchemaObject> = diesel::sql_query(
        "SELECT type AS kind, name, COALESCE(sql, '') AS definition \
         FROM sqlite_master \
         WHERE name NOT LIKE 'sqlite_%' \
         AND name NOT LIKE '__diesel_schema_migrations%'",
    )
    .load(conn)
    .wrap_err("failed to read sqlite_master")?;
    Ok(objects.into_iter().collect())
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
