// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! Inserts return the generated row id, read back with
//! `get_last_insert_rowid()` from the `backend` module. Callers reload the
//! full entity through `queries/` when they need it.
//!
//! Deletes only remove the row and its link-table rows. Removing
//! dependent entities first is the engine's job.

pub mod audit;
pub mod instances;
pub mod people;
pub mod pools;
pub mod preferences;
pub mod semesters;
pub mod shifts;
