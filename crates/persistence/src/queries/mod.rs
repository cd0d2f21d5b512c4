// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! Each function loads rows with Diesel DSL and rebuilds the domain value
//! from them. A row that cannot be rebuilt is reported as
//! `PersistenceError::ReconstructionError`.

pub mod audit;
pub mod instances;
pub mod people;
pub mod pools;
pub mod preferences;
pub mod semesters;
pub mod shifts;
