// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod availability;
mod error;
mod helpers;
mod hours;
mod instance;
mod recurrence;
mod validation;
