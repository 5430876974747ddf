// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Course capacity snapshots.
//!
//! Capacity counters are owned and serialized by the external
//! course-management collaborator. This engine reads snapshots and
//! derives decisions from them; it never increments or
//! compare-and-swaps a counter, so there is a single source of truth
//! for capacity.

use serde::{Deserialize, Serialize};

/// A read-only snapshot of a course's enrollment capacity.
///
/// `enrolled_count <= max_attendants` is an invariant of the external
/// collaborator; this engine tolerates violations (an overbooked
/// snapshot simply reads as full).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseCapacity {
    /// Maximum number of enrollments the course accepts.
    pub max_attendants: u32,
    /// Number of enrollments currently held.
    pub enrolled_count: u32,
}

impl CourseCapacity {
    /// Creates a new capacity snapshot.
    #[must_use]
    pub const fn new(max_attendants: u32, enrolled_count: u32) -> Self {
        Self {
            max_attendants,
            enrolled_count,
        }
    }

    /// Returns whether no further enrollments fit.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.enrolled_count >= self.max_attendants
    }

    /// Returns the number of open seats.
    #[must_use]
    pub const fn seats_remaining(&self) -> u32 {
        self.max_attendants.saturating_sub(self.enrolled_count)
    }
}
