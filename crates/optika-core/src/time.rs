// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Simulation time as seen by rendering sensors.

use serde::{Deserialize, Serialize};
use std::fmt;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// A point on the simulator's logical clock, with nanosecond precision.
///
/// The value is supplied by the embedding simulator; nothing in this
/// workspace reads a wall clock. Timestamps are only ever compared for
/// equality by the render gate, so the clock is free to jump backward
/// (e.g. after a simulation reset).
///
/// # Example
///
/// ```
/// use optika_core::SimTime;
///
/// let t = SimTime::from_secs_nanos(1, 500_000_000);
/// assert_eq!(t, SimTime::from_secs_f64(1.5));
/// assert_eq!(t.to_string(), "1.500000000s");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct SimTime {
    nanos: u64,
}

impl SimTime {
    /// The start of the simulation.
    pub const ZERO: SimTime = SimTime { nanos: 0 };

    /// Creates a timestamp from nanoseconds since simulation start.
    #[must_use]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Creates a timestamp from whole seconds plus a nanosecond remainder.
    ///
    /// Saturates at the largest representable timestamp.
    #[must_use]
    pub const fn from_secs_nanos(secs: u64, nanos: u32) -> Self {
        Self {
            nanos: secs
                .saturating_mul(NANOS_PER_SEC)
                .saturating_add(nanos as u64),
        }
    }

    /// Creates a timestamp from floating-point seconds.
    ///
    /// Negative and NaN inputs clamp to [`SimTime::ZERO`].
    #[must_use]
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn from_secs_f64(secs: f64) -> Self {
        let nanos = (secs * 1e9).round().max(0.0) as u64;
        Self { nanos }
    }

    /// Returns the timestamp as nanoseconds.
    #[must_use]
    pub const fn as_nanos(self) -> u64 {
        self.nanos
    }

    /// Returns the timestamp as floating-point seconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_secs_f64(self) -> f64 {
        self.nanos as f64 / 1e9
    }

    /// Whole seconds component.
    #[must_use]
    pub const fn secs(self) -> u64 {
        self.nanos / NANOS_PER_SEC
    }

    /// Sub-second nanoseconds component.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn subsec_nanos(self) -> u32 {
        (self.nanos % NANOS_PER_SEC) as u32
    }
}

impl From<std::time::Duration> for SimTime {
    #[allow(clippy::cast_possible_truncation)]
    fn from(elapsed: std::time::Duration) -> Self {
        Self {
            nanos: elapsed.as_nanos().min(u128::from(u64::MAX)) as u64,
        }
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}s", self.secs(), self.subsec_nanos())
    }
}
