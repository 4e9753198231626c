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

//! Error types for rendering sensors.

use thiserror::Error;

/// Errors raised by a rendering sensor itself.
///
/// Failures of the scene or of a render target are not listed here: they are
/// returned unchanged as [`optika_core::RenderError`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SensorError {
    /// A scene sensor was requested at an index past the end of the collection.
    #[error("scene sensor index {index} out of range (sensor owns {count})")]
    OutOfRange {
        /// The requested index.
        index: usize,
        /// The number of scene sensors owned at the time of the request.
        count: usize,
    },

    /// The sensor configuration could not be parsed.
    #[error("invalid sensor configuration: {0}")]
    Config(String),
}

impl From<ron::error::SpannedError> for SensorError {
    fn from(err: ron::error::SpannedError) -> Self {
        SensorError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_display() {
        let err = SensorError::OutOfRange { index: 3, count: 2 };
        assert_eq!(
            err.to_string(),
            "scene sensor index 3 out of range (sensor owns 2)"
        );
    }
}
