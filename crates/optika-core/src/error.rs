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

//! Defines the error type raised by scenes and scene sensors while rendering.
//!
//! Rendering sensors never wrap these errors: whatever a collaborator returns
//! is handed back to the caller of `render` as-is.

use std::fmt;

/// An error raised by a [`Scene`](crate::Scene) or a
/// [`RenderTarget`](crate::RenderTarget) during a render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The render pass itself failed.
    RenderingFailed(String),
    /// The scene was torn down by its owner while still attached to a sensor.
    SceneDestroyed {
        /// The name of the destroyed scene.
        scene: String,
    },
    /// The graphics device was lost (e.g., GPU driver crashed or was updated).
    DeviceLost,
    /// An unexpected or internal error occurred.
    Internal(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::RenderingFailed(msg) => {
                write!(f, "A render operation failed: {msg}")
            }
            RenderError::SceneDestroyed { scene } => {
                write!(f, "Scene '{scene}' was destroyed while still in use.")
            }
            RenderError::DeviceLost => write!(
                f,
                "The graphics device was lost and needs to be reinitialized."
            ),
            RenderError::Internal(msg) => {
                write!(f, "An internal or unexpected error occurred: {msg}")
            }
        }
    }
}

impl std::error::Error for RenderError {}
