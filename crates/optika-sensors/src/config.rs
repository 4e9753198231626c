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

//! Per-sensor settings.

use serde::{Deserialize, Serialize};

use crate::error::SensorError;

/// Settings for one rendering sensor.
///
/// Every field has a default, so a config file only needs the fields it
/// changes.
///
/// ```ron
/// (
///     name: "front_camera",
///     update_scene_graph: true,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingSensorConfig {
    /// The sensor's name, used in log output.
    pub name: String,
    /// If `true`, a render first brings the shared scene graph up to date
    /// (at most once per timestamp across all sensors on the scene).
    pub update_scene_graph: bool,
}

impl RenderingSensorConfig {
    /// Creates a default configuration with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parses a configuration from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, SensorError> {
        Ok(ron::from_str(text)?)
    }
}

impl Default for RenderingSensorConfig {
    fn default() -> Self {
        Self {
            name: "rendering_sensor".to_string(),
            update_scene_graph: true,
        }
    }
}
