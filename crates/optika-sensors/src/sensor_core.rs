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

//! The render gate and ownership state shared by every rendering sensor.

use std::fmt;

use optika_core::{RenderError, SceneSensor, SharedScene, SimTime};

use crate::config::RenderingSensorConfig;
use crate::error::SensorError;

/// Why a call to [`RenderingSensorCore::render`] did not render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A render already ran for exactly this timestamp.
    AlreadyRendered,
    /// No scene is attached yet (or it was detached).
    SceneUnavailable,
}

/// The result of a successful call to [`RenderingSensorCore::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The scene sensors were rendered.
    Rendered,
    /// Nothing was rendered.
    Skipped(SkipReason),
}

impl RenderOutcome {
    /// Returns `true` if a render pass was executed.
    pub fn is_rendered(self) -> bool {
        matches!(self, RenderOutcome::Rendered)
    }
}

/// Owned state of a rendering sensor: the shared scene, the scene sensors
/// backing it, and the time of the last executed render.
///
/// Render calls are deduplicated on timestamp equality, so several logical
/// sensors updated within one simulation step do not submit the same render
/// twice. Any different timestamp renders again, including one earlier than
/// the last render.
///
/// The core does no locking. Sensors that share a scene and are rendered
/// from several threads must be serialized by the caller.
pub struct RenderingSensorCore {
    config: RenderingSensorConfig,
    scene: Option<SharedScene>,
    scene_sensors: Vec<Box<dyn SceneSensor>>,
    last_render_time: Option<SimTime>,
}

impl RenderingSensorCore {
    /// Creates a core with no scene and no scene sensors.
    pub fn new(config: RenderingSensorConfig) -> Self {
        Self {
            config,
            scene: None,
            scene_sensors: Vec::new(),
            last_render_time: None,
        }
    }

    /// Creates a core with the default configuration and the given name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self::new(RenderingSensorConfig::named(name))
    }

    /// The sensor's name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// The sensor's configuration.
    pub fn config(&self) -> &RenderingSensorConfig {
        &self.config
    }

    /// Attaches a scene, replaces the current one, or detaches with `None`.
    ///
    /// Resources that derived sensors created in the previous scene are not
    /// released here.
    pub fn set_scene(&mut self, scene: Option<SharedScene>) {
        match &scene {
            Some(s) => log::debug!("Sensor '{}': attached to scene '{}'", self.name(), s.name()),
            None => log::debug!("Sensor '{}': detached from scene", self.name()),
        }
        self.scene = scene;
    }

    /// The attached scene, if any.
    pub fn scene(&self) -> Option<&SharedScene> {
        self.scene.as_ref()
    }

    /// Returns `true` if a scene is attached.
    pub fn has_scene(&self) -> bool {
        self.scene.is_some()
    }

    /// The timestamp of the last executed render, or `None` if the sensor
    /// has never rendered.
    pub fn last_render_time(&self) -> Option<SimTime> {
        self.last_render_time
    }

    /// Renders every scene sensor that has a render target, unless a render
    /// already ran for `now` and `force` is `false`.
    ///
    /// Without a scene this is a no-op, forced or not. Errors from the scene
    /// or a render target are returned unchanged and leave the last render
    /// time as it was.
    ///
    /// Targets are rendered in order and the first error stops the pass.
    /// Targets before the failing one have already rendered, and since the
    /// gate stays open, the next call at the same `now` renders them again.
    pub fn render(&mut self, now: SimTime, force: bool) -> Result<RenderOutcome, RenderError> {
        if !force && self.last_render_time == Some(now) {
            log::trace!("Sensor '{}': already rendered at {now}", self.config.name);
            return Ok(RenderOutcome::Skipped(SkipReason::AlreadyRendered));
        }

        let Some(scene) = &self.scene else {
            log::trace!("Sensor '{}': no scene, skipping render", self.config.name);
            return Ok(RenderOutcome::Skipped(SkipReason::SceneUnavailable));
        };

        if self.config.update_scene_graph {
            scene.update_graph(now)?;
        }

        for scene_sensor in &mut self.scene_sensors {
            if let Some(target) = scene_sensor.as_render_target() {
                target.render()?;
                target.post_render()?;
            }
        }

        self.last_render_time = Some(now);
        log::trace!(
            "Sensor '{}': rendered {} scene sensor(s) at {now}",
            self.config.name,
            self.scene_sensors.len()
        );
        Ok(RenderOutcome::Rendered)
    }

    /// Takes ownership of a scene sensor and returns its index.
    ///
    /// The first sensor added (index 0) is the primary one.
    pub fn add_sensor(&mut self, scene_sensor: Box<dyn SceneSensor>) -> usize {
        log::debug!(
            "Sensor '{}': added scene sensor '{}' at index {}",
            self.config.name,
            scene_sensor.name(),
            self.scene_sensors.len()
        );
        self.scene_sensors.push(scene_sensor);
        self.scene_sensors.len() - 1
    }

    /// Number of owned scene sensors.
    pub fn sensor_count(&self) -> usize {
        self.scene_sensors.len()
    }

    /// The scene sensor at `index`.
    pub fn sensor(&self, index: usize) -> Result<&dyn SceneSensor, SensorError> {
        let count = self.scene_sensors.len();
        match self.scene_sensors.get(index) {
            Some(scene_sensor) => Ok(scene_sensor.as_ref()),
            None => Err(self.out_of_range(index, count)),
        }
    }

    /// Mutable access to the scene sensor at `index`.
    pub fn sensor_mut(&mut self, index: usize) -> Result<&mut dyn SceneSensor, SensorError> {
        let count = self.scene_sensors.len();
        if index >= count {
            return Err(self.out_of_range(index, count));
        }
        Ok(self.scene_sensors[index].as_mut())
    }

    /// The primary scene sensor (index 0).
    pub fn primary_sensor(&self) -> Result<&dyn SceneSensor, SensorError> {
        self.sensor(0)
    }

    /// Iterates over the owned scene sensors in insertion order.
    pub fn sensors(&self) -> impl Iterator<Item = &dyn SceneSensor> + '_ {
        self.scene_sensors.iter().map(|s| s.as_ref())
    }

    fn out_of_range(&self, index: usize, count: usize) -> SensorError {
        log::warn!(
            "Sensor '{}': unable to get scene sensor {index}, only {count} owned",
            self.config.name
        );
        SensorError::OutOfRange { index, count }
    }
}

impl Default for RenderingSensorCore {
    fn default() -> Self {
        Self::new(RenderingSensorConfig::default())
    }
}

impl fmt::Debug for RenderingSensorCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderingSensorCore")
            .field("name", &self.config.name)
            .field("scene", &self.scene)
            .field(
                "scene_sensors",
                &self.scene_sensors.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("last_render_time", &self.last_render_time)
            .finish()
    }
}

impl Drop for RenderingSensorCore {
    fn drop(&mut self) {
        if !self.scene_sensors.is_empty() {
            log::debug!(
                "Sensor '{}': releasing {} scene sensor(s)",
                self.config.name,
                self.scene_sensors.len()
            );
        }
    }
}
