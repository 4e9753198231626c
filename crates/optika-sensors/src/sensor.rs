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

//! The capability every rendering sensor exposes.

use optika_core::{RenderError, SceneSensor, SharedScene, SimTime};

use crate::error::SensorError;
use crate::sensor_core::{RenderOutcome, RenderingSensorCore};

/// A sensor that produces its data by rendering a shared scene.
///
/// Concrete sensors (cameras, depth cameras, GPU lidars) own a
/// [`RenderingSensorCore`] and implement the two accessors; everything else
/// is provided by delegating to the core.
pub trait RenderingSensor {
    /// The core holding the scene, the scene sensors and the render gate.
    fn rendering_core(&self) -> &RenderingSensorCore;

    /// Mutable access to the core.
    fn rendering_core_mut(&mut self) -> &mut RenderingSensorCore;

    /// Attaches, replaces or (with `None`) detaches the rendering scene.
    fn set_scene(&mut self, scene: Option<SharedScene>) {
        self.rendering_core_mut().set_scene(scene);
    }

    /// The attached scene, if any.
    fn scene(&self) -> Option<&SharedScene> {
        self.rendering_core().scene()
    }

    /// Renders unless a render already ran at `now` (see
    /// [`RenderingSensorCore::render`]).
    fn render(&mut self, now: SimTime, force: bool) -> Result<RenderOutcome, RenderError> {
        self.rendering_core_mut().render(now, force)
    }

    /// Number of scene sensors backing this sensor.
    fn sensor_count(&self) -> usize {
        self.rendering_core().sensor_count()
    }

    /// The scene sensor at `index`; index 0 is the primary one.
    fn sensor(&self, index: usize) -> Result<&dyn SceneSensor, SensorError> {
        self.rendering_core().sensor(index)
    }

    /// The primary scene sensor (index 0).
    fn primary_sensor(&self) -> Result<&dyn SceneSensor, SensorError> {
        self.rendering_core().primary_sensor()
    }
}

impl RenderingSensor for RenderingSensorCore {
    fn rendering_core(&self) -> &RenderingSensorCore {
        self
    }

    fn rendering_core_mut(&mut self) -> &mut RenderingSensorCore {
        self
    }
}
