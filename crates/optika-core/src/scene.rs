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

//! Contracts for the scene a rendering sensor renders and the scene-sensor
//! objects it owns.
//!
//! - [`Scene`]: the externally owned 3D world.
//! - [`SharedScene`]: a cloneable, reference-counted handle to one scene.
//! - [`SceneSensor`]: one render-capable view inside a scene, owned by exactly
//!   one rendering sensor.
//! - [`RenderTarget`]: the part of a scene sensor that actually draws.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::RenderError;
use crate::time::SimTime;

/// The external 3D world a render pass is executed against.
///
/// A scene is created and destroyed by the simulator. Sensors only hold a
/// [`SharedScene`] to it and must be detached before the scene is torn down.
pub trait Scene: Send + Sync {
    /// A human-readable name, used in log output.
    fn name(&self) -> &str;

    /// Brings the scene graph up to date before any sensor renders it.
    fn pre_render(&self) -> Result<(), RenderError>;
}

/// The drawing half of a scene sensor (e.g. a camera).
pub trait RenderTarget {
    /// Executes the render pass for this view.
    fn render(&mut self) -> Result<(), RenderError>;

    /// Finishes the render pass (resolves and copies out the frame).
    fn post_render(&mut self) -> Result<(), RenderError>;
}

/// A render-capable view or sensor instance that lives inside a scene.
///
/// Rendering sensors treat these as opaque owned resources. Only views that
/// expose a [`RenderTarget`] are rendered; the rest are stored and handed
/// back to derived sensor types untouched.
pub trait SceneSensor: Send {
    /// A human-readable name, used in log output.
    fn name(&self) -> &str;

    /// Returns the render target of this view, if it draws anything.
    fn as_render_target(&mut self) -> Option<&mut dyn RenderTarget> {
        None
    }
}

struct SceneSlot {
    scene: Arc<dyn Scene>,
    last_graph_update: Mutex<Option<SimTime>>,
}

/// A shared handle to a [`Scene`].
///
/// Every clone refers to the same scene and the same scene-graph clock, so
/// however many sensors render against one scene during a simulation step,
/// [`Scene::pre_render`] runs at most once for that step.
///
/// The internal lock only makes the handle `Send + Sync`. Sensors sharing a
/// scene across threads still need one external lock around all of their
/// render calls.
#[derive(Clone)]
pub struct SharedScene {
    slot: Arc<SceneSlot>,
}

impl SharedScene {
    /// Wraps a scene in a new shared handle.
    pub fn new<S: Scene + 'static>(scene: S) -> Self {
        Self::from_arc(Arc::new(scene))
    }

    /// Wraps an already shared scene.
    ///
    /// Two handles built from the same `Arc` with separate calls do not share
    /// a scene-graph clock; clone a `SharedScene` instead.
    pub fn from_arc(scene: Arc<dyn Scene>) -> Self {
        Self {
            slot: Arc::new(SceneSlot {
                scene,
                last_graph_update: Mutex::new(None),
            }),
        }
    }

    /// The underlying scene.
    pub fn scene(&self) -> &dyn Scene {
        self.slot.scene.as_ref()
    }

    /// The scene's name.
    pub fn name(&self) -> &str {
        self.slot.scene.name()
    }

    /// The timestamp of the last successful scene-graph update, if any.
    pub fn last_graph_update(&self) -> Option<SimTime> {
        *self
            .slot
            .last_graph_update
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs [`Scene::pre_render`] unless it already ran for exactly `now`.
    ///
    /// Returns `Ok(true)` when the scene graph was updated. A failed update
    /// leaves the clock untouched so the next caller retries.
    pub fn update_graph(&self, now: SimTime) -> Result<bool, RenderError> {
        let mut last = self
            .slot
            .last_graph_update
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *last == Some(now) {
            log::trace!("Scene '{}': graph already updated at {now}", self.name());
            return Ok(false);
        }

        self.slot.scene.pre_render()?;
        *last = Some(now);
        log::trace!("Scene '{}': graph updated at {now}", self.name());
        Ok(true)
    }

    /// Returns `true` if both handles refer to the same shared scene.
    pub fn ptr_eq(a: &SharedScene, b: &SharedScene) -> bool {
        Arc::ptr_eq(&a.slot, &b.slot)
    }

    /// Number of live handles to this scene.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.slot)
    }
}

impl fmt::Debug for SharedScene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedScene")
            .field("name", &self.name())
            .field("last_graph_update", &self.last_graph_update())
            .finish()
    }
}
