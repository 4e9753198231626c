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

//! # Optika Sensors
//!
//! The shared base of every sensor whose data comes from rendering a scene
//! (cameras, depth cameras, GPU lidars).
//!
//! - [`RenderingSensorCore`]: owns the scene reference and the scene sensors,
//!   and decides whether a render call actually renders.
//! - [`RenderingSensor`]: the capability concrete sensors get by composing a
//!   core.
//! - [`RenderingSensorConfig`]: per-sensor settings, loadable from RON.
//!
//! ## Example
//!
//! ```
//! use optika_core::{RenderError, RenderTarget, Scene, SceneSensor, SharedScene, SimTime};
//! use optika_sensors::{RenderOutcome, RenderingSensorCore, SkipReason};
//!
//! struct Room;
//!
//! impl Scene for Room {
//!     fn name(&self) -> &str {
//!         "room"
//!     }
//!
//!     fn pre_render(&self) -> Result<(), RenderError> {
//!         Ok(())
//!     }
//! }
//!
//! struct Camera {
//!     frames: u32,
//! }
//!
//! impl RenderTarget for Camera {
//!     fn render(&mut self) -> Result<(), RenderError> {
//!         self.frames += 1;
//!         Ok(())
//!     }
//!
//!     fn post_render(&mut self) -> Result<(), RenderError> {
//!         Ok(())
//!     }
//! }
//!
//! impl SceneSensor for Camera {
//!     fn name(&self) -> &str {
//!         "camera"
//!     }
//!
//!     fn as_render_target(&mut self) -> Option<&mut dyn RenderTarget> {
//!         Some(self)
//!     }
//! }
//!
//! let mut core = RenderingSensorCore::with_name("front");
//! core.set_scene(Some(SharedScene::new(Room)));
//! core.add_sensor(Box::new(Camera { frames: 0 }));
//!
//! let now = SimTime::from_secs_f64(0.1);
//! assert_eq!(core.render(now, false)?, RenderOutcome::Rendered);
//! assert_eq!(
//!     core.render(now, false)?,
//!     RenderOutcome::Skipped(SkipReason::AlreadyRendered)
//! );
//! assert_eq!(core.last_render_time(), Some(now));
//! # Ok::<(), RenderError>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod sensor;
pub mod sensor_core;

pub use config::RenderingSensorConfig;
pub use error::SensorError;
pub use sensor::RenderingSensor;
pub use sensor_core::{RenderOutcome, RenderingSensorCore, SkipReason};
