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

//! # Optika Core
//!
//! Contracts shared by rendering sensors and the simulator that embeds them:
//! the simulation clock value, the scene a render pass runs against, and the
//! scene-sensor objects a rendering sensor owns.
//!
//! Concrete scenes and scene sensors live outside this crate. The rendering
//! sensor core in `optika-sensors` only talks to them through these traits.

#![warn(missing_docs)]

pub mod error;
pub mod scene;
pub mod time;

pub use error::RenderError;
pub use scene::{RenderTarget, Scene, SceneSensor, SharedScene};
pub use time::SimTime;
