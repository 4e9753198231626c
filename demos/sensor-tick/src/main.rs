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

//! Steps a tiny simulated world and renders two cameras that share a scene.
//!
//! Run with `RUST_LOG=trace` to see the render gate skipping duplicate work.

use anyhow::Result;
use optika_core::{RenderError, RenderTarget, Scene, SceneSensor, SharedScene, SimTime};
use optika_sensors::{RenderingSensor, RenderingSensorConfig, RenderingSensorCore};

struct WarehouseScene;

impl Scene for WarehouseScene {
    fn name(&self) -> &str {
        "warehouse"
    }

    fn pre_render(&self) -> Result<(), RenderError> {
        log::info!("warehouse: scene graph updated");
        Ok(())
    }
}

struct PinholeView {
    name: String,
    frames: u64,
}

impl PinholeView {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            frames: 0,
        }
    }
}

impl RenderTarget for PinholeView {
    fn render(&mut self) -> Result<(), RenderError> {
        self.frames += 1;
        Ok(())
    }

    fn post_render(&mut self) -> Result<(), RenderError> {
        log::info!("{}: frame {} ready", self.name, self.frames);
        Ok(())
    }
}

impl SceneSensor for PinholeView {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_render_target(&mut self) -> Option<&mut dyn RenderTarget> {
        Some(self)
    }
}

/// A camera sensor composed over the rendering core.
struct CameraSensor {
    core: RenderingSensorCore,
}

impl CameraSensor {
    fn new(config: RenderingSensorConfig) -> Self {
        let mut core = RenderingSensorCore::new(config);
        let view_name = format!("{}_view", core.name());
        core.add_sensor(Box::new(PinholeView::new(&view_name)));
        Self { core }
    }
}

impl RenderingSensor for CameraSensor {
    fn rendering_core(&self) -> &RenderingSensorCore {
        &self.core
    }

    fn rendering_core_mut(&mut self) -> &mut RenderingSensorCore {
        &mut self.core
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let front_config = RenderingSensorConfig::from_ron_str(r#"(name: "front_camera")"#)?;
    let mut front = CameraSensor::new(front_config);
    let mut rear = CameraSensor::new(RenderingSensorConfig::named("rear_camera"));

    // Rendering before a scene exists is a silent no-op.
    front.render(SimTime::ZERO, true)?;

    let scene = SharedScene::new(WarehouseScene);
    front.set_scene(Some(scene.clone()));
    rear.set_scene(Some(scene));

    let step = SimTime::from_secs_f64(0.1).as_nanos();
    for tick in 0..3u64 {
        let now = SimTime::from_nanos(tick * step);
        for sensor in [&mut front as &mut dyn RenderingSensor, &mut rear] {
            // A second request in the same step is absorbed by the gate.
            sensor.render(now, false)?;
            sensor.render(now, false)?;
        }
    }

    log::info!(
        "done: front last rendered at {:?}, rear at {:?}",
        front.rendering_core().last_render_time(),
        rear.rendering_core().last_render_time()
    );

    front.set_scene(None);
    rear.set_scene(None);
    Ok(())
}
