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

//! Integration tests for the render gate and scene-sensor ownership.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use optika_core::{RenderError, RenderTarget, Scene, SceneSensor, SharedScene, SimTime};
use optika_sensors::{
    RenderOutcome, RenderingSensor, RenderingSensorConfig, RenderingSensorCore, SensorError,
    SkipReason,
};

/// Counters shared between a test and the fakes it hands to the core.
#[derive(Default)]
struct Counters {
    pre_renders: AtomicUsize,
    renders: AtomicUsize,
    post_renders: AtomicUsize,
    dropped: AtomicUsize,
}

impl Counters {
    fn renders(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }

    fn pre_renders(&self) -> usize {
        self.pre_renders.load(Ordering::SeqCst)
    }
}

struct FakeScene {
    counters: Arc<Counters>,
    fail_with: Option<RenderError>,
}

impl Scene for FakeScene {
    fn name(&self) -> &str {
        "fake_scene"
    }

    fn pre_render(&self) -> Result<(), RenderError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        self.counters.pre_renders.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct FakeCamera {
    name: String,
    counters: Arc<Counters>,
    fail_with: Option<RenderError>,
}

impl FakeCamera {
    fn boxed(name: &str, counters: &Arc<Counters>) -> Box<dyn SceneSensor> {
        Box::new(FakeCamera {
            name: name.to_string(),
            counters: Arc::clone(counters),
            fail_with: None,
        })
    }
}

impl RenderTarget for FakeCamera {
    fn render(&mut self) -> Result<(), RenderError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        self.counters.renders.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn post_render(&mut self) -> Result<(), RenderError> {
        self.counters.post_renders.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl SceneSensor for FakeCamera {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_render_target(&mut self) -> Option<&mut dyn RenderTarget> {
        Some(self)
    }
}

impl Drop for FakeCamera {
    fn drop(&mut self) {
        self.counters.dropped.fetch_add(1, Ordering::SeqCst);
    }
}

/// A scene sensor that draws nothing (e.g. a bounding-box query object).
struct FakeProbe;

impl SceneSensor for FakeProbe {
    fn name(&self) -> &str {
        "probe"
    }
}

fn scene_with_counters() -> (SharedScene, Arc<Counters>) {
    let counters = Arc::new(Counters::default());
    let scene = SharedScene::new(FakeScene {
        counters: Arc::clone(&counters),
        fail_with: None,
    });
    (scene, counters)
}

fn failing_camera(name: &str, counters: &Arc<Counters>, err: RenderError) -> Box<dyn SceneSensor> {
    Box::new(FakeCamera {
        name: name.to_string(),
        counters: Arc::clone(counters),
        fail_with: Some(err),
    })
}

fn t(secs: u64) -> SimTime {
    SimTime::from_secs_nanos(secs, 0)
}

#[test]
fn test_same_timestamp_renders_once() {
    let (scene, counters) = scene_with_counters();
    let mut core = RenderingSensorCore::with_name("camera");
    core.set_scene(Some(scene));
    core.add_sensor(FakeCamera::boxed("view", &counters));

    for _ in 0..5 {
        core.render(t(4), false).unwrap();
    }

    assert_eq!(counters.renders(), 1);
    assert_eq!(counters.post_renders.load(Ordering::SeqCst), 1);
    assert_eq!(core.last_render_time(), Some(t(4)));
}

#[test]
fn test_force_always_renders() {
    let (scene, counters) = scene_with_counters();
    let mut core = RenderingSensorCore::with_name("camera");
    core.set_scene(Some(scene));
    core.add_sensor(FakeCamera::boxed("view", &counters));

    assert_eq!(core.render(t(1), true), Ok(RenderOutcome::Rendered));
    assert_eq!(core.render(t(1), true), Ok(RenderOutcome::Rendered));
    assert_eq!(core.render(t(1), true), Ok(RenderOutcome::Rendered));
    assert_eq!(counters.renders(), 3);
}

#[test]
fn test_time_moving_backward_renders() {
    let (scene, counters) = scene_with_counters();
    let mut core = RenderingSensorCore::with_name("camera");
    core.set_scene(Some(scene));
    core.add_sensor(FakeCamera::boxed("view", &counters));

    core.render(t(10), false).unwrap();
    assert_eq!(core.last_render_time(), Some(t(10)));

    let outcome = core.render(t(3), false).unwrap();
    assert!(outcome.is_rendered());
    assert_eq!(core.last_render_time(), Some(t(3)));
    assert_eq!(counters.renders(), 2);
}

#[test]
fn test_dedup_then_advance_then_force_scenario() {
    let (scene, counters) = scene_with_counters();
    let mut core = RenderingSensorCore::with_name("stereo");
    core.set_scene(Some(scene));
    core.add_sensor(FakeCamera::boxed("left", &counters));
    core.add_sensor(FakeCamera::boxed("right", &counters));

    let outcomes = [
        core.render(t(10), false).unwrap(),
        core.render(t(10), false).unwrap(),
        core.render(t(11), false).unwrap(),
        core.render(t(10), true).unwrap(),
    ];

    assert_eq!(
        outcomes,
        [
            RenderOutcome::Rendered,
            RenderOutcome::Skipped(SkipReason::AlreadyRendered),
            RenderOutcome::Rendered,
            RenderOutcome::Rendered,
        ]
    );
    // Three executed passes over two views each.
    assert_eq!(counters.renders(), 6);
    assert_eq!(core.last_render_time(), Some(t(10)));
}

#[test]
fn test_sensor_indexing_is_stable() {
    let counters = Arc::new(Counters::default());
    let mut core = RenderingSensorCore::with_name("multi");
    core.add_sensor(FakeCamera::boxed("first", &counters));
    core.add_sensor(Box::new(FakeProbe));
    core.add_sensor(FakeCamera::boxed("third", &counters));

    assert_eq!(core.sensor_count(), 3);
    for _ in 0..2 {
        assert_eq!(core.sensor(0).unwrap().name(), "first");
        assert_eq!(core.sensor(1).unwrap().name(), "probe");
        assert_eq!(core.sensor(2).unwrap().name(), "third");
    }
    assert_eq!(core.primary_sensor().unwrap().name(), "first");
    assert_eq!(core.sensor_count(), 3);
}

#[test]
fn test_sensor_out_of_range() {
    let counters = Arc::new(Counters::default());
    let mut core = RenderingSensorCore::with_name("camera");
    core.add_sensor(FakeCamera::boxed("only", &counters));

    match core.sensor(1) {
        Err(err) => assert_eq!(err, SensorError::OutOfRange { index: 1, count: 1 }),
        Ok(_) => panic!("index 1 should be out of range"),
    }
    assert!(core.sensor(usize::MAX).is_err());
}

#[test]
fn test_detached_scene_force_render_is_noop() {
    let (scene, counters) = scene_with_counters();
    let mut core = RenderingSensorCore::with_name("camera");
    core.set_scene(Some(scene));
    core.add_sensor(FakeCamera::boxed("view", &counters));
    core.render(t(1), false).unwrap();

    core.set_scene(None);
    assert!(core.scene().is_none());
    assert_eq!(
        core.render(t(2), true),
        Ok(RenderOutcome::Skipped(SkipReason::SceneUnavailable))
    );
    assert_eq!(counters.renders(), 1);
    assert_eq!(core.last_render_time(), Some(t(1)));
}

#[test]
fn test_replacing_scene_renders_against_new_scene() {
    let (first, first_counters) = scene_with_counters();
    let (second, second_counters) = scene_with_counters();
    let mut core = RenderingSensorCore::with_name("camera");

    core.set_scene(Some(first));
    core.render(t(1), false).unwrap();
    core.set_scene(Some(second.clone()));
    core.render(t(2), false).unwrap();

    assert_eq!(first_counters.pre_renders(), 1);
    assert_eq!(second_counters.pre_renders(), 1);
    assert!(SharedScene::ptr_eq(core.scene().unwrap(), &second));
}

#[test]
fn test_sensors_sharing_scene_update_graph_once() {
    let (scene, counters) = scene_with_counters();
    let mut front = RenderingSensorCore::with_name("front");
    let mut rear = RenderingSensorCore::with_name("rear");
    front.set_scene(Some(scene.clone()));
    rear.set_scene(Some(scene.clone()));
    front.add_sensor(FakeCamera::boxed("front_view", &counters));
    rear.add_sensor(FakeCamera::boxed("rear_view", &counters));

    front.render(t(5), false).unwrap();
    rear.render(t(5), false).unwrap();

    assert_eq!(counters.pre_renders(), 1);
    assert_eq!(counters.renders(), 2);
    assert_eq!(scene.last_graph_update(), Some(t(5)));

    front.render(t(6), false).unwrap();
    assert_eq!(counters.pre_renders(), 2);
}

#[test]
fn test_scene_graph_update_can_be_disabled() {
    let (scene, counters) = scene_with_counters();
    let config = RenderingSensorConfig {
        name: "overlay".to_string(),
        update_scene_graph: false,
    };
    let mut core = RenderingSensorCore::new(config);
    core.set_scene(Some(scene));
    core.add_sensor(FakeCamera::boxed("view", &counters));

    core.render(t(1), false).unwrap();
    assert_eq!(counters.pre_renders(), 0);
    assert_eq!(counters.renders(), 1);
}

#[test]
fn test_render_error_propagates_unchanged() {
    let (scene, counters) = scene_with_counters();
    let mut core = RenderingSensorCore::with_name("camera");
    core.set_scene(Some(scene));
    core.add_sensor(failing_camera(
        "broken",
        &counters,
        RenderError::SceneDestroyed {
            scene: "fake_scene".to_string(),
        },
    ));

    let err = core.render(t(1), false).unwrap_err();
    assert_eq!(
        err,
        RenderError::SceneDestroyed {
            scene: "fake_scene".to_string()
        }
    );
    assert_eq!(core.last_render_time(), None);
    assert_eq!(counters.post_renders.load(Ordering::SeqCst), 0);
}

#[test]
fn test_scene_error_propagates_unchanged() {
    let counters = Arc::new(Counters::default());
    let scene = SharedScene::new(FakeScene {
        counters: Arc::clone(&counters),
        fail_with: Some(RenderError::DeviceLost),
    });
    let mut core = RenderingSensorCore::with_name("camera");
    core.set_scene(Some(scene.clone()));
    core.add_sensor(FakeCamera::boxed("view", &counters));

    assert_eq!(core.render(t(1), false), Err(RenderError::DeviceLost));
    assert_eq!(core.render(t(1), true), Err(RenderError::DeviceLost));
    assert_eq!(core.last_render_time(), None);
    assert_eq!(scene.last_graph_update(), None);
    assert_eq!(counters.renders(), 0);
    assert_eq!(counters.post_renders.load(Ordering::SeqCst), 0);
}

#[test]
fn test_partial_failure_renders_again_at_same_time() {
    let (scene, counters) = scene_with_counters();
    let mut core = RenderingSensorCore::with_name("stereo");
    core.set_scene(Some(scene));
    core.add_sensor(FakeCamera::boxed("left", &counters));
    core.add_sensor(failing_camera(
        "right",
        &counters,
        RenderError::RenderingFailed("out of memory".to_string()),
    ));

    let err = core.render(t(3), false).unwrap_err();
    assert_eq!(err, RenderError::RenderingFailed("out of memory".to_string()));
    assert_eq!(counters.renders(), 1);
    assert_eq!(core.last_render_time(), None);

    // The gate did not close, so the left view renders a second time.
    assert!(core.render(t(3), false).is_err());
    assert_eq!(counters.renders(), 2);
    assert_eq!(counters.post_renders.load(Ordering::SeqCst), 2);
    // The scene graph was already brought up to date for t(3).
    assert_eq!(counters.pre_renders(), 1);
}

#[test]
fn test_sensors_without_render_target_are_not_rendered() {
    let (scene, counters) = scene_with_counters();
    let mut core = RenderingSensorCore::with_name("mixed");
    core.set_scene(Some(scene));
    core.add_sensor(Box::new(FakeProbe));
    core.add_sensor(FakeCamera::boxed("view", &counters));

    assert!(core.render(t(1), false).unwrap().is_rendered());
    assert_eq!(counters.renders(), 1);
}

#[test]
fn test_drop_releases_scene_sensors() {
    let (scene, counters) = scene_with_counters();
    let mut core = RenderingSensorCore::with_name("camera");
    core.set_scene(Some(scene.clone()));
    core.add_sensor(FakeCamera::boxed("a", &counters));
    core.add_sensor(FakeCamera::boxed("b", &counters));
    assert_eq!(scene.handle_count(), 2);

    drop(core);

    assert_eq!(counters.dropped.load(Ordering::SeqCst), 2);
    assert_eq!(scene.handle_count(), 1);
}

#[test]
fn test_composed_sensor_uses_trait() {
    struct Lidar {
        core: RenderingSensorCore,
    }

    impl RenderingSensor for Lidar {
        fn rendering_core(&self) -> &RenderingSensorCore {
            &self.core
        }

        fn rendering_core_mut(&mut self) -> &mut RenderingSensorCore {
            &mut self.core
        }
    }

    let (scene, counters) = scene_with_counters();
    let mut lidar = Lidar {
        core: RenderingSensorCore::with_name("gpu_lidar"),
    };
    lidar.rendering_core_mut().add_sensor(FakeCamera::boxed("cube_face", &counters));
    lidar.set_scene(Some(scene));

    assert_eq!(lidar.sensor_count(), 1);
    assert_eq!(lidar.sensor(0).unwrap().name(), "cube_face");
    assert_eq!(lidar.primary_sensor().unwrap().name(), "cube_face");
    assert!(lidar.render(t(2), false).unwrap().is_rendered());
    assert!(!lidar.render(t(2), false).unwrap().is_rendered());
    assert_eq!(counters.renders(), 1);
}
