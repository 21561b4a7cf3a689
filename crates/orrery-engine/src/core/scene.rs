use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::api::config::ViewerConfig;
use crate::api::error::ConfigError;
use crate::api::types::{BodyId, ViewerEvent};
use crate::assets::catalog::{BodyCatalog, SkyboxDescriptor};
use crate::assets::textures::TextureTable;
use crate::components::body::Body;
use crate::core::time::{Clock, IntervalTimer};
use crate::input::pointer::{decode_key, KeyCommand, PointerState};
use crate::input::queue::InputEvent;
use crate::renderer::camera::{CameraUniform, OrbitCamera, Perspective};
use crate::renderer::frame::{FrameBuffer, Material, MeshBounds, RenderMode};
use crate::systems::motion::advance_bodies;
use crate::systems::picking::{Picker, Ray, Selection};
use crate::systems::render::{build_frame, FrameInputs};
use crate::systems::rng::Rng;

/// The viewer's composition root.
///
/// Owns the bodies in catalog order, the camera, the selection and the
/// timers. Input events mutate camera and selection state; `update` moves
/// the bodies and ages the trails; `build_frame` emits the draw list.
pub struct Scene {
    config: ViewerConfig,
    camera: OrbitCamera,
    perspective: Perspective,
    viewport: Vec2,
    bodies: Vec<Body>,
    star_scale: f32,
    skybox: SkyboxDescriptor,
    textures: TextureTable,
    mesh_bounds: MeshBounds,
    material: Material,
    selection: Selection,
    picker: Picker,
    pointer: PointerState,
    clock: Clock,
    trail_timer: IntervalTimer,
    rng: Rng,
    eye: Vec3,
    events: Vec<ViewerEvent>,
}

impl Scene {
    /// Build a scene from validated configuration and catalog.
    pub fn new(config: ViewerConfig, catalog: BodyCatalog) -> Result<Self, ConfigError> {
        config.validate()?;
        catalog.validate()?;

        let bodies: Vec<Body> = catalog
            .bodies
            .iter()
            .enumerate()
            .map(|(i, desc)| Body::new(BodyId(i as u32), desc, &config.trail))
            .collect();
        let camera = OrbitCamera::with_config(config.camera);
        let eye = camera.eye_position();
        let textures = TextureTable::from_catalog(&catalog);

        log::info!(
            "Scene built: {} bodies, {} textures, pick policy {:?}",
            bodies.len(),
            textures.len(),
            config.pick_policy,
        );

        Ok(Self {
            perspective: Perspective::from_config(&config.projection),
            viewport: Vec2::from_array(config.viewport),
            star_scale: catalog.star.scale,
            skybox: catalog.skybox,
            mesh_bounds: MeshBounds::default(),
            material: Material::default(),
            selection: Selection::new(),
            picker: Picker::new(config.pick_policy),
            pointer: PointerState::new(),
            clock: Clock::new(),
            trail_timer: IntervalTimer::new(config.trail.interval),
            rng: Rng::new(config.seed),
            events: Vec::new(),
            camera,
            bodies,
            textures,
            eye,
            config,
        })
    }

    /// The default six-planet system with default tunables.
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Self::new(ViewerConfig::default(), BodyCatalog::default())
    }

    /// Apply one input event.
    pub fn handle_input(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { x, y } => {
                let pos = Vec2::new(x, y);
                self.pointer.on_down(pos);
                self.pick_at(pos);
            }
            InputEvent::PointerUp { x, y } => self.pointer.on_up(Vec2::new(x, y)),
            InputEvent::PointerMove { x, y } => {
                if let Some(delta) = self.pointer.on_move(Vec2::new(x, y)) {
                    self.camera.on_drag(delta.x, delta.y);
                }
            }
            InputEvent::Scroll { dy, .. } => self.camera.on_scroll(dy),
            InputEvent::KeyUp { key_code } => match decode_key(key_code, self.bodies.len()) {
                Some(KeyCommand::Focus(index)) => {
                    self.focus(index);
                }
                Some(KeyCommand::ClearFocus) => self.clear_focus(),
                None => {}
            },
            InputEvent::KeyDown { .. } => {}
            InputEvent::Resize { width, height } => self.set_viewport(width, height),
        }
    }

    /// Advance one frame by `dt`.
    ///
    /// Bodies move every frame. Trails only age in full-scene mode: the trail
    /// timer accumulates frame time and, when it fires, every pool advances
    /// once by this frame's delta.
    pub fn update(&mut self, dt: f32) {
        self.clock.advance(dt);
        self.eye = self.camera.eye_position();
        advance_bodies(&mut self.bodies, self.clock.elapsed());

        if self.selection.is_active() {
            return;
        }
        if self.trail_timer.tick(dt) {
            let frame_dt = self.clock.frame_dt();
            let spawn_chance = self.config.trail.spawn_chance;
            for body in &mut self.bodies {
                let spawn = self.rng.chance(spawn_chance);
                body.trail.advance(frame_dt, body.position, spawn);
            }
        }
    }

    /// Write this frame's draw list into `frame`.
    pub fn build_frame(&self, frame: &mut FrameBuffer) {
        let inputs = FrameInputs {
            camera: self.camera_uniform(),
            eye: self.eye,
            bodies: &self.bodies,
            textures: &self.textures,
            mesh_bounds: self.mesh_bounds,
            material: self.material,
            star_scale: self.star_scale,
            skybox_size: self.skybox.size,
            cubemap: &self.skybox.cubemap,
            elapsed: self.clock.elapsed(),
            focused: self.selection.focused(),
        };
        build_frame(&inputs, frame);
    }

    /// Focus a body by catalog index. Overrides any current focus.
    /// Returns false if the index is out of range.
    pub fn focus(&mut self, index: usize) -> bool {
        if index >= self.bodies.len() {
            return false;
        }
        if self.selection.focused() != Some(index) {
            self.selection.focus(index);
            log::debug!("Focus -> {} ({})", index, self.bodies[index].name);
            self.events.push(ViewerEvent::FocusChanged(Some(index)));
        }
        true
    }

    /// Return to the full scene.
    pub fn clear_focus(&mut self) {
        if self.selection.is_active() {
            self.selection.clear();
            log::debug!("Focus cleared");
            self.events.push(ViewerEvent::FocusChanged(None));
        }
    }

    /// Cast a ray through a viewport pixel and focus the body it hits.
    /// Ignored while a body is already focused.
    pub fn pick_at(&mut self, screen: Vec2) -> Option<usize> {
        if self.selection.is_active() {
            return None;
        }
        let ray = Ray::through_screen(
            self.camera.eye_position(),
            screen,
            self.viewport,
            &self.projection_matrix(),
            &self.camera.view_matrix(),
        );
        let hit = self.picker.try_pick(&mut self.selection, &ray, &self.bodies)?;
        log::debug!("Picked {} ({}) at {:?}", hit, self.bodies[hit].name, screen);
        self.events.push(ViewerEvent::FocusChanged(Some(hit)));
        Some(hit)
    }

    /// Jump to an absolute time. Positions are recomputed exactly; trails are
    /// left as they are.
    pub fn seek(&mut self, elapsed: f32) {
        self.clock.seek(elapsed);
        advance_bodies(&mut self.bodies, elapsed);
    }

    /// Update the viewport size. Non-positive sizes are ignored.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            log::warn!("Ignoring viewport resize to {}x{}", width, height);
            return;
        }
        self.viewport = Vec2::new(width, height);
    }

    /// Bounds of the shared body mesh, as reported by the mesh loader.
    pub fn set_mesh_bounds(&mut self, bounds: MeshBounds) {
        self.mesh_bounds = bounds;
    }

    /// Take the events produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<ViewerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn camera_uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.camera.view_matrix().to_cols_array_2d(),
            projection: self.projection_matrix().to_cols_array_2d(),
            eye: Vec4::from((self.eye, 1.0)).to_array(),
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.perspective.matrix(self.viewport.x / self.viewport.y)
    }

    // -- Accessors --

    pub fn mode(&self) -> RenderMode {
        match self.selection.focused() {
            Some(index) => RenderMode::Focused(index),
            None => RenderMode::FullScene,
        }
    }

    pub fn focused(&self) -> Option<usize> {
        self.selection.focused()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Eye position as of the last `update`.
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }

    pub fn trail_timer(&self) -> &IntervalTimer {
        &self.trail_timer
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn textures(&self) -> &TextureTable {
        &self.textures
    }

    pub fn mesh_bounds(&self) -> MeshBounds {
        self.mesh_bounds
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::motion::position_at;
    use crate::systems::picking::PickPolicy;
    use std::f32::consts::PI;

    fn scene() -> Scene {
        Scene::with_defaults().expect("defaults are valid")
    }

    fn center_click(scene: &mut Scene) {
        let c = scene.viewport() * 0.5;
        scene.handle_input(&InputEvent::PointerDown { x: c.x, y: c.y });
    }

    #[test]
    fn builds_default_system() {
        let scene = scene();
        assert_eq!(scene.bodies().len(), 6);
        assert_eq!(scene.body(3).map(|b| b.name.as_str()), Some("gas"));
        assert_eq!(scene.mode(), RenderMode::FullScene);
        assert_eq!(scene.eye(), Vec3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn invalid_catalog_is_rejected() {
        let catalog = BodyCatalog { bodies: Vec::new(), ..BodyCatalog::default() };
        assert!(matches!(
            Scene::new(ViewerConfig::default(), catalog),
            Err(ConfigError::EmptyCatalog)
        ));
    }

    #[test]
    fn update_moves_bodies_analytically() {
        let mut scene = scene();
        for _ in 0..4 {
            scene.update(0.5);
        }
        let gas = &scene.bodies()[3];
        let expected = position_at(2.0, 8.0, 0.5);
        assert!((gas.position - expected).length() < 1e-5);
    }

    #[test]
    fn seek_is_exact() {
        let mut scene = scene();
        scene.update(1.0);
        scene.seek(3.0);
        assert_eq!(scene.elapsed(), 3.0);
        for body in scene.bodies() {
            assert_eq!(body.position, body.orbit().position_at(3.0));
        }
    }

    #[test]
    fn trails_advance_when_timer_fires() {
        let mut scene = scene();
        for _ in 0..4 {
            scene.update(1.0);
        }
        assert!(scene.bodies().iter().all(|b| b.trail.active_count() == 0));
        assert_eq!(scene.trail_timer().accumulated(), 4.0);

        scene.update(1.0);
        assert_eq!(scene.trail_timer().accumulated(), 0.0);
        for body in scene.bodies() {
            assert!(body.trail.active_count() <= 1);
            for p in body.trail.particles() {
                assert!(p.alpha() == 1.0 || p.alpha() == -1.0, "alpha was {}", p.alpha());
            }
        }
    }

    #[test]
    fn certain_spawn_still_respawns_one_particle_per_firing() {
        let mut config = ViewerConfig::default();
        config.trail.interval = 1.0;
        config.trail.spawn_chance = 1.0;
        let mut scene = Scene::new(config, BodyCatalog::default()).expect("valid");

        for firing in 0..50 {
            scene.update(1.0);
            assert_eq!(scene.trail_timer().accumulated(), 0.0);
            for body in scene.bodies() {
                let fresh = body.trail.particles().iter().filter(|p| p.alpha() == 1.0).count();
                assert_eq!(fresh, 1, "firing {} body {}", firing, body.name);
                assert_eq!(body.trail.active_count(), 1);
            }
        }
    }

    #[test]
    fn impossible_spawn_only_fades() {
        let mut config = ViewerConfig::default();
        config.trail.interval = 1.0;
        config.trail.spawn_chance = 0.0;
        let mut scene = Scene::new(config, BodyCatalog::default()).expect("valid");
        for _ in 0..10 {
            scene.update(1.0);
        }
        assert!(scene.bodies().iter().all(|b| b.trail.active_count() == 0));
    }

    #[test]
    fn out_of_range_pole_margin_is_an_error_not_a_panic() {
        for margin in [2.0, -0.5] {
            let mut config = ViewerConfig::default();
            config.camera.pole_margin = margin;
            assert!(matches!(
                Scene::new(config, BodyCatalog::default()),
                Err(ConfigError::InvalidPoleMargin(_))
            ));
        }
    }

    #[test]
    fn empty_viewport_is_rejected() {
        let config = ViewerConfig { viewport: [0.0, 0.0], ..ViewerConfig::default() };
        assert!(matches!(
            Scene::new(config, BodyCatalog::default()),
            Err(ConfigError::InvalidViewport { .. })
        ));
    }

    #[test]
    fn trails_freeze_while_focused() {
        let mut scene = scene();
        assert!(scene.focus(2));
        for _ in 0..12 {
            scene.update(1.0);
        }
        assert_eq!(scene.trail_timer().accumulated(), 0.0);
        for body in scene.bodies() {
            assert!(body.trail.particles().iter().all(|p| p.alpha() == 0.0));
        }
        // bodies still move
        let expected = position_at(12.0, 3.0, 0.5);
        assert!((scene.bodies()[0].position - expected).length() < 1e-5);
    }

    #[test]
    fn center_click_picks_nearest_body() {
        // at t = π both crater (r=3) and gas (r=8) sit on +Z, in front of the eye
        let mut scene = scene();
        scene.seek(PI);
        center_click(&mut scene);
        assert_eq!(scene.focused(), Some(3));
        assert_eq!(scene.drain_events(), vec![ViewerEvent::FocusChanged(Some(3))]);
    }

    #[test]
    fn first_hit_policy_follows_catalog_order() {
        let config = ViewerConfig { pick_policy: PickPolicy::FirstHit, ..ViewerConfig::default() };
        let mut scene = Scene::new(config, BodyCatalog::default()).expect("valid");
        scene.seek(PI);
        center_click(&mut scene);
        assert_eq!(scene.focused(), Some(0));
    }

    #[test]
    fn missed_click_keeps_full_scene() {
        let mut scene = scene();
        center_click(&mut scene);
        assert_eq!(scene.focused(), None);
        assert!(scene.drain_events().is_empty());
    }

    #[test]
    fn picking_disabled_while_focused() {
        let mut scene = scene();
        scene.focus(1);
        scene.seek(PI);
        center_click(&mut scene);
        assert_eq!(scene.focused(), Some(1));
    }

    #[test]
    fn hotkeys_focus_and_escape_clears() {
        let mut scene = scene();
        scene.handle_input(&InputEvent::KeyUp { key_code: 51 });
        assert_eq!(scene.mode(), RenderMode::Focused(2));
        scene.handle_input(&InputEvent::KeyUp { key_code: 54 });
        assert_eq!(scene.focused(), Some(5));
        scene.handle_input(&InputEvent::KeyUp { key_code: 55 });
        assert_eq!(scene.focused(), Some(5));
        scene.handle_input(&InputEvent::KeyUp { key_code: 27 });
        assert_eq!(scene.focused(), None);
        assert_eq!(scene.drain_events(), vec![
            ViewerEvent::FocusChanged(Some(2)),
            ViewerEvent::FocusChanged(Some(5)),
            ViewerEvent::FocusChanged(None),
        ]);
        assert!(scene.drain_events().is_empty());
    }

    #[test]
    fn focus_out_of_range_is_refused() {
        let mut scene = scene();
        assert!(!scene.focus(6));
        assert_eq!(scene.focused(), None);
    }

    #[test]
    fn drag_rotates_only_with_button_held() {
        let mut scene = scene();
        scene.handle_input(&InputEvent::PointerMove { x: 10.0, y: 10.0 });
        scene.handle_input(&InputEvent::PointerMove { x: 30.0, y: 10.0 });
        assert_eq!(scene.camera().state().azimuth, 0.0);

        scene.handle_input(&InputEvent::PointerDown { x: 30.0, y: 10.0 });
        scene.handle_input(&InputEvent::PointerMove { x: 40.0, y: 15.0 });
        let state = scene.camera().state();
        assert!((state.azimuth + 0.2).abs() < 1e-6);
        assert!((state.elevation - 0.1).abs() < 1e-6);

        scene.handle_input(&InputEvent::PointerUp { x: 40.0, y: 15.0 });
        scene.handle_input(&InputEvent::PointerMove { x: 90.0, y: 15.0 });
        assert!((scene.camera().state().azimuth + 0.2).abs() < 1e-6);
    }

    #[test]
    fn eye_follows_camera_on_update() {
        let mut scene = scene();
        scene.handle_input(&InputEvent::Scroll { dx: 0.0, dy: 5.0 });
        assert_eq!(scene.eye(), Vec3::new(0.0, 0.0, 10.0));
        scene.update(0.016);
        assert!((scene.eye() - Vec3::new(0.0, 0.0, 15.0)).length() < 1e-5);
    }

    #[test]
    fn scroll_past_zero_resets_radius() {
        let mut scene = scene();
        scene.handle_input(&InputEvent::Scroll { dx: 0.0, dy: -25.0 });
        assert_eq!(scene.camera().state().radius, 1.0);
    }

    #[test]
    fn resize_updates_viewport() {
        let mut scene = scene();
        scene.handle_input(&InputEvent::Resize { width: 1024.0, height: 512.0 });
        assert_eq!(scene.viewport(), Vec2::new(1024.0, 512.0));
        scene.set_viewport(0.0, 100.0);
        assert_eq!(scene.viewport(), Vec2::new(1024.0, 512.0));
    }

    #[test]
    fn build_frame_reflects_mode() {
        let mut scene = scene();
        let mut frame = FrameBuffer::new();
        scene.update(0.016);
        scene.build_frame(&mut frame);
        assert_eq!(frame.mode, RenderMode::FullScene);
        assert_eq!(frame.draws.len(), 8);
        assert_eq!(frame.camera.eye, [0.0, 0.0, 10.0, 1.0]);

        scene.focus(4);
        scene.build_frame(&mut frame);
        assert_eq!(frame.mode, RenderMode::Focused(4));
        assert_eq!(frame.draws.len(), 2);
    }

    #[test]
    fn mesh_bounds_feed_normalization() {
        let mut scene = scene();
        scene.set_mesh_bounds(MeshBounds { min: Vec3::splat(-2.0), max: Vec3::splat(2.0) });
        let mut frame = FrameBuffer::new();
        scene.build_frame(&mut frame);
        // star: scale 1.5 applied to a mesh of half-extent 2
        let edge = frame.draws[1].transform.transform_point3(Vec3::new(2.0, 0.0, 0.0));
        assert!((edge.x - 1.5).abs() < 1e-6);
    }
}
