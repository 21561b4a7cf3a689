use orrery_engine::{
    BodyCatalog, ConfigError, FrameBuffer, InputEvent, InputQueue, MeshBounds, RenderMode,
    Renderer, Scene, ViewerConfig, ViewerEvent,
};

/// Floats in the lighting block: ka, kd, ks, shininess, light xyz, light rgb.
pub const LIGHTING_FLOATS: usize = 10;

/// Drives the scene once per animation frame and keeps flat buffers the
/// browser renderer reads through raw pointers.
///
/// Input is queued as it arrives and drained at the start of `tick`, so
/// event callbacks never touch geometry mid-frame.
pub struct ViewerRunner {
    scene: Scene,
    config: ViewerConfig,
    input: InputQueue,
    frame: FrameBuffer,
    /// Focus changes from the last tick: body index, or -1 for none.
    events: Vec<f32>,
    lighting: [f32; LIGHTING_FLOATS],
}

impl ViewerRunner {
    pub fn new(config: ViewerConfig) -> Result<Self, ConfigError> {
        let scene = Scene::new(config.clone(), BodyCatalog::default())?;
        Ok(Self {
            scene,
            config,
            input: InputQueue::new(),
            frame: FrameBuffer::new(),
            events: Vec::new(),
            lighting: [0.0; LIGHTING_FLOATS],
        })
    }

    /// Build from a JSON config. An empty string means all defaults.
    pub fn from_json(config_json: &str) -> Result<Self, ConfigError> {
        let config = if config_json.trim().is_empty() {
            ViewerConfig::default()
        } else {
            ViewerConfig::from_json(config_json)?
        };
        Self::new(config)
    }

    /// Replace the catalog. Viewport and mesh bounds carry over; focus,
    /// camera pose and elapsed time start fresh.
    pub fn load_catalog(&mut self, json: &str) -> Result<(), ConfigError> {
        let catalog = BodyCatalog::from_json(json)?;
        let viewport = self.scene.viewport();
        let bounds = self.scene.mesh_bounds();

        let mut scene = Scene::new(self.config.clone(), catalog)?;
        scene.set_viewport(viewport.x, viewport.y);
        scene.set_mesh_bounds(bounds);
        self.scene = scene;
        self.input.discard();
        log::info!("Catalog loaded: {} bodies", self.scene.bodies().len());
        Ok(())
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: apply queued input, update the scene, rebuild buffers.
    pub fn tick(&mut self, dt: f32) {
        for event in self.input.drain() {
            self.scene.handle_input(&event);
        }

        self.scene.update(dt);
        self.scene.build_frame(&mut self.frame);

        self.events.clear();
        for event in self.scene.drain_events() {
            match event {
                ViewerEvent::FocusChanged(focus) => {
                    self.events.push(focus.map_or(-1.0, |i| i as f32));
                }
            }
        }

        self.lighting = [0.0; LIGHTING_FLOATS];
        if let Some(uniforms) = self.frame.lighting() {
            let m = uniforms.material;
            let l = uniforms.light;
            self.lighting = [
                m.ka, m.kd, m.ks, m.shininess,
                l.position.x, l.position.y, l.position.z,
                l.color.x, l.color.y, l.color.z,
            ];
        }
    }

    /// Hand the current frame to a native renderer.
    pub fn present<R: Renderer>(&self, renderer: &mut R) {
        renderer.draw(&self.frame.data());
    }

    pub fn set_mesh_bounds(&mut self, bounds: MeshBounds) {
        self.scene.set_mesh_bounds(bounds);
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.frame.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.frame.instance_count()
    }

    pub fn sprites_ptr(&self) -> *const f32 {
        self.frame.sprites_ptr()
    }

    pub fn sprite_count(&self) -> u32 {
        self.frame.sprite_count()
    }

    /// View (16), projection (16) and eye (4), column-major.
    pub fn camera_ptr(&self) -> *const f32 {
        self.frame.camera_ptr()
    }

    pub fn lighting_ptr(&self) -> *const f32 {
        self.lighting.as_ptr()
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.events.as_ptr()
    }

    pub fn events_len(&self) -> u32 {
        self.events.len() as u32
    }

    // ---- Mode accessors ----

    /// 0 for the full scene, 1 for a focused body.
    pub fn render_mode(&self) -> u32 {
        match self.frame.mode {
            RenderMode::FullScene => 0,
            RenderMode::Focused(_) => 1,
        }
    }

    /// Focused body index, or -1.
    pub fn focused_body(&self) -> i32 {
        self.scene.focused().map_or(-1, |i| i as i32)
    }

    pub fn texture_count(&self) -> u32 {
        self.scene.textures().len() as u32
    }

    pub fn texture_name(&self, slot: u32) -> Option<String> {
        self.scene.textures().name(slot as usize).map(str::to_string)
    }
}
