pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::config::{CameraConfig, ProjectionConfig, TrailConfig, ViewerConfig};
pub use api::error::ConfigError;
pub use api::types::{BodyId, TextureRef, ViewerEvent};
pub use assets::catalog::{BodyCatalog, BodyDescriptor, SkyboxDescriptor, StarDescriptor};
pub use assets::textures::TextureTable;
pub use components::body::Body;
pub use components::trail::{Particle, TrailPool};
pub use core::scene::Scene;
pub use core::time::{Clock, IntervalTimer};
pub use input::pointer::{decode_key, KeyCommand, PointerState};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::camera::{CameraState, CameraUniform, OrbitCamera, Perspective};
pub use renderer::frame::{
    DrawRequest, DrawTarget, FrameBuffer, Light, Material, MeshBounds, RenderMode, Shader,
    UniformSet, PARTICLE_TEXTURE,
};
pub use renderer::instance::{DrawInstance, SpriteInstance};
pub use renderer::traits::{FrameData, Renderer};
pub use systems::motion::{position_at, Orbit};
pub use systems::picking::{intersect_sphere, PickPolicy, Picker, Ray, Selection};
pub use systems::rng::Rng;
