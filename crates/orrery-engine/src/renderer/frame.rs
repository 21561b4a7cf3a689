//! Declarative per-frame output handed to the external renderer.
//!
//! The core never touches a transform stack: every draw carries its final
//! model matrix.

use glam::{Mat4, Vec3};

use super::camera::CameraUniform;
use super::instance::{DrawInstance, SpriteInstance};
use super::traits::FrameData;

/// Texture name the renderer binds for trail sprites.
pub const PARTICLE_TEXTURE: &str = "particle";

/// Named shader programs the renderer is expected to provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shader {
    Unlit,
    PhongTexture,
    Cubemap,
}

impl Shader {
    pub fn name(self) -> &'static str {
        match self {
            Shader::Unlit => "unlit",
            Shader::PhongTexture => "phong-texture",
            Shader::Cubemap => "cubemap",
        }
    }

    pub fn wire_id(self) -> u32 {
        self as u32
    }
}

/// What a draw request renders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawTarget {
    /// The shared body mesh.
    Mesh,
    /// Cube-mapped skybox with the given half-extent.
    Skybox { size: f32 },
}

impl DrawTarget {
    pub fn wire_id(self) -> u32 {
        match self {
            DrawTarget::Mesh => 0,
            DrawTarget::Skybox { .. } => 1,
        }
    }
}

/// Phong material coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ka: f32,
    pub kd: f32,
    pub ks: f32,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ka: 0.1,
            kd: 0.6,
            ks: 0.8,
            shininess: 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Vec3,
}

/// Uniform values for lit draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformSet {
    pub material: Material,
    pub light: Light,
}

/// One draw: transform, target, shader, texture slot and uniforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRequest {
    pub transform: Mat4,
    pub target: DrawTarget,
    pub shader: Shader,
    /// Slot in the scene's texture table.
    pub texture: Option<usize>,
    /// `None` for unlit and skybox draws.
    pub uniforms: Option<UniformSet>,
}

impl DrawRequest {
    pub fn to_instance(&self) -> DrawInstance {
        let size = match self.target {
            DrawTarget::Skybox { size } => size,
            DrawTarget::Mesh => 0.0,
        };
        DrawInstance::new(
            self.transform,
            self.shader.wire_id(),
            self.texture,
            self.target.wire_id(),
            size,
        )
    }
}

/// The two mutually exclusive render modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Star, every body, every trail and the skybox.
    #[default]
    FullScene,
    /// A single body up close, no trails.
    Focused(usize),
}

/// Axis-aligned bounds of the shared body mesh, reported by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for MeshBounds {
    /// A unit-radius sphere.
    fn default() -> Self {
        Self {
            min: Vec3::splat(-1.0),
            max: Vec3::splat(1.0),
        }
    }
}

impl MeshBounds {
    pub fn from_arrays(min: [f32; 3], max: [f32; 3]) -> Self {
        Self {
            min: Vec3::from_array(min),
            max: Vec3::from_array(max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Longest edge of the box.
    pub fn extent(&self) -> f32 {
        (self.max - self.min).abs().max_element()
    }

    /// Recenter the mesh on the origin and scale it to unit radius, so a
    /// further scale of `s` yields a sphere of radius `s`.
    pub fn normalization(&self) -> Mat4 {
        let extent = self.extent();
        let scale = if extent > 0.0 { 2.0 / extent } else { 1.0 };
        Mat4::from_scale(Vec3::splat(scale)) * Mat4::from_translation(-self.center())
    }
}

/// Everything the renderer needs for one frame.
pub struct FrameBuffer {
    pub mode: RenderMode,
    pub camera: CameraUniform,
    pub draws: Vec<DrawRequest>,
    pub sprites: Vec<SpriteInstance>,
    /// Flattened `draws`, refreshed by `pack`.
    instances: Vec<DrawInstance>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            mode: RenderMode::FullScene,
            camera: CameraUniform {
                view: Mat4::IDENTITY.to_cols_array_2d(),
                projection: Mat4::IDENTITY.to_cols_array_2d(),
                eye: [0.0, 0.0, 0.0, 1.0],
            },
            draws: Vec::with_capacity(16),
            sprites: Vec::with_capacity(64),
            instances: Vec::with_capacity(16),
        }
    }

    pub fn clear(&mut self) {
        self.mode = RenderMode::FullScene;
        self.draws.clear();
        self.sprites.clear();
        self.instances.clear();
    }

    pub fn push(&mut self, draw: DrawRequest) {
        self.draws.push(draw);
    }

    /// Rebuild the flat instance array from `draws`.
    pub fn pack(&mut self) {
        self.instances.clear();
        self.instances.extend(self.draws.iter().map(DrawRequest::to_instance));
    }

    pub fn instances(&self) -> &[DrawInstance] {
        &self.instances
    }

    /// Uniforms shared by the lit draws of this frame.
    pub fn lighting(&self) -> Option<UniformSet> {
        self.draws.iter().find_map(|d| d.uniforms)
    }

    pub fn data(&self) -> FrameData<'_> {
        FrameData {
            mode: self.mode,
            camera: &self.camera,
            draws: &self.draws,
            sprites: &self.sprites,
        }
    }

    // ---- Raw pointers for SharedArrayBuffer reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn sprites_ptr(&self) -> *const f32 {
        self.sprites.as_ptr() as *const f32
    }

    pub fn sprite_count(&self) -> u32 {
        self.sprites.len() as u32
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera as *const CameraUniform as *const f32
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
