use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};

/// Point-sprite instance for trail particles.
/// Wire format: 8 floats = 32 bytes stride (x, y, z, size, r, g, b, a).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 3],
    pub size: f32,
    /// RGBA; alpha already clamped to [0, 1].
    pub color: [f32; 4],
}

impl SpriteInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(position: Vec3, size: f32, color: Vec4) -> Self {
        Self {
            position: position.to_array(),
            size,
            color: color.to_array(),
        }
    }
}

/// Flattened draw request for the browser renderer.
/// Wire format: 20 floats = 80 bytes stride.
///
/// `model` is column-major. `shader` and `target` hold enum discriminants,
/// `texture` is a slot in the scene texture table or -1 for none.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DrawInstance {
    pub model: [[f32; 4]; 4],
    pub shader: f32,
    pub texture: f32,
    pub target: f32,
    /// Skybox half-extent; 0 for meshes.
    pub size: f32,
}

impl DrawInstance {
    pub const FLOATS: usize = 20;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(model: Mat4, shader: u32, texture: Option<usize>, target: u32, size: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            shader: shader as f32,
            texture: texture.map_or(-1.0, |slot| slot as f32),
            target: target as f32,
            size,
        }
    }
}
