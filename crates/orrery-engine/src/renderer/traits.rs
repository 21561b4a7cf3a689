//! Renderer trait for native backends.
//!
//! In the browser all drawing happens in JavaScript, which reads the flat
//! buffers exposed by the web bridge. Native backends implement this trait
//! and consume the same frame data directly.

use super::camera::CameraUniform;
use super::frame::{DrawRequest, RenderMode};
use super::instance::SpriteInstance;

/// Complete frame data for rendering.
pub struct FrameData<'a> {
    pub mode: RenderMode,
    pub camera: &'a CameraUniform,
    /// Draws in submission order (skybox first).
    pub draws: &'a [DrawRequest],
    /// Trail sprites; empty in focused mode.
    pub sprites: &'a [SpriteInstance],
}

/// Renderer contract for GPU backends.
///
/// ```ignore
/// struct GlRenderer { /* ... */ }
///
/// impl Renderer for GlRenderer {
///     fn backend(&self) -> &'static str { "opengl" }
///     fn draw(&mut self, frame: &FrameData) { /* bind, set uniforms, draw */ }
///     fn resize(&mut self, width: u32, height: u32) { /* viewport */ }
/// }
/// ```
pub trait Renderer {
    /// Backend identifier (e.g. "webgl2", "opengl", "wgpu").
    fn backend(&self) -> &'static str;

    /// Draw a complete frame.
    fn draw(&mut self, frame: &FrameData);

    /// Handle window resize.
    fn resize(&mut self, width: u32, height: u32);
}
