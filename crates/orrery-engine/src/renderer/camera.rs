use std::f32::consts::{FRAC_PI_2, TAU};

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::api::config::{CameraConfig, ProjectionConfig};

/// Spherical camera coordinates around the look target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Distance from the target. Always > 0.
    pub radius: f32,
    /// Angle around +Y, kept inside (-2π, 2π).
    pub azimuth: f32,
    /// Angle above the XZ plane, kept away from the poles.
    pub elevation: f32,
}

/// Orbit camera driven by pointer drag and scroll.
/// Looks at the world origin with +Y up.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    state: CameraState,
    config: CameraConfig,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// Eye position; w is always 1.
    pub eye: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 36;
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::with_config(CameraConfig::default())
    }
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CameraConfig) -> Self {
        let mut camera = Self {
            state: CameraState {
                radius: config.radius,
                azimuth: config.azimuth,
                elevation: config.elevation,
            },
            config,
        };
        camera.normalize();
        camera
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    /// Highest elevation magnitude the camera may reach.
    pub fn max_elevation(&self) -> f32 {
        FRAC_PI_2 - self.config.pole_margin
    }

    /// Apply a pointer drag (pixels). Callers only forward drags made with
    /// the primary button held.
    pub fn on_drag(&mut self, dx: f32, dy: f32) {
        self.state.azimuth -= dx * self.config.azimuth_sensitivity;
        self.state.elevation += dy * self.config.elevation_sensitivity;
        self.normalize();
    }

    /// Apply a scroll delta to the radius.
    pub fn on_scroll(&mut self, dy: f32) {
        self.state.radius += dy;
        if self.state.radius <= 0.0 {
            self.state.radius = self.config.min_radius;
        }
    }

    /// Cartesian eye position derived from the spherical state.
    pub fn eye_position(&self) -> Vec3 {
        let CameraState { radius, azimuth, elevation } = self.state;
        radius
            * Vec3::new(
                azimuth.sin() * elevation.cos(),
                elevation.sin(),
                azimuth.cos() * elevation.cos(),
            )
    }

    /// Right-handed look-at matrix toward the origin.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), Vec3::ZERO, Vec3::Y)
    }

    fn normalize(&mut self) {
        // `%` keeps the sign of the dividend, so the result stays in (-2π, 2π)
        // and sin/cos are unchanged.
        self.state.azimuth %= TAU;
        let max = self.max_elevation();
        self.state.elevation = self.state.elevation.clamp(-max, max);
        if self.state.radius <= 0.0 {
            self.state.radius = self.config.min_radius;
        }
    }
}

/// Symmetric perspective projection, OpenGL clip conventions (z in [-1, 1]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perspective {
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Perspective {
    pub fn from_config(config: &ProjectionConfig) -> Self {
        Self {
            fov_y: config.fov_y_degrees.to_radians(),
            near: config.near,
            far: config.far,
        }
    }

    pub fn matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, aspect, self.near, self.far)
    }
}

impl Default for Perspective {
    fn default() -> Self {
        Self::from_config(&ProjectionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_eye_on_positive_z() {
        let cam = OrbitCamera::new();
        let eye = cam.eye_position();
        assert!((eye - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-5);
    }

    #[test]
    fn elevation_stays_inside_poles() {
        let mut cam = OrbitCamera::new();
        for _ in 0..200 {
            cam.on_drag(3.0, 50.0);
            let el = cam.state().elevation;
            assert!(el < FRAC_PI_2 && el > -FRAC_PI_2, "elevation was {}", el);
        }
        assert!((cam.state().elevation - cam.max_elevation()).abs() < 1e-6);
        for _ in 0..200 {
            cam.on_drag(-7.0, -80.0);
            let el = cam.state().elevation;
            assert!(el < FRAC_PI_2 && el > -FRAC_PI_2, "elevation was {}", el);
        }
    }

    #[test]
    fn azimuth_wraps_both_directions() {
        let mut cam = OrbitCamera::new();
        for _ in 0..10_000 {
            cam.on_drag(37.0, 0.0);
            let az = cam.state().azimuth;
            assert!(az > -TAU && az < TAU, "azimuth was {}", az);
        }
        for _ in 0..20_000 {
            cam.on_drag(-41.0, 0.0);
            let az = cam.state().azimuth;
            assert!(az > -TAU && az < TAU, "azimuth was {}", az);
        }
    }

    #[test]
    fn eye_is_continuous_across_wrap() {
        let mut cam = OrbitCamera::with_config(CameraConfig {
            azimuth: -TAU + 0.01,
            ..CameraConfig::default()
        });
        let before = cam.eye_position();
        // one pixel = 0.02 rad, pushes azimuth past -2π
        cam.on_drag(1.0, 0.0);
        let after = cam.eye_position();
        assert!(cam.state().azimuth > -TAU);
        // chord of a 0.02 rad step on a radius-10 circle is ~0.2
        assert!((after - before).length() < 0.25, "jump of {}", (after - before).length());
    }

    #[test]
    fn scroll_never_leaves_non_positive_radius() {
        let mut cam = OrbitCamera::new();
        for dy in [-3.0, -4.0, -100.0, 0.5, -0.5, -10.0] {
            cam.on_scroll(dy);
            assert!(cam.state().radius > 0.0);
        }
        cam.on_scroll(-10.0);
        assert_eq!(cam.state().radius, 1.0);
    }

    #[test]
    fn zero_drag_is_noop() {
        let mut cam = OrbitCamera::new();
        cam.on_drag(5.0, 5.0);
        let before = cam.state();
        cam.on_drag(0.0, 0.0);
        assert_eq!(cam.state(), before);
    }

    #[test]
    fn eye_position_is_pure() {
        let mut cam = OrbitCamera::new();
        cam.on_drag(13.0, -9.0);
        let a = cam.eye_position();
        let b = cam.eye_position();
        assert_eq!(a.to_array().map(f32::to_bits), b.to_array().map(f32::to_bits));
    }

    #[test]
    fn perspective_uses_gl_depth_range() {
        let proj = Perspective::default().matrix(4.0 / 3.0);
        let near = proj.project_point3(Vec3::new(0.0, 0.0, -0.1));
        let far = proj.project_point3(Vec3::new(0.0, 0.0, -50.0));
        assert!((near.z + 1.0).abs() < 1e-4);
        assert!((far.z - 1.0).abs() < 1e-4);
    }
}
