//! Analytic circular orbits in the y = 0 plane.
//!
//! Positions are a pure function of global elapsed time: no integration, no
//! accumulated state. Recomputing at any time reproduces the same position,
//! which is what makes seeking exact.

use glam::Vec3;

use crate::components::body::Body;

/// Position on a circular orbit of radius `orbit_radius` after `elapsed` time
/// units at `angular_speed` radians per unit.
pub fn position_at(elapsed: f32, orbit_radius: f32, angular_speed: f32) -> Vec3 {
    let angle = angular_speed * elapsed;
    Vec3::new(orbit_radius * angle.cos(), 0.0, orbit_radius * angle.sin())
}

/// Orbit parameters of a single body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub radius: f32,
    pub angular_speed: f32,
}

impl Orbit {
    pub fn new(radius: f32, angular_speed: f32) -> Self {
        Self { radius, angular_speed }
    }

    pub fn position_at(&self, elapsed: f32) -> Vec3 {
        position_at(elapsed, self.radius, self.angular_speed)
    }

    /// Rotation about +Y applied when the body is viewed on its own.
    pub fn spin_at(&self, elapsed: f32) -> f32 {
        self.angular_speed * elapsed
    }
}

/// Move every body to its position at `elapsed`.
pub fn advance_bodies(bodies: &mut [Body], elapsed: f32) {
    for body in bodies.iter_mut() {
        body.position = body.orbit().position_at(elapsed);
    }
}
