use glam::{Vec3, Vec4};

use crate::api::config::TrailConfig;
use crate::api::types::{BodyId, TextureRef};
use crate::assets::catalog::BodyDescriptor;
use crate::components::trail::TrailPool;
use crate::systems::motion::Orbit;

/// An orbiting body. Created once from the catalog and never destroyed.
/// Orbit and scale are fixed at creation; only `position` and the trail
/// change from frame to frame.
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub name: String,
    orbit: Orbit,
    visual_scale: f32,
    /// Position at the current elapsed time.
    pub position: Vec3,
    pub texture: TextureRef,
    pub trail: TrailPool,
}

impl Body {
    pub fn new(id: BodyId, desc: &BodyDescriptor, trail: &TrailConfig) -> Self {
        let orbit = Orbit::new(desc.orbit_radius, desc.angular_speed);
        Self {
            id,
            name: desc.name.clone(),
            orbit,
            visual_scale: desc.visual_scale,
            position: orbit.position_at(0.0),
            texture: TextureRef::new(desc.texture.clone()),
            trail: TrailPool::new(
                trail.particle_count,
                trail.particle_size,
                Vec4::from_array(trail.spawn_color),
            ),
        }
    }

    pub fn orbit(&self) -> Orbit {
        self.orbit
    }

    pub fn orbit_radius(&self) -> f32 {
        self.orbit.radius
    }

    pub fn angular_speed(&self) -> f32 {
        self.orbit.angular_speed
    }

    /// Rendered radius, also used as the picking sphere radius.
    pub fn visual_scale(&self) -> f32 {
        self.visual_scale
    }
}
