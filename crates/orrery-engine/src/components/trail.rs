use glam::{Vec3, Vec4};

use crate::renderer::instance::SpriteInstance;

/// One trail particle. Alpha drives visibility: at or below zero the
/// particle is dormant and free to be respawned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub color: Vec4,
    pub size: f32,
}

impl Particle {
    pub fn dormant(size: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            color: Vec4::ZERO,
            size,
        }
    }

    pub fn alpha(&self) -> f32 {
        self.color.w
    }

    /// Negative alpha counts as dormant too.
    pub fn is_dormant(&self) -> bool {
        self.color.w <= 0.0
    }
}

/// Fixed-size pool of fading particles behind one body.
///
/// Slots are recycled in place; the pool never grows or shrinks after
/// construction.
#[derive(Debug, Clone)]
pub struct TrailPool {
    particles: Vec<Particle>,
    spawn_color: Vec4,
}

impl TrailPool {
    /// Create a pool with every particle dormant.
    pub fn new(count: usize, size: f32, spawn_color: Vec4) -> Self {
        Self {
            particles: vec![Particle::dormant(size); count],
            spawn_color,
        }
    }

    /// Advance the pool by one trail tick.
    ///
    /// `spawn` is the single coin flip for this tick. If set, the first
    /// dormant particle (in index order) is reactivated at `position` with
    /// the spawn color. Every other particle fades by `dt`, without clamping.
    /// Returns the index of the respawned slot, if any.
    pub fn advance(&mut self, dt: f32, position: Vec3, spawn: bool) -> Option<usize> {
        let mut spawn = spawn;
        let mut spawned = None;
        for (i, particle) in self.particles.iter_mut().enumerate() {
            if spawn && particle.is_dormant() {
                particle.position = position;
                particle.color = self.spawn_color;
                spawn = false;
                spawned = Some(i);
            } else {
                particle.color.w -= dt;
            }
        }
        spawned
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.particles.iter().filter(|p| !p.is_dormant()).count()
    }

    /// Read-only sprite snapshot of every slot. Dormant particles are emitted
    /// with alpha 0 so negative alpha never reaches the blender.
    pub fn sprites(&self) -> impl Iterator<Item = SpriteInstance> + '_ {
        self.particles.iter().map(|p| {
            let alpha = p.color.w.clamp(0.0, 1.0);
            SpriteInstance::new(p.position, p.size, p.color.truncate().extend(alpha))
        })
    }
}
