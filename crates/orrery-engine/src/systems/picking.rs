//! Ray casting against body bounding spheres and focus selection.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::components::body::Body;
use crate::renderer::unproject::screen_to_world;

/// Semi-infinite ray: `origin + t * direction`, `t >= 0`.
/// Transient; built per pick and never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray; `direction` is normalized here.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Ray from the eye through a screen-space pixel.
    pub fn through_screen(
        eye: Vec3,
        screen: Vec2,
        viewport: Vec2,
        projection: &Mat4,
        view: &Mat4,
    ) -> Self {
        let world = screen_to_world(screen, viewport, projection, view);
        Self::new(eye, world - eye)
    }
}

/// Near intersection distance of `ray` with the sphere at `center`, or `None`.
///
/// A sphere whose center projects behind the origin is rejected even when the
/// origin lies inside it; the camera never sits inside a body in practice.
pub fn intersect_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let l = center - ray.origin;
    let s = l.dot(ray.direction.normalize_or_zero());
    if s < 0.0 {
        return None;
    }
    let m2 = l.length_squared() - s * s;
    let r2 = radius * radius;
    if m2 > r2 {
        return None;
    }
    Some(s - (r2 - m2).sqrt())
}

pub fn hits_sphere(ray: &Ray, center: Vec3, radius: f32) -> bool {
    intersect_sphere(ray, center, radius).is_some()
}

/// How a pick resolves a ray that pierces several spheres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickPolicy {
    /// Closest intersection along the ray wins.
    #[default]
    Nearest,
    /// First pierced sphere in catalog order wins, regardless of depth.
    FirstHit,
}

/// Which body, if any, is shown on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    focused: Option<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.focused.is_some()
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    pub fn focus(&mut self, index: usize) {
        self.focused = Some(index);
    }

    pub fn clear(&mut self) {
        self.focused = None;
    }
}

/// Resolves rays to body indices.
#[derive(Debug, Clone, Copy, Default)]
pub struct Picker {
    pub policy: PickPolicy,
}

impl Picker {
    pub fn new(policy: PickPolicy) -> Self {
        Self { policy }
    }

    /// Index of the picked sphere among `(center, radius)` pairs.
    pub fn pick_spheres(
        &self,
        ray: &Ray,
        spheres: impl IntoIterator<Item = (Vec3, f32)>,
    ) -> Option<usize> {
        let mut hits = spheres
            .into_iter()
            .enumerate()
            .filter_map(|(i, (center, radius))| {
                intersect_sphere(ray, center, radius).map(|t| (i, t))
            });

        match self.policy {
            PickPolicy::FirstHit => hits.next().map(|(i, _)| i),
            PickPolicy::Nearest => hits
                .fold(None, |best: Option<(usize, f32)>, (i, t)| match best {
                    Some((_, best_t)) if best_t <= t => best,
                    _ => Some((i, t)),
                })
                .map(|(i, _)| i),
        }
    }

    /// Index of the picked body, using each body's visual scale as its radius.
    pub fn pick(&self, ray: &Ray, bodies: &[Body]) -> Option<usize> {
        self.pick_spheres(ray, bodies.iter().map(|b| (b.position, b.visual_scale())))
    }

    /// Pick and focus. Does nothing while a focus is already active.
    pub fn try_pick(&self, selection: &mut Selection, ray: &Ray, bodies: &[Body]) -> Option<usize> {
        if selection.is_active() {
            return None;
        }
        let hit = self.pick(ray, bodies)?;
        selection.focus(hit);
        Some(hit)
    }
}
