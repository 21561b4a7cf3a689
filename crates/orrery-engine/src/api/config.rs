use std::f32::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::api::error::ConfigError;
use crate::systems::picking::PickPolicy;

/// Configuration for the viewer, supplied once at scene construction.
/// Every field has a default, so partial JSON is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera: CameraConfig,
    pub projection: ProjectionConfig,
    pub trail: TrailConfig,
    /// How a pick resolves multiple pierced bodies.
    pub pick_policy: PickPolicy,
    /// Seed for the trail spawn coin flips.
    pub seed: u64,
    /// Initial viewport size in pixels (updated by resize events).
    pub viewport: [f32; 2],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            projection: ProjectionConfig::default(),
            trail: TrailConfig::default(),
            pick_policy: PickPolicy::Nearest,
            seed: 42,
            viewport: [800.0, 600.0],
        }
    }
}

/// Orbit camera tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Initial distance from the look target.
    pub radius: f32,
    pub azimuth: f32,
    pub elevation: f32,
    /// Radians of azimuth per pixel of horizontal drag.
    pub azimuth_sensitivity: f32,
    /// Radians of elevation per pixel of vertical drag.
    pub elevation_sensitivity: f32,
    /// Elevation stays this far away from either pole.
    pub pole_margin: f32,
    /// Radius restored when scrolling drives it to zero or below.
    pub min_radius: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            azimuth: 0.0,
            elevation: 0.0,
            azimuth_sensitivity: 0.02,
            elevation_sensitivity: 0.02,
            pole_margin: 0.01,
            min_radius: 1.0,
        }
    }
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 50.0,
        }
    }
}

/// Trail pool tunables, shared by every body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Particles per body.
    pub particle_count: usize,
    /// Time units between trail ticks.
    pub interval: f32,
    /// Point-sprite size of every particle.
    pub particle_size: f32,
    /// RGBA a particle is (re)spawned with.
    pub spawn_color: [f32; 4],
    /// Probability that a pool respawns a particle on a trail tick.
    pub spawn_chance: f32,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            particle_count: 10,
            interval: 5.0,
            particle_size: 0.1,
            spawn_color: [1.0, 1.0, 0.8, 1.0],
            spawn_chance: 0.5,
        }
    }
}

impl ViewerConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let cam = &self.camera;
        if cam.radius <= 0.0 {
            return Err(ConfigError::NonPositiveCamera { field: "radius", value: cam.radius });
        }
        if cam.min_radius <= 0.0 {
            return Err(ConfigError::NonPositiveCamera {
                field: "min_radius",
                value: cam.min_radius,
            });
        }
        if !(cam.pole_margin > 0.0 && cam.pole_margin < FRAC_PI_2) {
            return Err(ConfigError::InvalidPoleMargin(cam.pole_margin));
        }
        let [width, height] = self.viewport;
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidViewport { width, height });
        }
        let proj = &self.projection;
        if proj.near <= 0.0 || proj.far <= proj.near {
            return Err(ConfigError::InvalidClipPlanes { near: proj.near, far: proj.far });
        }
        if self.trail.interval <= 0.0 {
            return Err(ConfigError::NonPositiveTrailInterval(self.trail.interval));
        }
        if self.trail.particle_count == 0 {
            return Err(ConfigError::EmptyTrailPool);
        }
        if !(0.0..=1.0).contains(&self.trail.spawn_chance) {
            return Err(ConfigError::InvalidSpawnChance(self.trail.spawn_chance));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ViewerConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "camera": { "radius": 20.0 }, "seed": 7 }"#;
        let config = ViewerConfig::from_json(json).unwrap();
        assert_eq!(config.camera.radius, 20.0);
        assert_eq!(config.camera.azimuth_sensitivity, 0.02);
        assert_eq!(config.seed, 7);
        assert_eq!(config.trail.particle_count, 10);
        assert_eq!(config.pick_policy, PickPolicy::Nearest);
    }

    #[test]
    fn pick_policy_parses_snake_case() {
        let config = ViewerConfig::from_json(r#"{ "pick_policy": "first_hit" }"#).unwrap();
        assert_eq!(config.pick_policy, PickPolicy::FirstHit);
    }

    #[test]
    fn rejects_zero_trail_interval() {
        let err = ViewerConfig::from_json(r#"{ "trail": { "interval": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositiveTrailInterval(_)));
    }

    #[test]
    fn rejects_inverted_clip_planes() {
        let json = r#"{ "projection": { "near": 10.0, "far": 1.0 } }"#;
        let err = ViewerConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidClipPlanes { .. }));
    }

    #[test]
    fn rejects_negative_camera_radius() {
        let err = ViewerConfig::from_json(r#"{ "camera": { "radius": -1.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositiveCamera { field: "radius", .. }));
    }

    #[test]
    fn rejects_pole_margin_past_the_pole() {
        let err = ViewerConfig::from_json(r#"{ "camera": { "pole_margin": 2.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPoleMargin(m) if m == 2.0));
    }

    #[test]
    fn rejects_negative_or_zero_pole_margin() {
        for margin in ["-0.5", "0.0"] {
            let json = format!(r#"{{ "camera": {{ "pole_margin": {} }} }}"#, margin);
            let err = ViewerConfig::from_json(&json).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidPoleMargin(_)), "margin {}", margin);
        }
    }

    #[test]
    fn rejects_empty_viewport() {
        let err = ViewerConfig::from_json(r#"{ "viewport": [0.0, 0.0] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidViewport { .. }));
        let err = ViewerConfig::from_json(r#"{ "viewport": [800.0, -1.0] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidViewport { .. }));
    }

    #[test]
    fn rejects_spawn_chance_outside_unit_range() {
        let err = ViewerConfig::from_json(r#"{ "trail": { "spawn_chance": 1.5 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSpawnChance(_)));
        assert!(ViewerConfig::from_json(r#"{ "trail": { "spawn_chance": 1.0 } }"#).is_ok());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = ViewerConfig::from_json("{ camera").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
