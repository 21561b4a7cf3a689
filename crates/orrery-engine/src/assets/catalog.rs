use serde::{Deserialize, Serialize};

use crate::api::error::ConfigError;

/// Scene catalog: the star, the skybox and every orbiting body.
/// Body order is stable for the whole session and doubles as the
/// hot-key index space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyCatalog {
    #[serde(default)]
    pub star: StarDescriptor,
    #[serde(default)]
    pub skybox: SkyboxDescriptor,
    pub bodies: Vec<BodyDescriptor>,
}

/// The central star. Drawn unlit, never pickable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarDescriptor {
    #[serde(default = "default_star_scale")]
    pub scale: f32,
}

impl Default for StarDescriptor {
    fn default() -> Self {
        Self { scale: default_star_scale() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkyboxDescriptor {
    /// Half-extent of the skybox cube in world units.
    #[serde(default = "default_skybox_size")]
    pub size: f32,
    /// Name of the cubemap texture registered with the renderer.
    #[serde(default = "default_cubemap")]
    pub cubemap: String,
}

impl Default for SkyboxDescriptor {
    fn default() -> Self {
        Self {
            size: default_skybox_size(),
            cubemap: default_cubemap(),
        }
    }
}

/// One orbiting body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDescriptor {
    pub name: String,
    /// Distance from the star (world units).
    pub orbit_radius: f32,
    /// Radians per time unit.
    pub angular_speed: f32,
    /// Rendered and picking radius.
    pub visual_scale: f32,
    /// Texture name registered with the renderer.
    pub texture: String,
}

impl BodyDescriptor {
    pub fn new(
        name: &str,
        orbit_radius: f32,
        angular_speed: f32,
        visual_scale: f32,
        texture: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            orbit_radius,
            angular_speed,
            visual_scale,
            texture: texture.to_string(),
        }
    }
}

/// Outermost orbit of the default catalog; the skybox sits just past it.
pub const DEFAULT_ORBIT_EXTENT: f32 = 12.0;

fn default_star_scale() -> f32 {
    1.5
}

fn default_skybox_size() -> f32 {
    DEFAULT_ORBIT_EXTENT + 1.0
}

fn default_cubemap() -> String {
    "cubemap".to_string()
}

impl Default for BodyCatalog {
    /// The six-planet system the viewer ships with.
    fn default() -> Self {
        Self {
            star: StarDescriptor::default(),
            skybox: SkyboxDescriptor::default(),
            bodies: vec![
                BodyDescriptor::new("crater", 3.0, 0.5, 1.0 / 6.0, "crater"),
                BodyDescriptor::new("smoke", 4.0, 0.4, 1.0 / 9.0, "smoke"),
                BodyDescriptor::new("jupiter", 5.0, 0.2, 1.0 / 7.0, "jupiter"),
                BodyDescriptor::new("gas", 8.0, 0.5, 1.0 / 3.0, "gas"),
                BodyDescriptor::new("swirl1", 10.0, 0.3, 1.0 / 6.0, "swirl1"),
                BodyDescriptor::new("swirl2", 11.0, 0.9, 1.0 / 9.0, "swirl2"),
            ],
        }
    }
}

impl BodyCatalog {
    /// Parse a catalog from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bodies.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if self.star.scale <= 0.0 {
            return Err(ConfigError::NonPositiveStarScale(self.star.scale));
        }
        for body in &self.bodies {
            if body.orbit_radius < 0.0 {
                return Err(ConfigError::NegativeOrbitRadius {
                    name: body.name.clone(),
                    value: body.orbit_radius,
                });
            }
            if body.visual_scale <= 0.0 {
                return Err(ConfigError::NonPositiveScale {
                    name: body.name.clone(),
                    value: body.visual_scale,
                });
            }
        }
        Ok(())
    }

    /// Unique texture names in first-use order (bodies, then the cubemap).
    pub fn texture_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for body in &self.bodies {
            if !names.contains(&body.texture) {
                names.push(body.texture.clone());
            }
        }
        if !names.contains(&self.skybox.cubemap) {
            names.push(self.skybox.cubemap.clone());
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_valid() {
        let catalog = BodyCatalog::default();
        assert_eq!(catalog.bodies.len(), 6);
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.skybox.size, 13.0);
    }

    #[test]
    fn parse_minimal_catalog() {
        let json = r#"{
            "bodies": [
                { "name": "rock", "orbit_radius": 2.0, "angular_speed": 1.0,
                  "visual_scale": 0.25, "texture": "crater" }
            ]
        }"#;
        let catalog = BodyCatalog::from_json(json).unwrap();
        assert_eq!(catalog.bodies.len(), 1);
        assert_eq!(catalog.bodies[0].texture, "crater");
        assert_eq!(catalog.star.scale, 1.5);
        assert_eq!(catalog.skybox.cubemap, "cubemap");
    }

    #[test]
    fn rejects_empty_catalog() {
        let err = BodyCatalog::from_json(r#"{ "bodies": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCatalog));
    }

    #[test]
    fn rejects_negative_orbit_radius() {
        let mut catalog = BodyCatalog::default();
        catalog.bodies[2].orbit_radius = -1.0;
        match catalog.validate() {
            Err(ConfigError::NegativeOrbitRadius { name, .. }) => assert_eq!(name, "jupiter"),
            other => panic!("Expected NegativeOrbitRadius, got {:?}", other),
        }
    }

    #[test]
    fn rejects_zero_visual_scale() {
        let mut catalog = BodyCatalog::default();
        catalog.bodies[0].visual_scale = 0.0;
        assert!(matches!(catalog.validate(), Err(ConfigError::NonPositiveScale { .. })));
    }

    #[test]
    fn zero_orbit_radius_is_allowed() {
        let mut catalog = BodyCatalog::default();
        catalog.bodies[0].orbit_radius = 0.0;
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn texture_names_are_unique() {
        let mut catalog = BodyCatalog::default();
        catalog.bodies[1].texture = "crater".into();
        let names = catalog.texture_names();
        assert_eq!(names.iter().filter(|n| n.as_str() == "crater").count(), 1);
        assert_eq!(names.last().map(String::as_str), Some("cubemap"));
    }
}
