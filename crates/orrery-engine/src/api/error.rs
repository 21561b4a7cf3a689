use thiserror::Error;

/// Errors raised while loading or validating a catalog or viewer config.
/// Per-frame geometry never fails; only the loading path does.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog contains no bodies")]
    EmptyCatalog,

    #[error("body '{name}' has negative orbit radius {value}")]
    NegativeOrbitRadius { name: String, value: f32 },

    #[error("body '{name}' has non-positive visual scale {value}")]
    NonPositiveScale { name: String, value: f32 },

    #[error("star scale must be positive, got {0}")]
    NonPositiveStarScale(f32),

    #[error("camera {field} must be positive, got {value}")]
    NonPositiveCamera { field: &'static str, value: f32 },

    #[error("camera pole margin must lie in (0, pi/2), got {0}")]
    InvalidPoleMargin(f32),

    #[error("viewport must be positive, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("projection near/far planes are invalid (near {near}, far {far})")]
    InvalidClipPlanes { near: f32, far: f32 },

    #[error("trail interval must be positive, got {0}")]
    NonPositiveTrailInterval(f32),

    #[error("trail pool must hold at least one particle")]
    EmptyTrailPool,

    #[error("trail spawn chance must lie in [0, 1], got {0}")]
    InvalidSpawnChance(f32),
}
