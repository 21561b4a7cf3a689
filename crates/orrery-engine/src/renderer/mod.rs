pub mod camera;
pub mod frame;
pub mod instance;
pub mod traits;
pub mod unproject;

// Re-export key types for convenient access
pub use traits::{FrameData, Renderer};
