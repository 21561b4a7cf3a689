pub mod catalog;
pub mod textures;
