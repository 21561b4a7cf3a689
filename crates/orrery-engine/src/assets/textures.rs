use std::collections::HashMap;

use crate::assets::catalog::BodyCatalog;
use crate::renderer::frame::PARTICLE_TEXTURE;

/// Named textures the renderer must load, indexed by slot.
/// Draw requests carry slots; the renderer resolves them back to names.
#[derive(Debug, Clone, Default)]
pub struct TextureTable {
    names: Vec<String>,
    slots: HashMap<String, usize>,
}

impl TextureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Body textures, then the cubemap, then the trail sprite texture.
    pub fn from_catalog(catalog: &BodyCatalog) -> Self {
        let mut table = Self::new();
        for name in catalog.texture_names() {
            table.register(&name);
        }
        table.register(PARTICLE_TEXTURE);
        table
    }

    /// Add a name if absent and return its slot.
    pub fn register(&mut self, name: &str) -> usize {
        if let Some(&slot) = self.slots.get(name) {
            return slot;
        }
        let slot = self.names.len();
        self.names.push(name.to_string());
        self.slots.insert(name.to_string(), slot);
        slot
    }

    pub fn slot(&self, name: &str) -> Option<usize> {
        self.slots.get(name).copied()
    }

    pub fn name(&self, slot: usize) -> Option<&str> {
        self.names.get(slot).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
