/// Identifier for a body in the scene. Equal to its catalog index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub u32);

impl BodyId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Opaque texture handle. The renderer owns the actual image; the core only
/// carries the name it was registered under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureRef(pub String);

impl TextureRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Notifications produced by the scene for the UI layer.
/// Drained once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    /// Focus moved to a body (by index) or back to the full scene (`None`).
    FocusChanged(Option<usize>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_id_index() {
        assert_eq!(BodyId(4).index(), 4);
    }

    #[test]
    fn texture_ref_name() {
        let tex = TextureRef::new("jupiter");
        assert_eq!(tex.name(), "jupiter");
    }
}
