use glam::{Mat4, Vec2, Vec3, Vec4};

/// Map a screen-space point (pixels, origin top-left) to a world-space point
/// on the far clip plane.
///
/// `projection * view` must be invertible; this holds for any perspective
/// configured with finite near/far planes. A singular matrix yields
/// meaningless (possibly non-finite) output rather than an error.
pub fn screen_to_world(screen: Vec2, viewport: Vec2, projection: &Mat4, view: &Mat4) -> Vec3 {
    // screen origin is top-left, NDC origin is bottom-left
    let flipped_y = viewport.y - screen.y;
    let ndc = Vec2::new(
        2.0 * (screen.x / viewport.x - 0.5),
        2.0 * (flipped_y / viewport.y - 0.5),
    );
    let clip = Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
    let world = (*projection * *view).inverse() * clip;
    world.truncate() / world.w
}
