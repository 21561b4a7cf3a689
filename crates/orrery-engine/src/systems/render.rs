use glam::{Mat4, Quat, Vec3};

use crate::assets::textures::TextureTable;
use crate::components::body::Body;
use crate::renderer::camera::CameraUniform;
use crate::renderer::frame::{
    DrawRequest, DrawTarget, FrameBuffer, Light, Material, MeshBounds, RenderMode, Shader,
    UniformSet,
};

/// White light, matching the unlit star.
pub const LIGHT_COLOR: Vec3 = Vec3::ONE;

/// Read-only view of the scene state needed to build one frame.
pub struct FrameInputs<'a> {
    pub camera: CameraUniform,
    pub eye: Vec3,
    pub bodies: &'a [Body],
    pub textures: &'a TextureTable,
    pub mesh_bounds: MeshBounds,
    pub material: Material,
    pub star_scale: f32,
    pub skybox_size: f32,
    pub cubemap: &'a str,
    pub elapsed: f32,
    /// Index of the focused body, if any.
    pub focused: Option<usize>,
}

/// Fill `frame` with the draw list for the current mode.
///
/// The skybox is always first. Full-scene mode then draws the star, every
/// body lit from the origin and every trail. Focused mode draws only the
/// focused body at the origin, spinning with its orbit angle and lit from
/// the eye.
pub fn build_frame(inputs: &FrameInputs, frame: &mut FrameBuffer) {
    frame.clear();
    frame.camera = inputs.camera;

    frame.push(DrawRequest {
        transform: Mat4::IDENTITY,
        target: DrawTarget::Skybox { size: inputs.skybox_size },
        shader: Shader::Cubemap,
        texture: inputs.textures.slot(inputs.cubemap),
        uniforms: None,
    });

    let normalize = inputs.mesh_bounds.normalization();

    match inputs.focused.and_then(|i| inputs.bodies.get(i).map(|b| (i, b))) {
        Some((index, body)) => {
            frame.mode = RenderMode::Focused(index);
            let spin = Mat4::from_quat(Quat::from_rotation_y(body.orbit().spin_at(inputs.elapsed)));
            frame.push(DrawRequest {
                transform: spin * Mat4::from_scale(Vec3::splat(body.visual_scale())) * normalize,
                target: DrawTarget::Mesh,
                shader: Shader::PhongTexture,
                texture: inputs.textures.slot(body.texture.name()),
                uniforms: Some(lit(inputs.material, inputs.eye)),
            });
        }
        None => {
            frame.mode = RenderMode::FullScene;
            frame.push(DrawRequest {
                transform: Mat4::from_scale(Vec3::splat(inputs.star_scale)) * normalize,
                target: DrawTarget::Mesh,
                shader: Shader::Unlit,
                texture: None,
                uniforms: None,
            });

            let uniforms = lit(inputs.material, Vec3::ZERO);
            for body in inputs.bodies {
                let model = Mat4::from_scale_rotation_translation(
                    Vec3::splat(body.visual_scale()),
                    Quat::IDENTITY,
                    body.position,
                );
                frame.push(DrawRequest {
                    transform: model * normalize,
                    target: DrawTarget::Mesh,
                    shader: Shader::PhongTexture,
                    texture: inputs.textures.slot(body.texture.name()),
                    uniforms: Some(uniforms),
                });
            }

            for body in inputs.bodies {
                frame.sprites.extend(body.trail.sprites());
            }
        }
    }

    frame.pack();
}

fn lit(material: Material, light_position: Vec3) -> UniformSet {
    UniformSet {
        material,
        light: Light {
            position: light_position,
            color: LIGHT_COLOR,
        },
    }
}
