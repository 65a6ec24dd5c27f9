//! Audio-reactive blob: smoothed transform and material parameters.

mod deformer;

// Re-export public types
pub use deformer::{MeshDeformer, MeshState};

use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Blob transform for the current frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshTransform {
    /// Euler angles (radians, XYZ order); unbounded, wrap is cosmetic
    pub rotation: Vec3,
    /// Uniform scale (≥ scale floor)
    pub scale: f32,
}

impl MeshTransform {
    /// Model matrix: uniform scale, then XYZ rotation, at the origin
    pub fn model_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, Vec3::ZERO)
    }
}

impl Default for MeshTransform {
    fn default() -> Self {
        Self {
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

/// Distortion material parameters for the current frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshMaterial {
    /// Vertex displacement strength, in the distort range
    pub distort: f32,
    /// Displacement animation speed, in the speed range (rest value when inactive)
    pub speed: f32,
    pub emissive_intensity: f32,
}

/// Everything the renderer needs to draw the blob
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshFrame {
    pub transform: MeshTransform,
    pub material: MeshMaterial,
}

/// Uniform buffer for the blob shader (model matrix + material)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct MeshUniforms {
    pub model: [[f32; 4]; 4],
    pub distort: f32,
    pub speed: f32,
    pub emissive_intensity: f32,
    pub time: f32,
}

impl MeshUniforms {
    pub fn new(frame: &MeshFrame, time_s: f32) -> Self {
        Self {
            model: frame.transform.model_matrix().to_cols_array_2d(),
            distort: frame.material.distort,
            speed: frame.material.speed,
            emissive_intensity: frame.material.emissive_intensity,
            time: time_s,
        }
    }
}
