//! Rigid transform (rotation + translation, no scale)

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Rigid pose used for cameras and manipulated objects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EuclideanTransform {
    /// Orientation
    pub rotation: Quat,
    /// Position
    pub translation: Vec3,
}

impl Default for EuclideanTransform {
    fn default() -> Self {
        Self {
            rotation: Quat::IDENTITY,
            translation: Vec3::ZERO,
        }
    }
}

impl EuclideanTransform {
    /// Create a transform from rotation and translation
    pub fn new(rotation: Quat, translation: Vec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Pure translation
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            rotation: Quat::IDENTITY,
            translation,
        }
    }

    /// Decompose an affine matrix, dropping any scale
    pub fn from_matrix(m: &Mat4) -> Self {
        let (_, rotation, translation) = m.to_scale_rotation_translation();
        Self {
            rotation,
            translation,
        }
    }

    /// False only for the exact identity rotation (either quaternion sign)
    pub fn has_rotation(&self) -> bool {
        let q = self.rotation;
        !(q.x == 0.0 && q.y == 0.0 && q.z == 0.0 && (q.w == 1.0 || q.w == -1.0))
    }

    /// Local-to-world matrix
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }

    /// Local-to-world matrix with the translation multiplied by `scaling`
    pub fn scaling_translation_matrix(&self, scaling: f32) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation * scaling)
    }

    /// World-to-local matrix
    pub fn inverse_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.rotation.inverse()) * Mat4::from_translation(-self.translation)
    }

    /// The inverse pose
    pub fn inversed(&self) -> Self {
        let rotation = self.rotation.inverse();
        Self {
            rotation,
            translation: rotation * -self.translation,
        }
    }

    /// Rotate the whole pose about the world origin
    pub fn rotate(&self, r: Quat) -> Self {
        Self {
            rotation: (r * self.rotation).normalize(),
            translation: r * self.translation,
        }
    }

    /// Local X axis in world space
    pub fn axis_x(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Local Y axis in world space
    pub fn axis_y(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Local Z axis in world space
    pub fn axis_z(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EuclideanTransform {
        EuclideanTransform::new(
            Quat::from_euler(glam::EulerRot::YXZ, 0.4, -0.2, 0.1),
            Vec3::new(1.0, 2.0, 3.0),
        )
    }

    #[test]
    fn test_inverse_matrix_matches_matrix_inverse() {
        let t = sample();
        assert!(t.inverse_matrix().abs_diff_eq(t.matrix().inverse(), 1e-5));
    }

    #[test]
    fn test_inversed_round_trip() {
        let t = sample();
        let back = t.inversed().inversed();
        assert!(back.translation.abs_diff_eq(t.translation, 1e-5));
        assert!(back.rotation.dot(t.rotation).abs() > 0.99999);
        assert!(t.inversed().matrix().abs_diff_eq(t.inverse_matrix(), 1e-5));
    }

    #[test]
    fn test_from_matrix_drops_scale() {
        let t = sample();
        let scaled = t.matrix() * Mat4::from_scale(Vec3::splat(2.0));
        let decomposed = EuclideanTransform::from_matrix(&scaled);
        assert!(decomposed.translation.abs_diff_eq(t.translation, 1e-5));
        assert!(decomposed.rotation.dot(t.rotation).abs() > 0.9999);
    }

    #[test]
    fn test_has_rotation() {
        assert!(!EuclideanTransform::default().has_rotation());
        assert!(sample().has_rotation());
    }

    #[test]
    fn test_rotate_about_origin() {
        let t = EuclideanTransform::from_translation(Vec3::X);
        let r = t.rotate(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        assert!(r.translation.abs_diff_eq(-Vec3::Z, 1e-5));
        assert!(r.axis_x().abs_diff_eq(-Vec3::Z, 1e-5));
    }
}
