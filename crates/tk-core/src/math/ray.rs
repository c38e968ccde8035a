//! Rays and planes

use glam::{Mat4, Vec3};

use crate::constants::intersect::PARALLEL_EPSILON;

/// World-space ray with a unit direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin
    pub origin: Vec3,
    /// Ray direction (unit length when valid)
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray. The direction is stored as given.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// A ray is usable only when every direction component is finite.
    pub fn is_valid(&self) -> bool {
        self.direction.is_finite()
    }

    /// Point at parameter `t` along the ray
    pub fn point(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Transform the ray by an affine matrix, renormalizing the direction
    pub fn transform(&self, m: &Mat4) -> Ray {
        Ray {
            origin: m.transform_point3(self.origin),
            direction: m.transform_vector3(self.direction).normalize_or_zero(),
        }
    }

    /// Ray parameter where the ray meets `plane`.
    ///
    /// Returns `None` when the ray runs parallel to the plane. Hits behind the
    /// origin come back as negative values.
    pub fn intersect_plane(&self, plane: &Plane) -> Option<f32> {
        let denom = plane.normal.dot(self.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = (plane.distance - plane.normal.dot(self.origin)) / denom;
        t.is_finite().then_some(t)
    }
}

/// Plane `dot(normal, x) = distance`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal
    pub normal: Vec3,
    /// Signed distance from the origin along `normal`
    pub distance: f32,
}

impl Plane {
    /// Plane through `point` with the given (not necessarily unit) normal
    pub fn new(normal: Vec3, point: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            distance: normal.dot(point),
        }
    }

    /// Signed distance of `point` from the plane
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.distance
    }

    /// False for planes built from a zero or non-finite normal
    pub fn is_valid(&self) -> bool {
        self.normal.is_finite() && self.normal.length_squared() > 0.0
    }
}
