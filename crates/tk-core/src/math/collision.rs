//! Ray intersection tests used for gizmo and object picking
//!
//! Both tests return the ray parameter of the nearest hit, which equals the
//! world-space distance from the ray origin when the ray direction is unit
//! length.

use glam::{Mat4, Vec3};

use super::Ray;
use crate::constants::{cube, intersect::TRIANGLE_EPSILON};

/// Ray-triangle intersection test.
///
/// Two-sided Möller–Trumbore test. Only hits strictly in front of the ray
/// origin are reported.
///
/// # Arguments
///
/// * `ray` - The ray to test.
/// * `v0`, `v1`, `v2` - Triangle vertices in the same space as the ray.
///
/// # Returns
///
/// * `Some(t)` - The ray parameter at the hit point.
/// * `None` - If the ray misses, runs parallel to the triangle, or hits behind
///   its origin.
pub fn intersect_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let p = ray.direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < TRIANGLE_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let s = ray.origin - v0;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t > 0.0).then_some(t)
}

/// Ray vs oriented bounding box.
///
/// The box is the canonical unit cube `[-0.5, 0.5]³` placed by `m`, so any
/// affine object matrix (rotation, translation, non-uniform scale) can be
/// tested directly.
///
/// # Algorithm
///
/// 1. Transform the 8 cube corners by `m`.
/// 2. Split each of the 6 faces into 2 triangles.
/// 3. Run [`intersect_triangle`] on all 12 and keep the smallest positive
///    distance.
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the closest face.
/// * `None` - If no face is hit in front of the ray origin.
pub fn intersect_obb(ray: &Ray, m: &Mat4) -> Option<f32> {
    let corners = cube::CORNERS.map(|p| m.transform_point3(p));

    let mut closest: Option<f32> = None;
    for [i0, i1, i2, i3] in cube::FACES {
        let hits = [
            intersect_triangle(ray, corners[i0], corners[i1], corners[i2]),
            intersect_triangle(ray, corners[i2], corners[i3], corners[i0]),
        ];
        for t in hits.into_iter().flatten() {
            if closest.is_none_or(|c| t < c) {
                closest = Some(t);
            }
        }
    }
    closest
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    /// Brute-force slab test in the cube's local frame. The local direction
    /// is left unnormalized so the parameter stays a world distance.
    fn slab_reference(ray: &Ray, m: &Mat4) -> Option<f32> {
        let inv = m.inverse();
        let origin = inv.transform_point3(ray.origin);
        let dir = inv.transform_vector3(ray.direction);

        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;
        for axis in 0..3 {
            let (o, d) = (origin[axis], dir[axis]);
            if d.abs() < 1e-9 {
                if !(-0.5..=0.5).contains(&o) {
                    return None;
                }
                continue;
            }
            let t0 = (-0.5 - o) / d;
            let t1 = (0.5 - o) / d;
            t_min = t_min.max(t0.min(t1));
            t_max = t_max.min(t0.max(t1));
        }
        if t_max < t_min || t_max <= 0.0 {
            return None;
        }
        Some(if t_min > 0.0 { t_min } else { t_max })
    }

    #[test]
    fn test_ray_hits_triangle() {
        let ray = Ray::new(Vec3::new(0.2, 0.2, 1.0), -Vec3::Z);
        let t = intersect_triangle(&ray, Vec3::ZERO, Vec3::X, Vec3::Y).unwrap();
        assert!((t - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ray_hits_triangle_from_behind() {
        let ray = Ray::new(Vec3::new(0.2, 0.2, -1.0), Vec3::Z);
        assert!(intersect_triangle(&ray, Vec3::ZERO, Vec3::X, Vec3::Y).is_some());
    }

    #[test]
    fn test_ray_misses_triangle() {
        let ray = Ray::new(Vec3::new(0.8, 0.8, 1.0), -Vec3::Z);
        assert!(intersect_triangle(&ray, Vec3::ZERO, Vec3::X, Vec3::Y).is_none());
    }

    #[test]
    fn test_triangle_behind_origin() {
        let ray = Ray::new(Vec3::new(0.2, 0.2, 1.0), Vec3::Z);
        assert!(intersect_triangle(&ray, Vec3::ZERO, Vec3::X, Vec3::Y).is_none());
    }

    #[test]
    fn test_ray_hits_unit_cube_front_face() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z);
        let t = intersect_obb(&ray, &Mat4::IDENTITY).unwrap();
        assert!((t - 9.5).abs() < 1e-5);
    }

    #[test]
    fn test_ray_misses_translated_cube() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z);
        let m = Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0));
        assert!(intersect_obb(&ray, &m).is_none());
    }

    #[test]
    fn test_ray_inside_cube_hits_exit_face() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = intersect_obb(&ray, &Mat4::IDENTITY).unwrap();
        assert!((t - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_obb_matches_slab_reference() {
        let matrices = [
            Mat4::IDENTITY,
            Mat4::from_translation(Vec3::new(0.3, -0.2, 0.1)),
            Mat4::from_scale_rotation_translation(
                Vec3::new(2.0, 0.5, 1.5),
                Quat::from_euler(glam::EulerRot::YXZ, 0.7, -0.3, 0.2),
                Vec3::new(0.5, 1.0, -0.5),
            ),
            Mat4::from_rotation_translation(Quat::from_rotation_z(1.1), Vec3::new(-1.0, 0.0, 2.0)),
        ];
        let rays = [
            Ray::new(Vec3::new(0.0, 1.0, 10.0), Vec3::new(0.0, -0.1, -1.0).normalize()),
            Ray::new(Vec3::new(5.0, 5.0, 5.0), Vec3::new(-1.0, -1.0, -1.0).normalize()),
            Ray::new(Vec3::new(-6.0, 0.4, 0.3), Vec3::X),
            Ray::new(Vec3::new(0.0, -8.0, 0.0), Vec3::new(0.05, 1.0, 0.02).normalize()),
            Ray::new(Vec3::new(3.0, 0.0, 3.0), Vec3::new(1.0, 0.0, 1.0).normalize()),
            Ray::new(Vec3::new(0.0, 0.0, 20.0), Vec3::new(0.3, 0.0, -1.0).normalize()),
        ];

        for m in &matrices {
            for ray in &rays {
                let expected = slab_reference(ray, m);
                let actual = intersect_obb(ray, m);
                match (expected, actual) {
                    (Some(e), Some(a)) => assert!(
                        (e - a).abs() < 1e-3,
                        "distance mismatch: slab {e} vs obb {a} for {ray:?}"
                    ),
                    (None, None) => {}
                    _ => panic!("hit mismatch: slab {expected:?} vs obb {actual:?} for {ray:?}"),
                }
            }
        }
    }
}
