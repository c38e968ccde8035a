//! Global constants for tk-core

/// Unit cube geometry shared by hit testing and outline projection
pub mod cube {
    use glam::Vec3;

    /// Half edge length of the canonical cube (the cube spans `[-0.5, 0.5]` on each axis)
    pub const HALF_EXTENT: f32 = 0.5;

    /// Corner positions.
    ///
    /// ```text
    ///   7+-+6
    ///   / /|
    ///  3+-+2 +5
    ///  | |/
    ///  0+-+1
    /// ```
    pub const CORNERS: [Vec3; 8] = [
        Vec3::new(-HALF_EXTENT, -HALF_EXTENT, HALF_EXTENT),
        Vec3::new(HALF_EXTENT, -HALF_EXTENT, HALF_EXTENT),
        Vec3::new(HALF_EXTENT, HALF_EXTENT, HALF_EXTENT),
        Vec3::new(-HALF_EXTENT, HALF_EXTENT, HALF_EXTENT),
        Vec3::new(-HALF_EXTENT, -HALF_EXTENT, -HALF_EXTENT),
        Vec3::new(HALF_EXTENT, -HALF_EXTENT, -HALF_EXTENT),
        Vec3::new(HALF_EXTENT, HALF_EXTENT, -HALF_EXTENT),
        Vec3::new(-HALF_EXTENT, HALF_EXTENT, -HALF_EXTENT),
    ];

    /// Corner indices of each face: +x, +y, +z, -x, -y, -z
    pub const FACES: [[usize; 4]; 6] = [
        [1, 5, 6, 2],
        [2, 6, 7, 3],
        [0, 1, 2, 3],
        [4, 0, 3, 7],
        [5, 1, 0, 4],
        [5, 4, 7, 6],
    ];
}

/// Intersection tolerances
pub mod intersect {
    /// Denominators below this are treated as a ray parallel to a plane
    pub const PARALLEL_EPSILON: f32 = 1e-6;

    /// Determinant threshold for the ray-triangle test
    pub const TRIANGLE_EPSILON: f32 = 1e-7;
}
