//! Translation drag

use glam::{Mat4, Vec3};
use tk_core::{Plane, Ray};
use tracing::warn;

use super::{Space, TranslationConstraint};
use crate::context::Context;
use crate::drawlist::DrawList;

/// Moves an object matrix along an axis, a plane or the view plane.
///
/// The pointer ray is intersected with a drag plane through the object's
/// origin. The plane is fixed at drag start; every frame the offset between
/// the current and the starting intersection becomes the translation.
#[derive(Debug, Clone)]
pub struct Translation {
    constraint: TranslationConstraint,
    start_matrix: Mat4,
    start_position: Vec3,
    /// Single-axis constraints project the offset onto this axis
    axis: Option<Vec3>,
    plane: Plane,
    plane_start: Vec3,
}

impl Translation {
    /// Start a drag from the current pointer ray.
    ///
    /// Returns `None` without a ray or when the ray does not hit the drag
    /// plane in front of the eye.
    pub fn begin(
        context: &Context,
        matrix: &Mat4,
        space: Space,
        constraint: TranslationConstraint,
    ) -> Option<Self> {
        let ray = context.ray.as_ref()?;
        let start_position = matrix.w_axis.truncate();
        let axes = constraint_axes(matrix, space);

        let (axis, normal) = if let Some(i) = constraint.axis_index() {
            let axis = axes[i];
            // plane containing the axis, turned towards the eye
            let to_target = start_position - context.camera.eye();
            let normal = to_target - axis * axis.dot(to_target);
            if normal.length_squared() > 1e-8 {
                (Some(axis), normal)
            } else {
                (Some(axis), axis.any_orthonormal_vector())
            }
        } else if let Some(i) = constraint.plane_normal_index() {
            (None, axes[i])
        } else {
            (None, context.camera.transform.axis_z())
        };

        let plane = Plane::new(normal, start_position);
        let Some(plane_start) = hit_in_front(ray, &plane) else {
            warn!(?constraint, "pointer ray misses the drag plane, not starting drag");
            return None;
        };

        Some(Self {
            constraint,
            start_matrix: *matrix,
            start_position,
            axis,
            plane,
            plane_start,
        })
    }

    /// Allowed motion
    pub fn constraint(&self) -> TranslationConstraint {
        self.constraint
    }

    /// Matrix captured at drag start
    pub fn start_matrix(&self) -> &Mat4 {
        &self.start_matrix
    }

    /// Drag plane
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Move `matrix` to follow the pointer and emit feedback markers.
    ///
    /// Returns the translation relative to the drag start. When the ray
    /// misses the plane the matrix is left as is and only the origin marker
    /// is drawn.
    pub fn drag<H>(
        &self,
        context: &Context,
        matrix: &mut Mat4,
        drawlist: &mut DrawList<H>,
    ) -> Option<Vec3> {
        let style = drawlist.style();
        let color = style.drag_feedback_color;
        let radius = style.feedback_radius;
        let thickness = style.outline_thickness;

        let origin = context.world_to_viewport(self.start_position);
        drawlist.add_circle(origin, radius, color);

        let current = hit_in_front(context.ray.as_ref()?, &self.plane)?;
        let mut delta = current - self.plane_start;
        if let Some(axis) = self.axis {
            delta = axis * axis.dot(delta);
        }
        *matrix = Mat4::from_translation(delta) * self.start_matrix;

        let now = context.world_to_viewport(self.start_position + delta);
        drawlist.add_line(origin, now, color, thickness);
        drawlist.add_circle(now, radius, color);
        Some(delta)
    }
}

/// Constraint axes in world space. Degenerate local axes fall back to the
/// world axis.
pub(crate) fn constraint_axes(matrix: &Mat4, space: Space) -> [Vec3; 3] {
    let world = [Vec3::X, Vec3::Y, Vec3::Z];
    match space {
        Space::World => world,
        Space::Local => {
            let local = [matrix.x_axis, matrix.y_axis, matrix.z_axis];
            let mut axes = world;
            for (axis, column) in axes.iter_mut().zip(local) {
                let v = column.truncate().normalize_or_zero();
                if v != Vec3::ZERO {
                    *axis = v;
                }
            }
            axes
        }
    }
}

fn hit_in_front(ray: &Ray, plane: &Plane) -> Option<Vec3> {
    let t = ray.intersect_plane(plane)?;
    (t > 0.0).then(|| ray.point(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::drawlist::MarkerShape;
    use crate::viewport::{ViewportFocus, ViewportState};
    use glam::{Quat, Vec2};

    fn context_at(pointer: Vec2) -> Context {
        let mut camera = Camera::default().with_eye(Vec3::new(0.0, 1.0, 10.0), 10.0);
        camera.projection.set_aspect_ratio(800.0, 600.0);
        camera.update();
        let viewport = ViewportState::new(0.0, 0.0, 800.0, 600.0)
            .with_focus(ViewportFocus::Active)
            .with_pointer(pointer);
        Context::new(&camera, &viewport)
    }

    #[test]
    fn test_zero_movement_gives_zero_delta() {
        let context = context_at(Vec2::new(420.0, 310.0));
        let start = Mat4::from_translation(Vec3::new(0.2, 0.1, 0.0));
        for constraint in [
            TranslationConstraint::AxisX,
            TranslationConstraint::AxisY,
            TranslationConstraint::PlaneXY,
            TranslationConstraint::Screen,
        ] {
            let drag = Translation::begin(&context, &start, Space::World, constraint).unwrap();
            let mut matrix = start;
            let mut drawlist = DrawList::<u32>::default();
            let delta = drag.drag(&context, &mut matrix, &mut drawlist).unwrap();
            assert_eq!(delta, Vec3::ZERO);
            assert_eq!(matrix, start);
            assert_eq!(drawlist.markers().len(), 3);
        }
    }

    #[test]
    fn test_axis_drag_stays_on_axis() {
        let start = Mat4::IDENTITY;
        let begin = context_at(Vec2::new(400.0, 300.0));
        let drag = Translation::begin(&begin, &start, Space::World, TranslationConstraint::AxisX).unwrap();

        let moved = context_at(Vec2::new(480.0, 260.0));
        let mut matrix = start;
        let mut drawlist = DrawList::<u32>::default();
        let delta = drag.drag(&moved, &mut matrix, &mut drawlist).unwrap();

        assert!(delta.x > 0.0);
        assert_eq!(delta.y, 0.0);
        assert_eq!(delta.z, 0.0);
        assert!(matrix.w_axis.truncate().abs_diff_eq(delta, 1e-6));
    }

    #[test]
    fn test_local_axis_follows_rotation() {
        let start = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let axes = constraint_axes(&start, Space::Local);
        assert!(axes[0].abs_diff_eq(Vec3::NEG_Z, 1e-6));
        assert_eq!(constraint_axes(&start, Space::World)[0], Vec3::X);

        let degenerate = Mat4::from_scale(Vec3::new(0.0, 1.0, 1.0));
        assert_eq!(constraint_axes(&degenerate, Space::Local)[0], Vec3::X);
    }

    #[test]
    fn test_plane_drag_keeps_normal_component() {
        let start = Mat4::from_rotation_translation(Quat::IDENTITY, Vec3::new(0.0, 0.5, 0.0));
        let begin = context_at(Vec2::new(400.0, 300.0));
        let drag = Translation::begin(&begin, &start, Space::World, TranslationConstraint::PlaneXY).unwrap();

        let moved = context_at(Vec2::new(350.0, 330.0));
        let mut matrix = start;
        let mut drawlist = DrawList::<u32>::default();
        let delta = drag.drag(&moved, &mut matrix, &mut drawlist).unwrap();
        assert!(delta.z.abs() < 1e-5);
        assert!(delta.x < 0.0);
        assert!(delta.y < 0.0);
    }

    #[test]
    fn test_feedback_markers() {
        let context = context_at(Vec2::new(400.0, 300.0));
        let drag = Translation::begin(&context, &Mat4::IDENTITY, Space::World, TranslationConstraint::Screen)
            .unwrap();
        let mut matrix = Mat4::IDENTITY;
        let mut drawlist = DrawList::<u32>::default();
        drag.drag(&context, &mut matrix, &mut drawlist);

        let markers = drawlist.markers();
        assert!(matches!(markers[0].shape, MarkerShape::Circle { radius, .. } if radius == 6.0));
        assert!(matches!(markers[1].shape, MarkerShape::Line { .. }));
        assert!(matches!(markers[2].shape, MarkerShape::Circle { .. }));
        assert_eq!(markers[0].color, tk_core::Color::ORANGE);
    }

    #[test]
    fn test_no_ray_no_drag() {
        let mut context = context_at(Vec2::new(400.0, 300.0));
        context.ray = None;
        assert!(Translation::begin(&context, &Mat4::IDENTITY, Space::World, TranslationConstraint::AxisX).is_none());
    }
}
