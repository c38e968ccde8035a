//! Per-frame camera, viewport and pointer ray

use glam::{Mat4, Vec2, Vec3, Vec4};
use tk_core::{Ray, intersect_obb};

use crate::camera::Camera;
use crate::viewport::{ViewportFocus, ViewportState};

/// Everything hit tests and projections need for one frame.
///
/// Rebuilt by [`crate::Gui::begin`]; the camera and viewport are copies, so
/// the caller may keep mutating its own camera during the frame.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Camera as of frame begin
    pub camera: Camera,
    /// Input snapshot
    pub viewport: ViewportState,
    /// Pointer ray; `None` without focus or for a degenerate viewport
    pub ray: Option<Ray>,
}

impl Context {
    /// Snapshot a camera and its viewport input
    pub fn new(camera: &Camera, viewport: &ViewportState) -> Self {
        let ray = if viewport.focus == ViewportFocus::None {
            None
        } else {
            camera.get_ray(viewport)
        };
        Self {
            camera: camera.clone(),
            viewport: *viewport,
            ray,
        }
    }

    /// World point to clip space
    pub fn world_to_clip(&self, p: Vec3) -> Vec4 {
        self.camera.view_projection() * p.extend(1.0)
    }

    /// World point to viewport pixels
    pub fn world_to_viewport(&self, p: Vec3) -> Vec2 {
        self.viewport.clip_to_viewport(self.world_to_clip(p))
    }

    /// Hit test a world-space segment against the pointer in screen space.
    ///
    /// The pointer must lie within `pixel_radius` of the projected segment.
    /// Returns the distance from the eye to the matching point on the
    /// segment.
    pub fn intersect_segment(&self, s: Vec3, e: Vec3, pixel_radius: f32) -> Option<f32> {
        self.ray.as_ref()?;

        let cs = self.world_to_clip(s);
        let ce = self.world_to_clip(e);
        // behind the eye the projection folds over
        if cs.w <= 0.0 || ce.w <= 0.0 {
            return None;
        }
        let a = self.viewport.clip_to_viewport(cs);
        let b = self.viewport.clip_to_viewport(ce);
        let hit = self.viewport.nearest_on_segment(a, b, pixel_radius)?;

        let length = (b - a).length();
        let ratio = if length > f32::EPSILON {
            (hit - a).length() / length
        } else {
            0.0
        };
        let world = s.lerp(e, ratio);
        Some((world - self.camera.eye()).length())
    }

    /// Hit test the unit cube placed by `m`
    pub fn intersect_obb(&self, m: &Mat4) -> Option<f32> {
        intersect_obb(self.ray.as_ref()?, m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front_camera() -> Camera {
        let mut camera = Camera::default().with_eye(Vec3::new(0.0, 0.0, 10.0), 10.0);
        camera.projection.set_aspect_ratio(800.0, 600.0);
        camera.update();
        camera
    }

    fn viewport_at(pointer: Vec2) -> ViewportState {
        ViewportState::new(0.0, 0.0, 800.0, 600.0)
            .with_focus(ViewportFocus::Hover)
            .with_pointer(pointer)
    }

    #[test]
    fn test_no_ray_without_focus() {
        let viewport = viewport_at(Vec2::new(400.0, 300.0)).with_focus(ViewportFocus::None);
        let context = Context::new(&front_camera(), &viewport);
        assert!(context.ray.is_none());
        assert!(context.intersect_obb(&Mat4::IDENTITY).is_none());
        assert!(context.intersect_segment(Vec3::ZERO, Vec3::X, 4.0).is_none());
    }

    #[test]
    fn test_origin_projects_to_center() {
        let context = Context::new(&front_camera(), &viewport_at(Vec2::ZERO));
        let p = context.world_to_viewport(Vec3::ZERO);
        assert!(p.abs_diff_eq(Vec2::new(400.0, 300.0), 1e-3));
    }

    #[test]
    fn test_segment_hit_distance() {
        let camera = front_camera();
        let probe = Context::new(&camera, &viewport_at(Vec2::ZERO));
        let mid = probe.world_to_viewport(Vec3::new(0.5, 0.0, 0.0));

        let context = Context::new(&camera, &viewport_at(mid + Vec2::new(0.0, 2.0)));
        let t = context.intersect_segment(Vec3::ZERO, Vec3::X, 4.0).unwrap();
        let expected = (Vec3::new(0.5, 0.0, 0.0) - camera.eye()).length();
        assert!((t - expected).abs() < 1e-3);

        let far = Context::new(&camera, &viewport_at(mid + Vec2::new(0.0, 10.0)));
        assert!(far.intersect_segment(Vec3::ZERO, Vec3::X, 4.0).is_none());
    }

    #[test]
    fn test_segment_behind_eye_is_ignored() {
        let context = Context::new(&front_camera(), &viewport_at(Vec2::new(400.0, 300.0)));
        let behind = Vec3::new(0.0, 0.0, 20.0);
        assert!(context.intersect_segment(behind, behind + Vec3::X, 4.0).is_none());
    }

    #[test]
    fn test_obb_hit_at_center() {
        let context = Context::new(&front_camera(), &viewport_at(Vec2::new(400.0, 300.0)));
        let t = context.intersect_obb(&Mat4::IDENTITY).unwrap();
        assert!((t - 9.5).abs() < 1e-4);
    }
}
