//! Turntable camera for 3D viewports

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Quat, Vec3};
use tk_core::{CameraConfig, EuclideanTransform, Plane, Ray};
use tracing::trace;

use crate::viewport::{ViewportFocus, ViewportState};

/// Right-handed perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Near clipping plane distance
    pub near: f32,
    /// Far clipping plane distance
    pub far: f32,
    /// Width over height
    pub aspect_ratio: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl Projection {
    /// Projection with the configured field of view and clip planes
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            fov_y: config.fov_degrees.to_radians(),
            near: config.near_plane,
            far: config.far_plane,
            aspect_ratio: 1.0,
        }
    }

    /// Update aspect ratio from a viewport size
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        self.aspect_ratio = width / height;
    }

    /// Projection matrix (depth mapped to `0..1`)
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.near, self.far)
    }
}

/// Turntable camera.
///
/// The pose is a rigid transform whose local `-Z` is the viewing direction.
/// `gaze_distance` is the distance from the eye to the point the camera
/// looks at; panning speed and dolly steps are derived from it.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Perspective parameters
    pub projection: Projection,
    /// Eye pose in world space
    pub transform: EuclideanTransform,
    /// Distance from the eye to the gaze point
    pub gaze_distance: f32,
    /// Turntable rotation per pointer pixel, in degrees
    pub degrees_per_pixel: f32,
    /// Pitch stays this far (radians) away from the poles
    pub pitch_margin: f32,
    /// Gaze distance multiplier when dollying in
    pub dolly_in_factor: f32,
    /// Gaze distance multiplier when dollying out
    pub dolly_out_factor: f32,
    view_matrix: Mat4,
    projection_matrix: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&CameraConfig::default())
    }
}

impl Camera {
    /// Create a camera at the origin looking down `-Z`
    pub fn new(config: &CameraConfig) -> Self {
        let mut camera = Self {
            projection: Projection::from_config(config),
            transform: EuclideanTransform::default(),
            gaze_distance: config.gaze_distance,
            degrees_per_pixel: config.degrees_per_pixel,
            pitch_margin: config.pitch_margin,
            dolly_in_factor: config.dolly_in_factor,
            dolly_out_factor: config.dolly_out_factor,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
        };
        camera.update();
        camera
    }

    /// Place the eye and set the gaze distance
    pub fn with_eye(mut self, eye: Vec3, gaze_distance: f32) -> Self {
        self.transform.translation = eye;
        self.gaze_distance = gaze_distance;
        self.update();
        self
    }

    /// Turn towards `target` and gaze at it.
    ///
    /// The resulting orientation has no roll, the same as turntable rotation
    /// produces. A target at the eye is ignored.
    pub fn look_at(&mut self, target: Vec3) {
        let offset = self.eye() - target;
        let distance = offset.length();
        if distance < 1e-6 {
            return;
        }
        let back = offset / distance;
        let yaw = back.x.atan2(back.z);
        let limit = FRAC_PI_2 - self.pitch_margin;
        let pitch = back
            .y
            .atan2((back.x * back.x + back.z * back.z).sqrt())
            .clamp(-limit, limit);

        self.transform.rotation =
            Quat::from_rotation_y(yaw) * Quat::from_axis_angle(Vec3::NEG_X, pitch);
        self.gaze_distance = distance;
        self.update();
    }

    /// Eye position in world space
    pub fn eye(&self) -> Vec3 {
        self.transform.translation
    }

    /// Viewing direction in world space
    pub fn forward(&self) -> Vec3 {
        -self.transform.axis_z()
    }

    /// Point the camera orbits and dollies towards
    pub fn gaze_point(&self) -> Vec3 {
        self.eye() + self.forward() * self.gaze_distance
    }

    /// Rotate by pointer deltas in pixels.
    ///
    /// Yaw turns about world `+Y`, pitch is clamped short of the poles. The
    /// view-space translation is preserved, so the world origin keeps its
    /// place relative to the eye.
    pub fn yaw_pitch(&mut self, dx: f32, dy: f32) {
        let inv = self.transform.inversed();
        let back = self.transform.axis_z();

        let yaw = back.x.atan2(back.z) - (dx * self.degrees_per_pixel).to_radians();

        let limit = FRAC_PI_2 - self.pitch_margin;
        let horizontal = (back.x * back.x + back.z * back.z).sqrt();
        let pitch = (back.y.atan2(horizontal) + (dy * self.degrees_per_pixel).to_radians())
            .clamp(-limit, limit);

        let rotation = Quat::from_rotation_y(yaw) * Quat::from_axis_angle(Vec3::NEG_X, pitch);
        let view = EuclideanTransform::new(rotation.inverse(), inv.translation);
        self.transform = view.inversed();
    }

    /// Pan along the camera's right/up axes by pointer deltas in pixels.
    ///
    /// One pixel moves the eye by the world size of a pixel at the gaze
    /// distance.
    pub fn shift(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let factor = (self.projection.fov_y * 0.5).tan() * 2.0 * self.gaze_distance / viewport_height;
        let right = self.transform.axis_x();
        let up = self.transform.axis_y();
        self.transform.translation += (-right * dx + up * dy) * factor;
    }

    /// Move towards (`d > 0`) or away from (`d < 0`) the gaze point by one step
    pub fn dolly(&mut self, d: f32) {
        if d == 0.0 {
            return;
        }
        let back = self.transform.axis_z();
        let gaze = self.transform.translation - back * self.gaze_distance;
        if d > 0.0 {
            self.gaze_distance *= self.dolly_in_factor;
        } else {
            self.gaze_distance *= self.dolly_out_factor;
        }
        self.transform.translation = gaze + back * self.gaze_distance;
    }

    /// Turntable navigation from one frame of viewport input.
    ///
    /// Right drag rotates and middle drag pans while the viewport is active;
    /// the wheel dollies whenever the viewport has focus. Always finishes with
    /// [`Camera::update`].
    pub fn mouse_input_turntable(&mut self, viewport: &ViewportState) {
        self.projection
            .set_aspect_ratio(viewport.width, viewport.height);
        if viewport.focus == ViewportFocus::Active {
            if viewport.right_down {
                self.yaw_pitch(viewport.pointer_delta.x, viewport.pointer_delta.y);
            }
            if viewport.middle_down {
                self.shift(
                    viewport.pointer_delta.x,
                    viewport.pointer_delta.y,
                    viewport.height,
                );
            }
        }
        if viewport.focus != ViewportFocus::None {
            self.dolly(viewport.wheel);
        }
        self.update();
    }

    /// Recompute the cached projection and view matrices
    pub fn update(&mut self) {
        self.projection_matrix = self.projection.matrix();
        self.view_matrix = self.transform.inverse_matrix();
    }

    /// Get view matrix (as of the last [`Camera::update`])
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    /// Get projection matrix (as of the last [`Camera::update`])
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    /// World to clip space
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// Plane of the far clip distance, facing away from the eye
    pub fn far_plane(&self) -> Plane {
        let forward = self.forward();
        Plane::new(forward, self.eye() + forward * self.projection.far)
    }

    /// Frame an axis-aligned box, looking down `-Z` at its center.
    ///
    /// Clip planes are rescaled to the box diagonal. Boxes with no height are
    /// ignored.
    pub fn fit(&mut self, min: Vec3, max: Vec3) {
        let height = max.y - min.y;
        if height.abs() < 1e-4 {
            return;
        }
        let distance = height * 0.5 / (self.projection.fov_y * 0.5).tan() * 1.2;
        let center = (min + max) * 0.5;

        self.transform = EuclideanTransform::from_translation(Vec3::new(
            center.x,
            center.y,
            center.z + distance,
        ));
        self.gaze_distance = distance;

        let diagonal = (max - min).length();
        self.projection.near = diagonal * 0.01;
        self.projection.far = diagonal * 100.0;
        self.update();
    }

    /// Pointer ray through the viewport pixel under the cursor.
    ///
    /// Returns `None` when the direction is not finite (for example with an
    /// empty viewport).
    pub fn get_ray(&self, viewport: &ViewportState) -> Option<Ray> {
        let pointer = viewport.pointer_in_viewport();
        let t = (self.projection.fov_y * 0.5).tan();

        let half_h = viewport.height * 0.5;
        let y = t * (half_h - pointer.y) / half_h;
        let half_w = viewport.width * 0.5;
        let x = t * self.projection.aspect_ratio * (pointer.x - half_w) / half_w;

        let direction = (self.transform.rotation * Vec3::new(x, y, -1.0)).normalize();
        let ray = Ray::new(self.eye(), direction);
        if !ray.is_valid() {
            trace!("discarding non-finite pointer ray");
            return None;
        }
        Some(ray)
    }
}
