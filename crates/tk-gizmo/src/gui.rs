//! Immediate-mode gizmo frame
//!
//! A frame is `begin`, any number of shape submissions, then `end`:
//!
//! ```ignore
//! gui.begin(&camera, &viewport);
//! for (id, matrix) in &objects {
//!     gui.cube(*id, *matrix);
//! }
//! let result = gui.end();
//! let markers = gui.finish_markers();
//! ```

use glam::{Mat4, Vec3};
use tk_core::{Color, GizmoStyle, Plane, Ray};
use tracing::{debug, trace};

use crate::camera::Camera;
use crate::constants::ARROW_LENGTH;
use crate::context::Context;
use crate::drag::{DragHandle, DragStart, Space, TranslationConstraint};
use crate::drawlist::{DrawList, GizmoCommand, GizmoShape, MarkerCommand};
use crate::viewport::ViewportState;

/// Outcome of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameResult<H> {
    /// Handle of the nearest gizmo under the pointer; `None` while dragging
    pub closest: Option<H>,
    /// A drag is active
    pub dragging: bool,
}

impl<H> Default for FrameResult<H> {
    fn default() -> Self {
        Self {
            closest: None,
            dragging: false,
        }
    }
}

/// Pointer interaction across frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState<H> {
    /// Nothing under the pointer
    #[default]
    Idle,
    /// A gizmo is under the pointer
    Hovering(Option<H>),
    /// A drag is active on the given target
    Dragging(Option<H>),
}

/// Gizmo frame driver for one viewport.
///
/// `H` is the caller's object handle; it only needs to be copied and
/// compared.
#[derive(Debug, Clone)]
pub struct Gui<H> {
    context: Context,
    drawlist: DrawList<H>,
    hits: Vec<f32>,
    drag: Option<DragHandle<H>>,
    state: InteractionState<H>,
    style: GizmoStyle,
}

impl<H: Copy + PartialEq + std::fmt::Debug> Default for Gui<H> {
    fn default() -> Self {
        Self::new(GizmoStyle::default())
    }
}

impl<H: Copy + PartialEq + std::fmt::Debug> Gui<H> {
    /// Create a gui with the given style
    pub fn new(style: GizmoStyle) -> Self {
        Self {
            context: Context::default(),
            drawlist: DrawList::new(style.clone()),
            hits: Vec::new(),
            drag: None,
            state: InteractionState::Idle,
            style,
        }
    }

    /// Style for gizmo colors and sizes
    pub fn style(&self) -> &GizmoStyle {
        &self.style
    }

    /// Replace the style
    pub fn set_style(&mut self, style: GizmoStyle) {
        self.drawlist.set_style(style.clone());
        self.style = style;
    }

    /// Start a frame. Clears the draw list and hits and rebuilds the context.
    pub fn begin(&mut self, camera: &Camera, viewport: &ViewportState) {
        self.hits.clear();
        self.drawlist.clear();
        self.context = Context::new(camera, viewport);
    }

    /// Resolve hover and drag for this frame.
    ///
    /// An active drag continues while the primary button is held and is
    /// dropped on release. Otherwise the nearest hit gizmo (first submitted
    /// wins ties) is highlighted, and pressing the primary button on it starts
    /// its drag if it has one.
    pub fn end(&mut self) -> FrameResult<H> {
        let mut result = FrameResult::default();
        let left_down = self.context.viewport.left_down;

        if let Some(drag) = &self.drag {
            if left_down {
                result.dragging = true;
                self.state = InteractionState::Dragging(drag.target());
                return result;
            }
            debug!(target_handle = ?drag.target(), "drag end");
            self.drag = None;
        }

        let mut closest = f32::INFINITY;
        let mut nearest = None;
        for (i, gizmo) in self.drawlist.gizmos.iter().enumerate() {
            if let Some(hit) = gizmo.ray_hit {
                if hit < closest {
                    closest = hit;
                    nearest = Some(i);
                }
            }
        }

        let state = match nearest {
            Some(i) => {
                let gizmo = &mut self.drawlist.gizmos[i];
                gizmo.color = self.style.highlight_color;
                result.closest = gizmo.handle;

                let started = match (&gizmo.drag, left_down) {
                    (Some(start), true) => DragHandle::begin(&self.context, gizmo.handle, start),
                    _ => None,
                };
                match started {
                    Some(drag) => {
                        debug!(target_handle = ?drag.target(), "drag begin");
                        let state = InteractionState::Dragging(drag.target());
                        self.drag = Some(drag);
                        result.dragging = true;
                        state
                    }
                    None => InteractionState::Hovering(gizmo.handle),
                }
            }
            None => InteractionState::Idle,
        };

        if state != self.state {
            if let InteractionState::Hovering(handle) = state {
                debug!(?handle, "hover");
            }
        }
        self.state = state;
        result
    }

    /// Submit a manipulable unit cube placed by `matrix`
    pub fn cube(&mut self, handle: H, matrix: Mat4) {
        let hit = self.context.intersect_obb(&matrix);
        self.push_hit_gizmo(
            GizmoShape::Cube { matrix },
            self.style.default_color,
            Some(handle),
            hit,
            None,
        );
    }

    /// Submit an arrow from `s` to `e`, hit tested against the pointer
    pub fn arrow(
        &mut self,
        s: Vec3,
        e: Vec3,
        color: Color,
        handle: Option<H>,
        drag: Option<DragStart>,
    ) {
        let hit = self
            .context
            .intersect_segment(s, e, self.style.hit_radius_pixels);
        self.push_hit_gizmo(GizmoShape::Arrow { p0: s, p1: e }, color, handle, hit, drag);
    }

    /// Outline the view volume between two clip-space depths
    pub fn frustum(&mut self, view_projection: Mat4, near: f32, far: f32) {
        self.drawlist.push_gizmo(GizmoCommand::new(
            GizmoShape::Frustum {
                view_projection,
                near,
                far,
            },
            self.style.default_color,
        ));
    }

    /// Draw `ray` up to where it meets `plane`
    pub fn ray(&mut self, ray: &Ray, plane: &Plane) {
        match ray.intersect_plane(plane) {
            Some(t) => self.drawlist.push_gizmo(GizmoCommand::new(
                GizmoShape::Line {
                    p0: ray.origin,
                    p1: ray.point(t),
                },
                self.style.debug_ray_color,
            )),
            None => trace!("debug ray parallel to its end plane"),
        }
    }

    /// Visualize another viewport's camera frustum, pointer ray and hits
    pub fn debug<O>(&mut self, other: &Gui<O>) {
        let camera = &other.context.camera;
        self.frustum(camera.view_projection(), 0.0, 1.0);

        if let Some(ray) = &other.context.ray {
            self.ray(ray, &camera.far_plane());

            let radius = self.style.debug_hit_radius;
            for &hit in &other.hits {
                let p = self.context.world_to_viewport(ray.point(hit));
                self.drawlist.add_circle(p, radius, self.style.debug_hit_color);
                self.drawlist.add_circle_filled(p, radius - 1.0, Color::BLACK);
            }
        }
    }

    /// Translate gizmo bound to `matrix`.
    ///
    /// While a drag on `handle` is active the matrix follows the pointer and
    /// `true` is returned. Otherwise three axis arrows are submitted, each
    /// starting a constrained translation when pressed.
    pub fn translate(&mut self, handle: H, space: Space, matrix: &mut Mat4) -> bool {
        let mut active = None;
        if let Some(drag) = &self.drag {
            if drag.target() == Some(handle) && self.context.viewport.left_down {
                drag.drag(&self.context, matrix, &mut self.drawlist);
                active = drag.translation_constraint();
            }
        }
        let dragging = active.is_some();

        let origin = matrix.w_axis.truncate();
        let axes = crate::drag::constraint_axes(matrix, space);
        let constraints = [
            TranslationConstraint::AxisX,
            TranslationConstraint::AxisY,
            TranslationConstraint::AxisZ,
        ];
        let colors = [
            self.style.x_axis_color,
            self.style.y_axis_color,
            self.style.z_axis_color,
        ];

        for ((axis, constraint), color) in axes.into_iter().zip(constraints).zip(colors) {
            let end = origin + axis * ARROW_LENGTH;
            if dragging {
                let color = if active == Some(constraint) {
                    self.style.drag_active_color
                } else {
                    color
                };
                self.drawlist
                    .push_gizmo(GizmoCommand::new(GizmoShape::Arrow { p0: origin, p1: end }, color));
            } else {
                let start = DragStart::Translate {
                    matrix: *matrix,
                    space,
                    constraint,
                };
                self.arrow(origin, end, color, Some(handle), Some(start));
            }
        }
        dragging
    }

    /// Interaction state as of the last [`Gui::end`]
    pub fn state(&self) -> InteractionState<H> {
        self.state
    }

    /// Active drag, if any
    pub fn active_drag(&self) -> Option<&DragHandle<H>> {
        self.drag.as_ref()
    }

    /// Per-frame context
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Ray hit distances recorded this frame, in submission order
    pub fn hits(&self) -> &[f32] {
        &self.hits
    }

    /// Draw list
    pub fn draw_list(&self) -> &DrawList<H> {
        &self.drawlist
    }

    /// Mutable draw list, for custom markers
    pub fn draw_list_mut(&mut self) -> &mut DrawList<H> {
        &mut self.drawlist
    }

    /// Project the queued gizmos with this frame's camera and hand out all
    /// markers
    pub fn finish_markers(&mut self) -> Vec<MarkerCommand> {
        self.drawlist
            .to_markers(&self.context.camera, &self.context.viewport);
        self.drawlist.take_markers()
    }

    fn push_hit_gizmo(
        &mut self,
        shape: GizmoShape,
        color: Color,
        handle: Option<H>,
        ray_hit: Option<f32>,
        drag: Option<DragStart>,
    ) {
        if let Some(hit) = ray_hit {
            self.hits.push(hit);
        }
        self.drawlist.push_gizmo(GizmoCommand {
            shape,
            color,
            handle,
            ray_hit,
            drag,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::ViewportFocus;
    use glam::Vec2;

    fn camera() -> Camera {
        let mut camera = Camera::default().with_eye(Vec3::new(0.0, 1.0, 10.0), 10.0);
        camera.projection.set_aspect_ratio(800.0, 600.0);
        camera.look_at(Vec3::ZERO);
        camera
    }

    fn viewport(pointer: Vec2, left_down: bool) -> ViewportState {
        let mut viewport = ViewportState::new(0.0, 0.0, 800.0, 600.0)
            .with_focus(ViewportFocus::Active)
            .with_pointer(pointer);
        viewport.left_down = left_down;
        viewport
    }

    #[test]
    fn test_tie_break_first_submitted_wins() {
        let mut gui = Gui::<u32>::default();
        gui.begin(&camera(), &viewport(Vec2::new(400.0, 300.0), false));
        gui.cube(1, Mat4::IDENTITY);
        gui.cube(2, Mat4::IDENTITY);
        let result = gui.end();

        assert_eq!(result.closest, Some(1));
        assert!(!result.dragging);
        assert_eq!(gui.state(), InteractionState::Hovering(Some(1)));
        assert_eq!(gui.hits().len(), 2);
        assert_eq!(gui.draw_list().gizmos()[0].color, gui.style().highlight_color);
        assert_eq!(gui.draw_list().gizmos()[1].color, gui.style().default_color);
    }

    #[test]
    fn test_nearer_cube_wins() {
        let mut gui = Gui::<u32>::default();
        gui.begin(&camera(), &viewport(Vec2::new(400.0, 300.0), false));
        gui.cube(1, Mat4::IDENTITY);
        gui.cube(2, Mat4::from_translation(Vec3::new(0.0, 0.0, 2.0)));
        assert_eq!(gui.end().closest, Some(2));
    }

    #[test]
    fn test_cube_without_drag_never_drags() {
        let mut gui = Gui::<u32>::default();
        gui.begin(&camera(), &viewport(Vec2::new(400.0, 300.0), true));
        gui.cube(7, Mat4::IDENTITY);
        let result = gui.end();
        assert_eq!(result.closest, Some(7));
        assert!(!result.dragging);
        assert!(gui.active_drag().is_none());
    }

    #[test]
    fn test_miss_is_idle() {
        let mut gui = Gui::<u32>::default();
        gui.begin(&camera(), &viewport(Vec2::new(10.0, 10.0), false));
        gui.cube(1, Mat4::IDENTITY);
        assert_eq!(gui.end(), FrameResult::default());
        assert_eq!(gui.state(), InteractionState::Idle);
    }

    #[test]
    fn test_translate_submits_three_arrows() {
        let mut gui = Gui::<u32>::default();
        gui.begin(&camera(), &viewport(Vec2::new(10.0, 10.0), false));
        let mut matrix = Mat4::IDENTITY;
        assert!(!gui.translate(1, Space::World, &mut matrix));
        let gizmos = gui.draw_list().gizmos();
        assert_eq!(gizmos.len(), 3);
        assert!(gizmos.iter().all(|g| g.drag.is_some()));
        assert!(matches!(gizmos[1].shape, GizmoShape::Arrow { p1, .. } if p1 == Vec3::Y));
    }

    #[test]
    fn test_debug_draws_other_frustum_and_ray() {
        let mut main = Gui::<u32>::default();
        main.begin(&camera(), &viewport(Vec2::new(400.0, 300.0), false));
        main.cube(1, Mat4::IDENTITY);
        main.end();

        let debug_camera = Camera::default().with_eye(Vec3::new(0.0, 1.0, 20.0), 20.0);
        let mut debug = Gui::<u32>::default();
        debug.begin(&debug_camera, &viewport(Vec2::ZERO, false).with_focus(ViewportFocus::None));
        debug.debug(&main);

        let gizmos = debug.draw_list().gizmos();
        assert!(matches!(gizmos[0].shape, GizmoShape::Frustum { .. }));
        assert!(matches!(gizmos[1].shape, GizmoShape::Line { .. }));
        // outline and fill per hit
        assert_eq!(debug.draw_list().markers().len(), 2);

        let markers = debug.finish_markers();
        assert_eq!(markers.len(), 2 + 6 + 1);
        assert!(debug.draw_list().gizmos().is_empty());
    }
}
