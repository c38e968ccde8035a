//! Gizmo and marker queues
//!
//! Gizmos are world-space shapes submitted during a frame. [`DrawList::to_markers`]
//! projects them into markers, the 2D primitives a host rasterizes in
//! viewport pixels (origin top-left, Y down).

use glam::{Mat4, Vec2, Vec3};
use tk_core::constants::cube;
use tk_core::{Color, GizmoStyle};

use crate::camera::Camera;
use crate::drag::DragStart;
use crate::viewport::ViewportState;

/// World-space shape awaiting projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GizmoShape {
    /// Closed quad outline
    Rect {
        /// Corners in drawing order
        points: [Vec3; 4],
    },
    /// Unit cube `[-0.5, 0.5]³` placed by a matrix
    Cube {
        /// Object matrix
        matrix: Mat4,
    },
    /// View volume of another camera
    Frustum {
        /// World to clip space of the visualized camera
        view_projection: Mat4,
        /// Clip-space depth of the near slice
        near: f32,
        /// Clip-space depth of the far slice
        far: f32,
    },
    /// Thick line with an arrowhead at `p1`
    Arrow {
        /// Tail
        p0: Vec3,
        /// Head
        p1: Vec3,
    },
    /// Thin line
    Line {
        /// Start
        p0: Vec3,
        /// End
        p1: Vec3,
    },
}

/// A gizmo with its color, owner and hit state
#[derive(Debug, Clone)]
pub struct GizmoCommand<H> {
    /// Shape to project
    pub shape: GizmoShape,
    /// Outline or fill color
    pub color: Color,
    /// Caller's handle for the object this gizmo belongs to
    pub handle: Option<H>,
    /// Distance from the eye where the pointer ray hit this gizmo
    pub ray_hit: Option<f32>,
    /// Drag to start when this gizmo is pressed
    pub drag: Option<DragStart>,
}

impl<H> GizmoCommand<H> {
    /// Decoration with no handle, hit or drag
    pub fn new(shape: GizmoShape, color: Color) -> Self {
        Self {
            shape,
            color,
            handle: None,
            ray_hit: None,
            drag: None,
        }
    }
}

/// Screen-space primitive
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerShape {
    /// Straight line
    Line {
        /// Start
        p0: Vec2,
        /// End
        p1: Vec2,
    },
    /// Triangle
    Triangle {
        /// First corner
        p0: Vec2,
        /// Second corner
        p1: Vec2,
        /// Third corner
        p2: Vec2,
    },
    /// Circle
    Circle {
        /// Center
        center: Vec2,
        /// Radius in pixels
        radius: f32,
    },
    /// Connected line strip, or a convex polygon when filled
    Polyline {
        /// Vertices in order
        points: Vec<Vec2>,
    },
    /// Text anchored at its top-left corner
    Text {
        /// Anchor
        pos: Vec2,
        /// Content
        label: String,
    },
}

/// A marker with its paint
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerCommand {
    /// Primitive
    pub shape: MarkerShape,
    /// Stroke or fill color
    pub color: Color,
    /// Stroke width in pixels; `None` fills the shape
    pub thickness: Option<f32>,
}

/// Per-frame gizmo and marker queues
#[derive(Debug, Clone)]
pub struct DrawList<H> {
    pub(crate) gizmos: Vec<GizmoCommand<H>>,
    markers: Vec<MarkerCommand>,
    style: GizmoStyle,
}

impl<H> Default for DrawList<H> {
    fn default() -> Self {
        Self::new(GizmoStyle::default())
    }
}

impl<H> DrawList<H> {
    /// Empty draw list
    pub fn new(style: GizmoStyle) -> Self {
        Self {
            gizmos: Vec::new(),
            markers: Vec::new(),
            style,
        }
    }

    /// Style used for projected gizmos
    pub fn style(&self) -> &GizmoStyle {
        &self.style
    }

    /// Replace the style
    pub fn set_style(&mut self, style: GizmoStyle) {
        self.style = style;
    }

    /// Empty both queues
    pub fn clear(&mut self) {
        self.gizmos.clear();
        self.markers.clear();
    }

    /// Queue a world-space gizmo
    pub fn push_gizmo(&mut self, gizmo: GizmoCommand<H>) {
        self.gizmos.push(gizmo);
    }

    /// Gizmos not yet projected
    pub fn gizmos(&self) -> &[GizmoCommand<H>] {
        &self.gizmos
    }

    /// Markers produced so far this frame
    pub fn markers(&self) -> &[MarkerCommand] {
        &self.markers
    }

    /// Take the markers, leaving the queue empty
    pub fn take_markers(&mut self) -> Vec<MarkerCommand> {
        std::mem::take(&mut self.markers)
    }

    fn push_marker(&mut self, shape: MarkerShape, color: Color, thickness: Option<f32>) {
        self.markers.push(MarkerCommand {
            shape,
            color,
            thickness,
        });
    }

    /// Line with a stroke width
    pub fn add_line(&mut self, p0: Vec2, p1: Vec2, color: Color, thickness: f32) {
        self.push_marker(MarkerShape::Line { p0, p1 }, color, Some(thickness));
    }

    /// Filled triangle
    pub fn add_triangle_filled(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, color: Color) {
        self.push_marker(MarkerShape::Triangle { p0, p1, p2 }, color, None);
    }

    /// Circle outline, 1 px wide
    pub fn add_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push_marker(MarkerShape::Circle { center, radius }, color, Some(1.0));
    }

    /// Filled disc
    pub fn add_circle_filled(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push_marker(MarkerShape::Circle { center, radius }, color, None);
    }

    /// Open line strip
    pub fn add_polyline(&mut self, points: &[Vec2], color: Color, thickness: f32) {
        self.push_marker(
            MarkerShape::Polyline {
                points: points.to_vec(),
            },
            color,
            Some(thickness),
        );
    }

    /// Filled convex polygon
    pub fn add_convex_poly_filled(&mut self, points: &[Vec2], color: Color) {
        self.push_marker(
            MarkerShape::Polyline {
                points: points.to_vec(),
            },
            color,
            None,
        );
    }

    /// Text label
    pub fn add_text(&mut self, pos: Vec2, label: impl Into<String>, color: Color) {
        self.push_marker(
            MarkerShape::Text {
                pos,
                label: label.into(),
            },
            color,
            None,
        );
    }

    /// Project and drain the gizmo queue into markers.
    ///
    /// Degenerate projections (points on the eye plane, singular matrices)
    /// produce non-finite or zero-area markers rather than failing.
    pub fn to_markers(&mut self, camera: &Camera, viewport: &ViewportState) {
        let view_projection = camera.view_projection();
        let project = |p: Vec3| viewport.clip_to_viewport(view_projection * p.extend(1.0));

        for gizmo in std::mem::take(&mut self.gizmos) {
            match gizmo.shape {
                GizmoShape::Rect { points } => self.rect(points.map(project), gizmo.color),
                GizmoShape::Cube { matrix } => {
                    let corners = cube::CORNERS.map(|c| project(matrix.transform_point3(c)));
                    self.faces(&corners, gizmo.color);
                }
                GizmoShape::Frustum {
                    view_projection: frustum,
                    near,
                    far,
                } => {
                    let inverse = frustum.inverse();
                    let corners = cube::CORNERS.map(|c| {
                        let depth = if c.z > 0.0 { far } else { near };
                        let clip = Vec3::new(c.x * 2.0, c.y * 2.0, depth);
                        project(inverse.project_point3(clip))
                    });
                    self.faces(&corners, gizmo.color);
                }
                GizmoShape::Arrow { p0, p1 } => {
                    let s = project(p0);
                    let e = project(p1);
                    let thickness = self.style.arrow_thickness;
                    self.add_line(s, e, gizmo.color, thickness);
                    let [w0, w1] = arrow_wings(s, e, self.style.arrow_head_size);
                    self.add_triangle_filled(e, w0, w1, gizmo.color);
                }
                GizmoShape::Line { p0, p1 } => {
                    let thickness = self.style.outline_thickness;
                    self.add_line(project(p0), project(p1), gizmo.color, thickness);
                }
            }
        }
    }

    fn rect(&mut self, p: [Vec2; 4], color: Color) {
        let closed = [p[0], p[1], p[2], p[3], p[0]];
        let thickness = self.style.outline_thickness;
        self.add_polyline(&closed, color, thickness);
    }

    fn faces(&mut self, corners: &[Vec2; 8], color: Color) {
        for [i0, i1, i2, i3] in cube::FACES {
            self.rect([corners[i0], corners[i1], corners[i2], corners[i3]], color);
        }
    }
}

/// Arrowhead wing tips for a screen-space arrow from `s` to `e`.
///
/// The wings sit `size` pixels back from the head, `size` pixels to either
/// side of the shaft.
pub fn arrow_wings(s: Vec2, e: Vec2, size: f32) -> [Vec2; 2] {
    let dir = (e - s).normalize_or_zero() * size;
    let base = e - dir;
    let side = dir.perp();
    [base + side, base - side]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::ViewportFocus;

    fn setup() -> (Camera, ViewportState) {
        let mut camera = Camera::default().with_eye(Vec3::new(0.0, 1.0, 10.0), 10.0);
        camera.projection.set_aspect_ratio(800.0, 600.0);
        camera.update();
        let viewport = ViewportState::new(0.0, 0.0, 800.0, 600.0).with_focus(ViewportFocus::Hover);
        (camera, viewport)
    }

    #[test]
    fn test_cube_projects_six_closed_faces() {
        let (camera, viewport) = setup();
        let mut list = DrawList::<u32>::default();
        list.push_gizmo(GizmoCommand::new(
            GizmoShape::Cube {
                matrix: Mat4::IDENTITY,
            },
            Color::WHITE,
        ));
        list.to_markers(&camera, &viewport);

        assert!(list.gizmos().is_empty());
        assert_eq!(list.markers().len(), 6);
        for marker in list.markers() {
            match &marker.shape {
                MarkerShape::Polyline { points } => {
                    assert_eq!(points.len(), 5);
                    assert_eq!(points[0], points[4]);
                }
                other => panic!("unexpected marker {other:?}"),
            }
            assert_eq!(marker.thickness, Some(1.0));
        }
    }

    #[test]
    fn test_arrow_projects_line_and_head() {
        let (camera, viewport) = setup();
        let mut list = DrawList::<u32>::default();
        list.push_gizmo(GizmoCommand::new(
            GizmoShape::Arrow {
                p0: Vec3::ZERO,
                p1: Vec3::X,
            },
            Color::RED,
        ));
        list.to_markers(&camera, &viewport);

        let markers = list.take_markers();
        assert_eq!(markers.len(), 2);
        assert!(matches!(markers[0].shape, MarkerShape::Line { .. }));
        assert_eq!(markers[0].thickness, Some(4.0));
        match markers[1].shape {
            MarkerShape::Triangle { p0, .. } => {
                let head = viewport.clip_to_viewport(camera.view_projection() * Vec3::X.extend(1.0));
                assert!(p0.abs_diff_eq(head, 1e-4));
            }
            ref other => panic!("unexpected marker {other:?}"),
        }
        assert_eq!(markers[1].thickness, None);
        assert!(list.markers().is_empty());
    }

    #[test]
    fn test_degenerate_frustum_drains_queue() {
        let (camera, viewport) = setup();
        let mut list = DrawList::<u32>::default();
        list.push_gizmo(GizmoCommand::new(
            GizmoShape::Frustum {
                view_projection: camera.view_projection(),
                near: 0.5,
                far: 0.5,
            },
            Color::WHITE,
        ));
        list.push_gizmo(GizmoCommand::new(
            GizmoShape::Frustum {
                view_projection: Mat4::ZERO,
                near: 0.0,
                far: 1.0,
            },
            Color::WHITE,
        ));
        list.to_markers(&camera, &viewport);
        assert!(list.gizmos().is_empty());
        assert_eq!(list.markers().len(), 12);
    }

    #[test]
    fn test_arrow_wings() {
        let [w0, w1] = arrow_wings(Vec2::ZERO, Vec2::new(100.0, 0.0), 10.0);
        assert_eq!(w0, Vec2::new(90.0, 10.0));
        assert_eq!(w1, Vec2::new(90.0, -10.0));
    }

    #[test]
    fn test_clear_empties_both_queues() {
        let mut list = DrawList::<u32>::default();
        list.add_circle(Vec2::ZERO, 3.0, Color::WHITE);
        list.push_gizmo(GizmoCommand::new(
            GizmoShape::Line {
                p0: Vec3::ZERO,
                p1: Vec3::Y,
            },
            Color::WHITE,
        ));
        list.clear();
        assert!(list.gizmos().is_empty());
        assert!(list.markers().is_empty());
    }
}
