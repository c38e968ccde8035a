//! Drag gestures
//!
//! A [`DragStart`] travels with a gizmo command and describes the gesture to
//! begin if the gizmo is pressed. [`crate::Gui::end`] turns it into a
//! [`DragHandle`], which lives until the primary button is released.

mod translation;

pub use translation::Translation;
pub(crate) use translation::constraint_axes;

use glam::{Mat4, Vec3};

use crate::context::Context;
use crate::drawlist::DrawList;

/// Frame of reference for constraint axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Space {
    /// Unit world axes
    #[default]
    World,
    /// Axes of the object matrix
    Local,
}

/// Which motion a translation drag allows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationConstraint {
    /// Along X
    AxisX,
    /// Along Y
    AxisY,
    /// Along Z
    AxisZ,
    /// In the plane spanned by Y and Z
    PlaneYZ,
    /// In the plane spanned by Z and X
    PlaneZX,
    /// In the plane spanned by X and Y
    PlaneXY,
    /// Parallel to the view plane
    Screen,
}

impl TranslationConstraint {
    /// Axis index for single-axis constraints
    pub fn axis_index(self) -> Option<usize> {
        match self {
            Self::AxisX => Some(0),
            Self::AxisY => Some(1),
            Self::AxisZ => Some(2),
            _ => None,
        }
    }

    /// Index of the axis normal to the plane for planar constraints
    pub fn plane_normal_index(self) -> Option<usize> {
        match self {
            Self::PlaneYZ => Some(0),
            Self::PlaneZX => Some(1),
            Self::PlaneXY => Some(2),
            _ => None,
        }
    }
}

/// How to start a drag, captured when its gizmo is submitted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragStart {
    /// Translate the object placed by `matrix`
    Translate {
        /// Object matrix at submission time
        matrix: Mat4,
        /// Frame for the constraint axes
        space: Space,
        /// Allowed motion
        constraint: TranslationConstraint,
    },
}

/// Gesture state
#[derive(Debug, Clone)]
pub enum DragKind {
    /// Translation drag
    Translation(Translation),
}

/// Active drag bound to the caller's handle
#[derive(Debug, Clone)]
pub struct DragHandle<H> {
    target: Option<H>,
    kind: DragKind,
}

impl<H: Copy> DragHandle<H> {
    /// Begin a drag from the current frame's pointer ray.
    ///
    /// `None` when the ray misses the drag plane (or there is no ray).
    pub fn begin(context: &Context, target: Option<H>, start: &DragStart) -> Option<Self> {
        let kind = match *start {
            DragStart::Translate {
                matrix,
                space,
                constraint,
            } => DragKind::Translation(Translation::begin(context, &matrix, space, constraint)?),
        };
        Some(Self { target, kind })
    }

    /// Handle of the dragged object
    pub fn target(&self) -> Option<H> {
        self.target
    }

    /// Gesture state
    pub fn kind(&self) -> &DragKind {
        &self.kind
    }

    /// Translation constraint, if this is a translation drag
    pub fn translation_constraint(&self) -> Option<TranslationConstraint> {
        match &self.kind {
            DragKind::Translation(t) => Some(t.constraint()),
        }
    }

    /// Apply this frame's pointer motion to `matrix`.
    ///
    /// Returns the world translation relative to the drag start, or `None`
    /// if the pointer ray misses the drag plane this frame.
    pub fn drag(
        &self,
        context: &Context,
        matrix: &mut Mat4,
        drawlist: &mut DrawList<H>,
    ) -> Option<Vec3> {
        match &self.kind {
            DragKind::Translation(t) => t.drag(context, matrix, drawlist),
        }
    }
}
