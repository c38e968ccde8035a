//! Turntable camera and translate gizmos for immediate-mode 3D viewports
//!
//! Each frame the host builds a [`ViewportState`] from its input, lets the
//! [`Camera`] navigate, then drives a [`Gui`]:
//!
//! 1. [`Gui::begin`] snapshots camera and viewport into a [`Context`] and
//!    casts the pointer ray.
//! 2. Shapes are submitted ([`Gui::cube`], [`Gui::translate`], ...). Each one
//!    is hit tested as it is submitted and queued as a world-space gizmo.
//! 3. [`Gui::end`] resolves hover and drag state.
//! 4. [`Gui::finish_markers`] projects the gizmos into 2D markers for the
//!    host to paint.
//!
//! Object handles are any `Copy + PartialEq + Debug` value the caller picks.

pub mod camera;
pub mod constants;
pub mod context;
pub mod drag;
pub mod drawlist;
pub mod gui;
pub mod viewport;

pub use camera::{Camera, Projection};
pub use context::Context;
pub use drag::{DragHandle, DragKind, DragStart, Space, Translation, TranslationConstraint};
pub use drawlist::{DrawList, GizmoCommand, GizmoShape, MarkerCommand, MarkerShape};
pub use gui::{FrameResult, Gui, InteractionState};
pub use viewport::{ViewportFocus, ViewportState};
