//! Gizmo geometry constants

/// World length of translate gizmo arrows
pub const ARROW_LENGTH: f32 = 1.0;
