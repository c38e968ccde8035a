//! Turntable gizmo kit core types
//!
//! Geometry primitives, intersection tests, colors and configuration shared
//! by the gizmo engine and its hosts.

pub mod color;
pub mod config;
pub mod constants;
pub mod math;

pub use color::Color;
pub use config::{CameraConfig, ConfigError, GizmoConfig, GizmoStyle};
pub use math::{EuclideanTransform, Plane, Ray, intersect_obb, intersect_triangle};

/// Re-exported so downstream crates agree on the vector types.
pub use glam;
