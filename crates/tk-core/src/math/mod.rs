//! Linear algebra helpers on top of `glam`
//!
//! - [`Ray`] and [`Plane`] for picking and drag constraints
//! - [`EuclideanTransform`] for rigid (unscaled) poses
//! - [`intersect_triangle`] / [`intersect_obb`] for hit testing

mod collision;
mod ray;
mod transform;

pub use collision::{intersect_obb, intersect_triangle};
pub use ray::{Plane, Ray};
pub use transform::EuclideanTransform;
