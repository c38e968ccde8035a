//! egui host for the turntable gizmo kit

mod app;
pub mod input;
pub mod paint;

pub use app::GizmoDemoApp;
