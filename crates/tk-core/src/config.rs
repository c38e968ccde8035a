//! Gizmo engine configuration
//!
//! Camera navigation parameters and the visual style of gizmos and drag
//! feedback. Everything here can be loaded from and saved to RON files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Camera defaults and navigation tuning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane distance
    pub near_plane: f32,
    /// Far clipping plane distance
    pub far_plane: f32,
    /// Initial distance from the eye to the gaze point
    pub gaze_distance: f32,
    /// Turntable rotation per pixel of pointer movement, in degrees
    pub degrees_per_pixel: f32,
    /// Pitch stays this far (radians) away from straight up/down
    pub pitch_margin: f32,
    /// Gaze distance multiplier for one wheel notch towards the scene
    pub dolly_in_factor: f32,
    /// Gaze distance multiplier for one wheel notch away from the scene
    pub dolly_out_factor: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 30.0,
            near_plane: 0.01,
            far_plane: 1000.0,
            gaze_distance: 5.0,
            degrees_per_pixel: 1.0,
            pitch_margin: 0.01,
            dolly_in_factor: 0.9,
            dolly_out_factor: 1.1,
        }
    }
}

/// Gizmo colors and screen-space sizes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GizmoStyle {
    /// Outline color of objects
    pub default_color: Color,
    /// Color of the hovered gizmo
    pub highlight_color: Color,
    /// X-axis handle color
    pub x_axis_color: Color,
    /// Y-axis handle color
    pub y_axis_color: Color,
    /// Z-axis handle color
    pub z_axis_color: Color,
    /// Handle color while its drag is active
    pub drag_active_color: Color,
    /// Drag origin/trail/current markers
    pub drag_feedback_color: Color,
    /// Debug ray drawn in another viewport
    pub debug_ray_color: Color,
    /// Debug hit dots drawn in another viewport
    pub debug_hit_color: Color,
    /// Arrow shaft thickness in pixels
    pub arrow_thickness: f32,
    /// Arrowhead length and half-width in pixels
    pub arrow_head_size: f32,
    /// Outline thickness for cubes and frustums in pixels
    pub outline_thickness: f32,
    /// Pointer distance in pixels that still counts as hitting a handle
    pub hit_radius_pixels: f32,
    /// Radius of the drag origin/current circles in pixels
    pub feedback_radius: f32,
    /// Radius of debug hit dots in pixels
    pub debug_hit_radius: f32,
}

impl Default for GizmoStyle {
    fn default() -> Self {
        Self::dark()
    }
}

impl GizmoStyle {
    /// Style for dark backgrounds
    pub fn dark() -> Self {
        Self {
            default_color: Color::WHITE,
            highlight_color: Color::YELLOW,
            x_axis_color: Color::RED,
            y_axis_color: Color::GREEN,
            z_axis_color: Color::BLUE,
            drag_active_color: Color::YELLOW,
            drag_feedback_color: Color::ORANGE,
            debug_ray_color: Color::YELLOW,
            debug_hit_color: Color::MAGENTA,
            arrow_thickness: 4.0,
            arrow_head_size: 10.0,
            outline_thickness: 1.0,
            hit_radius_pixels: 4.0,
            feedback_radius: 6.0,
            debug_hit_radius: 3.0,
        }
    }

    /// Style for light backgrounds
    pub fn light() -> Self {
        Self {
            default_color: Color::from_rgb(40, 40, 40),
            highlight_color: Color::ORANGE,
            drag_active_color: Color::ORANGE,
            drag_feedback_color: Color::MAGENTA,
            debug_ray_color: Color::ORANGE,
            ..Self::dark()
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GizmoConfig {
    /// Camera settings
    #[serde(default)]
    pub camera: CameraConfig,
    /// Gizmo style
    #[serde(default)]
    pub style: GizmoStyle,
}

impl GizmoConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to the dark style, keeping sizes
    pub fn apply_dark_theme(&mut self) {
        self.style = GizmoStyle {
            arrow_thickness: self.style.arrow_thickness,
            arrow_head_size: self.style.arrow_head_size,
            hit_radius_pixels: self.style.hit_radius_pixels,
            ..GizmoStyle::dark()
        };
    }

    /// Switch to the light style, keeping sizes
    pub fn apply_light_theme(&mut self) {
        self.style = GizmoStyle {
            arrow_thickness: self.style.arrow_thickness,
            arrow_head_size: self.style.arrow_head_size,
            hit_radius_pixels: self.style.hit_radius_pixels,
            ..GizmoStyle::light()
        };
    }

    /// Parse a RON document
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    /// Serialize to a pretty-printed RON document
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load configuration from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = self.to_ron_string()?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }
}

/// Configuration loading errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}
