//! Per-frame viewport input

use glam::{Vec2, Vec4};

/// How the host's pointer currently relates to a viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewportFocus {
    /// Pointer input belongs to something else
    #[default]
    None,
    /// Pointer is over the viewport but not captured
    Hover,
    /// Viewport captured the pointer (a button went down on it)
    Active,
}

/// Snapshot of pointer and viewport input for one frame.
///
/// `x`/`y` is the viewport's top-left corner and `pointer` is in the same host
/// coordinates. Everything the gizmo engine produces is relative to the
/// viewport's top-left corner, Y down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportState {
    /// Pointer capture state
    pub focus: ViewportFocus,
    /// Left edge in host coordinates
    pub x: f32,
    /// Top edge in host coordinates
    pub y: f32,
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
    /// Pointer position in host coordinates
    pub pointer: Vec2,
    /// Pointer movement since the previous frame
    pub pointer_delta: Vec2,
    /// Primary button held
    pub left_down: bool,
    /// Secondary button held
    pub right_down: bool,
    /// Middle button held
    pub middle_down: bool,
    /// Wheel notches this frame, positive towards the scene
    pub wheel: f32,
}

impl ViewportState {
    /// Viewport rectangle with no focus and no buttons held
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            ..Default::default()
        }
    }

    /// Same state with a different focus
    pub fn with_focus(mut self, focus: ViewportFocus) -> Self {
        self.focus = focus;
        self
    }

    /// Same state with the pointer at `pointer` (host coordinates)
    pub fn with_pointer(mut self, pointer: Vec2) -> Self {
        self.pointer = pointer;
        self
    }

    /// Top-left corner in host coordinates
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Width and height
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Pointer relative to the viewport's top-left corner
    pub fn pointer_in_viewport(&self) -> Vec2 {
        self.pointer - self.origin()
    }

    /// Whether the pointer lies inside the viewport rectangle
    pub fn contains_pointer(&self) -> bool {
        let p = self.pointer_in_viewport();
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// Clip-space position to viewport pixels (Y flipped)
    pub fn clip_to_viewport(&self, clip: Vec4) -> Vec2 {
        let x = (clip.x / clip.w) * 0.5 + 0.5;
        let y = (-clip.y / clip.w) * 0.5 + 0.5;
        Vec2::new(x * self.width, y * self.height)
    }

    /// Closest point on the 2D segment `a`-`b` to the pointer.
    ///
    /// `None` when the pointer projects outside the segment or lies farther
    /// than `pixel_radius` from it.
    pub fn nearest_on_segment(&self, a: Vec2, b: Vec2, pixel_radius: f32) -> Option<Vec2> {
        let p = self.pointer_in_viewport();
        if (p - b).dot(a - b) < 0.0 {
            return None;
        }
        let ab = (b - a).normalize_or_zero();
        let d = (p - a).dot(ab);
        if d < 0.0 {
            return None;
        }
        let x = a + ab * d;
        if (p - x).length() > pixel_radius {
            return None;
        }
        Some(x)
    }
}
