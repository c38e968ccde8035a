//! egui input to [`ViewportState`]

use glam::Vec2;
use tk_gizmo::{ViewportFocus, ViewportState};

/// Build this frame's viewport input for the widget behind `response`.
///
/// The widget must sense clicks and drags. Focus is `Active` while a button
/// that went down on the widget is held, `Hover` while the pointer is over
/// it, and `None` otherwise.
pub fn viewport_state(ui: &egui::Ui, response: &egui::Response) -> ViewportState {
    let rect = response.rect;
    let focus = if response.is_pointer_button_down_on() {
        ViewportFocus::Active
    } else if response.hovered() {
        ViewportFocus::Hover
    } else {
        ViewportFocus::None
    };

    let mut state = ViewportState::new(rect.min.x, rect.min.y, rect.width(), rect.height())
        .with_focus(focus);

    ui.input(|i| {
        if let Some(pos) = i.pointer.latest_pos() {
            state.pointer = Vec2::new(pos.x, pos.y);
        }
        let delta = i.pointer.delta();
        state.pointer_delta = Vec2::new(delta.x, delta.y);
        state.left_down = i.pointer.primary_down();
        state.right_down = i.pointer.secondary_down();
        state.middle_down = i.pointer.middle_down();
        // one dolly step per wheel event
        if focus != ViewportFocus::None {
            state.wheel = i.raw_scroll_delta.y;
        }
    });

    state
}
