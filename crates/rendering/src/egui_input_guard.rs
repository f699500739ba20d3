//! Egui input guard: keeps clicks, drags and keys aimed at the side panel,
//! search box or legend from also reaching the map underneath.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

/// Returns `true` when egui wants the pointer, i.e. the cursor is over an
/// egui panel or egui is handling a drag/click. Map input systems
/// early-return when this is `true`.
#[inline]
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    let ctx = contexts.ctx_mut();
    ctx.wants_pointer_input() || ctx.is_pointer_over_area()
}

/// Keyboard ownership for the current frame, written by the UI after its
/// panels are drawn and read by the map's key bindings.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MapInputGate {
    /// A text field (the search box) has keyboard focus.
    pub egui_wants_keyboard: bool,
    /// A modal notice is open; the map takes no input until it is dismissed.
    pub modal_open: bool,
}

impl MapInputGate {
    pub fn keyboard_free(&self) -> bool {
        !self.egui_wants_keyboard && !self.modal_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_is_free_only_without_focus_or_modal() {
        assert!(MapInputGate::default().keyboard_free());
        let typing = MapInputGate {
            egui_wants_keyboard: true,
            ..default()
        };
        assert!(!typing.keyboard_free());
        let modal = MapInputGate {
            modal_open: true,
            ..default()
        };
        assert!(!modal.keyboard_free());
    }
}
