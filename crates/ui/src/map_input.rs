//! Hands the map what is left after the panels are drawn: the uncovered
//! screen area for view fitting and whether the keyboard is free.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::camera::{MapViewport, ScreenArea};
use rendering::egui_input_guard::MapInputGate;

use crate::alert::NotFoundAlert;

pub(crate) fn gate_for(alert: &NotFoundAlert, egui_wants_keyboard: bool) -> MapInputGate {
    MapInputGate {
        egui_wants_keyboard,
        modal_open: alert.is_open(),
    }
}

pub(crate) fn screen_area(rect: egui::Rect) -> ScreenArea {
    ScreenArea {
        min: Vec2::new(rect.min.x, rect.min.y),
        max: Vec2::new(rect.max.x, rect.max.y),
    }
}

/// Runs after every panel of the frame has been laid out.
pub(crate) fn publish_map_input(
    mut contexts: EguiContexts,
    alert: Res<NotFoundAlert>,
    mut gate: ResMut<MapInputGate>,
    mut viewport: ResMut<MapViewport>,
) {
    let ctx = contexts.ctx_mut();
    gate.set_if_neq(gate_for(&alert, ctx.wants_keyboard_input()));
    viewport.set_if_neq(MapViewport(Some(screen_area(ctx.available_rect()))));
}
