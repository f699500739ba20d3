use bevy_egui::{egui, EguiContexts};

/// Accent used for the scenario controls and the active simulated column.
pub const ACCENT_RED: egui::Color32 = egui::Color32::from_rgb(214, 48, 49);
pub const TEXT_MUTED: egui::Color32 = egui::Color32::from_rgb(120, 124, 132);
pub const PANEL_FILL: egui::Color32 = egui::Color32::from_rgb(250, 250, 251);

pub fn apply_map_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();
    style.visuals = egui::Visuals::light();

    let inactive = egui::Color32::from_rgb(232, 234, 238);
    let hover = egui::Color32::from_rgb(218, 222, 230);

    style.visuals.widgets.inactive.bg_fill = inactive;
    style.visuals.widgets.hovered.bg_fill = hover;
    style.visuals.widgets.active.bg_fill = ACCENT_RED;
    style.visuals.widgets.inactive.weak_bg_fill = inactive;
    style.visuals.widgets.hovered.weak_bg_fill = hover;
    style.visuals.widgets.active.weak_bg_fill = ACCENT_RED;

    style.visuals.window_fill = PANEL_FILL;
    style.visuals.panel_fill = PANEL_FILL;

    // Slider rails and radio dots pick this up.
    style.visuals.selection.bg_fill = ACCENT_RED;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, ACCENT_RED);

    let window_rounding = egui::CornerRadius::same(6);
    let widget_rounding = egui::CornerRadius::same(4);

    style.visuals.window_corner_radius = window_rounding;
    style.visuals.widgets.noninteractive.corner_radius = widget_rounding;
    style.visuals.widgets.inactive.corner_radius = widget_rounding;
    style.visuals.widgets.hovered.corner_radius = widget_rounding;
    style.visuals.widgets.active.corner_radius = widget_rounding;

    ctx.set_style(style);
}
