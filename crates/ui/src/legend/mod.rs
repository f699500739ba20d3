//! Legend for the active metric, bottom-right of the map.
//!
//! Rows come straight from the ramp table the map is styled with: one
//! swatch per bin, labelled `lower–next`, or `lower+` for the top bin.


use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::color_ramps::{ramp_for, LegendRow};
use rendering::overlay::OverlayState;
use scenario::metric::Metric;

/// Margin from the map corner.
const MARGIN: f32 = 12.0;
const SWATCH: f32 = 14.0;

pub(crate) fn legend_for(metric: Metric) -> (&'static str, Vec<LegendRow>) {
    (metric.legend_title(), ramp_for(metric).legend_rows())
}

pub(crate) fn legend_ui(mut contexts: EguiContexts, overlay: Res<OverlayState>) {
    let ctx = contexts.ctx_mut();
    let (title, rows) = legend_for(overlay.metric);
    // Side and top panels have already claimed their space this frame.
    let map_rect = ctx.available_rect();

    egui::Area::new(egui::Id::new("map_legend"))
        .pivot(egui::Align2::RIGHT_BOTTOM)
        .fixed_pos(map_rect.right_bottom() - egui::vec2(MARGIN, MARGIN))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(egui::Color32::from_rgba_unmultiplied(255, 255, 255, 230))
                .corner_radius(egui::CornerRadius::same(4))
                .inner_margin(egui::Margin::same(8))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(title).strong().size(9.0));
                    ui.add_space(4.0);
                    for row in &rows {
                        ui.horizontal(|ui| {
                            let (rect, _) = ui.allocate_exact_size(
                                egui::vec2(SWATCH, SWATCH),
                                egui::Sense::hover(),
                            );
                            let [r, g, b] = row.rgb;
                            ui.painter()
                                .rect_filled(rect, 1.0, egui::Color32::from_rgb(r, g, b));
                            ui.label(egui::RichText::new(&row.label).size(11.0));
                        });
                    }
                });
        });
}
