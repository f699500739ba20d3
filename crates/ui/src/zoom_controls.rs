use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::camera::{MapView, ViewRequest, ZoomLimits};
use scenario::config::MapConfig;

const MARGIN: f32 = 12.0;
const BUTTON: f32 = 30.0;

/// `+` / `−` buttons in the bottom-left map corner, one zoom level per click.
pub(crate) fn zoom_controls_ui(
    mut contexts: EguiContexts,
    view: Res<MapView>,
    config: Res<MapConfig>,
    mut requests: EventWriter<ViewRequest>,
) {
    let ctx = contexts.ctx_mut();
    let map_rect = ctx.available_rect();
    let limits = ZoomLimits::at_latitude(config.center_lat);

    egui::Area::new(egui::Id::new("zoom_controls"))
        .pivot(egui::Align2::LEFT_BOTTOM)
        .fixed_pos(map_rect.left_bottom() + egui::vec2(MARGIN, -MARGIN))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.spacing_mut().item_spacing.y = 2.0;
            let size = egui::vec2(BUTTON, BUTTON);
            let zoom_in = ui.add_enabled(
                view.meters_per_pixel > limits.min_mpp,
                egui::Button::new(egui::RichText::new("+").strong()).min_size(size),
            );
            if zoom_in.clicked() {
                requests.send(ViewRequest::ZoomBy(1.0));
            }
            let zoom_out = ui.add_enabled(
                view.meters_per_pixel < limits.max_mpp,
                egui::Button::new(egui::RichText::new("\u{2212}").strong()).min_size(size),
            );
            if zoom_out.clicked() {
                requests.send(ViewRequest::ZoomBy(-1.0));
            }
        });
}
