use bevy::prelude::*;
use bevy_egui::egui;

use rendering::overlay::OverlayState;
use scenario::metric::ALL_METRICS;

/// Radio buttons for the shaded metric. Only writes the resource when the
/// choice actually changes, so the map is not re-styled every frame.
pub(crate) fn metric_radios(ui: &mut egui::Ui, overlay: &mut ResMut<OverlayState>) {
    let mut metric = overlay.metric;
    for candidate in ALL_METRICS {
        ui.radio_value(&mut metric, candidate, candidate.label());
    }
    if metric != overlay.metric {
        overlay.metric = metric;
    }
}
