use bevy::prelude::*;

use scenario::metric::Metric;

use crate::egui_input_guard::MapInputGate;

/// The metric the choropleth is shaded by. Changing it re-styles every
/// region and swaps the legend.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayState {
    pub metric: Metric,
}

/// Cycle metrics with Tab, unless the search box or a notice has the keyboard.
pub fn cycle_metric_key(
    keys: Res<ButtonInput<KeyCode>>,
    gate: Res<MapInputGate>,
    mut overlay: ResMut<OverlayState>,
) {
    if !gate.keyboard_free() {
        return;
    }
    if keys.just_pressed(KeyCode::Tab) {
        overlay.metric = overlay.metric.next();
    }
}
