use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use scenario::ScenarioSet;

pub mod alert;
pub mod legend;
pub mod map_input;
pub mod metric_selector;
pub mod search_bar;
pub mod side_panel;
pub mod theme;
pub mod zoom_controls;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<search_bar::SearchBarState>()
            .init_resource::<alert::NotFoundAlert>()
            .add_systems(Startup, theme::apply_map_theme)
            // Panels first: the legend and zoom buttons sit in what is left.
            .add_systems(
                Update,
                (
                    search_bar::top_bar_ui,
                    side_panel::side_panel_ui,
                    legend::legend_ui,
                    zoom_controls::zoom_controls_ui,
                    alert::not_found_alert_ui,
                    map_input::publish_map_input,
                )
                    .chain()
                    .in_set(ScenarioSet::Input)
                    .before(rendering::picking::update_hover),
            )
            .add_systems(
                Update,
                alert::capture_search_misses.after(ScenarioSet::Apply),
            );
    }
}
