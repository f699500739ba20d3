//! Hover and click on map regions, plus the search highlight lifecycle.

use bevy::prelude::*;
use bevy_egui::EguiContexts;
use geo::coord;

use scenario::adjustment::ScenarioAdjusted;
use scenario::config::MapConfig;
use scenario::search::SearchHit;
use scenario::selection::RegionSelected;

use crate::camera::{LeftClickDrag, MapView, ViewRequest};
use crate::egui_input_guard::egui_wants_pointer;
use crate::map_layer::MapGeometry;
use crate::overlay::OverlayState;

/// Region under the cursor, if any.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HoverState(pub Option<usize>);

/// Region emphasized by the last successful search.
///
/// Cleared by the next full re-style (slider move or metric change) or when
/// the pointer leaves the region after hovering it.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HighlightState(pub Option<usize>);

pub fn update_hover(
    windows: Query<&Window>,
    mut contexts: EguiContexts,
    view: Res<MapView>,
    geometry: Res<MapGeometry>,
    mut hover: ResMut<HoverState>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let over_ui = egui_wants_pointer(&mut contexts);
    let target = window
        .cursor_position()
        .filter(|_| !over_ui)
        .and_then(|cursor| {
            let world = view.screen_to_world(cursor, window.size());
            geometry.region_at(coord! { x: f64::from(world.x), y: f64::from(world.y) })
        });
    hover.set_if_neq(HoverState(target));
}

/// Left click (not a drag) on a region: select it and zoom to it.
pub fn handle_region_click(
    buttons: Res<ButtonInput<MouseButton>>,
    drag: Res<LeftClickDrag>,
    hover: Res<HoverState>,
    config: Res<MapConfig>,
    mut selected: EventWriter<RegionSelected>,
    mut requests: EventWriter<ViewRequest>,
) {
    if !buttons.just_released(MouseButton::Left) || !drag.pressed || drag.is_dragging {
        return;
    }
    let Some(index) = hover.0 else {
        return;
    };
    selected.send(RegionSelected { index });
    requests.send(ViewRequest::FitRegion {
        index,
        padding: config.fit_padding_px,
        max_zoom: Some(config.fit_max_zoom),
    });
}

pub fn update_highlight(
    mut hits: EventReader<SearchHit>,
    mut adjusted: EventReader<ScenarioAdjusted>,
    overlay: Res<OverlayState>,
    hover: Res<HoverState>,
    mut previous_hover: Local<Option<usize>>,
    mut highlight: ResMut<HighlightState>,
) {
    let restyled = adjusted.read().count() > 0 || overlay.is_changed();
    let left_highlight = highlight.0.is_some()
        && *previous_hover == highlight.0
        && hover.0 != *previous_hover;
    *previous_hover = hover.0;

    if restyled || left_highlight {
        highlight.set_if_neq(HighlightState(None));
    }
    if let Some(hit) = hits.read().last() {
        highlight.set_if_neq(HighlightState(Some(hit.index)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenario::adjustment::Lever;

    fn highlight_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<OverlayState>()
            .init_resource::<HoverState>()
            .init_resource::<HighlightState>()
            .add_event::<SearchHit>()
            .add_event::<ScenarioAdjusted>()
            .add_systems(Update, update_highlight);
        app.update();
        app
    }

    fn highlighted(app: &App) -> Option<usize> {
        app.world().resource::<HighlightState>().0
    }

    #[test]
    fn search_hit_sets_highlight() {
        let mut app = highlight_app();
        app.world_mut().send_event(SearchHit { index: 4 });
        app.update();
        assert_eq!(highlighted(&app), Some(4));
    }

    #[test]
    fn slider_move_clears_highlight() {
        let mut app = highlight_app();
        app.world_mut().send_event(SearchHit { index: 4 });
        app.update();
        app.world_mut().send_event(ScenarioAdjusted {
            postcode: "1811AA".to_string(),
            lever: Lever::GasDemand,
            percent: 50,
        });
        app.update();
        assert_eq!(highlighted(&app), None);
    }

    #[test]
    fn metric_change_clears_highlight() {
        let mut app = highlight_app();
        app.world_mut().send_event(SearchHit { index: 1 });
        app.update();
        app.world_mut().resource_mut::<OverlayState>().metric =
            scenario::metric::Metric::Electricity;
        app.update();
        assert_eq!(highlighted(&app), None);
    }

    #[test]
    fn hovering_out_of_highlight_clears_it() {
        let mut app = highlight_app();
        app.world_mut().send_event(SearchHit { index: 2 });
        app.update();

        // Hovering elsewhere first does not clear it.
        app.world_mut().resource_mut::<HoverState>().0 = Some(7);
        app.update();
        assert_eq!(highlighted(&app), Some(2));

        app.world_mut().resource_mut::<HoverState>().0 = Some(2);
        app.update();
        assert_eq!(highlighted(&app), Some(2));

        app.world_mut().resource_mut::<HoverState>().0 = None;
        app.update();
        assert_eq!(highlighted(&app), None);
    }
}
