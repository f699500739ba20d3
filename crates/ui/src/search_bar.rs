//! Top bar: title, postal-code search box and the metric selector.
//!
//! Enter in the box and the Search button both submit. Matching and the
//! "not found" notice are handled elsewhere; this only emits
//! [`SearchRequest`]s.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::overlay::OverlayState;
use scenario::config::MapConfig;
use scenario::search::SearchRequest;

use crate::metric_selector::metric_radios;

#[derive(Resource, Default)]
pub struct SearchBarState {
    pub query: String,
}

pub(crate) fn top_bar_ui(
    mut contexts: EguiContexts,
    config: Res<MapConfig>,
    mut state: ResMut<SearchBarState>,
    mut overlay: ResMut<OverlayState>,
    mut requests: EventWriter<SearchRequest>,
) {
    let ctx = contexts.ctx_mut();

    egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(&config.title).strong().size(15.0));
            ui.separator();

            let input = ui.add(
                egui::TextEdit::singleline(&mut state.query)
                    .hint_text("Search PC6 (e.g. 1811AA)")
                    .desired_width(180.0),
            );
            let entered = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            let clicked = ui.button("Search").clicked();
            if entered || clicked {
                requests.send(SearchRequest {
                    query: state.query.clone(),
                });
            }

            ui.separator();
            metric_radios(ui, &mut overlay);
        });
        ui.add_space(4.0);
    });
}
