//! Blocking "Record not found." notice for unmatched searches.
//!
//! While open, a backdrop covers the whole window so neither the map nor
//! the panels take input until the notice is dismissed.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use scenario::search::SearchMissed;

pub const NOT_FOUND_MESSAGE: &str = "Record not found.";

#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct NotFoundAlert {
    /// The query that missed, while the notice is shown.
    pub query: Option<String>,
}

impl NotFoundAlert {
    pub fn is_open(&self) -> bool {
        self.query.is_some()
    }
}

/// Open the notice for the frame's (last) unmatched search.
pub fn capture_search_misses(
    mut misses: EventReader<SearchMissed>,
    mut alert: ResMut<NotFoundAlert>,
) {
    if let Some(miss) = misses.read().last() {
        alert.query = Some(miss.query.clone());
    }
}

pub(crate) fn not_found_alert_ui(mut contexts: EguiContexts, mut alert: ResMut<NotFoundAlert>) {
    if !alert.is_open() {
        return;
    }

    let ctx = contexts.ctx_mut();

    let screen_rect = ctx.screen_rect();
    egui::Area::new(egui::Id::new("not_found_backdrop"))
        .fixed_pos(screen_rect.min)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.painter().rect_filled(
                screen_rect,
                egui::CornerRadius::ZERO,
                egui::Color32::from_black_alpha(90),
            );
            ui.allocate_rect(screen_rect, egui::Sense::click());
        });

    let mut dismissed = ctx.input(|i| i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Escape));

    egui::Window::new("not_found")
        .collapsible(false)
        .resizable(false)
        .title_bar(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .default_width(260.0)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(10.0);
                ui.label(NOT_FOUND_MESSAGE);
                ui.add_space(10.0);
                if ui
                    .add_sized(egui::Vec2::new(90.0, 28.0), egui::Button::new("OK"))
                    .clicked()
                {
                    dismissed = true;
                }
                ui.add_space(6.0);
            });
        });

    if dismissed {
        alert.query = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_opens_notice_once() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<NotFoundAlert>()
            .add_event::<SearchMissed>()
            .add_systems(Update, capture_search_misses);

        app.update();
        assert!(!app.world().resource::<NotFoundAlert>().is_open());

        app.world_mut().send_event(SearchMissed {
            query: "9999ZZ".to_string(),
        });
        app.update();
        assert_eq!(
            app.world().resource::<NotFoundAlert>().query.as_deref(),
            Some("9999ZZ")
        );
    }
}
