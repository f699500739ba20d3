//! Side panel for the selected postal-code area.
//!
//! Shows the 2023 figures next to the simulated ones, and the two scenario
//! sliders. The simulated column is drawn as active once the region's
//! scenario has been modified. Slider moves are sent as
//! [`ScenarioAdjusted`] events, so the panel itself never mutates the store.

mod format;
#[cfg(test)]
mod tests;

pub use format::{format_dutch, format_euro, format_figure};

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use scenario::adjustment::{ScenarioAdjusted, ALL_LEVERS};
use scenario::calculator::ScenarioOutcome;
use scenario::loading::DatasetStatus;
use scenario::metric::ALL_METRICS;
use scenario::region::{RegionRecord, RegionSet};
use scenario::selection::SelectedRegion;
use scenario::store::{ScenarioEntry, ScenarioStore};

use crate::theme::{ACCENT_RED, TEXT_MUTED};

const PANEL_WIDTH: f32 = 320.0;

const METHODOLOGY: [&str; 3] = [
    "Geometry: CBS 2021 PC6 Boundaries.",
    "Energy: VNG (CBS) Energy Statistics 2023.",
    "Matched per PC6.",
];

/// One line of the actual/simulated comparison.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FigureRow {
    pub label: &'static str,
    pub actual: String,
    pub simulated: String,
}

pub(crate) fn figure_rows(region: &RegionRecord, entry: &ScenarioEntry) -> Vec<FigureRow> {
    let outcome = ScenarioOutcome::compute(region, entry);
    ALL_METRICS
        .iter()
        .map(|&metric| FigureRow {
            label: metric.label(),
            actual: format_figure(region.figure(metric), metric.unit()),
            simulated: format_figure(Some(outcome.value(metric)), metric.unit()),
        })
        .collect()
}

pub(crate) fn side_panel_ui(
    mut contexts: EguiContexts,
    regions: Res<RegionSet>,
    selected: Res<SelectedRegion>,
    store: Res<ScenarioStore>,
    status: Res<DatasetStatus>,
    mut adjusted: EventWriter<ScenarioAdjusted>,
) {
    let ctx = contexts.ctx_mut();

    egui::SidePanel::right("region_panel")
        .exact_width(PANEL_WIDTH)
        .resizable(false)
        .show(ctx, |ui| {
            ui.add_space(12.0);
            match selected.region(&regions) {
                Some(region) => {
                    let entry = store.entry_or_default(&region.postcode);
                    region_details(ui, region, &entry, &mut adjusted);
                }
                None => empty_state(ui, &status),
            }

            ui.add_space(40.0);
            methodology(ui);
        });
}

fn empty_state(ui: &mut egui::Ui, status: &DatasetStatus) {
    let message = match status {
        DatasetStatus::Pending => "Loading data…".to_string(),
        DatasetStatus::Failed(reason) => format!("Data could not be loaded.\n{reason}"),
        DatasetStatus::Loaded { .. } => {
            "Click a postal code area or search for one to see its energy profile.".to_string()
        }
    };
    ui.label(egui::RichText::new(message).color(TEXT_MUTED));
}

fn region_details(
    ui: &mut egui::Ui,
    region: &RegionRecord,
    entry: &ScenarioEntry,
    adjusted: &mut EventWriter<ScenarioAdjusted>,
) {
    ui.label(egui::RichText::new(&region.postcode).strong().size(26.0));
    if let Some(woz) = region.woz_value {
        ui.label(
            egui::RichText::new(format!("Avg. WOZ value {}", format_euro(woz)))
                .size(11.0)
                .color(TEXT_MUTED),
        );
    }
    ui.add_space(10.0);

    let simulated_color = if entry.modified {
        ACCENT_RED
    } else {
        TEXT_MUTED
    };

    egui::Grid::new("figure_grid")
        .num_columns(3)
        .spacing(egui::vec2(14.0, 8.0))
        .show(ui, |ui| {
            ui.label("");
            ui.label(egui::RichText::new("Actual (2023)").strong().size(11.0));
            ui.label(
                egui::RichText::new("Simulated")
                    .strong()
                    .size(11.0)
                    .color(simulated_color),
            );
            ui.end_row();

            for row in figure_rows(region, entry) {
                ui.label(egui::RichText::new(row.label).size(11.0).color(TEXT_MUTED));
                ui.label(egui::RichText::new(row.actual).monospace());
                let simulated = egui::RichText::new(row.simulated)
                    .monospace()
                    .color(simulated_color);
                ui.label(if entry.modified {
                    simulated.strong()
                } else {
                    simulated
                });
                ui.end_row();
            }
        });

    ui.add_space(18.0);
    ui.label(
        egui::RichText::new("Local Scenario Parameters")
            .strong()
            .color(ACCENT_RED),
    );
    ui.add_space(6.0);

    for lever in ALL_LEVERS {
        let mut percent = lever.percent(entry);
        ui.horizontal(|ui| {
            ui.label(lever.label());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(egui::RichText::new(format!("{percent}%")).strong());
            });
        });
        let response = ui.add(
            egui::Slider::new(&mut percent, lever.percent_range())
                .show_value(false)
                .integer(),
        );
        if response.changed() {
            adjusted.send(ScenarioAdjusted {
                postcode: region.postcode.clone(),
                lever,
                percent,
            });
        }
        ui.add_space(8.0);
    }
}

fn methodology(ui: &mut egui::Ui) {
    ui.label(
        egui::RichText::new("METHODOLOGY")
            .strong()
            .size(9.0)
            .color(TEXT_MUTED),
    );
    for line in METHODOLOGY {
        ui.label(egui::RichText::new(line).size(9.0).color(TEXT_MUTED));
    }
}
