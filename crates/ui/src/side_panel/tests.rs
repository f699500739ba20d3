//! Tests for the side panel module.

use scenario::region::RegionRecord;
use scenario::store::ScenarioEntry;

use super::{figure_rows, format_dutch, format_euro, format_figure};

#[test]
fn dutch_grouping_uses_dots() {
    assert_eq!(format_dutch(0.0), "0");
    assert_eq!(format_dutch(999.0), "999");
    assert_eq!(format_dutch(1000.0), "1.000");
    assert_eq!(format_dutch(1234567.0), "1.234.567");
}

#[test]
fn dutch_formatting_rounds_to_whole_numbers() {
    assert_eq!(format_dutch(1499.6), "1.500");
    assert_eq!(format_dutch(2.4), "2");
    assert_eq!(format_dutch(-0.3), "0", "no negative zero");
    assert_eq!(format_dutch(-12345.0), "-12.345");
}

#[test]
fn halves_round_up_not_away_from_zero() {
    assert_eq!(format_dutch(2.5), "3");
    assert_eq!(format_dutch(-2.5), "-2");
    assert_eq!(format_dutch(-0.5), "0");
    assert_eq!(format_dutch(-1500.5), "-1.500");
}

#[test]
fn missing_figures_show_not_available() {
    assert_eq!(format_figure(None, "m³"), "N/A");
    assert_eq!(format_figure(Some(f64::NAN), "kWh"), "N/A");
    assert_eq!(format_figure(Some(2800.0), "kWh"), "2.800 kWh");
    assert_eq!(format_euro(345000.0), "€ 345.000");
}

#[test]
fn rows_show_actual_and_simulated_side_by_side() {
    let region = RegionRecord::with_values("1811AA", 1000.0, 2800.0, 300.0);
    let entry = ScenarioEntry {
        gas_factor: 0.5,
        pv_factor: 2.0,
        modified: true,
    };
    let rows = figure_rows(&region, &entry);

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].label, "Gas");
    assert_eq!(rows[0].actual, "1.000 m³");
    assert_eq!(rows[0].simulated, "500 m³");
    assert_eq!(rows[1].actual, "2.800 kWh");
    assert_eq!(rows[1].simulated, "4.300 kWh", "heat pumps add 500 m³ x 3");
    assert_eq!(rows[2].label, "PV Yield");
    assert_eq!(rows[2].simulated, "600 kWh");
}

#[test]
fn missing_actual_figure_still_simulates_from_zero() {
    let mut region = RegionRecord::with_values("1811AB", 800.0, 2000.0, 0.0);
    region.pv_kwh = None;
    let rows = figure_rows(&region, &ScenarioEntry::DEFAULT);
    assert_eq!(rows[2].actual, "N/A");
    assert_eq!(rows[2].simulated, "0 kWh");
}
