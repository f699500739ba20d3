//! Integration tests for the scenario crate using the `TestMap` harness.
//!
//! These spin up a headless Bevy App with `ScenarioPlugin` and drive it with
//! the same events the UI and map picking send.

mod search_tests;

use crate::region::RegionRecord;

/// Three Alkmaar postcodes with round figures.
pub(crate) fn sample_regions() -> Vec<RegionRecord> {
    vec![
        RegionRecord::with_values("1811AA", 1000.0, 2800.0, 300.0),
        RegionRecord::with_values("1811 AB", 450.0, 1600.0, 0.0),
        RegionRecord::with_values("1812CD", 1700.0, 4200.0, 1250.0),
    ]
}
