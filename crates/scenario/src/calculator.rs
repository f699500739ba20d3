//! Scenario calculator: projected gas, electricity and PV for one region.
//!
//! Pure functions of a region's 2023 figures and its scenario entry. Missing
//! figures count as zero. Nothing is clamped, so a strong gas cut can push
//! electricity well past the highest legend bin.

use crate::config::HEAT_PUMP_CONVERSION_FACTOR;
use crate::metric::Metric;
use crate::region::RegionRecord;
use crate::store::ScenarioEntry;

/// Simulated yearly figures for one region under one scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioOutcome {
    pub gas_m3: f64,
    pub electricity_kwh: f64,
    pub pv_kwh: f64,
    /// Gas no longer burned; converted into heat-pump electricity load.
    pub gas_saved_m3: f64,
}

impl ScenarioOutcome {
    pub fn compute(region: &RegionRecord, entry: &ScenarioEntry) -> Self {
        let gas = region.gas_m3.unwrap_or(0.0);
        let electricity = region.electricity_kwh.unwrap_or(0.0);
        let pv = region.pv_kwh.unwrap_or(0.0);

        let gas_saved_m3 = gas * (1.0 - entry.gas_factor);
        Self {
            gas_m3: gas * entry.gas_factor,
            electricity_kwh: electricity + gas_saved_m3 * HEAT_PUMP_CONVERSION_FACTOR,
            pv_kwh: pv * entry.pv_factor,
            gas_saved_m3,
        }
    }

    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Gas => self.gas_m3,
            Metric::Electricity => self.electricity_kwh,
            Metric::Pv => self.pv_kwh,
        }
    }
}

/// Simulated figure for `metric`; `None` entry means the default scenario.
pub fn simulated_value(region: &RegionRecord, entry: Option<&ScenarioEntry>, metric: Metric) -> f64 {
    let entry = entry.copied().unwrap_or_default();
    ScenarioOutcome::compute(region, &entry).value(metric)
}

/// Recorded figure for `metric`, zero when missing.
pub fn actual_value(region: &RegionRecord, metric: Metric) -> f64 {
    region.figure(metric).unwrap_or(0.0)
}
