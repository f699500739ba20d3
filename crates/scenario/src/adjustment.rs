//! Slider input: the two scenario levers and the system that applies them.

use std::ops::RangeInclusive;

use bevy::prelude::*;

use crate::config::{GAS_DEMAND_PERCENT_RANGE, PV_ADOPTION_PERCENT_RANGE};
use crate::store::{ScenarioEntry, ScenarioStore};

/// A scenario control in the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lever {
    /// Remaining gas demand, 0-100 %.
    GasDemand,
    /// PV production relative to today, 100-500 %.
    PvAdoption,
}

pub const ALL_LEVERS: [Lever; 2] = [Lever::GasDemand, Lever::PvAdoption];

impl Lever {
    pub fn label(self) -> &'static str {
        match self {
            Self::GasDemand => "Gas Demand",
            Self::PvAdoption => "PV Adoption",
        }
    }

    pub fn percent_range(self) -> RangeInclusive<u32> {
        match self {
            Self::GasDemand => GAS_DEMAND_PERCENT_RANGE,
            Self::PvAdoption => PV_ADOPTION_PERCENT_RANGE,
        }
    }

    /// Current slider position for `entry`, in whole percent.
    pub fn percent(self, entry: &ScenarioEntry) -> u32 {
        let factor = match self {
            Self::GasDemand => entry.gas_factor,
            Self::PvAdoption => entry.pv_factor,
        };
        (factor * 100.0).round().max(0.0) as u32
    }
}

/// A slider moved. Every tick of the slider sends one of these.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ScenarioAdjusted {
    pub postcode: String,
    pub lever: Lever,
    pub percent: u32,
}

/// Write slider input into the store. Marks the entry modified.
pub fn apply_scenario_adjustments(
    mut events: EventReader<ScenarioAdjusted>,
    mut store: ResMut<ScenarioStore>,
) {
    for event in events.read() {
        let range = event.lever.percent_range();
        let percent = event.percent.clamp(*range.start(), *range.end());
        let factor = f64::from(percent) / 100.0;
        match event.lever {
            Lever::GasDemand => store.set_gas_factor(&event.postcode, factor),
            Lever::PvAdoption => store.set_pv_factor(&event.postcode, factor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_entry_sits_at_slider_origin() {
        let entry = ScenarioEntry::DEFAULT;
        assert_eq!(Lever::GasDemand.percent(&entry), 100);
        assert_eq!(Lever::PvAdoption.percent(&entry), 100);
    }

    #[test]
    fn percent_rounds_factor() {
        let entry = ScenarioEntry {
            gas_factor: 0.354,
            pv_factor: 2.496,
            modified: true,
        };
        assert_eq!(Lever::GasDemand.percent(&entry), 35);
        assert_eq!(Lever::PvAdoption.percent(&entry), 250);
    }

    #[test]
    fn default_positions_lie_inside_ranges() {
        for lever in ALL_LEVERS {
            assert!(lever
                .percent_range()
                .contains(&lever.percent(&ScenarioEntry::DEFAULT)));
        }
    }
}
