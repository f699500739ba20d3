//! Region selection from map clicks and search hits.

use bevy::prelude::*;

use crate::region::{RegionRecord, RegionSet};
use crate::store::ScenarioStore;

/// A region was picked on the map or found by search.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionSelected {
    pub index: usize,
}

/// Index of the region shown in the side panel.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SelectedRegion(pub Option<usize>);

impl SelectedRegion {
    pub fn region<'a>(&self, regions: &'a RegionSet) -> Option<&'a RegionRecord> {
        self.0.and_then(|index| regions.get(index))
    }
}

/// Record the selection and lazily create the region's scenario entry.
pub fn apply_region_selection(
    mut events: EventReader<RegionSelected>,
    regions: Res<RegionSet>,
    mut store: ResMut<ScenarioStore>,
    mut selected: ResMut<SelectedRegion>,
) {
    for event in events.read() {
        let Some(region) = regions.get(event.index) else {
            warn!("Ignoring selection of unknown region index {}", event.index);
            continue;
        };
        // Only touch the store when the entry is new, so selection alone
        // does not trigger a re-style.
        if store.get(&region.postcode).is_none() {
            store.ensure(&region.postcode);
        }
        selected.0 = Some(event.index);
    }
}
