use bevy::prelude::*;

pub mod adjustment;
pub mod calculator;
pub mod config;
pub mod dataset;
pub mod loading;
pub mod metric;
pub mod region;
pub mod search;
pub mod selection;
pub mod store;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
pub mod test_harness;

/// Frame ordering shared by every crate.
///
/// UI and picking systems emit input events in `Input`; `Apply` turns them
/// into state changes; re-styling runs after `Apply`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScenarioSet {
    Input,
    Apply,
}

pub struct ScenarioPlugin;

impl Plugin for ScenarioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<config::MapConfig>()
            .init_resource::<region::RegionSet>()
            .init_resource::<store::ScenarioStore>()
            .init_resource::<selection::SelectedRegion>()
            .init_resource::<loading::DatasetStatus>()
            .init_resource::<loading::DatasetLoadBuffer>()
            .add_event::<loading::DatasetLoaded>()
            .add_event::<selection::RegionSelected>()
            .add_event::<search::SearchRequest>()
            .add_event::<search::SearchHit>()
            .add_event::<search::SearchMissed>()
            .add_event::<adjustment::ScenarioAdjusted>()
            .configure_sets(Update, (ScenarioSet::Input, ScenarioSet::Apply).chain())
            .add_systems(Startup, loading::begin_dataset_load)
            .add_systems(
                Update,
                (
                    loading::poll_dataset_load,
                    search::handle_search_requests,
                    selection::apply_region_selection,
                    adjustment::apply_scenario_adjustments,
                )
                    .chain()
                    .in_set(ScenarioSet::Apply),
            );
    }
}
