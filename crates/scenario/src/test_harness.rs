//! # TestMap: headless harness for scenario integration tests
//!
//! Wraps `bevy::app::App` + `ScenarioPlugin` without a window or renderer.
//! Build the map state with the `with_*` methods, drive it with events, then
//! call `tick()` and assert on resources.

use bevy::app::App;
use bevy::prelude::*;

use crate::adjustment::{Lever, ScenarioAdjusted};
use crate::dataset::DatasetError;
use crate::loading::{DatasetLoadBuffer, DatasetStatus, SkipDatasetLoad};
use crate::region::{RegionRecord, RegionSet};
use crate::search::{SearchHit, SearchMissed, SearchRequest};
use crate::selection::{RegionSelected, SelectedRegion};
use crate::store::{ScenarioEntry, ScenarioStore};
use crate::{ScenarioPlugin, ScenarioSet};

/// Search outcomes captured across ticks (events only live two frames).
#[derive(Resource, Default)]
struct SearchLog {
    hits: Vec<usize>,
    misses: Vec<String>,
}

fn capture_search_events(
    mut hits: EventReader<SearchHit>,
    mut misses: EventReader<SearchMissed>,
    mut log: ResMut<SearchLog>,
) {
    log.hits.extend(hits.read().map(|h| h.index));
    log.misses.extend(misses.read().map(|m| m.query.clone()));
}

pub struct TestMap {
    app: App,
}

impl TestMap {
    /// Empty map: no dataset, nothing selected.
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);

        // Insert the marker BEFORE the first update so startup skips the read.
        app.insert_resource(SkipDatasetLoad);
        app.add_plugins(ScenarioPlugin);
        app.init_resource::<SearchLog>();
        app.add_systems(Update, capture_search_events.after(ScenarioSet::Apply));

        app.update();
        Self { app }
    }

    /// Map with `regions` already loaded.
    pub fn with_regions(regions: Vec<RegionRecord>) -> Self {
        let mut map = Self::new();
        let set = RegionSet::new(regions);
        let count = set.len();
        let world = map.app.world_mut();
        world.insert_resource(set);
        world.insert_resource(DatasetStatus::Loaded { regions: count });
        map
    }

    /// Hand raw GeoJSON to the loader, as if the read had just finished.
    pub fn with_geojson(mut self, text: &str) -> Self {
        self.buffer().put(Ok(text.to_string()));
        self.tick();
        self
    }

    /// Hand a load failure to the loader.
    pub fn with_load_error(mut self, error: DatasetError) -> Self {
        self.buffer().put(Err(error));
        self.tick();
        self
    }

    fn buffer(&self) -> DatasetLoadBuffer {
        self.app.world().resource::<DatasetLoadBuffer>().clone()
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    pub fn select(&mut self, index: usize) -> &mut Self {
        self.app.world_mut().send_event(RegionSelected { index });
        self.tick()
    }

    pub fn search(&mut self, query: &str) -> &mut Self {
        self.app.world_mut().send_event(SearchRequest {
            query: query.to_string(),
        });
        self.tick()
    }

    pub fn adjust(&mut self, postcode: &str, lever: Lever, percent: u32) -> &mut Self {
        self.app.world_mut().send_event(ScenarioAdjusted {
            postcode: postcode.to_string(),
            lever,
            percent,
        });
        self.tick()
    }

    pub fn tick(&mut self) -> &mut Self {
        self.app.update();
        self
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn store(&self) -> &ScenarioStore {
        self.app.world().resource::<ScenarioStore>()
    }

    pub fn entry(&self, postcode: &str) -> Option<ScenarioEntry> {
        self.store().get(postcode).copied()
    }

    pub fn selected(&self) -> Option<usize> {
        self.app.world().resource::<SelectedRegion>().0
    }

    pub fn regions(&self) -> &RegionSet {
        self.app.world().resource::<RegionSet>()
    }

    pub fn status(&self) -> &DatasetStatus {
        self.app.world().resource::<DatasetStatus>()
    }

    pub fn search_hits(&self) -> &[usize] {
        &self.app.world().resource::<SearchLog>().hits
    }

    pub fn search_misses(&self) -> &[String] {
        &self.app.world().resource::<SearchLog>().misses
    }
}

impl Default for TestMap {
    fn default() -> Self {
        Self::new()
    }
}
