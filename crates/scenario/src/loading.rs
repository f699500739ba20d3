//! Dataset loading lifecycle.
//!
//! Startup kicks off the read (file on native, `fetch` relative to the page
//! on wasm) and parks the result in a shared slot. A polling system moves it
//! into the ECS world. A failed load is logged once and leaves the map
//! without a data layer; there is no retry.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use crate::config::MapConfig;
use crate::dataset::{parse_region_set, DatasetError};
use crate::region::RegionSet;

/// Where the dataset load stands.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub enum DatasetStatus {
    #[default]
    Pending,
    Loaded {
        regions: usize,
    },
    Failed(String),
}

impl DatasetStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

/// Shared slot used to bridge the async read -> ECS world.
#[derive(Resource, Default, Clone)]
pub struct DatasetLoadBuffer(pub Arc<Mutex<Option<Result<String, DatasetError>>>>);

impl DatasetLoadBuffer {
    pub fn put(&self, result: Result<String, DatasetError>) {
        if let Ok(mut guard) = self.0.lock() {
            *guard = Some(result);
        }
    }
}

/// Fired once after a successful load, after [`RegionSet`] is replaced.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetLoaded {
    pub regions: usize,
}

/// Marker: when present, startup does not read the configured dataset.
/// Used by the headless test harness.
#[derive(Resource)]
pub struct SkipDatasetLoad;

/// Startup system: start reading the configured dataset.
pub fn begin_dataset_load(
    config: Res<MapConfig>,
    buffer: Res<DatasetLoadBuffer>,
    skip: Option<Res<SkipDatasetLoad>>,
) {
    if skip.is_some() {
        return;
    }
    info!("Loading dataset from {}", config.data_path);
    start_read(config.data_path.clone(), buffer.clone());
}

#[cfg(not(target_arch = "wasm32"))]
fn start_read(path: String, buffer: DatasetLoadBuffer) {
    let path = std::path::PathBuf::from(path);
    let result = std::fs::read_to_string(&path).map_err(|e| DatasetError::Io(path, e));
    buffer.put(result);
}

#[cfg(target_arch = "wasm32")]
fn start_read(url: String, buffer: DatasetLoadBuffer) {
    wasm_bindgen_futures::spawn_local(async move {
        let result = fetch_text(&url)
            .await
            .map_err(|e| DatasetError::Fetch(url.clone(), e));
        buffer.put(result);
    });
}

/// Poll the load slot, parse the GeoJSON and publish the region set.
pub fn poll_dataset_load(
    buffer: Res<DatasetLoadBuffer>,
    mut regions: ResMut<RegionSet>,
    mut status: ResMut<DatasetStatus>,
    mut loaded: EventWriter<DatasetLoaded>,
) {
    let Ok(mut slot) = buffer.0.lock() else {
        return;
    };
    let Some(result) = slot.take() else {
        return;
    };

    match result.and_then(|text| parse_region_set(&text)) {
        Ok(set) => {
            let count = set.len();
            info!("Dataset loaded: {} regions", count);
            *regions = set;
            *status = DatasetStatus::Loaded { regions: count };
            loaded.send(DatasetLoaded { regions: count });
        }
        Err(e) => {
            error!("Data load failed: {}", e);
            *status = DatasetStatus::Failed(e.to_string());
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch_text(url: &str) -> Result<String, String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or_else(|| "window not available".to_string())?;
    let response_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| format!("fetch failed: {:?}", e))?;

    let response: web_sys::Response = response_value
        .dyn_into()
        .map_err(|_| "failed to cast fetch response".to_string())?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let text_promise = response
        .text()
        .map_err(|e| format!("response.text() failed: {:?}", e))?;
    let text_value = JsFuture::from(text_promise)
        .await
        .map_err(|e| format!("await response text failed: {:?}", e))?;
    text_value
        .as_string()
        .ok_or_else(|| "response text was not a string".to_string())
}
