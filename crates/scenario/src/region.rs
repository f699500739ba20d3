//! PC6 region records and the loaded region set.

use bevy::prelude::*;
use geo::{coord, BoundingRect, MultiPolygon, Rect};

use crate::metric::Metric;

/// Strip all whitespace and uppercase, so `"1811 aa"` matches `"1811AA"`.
pub fn normalize_postcode(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// One postal-code area with its 2023 energy statistics.
///
/// Immutable once loaded. Missing figures stay `None`; the side panel shows
/// them as "N/A" and the scenario calculator treats them as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionRecord {
    /// Postal code as it appears in the dataset (e.g. `"1811AA"`).
    pub postcode: String,
    /// Yearly gas volume in m³.
    pub gas_m3: Option<f64>,
    /// Yearly electricity consumption in kWh.
    pub electricity_kwh: Option<f64>,
    /// Yearly PV production in kWh.
    pub pv_kwh: Option<f64>,
    /// Average WOZ property valuation in euro (only in some dataset variants).
    pub woz_value: Option<f64>,
    /// WGS84 outline, x = longitude, y = latitude.
    pub geometry: MultiPolygon<f64>,
}

impl RegionRecord {
    /// A region with the given figures and no geometry.
    pub fn with_values(postcode: &str, gas_m3: f64, electricity_kwh: f64, pv_kwh: f64) -> Self {
        Self {
            postcode: postcode.to_string(),
            gas_m3: Some(gas_m3),
            electricity_kwh: Some(electricity_kwh),
            pv_kwh: Some(pv_kwh),
            woz_value: None,
            geometry: MultiPolygon::new(Vec::new()),
        }
    }

    pub fn with_geometry(mut self, geometry: MultiPolygon<f64>) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn normalized_postcode(&self) -> String {
        normalize_postcode(&self.postcode)
    }

    /// The recorded figure for `metric`, if present.
    pub fn figure(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Gas => self.gas_m3,
            Metric::Electricity => self.electricity_kwh,
            Metric::Pv => self.pv_kwh,
        }
    }

    /// WGS84 bounding box, `None` for empty geometry.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.geometry.bounding_rect()
    }
}

/// All regions from the dataset, in file order.
///
/// The index into this list is the region's identity everywhere else
/// (selection events, map entities, search hits).
#[derive(Resource, Debug, Default)]
pub struct RegionSet {
    regions: Vec<RegionRecord>,
    bounds: Option<Rect<f64>>,
}

impl RegionSet {
    pub fn new(regions: Vec<RegionRecord>) -> Self {
        let bounds = regions
            .iter()
            .filter_map(RegionRecord::bounds)
            .reduce(merge_rects);
        Self { regions, bounds }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RegionRecord> {
        self.regions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionRecord> {
        self.regions.iter()
    }

    /// WGS84 bounds of every region with geometry.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.bounds
    }

    /// Linear scan for every region whose normalized postal code equals the
    /// normalized `query`.
    pub fn find_matches(&self, query: &str) -> Vec<usize> {
        let needle = normalize_postcode(query);
        if needle.is_empty() {
            return Vec::new();
        }
        self.regions
            .iter()
            .enumerate()
            .filter(|(_, region)| region.normalized_postcode() == needle)
            .map(|(index, _)| index)
            .collect()
    }
}

/// Smallest rectangle covering both.
pub fn merge_rects(a: Rect<f64>, b: Rect<f64>) -> Rect<f64> {
    Rect::new(
        coord! { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
        coord! { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
    )
}
