//! GeoJSON dataset parsing.
//!
//! Turns a PC6 feature collection into a [`RegionSet`]. Each feature needs a
//! postal code and (multi)polygon geometry; anything else is skipped with a
//! warning. Energy figures may be numbers, numeric strings or absent.

use std::collections::HashSet;
use std::path::PathBuf;

use bevy::prelude::*;
use geo::{Coord, LineString, MultiPolygon, Polygon};
use geojson::{Feature, GeoJson, PolygonType, Value};
use serde_json::Value as JsonValue;

use crate::region::{normalize_postcode, RegionRecord, RegionSet};

pub const PROP_POSTCODE: &str = "postcode6";
/// Fallback key used by the raw CBS/VNG export.
pub const PROP_POSTCODE_FALLBACK: &str = "postcode";
pub const PROP_GAS_M3: &str = "p6_gasm3_2023";
pub const PROP_ELECTRICITY_KWH: &str = "p6_kwh_2023";
pub const PROP_PV_KWH: &str = "p6_kwh_productie_2023";
pub const PROP_WOZ_VALUE: &str = "pc6_gemiddelde_woz_waarde_woning";

/// Errors that leave the map without a data layer.
#[derive(Debug)]
pub enum DatasetError {
    /// Local file could not be read.
    Io(PathBuf, std::io::Error),
    /// Network fetch failed (wasm builds).
    Fetch(String, String),
    /// Not valid GeoJSON.
    Parse(String),
    /// Valid GeoJSON, but not a feature collection.
    NotAFeatureCollection,
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::Io(path, e) => write!(f, "Failed to read {}: {}", path.display(), e),
            DatasetError::Fetch(url, e) => write!(f, "Failed to fetch {}: {}", url, e),
            DatasetError::Parse(e) => write!(f, "Failed to parse GeoJSON: {}", e),
            DatasetError::NotAFeatureCollection => {
                write!(f, "GeoJSON root is not a FeatureCollection")
            }
        }
    }
}

impl std::error::Error for DatasetError {}

/// Why a single feature was left out of the region set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureSkip {
    MissingPostcode,
    MissingGeometry,
    UnsupportedGeometry(&'static str),
}

impl std::fmt::Display for FeatureSkip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureSkip::MissingPostcode => write!(f, "no postal code"),
            FeatureSkip::MissingGeometry => write!(f, "no polygon geometry"),
            FeatureSkip::UnsupportedGeometry(kind) => write!(f, "unsupported geometry {}", kind),
        }
    }
}

/// Parse GeoJSON text into a region set.
///
/// Duplicate postal codes (after normalization) keep the first feature.
pub fn parse_region_set(text: &str) -> Result<RegionSet, DatasetError> {
    let geojson: GeoJson = text
        .parse()
        .map_err(|e: geojson::Error| DatasetError::Parse(e.to_string()))?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(DatasetError::NotAFeatureCollection);
    };

    let mut seen = HashSet::new();
    let mut regions = Vec::with_capacity(collection.features.len());
    for (index, feature) in collection.features.iter().enumerate() {
        match region_from_feature(feature) {
            Ok(region) => {
                if !seen.insert(region.normalized_postcode()) {
                    warn!(
                        "Skipping feature {}: duplicate postal code {}",
                        index, region.postcode
                    );
                    continue;
                }
                regions.push(region);
            }
            Err(skip) => warn!("Skipping feature {}: {}", index, skip),
        }
    }

    Ok(RegionSet::new(regions))
}

/// Build one region record from a GeoJSON feature.
pub fn region_from_feature(feature: &Feature) -> Result<RegionRecord, FeatureSkip> {
    let postcode = feature
        .property(PROP_POSTCODE)
        .or_else(|| feature.property(PROP_POSTCODE_FALLBACK))
        .and_then(JsonValue::as_str)
        .map(str::trim)
        .filter(|pc| !normalize_postcode(pc).is_empty())
        .ok_or(FeatureSkip::MissingPostcode)?;

    let geometry = feature
        .geometry
        .as_ref()
        .ok_or(FeatureSkip::MissingGeometry)?;
    let geometry = match &geometry.value {
        Value::Polygon(rings) => MultiPolygon::new(vec![polygon_from_rings(rings)]),
        Value::MultiPolygon(polygons) => {
            MultiPolygon::new(polygons.iter().map(polygon_from_rings).collect())
        }
        Value::Point(_) => return Err(FeatureSkip::UnsupportedGeometry("Point")),
        Value::MultiPoint(_) => return Err(FeatureSkip::UnsupportedGeometry("MultiPoint")),
        Value::LineString(_) => return Err(FeatureSkip::UnsupportedGeometry("LineString")),
        Value::MultiLineString(_) => {
            return Err(FeatureSkip::UnsupportedGeometry("MultiLineString"))
        }
        Value::GeometryCollection(_) => {
            return Err(FeatureSkip::UnsupportedGeometry("GeometryCollection"))
        }
    };
    if geometry.0.iter().all(|p| p.exterior().0.len() < 3) {
        return Err(FeatureSkip::MissingGeometry);
    }

    Ok(RegionRecord {
        postcode: postcode.to_string(),
        gas_m3: number_property(feature, PROP_GAS_M3),
        electricity_kwh: number_property(feature, PROP_ELECTRICITY_KWH),
        pv_kwh: number_property(feature, PROP_PV_KWH),
        woz_value: number_property(feature, PROP_WOZ_VALUE),
        geometry,
    })
}

/// Numeric property as `f64`. Accepts JSON numbers and numeric strings
/// (with either `.` or `,` as decimal separator); anything else is `None`.
fn number_property(feature: &Feature, key: &str) -> Option<f64> {
    let value = match feature.property(key)? {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    }?;
    value.is_finite().then_some(value)
}

fn polygon_from_rings(rings: &PolygonType) -> Polygon<f64> {
    let mut rings = rings.iter().map(|ring| {
        LineString::new(
            ring.iter()
                .filter(|position| position.len() >= 2)
                .map(|position| Coord {
                    x: position[0],
                    y: position[1],
                })
                .collect(),
        )
    });
    let exterior = rings.next().unwrap_or_else(|| LineString::new(Vec::new()));
    Polygon::new(exterior, rings.collect())
}
