//! # Coordinate Transforms
//!
//! WGS84 lon/lat to local map space (meters east/north of an origin), using
//! an equirectangular approximation around the configured map center. Good
//! to well under a pixel across a single municipality.
//!
//! Also converts between web-map zoom levels and meters per screen pixel so
//! the configured zoom (13 for the city view, 17 for a single region) means
//! what it means on a slippy map.

use bevy::prelude::*;
use geo::{coord, Coord, LineString, MultiPolygon, Polygon};

const METERS_PER_DEGREE: f64 = 111_320.0;
const EARTH_CIRCUMFERENCE_M: f64 = 40_075_016.686;
const TILE_SIZE_PX: f64 = 256.0;

/// Origin of local map space. All world coordinates are meters from here.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct MapProjection {
    pub origin_lat: f64,
    pub origin_lon: f64,
    cos_lat: f64,
}

impl MapProjection {
    pub fn new(origin_lat: f64, origin_lon: f64) -> Self {
        Self {
            origin_lat,
            origin_lon,
            cos_lat: origin_lat.to_radians().cos(),
        }
    }

    pub fn project(&self, lon: f64, lat: f64) -> Coord<f64> {
        coord! {
            x: (lon - self.origin_lon) * METERS_PER_DEGREE * self.cos_lat,
            y: (lat - self.origin_lat) * METERS_PER_DEGREE,
        }
    }

    /// Inverse of [`project`](Self::project), returns `(lon, lat)`.
    pub fn unproject(&self, point: Coord<f64>) -> (f64, f64) {
        (
            point.x / (METERS_PER_DEGREE * self.cos_lat) + self.origin_lon,
            point.y / METERS_PER_DEGREE + self.origin_lat,
        )
    }

    pub fn project_multipolygon(&self, geometry: &MultiPolygon<f64>) -> MultiPolygon<f64> {
        MultiPolygon::new(
            geometry
                .0
                .iter()
                .map(|polygon| {
                    Polygon::new(
                        self.project_ring(polygon.exterior()),
                        polygon
                            .interiors()
                            .iter()
                            .map(|ring| self.project_ring(ring))
                            .collect(),
                    )
                })
                .collect(),
        )
    }

    fn project_ring(&self, ring: &LineString<f64>) -> LineString<f64> {
        ring.coords().map(|c| self.project(c.x, c.y)).collect()
    }
}

impl Default for MapProjection {
    fn default() -> Self {
        Self::new(
            scenario::config::DEFAULT_CENTER_LAT,
            scenario::config::DEFAULT_CENTER_LON,
        )
    }
}

/// Meters per screen pixel at web-map `zoom` and latitude `lat`.
pub fn meters_per_pixel(zoom: f64, lat: f64) -> f64 {
    EARTH_CIRCUMFERENCE_M * lat.to_radians().cos() / (TILE_SIZE_PX * 2f64.powf(zoom))
}
