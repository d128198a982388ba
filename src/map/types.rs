//! Geo and configuration types shared across the map layer.

use serde::{Deserialize, Serialize};

/// A longitude/latitude coordinate pair, longitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

/// An axis-aligned box over coordinates, grown corner by corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLatBounds {
    sw: LngLat,
    ne: LngLat,
}

impl LngLatBounds {
    /// Creates bounds with the given corners.
    pub fn new(sw: LngLat, ne: LngLat) -> Self {
        Self { sw, ne }
    }

    /// Grows the bounds to include `coord`.
    pub fn extend(&mut self, coord: LngLat) {
        self.sw.lng = self.sw.lng.min(coord.lng);
        self.sw.lat = self.sw.lat.min(coord.lat);
        self.ne.lng = self.ne.lng.max(coord.lng);
        self.ne.lat = self.ne.lat.max(coord.lat);
    }

    /// Builds bounds covering every coordinate, starting with both corners
    /// at the first one. `None` for an empty slice.
    pub fn from_coordinates(coordinates: &[LngLat]) -> Option<Self> {
        let first = *coordinates.first()?;
        let mut bounds = Self::new(first, first);
        for coord in &coordinates[1..] {
            bounds.extend(*coord);
        }
        Some(bounds)
    }

    pub fn southwest(&self) -> LngLat {
        self.sw
    }

    pub fn northeast(&self) -> LngLat {
        self.ne
    }
}

/// Events a [`MapWidget`](crate::map::MapWidget) notifies subscribers about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapEvent {
    /// The widget finished loading its style.
    Load,
}

/// Initial style and camera for a map widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub style: String,
    pub center: LngLat,
    pub zoom: f64,
    pub pitch: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            style: "mapbox://styles/mapbox/dark-v10".to_string(),
            center: LngLat::new(114.085947, 22.7),
            zoom: 10.0,
            pitch: 45.0,
        }
    }
}

/// Options for [`MapBinding::fit_bounds`](crate::map::MapBinding::fit_bounds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitBoundsOptions {
    /// Padding in pixels kept between the bounds and the viewport edges.
    pub padding: u32,
}

impl Default for FitBoundsOptions {
    fn default() -> Self {
        Self { padding: 50 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_extend_over_every_coordinate() {
        let coords = [
            LngLat::new(1.0, 1.0),
            LngLat::new(3.0, 2.0),
            LngLat::new(2.0, 5.0),
        ];
        let bounds = LngLatBounds::from_coordinates(&coords).unwrap();
        assert_eq!(bounds.southwest(), LngLat::new(1.0, 1.0));
        assert_eq!(bounds.northeast(), LngLat::new(3.0, 5.0));
    }

    #[test]
    fn single_coordinate_collapses_the_bounds() {
        let bounds = LngLatBounds::from_coordinates(&[LngLat::new(4.0, -2.0)]).unwrap();
        assert_eq!(bounds.southwest(), bounds.northeast());
    }

    #[test]
    fn empty_coordinates_produce_no_bounds() {
        assert!(LngLatBounds::from_coordinates(&[]).is_none());
    }

    #[test]
    fn defaults_match_the_stock_camera() {
        let config = MapConfig::default();
        assert_eq!(config.style, "mapbox://styles/mapbox/dark-v10");
        assert_eq!(config.center, LngLat::new(114.085947, 22.7));
        assert_eq!(config.zoom, 10.0);
        assert_eq!(config.pitch, 45.0);
        assert_eq!(FitBoundsOptions::default().padding, 50);
    }
}
