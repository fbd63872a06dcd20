//! Pure geographic helpers: region containment and great-circle distance.

/// Axis-aligned latitude/longitude bounding box.
///
/// A rectangle is a coarse approximation of a country border; points near
/// the corners can pass containment while sitting outside the true border.
/// That is an accepted limitation of this filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

/// Approximate bounding box around Singapore.
pub const SINGAPORE_BOUNDS: RegionBounds = RegionBounds {
    min_lat: 1.130_475_3,
    max_lat: 1.450_475_3,
    min_lng: 103.692_035_9,
    max_lng: 104.012_035_9,
};

impl RegionBounds {
    /// Returns `true` when the coordinate lies inside the box (edges
    /// inclusive). Pure; never fails.
    #[must_use]
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lng >= self.min_lng && lng <= self.max_lng
    }
}

/// Mean Earth radius in kilometers, as used by the haversine formula.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in kilometers.
///
/// Haversine formula; deterministic and symmetric, returns `0.0` for
/// identical points.
#[must_use]
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}
