use geo::{HaversineDistance, Point};

use crate::models::GeoPoint;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    // geo points are (x = longitude, y = latitude)
    let from = Point::new(lon1, lat1);
    let to = Point::new(lon2, lat2);

    from.haversine_distance(&to) / 1000.0
}

/// Distance in kilometers between two optional addresses
#[inline]
pub fn distance_between(a: Option<&GeoPoint>, b: Option<&GeoPoint>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(haversine_distance(a.latitude, a.longitude, b.latitude, b.longitude)),
        _ => None,
    }
}

/// Proximity score (0-1) inside a travel radius
///
/// Exponential decay, zero at or beyond the radius.
#[inline]
pub fn proximity_score(distance_km: f64, radius_km: f64) -> f64 {
    if radius_km <= 0.0 || distance_km >= radius_km {
        return 0.0;
    }

    (-distance_km / (radius_km * 0.5)).exp()
}
