use crate::domain::{Coordinate, Place};
use ordered_float::OrderedFloat;
use std::sync::Arc;

pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers, using the haversine formula.
pub fn distance_km(from: &Coordinate, to: &Coordinate) -> f64 {
    let from_latitude = from.latitude.to_radians();
    let to_latitude = to.latitude.to_radians();
    let delta_latitude = (to.latitude - from.latitude).to_radians();
    let delta_longitude = (to.longitude - from.longitude).to_radians();

    let h = (delta_latitude / 2.0).sin().powi(2) + from_latitude.cos() * to_latitude.cos() * (delta_longitude / 2.0).sin().powi(2);
    // Rounding can push h just above 1 for antipodal points
    let h = h.min(1.0);

    2.0 * EARTH_MEAN_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Returns the places ordered by ascending distance to `reference`. Places at the same distance keep their catalog order.
pub fn rank(places: &[Arc<Place>], reference: &Coordinate) -> Vec<Arc<Place>> {
    let mut ranked = places.to_vec();
    ranked.sort_by_cached_key(|place| OrderedFloat(distance_km(&place.coordinate, reference)));
    ranked
}
