//! Find which waypoint a right-click was aimed at.
//!

use crate::Waypoint;

/// Maximum distance, in degrees, between a click and the waypoint it designates.
pub const HIT_TOLERANCE: f64 = 0.5;

/// Distances closer than this, in degrees, are ties.
const TIE_EPSILON: f64 = 1e-6;

/// Return the index of the waypoint closest to (`lat`, `lon`) if it is within
/// [`HIT_TOLERANCE`].
///
/// Distance is planar in degree-space.  When several waypoints are at the same distance, give or
/// take a micro-degree, the highest index (the most recently added) wins.
///
#[tracing::instrument(skip(route))]
pub fn nearest_waypoint(lat: f64, lon: f64, route: &[Waypoint]) -> Option<usize> {
    let (index, dist) = route
        .iter()
        .enumerate()
        .map(|(i, wp)| (i, wp.planar_distance(lat, lon)))
        .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
            // Scanning forward, a later index takes over on ties
            Some((_, bd)) if d > bd + TIE_EPSILON => best,
            _ => Some((i, d)),
        })?;

    (dist < HIT_TOLERANCE).then_some(index)
}
