//! Waypoints are the points of a route, in decimal degrees (WGS-84 assumed, not enforced).
//!

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// One point of the route, held by value.
///
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Waypoint {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
    /// Display label, `WP<n>` is used when absent.
    #[serde(default)]
    pub ident: Option<String>,
}

impl Waypoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Waypoint {
            lat,
            lon,
            ident: None,
        }
    }

    pub fn named(lat: f64, lon: f64, ident: &str) -> Self {
        Waypoint {
            lat,
            lon,
            ident: Some(ident.to_string()),
        }
    }

    /// Label of the waypoint found at `index` (0-based) in the route.
    ///
    pub fn label(&self, index: usize) -> String {
        match &self.ident {
            Some(ident) if !ident.is_empty() => ident.clone(),
            _ => format!("WP{}", index + 1),
        }
    }

    /// Both coordinates formatted as `52°30' N 19°30' E`.
    ///
    pub fn coords(&self) -> String {
        format!(
            "{} {} {} {}",
            format_coord(self.lat),
            if self.lat >= 0. { 'N' } else { 'S' },
            format_coord(self.lon),
            if self.lon >= 0. { 'E' } else { 'W' }
        )
    }

    /// Planar distance in degree-space, good enough for coarse picking.
    ///
    #[inline]
    pub fn planar_distance(&self, lat: f64, lon: f64) -> f64 {
        (self.lat - lat).hypot(self.lon - lon)
    }
}

impl Display for Waypoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.ident {
            Some(ident) => write!(f, "{} ({:.5}, {:.5})", ident, self.lat, self.lon),
            None => write!(f, "({:.5}, {:.5})", self.lat, self.lon),
        }
    }
}

/// Degrees and whole minutes, hemisphere is left to the caller.
///
pub fn format_coord(deg: f64) -> String {
    let absolute = deg.abs();
    let mut d = absolute.floor() as u32;
    let mut m = ((absolute - absolute.floor()) * 60.).round() as u32;

    // 59.6' rounds up into the next degree
    if m == 60 {
        d += 1;
        m = 0;
    }
    format!("{d}°{m:02}'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(52.5, "52°30'")]
    #[case(-6.2, "6°12'")]
    #[case(0., "0°00'")]
    #[case(19.9999, "20°00'")]
    #[case(4.0083, "4°00'")]
    fn test_format_coord(#[case] deg: f64, #[case] res: &str) {
        assert_eq!(res, format_coord(deg));
    }

    #[test]
    fn test_coords_hemispheres() {
        let wp = Waypoint::new(-33.95, -70.5);
        assert_eq!("33°57' S 70°30' W", wp.coords());

        let wp = Waypoint::new(52.25, 19.0);
        assert_eq!("52°15' N 19°00' E", wp.coords());
    }

    #[rstest]
    #[case(Waypoint::new(52., 19.), 0, "WP1")]
    #[case(Waypoint::new(52., 19.), 4, "WP5")]
    #[case(Waypoint::named(52., 19., "EPWA"), 4, "EPWA")]
    #[case(Waypoint::named(52., 19., ""), 1, "WP2")]
    fn test_label(#[case] wp: Waypoint, #[case] index: usize, #[case] res: &str) {
        assert_eq!(res, wp.label(index));
    }

    #[test]
    fn test_deserialize_without_ident() {
        let wp: Waypoint = serde_json::from_str(r#"{"lat": 52.0, "lon": 19.0}"#).unwrap();
        assert_eq!(Waypoint::new(52., 19.), wp);
    }
}
