//! Dead-reckoning tick marks.
//!
//! Every 5 minutes of flight time along a leg, a short mark perpendicular to the course is drawn
//! on the chart.  Positions use planar interpolation on latitude and longitude, which is fine
//! for the leg lengths of short-range VFR routes but is not geodesically exact.
//!

use crate::Leg;

/// Minutes between two marks.
pub const TICK_INTERVAL: f64 = 5.;
/// Keeps a mark from landing exactly on the end of a leg lasting a multiple of the interval.
const TICK_EPSILON: f64 = 0.01;
/// Default length of a drawn mark, in degrees.
pub const TICK_LENGTH: f64 = 0.016;

/// One mark, position and the course it is drawn across.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
    /// True course of the leg, degrees clockwise from true north.
    pub orientation: f64,
}

/// All marks of `leg`, strictly before its end point.
///
#[tracing::instrument(skip(leg))]
pub fn tick_positions(leg: &Leg, duration: f64) -> Vec<Tick> {
    if duration < TICK_INTERVAL {
        return vec![];
    }

    let (start, end) = (&leg.start_point, &leg.end_point);
    let count = ((duration - TICK_EPSILON) / TICK_INTERVAL).floor() as usize;

    (1..=count)
        .map(|i| {
            let ratio = (i as f64 * TICK_INTERVAL) / duration;
            Tick {
                lat: start.lat + ratio * (end.lat - start.lat),
                lon: start.lon + ratio * (end.lon - start.lon),
                orientation: leg.true_course,
            }
        })
        .collect()
}

impl Tick {
    /// The two ends of the mark, `length` degrees long and centered on the tick.
    ///
    /// The longitude delta is stretched by `1/cos(lat)` to compensate for meridian
    /// convergence; meaningless close to the poles.
    ///
    pub fn line(&self, length: f64) -> [(f64, f64); 2] {
        let perp = (self.orientation + 90.).to_radians();
        let half = length / 2.;

        let dlat = half * perp.cos();
        let dlon = half * perp.sin() / self.lat.to_radians().cos();

        [
            (self.lat + dlat, self.lon + dlon),
            (self.lat - dlat, self.lon - dlon),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Waypoint;
    use rstest::rstest;

    const EPS: f64 = 1e-9;

    fn leg(start: (f64, f64), end: (f64, f64), tc: f64) -> Leg {
        Leg {
            start_point: Waypoint::new(start.0, start.1),
            end_point: Waypoint::new(end.0, end.1),
            distance_nm: 0.,
            true_course: tc,
            magnetic_declination: 0.,
        }
    }

    #[rstest]
    #[case(0., 0)]
    #[case(4., 0)]
    #[case(4.99, 0)]
    #[case(5., 0)]
    #[case(5.02, 1)]
    #[case(10., 1)]
    #[case(12., 2)]
    #[case(15., 2)]
    #[case(31., 6)]
    fn test_tick_count(#[case] duration: f64, #[case] count: usize) {
        let leg = leg((52., 19.), (52.5, 19.5), 32.);
        assert_eq!(count, tick_positions(&leg, duration).len());
    }

    #[test]
    fn test_ticks_twelve_minutes() {
        let leg = leg((50., 20.), (51.2, 21.2), 32.);
        let ticks = tick_positions(&leg, 12.);

        assert_eq!(2, ticks.len());
        assert!((ticks[0].lat - 50.5).abs() < EPS);
        assert!((ticks[0].lon - 20.5).abs() < EPS);
        assert!((ticks[1].lat - 51.).abs() < EPS);
        assert!((ticks[1].lon - 21.).abs() < EPS);
        assert!(ticks.iter().all(|t| t.orientation == 32.));
    }

    #[test]
    fn test_ticks_ten_minutes_skip_end() {
        let leg = leg((0., 0.), (0., 1.), 90.);
        let ticks = tick_positions(&leg, 10.);

        assert_eq!(1, ticks.len());
        assert!((ticks[0].lon - 0.5).abs() < EPS);
    }

    #[test]
    fn test_ticks_deterministic() {
        let leg = leg((52., 19.), (52.5, 19.5), 32.);
        assert_eq!(tick_positions(&leg, 27.), tick_positions(&leg, 27.));
    }

    #[test]
    fn test_line_course_north() {
        // Course 000, the mark runs east-west
        let tick = Tick {
            lat: 0.,
            lon: 0.,
            orientation: 0.,
        };
        let [a, b] = tick.line(0.016);

        assert!(a.0.abs() < EPS);
        assert!((a.1 - 0.008).abs() < EPS);
        assert!(b.0.abs() < EPS);
        assert!((b.1 + 0.008).abs() < EPS);
    }

    #[test]
    fn test_line_course_east() {
        // Course 090, the mark runs north-south
        let tick = Tick {
            lat: 0.,
            lon: 10.,
            orientation: 90.,
        };
        let [a, b] = tick.line(0.016);

        assert!((a.0 + 0.008).abs() < EPS);
        assert!((a.1 - 10.).abs() < EPS);
        assert!((b.0 - 0.008).abs() < EPS);
        assert!((b.1 - 10.).abs() < EPS);
    }

    #[test]
    fn test_line_meridian_convergence() {
        let tick = Tick {
            lat: 60.,
            lon: 0.,
            orientation: 0.,
        };
        let [a, _] = tick.line(0.016);

        // cos(60°) = 0.5 so the longitude delta doubles
        assert!((a.1 - 0.016).abs() < EPS);
    }

    #[test]
    fn test_line_centered() {
        let tick = Tick {
            lat: 52.3,
            lon: 19.2,
            orientation: 47.,
        };
        let [a, b] = tick.line(TICK_LENGTH);

        assert!(((a.0 + b.0) / 2. - tick.lat).abs() < EPS);
        assert!(((a.1 + b.1) / 2. - tick.lon).abs() < EPS);
    }
}
