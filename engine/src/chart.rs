//! Everything drawn on the chart for a route and its navigation log.
//!
//! Built from scratch on every render, nothing in here is kept around.
//!

use tracing::trace;

use crate::{tick_positions, FlightPlanResponse, Tick, Waypoint, TICK_LENGTH};

/// One waypoint on the chart.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    /// Position in the route
    pub index: usize,
    pub label: String,
    /// Formatted position, see [`Waypoint::coords`]
    pub coords: String,
    pub lat: f64,
    pub lon: f64,
}

/// A tick mark and the segment to draw for it.
///
#[derive(Clone, Debug, PartialEq)]
pub struct TickMark {
    /// Navigation log row the leg belongs to
    pub row: usize,
    pub tick: Tick,
    pub line: [(f64, f64); 2],
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chart {
    /// Route line, empty below two points
    pub polyline: Vec<(f64, f64)>,
    pub markers: Vec<Marker>,
    pub ticks: Vec<TickMark>,
}

impl Chart {
    #[tracing::instrument(skip_all)]
    pub fn build(route: &[Waypoint], plan: Option<&FlightPlanResponse>) -> Self {
        Self::build_with(route, plan, TICK_LENGTH)
    }

    /// Same as `build()` with a specific mark length (degrees).
    ///
    pub fn build_with(route: &[Waypoint], plan: Option<&FlightPlanResponse>, length: f64) -> Self {
        let polyline = if route.len() >= 2 {
            route.iter().map(|wp| (wp.lat, wp.lon)).collect()
        } else {
            vec![]
        };

        let markers = route
            .iter()
            .enumerate()
            .map(|(index, wp)| Marker {
                index,
                label: wp.label(index),
                coords: wp.coords(),
                lat: wp.lat,
                lon: wp.lon,
            })
            .collect();

        let ticks: Vec<TickMark> = plan
            .map(|plan| {
                plan.nav_log
                    .rows
                    .iter()
                    .enumerate()
                    .flat_map(|(row, r)| {
                        tick_positions(&r.leg, r.time_min)
                            .into_iter()
                            .map(move |tick| TickMark {
                                row,
                                tick,
                                line: tick.line(length),
                            })
                    })
                    .collect()
            })
            .unwrap_or_default();

        trace!("{} points, {} ticks", route.len(), ticks.len());
        Chart {
            polyline,
            markers,
            ticks,
        }
    }
}
