//! Wire format of the navigation log engine.
//!
//! The engine is remote, we send it the route and parameters and get back every leg with the
//! wind triangle solved.  Numbers in the answer are rounded by the engine but we keep them as
//! `f64` so that a change of rounding on its side does not break decoding.
//!

use serde::{Deserialize, Serialize};

use crate::{FlightParams, Waypoint};

/// Registration sent when none is configured.
const DEF_REGISTRATION: &str = "SP-N/A";
/// Model sent when none is configured.
const DEF_MODEL: &str = "Unknown";

/// Aircraft part of the request.
///
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct AircraftInput {
    pub registration: String,
    pub model: String,
    /// True airspeed (kt)
    pub tas: u32,
    /// Fuel flow, unused by the engine for now.
    pub gph: f64,
}

/// Wind part of the request.
///
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct WindInput {
    /// Degrees, where the wind blows from
    pub direction: u32,
    /// Knots
    pub speed: u32,
}

/// Wind echoed back by the engine.
///
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Wind {
    pub direction: f64,
    pub speed: f64,
}

/// Body of `POST /api/v1/flight-plan`.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlightPlanRequest {
    pub route_points: Vec<Waypoint>,
    pub aircraft: AircraftInput,
    pub wind: WindInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnetic_declination: Option<f64>,
}

impl FlightPlanRequest {
    pub fn new(route: &[Waypoint], params: &FlightParams) -> Self {
        FlightPlanRequest {
            route_points: route.to_vec(),
            aircraft: AircraftInput {
                registration: DEF_REGISTRATION.to_string(),
                model: DEF_MODEL.to_string(),
                tas: params.tas,
                gph: 0.,
            },
            wind: WindInput {
                direction: params.wind_direction,
                speed: params.wind_speed,
            },
            magnetic_declination: Some(f64::from(params.magnetic_declination)),
        }
    }
}

/// One leg between two consecutive waypoints.
///
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Leg {
    pub start_point: Waypoint,
    pub end_point: Waypoint,
    pub distance_nm: f64,
    /// Degrees, clockwise from true north
    pub true_course: f64,
    pub magnetic_declination: f64,
}

/// One line of the navigation log.
///
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct NavLogRow {
    pub leg: Leg,
    pub wind: Wind,
    pub ground_speed: f64,
    /// Wind correction angle
    pub wca: f64,
    pub true_heading: f64,
    pub magnetic_heading: f64,
    /// Leg duration in minutes
    pub time_min: f64,
}

/// The navigation log itself.
///
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct NavLog {
    pub rows: Vec<NavLogRow>,
    pub total_time_min: f64,
    pub total_distance_nm: f64,
}

/// Route as understood by the engine.
///
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct RouteOutput {
    pub points: Vec<Waypoint>,
    pub legs: Vec<Leg>,
    pub total_distance_nm: f64,
}

/// Aircraft echoed back by the engine.
///
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct AircraftOutput {
    pub registration: String,
    pub model: String,
    pub tas: f64,
    pub gph: f64,
}

/// Full answer of `POST /api/v1/flight-plan`.
///
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct FlightPlanResponse {
    pub route: RouteOutput,
    pub aircraft: AircraftOutput,
    pub wind: Wind,
    pub nav_log: NavLog,
}
