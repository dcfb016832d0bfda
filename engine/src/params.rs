//! Aircraft and wind parameters fed to the navigation log engine.
//!

use serde::{Deserialize, Serialize};

/// Everything besides the route that goes into a recompute.
///
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FlightParams {
    /// True airspeed (kt)
    pub tas: u32,
    /// Wind direction (°), where the wind blows from
    pub wind_direction: u32,
    /// Wind speed (kt)
    pub wind_speed: u32,
    /// Magnetic declination (°, east positive)
    pub magnetic_declination: i32,
}

impl Default for FlightParams {
    fn default() -> Self {
        FlightParams {
            tas: 100,
            wind_direction: 0,
            wind_speed: 0,
            magnetic_declination: 6,
        }
    }
}

impl FlightParams {
    /// A wind triangle has no solution for every heading when the wind is at least as fast as
    /// the aircraft.
    ///
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.wind_speed < self.tas
    }

    pub fn with_tas(self, tas: u32) -> Self {
        FlightParams { tas, ..self }
    }

    /// Direction is folded into `0..360`.
    ///
    pub fn with_wind(self, direction: u32, speed: u32) -> Self {
        FlightParams {
            wind_direction: direction % 360,
            wind_speed: speed,
            ..self
        }
    }

    pub fn with_declination(self, magnetic_declination: i32) -> Self {
        FlightParams {
            magnetic_declination,
            ..self
        }
    }
}
