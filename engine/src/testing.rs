//! Helpers shared by the unit tests.
//!

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::{
    AircraftOutput, EngineError, FlightPlanRequest, FlightPlanResponse, Leg, NavLog, NavLogEngine,
    NavLogRow, RouteOutput, Waypoint, Wind,
};

/// Plausible answer for `route`, every leg taking `minutes`.
///
pub fn sample_response(route: &[Waypoint], minutes: f64) -> FlightPlanResponse {
    let legs: Vec<Leg> = route
        .windows(2)
        .map(|w| Leg {
            start_point: w[0].clone(),
            end_point: w[1].clone(),
            distance_nm: 30.,
            true_course: 45.,
            magnetic_declination: 6.,
        })
        .collect();
    let rows: Vec<NavLogRow> = legs
        .iter()
        .map(|leg| NavLogRow {
            leg: leg.clone(),
            wind: Wind::default(),
            ground_speed: 100.,
            wca: 0.,
            true_heading: 45.,
            magnetic_heading: 39.,
            time_min: minutes,
        })
        .collect();
    let total = rows.len() as f64;

    FlightPlanResponse {
        route: RouteOutput {
            points: route.to_vec(),
            legs,
            total_distance_nm: 30. * total,
        },
        aircraft: AircraftOutput {
            registration: "SP-N/A".into(),
            model: "Unknown".into(),
            tas: 100.,
            gph: 0.,
        },
        wind: Wind::default(),
        nav_log: NavLog {
            rows,
            total_time_min: minutes * total,
            total_distance_nm: 30. * total,
        },
    }
}

/// In-process engine counting its calls.
///
#[derive(Debug, Default)]
pub struct FakeEngine {
    pub calls: AtomicUsize,
    pub last: Mutex<Option<FlightPlanRequest>>,
    /// Answer after that long
    pub delay: Duration,
    pub fail: bool,
    pub panics: bool,
}

impl FakeEngine {
    pub fn failing() -> Self {
        FakeEngine {
            fail: true,
            ..FakeEngine::default()
        }
    }

    pub fn panicking() -> Self {
        FakeEngine {
            panics: true,
            ..FakeEngine::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        FakeEngine {
            delay,
            ..FakeEngine::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last(&self) -> Option<FlightPlanRequest> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl NavLogEngine for FakeEngine {
    async fn compute(&self, req: &FlightPlanRequest) -> Result<FlightPlanResponse, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(req.clone());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.panics {
            panic!("engine blew up");
        }
        if self.fail {
            return Err(EngineError::Rejected(503, "down".into()));
        }
        Ok(sample_response(&req.route_points, 12.))
    }
}
