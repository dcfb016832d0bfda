//! Bookkeeping behind the navigation log recompute.
//!
//! Every change of route or parameters bumps a generation number.  A debounce timer and an engine
//! answer are both tagged with the generation they were issued for and anything not matching the
//! current one is ignored, so only the freshest answer ever lands in the view.
//!
//! There is no timer nor I/O in here, `PlannerActor` drives it.
//!

use tracing::{debug, trace};

use crate::{
    EngineError, FlightParams, FlightPlanRequest, FlightPlanResponse, PlanError, Route,
};

/// What the user gets to see.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlanView {
    /// Last successful answer for the current inputs
    pub plan: Option<FlightPlanResponse>,
    /// Inline error, exclusive with `plan`
    pub error: Option<PlanError>,
    /// A recompute is scheduled or in flight
    pub pending: bool,
    /// Current generation
    pub generation: u64,
    /// Number of requests actually sent to the engine
    pub issued: u64,
}

#[derive(Debug, Default)]
pub struct Synchronizer {
    route: Route,
    params: FlightParams,
    view: PlanView,
}

impl Synchronizer {
    pub fn new(route: Route, params: FlightParams) -> Self {
        Synchronizer {
            route,
            params,
            view: PlanView::default(),
        }
    }

    pub fn view(&self) -> &PlanView {
        &self.view
    }

    /// Returns the generation to fire for, if any.
    ///
    pub fn set_route(&mut self, route: Route) -> Option<u64> {
        self.route = route;
        self.changed()
    }

    /// Returns the generation to fire for, if any.
    ///
    pub fn set_params(&mut self, params: FlightParams) -> Option<u64> {
        self.params = params;
        self.changed()
    }

    /// Re-run the checks for the current inputs.  Wind is checked before route length.
    ///
    pub fn changed(&mut self) -> Option<u64> {
        self.view.generation += 1;
        let gen = self.view.generation;

        if !self.params.is_valid() {
            debug!("gen {gen}: wind {} >= tas {}", self.params.wind_speed, self.params.tas);
            self.view.plan = None;
            self.view.error = Some(PlanError::Validation);
            self.view.pending = false;
            return None;
        }

        if !self.route.has_legs() {
            trace!("gen {gen}: no leg");
            self.view.plan = None;
            self.view.error = None;
            self.view.pending = false;
            return None;
        }

        trace!("gen {gen}: scheduled");
        self.view.error = None;
        self.view.pending = true;
        Some(gen)
    }

    /// The debounce window for `gen` is over.  Returns the request to send if still current.
    ///
    pub fn fire(&mut self, gen: u64) -> Option<FlightPlanRequest> {
        if gen != self.view.generation || !self.view.pending {
            trace!("fire({gen}): stale, current is {}", self.view.generation);
            return None;
        }
        self.view.issued += 1;
        debug!("fire({gen}): request #{}", self.view.issued);
        Some(FlightPlanRequest::new(&self.route, &self.params))
    }

    /// Engine answered for `gen`.  Returns whether the view changed.
    ///
    pub fn complete(
        &mut self,
        gen: u64,
        res: Result<FlightPlanResponse, EngineError>,
    ) -> bool {
        if gen != self.view.generation {
            trace!("complete({gen}): dropped, current is {}", self.view.generation);
            return false;
        }

        self.view.pending = false;
        match res {
            Ok(plan) => {
                self.view.plan = Some(plan);
                self.view.error = None;
            }
            Err(e) => {
                debug!("complete({gen}): {e}");
                self.view.plan = None;
                self.view.error = Some(PlanError::Connectivity);
            }
        }
        true
    }
}
