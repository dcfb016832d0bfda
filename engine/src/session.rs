//! Editing session.
//!
//! Glue between the gesture surfaces (chart and navigation log table), the two actors and the
//! settings store.  The session owns the flight parameters and the sidebar, the route and the plan
//! are owned by their actors and only ever seen here as snapshots.
//!
//! Every change is written to the settings store right away.
//!

use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use ractor::{call, Actor, ActorRef};
use strum::{Display, EnumString};
use tracing::{debug, info, trace, warn};

use crate::actors::{
    Edited, PlannerActor, PlannerArgs, PlannerMsg, RouteActor, RouteMsg,
};
use crate::{
    Chart, FlightParams, NavLogEngine, PlanView, Route, Settings, SettingsStore, Sidebar, Waypoint,
};

/// How often `settle()` looks at the planner.
const SETTLE_POLL: Duration = Duration::from_millis(10);

/// Which cell of a navigation log row was clicked.
///
#[derive(Clone, Copy, Debug, Display, EnumString, Eq, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum Endpoint {
    /// "From" cell, waypoint `row`
    Start,
    /// "To" cell, waypoint `row + 1`
    End,
}

impl Endpoint {
    /// Route index behind the cell of `row`.
    ///
    #[inline]
    pub fn index(self, row: usize) -> usize {
        match self {
            Endpoint::Start => row,
            Endpoint::End => row + 1,
        }
    }
}

#[derive(Debug)]
pub struct Session {
    route: ActorRef<RouteMsg>,
    planner: ActorRef<PlannerMsg>,
    params: FlightParams,
    sidebar: Sidebar,
    store: SettingsStore,
    settings: Settings,
}

impl Session {
    /// Restore what the store has and start both actors.
    ///
    #[tracing::instrument(skip(engine))]
    pub async fn new(
        engine: Arc<dyn NavLogEngine>,
        store: SettingsStore,
        debounce: Duration,
    ) -> Result<Self> {
        let settings = store.load();
        let params = settings.params();
        info!(
            "restored {} points, tas {}, wind {}/{}",
            settings.route.len(),
            params.tas,
            params.wind_direction,
            params.wind_speed
        );

        let (route, _h) = Actor::spawn(None, RouteActor, settings.route.clone()).await?;
        let args = PlannerArgs {
            engine,
            debounce,
            route: settings.route.clone(),
            params,
        };
        let (planner, _h) = Actor::spawn(None, PlannerActor, args).await?;

        Ok(Session {
            route,
            planner,
            params,
            sidebar: Sidebar::new(settings.sidebar_width),
            store,
            settings,
        })
    }

    /// Stop both actors.
    ///
    pub fn stop(&self) {
        self.route.stop(None);
        self.planner.stop(None);
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.settings) {
            warn!("{e}");
        }
    }

    /// Propagate an edit, if any.  Returns whether the route changed.
    ///
    fn edited(&mut self, res: Edited) -> Result<bool> {
        let Some(route) = res else {
            trace!("no change");
            return Ok(false);
        };

        debug!("route now has {} points", route.len());
        self.settings.route = route.clone();
        self.persist();
        self.planner.cast(PlannerMsg::RouteChanged(route))?;
        Ok(true)
    }

    fn params_changed(&mut self, params: FlightParams) -> Result<bool> {
        if params == self.params {
            return Ok(false);
        }
        self.params = params;
        self.settings.set_params(&params);
        self.persist();
        self.planner.cast(PlannerMsg::ParamsChanged(params))?;
        Ok(true)
    }

    // ----- chart gestures

    /// Left click on the chart.
    ///
    #[tracing::instrument(skip(self))]
    pub async fn click(&mut self, lat: f64, lon: f64) -> Result<bool> {
        let res = call!(self.route, RouteMsg::Append, Waypoint::new(lat, lon))?;
        self.edited(res)
    }

    /// Right click on the chart, removes the nearest waypoint if close enough.
    ///
    #[tracing::instrument(skip(self))]
    pub async fn right_click(&mut self, lat: f64, lon: f64) -> Result<bool> {
        let res = call!(self.route, RouteMsg::RemoveNear, lat, lon)?;
        self.edited(res)
    }

    // ----- navigation log gestures

    /// Left click on a row endpoint, appends that point unless it is already the last one.
    ///
    #[tracing::instrument(skip(self))]
    pub async fn row_click(&mut self, row: usize, which: Endpoint) -> Result<bool> {
        let view = self.view().await?;
        let Some(leg) = view
            .plan
            .as_ref()
            .and_then(|plan| plan.nav_log.rows.get(row))
            .map(|r| &r.leg)
        else {
            trace!("no row {row}");
            return Ok(false);
        };

        let wp = match which {
            Endpoint::Start => leg.start_point.clone(),
            Endpoint::End => leg.end_point.clone(),
        };
        let res = call!(self.route, RouteMsg::Promote, wp)?;
        self.edited(res)
    }

    /// Right click on a row endpoint, removes the matching waypoint.
    ///
    #[tracing::instrument(skip(self))]
    pub async fn row_right_click(&mut self, row: usize, which: Endpoint) -> Result<bool> {
        self.remove_at(which.index(row)).await
    }

    // ----- direct editing

    #[tracing::instrument(skip(self))]
    pub async fn append(&mut self, wp: Waypoint) -> Result<bool> {
        let res = call!(self.route, RouteMsg::Append, wp)?;
        self.edited(res)
    }

    #[tracing::instrument(skip(self))]
    pub async fn promote(&mut self, wp: Waypoint) -> Result<bool> {
        let res = call!(self.route, RouteMsg::Promote, wp)?;
        self.edited(res)
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove_at(&mut self, index: usize) -> Result<bool> {
        let res = call!(self.route, RouteMsg::RemoveAt, index)?;
        self.edited(res)
    }

    #[tracing::instrument(skip(self))]
    pub async fn reverse(&mut self) -> Result<bool> {
        let res = call!(self.route, RouteMsg::Reverse)?;
        self.edited(res)
    }

    /// Empty the route if `confirm` agrees.
    ///
    #[tracing::instrument(skip(self, confirm))]
    pub async fn clear<F>(&mut self, confirm: F) -> Result<bool>
    where
        F: FnOnce() -> bool,
    {
        if !confirm() {
            debug!("clear not confirmed");
            return Ok(false);
        }
        let res = call!(self.route, RouteMsg::Clear)?;
        self.edited(res)
    }

    // ----- parameters

    pub fn params(&self) -> FlightParams {
        self.params
    }

    #[tracing::instrument(skip(self))]
    pub fn set_tas(&mut self, tas: u32) -> Result<bool> {
        self.params_changed(self.params.with_tas(tas))
    }

    #[tracing::instrument(skip(self))]
    pub fn set_wind(&mut self, direction: u32, speed: u32) -> Result<bool> {
        self.params_changed(self.params.with_wind(direction, speed))
    }

    #[tracing::instrument(skip(self))]
    pub fn set_declination(&mut self, declination: i32) -> Result<bool> {
        self.params_changed(self.params.with_declination(declination))
    }

    // ----- sidebar

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn resize_start(&mut self) {
        self.sidebar.start();
    }

    pub fn resize_drag(&mut self, width: f64) {
        self.sidebar.drag(width);
    }

    /// Drag is over, the width is saved.
    ///
    pub fn resize_end(&mut self) {
        if let Some(width) = self.sidebar.end() {
            self.settings.sidebar_width = width;
            self.persist();
        }
    }

    // ----- queries

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub async fn route(&self) -> Result<Route> {
        Ok(call!(self.route, RouteMsg::Get)?)
    }

    pub async fn view(&self) -> Result<PlanView> {
        Ok(call!(self.planner, PlannerMsg::View)?)
    }

    /// Annotations for the current route and plan.
    ///
    pub async fn chart(&self) -> Result<Chart> {
        let route = self.route().await?;
        let view = self.view().await?;
        Ok(Chart::build(&route, view.plan.as_ref()))
    }

    /// Wait until nothing is scheduled nor in flight.
    ///
    #[tracing::instrument(skip(self))]
    pub async fn settle(&self) -> Result<PlanView> {
        loop {
            let view = self.view().await?;
            if !view.pending {
                return Ok(view);
            }
            tokio::time::sleep(SETTLE_POLL).await;
        }
    }
}
