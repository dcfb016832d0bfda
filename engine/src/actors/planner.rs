//! Planner actor
//!
//! Owns the navigation log.  Route and parameter changes come in, a `Fire` is scheduled after the
//! debounce window and the engine call runs in its own task so that the actor keeps answering
//! `View` while it is in flight.  Answers come back as `Completed` and are applied only if still
//! current.
//!

use std::sync::Arc;
use std::time::Duration;

use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use tracing::{debug, trace, warn};

use crate::{
    EngineError, FlightParams, FlightPlanResponse, NavLogEngine, PlanView, Route, Synchronizer,
};

/// Default debounce window.
pub const DEF_DEBOUNCE: Duration = Duration::from_millis(300);

pub struct PlannerActor;

#[derive(Debug)]
pub enum PlannerMsg {
    /// Route was edited.
    RouteChanged(Route),
    /// Aircraft or wind was changed.
    ParamsChanged(FlightParams),
    /// Debounce window for this generation is over.
    Fire(u64),
    /// Engine answered for this generation.
    Completed(u64, Result<FlightPlanResponse, EngineError>),
    /// Current state of the plan.
    View(RpcReplyPort<PlanView>),
}

/// Startup arguments.
///
#[derive(Debug)]
pub struct PlannerArgs {
    pub engine: Arc<dyn NavLogEngine>,
    pub debounce: Duration,
    pub route: Route,
    pub params: FlightParams,
}

#[derive(Debug)]
pub struct PlannerState {
    engine: Arc<dyn NavLogEngine>,
    debounce: Duration,
    sync: Synchronizer,
}

impl PlannerState {
    fn schedule(&self, myself: &ActorRef<PlannerMsg>, gen: Option<u64>) {
        if let Some(gen) = gen {
            trace!("fire({gen}) in {:?}", self.debounce);
            myself.send_after(self.debounce, move || PlannerMsg::Fire(gen));
        }
    }
}

#[ractor::async_trait]
impl Actor for PlannerActor {
    type Msg = PlannerMsg;
    type State = PlannerState;
    type Arguments = PlannerArgs;

    #[tracing::instrument(skip(self, myself))]
    async fn pre_start(
        &self,
        myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let mut state = PlannerState {
            engine: args.engine,
            debounce: args.debounce,
            sync: Synchronizer::new(args.route, args.params),
        };

        // restored session gets its log without waiting for an edit
        let gen = state.sync.changed();
        state.schedule(&myself, gen);
        Ok(state)
    }

    #[tracing::instrument(skip(self, myself, state))]
    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            PlannerMsg::RouteChanged(route) => {
                let gen = state.sync.set_route(route);
                state.schedule(&myself, gen);
            }
            PlannerMsg::ParamsChanged(params) => {
                let gen = state.sync.set_params(params);
                state.schedule(&myself, gen);
            }
            PlannerMsg::Fire(gen) => {
                if let Some(req) = state.sync.fire(gen) {
                    let engine = state.engine.clone();
                    let me = myself.clone();

                    let job = tokio::spawn(async move { engine.compute(&req).await });
                    tokio::spawn(async move {
                        // a panicking engine still has to settle this generation
                        let res = match job.await {
                            Ok(res) => res,
                            Err(e) => {
                                warn!("engine task for gen {gen}: {e}");
                                Err(EngineError::Aborted(e.to_string()))
                            }
                        };
                        // we may be gone already, nothing to do then
                        let _ = me.cast(PlannerMsg::Completed(gen, res));
                    });
                }
            }
            PlannerMsg::Completed(gen, res) => {
                if state.sync.complete(gen, res) {
                    debug!("plan updated for gen {gen}");
                }
            }
            PlannerMsg::View(sender) => {
                sender.send(state.sync.view().clone())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeEngine;
    use crate::{PlanError, Waypoint};
    use ractor::call;

    fn route() -> Route {
        Route::from(vec![Waypoint::new(52.0, 19.0), Waypoint::new(52.5, 19.5)])
    }

    async fn spawn(engine: Arc<FakeEngine>, route: Route) -> ActorRef<PlannerMsg> {
        let args = PlannerArgs {
            engine,
            debounce: DEF_DEBOUNCE,
            route,
            params: FlightParams::default(),
        };
        let (actor, _h) = Actor::spawn(None, PlannerActor, args).await.unwrap();
        actor
    }

    async fn sleep_ms(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_coalesces() {
        let engine = Arc::new(FakeEngine::default());
        let actor = spawn(engine.clone(), Route::new()).await;

        let mut r = route();
        for lat in [53.0, 53.5, 54.0] {
            r.append(Waypoint::new(lat, 20.0));
            actor.cast(PlannerMsg::RouteChanged(r.clone())).unwrap();
            sleep_ms(100).await;
        }
        assert_eq!(0, engine.calls());

        sleep_ms(300).await;
        let view = call!(actor, PlannerMsg::View).unwrap();
        assert_eq!(1, engine.calls());
        assert_eq!(1, view.issued);
        assert_eq!(5, engine.last().unwrap().route_points.len());
        assert_eq!(4, view.plan.unwrap().nav_log.rows.len());
        actor.stop(None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_before_window() {
        let engine = Arc::new(FakeEngine::default());
        let actor = spawn(engine.clone(), Route::new()).await;

        actor.cast(PlannerMsg::RouteChanged(route())).unwrap();
        sleep_ms(290).await;
        assert_eq!(0, engine.calls());
        assert!(call!(actor, PlannerMsg::View).unwrap().pending);

        sleep_ms(20).await;
        assert_eq!(1, engine.calls());
        actor.stop(None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restored_route_computed() {
        let engine = Arc::new(FakeEngine::default());
        let actor = spawn(engine.clone(), route()).await;

        sleep_ms(400).await;
        let view = call!(actor, PlannerMsg::View).unwrap();
        assert!(view.plan.is_some());
        actor.stop(None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_answer_dropped() {
        let engine = Arc::new(FakeEngine::slow(Duration::from_secs(1)));
        let actor = spawn(engine.clone(), Route::new()).await;

        actor.cast(PlannerMsg::RouteChanged(route())).unwrap();
        // first request goes out at 300ms and answers at 1300ms
        sleep_ms(500).await;
        assert_eq!(1, engine.calls());

        let mut longer = route();
        longer.append(Waypoint::new(53.0, 20.0));
        actor.cast(PlannerMsg::RouteChanged(longer)).unwrap();

        sleep_ms(1000).await;
        // first answer arrived and was dropped, second still in flight
        let view = call!(actor, PlannerMsg::View).unwrap();
        assert!(view.plan.is_none());
        assert!(view.pending);

        sleep_ms(1000).await;
        let view = call!(actor, PlannerMsg::View).unwrap();
        assert_eq!(2, view.issued);
        assert_eq!(2, view.plan.unwrap().nav_log.rows.len());
        actor.stop(None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_engine_down() {
        let engine = Arc::new(FakeEngine::failing());
        let actor = spawn(engine.clone(), route()).await;

        sleep_ms(400).await;
        let view = call!(actor, PlannerMsg::View).unwrap();
        assert_eq!(Some(PlanError::Connectivity), view.error);
        assert!(view.plan.is_none());
        actor.stop(None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_engine_panic_settles() {
        let engine = Arc::new(FakeEngine::panicking());
        let actor = spawn(engine.clone(), route()).await;

        sleep_ms(400).await;
        let view = call!(actor, PlannerMsg::View).unwrap();
        assert_eq!(1, engine.calls());
        assert!(!view.pending);
        assert_eq!(Some(PlanError::Connectivity), view.error);
        assert!(view.plan.is_none());
        actor.stop(None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_to_end_wind() {
        let engine = Arc::new(FakeEngine::default());
        let actor = spawn(engine.clone(), Route::new()).await;
        let params = FlightParams::default().with_declination(0);

        actor.cast(PlannerMsg::ParamsChanged(params)).unwrap();
        actor.cast(PlannerMsg::RouteChanged(route())).unwrap();
        sleep_ms(400).await;
        assert_eq!(1, engine.calls());
        let req = engine.last().unwrap();
        assert_eq!(100, req.aircraft.tas);
        assert_eq!(Some(0.), req.magnetic_declination);

        actor.cast(PlannerMsg::ParamsChanged(params.with_wind(0, 150))).unwrap();
        sleep_ms(400).await;
        let view = call!(actor, PlannerMsg::View).unwrap();
        assert_eq!(Some(PlanError::Validation), view.error);
        assert!(view.plan.is_none());
        assert_eq!(1, engine.calls());

        actor.cast(PlannerMsg::ParamsChanged(params.with_wind(0, 120))).unwrap();
        sleep_ms(400).await;
        assert_eq!(1, engine.calls());

        actor.cast(PlannerMsg::ParamsChanged(params.with_wind(0, 20))).unwrap();
        sleep_ms(400).await;
        assert_eq!(2, engine.calls());
        let view = call!(actor, PlannerMsg::View).unwrap();
        assert!(view.error.is_none());
        assert!(view.plan.is_some());
        actor.stop(None);
    }
}
