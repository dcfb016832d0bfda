//! Route actor
//!
//! Single owner of the route.  Both the chart and the navigation log table edit the route through
//! it so there is never two diverging copies.
//!
//! Every editing message answers with `Some(route)` when the route changed and `None` when the
//! operation was a no-op (out of range index, duplicate promote, nothing near the click...).
//!

use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use tracing::{debug, trace};

use crate::{nearest_waypoint, Route, Waypoint};

pub struct RouteActor;

/// Answer to an editing message.
pub type Edited = Option<Route>;

#[derive(Debug)]
pub enum RouteMsg {
    /// Add a waypoint at the end.
    Append(Waypoint, RpcReplyPort<Edited>),
    /// Add a waypoint at the end unless it is already the last one.
    Promote(Waypoint, RpcReplyPort<Edited>),
    /// Remove by position.
    RemoveAt(usize, RpcReplyPort<Edited>),
    /// Remove the waypoint nearest to a click (lat, lon), if close enough.
    RemoveNear(f64, f64, RpcReplyPort<Edited>),
    /// Flip the route.
    Reverse(RpcReplyPort<Edited>),
    /// Empty the route, confirmation is the caller's business.
    Clear(RpcReplyPort<Edited>),
    /// Current route.
    Get(RpcReplyPort<Route>),
}

#[ractor::async_trait]
impl Actor for RouteActor {
    type Msg = RouteMsg;
    type State = Route;
    type Arguments = Route;

    #[tracing::instrument(skip(self, _myself))]
    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        trace!("routeactor::pre_start({} points)", args.len());
        Ok(args)
    }

    #[tracing::instrument(skip(self, _myself, state))]
    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            RouteMsg::Append(wp, sender) => {
                state.append(wp);
                sender.send(Some(state.clone()))?;
            }
            RouteMsg::Promote(wp, sender) => {
                let changed = state.promote(wp);
                sender.send(changed.then(|| state.clone()))?;
            }
            RouteMsg::RemoveAt(index, sender) => {
                let removed = state.remove_at(index);
                sender.send(removed.map(|_| state.clone()))?;
            }
            RouteMsg::RemoveNear(lat, lon, sender) => {
                let res = match nearest_waypoint(lat, lon, state) {
                    Some(index) => {
                        debug!("click ({lat}, {lon}) hits #{index}");
                        state.remove_at(index).map(|_| state.clone())
                    }
                    None => None,
                };
                sender.send(res)?;
            }
            RouteMsg::Reverse(sender) => {
                let res = if state.len() > 1 {
                    state.reverse();
                    Some(state.clone())
                } else {
                    None
                };
                sender.send(res)?;
            }
            RouteMsg::Clear(sender) => {
                let res = if state.is_empty() {
                    None
                } else {
                    state.clear();
                    Some(state.clone())
                };
                sender.send(res)?;
            }
            RouteMsg::Get(sender) => {
                sender.send(state.clone())?;
            }
        }
        Ok(())
    }
}
