//! The route being edited.
//!
//! Order of the waypoints is flight order.  The only mutations are the ones below, anything
//! touching the route goes through them (see `RouteActor` for the single owner).
//!

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::Waypoint;

/// Two points closer than this on both axes are the same point for `promote()`.
pub const SAME_POINT: f64 = 1e-6;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Route(Vec<Waypoint>);

impl Route {
    pub fn new() -> Self {
        Route(Vec::new())
    }

    /// Do we have at least one leg?
    ///
    #[inline]
    pub fn has_legs(&self) -> bool {
        self.0.len() >= 2
    }

    pub fn append(&mut self, wp: Waypoint) {
        trace!("append({wp})");
        self.0.push(wp);
    }

    /// Append unless the last waypoint is already there.  Returns whether the route changed.
    ///
    pub fn promote(&mut self, wp: Waypoint) -> bool {
        match self.0.last() {
            Some(last)
                if (last.lat - wp.lat).abs() < SAME_POINT
                    && (last.lon - wp.lon).abs() < SAME_POINT =>
            {
                trace!("promote({wp}): same as last, ignored");
                false
            }
            _ => {
                self.append(wp);
                true
            }
        }
    }

    /// Out of range is a no-op.  Returns the removed waypoint if any.
    ///
    pub fn remove_at(&mut self, index: usize) -> Option<Waypoint> {
        if index < self.0.len() {
            trace!("remove_at({index})");
            Some(self.0.remove(index))
        } else {
            trace!("remove_at({index}): out of range");
            None
        }
    }

    pub fn reverse(&mut self) {
        self.0.reverse();
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl Deref for Route {
    type Target = [Waypoint];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Waypoint>> for Route {
    fn from(value: Vec<Waypoint>) -> Self {
        Route(value)
    }
}

impl FromIterator<Waypoint> for Route {
    fn from_iter<T: IntoIterator<Item = Waypoint>>(iter: T) -> Self {
        Route(iter.into_iter().collect())
    }
}
