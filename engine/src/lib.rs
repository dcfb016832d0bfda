//! Route editing and chart annotation engine.
//!
//! A route is built point by point from chart clicks and from the navigation log table, the log
//! itself is computed by a remote engine every time the route or the flight parameters settle
//! down, and the chart gets dead-reckoning tick marks along every leg.
//!
//! - `geometry` and `hit` are pure functions,
//! - `route` is the set of allowed edits, owned at runtime by `actors::RouteActor`,
//! - `sync` is the debounce/generation logic, driven by `actors::PlannerActor`,
//! - `session` ties these together with the settings store.
//!

use clap::{crate_name, crate_version};

pub use chart::*;
pub use client::*;
pub use error::*;
pub use geometry::*;
pub use hit::*;
pub use navlog::*;
pub use params::*;
pub use route::*;
pub use session::*;
pub use settings::*;
pub use sidebar::*;
pub use sync::*;
pub use waypoint::*;

pub mod actors;
mod chart;
mod client;
mod error;
mod geometry;
mod hit;
mod navlog;
mod params;
mod route;
mod session;
mod settings;
mod sidebar;
mod sync;
mod waypoint;

#[cfg(test)]
mod testing;

pub fn version() -> String {
    format!("{}/{}", crate_name!(), crate_version!())
}
