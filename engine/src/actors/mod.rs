//! Actors owning the mutable parts of a session.
//!

pub use planner::*;
pub use route::*;

mod planner;
mod route;
