//! Library part of the `planctl` utility.
//!
//! Command-line parsing, the configuration file, the editing commands and the text rendering of
//! routes and navigation logs.  The editing itself is done by `navplot-engine`.
//!

pub use cli::*;
pub use cmds::*;
pub use config::*;
pub use error::*;
pub use parse::*;
pub use table::*;

mod cli;
mod cmds;
mod config;
mod error;
mod parse;
mod table;
