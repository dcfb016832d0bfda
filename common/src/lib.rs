//! This library is there to share some common code amongst all navplot modules.
//!
//! - `ConfigFile` finds and loads the HCL configuration files,
//! - `init_logging` sets up the `tracing` subscriber stack for binaries.
//!

use clap::{crate_name, crate_version};

pub use config::*;
pub use logging::*;

mod config;
mod logging;
mod macros;

const NAME: &str = crate_name!();
const VERSION: &str = crate_version!();

pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}

/// Any configuration file carries a version number to check against what the code expects.
///
pub trait Versioned {
    /// Version this code knows how to read.
    const VERSION: usize;

    /// Version found in the loaded data.
    fn version(&self) -> usize;
}
