//! Module describing all possible commands and sub-commands to the `planctl` main driver
//!
//! We have four commands:
//!
//! - `plan` computes the navigation log for a route given on the command line and prints it,
//! - `edit` opens an editing session, reading one gesture per line from stdin,
//! - `settings` prints what is persisted between sessions,
//! - `health` checks whether the navigation log engine is up.
//!
//! The engine URL and the session file come from the configuration file, see `Config`.
//!

use std::path::PathBuf;

use clap::{crate_authors, crate_description, crate_name, crate_version, Parser};

/// CLI options
#[derive(Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// configuration file.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// debug mode, hierarchical traces.
    #[clap(short = 'D', long = "debug")]
    pub debug: bool,
    /// Also write traces in this directory.
    #[clap(short = 'L', long)]
    pub log_dir: Option<PathBuf>,
    /// Engine URL, overrides the configuration file.
    #[clap(short = 'U', long)]
    pub url: Option<String>,
    /// Sub-commands (see below).
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

// ------

/// All sub-commands:
///
/// `plan [--tas N] [--wind DIR/SPEED] [--magdec N] [--ticks] POINT...`
/// `edit`
/// `settings`
/// `health`
/// `version`
///
#[derive(Debug, Parser)]
pub enum SubCommand {
    /// One-shot navigation log
    Plan(PlanOpts),
    /// Interactive editing session on stdin
    Edit(EditOpts),
    /// Show persisted settings
    Settings,
    /// Check the navigation log engine
    Health,
    /// List modules versions
    Version,
}

// ------

/// Options for a one-shot plan.  Points are `LAT,LON` or `LAT,LON,IDENT`.
///
#[derive(Debug, Parser)]
pub struct PlanOpts {
    /// True airspeed (kt)
    #[clap(short = 'T', long, default_value = "100")]
    pub tas: u32,
    /// Wind as DIR/SPEED (°/kt)
    #[clap(short = 'W', long, default_value = "0/0")]
    pub wind: String,
    /// Magnetic declination (°, east positive)
    #[clap(short = 'M', long, default_value = "6", allow_hyphen_values = true)]
    pub magdec: i32,
    /// Also list the tick marks of every leg
    #[clap(long)]
    pub ticks: bool,
    /// Output as JSON instead of a table
    #[clap(short = 'J', long)]
    pub json: bool,
    /// Route points
    #[clap(required = true, allow_hyphen_values = true)]
    pub points: Vec<String>,
}

// ------

/// Options for an editing session.
///
#[derive(Debug, Parser)]
pub struct EditOpts {
    /// Do not print the prompt (for scripts)
    #[clap(short = 'q', long)]
    pub quiet: bool,
}
