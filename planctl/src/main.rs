use std::io;
use std::sync::Arc;

use clap::{crate_authors, crate_description, crate_version, Parser};
use eyre::Result;
use tracing::{info, trace};

use navplot_common::{init_logging, ConfigFile};
use navplot_engine::{HttpEngine, Session, SettingsStore, SETTINGS_FILE};
use planctl::{
    check_health, edit_session, plan_route, show_settings, Config, Opts, SubCommand, USAGE,
};

/// Binary name, using a different binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

#[tokio::main]
async fn main() -> Result<()> {
    let opts = Opts::parse();

    // Initialise logging.
    //
    init_logging(NAME, opts.debug, opts.log_dir.clone())?;

    // Load configuration, defaults if there is none.
    //
    let cfg = ConfigFile::<Config>::load(opts.config.as_deref())?;
    let settings = match &cfg.inner().settings {
        Some(path) => path.clone(),
        None => cfg.config_path().join(SETTINGS_FILE),
    };
    trace!("config = {:?}, settings = {settings:?}", cfg.inner());

    let url = opts.url.clone().unwrap_or_else(|| cfg.inner().engine.url.clone());
    let engine = HttpEngine::new(&url, cfg.inner().engine.timeout())?;
    let store = SettingsStore::new(&settings);

    match &opts.subcmd {
        // Handle `plan points...`
        //
        SubCommand::Plan(popts) => {
            trace!("plan");

            let out = plan_route(&engine, popts).await?;
            println!("{out}");
        }

        // Handle `edit`
        //
        SubCommand::Edit(eopts) => {
            trace!("edit");

            banner()?;
            if !eopts.quiet {
                eprintln!("{USAGE}");
            }

            let mut session = Session::new(Arc::new(engine), store, cfg.inner().debounce()).await?;
            let stdin = io::stdin().lock();
            let mut stdout = io::stdout();
            edit_session(&mut session, stdin, &mut stdout, eopts.quiet).await?;
            session.stop();
            info!("session saved in {settings:?}");
        }

        // Handle `settings`
        //
        SubCommand::Settings => {
            println!("{}", show_settings(&store)?);
        }

        // Handle `health`
        //
        SubCommand::Health => {
            println!("{}", check_health(&engine).await?);
        }

        // Standalone `version` command
        //
        SubCommand::Version => {
            eprintln!("{}", version());
            eprintln!("Modules: ");
            eprintln!("\t{}", navplot_common::version());
            eprintln!("\t{}", navplot_engine::version());
        }
    }
    Ok(())
}

/// Return our version number
///
#[inline]
pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}

/// Display banner
///
fn banner() -> Result<()> {
    Ok(eprintln!(
        r##"
{}/{} by {}
{}
"##,
        NAME,
        VERSION,
        AUTHORS,
        crate_description!()
    ))
}
