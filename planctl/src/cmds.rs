//! Implementation of the `plan`, `edit`, `settings` and `health` commands.
//!

use std::io::{BufRead, Write};

use eyre::{eyre, Result};
use tracing::{info, trace, warn};

use navplot_engine::{
    Chart, FlightParams, FlightPlanRequest, HttpEngine, NavLogEngine, PlanError, PlanView, Route,
    Session, SettingsStore,
};

use crate::{
    navlog_table, parse_point, parse_wind, route_table, ticks_table, Command, PlanOpts, Status,
    USAGE,
};

/// One-shot navigation log for the points on the command line.
///
#[tracing::instrument(skip(engine))]
pub async fn plan_route(engine: &dyn NavLogEngine, popts: &PlanOpts) -> Result<String> {
    let route: Route = popts
        .points
        .iter()
        .map(|p| parse_point(p))
        .collect::<Result<Route, Status>>()?;
    if !route.has_legs() {
        return Err(Status::NotEnoughPoints.into());
    }

    let (direction, speed) = parse_wind(&popts.wind)?;
    let params = FlightParams::default()
        .with_tas(popts.tas)
        .with_wind(direction, speed)
        .with_declination(popts.magdec);
    if !params.is_valid() {
        return Err(PlanError::Validation.into());
    }

    let req = FlightPlanRequest::new(&route, &params);
    let plan = engine.compute(&req).await.map_err(|e| {
        warn!("{e}");
        PlanError::Connectivity
    })?;
    info!("{} legs, {} min", plan.nav_log.rows.len(), plan.nav_log.total_time_min);

    if popts.json {
        return Ok(serde_json::to_string_pretty(&plan)?);
    }

    let mut out = navlog_table(&plan.nav_log);
    if popts.ticks {
        let chart = Chart::build(&route, Some(&plan));
        out.push('\n');
        out.push_str(&ticks_table(&chart));
    }
    Ok(out)
}

/// Print whether a gesture did something.
///
fn report<W: Write>(out: &mut W, changed: bool) -> Result<()> {
    writeln!(out, "{}", if changed { "ok" } else { "no change" })?;
    Ok(())
}

fn show_view<W: Write>(out: &mut W, view: &PlanView) -> Result<()> {
    match (&view.error, &view.plan) {
        (Some(e), _) => writeln!(out, "{e}")?,
        (None, Some(plan)) => writeln!(out, "{}", navlog_table(&plan.nav_log))?,
        (None, None) => writeln!(out, "No navigation log, need at least two points")?,
    }
    Ok(())
}

/// Read a yes/no answer from the session input, anything but yes is no.
///
fn confirm<W, I>(out: &mut W, lines: &mut I, question: &str) -> Result<bool>
where
    W: Write,
    I: Iterator<Item = std::io::Result<String>>,
{
    write!(out, "{question} [y/N] ")?;
    out.flush()?;
    let answer = match lines.next() {
        Some(line) => line?,
        None => return Ok(false),
    };
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Editing session, one command per input line until `quit` or end of input.
///
#[tracing::instrument(skip(session, input, out))]
pub async fn edit_session<R, W>(session: &mut Session, input: R, out: &mut W, quiet: bool) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        if !quiet {
            write!(out, "> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let cmd = match line.parse::<Command>() {
            Ok(cmd) => cmd,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };
        trace!("{cmd:?}");

        match cmd {
            Command::Add(wp) => {
                let changed = session.append(wp).await?;
                report(out, changed)?;
            }
            Command::Remove(lat, lon) => {
                let changed = session.right_click(lat, lon).await?;
                report(out, changed)?;
            }
            Command::Promote(row, which) => {
                // rows are the ones of the log being displayed
                session.settle().await?;
                let changed = session.row_click(row, which).await?;
                report(out, changed)?;
            }
            Command::Delete(row, which) => {
                let changed = session.row_right_click(row, which).await?;
                report(out, changed)?;
            }
            Command::Reverse => {
                let changed = session.reverse().await?;
                report(out, changed)?;
            }
            Command::Clear => {
                let yes = confirm(out, &mut lines, "Clear the whole route?")?;
                let changed = session.clear(|| yes).await?;
                report(out, changed)?;
            }
            Command::Tas(tas) => {
                let changed = session.set_tas(tas)?;
                report(out, changed)?;
            }
            Command::Wind(direction, speed) => {
                let changed = session.set_wind(direction, speed)?;
                report(out, changed)?;
            }
            Command::Magdec(declination) => {
                let changed = session.set_declination(declination)?;
                report(out, changed)?;
            }
            Command::Show => {
                let view = session.settle().await?;
                let route = session.route().await?;
                writeln!(out, "{}", route_table(&route))?;
                let p = session.params();
                writeln!(
                    out,
                    "TAS {} kt, wind {:03}°/{} kt, declination {}°",
                    p.tas, p.wind_direction, p.wind_speed, p.magnetic_declination
                )?;
                show_view(out, &view)?;
            }
            Command::Ticks => {
                session.settle().await?;
                let chart = session.chart().await?;
                writeln!(out, "{}", ticks_table(&chart))?;
            }
            Command::Help => writeln!(out, "{USAGE}")?,
            Command::Quit => break,
        }
    }
    Ok(())
}

/// Persisted settings, as stored.
///
pub fn show_settings(store: &SettingsStore) -> Result<String> {
    let settings = store.load();
    let mut out = format!("Settings from {}\n", store.path().display());
    out.push_str(&serde_json::to_string_pretty(&settings)?);
    out.push('\n');
    out.push_str(&route_table(&settings.route));
    Ok(out)
}

/// Is the engine up?
///
pub async fn check_health(engine: &HttpEngine) -> Result<String> {
    if engine.health().await {
        Ok(format!("Engine at {} is up", engine.base_url()))
    } else {
        Err(eyre!("Engine at {} is down", engine.base_url()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use navplot_engine::{
        AircraftOutput, EngineError, FlightPlanResponse, Leg, NavLog, NavLogRow, RouteOutput,
        Wind, SETTINGS_FILE,
    };
    use tempfile::tempdir;

    /// Answers every leg with 12 minutes.
    #[derive(Debug)]
    struct Local;

    #[async_trait]
    impl NavLogEngine for Local {
        async fn compute(
            &self,
            req: &FlightPlanRequest,
        ) -> Result<FlightPlanResponse, EngineError> {
            let rows: Vec<NavLogRow> = req
                .route_points
                .windows(2)
                .map(|w| NavLogRow {
                    leg: Leg {
                        start_point: w[0].clone(),
                        end_point: w[1].clone(),
                        distance_nm: 20.,
                        true_course: 90.,
                        magnetic_declination: 6.,
                    },
                    wind: Wind::default(),
                    ground_speed: 100.,
                    wca: -3.,
                    true_heading: 87.,
                    magnetic_heading: 81.,
                    time_min: 12.,
                })
                .collect();
            let n = rows.len() as f64;
            Ok(FlightPlanResponse {
                route: RouteOutput::default(),
                aircraft: AircraftOutput {
                    registration: req.aircraft.registration.clone(),
                    model: req.aircraft.model.clone(),
                    tas: f64::from(req.aircraft.tas),
                    gph: 0.,
                },
                wind: Wind::default(),
                nav_log: NavLog {
                    rows,
                    total_time_min: 12. * n,
                    total_distance_nm: 20. * n,
                },
            })
        }
    }

    fn popts(points: &[&str]) -> PlanOpts {
        PlanOpts {
            tas: 100,
            wind: "0/0".into(),
            magdec: 0,
            ticks: false,
            json: false,
            points: points.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_plan_route() {
        let out = plan_route(&Local, &popts(&["52.0,19.0", "52.5,19.5,ABC"]))
            .await
            .unwrap();

        assert!(out.contains("ABC"));
        assert!(out.contains("-3"));
        assert!(out.contains("TOTAL"));
    }

    #[tokio::test]
    async fn test_plan_route_ticks() {
        let mut o = popts(&["52.0,19.0", "52.5,19.5"]);
        o.ticks = true;
        let out = plan_route(&Local, &o).await.unwrap();

        assert!(out.contains("Course"));
    }

    #[tokio::test]
    async fn test_plan_route_one_point() {
        let res = plan_route(&Local, &popts(&["52.0,19.0"])).await;
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn test_plan_route_wind() {
        let mut o = popts(&["52.0,19.0", "52.5,19.5"]);
        o.wind = "0/150".into();
        let err = plan_route(&Local, &o).await.unwrap_err();

        assert_eq!(
            Some(&PlanError::Validation),
            err.downcast_ref::<PlanError>()
        );
    }

    #[tokio::test]
    async fn test_edit_session() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(&dir.path().join(SETTINGS_FILE));
        let mut session = Session::new(Arc::new(Local), store.clone(), Duration::from_millis(10))
            .await
            .unwrap();

        let script = "\
add 52 19
add 52.5 19.5 ABC
# comment
bogus
promote 0 start
del 1 end
show
clear
n
wind 0 150
show
quit
add 1 1
";
        let mut out = Vec::new();
        edit_session(&mut session, Cursor::new(script), &mut out, true)
            .await
            .unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("Unknown command bogus"));
        assert!(out.contains("TOTAL"));
        assert!(out.contains("[y/N]"));
        assert!(out.contains("Wind speed cannot be greater than or equal to TAS"));

        // the route is [WP1, ABC] after the promote and delete, quit stops before the last add
        let route = session.route().await.unwrap();
        assert_eq!(2, route.len());
        assert_eq!(Some("ABC"), route[1].ident.as_deref());
        assert_eq!(2, store.load().route.len());
        session.stop();
    }

    #[tokio::test]
    async fn test_edit_session_params() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::new(&dir.path().join(SETTINGS_FILE));
        let mut session = Session::new(Arc::new(Local), store.clone(), Duration::from_millis(10))
            .await
            .unwrap();

        let script = "\
tas 100
tas 120
tas 120
wind 90 10
wind 450 10
magdec 6
";
        let mut out = Vec::new();
        edit_session(&mut session, Cursor::new(script), &mut out, true)
            .await
            .unwrap();
        let out = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            vec!["no change", "ok", "no change", "ok", "no change", "no change"],
            lines
        );
        assert_eq!(120, store.load().tas);
        session.stop();
    }
}
