//! Parsing of points, wind and editing commands.
//!

use std::str::FromStr;

use navplot_engine::{Endpoint, Waypoint};

use crate::Status;

/// `LAT,LON` or `LAT,LON,IDENT`, decimal degrees.
///
pub fn parse_point(s: &str) -> Result<Waypoint, Status> {
    let bad = || Status::BadPoint(s.to_string());

    let mut it = s.splitn(3, ',').map(str::trim);
    let lat: f64 = it.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;
    let lon: f64 = it.next().ok_or_else(bad)?.parse().map_err(|_| bad())?;

    if !(-90. ..=90.).contains(&lat) || !(-180. ..=180.).contains(&lon) {
        return Err(bad());
    }

    Ok(match it.next() {
        Some(ident) if !ident.is_empty() => Waypoint::named(lat, lon, ident),
        _ => Waypoint::new(lat, lon),
    })
}

/// `DIR/SPEED`, degrees and knots.
///
pub fn parse_wind(s: &str) -> Result<(u32, u32), Status> {
    let bad = || Status::BadWind(s.to_string());

    let (dir, speed) = s.split_once('/').ok_or_else(bad)?;
    let dir = dir.trim().parse().map_err(|_| bad())?;
    let speed = speed.trim().parse().map_err(|_| bad())?;
    Ok((dir, speed))
}

/// One line of an editing session.
///
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// `add LAT LON [IDENT]`, chart left-click
    Add(Waypoint),
    /// `rm LAT LON`, chart right-click
    Remove(f64, f64),
    /// `promote ROW start|end`, log cell left-click
    Promote(usize, Endpoint),
    /// `del ROW start|end`, log cell right-click
    Delete(usize, Endpoint),
    Reverse,
    Clear,
    Tas(u32),
    Wind(u32, u32),
    Magdec(i32),
    Show,
    Ticks,
    Help,
    Quit,
}

pub const USAGE: &str = r##"Commands:
  add LAT LON [IDENT]     append a waypoint
  rm LAT LON              remove the waypoint nearest to that position
  promote ROW start|end   append a log row endpoint
  del ROW start|end       remove a log row endpoint
  reverse                 reverse the route
  clear                   remove every waypoint
  tas KT                  true airspeed
  wind DIR SPEED          wind direction and speed
  magdec DEG              magnetic declination
  show                    route and navigation log
  ticks                   tick marks along every leg
  quit"##;

fn arg<T: FromStr>(args: &[&str], i: usize, cmd: &str, usage: &'static str) -> Result<T, Status> {
    args.get(i)
        .and_then(|a| a.parse().ok())
        .ok_or_else(|| Status::BadArguments(cmd.to_string(), usage))
}

impl FromStr for Command {
    type Err = Status;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = s.split_whitespace().collect();
        let Some((cmd, args)) = words.split_first() else {
            return Err(Status::UnknownCommand(String::new()));
        };

        let c = match cmd.to_lowercase().as_str() {
            "add" | "a" => {
                let usage = "add LAT LON [IDENT]";
                let lat: f64 = arg(args, 0, cmd, usage)?;
                let lon: f64 = arg(args, 1, cmd, usage)?;
                let point = match args.get(2) {
                    Some(ident) => format!("{lat},{lon},{ident}"),
                    None => format!("{lat},{lon}"),
                };
                Command::Add(parse_point(&point)?)
            }
            "rm" => {
                let usage = "rm LAT LON";
                Command::Remove(arg(args, 0, cmd, usage)?, arg(args, 1, cmd, usage)?)
            }
            "promote" | "p" => {
                let usage = "promote ROW start|end";
                Command::Promote(arg(args, 0, cmd, usage)?, arg(args, 1, cmd, usage)?)
            }
            "del" | "d" => {
                let usage = "del ROW start|end";
                Command::Delete(arg(args, 0, cmd, usage)?, arg(args, 1, cmd, usage)?)
            }
            "reverse" => Command::Reverse,
            "clear" => Command::Clear,
            "tas" => Command::Tas(arg(args, 0, cmd, "tas KT")?),
            "wind" => {
                let usage = "wind DIR SPEED";
                Command::Wind(arg(args, 0, cmd, usage)?, arg(args, 1, cmd, usage)?)
            }
            "magdec" => Command::Magdec(arg(args, 0, cmd, "magdec DEG")?),
            "show" | "s" => Command::Show,
            "ticks" => Command::Ticks,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => return Err(Status::UnknownCommand(cmd.to_string())),
        };
        Ok(c)
    }
}
