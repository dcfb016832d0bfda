//! Text rendering of the navigation log, the route and the tick marks.
//!

use tabled::builder::Builder;
use tabled::settings::Style;

use navplot_engine::{format_coord, Chart, NavLog, NavLogRow, Waypoint};

/// Headers of the navigation log.
const HEADER: [&str; 9] = [
    "FROM",
    "TO",
    "TC [°]",
    "WCA [°]",
    "TH [°]",
    "MH [°]",
    "DIST [NM]",
    "GS [KT]",
    "TIME [MIN]",
];

/// Wind correction angle, `+` when positive.
///
fn signed(wca: f64) -> String {
    if wca > 0. {
        format!("+{wca}")
    } else {
        format!("{wca}")
    }
}

fn row_to_record(index: usize, row: &NavLogRow) -> Vec<String> {
    vec![
        row.leg.start_point.label(index),
        row.leg.end_point.label(index + 1),
        row.leg.true_course.to_string(),
        signed(row.wca),
        row.true_heading.to_string(),
        row.magnetic_heading.to_string(),
        row.leg.distance_nm.to_string(),
        row.ground_speed.to_string(),
        row.time_min.to_string(),
    ]
}

/// The log with its TOTAL footer.
///
pub fn navlog_table(log: &NavLog) -> String {
    let mut builder = Builder::default();
    builder.push_record(HEADER);

    for (i, row) in log.rows.iter().enumerate() {
        builder.push_record(row_to_record(i, row));
    }

    let mut total = vec![String::new(); HEADER.len()];
    total[0] = "TOTAL".into();
    total[6] = log.total_distance_nm.to_string();
    total[8] = log.total_time_min.to_string();
    builder.push_record(total);

    builder.build().with(Style::modern()).to_string()
}

/// One line per waypoint.
///
pub fn route_table(route: &[Waypoint]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["#", "Name", "Position", "Lat", "Lon"]);

    for (i, wp) in route.iter().enumerate() {
        builder.push_record([
            i.to_string(),
            wp.label(i),
            wp.coords(),
            format!("{:.5}", wp.lat),
            format!("{:.5}", wp.lon),
        ]);
    }

    builder.build().with(Style::modern()).to_string()
}

/// Every tick mark of the chart.
///
pub fn ticks_table(chart: &Chart) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Leg", "Min", "Position", "Course", "From", "To"]);

    let mut last = None;
    let mut minute = 0;
    for mark in &chart.ticks {
        minute = if last == Some(mark.row) { minute + 5 } else { 5 };
        last = Some(mark.row);

        let [a, b] = mark.line;
        builder.push_record([
            (mark.row + 1).to_string(),
            minute.to_string(),
            format!("{} {}", format_coord(mark.tick.lat), format_coord(mark.tick.lon)),
            format!("{:.0}", mark.tick.orientation),
            format!("{:.4},{:.4}", a.0, a.1),
            format!("{:.4},{:.4}", b.0, b.1),
        ]);
    }

    builder.build().with(Style::modern()).to_string()
}
