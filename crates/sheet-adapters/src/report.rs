//! Reporte diario: gráfico SVG de los últimos días y resumen HTML.
//!
//! El gráfico se embebe en el correo como `<img>` con data URI base64 para
//! no depender de adjuntos.
use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDate;
use minijinja::context;
use serde::Serialize;
use sheet_domain::DailyCounts;

use crate::mail::SUBJECT_PREFIX;
use crate::templates::{self, CHART, REPORT};

pub const REPORT_DAYS: u32 = 5;
pub const NO_DATA_MESSAGE: &str = "No data available for the selected period.";

const WIDTH: f64 = 700.0;
const HEIGHT: f64 = 350.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 50.0;

pub fn report_subject() -> String {
    format!("{SUBJECT_PREFIX} Daily report")
}

#[derive(Serialize)]
struct Tick {
    y: f64,
    value: usize,
}

#[derive(Serialize)]
struct DayLabel {
    x: f64,
    day: String,
}

#[derive(Serialize)]
struct Dot {
    x: f64,
    y: f64,
    day: String,
    value: usize,
}

#[derive(Serialize)]
struct Series {
    label: &'static str,
    color: &'static str,
    points: String,
    dots: Vec<Dot>,
}

/// Gráfico de líneas Success/Failed por día. Cada punto lleva un `<title>`
/// con su conteo.
pub fn render_chart_svg(series: &[(NaiveDate, DailyCounts)]) -> Result<String, minijinja::Error> {
    let max = series.iter().map(|(_, c)| c.success.max(c.failed)).max().unwrap_or(0).max(1) as f64;
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let step = if series.len() > 1 { plot_w / (series.len() - 1) as f64 } else { 0.0 };
    let x = |i: usize| MARGIN_LEFT + step * i as f64;
    let y = |v: usize| MARGIN_TOP + plot_h - (v as f64 / max) * plot_h;
    let day = |d: &NaiveDate| d.format("%Y-%m-%d").to_string();

    let top_tick = max as usize;
    let ticks: Vec<Tick> = (0..=top_tick).step_by(top_tick.div_ceil(5).max(1))
                                         .map(|v| Tick { y: y(v), value: v })
                                         .collect();
    let labels: Vec<DayLabel> = series.iter()
                                      .enumerate()
                                      .map(|(i, (d, _))| DayLabel { x: x(i), day: day(d) })
                                      .collect();

    let picks: [(&'static str, &'static str, fn(&DailyCounts) -> usize); 2] =
        [("Success", "green", success_count), ("Failed", "red", failed_count)];
    let lines: Vec<Series> = picks.into_iter()
                                  .map(|(label, color, pick)| {
                                      let dots: Vec<Dot> = series.iter()
                                                                 .enumerate()
                                                                 .map(|(i, (d, c))| Dot { x: x(i),
                                                                                          y: y(pick(c)),
                                                                                          day: day(d),
                                                                                          value: pick(c) })
                                                                 .collect();
                                      let points = dots.iter().map(|p| format!("{},{}", p.x, p.y)).collect::<Vec<_>>().join(" ");
                                      Series { label, color, points, dots }
                                  })
                                  .collect();

    templates::render(CHART,
                      context! {
                          width => WIDTH,
                          height => HEIGHT,
                          left => MARGIN_LEFT,
                          right => WIDTH - MARGIN_RIGHT,
                          top => MARGIN_TOP,
                          base => MARGIN_TOP + plot_h,
                          center_x => WIDTH / 2.0,
                          center_plot_x => MARGIN_LEFT + plot_w / 2.0,
                          center_plot_y => MARGIN_TOP + plot_h / 2.0,
                          legend_x => WIDTH - MARGIN_RIGHT - 90.0,
                          days => series.len(),
                          ticks => ticks,
                          labels => labels,
                          lines => lines,
                      })
}

fn success_count(c: &DailyCounts) -> usize {
    c.success
}

fn failed_count(c: &DailyCounts) -> usize {
    c.failed
}

#[derive(Serialize)]
struct DayCounts {
    date: String,
    success: usize,
    failed: usize,
}

/// Cuerpo HTML del reporte: gráfico y conteos por fecha (todas las fechas
/// con datos, no sólo las del gráfico).
pub fn compose_report_body(grouped: &BTreeMap<NaiveDate, DailyCounts>, chart_svg: &str) -> Result<String, minijinja::Error> {
    let days: Vec<DayCounts> = grouped.iter()
                                      .map(|(date, counts)| DayCounts { date: date.to_string(),
                                                                        success: counts.success,
                                                                        failed: counts.failed })
                                      .collect();
    templates::render(REPORT,
                      context! {
                          chart_base64 => STANDARD.encode(chart_svg.as_bytes()),
                          days => days,
                          no_data => NO_DATA_MESSAGE,
                      })
}
