//! Text and JSON rendering of an analysis view

use crate::cli::{ChartKind, OutputFormat};
use anyhow::Result;
use edufert::{AnalysisView, LinearFit, StatisticsState, Year};
use serde::Serialize;
use serde_json::json;
use std::fmt::Write;

#[derive(Serialize)]
struct Point<'a> {
    country_code: &'a str,
    country_name: &'a str,
    year: Year,
    enrollment_rate: f64,
    fertility_rate: f64,
}

fn points(view: &AnalysisView) -> Vec<Point<'_>> {
    view.filtered
        .iter()
        .filter_map(|r| {
            let (x, y) = r.pair()?;
            Some(Point {
                country_code: r.country_code.as_str(),
                country_name: &r.labels.fertility,
                year: r.year,
                enrollment_rate: x,
                fertility_rate: y,
            })
        })
        .collect()
}

/// Endpoints of the fitted line across the observed enrollment range
fn fit_line(view: &AnalysisView, fit: &LinearFit) -> Option<[(f64, f64); 2]> {
    let mut xs = view.filtered.pairs().map(|(x, _)| x);
    let first = xs.next()?;
    let (lo, hi) = xs.fold((first, first), |(lo, hi), x| (lo.min(x), hi.max(x)));
    Some([(lo, fit.predict(lo)), (hi, fit.predict(hi))])
}

pub fn render(view: &AnalysisView, chart: ChartKind, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(view, chart),
        OutputFormat::Text => Ok(render_text(view, chart)?),
    }
}

fn render_json(view: &AnalysisView, chart: ChartKind) -> Result<String> {
    let data = match chart {
        ChartKind::Scatter => json!({ "points": points(view) }),
        ChartKind::ScatterFit => {
            let fit = view.statistics.summary().map(|s| &s.regression);
            json!({
                "points": points(view),
                "fit": fit,
                "line": fit.and_then(|fit| fit_line(view, fit)),
            })
        }
        ChartKind::Box => json!({ "distribution": view.distribution }),
        ChartKind::Heatmap => json!({ "pivot": view.pivot }),
        ChartKind::DualAxis => json!({ "series": view.series }),
    };
    let report = json!({
        "records": view.filtered.len(),
        "statistics": view.statistics,
        "chart": chart,
        "data": data,
    });
    Ok(serde_json::to_string_pretty(&report)?)
}

fn render_text(view: &AnalysisView, chart: ChartKind) -> std::result::Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Records: {}", view.filtered.len())?;
    match &view.statistics {
        StatisticsState::Ready(summary) => writeln!(out, "{summary}")?,
        StatisticsState::NoData => writeln!(out, "No data for the current selection")?,
        StatisticsState::Insufficient { reason } => writeln!(out, "{reason}")?,
    }
    writeln!(out)?;

    match chart {
        ChartKind::Scatter | ChartKind::ScatterFit => {
            writeln!(out, "code\tyear\tenrollment\tfertility")?;
            for p in points(view) {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    p.country_code, p.year, p.enrollment_rate, p.fertility_rate
                )?;
            }
            if chart == ChartKind::ScatterFit {
                if let Some(fit) = view.statistics.summary().map(|s| &s.regression) {
                    writeln!(out, "fit: {fit}")?;
                }
            }
        }
        ChartKind::Box => {
            writeln!(out, "year\tn\tmin\tq1\tmedian\tq3\tmax")?;
            for d in &view.distribution {
                writeln!(
                    out,
                    "{}\t{}\t{:.3}\t{:.3}\t{:.3}\t{:.3}\t{:.3}",
                    d.year, d.count, d.min, d.q1, d.median, d.q3, d.max
                )?;
            }
        }
        ChartKind::Heatmap => {
            write!(out, "country")?;
            for year in view.pivot.years() {
                write!(out, "\t{year}")?;
            }
            writeln!(out)?;
            for row in view.pivot.rows() {
                write!(out, "{}", row.label)?;
                for cell in &row.cells {
                    match cell {
                        Some(v) => write!(out, "\t{v:.2}")?,
                        None => write!(out, "\t-")?,
                    }
                }
                writeln!(out)?;
            }
        }
        ChartKind::DualAxis => {
            if view.series.is_empty() {
                writeln!(out, "Select at least one country for the dual-axis view")?;
            }
            for s in &view.series {
                writeln!(out, "{} ({})", s.label, s.country_code)?;
                writeln!(out, "year\tfertility\tenrollment")?;
                let enrollment: std::collections::BTreeMap<Year, f64> =
                    s.enrollment.iter().copied().collect();
                for &(year, fertility) in &s.fertility {
                    let e = enrollment
                        .get(&year)
                        .map_or_else(|| "-".to_string(), |v| v.to_string());
                    writeln!(out, "{year}\t{fertility}\t{e}")?;
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use edufert::{inner_join, Selection, Session, WideRow, WideTable};

    fn session() -> Session {
        let enrollment = WideTable::new(
            "Female Enrollment Rate",
            vec![2015, 2016],
            vec![
                WideRow::new("Chinaland", "CHN", vec![Some(90.1), Some(91.0)]),
                WideRow::new("Atlantis", "ATL", vec![Some(40.0), Some(42.0)]),
            ],
        )
        .unwrap();
        let fertility = WideTable::new(
            "TFR",
            vec![2015, 2016],
            vec![
                WideRow::new("Chinaland", "CHN", vec![Some(1.6), Some(1.5)]),
                WideRow::new("Atlantis", "ATL", vec![Some(4.1), Some(4.0)]),
            ],
        )
        .unwrap();
        Session::from_dataset(inner_join(&enrollment.melt(), &fertility.melt()).unwrap())
    }

    #[test]
    fn test_text_scatter_fit() {
        let view = session().recompute(&Selection::all()).unwrap();
        let text = render(&view, ChartKind::ScatterFit, OutputFormat::Text).unwrap();
        assert!(text.starts_with("Records: 4\n"));
        assert!(text.contains("Pearson correlation:"));
        assert!(text.contains("CHN\t2015\t90.1\t1.6"));
        assert!(text.contains("fit: y = "));
    }

    #[test]
    fn test_no_data_message() {
        let view = session()
            .recompute(&Selection::all().with_countries(["XXX"]))
            .unwrap();
        let text = render(&view, ChartKind::Scatter, OutputFormat::Text).unwrap();
        assert!(text.contains("No data for the current selection"));
    }

    #[test]
    fn test_json_heatmap() {
        let view = session().recompute(&Selection::all()).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&render(&view, ChartKind::Heatmap, OutputFormat::Json).unwrap())
                .unwrap();
        assert_eq!(json["records"], 4);
        assert_eq!(json["chart"], "heatmap");
        assert_eq!(json["statistics"]["state"], "ready");
        assert_eq!(json["data"]["pivot"]["years"][0], 2015);
    }

    #[test]
    fn test_dual_axis_needs_countries() {
        let s = session();
        let text = render(
            &s.recompute(&Selection::all()).unwrap(),
            ChartKind::DualAxis,
            OutputFormat::Text,
        )
        .unwrap();
        assert!(text.contains("Select at least one country"));

        let text = render(
            &s.recompute(&Selection::all().with_countries(["CHN"])).unwrap(),
            ChartKind::DualAxis,
            OutputFormat::Text,
        )
        .unwrap();
        assert!(text.contains("Chinaland (CHN)"));
        assert!(text.contains("2016\t1.5\t91"));
    }
}
