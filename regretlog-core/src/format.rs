//! Formatting helpers shared by text reports.

use crate::analytics::LabeledSeries;

/// Format a value with up to four decimals, trimming trailing zeros.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let s = format!("{:.4}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Render a series as `label  value` lines, keeping the first and last
/// `edge` points when the series is longer than `2 * edge`.
pub fn series_lines(series: &LabeledSeries, edge: usize) -> Vec<String> {
    let points = &series.points;
    let width = points.iter().map(|p| p.label.len()).max().unwrap_or(0);
    let line = |idx: usize| {
        let p = &points[idx];
        format!("{:<width$}  {}", p.label, format_value(p.value), width = width)
    };

    if points.len() <= edge * 2 {
        return (0..points.len()).map(line).collect();
    }

    let mut lines: Vec<String> = (0..edge).map(line).collect();
    lines.push(format!("... {} more", points.len() - edge * 2));
    lines.extend((points.len() - edge..points.len()).map(line));
    lines
}
