//! Labeled series handed to charting collaborators.
//!
//! Renderers only ever see `(label, value)` points; they never need to know
//! how a series was computed.

use super::daily::RatioSeries;
use serde::Serialize;

/// One point of a labeled series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

/// Named, ordered sequence of labeled points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledSeries {
    /// Series name (e.g., "daily_ratio")
    pub name: String,
    pub points: Vec<SeriesPoint>,
}

impl LabeledSeries {
    pub fn new(name: impl Into<String>, points: Vec<SeriesPoint>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    /// Series labeled by `YYYY-MM-DD` dates.
    pub fn from_dates(name: impl Into<String>, ratios: &RatioSeries) -> Self {
        let points = ratios
            .iter()
            .map(|(date, value)| SeriesPoint {
                label: date.format("%Y-%m-%d").to_string(),
                value: *value,
            })
            .collect();
        Self::new(name, points)
    }

    /// Series labeled by 1-based position (play number, nth interaction).
    pub fn from_positions(name: impl Into<String>, values: &[f64]) -> Self {
        let points = values
            .iter()
            .enumerate()
            .map(|(idx, value)| SeriesPoint {
                label: (idx + 1).to_string(),
                value: *value,
            })
            .collect();
        Self::new(name, points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Values in order, without labels.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    pub fn last(&self) -> Option<&SeriesPoint> {
        self.points.last()
    }

    /// `(min, max)` value, or `None` for an empty series.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.values().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}
