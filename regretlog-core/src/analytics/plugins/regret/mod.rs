//! Cumulative regret plugin.
//!
//! Emits the raw per-play regret sequence and a smoothed copy using the
//! context's smoothing window.

use crate::analytics::engine::{AnalysisContext, AnalyticsPlugin};
use crate::analytics::metric::ConversationMetric;
use crate::analytics::regret::cumulative_regret;
use crate::analytics::series::LabeledSeries;
use crate::analytics::smoothing::moving_average;
use crate::types::ConversationRecord;
use crate::Result;

pub struct CumulativeRegret;

impl CumulativeRegret {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CumulativeRegret {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsPlugin for CumulativeRegret {
    fn name(&self) -> &str {
        "core.cumulative_regret"
    }

    fn analyze(
        &self,
        records: &[ConversationRecord],
        metric: &dyn ConversationMetric,
        ctx: &AnalysisContext,
    ) -> Result<Vec<LabeledSeries>> {
        let regret = cumulative_regret(records, |r| metric.value(r))?;
        let smoothed = moving_average(&regret, ctx.smoothing_window)?;

        Ok(vec![
            LabeledSeries::from_positions("cumulative_regret", &regret),
            LabeledSeries::from_positions("cumulative_regret_smoothed", &smoothed),
        ])
    }
}
