//! Per-user "nth interaction" plugin.
//!
//! Answers: how does a user's k-th conversation fare, on average, across
//! everyone who had at least k conversations?

use crate::analytics::engine::{AnalysisContext, AnalyticsPlugin};
use crate::analytics::metric::ConversationMetric;
use crate::analytics::per_user::{
    build_per_user_sequences_with, positional_average, positional_user_counts,
};
use crate::analytics::series::LabeledSeries;
use crate::analytics::smoothing::moving_average;
use crate::types::ConversationRecord;
use crate::Result;

pub struct PerUserPosition;

impl PerUserPosition {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PerUserPosition {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsPlugin for PerUserPosition {
    fn name(&self) -> &str {
        "core.per_user_position"
    }

    fn analyze(
        &self,
        records: &[ConversationRecord],
        metric: &dyn ConversationMetric,
        ctx: &AnalysisContext,
    ) -> Result<Vec<LabeledSeries>> {
        let sequences = build_per_user_sequences_with(records, metric);
        let averages = positional_average(&sequences);
        let smoothed = moving_average(&averages, ctx.smoothing_window)?;
        let counts: Vec<f64> = positional_user_counts(&sequences)
            .into_iter()
            .map(|c| c as f64)
            .collect();

        tracing::debug!(
            users = sequences.len(),
            positions = averages.len(),
            "Built per-user sequences"
        );

        Ok(vec![
            LabeledSeries::from_positions("position_average", &averages),
            LabeledSeries::from_positions("position_average_smoothed", &smoothed),
            LabeledSeries::from_positions("users_at_position", &counts),
        ])
    }
}
