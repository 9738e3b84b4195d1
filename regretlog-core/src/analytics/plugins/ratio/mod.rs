//! Daily and cumulative success-ratio plugins.

use crate::analytics::daily::{cumulative_aggregate, daily_aggregate_at, ratios, DailyAggregate};
use crate::analytics::engine::{AnalysisContext, AnalyticsPlugin};
use crate::analytics::metric::ConversationMetric;
use crate::analytics::series::{LabeledSeries, SeriesPoint};
use crate::types::ConversationRecord;
use crate::Result;

fn aggregate(
    records: &[ConversationRecord],
    metric: &dyn ConversationMetric,
    ctx: &AnalysisContext,
) -> DailyAggregate {
    daily_aggregate_at(records, |r| metric.value(r), ctx.day_boundary)
}

/// Success ratio of each calendar day, plus the trials behind it.
pub struct DailyRatio;

impl DailyRatio {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DailyRatio {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsPlugin for DailyRatio {
    fn name(&self) -> &str {
        "core.daily_ratio"
    }

    fn analyze(
        &self,
        records: &[ConversationRecord],
        metric: &dyn ConversationMetric,
        ctx: &AnalysisContext,
    ) -> Result<Vec<LabeledSeries>> {
        let daily = aggregate(records, metric, ctx);
        let ratio_series = ratios(&daily, ctx.ratio_threshold);

        let trials = daily
            .iter()
            .filter(|(_, tally)| tally.trials >= ctx.ratio_threshold)
            .map(|(date, tally)| SeriesPoint {
                label: date.format("%Y-%m-%d").to_string(),
                value: tally.trials,
            })
            .collect();

        Ok(vec![
            LabeledSeries::from_dates("daily_ratio", &ratio_series),
            LabeledSeries::new("daily_trials", trials),
        ])
    }
}

/// Running success ratio through each calendar day.
pub struct CumulativeRatio;

impl CumulativeRatio {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CumulativeRatio {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsPlugin for CumulativeRatio {
    fn name(&self) -> &str {
        "core.cumulative_ratio"
    }

    fn analyze(
        &self,
        records: &[ConversationRecord],
        metric: &dyn ConversationMetric,
        ctx: &AnalysisContext,
    ) -> Result<Vec<LabeledSeries>> {
        let cumulative = cumulative_aggregate(&aggregate(records, metric, ctx))?;

        Ok(vec![LabeledSeries::from_dates(
            "cumulative_ratio",
            &ratios(&cumulative, ctx.ratio_threshold),
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::WinMetric;
    use crate::config::DayBoundary;
    use crate::types::UserId;
    use crate::Error;
    use chrono::{TimeZone, Utc};

    fn convo(day: u32, matched: bool) -> ConversationRecord {
        ConversationRecord {
            start_time: Utc.with_ymd_and_hms(2014, 8, day, 12, 0, 0).unwrap(),
            user_id1: UserId::Number(1),
            user_id2: UserId::Number(2),
            user1_clicked: matched,
            user2_clicked: matched,
            user1_messages_sent: 1,
            user2_messages_sent: 1,
        }
    }

    fn utc_ctx(threshold: f64) -> AnalysisContext {
        AnalysisContext {
            ratio_threshold: threshold,
            smoothing_window: 2,
            day_boundary: DayBoundary::Utc,
        }
    }

    #[test]
    fn daily_ratio_reports_ratios_and_trials() {
        let records = vec![convo(1, true), convo(1, false), convo(2, true)];
        let series = DailyRatio::new()
            .analyze(&records, &WinMetric::FbMatch, &utc_ctx(0.0))
            .expect("analysis should succeed");

        assert_eq!(series[0].name, "daily_ratio");
        assert_eq!(series[0].values().collect::<Vec<_>>(), vec![0.5, 1.0]);
        assert_eq!(series[0].points[0].label, "2014-08-01");
        assert_eq!(series[1].values().collect::<Vec<_>>(), vec![2.0, 1.0]);

        let filtered = DailyRatio::new()
            .analyze(&records, &WinMetric::FbMatch, &utc_ctx(2.0))
            .expect("analysis should succeed");
        assert_eq!(filtered[0].len(), 1);
        assert_eq!(filtered[1].len(), 1);
    }

    #[test]
    fn cumulative_ratio_accumulates() {
        let records = vec![convo(1, true), convo(1, false), convo(2, false), convo(3, true)];
        let series = CumulativeRatio::new()
            .analyze(&records, &WinMetric::FbMatch, &utc_ctx(0.0))
            .expect("analysis should succeed");

        assert_eq!(
            series[0].values().collect::<Vec<_>>(),
            vec![0.5, 1.0 / 3.0, 0.5]
        );
    }

    #[test]
    fn cumulative_ratio_fails_on_empty_input() {
        let err = CumulativeRatio::new()
            .analyze(&[], &WinMetric::FbMatch, &utc_ctx(0.0))
            .unwrap_err();
        assert!(matches!(err, Error::EmptyInput { .. }));
    }
}
