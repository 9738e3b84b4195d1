//! Analytics module for regretlog
//!
//! Provides the statistics computed over a conversation log:
//! - Per-day aggregation and success ratios ([`daily`])
//! - Cumulative regret ([`regret`])
//! - Per-user interaction histories ([`per_user`])
//! - Moving-average smoothing ([`smoothing`])
//!
//! ## Plugin Framework
//!
//! The computations are plain functions. The plugin layer wires them into
//! named analyses that each produce [`LabeledSeries`] for a win metric.
//!
//! See [`engine`] module for the core framework and [`plugins`] for built-in plugins.

pub mod daily;
pub mod engine;
pub mod metric;
pub mod per_user;
pub mod plugins;
pub mod regret;
pub mod series;
pub mod smoothing;

// Engine exports
pub use engine::{
    AnalysisContext, AnalyticsEngine, AnalyticsPlugin, MetricReport, PluginRunResult,
    PluginRunStatus, Report,
};
pub use plugins::create_default_engine;

// Computation exports
pub use daily::{
    cumulative_aggregate, daily_aggregate, daily_aggregate_at, daily_aggregate_in, ratios,
    CumulativeAggregate, DailyAggregate, RatioSeries, Tally,
};
pub use metric::{ConversationMetric, WinMetric};
pub use per_user::{
    build_per_user_sequences, build_per_user_sequences_with, positional_average,
    positional_user_counts, PerUserSequences,
};
pub use regret::cumulative_regret;
pub use series::{LabeledSeries, SeriesPoint};
pub use smoothing::moving_average;
