//! Analytics plugin framework
//!
//! Plugins consume validated conversation records and produce labeled
//! series for one win metric at a time.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     ANALYTICS ENGINE                            │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐             │
//! │  │ daily_ratio │  │ cum_regret  │  │ per_user    │  ...        │
//! │  └──────┬──────┘  └──────┬──────┘  └──────┬──────┘             │
//! │         │                │                │                     │
//! │         ▼                ▼                ▼                     │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              AnalyticsEngine.run_plugin()               │   │
//! │  │  - Calls plugin.analyze() with records + metric         │   │
//! │  │  - Captures LabeledSeries on success                    │   │
//! │  │  - Captures the error message on failure                │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failing plugin (for example one that needs at least one record) is
//! reported in its [`PluginRunResult`] and never stops the other plugins.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use regretlog_core::analytics::{create_default_engine, AnalysisContext};
//! use regretlog_core::WinMetric;
//!
//! let engine = create_default_engine();
//! let ctx = AnalysisContext::default();
//! let report = engine.run_report(&records, &[WinMetric::FbMatch], &ctx);
//!
//! for section in &report.metrics {
//!     for run in &section.runs {
//!         println!("{} / {}: {}", section.metric, run.plugin_name, run.status.as_str());
//!     }
//! }
//! ```

use super::metric::{ConversationMetric, WinMetric};
use super::series::LabeledSeries;
use crate::config::{AnalysisConfig, DayBoundary};
use crate::error::{Error, Result};
use crate::types::ConversationRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;

// ============================================
// Plugin context and outputs
// ============================================

/// Parameters shared by every plugin in a run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisContext {
    /// Minimum trials for a day to appear in ratio series
    pub ratio_threshold: f64,
    /// Trailing window for smoothed series
    pub smoothing_window: usize,
    /// Calendar day boundary for daily aggregation
    pub day_boundary: DayBoundary,
}

impl AnalysisContext {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            ratio_threshold: config.ratio_threshold,
            smoothing_window: config.smoothing_window,
            day_boundary: config.day_boundary,
        }
    }
}

impl Default for AnalysisContext {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

// ============================================
// Plugin run results
// ============================================

/// Result of running one plugin for one metric.
#[derive(Debug, Clone, Serialize)]
pub struct PluginRunResult {
    /// Name of the plugin that was run
    pub plugin_name: String,
    /// Metric the plugin was run with
    pub metric_name: String,
    /// When the plugin run started
    pub started_at: DateTime<Utc>,
    /// How long the plugin took to run (milliseconds)
    pub duration_ms: i64,
    /// Whether the run succeeded or failed
    pub status: PluginRunStatus,
    /// Error message if the run failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Number of records that were analyzed
    pub input_record_count: usize,
    /// Series produced (empty on failure)
    pub series: Vec<LabeledSeries>,
}

/// Status of a plugin run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginRunStatus {
    /// Plugin completed successfully
    Success,
    /// Plugin encountered an error
    Error,
}

impl PluginRunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PluginRunStatus::Success => "success",
            PluginRunStatus::Error => "error",
        }
    }
}

/// All plugin runs for one metric.
#[derive(Debug, Clone, Serialize)]
pub struct MetricReport {
    pub metric: String,
    pub runs: Vec<PluginRunResult>,
}

/// Output of a full analysis pass over a record set.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub record_count: usize,
    pub metrics: Vec<MetricReport>,
}

impl Report {
    /// Every failed run, across all metrics.
    pub fn failures(&self) -> impl Iterator<Item = &PluginRunResult> {
        self.metrics
            .iter()
            .flat_map(|m| m.runs.iter())
            .filter(|r| r.status == PluginRunStatus::Error)
    }

    /// Look up a series by metric and series name.
    pub fn series(&self, metric: &str, name: &str) -> Option<&LabeledSeries> {
        self.metrics
            .iter()
            .filter(|m| m.metric == metric)
            .flat_map(|m| m.runs.iter())
            .flat_map(|r| r.series.iter())
            .find(|s| s.name == name)
    }
}

// ============================================
// Plugin trait
// ============================================

/// Trait that all analytics plugins must implement.
///
/// Plugins are stateless and deterministic: the same records, metric and
/// context always produce the same series.
///
/// ## Example
///
/// ```rust,ignore
/// use regretlog_core::analytics::{AnalyticsPlugin, AnalysisContext, ConversationMetric, LabeledSeries};
///
/// pub struct MatchTotal;
///
/// impl AnalyticsPlugin for MatchTotal {
///     fn name(&self) -> &str { "custom.total" }
///
///     fn analyze(
///         &self,
///         records: &[ConversationRecord],
///         metric: &dyn ConversationMetric,
///         _ctx: &AnalysisContext,
///     ) -> Result<Vec<LabeledSeries>> {
///         let total: f64 = records.iter().map(|r| metric.value(r)).sum();
///         Ok(vec![LabeledSeries::from_positions("total", &[total])])
///     }
/// }
/// ```
pub trait AnalyticsPlugin: Send + Sync {
    /// Unique name for this plugin.
    ///
    /// Convention: `namespace.plugin_name` (e.g., "core.daily_ratio")
    fn name(&self) -> &str;

    /// Compute series for one metric over the full record set.
    fn analyze(
        &self,
        records: &[ConversationRecord],
        metric: &dyn ConversationMetric,
        ctx: &AnalysisContext,
    ) -> Result<Vec<LabeledSeries>>;
}

// ============================================
// Analytics engine
// ============================================

/// Engine that manages and runs analytics plugins.
pub struct AnalyticsEngine {
    plugins: Vec<Box<dyn AnalyticsPlugin>>,
}

impl AnalyticsEngine {
    /// Create a new empty engine.
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Register a plugin with the engine.
    pub fn register(&mut self, plugin: Box<dyn AnalyticsPlugin>) {
        tracing::debug!(plugin = plugin.name(), "Registered analytics plugin");
        self.plugins.push(plugin);
    }

    /// Get list of registered plugin names.
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Check if a plugin is registered.
    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.name() == name)
    }

    /// Run a specific plugin for one metric.
    ///
    /// Only an unknown plugin name is an `Err`; analysis failures are
    /// captured in the returned result with [`PluginRunStatus::Error`].
    pub fn run_plugin(
        &self,
        plugin_name: &str,
        records: &[ConversationRecord],
        metric: &dyn ConversationMetric,
        ctx: &AnalysisContext,
    ) -> Result<PluginRunResult> {
        let plugin = self
            .plugins
            .iter()
            .find(|p| p.name() == plugin_name)
            .ok_or_else(|| Error::AnalysisNotFound(plugin_name.to_string()))?;

        Ok(Self::run(plugin.as_ref(), records, metric, ctx))
    }

    /// Run all registered plugins for one metric.
    ///
    /// Failed plugins don't stop other plugins from running.
    pub fn run_all(
        &self,
        records: &[ConversationRecord],
        metric: &dyn ConversationMetric,
        ctx: &AnalysisContext,
    ) -> Vec<PluginRunResult> {
        self.plugins
            .iter()
            .map(|p| Self::run(p.as_ref(), records, metric, ctx))
            .collect()
    }

    /// Run every plugin for every metric.
    pub fn run_report(
        &self,
        records: &[ConversationRecord],
        metrics: &[WinMetric],
        ctx: &AnalysisContext,
    ) -> Report {
        let generated_at = Utc::now();
        let metrics = metrics
            .iter()
            .map(|metric| MetricReport {
                metric: metric.name().to_string(),
                runs: self.run_all(records, metric, ctx),
            })
            .collect();

        Report {
            generated_at,
            record_count: records.len(),
            metrics,
        }
    }

    fn run(
        plugin: &dyn AnalyticsPlugin,
        records: &[ConversationRecord],
        metric: &dyn ConversationMetric,
        ctx: &AnalysisContext,
    ) -> PluginRunResult {
        let started_at = Utc::now();
        let start = Instant::now();

        tracing::debug!(
            plugin = plugin.name(),
            metric = metric.name(),
            records = records.len(),
            "Running analytics plugin"
        );

        let outcome = plugin.analyze(records, metric, ctx);
        let duration_ms = start.elapsed().as_millis() as i64;

        let (status, error_message, series) = match outcome {
            Ok(series) => {
                tracing::info!(
                    plugin = plugin.name(),
                    metric = metric.name(),
                    series = series.len(),
                    duration_ms,
                    "Plugin completed successfully"
                );
                (PluginRunStatus::Success, None, series)
            }
            Err(e) => {
                tracing::error!(
                    plugin = plugin.name(),
                    metric = metric.name(),
                    records = records.len(),
                    error = %e,
                    "Plugin failed"
                );
                (PluginRunStatus::Error, Some(e.to_string()), Vec::new())
            }
        };

        PluginRunResult {
            plugin_name: plugin.name().to_string(),
            metric_name: metric.name().to_string(),
            started_at,
            duration_ms,
            status,
            error_message,
            input_record_count: records.len(),
            series,
        }
    }
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysFails;

    impl AnalyticsPlugin for AlwaysFails {
        fn name(&self) -> &str {
            "test.always_fails"
        }

        fn analyze(
            &self,
            _records: &[ConversationRecord],
            _metric: &dyn ConversationMetric,
            _ctx: &AnalysisContext,
        ) -> Result<Vec<LabeledSeries>> {
            Err(Error::EmptyInput {
                computation: "test computation",
            })
        }
    }

    struct CountRecords;

    impl AnalyticsPlugin for CountRecords {
        fn name(&self) -> &str {
            "test.count"
        }

        fn analyze(
            &self,
            records: &[ConversationRecord],
            _metric: &dyn ConversationMetric,
            _ctx: &AnalysisContext,
        ) -> Result<Vec<LabeledSeries>> {
            Ok(vec![LabeledSeries::from_positions(
                "count",
                &[records.len() as f64],
            )])
        }
    }

    fn engine() -> AnalyticsEngine {
        let mut engine = AnalyticsEngine::new();
        engine.register(Box::new(AlwaysFails));
        engine.register(Box::new(CountRecords));
        engine
    }

    #[test]
    fn test_failure_does_not_stop_other_plugins() {
        let results = engine().run_all(&[], &WinMetric::FbMatch, &AnalysisContext::default());

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].status, PluginRunStatus::Error);
        assert!(results[0]
            .error_message
            .as_deref()
            .unwrap()
            .contains("test computation"));
        assert!(results[0].series.is_empty());

        assert_eq!(results[1].status, PluginRunStatus::Success);
        assert_eq!(results[1].series[0].points[0].value, 0.0);
        assert_eq!(results[1].metric_name, "fb_match");
    }

    #[test]
    fn test_unknown_plugin() {
        let result = engine().run_plugin(
            "core.nope",
            &[],
            &WinMetric::FbMatch,
            &AnalysisContext::default(),
        );
        assert!(matches!(result, Err(Error::AnalysisNotFound(_))));
    }

    #[test]
    fn test_report_covers_every_metric() {
        let report = engine().run_report(
            &[],
            &[WinMetric::FbMatch, WinMetric::MessagesSent],
            &AnalysisContext::default(),
        );

        assert_eq!(report.record_count, 0);
        assert_eq!(report.metrics.len(), 2);
        assert_eq!(report.metrics[1].metric, "messages_sent");
        assert_eq!(report.failures().count(), 2);
        assert!(report.series("messages_sent", "count").is_some());
        assert!(report.series("messages_sent", "missing").is_none());
    }

    #[test]
    fn test_context_from_config() {
        let config = AnalysisConfig {
            ratio_threshold: 50.0,
            smoothing_window: 3,
            day_boundary: DayBoundary::Utc,
            ..Default::default()
        };
        let ctx = AnalysisContext::from_config(&config);
        assert_eq!(ctx.ratio_threshold, 50.0);
        assert_eq!(ctx.smoothing_window, 3);
        assert_eq!(ctx.day_boundary, DayBoundary::Utc);
    }
}
