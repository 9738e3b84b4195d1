//! Analytics plugins
//!
//! Each plugin lives in its own subdirectory to support
//! multiple files and resources if needed.
//!
//! ## Built-in Plugins
//!
//! - [`ratio`]: Daily and cumulative success ratios
//! - [`regret`]: Cumulative regret against the long-run success rate
//! - [`per_user`]: Average outcome of each user's n-th conversation
//!
//! ## Creating Custom Plugins
//!
//! 1. Create a new module implementing [`AnalyticsPlugin`](super::AnalyticsPlugin)
//! 2. Register it with the engine via [`AnalyticsEngine::register`](super::AnalyticsEngine::register)
//!
//! Or use [`create_default_engine`] to get an engine with all built-in plugins.

pub mod per_user;
pub mod ratio;
pub mod regret;

use super::AnalyticsEngine;

/// Create an engine with all built-in plugins registered.
///
/// ```rust
/// use regretlog_core::analytics::create_default_engine;
///
/// let engine = create_default_engine();
/// assert!(engine.has_plugin("core.cumulative_regret"));
/// ```
pub fn create_default_engine() -> AnalyticsEngine {
    let mut engine = AnalyticsEngine::new();
    engine.register(Box::new(ratio::DailyRatio::new()));
    engine.register(Box::new(ratio::CumulativeRatio::new()));
    engine.register(Box::new(regret::CumulativeRegret::new()));
    engine.register(Box::new(per_user::PerUserPosition::new()));
    engine
}
