//! # regretlog-core
//!
//! Core library for regretlog - success-rate and regret statistics over
//! logs of paired-user conversations.
//!
//! This library provides:
//! - Domain types for conversation records and their accessors
//! - Record file ingestion with strict validation
//! - Aggregation, ratio, regret, per-user and smoothing computations
//! - An analytics engine that turns records into labeled series
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Data flow
//!
//! - **Raw:** a JSON array of conversation records on disk (immutable)
//! - **Canonical:** validated [`ConversationRecord`]s, loaded once
//! - **Derived:** [`analytics::LabeledSeries`] for charting collaborators
//!
//! ## Example
//!
//! ```rust,no_run
//! use regretlog_core::analytics::{create_default_engine, AnalysisContext};
//! use regretlog_core::{ingest, Config, WinMetric};
//!
//! let config = Config::load().expect("failed to load config");
//! let records = ingest::load_records("conversations.json").expect("failed to load records");
//!
//! let engine = create_default_engine();
//! let ctx = AnalysisContext::from_config(&config.analysis);
//! let results = engine.run_all(&records, &WinMetric::FbMatch, &ctx);
//! for result in results {
//!     println!("{}: {}", result.plugin_name, result.status.as_str());
//! }
//! ```

// Re-export commonly used items at the crate root
pub use analytics::WinMetric;
pub use config::Config;
pub use error::{Error, Result};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod error;
pub mod format;
pub mod ingest;
pub mod logging;
pub mod types;
