//! regretlog - success-rate and regret report for a conversation log
//!
//! Loads the record file once, runs every analysis for each configured win
//! metric, and prints the resulting series as text or JSON.

use anyhow::{Context, Result};
use clap::Parser;
use regretlog_core::analytics::{create_default_engine, AnalysisContext, PluginRunStatus, Report};
use regretlog_core::format::{format_value, series_lines};
use regretlog_core::{ingest, Config};
use std::fmt::Write as _;
use std::path::PathBuf;

/// Points shown at each end of a series in text output
const TEXT_EDGE_POINTS: usize = 5;

#[derive(Parser, Debug)]
#[command(name = "regretlog")]
#[command(about = "Success-rate and regret statistics for paired conversation logs")]
#[command(version)]
struct Args {
    /// Conversation record file (.json array or .jsonl)
    input: PathBuf,

    /// Config file (default: ~/.config/regretlog/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format: text (default) or json
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Run only one analysis plugin (e.g. core.cumulative_regret)
    #[arg(short, long)]
    plugin: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Both loaders validate the analysis section
    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::load().context("failed to load configuration")?,
    };

    let _log_guard = regretlog_core::logging::init(&config.logging).ok();

    if args.format != "text" && args.format != "json" {
        anyhow::bail!("Unknown format: {}. Use 'text' or 'json'", args.format);
    }

    let engine = create_default_engine();
    if let Some(plugin) = &args.plugin {
        if !engine.has_plugin(plugin) {
            anyhow::bail!(
                "Unknown plugin: {}. Available: {}",
                plugin,
                engine.plugin_names().join(", ")
            );
        }
    }

    let metrics = config.analysis.win_metrics()?;
    let records = ingest::load_records(&args.input)
        .with_context(|| format!("failed to load records from {}", args.input.display()))?;

    let ctx = AnalysisContext::from_config(&config.analysis);
    let mut report = engine.run_report(&records, &metrics, &ctx);
    if let Some(plugin) = &args.plugin {
        for section in &mut report.metrics {
            section.runs.retain(|run| &run.plugin_name == plugin);
        }
    }

    for failure in report.failures() {
        eprintln!(
            "warning: {} for {} failed: {}",
            failure.plugin_name,
            failure.metric_name,
            failure.error_message.as_deref().unwrap_or("unknown error")
        );
    }

    let rendered = if args.format == "json" {
        serde_json::to_string_pretty(&report)?
    } else {
        render_text(&report, &args.input)
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            tracing::info!(path = %path.display(), "Report written");
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn render_text(report: &Report, input: &std::path::Path) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Conversation records: {} ({})",
        report.record_count,
        input.display()
    );

    for section in &report.metrics {
        let _ = writeln!(out);
        let _ = writeln!(out, "== {} ==", section.metric);

        for run in &section.runs {
            let status_icon = match run.status {
                PluginRunStatus::Success => "+",
                PluginRunStatus::Error => "!",
            };
            let _ = writeln!(
                out,
                "[{}] {} ({} series, {}ms)",
                status_icon,
                run.plugin_name,
                run.series.len(),
                run.duration_ms
            );

            if let Some(ref e) = run.error_message {
                let _ = writeln!(out, "    Error: {}", e);
            }

            for series in &run.series {
                match series.range() {
                    Some((lo, hi)) => {
                        let _ = writeln!(
                            out,
                            "    {} ({} points, min {}, max {})",
                            series.name,
                            series.len(),
                            format_value(lo),
                            format_value(hi)
                        );
                    }
                    None => {
                        let _ = writeln!(out, "    {} (no points)", series.name);
                    }
                }
                for line in series_lines(series, TEXT_EDGE_POINTS) {
                    let _ = writeln!(out, "      {}", line);
                }
            }
        }
    }

    out
}
