//! Per-day aggregation and success ratios.
//!
//! Records are bucketed by the calendar day they started on. Each bucket is a
//! [`Tally`] of summed metric values ("successes") and record counts
//! ("trials"). Aggregates are ordered maps, so iteration is always by date
//! ascending regardless of record order.

use crate::config::DayBoundary;
use crate::error::{Error, Result};
use crate::types::ConversationRecord;
use chrono::{Local, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::{Add, AddAssign};

/// Summed successes over a number of trials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Tally {
    pub successes: f64,
    pub trials: f64,
}

impl Tally {
    pub fn new(successes: f64, trials: f64) -> Self {
        Self { successes, trials }
    }

    /// `successes / trials`, or `None` when there were no trials.
    pub fn ratio(&self) -> Option<f64> {
        if self.trials > 0.0 {
            Some(self.successes / self.trials)
        } else {
            None
        }
    }
}

impl Add for Tally {
    type Output = Tally;

    fn add(self, rhs: Tally) -> Tally {
        Tally {
            successes: self.successes + rhs.successes,
            trials: self.trials + rhs.trials,
        }
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, rhs: Tally) {
        self.successes += rhs.successes;
        self.trials += rhs.trials;
    }
}

/// Per-day tallies keyed by calendar date.
pub type DailyAggregate = BTreeMap<NaiveDate, Tally>;

/// Running totals keyed by calendar date; each entry includes all earlier days.
pub type CumulativeAggregate = BTreeMap<NaiveDate, Tally>;

/// `(date, ratio)` pairs in date order.
pub type RatioSeries = Vec<(NaiveDate, f64)>;

/// Aggregate records by local calendar day.
///
/// Empty input yields an empty aggregate.
pub fn daily_aggregate<F>(records: &[ConversationRecord], metric: F) -> DailyAggregate
where
    F: Fn(&ConversationRecord) -> f64,
{
    daily_aggregate_in(records, metric, &Local)
}

/// Aggregate records by calendar day in the given time zone.
pub fn daily_aggregate_in<F, Tz>(
    records: &[ConversationRecord],
    metric: F,
    tz: &Tz,
) -> DailyAggregate
where
    F: Fn(&ConversationRecord) -> f64,
    Tz: TimeZone,
{
    let mut aggregate = DailyAggregate::new();
    for record in records {
        *aggregate.entry(record.conversation_date_in(tz)).or_default() +=
            Tally::new(metric(record), 1.0);
    }
    aggregate
}

/// Aggregate records using the configured day boundary.
pub fn daily_aggregate_at<F>(
    records: &[ConversationRecord],
    metric: F,
    boundary: DayBoundary,
) -> DailyAggregate
where
    F: Fn(&ConversationRecord) -> f64,
{
    match boundary {
        DayBoundary::Local => daily_aggregate_in(records, metric, &Local),
        DayBoundary::Utc => daily_aggregate_in(records, metric, &Utc),
    }
}

/// Prefix-sum a daily aggregate in date order.
///
/// The first date's entry equals its own daily tally. Fails with
/// [`Error::EmptyInput`] when there are no days to accumulate.
pub fn cumulative_aggregate(daily: &DailyAggregate) -> Result<CumulativeAggregate> {
    if daily.is_empty() {
        return Err(Error::EmptyInput {
            computation: "cumulative aggregate",
        });
    }

    let mut running = Tally::default();
    Ok(daily
        .iter()
        .map(|(date, tally)| {
            running += *tally;
            (*date, running)
        })
        .collect())
}

/// Success ratio per date, skipping dates with fewer than `threshold` trials.
///
/// Dates with zero trials never produce a ratio, even at a threshold of 0.
pub fn ratios(aggregate: &BTreeMap<NaiveDate, Tally>, threshold: f64) -> RatioSeries {
    aggregate
        .iter()
        .filter(|(_, tally)| tally.trials >= threshold)
        .filter_map(|(date, tally)| tally.ratio().map(|ratio| (*date, ratio)))
        .collect()
}
