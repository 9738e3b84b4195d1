//! Per-user interaction histories.
//!
//! Records are re-indexed by user: every conversation appends one value to
//! each participant's history. Histories follow record iteration order, which
//! is only chronological if the input was sorted by start time.

use super::metric::ConversationMetric;
use crate::types::{ConversationRecord, Party, UserId};
use std::collections::BTreeMap;

/// Metric values per user, one entry per conversation the user took part in.
pub type PerUserSequences = BTreeMap<UserId, Vec<f64>>;

/// Build per-user histories with separate metrics for each slot.
///
/// A user seen as first party in one record and second party in another
/// accumulates a single history.
pub fn build_per_user_sequences<F, G>(
    records: &[ConversationRecord],
    first_party_metric: F,
    second_party_metric: G,
) -> PerUserSequences
where
    F: Fn(&ConversationRecord) -> f64,
    G: Fn(&ConversationRecord) -> f64,
{
    let mut sequences = PerUserSequences::new();
    for record in records {
        sequences
            .entry(record.user_id1.clone())
            .or_default()
            .push(first_party_metric(record));
        sequences
            .entry(record.user_id2.clone())
            .or_default()
            .push(second_party_metric(record));
    }
    sequences
}

/// Build per-user histories from a metric's per-party values.
pub fn build_per_user_sequences_with<M>(
    records: &[ConversationRecord],
    metric: &M,
) -> PerUserSequences
where
    M: ConversationMetric + ?Sized,
{
    build_per_user_sequences(
        records,
        |r| metric.value_for(r, Party::First),
        |r| metric.value_for(r, Party::Second),
    )
}

/// Average value of each user's n-th interaction.
///
/// Position `i` averages `sequence[i]` over every user with more than `i`
/// interactions; shorter histories are left out rather than padded. The
/// output is as long as the longest history.
pub fn positional_average(sequences: &PerUserSequences) -> Vec<f64> {
    let longest = sequences.values().map(Vec::len).max().unwrap_or(0);

    (0..longest)
        .map(|position| {
            let (sum, count) = sequences
                .values()
                .filter_map(|seq| seq.get(position))
                .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
            sum / count as f64
        })
        .collect()
}

/// Number of users with more than `i` interactions, for each position `i`.
pub fn positional_user_counts(sequences: &PerUserSequences) -> Vec<usize> {
    let longest = sequences.values().map(Vec::len).max().unwrap_or(0);

    (0..longest)
        .map(|position| sequences.values().filter(|seq| seq.len() > position).count())
        .collect()
}
