//! Cumulative regret over the record sequence.
//!
//! Every record is one "play". The benchmark is the overall empirical
//! success rate across all plays, computed once after the fact, so the
//! sequence measures how far the running success total trails a player who
//! converted at the long-run rate from the very first play.

use crate::error::{Error, Result};
use crate::types::ConversationRecord;

/// Regret after each play, in record order.
///
/// For 1-based play `i`, `regret[i] = optimal_ratio * i - successes[i]`,
/// where `optimal_ratio` is total successes over total plays. The output has
/// one entry per record. Fails with [`Error::EmptyInput`] on zero records.
pub fn cumulative_regret<F>(records: &[ConversationRecord], metric: F) -> Result<Vec<f64>>
where
    F: Fn(&ConversationRecord) -> f64,
{
    if records.is_empty() {
        return Err(Error::EmptyInput {
            computation: "cumulative regret",
        });
    }

    let mut successes = 0.0;
    let running: Vec<f64> = records
        .iter()
        .map(|record| {
            successes += metric(record);
            successes
        })
        .collect();

    let optimal_ratio = successes / records.len() as f64;

    Ok(running
        .iter()
        .enumerate()
        .map(|(idx, successes)| optimal_ratio * (idx + 1) as f64 - successes)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserId;
    use chrono::{TimeZone, Utc};

    fn plays(wins: &[bool]) -> Vec<ConversationRecord> {
        wins.iter()
            .enumerate()
            .map(|(i, win)| ConversationRecord {
                start_time: Utc.timestamp_millis_opt(1_400_000_000_000 + i as i64).unwrap(),
                user_id1: UserId::Number(i as i64),
                user_id2: UserId::Number(-(i as i64)),
                user1_clicked: *win,
                user2_clicked: *win,
                user1_messages_sent: 0,
                user2_messages_sent: 0,
            })
            .collect()
    }

    fn win(record: &ConversationRecord) -> f64 {
        if record.fb_match_occurred() {
            1.0
        } else {
            0.0
        }
    }

    #[test]
    fn test_all_wins_have_zero_regret() {
        let regret = cumulative_regret(&plays(&[true; 6]), win).unwrap();
        assert_eq!(regret, vec![0.0; 6]);
    }

    #[test]
    fn test_alternating_plays() {
        let regret = cumulative_regret(&plays(&[true, false, true, false]), win).unwrap();
        assert_eq!(regret, vec![-0.5, 0.0, -0.5, 0.0]);
    }

    #[test]
    fn test_regret_can_shrink() {
        let regret = cumulative_regret(&plays(&[false, false, true, true]), win).unwrap();
        assert_eq!(regret, vec![0.5, 1.0, 0.5, 0.0]);
        assert!(regret[2] < regret[1]);
    }

    #[test]
    fn test_final_regret_is_zero() {
        let pattern = [true, false, false, true, false, false, false, true, false];
        let regret = cumulative_regret(&plays(&pattern), win).unwrap();
        assert_eq!(regret.len(), pattern.len());
        assert!(regret.last().unwrap().abs() < 1e-9);
    }

    #[test]
    fn test_empty_input() {
        let err = cumulative_regret(&[], win).unwrap_err();
        assert!(matches!(
            err,
            Error::EmptyInput {
                computation: "cumulative regret"
            }
        ));
    }
}
