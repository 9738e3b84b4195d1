//! Trailing moving average.

use crate::error::{Error, Result};

/// Smooth a sequence with a trailing window of `window` points.
///
/// Output has the same length as the input. Until the window fills, each
/// point averages everything seen so far:
/// `output[i] = mean(sequence[max(0, i + 1 - window)..=i])`.
/// A window of 1 returns the input unchanged.
pub fn moving_average(sequence: &[f64], window: usize) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(Error::InvalidParameter(
            "moving average window must be at least 1".to_string(),
        ));
    }

    Ok((0..sequence.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let points = &sequence[start..=i];
            points.iter().sum::<f64>() / points.len() as f64
        })
        .collect())
}
