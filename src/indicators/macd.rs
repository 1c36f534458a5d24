// =============================================================================
// MACD comparison
// =============================================================================
//
//   macd_line = EMA(fast) - EMA(slow)
//
// Two ways of deriving the signal line are supported:
//
// * `Simplified` (default): the signal line *is* the MACD line once the buffer
//   holds `slow + signal` closes, so the histogram is always zero and no
//   crossover can ever fire.  Existing consumers rely on this.
// * `Smoothed`: the signal line is an EMA over `signal` periods of the MACD
//   line history, which is the textbook definition.
// =============================================================================

use serde::{Deserialize, Serialize};

use super::ema::{calculate_ema, current_ema};

/// How the MACD signal line is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MacdSignalMode {
    #[default]
    Simplified,
    Smoothed,
}

/// Raw (unrounded) MACD values for the current buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdReading {
    pub macd_line: f64,
    /// `None` until enough history exists for the chosen mode.
    pub signal_line: Option<f64>,
    /// `macd_line - signal_line`; present exactly when the signal line is.
    pub histogram: Option<f64>,
}

/// Compute the MACD reading for `closes`.
///
/// Returns `None` when either EMA is unavailable.
pub fn calculate_macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
    mode: MacdSignalMode,
) -> Option<MacdReading> {
    let fast_ema = current_ema(closes, fast)?;
    let slow_ema = current_ema(closes, slow)?;
    let macd_line = fast_ema - slow_ema;

    let signal_line = match mode {
        MacdSignalMode::Simplified => (closes.len() >= slow + signal).then_some(macd_line),
        MacdSignalMode::Smoothed => smoothed_signal_line(closes, fast, slow, signal),
    };

    Some(MacdReading {
        macd_line,
        signal_line,
        histogram: signal_line.map(|s| macd_line - s),
    })
}

/// MACD line history aligned on close index, starting where both EMAs exist.
fn macd_history(closes: &[f64], fast: usize, slow: usize) -> Vec<f64> {
    let fast_series = calculate_ema(closes, fast);
    let slow_series = calculate_ema(closes, slow);
    let start = fast.max(slow) - 1;

    (start..closes.len())
        .map_while(|t| {
            let f = fast_series.get(t + 1 - fast)?;
            let s = slow_series.get(t + 1 - slow)?;
            Some(f - s)
        })
        .collect()
}

fn smoothed_signal_line(closes: &[f64], fast: usize, slow: usize, signal: usize) -> Option<f64> {
    current_ema(&macd_history(closes, fast, slow), signal)
}
