// =============================================================================
// Relative Strength Index (RSI), simple-average variant
// =============================================================================
//
// Only the most recent `period` close-to-close changes are considered, and
// they are averaged plainly rather than with Wilder's smoothing:
//
//   avg_gain = sum(max(change, 0))  / period
//   avg_loss = sum(max(-change, 0)) / period
//   RS       = avg_gain / avg_loss
//   RSI      = 100 - 100 / (1 + RS)
//
// A window without any down move has avg_loss == 0 and saturates at 100.
// =============================================================================

/// Current RSI over the last `period` changes of `closes`.
///
/// Needs `period + 1` closes.  Returns `None` when `period == 0`, the slice is
/// too short, or the inputs are non-finite.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }

    let window = &closes[closes.len() - period - 1..];
    let (gains, losses) = window
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold((0.0_f64, 0.0_f64), |(g, l), change| {
            if change >= 0.0 {
                (g + change, l)
            } else {
                (g, l + change.abs())
            }
        });

    let period_f = period as f64;
    let avg_gain = gains / period_f;
    let avg_loss = losses / period_f;

    if avg_loss == 0.0 {
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - 100.0 / (1.0 + rs);
    rsi.is_finite().then_some(rsi)
}
