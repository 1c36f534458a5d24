// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
//   k     = 2 / (period + 1)
//   EMA_t = close_t * k + EMA_{t-1} * (1 - k)
//
// The seed is the SMA of the first `period` closes of the slice it is given.
// For the bot that slice is the whole retained buffer, so once old candles are
// evicted the seed moves forward with the window.
// =============================================================================

/// EMA series for `closes` over `period`.
///
/// Element `j` of the result corresponds to close index `period - 1 + j`, so
/// the series has `closes.len() - period + 1` entries.  Returns an empty `Vec`
/// when `period == 0` or the slice is too short.  A non-finite value ends the
/// series early.
pub fn calculate_ema(closes: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || closes.len() < period {
        return Vec::new();
    }

    let k = 2.0 / (period + 1) as f64;

    let seed = closes[..period].iter().sum::<f64>() / period as f64;
    if !seed.is_finite() {
        return Vec::new();
    }

    let mut series = Vec::with_capacity(closes.len() - period + 1);
    series.push(seed);

    let mut ema = seed;
    for &close in &closes[period..] {
        ema = close * k + ema * (1.0 - k);
        if !ema.is_finite() {
            break;
        }
        series.push(ema);
    }

    series
}

/// Most recent EMA value, or `None` when fewer than `period` closes exist.
pub fn current_ema(closes: &[f64], period: usize) -> Option<f64> {
    calculate_ema(closes, period).last().copied()
}
