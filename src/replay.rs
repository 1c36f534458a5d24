// =============================================================================
// Replay -- feed a recorded candle sequence through a bot
// =============================================================================
//
// The first `warmup` candles only prime the buffer; a result is reported for
// every candle after that.  `sample_candles` is the thirty-bar one-minute
// demo series (closes rise 101 -> 120, then fall back to 110).
// =============================================================================

use serde::Serialize;
use tracing::debug;

use crate::bot::SignalBot;
use crate::market_data::{Candle, CandleTime};
use crate::signals::SignalResult;

/// Candles fed silently before the demo starts reporting.
pub const DEMO_WARMUP: usize = 15;

#[derive(Debug, Clone, Serialize)]
pub struct ReplayEntry {
    pub candle: Candle,
    pub result: SignalResult,
}

/// Feed `candles` into `bot`, returning one entry per candle past `warmup`.
pub fn replay(
    bot: &mut SignalBot,
    candles: impl IntoIterator<Item = Candle>,
    warmup: usize,
) -> Vec<ReplayEntry> {
    let mut entries = Vec::new();
    for (idx, candle) in candles.into_iter().enumerate() {
        let result = bot.add_candle(candle.clone());
        if idx < warmup {
            debug!(index = idx, time = %candle.time, "warm-up candle");
            continue;
        }
        entries.push(ReplayEntry { candle, result });
    }
    entries
}

/// The thirty-bar demo series, 2025-04-16 10:01 to 10:30.
pub fn sample_candles() -> Vec<Candle> {
    // (open, high, low, close, volume)
    const BARS: [(f64, f64, f64, f64, f64); 30] = [
        (100.0, 102.0, 99.0, 101.0, 1000.0),
        (101.0, 103.0, 100.0, 102.0, 1200.0),
        (102.0, 104.0, 101.0, 103.0, 1100.0),
        (103.0, 104.0, 102.0, 104.0, 900.0),
        (104.0, 106.0, 103.0, 105.0, 1500.0),
        (105.0, 107.0, 104.0, 106.0, 1400.0),
        (106.0, 108.0, 105.0, 107.0, 1300.0),
        (107.0, 109.0, 106.0, 108.0, 1600.0),
        (108.0, 110.0, 107.0, 109.0, 1800.0),
        (109.0, 111.0, 108.0, 110.0, 2000.0),
        (110.0, 112.0, 109.0, 111.0, 2200.0),
        (111.0, 113.0, 110.0, 112.0, 2100.0),
        (112.0, 114.0, 111.0, 113.0, 2300.0),
        (113.0, 115.0, 112.0, 114.0, 2400.0),
        (114.0, 116.0, 112.0, 115.0, 2600.0),
        (115.0, 117.0, 113.0, 116.0, 2800.0),
        (116.0, 118.0, 114.0, 117.0, 3000.0),
        (117.0, 119.0, 115.0, 118.0, 3200.0),
        (118.0, 120.0, 116.0, 119.0, 3100.0),
        (119.0, 121.0, 117.0, 120.0, 3300.0),
        (120.0, 122.0, 118.0, 119.0, 3400.0),
        (119.0, 120.0, 117.0, 118.0, 3200.0),
        (118.0, 119.0, 116.0, 117.0, 3000.0),
        (117.0, 118.0, 115.0, 116.0, 2800.0),
        (116.0, 117.0, 114.0, 115.0, 2600.0),
        (115.0, 116.0, 113.0, 114.0, 2400.0),
        (114.0, 115.0, 112.0, 113.0, 2200.0),
        (113.0, 114.0, 110.0, 112.0, 2100.0),
        (112.0, 113.0, 109.0, 111.0, 2000.0),
        (111.0, 112.0, 108.0, 110.0, 1900.0),
    ];

    BARS.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close, volume))| Candle {
            time: CandleTime::Label(format!("2025-04-16T10:{:02}:00", i + 1)),
            open,
            high,
            low,
            close,
            volume,
        })
        .collect()
}
