// =============================================================================
// Signal Bot -- per-stream orchestrator
// =============================================================================
//
// One `SignalBot` per candle stream.  `add_candle` is the only mutation path:
//
//   1. Append the candle to the bounded buffer (oldest evicted past 100).
//   2. If the buffer is shorter than max(slowEMA, rsiPeriod, smaLength),
//      return the insufficient-data result and leave `last_signal` alone.
//   3. Otherwise compute SMA, RSI and MACD over the buffer closes, score them,
//      record the decision as `last_signal` and return the snapshot.
//
// The bot is synchronous and needs `&mut self`; callers that share it across
// threads go through `SharedSignalBot`.
// =============================================================================

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::config::BotConfig;
use crate::indicators::{calculate_macd, calculate_rsi, calculate_sma};
use crate::market_data::{Candle, CandleBuffer};
use crate::signals::{
    IndicatorSnapshot, InsufficientData, ScoreInputs, SignalReport, SignalResult, SignalScorer,
};
use crate::types::{PositionSide, Signal};

/// Number of candles retained per bot.
pub const MAX_CANDLES: usize = 100;

pub struct SignalBot {
    config: BotConfig,
    scorer: SignalScorer,
    candles: CandleBuffer,
    last_signal: Option<Signal>,
    /// Reserved; never transitioned by the engine.
    position: Option<PositionSide>,
}

impl SignalBot {
    /// Build a bot.  Zero or missing parameters fall back to their defaults;
    /// threshold validation is left to the caller (`BotConfig::validate`).
    pub fn new(config: BotConfig) -> Self {
        let config = config.with_fallbacks();
        debug!(
            timeframe = %config.timeframe,
            required_history = config.required_history(),
            macd_signal_mode = ?config.macd_signal_mode,
            "signal bot created"
        );
        Self {
            scorer: SignalScorer::new(config.rsi_oversold, config.rsi_overbought),
            config,
            candles: CandleBuffer::new(MAX_CANDLES),
            last_signal: None,
            position: None,
        }
    }

    /// Ingest one candle and return the resulting signal snapshot.
    pub fn add_candle(&mut self, candle: Candle) -> SignalResult {
        self.candles.push(candle);
        self.generate_signal()
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn candles(&self) -> &CandleBuffer {
        &self.candles
    }

    /// Decision of the most recent aggregation, `None` before the first one.
    pub fn last_signal(&self) -> Option<Signal> {
        self.last_signal
    }

    pub fn position(&self) -> Option<PositionSide> {
        self.position
    }

    fn generate_signal(&mut self) -> SignalResult {
        let required = self.config.required_history();
        let available = self.candles.len();

        let price = match self.candles.last() {
            Some(last) if available >= required => last.close,
            _ => {
                debug!(candles = available, required, "not enough data for a signal");
                return SignalResult::Insufficient(InsufficientData::new(available, required));
            }
        };

        let closes = self.candles.closes();
        let cfg = &self.config;

        let sma = calculate_sma(&closes, cfg.sma_length);
        let rsi = calculate_rsi(&closes, cfg.rsi_period);
        let macd = calculate_macd(
            &closes,
            cfg.fast_ema,
            cfg.slow_ema,
            cfg.signal_period,
            cfg.macd_signal_mode,
        );

        let scoring = self.scorer.score(&ScoreInputs {
            price,
            sma,
            rsi,
            macd,
        });

        debug!(
            price,
            sma = ?sma,
            rsi = ?rsi,
            macd_line = ?macd.map(|m| m.macd_line),
            strength = scoring.strength,
            signal = %scoring.signal,
            "signal evaluated"
        );

        if self.last_signal != Some(scoring.signal) {
            info!(
                timeframe = %cfg.timeframe,
                from = ?self.last_signal,
                to = %scoring.signal,
                strength = scoring.strength,
                "signal changed"
            );
        }
        self.last_signal = Some(scoring.signal);

        SignalResult::Ready(SignalReport {
            timestamp: Utc::now(),
            timeframe: self.config.timeframe.clone(),
            price,
            signal: scoring.signal,
            signal_strength: scoring.strength,
            reasons: scoring.reasons(),
            indicators: IndicatorSnapshot::from_raw(sma, rsi, macd.as_ref()),
            contributions: scoring.contributions,
        })
    }
}

impl Default for SignalBot {
    fn default() -> Self {
        Self::new(BotConfig::default())
    }
}

// =============================================================================
// SharedSignalBot
// =============================================================================

/// Cloneable handle that serializes `add_candle` calls from several threads.
#[derive(Clone)]
pub struct SharedSignalBot {
    inner: Arc<Mutex<SignalBot>>,
}

impl SharedSignalBot {
    pub fn new(bot: SignalBot) -> Self {
        Self {
            inner: Arc::new(Mutex::new(bot)),
        }
    }

    pub fn add_candle(&self, candle: Candle) -> SignalResult {
        self.inner.lock().add_candle(candle)
    }

    pub fn last_signal(&self) -> Option<Signal> {
        self.inner.lock().last_signal()
    }

    pub fn candle_count(&self) -> usize {
        self.inner.lock().candles().len()
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::MacdSignalMode;
    use crate::market_data::CandleTime;
    use crate::replay::sample_candles;

    fn candle(minute: i64, close: f64) -> Candle {
        Candle {
            time: CandleTime::Millis(minute * 60_000),
            open: close,
            high: close + 0.5,
            low: close - 0.5,
            close,
            volume: 1_000.0,
        }
    }

    fn feed(bot: &mut SignalBot, closes: &[f64]) -> Vec<SignalResult> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| bot.add_candle(candle(i as i64, c)))
            .collect()
    }

    #[test]
    fn new_bot_is_empty() {
        let bot = SignalBot::default();
        assert!(bot.candles().is_empty());
        assert!(bot.last_signal().is_none());
        assert!(bot.position().is_none());
        assert_eq!(bot.config().required_history(), 26);
    }

    #[test]
    fn sample_candle_16_is_insufficient() {
        let mut bot = SignalBot::default();
        let samples = sample_candles();
        for c in &samples[..15] {
            bot.add_candle(c.clone());
        }
        let result = bot.add_candle(samples[15].clone());
        assert!(!result.is_ready());
        assert!(result.signal().is_none());
        match result {
            SignalResult::Insufficient(data) => {
                assert_eq!(data.candles, 16);
                assert_eq!(data.required, 26);
            }
            SignalResult::Ready(_) => panic!("expected insufficient data"),
        }
        assert!(bot.last_signal().is_none());
    }

    #[test]
    fn sample_series_end_to_end() {
        let mut bot = SignalBot::default();
        let results: Vec<SignalResult> = sample_candles()
            .into_iter()
            .map(|c| bot.add_candle(c))
            .collect();
        assert_eq!(results.len(), 30);

        for r in &results[..25] {
            assert!(!r.is_ready());
        }
        for r in &results[25..] {
            let report = r.report().expect("ready from candle 26 on");
            assert!(report.indicators.sma.is_some());
            assert!(report.indicators.rsi.is_some());
            // 30 candles < slowEMA + signalPeriod, so no signal line yet.
            let macd = report.indicators.macd.expect("both EMAs available");
            assert!(macd.signal_line.is_none());
            assert!(macd.histogram.is_none());
        }

        // Candle 26: close 114 below SMA 114.4, RSI 57.14 => -1 => wait
        let first = results[25].report().unwrap();
        assert!((first.signal_strength + 1.0).abs() < 1e-12);
        assert_eq!(first.signal, Signal::Wait);
        assert_eq!(first.indicators.sma, Some(114.4));
        assert_eq!(first.indicators.rsi, Some(57.14));

        // Candle 30: close 110 below SMA 115 (-1), RSI 28.57 oversold (+2) => wait
        let last = results[29].report().unwrap();
        assert!((last.price - 110.0).abs() < f64::EPSILON);
        assert_eq!(last.timeframe, "1m");
        assert!((last.signal_strength - 1.0).abs() < 1e-12);
        assert_eq!(last.signal, Signal::Wait);
        assert_eq!(last.indicators.sma, Some(115.0));
        assert_eq!(last.indicators.rsi, Some(28.57));
        assert_eq!(
            last.reasons,
            vec![
                "price is below the simple moving average".to_string(),
                "RSI in oversold zone (28.57)".to_string(),
            ]
        );
        assert_eq!(bot.last_signal(), Some(Signal::Wait));
    }

    #[test]
    fn flat_market_sells_on_saturated_rsi() {
        // price == SMA casts no vote; RSI saturates at 100 => -2 => sell.
        let mut bot = SignalBot::default();
        let results = feed(&mut bot, &[100.0; 26]);
        let report = results[25].report().unwrap();
        assert_eq!(report.signal, Signal::Sell);
        assert!((report.signal_strength + 2.0).abs() < 1e-12);
        assert_eq!(report.indicators.rsi, Some(100.0));
        assert_eq!(bot.last_signal(), Some(Signal::Sell));
    }

    #[test]
    fn oversold_bounce_buys() {
        let mut bot = SignalBot::new(BotConfig {
            sma_length: 2,
            ..BotConfig::default()
        });
        let mut closes: Vec<f64> = (0..26).map(|i| 200.0 - i as f64).collect();
        closes.push(175.5);
        let results = feed(&mut bot, &closes);
        let report = results.last().and_then(SignalResult::report).unwrap();
        assert_eq!(report.signal, Signal::Buy);
        assert!((report.signal_strength - 3.0).abs() < 1e-12);
        assert_eq!(report.contributions.len(), 2);
    }

    #[test]
    fn simplified_macd_signal_line_equals_line() {
        let mut bot = SignalBot::default();
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.4).sin() * 3.0).collect();
        let results = feed(&mut bot, &closes);
        for (i, r) in results.iter().enumerate().skip(25) {
            let macd = r.report().unwrap().indicators.macd.unwrap();
            if i + 1 >= 35 {
                assert_eq!(macd.signal_line, Some(macd.macd_line));
                assert_eq!(macd.histogram, Some(0.0));
                assert!(!r
                    .report()
                    .unwrap()
                    .contributions
                    .iter()
                    .any(|c| c.source == "macd"));
            } else {
                assert!(macd.signal_line.is_none());
            }
        }
    }

    #[test]
    fn smoothed_mode_can_vote_on_macd() {
        let mut bot = SignalBot::new(BotConfig {
            macd_signal_mode: MacdSignalMode::Smoothed,
            ..BotConfig::default()
        });
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.4).sin() * 3.0).collect();
        let results = feed(&mut bot, &closes);
        let voted = results
            .iter()
            .filter_map(SignalResult::report)
            .any(|r| r.contributions.iter().any(|c| c.source == "macd"));
        assert!(voted);
    }

    #[test]
    fn buffer_capped_at_max_candles() {
        let mut bot = SignalBot::default();
        let closes: Vec<f64> = (0..150).map(|i| i as f64).collect();
        feed(&mut bot, &closes);
        assert_eq!(bot.candles().len(), MAX_CANDLES);
        let expected: Vec<f64> = (50..150).map(|i| i as f64).collect();
        assert_eq!(bot.candles().closes(), expected);
    }

    #[test]
    fn earlier_results_are_not_altered() {
        let mut bot = SignalBot::default();
        let samples = sample_candles();
        let mut results = Vec::new();
        for c in samples.iter().take(27) {
            results.push(bot.add_candle(c.clone()));
        }
        let snapshot = results[26].clone();
        for c in samples.iter().skip(27) {
            bot.add_candle(c.clone());
        }
        assert_eq!(results[26], snapshot);
    }

    #[test]
    fn last_signal_holds_while_guard_fails() {
        let mut bot = SignalBot::new(BotConfig {
            sma_length: 3,
            slow_ema: 3,
            fast_ema: 2,
            rsi_period: 2,
            ..BotConfig::default()
        });
        feed(&mut bot, &[1.0, 1.0]);
        assert!(bot.last_signal().is_none());
        bot.add_candle(candle(3, 1.0));
        assert!(bot.last_signal().is_some());
    }

    #[test]
    fn shared_bot_serializes_threads() {
        let shared = SharedSignalBot::new(SignalBot::default());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let bot = shared.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        bot.add_candle(candle(t * 50 + i, 100.0 + i as f64));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(shared.candle_count(), MAX_CANDLES);
        assert!(shared.last_signal().is_some());
    }
}
