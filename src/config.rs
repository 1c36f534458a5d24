// =============================================================================
// Bot Configuration
// =============================================================================
//
// One immutable `BotConfig` per bot instance.  JSON keys are camelCase
// (`rsiPeriod`, `fastEMA`, ...).  A field that is absent or `null` takes its
// default during deserialization, and `with_fallbacks` additionally replaces
// zero or non-finite values so a half-filled form still yields a usable bot.
// =============================================================================

use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

use crate::indicators::MacdSignalMode;

/// Timeframe labels the bot is normally run with.  Anything else is accepted
/// but logged, since the label has no effect on the computation.
pub const KNOWN_TIMEFRAMES: &[&str] = &["1m", "5m"];

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_timeframe() -> String {
    "1m".to_string()
}

fn default_rsi_period() -> usize {
    14
}

fn default_rsi_overbought() -> f64 {
    70.0
}

fn default_rsi_oversold() -> f64 {
    30.0
}

fn default_fast_ema() -> usize {
    12
}

fn default_slow_ema() -> usize {
    26
}

fn default_signal_period() -> usize {
    9
}

fn default_sma_length() -> usize {
    20
}

/// Generates a `deserialize_with` helper that maps JSON `null` to the field's
/// default helper.
macro_rules! null_as_default {
    ($name:ident, $ty:ty, $default:path) => {
        fn $name<'de, D>(deserializer: D) -> Result<$ty, D::Error>
        where
            D: Deserializer<'de>,
        {
            Ok(Option::<$ty>::deserialize(deserializer)?.unwrap_or_else($default))
        }
    };
}

null_as_default!(timeframe_or_default, String, default_timeframe);
null_as_default!(rsi_period_or_default, usize, default_rsi_period);
null_as_default!(rsi_overbought_or_default, f64, default_rsi_overbought);
null_as_default!(rsi_oversold_or_default, f64, default_rsi_oversold);
null_as_default!(fast_ema_or_default, usize, default_fast_ema);
null_as_default!(slow_ema_or_default, usize, default_slow_ema);
null_as_default!(signal_period_or_default, usize, default_signal_period);
null_as_default!(sma_length_or_default, usize, default_sma_length);
null_as_default!(macd_signal_mode_or_default, MacdSignalMode, MacdSignalMode::default);

// =============================================================================
// BotConfig
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotConfig {
    /// Display label only, e.g. "1m" or "5m".
    #[serde(default = "default_timeframe", deserialize_with = "timeframe_or_default")]
    pub timeframe: String,

    /// Number of close-to-close changes averaged by the RSI.
    #[serde(default = "default_rsi_period", deserialize_with = "rsi_period_or_default")]
    pub rsi_period: usize,

    /// RSI above this level counts as overbought.
    #[serde(default = "default_rsi_overbought", deserialize_with = "rsi_overbought_or_default")]
    pub rsi_overbought: f64,

    /// RSI below this level counts as oversold.
    #[serde(default = "default_rsi_oversold", deserialize_with = "rsi_oversold_or_default")]
    pub rsi_oversold: f64,

    #[serde(
        rename = "fastEMA",
        default = "default_fast_ema",
        deserialize_with = "fast_ema_or_default"
    )]
    pub fast_ema: usize,

    #[serde(
        rename = "slowEMA",
        default = "default_slow_ema",
        deserialize_with = "slow_ema_or_default"
    )]
    pub slow_ema: usize,

    /// MACD signal-line period.
    #[serde(default = "default_signal_period", deserialize_with = "signal_period_or_default")]
    pub signal_period: usize,

    #[serde(default = "default_sma_length", deserialize_with = "sma_length_or_default")]
    pub sma_length: usize,

    #[serde(default, deserialize_with = "macd_signal_mode_or_default")]
    pub macd_signal_mode: MacdSignalMode,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            timeframe: default_timeframe(),
            rsi_period: default_rsi_period(),
            rsi_overbought: default_rsi_overbought(),
            rsi_oversold: default_rsi_oversold(),
            fast_ema: default_fast_ema(),
            slow_ema: default_slow_ema(),
            signal_period: default_signal_period(),
            sma_length: default_sma_length(),
            macd_signal_mode: MacdSignalMode::default(),
        }
    }
}

impl BotConfig {
    /// Replace every zero / non-finite / empty field with its default.
    ///
    /// A consequence is that a threshold of exactly 0 cannot be configured.
    pub fn with_fallbacks(self) -> Self {
        fn period(value: usize, default: usize) -> usize {
            if value == 0 {
                default
            } else {
                value
            }
        }

        fn level(value: f64, default: f64) -> f64 {
            if value == 0.0 || !value.is_finite() {
                default
            } else {
                value
            }
        }

        let timeframe = if self.timeframe.is_empty() {
            default_timeframe()
        } else {
            self.timeframe
        };

        Self {
            timeframe,
            rsi_period: period(self.rsi_period, default_rsi_period()),
            rsi_overbought: level(self.rsi_overbought, default_rsi_overbought()),
            rsi_oversold: level(self.rsi_oversold, default_rsi_oversold()),
            fast_ema: period(self.fast_ema, default_fast_ema()),
            slow_ema: period(self.slow_ema, default_slow_ema()),
            signal_period: period(self.signal_period, default_signal_period()),
            sma_length: period(self.sma_length, default_sma_length()),
            macd_signal_mode: self.macd_signal_mode,
        }
    }

    /// Number of candles that must be buffered before a signal is produced.
    pub fn required_history(&self) -> usize {
        self.slow_ema.max(self.rsi_period).max(self.sma_length)
    }

    /// Reject threshold combinations that can never produce a sensible RSI
    /// vote.  Period fields are not checked here; `with_fallbacks` already
    /// guarantees they are non-zero.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (0.0..=100.0).contains(&self.rsi_oversold),
            "rsiOversold must be within [0, 100], got {}",
            self.rsi_oversold
        );
        ensure!(
            (0.0..=100.0).contains(&self.rsi_overbought),
            "rsiOverbought must be within [0, 100], got {}",
            self.rsi_overbought
        );
        ensure!(
            self.rsi_oversold < self.rsi_overbought,
            "rsiOversold ({}) must be below rsiOverbought ({})",
            self.rsi_oversold,
            self.rsi_overbought
        );

        if !KNOWN_TIMEFRAMES.contains(&self.timeframe.as_str()) {
            warn!(timeframe = %self.timeframe, "unrecognised timeframe label");
        }
        if self.fast_ema >= self.slow_ema {
            warn!(
                fast_ema = self.fast_ema,
                slow_ema = self.slow_ema,
                "fast EMA period is not shorter than the slow one"
            );
        }
        Ok(())
    }

    /// Load configuration from a JSON file at `path`, applying fallbacks.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read bot config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse bot config from {}", path.display()))?;
        let config = config.with_fallbacks();

        info!(
            path = %path.display(),
            timeframe = %config.timeframe,
            rsi_period = config.rsi_period,
            sma_length = config.sma_length,
            "bot config loaded"
        );

        Ok(config)
    }
}
