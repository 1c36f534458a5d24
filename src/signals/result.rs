// =============================================================================
// Signal Result -- snapshot returned by every `add_candle` call
// =============================================================================
//
// Serialized untagged, so the JSON carries no variant tag and the two forms
// are told apart by their fields:
//
//   { "signal": null, "reason": "not enough data", "indicators": {}, ... }
//   { "timestamp": "...", "timeframe": "1m", "price": 110.0,
//     "signal": "wait", "signalStrength": -1.0, "reasons": [...],
//     "indicators": { "sma": 114.5, "rsi": 35.71, "macd": {...} } }
//
// Indicator values are rounded here and nowhere else.
// =============================================================================

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::scorer::SignalContribution;
use crate::indicators::MacdReading;
use crate::types::Signal;

pub const INSUFFICIENT_DATA_REASON: &str = "not enough data";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SignalResult {
    Insufficient(InsufficientData),
    Ready(SignalReport),
}

impl SignalResult {
    /// The categorical signal, or `None` for the insufficient-data form.
    pub fn signal(&self) -> Option<Signal> {
        match self {
            Self::Insufficient(_) => None,
            Self::Ready(report) => Some(report.signal),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn report(&self) -> Option<&SignalReport> {
        match self {
            Self::Insufficient(_) => None,
            Self::Ready(report) => Some(report),
        }
    }
}

/// Serializes as `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NoIndicators {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsufficientData {
    /// Always `None`; kept so the wire form carries `"signal": null`.
    pub signal: Option<Signal>,
    pub reason: String,
    pub indicators: NoIndicators,
    /// Candles currently buffered.
    pub candles: usize,
    /// Candles needed before a signal is produced.
    pub required: usize,
}

impl InsufficientData {
    pub fn new(candles: usize, required: usize) -> Self {
        Self {
            signal: None,
            reason: INSUFFICIENT_DATA_REASON.to_string(),
            indicators: NoIndicators::default(),
            candles,
            required,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalReport {
    pub timestamp: DateTime<Utc>,
    pub timeframe: String,
    pub price: f64,
    pub signal: Signal,
    pub signal_strength: f64,
    pub reasons: Vec<String>,
    pub contributions: Vec<SignalContribution>,
    pub indicators: IndicatorSnapshot,
}

/// Rounded indicator values: SMA/RSI to 2 decimals, MACD to 4.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub sma: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<MacdSnapshot>,
}

impl IndicatorSnapshot {
    pub fn from_raw(sma: Option<f64>, rsi: Option<f64>, macd: Option<&MacdReading>) -> Self {
        Self {
            sma: sma.map(|v| round_to(v, 2)),
            rsi: rsi.map(|v| round_to(v, 2)),
            macd: macd.map(MacdSnapshot::from),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MacdSnapshot {
    pub macd_line: f64,
    pub signal_line: Option<f64>,
    pub histogram: Option<f64>,
}

impl From<&MacdReading> for MacdSnapshot {
    fn from(reading: &MacdReading) -> Self {
        Self {
            macd_line: round_to(reading.macd_line, 4),
            signal_line: reading.signal_line.map(|v| round_to(v, 4)),
            histogram: reading.histogram.map(|v| round_to(v, 4)),
        }
    }
}

/// Round to `decimals` places from the exact decimal value of the double, so
/// 2.675 (stored just below the half) becomes 2.67.  Negative zero is folded
/// into zero so it never shows up as `-0.0` on the wire.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    let rounded = format!("{value:.decimals$}").parse::<f64>().unwrap_or(value);
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
