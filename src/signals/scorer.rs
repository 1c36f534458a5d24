// =============================================================================
// Weighted Signal Scorer -- SMA / RSI / MACD votes
// =============================================================================
//
// Rules are evaluated in a fixed order (SMA, then RSI, then MACD) and each
// rule that fires adds a signed weight to the running strength and one reason
// to the list.  Ties (price == SMA, line == signal) cast no vote.
// =============================================================================

use serde::Serialize;

use crate::indicators::MacdReading;
use crate::types::Signal;

/// Indicator values fed to the scorer.  All values are unrounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInputs {
    pub price: f64,
    pub sma: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<MacdReading>,
}

/// One fired rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalContribution {
    /// "sma", "rsi" or "macd".
    pub source: String,
    pub delta: f64,
    pub reason: String,
}

/// Outcome of a scoring pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringResult {
    pub strength: f64,
    pub signal: Signal,
    pub contributions: Vec<SignalContribution>,
}

impl ScoringResult {
    /// Reasons in evaluation order.
    pub fn reasons(&self) -> Vec<String> {
        self.contributions.iter().map(|c| c.reason.clone()).collect()
    }
}

pub struct SignalScorer {
    rsi_oversold: f64,
    rsi_overbought: f64,
}

impl SignalScorer {
    pub const SMA_WEIGHT: f64 = 1.0;
    pub const RSI_WEIGHT: f64 = 2.0;
    pub const MACD_WEIGHT: f64 = 1.5;

    pub fn new(rsi_oversold: f64, rsi_overbought: f64) -> Self {
        Self {
            rsi_oversold,
            rsi_overbought,
        }
    }

    pub fn score(&self, inputs: &ScoreInputs) -> ScoringResult {
        let mut contributions = Vec::with_capacity(3);
        let mut vote = |source: &str, delta: f64, reason: String| {
            contributions.push(SignalContribution {
                source: source.to_string(),
                delta,
                reason,
            });
        };

        if let Some(sma) = inputs.sma {
            if inputs.price > sma {
                vote("sma", Self::SMA_WEIGHT, "price is above the simple moving average".into());
            } else if inputs.price < sma {
                vote("sma", -Self::SMA_WEIGHT, "price is below the simple moving average".into());
            }
        }

        if let Some(rsi) = inputs.rsi {
            if rsi < self.rsi_oversold {
                vote("rsi", Self::RSI_WEIGHT, format!("RSI in oversold zone ({rsi:.2})"));
            } else if rsi > self.rsi_overbought {
                vote("rsi", -Self::RSI_WEIGHT, format!("RSI in overbought zone ({rsi:.2})"));
            }
        }

        if let Some(MacdReading {
            macd_line,
            signal_line: Some(signal_line),
            ..
        }) = inputs.macd
        {
            if macd_line > signal_line {
                vote("macd", Self::MACD_WEIGHT, "bullish MACD crossover".into());
            } else if macd_line < signal_line {
                vote("macd", -Self::MACD_WEIGHT, "bearish MACD crossover".into());
            }
        }

        let strength = contributions.iter().fold(0.0, |acc, c| acc + c.delta);

        ScoringResult {
            strength,
            signal: Signal::from_strength(strength),
            contributions,
        }
    }
}
