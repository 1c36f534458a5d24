// =============================================================================
// Signals Module
// =============================================================================
//
// Turns indicator readings into a decision:
// - Weighted SMA / RSI / MACD voting
// - The result snapshot handed back to the caller

pub mod result;
pub mod scorer;

pub use result::{IndicatorSnapshot, InsufficientData, MacdSnapshot, SignalReport, SignalResult};
pub use scorer::{ScoreInputs, ScoringResult, SignalContribution, SignalScorer};
