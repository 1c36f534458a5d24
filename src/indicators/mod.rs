// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure functions over a slice of close prices ordered oldest-first.  Nothing
// here touches bot state.  Every point-value function returns `Option<T>`;
// `None` means the slice is shorter than the indicator's look-back.

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use ema::{calculate_ema, current_ema};
pub use macd::{calculate_macd, MacdReading, MacdSignalMode};
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
