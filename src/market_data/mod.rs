pub mod candle_buffer;
pub mod candle_feed;

// Re-export the candle types for convenient access (e.g. `use crate::market_data::Candle`).
pub use candle_buffer::{Candle, CandleBuffer, CandleTime};
pub use candle_feed::{load_candles, parse_candles};
