// =============================================================================
// Candle Signal Bot
// =============================================================================
//
// Streaming indicator engine: feed candles one at a time into a `SignalBot`
// and get back a BUY / SELL / WAIT decision built from SMA, RSI and MACD.

pub mod bot;
pub mod config;
pub mod indicators;
pub mod market_data;
pub mod replay;
pub mod signals;
pub mod types;

pub use bot::{SharedSignalBot, SignalBot, MAX_CANDLES};
pub use config::BotConfig;
pub use market_data::{Candle, CandleTime};
pub use signals::SignalResult;
pub use types::{PositionSide, Signal};
