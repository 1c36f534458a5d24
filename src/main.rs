// =============================================================================
// Candle Signal Bot -- Replay Driver
// =============================================================================
//
// Usage: candle-signal-bot [candles.json]
//
// Without an argument the built-in demo series is replayed.  Each reported
// result is printed as one JSON line on stdout; logs go to stderr.
// =============================================================================

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use candle_signal_bot::market_data::load_candles;
use candle_signal_bot::replay::{replay, sample_candles, DEMO_WARMUP};
use candle_signal_bot::{BotConfig, SignalBot};

fn main() -> anyhow::Result<()> {
    // ── 1. Environment & logging ─────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ── 2. Configuration ─────────────────────────────────────────────────
    let config_path =
        std::env::var("SIGNAL_BOT_CONFIG").unwrap_or_else(|_| "bot_config.json".to_string());
    let mut config = BotConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        BotConfig::default()
    });

    if let Ok(timeframe) = std::env::var("SIGNAL_BOT_TIMEFRAME") {
        config.timeframe = timeframe.trim().to_string();
    }
    let config = config.with_fallbacks();
    config.validate().context("invalid bot configuration")?;

    info!(
        timeframe = %config.timeframe,
        rsi_period = config.rsi_period,
        sma_length = config.sma_length,
        slow_ema = config.slow_ema,
        "Configuration ready"
    );

    // ── 3. Candles ───────────────────────────────────────────────────────
    let candles = match std::env::args().nth(1) {
        Some(path) => load_candles(&path)?,
        None => {
            info!("No candle file given, replaying the demo series");
            sample_candles()
        }
    };
    info!(count = candles.len(), warmup = DEMO_WARMUP, "Replaying candles");

    // ── 4. Replay ────────────────────────────────────────────────────────
    let mut bot = SignalBot::new(config);
    for entry in replay(&mut bot, candles, DEMO_WARMUP) {
        let line = serde_json::to_string(&entry).context("failed to serialise replay entry")?;
        println!("{line}");
    }

    info!(last_signal = ?bot.last_signal(), "Replay finished");
    Ok(())
}
