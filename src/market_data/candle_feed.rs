// =============================================================================
// Candle feed -- parse candle sequences from JSON for replay
// =============================================================================
//
// Accepts a JSON array of objects:
//
//   [ { "time": "2025-04-16T10:01:00", "open": 100, "high": 102,
//       "low": 99, "close": 101, "volume": 1000 }, ... ]
//
// Prices and volume may also be numeric strings, as exchanges send them.
// Validation happens here so the bot itself never sees a malformed candle.
// =============================================================================

use std::path::Path;

use anyhow::{bail, Context, Result};

use super::candle_buffer::{Candle, CandleTime};

/// Parse a JSON array of candles.
pub fn parse_candles(text: &str) -> Result<Vec<Candle>> {
    let root: serde_json::Value =
        serde_json::from_str(text).context("failed to parse candle JSON")?;

    let items = root
        .as_array()
        .context("candle JSON must be an array of objects")?;

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| parse_candle(item).with_context(|| format!("invalid candle at index {idx}")))
        .collect()
}

/// Read and parse a candle file.
pub fn load_candles(path: impl AsRef<Path>) -> Result<Vec<Candle>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read candles from {}", path.display()))?;
    parse_candles(&content).with_context(|| format!("failed to load candles from {}", path.display()))
}

fn parse_candle(item: &serde_json::Value) -> Result<Candle> {
    let time = match &item["time"] {
        serde_json::Value::String(s) => CandleTime::Label(s.clone()),
        serde_json::Value::Number(n) => {
            CandleTime::Millis(n.as_i64().context("field time is not an integer")?)
        }
        serde_json::Value::Null => bail!("missing field time"),
        _ => bail!("field time has unexpected JSON type"),
    };

    Ok(Candle {
        time,
        open: parse_number(&item["open"], "open")?,
        high: parse_number(&item["high"], "high")?,
        low: parse_number(&item["low"], "low")?,
        close: parse_number(&item["close"], "close")?,
        volume: parse_number(&item["volume"], "volume")?,
    })
}

/// A finite number given either as a JSON number or as a numeric string.
fn parse_number(val: &serde_json::Value, name: &str) -> Result<f64> {
    let value = match val {
        serde_json::Value::String(s) => s
            .trim()
            .parse::<f64>()
            .with_context(|| format!("failed to parse {name} as f64: {s}"))?,
        serde_json::Value::Number(n) => n
            .as_f64()
            .with_context(|| format!("field {name} is not a valid f64"))?,
        serde_json::Value::Null => bail!("missing field {name}"),
        _ => bail!("field {name} has unexpected JSON type"),
    };

    if !value.is_finite() {
        bail!("field {name} is not finite: {value}");
    }
    Ok(value)
}
