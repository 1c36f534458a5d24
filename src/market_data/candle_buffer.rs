use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::trace;

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// Open time of a candle: an epoch-millisecond timestamp or whatever label the
/// feed supplied (e.g. `"2025-04-16T10:01:00"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CandleTime {
    Millis(i64),
    Label(String),
}

impl std::fmt::Display for CandleTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Millis(ms) => write!(f, "{ms}"),
            Self::Label(label) => f.write_str(label),
        }
    }
}

impl From<i64> for CandleTime {
    fn from(ms: i64) -> Self {
        Self::Millis(ms)
    }
}

impl From<&str> for CandleTime {
    fn from(label: &str) -> Self {
        Self::Label(label.to_string())
    }
}

impl From<String> for CandleTime {
    fn from(label: String) -> Self {
        Self::Label(label)
    }
}

/// A single OHLCV bar.  Only `close` feeds the indicators; the other fields
/// are carried along for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: CandleTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

// ---------------------------------------------------------------------------
// CandleBuffer -- bounded history, oldest first
// ---------------------------------------------------------------------------

/// Ring buffer holding the most recent `capacity` candles in insertion order.
///
/// Candles are not sorted or checked for monotonic time; the feed is trusted
/// to deliver them in order.
#[derive(Debug, Clone)]
pub struct CandleBuffer {
    candles: VecDeque<Candle>,
    capacity: usize,
}

impl CandleBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            candles: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append `candle`, then drop the oldest entries until the buffer is back
    /// within `capacity`.
    pub fn push(&mut self, candle: Candle) {
        self.candles.push_back(candle);
        while self.candles.len() > self.capacity {
            if let Some(evicted) = self.candles.pop_front() {
                trace!(time = %evicted.time, capacity = self.capacity, "evicted oldest candle");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently appended candle.
    pub fn last(&self) -> Option<&Candle> {
        self.candles.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candle> {
        self.candles.iter()
    }

    /// Close prices, oldest first.
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn to_vec(&self) -> Vec<Candle> {
        self.candles.iter().cloned().collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_candle(minute: i64, close: f64) -> Candle {
        Candle {
            time: CandleTime::Millis(minute * 60_000),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 100.0,
        }
    }

    #[test]
    fn ring_buffer_trimming() {
        let mut buf = CandleBuffer::new(3);
        for i in 0..5 {
            buf.push(sample_candle(i, 100.0 + i as f64));
        }

        assert_eq!(buf.len(), 3);
        assert_eq!(buf.closes(), vec![102.0, 103.0, 104.0]);
        assert_eq!(buf.last().map(|c| c.close), Some(104.0));
    }

    #[test]
    fn never_exceeds_capacity_and_keeps_order() {
        let mut buf = CandleBuffer::new(100);
        for i in 0..250 {
            buf.push(sample_candle(i, i as f64));
            assert!(buf.len() <= 100);
        }

        let closes = buf.closes();
        let expected: Vec<f64> = (150..250).map(|i| i as f64).collect();
        assert_eq!(closes, expected);
        assert_eq!(buf.iter().next().map(|c| c.time.clone()), Some(CandleTime::Millis(150 * 60_000)));
    }

    #[test]
    fn below_capacity_keeps_everything() {
        let mut buf = CandleBuffer::new(100);
        for i in 0..10 {
            buf.push(sample_candle(i, i as f64));
        }
        assert_eq!(buf.len(), 10);
        assert_eq!(buf.to_vec().len(), 10);
        assert_eq!(buf.capacity(), 100);
    }

    #[test]
    fn empty_buffer() {
        let buf = CandleBuffer::new(100);
        assert!(buf.is_empty());
        assert!(buf.last().is_none());
        assert!(buf.closes().is_empty());
    }

    #[test]
    fn candle_time_accepts_number_or_string() {
        let t: CandleTime = serde_json::from_str("1700000000000").unwrap();
        assert_eq!(t, CandleTime::Millis(1_700_000_000_000));
        let t: CandleTime = serde_json::from_str("\"2025-04-16T10:01:00\"").unwrap();
        assert_eq!(t, CandleTime::from("2025-04-16T10:01:00"));
        assert_eq!(t.to_string(), "2025-04-16T10:01:00");
    }
}
