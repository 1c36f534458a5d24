// =============================================================================
// Shared types used across the signal engine
// =============================================================================

use serde::{Deserialize, Serialize};

/// Categorical trading signal produced by the aggregator.
///
/// Serialized in lowercase (`"buy"`, `"sell"`, `"wait"`).  The "no signal yet"
/// state is modelled as `Option<Signal>::None` by the callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Buy,
    Sell,
    Wait,
}

impl Signal {
    /// Strength at or above which the decision is `Buy`.
    pub const BUY_THRESHOLD: f64 = 2.0;
    /// Strength at or below which the decision is `Sell`.
    pub const SELL_THRESHOLD: f64 = -2.0;

    /// Map an accumulated signal strength onto a decision.  Both thresholds are
    /// inclusive.
    pub fn from_strength(strength: f64) -> Self {
        if strength >= Self::BUY_THRESHOLD {
            Self::Buy
        } else if strength <= Self::SELL_THRESHOLD {
            Self::Sell
        } else {
            Self::Wait
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
            Self::Wait => write!(f, "WAIT"),
        }
    }
}

/// Side of an open position.  Reserved: nothing in the engine opens or closes
/// positions yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    Long,
    Short,
}

impl std::fmt::Display for PositionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Long => write!(f, "Long"),
            Self::Short => write!(f, "Short"),
        }
    }
}
