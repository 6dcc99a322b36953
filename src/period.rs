// =============================================================================
// Candle periods (timeframes) supported by the engine
// =============================================================================
//
// Periods are built from a 15m base: collaborators fetch 15m candles and the
// candle boundary merges them into the higher timeframes (`merge_factor`
// candles per bar).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A candle timeframe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Period {
    #[serde(rename = "15m")]
    M15,
    #[serde(rename = "30m")]
    M30,
    #[serde(rename = "1h")]
    H1,
    #[serde(rename = "2h")]
    H2,
    #[serde(rename = "4h")]
    H4,
    #[serde(rename = "6h")]
    H6,
    #[serde(rename = "12h")]
    H12,
    #[serde(rename = "1d")]
    D1,
    #[serde(rename = "1w")]
    W1,
}

impl Period {
    /// Every supported period, shortest first.
    pub const ALL: [Period; 9] = [
        Period::M15,
        Period::M30,
        Period::H1,
        Period::H2,
        Period::H4,
        Period::H6,
        Period::H12,
        Period::D1,
        Period::W1,
    ];

    /// Exchange-style label ("15m", "1h", "1d", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::M15 => "15m",
            Self::M30 => "30m",
            Self::H1 => "1h",
            Self::H2 => "2h",
            Self::H4 => "4h",
            Self::H6 => "6h",
            Self::H12 => "12h",
            Self::D1 => "1d",
            Self::W1 => "1w",
        }
    }

    /// Bar length in milliseconds.
    pub fn duration_ms(&self) -> i64 {
        match self {
            Self::M15 => 15 * 60_000,
            Self::M30 => 30 * 60_000,
            Self::H1 => 3_600_000,
            Self::H2 => 2 * 3_600_000,
            Self::H4 => 4 * 3_600_000,
            Self::H6 => 6 * 3_600_000,
            Self::H12 => 12 * 3_600_000,
            Self::D1 => 86_400_000,
            Self::W1 => 7 * 86_400_000,
        }
    }

    /// How many 15m candles make up one bar of this period.
    pub fn merge_factor(&self) -> usize {
        match self {
            Self::M15 => 1,
            Self::M30 => 2,
            Self::H1 => 4,
            Self::H2 => 8,
            Self::H4 => 16,
            Self::H6 => 24,
            Self::H12 => 48,
            Self::D1 => 96,
            Self::W1 => 96 * 7,
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Period {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| EngineError::Data(format!("unknown period label: {s:?}")))
    }
}
