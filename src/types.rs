// =============================================================================
// Shared types used across the Polaris divergence engine
// =============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a divergence signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    /// Bearish: price made a higher high the oscillator did not confirm.
    Top,
    /// Bullish: price made a lower low the oscillator did not confirm.
    Bottom,
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Top => write!(f, "Top"),
            Self::Bottom => write!(f, "Bottom"),
        }
    }
}

/// Which detection strategy produced a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectionMethod {
    Kdj,
    Composite,
    MacdFractal,
}

impl std::fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kdj => write!(f, "KDJ"),
            Self::Composite => write!(f, "Composite"),
            Self::MacdFractal => write!(f, "MACD-Fractal"),
        }
    }
}

/// Kind of local price extremum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PivotKind {
    High,
    Low,
}

/// A confirmed local extremum in a series. Derived per call, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotPoint {
    pub index: usize,
    pub value: f64,
    pub kind: PivotKind,
}

/// One divergence event on a candle series.
///
/// `index` and `time` locate the bar the signal fired on; `price` and
/// `indicator_value` carry the strategy-specific price level and oscillator
/// reading (J for KDJ, vote score for Composite, MACD line for MACD-Fractal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub index: usize,
    /// Bar open time, epoch milliseconds.
    pub time: i64,
    pub kind: SignalKind,
    pub price: f64,
    pub indicator_value: f64,
    pub method: DetectionMethod,
}

impl Signal {
    /// Signal time as a UTC datetime, `None` when the epoch-ms value is out of
    /// chrono's representable range.
    pub fn time_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.time)
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let when = self
            .time_utc()
            .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| format!("t={}", self.time));
        write!(
            f,
            "{} divergence [{}] price={} value={:.4} at {}",
            self.kind, self.method, self.price, self.indicator_value, when
        )
    }
}
