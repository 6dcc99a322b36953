use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, Result};

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// A single OHLCV candle.
///
/// Sequences handed to the engine are ordered ascending by `open_time` with
/// unique timestamps. Gap detection is the acquisition side's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: i64,
    pub close_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// Build a candle from one exchange kline row: a JSON array of
    /// `[open_time, open, high, low, close, volume, close_time, ...]` where
    /// prices and volume arrive as decimal strings. Elements past the first
    /// seven are ignored.
    ///
    /// Fails with [`EngineError::Data`] on short rows, non-numeric strings,
    /// and non-finite values, so malformed input never reaches the
    /// indicators as `NaN`.
    pub fn from_kline_row(row: &serde_json::Value) -> Result<Self> {
        let fields = row
            .as_array()
            .ok_or_else(|| EngineError::Data("kline row is not an array".into()))?;
        if fields.len() < 7 {
            return Err(EngineError::Data(format!(
                "kline row has {} elements, need at least 7",
                fields.len()
            )));
        }

        Ok(Candle {
            open_time: field_i64(&fields[0], "open_time")?,
            open: field_f64(&fields[1], "open")?,
            high: field_f64(&fields[2], "high")?,
            low: field_f64(&fields[3], "low")?,
            close: field_f64(&fields[4], "close")?,
            volume: field_f64(&fields[5], "volume")?,
            close_time: field_i64(&fields[6], "close_time")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Kline payload parsing
// ---------------------------------------------------------------------------

/// Parse a full REST kline payload (a JSON array of kline rows) into candles.
pub fn parse_klines(payload: &str) -> Result<Vec<Candle>> {
    let root: serde_json::Value = serde_json::from_str(payload)
        .map_err(|e| EngineError::Data(format!("invalid kline payload: {e}")))?;
    let rows = root
        .as_array()
        .ok_or_else(|| EngineError::Data("kline payload is not an array".into()))?;
    rows.iter().map(Candle::from_kline_row).collect()
}

/// Kline rows carry prices as JSON strings and timestamps as numbers; accept
/// either encoding for a float field and insist the result is finite.
fn field_f64(val: &serde_json::Value, name: &str) -> Result<f64> {
    let parsed = match val {
        serde_json::Value::String(s) => s
            .parse::<f64>()
            .map_err(|_| EngineError::Data(format!("field {name} is not a number: {s:?}")))?,
        serde_json::Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| EngineError::Data(format!("field {name} is not a valid f64")))?,
        other => {
            return Err(EngineError::Data(format!(
                "field {name} has unexpected JSON type: {other}"
            )))
        }
    };
    if !parsed.is_finite() {
        return Err(EngineError::Data(format!("field {name} is not finite: {parsed}")));
    }
    Ok(parsed)
}

fn field_i64(val: &serde_json::Value, name: &str) -> Result<i64> {
    val.as_i64()
        .ok_or_else(|| EngineError::Data(format!("field {name} is not an integer timestamp")))
}

// ---------------------------------------------------------------------------
// Validation and merging
// ---------------------------------------------------------------------------

/// Check a candle sequence before any indicator touches it: every OHLCV field
/// finite, `open_time` strictly ascending.
pub fn validate_candles(candles: &[Candle]) -> Result<()> {
    for (i, c) in candles.iter().enumerate() {
        for (name, v) in [
            ("open", c.open),
            ("high", c.high),
            ("low", c.low),
            ("close", c.close),
            ("volume", c.volume),
        ] {
            if !v.is_finite() {
                return Err(EngineError::Data(format!(
                    "candle {i}: {name} is not finite ({v})"
                )));
            }
        }
        if i > 0 && candles[i - 1].open_time >= c.open_time {
            return Err(EngineError::Data(format!(
                "candle {i}: open_time {} is not after previous open_time {}",
                c.open_time,
                candles[i - 1].open_time
            )));
        }
    }
    Ok(())
}

/// Merge groups of `factor` consecutive candles into higher-timeframe bars:
/// first open, last close, max high, min low, summed volume, first
/// `open_time`, last `close_time`. A trailing group shorter than `factor` is
/// dropped. `factor <= 1` returns the input unchanged.
pub fn merge_candles(candles: &[Candle], factor: usize) -> Vec<Candle> {
    if factor <= 1 {
        return candles.to_vec();
    }

    let chunks = candles.chunks_exact(factor);
    let dropped = chunks.remainder().len();
    let mut out = Vec::with_capacity(candles.len() / factor);

    for chunk in chunks {
        let mut merged = chunk[0].clone();
        for c in &chunk[1..] {
            if c.high > merged.high {
                merged.high = c.high;
            }
            if c.low < merged.low {
                merged.low = c.low;
            }
            merged.volume += c.volume;
        }
        merged.close = chunk[factor - 1].close;
        merged.close_time = chunk[factor - 1].close_time;
        out.push(merged);
    }

    if dropped > 0 {
        debug!(dropped, factor, "trailing partial candle group dropped");
    }
    out
}

// ---------------------------------------------------------------------------
// Column extractors -- bridge &[Candle] to the slice-based indicator API
// ---------------------------------------------------------------------------

pub fn opens(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.open).collect()
}

pub fn highs(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.high).collect()
}

pub fn lows(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.low).collect()
}

pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

pub fn volumes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.volume).collect()
}

pub fn open_times(candles: &[Candle]) -> Vec<i64> {
    candles.iter().map(|c| c.open_time).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
