// =============================================================================
// Error types for the Polaris divergence engine
// =============================================================================

use thiserror::Error;

/// All failure modes surfaced by the engine.
///
/// Indicator math never fails on short input (it produces sentinel-filled
/// series instead); the error paths are the candle boundary, explicit
/// first-value requests that cannot be satisfied, and config file I/O.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed candle input: non-numeric OHLCV strings, short kline rows,
    /// non-finite fields, or out-of-order timestamps.
    #[error("malformed candle data: {0}")]
    Data(String),

    /// An indicator was asked for a first value it cannot compute.
    #[error("insufficient data: need at least {required} samples, got {got}")]
    InsufficientData { required: usize, got: usize },

    /// A parameter for which no sentinel output is meaningful.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Config file could not be read or written.
    #[error("config file i/o: {0}")]
    Io(#[from] std::io::Error),

    /// Config file contents could not be parsed.
    #[error("config parse: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
