// =============================================================================
// polaris-divergence — Technical-indicator and divergence-detection engine
// =============================================================================

//! Batch divergence detection over OHLCV candle sequences.
//!
//! The crate is a pure transform boundary: an acquisition collaborator feeds
//! an ordered candle array in, the engine flags the bars where price makes a
//! new extreme that a derived oscillator does not confirm, and notification
//! or rendering collaborators consume the resulting signal records. No I/O,
//! no internal locking outside the [`SignalAggregator`], and no state that
//! outlives a single call — every invocation recomputes from scratch.
//!
//! ```no_run
//! use polaris_divergence::{
//!     parse_klines, DivergenceConfig, DivergenceEngine, Period, SignalAggregator,
//! };
//!
//! # fn main() -> polaris_divergence::Result<()> {
//! let candles = parse_klines(r#"[[0,"1","2","0.5","1.5","10",899999]]"#)?;
//! let engine = DivergenceEngine::new(DivergenceConfig::default());
//! let aggregator = SignalAggregator::new();
//!
//! engine.analyze_into("BTCUSDT", Period::H1, &candles, &aggregator)?;
//! for record in aggregator.snapshot() {
//!     println!("{record}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod candle;
pub mod config;
pub mod cross_detector;
pub mod divergence;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod period;
pub mod pivot_detector;
pub mod types;

pub use aggregator::{SignalAggregator, SignalRecord};
pub use candle::{merge_candles, parse_klines, validate_candles, Candle};
pub use config::{
    CompositeConfig, DivergenceConfig, FetchHints, KdjConfig, MacdFractalConfig,
};
pub use divergence::{
    CompositeStrategy, DivergenceStrategy, KdjStrategy, MacdFractalStrategy,
};
pub use engine::DivergenceEngine;
pub use error::{EngineError, Result};
pub use period::Period;
pub use types::{DetectionMethod, PivotKind, PivotPoint, Signal, SignalKind};
