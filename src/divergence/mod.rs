// =============================================================================
// Divergence Strategies
// =============================================================================
//
// Three ways of answering the same question — "given this candle array, which
// bars carry an unconfirmed price extreme?" — behind one trait. Each strategy
// holds only its configuration, computes its whole indicator substrate fresh
// per call, and never shares state with the others, so any subset can run
// concurrently over unrelated candle arrays.

pub mod composite;
pub mod kdj;
pub mod macd_fractal;

pub use composite::CompositeStrategy;
pub use kdj::KdjStrategy;
pub use macd_fractal::MacdFractalStrategy;

use crate::candle::Candle;
use crate::error::Result;
use crate::types::{DetectionMethod, Signal};

/// One divergence-classification strategy.
///
/// Implementations are pure with respect to the input: `detect` recomputes
/// everything from the candle array and returns signals ascending by index.
/// Inputs shorter than [`min_bars`](Self::min_bars) yield an empty vector,
/// not an error.
pub trait DivergenceStrategy: Send + Sync {
    /// Which [`DetectionMethod`] this strategy stamps on its signals.
    fn method(&self) -> DetectionMethod;

    /// Minimum candle count below which `detect` returns no signals.
    fn min_bars(&self) -> usize;

    /// Classify every bar of `candles`, returning the bars that diverge.
    fn detect(&self, candles: &[Candle]) -> Result<Vec<Signal>>;
}
