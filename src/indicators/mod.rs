// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free numeric transforms over float slices. Every function
// is a batch computation: full input in, index-aligned series out, with 0.0
// filling warm-up indices and an explicit fallback for every division. No
// shared state anywhere, so unrelated candle arrays can be processed
// concurrently.

pub mod extremes;
pub mod macd;
pub mod momentum;
pub mod rsi;
pub mod smoothing;
pub mod trend;
pub mod volume;

pub use extremes::{hhv, llv};
pub use macd::{macd, vwmacd, MacdOutput};
pub use momentum::{cci, momentum, stochastic};
pub use rsi::rsi;
pub use smoothing::{ema, ma, rma, weighted_sma};
pub use trend::{di_oscillator, directional_index, true_range, DirectionalIndex};
pub use volume::{cmf, mfi, obv, vwma};
