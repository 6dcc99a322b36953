// =============================================================================
// Divergence Engine — Validation and strategy dispatch
// =============================================================================
//
// The facade collaborators call. Construction builds the enabled strategies
// in a fixed order (KDJ, composite, MACD-fractal); analysis validates the
// candle sequence once, then runs each strategy over it and concatenates
// their output in that order. The engine holds no mutable state, so one
// instance can serve concurrent callers.

use tracing::{debug, info};

use crate::aggregator::SignalAggregator;
use crate::candle::{validate_candles, Candle};
use crate::config::DivergenceConfig;
use crate::divergence::{
    CompositeStrategy, DivergenceStrategy, KdjStrategy, MacdFractalStrategy,
};
use crate::error::Result;
use crate::period::Period;
use crate::types::Signal;

pub struct DivergenceEngine {
    strategies: Vec<Box<dyn DivergenceStrategy>>,
}

impl DivergenceEngine {
    /// Build the enabled strategy set from `config`.
    pub fn new(config: DivergenceConfig) -> Self {
        let mut strategies: Vec<Box<dyn DivergenceStrategy>> = Vec::new();
        if config.enable_kdj {
            strategies.push(Box::new(KdjStrategy::new(config.kdj.clone())));
        }
        if config.enable_composite {
            strategies.push(Box::new(CompositeStrategy::new(config.composite.clone())));
        }
        if config.enable_macd_fractal {
            strategies.push(Box::new(MacdFractalStrategy::new(config.macd_fractal.clone())));
        }

        info!(strategies = strategies.len(), "divergence engine ready");
        Self { strategies }
    }

    /// Number of enabled strategies.
    pub fn strategy_count(&self) -> usize {
        self.strategies.len()
    }

    /// Validate `candles` and run every enabled strategy over them.
    ///
    /// Output is the concatenation of per-strategy results in construction
    /// order; each strategy's signals are ascending by index.
    pub fn analyze(&self, candles: &[Candle]) -> Result<Vec<Signal>> {
        validate_candles(candles)?;

        let mut signals = Vec::new();
        for strategy in &self.strategies {
            let found = strategy.detect(candles)?;
            debug!(
                method = %strategy.method(),
                signals = found.len(),
                "strategy run complete"
            );
            signals.extend(found);
        }

        info!(bars = candles.len(), signals = signals.len(), "analysis complete");
        Ok(signals)
    }

    /// Run [`analyze`](Self::analyze) and record the results for one
    /// symbol/period pair. Returns how many signals were newly inserted.
    pub fn analyze_into(
        &self,
        symbol: &str,
        period: Period,
        candles: &[Candle],
        aggregator: &SignalAggregator,
    ) -> Result<usize> {
        let signals = self.analyze(candles)?;
        Ok(aggregator.insert_batch(symbol, period, &signals))
    }
}

impl Default for DivergenceEngine {
    fn default() -> Self {
        Self::new(DivergenceConfig::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn candles(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let phase = i as f64 * 0.4;
                let mid = 100.0 + 8.0 * phase.sin();
                Candle {
                    open_time: i as i64 * 900_000,
                    close_time: i as i64 * 900_000 + 899_999,
                    open: mid,
                    high: mid + 1.0,
                    low: mid - 1.0,
                    close: mid + 0.3,
                    volume: 20.0,
                }
            })
            .collect()
    }

    #[test]
    fn all_strategies_enabled_by_default() {
        assert_eq!(DivergenceEngine::default().strategy_count(), 3);
    }

    #[test]
    fn toggles_control_the_strategy_set() {
        let config = DivergenceConfig {
            enable_kdj: false,
            enable_macd_fractal: false,
            ..DivergenceConfig::default()
        };
        assert_eq!(DivergenceEngine::new(config).strategy_count(), 1);
    }

    #[test]
    fn analyze_rejects_corrupt_candles() {
        let engine = DivergenceEngine::default();
        let mut bad = candles(50);
        bad[10].close = f64::NAN;
        let err = engine.analyze(&bad).unwrap_err();
        assert!(matches!(err, EngineError::Data(_)));

        let mut unordered = candles(50);
        unordered[20].open_time = 0;
        assert!(engine.analyze(&unordered).is_err());
    }

    #[test]
    fn analyze_empty_input_is_ok_and_empty() {
        let engine = DivergenceEngine::default();
        assert!(engine.analyze(&[]).unwrap().is_empty());
    }

    #[test]
    fn analyze_is_idempotent() {
        let engine = DivergenceEngine::default();
        let data = candles(200);
        assert_eq!(engine.analyze(&data).unwrap(), engine.analyze(&data).unwrap());
    }

    #[test]
    fn analyze_into_deduplicates_on_rerun() {
        let engine = DivergenceEngine::default();
        let aggregator = SignalAggregator::new();
        let data = candles(200);

        let first = engine
            .analyze_into("BTCUSDT", Period::H1, &data, &aggregator)
            .unwrap();
        assert_eq!(first, aggregator.len());

        // Recomputation is bit-identical, so nothing new lands.
        let second = engine
            .analyze_into("BTCUSDT", Period::H1, &data, &aggregator)
            .unwrap();
        assert_eq!(second, 0);
        assert_eq!(aggregator.len(), first);
    }
}
