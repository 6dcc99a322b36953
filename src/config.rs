// =============================================================================
// Engine Configuration — Strategy parameters with atomic JSON persistence
// =============================================================================
//
// Every tunable the divergence engine consumes lives here. All fields carry
// `#[serde(default)]` so that adding new fields never breaks loading an older
// config file, and persistence uses the tmp + rename pattern to prevent
// corruption on crash.
//
// `periods`, `symbols`, and the `fetch` block are advisory: scheduling and
// acquisition collaborators read them, the engine itself does not.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::period::Period;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_true() -> bool {
    true
}

fn default_kdj_window() -> usize {
    34
}

fn default_kdj_smooth() -> usize {
    3
}

fn default_kdj_k_n() -> usize {
    8
}

fn default_kdj_k_m() -> usize {
    1
}

fn default_kdj_d_n() -> usize {
    6
}

fn default_kdj_d_m() -> usize {
    1
}

fn default_kdj_j1_period() -> usize {
    3
}

fn default_kdj_oversold() -> f64 {
    20.0
}

fn default_kdj_overbought() -> f64 {
    90.0
}

fn default_pivot_period() -> usize {
    5
}

fn default_min_divergence() -> i32 {
    1
}

fn default_rsi_period() -> usize {
    14
}

fn default_macd_fast() -> usize {
    12
}

fn default_macd_slow() -> usize {
    26
}

fn default_macd_signal() -> usize {
    9
}

fn default_momentum_period() -> usize {
    10
}

fn default_cci_period() -> usize {
    10
}

fn default_stoch_period() -> usize {
    14
}

fn default_stoch_smooth() -> usize {
    3
}

fn default_cmf_period() -> usize {
    21
}

fn default_mfi_period() -> usize {
    14
}

fn default_di_period() -> usize {
    14
}

fn default_scale_factor() -> f64 {
    1.0
}

fn default_fractal_fast() -> usize {
    5
}

fn default_fractal_slow() -> usize {
    15
}

fn default_periods() -> Vec<Period> {
    vec![Period::H1, Period::H2, Period::H4, Period::D1]
}

fn default_kline_limit() -> usize {
    1000
}

fn default_history_page_limit() -> usize {
    500
}

fn default_extended_target() -> usize {
    2000
}

fn default_lookback_days() -> u32 {
    7
}

// =============================================================================
// Per-strategy blocks
// =============================================================================

/// KDJ dual-line strategy parameters. The classic constants are
/// 34/3/8/1/6/1 with a 3-bar MA for J1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KdjConfig {
    /// HHV/LLV window, also the first index the crossing loop considers.
    #[serde(default = "default_kdj_window")]
    pub window: usize,

    /// EMA period applied to HHV, LLV, and RSV.
    #[serde(default = "default_kdj_smooth")]
    pub smooth: usize,

    /// Weighted-SMA `(n, m)` for the K line.
    #[serde(default = "default_kdj_k_n")]
    pub k_n: usize,
    #[serde(default = "default_kdj_k_m")]
    pub k_m: usize,

    /// Weighted-SMA `(n, m)` for the D line.
    #[serde(default = "default_kdj_d_n")]
    pub d_n: usize,
    #[serde(default = "default_kdj_d_m")]
    pub d_m: usize,

    /// MA period for the J1 line.
    #[serde(default = "default_kdj_j1_period")]
    pub j1_period: usize,

    /// A bottom divergence needs `J < oversold` at the crossing bar.
    #[serde(default = "default_kdj_oversold")]
    pub oversold: f64,

    /// A top divergence needs `J > overbought` at the crossing bar.
    #[serde(default = "default_kdj_overbought")]
    pub overbought: f64,
}

impl Default for KdjConfig {
    fn default() -> Self {
        Self {
            window: default_kdj_window(),
            smooth: default_kdj_smooth(),
            k_n: default_kdj_k_n(),
            k_m: default_kdj_k_m(),
            d_n: default_kdj_d_n(),
            d_m: default_kdj_d_m(),
            j1_period: default_kdj_j1_period(),
            oversold: default_kdj_oversold(),
            overbought: default_kdj_overbought(),
        }
    }
}

/// Composite (11-indicator vote) strategy parameters.
///
/// `check_cut_through` and `scale_factor` are accepted but currently have no
/// effect: upstream copies of this strategy disagreed on their use, so they
/// are carried as explicit no-ops pending clarification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeConfig {
    /// Left/right bar count for close-price pivots.
    #[serde(default = "default_pivot_period")]
    pub pivot_period: usize,

    /// Minimum absolute vote score for a signal, in `[1, 11]`.
    #[serde(default = "default_min_divergence")]
    pub min_divergence: i32,

    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,
    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,
    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,
    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,
    #[serde(default = "default_momentum_period")]
    pub momentum_period: usize,
    #[serde(default = "default_cci_period")]
    pub cci_period: usize,
    #[serde(default = "default_stoch_period")]
    pub stoch_period: usize,
    #[serde(default = "default_stoch_smooth")]
    pub stoch_smooth: usize,
    #[serde(default = "default_macd_fast")]
    pub vwmacd_fast: usize,
    #[serde(default = "default_macd_slow")]
    pub vwmacd_slow: usize,
    #[serde(default = "default_cmf_period")]
    pub cmf_period: usize,
    #[serde(default = "default_mfi_period")]
    pub mfi_period: usize,
    #[serde(default = "default_di_period")]
    pub di_period: usize,

    /// Accepted no-op (see struct docs).
    #[serde(default)]
    pub check_cut_through: bool,

    /// Accepted no-op (see struct docs).
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f64,
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            pivot_period: default_pivot_period(),
            min_divergence: default_min_divergence(),
            rsi_period: default_rsi_period(),
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
            momentum_period: default_momentum_period(),
            cci_period: default_cci_period(),
            stoch_period: default_stoch_period(),
            stoch_smooth: default_stoch_smooth(),
            vwmacd_fast: default_macd_fast(),
            vwmacd_slow: default_macd_slow(),
            cmf_period: default_cmf_period(),
            mfi_period: default_mfi_period(),
            di_period: default_di_period(),
            check_cut_through: false,
            scale_factor: default_scale_factor(),
        }
    }
}

/// MACD-fractal strategy parameters. This MACD instance runs fast/slow
/// `(5, 15)`, deliberately quicker than the composite's `(12, 26)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacdFractalConfig {
    #[serde(default = "default_fractal_fast")]
    pub fast: usize,
    #[serde(default = "default_fractal_slow")]
    pub slow: usize,
    #[serde(default = "default_macd_signal")]
    pub signal: usize,
}

impl Default for MacdFractalConfig {
    fn default() -> Self {
        Self {
            fast: default_fractal_fast(),
            slow: default_fractal_slow(),
            signal: default_macd_signal(),
        }
    }
}

/// Acquisition-side hints observed across upstream deployments. The engine
/// ignores every field; collaborators that page REST klines read them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchHints {
    /// Max klines per REST request.
    #[serde(default = "default_kline_limit")]
    pub kline_limit: usize,

    /// Page size when backfilling history.
    #[serde(default = "default_history_page_limit")]
    pub history_page_limit: usize,

    /// Target candle count for extended backfills.
    #[serde(default = "default_extended_target")]
    pub extended_target: usize,

    /// Days of history to retain for the rolling window.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
}

impl Default for FetchHints {
    fn default() -> Self {
        Self {
            kline_limit: default_kline_limit(),
            history_page_limit: default_history_page_limit(),
            extended_target: default_extended_target(),
            lookback_days: default_lookback_days(),
        }
    }
}

// =============================================================================
// DivergenceConfig
// =============================================================================

/// Top-level configuration for the divergence engine.
///
/// Every field has a serde default so that older JSON files missing new
/// fields still deserialise correctly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivergenceConfig {
    // --- Strategy toggles ----------------------------------------------------
    #[serde(default = "default_true")]
    pub enable_kdj: bool,
    #[serde(default = "default_true")]
    pub enable_composite: bool,
    #[serde(default = "default_true")]
    pub enable_macd_fractal: bool,

    // --- Per-strategy parameters --------------------------------------------
    #[serde(default)]
    pub kdj: KdjConfig,
    #[serde(default)]
    pub composite: CompositeConfig,
    #[serde(default)]
    pub macd_fractal: MacdFractalConfig,

    // --- Advisory lists for collaborators -----------------------------------
    /// Timeframes the scheduler should analyze.
    #[serde(default = "default_periods")]
    pub periods: Vec<Period>,

    /// Symbols the scheduler should watch; empty means caller-defined.
    #[serde(default)]
    pub symbols: Vec<String>,

    /// Acquisition hints, engine-ignored.
    #[serde(default)]
    pub fetch: FetchHints,
}

impl Default for DivergenceConfig {
    fn default() -> Self {
        Self {
            enable_kdj: true,
            enable_composite: true,
            enable_macd_fractal: true,
            kdj: KdjConfig::default(),
            composite: CompositeConfig::default(),
            macd_fractal: MacdFractalConfig::default(),
            periods: default_periods(),
            symbols: Vec::new(),
            fetch: FetchHints::default(),
        }
    }
}

impl DivergenceConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// A missing file is not an error: defaults are written back to `path`
    /// so the deployment has a file to edit.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = %path.display(), "config file missing, writing defaults");
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;

        info!(
            path = %path.display(),
            kdj = config.enable_kdj,
            composite = config.enable_composite,
            macd_fractal = config.enable_macd_fractal,
            "divergence config loaded"
        );
        Ok(config)
    }

    /// Persist the configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;

        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &content)?;
        std::fs::rename(&tmp_path, path)?;

        info!(path = %path.display(), "divergence config saved (atomic)");
        Ok(())
    }
}
