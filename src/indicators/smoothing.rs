// =============================================================================
// Moving-Average Family — MA, EMA, Weighted SMA, Wilder RMA
// =============================================================================
//
// The smoothing primitives every oscillator in the crate is built from. All
// functions are pure, batch, and index-aligned: the output always has the
// same length as the input, with 0.0 filling indices before the first
// computable value.
//
// Formulas:
//   MA_i   = mean(data[i-period+1 ..= i])
//   EMA_i  = data_i * k + EMA_{i-1} * (1 - k),   k = 2 / (period + 1)
//   WSMA_i = (m * data_i + (n - m) * WSMA_{i-1}) / n
//   RMA_i  = data_i * a + RMA_{i-1} * (1 - a),   a = 1 / period
//
// EMA and WSMA seed at data[0]; RMA seeds at index period-1 with the simple
// mean of the first `period` samples.
// =============================================================================

/// Simple moving average over a trailing `period` window.
///
/// # Edge cases
/// - indices `< period-1` => 0.0
/// - `period == 0` => all 0.0 (division guard)
pub fn ma(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 {
        return vec![0.0; data.len()];
    }

    let mut out = Vec::with_capacity(data.len());
    for i in 0..data.len() {
        if i + 1 < period {
            out.push(0.0);
            continue;
        }
        let sum: f64 = data[i + 1 - period..=i].iter().sum();
        out.push(sum / period as f64);
    }
    out
}

/// Exponential moving average seeded at `data[0]`.
///
/// `out[0] == data[0]` exactly; later values follow the standard recurrence
/// with `k = 2 / (period + 1)`.
pub fn ema(data: &[f64], period: usize) -> Vec<f64> {
    if data.is_empty() {
        return Vec::new();
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(data.len());
    out.push(data[0]);

    let mut prev = data[0];
    for &x in &data[1..] {
        let next = x * k + prev * (1.0 - k);
        out.push(next);
        prev = next;
    }
    out
}

/// Recursive weighted SMA: `v[i] = (m*data[i] + (n-m)*v[i-1]) / n`, seeded at
/// `data[0]`. The KDJ K and D lines use `(n,m) = (8,1)` and `(6,1)`.
///
/// # Edge cases
/// - `n == 0` => all 0.0 (division guard)
pub fn weighted_sma(data: &[f64], n: usize, m: usize) -> Vec<f64> {
    if n == 0 {
        return vec![0.0; data.len()];
    }
    if data.is_empty() {
        return Vec::new();
    }

    let n_f = n as f64;
    let m_f = m as f64;
    let mut out = Vec::with_capacity(data.len());
    out.push(data[0]);

    let mut prev = data[0];
    for &x in &data[1..] {
        let next = (m_f * x + (n_f - m_f) * prev) / n_f;
        out.push(next);
        prev = next;
    }
    out
}

/// Wilder smoothing: seeded at index `period-1` with the mean of the first
/// `period` samples, then `v[i] = data[i]*a + v[i-1]*(1-a)` with
/// `a = 1/period`.
///
/// # Edge cases
/// - indices `< period-1` => 0.0
/// - `period == 0` or `data.len() < period` => all 0.0
pub fn rma(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period {
        return vec![0.0; data.len()];
    }

    let period_f = period as f64;
    let alpha = 1.0 / period_f;

    let mut out = vec![0.0; period - 1];
    let seed: f64 = data[..period].iter().sum::<f64>() / period_f;
    out.push(seed);

    let mut prev = seed;
    for &x in &data[period..] {
        let next = x * alpha + prev * (1.0 - alpha);
        out.push(next);
        prev = next;
    }
    out
}
