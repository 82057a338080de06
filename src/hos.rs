use alloc::vec::Vec;

use num_traits::Float;

use crate::{
    Decay, Deviation, Error, FirstOrderIir,
    helper::{non_negative, standardized_moment},
    variance::{filtered_variance, validate_seed_var},
};

/// How samples with a degenerate (near-zero) running variance are reported.
///
/// Skewness and kurtosis divide by a power of the running variance, which is
/// undefined over constant or near-constant stretches of signal. The policy
/// only affects what is written to the output: the internal recursion always
/// advances on the floored variance, so estimates recover as soon as the
/// signal varies again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UndefinedPolicy {
    /// Report NaN wherever the running variance falls below the floor.
    #[default]
    Sentinel,
    /// Report the value computed with the variance clamped to the floor.
    Clamp,
}

/// Configuration for the recursive higher-order statistics.
///
/// When either seed is left unset, the missing state is initialized by a
/// warm-up pass over the first `⌊1/(1-α)⌋` samples of the signal (capped at
/// its length), starting from mean 0 and variance 1.
#[derive(Debug, Clone, Copy)]
pub struct HosConfig<T> {
    /// Mean state at index -1, defaults to the warm-up estimate
    pub seed_mean: Option<T>,
    /// Variance state at index -1, defaults to the warm-up estimate
    pub seed_var: Option<T>,
    /// Near-zero variance threshold, defaults to 1e-9
    pub var_floor: Option<T>,
    /// Reference mean for the deviation term
    pub deviation: Deviation,
    /// Reporting policy for degenerate-variance samples
    pub undefined_policy: UndefinedPolicy,
}

impl<T> Default for HosConfig<T> {
    fn default() -> Self {
        Self {
            seed_mean: None,
            seed_var: None,
            var_floor: None,
            deviation: Deviation::default(),
            undefined_policy: UndefinedPolicy::default(),
        }
    }
}

/// Resolved per-call parameters shared by both hos strategies.
struct HosState<T> {
    decay: Decay<T>,
    seed_mean: T,
    seed_var: T,
    floor: T,
}

impl<T: Float> HosState<T> {
    fn resolve(signal: &[T], alpha: T, order: u32, config: &HosConfig<T>) -> Result<Self, Error> {
        let decay = Decay::new(alpha)?;
        // powi takes a signed 32-bit exponent, so the order must fit one.
        if order < 3 || order > i32::MAX as u32 {
            return Err(Error::InvalidOrder);
        }
        if signal.is_empty() {
            return Err(Error::EmptySignal);
        }

        let floor = match config.var_floor {
            Some(floor) if floor.is_finite() && floor > T::zero() => floor,
            Some(_) => return Err(Error::InvalidVarFloor),
            None => T::from(1e-9).ok_or(Error::InvalidVarFloor)?,
        };

        let seed_var = match config.seed_var {
            Some(v) => Some(validate_seed_var(v)?),
            None => None,
        };
        let (seed_mean, seed_var) = match (config.seed_mean, seed_var) {
            (Some(m), Some(v)) => (m, v),
            (m, v) => {
                let (wm, wv) = warmup_state(signal, &decay);
                (m.unwrap_or(wm), v.unwrap_or(wv))
            }
        };

        Ok(Self {
            decay,
            seed_mean,
            seed_var,
            floor,
        })
    }
}

/// Scans the leading `effective_window()` samples to initialize the mean and
/// variance state, starting from mean 0 and variance 1.
fn warmup_state<T: Float>(signal: &[T], decay: &Decay<T>) -> (T, T) {
    let n = decay.effective_window().min(signal.len());
    let mut m = T::zero();
    let mut v = T::one();
    for &x in &signal[..n] {
        m = decay.alpha() * m + decay.weight() * x;
        let d = x - m;
        v = decay.alpha() * v + decay.weight() * (d * d);
    }
    (m, v)
}

/// Computes the order-n recursive standardized moment with the reference
/// scalar loop.
///
/// Runs the mean and variance recurrences alongside
/// `h[i] = α·h[i-1] + (1-α)·d[i]ⁿ / (σ²[i])^(n/2)`, where the variance in
/// the denominator is floored away from zero. Skewness and kurtosis are the
/// order-3 and order-4 instances; arbitrary orders from 3 upward are
/// accepted.
///
/// # Arguments
///
/// * `signal` - The input signal, at least one sample
/// * `alpha` - The forgetting factor, strictly inside `(0, 1)`
/// * `order` - The moment order, at least 3
/// * `config` - Seeds, variance floor, deviation and reporting policy
///
/// # Returns
///
/// * `Result<Vec<T>, Error>` - The running statistic, same length as the signal
pub fn hos_direct<T: Float>(
    signal: &[T],
    alpha: T,
    order: u32,
    config: &HosConfig<T>,
) -> Result<Vec<T>, Error> {
    let state = HosState::resolve(signal, alpha, order, config)?;
    let decay = state.decay;

    let mut m = state.seed_mean;
    let mut v = state.seed_var;
    let mut h = T::zero();
    let mut out = Vec::with_capacity(signal.len());
    for &x in signal {
        let m_next = decay.alpha() * m + decay.weight() * x;
        let d = match config.deviation {
            Deviation::FromPreviousMean => x - m,
            Deviation::FromCurrentMean => x - m_next,
        };
        v = non_negative(decay.alpha() * v + decay.weight() * (d * d));
        let floored = if v < state.floor { state.floor } else { v };
        h = decay.alpha() * h + decay.weight() * standardized_moment(d, floored, order);
        out.push(mask(h, v, state.floor, config.undefined_policy));
        m = m_next;
    }
    Ok(out)
}

/// Computes the order-n recursive standardized moment via IIR filtering
/// passes.
///
/// The mean, variance and moment accumulators are each one pass of the
/// shared first-order kernel: the mean pass feeds the deviation series, the
/// variance pass smooths the squared deviations, and a final pass smooths
/// the standardized deviation powers. Reproduces [`hos_direct`] within
/// floating-point rounding.
///
/// # Arguments
///
/// * `signal` - The input signal, at least one sample
/// * `alpha` - The forgetting factor, strictly inside `(0, 1)`
/// * `order` - The moment order, at least 3
/// * `config` - Seeds, variance floor, deviation and reporting policy
///
/// # Returns
///
/// * `Result<Vec<T>, Error>` - The running statistic, same length as the signal
pub fn hos_filter<T: Float>(
    signal: &[T],
    alpha: T,
    order: u32,
    config: &HosConfig<T>,
) -> Result<Vec<T>, Error> {
    let state = HosState::resolve(signal, alpha, order, config)?;

    let (dev, var) = filtered_variance(
        signal,
        &state.decay,
        state.seed_mean,
        state.seed_var,
        config.deviation,
    );

    let mut iir = FirstOrderIir::new(&state.decay);
    let out = dev
        .iter()
        .zip(&var)
        .map(|(&d, &v)| {
            let floored = if v < state.floor { state.floor } else { v };
            let h = iir.step(standardized_moment(d, floored, order));
            mask(h, v, state.floor, config.undefined_policy)
        })
        .collect();
    Ok(out)
}

#[inline]
fn mask<T: Float>(h: T, var: T, floor: T, policy: UndefinedPolicy) -> T {
    match policy {
        UndefinedPolicy::Sentinel if var < floor => T::nan(),
        _ => h,
    }
}

/// Computes the recursive skewness (third standardized moment) with the
/// reference scalar loop.
///
/// Equivalent to [`hos_direct`] with order 3: the third central-moment
/// accumulator normalized by `variance^(3/2)`.
///
/// # Arguments
///
/// * `signal` - The input signal, at least one sample
/// * `alpha` - The forgetting factor, strictly inside `(0, 1)`
/// * `config` - Seeds, variance floor, deviation and reporting policy
///
/// # Returns
///
/// * `Result<Vec<T>, Error>` - The running skewness, same length as the signal
pub fn skewness_direct<T: Float>(
    signal: &[T],
    alpha: T,
    config: &HosConfig<T>,
) -> Result<Vec<T>, Error> {
    hos_direct(signal, alpha, 3, config)
}

/// Computes the recursive skewness (third standardized moment) via IIR
/// filtering passes.
///
/// # Arguments
///
/// * `signal` - The input signal, at least one sample
/// * `alpha` - The forgetting factor, strictly inside `(0, 1)`
/// * `config` - Seeds, variance floor, deviation and reporting policy
///
/// # Returns
///
/// * `Result<Vec<T>, Error>` - The running skewness, same length as the signal
pub fn skewness_filter<T: Float>(
    signal: &[T],
    alpha: T,
    config: &HosConfig<T>,
) -> Result<Vec<T>, Error> {
    hos_filter(signal, alpha, 3, config)
}

/// Computes the recursive kurtosis with the reference scalar loop.
///
/// Equivalent to [`hos_direct`] with order 4: the fourth central-moment
/// accumulator normalized by `variance²`. The value is the raw fourth
/// standardized moment; the Gaussian baseline of 3 is not subtracted.
///
/// # Arguments
///
/// * `signal` - The input signal, at least one sample
/// * `alpha` - The forgetting factor, strictly inside `(0, 1)`
/// * `config` - Seeds, variance floor, deviation and reporting policy
///
/// # Returns
///
/// * `Result<Vec<T>, Error>` - The running kurtosis, same length as the signal
pub fn kurtosis_direct<T: Float>(
    signal: &[T],
    alpha: T,
    config: &HosConfig<T>,
) -> Result<Vec<T>, Error> {
    hos_direct(signal, alpha, 4, config)
}

/// Computes the recursive kurtosis via IIR filtering passes.
///
/// Same raw (non-excess) convention as [`kurtosis_direct`].
///
/// # Arguments
///
/// * `signal` - The input signal, at least one sample
/// * `alpha` - The forgetting factor, strictly inside `(0, 1)`
/// * `config` - Seeds, variance floor, deviation and reporting policy
///
/// # Returns
///
/// * `Result<Vec<T>, Error>` - The running kurtosis, same length as the signal
pub fn kurtosis_filter<T: Float>(
    signal: &[T],
    alpha: T,
    config: &HosConfig<T>,
) -> Result<Vec<T>, Error> {
    hos_filter(signal, alpha, 4, config)
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    fn impulse() -> [f64; 20] {
        let mut signal = [0.0; 20];
        signal[2] = 1.0;
        signal
    }

    #[test]
    fn order_4_previous_mean_matches_reference_vector() {
        let expected = [
            0.00000000e+00,
            0.00000000e+00,
            1.77162630e+00,
            1.09061315e+00,
            5.83356515e-01,
            3.00002919e-01,
            1.51954585e-01,
            7.64506651e-02,
            3.83418759e-02,
            1.91998526e-02,
            9.60712758e-03,
            4.80536069e-03,
            2.40312915e-03,
            1.20167672e-03,
            6.00866390e-04,
            3.00440202e-04,
            1.50221853e-04,
            7.51113642e-05,
            3.75557915e-05,
            1.87779231e-05,
        ];
        let config = HosConfig::default();
        let direct = kurtosis_direct(&impulse(), 0.5, &config).unwrap();
        let filter = kurtosis_filter(&impulse(), 0.5, &config).unwrap();
        for ((d, f), e) in direct.iter().zip(&filter).zip(&expected) {
            assert_approx_eq!(d, e, 1e-7);
            assert_approx_eq!(f, e, 1e-7);
        }
    }

    #[test]
    fn order_8_previous_mean_matches_reference_vector() {
        let expected = [
            0.00000000e+00,
            0.00000000e+00,
            6.27731948e+00,
            3.22254582e+00,
            1.61416851e+00,
            8.07222853e-01,
            4.03619056e-01,
            2.01809976e-01,
            1.00905015e-01,
            5.04525093e-02,
            2.52262547e-02,
            1.26131274e-02,
            6.30656369e-03,
            3.15328184e-03,
            1.57664092e-03,
            7.88320461e-04,
            3.94160230e-04,
            1.97080115e-04,
            9.85400576e-05,
            4.92700288e-05,
        ];
        let config = HosConfig::default();
        let out = hos_direct(&impulse(), 0.5, 8, &config).unwrap();
        for (y, e) in out.iter().zip(&expected) {
            assert_approx_eq!(y, e, 1e-7);
        }
    }

    #[test]
    fn order_4_current_mean_matches_reference_vector() {
        let expected = [
            0.00000000e+00,
            0.00000000e+00,
            1.28000000e+00,
            8.03265306e-01,
            4.32882653e-01,
            2.23361742e-01,
            1.13313524e-01,
            5.70535086e-02,
            2.86245586e-02,
            1.43365603e-02,
            7.17432929e-03,
            3.58867431e-03,
            1.79471424e-03,
            8.97451352e-04,
            4.48749228e-04,
            2.24380502e-04,
            1.12191723e-04,
            5.60962293e-05,
            2.80482066e-05,
            1.40241263e-05,
        ];
        let config = HosConfig {
            deviation: Deviation::FromCurrentMean,
            ..HosConfig::default()
        };
        let out = kurtosis_direct(&impulse(), 0.5, &config).unwrap();
        for (y, e) in out.iter().zip(&expected) {
            assert_approx_eq!(y, e, 1e-7);
        }
    }

    #[test]
    fn order_8_current_mean_matches_reference_vector() {
        let expected = [
            0.00000000e+00,
            0.00000000e+00,
            3.27680000e+00,
            1.69171112e+00,
            8.47808685e-01,
            4.24000127e-01,
            2.12005395e-01,
            1.06003012e-01,
            5.30015252e-02,
            2.65007638e-02,
            1.32503820e-02,
            6.62519098e-03,
            3.31259549e-03,
            1.65629775e-03,
            8.28148873e-04,
            4.14074436e-04,
            2.07037218e-04,
            1.03518609e-04,
            5.17593046e-05,
            2.58796523e-05,
        ];
        let config = HosConfig {
            deviation: Deviation::FromCurrentMean,
            ..HosConfig::default()
        };
        let out = hos_filter(&impulse(), 0.5, 8, &config).unwrap();
        for (y, e) in out.iter().zip(&expected) {
            assert_approx_eq!(y, e, 1e-7);
        }
    }

    #[test]
    fn skewness_filter_agrees_with_direct() {
        let signal = [1.2, -0.7, 3.4, 2.1, -1.5, 0.0, 2.2, -0.3, 1.5, -2.0];
        for alpha in [0.3, 0.6, 0.9] {
            let config = HosConfig::default();
            let direct = skewness_direct(&signal, alpha, &config).unwrap();
            let filter = skewness_filter(&signal, alpha, &config).unwrap();
            for (d, f) in direct.iter().zip(&filter) {
                assert_approx_eq!(d, f, 1e-12);
            }
        }
    }

    #[test]
    fn constant_signal_yields_sentinel() {
        let config = HosConfig {
            seed_mean: Some(5.0),
            seed_var: Some(0.0),
            ..HosConfig::default()
        };
        let signal = [5.0; 10];
        let direct = skewness_direct(&signal, 0.5, &config).unwrap();
        let filter = kurtosis_filter(&signal, 0.5, &config).unwrap();
        assert!(direct.iter().all(|y| y.is_nan()));
        assert!(filter.iter().all(|y| y.is_nan()));
    }

    #[test]
    fn clamp_policy_keeps_values_finite() {
        let config = HosConfig {
            seed_mean: Some(5.0),
            seed_var: Some(0.0),
            undefined_policy: UndefinedPolicy::Clamp,
            ..HosConfig::default()
        };
        let signal = [5.0; 10];
        let out = kurtosis_direct(&signal, 0.5, &config).unwrap();
        // All deviations are zero, so the clamped statistic stays at zero.
        for y in out {
            assert!(y.is_finite());
            assert_approx_eq!(y, 0.0, 1e-12);
        }
    }

    #[test]
    fn recovers_after_constant_stretch() {
        // Constant prefix is degenerate, the step afterwards is not.
        let mut signal = [1.0; 40];
        for (i, x) in signal.iter_mut().enumerate().skip(32) {
            *x = if i % 2 == 0 { 4.0 } else { -2.0 };
        }
        let config = HosConfig {
            seed_mean: Some(1.0),
            seed_var: Some(0.0),
            ..HosConfig::default()
        };
        let out = kurtosis_direct(&signal, 0.5, &config).unwrap();
        assert!(out[..32].iter().all(|y| y.is_nan()));
        assert!(out[32..].iter().all(|y| y.is_finite()));
    }

    #[test]
    fn single_sample_is_defined() {
        let out = kurtosis_direct(&[2.0], 0.5, &HosConfig::default()).unwrap();
        assert_eq!(out.len(), 1);
        assert!(out[0].is_finite());
    }

    #[test]
    fn invalid_parameters_fail_fast() {
        let config = HosConfig::default();
        for alpha in [0.0, 1.0, -0.5, 1.5] {
            assert_eq!(
                skewness_direct(&[1.0], alpha, &config),
                Err(Error::InvalidDecay)
            );
            assert_eq!(
                kurtosis_filter(&[1.0], alpha, &config),
                Err(Error::InvalidDecay)
            );
        }
        assert_eq!(
            skewness_filter::<f64>(&[], 0.5, &config),
            Err(Error::EmptySignal)
        );
        assert_eq!(
            hos_direct(&[1.0], 0.5, 2, &config),
            Err(Error::InvalidOrder)
        );
        assert_eq!(
            hos_direct(&[1.0], 0.5, u32::MAX, &config),
            Err(Error::InvalidOrder)
        );

        let bad_seed = HosConfig {
            seed_var: Some(-10.0),
            ..HosConfig::default()
        };
        assert_eq!(
            skewness_direct(&[1.0, 2.0], 0.5, &bad_seed),
            Err(Error::InvalidVarSeed)
        );
        assert_eq!(
            kurtosis_filter(&[1.0, 2.0], 0.5, &bad_seed),
            Err(Error::InvalidVarSeed)
        );

        let bad_floor = HosConfig {
            var_floor: Some(-1.0),
            ..HosConfig::default()
        };
        assert_eq!(
            kurtosis_direct(&[1.0], 0.5, &bad_floor),
            Err(Error::InvalidVarFloor)
        );
    }
}
