use alloc::vec::Vec;

use num_traits::Float;

use crate::{
    Decay, Error, FirstOrderIir,
    helper::non_negative,
};

/// Which running mean the deviation of a new sample is measured against.
///
/// Both definitions appear in the recursive-statistics literature and both
/// are supported by both evaluation strategies. Measuring against the
/// previous mean keeps the new sample out of its own reference point and is
/// the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deviation {
    /// Deviation from the mean at the previous step, `x[i] - m[i-1]`.
    #[default]
    FromPreviousMean,
    /// Deviation from the mean updated with the current sample,
    /// `x[i] - m[i]`.
    FromCurrentMean,
}

/// Configuration for the recursive variance.
///
/// Seeds default to values derived from the first sample (`seed_mean =
/// x[0]`, `seed_var = 0`), so a constant signal yields zero variance at
/// every index.
#[derive(Debug, Clone, Copy)]
pub struct VarianceConfig<T> {
    /// Mean state at index -1, defaults to the first sample
    pub seed_mean: Option<T>,
    /// Variance state at index -1, defaults to zero
    pub seed_var: Option<T>,
    /// Reference mean for the deviation term
    pub deviation: Deviation,
}

impl<T> Default for VarianceConfig<T> {
    fn default() -> Self {
        Self {
            seed_mean: None,
            seed_var: None,
            deviation: Deviation::default(),
        }
    }
}

/// Computes the recursive variance of a signal with the reference scalar loop.
///
/// Runs the mean recurrence of [`mean_direct`](crate::mean_direct) alongside
/// `v[i] = α·v[i-1] + (1-α)·d[i]²`, where `d[i]` is the deviation of the new
/// sample from the running mean selected by [`Deviation`]. The output is
/// clamped at zero: a negative estimate can only arise from floating-point
/// cancellation, never from a valid state.
///
/// # Arguments
///
/// * `signal` - The input signal, at least one sample
/// * `alpha` - The forgetting factor, strictly inside `(0, 1)`
/// * `config` - Seeds and deviation selection
///
/// # Returns
///
/// * `Result<Vec<T>, Error>` - The running variance, same length as the signal
pub fn variance_direct<T: Float>(
    signal: &[T],
    alpha: T,
    config: &VarianceConfig<T>,
) -> Result<Vec<T>, Error> {
    let decay = Decay::new(alpha)?;
    let first = *signal.first().ok_or(Error::EmptySignal)?;

    let mut m = config.seed_mean.unwrap_or(first);
    let mut v = match config.seed_var {
        Some(v) => validate_seed_var(v)?,
        None => T::zero(),
    };
    let mut out = Vec::with_capacity(signal.len());
    for &x in signal {
        let m_next = decay.alpha() * m + decay.weight() * x;
        let d = match config.deviation {
            Deviation::FromPreviousMean => x - m,
            Deviation::FromCurrentMean => x - m_next,
        };
        v = non_negative(decay.alpha() * v + decay.weight() * (d * d));
        out.push(v);
        m = m_next;
    }
    Ok(out)
}

/// Computes the recursive variance of a signal via IIR filtering passes.
///
/// Expressed as two cascaded first-order filters sharing the `α`-derived
/// coefficients: one pass produces the running mean, the squared-deviation
/// series is formed from it, and a second pass smooths that series into the
/// variance. Reproduces [`variance_direct`] within floating-point rounding.
///
/// # Arguments
///
/// * `signal` - The input signal, at least one sample
/// * `alpha` - The forgetting factor, strictly inside `(0, 1)`
/// * `config` - Seeds and deviation selection
///
/// # Returns
///
/// * `Result<Vec<T>, Error>` - The running variance, same length as the signal
pub fn variance_filter<T: Float>(
    signal: &[T],
    alpha: T,
    config: &VarianceConfig<T>,
) -> Result<Vec<T>, Error> {
    let decay = Decay::new(alpha)?;
    let first = *signal.first().ok_or(Error::EmptySignal)?;

    let seed_mean = config.seed_mean.unwrap_or(first);
    let seed_var = match config.seed_var {
        Some(v) => validate_seed_var(v)?,
        None => T::zero(),
    };
    let (_, var) = filtered_variance(signal, &decay, seed_mean, seed_var, config.deviation);
    Ok(var)
}

/// Validates an explicit variance seed.
///
/// A negative or non-finite variance state is not reachable from any valid
/// input, and feeding one into the IIR delay state would let the two
/// strategies drift apart.
pub(crate) fn validate_seed_var<T: Float>(v: T) -> Result<T, Error> {
    if v.is_finite() && v >= T::zero() {
        Ok(v)
    } else {
        Err(Error::InvalidVarSeed)
    }
}

/// Mean pass, deviation series and variance pass shared by the filter
/// strategies of variance and the higher-order statistics.
///
/// Returns the per-sample deviations and the clamped running variance.
pub(crate) fn filtered_variance<T: Float>(
    signal: &[T],
    decay: &Decay<T>,
    seed_mean: T,
    seed_var: T,
    deviation: Deviation,
) -> (Vec<T>, Vec<T>) {
    let mean = FirstOrderIir::with_initial_output(decay, seed_mean).apply(signal);

    let dev: Vec<T> = match deviation {
        Deviation::FromPreviousMean => signal
            .iter()
            .enumerate()
            .map(|(i, &x)| if i == 0 { x - seed_mean } else { x - mean[i - 1] })
            .collect(),
        Deviation::FromCurrentMean => signal.iter().zip(&mean).map(|(&x, &m)| x - m).collect(),
    };

    let mut iir = FirstOrderIir::with_initial_output(decay, seed_var);
    let var = dev.iter().map(|&d| non_negative(iir.step(d * d))).collect();
    (dev, var)
}
