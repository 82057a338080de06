use alloc::vec::Vec;

use num_traits::Float;

use crate::{Decay, Error, FirstOrderIir};

/// Computes the recursive mean of a signal with the reference scalar loop.
///
/// Applies `m[i] = α·m[i-1] + (1-α)·x[i]` sample-by-sample. With the default
/// seed the state at index -1 is the first sample, so `m[0] = x[0]`.
///
/// # Arguments
///
/// * `signal` - The input signal, at least one sample
/// * `alpha` - The forgetting factor, strictly inside `(0, 1)`
/// * `seed` - Optional mean state at index -1, defaults to the first sample
///
/// # Returns
///
/// * `Result<Vec<T>, Error>` - The running mean, same length as the signal
///
/// # Examples
///
/// ```
/// use rec_statistics::mean_direct;
///
/// let out = mean_direct(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.5, None).unwrap();
/// assert_eq!(out, vec![1.0, 1.5, 2.25, 3.125, 4.0625]);
/// ```
pub fn mean_direct<T: Float>(signal: &[T], alpha: T, seed: Option<T>) -> Result<Vec<T>, Error> {
    let decay = Decay::new(alpha)?;
    let first = *signal.first().ok_or(Error::EmptySignal)?;

    let mut m = seed.unwrap_or(first);
    let mut out = Vec::with_capacity(signal.len());
    for &x in signal {
        m = decay.alpha() * m + decay.weight() * x;
        out.push(m);
    }
    Ok(out)
}

/// Computes the recursive mean of a signal in one IIR filtering pass.
///
/// The mean recurrence is exactly a first-order low-pass filter with
/// feedforward coefficient `1-α` and feedback coefficient `α`; this variant
/// evaluates it through [`FirstOrderIir`] and reproduces [`mean_direct`]
/// within floating-point rounding.
///
/// # Arguments
///
/// * `signal` - The input signal, at least one sample
/// * `alpha` - The forgetting factor, strictly inside `(0, 1)`
/// * `seed` - Optional mean state at index -1, defaults to the first sample
///
/// # Returns
///
/// * `Result<Vec<T>, Error>` - The running mean, same length as the signal
pub fn mean_filter<T: Float>(signal: &[T], alpha: T, seed: Option<T>) -> Result<Vec<T>, Error> {
    let decay = Decay::new(alpha)?;
    let first = *signal.first().ok_or(Error::EmptySignal)?;

    let mut iir = FirstOrderIir::with_initial_output(&decay, seed.unwrap_or(first));
    Ok(iir.apply(signal))
}
