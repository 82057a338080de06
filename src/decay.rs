use num_traits::Float;

use crate::Error;

/// Validated forgetting factor for the recursive estimators.
///
/// The forgetting factor `α` controls how quickly older samples stop
/// influencing a running estimate: the mean recurrence is
/// `m[i] = α·m[i-1] + (1-α)·x[i]`, so `α` is the feedback coefficient and
/// `1-α` the feedforward coefficient of the equivalent first-order IIR
/// filter. Only values strictly inside `(0, 1)` produce a stable filter
/// with bounded memory, so construction validates the interval once and
/// every downstream computation can rely on it.
///
/// # Examples
///
/// ```
/// use rec_statistics::Decay;
///
/// let decay = Decay::new(0.75_f64).unwrap();
/// assert_eq!(decay.alpha(), 0.75);
/// assert_eq!(decay.weight(), 0.25);
///
/// assert!(Decay::new(1.0_f64).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decay<T> {
    /// Feedback coefficient, weight of the previous estimate
    alpha: T,
    /// Feedforward coefficient, weight of the new sample
    weight: T,
}

impl<T: Float> Decay<T> {
    /// Creates a decay from a forgetting factor.
    ///
    /// # Arguments
    ///
    /// * `alpha` - The forgetting factor, strictly inside `(0, 1)`
    ///
    /// # Returns
    ///
    /// * `Result<Self, Error>` - The decay, or [`Error::InvalidDecay`] if
    ///   `alpha` is outside the open interval or not finite
    pub fn new(alpha: T) -> Result<Self, Error> {
        if !alpha.is_finite() || alpha <= T::zero() || alpha >= T::one() {
            return Err(Error::InvalidDecay);
        }
        Ok(Self {
            alpha,
            weight: T::one() - alpha,
        })
    }

    /// Creates a decay from an effective window length.
    ///
    /// A window of `len` samples maps to `α = 1 - 1/len`, the forgetting
    /// factor whose exponential weights carry roughly the same memory as a
    /// flat window of that length.
    ///
    /// # Arguments
    ///
    /// * `len` - The effective window length, at least 2
    ///
    /// # Returns
    ///
    /// * `Result<Self, Error>` - The decay, or [`Error::InvalidDecay`] if
    ///   the length maps outside the open interval
    pub fn from_window(len: usize) -> Result<Self, Error> {
        let len = T::from(len).ok_or(Error::InvalidDecay)?;
        Self::new(T::one() - len.recip())
    }

    /// Returns the forgetting factor (IIR feedback coefficient).
    #[inline]
    pub const fn alpha(&self) -> T {
        self.alpha
    }

    /// Returns the innovation weight `1 - α` (IIR feedforward coefficient).
    #[inline]
    pub const fn weight(&self) -> T {
        self.weight
    }

    /// Returns the effective window length `⌊1/(1-α)⌋`, at least 1.
    ///
    /// This is the number of leading samples the higher-order statistics
    /// scan to initialize their mean and variance state.
    #[inline]
    pub fn effective_window(&self) -> usize {
        match self.weight.recip().floor().to_usize() {
            Some(n) if n > 0 => n,
            _ => 1,
        }
    }
}
