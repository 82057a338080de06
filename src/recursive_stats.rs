use num_traits::Float;

use crate::{
    Decay, Deviation,
    helper::{non_negative, standardized_moment},
};

/// Incremental recursive-statistics estimator.
///
/// Carries the O(1) state of the direct strategy: running mean, variance,
/// and the third and fourth standardized-moment accumulators. Each call to
/// [`next`](Self::next) advances all of them by one forgetting-factor
/// update. Useful when the signal arrives one sample at a time and
/// whole-signal filtering passes are not an option.
///
/// Accessors return `None` before the first sample; skewness and kurtosis
/// additionally return `None` while the running variance sits below the
/// configured floor, where the standardized moments are undefined.
///
/// # Examples
///
/// ```
/// use rec_statistics::{Decay, RecursiveStats};
///
/// let decay = Decay::new(0.5_f64).unwrap();
/// let mut stats = RecursiveStats::new(decay);
///
/// for x in [1.0, 2.0, 3.0, 4.0, 5.0] {
///     stats.next(x);
/// }
///
/// assert_eq!(stats.mean(), Some(4.0625));
/// assert!(stats.variance().unwrap() > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct RecursiveStats<T> {
    /// Forgetting factor
    decay: Decay<T>,
    /// Reference mean for the deviation term
    deviation: Deviation,
    /// Near-zero variance threshold
    var_floor: T,
    /// Number of samples seen
    count: usize,
    /// Whether the state was seeded explicitly
    seeded: bool,
    /// Running mean
    mean: T,
    /// Running variance
    var: T,
    /// Third standardized-moment accumulator
    hos3: T,
    /// Fourth standardized-moment accumulator
    hos4: T,
}

impl<T: Float> RecursiveStats<T> {
    /// Creates an estimator whose state is seeded from the first sample.
    ///
    /// The mean seeds to the first sample and the variance to zero, matching
    /// the defaults of the sequence functions.
    ///
    /// # Arguments
    ///
    /// * `decay` - The validated forgetting factor
    pub fn new(decay: Decay<T>) -> Self {
        Self::build(decay, T::zero(), T::zero(), false)
    }

    /// Creates an estimator with explicit mean and variance state.
    ///
    /// # Arguments
    ///
    /// * `decay` - The validated forgetting factor
    /// * `mean` - Mean state at index -1
    /// * `var` - Variance state at index -1
    pub fn with_state(decay: Decay<T>, mean: T, var: T) -> Self {
        Self::build(decay, mean, var, true)
    }

    fn build(decay: Decay<T>, mean: T, var: T, seeded: bool) -> Self {
        Self {
            decay,
            deviation: Deviation::default(),
            var_floor: T::from(1e-9).unwrap_or_else(T::epsilon),
            count: 0,
            seeded,
            mean,
            var,
            hos3: T::zero(),
            hos4: T::zero(),
        }
    }

    /// Sets the reference mean for the deviation term.
    pub fn set_deviation(&mut self, deviation: Deviation) -> &mut Self {
        self.deviation = deviation;
        self
    }

    /// Sets the near-zero variance threshold used by [`skew`](Self::skew)
    /// and [`kurt`](Self::kurt).
    pub fn set_var_floor(&mut self, floor: T) -> &mut Self {
        self.var_floor = floor;
        self
    }

    /// Returns the forgetting factor.
    pub const fn decay(&self) -> Decay<T> {
        self.decay
    }

    /// Returns the number of samples seen.
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Clears the estimator state, keeping decay and configuration.
    pub fn reset(&mut self) -> &mut Self {
        self.count = 0;
        self.seeded = false;
        self.mean = T::zero();
        self.var = T::zero();
        self.hos3 = T::zero();
        self.hos4 = T::zero();
        self
    }

    /// Advances every accumulator by one sample.
    ///
    /// One call is exactly one direct-strategy step: the mean update, the
    /// variance update on the squared deviation, and the order-3 and order-4
    /// standardized-moment updates on the floored variance.
    ///
    /// # Arguments
    ///
    /// * `value` - The new sample
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The estimator
    pub fn next(&mut self, value: T) -> &mut Self {
        if self.count == 0 && !self.seeded {
            self.mean = value;
            self.var = T::zero();
        }

        let alpha = self.decay.alpha();
        let weight = self.decay.weight();

        let mean_next = alpha * self.mean + weight * value;
        let d = match self.deviation {
            Deviation::FromPreviousMean => value - self.mean,
            Deviation::FromCurrentMean => value - mean_next,
        };
        self.var = non_negative(alpha * self.var + weight * (d * d));

        let floored = if self.var < self.var_floor {
            self.var_floor
        } else {
            self.var
        };
        self.hos3 = alpha * self.hos3 + weight * standardized_moment(d, floored, 3);
        self.hos4 = alpha * self.hos4 + weight * standardized_moment(d, floored, 4);

        self.mean = mean_next;
        self.count += 1;
        self
    }

    /// Returns the running mean, or `None` before the first sample.
    pub fn mean(&self) -> Option<T> {
        (self.count > 0).then_some(self.mean)
    }

    /// Returns the running variance, or `None` before the first sample.
    pub fn variance(&self) -> Option<T> {
        (self.count > 0).then_some(self.var)
    }

    /// Returns the running standard deviation, or `None` before the first
    /// sample.
    pub fn stddev(&self) -> Option<T> {
        self.variance().map(T::sqrt)
    }

    /// Returns the running skewness, or `None` while undefined.
    ///
    /// Undefined before the first sample and while the running variance is
    /// below the floor.
    pub fn skew(&self) -> Option<T> {
        (self.count > 0 && self.var >= self.var_floor).then_some(self.hos3)
    }

    /// Returns the running kurtosis, or `None` while undefined.
    ///
    /// Raw fourth standardized moment, same convention as
    /// [`kurtosis_direct`](crate::kurtosis_direct).
    pub fn kurt(&self) -> Option<T> {
        (self.count > 0 && self.var >= self.var_floor).then_some(self.hos4)
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;
    use crate::{HosConfig, mean_direct, variance_direct, kurtosis_direct, VarianceConfig};

    #[test]
    fn matches_mean_and_variance_sequences() {
        let signal = [1.2, -0.7, 3.4, 2.1, -1.5, 0.0, 2.2, -0.3, 1.5, -2.0];
        let decay = Decay::new(0.6_f64).unwrap();
        let mean_seq = mean_direct(&signal, 0.6, None).unwrap();
        let var_seq = variance_direct(&signal, 0.6, &VarianceConfig::default()).unwrap();

        let mut stats = RecursiveStats::new(decay);
        for (i, &x) in signal.iter().enumerate() {
            stats.next(x);
            assert_approx_eq!(stats.mean().unwrap(), mean_seq[i], 1e-12);
            assert_approx_eq!(stats.variance().unwrap(), var_seq[i], 1e-12);
        }
    }

    #[test]
    fn matches_kurtosis_sequence_with_shared_seeds() {
        let signal = [1.2, -0.7, 3.4, 2.1, -1.5, 0.0, 2.2, -0.3, 1.5, -2.0];
        let decay = Decay::new(0.5_f64).unwrap();
        let config = HosConfig {
            seed_mean: Some(signal[0]),
            seed_var: Some(0.0),
            ..HosConfig::default()
        };
        let kurt_seq = kurtosis_direct(&signal, 0.5, &config).unwrap();

        let mut stats = RecursiveStats::with_state(decay, signal[0], 0.0);
        for (i, &x) in signal.iter().enumerate() {
            stats.next(x);
            match stats.kurt() {
                Some(k) => assert_approx_eq!(k, kurt_seq[i], 1e-12),
                None => assert!(kurt_seq[i].is_nan()),
            }
        }
    }

    #[test]
    fn empty_estimator_has_no_estimates() {
        let decay = Decay::new(0.5_f64).unwrap();
        let stats = RecursiveStats::<f64>::new(decay);
        assert_eq!(stats.mean(), None);
        assert_eq!(stats.variance(), None);
        assert_eq!(stats.skew(), None);
        assert_eq!(stats.kurt(), None);
        assert_eq!(stats.count(), 0);
    }

    #[test]
    fn constant_input_keeps_higher_moments_undefined() {
        let decay = Decay::new(0.5_f64).unwrap();
        let mut stats = RecursiveStats::new(decay);
        for _ in 0..16 {
            stats.next(3.0);
        }
        assert_eq!(stats.mean(), Some(3.0));
        assert_eq!(stats.variance(), Some(0.0));
        assert_eq!(stats.skew(), None);
        assert_eq!(stats.kurt(), None);
    }

    #[test]
    fn reset_clears_state() {
        let decay = Decay::new(0.5_f64).unwrap();
        let mut stats = RecursiveStats::new(decay);
        stats.next(1.0).next(2.0);
        stats.reset();
        assert_eq!(stats.count(), 0);
        assert_eq!(stats.mean(), None);

        stats.next(7.0);
        assert_eq!(stats.mean(), Some(7.0));
    }
}
