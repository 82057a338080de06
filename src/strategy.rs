use alloc::vec::Vec;

use num_traits::Float;

use crate::{
    Error, HosConfig, VarianceConfig, kurtosis_direct, kurtosis_filter, mean_direct, mean_filter,
    skewness_direct, skewness_filter, variance_direct, variance_filter,
};

/// Evaluation strategy selector.
///
/// Both strategies realize the same recurrences and agree within
/// floating-point tolerance; the choice is purely about how the signal is
/// traversed. Useful when the strategy is a configuration value rather than
/// a call-site decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Reference scalar loop, one state update per sample.
    Direct,
    /// Whole-signal first-order IIR filtering passes.
    #[default]
    Filter,
}

impl Strategy {
    /// Computes the recursive mean with the selected strategy.
    ///
    /// See [`mean_direct`] and [`mean_filter`].
    pub fn mean<T: Float>(self, signal: &[T], alpha: T, seed: Option<T>) -> Result<Vec<T>, Error> {
        match self {
            Strategy::Direct => mean_direct(signal, alpha, seed),
            Strategy::Filter => mean_filter(signal, alpha, seed),
        }
    }

    /// Computes the recursive variance with the selected strategy.
    ///
    /// See [`variance_direct`] and [`variance_filter`].
    pub fn variance<T: Float>(
        self,
        signal: &[T],
        alpha: T,
        config: &VarianceConfig<T>,
    ) -> Result<Vec<T>, Error> {
        match self {
            Strategy::Direct => variance_direct(signal, alpha, config),
            Strategy::Filter => variance_filter(signal, alpha, config),
        }
    }

    /// Computes the recursive skewness with the selected strategy.
    ///
    /// See [`skewness_direct`] and [`skewness_filter`].
    pub fn skewness<T: Float>(
        self,
        signal: &[T],
        alpha: T,
        config: &HosConfig<T>,
    ) -> Result<Vec<T>, Error> {
        match self {
            Strategy::Direct => skewness_direct(signal, alpha, config),
            Strategy::Filter => skewness_filter(signal, alpha, config),
        }
    }

    /// Computes the recursive kurtosis with the selected strategy.
    ///
    /// See [`kurtosis_direct`] and [`kurtosis_filter`].
    pub fn kurtosis<T: Float>(
        self,
        signal: &[T],
        alpha: T,
        config: &HosConfig<T>,
    ) -> Result<Vec<T>, Error> {
        match self {
            Strategy::Direct => kurtosis_direct(signal, alpha, config),
            Strategy::Filter => kurtosis_filter(signal, alpha, config),
        }
    }
}
