use alloc::vec::Vec;

use num_traits::Float;

use crate::Decay;

/// First-order causal IIR filter realizing the forgetting recurrence.
///
/// Evaluates `y[i] = (1-α)·x[i] + α·y[i-1]` in direct form II transposed:
/// a single delay state `z` holds the feedback contribution, so each output
/// is one multiply-add followed by one state multiply. Every recursive
/// statistic in this crate is some series pushed through this kernel, which
/// is what lets the filter strategy replace the per-sample scalar update
/// with whole-signal passes.
///
/// # Examples
///
/// ```
/// use rec_statistics::{Decay, FirstOrderIir};
///
/// let decay = Decay::new(0.5_f64).unwrap();
/// let mut iir = FirstOrderIir::with_initial_output(&decay, 1.0);
/// let out = iir.apply(&[1.0, 2.0, 3.0, 4.0, 5.0]);
/// assert_eq!(out, vec![1.0, 1.5, 2.25, 3.125, 4.0625]);
/// ```
#[derive(Debug, Clone)]
pub struct FirstOrderIir<T> {
    /// Feedforward coefficient
    b0: T,
    /// Feedback coefficient
    a1: T,
    /// Delay state
    z: T,
}

impl<T: Float> FirstOrderIir<T> {
    /// Creates a filter with zero initial state.
    ///
    /// # Arguments
    ///
    /// * `decay` - The validated forgetting factor
    pub fn new(decay: &Decay<T>) -> Self {
        Self {
            b0: decay.weight(),
            a1: decay.alpha(),
            z: T::zero(),
        }
    }

    /// Creates a filter primed so the first output behaves as if the
    /// previous output had been `y_prev`.
    ///
    /// Equivalent to seeding the recurrence with `y[-1] = y_prev`: the
    /// delay state starts at `α·y_prev`.
    ///
    /// # Arguments
    ///
    /// * `decay` - The validated forgetting factor
    /// * `y_prev` - The output state at index -1
    pub fn with_initial_output(decay: &Decay<T>, y_prev: T) -> Self {
        Self {
            b0: decay.weight(),
            a1: decay.alpha(),
            z: decay.alpha() * y_prev,
        }
    }

    /// Advances the filter by one sample and returns the output.
    #[inline]
    pub fn step(&mut self, x: T) -> T {
        let y = self.b0 * x + self.z;
        self.z = self.a1 * y;
        y
    }

    /// Filters an entire signal, returning an output of the same length.
    #[inline]
    pub fn apply(&mut self, signal: &[T]) -> Vec<T> {
        signal.iter().map(|&x| self.step(x)).collect()
    }
}
