/// Error raised by the fallible entry points of the crate.
///
/// Parameter validation happens before any computation: an invalid decay
/// constant or an empty signal fails fast and never produces partial output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Decay constant outside the open `(0, 1)` interval, or not finite.
    ///
    /// A coefficient at or beyond the boundary yields a filter that either
    /// never forgets or diverges.
    InvalidDecay,
    /// The input signal contains no samples.
    EmptySignal,
    /// The variance floor is not a positive finite number.
    InvalidVarFloor,
    /// The variance seed is negative or not finite.
    ///
    /// A negative variance state is not reachable from any valid input and
    /// would make the two evaluation strategies drift apart.
    InvalidVarSeed,
    /// The statistic order is below 3 or does not fit a 32-bit exponent.
    ///
    /// Orders 1 and 2 are the mean and variance, which have dedicated
    /// recurrences without a variance normalization.
    InvalidOrder,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidDecay => {
                write!(f, "decay constant must be finite and strictly inside (0, 1)")
            }
            Error::EmptySignal => write!(f, "signal must contain at least one sample"),
            Error::InvalidVarFloor => {
                write!(f, "variance floor must be a positive finite number")
            }
            Error::InvalidVarSeed => {
                write!(f, "variance seed must be a non-negative finite number")
            }
            Error::InvalidOrder => {
                write!(f, "statistic order must be at least 3 and fit a 32-bit exponent")
            }
        }
    }
}

impl core::error::Error for Error {}
