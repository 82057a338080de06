use num_traits::Float;

/// Returns the order-n standardized moment term `dev^n / var^(n/2)`
///
/// Both evaluation strategies call this helper so the division and power
/// operations are performed in the exact same order, keeping their outputs
/// bit-compatible.
///
/// # Arguments
///
/// * `dev` - The deviation of the sample from the running mean
/// * `var` - The running variance, already floored away from zero
/// * `order` - The moment order
///
/// # Returns
///
/// * `T` - The standardized moment term
#[inline]
pub fn standardized_moment<T: Float>(dev: T, var: T, order: u32) -> T {
    let num = dev.powi(order as i32);
    let den = if order % 2 == 0 {
        var.powi((order / 2) as i32)
    } else {
        var.powi(order as i32).sqrt()
    };
    num / den
}

/// Clamps tiny negative values produced by floating-point cancellation to zero
///
/// # Arguments
///
/// * `var` - A running variance sample
///
/// # Returns
///
/// * `T` - The variance, never negative
#[inline]
pub fn non_negative<T: Float>(var: T) -> T {
    if var < T::zero() { T::zero() } else { var }
}
