#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]

extern crate alloc;

mod utils;
pub(crate) use utils::helper;

mod error;
pub use error::Error;

mod decay;
pub use decay::Decay;

mod filter;
pub use filter::FirstOrderIir;

mod mean;
pub use mean::{mean_direct, mean_filter};

mod variance;
pub use variance::{Deviation, VarianceConfig, variance_direct, variance_filter};

mod hos;
pub use hos::{
    HosConfig, UndefinedPolicy, hos_direct, hos_filter, kurtosis_direct, kurtosis_filter,
    skewness_direct, skewness_filter,
};

mod recursive_stats;
pub use recursive_stats::RecursiveStats;

mod strategy;
pub use strategy::Strategy;
