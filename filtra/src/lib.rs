//! Engineering utility toolbox: reactance formulas, permutation helpers and
//! a composable digital IIR filter layer (design, stability tracking and
//! zero-phase application).

pub mod array_utils;
pub mod error;
pub mod filter;
pub mod filter_design;
pub mod math;
pub mod reactance;
pub mod signal_extension;
pub mod signal_generator;

pub use error::FilterError;
pub use filter::{ChainedFilter, DigitalFilter, FilterBank, SignalFilter, SumFilter};
pub use filter_design::{BandType, DesignKind, IirSpec};
