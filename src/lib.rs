//! Gradient-based parameter update rules (SGD, SGD with momentum, RMSProp and Adam) for
//! hand-rolled training loops.
//!
//! Layers expose their named parameters and gradients through [`arch::Layer`], networks hand out
//! their layers through [`arch::Network`], and every [`optimization::Optimizer`] mutates the
//! parameters in place while keeping its own per-parameter state.

pub mod arch;
pub mod error;
pub mod optimization;
pub mod tensor;

pub use error::{OptimErr, Result};
pub use tensor::{GradSet, ParamSet, Tensor};
