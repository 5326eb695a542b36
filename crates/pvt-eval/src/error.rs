//! Evaluator errors.

use pvt_fluids::FluidError;
use thiserror::Error;

pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Oracle query failed.
    #[error("Property query failed: {0}")]
    Fluid(#[from] FluidError),

    /// Reference constants do not describe a dome (e.g. vmin >= vcrit).
    #[error("Reference invariant violated: {what}")]
    Reference { what: String },

    /// Sampling domain is empty, reversed, or non-finite.
    #[error("Invalid domain for {what}: [{start}, {end}]")]
    Domain {
        what: String,
        start: f64,
        end: f64,
    },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },
}
