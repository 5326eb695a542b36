//! Property oracle errors.

use thiserror::Error;

pub type FluidResult<T> = Result<T, FluidError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// A non-positive or non-finite pressure, temperature or density.
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Malformed query: repeated known variable kinds or a quality outside [0, 1].
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// The backend cannot answer this pairing or constant.
    #[error("Not supported: {what}")]
    NotSupported { what: &'static str },

    /// CoolProp rejected the state, or a canned oracle had no answer.
    #[error("Backend error: {message}")]
    Backend { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_cause() {
        let err = FluidError::NonPhysical { what: "density" };
        assert_eq!(err.to_string(), "Non-physical value for density");

        let err = FluidError::Backend {
            message: "CoolProp failed at D=1e6".into(),
        };
        assert!(err.to_string().contains("D=1e6"));
    }
}
